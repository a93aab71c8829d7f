//! `kuchler export` -- write a project's plots to CSV.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Local;
use tracing::info;

use kuchler_core::csv::write_plots;
use kuchler_storage::ProjectStore;

use crate::cli::ExportArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Default export file name: `<project>_<YYYYmmdd_HHMMSS>.csv`.
fn default_file_name(project: &str, stamp: &str) -> String {
    let safe: String = project
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{}_{}.csv", safe, stamp)
}

/// Execute the `kuchler export` command.
pub fn run(ctx: &RuntimeContext, args: &ExportArgs) -> Result<()> {
    let (data_dir, cfg) = ctx.config()?;
    let store = ctx.open_store()?;
    let project = store.project(&args.project)?;

    if project.plots.is_empty() {
        bail!("project '{}' has no plots to export", project.name);
    }

    let path: PathBuf = match &args.out {
        Some(p) => p.clone(),
        None => {
            let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
            cfg.exports_path(&data_dir)
                .join(default_file_name(&project.name, &stamp))
        }
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_plots(&mut writer, &project.plots)
        .and_then(|()| writer.flush())
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(?path, plots = project.plots.len(), "exported project");

    if ctx.json {
        output_json(&serde_json::json!({
            "project": project.name,
            "path": path,
            "plots": project.plots.len(),
        }));
    } else if !ctx.quiet {
        println!(
            "Exported {} plots from '{}' to {}",
            project.plots.len(),
            project.name,
            path.display()
        );
    }
    Ok(())
}
