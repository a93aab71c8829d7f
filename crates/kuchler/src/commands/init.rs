//! `kuchler init` -- create a `.kuchler` data directory.

use std::env;
use std::fs;

use anyhow::{Context, Result};
use tracing::info;

use kuchler_config::config::{CONFIG_FILE, KuchlerConfig, load_config, save_config};
use kuchler_config::data_dir::ensure_data_dir;
use kuchler_storage::JsonStore;

use crate::cli::InitArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `kuchler init` command.
///
/// Existing configuration and data are kept unless `--force` is given, in
/// which case only the configuration is reset.
pub fn run(ctx: &RuntimeContext, args: &InitArgs) -> Result<()> {
    // `--data-dir` names the data directory itself; a path argument names
    // the directory that will contain `.kuchler/`.
    let data_dir = match (&args.path, &ctx.data_dir) {
        (None, Some(dir)) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            dir.clone()
        }
        (path, _) => {
            let base = match path {
                Some(p) => p.clone(),
                None => env::current_dir().context("failed to get current directory")?,
            };
            ensure_data_dir(&base).with_context(|| {
                format!("failed to create data directory in {}", base.display())
            })?
        }
    };

    let config_path = data_dir.join(CONFIG_FILE);
    let cfg = if args.force || !config_path.exists() {
        let cfg = KuchlerConfig::default();
        save_config(&data_dir, &cfg)?;
        info!(path = ?config_path, "wrote default configuration");
        cfg
    } else {
        load_config(&data_dir)?
    };

    let data_path = cfg.data_path(&data_dir);
    let store = JsonStore::open(&data_path)?;
    if !data_path.exists() {
        store.save()?;
    }

    if ctx.json {
        output_json(&serde_json::json!({
            "data_dir": data_dir,
            "config": config_path,
            "data_file": data_path,
        }));
    } else if !ctx.quiet {
        println!("Initialized kuchler data directory at {}", data_dir.display());
    }

    Ok(())
}
