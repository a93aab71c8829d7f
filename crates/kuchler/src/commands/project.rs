//! `kuchler project` -- create, list, show and delete projects.

use anyhow::Result;

use kuchler_storage::ProjectStore;

use crate::cli::{ProjectArgs, ProjectCommands};
use crate::context::RuntimeContext;
use crate::output::{PLOT_HEADERS, PlotView, output_json, output_table, plot_rows};

/// Execute the `kuchler project` command.
pub fn run(ctx: &RuntimeContext, args: &ProjectArgs) -> Result<()> {
    let mut store = ctx.open_store()?;

    match &args.command {
        ProjectCommands::Create(a) => {
            let project = store.create_project(&a.name)?;
            if ctx.json {
                output_json(&project);
            } else if !ctx.quiet {
                println!("Created project '{}'", project.name);
            }
        }

        ProjectCommands::List => {
            let projects = store.projects()?;
            if ctx.json {
                let summary: Vec<_> = projects
                    .iter()
                    .map(|p| serde_json::json!({ "name": p.name, "plots": p.plots.len() }))
                    .collect();
                output_json(&summary);
            } else if projects.is_empty() {
                println!("No projects yet. Create one with 'kuchler project create <name>'.");
            } else {
                let rows: Vec<Vec<String>> = projects
                    .iter()
                    .map(|p| vec![p.name.clone(), p.plots.len().to_string()])
                    .collect();
                output_table(&["NAME", "PLOTS"], &rows);
            }
        }

        ProjectCommands::Show(a) => {
            let project = store.project(&a.name)?;
            if ctx.json {
                let plots: Vec<PlotView<'_>> = project
                    .plots
                    .iter()
                    .enumerate()
                    .map(|(i, plot)| PlotView { number: i + 1, plot })
                    .collect();
                output_json(&serde_json::json!({ "name": project.name, "plots": plots }));
            } else {
                println!("{} ({} plots)", project.name, project.plots.len());
                if !project.plots.is_empty() {
                    println!();
                    output_table(&PLOT_HEADERS, &plot_rows(&project.plots));
                }
            }
        }

        ProjectCommands::Delete(a) => {
            let removed = store.delete_project(&a.name)?;
            if ctx.json {
                output_json(&serde_json::json!({
                    "deleted": removed.name,
                    "plots": removed.plots.len(),
                }));
            } else if !ctx.quiet {
                println!(
                    "Deleted project '{}' ({} plots)",
                    removed.name,
                    removed.plots.len()
                );
            }
        }
    }

    Ok(())
}
