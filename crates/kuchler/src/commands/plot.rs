//! `kuchler plot` -- record, list, show and delete plots.

use anyhow::{Context, Result};

use kuchler_core::plot::Coordinates;
use kuchler_storage::{NewPlot, ProjectStore};
use kuchler_ui::styles::{render_formula, render_pass_icon};

use crate::cli::{PlotAddArgs, PlotArgs, PlotCommands};
use crate::commands::read_matrix;
use crate::context::RuntimeContext;
use crate::output::{
    PLOT_HEADERS, PlotView, format_plot_detail, output_json, output_table, plot_rows,
};

/// Execute the `kuchler plot` command.
pub fn run(ctx: &RuntimeContext, args: &PlotArgs) -> Result<()> {
    match &args.command {
        PlotCommands::Add(a) => add(ctx, a),

        PlotCommands::List(a) => {
            let project = ctx.open_store()?.project(&a.name)?;
            if ctx.json {
                let plots: Vec<PlotView<'_>> = project
                    .plots
                    .iter()
                    .enumerate()
                    .map(|(i, plot)| PlotView { number: i + 1, plot })
                    .collect();
                output_json(&plots);
            } else if project.plots.is_empty() {
                println!("Project '{}' has no plots yet.", project.name);
            } else {
                output_table(&PLOT_HEADERS, &plot_rows(&project.plots));
            }
            Ok(())
        }

        PlotCommands::Show(a) => {
            let project = ctx.open_store()?.project(&a.project)?;
            let plot = project
                .plot(a.number)
                .with_context(|| format!("plot #{} not found in '{}'", a.number, a.project))?;
            if ctx.json {
                output_json(&PlotView { number: a.number, plot });
            } else {
                println!("{}", format_plot_detail(a.number, plot));
            }
            Ok(())
        }

        PlotCommands::Delete(a) => {
            let mut store = ctx.open_store()?;
            let removed = store.delete_plot(&a.project, a.number)?;
            if ctx.json {
                output_json(&PlotView { number: a.number, plot: &removed });
            } else if !ctx.quiet {
                println!("Deleted plot #{} ({}) from '{}'", a.number, removed.formula, a.project);
            }
            Ok(())
        }
    }
}

fn add(ctx: &RuntimeContext, args: &PlotAddArgs) -> Result<()> {
    let matrix = read_matrix(&args.matrix)?;
    let coordinates = Coordinates {
        latitude: args.lat,
        longitude: args.lon,
        altitude: args.alt,
    };

    let mut store = ctx.open_store()?;
    let (number, plot) = store.add_plot(&args.project, NewPlot::now(coordinates, matrix))?;

    if ctx.json {
        output_json(&PlotView { number, plot: &plot });
    } else if !ctx.quiet {
        println!(
            "{} Recorded plot #{} in '{}': {}",
            render_pass_icon(),
            number,
            args.project,
            render_formula(&plot.formula)
        );
        println!("{}", plot.description);
    }
    Ok(())
}
