//! `kuchler formula` -- compute a formula without touching the store.

use anyhow::Result;

use kuchler_ui::styles::render_formula;

use crate::cli::FormulaArgs;
use crate::commands::read_matrix;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `kuchler formula` command.
pub fn run(ctx: &RuntimeContext, args: &FormulaArgs) -> Result<()> {
    let matrix = read_matrix(&args.matrix)?;
    let output = kuchler_formula::build(&matrix);

    if ctx.json {
        output_json(&output);
    } else {
        println!("{}", render_formula(&output.formula));
        println!("{}", output.description);
    }
    Ok(())
}
