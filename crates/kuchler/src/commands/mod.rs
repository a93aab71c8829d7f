//! Command handlers, one module per subcommand.

pub mod classes;
pub mod completion;
pub mod config_cmd;
pub mod export;
pub mod formula;
pub mod init;
pub mod plot;
pub mod project;
pub mod version;

use anyhow::{Context, Result};

use kuchler_core::matrix::PhysiognomicMatrix;
use kuchler_formula::parser::{load_matrix, parse_cells};

use crate::cli::MatrixInput;

/// Reads the matrix named by `--cell` or `--matrix-file`.
///
/// No input at all yields an empty matrix.
pub fn read_matrix(input: &MatrixInput) -> Result<PhysiognomicMatrix> {
    match &input.matrix_file {
        Some(path) => load_matrix(path)
            .with_context(|| format!("failed to read matrix from {}", path.display())),
        None => Ok(parse_cells(input.cells.as_slice())?),
    }
}
