//! Formula engine output and error types.

use kuchler_core::codes::{CoverageClass, GrowthForm, HeightClass};
use kuchler_core::matrix::MatrixError;
use serde::Serialize;

/// Both derived strings of one matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormulaOutput {
    pub formula: String,
    pub description: String,
}

/// Heights of one form sharing a coverage class, tallest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageGroup {
    pub coverage: CoverageClass,
    pub heights: Vec<HeightClass>,
}

impl CoverageGroup {
    /// The group's tallest height; groups are ordered by it.
    pub fn tallest(&self) -> Option<HeightClass> {
        self.heights.first().copied()
    }
}

/// All coverage groups of one growth form, ordered by tallest height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormGroups {
    pub form: GrowthForm,
    pub groups: Vec<CoverageGroup>,
}

/// Errors that can occur while reading matrix input.
#[derive(Debug, thiserror::Error)]
pub enum FormulaError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
