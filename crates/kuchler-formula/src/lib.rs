//! Formula engine for the Küchler (1988) physiognomic notation.
//!
//! Turns a [`PhysiognomicMatrix`](kuchler_core::matrix::PhysiognomicMatrix)
//! into the compact symbolic formula (`D4p32iK3p`) and into a narrative
//! description of the vegetation. Both functions are pure: they depend only
//! on the fixed canonical orders of forms and heights, never on the order in
//! which cells were filled.

pub mod engine;
pub mod parser;
pub mod types;

pub use engine::{build, build_description, build_formula};
pub use types::{FormulaError, FormulaOutput};
