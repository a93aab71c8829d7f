//! Terminal UI helpers for the kuchler CLI.
//!
//! Ayu-themed coloring of formulas and code tables, plus terminal detection.

pub mod styles;
pub mod terminal;
