//! Core types for the Küchler physiognomic toolkit.
//!
//! Holds the closed code tables of the notation (growth forms, height
//! classes, coverage classes, leaf traits), the typed physiognomic matrix,
//! the project/plot records persisted by the store, and their validation.

pub mod codes;
pub mod csv;
pub mod matrix;
pub mod plot;
pub mod validation;
