//! Storage layer for kuchler projects and plots.
//!
//! Consumers program against the [`ProjectStore`] trait; [`JsonStore`] is the
//! file-backed implementation. The whole projects document is loaded once at
//! startup and written back after every mutation.

pub mod error;
pub mod json_store;
pub mod traits;

pub use error::{Result, StorageError};
pub use json_store::JsonStore;
pub use traits::{NewPlot, ProjectStore};
