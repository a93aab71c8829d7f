//! The `ProjectStore` trait -- the public API for project persistence.
//!
//! Consumers depend on this trait rather than on [`JsonStore`](crate::JsonStore)
//! so that tests and alternative backends can be substituted.

use chrono::{Local, NaiveDateTime};

use kuchler_core::matrix::PhysiognomicMatrix;
use kuchler_core::plot::{Coordinates, Plot, Project};

use crate::error::Result;

/// Input for recording a plot. The formula and description are derived by
/// the store, never supplied by the caller.
#[derive(Debug, Clone)]
pub struct NewPlot {
    pub coordinates: Coordinates,
    pub matrix: PhysiognomicMatrix,
    pub recorded_at: NaiveDateTime,
}

impl NewPlot {
    /// A plot recorded at the current local time.
    pub fn now(coordinates: Coordinates, matrix: PhysiognomicMatrix) -> Self {
        Self {
            coordinates,
            matrix,
            recorded_at: Local::now().naive_local(),
        }
    }
}

/// Project and plot persistence.
///
/// Every mutating method is durable once it returns `Ok`.
pub trait ProjectStore {
    /// All projects, in creation order.
    fn projects(&self) -> Result<Vec<Project>>;

    /// A project by exact name.
    fn project(&self, name: &str) -> Result<Project>;

    /// Creates an empty project. The name is trimmed and must be unique.
    fn create_project(&mut self, name: &str) -> Result<Project>;

    /// Deletes a project and all its plots, returning it.
    fn delete_project(&mut self, name: &str) -> Result<Project>;

    /// Validates and records a plot, computing its formula and description.
    ///
    /// Returns the 1-based plot number and the stored record.
    fn add_plot(&mut self, project: &str, plot: NewPlot) -> Result<(usize, Plot)>;

    /// Deletes a plot by 1-based number, returning it. Later plots shift down.
    fn delete_plot(&mut self, project: &str, number: usize) -> Result<Plot>;
}
