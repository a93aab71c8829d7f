//! Project and plot records.
//!
//! Field names on the wire match the data file written by the field
//! application (`matriz_fisionomica`, `formula_kuchler`, ...), so an existing
//! `data.json` loads unchanged.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::matrix::PhysiognomicMatrix;

/// Date format stored in `data_registro`.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Time format stored in `horario_registro`.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Geographic position of a plot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    /// Decimal degrees, -90..=90.
    pub latitude: f64,
    /// Decimal degrees, -180..=180.
    pub longitude: f64,
    /// Metres above sea level.
    pub altitude: f64,
}

/// One recorded field observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    #[serde(default)]
    pub latitude: f64,

    #[serde(default)]
    pub longitude: f64,

    #[serde(default)]
    pub altitude: f64,

    #[serde(rename = "matriz_fisionomica", default)]
    pub matrix: PhysiognomicMatrix,

    /// Recording date, `dd/mm/YYYY`.
    #[serde(rename = "data_registro", default)]
    pub recorded_date: String,

    /// Recording time, `HH:MM:SS`.
    #[serde(rename = "horario_registro", default)]
    pub recorded_time: String,

    #[serde(rename = "formula_kuchler", default)]
    pub formula: String,

    #[serde(rename = "descricao_fisionomia", default)]
    pub description: String,
}

impl Plot {
    /// Assembles a plot record; `formula` and `description` are stored verbatim.
    pub fn new(
        coordinates: Coordinates,
        matrix: PhysiognomicMatrix,
        recorded_at: NaiveDateTime,
        formula: String,
        description: String,
    ) -> Self {
        Self {
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            altitude: coordinates.altitude,
            matrix,
            recorded_date: recorded_at.format(DATE_FORMAT).to_string(),
            recorded_time: recorded_at.format(TIME_FORMAT).to_string(),
            formula,
            description,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude,
        }
    }
}

/// A named collection of plots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,

    #[serde(default)]
    pub plots: Vec<Plot>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plots: Vec::new(),
        }
    }

    /// Looks up a plot by its 1-based number.
    pub fn plot(&self, number: usize) -> Option<&Plot> {
        number.checked_sub(1).and_then(|i| self.plots.get(i))
    }
}

/// Root of the data file.
///
/// Top-level keys other than `projects` (the mobile app keeps its
/// `settings` there) are carried through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectsDocument {
    #[serde(default)]
    pub projects: Vec<Project>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ProjectsDocument {
    pub fn project(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    pub fn project_mut(&mut self, name: &str) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.name == name)
    }
}
