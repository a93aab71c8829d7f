//! [`JsonStore`] -- JSON-file-backed storage implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use kuchler_core::plot::{Plot, Project, ProjectsDocument};
use kuchler_core::validation::{validate_plot, validate_project_name};

use crate::error::{Result, StorageError};
use crate::traits::{NewPlot, ProjectStore};

/// File-backed implementation of [`ProjectStore`].
///
/// The document is read once by [`JsonStore::open`] and rewritten in full
/// after each mutation, through a temporary file renamed over the original.
#[derive(Debug, Default)]
pub struct JsonStore {
    /// `None` for in-memory stores.
    path: Option<PathBuf>,
    doc: ProjectsDocument,
}

impl JsonStore {
    /// Opens the data file at `path`. A missing or blank file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!(?path, "opening projects data file");

        let doc = match std::fs::read_to_string(path) {
            Ok(content) if content.trim().is_empty() => ProjectsDocument::default(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(?path, "data file missing, starting empty");
                ProjectsDocument::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            doc,
        })
    }

    /// An in-memory store that never touches the filesystem (useful for tests).
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Path of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Writes the document back to disk (no-op for in-memory stores).
    pub fn save(&self) -> Result<()> {
        self.write_doc(&self.doc)
    }

    fn write_doc(&self, doc: &ProjectsDocument) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut tmp, formatter);
        doc.serialize(&mut ser)?;
        tmp.write_all(b"\n")?;
        tmp.persist(path).map_err(|e| e.error)?;

        info!(?path, projects = doc.projects.len(), "saved projects data file");
        Ok(())
    }

    /// Applies `change` to a copy of the document and keeps the copy only if
    /// it was written. A failed write leaves the store as it was.
    fn commit<T>(&mut self, change: impl FnOnce(&mut ProjectsDocument) -> Result<T>) -> Result<T> {
        let mut next = self.doc.clone();
        let value = change(&mut next)?;
        self.write_doc(&next)?;
        self.doc = next;
        Ok(value)
    }
}

fn find_project_mut<'a>(doc: &'a mut ProjectsDocument, name: &str) -> Result<&'a mut Project> {
    doc.project_mut(name.trim())
        .ok_or_else(|| StorageError::not_found("project", name.trim()))
}

impl ProjectStore for JsonStore {
    fn projects(&self) -> Result<Vec<Project>> {
        Ok(self.doc.projects.clone())
    }

    fn project(&self, name: &str) -> Result<Project> {
        let name = name.trim();
        self.doc
            .project(name)
            .cloned()
            .ok_or_else(|| StorageError::not_found("project", name))
    }

    fn create_project(&mut self, name: &str) -> Result<Project> {
        let name = validate_project_name(name)?;
        if self.doc.project(name).is_some() {
            return Err(StorageError::already_exists("project", name));
        }

        let project = Project::new(name);
        self.commit(|doc| {
            doc.projects.push(project.clone());
            Ok(())
        })?;
        debug!(project = name, "created project");
        Ok(project)
    }

    fn delete_project(&mut self, name: &str) -> Result<Project> {
        let name = name.trim();
        let removed = self.commit(|doc| {
            let index = doc
                .projects
                .iter()
                .position(|p| p.name == name)
                .ok_or_else(|| StorageError::not_found("project", name))?;
            Ok(doc.projects.remove(index))
        })?;
        debug!(project = name, plots = removed.plots.len(), "deleted project");
        Ok(removed)
    }

    fn add_plot(&mut self, project: &str, plot: NewPlot) -> Result<(usize, Plot)> {
        validate_plot(&plot.coordinates, &plot.matrix)?;

        let output = kuchler_formula::build(&plot.matrix);
        let record = Plot::new(
            plot.coordinates,
            plot.matrix,
            plot.recorded_at,
            output.formula,
            output.description,
        );

        let number = self.commit(|doc| {
            let target = find_project_mut(doc, project)?;
            target.plots.push(record.clone());
            Ok(target.plots.len())
        })?;
        debug!(project, number, formula = %record.formula, "recorded plot");
        Ok((number, record))
    }

    fn delete_plot(&mut self, project: &str, number: usize) -> Result<Plot> {
        let removed = self.commit(|doc| {
            let target = find_project_mut(doc, project)?;
            let index = number
                .checked_sub(1)
                .filter(|i| *i < target.plots.len())
                .ok_or_else(|| {
                    StorageError::not_found("plot", format!("{} #{number}", project.trim()))
                })?;
            Ok(target.plots.remove(index))
        })?;
        debug!(project, number, "deleted plot");
        Ok(removed)
    }
}
