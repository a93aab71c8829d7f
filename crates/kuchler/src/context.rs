//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds what every command handler needs: the global
//! flags, and lazily the data directory, its configuration and the store.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use kuchler_config::config::{ColorMode, KuchlerConfig, load_config};
use kuchler_config::data_dir::{find_data_dir, find_data_dir_or_error};
use kuchler_storage::JsonStore;

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Explicit `--data-dir` value.
    pub data_dir: Option<PathBuf>,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    pub fn from_global_args(global: &GlobalArgs) -> Self {
        Self {
            data_dir: global.data_dir.clone(),
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
        }
    }

    /// Applies the output settings of `config.yaml` when a data directory is
    /// present. Flags given on the command line still win.
    pub fn apply_config(&mut self) {
        let Some(dir) = self.resolve_data_dir() else {
            return;
        };
        match load_config(&dir) {
            Ok(cfg) => {
                self.json |= cfg.json;
                kuchler_ui::terminal::force_color(match cfg.color {
                    ColorMode::Auto => None,
                    ColorMode::Always => Some(true),
                    ColorMode::Never => Some(false),
                });
            }
            // Commands that need the config report the error themselves.
            Err(e) => warn!(error = %e, "ignoring unreadable configuration"),
        }
    }

    /// Returns the data directory: `--data-dir`, else discovery from the cwd.
    pub fn resolve_data_dir(&self) -> Option<PathBuf> {
        if let Some(ref p) = self.data_dir {
            return Some(p.clone());
        }
        let cwd = env::current_dir().ok()?;
        find_data_dir(&cwd)
    }

    /// Like [`resolve_data_dir`](Self::resolve_data_dir), but a missing
    /// directory is an error.
    pub fn require_data_dir(&self) -> Result<PathBuf> {
        if let Some(ref p) = self.data_dir {
            anyhow::ensure!(p.is_dir(), "data directory {} does not exist", p.display());
            return Ok(p.clone());
        }
        let cwd = env::current_dir().context("failed to get current directory")?;
        Ok(find_data_dir_or_error(&cwd)?)
    }

    /// Loads the configuration of the data directory.
    pub fn config(&self) -> Result<(PathBuf, KuchlerConfig)> {
        let dir = self.require_data_dir()?;
        let cfg = load_config(&dir)
            .with_context(|| format!("failed to load configuration from {}", dir.display()))?;
        Ok((dir, cfg))
    }

    /// Opens the projects store named by the configuration.
    pub fn open_store(&self) -> Result<JsonStore> {
        let (dir, cfg) = self.config()?;
        let path = cfg.data_path(&dir);
        debug!(?path, "resolved data file");
        JsonStore::open(&path).with_context(|| format!("failed to open {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_with(dir: Option<PathBuf>) -> RuntimeContext {
        RuntimeContext {
            data_dir: dir,
            json: false,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn explicit_data_dir_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = ctx_with(Some(tmp.path().to_path_buf()));
        assert_eq!(ctx.resolve_data_dir().unwrap(), tmp.path());
        assert_eq!(ctx.require_data_dir().unwrap(), tmp.path());
    }

    #[test]
    fn missing_explicit_data_dir_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = ctx_with(Some(tmp.path().join("absent")));
        let err = ctx.require_data_dir().unwrap_err();
        assert!(err.to_string().contains("does not exist"), "{err}");
    }

    #[test]
    fn open_store_uses_configured_file() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = ctx_with(Some(tmp.path().to_path_buf()));
        let store = ctx.open_store().unwrap();
        assert_eq!(store.path().unwrap(), tmp.path().join("data.json"));
    }
}
