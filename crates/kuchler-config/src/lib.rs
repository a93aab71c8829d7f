//! Configuration management for kuchler.
//!
//! This crate loads `.kuchler/config.yaml` (layered with `KUCHLER_*`
//! environment overrides), saves it back, and discovers the `.kuchler/`
//! data directory in the filesystem.

pub mod config;
pub mod data_dir;
