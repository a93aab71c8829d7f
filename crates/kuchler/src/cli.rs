//! Clap CLI definitions for the `kuchler` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// kuchler -- Küchler physiognomic field records.
///
/// Records vegetation plots as physiognomic matrices and derives the Küchler
/// (1988) formula and a narrative description for each.
#[derive(Parser, Debug)]
#[command(
    name = "kuchler",
    about = "Record vegetation plots and derive Küchler physiognomic formulas",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Data directory (default: $KUCHLER_DIR, or the nearest .kuchler/ above the cwd).
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a .kuchler data directory here.
    Init(InitArgs),

    /// Manage projects.
    Project(ProjectArgs),

    /// Record, list and delete plots.
    Plot(PlotArgs),

    /// Compute a formula and description without recording anything.
    Formula(FormulaArgs),

    /// Show the code tables of the notation.
    Classes(ClassesArgs),

    /// Export a project's plots to CSV.
    Export(ExportArgs),

    /// Show or change configuration.
    Config(ConfigArgs),

    /// Print version information.
    Version,

    /// Generate shell completions.
    Completion(CompletionArgs),
}

// ---------------------------------------------------------------------------
// Shared argument groups
// ---------------------------------------------------------------------------

/// Where a physiognomic matrix comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct MatrixInput {
    /// Matrix cell as KEY=CODE, e.g. `D4=p` (repeatable, or comma-separated).
    #[arg(short = 'c', long = "cell", value_name = "KEY=CODE")]
    pub cells: Vec<String>,

    /// Read the matrix from a JSON or TOML file.
    #[arg(short = 'f', long, value_name = "FILE", conflicts_with = "cells")]
    pub matrix_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

/// Arguments for `kuchler init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory).
    pub path: Option<PathBuf>,

    /// Overwrite an existing configuration file.
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// project
// ---------------------------------------------------------------------------

/// Arguments for `kuchler project`.
#[derive(Args, Debug)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub command: ProjectCommands,
}

/// Project subcommands.
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Create an empty project.
    #[command(alias = "new")]
    Create(ProjectNameArgs),
    /// List projects.
    #[command(alias = "ls")]
    List,
    /// Show a project and its plots.
    Show(ProjectNameArgs),
    /// Delete a project and all of its plots.
    #[command(alias = "rm")]
    Delete(ProjectNameArgs),
}

/// A single project name.
#[derive(Args, Debug)]
pub struct ProjectNameArgs {
    /// Project name.
    pub name: String,
}

// ---------------------------------------------------------------------------
// plot
// ---------------------------------------------------------------------------

/// Arguments for `kuchler plot`.
#[derive(Args, Debug)]
pub struct PlotArgs {
    #[command(subcommand)]
    pub command: PlotCommands,
}

/// Plot subcommands.
#[derive(Subcommand, Debug)]
pub enum PlotCommands {
    /// Record a plot in a project.
    Add(PlotAddArgs),
    /// List the plots of a project.
    #[command(alias = "ls")]
    List(ProjectNameArgs),
    /// Show one plot in detail.
    Show(PlotRefArgs),
    /// Delete one plot.
    #[command(alias = "rm")]
    Delete(PlotRefArgs),
}

/// Arguments for `kuchler plot add`.
#[derive(Args, Debug)]
pub struct PlotAddArgs {
    /// Project to record into.
    pub project: String,

    /// Latitude in decimal degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in decimal degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,

    /// Altitude in metres.
    #[arg(long, allow_negative_numbers = true)]
    pub alt: f64,

    #[command(flatten)]
    pub matrix: MatrixInput,
}

/// A plot addressed by project and 1-based number.
#[derive(Args, Debug)]
pub struct PlotRefArgs {
    /// Project name.
    pub project: String,

    /// Plot number, starting at 1.
    pub number: usize,
}

// ---------------------------------------------------------------------------
// formula / classes
// ---------------------------------------------------------------------------

/// Arguments for `kuchler formula`.
#[derive(Args, Debug)]
pub struct FormulaArgs {
    #[command(flatten)]
    pub matrix: MatrixInput,
}

/// Arguments for `kuchler classes`.
#[derive(Args, Debug)]
pub struct ClassesArgs {
    /// Only show one table.
    #[arg(value_enum)]
    pub table: Option<ClassTable>,
}

/// The code tables of the notation.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassTable {
    Forms,
    Heights,
    Coverage,
    Leaf,
}

// ---------------------------------------------------------------------------
// export
// ---------------------------------------------------------------------------

/// Arguments for `kuchler export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Project to export.
    pub project: String,

    /// Output file (default: <exports-dir>/<project>_<timestamp>.csv).
    #[arg(short = 'o', long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

/// Arguments for `kuchler config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show all effective configuration values.
    #[command(alias = "list")]
    Show,
    /// Get a configuration value.
    Get(ConfigGetArgs),
    /// Set a configuration value in config.yaml.
    Set(ConfigSetArgs),
}

/// Arguments for `kuchler config get`.
#[derive(Args, Debug)]
pub struct ConfigGetArgs {
    /// Configuration key.
    pub key: String,
}

/// Arguments for `kuchler config set`.
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Configuration key.
    pub key: String,
    /// New value.
    pub value: String,
}

// ---------------------------------------------------------------------------
// completion
// ---------------------------------------------------------------------------

/// Arguments for `kuchler completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate Bash completions.
    Bash,
    /// Generate Zsh completions.
    Zsh,
    /// Generate Fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn plot_add_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "kuchler", "plot", "add", "Cerrado", "--lat", "-15.79", "--lon", "-47.88", "--alt",
            "-2.5", "-c", "D4=p", "-c", "D3=i",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Plot(PlotArgs { command: PlotCommands::Add(args) })) => {
                assert_eq!(args.lat, -15.79);
                assert_eq!(args.lon, -47.88);
                assert_eq!(args.alt, -2.5);
                assert_eq!(args.matrix.cells, vec!["D4=p", "D3=i"]);
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn plot_add_requires_all_coordinates() {
        for missing in ["--lat", "--lon", "--alt"] {
            let mut argv = vec!["kuchler", "plot", "add", "Cerrado", "-c", "D4=p"];
            for flag in ["--lat", "--lon", "--alt"] {
                if flag != missing {
                    argv.extend([flag, "1"]);
                }
            }
            let err = Cli::try_parse_from(argv).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument, "{missing}");
        }
    }

    #[test]
    fn cells_and_matrix_file_conflict() {
        let result = Cli::try_parse_from(["kuchler", "formula", "-c", "D4=p", "-f", "m.json"]);
        assert!(result.is_err());
    }
}
