//! Command-line interface for line-ratio.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **identify** (alias **match**): Match observed wavelengths against a calibration line list
//! - **catalog**: List, show, or export the calibration line lists
//!
//! ## Usage
//!
//! ```text
//! # Exploratory pass against the embedded air wavelengths
//! line-ratio identify 5419.57 7067.71 7209.96 7279.55 9538.86 --tolerance 0.003
//!
//! # Confirmation pass with redshift estimation in a window
//! line-ratio identify --input lines.tsv --tolerance 0.001 --redshift --z-low 0.05 --z-high 0.5
//!
//! # JSON output for scripting
//! line-ratio --format json identify --input lines.tsv --redshift
//!
//! # Show the vacuum line list
//! line-ratio catalog show vacuum
//! ```

use clap::{Parser, Subcommand};

pub mod catalog;
pub mod identify;

#[derive(Parser)]
#[command(name = "line-ratio")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Identify emission lines by matching redshift-invariant wavelength ratios")]
#[command(
    long_about = "line-ratio helps you identify emission lines in an observed spectrum.\n\nWavelength ratios between two lines do not change with redshift, so every pair of observed lines is compared against every pair of catalog lines. It reports:\n- Every observed pair whose ratio matches a catalog pair within tolerance\n- Optionally, the redshift implied by each match and the aggregate redshift"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Identify observed lines by ratio matching against a calibration list
    #[command(visible_alias = "match")]
    Identify(identify::IdentifyArgs),

    /// Inspect the calibration line catalog
    Catalog(catalog::CatalogArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
