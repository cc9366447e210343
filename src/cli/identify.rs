use std::path::{Path, PathBuf};

use clap::Args;

use crate::catalog::store::{LineCatalog, LineList};
use crate::cli::OutputFormat;
use crate::core::line::ObservedLine;
use crate::matching::engine::DEFAULT_TOLERANCE;
use crate::matching::redshift::{DEFAULT_Z_HIGH, DEFAULT_Z_LOW};
use crate::matching::{
    DuplicateNamePolicy, MatchOutcome, MatchingConfig, RatioMatcher, RedshiftOptions,
    RedshiftOutcome,
};
use crate::parsing;

/// Line list used when neither --list nor --calibration is given
pub const DEFAULT_LIST: &str = "air";

#[derive(Args)]
pub struct IdentifyArgs {
    /// Observed wavelengths, in spectrum order
    #[arg(conflicts_with = "input", required_unless_present = "input")]
    pub wavelengths: Vec<f64>,

    /// File of observed wavelengths (TSV, CSV, or one value per row)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Input format for --input and --calibration (auto-detected by default)
    #[arg(long)]
    pub input_format: Option<InputFormat>,

    /// Calibration line list ID from the catalog
    #[arg(short, long, default_value = DEFAULT_LIST)]
    pub list: String,

    /// Path to custom JSON catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Path to a calibration table (name, wavelength) used instead of the catalog
    #[arg(long, conflicts_with = "catalog")]
    pub calibration: Option<PathBuf>,

    /// Relative ratio tolerance (0.003-0.005 exploratory, 0.001 confirmation)
    #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// Estimate redshift per match and in aggregate
    #[arg(short = 'z', long)]
    pub redshift: bool,

    /// Lowest accepted candidate redshift (inclusive)
    #[arg(long, default_value_t = DEFAULT_Z_LOW, allow_negative_numbers = true)]
    pub z_low: f64,

    /// Highest accepted candidate redshift (inclusive)
    #[arg(long, default_value_t = DEFAULT_Z_HIGH, allow_negative_numbers = true)]
    pub z_high: f64,

    /// Fail if the calibration list repeats a line name
    #[arg(long)]
    pub strict_names: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum InputFormat {
    Tsv,
    Csv,
}

impl InputFormat {
    fn delimiter(self) -> char {
        match self {
            Self::Tsv => '\t',
            Self::Csv => ',',
        }
    }
}

/// Execute identify subcommand
///
/// # Errors
///
/// Returns an error if the inputs cannot be loaded or are invalid.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: IdentifyArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let observed = load_observed(&args)?;
    let list = load_calibration(&args)?;

    if verbose {
        eprintln!(
            "Matching {} observed lines against {} lines of '{}'",
            observed.len(),
            list.lines.len(),
            list.id
        );
        let duplicates = list.duplicate_names();
        if !duplicates.is_empty() {
            eprintln!("Repeated calibration names: {}", duplicates.join(", "));
        }
    }

    let config = MatchingConfig::with_tolerance(args.tolerance)
        .redshift(RedshiftOptions {
            compute: args.redshift,
            z_low: args.z_low,
            z_high: args.z_high,
        })
        .duplicate_names(if args.strict_names {
            DuplicateNamePolicy::Reject
        } else {
            DuplicateNamePolicy::DistinctLines
        });

    let outcome = RatioMatcher::new(config).run(&list.lines, &observed)?;

    if verbose {
        eprintln!(
            "{} ratio matches, {} accepted",
            outcome.candidates.len(),
            outcome.records.len()
        );
    }

    match format {
        OutputFormat::Text => print_text_results(&outcome),
        OutputFormat::Json => print_json_results(&outcome, &config, &list)?,
        OutputFormat::Tsv => print_tsv_results(&outcome),
    }

    Ok(())
}

fn load_observed(args: &IdentifyArgs) -> anyhow::Result<Vec<ObservedLine>> {
    match &args.input {
        Some(path) => {
            let delimiter = resolve_format(args.input_format, path).delimiter();
            Ok(parsing::observed::parse_observed_file(path, delimiter)?)
        }
        None => Ok(ObservedLine::from_wavelengths(&args.wavelengths)),
    }
}

fn load_calibration(args: &IdentifyArgs) -> anyhow::Result<LineList> {
    if let Some(path) = &args.calibration {
        let delimiter = resolve_format(args.input_format, path).delimiter();
        return Ok(parsing::calibration::parse_calibration_file(path, delimiter)?);
    }

    let catalog = if let Some(path) = &args.catalog {
        LineCatalog::load_from_file(path)?
    } else {
        LineCatalog::load_embedded()?
    };

    Ok(catalog.require(&args.list)?.clone())
}

/// Detect input format from file extension
fn resolve_format(format: Option<InputFormat>, path: &Path) -> InputFormat {
    format.unwrap_or_else(|| {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match ext.as_deref() {
            Some("csv") => InputFormat::Csv,
            _ => InputFormat::Tsv,
        }
    })
}

fn print_text_results(outcome: &MatchOutcome) {
    if outcome.candidates.is_empty() {
        eprintln!("No ratio matches within tolerance.");
    }

    for line in outcome.report_lines() {
        println!("{line}");
    }
}

fn print_json_results(
    outcome: &MatchOutcome,
    config: &MatchingConfig,
    list: &LineList,
) -> anyhow::Result<()> {
    let matches: Vec<serde_json::Value> = outcome
        .candidates
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let mut json = serde_json::json!({
                "observed_lines": [c.observed.0, c.observed.1],
                "observed_wavelengths": [c.observed_wavelengths.0, c.observed_wavelengths.1],
                "observed_ratio": c.observed_ratio,
                "calibration_lines": [c.names.0, c.names.1],
                "calibration_wavelengths": [
                    c.calibration_wavelengths.0,
                    c.calibration_wavelengths.1
                ],
                "calibration_ratio": c.calibration_ratio,
                "relative_error": c.relative_error,
            });

            if let Some(e) = outcome.evaluations.get(i) {
                json["redshift"] = serde_json::json!({
                    "z_first": e.estimate.z_first,
                    "z_second": e.estimate.z_second,
                    "z_mean": e.estimate.z_mean,
                    "accepted": e.accepted,
                });
            }

            json
        })
        .collect();

    let output = serde_json::json!({
        "calibration_list": list.id,
        "tolerance": config.tolerance,
        "redshift_window": [config.redshift.z_low, config.redshift.z_high],
        "matches": matches,
        "accepted": outcome.records,
        "redshift": outcome.redshift,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(outcome: &MatchOutcome) {
    println!(
        "obs_a\tobs_b\tobs_wavelength_a\tobs_wavelength_b\tobs_ratio\tcal_a\tcal_b\tcal_wavelength_a\tcal_wavelength_b\tcal_ratio\trelative_error\tz_mean\taccepted"
    );
    for (i, c) in outcome.candidates.iter().enumerate() {
        let (z_mean, accepted) = match outcome.evaluations.get(i) {
            Some(e) => (format!("{:.4}", e.estimate.z_mean), e.accepted),
            None => (String::new(), true),
        };

        println!(
            "{}\t{}\t{:.2}\t{:.2}\t{:.6}\t{}\t{}\t{:.2}\t{:.2}\t{:.6}\t{:.6}\t{}\t{}",
            c.observed.0,
            c.observed.1,
            c.observed_wavelengths.0,
            c.observed_wavelengths.1,
            c.observed_ratio,
            c.names.0,
            c.names.1,
            c.calibration_wavelengths.0,
            c.calibration_wavelengths.1,
            c.calibration_ratio,
            c.relative_error,
            z_mean,
            accepted,
        );
    }

    match outcome.redshift {
        RedshiftOutcome::Estimated(aggregate) => println!(
            "# mean_z\t{:.4}\tstd_z\t{:.4}\tcandidates\t{}",
            aggregate.mean, aggregate.std_dev, aggregate.candidates
        ),
        RedshiftOutcome::NoValidCandidates { .. } => println!("# mean_z\tNA"),
        RedshiftOutcome::NotComputed => {}
    }
}
