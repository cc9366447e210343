use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::catalog::store::LineCatalog;
use crate::cli::OutputFormat;
use crate::core::ratio::pair_count;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all line lists in the catalog
    List {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Show the lines of a specific list
    Show {
        /// Line list ID (e.g., "air")
        #[arg(required = true)]
        id: String,

        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Export the catalog to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom catalog file to export (defaults to embedded)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the list is unknown.
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List { catalog } => run_list(catalog, format, verbose),
        CatalogCommands::Show { id, catalog } => run_show(&id, catalog, format),
        CatalogCommands::Export { output, catalog } => run_export(output, catalog),
    }
}

fn load_catalog(catalog_path: Option<PathBuf>) -> anyhow::Result<LineCatalog> {
    Ok(if let Some(path) = catalog_path {
        LineCatalog::load_from_file(&path)?
    } else {
        LineCatalog::load_embedded()?
    })
}

fn run_list(
    catalog_path: Option<PathBuf>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path)?;

    if verbose {
        eprintln!("Loaded catalog with {} line lists", catalog.len());
    }

    match format {
        OutputFormat::Text => {
            println!("Available line lists:\n");
            for list in &catalog.lists {
                println!("  {} - {}", list.id, list.display_name);
                println!(
                    "    Medium: {}, Lines: {}, Ratio pairs: {}",
                    list.medium,
                    list.lines.len(),
                    pair_count(list.lines.len())
                );
            }
            println!("\nTotal: {} line lists", catalog.len());
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = catalog
                .lists
                .iter()
                .map(|l| {
                    serde_json::json!({
                        "id": l.id,
                        "display_name": l.display_name,
                        "medium": l.medium,
                        "lines": l.lines.len(),
                        "ratio_pairs": pair_count(l.lines.len()),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("id\tdisplay_name\tmedium\tlines\tratio_pairs");
            for l in &catalog.lists {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    l.id,
                    l.display_name,
                    l.medium,
                    l.lines.len(),
                    pair_count(l.lines.len())
                );
            }
        }
    }

    Ok(())
}

fn run_show(id: &str, catalog_path: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let list = catalog.require(id)?;

    match format {
        OutputFormat::Text => {
            println!("Line list: {}\n", list.display_name);
            println!("ID:     {}", list.id);
            println!("Medium: {}", list.medium);
            println!("Lines:  {}", list.lines.len());

            let duplicates = list.duplicate_names();
            if !duplicates.is_empty() {
                println!("Repeated names: {}", duplicates.join(", "));
            }

            println!("\n  {:>3}  {:<10}  {:>10}", "#", "Name", "Wavelength");
            for (i, line) in list.lines.iter().enumerate() {
                println!("  {:>3}  {:<10}  {:>10.2}", i + 1, line.name, line.wavelength);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(list)?);
        }
        OutputFormat::Tsv => {
            println!("position\tname\twavelength");
            for (i, line) in list.lines.iter().enumerate() {
                println!("{}\t{}\t{}", i + 1, line.name, line.wavelength);
            }
        }
    }

    Ok(())
}

fn run_export(output: PathBuf, catalog_path: Option<PathBuf>) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path)?;

    let json = catalog.to_json()?;
    std::fs::write(&output, json)?;

    println!(
        "Exported {} line lists to {}",
        catalog.len(),
        output.display()
    );

    Ok(())
}
