//! Folio CLI - portfolio spreadsheet to JSON converter

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio::prelude::*;

/// Fixed-name sibling CSV used when the workbook is absent
const FALLBACK_CSV_NAME: &str = "all_work_list.csv";

/// Default sibling experience source
const EXPERIENCE_CSV_NAME: &str = "experience.csv";

#[derive(Parser)]
#[command(name = "folio")]
#[command(
    author,
    version,
    about = "Generate portfolio JSON documents from spreadsheet data"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the mapping, detail, and experience documents
    Build {
        /// Input workbook (xlsx); a sibling all_work_list.csv is used when absent
        source: PathBuf,

        /// Fallback CSV path (default: sibling all_work_list.csv)
        #[arg(long)]
        fallback_csv: Option<PathBuf>,

        /// Mapping document path (default: sibling portfolioMap.json)
        #[arg(long)]
        map_out: Option<PathBuf>,

        /// Detail document path (default: sibling allWorkData.json)
        #[arg(long)]
        details_out: Option<PathBuf>,

        /// Experience CSV source (default: sibling experience.csv)
        #[arg(long)]
        experience_csv: Option<PathBuf>,

        /// Experience document path (default: sibling experienceData.json)
        #[arg(long)]
        experience_out: Option<PathBuf>,
    },

    /// Show a source's headers and row count
    Info {
        /// Input workbook (xlsx) or CSV file
        source: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            source,
            fallback_csv,
            map_out,
            details_out,
            experience_csv,
            experience_out,
        } => build(
            &source,
            fallback_csv,
            map_out,
            details_out,
            experience_csv,
            experience_out,
        ),
        Commands::Info { source } => show_info(&source),
    }
}

/// Resolve a default output path as a sibling of the source
fn sibling(source: &Path, name: &str) -> PathBuf {
    source
        .parent()
        .map(|dir| dir.join(name))
        .unwrap_or_else(|| PathBuf::from(name))
}

fn build(
    source: &Path,
    fallback_csv: Option<PathBuf>,
    map_out: Option<PathBuf>,
    details_out: Option<PathBuf>,
    experience_csv: Option<PathBuf>,
    experience_out: Option<PathBuf>,
) -> Result<()> {
    let fallback_csv = fallback_csv.unwrap_or_else(|| sibling(source, FALLBACK_CSV_NAME));
    let map_out = map_out.unwrap_or_else(|| sibling(source, "portfolioMap.json"));
    let details_out = details_out.unwrap_or_else(|| sibling(source, "allWorkData.json"));
    let experience_csv = experience_csv.unwrap_or_else(|| sibling(source, EXPERIENCE_CSV_NAME));
    let experience_out = experience_out.unwrap_or_else(|| sibling(source, "experienceData.json"));

    if !source.exists() {
        eprintln!(
            "Workbook '{}' not found, using fallback '{}'",
            source.display(),
            fallback_csv.display()
        );
    }

    let loaded = load_rows(source, &fallback_csv)
        .with_context(|| format!("Failed to load a usable source for '{}'", source.display()))?;

    document::write(&map_out, &loaded.mapping)
        .with_context(|| format!("Failed to write '{}'", map_out.display()))?;
    println!(
        "Generated {} with {} entries.",
        map_out.display(),
        loaded.mapping.len()
    );

    let details = assemble_details(&loaded.rows, &loaded.mapping);
    document::write(&details_out, &details)
        .with_context(|| format!("Failed to write '{}'", details_out.display()))?;
    if details.unmatched.is_empty() {
        println!(
            "Generated {} with {} records.",
            details_out.display(),
            details.len()
        );
    } else {
        println!(
            "Generated {} with {} records; {} unmatched row(s): {}",
            details_out.display(),
            details.len(),
            details.unmatched.len(),
            details.unmatched.join(", ")
        );
    }

    if experience_csv.exists() {
        let rows = CsvReader::read_file(&experience_csv)
            .with_context(|| format!("Failed to read '{}'", experience_csv.display()))?;
        let experience = assemble_experience(&rows);
        document::write(&experience_out, &experience)
            .with_context(|| format!("Failed to write '{}'", experience_out.display()))?;
        println!(
            "Generated {} with {} experience entries across {} types.",
            experience_out.display(),
            experience.entries.len(),
            experience.type_order.len()
        );
    } else {
        println!(
            "Experience source '{}' not found, skipping experience document.",
            experience_csv.display()
        );
    }

    Ok(())
}

fn show_info(source: &Path) -> Result<()> {
    let is_csv = source
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));

    let rows = if is_csv {
        CsvReader::read_file(source)
            .with_context(|| format!("Failed to read '{}'", source.display()))?
    } else {
        XlsxReader::read_rows_file(source)
            .with_context(|| format!("Failed to read '{}'", source.display()))?
    };

    println!("Headers: {}", rows.headers().join(", "));
    println!("Rows: {}", rows.len());

    Ok(())
}
