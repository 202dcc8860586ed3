#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for inspecting a sheet export locally.
//!
//! Reads an exported CSV file, runs the transformation core over it, and
//! prints the result as JSON or a human-readable summary. Intended for data
//! triage: spotting listings without coordinates, unexpected category
//! fallbacks, or zones that collapsed to the default center.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use estate_map_listing_models::Language;
use estate_map_sheet::{SheetData, format, parse_sheet};

/// Errors from CLI-side I/O. The transformation itself never fails.
#[derive(Debug, thiserror::Error)]
enum CliError {
    /// Reading the export file failed.
    #[error("failed to read export: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failed.
    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser)]
#[command(name = "estate_map_cli", about = "Sheet export inspection tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the transformed listings
    Properties {
        /// Path to the exported CSV file
        file: PathBuf,
        /// Emit JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Print the derived zones
    Zones {
        /// Path to the exported CSV file
        file: PathBuf,
        /// Emit JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Print transformation statistics for data triage
    Stats {
        /// Path to the exported CSV file
        file: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    run(cli.command)?;
    Ok(())
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Properties { file, json } => {
            let data = load(&file)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&data.properties)?);
            } else {
                for property in &data.properties {
                    println!(
                        "{:<14} {:<9} {:>12} | {} | {}",
                        property.id,
                        property.status,
                        format::format_price(property.price),
                        format::format_land_area(&property.land_area),
                        property.title.get(Language::PRIMARY),
                    );
                }
            }
        }
        Commands::Zones { file, json } => {
            let data = load(&file)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&data.zones)?);
            } else {
                for zone in &data.zones {
                    println!(
                        "{:<10} z{:<3} ({:.4}, {:.4}) {}",
                        zone.id, zone.zoom_level, zone.center.lat, zone.center.lng, zone.name,
                    );
                }
            }
        }
        Commands::Stats { file } => {
            let data = load(&file)?;
            print_stats(&data);
        }
    }

    Ok(())
}

fn load(file: &Path) -> Result<SheetData, CliError> {
    let text = std::fs::read_to_string(file)?;
    log::info!("read {} bytes from {}", text.len(), file.display());
    Ok(parse_sheet(&text))
}

fn print_stats(data: &SheetData) {
    let located = data
        .properties
        .iter()
        .filter(|p| p.position.is_known())
        .count();

    println!("listings:   {}", data.properties.len());
    println!("located:    {located}");
    println!("unlocated:  {}", data.properties.len() - located);
    println!("zones:      {}", data.zones.len());

    println!("\nby category:");
    for (category, count) in count_by(data, |p| p.category.to_string()) {
        println!("  {category:<14} {count}");
    }

    println!("\nby status:");
    for (status, count) in count_by(data, |p| p.status.to_string()) {
        println!("  {status:<14} {count}");
    }
}

fn count_by(
    data: &SheetData,
    key: impl Fn(&estate_map_listing_models::Property) -> String,
) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for property in &data.properties {
        *counts.entry(key(property)).or_insert(0) += 1;
    }
    counts
}
