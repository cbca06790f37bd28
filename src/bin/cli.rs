//! Horserace CLI - Compare horses from the command line

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use horserace::core::{ComparisonService, HorseProfile, Placing, SpeedEstimator, DEFAULT_SAMPLE_COUNT};
use horserace::data::load_races;

/// Default race results file
const DEFAULT_CSV: &str = "races.csv";

#[derive(Parser)]
#[command(name = "horserace")]
#[command(author, version, about = "Horse speed comparison CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to race results CSV
    #[arg(long, default_value = DEFAULT_CSV)]
    csv: PathBuf,

    /// Speed constant (speed = constant / finish time)
    #[arg(long, default_value = "1000")]
    speed_constant: f64,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two horses by estimated mean speed
    Compare {
        /// Rank of the first horse (1 = smallest horse id)
        #[arg(long)]
        horse1: usize,

        /// Rank of the second horse
        #[arg(long)]
        horse2: usize,

        /// Number of draws per estimate
        #[arg(long, default_value_t = DEFAULT_SAMPLE_COUNT)]
        samples: usize,

        /// Seed for reproducible estimates
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List loaded horses in rank order
    List,

    /// Show a single horse's history summary
    Show {
        /// Rank of the horse
        #[arg(long)]
        horse: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let service = load_service(&cli.csv, cli.speed_constant)?;

    match cli.command {
        Commands::Compare {
            horse1,
            horse2,
            samples,
            seed,
        } => run_compare(&service, horse1, horse2, samples, seed)?,
        Commands::List => run_list(&service),
        Commands::Show { horse } => run_show(&service, horse)?,
    }

    Ok(())
}

fn load_service(csv: &Path, speed_constant: f64) -> Result<ComparisonService> {
    if speed_constant <= 0.0 {
        anyhow::bail!("Speed constant must be positive, got {}", speed_constant);
    }

    let store =
        load_races(csv).with_context(|| format!("Failed to load race results from {:?}", csv))?;

    Ok(ComparisonService::new(
        Arc::new(store),
        SpeedEstimator::new(speed_constant),
        DEFAULT_SAMPLE_COUNT,
    ))
}

fn run_compare(
    service: &ComparisonService,
    horse1: usize,
    horse2: usize,
    samples: usize,
    seed: Option<u64>,
) -> Result<()> {
    if samples == 0 {
        anyhow::bail!("--samples must be at least 1");
    }

    let result = service
        .compare(horse1, horse2, samples, seed)
        .with_context(|| format!("Failed to compare rank {} with rank {}", horse1, horse2))?;

    println!(
        "{}: rank {} vs rank {} ({} samples{})",
        "Comparing".green(),
        horse1,
        horse2,
        samples,
        seed.map(|s| format!(", seed {}", s)).unwrap_or_default()
    );
    println!();
    println!("{:>8} {:>6} {:>10} {:>12}", "", "Rank", "Horse", "Mean speed");
    println!("{}", "-".repeat(40));
    println!(
        "{:>8} {:>6} {:>10} {:>12.4}",
        "Faster".green().bold(),
        result.faster.rank,
        result.faster.entity_id,
        result.faster.mean_speed
    );
    println!(
        "{:>8} {:>6} {:>10} {:>12.4}",
        "Slower".red(),
        result.slower.rank,
        result.slower.entity_id,
        result.slower.mean_speed
    );

    if result.faster.mean_speed == result.slower.mean_speed {
        println!();
        println!(
            "{}",
            "Mean speeds are equal; the first horse is listed as faster.".dimmed()
        );
    }

    Ok(())
}

fn run_list(service: &ComparisonService) {
    let profiles = service.profiles();

    println!(
        "{} {} horses, {} races",
        "Loaded".green(),
        profiles.len(),
        service.store().total_races()
    );
    println!();
    print_header();
    for profile in &profiles {
        print_profile(profile);
    }
}

fn run_show(service: &ComparisonService, horse: usize) -> Result<()> {
    let profile = service
        .profile(horse)
        .with_context(|| format!("No horse at rank {}", horse))?;

    print_header();
    print_profile(&profile);
    Ok(())
}

fn print_header() {
    println!(
        "{:>6} {:>10} {:>10} {:>6} {:>14} {:>14}",
        "Rank", "Horse", "Entry fee", "Races", "Fastest", "Slowest"
    );
    println!("{}", "-".repeat(65));
}

fn print_profile(profile: &HorseProfile) {
    println!(
        "{:>6} {:>10} {:>10.2} {:>6} {:>14} {:>14}",
        profile.rank,
        profile.entity_id,
        profile.entry_cost,
        profile.race_count,
        format_placing(&profile.fastest),
        format_placing(&profile.slowest)
    );
}

fn format_placing(placing: &Placing) -> String {
    if placing.rank == 0 {
        "-".to_string()
    } else {
        format!("#{} {:.2}s", placing.rank, placing.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_placing() {
        assert_eq!(format_placing(&Placing::NONE), "-");
        assert_eq!(
            format_placing(&Placing {
                rank: 2,
                time: 61.456
            }),
            "#2 61.46s"
        );
    }

    #[test]
    fn test_cli_parses_compare() {
        let cli = Cli::try_parse_from([
            "horserace", "--csv", "data.csv", "compare", "--horse1", "1", "--horse2", "3", "--seed",
            "9",
        ])
        .unwrap();

        assert_eq!(cli.csv, PathBuf::from("data.csv"));
        match cli.command {
            Commands::Compare {
                horse1,
                horse2,
                samples,
                seed,
            } => {
                assert_eq!((horse1, horse2), (1, 3));
                assert_eq!(samples, DEFAULT_SAMPLE_COUNT);
                assert_eq!(seed, Some(9));
            }
            _ => panic!("expected compare"),
        }
    }
}
