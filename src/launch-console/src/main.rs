//! Launch console — load a launch snapshot, run derivation and
//! classification, and print performance tables or the suggestions
//! document.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use launch_core::config::AppConfig;
use launch_core::types::Funnel;
use launch_insights::{generate_suggestions, suggestions_document, AggregateSnapshot};
use launch_tracker::{funnel_report, LaunchSnapshot, LaunchTracker};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "launch-console")]
#[command(about = "Live-launch performance tracker and suggestion generator")]
#[command(version)]
struct Cli {
    /// Path to the launch snapshot JSON (overrides config)
    #[arg(long, env = "LAUNCH_TRACK__SNAPSHOT_PATH")]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the performance tables for both funnels
    Report {
        /// Date to show per-day values for (defaults to the last recorded date)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Generate optimization suggestions
    Suggest {
        /// Write the markdown document here instead of printing it
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Re-export the snapshot with all derived values filled in
    Export {
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.filter));
    if config.log.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let cli = Cli::parse();

    let snapshot_path = cli
        .snapshot
        .unwrap_or_else(|| PathBuf::from(&config.snapshot_path));
    let json = fs::read_to_string(&snapshot_path)
        .with_context(|| format!("reading snapshot {}", snapshot_path.display()))?;
    let snapshot = LaunchSnapshot::from_json(&json)?;
    let tracker = LaunchTracker::from_snapshot(&snapshot);
    info!(launch = %tracker.name, "tracker ready");

    match cli.command {
        Command::Report { date } => {
            let date = date
                .or_else(|| last_recorded_date(&tracker))
                .unwrap_or_else(|| chrono::Local::now().date_naive());
            print_report(&tracker, date);
        }
        Command::Suggest { out } => {
            let suggestions = generate_suggestions(&AggregateSnapshot::from_tracker(&tracker));
            let doc = suggestions_document(&config.document_title, &suggestions);
            match out {
                Some(path) => {
                    fs::write(&path, &doc)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), count = suggestions.len(), "document written");
                }
                None => print!("{}", doc),
            }
        }
        Command::Export { out } => {
            let exported = LaunchSnapshot::from_tracker(&tracker);
            fs::write(&out, exported.to_json()?)
                .with_context(|| format!("writing {}", out.display()))?;
            info!(path = %out.display(), "snapshot exported");
        }
    }

    Ok(())
}

fn last_recorded_date(tracker: &LaunchTracker) -> Option<NaiveDate> {
    let mut dates = tracker.store(Funnel::Ads).recorded_dates();
    dates.extend(tracker.store(Funnel::Organic).recorded_dates());
    dates.into_iter().next_back()
}

fn print_report(tracker: &LaunchTracker, date: NaiveDate) {
    println!("{} — {}", tracker.name, date);
    for (heading, funnel) in [("Ads Funnel", Funnel::Ads), ("Organic Funnel", Funnel::Organic)] {
        println!("\n{}", heading);
        println!(
            "  {:<30} {:>12} {:>12}  {:<10} {}",
            "Metric", "Day", "All-Time", "Status", "Goal"
        );
        for row in funnel_report(tracker, funnel, date) {
            println!(
                "  {:<30} {:>12} {:>12}  {:<10} {}",
                row.label,
                row.display_value,
                row.display_aggregate,
                format!("{:?}", row.status).to_lowercase(),
                row.goal
            );
        }
    }
}
