use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod aggregate;
mod cache;
mod export;
mod filters;
mod prepare;
mod views;

#[derive(Parser, Debug)]
#[command(
    name = "lol-player-stats",
    about = "Descriptive analysis of League of Legends player statistics",
    version
)]
struct Cli {
    /// Path to the player stats CSV
    #[arg(long, default_value = "LeaguePlayerStats.csv")]
    input: PathBuf,

    /// Comma-separated roles to include (e.g., TOP,JUNGLE); defaults to all
    #[arg(long)]
    roles: Option<String>,

    /// Comma-separated rank tiers to include (e.g., GOLD,PLATINUM); defaults to all
    #[arg(long)]
    ranks: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Headline metrics for the current selection
    Summary,
    /// Win-rate views: by role, by rank, top and bottom cohorts
    Winrate {
        /// Cohort size for the top/bottom win-rate slices
        #[arg(long, default_value_t = 100)]
        cohort: usize,
    },
    /// Player counts by rank and by role
    Distribution,
    /// Damage views: by role, and the role x rank matrix
    Damage,
    /// Vision-score views by role and by rank
    Vision,
    /// Farm (minion kill) views by role and by rank
    Farm,
    /// Write per-role and per-rank summary CSVs
    Export {
        /// Directory for the generated CSV files
        #[arg(long, default_value = "reports")]
        out_dir: PathBuf,
    },
}

fn main() {
    let args = Cli::parse();

    if let Err(err) = run(&args) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(args: &Cli) -> Result<()> {
    let cleaned = cache::load_cached(&args.input)?;
    let selection =
        filters::Selection::from_args(&cleaned, args.roles.as_deref(), args.ranks.as_deref())?;
    let filtered = selection.apply(&cleaned)?;

    match &args.command {
        Command::Summary => views::summary(&filtered),
        Command::Winrate { cohort } => views::winrate(&filtered, *cohort),
        Command::Distribution => views::distribution(&filtered),
        Command::Damage => views::damage(&filtered),
        Command::Vision => views::vision(&filtered),
        Command::Farm => views::farm(&filtered),
        Command::Export { out_dir } => export::write_reports(&filtered, out_dir),
    }
}
