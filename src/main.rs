//! Command line entry point for the ranking tracker
//!
//! Reads a league snapshot file and prints rankings, replays history or
//! checks that stored ratings match a full replay. Nothing is written back.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ranking_tracker::config::AppConfig;
use ranking_tracker::ranking::{Month, RankingView, Standing};
use ranking_tracker::utils::current_timestamp;
use ranking_tracker::{LeagueManager, LeagueSnapshot};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Ranking Tracker - multiplayer Elo ratings for board game leagues
#[derive(Parser)]
#[command(
    name = "ranking-tracker",
    version,
    about = "Multiplayer Elo rankings for board game leagues",
    long_about = "Ranking Tracker computes round-robin Elo ratings from multiplayer game \
                 results. It reads a league snapshot (players and games as JSON) and prints \
                 all-time or monthly rankings, or verifies stored ratings against a replay."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a leaderboard
    Standings {
        #[arg(long, value_name = "FILE", help = "League snapshot (JSON)")]
        data: PathBuf,

        #[arg(long, value_enum, default_value_t = ViewKind::AllTime)]
        view: ViewKind,

        #[arg(long, value_name = "YYYY-MM", help = "Month for monthly views (default: current)")]
        month: Option<Month>,

        #[arg(long, help = "Print JSON instead of a table")]
        json: bool,
    },
    /// Replay every game from scratch and print the resulting leaderboard
    Replay {
        #[arg(long, value_name = "FILE", help = "League snapshot (JSON)")]
        data: PathBuf,

        #[arg(long, help = "Print JSON instead of a table")]
        json: bool,
    },
    /// Check that stored ratings match a full replay
    Verify {
        #[arg(long, value_name = "FILE", help = "League snapshot (JSON)")]
        data: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewKind {
    AllTime,
    MonthlyAccumulated,
    MonthlyIndependent,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load configuration from file or environment, then apply CLI overrides
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    ranking_tracker::config::validate_config(&config)?;
    Ok(config)
}

/// Load the league file into a manager scoped to the configured league
fn open_league(path: &Path, config: &AppConfig) -> Result<LeagueManager> {
    let snapshot = load_snapshot(path)?;
    LeagueManager::from_snapshot(&config.service.league, snapshot, config.rating)
}

fn load_snapshot(path: &Path) -> Result<LeagueSnapshot> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read league file {}", path.display()))?;
    let snapshot: LeagueSnapshot = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse league file {}", path.display()))?;

    info!(
        "Loaded {} players and {} games from {}",
        snapshot.players.len(),
        snapshot.games.len(),
        path.display()
    );
    Ok(snapshot)
}

fn resolve_view(kind: ViewKind, month: Option<Month>) -> Result<RankingView> {
    let month = match month {
        Some(month) => month,
        None => Month::containing(current_timestamp())?,
    };

    Ok(match kind {
        ViewKind::AllTime => RankingView::AllTime,
        ViewKind::MonthlyAccumulated => RankingView::MonthlyAccumulated(month),
        ViewKind::MonthlyIndependent => RankingView::MonthlyIndependent(month),
    })
}

fn print_standings(title: &str, standings: &[Standing], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(standings)?);
        return Ok(());
    }

    println!("{}", title);
    println!(
        "{:>4}  {:<24} {:>6} {:>6} {:>6} {:>5} {:>6}",
        "#", "Player", "Rating", "Change", "Peak", "Games", "Win%"
    );
    for standing in standings {
        println!(
            "{:>4}  {:<24} {:>6} {:>+6} {:>6} {:>5} {:>5.1}%{}",
            standing.rank,
            standing.name,
            standing.rating,
            standing.change,
            standing.peak_rating,
            standing.games_played,
            standing.win_rate * 100.0,
            if standing.low_confidence { "  (provisional)" } else { "" }
        );
    }

    Ok(())
}

fn run(args: Args, config: AppConfig) -> Result<()> {
    info!(
        "Starting {} v{} for league '{}'",
        config.service.name,
        ranking_tracker::VERSION,
        config.service.league
    );

    match args.command {
        Command::Standings {
            data,
            view,
            month,
            json,
        } => {
            let league = open_league(&data, &config)?;
            let view = resolve_view(view, month)?;
            let standings = league.standings(view)?;
            print_standings(
                &format!("{} rankings ({})", league.scope(), view),
                &standings,
                json,
            )
        }
        Command::Replay { data, json } => {
            let league = open_league(&data, &config)?;
            league.recalculate()?;
            let standings = league.standings(RankingView::AllTime)?;
            print_standings(
                &format!("{} rankings (replayed)", league.scope()),
                &standings,
                json,
            )
        }
        Command::Verify { data } => {
            let league = open_league(&data, &config)?;
            let diverging = league.verify_history()?;
            let snapshot = league.snapshot()?;

            if diverging.is_empty() {
                println!(
                    "OK: {} players match a replay of {} games",
                    snapshot.players.len(),
                    snapshot.games.len()
                );
                Ok(())
            } else {
                println!("{} players diverge from replay:", diverging.len());
                for player_id in &diverging {
                    println!("  {}", player_id);
                }
                std::process::exit(1);
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(args, config) {
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
