//! Command line entry point for the team balancer
//!
//! Wires the library together: trains skill models from labelled statistics,
//! scores players with a saved model, and splits rosters into two balanced
//! teams, printing a JSON report.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use team_balancer::balance::select_balancer;
use team_balancer::config::AppConfig;
use team_balancer::features::PlayerStatisticsRecord;
use team_balancer::report::SplitReport;
use team_balancer::skill::{proxy_label, score_roster, train_with_config, SkillModel};
use team_balancer::{PlayerId, Roster, TrainingExample};
use tracing::{error, info};

/// Team Balancer - learned skill scores and balanced team splits
#[derive(Parser)]
#[command(
    name = "team-balancer",
    version,
    about = "Estimate player skill from ranked statistics and split rosters into balanced teams"
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

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without running a command")]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Train a skill model from labelled player statistics
    Train {
        /// JSON array of {"record": {...}, "label": f} entries
        #[arg(long, value_name = "FILE")]
        data: PathBuf,
        /// Where to write the trained model
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
    /// Split a roster of precomputed skill scores
    Balance {
        /// JSON or TOML mapping of player id to skill score
        #[arg(long, value_name = "FILE")]
        roster: PathBuf,
    },
    /// Score players with a trained model, then split them
    Split {
        /// Model written by the train command
        #[arg(long, value_name = "FILE")]
        model: PathBuf,
        /// JSON array of {"id": "...", "record": {...}} entries
        #[arg(long, value_name = "FILE")]
        players: PathBuf,
    },
}

/// One training row. Rows without a label derive a proxy label from the
/// average ladder score of recent opponents.
#[derive(Debug, Deserialize)]
struct LabelledRecord {
    record: PlayerStatisticsRecord,
    label: Option<f64>,
    #[serde(default)]
    avg_match_ladder_score: f64,
}

#[derive(Debug, Deserialize)]
struct PlayerEntry {
    id: PlayerId,
    record: PlayerStatisticsRecord,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load configuration from file or environment and apply CLI overrides
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    Ok(config)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Read a roster from JSON, or TOML when the extension says so
fn read_roster(path: &Path) -> Result<Roster> {
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    } else {
        read_json(path)
    }
}

fn run_train(config: &AppConfig, data: &Path, out: &Path) -> Result<()> {
    let rows: Vec<LabelledRecord> = read_json(data)?;
    let examples = rows
        .iter()
        .map(|row| {
            let label = row
                .label
                .unwrap_or_else(|| proxy_label(&row.record, row.avg_match_ladder_score));
            TrainingExample::from_record(&row.record, label)
        })
        .collect::<Result<Vec<_>>>()?;

    info!("Training on {} examples from {}", examples.len(), data.display());
    let model = train_with_config(&examples, &config.boosting())?;
    info!("Trained {} boosting stages", model.n_stages());
    model.save(out)?;
    Ok(())
}

fn run_balance(config: &AppConfig, roster: &Roster) -> Result<()> {
    let balancer = select_balancer(&config.balance, roster.len());
    let split = balancer.split(roster)?;
    info!(
        "Split {} players with {} search, difference {:.4}",
        split.len(),
        balancer.name(),
        split.difference()
    );

    let report = SplitReport::new(balancer.name(), roster, &split, config.expectation());
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run(args: &Args, config: &AppConfig) -> Result<()> {
    match &args.command {
        Some(Command::Train { data, out }) => run_train(config, data, out),
        Some(Command::Balance { roster }) => {
            let roster = read_roster(roster)?;
            run_balance(config, &roster)
        }
        Some(Command::Split { model, players }) => {
            let model = SkillModel::load(model)?;
            let players: Vec<PlayerEntry> = read_json(players)?;
            let players: Vec<(PlayerId, PlayerStatisticsRecord)> = players
                .into_iter()
                .map(|entry| (entry.id, entry.record))
                .collect();
            let roster = score_roster(&model, &players)?;
            run_balance(config, &roster)
        }
        None => Err(anyhow!("No command given; see --help")),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if args.dry_run {
        info!("Configuration validation successful");
        info!("   Service: {}", config.service.name);
        info!("   Boosting stages: {}", config.model.n_estimators);
        info!(
            "   Exhaustive limit: {} players",
            config.balance.max_exhaustive_players
        );
        return Ok(());
    }

    if let Err(e) = run(&args, &config) {
        error!("{:#}", e);
        std::process::exit(1);
    }
    Ok(())
}
