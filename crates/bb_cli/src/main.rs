//! bb_sim CLI
//!
//! Plays single games or whole series from JSON rosters.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bb_core::engine::{EngineConfig, GameSession, NoticeSink};
use bb_core::models::{GameNotice, GameSummary, HalfInning, NoticeKind, TeamSide};
use bb_core::store::{prepare_team, MemoryStore, RecordStore, RosterTeam};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "bb_sim")]
#[command(version = bb_core::VERSION, about = "Plate-appearance baseball simulator", long_about = None)]
struct Cli {
    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct Setup {
    /// Home roster JSON
    #[arg(long)]
    home: PathBuf,

    /// Away roster JSON
    #[arg(long)]
    away: PathBuf,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Config preset: classic or wide_scale
    #[arg(long, default_value = "classic")]
    preset: String,

    /// Config file (.yaml/.yml or .json); takes precedence over --preset
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game
    Game {
        #[command(flatten)]
        setup: Setup,

        /// Rotation index of this game
        #[arg(long, default_value_t = 0)]
        game_number: u32,

        /// Records file to read careers from and update afterwards
        #[arg(long)]
        records: Option<PathBuf>,

        /// Print every notice as it happens
        #[arg(long)]
        play_by_play: bool,

        /// Write the summary as JSON to this path
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// Play a series of independent games in parallel
    Series {
        #[command(flatten)]
        setup: Setup,

        #[arg(long, default_value_t = 162)]
        games: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match cli.command {
        Commands::Game { setup, game_number, records, play_by_play, summary } => {
            run_game(&setup, game_number, records.as_deref(), play_by_play, summary.as_deref())
        }
        Commands::Series { setup, games } => run_series(&setup, games),
    }
}

fn run_game(
    setup: &Setup,
    game_number: u32,
    records: Option<&Path>,
    play_by_play: bool,
    summary_out: Option<&Path>,
) -> Result<()> {
    let config = load_config(setup)?;
    let (home_roster, away_roster) = (load_roster(&setup.home)?, load_roster(&setup.away)?);

    let store = match records {
        Some(path) if path.exists() => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading records {}", path.display()))?;
            MemoryStore::from_json(&raw).with_context(|| format!("parsing records {}", path.display()))?
        }
        _ => MemoryStore::new(),
    };

    let home = prepare_team(&home_roster, &store, home_roster.key()).context("preparing home team")?;
    let away = prepare_team(&away_roster, &store, away_roster.key()).context("preparing away team")?;
    print_record(&store, &home_roster, &away_roster);

    let mut session = GameSession::new(home, away, config, setup.seed)
        .with_game_number(game_number)
        .with_keys(home_roster.key(), away_roster.key())
        .with_store(store);
    if play_by_play {
        session = session.with_sink(PrintSink);
    }

    let summary = session.play_to_end()?;
    if !play_by_play {
        if let Some(last) = session.notices().last() {
            println!("{}", last.message);
        }
    }
    println!();
    print_line_score(&summary);
    print_pitching(&summary);

    if let Some(path) = summary_out {
        let json = serde_json::to_string_pretty(&summary)?;
        fs::write(path, json).with_context(|| format!("writing summary {}", path.display()))?;
        info!("Summary written to {}", path.display());
    }

    if let Some(path) = records {
        let json = session.into_store().to_json()?;
        fs::write(path, json).with_context(|| format!("writing records {}", path.display()))?;
        info!("Records saved to {}", path.display());
    }
    Ok(())
}

fn run_series(setup: &Setup, games: u32) -> Result<()> {
    let config = load_config(setup)?;
    let (home_roster, away_roster) = (load_roster(&setup.home)?, load_roster(&setup.away)?);
    let home = prepare_team(&home_roster, &MemoryStore::new(), home_roster.key())?;
    let away = prepare_team(&away_roster, &MemoryStore::new(), away_roster.key())?;

    let report = bb_core::simulate_series(&home, &away, &config, setup.seed, games)?;

    println!("{} at {}, {} games", report.away, report.home, report.games);
    println!("  {:<28} {:>4}", format!("{} wins", report.home), report.home_wins);
    println!("  {:<28} {:>4}", format!("{} wins", report.away), report.away_wins);
    println!("  {:<28} {:>4}", "Ties", report.ties);
    println!("  {:<28} {:>7.3}", "Home win pct", report.home_win_pct());
    println!("  {:<28} {:>7.2} - {:.2}", "Avg score (home - away)", report.avg_home_runs, report.avg_away_runs);
    println!("  {:<28} {:>7.2}", "Avg innings", report.avg_innings);
    println!("  {:<28} {:>4}", "Extra-inning games", report.extra_inning_games);
    println!("  {:<28} {:>4}", "Walk-offs", report.walk_offs);
    Ok(())
}

fn load_config(setup: &Setup) -> Result<EngineConfig> {
    let config = match &setup.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let is_json = path.extension().is_some_and(|ext| ext == "json");
            if is_json {
                EngineConfig::from_json_str(&raw)?
            } else {
                EngineConfig::from_yaml_str(&raw)?
            }
        }
        None => EngineConfig::from_preset(&setup.preset)?,
    };
    config.validate()?;
    debug!("Engine config: {} innings, neutral {}", config.innings, config.rates.neutral);
    Ok(config)
}

fn load_roster(path: &Path) -> Result<RosterTeam> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading roster {}", path.display()))?;
    RosterTeam::from_json_str(&raw).with_context(|| format!("parsing roster {}", path.display()))
}

fn print_record(store: &MemoryStore, home: &RosterTeam, away: &RosterTeam) {
    for roster in [away, home] {
        let record = store.team_record(roster.key());
        if record.games() > 0 {
            println!("{} ({}-{})", roster.name, record.wins, record.losses);
        }
    }
}

fn print_line_score(summary: &GameSummary) {
    let innings = summary.home.line_score.len().max(summary.away.line_score.len());
    let width = summary.home.name.len().max(summary.away.name.len()).max(4);

    let header: String = (1..=innings).map(|i| format!("{:>3}", i)).collect();
    println!("{:<width$} {}  {:>3}{:>3}{:>3}", "", header, "R", "H", "E", width = width);

    for side in [TeamSide::Away, TeamSide::Home] {
        let team = summary.team(side);
        let cells: String = (0..innings)
            .map(|i| match team.line_score.get(i).copied().flatten() {
                Some(runs) => format!("{:>3}", runs),
                None => format!("{:>3}", "x"),
            })
            .collect();
        println!(
            "{:<width$} {}  {:>3}{:>3}{:>3}",
            team.name,
            cells,
            team.runs,
            team.hits,
            team.errors,
            width = width
        );
    }
}

fn print_pitching(summary: &GameSummary) {
    if let (Some(w), Some(l)) = (&summary.winning_pitcher, &summary.losing_pitcher) {
        println!("\nW: {}  L: {}", w, l);
    }
    for side in [TeamSide::Away, TeamSide::Home] {
        let team = summary.team(side);
        println!("\n{} pitching", team.name);
        for p in &team.pitchers {
            println!(
                "  {:<24} {:>5} IP {:>3} H {:>3} R {:>3} BB {:>3} K",
                p.name,
                p.line.innings_pitched(),
                p.line.hits_allowed,
                p.line.runs_allowed,
                p.line.walks_allowed,
                p.line.strikeouts
            );
        }
    }
}

/// Prints notices as they are emitted.
struct PrintSink;

impl NoticeSink for PrintSink {
    fn notice(&mut self, notice: &GameNotice) {
        let half = match notice.half {
            HalfInning::Top => "T",
            HalfInning::Bottom => "B",
        };
        match notice.kind {
            NoticeKind::GameOver | NoticeKind::GameError => println!("\n{}", notice.message),
            _ => println!("[{}{:>2}] {}", half, notice.inning, notice.message),
        }
    }
}
