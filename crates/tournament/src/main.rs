//! Tournament CLI
//!
//! Run matches between engines, count perft leaves and analyze positions.

use checkers_core::{perft, Board, CaptureRule, Engine, Move, SearchLimits, Side};
use clap::{Parser, Subcommand, ValueEnum};
use classical_engine::{ClassicalEngine, Search, SearchConfig};
use log::info;
use random_engine::RandomEngine;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tournament::{MatchConfig, MatchRunner, MatchSettings, TournamentResults};

#[derive(Parser, Debug)]
#[command(author, version, about = "ML-checkers tournament runner", long_about = None)]
struct Args {
    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a match between two engines (classical, random)
    Match {
        engine1: String,
        engine2: String,
        #[arg(short, long, default_value_t = 10)]
        games: u32,
        /// Deepest search pass per move
        #[arg(short, long)]
        depth: Option<u8>,
        /// Node budget per move
        #[arg(short, long)]
        nodes: Option<u64>,
        #[arg(long, default_value_t = 200)]
        max_plies: u32,
        /// Random plies before the engines take over
        #[arg(long, default_value_t = 0)]
        opening_plies: u32,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// TOML search config for the classical engine
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write the results as JSON
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Count leaf positions from the start position
    Perft {
        #[arg(short, long, default_value_t = 7)]
        depth: u8,
        /// Captures are compulsory
        #[arg(long)]
        forced: bool,
    },
    /// Search one position and print the best move
    Analyze {
        /// 64-token board file, start position when omitted
        #[arg(short, long)]
        board: Option<PathBuf>,
        /// Moves played from the start position, in shorthand
        #[arg(short, long, num_args = 1.., conflicts_with = "board")]
        moves: Vec<String>,
        #[arg(short, long, value_enum, default_value_t = SideArg::Red)]
        side: SideArg,
        /// TOML search config
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        depth: Option<u8>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SideArg {
    Red,
    Black,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Red => Side::Red,
            SideArg::Black => Side::Black,
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<SearchConfig, Box<dyn Error>> {
    Ok(match path {
        Some(path) => SearchConfig::load(path)?,
        None => SearchConfig::default(),
    })
}

fn create_engine(spec: &str, config: &SearchConfig, seed: u64) -> Result<Box<dyn Engine>, String> {
    match spec.to_lowercase().as_str() {
        "classical" | "classic" => Ok(Box::new(ClassicalEngine::with_config(config.clone()))),
        "random" => Ok(Box::new(RandomEngine::with_seed(seed).with_rule(config.capture_rule))),
        _ => Err(format!("Unknown engine: {spec} (expected classical or random)")),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_match(
    engine1_spec: &str,
    engine2_spec: &str,
    games: u32,
    depth: Option<u8>,
    nodes: Option<u64>,
    max_plies: u32,
    opening_plies: u32,
    seed: u64,
    config: Option<&Path>,
    out: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let search_config = load_config(config)?;
    let mut limits = search_config.limits();
    if let Some(depth) = depth {
        limits.max_depth = depth;
    }
    if let Some(nodes) = nodes {
        limits.node_budget = nodes;
    }

    // Distinct seeds so two random engines do not mirror each other.
    let mut engine1 = create_engine(engine1_spec, &search_config, seed)?;
    let mut engine2 = create_engine(engine2_spec, &search_config, seed.wrapping_add(1))?;

    println!("=== Match: {} vs {} ===", engine1_spec, engine2_spec);
    println!(
        "Games: {}, Depth: {}, Nodes: {}",
        games, limits.max_depth, limits.node_budget
    );
    println!();

    let match_config = MatchConfig {
        num_games: games,
        limits,
        max_plies,
        capture_rule: search_config.capture_rule,
        random_opening_plies: opening_plies,
        seed,
        verbose: true,
        ..Default::default()
    };
    let settings = MatchSettings::from(&match_config);
    let runner = MatchRunner::new(match_config);
    let result = runner.run_match(engine1.as_mut(), engine2.as_mut());

    println!();
    println!("=== Final Result ===");
    println!(
        "{}: {} wins, {} losses, {} unfinished",
        engine1_spec, result.wins, result.losses, result.unfinished
    );
    println!("Score: {:.1}%", result.score() * 100.0);

    let mut results = TournamentResults::new(&format!("{engine1_spec} vs {engine2_spec}"), settings);
    results.add_match(engine1_spec, engine2_spec, result);
    results.print_report();

    if let Some(out) = out {
        results.save(out)?;
        info!("results written to {}", out.display());
    }
    Ok(())
}

fn run_perft(depth: u8, forced: bool) {
    let rule = if forced {
        CaptureRule::Forced
    } else {
        CaptureRule::Optional
    };
    let board = Board::startpos();
    println!("perft from the start position, {rule:?} captures");

    for d in 1..=depth {
        let start = Instant::now();
        let nodes = perft(&board, Side::Red, d, rule);
        let secs = start.elapsed().as_secs_f64();
        let nps = if secs > 0.0 { nodes as f64 / secs } else { 0.0 };
        println!("depth {:>2}: {:>14} nodes {:>8.3}s {:>12.0} nps", d, nodes, secs, nps);
    }
}

fn run_analyze(
    board: Option<&Path>,
    moves: &[String],
    side: Side,
    config: Option<&Path>,
    depth: Option<u8>,
) -> Result<(), Box<dyn Error>> {
    let mut search_config = load_config(config)?;
    if let Some(depth) = depth {
        let limits = SearchLimits {
            max_depth: depth,
            ..search_config.limits()
        };
        search_config = search_config.with_limits(limits);
    }

    let position = match board {
        Some(path) => std::fs::read_to_string(path)?.parse::<Board>()?,
        None => {
            let line = moves
                .iter()
                .map(|m| m.parse::<Move>())
                .collect::<Result<Vec<_>, _>>()?;
            Board::from_moves(&line)?
        }
    };

    println!("{position}");
    println!("{side} to move, {} pieces", position.piece_count());

    let mut search = Search::new(position, side, search_config);
    let (best, score) = search.compute_score(side, true);

    match best {
        Some(mv) => println!("bestmove {mv}"),
        None => println!("bestmove (none)"),
    }
    println!(
        "score {:.3} depth {} nodes {}",
        score,
        search.depth(),
        search.nodes()
    );
    let line: Vec<String> = search.principal_line().iter().map(Move::to_string).collect();
    if !line.is_empty() {
        println!("line {}", line.join(" "));
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, args.log_level.as_str()),
    )
    .target(env_logger::Target::Stderr)
    .init();

    match args.command {
        Command::Match {
            engine1,
            engine2,
            games,
            depth,
            nodes,
            max_plies,
            opening_plies,
            seed,
            config,
            out,
        } => run_match(
            &engine1,
            &engine2,
            games,
            depth,
            nodes,
            max_plies,
            opening_plies,
            seed,
            config.as_deref(),
            out.as_deref(),
        ),
        Command::Perft { depth, forced } => {
            run_perft(depth, forced);
            Ok(())
        }
        Command::Analyze {
            board,
            moves,
            side,
            config,
            depth,
        } => run_analyze(board.as_deref(), &moves, side.into(), config.as_deref(), depth),
    }
}
