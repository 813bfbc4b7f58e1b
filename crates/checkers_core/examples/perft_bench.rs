//! Perft benchmark for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo flamegraph --example perft_bench -p checkers_core -- [depth] [forced|optional]
//!
//! Examples:
//!   # Default: depth 9 from the opening, captures forced
//!   cargo flamegraph --example perft_bench -p checkers_core
//!
//!   # Optional captures
//!   cargo flamegraph --example perft_bench -p checkers_core -- 8 optional

use checkers_core::{Board, CaptureRule, Side, perft};
use std::env;
use std::time::Instant;

fn main() {
    let args: Vec<String> = env::args().collect();

    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(9);
    let rule = match args.get(2).map(String::as_str) {
        Some("optional") => CaptureRule::Optional,
        _ => CaptureRule::Forced,
    };

    let board = Board::startpos();
    println!("Rule: {rule:?}");
    println!("Depth: {depth}");
    println!();

    // Warm-up run at lower depth
    if depth > 2 {
        let _ = perft(&board, Side::Red, depth - 2, rule);
    }

    for d in 1..=depth {
        let start = Instant::now();
        let nodes = perft(&board, Side::Red, d, rule);
        let elapsed = start.elapsed();

        let nps = if elapsed.as_secs_f64() > 0.0 {
            nodes as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        println!("depth {d:>2}: {nodes:>12} nodes in {elapsed:>8.3?} ({nps:>10.0} nps)");
    }
}
