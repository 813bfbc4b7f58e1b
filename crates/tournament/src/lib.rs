//! Tournament Runner for ML-checkers
//!
//! This crate provides infrastructure for:
//! - Running matches between different engines
//! - Recording every game in move shorthand
//! - Saving results as JSON and generating reports
//!
//! # Usage
//!
//! ```bash
//! # Run a match between the classical and random engines
//! cargo run -p tournament -- match classical random --games 20 --depth 6
//!
//! # Count leaf positions from the start
//! cargo run -p tournament -- perft --depth 7 --forced
//! ```

mod match_runner;
mod results;

pub use match_runner::*;
pub use results::*;
