//! Game records, match tallies and their JSON storage

use checkers_core::{CaptureRule, GameState, SearchLimits, Side};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

use crate::match_runner::MatchConfig;

/// Result of a single game from one engine's perspective
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    /// Stopped at the ply cap. Draws are not detected.
    Unfinished,
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The side to move had no legal move.
    NoMoves,
    /// An engine returned no move or an illegal one.
    Forfeit,
    #[default]
    PlyCap,
}

/// A played game in move shorthand
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    pub red: String,
    pub black: String,
    pub moves: Vec<String>,
    /// `Ongoing` when the game hit the ply cap.
    pub outcome: GameState,
    #[serde(default)]
    pub termination: Termination,
}

impl GameRecord {
    /// Result for the engine that played `side`.
    pub fn result_for(&self, side: Side) -> GameResult {
        match self.outcome {
            GameState::Winner(winner) if winner == side => GameResult::Win,
            GameState::Winner(_) => GameResult::Loss,
            GameState::Ongoing => GameResult::Unfinished,
        }
    }

    pub fn plies(&self) -> usize {
        self.moves.len()
    }

    /// One report line, e.g. `red wins after 57 plies (no moves)`.
    pub fn summary(&self) -> String {
        let how = match self.termination {
            Termination::NoMoves => "no moves",
            Termination::Forfeit => "forfeit",
            Termination::PlyCap => "ply cap",
        };
        match self.outcome {
            GameState::Winner(side) => format!("{side} wins after {} plies ({how})", self.plies()),
            GameState::Ongoing => format!("unfinished after {} plies ({how})", self.plies()),
        }
    }
}

/// Result of a match (multiple games), from engine1's perspective
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub unfinished: u32,
    #[serde(default)]
    pub games: Vec<GameRecord>,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.unfinished
    }

    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Unfinished => self.unfinished += 1,
        }
    }

    /// Score from engine1's perspective (1 for win, 0.5 for unfinished, 0 for loss)
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.unfinished as f64) / total
    }

    /// Games lost by returning no move or an illegal one.
    pub fn forfeits(&self) -> usize {
        self.games
            .iter()
            .filter(|g| g.termination == Termination::Forfeit)
            .count()
    }

    pub fn average_plies(&self) -> f64 {
        if self.games.is_empty() {
            return 0.0;
        }
        self.games.iter().map(GameRecord::plies).sum::<usize>() as f64 / self.games.len() as f64
    }
}

/// Match settings worth keeping next to the results.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MatchSettings {
    pub limits: SearchLimits,
    pub max_plies: u32,
    pub capture_rule: CaptureRule,
    pub random_opening_plies: u32,
    pub seed: u64,
}

impl From<&MatchConfig> for MatchSettings {
    fn from(config: &MatchConfig) -> Self {
        Self {
            limits: config.limits,
            max_plies: config.max_plies,
            capture_rule: config.capture_rule,
            random_opening_plies: config.random_opening_plies,
            seed: config.seed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEntry {
    pub engine1: String,
    pub engine2: String,
    pub result: MatchResult,
}

/// Matches played under one set of settings, as saved to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentResults {
    pub name: String,
    pub settings: MatchSettings,
    pub matches: Vec<MatchEntry>,
}

impl TournamentResults {
    pub fn new(name: &str, settings: MatchSettings) -> Self {
        Self {
            name: name.to_string(),
            settings,
            matches: Vec::new(),
        }
    }

    pub fn add_match(&mut self, engine1: &str, engine2: &str, result: MatchResult) {
        self.matches.push(MatchEntry {
            engine1: engine1.to_string(),
            engine2: engine2.to_string(),
            result,
        });
    }

    /// Engine names in order of first appearance.
    pub fn participants(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in &self.matches {
            for name in [entry.engine1.as_str(), entry.engine2.as_str()] {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize: {}", e))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write: {}", e))
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| format!("Failed to read: {}", e))?;
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse: {}", e))
    }

    /// Per-match tallies followed by one line per game.
    pub fn generate_report(&self) -> String {
        let s = &self.settings;
        let mut report = String::new();
        let _ = writeln!(report, "=== {} ===", self.name);
        let _ = writeln!(report, "Engines: {}", self.participants().join(", "));
        let _ = writeln!(
            report,
            "Depth {}, {} nodes, {:?} captures, {} random plies, cap {} plies",
            s.limits.max_depth, s.limits.node_budget, s.capture_rule, s.random_opening_plies, s.max_plies
        );

        for entry in &self.matches {
            let r = &entry.result;
            let _ = writeln!(report);
            let _ = writeln!(
                report,
                "{} vs {}: +{} -{} ={} ({:.1}%), {:.1} plies/game, {} forfeits",
                entry.engine1,
                entry.engine2,
                r.wins,
                r.losses,
                r.unfinished,
                r.score() * 100.0,
                r.average_plies(),
                r.forfeits()
            );
            for (i, game) in r.games.iter().enumerate() {
                let _ = writeln!(
                    report,
                    "  {:>3}. {} (red) - {} (black): {}",
                    i + 1,
                    game.red,
                    game.black,
                    game.summary()
                );
            }
        }

        report
    }

    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
