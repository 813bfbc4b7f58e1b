//! Match runner for playing games between engines

use checkers_core::{Board, CaptureRule, Engine, GameState, Move, SearchLimits, Side};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::results::{GameRecord, GameResult, MatchResult, Termination};

/// Configuration for a match
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Search limits handed to the engines on every move
    pub limits: SearchLimits,
    /// Plies after which a game is stopped and counted as unfinished
    pub max_plies: u32,
    /// Rule engine moves are checked against; openings follow it too
    pub capture_rule: CaptureRule,
    /// Whether engine1 switches sides each game
    pub alternate_sides: bool,
    /// Random plies played from the start position before the engines take over
    pub random_opening_plies: u32,
    /// Seed for the random openings; each pair of games shares one opening
    pub seed: u64,
    /// Log every game at info level
    pub verbose: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            limits: SearchLimits::depth(6),
            max_plies: 200,
            capture_rule: CaptureRule::Optional,
            alternate_sides: true,
            random_opening_plies: 0,
            seed: 0,
            verbose: true,
        }
    }
}

/// Runs matches between two engines
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Run a match between two engines
    ///
    /// Returns the result from engine1's perspective, with every game record
    pub fn run_match(&self, engine1: &mut dyn Engine, engine2: &mut dyn Engine) -> MatchResult {
        let mut result = MatchResult::new();

        for game_num in 0..self.config.num_games {
            let engine1_red = !self.config.alternate_sides || game_num % 2 == 0;
            let opening = self.opening(game_num);

            let (record, engine1_side) = if engine1_red {
                (self.play_from(engine1, engine2, &opening), Side::Red)
            } else {
                (self.play_from(engine2, engine1, &opening), Side::Black)
            };
            let game_result = record.result_for(engine1_side);
            result.record(game_result);

            let outcome = match game_result {
                GameResult::Win => "1-0",
                GameResult::Loss => "0-1",
                GameResult::Unfinished => "*",
            };
            let line = format!(
                "Game {}/{}: {} ({}) in {} plies - Score: {}-{}-{}",
                game_num + 1,
                self.config.num_games,
                outcome,
                engine1_side,
                record.plies(),
                result.wins,
                result.losses,
                result.unfinished
            );
            if self.config.verbose {
                info!("{line}");
            } else {
                debug!("{line}");
            }

            result.games.push(record);
        }

        result
    }

    /// Play a single game from the start position without a random opening
    pub fn play_game(&self, red: &mut dyn Engine, black: &mut dyn Engine) -> GameRecord {
        self.play_from(red, black, &[])
    }

    /// Random legal opening for a game. Both games of a pair get the same one.
    fn opening(&self, game_num: u32) -> Vec<Move> {
        let mut rng = StdRng::seed_from_u64(self.config.seed.wrapping_add(u64::from(game_num / 2)));
        let mut board = Board::startpos();
        let mut side = Side::Red;
        let mut line = Vec::new();

        for _ in 0..self.config.random_opening_plies {
            let moves = board.compute_moves_with(side, self.config.capture_rule);
            let Some(mv) = moves.choose(&mut rng) else {
                break;
            };
            board = board.perform_move(mv, side);
            line.push(mv.clone());
            side = side.other();
        }
        line
    }

    fn play_from(&self, red: &mut dyn Engine, black: &mut dyn Engine, opening: &[Move]) -> GameRecord {
        let mut board = Board::startpos();
        let mut side = Side::Red;
        let mut record = GameRecord {
            red: red.name().to_string(),
            black: black.name().to_string(),
            moves: Vec::new(),
            outcome: GameState::Ongoing,
            termination: Termination::PlyCap,
        };
        red.new_game();
        black.new_game();

        for ply in 0..self.config.max_plies as usize {
            let legal = board.compute_moves_with(side, self.config.capture_rule);
            if legal.is_empty() {
                record.outcome = GameState::Winner(side.other());
                record.termination = Termination::NoMoves;
                return record;
            }

            let mv = match opening.get(ply) {
                Some(mv) => mv.clone(),
                None => {
                    let engine: &mut dyn Engine = match side {
                        Side::Red => &mut *red,
                        Side::Black => &mut *black,
                    };
                    let result = engine.search(&board, side, self.config.limits);
                    match result.best_move {
                        Some(mv) if legal.contains(&mv) => mv,
                        other => {
                            // Returning nothing or an illegal move forfeits.
                            warn!(
                                "{} ({side}) forfeits with {:?} at ply {ply}",
                                engine.name(),
                                other.map(|mv| mv.to_string())
                            );
                            record.outcome = GameState::Winner(side.other());
                            record.termination = Termination::Forfeit;
                            return record;
                        }
                    }
                }
            };

            board = board.perform_move(&mv, side);
            record.moves.push(mv.to_string());
            side = side.other();
        }

        // Ply cap reached: unfinished unless the mover is stuck.
        record.outcome = board.get_state(side);
        if record.outcome != GameState::Ongoing {
            record.termination = Termination::NoMoves;
        }
        record
    }
}

/// Quick utility to run a single match
pub fn quick_match(
    engine1: &mut dyn Engine,
    engine2: &mut dyn Engine,
    num_games: u32,
    depth: u8,
) -> MatchResult {
    let config = MatchConfig {
        num_games,
        limits: SearchLimits::depth(depth),
        ..Default::default()
    };
    let runner = MatchRunner::new(config);
    runner.run_match(engine1, engine2)
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
