use crate::engine::config::{EngineConfig, GamePhase};
use crate::engine::Evaluator;
use crate::logic::board::Player;
use crate::logic::eval_constants::{get_square_weight, MAX_POSITIONAL_SCORE};
use crate::logic::position::Position;
use std::sync::Arc;

/// Normalized feature values (each in [-1, 1]) and the weighted result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalBreakdown {
    pub phase: GamePhase,
    pub parity: f64,
    pub mobility: f64,
    pub frontier: f64,
    pub positional: f64,
    pub score: i32,
}

#[derive(Default)]
struct SideTally {
    discs: i32,
    positional: i32,
    frontier: i32,
}

/// `(own - opp) / (own + opp)`, or 0 when both are 0.
fn normalized_diff(own: i32, opp: i32) -> f64 {
    let total = own + opp;
    if total == 0 {
        0.0
    } else {
        f64::from(own - opp) / f64::from(total)
    }
}

pub struct PhaseEvaluator {
    config: Arc<EngineConfig>,
}

impl PhaseEvaluator {
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    pub fn breakdown(&self, position: &Position, perspective: Player) -> EvalBreakdown {
        let board = &position.board;
        let mut own = SideTally::default();
        let mut opp = SideTally::default();
        let mut empty = 0usize;

        for (sq, cell) in board.cells() {
            let Some(owner) = cell.owner() else {
                empty += 1;
                continue;
            };
            let tally = if owner == perspective {
                &mut own
            } else {
                &mut opp
            };
            tally.discs += 1;
            tally.positional += get_square_weight(sq.x as usize, sq.y as usize);
            if board.touches_empty(sq) {
                tally.frontier += 1;
            }
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let (own_moves, opp_moves) = (
            position.legal_move_count(perspective) as i32,
            position.legal_move_count(perspective.opponent()) as i32,
        );

        let parity = normalized_diff(own.discs, opp.discs);
        let mobility = normalized_diff(own_moves, opp_moves);
        // Frontier discs are a liability, so fewer is better.
        let frontier = -normalized_diff(own.frontier, opp.frontier);
        let positional = f64::from(own.positional - opp.positional) / MAX_POSITIONAL_SCORE;

        let phase = self.config.phase_for(empty);
        let w = self.config.weights(phase);
        let composite = w.parity * parity
            + w.mobility * mobility
            + w.frontier * frontier
            + w.positional * positional;

        #[allow(clippy::cast_possible_truncation)]
        let score = (100.0 * composite).round() as i32;

        EvalBreakdown {
            phase,
            parity,
            mobility,
            frontier,
            positional,
            score,
        }
    }
}

impl Evaluator for PhaseEvaluator {
    fn evaluate(&self, position: &Position, perspective: Player) -> i32 {
        self.breakdown(position, perspective).score
    }
}
