use crate::engine::config::EngineConfig;
use crate::engine::eval::PhaseEvaluator;
use crate::engine::move_list::MoveList;
use crate::engine::tt::{TTFlag, TranspositionTable};
use crate::engine::{Evaluator, Move, SearchError, SearchResult, SearchStats, Searcher};
use crate::logic::board::Player;
use crate::logic::eval_constants::get_square_weight;
use crate::logic::position::Position;
use std::cmp::Reverse;
use std::sync::Arc;

/// Larger than any evaluation.
pub const SCORE_INF: i32 = 1_000_000;

/// Depth-limited minimax with alpha-beta pruning and a transposition table
/// that lives for one `find_best_move` call.
pub struct MinimaxEngine {
    config: Arc<EngineConfig>,
    evaluator: PhaseEvaluator,
    tt: TranspositionTable,
    nodes_searched: u64,
    tt_hits: u64,
}

impl MinimaxEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: PhaseEvaluator::new(config.clone()),
            tt: TranspositionTable::new(config.tt_size_mb),
            config,
            nodes_searched: 0,
            tt_hits: 0,
        }
    }

    pub fn update_config(&mut self, config: Arc<EngineConfig>) {
        if config.tt_size_mb != self.config.tt_size_mb {
            self.tt = TranspositionTable::new(config.tt_size_mb);
        }
        self.evaluator = PhaseEvaluator::new(config.clone());
        self.config = config;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Static evaluation of `position` for `player`, independent of any search.
    pub fn evaluate(&self, position: &Position, player: Player) -> i32 {
        self.evaluator.evaluate(position, player)
    }

    /// Nodes visited by the last search.
    pub const fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    fn now() -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            if let Some(window) = web_sys::window() {
                return window.performance().map(|p| p.now()).unwrap_or(0.0);
            }
            let global = js_sys::global();
            if let Ok(worker) = global.dyn_into::<web_sys::WorkerGlobalScope>() {
                return worker.performance().map(|p| p.now()).unwrap_or(0.0);
            }
            0.0
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::time::{SystemTime, UNIX_EPOCH};
            let since_the_epoch = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default();
            #[allow(clippy::cast_precision_loss)]
            let time_ms = (since_the_epoch.as_secs() as f64).mul_add(
                1000.0,
                f64::from(since_the_epoch.subsec_nanos()) / 1_000_000.0,
            );
            time_ms
        }
    }

    /// Picks the move with the highest minimax value for the side to move.
    /// Ties go to the first move in generation order.
    pub fn find_best_move(
        &mut self,
        position: &Position,
        depth: u8,
    ) -> Result<SearchResult, SearchError> {
        if depth == 0 {
            return Err(SearchError::InvalidDepth(depth));
        }
        if position.is_game_over() {
            return Err(SearchError::GameOver);
        }
        let moves = position.legal_moves();
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        self.nodes_searched = 0;
        self.tt_hits = 0;
        if self.config.use_transposition_table {
            self.tt.clear();
        }
        let start_time = Self::now();
        let perspective = position.active_player();

        // Root moves are never reordered; ties keep the first generated move.
        let mut best: Option<(Move, i32)> = None;
        let mut alpha = -SCORE_INF;
        for mv in moves {
            let child = position.play(mv);
            let score = self.minimax(&child, depth - 1, alpha, SCORE_INF, false, perspective);
            log::trace!("root {mv}: {score}");

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
                alpha = alpha.max(score);
            }
        }

        let (best_move, score) = best.ok_or(SearchError::NoLegalMoves)?;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let time_ms = (Self::now() - start_time).max(0.0) as u64;
        let stats = SearchStats {
            depth,
            nodes: self.nodes_searched,
            score,
            time_ms,
        };
        log::debug!(
            "{perspective} depth {depth}: best {best_move} score {score}, {} nodes, {} tt hits, {time_ms} ms",
            self.nodes_searched,
            self.tt_hits
        );

        Ok(SearchResult { best_move, stats })
    }

    /// Minimax value of `position` from `perspective`'s point of view.
    /// `maximizing` is true when `perspective` is to move.
    pub fn minimax(
        &mut self,
        position: &Position,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        perspective: Player,
    ) -> i32 {
        self.nodes_searched += 1;

        if depth == 0 || position.is_game_over() {
            return self.evaluator.evaluate(position, perspective);
        }

        let hash = position.hash();
        if self.config.use_transposition_table {
            if let Some(entry) = self.tt.probe(hash) {
                if entry.depth >= depth {
                    self.tt_hits += 1;
                    match entry.flag {
                        TTFlag::Exact => return entry.score,
                        TTFlag::LowerBound => alpha = alpha.max(entry.score),
                        TTFlag::UpperBound => beta = beta.min(entry.score),
                    }
                    if beta <= alpha {
                        return entry.score;
                    }
                }
            }
        }

        // Bounds are classified against the window the children actually see.
        let alpha_orig = alpha;
        let beta_orig = beta;

        let moves = self.ordered_moves(position);
        let value = if moves.is_empty() {
            // Forced pass: the opponent moves, the board stays.
            self.minimax(
                &position.pass(),
                depth - 1,
                alpha,
                beta,
                !maximizing,
                perspective,
            )
        } else if maximizing {
            let mut best = -SCORE_INF;
            for mv in moves {
                let child = position.play(mv);
                let score = self.minimax(&child, depth - 1, alpha, beta, false, perspective);
                best = best.max(score);
                alpha = alpha.max(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = SCORE_INF;
            for mv in moves {
                let child = position.play(mv);
                let score = self.minimax(&child, depth - 1, alpha, beta, true, perspective);
                best = best.min(score);
                beta = beta.min(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        };

        if self.config.use_transposition_table {
            let flag = if value <= alpha_orig {
                TTFlag::UpperBound
            } else if value >= beta_orig {
                TTFlag::LowerBound
            } else {
                TTFlag::Exact
            };
            self.tt.store(hash, value, depth, flag);
        }

        value
    }

    /// Interior-node ordering: corners first, X-squares last.
    fn ordered_moves(&self, position: &Position) -> MoveList {
        let mut moves = position.legal_moves();
        if self.config.order_moves {
            moves.sort_by_key(|mv| Reverse(get_square_weight(mv.x as usize, mv.y as usize)));
        }
        moves
    }
}

impl Searcher for MinimaxEngine {
    fn search(&mut self, position: &Position, depth: u8) -> Result<SearchResult, SearchError> {
        self.find_best_move(position, depth)
    }
}
