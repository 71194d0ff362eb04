#[cfg(test)]
mod tests {
    use crate::engine::config::EngineConfig;
    use crate::engine::eval::PhaseEvaluator;
    use crate::engine::search::{MinimaxEngine, SCORE_INF};
    use crate::engine::{Evaluator, Move, SearchError, Searcher};
    use crate::logic::board::{Board, Player};
    use crate::logic::position::Position;
    use std::sync::Arc;

    // Full-width minimax without pruning or a table, same pass rule.
    fn plain_minimax(
        eval: &PhaseEvaluator,
        pos: &Position,
        depth: u8,
        maximizing: bool,
        perspective: Player,
    ) -> i32 {
        if depth == 0 || pos.is_game_over() {
            return eval.evaluate(pos, perspective);
        }
        let moves = pos.legal_moves();
        if moves.is_empty() {
            return plain_minimax(eval, &pos.pass(), depth - 1, !maximizing, perspective);
        }
        let scores = moves
            .iter()
            .map(|&mv| plain_minimax(eval, &pos.play(mv), depth - 1, !maximizing, perspective));
        if maximizing {
            scores.max().unwrap()
        } else {
            scores.min().unwrap()
        }
    }

    fn plain_best(eval: &PhaseEvaluator, pos: &Position, depth: u8) -> (Move, i32) {
        let mut best: Option<(Move, i32)> = None;
        for mv in pos.legal_moves() {
            let score = plain_minimax(eval, &pos.play(mv), depth - 1, false, pos.active_player());
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((mv, score));
            }
        }
        best.unwrap()
    }

    // Opening lines that stay pass-free within four plies of search.
    fn sample_positions() -> Vec<Position> {
        let mut out = Vec::new();
        for take_last in [false, true] {
            let mut pos = Position::new();
            for ply in 0..9 {
                if matches!(ply, 0 | 3 | 6 | 8) {
                    out.push(pos);
                }
                let moves = pos.legal_moves();
                let mv = if take_last {
                    moves.get(moves.len() - 1)
                } else {
                    moves.get(0)
                };
                pos = pos.apply_move(mv.unwrap());
            }
        }
        out
    }

    fn engine_with(use_tt: bool, order_moves: bool) -> MinimaxEngine {
        MinimaxEngine::new(Arc::new(EngineConfig {
            use_transposition_table: use_tt,
            order_moves,
            tt_size_mb: 1,
            ..EngineConfig::default()
        }))
    }

    #[test]
    fn test_pruned_search_matches_full_minimax() {
        let eval = PhaseEvaluator::new(Arc::new(EngineConfig::default()));
        for (i, pos) in sample_positions().iter().enumerate() {
            for depth in 1..=4 {
                let expected = plain_best(&eval, pos, depth);
                for (use_tt, order) in [(false, false), (false, true), (true, false), (true, true)] {
                    let mut engine = engine_with(use_tt, order);
                    let result = engine.find_best_move(pos, depth).unwrap();
                    assert_eq!(
                        (result.best_move, result.stats.score),
                        expected,
                        "position {i} depth {depth} tt {use_tt} ordering {order}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_minimax_value_matches_full_minimax() {
        let eval = PhaseEvaluator::new(Arc::new(EngineConfig::default()));
        let mut engine = engine_with(false, true);
        for pos in sample_positions() {
            let me = pos.active_player();
            for depth in 0..=3 {
                let value = engine.minimax(&pos, depth, -SCORE_INF, SCORE_INF, true, me);
                assert_eq!(value, plain_minimax(&eval, &pos, depth, true, me));
            }
        }
    }

    #[test]
    fn test_pruning_visits_fewer_nodes() {
        fn count(pos: &Position, depth: u8) -> u64 {
            if depth == 0 || pos.is_game_over() {
                return 1;
            }
            let moves = pos.legal_moves();
            if moves.is_empty() {
                return 1 + count(&pos.pass(), depth - 1);
            }
            1 + moves.iter().map(|&mv| count(&pos.play(mv), depth - 1)).sum::<u64>()
        }

        let pos = sample_positions()[2];
        let mut engine = engine_with(false, true);
        let pruned = engine.find_best_move(&pos, 4).unwrap().stats.nodes;
        // Root itself is not counted by the engine.
        let full = count(&pos, 4) - 1;
        assert!(pruned < full, "pruned {pruned} vs full {full}");
    }

    #[test]
    fn test_forced_pass_hands_turn_to_opponent() {
        let board = Board::from_rows([
            "BW......",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "BWW.....",
        ])
        .unwrap();
        // After b1 White is stuck, Black still has moves.
        let stuck = Position::from_board(board, Player::Black).play(Move::new(2, 0));
        assert!(stuck.legal_moves().is_empty());
        assert!(!stuck.is_game_over());

        let mut engine = engine_with(true, true);
        let value = engine.minimax(&stuck, 2, -SCORE_INF, SCORE_INF, true, Player::White);

        let passed = stuck.pass();
        let replies = passed.legal_moves();
        let eval = PhaseEvaluator::new(Arc::new(EngineConfig::default()));
        let expected = replies
            .iter()
            .map(|&mv| eval.evaluate(&passed.play(mv), Player::White))
            .min()
            .unwrap();

        assert_eq!(value, expected);
        // Pass node, the node after the pass, and one leaf per reply.
        assert_eq!(engine.nodes_searched(), 2 + replies.len() as u64);
    }

    #[test]
    fn test_search_through_pass_positions() {
        let board = Board::from_rows([
            "BW......",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "BWW.....",
        ])
        .unwrap();
        let pos = Position::from_board(board, Player::Black);
        let eval = PhaseEvaluator::new(Arc::new(EngineConfig::default()));
        for depth in 1..=4 {
            let expected = plain_best(&eval, &pos, depth);
            let mut engine = engine_with(false, true);
            let result = engine.find_best_move(&pos, depth).unwrap();
            assert_eq!((result.best_move, result.stats.score), expected);
            assert!(pos.is_legal(result.best_move));
        }
    }

    #[test]
    fn test_precondition_errors() {
        let mut engine = engine_with(true, true);
        let start = Position::new();
        assert_eq!(
            engine.find_best_move(&start, 0),
            Err(SearchError::InvalidDepth(0))
        );

        let full = Board::from_rows([
            "BBBBBBBB", "BBBBBBBB", "BBBBBBBB", "BBBBBBBB", "WWWWWWWW", "WWWWWWWW", "WWWWWWWW",
            "WWWWWWWW",
        ])
        .unwrap();
        let over = Position::from_board(full, Player::Black);
        assert_eq!(engine.find_best_move(&over, 3), Err(SearchError::GameOver));

        let board = Board::from_rows([
            "BW......",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "BWW.....",
        ])
        .unwrap();
        let stuck = Position::from_board(board, Player::Black).play(Move::new(2, 0));
        assert_eq!(engine.find_best_move(&stuck, 3), Err(SearchError::NoLegalMoves));
    }

    #[test]
    fn test_opening_move_is_one_of_four() {
        let mut engine = engine_with(true, true);
        let result = engine.search(&Position::new(), 1).unwrap();
        let openings = [
            Move::new(2, 3),
            Move::new(3, 2),
            Move::new(4, 5),
            Move::new(5, 4),
        ];
        assert!(openings.contains(&result.best_move));
        assert_eq!(result.stats.depth, 1);
        // The four openings are symmetric, so the first generated one wins the tie.
        assert_eq!(result.best_move, Move::new(3, 2));
        assert_eq!(result.stats.nodes, 4);
    }

    #[test]
    fn test_search_does_not_touch_input() {
        let mut engine = engine_with(true, true);
        let pos = sample_positions()[1];
        let before = pos;
        let first = engine.find_best_move(&pos, 3).unwrap();
        assert_eq!(pos, before);
        let second = engine.find_best_move(&pos, 3).unwrap();
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.stats.score, second.stats.score);
        assert_eq!(first.stats.nodes, second.stats.nodes);
    }

    #[test]
    fn test_update_config_switches_table_off() {
        let mut engine = engine_with(true, true);
        let pos = sample_positions()[2];
        let with_tt = engine.find_best_move(&pos, 4).unwrap();
        engine.update_config(Arc::new(EngineConfig {
            use_transposition_table: false,
            tt_size_mb: 2,
            ..EngineConfig::default()
        }));
        assert!(!engine.config().use_transposition_table);
        let without_tt = engine.find_best_move(&pos, 4).unwrap();
        assert_eq!(with_tt.best_move, without_tt.best_move);
        assert_eq!(with_tt.stats.score, without_tt.stats.score);
    }
}
