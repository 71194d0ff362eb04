#[cfg(test)]
mod tests {
    use crate::engine::config::EngineConfig;
    use crate::engine::search::MinimaxEngine;
    use crate::engine::Searcher;
    use crate::logic::board::{Board, Player};
    use crate::logic::position::Position;
    use std::sync::Arc;

    fn report(label: &str, engine: &mut MinimaxEngine, position: &Position, depth: u8) {
        let start = std::time::Instant::now();
        let result = engine.search(position, depth).unwrap();
        let duration = start.elapsed();

        println!("{label} depth {depth} stats: {:?}", result.stats);
        println!("Time taken: {duration:?}");
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let nps = (result.stats.nodes as f64 / duration.as_secs_f64().max(1e-9)) as u64;
        println!("NPS: {nps}");
        assert!(position.is_legal(result.best_move));
    }

    #[test]
    fn bench_opening() {
        println!("--- Benchmarking Opening ---");
        let mut engine = MinimaxEngine::new(Arc::new(EngineConfig::default()));
        let position = Position::new();

        // Warmup
        engine.search(&position, 2).unwrap();
        report("Opening", &mut engine, &position, 5);
    }

    #[test]
    fn bench_midgame_with_and_without_table() {
        println!("--- Benchmarking Midgame ---");
        let board = Board::from_rows([
            "........",
            "........",
            "..WWWB..",
            "..BWBB..",
            "..BBWW..",
            "...BW...",
            "........",
            "........",
        ])
        .unwrap();
        let position = Position::from_board(board, Player::Black);

        let mut with_tt = MinimaxEngine::new(Arc::new(EngineConfig::default()));
        report("Midgame (tt)", &mut with_tt, &position, 5);

        let mut without_tt = MinimaxEngine::new(Arc::new(EngineConfig {
            use_transposition_table: false,
            ..EngineConfig::default()
        }));
        report("Midgame (no tt)", &mut without_tt, &position, 5);
    }
}
