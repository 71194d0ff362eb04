use crate::engine::config::EngineConfig;
use crate::engine::search::MinimaxEngine;
use crate::engine::{Move, SearchError, SearchStats, Searcher};
use crate::logic::position::Position;
use gloo_worker::{HandlerId, Worker, WorkerScope};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Input {
    ComputeMove(Position, u8, EngineConfig),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Output {
    MoveFound(Move, SearchStats),
    Failed(SearchError),
}

/// Runs searches off the UI thread. The engine is kept between requests
/// and only its config is swapped.
#[derive(Default)]
pub struct GameWorker {
    engine: Option<MinimaxEngine>,
}

impl GameWorker {
    pub fn compute(&mut self, input: Input) -> Output {
        match input {
            Input::ComputeMove(position, depth, config) => {
                let config = Arc::new(config);
                let engine = self
                    .engine
                    .get_or_insert_with(|| MinimaxEngine::new(config.clone()));
                engine.update_config(config);

                match engine.search(&position, depth) {
                    Ok(result) => Output::MoveFound(result.best_move, result.stats),
                    Err(err) => {
                        log::warn!("search request rejected: {err}");
                        Output::Failed(err)
                    }
                }
            }
        }
    }
}

impl Worker for GameWorker {
    type Input = Input;
    type Message = ();
    type Output = Output;

    fn create(_scope: &WorkerScope<Self>) -> Self {
        Self::default()
    }

    fn update(&mut self, _scope: &WorkerScope<Self>, _msg: Self::Message) {}

    fn received(&mut self, scope: &WorkerScope<Self>, msg: Self::Input, id: HandlerId) {
        let output = self.compute(msg);
        scope.respond(id, output);
    }
}
