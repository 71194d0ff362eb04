use crate::logic::board::Player;
use crate::logic::position::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod eval;
pub mod move_list;
pub mod search;
pub mod tt;
pub mod zobrist;

#[cfg(test)]
mod bench_test;
#[cfg(test)]
mod search_test;

/// A board coordinate. `x` is the column, `y` the row, `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Move {
    pub x: u8,
    pub y: u8,
}

impl Move {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Flat mailbox index (`y * 8 + x`).
    #[must_use]
    pub const fn index(self) -> usize {
        self.y as usize * 8 + self.x as usize
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_index(idx: usize) -> Self {
        Self {
            x: (idx % 8) as u8,
            y: (idx / 8) as u8,
        }
    }

    #[must_use]
    pub const fn is_on_board(self) -> bool {
        self.x < 8 && self.y < 8
    }
}

impl fmt::Display for Move {
    // Column letter + 1-based row, e.g. (2, 3) -> "c4".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = char::from(b'a' + self.x);
        write!(f, "{file}{}", self.y + 1)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u64,
    pub score: i32,
    pub time_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub best_move: Move,
    pub stats: SearchStats,
}

/// Precondition violations. These are caller bugs, not recoverable search states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum SearchError {
    #[error("search depth must be at least 1, got {0}")]
    InvalidDepth(u8),
    #[error("the side to move has no legal moves")]
    NoLegalMoves,
    #[error("the game is already over")]
    GameOver,
}

pub trait Evaluator {
    /// Score `position` from `perspective`'s point of view. Larger is better for `perspective`.
    fn evaluate(&self, position: &Position, perspective: Player) -> i32;
}

pub trait Searcher {
    fn search(&mut self, position: &Position, depth: u8) -> Result<SearchResult, SearchError>;
}
