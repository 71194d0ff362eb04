use crate::engine::zobrist::ZobristKeys;
use crate::engine::Move;
use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use std::fmt;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// The eight compass directions as `(dx, dy)`.
pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Black => 0,
            Self::White => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Black => f.write_str("Black"),
            Self::White => f.write_str("White"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    #[must_use]
    pub const fn disc(player: Player) -> Self {
        match player {
            Player::Black => Self::Black,
            Player::White => Self::White,
        }
    }

    #[must_use]
    pub const fn owner(self) -> Option<Player> {
        match self {
            Self::Empty => None,
            Self::Black => Some(Player::Black),
            Self::White => Some(Player::White),
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardParseError {
    #[error("row {row} has {len} cells, expected 8")]
    RowLength { row: usize, len: usize },
    #[error("unexpected character {ch:?} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, ch: char },
}

/// 8x8 mailbox. `zobrist_hash` covers the discs only; the side to move is
/// folded in by `Position::hash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(with = "BigArray")]
    cells: [Cell; NUM_SQUARES],
    pub zobrist_hash: u64,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard opening: White on d4/e5, Black on e4/d5.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.set(Move::new(3, 3), Cell::White);
        board.set(Move::new(4, 3), Cell::Black);
        board.set(Move::new(4, 4), Cell::White);
        board.set(Move::new(3, 4), Cell::Black);
        board
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cells: [Cell::Empty; NUM_SQUARES],
            zobrist_hash: 0,
        }
    }

    /// Parses eight rows of eight characters: `.` empty, `B`/`X` black, `W`/`O` white.
    /// Whitespace inside a row is ignored.
    pub fn from_rows(rows: [&str; BOARD_SIZE]) -> Result<Self, BoardParseError> {
        let mut board = Self::empty();
        for (y, row) in rows.iter().enumerate() {
            let cells: Vec<char> = row.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != BOARD_SIZE {
                return Err(BoardParseError::RowLength {
                    row: y,
                    len: cells.len(),
                });
            }
            for (x, ch) in cells.into_iter().enumerate() {
                let cell = match ch {
                    '.' | '-' => Cell::Empty,
                    'B' | 'X' | 'b' | 'x' => Cell::Black,
                    'W' | 'O' | 'w' | 'o' => Cell::White,
                    _ => return Err(BoardParseError::InvalidCell { row: y, col: x, ch }),
                };
                board.set(Move::from_index(y * BOARD_SIZE + x), cell);
            }
        }
        Ok(board)
    }

    #[must_use]
    pub fn get(&self, sq: Move) -> Cell {
        self.cells.get(sq.index()).copied().unwrap_or(Cell::Empty)
    }

    /// Writes a cell and keeps the Zobrist hash in step.
    pub fn set(&mut self, sq: Move, cell: Cell) {
        let keys = ZobristKeys::get();
        if let Some(slot) = self.cells.get_mut(sq.index()) {
            if let Some(old) = slot.owner() {
                self.zobrist_hash ^= keys.disc_key(sq, old);
            }
            if let Some(new) = cell.owner() {
                self.zobrist_hash ^= keys.disc_key(sq, new);
            }
            *slot = cell;
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = (Move, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, &cell)| (Move::from_index(idx), cell))
    }

    #[must_use]
    pub fn count(&self, player: Player) -> usize {
        let disc = Cell::disc(player);
        self.cells.iter().filter(|&&c| c == disc).count()
    }

    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    /// Neighbour of `sq` one step along `dir`, if still on the board.
    #[must_use]
    pub fn step(sq: Move, dir: (i8, i8)) -> Option<Move> {
        let x = i16::from(sq.x) + i16::from(dir.0);
        let y = i16::from(sq.y) + i16::from(dir.1);
        if (0..8).contains(&x) && (0..8).contains(&y) {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let sq = Move::new(x as u8, y as u8);
            Some(sq)
        } else {
            None
        }
    }

    /// True when at least one of the 8 neighbours of `sq` is empty.
    #[must_use]
    pub fn touches_empty(&self, sq: Move) -> bool {
        DIRECTIONS
            .iter()
            .filter_map(|&dir| Self::step(sq, dir))
            .any(|n| self.get(n).is_empty())
    }

    /// Full recomputation of the disc hash.
    #[must_use]
    pub fn calculate_hash(&self) -> u64 {
        let keys = ZobristKeys::get();
        self.cells()
            .filter_map(|(sq, cell)| cell.owner().map(|p| keys.disc_key(sq, p)))
            .fold(0, |hash, key| hash ^ key)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for y in 0..BOARD_SIZE {
            write!(f, "{}", y + 1)?;
            for x in 0..BOARD_SIZE {
                let ch = match self.get(Move::from_index(y * BOARD_SIZE + x)) {
                    Cell::Empty => '.',
                    Cell::Black => 'B',
                    Cell::White => 'W',
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
