use crate::engine::move_list::MoveList;
use crate::engine::Move;
use crate::logic::board::{Board, Cell, Player, DIRECTIONS, NUM_SQUARES};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum MoveError {
    #[error("the game is over")]
    GameOver,
    #[error("square is off the board")]
    OutOfBounds,
    #[error("square is already occupied")]
    Occupied,
    #[error("move does not capture any disc")]
    NoCapture,
}

/// Checks that `player` may place a disc on `sq`.
pub fn validate_move(board: &Board, sq: Move, player: Player) -> Result<(), MoveError> {
    if !sq.is_on_board() {
        return Err(MoveError::OutOfBounds);
    }
    if !board.get(sq).is_empty() {
        return Err(MoveError::Occupied);
    }
    if !captures_any(board, sq, player) {
        return Err(MoveError::NoCapture);
    }
    Ok(())
}

/// Number of opponent discs bracketed along `dir` if `player` played `sq`.
fn run_length(board: &Board, sq: Move, player: Player, dir: (i8, i8)) -> usize {
    let own = Cell::disc(player);
    let theirs = Cell::disc(player.opponent());

    let mut count = 0;
    let mut cursor = Board::step(sq, dir);
    while let Some(next) = cursor {
        let cell = board.get(next);
        if cell == theirs {
            count += 1;
            cursor = Board::step(next, dir);
        } else if cell == own {
            return count;
        } else {
            return 0;
        }
    }
    0
}

fn captures_any(board: &Board, sq: Move, player: Player) -> bool {
    DIRECTIONS
        .iter()
        .any(|&dir| run_length(board, sq, player, dir) > 0)
}

pub fn is_legal(board: &Board, sq: Move, player: Player) -> bool {
    sq.is_on_board() && board.get(sq).is_empty() && captures_any(board, sq, player)
}

/// Legal moves for `player`, in row-major order (`y` then `x`).
pub fn generate_moves(board: &Board, player: Player) -> MoveList {
    let mut moves = MoveList::new();
    for idx in 0..NUM_SQUARES {
        let sq = Move::from_index(idx);
        if is_legal(board, sq, player) {
            moves.push(sq);
        }
    }
    moves
}

pub fn count_moves(board: &Board, player: Player) -> usize {
    (0..NUM_SQUARES)
        .filter(|&idx| is_legal(board, Move::from_index(idx), player))
        .count()
}

pub fn has_any_move(board: &Board, player: Player) -> bool {
    (0..NUM_SQUARES).any(|idx| is_legal(board, Move::from_index(idx), player))
}

/// Places a disc for `player` on `sq` and turns every bracketed line.
/// Returns the number of discs flipped. The caller is responsible for legality.
pub fn place_disc(board: &mut Board, sq: Move, player: Player) -> usize {
    let own = Cell::disc(player);
    let mut flipped = 0;

    for &dir in &DIRECTIONS {
        let run = run_length(board, sq, player, dir);
        let mut cursor = sq;
        for _ in 0..run {
            if let Some(next) = Board::step(cursor, dir) {
                board.set(next, own);
                cursor = next;
            }
        }
        flipped += run;
    }

    board.set(sq, own);
    flipped
}
