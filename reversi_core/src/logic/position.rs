use crate::engine::move_list::MoveList;
use crate::engine::zobrist::ZobristKeys;
use crate::engine::Move;
use crate::logic::board::{Board, Player};
use crate::logic::rules::{count_moves, generate_moves, has_any_move, is_legal, place_disc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A board together with the side to move. Cheap to copy; the search gives
/// every child node its own copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub board: Board,
    pub turn: Player,
    pub game_over: bool,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    #[must_use]
    pub fn new() -> Self {
        Self::from_board(Board::new(), Player::Black)
    }

    /// Wraps an arbitrary board. The game is over when neither side can move.
    #[must_use]
    pub fn from_board(board: Board, turn: Player) -> Self {
        let game_over = !has_any_move(&board, turn) && !has_any_move(&board, turn.opponent());
        Self {
            board,
            turn,
            game_over,
        }
    }

    pub const fn active_player(&self) -> Player {
        self.turn
    }

    pub const fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn legal_moves(&self) -> MoveList {
        generate_moves(&self.board, self.turn)
    }

    /// Moves available to `player`, whether or not it is their turn.
    pub fn legal_move_count(&self, player: Player) -> usize {
        count_moves(&self.board, player)
    }

    pub fn has_legal_move(&self) -> bool {
        has_any_move(&self.board, self.turn)
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        !self.game_over && is_legal(&self.board, mv, self.turn)
    }

    /// Search step: plays `mv` for the side to move and hands the turn over.
    /// A player left without moves is *not* skipped here; the caller sees an
    /// empty move list and decides how to pass.
    #[must_use]
    pub fn play(&self, mv: Move) -> Self {
        let mut next = *self;
        place_disc(&mut next.board, mv, self.turn);
        next.turn = self.turn.opponent();
        next.game_over =
            !has_any_move(&next.board, next.turn) && !has_any_move(&next.board, self.turn);
        next
    }

    /// Forfeits the turn without touching the board.
    #[must_use]
    pub fn pass(&self) -> Self {
        let mut next = *self;
        next.turn = self.turn.opponent();
        next
    }

    /// Model step: `play` followed by the forced pass, so the returned
    /// position always has a mover with a legal move unless the game ended.
    #[must_use]
    pub fn apply_move(&self, mv: Move) -> Self {
        let next = self.play(mv);
        if !next.game_over && !next.has_legal_move() {
            next.pass()
        } else {
            next
        }
    }

    pub fn disc_count(&self, player: Player) -> usize {
        self.board.count(player)
    }

    pub fn empty_count(&self) -> usize {
        self.board.empty_count()
    }

    /// Zobrist key of the discs plus the side to move.
    pub fn hash(&self) -> u64 {
        match self.turn {
            Player::Black => self.board.zobrist_hash,
            Player::White => self.board.zobrist_hash ^ ZobristKeys::get().side_key,
        }
    }

    /// Disc-majority winner of a finished game; `None` while playing or on a draw.
    pub fn winner(&self) -> Option<Player> {
        if !self.game_over {
            return None;
        }
        match self
            .disc_count(Player::Black)
            .cmp(&self.disc_count(Player::White))
        {
            Ordering::Greater => Some(Player::Black),
            Ordering::Less => Some(Player::White),
            Ordering::Equal => None,
        }
    }
}
