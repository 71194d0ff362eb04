use crate::engine::move_list::MoveList;
use crate::engine::Move;
use crate::logic::board::{Board, Player};
use crate::logic::position::Position;
use crate::logic::rules::{validate_move, MoveError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Finished { winner: Option<Player> }, // None on a draw
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mv: Option<Move>, // None for a forced pass
    pub player: Player,
    pub flipped: usize,
    pub hash: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub position: Position,
    pub status: GameStatus,
    pub last_move: Option<Move>,
    pub history: Vec<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self::from_position(Position::new())
    }

    #[must_use]
    pub fn from_position(position: Position) -> Self {
        let mut game = Self {
            position,
            status: GameStatus::Playing,
            last_move: None,
            history: Vec::new(),
        };
        game.update_status();
        game
    }

    pub const fn turn(&self) -> Player {
        self.position.turn
    }

    pub const fn board(&self) -> &Board {
        &self.position.board
    }

    pub fn legal_moves(&self) -> MoveList {
        if self.status == GameStatus::Playing {
            self.position.legal_moves()
        } else {
            MoveList::new()
        }
    }

    /// Disc counts as `(black, white)`.
    pub fn score(&self) -> (usize, usize) {
        (
            self.position.disc_count(Player::Black),
            self.position.disc_count(Player::White),
        )
    }

    /// Plays `mv` for the side to move. If the opponent is then left without a
    /// move the pass is recorded and the turn comes straight back.
    pub fn make_move(&mut self, mv: Move) -> Result<(), MoveError> {
        if self.status != GameStatus::Playing {
            return Err(MoveError::GameOver);
        }

        let player = self.position.turn;
        validate_move(&self.position.board, mv, player)?;

        let next = self.position.play(mv);
        let flipped = next
            .disc_count(player)
            .saturating_sub(self.position.disc_count(player) + 1);

        self.history.push(MoveRecord {
            mv: Some(mv),
            player,
            flipped,
            hash: next.hash(),
        });
        self.position = next;
        self.last_move = Some(mv);

        if !next.is_game_over() && !next.has_legal_move() {
            log::info!("{} has no legal move and passes", next.turn);
            self.position = next.pass();
            self.history.push(MoveRecord {
                mv: None,
                player: next.turn,
                flipped: 0,
                hash: self.position.hash(),
            });
        }

        self.update_status();
        Ok(())
    }

    fn update_status(&mut self) {
        if self.position.is_game_over() {
            self.status = GameStatus::Finished {
                winner: self.position.winner(),
            };
        }
    }
}
