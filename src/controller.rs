use anyhow::{bail, Result};
use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use reversi_core::engine::config::EngineConfig;
use reversi_core::engine::search::MinimaxEngine;
use reversi_core::engine::Move;
use reversi_core::logic::board::Player;
use reversi_core::logic::game::{GameState, GameStatus};
use reversi_core::logic::rules::validate_move;
use std::io::{BufRead, Write};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    Human,
    Ai,
    Random,
}

/// Reads `d3`-style squares or `x y` column/row pairs (both zero-based).
pub fn parse_square(input: &str) -> Option<Move> {
    let mut parts = input.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(x), Some(y), None) => Some(Move::new(x.parse().ok()?, y.parse().ok()?)),
        (Some(name), None, None) => {
            let mut chars = name.chars();
            let file = u8::try_from(chars.next()?.to_ascii_lowercase()).ok()?;
            let rank: u8 = chars.as_str().parse().ok()?;
            if !(b'a'..=b'h').contains(&file) || !(1..=8).contains(&rank) {
                return None;
            }
            Some(Move::new(file - b'a', rank - 1))
        }
        _ => None,
    }
}

pub struct Controller {
    game: GameState,
    engine: MinimaxEngine,
    rng: StdRng,
    black: PlayerKind,
    white: PlayerKind,
    depth: u8,
}

impl Controller {
    pub fn new(config: EngineConfig, black: PlayerKind, white: PlayerKind, rng: StdRng) -> Self {
        let depth = config.search_depth;
        Self {
            game: GameState::new(),
            engine: MinimaxEngine::new(Arc::new(config)),
            rng,
            black,
            white,
            depth,
        }
    }

    pub const fn game(&self) -> &GameState {
        &self.game
    }

    const fn kind(&self, player: Player) -> PlayerKind {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    /// Plays until the game ends or a human enters `quit`.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<()> {
        while self.game.status == GameStatus::Playing {
            self.print_position(out)?;

            let player = self.game.turn();
            let mv = match self.kind(player) {
                PlayerKind::Ai => self.ai_move()?,
                PlayerKind::Random => self.random_move()?,
                PlayerKind::Human => match self.human_move(&mut input, out)? {
                    Some(mv) => mv,
                    None => return Ok(()),
                },
            };

            writeln!(out, "{player} plays {mv}")?;
            self.game.make_move(mv)?;
            if let Some(record) = self.game.history.last().filter(|r| r.mv.is_none()) {
                writeln!(out, "{} has no move and passes", record.player)?;
            }
        }

        self.print_position(out)?;
        let (black, white) = self.game.score();
        match self.game.status {
            GameStatus::Finished {
                winner: Some(winner),
            } => writeln!(out, "Game over: {winner} wins {black}-{white}")?,
            _ => writeln!(out, "Game over: draw {black}-{white}")?,
        }
        Ok(())
    }

    fn print_position<W: Write>(&self, out: &mut W) -> Result<()> {
        let (black, white) = self.game.score();
        write!(out, "\n{}", self.game.board())?;
        writeln!(out, "Black {black}  White {white}")?;
        Ok(())
    }

    fn ai_move(&mut self) -> Result<Move> {
        let position = self.game.position;
        let result = self.engine.find_best_move(&position, self.depth)?;

        let opponent = position.active_player().opponent();
        log::info!(
            "evaluation for {opponent}: {}",
            self.engine.evaluate(&position, opponent)
        );
        log::info!(
            "nodes explored: {} (score {}, {} ms)",
            result.stats.nodes,
            result.stats.score,
            result.stats.time_ms
        );
        Ok(result.best_move)
    }

    fn random_move(&mut self) -> Result<Move> {
        let moves = self.game.legal_moves();
        match moves.as_slice().choose(&mut self.rng) {
            Some(&mv) => Ok(mv),
            None => bail!("{} has no legal move", self.game.turn()),
        }
    }

    fn human_move<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> Result<Option<Move>> {
        let player = self.game.turn();
        loop {
            write!(out, "{player} to move (e.g. d3, or quit): ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                bail!("input closed before the game ended");
            }
            let line = line.trim();
            if matches!(line, "q" | "quit" | "exit") {
                return Ok(None);
            }

            let Some(mv) = parse_square(line) else {
                writeln!(out, "Could not read '{line}'")?;
                continue;
            };
            match validate_move(&self.game.position.board, mv, player) {
                Ok(()) => return Ok(Some(mv)),
                Err(err) => writeln!(out, "Illegal move {mv}: {err}")?,
            }
        }
    }
}
