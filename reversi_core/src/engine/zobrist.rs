use crate::engine::Move;
use crate::logic::board::{Player, NUM_SQUARES};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::OnceLock;

// 64 squares * 2 colours
const NUM_COLORS: usize = 2;
const TABLE_SIZE: usize = NUM_SQUARES * NUM_COLORS;

// Fixed so hashes are reproducible within a build.
const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

pub struct ZobristKeys {
    pub disc_keys: [u64; TABLE_SIZE],
    pub side_key: u64,
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut disc_keys = [0; TABLE_SIZE];
        for key in &mut disc_keys {
            *key = rng.gen();
        }
        let side_key = rng.gen();

        Self {
            disc_keys,
            side_key,
        }
    }

    pub fn get() -> &'static Self {
        static INSTANCE: OnceLock<ZobristKeys> = OnceLock::new();
        INSTANCE.get_or_init(ZobristKeys::new)
    }

    pub fn disc_key(&self, sq: Move, player: Player) -> u64 {
        let idx = sq.index() * NUM_COLORS + player.index();
        self.disc_keys.get(idx).copied().unwrap_or(0)
    }
}
