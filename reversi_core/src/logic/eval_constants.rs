// Static square weights. Corners are worth holding, the X- and C-squares next
// to them hand corners to the opponent.
// Symmetric under transpose and 180 degree rotation.
#[rustfmt::skip]
pub const POSITIONAL_WEIGHTS: [[i32; 8]; 8] = [
    [120, -20,  20,   5,   5,  20, -20, 120],
    [-20, -40,  -5,  -5,  -5,  -5, -40, -20],
    [ 20,  -5,  15,   3,   3,  15,  -5,  20],
    [  5,  -5,   3,   3,   3,   3,  -5,   5],
    [  5,  -5,   3,   3,   3,   3,  -5,   5],
    [ 20,  -5,  15,   3,   3,  15,  -5,  20],
    [-20, -40,  -5,  -5,  -5,  -5, -40, -20],
    [120, -20,  20,   5,   5,  20, -20, 120],
];

// 64 squares * corner weight.
pub const MAX_POSITIONAL_SCORE: f64 = 7680.0;

// Phase boundaries on the number of empty squares.
pub const EARLY_PHASE_ABOVE: usize = 44; // empty > 44
pub const LATE_PHASE_AT_MOST: usize = 20; // empty <= 20

// Feature weights per phase: parity, mobility, frontier, positional.
pub const EARLY_WEIGHTS: [f64; 4] = [0.1, 0.8, 0.3, 1.0];
pub const MID_WEIGHTS: [f64; 4] = [0.1, 0.7, 0.5, 0.5];
pub const LATE_WEIGHTS: [f64; 4] = [1.0, 0.1, 0.2, 0.1];

#[allow(clippy::indexing_slicing)]
pub const fn get_square_weight(x: usize, y: usize) -> i32 {
    POSITIONAL_WEIGHTS[y][x]
}
