//! Gradient noise engine for terrain synthesis
//!
//! Classic permutation-table gradient noise plus a layered (fractal octave)
//! combinator. Each seed gets its own deterministically shuffled permutation
//! table, so identical seeds always reproduce identical fields and different
//! seeds produce uncorrelated ones.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// =============================================================================
// PERMUTATION TABLES
// =============================================================================

/// The canonical 256-entry reference permutation sequence.
const BASE_PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225,
    140, 36, 103, 30, 69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148,
    247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219, 203, 117, 35, 11, 32,
    57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122,
    60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54,
    65, 25, 63, 161, 1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169,
    200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186, 3, 64,
    52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212,
    207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213,
    119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9,
    129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104,
    218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241,
    81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157,
    184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93,
    222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

/// A seed-specific permutation table, duplicated to 512 entries so corner
/// hashing never has to branch on index wrap-around.
#[derive(Clone)]
struct PermutationTable {
    p: [usize; 512],
}

impl PermutationTable {
    /// Shuffle the canonical sequence with a seed-derived RNG and duplicate it.
    fn from_seed(seed: i32) -> Self {
        let mut base = BASE_PERMUTATION;
        let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
        base.shuffle(&mut rng);

        let mut p = [0usize; 512];
        for i in 0..256 {
            p[i] = base[i] as usize;
            p[256 + i] = base[i] as usize;
        }
        Self { p }
    }
}

// =============================================================================
// NOISE ENGINE
// =============================================================================

/// Gradient noise generator owning its seeded permutation tables.
///
/// Tables are built lazily per seed and cached, but a cached lookup is
/// bit-identical to rebuilding the table from scratch: correctness never
/// depends on call order.
pub struct NoiseEngine {
    tables: HashMap<i32, PermutationTable>,
}

impl NoiseEngine {
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    fn table(&mut self, seed: i32) -> &PermutationTable {
        self.tables
            .entry(seed)
            .or_insert_with(|| PermutationTable::from_seed(seed))
    }

    /// Sample gradient noise at (x, y) for the given seed.
    ///
    /// Output lies in approximately [-1, 1]; same inputs always yield the
    /// same output.
    pub fn perlin(&mut self, x: f32, y: f32, seed: i32) -> f32 {
        let p = &self.table(seed).p;

        // Unit cell containing the point, masked to the table range
        let xi = (x.floor() as i32 & 255) as usize;
        let yi = (y.floor() as i32 & 255) as usize;

        // Fractional offsets within the cell
        let xf = x - x.floor();
        let yf = y - y.floor();

        let u = fade(xf);
        let v = fade(yf);

        // Hash the four cell corners
        let a = p[xi] + yi;
        let aa = p[a];
        let ab = p[a + 1];
        let b = p[xi + 1] + yi;
        let ba = p[b];
        let bb = p[b + 1];

        lerp(
            lerp(grad(p[aa], xf, yf), grad(p[ba], xf - 1.0, yf), u),
            lerp(grad(p[ab], xf, yf - 1.0), grad(p[bb], xf - 1.0, yf - 1.0), u),
            v,
        )
    }

    /// Layered fractal noise: sums `octaves` gradient-noise samples with
    /// frequency doubling from `scale` and amplitude decaying by
    /// `persistence`, normalized by the total amplitude.
    ///
    /// Octave i samples with `seed + i`, which decorrelates octaves without
    /// needing independent seed streams. Returns 0 for the degenerate zero
    /// octave case.
    pub fn layered(
        &mut self,
        x: f32,
        y: f32,
        octaves: u32,
        persistence: f32,
        scale: f32,
        seed: i32,
    ) -> f32 {
        let mut amplitude = 1.0f32;
        let mut frequency = scale;
        let mut total = 0.0f32;
        let mut max_value = 0.0f32;

        for i in 0..octaves {
            total += self.perlin(x * frequency, y * frequency, seed + i as i32) * amplitude;
            max_value += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }

        if max_value > 0.0 {
            total / max_value
        } else {
            0.0
        }
    }
}

impl Default for NoiseEngine {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Smoothing curve t^3 (6t^2 - 15t + 10): zero first and second derivative at
/// the cell boundaries.
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Select one of the 16 canonical gradient patterns from the low bits of the
/// corner hash and dot it with the offset vector.
fn grad(hash: usize, x: f32, y: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        0.0
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}
