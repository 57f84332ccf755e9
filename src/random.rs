//! Random draws for the initial spectrum.
//!
//! Every spectral mode gets its own generator, seeded from the simulation seed
//! and the mode's signed indices. A mode's amplitude is then a pure function of
//! `(seed, i, j)`: re-evaluating it always gives the same sample, and modes can
//! be filled in any order or in parallel.

use rand::{Rng, SeedableRng};
use std::marker::PhantomData;

use crate::error::{OceanError, Result};

/// Hands out one deterministic generator per spectral mode.
#[derive(Debug)]
pub struct ModeSeeder<R> {
    seed: u64,
    _rng: PhantomData<fn() -> R>,
}

impl<R: SeedableRng + Rng> ModeSeeder<R> {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            _rng: PhantomData,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generator for mode `(i, j)`. Equal indices always yield equal streams.
    pub fn rng_for(&self, i: isize, j: isize) -> R {
        R::seed_from_u64(mode_seed(self.seed, i, j))
    }
}

/// splitmix64 finalizer.
fn mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn mode_seed(seed: u64, i: isize, j: isize) -> u64 {
    let row = mix64(seed ^ (i as i64 as u64));
    mix64(row ^ (j as i64 as u64).rotate_left(32))
}

/// Pair of independent standard normal samples (Marsaglia polar method).
///
/// Draws `x1, x2` uniformly in `[-1, 1)` until `w = x1^2 + x2^2` falls inside the
/// open unit disc (excluding the origin), then scales both by `sqrt(-2 ln(w) / w)`.
/// Gives up with [`OceanError::GaussianSamplingExhausted`] after `max_attempts` draws.
pub fn gaussian_pair<R: Rng + ?Sized>(rng: &mut R, max_attempts: u32) -> Result<(f32, f32)> {
    for _ in 0..max_attempts {
        let x1: f32 = rng.gen_range(-1.0..1.0);
        let x2: f32 = rng.gen_range(-1.0..1.0);
        let w = x1 * x1 + x2 * x2;
        if w >= 1.0 || w == 0.0 {
            continue;
        }
        let scale = (-2.0 * w.ln() / w).sqrt();
        return Ok((x1 * scale, x2 * scale));
    }

    Err(OceanError::GaussianSamplingExhausted {
        attempts: max_attempts,
    })
}
