use num_complex::Complex32;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::complex::ComplexSample;
use crate::config::OceanConfig;
use crate::error::Result;
use crate::grid::Grid;
use crate::random::{gaussian_pair, ModeSeeder};

/// Phillips spectrum at mode `(i, j)`.
/// This determines the statistical distribution of wave heights
pub fn phillips(grid: &Grid, config: &OceanConfig, i: isize, j: isize) -> f32 {
    let k = grid.wave_vector(i, j);
    let k_length = k.length();

    // If wave vector is zero, return zero
    if k_length < config.wave_vector_epsilon {
        return 0.0;
    }

    let k_length2 = k_length * k_length;
    let k_length4 = k_length2 * k_length2;

    // Largest possible waves arising from wind of speed V
    let l = config.largest_wave();
    let l2 = l * l;

    let k_dot_w = k.normalize().dot(config.wind.normalize_or_zero());
    let k_dot_w2 = k_dot_w * k_dot_w;

    // Suppression of waves much shorter than the largest one
    let damping = config.damping * l;
    let damping2 = damping * damping;

    config.amplitude * (-1.0 / (k_length2 * l2)).exp() / k_length4
        * k_dot_w2
        * k_dot_w2
        * k_dot_w2
        * (-k_length2 * damping2).exp()
}

/// Time-invariant frequency-domain field `h0(k)` and its conjugate partner `conj(h0(-k))`.
#[derive(Debug, Clone)]
pub struct InitialSpectrum {
    grid: Grid,
    h0: Vec<ComplexSample>,
    h0_conj: Vec<ComplexSample>,
}

/// Samples `h0` at arbitrary signed mode indices.
///
/// `R` is the generator each mode is seeded with; it defaults to [`StdRng`].
#[derive(Debug)]
pub struct SpectrumSampler<'a, R = StdRng> {
    grid: &'a Grid,
    config: &'a OceanConfig,
    seeder: ModeSeeder<R>,
}

impl<'a, R: SeedableRng + Rng> SpectrumSampler<'a, R> {
    pub fn new(grid: &'a Grid, config: &'a OceanConfig) -> Self {
        Self {
            grid,
            config,
            seeder: ModeSeeder::new(config.seed),
        }
    }

    /// `gaussian * sqrt(phillips / 2)` (Eq. 25 in Tessendorf's paper).
    pub fn compute_h0(&self, i: isize, j: isize) -> Result<ComplexSample> {
        let mut rng = self.seeder.rng_for(i, j);
        let (re, im) = gaussian_pair(&mut rng, self.config.gaussian_max_attempts)?;
        let scale = (phillips(self.grid, self.config, i, j) / 2.0).sqrt();
        Ok(Complex32::new(re, im) * scale)
    }
}

impl InitialSpectrum {
    pub fn generate(grid: &Grid, config: &OceanConfig) -> Result<Self> {
        Self::generate_with::<StdRng>(grid, config)
    }

    /// Builds the spectrum with every mode seeded from generator type `R`.
    pub fn generate_with<R: SeedableRng + Rng>(grid: &Grid, config: &OceanConfig) -> Result<Self> {
        let n = grid.size();
        let sampler = SpectrumSampler::<R>::new(grid, config);

        let pairs = (0..grid.sample_count())
            .into_par_iter()
            .map(|index| {
                let i = (index / n) as isize;
                let j = (index % n) as isize;
                let h0 = sampler.compute_h0(i, j)?;
                let h0_conj = sampler.compute_h0(-i, -j)?.conj();
                Ok((h0, h0_conj))
            })
            .collect::<Result<Vec<_>>>()?;

        let (h0, h0_conj) = pairs.into_iter().unzip();
        log::debug!(
            "initial spectrum ready: {}x{} modes, seed {}",
            n,
            n,
            config.seed
        );

        Ok(Self {
            grid: *grid,
            h0,
            h0_conj,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn h0(&self) -> &[ComplexSample] {
        &self.h0
    }

    pub fn h0_conj(&self) -> &[ComplexSample] {
        &self.h0_conj
    }

    /// `(h0[i,j], h0_conj[i,j])`.
    #[inline]
    pub fn at(&self, i: usize, j: usize) -> (ComplexSample, ComplexSample) {
        let index = self.grid.index(i, j);
        (self.h0[index], self.h0_conj[index])
    }
}
