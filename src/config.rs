use glam::Vec2;
use std::f32::consts::PI;

use crate::error::{OceanError, Result};
use crate::grid::Grid;

/// Parameters for the Tessendorf FFT ocean
#[derive(Debug, Clone)]
pub struct OceanConfig {
    pub resolution: usize,          // Grid resolution N (N x N samples), power of two
    pub patch_length: f32,          // Physical size L of the ocean patch in meters
    pub amplitude: f32,             // Phillips spectrum amplitude A
    pub wind: Vec2,                 // Wind velocity; length is the wind speed
    pub gravity: f32,               // Gravity acceleration
    pub damping: f32,               // Fraction of the largest wave below which ripples are suppressed
    pub base_frequency: f32,        // Dispersion quantum w0; the surface repeats every 2*pi/w0 seconds
    pub choppiness: f32,            // Horizontal displacement scale (lambda)
    pub wave_vector_epsilon: f32,   // |k| below this is treated as the zero wave vector
    pub gaussian_max_attempts: u32, // Rejection sampling cap per gaussian pair
    pub seed: u64,                  // Seed for the initial spectrum
    pub parallel: bool,             // Transform the five fields on the rayon pool
}

impl Default for OceanConfig {
    fn default() -> Self {
        Self {
            resolution: 64,
            patch_length: 64.0,
            amplitude: 0.0005,
            wind: Vec2::new(0.0, 32.0),
            gravity: 9.81,
            damping: 0.001,
            base_frequency: PI / 100.0,
            choppiness: -1.0,
            wave_vector_epsilon: 1e-6,
            gaussian_max_attempts: 1024,
            seed: 42,
            parallel: true,
        }
    }
}

impl OceanConfig {
    /// Construction parameters of the simulation; everything else takes its default.
    pub fn new(resolution: usize, amplitude: f32, wind: Vec2, patch_length: f32) -> Self {
        Self {
            resolution,
            amplitude,
            wind,
            patch_length,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_choppiness(mut self, choppiness: f32) -> Self {
        self.choppiness = choppiness;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Time after which the quantized dispersion makes the surface repeat.
    pub fn period(&self) -> f64 {
        std::f64::consts::TAU / self.base_frequency as f64
    }

    /// Largest wave arising from a continuous wind of this speed, `V^2 / g`.
    pub fn largest_wave(&self) -> f32 {
        self.wind.length_squared() / self.gravity
    }

    /// Checks every parameter and returns the grid they describe.
    pub fn validate(&self) -> Result<Grid> {
        let grid = Grid::new(self.resolution, self.patch_length)?;

        if !(self.patch_length.is_finite() && self.patch_length > 0.0) {
            return Err(OceanError::invalid("patch_length", "must be finite and positive"));
        }
        if !(self.gravity.is_finite() && self.gravity > 0.0) {
            return Err(OceanError::invalid("gravity", "must be finite and positive"));
        }
        if !self.amplitude.is_finite() {
            return Err(OceanError::invalid("amplitude", "must be finite"));
        }
        if !self.wind.is_finite() {
            return Err(OceanError::invalid("wind", "must be finite"));
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(OceanError::invalid("damping", "must be finite and non-negative"));
        }
        if !(self.base_frequency.is_finite() && self.base_frequency > 0.0) {
            return Err(OceanError::invalid("base_frequency", "must be finite and positive"));
        }
        if !self.choppiness.is_finite() {
            return Err(OceanError::invalid("choppiness", "must be finite"));
        }
        if !(self.wave_vector_epsilon.is_finite() && self.wave_vector_epsilon > 0.0) {
            return Err(OceanError::invalid("wave_vector_epsilon", "must be finite and positive"));
        }
        if self.gaussian_max_attempts == 0 {
            return Err(OceanError::invalid("gaussian_max_attempts", "must be at least 1"));
        }

        Ok(grid)
    }
}
