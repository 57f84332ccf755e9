use glam::Vec2;
use num_complex::Complex32;
use rayon::prelude::*;

use crate::complex::{self, ComplexSample};
use crate::config::OceanConfig;
use crate::fft::FftScratch;
use crate::grid::Grid;
use crate::spectrum::InitialSpectrum;

/// Quantized deep-water dispersion `floor(sqrt(g|k|) / w0) * w0`.
///
/// Every mode's angular frequency is a multiple of `w0`, so the surface repeats
/// after `2*pi / w0` seconds.
pub fn dispersion(grid: &Grid, config: &OceanConfig, i: isize, j: isize) -> f32 {
    let w0 = config.base_frequency;
    let k = grid.wave_vector(i, j).length();
    ((config.gravity * k).sqrt() / w0).floor() * w0
}

/// The five scalar fields synthesised each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Height,
    SlopeX,
    SlopeZ,
    DisplacementX,
    DisplacementZ,
}

impl FieldKind {
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Height,
        FieldKind::SlopeX,
        FieldKind::SlopeZ,
        FieldKind::DisplacementX,
        FieldKind::DisplacementZ,
    ];

    /// Spectral multiplier turning the height spectrum into this field's spectrum.
    ///
    /// Slopes are derivatives (`i k`); horizontal displacement integrates by
    /// `-i k / |k|` and is zero at the zero wave vector.
    pub fn spectral_factor(self, k: Vec2, epsilon: f32) -> ComplexSample {
        let k_length = k.length();
        match self {
            FieldKind::Height => Complex32::new(1.0, 0.0),
            FieldKind::SlopeX => Complex32::new(0.0, k.x),
            FieldKind::SlopeZ => Complex32::new(0.0, k.y),
            FieldKind::DisplacementX if k_length >= epsilon => Complex32::new(0.0, -k.x / k_length),
            FieldKind::DisplacementZ if k_length >= epsilon => Complex32::new(0.0, -k.y / k_length),
            FieldKind::DisplacementX | FieldKind::DisplacementZ => complex::ZERO,
        }
    }
}

/// One per-frame field together with the FFT scratch space of the worker that owns it.
#[derive(Debug, Clone)]
pub struct FieldBuffer {
    kind: FieldKind,
    pub(crate) samples: Vec<ComplexSample>,
    pub(crate) scratch: FftScratch,
}

impl FieldBuffer {
    fn new(kind: FieldKind, grid: &Grid) -> Self {
        Self {
            kind,
            samples: vec![complex::ZERO; grid.sample_count()],
            scratch: FftScratch::new(grid.size()),
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn samples(&self) -> &[ComplexSample] {
        &self.samples
    }
}

/// Height, slope and displacement buffers, fully overwritten by every evaluation.
#[derive(Debug, Clone)]
pub struct FrameFields {
    buffers: [FieldBuffer; 5],
}

impl FrameFields {
    pub fn new(grid: &Grid) -> Self {
        Self {
            buffers: FieldKind::ALL.map(|kind| FieldBuffer::new(kind, grid)),
        }
    }

    pub fn get(&self, kind: FieldKind) -> &FieldBuffer {
        &self.buffers[kind as usize]
    }

    pub fn buffers(&self) -> &[FieldBuffer; 5] {
        &self.buffers
    }

    pub(crate) fn buffers_mut(&mut self) -> &mut [FieldBuffer; 5] {
        &mut self.buffers
    }
}

/// Evolves the initial spectrum to time `t`.
#[derive(Debug, Clone)]
pub struct TimeEvolver {
    grid: Grid,
    epsilon: f32,
    dispersion: Vec<f32>,
}

impl TimeEvolver {
    pub fn new(grid: &Grid, config: &OceanConfig) -> Self {
        let n = grid.size();
        let dispersion = (0..grid.sample_count())
            .map(|index| dispersion(grid, config, (index / n) as isize, (index % n) as isize))
            .collect();

        Self {
            grid: *grid,
            epsilon: config.wave_vector_epsilon,
            dispersion,
        }
    }

    pub fn dispersion_at(&self, i: usize, j: usize) -> f32 {
        self.dispersion[self.grid.index(i, j)]
    }

    /// `h0 e^{iwt} + h0_conj e^{-iwt}` for mode `(i, j)`.
    pub fn compute_h_tilde(&self, spectrum: &InitialSpectrum, t: f64, i: usize, j: usize) -> ComplexSample {
        let index = self.grid.index(i, j);
        h_tilde(
            spectrum.h0()[index],
            spectrum.h0_conj()[index],
            self.dispersion[index],
            t,
        )
    }

    /// Fills all five frequency-domain fields for time `t`.
    pub fn evolve(&self, spectrum: &InitialSpectrum, t: f64, fields: &mut FrameFields) {
        let n = self.grid.size();
        let grid = self.grid;
        let epsilon = self.epsilon;
        let h0 = spectrum.h0();
        let h0_conj = spectrum.h0_conj();

        let [height, derived @ ..] = fields.buffers_mut();

        height
            .samples
            .par_chunks_mut(n)
            .enumerate()
            .for_each(|(i, row)| {
                for (j, sample) in row.iter_mut().enumerate() {
                    let index = grid.index(i, j);
                    *sample = h_tilde(h0[index], h0_conj[index], self.dispersion[index], t);
                }
            });

        let height = &height.samples;
        derived.par_iter_mut().for_each(|field| {
            let kind = field.kind;
            for (index, sample) in field.samples.iter_mut().enumerate() {
                let k = grid.wave_vector((index / n) as isize, (index % n) as isize);
                *sample = height[index] * kind.spectral_factor(k, epsilon);
            }
        });
    }
}

#[inline]
fn h_tilde(h0: ComplexSample, h0_conj: ComplexSample, omega: f32, t: f64) -> ComplexSample {
    let rotation = complex::cis(omega as f64 * t);
    h0 * rotation + h0_conj * rotation.conj()
}
