use glam::{Vec2, Vec3};
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::OceanConfig;
use crate::error::Result;
use crate::evolve::{FieldKind, FrameFields, TimeEvolver};
use crate::fft::FftTables;
use crate::grid::Grid;
use crate::mesh::{SurfaceMesh, Vertex};
use crate::spectrum::InitialSpectrum;

/// Surface state at one point, as returned by [`Ocean::sample_direct`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    pub height: f32,
    /// Choppiness-scaled horizontal offset (x, z).
    pub displacement: Vec2,
    pub normal: Vec3,
}

/// A Tessendorf ocean patch.
///
/// The initial spectrum, FFT tables and index list are built once; each call to
/// [`Ocean::evaluate_waves`] rewrites the per-frame fields and the vertex array.
/// Calls on one instance must be serialized, which `&mut self` enforces.
#[derive(Debug, Clone)]
pub struct Ocean {
    config: OceanConfig,
    grid: Grid,
    spectrum: InitialSpectrum,
    evolver: TimeEvolver,
    fft: FftTables,
    fields: FrameFields,
    surface: SurfaceMesh,
    time: Option<f64>,
}

impl Ocean {
    pub fn new(config: OceanConfig) -> Result<Self> {
        Self::with_rng::<StdRng>(config)
    }

    /// Builds the ocean with every spectral mode seeded from generator type `R`.
    pub fn with_rng<R: SeedableRng + Rng>(config: OceanConfig) -> Result<Self> {
        let grid = config.validate()?;

        let spectrum = InitialSpectrum::generate_with::<R>(&grid, &config)?;
        let evolver = TimeEvolver::new(&grid, &config);
        let fft = FftTables::for_grid(&grid);
        let fields = FrameFields::new(&grid);
        let surface = SurfaceMesh::for_grid(&grid);

        log::debug!(
            "ocean ready: {}x{} grid over {} m, wind {:?}, period {:.1} s",
            grid.size(),
            grid.size(),
            grid.length(),
            config.wind,
            config.period()
        );

        Ok(Self {
            config,
            grid,
            spectrum,
            evolver,
            fft,
            fields,
            surface,
            time: None,
        })
    }

    /// Synthesises the surface at time `t`. Vertex data is valid once this returns.
    pub fn evaluate_waves(&mut self, t: f64) {
        self.evolver.evolve(&self.spectrum, t, &mut self.fields);
        self.transform_fields();
        self.assemble();
        self.time = Some(t);
        log::trace!("evaluated waves at t={:.3}", t);
    }

    /// Runs the 2D transform of each field on its own worker and joins them all.
    fn transform_fields(&mut self) {
        let fft = &self.fft;
        let buffers = self.fields.buffers_mut();

        if self.config.parallel {
            buffers.par_iter_mut().for_each(|field| {
                fft.transform_2d(&mut field.samples, &mut field.scratch);
            });
        } else {
            for field in buffers.iter_mut() {
                fft.transform_2d(&mut field.samples, &mut field.scratch);
            }
        }
    }

    /// Turns the spatial-domain fields into vertex positions and normals.
    fn assemble(&mut self) {
        let grid = self.grid;
        let n = grid.size();
        let lambda = self.config.choppiness;

        let height = self.fields.get(FieldKind::Height).samples();
        let slope_x = self.fields.get(FieldKind::SlopeX).samples();
        let slope_z = self.fields.get(FieldKind::SlopeZ).samples();
        let dx = self.fields.get(FieldKind::DisplacementX).samples();
        let dz = self.fields.get(FieldKind::DisplacementZ).samples();

        self.surface
            .vertices
            .par_iter_mut()
            .enumerate()
            .for_each(|(index, vertex)| {
                let (i, j) = (index / n, index % n);
                let sign = Grid::sign(i, j);
                let rest = grid.rest_position(i, j);

                vertex.position = Vec3::new(
                    rest.x + sign * dx[index].re * lambda,
                    sign * height[index].re,
                    rest.y + sign * dz[index].re * lambda,
                );
                vertex.normal =
                    Vec3::new(-sign * slope_x[index].re, 1.0, -sign * slope_z[index].re).normalize();
            });
    }

    /// Evaluates the surface at `position` by summing every mode directly.
    ///
    /// This is the O(N^2) reference for the FFT path: for any `t`, the vertex at
    /// rest position `p` matches `sample_direct(p, t)`. The transform places its
    /// origin half a patch away from the mesh centre, so the sum is taken at
    /// `position - L/2` on both axes.
    pub fn sample_direct(&self, position: Vec2, t: f64) -> SurfaceSample {
        let n = self.grid.size();
        let epsilon = self.config.wave_vector_epsilon;
        let half_patch = self.grid.length() as f64 / 2.0;
        let x = position.x as f64 - half_patch;
        let z = position.y as f64 - half_patch;

        let mut height = 0.0f64;
        let mut slope = [0.0f64; 2];
        let mut displacement = [0.0f64; 2];

        for i in 0..n {
            for j in 0..n {
                let k = self.grid.wave_vector(i as isize, j as isize);
                let (kx, kz) = (k.x as f64, k.y as f64);
                let h = self.evolver.compute_h_tilde(&self.spectrum, t, i, j);
                let h = Complex64::new(h.re as f64, h.im as f64) * Complex64::cis(kx * x + kz * z);

                height += h.re;
                // Re(h * i k) = -k Im(h)
                slope[0] -= kx * h.im;
                slope[1] -= kz * h.im;

                let k_length = (kx * kx + kz * kz).sqrt();
                if k_length >= epsilon as f64 {
                    // Re(h * -i k/|k|) = k/|k| Im(h)
                    displacement[0] += kx / k_length * h.im;
                    displacement[1] += kz / k_length * h.im;
                }
            }
        }

        let lambda = self.config.choppiness as f64;
        SurfaceSample {
            height: height as f32,
            displacement: Vec2::new((displacement[0] * lambda) as f32, (displacement[1] * lambda) as f32),
            normal: Vec3::new(-slope[0] as f32, 1.0, -slope[1] as f32).normalize(),
        }
    }

    pub fn config(&self) -> &OceanConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn spectrum(&self) -> &InitialSpectrum {
        &self.spectrum
    }

    pub fn evolver(&self) -> &TimeEvolver {
        &self.evolver
    }

    pub fn fft(&self) -> &FftTables {
        &self.fft
    }

    /// Spatial-domain fields of the last evaluation.
    pub fn fields(&self) -> &FrameFields {
        &self.fields
    }

    pub fn surface(&self) -> &SurfaceMesh {
        &self.surface
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.surface.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.surface.indices
    }

    /// Time of the last evaluation, `None` before the first one.
    pub fn time(&self) -> Option<f64> {
        self.time
    }
}
