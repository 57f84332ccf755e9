//! Tessendorf FFT ocean: a Phillips spectrum evolved in time and brought to the
//! spatial domain with a radix-2 FFT, producing vertex heights, choppy
//! horizontal offsets and normals for a periodic water patch.

pub mod complex;
pub mod config;
mod error;
pub mod evolve;
mod export;
pub mod fft;
pub mod grid;
mod mesh;
mod ocean;
pub mod random;
pub mod spectrum;

// Re-export everything for public use
pub use config::OceanConfig;
pub use error::{OceanError, Result};
pub use evolve::{FieldKind, TimeEvolver};
pub use fft::{FftScratch, FftTables, StridedView};
pub use grid::Grid;
pub use mesh::{grid_indices, SurfaceMesh, Vertex};
pub use ocean::{Ocean, SurfaceSample};
pub use spectrum::InitialSpectrum;

pub mod prelude {
    pub use crate::config::OceanConfig;
    pub use crate::error::{OceanError, Result};
    pub use crate::mesh::{SurfaceMesh, Vertex};
    pub use crate::ocean::{Ocean, SurfaceSample};
}
