use glam::Vec2;
use std::f32::consts::PI;

use crate::error::{OceanError, Result};

/// The N x N sampling lattice of one ocean patch.
///
/// Samples are stored row-major: row `i` runs along z, column `j` along x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    n: usize,
    log2n: u32,
    length: f32,
}

impl Grid {
    /// Fails with [`OceanError::InvalidGridSize`] unless N is a power of two,
    /// at least 2, and small enough that every vertex index fits in a `u32`.
    pub fn new(n: usize, length: f32) -> Result<Self> {
        let addressable = n.checked_mul(n).is_some_and(|count| count <= u32::MAX as usize);
        if n < 2 || !n.is_power_of_two() || !addressable {
            return Err(OceanError::InvalidGridSize { size: n });
        }
        Ok(Self {
            n,
            log2n: n.trailing_zeros(),
            length,
        })
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn log2_size(&self) -> u32 {
        self.log2n
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn sample_count(&self) -> usize {
        self.n * self.n
    }

    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        i * self.n + j
    }

    /// Wave vector `k = (pi(2j - N)/L, pi(2i - N)/L)` of mode `(i, j)`.
    ///
    /// Indices are signed because the conjugate spectrum is evaluated at `(-i, -j)`.
    #[inline]
    pub fn wave_vector(&self, i: isize, j: isize) -> Vec2 {
        let n = self.n as f32;
        Vec2::new(
            PI * (2.0 * j as f32 - n) / self.length,
            PI * (2.0 * i as f32 - n) / self.length,
        )
    }

    /// Undisplaced (x, z) position of sample `(i, j)`; the patch spans `[-L/2, L/2)`.
    #[inline]
    pub fn rest_position(&self, i: usize, j: usize) -> Vec2 {
        let half = (self.n / 2) as f32;
        let cell = self.length / self.n as f32;
        Vec2::new((j as f32 - half) * cell, (i as f32 - half) * cell)
    }

    /// Checkerboard `(-1)^(i+j)` undoing the uncentred DC term of the transform.
    #[inline]
    pub fn sign(i: usize, j: usize) -> f32 {
        if (i + j) & 1 == 0 {
            1.0
        } else {
            -1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log2_and_counts() {
        let grid = Grid::new(16, 32.0).unwrap();
        assert_eq!(grid.size(), 16);
        assert_eq!(grid.log2_size(), 4);
        assert_eq!(grid.sample_count(), 256);
        assert_eq!(grid.index(2, 3), 35);
    }

    #[test]
    fn test_invalid_sizes() {
        assert!(matches!(Grid::new(12, 1.0), Err(OceanError::InvalidGridSize { size: 12 })));
        assert!(matches!(Grid::new(1, 1.0), Err(OceanError::InvalidGridSize { size: 1 })));
    }

    #[test]
    fn test_rejects_grid_beyond_u32_indices() {
        assert!(Grid::new(32768, 1.0).is_ok());
        assert!(matches!(
            Grid::new(65536, 1.0),
            Err(OceanError::InvalidGridSize { size: 65536 })
        ));
        assert!(matches!(
            Grid::new(usize::MAX / 2 + 1, 1.0),
            Err(OceanError::InvalidGridSize { .. })
        ));
    }

    #[test]
    fn test_wave_vector_layout() {
        let grid = Grid::new(8, 64.0).unwrap();
        assert_eq!(grid.wave_vector(4, 4), Vec2::ZERO);

        // Column drives x, row drives z.
        let k = grid.wave_vector(4, 5);
        assert!((k.x - PI * 2.0 / 64.0).abs() < 1e-6);
        assert_eq!(k.y, 0.0);

        let k = grid.wave_vector(-1, 0);
        assert!((k.y - PI * -10.0 / 64.0).abs() < 1e-6);
    }

    #[test]
    fn test_rest_position_and_sign() {
        let grid = Grid::new(4, 8.0).unwrap();
        assert_eq!(grid.rest_position(0, 0), Vec2::new(-4.0, -4.0));
        assert_eq!(grid.rest_position(3, 2), Vec2::new(0.0, 2.0));
        assert_eq!(Grid::sign(0, 0), 1.0);
        assert_eq!(Grid::sign(1, 2), -1.0);
        assert_eq!(Grid::sign(3, 3), 1.0);
    }
}
