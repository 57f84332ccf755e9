use glam::{Vec2, Vec3};
use rayon::prelude::*;

use crate::grid::Grid;

/// A vertex of the ocean surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// One N x N patch of ocean surface, ready for upload by a renderer.
///
/// The index list depends only on the grid and never changes; vertex positions
/// and normals are rewritten on every evaluation.
#[derive(Debug, Clone)]
pub struct SurfaceMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub patch_length: f32,
}

impl SurfaceMesh {
    /// Flat, undisplaced surface laid out on the grid's rest positions.
    pub fn for_grid(grid: &Grid) -> Self {
        let n = grid.size();
        let last = (n - 1) as f32;

        // Create vertices in parallel
        let vertices: Vec<Vertex> = (0..n)
            .into_par_iter()
            .flat_map_iter(|i| {
                (0..n).map(move |j| {
                    let rest = grid.rest_position(i, j);
                    Vertex {
                        position: Vec3::new(rest.x, 0.0, rest.y),
                        normal: Vec3::Y,
                        uv: Vec2::new(j as f32 / last, i as f32 / last),
                    }
                })
            })
            .collect();

        Self {
            vertices,
            indices: grid_indices(n),
            patch_length: grid.length(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Lowest and highest vertex height, or `None` for an empty mesh.
    pub fn height_range(&self) -> Option<(f32, f32)> {
        self.vertices
            .par_iter()
            .map(|vertex| (vertex.position.y, vertex.position.y))
            .reduce_with(|(min_a, max_a), (min_b, max_b)| (min_a.min(min_b), max_a.max(max_b)))
    }
}

/// Two triangles per quad cell of an N x N vertex lattice: `(N - 1)^2 * 6` indices.
pub fn grid_indices(n: usize) -> Vec<u32> {
    let cells = n.saturating_sub(1);
    (0..cells)
        .into_par_iter()
        .flat_map_iter(|i| {
            (0..cells).flat_map(move |j| {
                let a = (j + i * n) as u32;
                let b = (j + (i + 1) * n) as u32;
                let c = ((j + 1) + (i + 1) * n) as u32;
                let d = ((j + 1) + i * n) as u32;

                // Both triangles
                [a, b, d, b, c, d]
            })
        })
        .collect()
}
