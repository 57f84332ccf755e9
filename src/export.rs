use std::path::Path;

use mesh_tools::compat::{point3, vector2, vector3};
use mesh_tools::{GltfBuilder, Triangle};

use crate::error::{OceanError, Result};
use crate::mesh::SurfaceMesh;

impl SurfaceMesh {
    /// Export the surface to a GLB file
    pub fn save_glb<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save_glb_tiled(path, 1, 1)
    }

    /// Export the surface to a GLB file, repeated `tiles_x` by `tiles_z` times.
    ///
    /// The patch is periodic, so tiles sit exactly one patch length apart and the
    /// grid of tiles is centred on the origin.
    pub fn save_glb_tiled<P: AsRef<Path>>(&self, path: P, tiles_x: usize, tiles_z: usize) -> Result<()> {
        let path = path.as_ref();
        if tiles_x == 0 || tiles_z == 0 {
            return Err(OceanError::invalid("tiles", "tile counts must be at least 1"));
        }
        let path_str = path
            .to_str()
            .ok_or_else(|| OceanError::Export(format!("path is not valid UTF-8: {}", path.display())))?;

        let mut builder = GltfBuilder::new();

        // Blue water with metallic reflections
        let water_material = builder.create_metallic_material(
            Some("WaterMaterial".to_string()),
            [0.0, 0.4, 0.8, 1.0],
            0.9,
            0.1,
        );

        let positions: Vec<_> = self
            .vertices
            .iter()
            .map(|v| point3::new(v.position.x, v.position.y, v.position.z))
            .collect();
        let normals: Vec<_> = self
            .vertices
            .iter()
            .map(|v| vector3::new(v.normal.x, v.normal.y, v.normal.z))
            .collect();
        let texcoords: Vec<_> = self
            .vertices
            .iter()
            .map(|v| vector2::new(v.uv.x, v.uv.y))
            .collect();
        let triangles: Vec<_> = self
            .indices
            .chunks_exact(3)
            .map(|tri| Triangle::new(tri[0], tri[1], tri[2]))
            .collect();

        let mesh_index = builder.create_simple_mesh(
            Some("OceanSurface".to_string()),
            &positions,
            &triangles,
            Some(normals),
            Some(texcoords),
            Some(water_material),
        );

        let origin_x = -(tiles_x as f32 - 1.0) * self.patch_length / 2.0;
        let origin_z = -(tiles_z as f32 - 1.0) * self.patch_length / 2.0;

        let mut tile_nodes = Vec::with_capacity(tiles_x * tiles_z);
        for row in 0..tiles_z {
            for col in 0..tiles_x {
                let translation = [
                    origin_x + col as f32 * self.patch_length,
                    0.0,
                    origin_z + row as f32 * self.patch_length,
                ];
                let node = builder.add_node(
                    Some(format!("OceanTile_{}_{}", row, col)),
                    Some(mesh_index),
                    Some(translation),
                    None,
                    None,
                );
                tile_nodes.push(node);
            }
        }

        let grid_parent = builder.add_node_with_children(
            Some("OceanGrid".to_string()),
            None,
            None,
            None,
            None,
            tile_nodes,
        );

        let scene_index = builder.add_scene(Some("OceanScene".to_string()), Some(vec![grid_parent]));
        builder.gltf.scene = Some(scene_index);

        builder
            .export_glb(path_str)
            .map_err(|e| OceanError::Export(format!("failed to write {}: {}", path.display(), e)))?;

        log::info!(
            "exported {} triangles ({}x{} tiles) to {}",
            self.triangle_count(),
            tiles_x,
            tiles_z,
            path.display()
        );
        Ok(())
    }
}
