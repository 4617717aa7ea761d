//! Vertex data for the demo's meshes.

use std::f32::consts::{PI, TAU};

/// Largest segment count per axis; 256 * 256 vertices fit a u16 index.
pub const MAX_SEGMENTS: u32 = 255;

/// Indexed triangle mesh with per-vertex normal and uv.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u16>,
}

impl Geometry {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Positions, normals and uvs packed per vertex (8 floats).
    pub fn interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.vertex_count() * 8);
        for ((p, n), uv) in self.positions.iter().zip(&self.normals).zip(&self.uvs) {
            out.extend_from_slice(p);
            out.extend_from_slice(n);
            out.extend_from_slice(uv);
        }
        out
    }
}

/// UV sphere centred on the origin.
///
/// Rows run from the north pole (`v = 1`) to the south pole (`v = 0`); each
/// row carries `width_segments + 1` vertices so the seam gets its own uvs.
/// Triangles that would collapse onto a pole are omitted.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Geometry {
    // Keeps (w + 1) * (h + 1) within u16 index range.
    let width_segments = width_segments.clamp(3, MAX_SEGMENTS);
    let height_segments = height_segments.clamp(2, MAX_SEGMENTS);
    let row_len = width_segments + 1;

    let mut geometry = Geometry::default();
    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let theta = v * PI;
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let phi = u * TAU;
            let normal = [-phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin()];
            geometry
                .positions
                .push([normal[0] * radius, normal[1] * radius, normal[2] * radius]);
            geometry.normals.push(normal);
            geometry.uvs.push([u, 1.0 - v]);
        }
    }

    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = (iy * row_len + ix + 1) as u16;
            let b = (iy * row_len + ix) as u16;
            let c = ((iy + 1) * row_len + ix) as u16;
            let d = ((iy + 1) * row_len + ix + 1) as u16;
            if iy != 0 {
                geometry.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                geometry.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    debug_assert!(geometry.vertex_count() <= u16::MAX as usize + 1);
    geometry
}

/// One triangle covering the whole clip space; uv spans [0, 1] on screen.
pub fn fullscreen_triangle() -> [f32; 6] {
    [-1.0, -1.0, 3.0, -1.0, -1.0, 3.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_counts() {
        let g = sphere(1.5, 32, 32);
        assert_eq!(g.vertex_count(), 33 * 33);
        // 32 rows of 32 quads, minus one triangle per quad in each pole row
        assert_eq!(g.indices.len(), (32 * 32 * 2 - 2 * 32) * 3);
        assert_eq!(g.interleaved().len(), 33 * 33 * 8);
    }

    #[test]
    fn segments_clamped_to_u16_indices() {
        let g = sphere(1.0, 1000, 400);
        assert_eq!(g.vertex_count(), 256 * 256);
        assert_eq!(*g.indices.iter().max().unwrap() as usize, 256 * 256 - 1);
    }

    #[test]
    fn vertices_sit_on_radius() {
        let g = sphere(0.4, 12, 8);
        for p in &g.positions {
            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((r - 0.4).abs() < 1e-5);
        }
        assert!(g.indices.iter().all(|&i| (i as usize) < g.vertex_count()));
    }
}
