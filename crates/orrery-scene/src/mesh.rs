//! Procedural mesh generation: UV spheres for celestial bodies and a flat
//! annulus for the ring. Pure functions, no GPU types.

/// Positions and triangle indices for one mesh, ready for upload.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of triangles described by the index buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Generate a UV sphere of the given radius.
///
/// `segments` is the longitudinal resolution, `rings` the latitudinal one.
/// A non-positive radius is accepted and yields a degenerate (inverted or
/// zero-size) sphere rather than an error.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let segments = segments.max(3);
    let rings = rings.max(2);

    let mut positions = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
    for ring in 0..=rings {
        let phi = std::f32::consts::PI * ring as f32 / rings as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for seg in 0..=segments {
            let theta = std::f32::consts::TAU * seg as f32 / segments as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            positions.push([
                radius * sin_phi * cos_theta,
                radius * cos_phi,
                radius * sin_phi * sin_theta,
            ]);
        }
    }

    let mut indices = Vec::with_capacity((rings * segments * 6) as usize);
    let row = segments + 1;
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * row + seg;
            let b = a + row;
            indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }

    MeshData { positions, indices }
}

/// Generate a flat annulus in the local XY plane.
///
/// Vertices alternate inner/outer around the circle. The caller tilts the
/// annulus into its final plane via a model transform; the geometry itself
/// is planar and static.
pub fn annulus(inner_radius: f32, outer_radius: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);

    let mut positions = Vec::with_capacity(((segments + 1) * 2) as usize);
    for seg in 0..=segments {
        let theta = std::f32::consts::TAU * seg as f32 / segments as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();
        positions.push([inner_radius * cos_theta, inner_radius * sin_theta, 0.0]);
        positions.push([outer_radius * cos_theta, outer_radius * sin_theta, 0.0]);
    }

    let mut indices = Vec::with_capacity((segments * 6) as usize);
    for seg in 0..segments {
        let inner = seg * 2;
        let outer = inner + 1;
        let next_inner = inner + 2;
        let next_outer = inner + 3;
        indices.extend_from_slice(&[inner, outer, next_inner, outer, next_outer, next_inner]);
    }

    MeshData { positions, indices }
}
