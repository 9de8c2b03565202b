//! Starfield backdrop: N points scattered uniformly through a cube around
//! the origin, generated once at startup and never mutated or rotated.

use rand::Rng;

/// Half-extent of the star cube; coordinates fall in [-100, 100].
pub const STAR_FIELD_EXTENT: f32 = 100.0;

/// An immutable point cloud of backdrop stars.
#[derive(Clone, Debug)]
pub struct Starfield {
    positions: Vec<[f32; 3]>,
}

impl Starfield {
    /// Generate `count` stars using the thread RNG. Each call produces an
    /// independent random set; only the count and bounds are invariant.
    pub fn generate(count: u32) -> Self {
        Self::generate_with_rng(count, &mut rand::rng())
    }

    /// Generate `count` stars from the supplied RNG.
    pub fn generate_with_rng(count: u32, rng: &mut impl Rng) -> Self {
        let mut positions = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let x = (rng.random::<f32>() - 0.5) * 2.0 * STAR_FIELD_EXTENT;
            let y = (rng.random::<f32>() - 0.5) * 2.0 * STAR_FIELD_EXTENT;
            let z = (rng.random::<f32>() - 0.5) * 2.0 * STAR_FIELD_EXTENT;
            positions.push([x, y, z]);
        }
        Self { positions }
    }

    /// Star positions in generation order.
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Number of stars.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the field is empty.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_star_count_exact() {
        let field = Starfield::generate(1000);
        assert_eq!(field.len(), 1000);
    }

    #[test]
    fn test_all_coordinates_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let field = Starfield::generate_with_rng(1000, &mut rng);
        for (i, p) in field.positions().iter().enumerate() {
            for (axis, &v) in p.iter().enumerate() {
                assert!(
                    (-STAR_FIELD_EXTENT..=STAR_FIELD_EXTENT).contains(&v),
                    "star {i} axis {axis} = {v} outside the cube"
                );
            }
        }
    }

    #[test]
    fn test_regeneration_is_independent() {
        let a = Starfield::generate(500);
        let b = Starfield::generate(500);
        assert_eq!(a.len(), b.len());
        let identical = a
            .positions()
            .iter()
            .zip(b.positions())
            .filter(|(pa, pb)| pa == pb)
            .count();
        assert!(
            identical < 500,
            "two thread-RNG generations should not coincide"
        );
    }

    #[test]
    fn test_distribution_covers_all_octants() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let field = Starfield::generate_with_rng(4000, &mut rng);
        let mut octant_counts = [0u32; 8];
        for p in field.positions() {
            let octant = ((p[0] >= 0.0) as usize)
                | (((p[1] >= 0.0) as usize) << 1)
                | (((p[2] >= 0.0) as usize) << 2);
            octant_counts[octant] += 1;
        }
        for (i, &count) in octant_counts.iter().enumerate() {
            assert!(
                (250..=750).contains(&count),
                "octant {i} has {count} stars, expected roughly 500"
            );
        }
    }

    #[test]
    fn test_zero_count_is_empty() {
        let field = Starfield::generate(0);
        assert!(field.is_empty());
    }

    #[test]
    fn test_same_seed_reproduces_field() {
        let mut rng_a = ChaCha8Rng::seed_from_u64(123);
        let mut rng_b = ChaCha8Rng::seed_from_u64(123);
        let a = Starfield::generate_with_rng(200, &mut rng_a);
        let b = Starfield::generate_with_rng(200, &mut rng_b);
        assert_eq!(a.positions(), b.positions());
    }
}
