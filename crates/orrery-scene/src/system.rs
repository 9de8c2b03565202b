//! The solar system scene graph and its per-frame simulation step.
//!
//! The hierarchy is intentionally flat: the scene owns the sun and a fixed
//! registry of orbit pivots, each pivot owns exactly one body, and at most
//! one body owns a ring. Rotation angles accumulate unbounded; only their
//! sine/cosine ever reach the renderer.

use glam::{Mat4, Vec3};

use crate::catalog::{self, PLANETS, RING, RINGED_PLANET, SUN_COLOR, SUN_RADIUS, SUN_SPIN};
use crate::starfield::Starfield;

/// A flat annulus attached to a planet body, tilted about the body's local
/// X axis. Static after creation.
#[derive(Clone, Copy, Debug)]
pub struct Ring {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub color: [f32; 3],
    /// Tilt about local X in radians.
    pub tilt: f32,
}

/// A renderable sphere. The sun is a body owned by the scene directly;
/// every planet body is owned by exactly one [`OrbitPivot`].
#[derive(Clone, Debug)]
pub struct CelestialBody {
    pub radius: f32,
    pub color: [f32; 3],
    /// At most one ring, two ownership levels below the pivot.
    pub ring: Option<Ring>,
}

/// An invisible transform node owning one body. Rotating the pivot about Y
/// carries the body, placed at `(orbit_radius, 0, 0)` in pivot space,
/// around the origin.
#[derive(Clone, Debug)]
pub struct OrbitPivot {
    /// Accumulated rotation in radians. Unbounded; never wrapped.
    pub angle: f32,
    /// Rotation increment in radians per frame. Positive for every planet.
    pub angular_speed: f32,
    /// Distance of the body from the pivot origin.
    pub orbit_radius: f32,
    pub body: CelestialBody,
}

impl OrbitPivot {
    /// World transform of the owned body: pivot rotation, then the fixed
    /// offset along the pivot's local X axis.
    pub fn body_transform(&self) -> Mat4 {
        Mat4::from_rotation_y(self.angle)
            * Mat4::from_translation(Vec3::new(self.orbit_radius, 0.0, 0.0))
    }

    /// World-space position of the owned body's center.
    pub fn body_position(&self) -> Vec3 {
        self.body_transform().transform_point3(Vec3::ZERO)
    }

    /// World transform of the ring, if the body carries one.
    pub fn ring_transform(&self) -> Option<Mat4> {
        let ring = self.body.ring.as_ref()?;
        Some(self.body_transform() * Mat4::from_rotation_x(ring.tilt))
    }
}

/// The whole scene: sun, orbit registry, starfield, and a frame counter.
///
/// Construction happens once at startup; afterwards the only mutation is
/// [`tick`](Self::tick), which advances every rotation angle by one frame.
pub struct SolarSystem {
    pub sun: CelestialBody,
    /// Accumulated sun self-rotation in radians.
    pub sun_angle: f32,
    pivots: Vec<OrbitPivot>,
    pub starfield: Starfield,
    frame: u64,
}

impl SolarSystem {
    /// Build the full scene from the compiled-in catalog: sun, eight
    /// planets in Mercury..Neptune order, Saturn's ring, and `star_count`
    /// backdrop stars.
    pub fn new(star_count: u32) -> Self {
        let mut system = Self {
            sun: CelestialBody {
                radius: SUN_RADIUS,
                color: catalog::hex_to_rgb(SUN_COLOR),
                ring: None,
            },
            sun_angle: 0.0,
            pivots: Vec::with_capacity(PLANETS.len()),
            starfield: Starfield::generate(star_count),
            frame: 0,
        };

        for spec in &PLANETS {
            system.add_planet(
                spec.radius,
                spec.color_rgb(),
                spec.orbit_radius,
                spec.orbit_speed(),
            );
        }

        // Ring ownership runs pivot -> body -> ring.
        system.pivots[RINGED_PLANET].body.ring = Some(Ring {
            inner_radius: RING.inner_radius,
            outer_radius: RING.outer_radius,
            color: RING.color_rgb(),
            tilt: std::f32::consts::FRAC_PI_2,
        });

        log::debug!(
            "scene built: {} pivots, {} stars",
            system.pivots.len(),
            system.starfield.len()
        );
        system
    }

    /// Create a pivot whose body sits at `(orbit_radius, 0, 0)` and append
    /// it to the registry. No validation: zero or negative radii are
    /// accepted and produce degenerate geometry. The caller pre-scales
    /// `orbit_speed`; this stores it verbatim.
    pub fn add_planet(
        &mut self,
        radius: f32,
        color: [f32; 3],
        orbit_radius: f32,
        orbit_speed: f32,
    ) -> &mut OrbitPivot {
        self.pivots.push(OrbitPivot {
            angle: 0.0,
            angular_speed: orbit_speed,
            orbit_radius,
            body: CelestialBody {
                radius,
                color,
                ring: None,
            },
        });
        self.pivots.last_mut().expect("pivot was just pushed")
    }

    /// The orbit registry in creation order. Iteration only; the registry
    /// is never modified after startup.
    pub fn pivots(&self) -> &[OrbitPivot] {
        &self.pivots
    }

    /// Advance the simulation by exactly one frame: sun self-rotation by
    /// [`SUN_SPIN`], every pivot by its own angular speed. Increments are
    /// fixed per tick, not time-scaled; perceived speed follows the caller's
    /// tick rate.
    pub fn tick(&mut self) {
        self.sun_angle += SUN_SPIN;
        for pivot in &mut self.pivots {
            pivot.angle += pivot.angular_speed;
        }
        self.frame += 1;
    }

    /// Number of ticks run so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// World transform of the sun (self-rotation about Y only).
    pub fn sun_transform(&self) -> Mat4 {
        Mat4::from_rotation_y(self.sun_angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SPEED_FACTOR;

    #[test]
    fn test_registry_has_eight_pivots_in_order() {
        let system = SolarSystem::new(0);
        assert_eq!(system.pivots().len(), 8);
        for (pivot, spec) in system.pivots().iter().zip(PLANETS.iter()) {
            assert_eq!(
                pivot.orbit_radius, spec.orbit_radius,
                "registry order must match catalog order ({})",
                spec.name
            );
        }
    }

    #[test]
    fn test_iterating_registry_does_not_mutate() {
        let system = SolarSystem::new(0);
        let before: Vec<f32> = system.pivots().iter().map(|p| p.angle).collect();
        for _ in 0..3 {
            let _: f32 = system.pivots().iter().map(|p| p.angular_speed).sum();
        }
        let after: Vec<f32> = system.pivots().iter().map(|p| p.angle).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_tick_advances_each_pivot_by_its_speed() {
        let mut system = SolarSystem::new(0);
        let n = 37;
        for _ in 0..n {
            system.tick();
        }
        for (pivot, spec) in system.pivots().iter().zip(PLANETS.iter()) {
            let expected = n as f32 * spec.orbit_speed();
            assert!(
                (pivot.angle - expected).abs() < 1e-4,
                "{}: angle {} != {}",
                spec.name,
                pivot.angle,
                expected
            );
        }
        assert!((system.sun_angle - n as f32 * SUN_SPIN).abs() < 1e-5);
        assert_eq!(system.frame_count(), n);
    }

    #[test]
    fn test_hundred_ticks_earth_and_mercury() {
        let mut system = SolarSystem::new(0);
        for _ in 0..100 {
            system.tick();
        }
        // Earth: 100 * 1.00 * 0.005 = 0.5 rad
        assert!((system.pivots()[2].angle - 0.5).abs() < 1e-4);
        // Mercury: 100 * 4.17 * 0.005 = 2.085 rad
        assert!((system.pivots()[0].angle - 2.085).abs() < 1e-3);
    }

    #[test]
    fn test_speeds_match_catalog_exactly() {
        let system = SolarSystem::new(0);
        for (pivot, spec) in system.pivots().iter().zip(PLANETS.iter()) {
            assert_eq!(pivot.angular_speed, spec.period_constant * SPEED_FACTOR);
        }
    }

    #[test]
    fn test_only_saturn_carries_a_ring() {
        let system = SolarSystem::new(0);
        for (i, pivot) in system.pivots().iter().enumerate() {
            assert_eq!(
                pivot.body.ring.is_some(),
                i == RINGED_PLANET,
                "only the catalog's ringed planet may own a ring"
            );
        }
        assert!(system.sun.ring.is_none());
    }

    #[test]
    fn test_ring_tilt_is_quarter_turn() {
        let system = SolarSystem::new(0);
        let ring = system.pivots()[RINGED_PLANET]
            .body
            .ring
            .expect("Saturn must have a ring");
        assert!((ring.tilt - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!((ring.inner_radius - 0.6).abs() < 1e-6);
        assert!((ring.outer_radius - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_body_starts_on_positive_x() {
        let system = SolarSystem::new(0);
        let pos = system.pivots()[0].body_position();
        assert!((pos.x - 2.0).abs() < 1e-5);
        assert!(pos.y.abs() < 1e-5);
        assert!(pos.z.abs() < 1e-5);
    }

    #[test]
    fn test_orbit_stays_on_circle() {
        let mut system = SolarSystem::new(0);
        for _ in 0..500 {
            system.tick();
            for (pivot, spec) in system.pivots().iter().zip(PLANETS.iter()) {
                let r = pivot.body_position().length();
                assert!(
                    (r - spec.orbit_radius).abs() < 1e-3,
                    "{} drifted off its orbit: r = {}",
                    spec.name,
                    r
                );
            }
        }
    }

    #[test]
    fn test_quarter_turn_moves_body_to_negative_z() {
        let mut system = SolarSystem::new(0);
        // Force a quarter turn on Mercury's pivot directly.
        let pivot = &mut system.pivots[0];
        pivot.angle = std::f32::consts::FRAC_PI_2;
        let pos = pivot.body_position();
        // Positive Y rotation carries +X toward -Z.
        assert!(pos.x.abs() < 1e-5);
        assert!((pos.z + pivot.orbit_radius).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_radius_accepted() {
        let mut system = SolarSystem::new(0);
        let pivot = system.add_planet(-1.0, [1.0, 0.0, 0.0], 0.0, 0.01);
        assert_eq!(pivot.body.radius, -1.0);
        assert_eq!(pivot.orbit_radius, 0.0);
        assert_eq!(system.pivots().len(), 9);
    }

    #[test]
    fn test_ring_transform_tilts_annulus_into_orbital_plane() {
        let system = SolarSystem::new(0);
        let transform = system.pivots()[RINGED_PLANET]
            .ring_transform()
            .expect("ringed planet must yield a ring transform");
        // A point on the annulus' local +Y lands on the world XZ plane
        // after the 90° tilt.
        let p = transform.transform_point3(Vec3::new(0.0, 0.75, 0.0));
        assert!(p.y.abs() < 1e-5, "ring plane should be horizontal");
    }

    #[test]
    fn test_unringed_pivot_has_no_ring_transform() {
        let system = SolarSystem::new(0);
        assert!(system.pivots()[0].ring_transform().is_none());
    }

    #[test]
    fn test_sun_transform_is_pure_y_rotation() {
        let mut system = SolarSystem::new(0);
        for _ in 0..10 {
            system.tick();
        }
        let m = system.sun_transform();
        // Y axis is invariant under Y rotation.
        let y = m.transform_vector3(Vec3::Y);
        assert!((y - Vec3::Y).length() < 1e-6);
    }
}
