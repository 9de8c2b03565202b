//! Compiled-in scene constants: the eight-planet catalog, sun, and ring.
//!
//! Speeds are normalized as `(1 / period) * SPEED_FACTOR` so relative
//! orbital rates approximate the real ratios while the absolute rate stays
//! visually slow. The scaling is applied once at scene construction, never
//! per frame.

/// Global scalar mapping per-planet period constants to radians/frame.
pub const SPEED_FACTOR: f32 = 0.005;

/// Sun sphere radius in scene units.
pub const SUN_RADIUS: f32 = 1.0;

/// Sun color (hex RGB).
pub const SUN_COLOR: u32 = 0xffff00;

/// Sun self-rotation increment in radians per frame.
pub const SUN_SPIN: f32 = 0.01;

/// Sphere tessellation used for the sun and every planet.
pub const SPHERE_SEGMENTS: u32 = 32;

/// One planet's static description.
#[derive(Clone, Copy, Debug)]
pub struct PlanetSpec {
    /// Display name, used only for logs and diagnostics.
    pub name: &'static str,
    /// Sphere radius in scene units.
    pub radius: f32,
    /// Surface color (hex RGB).
    pub color: u32,
    /// Fixed distance of the body from the sun.
    pub orbit_radius: f32,
    /// Reciprocal-period constant, Earth = 1.00.
    pub period_constant: f32,
}

impl PlanetSpec {
    /// Angular speed in radians per frame after global scaling.
    pub fn orbit_speed(&self) -> f32 {
        self.period_constant * SPEED_FACTOR
    }

    /// Surface color as linear RGB components in [0, 1].
    pub fn color_rgb(&self) -> [f32; 3] {
        hex_to_rgb(self.color)
    }
}

/// The eight planets in creation order, Mercury through Neptune.
pub const PLANETS: [PlanetSpec; 8] = [
    PlanetSpec {
        name: "Mercury",
        radius: 0.2,
        color: 0xaaaaaa,
        orbit_radius: 2.0,
        period_constant: 4.17,
    },
    PlanetSpec {
        name: "Venus",
        radius: 0.25,
        color: 0xffcc99,
        orbit_radius: 2.7,
        period_constant: 1.61,
    },
    PlanetSpec {
        name: "Earth",
        radius: 0.3,
        color: 0x0000ff,
        orbit_radius: 3.5,
        period_constant: 1.00,
    },
    PlanetSpec {
        name: "Mars",
        radius: 0.28,
        color: 0xff4500,
        orbit_radius: 4.2,
        period_constant: 0.53,
    },
    PlanetSpec {
        name: "Jupiter",
        radius: 0.6,
        color: 0xd2b48c,
        orbit_radius: 5.5,
        period_constant: 0.084,
    },
    PlanetSpec {
        name: "Saturn",
        radius: 0.5,
        color: 0xffd27f,
        orbit_radius: 7.0,
        period_constant: 0.034,
    },
    PlanetSpec {
        name: "Uranus",
        radius: 0.4,
        color: 0x66ffff,
        orbit_radius: 8.2,
        period_constant: 0.012,
    },
    PlanetSpec {
        name: "Neptune",
        radius: 0.4,
        color: 0x3333ff,
        orbit_radius: 9.5,
        period_constant: 0.0061,
    },
];

/// Index of Saturn in [`PLANETS`], the one body carrying a ring.
pub const RINGED_PLANET: usize = 5;

/// Static description of Saturn's ring annulus.
#[derive(Clone, Copy, Debug)]
pub struct RingSpec {
    /// Inner annulus radius in scene units.
    pub inner_radius: f32,
    /// Outer annulus radius in scene units.
    pub outer_radius: f32,
    /// Annulus tessellation.
    pub segments: u32,
    /// Ring color (hex RGB).
    pub color: u32,
}

impl RingSpec {
    /// Ring color as linear RGB components in [0, 1].
    pub fn color_rgb(&self) -> [f32; 3] {
        hex_to_rgb(self.color)
    }
}

/// Saturn's ring: annulus from 0.6 to 0.9, tilted 90° about local X.
pub const RING: RingSpec = RingSpec {
    inner_radius: 0.6,
    outer_radius: 0.9,
    segments: 64,
    color: 0xd2b48c,
};

/// Expand a `0xRRGGBB` hex color into [0, 1] float components.
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_eight_planets() {
        assert_eq!(PLANETS.len(), 8);
        assert_eq!(PLANETS[0].name, "Mercury");
        assert_eq!(PLANETS[7].name, "Neptune");
    }

    #[test]
    fn test_orbit_speed_is_period_times_factor() {
        for spec in &PLANETS {
            let expected = spec.period_constant * SPEED_FACTOR;
            assert_eq!(
                spec.orbit_speed(),
                expected,
                "{} speed must be period constant scaled by the global factor",
                spec.name
            );
        }
    }

    #[test]
    fn test_all_planet_speeds_positive() {
        for spec in &PLANETS {
            assert!(
                spec.orbit_speed() > 0.0,
                "{} has non-positive angular speed",
                spec.name
            );
        }
    }

    #[test]
    fn test_inner_planets_orbit_faster() {
        for pair in PLANETS.windows(2) {
            assert!(
                pair[0].period_constant > pair[1].period_constant,
                "{} should orbit faster than {}",
                pair[0].name,
                pair[1].name
            );
        }
    }

    #[test]
    fn test_orbit_radii_strictly_increase() {
        for pair in PLANETS.windows(2) {
            assert!(pair[0].orbit_radius < pair[1].orbit_radius);
        }
    }

    #[test]
    fn test_hex_to_rgb_channels() {
        let rgb = hex_to_rgb(0xff4500);
        assert!((rgb[0] - 1.0).abs() < 1e-6);
        assert!((rgb[1] - 69.0 / 255.0).abs() < 1e-6);
        assert!((rgb[2] - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_ring_is_wider_than_saturn() {
        let saturn = &PLANETS[RINGED_PLANET];
        assert_eq!(saturn.name, "Saturn");
        assert!(RING.inner_radius > saturn.radius);
        assert!(RING.outer_radius > RING.inner_radius);
    }
}
