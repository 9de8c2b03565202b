//! Damped orbit navigation around a look-at target.
//!
//! Input accumulates into pending deltas; [`update`](OrbitControls::update)
//! applies `delta * damping_factor` to the camera state each frame and
//! decays the remainder by `1 - damping_factor`, so motion eases toward
//! rest geometrically after the gesture ends. `update` must run exactly
//! once per rendered frame — skipping it freezes the easing, calling it
//! twice doubles it.

use glam::{Mat3, Quat, Vec2, Vec3};

use crate::pointer::PointerState;

/// Orbit/zoom/pan camera controller with damping.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Look-at point.
    pub target: Vec3,
    /// Horizontal orbit angle in radians. 0 = camera on +Z.
    yaw: f32,
    /// Vertical orbit angle in radians, positive above the horizon.
    pitch: f32,
    /// Distance from the target.
    distance: f32,

    // Pending input, consumed gradually by update().
    yaw_delta: f32,
    pitch_delta: f32,
    zoom_delta: f32,
    pan_delta: Vec2,

    /// Ease motion across frames instead of applying it at once.
    pub damping_enabled: bool,
    /// Fraction of the remainder consumed per frame.
    pub damping_factor: f32,
    /// Radians of orbit per pixel of drag.
    pub rotate_sensitivity: f32,
    /// Distance units per scroll line, scaled by current distance.
    pub zoom_sensitivity: f32,
    /// Target translation per pixel of drag, scaled by current distance.
    pub pan_sensitivity: f32,

    pitch_limit: f32,
    distance_min: f32,
    distance_max: f32,
}

impl OrbitControls {
    /// Create a controller orbiting the origin from `(0, 0, distance)`,
    /// with damping enabled at the default factor 0.05.
    pub fn new(distance: f32) -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance,
            yaw_delta: 0.0,
            pitch_delta: 0.0,
            zoom_delta: 0.0,
            pan_delta: Vec2::ZERO,
            damping_enabled: true,
            damping_factor: 0.05,
            rotate_sensitivity: 0.005,
            zoom_sensitivity: 0.1,
            pan_sensitivity: 0.001,
            pitch_limit: 88.0_f32.to_radians(),
            distance_min: 0.5,
            distance_max: 200.0,
        }
    }

    /// Queue an orbit gesture: `dx`/`dy` in pixels of drag.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw_delta -= dx * self.rotate_sensitivity;
        self.pitch_delta += dy * self.rotate_sensitivity;
    }

    /// Queue a zoom gesture: positive `lines` zooms in.
    pub fn zoom(&mut self, lines: f32) {
        self.zoom_delta += lines;
    }

    /// Queue a pan gesture: `dx`/`dy` in pixels of drag.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.pan_delta += Vec2::new(dx, dy);
    }

    /// Feed one frame of pointer input into the pending deltas.
    pub fn apply_pointer(&mut self, pointer: &PointerState) {
        let orbit = pointer.orbit_delta();
        if orbit != Vec2::ZERO {
            self.rotate(orbit.x, orbit.y);
        }
        let pan = pointer.pan_delta();
        if pan != Vec2::ZERO {
            self.pan(pan.x, pan.y);
        }
        let zoom = pointer.zoom_delta();
        if zoom != 0.0 {
            self.zoom(zoom);
        }
    }

    /// Advance the damping integration by one frame.
    pub fn update(&mut self) {
        let k = if self.damping_enabled {
            self.damping_factor
        } else {
            1.0
        };

        self.yaw += self.yaw_delta * k;
        self.pitch = (self.pitch + self.pitch_delta * k).clamp(-self.pitch_limit, self.pitch_limit);
        self.distance = (self.distance - self.zoom_delta * k * self.zoom_sensitivity * self.distance)
            .clamp(self.distance_min, self.distance_max);

        let pan = self.pan_delta * k * self.pan_sensitivity * self.distance;
        if pan != Vec2::ZERO {
            let rot = self.look_rotation();
            let right = rot * Vec3::X;
            let up = rot * Vec3::Y;
            self.target += right * -pan.x + up * pan.y;
        }

        if self.damping_enabled {
            let decay = 1.0 - self.damping_factor;
            self.yaw_delta *= decay;
            self.pitch_delta *= decay;
            self.zoom_delta *= decay;
            self.pan_delta *= decay;
        } else {
            self.yaw_delta = 0.0;
            self.pitch_delta = 0.0;
            self.zoom_delta = 0.0;
            self.pan_delta = Vec2::ZERO;
        }
    }

    /// Camera position in world space.
    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target
            + Vec3::new(
                self.distance * cos_pitch * sin_yaw,
                self.distance * sin_pitch,
                self.distance * cos_pitch * cos_yaw,
            )
    }

    /// Camera orientation: a rotation whose -Z axis points at the target.
    pub fn look_rotation(&self) -> Quat {
        let back = (self.eye() - self.target).normalize_or_zero();
        if back == Vec3::ZERO {
            return Quat::IDENTITY;
        }
        let right = Vec3::Y.cross(back).normalize_or_zero();
        if right == Vec3::ZERO {
            // Looking straight up or down; pitch clamping keeps this out of
            // reach in practice, but degenerate state must not produce NaN.
            return Quat::IDENTITY;
        }
        let up = back.cross(right);
        Quat::from_mat3(&Mat3::from_cols(right, up, back))
    }

    /// Whether every pending delta has decayed to rest.
    pub fn is_at_rest(&self) -> bool {
        const EPS: f32 = 1e-5;
        self.yaw_delta.abs() < EPS
            && self.pitch_delta.abs() < EPS
            && self.zoom_delta.abs() < EPS
            && self.pan_delta.length() < EPS
    }

    /// Current orbit distance.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Current yaw angle in radians.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current pitch angle in radians.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_eye_on_positive_z() {
        let controls = OrbitControls::new(5.0);
        let eye = controls.eye();
        assert!((eye - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-6);
    }

    #[test]
    fn test_update_without_input_is_noop() {
        let mut controls = OrbitControls::new(5.0);
        let eye_before = controls.eye();
        for _ in 0..10 {
            controls.update();
        }
        assert!((controls.eye() - eye_before).length() < 1e-6);
        assert!(controls.is_at_rest());
    }

    #[test]
    fn test_damping_applies_fraction_per_frame() {
        let mut controls = OrbitControls::new(5.0);
        controls.rotate(100.0, 0.0);
        let queued = 100.0 * controls.rotate_sensitivity;

        controls.update();
        let applied = controls.yaw().abs();
        assert!(
            (applied - queued * controls.damping_factor).abs() < 1e-6,
            "first frame should consume damping_factor of the gesture"
        );
    }

    #[test]
    fn test_damping_remainder_decays_geometrically() {
        let mut controls = OrbitControls::new(5.0);
        controls.rotate(100.0, 0.0);
        let mut prev = controls.yaw_delta.abs();
        for _ in 0..5 {
            controls.update();
            let now = controls.yaw_delta.abs();
            assert!(
                (now - prev * (1.0 - controls.damping_factor)).abs() < 1e-6,
                "remainder must decay by exactly (1 - damping_factor)"
            );
            prev = now;
        }
    }

    #[test]
    fn test_motion_converges_to_full_gesture() {
        let mut controls = OrbitControls::new(5.0);
        controls.rotate(100.0, 0.0);
        let queued = -100.0 * controls.rotate_sensitivity;
        for _ in 0..600 {
            controls.update();
        }
        assert!(
            (controls.yaw() - queued).abs() < 1e-3,
            "eased motion should converge to the whole queued gesture"
        );
        assert!(controls.is_at_rest());
    }

    #[test]
    fn test_damping_disabled_applies_instantly() {
        let mut controls = OrbitControls::new(5.0);
        controls.damping_enabled = false;
        controls.rotate(100.0, 0.0);
        controls.update();
        assert!((controls.yaw() + 100.0 * controls.rotate_sensitivity).abs() < 1e-6);
        assert!(controls.is_at_rest());
    }

    #[test]
    fn test_pitch_clamped() {
        let mut controls = OrbitControls::new(5.0);
        controls.damping_enabled = false;
        controls.rotate(0.0, 100_000.0);
        controls.update();
        assert!(controls.pitch() <= 88.0_f32.to_radians() + 1e-6);
    }

    #[test]
    fn test_zoom_in_decreases_distance_within_limits() {
        let mut controls = OrbitControls::new(5.0);
        controls.damping_enabled = false;
        controls.zoom(1.0);
        controls.update();
        assert!(controls.distance() < 5.0);

        for _ in 0..1000 {
            controls.zoom(10.0);
            controls.update();
        }
        assert!(controls.distance() >= 0.5 - 1e-6);
    }

    #[test]
    fn test_pan_moves_target() {
        let mut controls = OrbitControls::new(5.0);
        controls.damping_enabled = false;
        controls.pan(100.0, 0.0);
        controls.update();
        assert!(controls.target.length() > 0.0);
        // Panning from the default view moves the target parallel to X.
        assert!(controls.target.y.abs() < 1e-6);
        assert!(controls.target.z.abs() < 1e-6);
    }

    #[test]
    fn test_look_rotation_faces_target() {
        let mut controls = OrbitControls::new(5.0);
        controls.damping_enabled = false;
        controls.rotate(123.0, -57.0);
        controls.update();

        let forward = controls.look_rotation() * Vec3::NEG_Z;
        let to_target = (controls.target - controls.eye()).normalize();
        assert!(
            (forward - to_target).length() < 1e-5,
            "camera -Z must point at the target"
        );
    }

    #[test]
    fn test_apply_pointer_feeds_all_gestures() {
        use winit::event::{ElementState, MouseButton, MouseScrollDelta};

        let mut pointer = PointerState::new();
        pointer.on_button(MouseButton::Left, ElementState::Pressed);
        pointer.on_cursor_moved(10.0, 5.0);
        pointer.on_scroll(MouseScrollDelta::LineDelta(0.0, 2.0));

        let mut controls = OrbitControls::new(5.0);
        controls.apply_pointer(&pointer);
        assert!(!controls.is_at_rest());

        controls.update();
        assert!(controls.yaw().abs() > 0.0);
        assert!(controls.distance() < 5.0);
    }
}
