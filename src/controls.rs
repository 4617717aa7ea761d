//! Orbit-style camera controls: drag to rotate around the target, wheel to
//! dolly, secondary drag to pan. No damping; every input is applied at once.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::camera::PerspectiveCamera;

const POLE_EPSILON: f32 = 1e-6;
const MIN_DISTANCE: f32 = 1e-4;

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: true,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
        }
    }
}

/// Offset from target to camera as (radius, polar from +Y, azimuth around +Y).
#[derive(Debug, Clone, Copy)]
struct Spherical {
    radius: f32,
    theta: f32,
    phi: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius: 0.0,
                theta: 0.0,
                phi: PI / 2.0,
            };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

impl OrbitControls {
    /// Rotate by a pointer drag of `(dx, dy)` pixels over an element
    /// `element_height` pixels tall. A full-height drag is one full turn.
    pub fn rotate(&self, camera: &mut PerspectiveCamera, dx: f32, dy: f32, element_height: f32) {
        if !self.enable_rotate || element_height <= 0.0 {
            return;
        }
        let mut s = Spherical::from_offset(camera.position - camera.target);
        s.theta -= TAU * dx * self.rotate_speed / element_height;
        s.phi -= TAU * dy * self.rotate_speed / element_height;
        s.phi = s.phi.clamp(POLE_EPSILON, PI - POLE_EPSILON);
        camera.position = camera.target + s.to_offset();
    }

    /// Move toward (`delta_y < 0`) or away from the target.
    pub fn dolly(&self, camera: &mut PerspectiveCamera, delta_y: f32) {
        if !self.enable_zoom || delta_y == 0.0 {
            return;
        }
        let scale = 0.95_f32.powf(self.zoom_speed);
        let factor = if delta_y < 0.0 { scale } else { 1.0 / scale };
        let mut s = Spherical::from_offset(camera.position - camera.target);
        s.radius = (s.radius * factor).max(MIN_DISTANCE);
        camera.position = camera.target + s.to_offset();
    }

    /// Slide camera and target together in the view plane.
    pub fn pan(&self, camera: &mut PerspectiveCamera, dx: f32, dy: f32, element_height: f32) {
        if !self.enable_pan || element_height <= 0.0 {
            return;
        }
        let offset = camera.position - camera.target;
        let distance = offset.length() * (camera.fov_deg.to_radians() / 2.0).tan();
        let per_pixel = 2.0 * distance * self.pan_speed / element_height;

        let forward = (-offset).normalize_or_zero();
        let right = forward.cross(camera.up).normalize_or_zero();
        let up = right.cross(forward);
        let shift = right * (-dx * per_pixel) + up * (dy * per_pixel);

        camera.position += shift;
        camera.target += shift;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(70.0, 1.0, 0.1, 1000.0);
        camera.position = Vec3::new(0.0, 0.0, 1.2);
        camera
    }

    #[test]
    fn rotate_keeps_distance() {
        let controls = OrbitControls::default();
        let mut cam = camera();
        controls.rotate(&mut cam, 120.0, -40.0, 800.0);
        assert!((cam.position.length() - 1.2).abs() < 1e-5);
        assert!(cam.position.x < 0.0);
    }

    #[test]
    fn full_height_drag_is_full_turn() {
        let controls = OrbitControls::default();
        let mut cam = camera();
        controls.rotate(&mut cam, 800.0, 0.0, 800.0);
        assert!((cam.position - Vec3::new(0.0, 0.0, 1.2)).length() < 1e-4);
    }

    #[test]
    fn rotate_stops_at_pole() {
        let controls = OrbitControls::default();
        let mut cam = camera();
        controls.rotate(&mut cam, 0.0, 10_000.0, 800.0);
        assert!(cam.position.y > 1.19);
        assert!(cam.position.is_finite());
    }

    #[test]
    fn dolly_in_and_out_cancel() {
        let controls = OrbitControls::default();
        let mut cam = camera();
        controls.dolly(&mut cam, -100.0);
        assert!((cam.position.z - 1.2 * 0.95).abs() < 1e-6);
        controls.dolly(&mut cam, 100.0);
        assert!((cam.position.z - 1.2).abs() < 1e-5);
    }

    #[test]
    fn pan_moves_target_with_camera() {
        let controls = OrbitControls::default();
        let mut cam = camera();
        controls.pan(&mut cam, 100.0, 0.0, 800.0);
        assert!(cam.target.x < 0.0);
        assert!((cam.position - cam.target - Vec3::new(0.0, 0.0, 1.2)).length() < 1e-6);
    }

    #[test]
    fn disabled_controls_do_nothing() {
        let controls = OrbitControls {
            enable_rotate: false,
            enable_zoom: false,
            enable_pan: false,
            ..OrbitControls::default()
        };
        let mut cam = camera();
        controls.rotate(&mut cam, 50.0, 50.0, 800.0);
        controls.dolly(&mut cam, 10.0);
        controls.pan(&mut cam, 50.0, 50.0, 800.0);
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 1.2));
    }
}
