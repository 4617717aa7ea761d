//! Cursor handling for the backdrop sphere.
//!
//! Each mouse-move nudges the sphere a fixed fraction of the way toward a
//! point derived from the cursor, which gives it a lagging, springy follow.

use glam::Vec2;

use crate::viewport::Viewport;

/// Map a client-space cursor position to `[-1, 1]` on both axes.
///
/// `y` grows downward, as in client coordinates; callers flip it.
pub fn to_ndc(client_x: f32, client_y: f32, viewport: Viewport) -> Vec2 {
    Vec2::new(
        client_x / viewport.width * 2.0 - 1.0,
        client_y / viewport.height * 2.0 - 1.0,
    )
}

pub fn interpolate(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[derive(Debug, Clone, Copy)]
pub struct PointerFollow {
    pub ease: f32,
    pub scale: f32,
}

impl PointerFollow {
    pub fn target(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(ndc.x * self.scale, -ndc.y * self.scale)
    }

    /// One easing step from `current` toward the cursor target.
    pub fn step(&self, current: Vec2, ndc: Vec2) -> Vec2 {
        let target = self.target(ndc);
        Vec2::new(
            interpolate(current.x, target.x, self.ease),
            interpolate(current.y, target.y, self.ease),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_is_origin() {
        let vp = Viewport::new(1280.0, 720.0);
        assert_eq!(to_ndc(640.0, 360.0, vp), Vec2::ZERO);
        assert_eq!(to_ndc(0.0, 720.0, vp), Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn step_moves_five_percent() {
        let follow = PointerFollow {
            ease: 0.05,
            scale: 1.0 / 3.0,
        };
        let next = follow.step(Vec2::ZERO, Vec2::new(0.6, 0.3));
        assert!((next.x - 0.01).abs() < 1e-6);
        assert!((next.y + 0.005).abs() < 1e-6);
    }
}
