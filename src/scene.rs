//! What gets drawn: two spheres, their shader inputs and one light.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct MeshNode {
    pub position: Vec3,
    pub visible: bool,
    pub radius: f32,
}

impl MeshNode {
    fn new(radius: f32, position: Vec3) -> Self {
        Self {
            position,
            visible: true,
            radius,
        }
    }

    pub fn model(&self) -> Mat4 {
        Mat4::from_translation(self.position)
    }
}

/// Inputs to the backdrop shader.
#[derive(Debug, Clone, Default)]
pub struct BackdropUniforms {
    /// `uTime`
    pub time: f32,
    /// `resolution`: viewport width, height and the letterbox factors.
    pub resolution: Vec4,
}

/// Inputs to the fresnel shader.
#[derive(Debug, Clone, Default)]
pub struct MirrorUniforms {
    /// Whether `tCube` points at the captured environment yet.
    pub env_map_bound: bool,
}

#[derive(Debug, Clone)]
pub struct DirectionalLight {
    pub color: Vec3,
    pub intensity: f32,
    pub position: Vec3,
}

impl DirectionalLight {
    /// Direction the light travels, toward the origin.
    pub fn direction(&self) -> Vec3 {
        (-self.position).normalize_or_zero()
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub background: Vec3,
    pub backdrop: MeshNode,
    pub backdrop_uniforms: BackdropUniforms,
    pub mirror: MeshNode,
    pub mirror_uniforms: MirrorUniforms,
    pub light: DirectionalLight,
}

impl Scene {
    pub fn new(settings: &Settings) -> Self {
        Self {
            background: rgb(settings.background),
            backdrop: MeshNode::new(settings.backdrop_radius, Vec3::ZERO),
            backdrop_uniforms: BackdropUniforms::default(),
            mirror: MeshNode::new(settings.mirror_radius, settings.mirror_position),
            mirror_uniforms: MirrorUniforms::default(),
            light: DirectionalLight {
                color: rgb(settings.light_color),
                intensity: settings.light_intensity,
                position: settings.light_position,
            },
        }
    }

    pub fn backdrop_xy(&self) -> Vec2 {
        self.backdrop.position.truncate()
    }

    pub fn set_backdrop_xy(&mut self, xy: Vec2) {
        self.backdrop.position.x = xy.x;
        self.backdrop.position.y = xy.y;
    }
}

/// Unpack 0xRRGGBB into linear [0, 1] channels.
pub fn rgb(hex: u32) -> Vec3 {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    Vec3::new(channel(16), channel(8), channel(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_from_settings() {
        let scene = Scene::new(&Settings::default());
        assert_eq!(scene.background, Vec3::ONE);
        assert_eq!(scene.light.color, Vec3::new(0.0, 1.0, 1.0));
        assert_eq!(scene.mirror.position, Vec3::new(0.38, 0.22, 0.7));
        assert!(scene.mirror.visible && scene.backdrop.visible);
        assert!(!scene.mirror_uniforms.env_map_bound);
    }
}
