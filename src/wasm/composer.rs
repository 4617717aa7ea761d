//! Two-stage post-processing: the scene is rendered into an offscreen
//! target, then a halftone pass draws that target to the canvas.

use glam::Vec2;
use web_sys::WebGl2RenderingContext as GL;

use super::gl::Program;
use super::mesh::FullscreenTriangle;
use super::target::RenderTarget;
use crate::{DemoError, Settings};

const DOT_SCREEN_VERT: &str = include_str!("../shaders/dot_screen.vert");
const DOT_SCREEN_FRAG: &str = include_str!("../shaders/dot_screen.frag");

/// Halftone filter over a colour texture.
struct DotScreenPass {
    program: Program,
    tile: Vec2,
    center: Vec2,
    angle: f32,
    scale: f32,
}

impl DotScreenPass {
    fn new(gl: &GL, settings: &Settings) -> Result<Self, DemoError> {
        Ok(Self {
            program: Program::new(gl, "dot_screen", DOT_SCREEN_VERT, DOT_SCREEN_FRAG)?,
            tile: Vec2::from_array(settings.dot_tile),
            center: Vec2::from_array(settings.dot_center),
            angle: settings.dot_angle,
            scale: settings.dot_scale,
        })
    }

    fn apply(&mut self, gl: &GL, input: &RenderTarget, triangle: &FullscreenTriangle) {
        let p = &mut self.program;
        p.bind(gl);
        gl.active_texture(GL::TEXTURE0);
        gl.bind_texture(GL::TEXTURE_2D, Some(input.texture()));
        p.set_i32(gl, "tDiffuse", 0);
        p.set_vec2(gl, "tSize", self.tile);
        p.set_vec2(gl, "center", self.center);
        p.set_f32(gl, "angle", self.angle);
        p.set_f32(gl, "scale", self.scale);
        triangle.draw(gl);
        gl.bind_texture(GL::TEXTURE_2D, None);
    }
}

pub struct Composer {
    read: RenderTarget,
    dot_screen: DotScreenPass,
    triangle: FullscreenTriangle,
    width: i32,
    height: i32,
}

impl Composer {
    pub fn new(gl: &GL, settings: &Settings, width: i32, height: i32) -> Result<Self, DemoError> {
        Ok(Self {
            read: RenderTarget::new(gl, width, height)?,
            dot_screen: DotScreenPass::new(gl, settings)?,
            triangle: FullscreenTriangle::new(gl)?,
            width,
            height,
        })
    }

    pub fn set_size(&mut self, gl: &GL, width: i32, height: i32) -> Result<(), DemoError> {
        self.width = width;
        self.height = height;
        self.read.set_size(gl, width, height)
    }

    /// Start the render pass: subsequent draws land in the offscreen target.
    pub fn begin(&self, gl: &GL) {
        self.read.bind(gl);
    }

    /// Run the halftone pass onto the canvas.
    pub fn finish(&mut self, gl: &GL) {
        gl.bind_framebuffer(GL::FRAMEBUFFER, None);
        gl.viewport(0, 0, self.width, self.height);
        gl.disable(GL::DEPTH_TEST);
        self.dot_screen.apply(gl, &self.read, &self.triangle);
        gl.enable(GL::DEPTH_TEST);
    }
}
