use glam::{Mat4, Vec3};
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext as GL};

use super::composer::Composer;
use super::gl::Program;
use super::mesh::GpuMesh;
use super::target::CubeRenderTarget;
use crate::camera::{CubeCamera, PerspectiveCamera, CUBE_FACES};
use crate::geometry::sphere;
use crate::scene::Scene;
use crate::viewport::Viewport;
use crate::{Backend, DemoError, Settings};

const BACKDROP_VERT: &str = include_str!("../shaders/backdrop.vert");
const BACKDROP_FRAG: &str = include_str!("../shaders/backdrop.frag");
const FRESNEL_VERT: &str = include_str!("../shaders/fresnel.vert");
const FRESNEL_FRAG: &str = include_str!("../shaders/fresnel.frag");

/// Camera matrices for one draw of the scene.
struct View {
    view: Mat4,
    projection: Mat4,
    eye: Vec3,
}

/// WebGL2 implementation of [`Backend`].
pub struct WebGlBackend {
    gl: GL,
    canvas: HtmlCanvasElement,
    backdrop: Program,
    backdrop_mesh: GpuMesh,
    fresnel: Program,
    mirror_mesh: GpuMesh,
    cube_target: CubeRenderTarget,
    composer: Composer,
    width: i32,
    height: i32,
}

impl WebGlBackend {
    pub fn new(canvas: HtmlCanvasElement, settings: &Settings) -> Result<Self, DemoError> {
        let gl: GL = canvas
            .get_context("webgl2")?
            .ok_or(DemoError::ContextUnavailable)?
            .dyn_into()
            .map_err(|_| DemoError::ContextUnavailable)?;

        let segments = settings.sphere_segments;
        let width = canvas.width() as i32;
        let height = canvas.height() as i32;

        let backend = Self {
            backdrop: Program::new(&gl, "backdrop", BACKDROP_VERT, BACKDROP_FRAG)?,
            backdrop_mesh: GpuMesh::upload(&gl, &sphere(settings.backdrop_radius, segments, segments))?,
            fresnel: Program::new(&gl, "fresnel", FRESNEL_VERT, FRESNEL_FRAG)?,
            mirror_mesh: GpuMesh::upload(&gl, &sphere(settings.mirror_radius, segments, segments))?,
            cube_target: CubeRenderTarget::new(&gl, settings.cube_size)?,
            composer: Composer::new(&gl, settings, width.max(1), height.max(1))?,
            gl,
            canvas,
            width,
            height,
        };

        backend.gl.enable(GL::DEPTH_TEST);
        // both spheres are double-sided
        backend.gl.disable(GL::CULL_FACE);
        log::info!("WebGL2 backend ready ({width}x{height})");
        Ok(backend)
    }

    fn draw_scene(&mut self, scene: &Scene, view: &View) {
        let gl = &self.gl;
        let bg = scene.background;
        gl.clear_color(bg.x, bg.y, bg.z, 1.0);
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);

        if scene.backdrop.visible {
            let p = &mut self.backdrop;
            p.bind(gl);
            p.set_mat4(gl, "modelMatrix", &scene.backdrop.model());
            p.set_mat4(gl, "viewMatrix", &view.view);
            p.set_mat4(gl, "projectionMatrix", &view.projection);
            p.set_f32(gl, "uTime", scene.backdrop_uniforms.time);
            p.set_vec4(gl, "resolution", scene.backdrop_uniforms.resolution);
            self.backdrop_mesh.draw(gl);
        }

        if scene.mirror.visible {
            let p = &mut self.fresnel;
            p.bind(gl);
            p.set_mat4(gl, "modelMatrix", &scene.mirror.model());
            p.set_mat4(gl, "viewMatrix", &view.view);
            p.set_mat4(gl, "projectionMatrix", &view.projection);
            p.set_vec3(gl, "cameraPosition", view.eye);
            p.set_vec3(gl, "lightDirection", scene.light.direction());
            p.set_vec3(gl, "lightColor", scene.light.color);
            p.set_f32(gl, "lightIntensity", scene.light.intensity);

            gl.active_texture(GL::TEXTURE0);
            let env_map = scene
                .mirror_uniforms
                .env_map_bound
                .then(|| self.cube_target.texture());
            gl.bind_texture(GL::TEXTURE_CUBE_MAP, env_map);
            p.set_i32(gl, "tCube", 0);
            self.mirror_mesh.draw(gl);
            gl.bind_texture(GL::TEXTURE_CUBE_MAP, None);
        }
    }

    fn main_view(camera: &PerspectiveCamera) -> View {
        View {
            view: camera.view(),
            projection: camera.projection(),
            eye: camera.position,
        }
    }
}

impl Backend for WebGlBackend {
    fn resize(&mut self, viewport: Viewport, pixel_ratio: f64) {
        let (width, height) = viewport.drawing_buffer(pixel_ratio);
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", viewport.width)).ok();
        style.set_property("height", &format!("{}px", viewport.height)).ok();

        self.width = width as i32;
        self.height = height as i32;
        if let Err(e) = self.composer.set_size(&self.gl, self.width, self.height) {
            log::error!("resizing composer target: {e}");
        }
    }

    fn capture_environment(&mut self, scene: &Scene, cube_camera: &CubeCamera) {
        let projection = cube_camera.projection();
        for face in 0..CUBE_FACES.len() {
            self.cube_target.bind_face(&self.gl, face);
            let view = View {
                view: cube_camera.face_view(face),
                projection,
                eye: cube_camera.position,
            };
            self.draw_scene(scene, &view);
        }
        self.cube_target.finish(&self.gl);
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) {
        self.gl.bind_framebuffer(GL::FRAMEBUFFER, None);
        self.gl.viewport(0, 0, self.width, self.height);
        self.draw_scene(scene, &Self::main_view(camera));
    }

    fn compose(&mut self, scene: &Scene, camera: &PerspectiveCamera) {
        self.composer.begin(&self.gl);
        self.draw_scene(scene, &Self::main_view(camera));
        self.composer.finish(&self.gl);
    }
}
