//! The demo controller.
//!
//! `Demo` owns every piece of mutable state: clock, camera, scene and
//! viewport. Event handlers and the frame loop call into it; drawing is
//! delegated to a [`Backend`] so the sequencing can run without a GPU.

use glam::{Vec3, Vec4};

use crate::camera::{CubeCamera, PerspectiveCamera};
use crate::clock::Clock;
use crate::controls::OrbitControls;
use crate::panel::Axis;
use crate::pointer::{to_ndc, PointerFollow};
use crate::scene::Scene;
use crate::settings::Settings;
use crate::viewport::Viewport;

/// Whatever puts pixels on screen.
pub trait Backend {
    /// Match the canvas and every offscreen target to the viewport.
    fn resize(&mut self, viewport: Viewport, pixel_ratio: f64);

    /// Redraw the scene from `cube_camera` into the environment cube map.
    fn capture_environment(&mut self, scene: &Scene, cube_camera: &CubeCamera);

    /// Draw the scene straight to the canvas.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera);

    /// Draw the scene through the post-processing chain to the canvas.
    fn compose(&mut self, scene: &Scene, camera: &PerspectiveCamera);
}

pub struct Demo<B> {
    settings: Settings,
    clock: Clock,
    camera: PerspectiveCamera,
    cube_camera: CubeCamera,
    controls: OrbitControls,
    follow: PointerFollow,
    scene: Scene,
    viewport: Viewport,
    backend: B,
}

impl<B: Backend> Demo<B> {
    pub fn new(settings: Settings, viewport: Viewport, backend: B) -> Self {
        let mut camera =
            PerspectiveCamera::new(settings.fov_deg, viewport.aspect(), settings.near, settings.far);
        camera.position = Vec3::new(0.0, 0.0, settings.camera_z);

        let mut demo = Self {
            clock: Clock::new(settings.clock, settings.time_step),
            camera,
            cube_camera: CubeCamera::new(settings.cube_near, settings.cube_far),
            controls: OrbitControls::default(),
            follow: PointerFollow {
                ease: settings.pointer_ease,
                scale: settings.pointer_scale,
            },
            scene: Scene::new(&settings),
            viewport,
            backend,
            settings,
        };
        demo.resize(viewport);
        demo
    }

    /// One animation frame.
    pub fn frame(&mut self, timestamp_ms: f64) {
        self.scene.backdrop_uniforms.time = self.clock.tick(timestamp_ms);

        // The mirror must not reflect itself.
        self.scene.mirror.visible = false;
        self.backend.capture_environment(&self.scene, &self.cube_camera);
        self.scene.mirror.visible = true;
        self.scene.mirror_uniforms.env_map_bound = true;

        if self.settings.direct_render {
            self.backend.render(&self.scene, &self.camera);
        }
        self.backend.compose(&self.scene, &self.camera);
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.set_aspect(viewport.aspect());
        self.backend.resize(viewport, self.settings.pixel_ratio);
        self.scene.backdrop_uniforms.resolution =
            Vec4::from_array(viewport.letterbox(self.settings.image_aspect));
    }

    /// Ease the backdrop toward the cursor.
    pub fn pointer_moved(&mut self, client_x: f32, client_y: f32) {
        let ndc = to_ndc(client_x, client_y, self.viewport);
        let next = self.follow.step(self.scene.backdrop_xy(), ndc);
        self.scene.set_backdrop_xy(next);
    }

    pub fn orbit_rotate(&mut self, dx: f32, dy: f32) {
        self.controls
            .rotate(&mut self.camera, dx, dy, self.viewport.height);
    }

    pub fn orbit_pan(&mut self, dx: f32, dy: f32) {
        self.controls.pan(&mut self.camera, dx, dy, self.viewport.height);
    }

    pub fn orbit_dolly(&mut self, delta_y: f32) {
        self.controls.dolly(&mut self.camera, delta_y);
    }

    /// Debug-panel write straight into the live camera.
    pub fn set_camera_axis(&mut self, axis: Axis, value: f32) {
        let position = &mut self.camera.position;
        match axis {
            Axis::X => position.x = value,
            Axis::Y => position.y = value,
            Axis::Z => position.z = value,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
