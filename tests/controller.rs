use glam::Vec3;
use orb_wasm::camera::{CubeCamera, PerspectiveCamera};
use orb_wasm::panel::Axis;
use orb_wasm::scene::Scene;
use orb_wasm::{Backend, ClockMode, Demo, Settings, Viewport};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Resize { width: f32, height: f32, pixel_ratio: f64 },
    Capture { mirror_visible: bool, time: f32 },
    Render { mirror_visible: bool, env_map_bound: bool },
    Compose { mirror_visible: bool, env_map_bound: bool, time: f32 },
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl Backend for Recorder {
    fn resize(&mut self, viewport: Viewport, pixel_ratio: f64) {
        self.calls.push(Call::Resize {
            width: viewport.width,
            height: viewport.height,
            pixel_ratio,
        });
    }

    fn capture_environment(&mut self, scene: &Scene, _cube_camera: &CubeCamera) {
        self.calls.push(Call::Capture {
            mirror_visible: scene.mirror.visible,
            time: scene.backdrop_uniforms.time,
        });
    }

    fn render(&mut self, scene: &Scene, _camera: &PerspectiveCamera) {
        self.calls.push(Call::Render {
            mirror_visible: scene.mirror.visible,
            env_map_bound: scene.mirror_uniforms.env_map_bound,
        });
    }

    fn compose(&mut self, scene: &Scene, _camera: &PerspectiveCamera) {
        self.calls.push(Call::Compose {
            mirror_visible: scene.mirror.visible,
            env_map_bound: scene.mirror_uniforms.env_map_bound,
            time: scene.backdrop_uniforms.time,
        });
    }
}

fn demo(settings: Settings) -> Demo<Recorder> {
    Demo::new(settings, Viewport::new(1280.0, 720.0), Recorder::default())
}

#[test]
fn startup_sizes_everything_once() {
    let demo = demo(Settings::default());
    assert_eq!(
        demo.backend().calls,
        [Call::Resize {
            width: 1280.0,
            height: 720.0,
            pixel_ratio: 2.0
        }]
    );

    let camera = demo.camera();
    assert_eq!(camera.fov_deg, 70.0);
    assert_eq!((camera.near, camera.far), (0.1, 1000.0));
    assert_eq!(camera.position, Vec3::new(0.0, 0.0, 1.2));
    assert!((camera.aspect - 1280.0 / 720.0).abs() < 1e-6);

    let resolution = demo.scene().backdrop_uniforms.resolution;
    assert_eq!((resolution.x, resolution.y, resolution.w), (1280.0, 720.0, 1.0));
}

#[test]
fn frame_hides_mirror_only_while_capturing() {
    let mut demo = demo(Settings::default());
    demo.frame(16.0);

    let calls = &demo.backend().calls[1..];
    assert_eq!(calls.len(), 2, "direct render is off by default: {calls:?}");
    assert!(matches!(calls[0], Call::Capture { mirror_visible: false, .. }));
    assert!(matches!(
        calls[1],
        Call::Compose {
            mirror_visible: true,
            env_map_bound: true,
            ..
        }
    ));
    assert!(demo.scene().mirror.visible);
}

#[test]
fn direct_render_precedes_composer() {
    let settings = Settings {
        direct_render: true,
        ..Settings::default()
    };
    let mut demo = demo(settings);
    demo.frame(16.0);

    let calls = &demo.backend().calls[1..];
    assert!(matches!(calls[0], Call::Capture { .. }));
    assert!(matches!(calls[1], Call::Render { mirror_visible: true, env_map_bound: true }));
    assert!(matches!(calls[2], Call::Compose { .. }));
}

#[test]
fn time_accumulates_per_frame() {
    let mut demo = demo(Settings::default());
    for n in 1..=500 {
        demo.frame(n as f64 * 7.0);
    }
    assert!((demo.elapsed() - 5.0).abs() < 1e-3);
    assert_eq!(demo.scene().backdrop_uniforms.time, demo.elapsed());

    // uniform is updated before the capture sees the scene
    let Call::Capture { time, .. } = demo.backend().calls[1] else {
        panic!("expected capture");
    };
    assert!((time - 0.01).abs() < 1e-6);
}

#[test]
fn realtime_clock_follows_timestamps() {
    let settings = Settings {
        clock: ClockMode::Realtime,
        ..Settings::default()
    };
    let mut demo = demo(settings);
    demo.frame(1000.0);
    // a 30 Hz display advances two reference frames per callback
    demo.frame(1000.0 + 2000.0 / 60.0);
    assert!((demo.elapsed() - 0.03).abs() < 1e-5);
}

#[test]
fn resize_keeps_aspect_and_letterbox() {
    let mut demo = demo(Settings::default());
    for (w, h) in [(300.0, 900.0), (1920.0, 1080.0), (500.0, 500.0), (1.0, 3000.0)] {
        demo.resize(Viewport::new(w, h));
        let aspect = w / h;
        assert!((demo.camera().aspect - aspect).abs() < 1e-6);

        let r = demo.scene().backdrop_uniforms.resolution;
        assert_eq!((r.x, r.y), (w, h));
        if aspect > 1.0 {
            assert!((r.z - aspect).abs() < 1e-6);
            assert_eq!(r.w, 1.0);
        } else {
            assert_eq!(r.z, 1.0);
            assert!((r.w - aspect).abs() < 1e-6);
        }
    }
    assert!(matches!(
        demo.backend().calls.last(),
        Some(Call::Resize { width, height, .. }) if *width == 1.0 && *height == 3000.0
    ));
}

#[test]
fn centre_pointer_leaves_backdrop_at_origin() {
    let mut demo = demo(Settings::default());
    demo.pointer_moved(640.0, 360.0);
    assert_eq!(demo.scene().backdrop.position, Vec3::ZERO);
}

#[test]
fn pointer_converges_geometrically() {
    let mut demo = demo(Settings::default());
    // top-left corner: ndc (-1, -1), target (-1/3, 1/3)
    let target = (-1.0_f32 / 3.0, 1.0_f32 / 3.0);
    let mut previous_error = f32::INFINITY;
    for step in 1..=60 {
        demo.pointer_moved(0.0, 0.0);
        let p = demo.scene().backdrop.position;
        let error = ((p.x - target.0).powi(2) + (p.y - target.1).powi(2)).sqrt();
        assert!(error > 0.0, "reached target after {step} steps");
        assert!(error < previous_error);

        let expected = 0.95_f32.powi(step) * (target.0.powi(2) + target.1.powi(2)).sqrt();
        assert!((error - expected).abs() < 1e-4, "step {step}: {error} vs {expected}");
        previous_error = error;
    }
    assert_eq!(demo.scene().backdrop.position.z, 0.0);
}

#[test]
fn panel_writes_into_live_camera() {
    let mut demo = demo(Settings::default());
    demo.set_camera_axis(Axis::X, 2.5);
    demo.set_camera_axis(Axis::Z, -4.0);
    assert_eq!(demo.camera().position, Vec3::new(2.5, 0.0, -4.0));
}

#[test]
fn camera_moved_onto_target_keeps_a_finite_view() {
    let mut demo = demo(Settings::default());
    for axis in [Axis::X, Axis::Y, Axis::Z] {
        demo.set_camera_axis(axis, 0.0);
    }
    assert_eq!(demo.camera().position, demo.camera().target);
    assert!(demo.camera().view().is_finite());

    demo.orbit_rotate(40.0, 10.0);
    demo.orbit_dolly(1.0);
    assert!(demo.camera().view().is_finite());
}

#[test]
fn orbit_rotation_respects_panel_position() {
    let mut demo = demo(Settings::default());
    demo.set_camera_axis(Axis::Z, 3.0);
    demo.orbit_rotate(100.0, 0.0);
    assert!((demo.camera().position.length() - 3.0).abs() < 1e-4);

    demo.orbit_dolly(-1.0);
    assert!((demo.camera().position.length() - 3.0 * 0.95).abs() < 1e-4);
}
