use glam::{Mat4, Vec3};

#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov_deg,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Y,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection();
    }

    /// Rebuild the cached projection after changing `fov_deg`, `aspect`,
    /// `near` or `far`.
    pub fn update_projection(&mut self) {
        self.projection =
            Mat4::perspective_rh_gl(self.fov_deg.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view(&self) -> Mat4 {
        let offset = self.target - self.position;
        // Sitting on the target: look down -Z rather than at nothing.
        if offset.length_squared() < 1e-12 {
            return Mat4::look_to_rh(self.position, Vec3::NEG_Z, self.up);
        }
        // Looking straight along `up` makes look_at degenerate.
        let forward = offset.normalize();
        let up = if forward.cross(self.up).length_squared() < 1e-8 {
            Vec3::Z
        } else {
            self.up
        };
        Mat4::look_at_rh(self.position, self.target, up)
    }
}

/// One face of a cube map: where it looks and which way is up.
#[derive(Debug, Clone, Copy)]
pub struct CubeFace {
    pub direction: Vec3,
    pub up: Vec3,
}

/// Face order matches `TEXTURE_CUBE_MAP_POSITIVE_X + i`.
pub const CUBE_FACES: [CubeFace; 6] = [
    CubeFace { direction: Vec3::X, up: Vec3::NEG_Y },
    CubeFace { direction: Vec3::NEG_X, up: Vec3::NEG_Y },
    CubeFace { direction: Vec3::Y, up: Vec3::Z },
    CubeFace { direction: Vec3::NEG_Y, up: Vec3::NEG_Z },
    CubeFace { direction: Vec3::Z, up: Vec3::NEG_Y },
    CubeFace { direction: Vec3::NEG_Z, up: Vec3::NEG_Y },
];

/// Six 90° cameras sharing one position, used to capture an environment map.
#[derive(Debug, Clone)]
pub struct CubeCamera {
    pub position: Vec3,
    pub near: f32,
    pub far: f32,
}

impl CubeCamera {
    pub fn new(near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            near,
            far,
        }
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(std::f32::consts::FRAC_PI_2, 1.0, self.near, self.far)
    }

    pub fn face_view(&self, face: usize) -> Mat4 {
        let CubeFace { direction, up } = CUBE_FACES[face];
        Mat4::look_at_rh(self.position, self.position + direction, up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_change_rebuilds_projection() {
        let mut camera = PerspectiveCamera::new(70.0, 1.0, 0.1, 1000.0);
        let before = camera.projection();
        camera.set_aspect(2.0);
        assert_eq!(camera.aspect, 2.0);
        let after = camera.projection();
        assert!((after.x_axis.x * 2.0 - before.x_axis.x).abs() < 1e-6);
        assert_eq!(after.y_axis.y, before.y_axis.y);
    }

    #[test]
    fn view_handles_vertical_look() {
        let mut camera = PerspectiveCamera::new(70.0, 1.0, 0.1, 1000.0);
        camera.position = Vec3::new(0.0, 3.0, 0.0);
        assert!(camera.view().is_finite());
    }

    #[test]
    fn view_on_target_looks_down_negative_z() {
        let camera = PerspectiveCamera::new(70.0, 1.0, 0.1, 1000.0);
        assert_eq!(camera.position, camera.target);
        let view = camera.view();
        assert!(view.is_finite());
        let p = view.transform_point3(Vec3::new(0.0, 0.0, -1.0));
        assert!((p - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn cube_faces_look_down_their_axis() {
        let cube = CubeCamera::new(0.1, 10.0);
        for (i, face) in CUBE_FACES.iter().enumerate() {
            // A point ahead of the face lands in the centre of the view, in front of it.
            let p = cube.face_view(i).transform_point3(face.direction * 2.0);
            assert!(p.x.abs() < 1e-6 && p.y.abs() < 1e-6, "face {i}: {p:?}");
            assert!((p.z + 2.0).abs() < 1e-6);
        }
    }
}
