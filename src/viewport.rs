/// CSS-pixel size of the browser viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Backdrop `resolution` uniform: `(width, height, a1, a2)`.
    ///
    /// `a1`/`a2` rescale UVs so an image of `image_aspect` covers the
    /// viewport without stretching.
    pub fn letterbox(&self, image_aspect: f32) -> [f32; 4] {
        let aspect = self.aspect();
        let (a1, a2) = if aspect > image_aspect {
            (aspect * image_aspect, 1.0)
        } else {
            (1.0, aspect / image_aspect)
        };
        [self.width, self.height, a1, a2]
    }

    /// Drawing-buffer size in device pixels. Never zero on either axis.
    pub fn drawing_buffer(&self, pixel_ratio: f64) -> (u32, u32) {
        // GL takes sizes as i32.
        let scale = |v: f32| ((f64::from(v) * pixel_ratio).floor() as u32).clamp(1, i32::MAX as u32);
        (scale(self.width), scale(self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_viewport_stretches_a1() {
        let r = Viewport::new(1920.0, 1080.0).letterbox(1.0);
        assert_eq!(r[0], 1920.0);
        assert_eq!(r[1], 1080.0);
        assert!((r[2] - 1920.0 / 1080.0).abs() < 1e-6);
        assert_eq!(r[3], 1.0);
    }

    #[test]
    fn tall_and_square_viewports_stretch_a2() {
        let r = Viewport::new(1080.0, 1920.0).letterbox(1.0);
        assert_eq!(r[2], 1.0);
        assert!((r[3] - 1080.0 / 1920.0).abs() < 1e-6);

        let r = Viewport::new(800.0, 800.0).letterbox(1.0);
        assert_eq!((r[2], r[3]), (1.0, 1.0));
    }

    #[test]
    fn drawing_buffer_applies_ratio() {
        assert_eq!(Viewport::new(640.0, 480.0).drawing_buffer(2.0), (1280, 960));
        assert_eq!(Viewport::new(0.0, 0.2).drawing_buffer(2.0), (1, 1));
        let max = i32::MAX as u32;
        assert_eq!(Viewport::new(800.0, 600.0).drawing_buffer(1e30), (max, max));
    }
}
