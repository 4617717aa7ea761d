//! Demo tunables.
//!
//! Every constant the scene is built from lives here. `Settings::default()`
//! reproduces the stock look; `Settings::from_query` overlays values taken
//! from the page URL (`?dotScale=6&clock=realtime`).

use glam::Vec3;

use crate::error::ConfigError;

/// Upper bound for `pixelRatio`; larger values only exhaust GPU memory.
const MAX_PIXEL_RATIO: f32 = 4.0;

/// How the animation clock advances between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockMode {
    /// Fixed increment per frame. Animation speed follows the refresh rate.
    PerFrame,
    /// Increment scaled by elapsed wall time against a 60 Hz reference frame.
    Realtime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub container_selector: String,
    pub pixel_ratio: f64,
    /// Packed 0xRRGGBB.
    pub background: u32,

    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub camera_z: f32,

    pub time_step: f32,
    pub clock: ClockMode,

    pub sphere_segments: u32,
    pub backdrop_radius: f32,
    pub mirror_radius: f32,
    pub mirror_position: Vec3,
    /// Source aspect used for the backdrop's letterbox correction.
    pub image_aspect: f32,

    pub cube_size: i32,
    pub cube_near: f32,
    pub cube_far: f32,

    pub light_color: u32,
    pub light_intensity: f32,
    pub light_position: Vec3,

    pub dot_scale: f32,
    pub dot_angle: f32,
    pub dot_center: [f32; 2],
    pub dot_tile: [f32; 2],

    pub pointer_ease: f32,
    pub pointer_scale: f32,

    pub slider_min: f32,
    pub slider_max: f32,

    /// Draw the scene straight to the canvas before the composer overdraws it.
    pub direct_render: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            container_selector: "main".to_string(),
            pixel_ratio: 2.0,
            background: 0xffffff,

            fov_deg: 70.0,
            near: 0.1,
            far: 1000.0,
            camera_z: 1.2,

            time_step: 0.01,
            clock: ClockMode::PerFrame,

            sphere_segments: 32,
            backdrop_radius: 1.5,
            mirror_radius: 0.4,
            mirror_position: Vec3::new(0.38, 0.22, 0.7),
            image_aspect: 1.0,

            cube_size: 256,
            cube_near: 0.1,
            cube_far: 10.0,

            light_color: 0x00ffff,
            light_intensity: 0.08,
            light_position: Vec3::new(-100.0, 0.0, -100.0),

            dot_scale: 4.0,
            dot_angle: 1.57,
            dot_center: [0.5, 0.5],
            dot_tile: [256.0, 256.0],

            pointer_ease: 0.05,
            pointer_scale: 1.0 / 3.0,

            slider_min: -5.0,
            slider_max: 5.0,

            direct_render: false,
        }
    }
}

impl Settings {
    /// Overlay defaults with `key=value` pairs from a URL query string.
    ///
    /// A leading `?` is accepted. Bad values are reported per key and the
    /// default for that key is kept, so one typo never blanks the page.
    pub fn from_query(query: &str) -> (Self, Vec<ConfigError>) {
        let mut settings = Self::default();
        let mut errors = Vec::new();

        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let applied = decode(key).and_then(|key| {
                let value = decode(value)?;
                settings.apply(&key, &value)
            });
            if let Err(e) = applied {
                errors.push(e);
            }
        }

        (settings, errors)
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "timeStep" => self.time_step = parse_positive(key, value)?,
            "clock" => {
                self.clock = match value {
                    "perFrame" => ClockMode::PerFrame,
                    "realtime" => ClockMode::Realtime,
                    _ => return Err(ConfigError::invalid(key, value)),
                }
            }
            "dotScale" => self.dot_scale = parse_positive(key, value)?,
            "pixelRatio" => {
                let ratio: f32 = parse_positive(key, value)?;
                if ratio > MAX_PIXEL_RATIO {
                    return Err(ConfigError::invalid(key, value));
                }
                self.pixel_ratio = f64::from(ratio);
            }
            "ease" => {
                let ease: f32 = parse_positive(key, value)?;
                if ease > 1.0 {
                    return Err(ConfigError::invalid(key, value));
                }
                self.pointer_ease = ease;
            }
            "directRender" => {
                self.direct_render = match value {
                    "" | "1" | "true" => true,
                    "0" | "false" => false,
                    _ => return Err(ConfigError::invalid(key, value)),
                }
            }
            "container" if !value.is_empty() => self.container_selector = value.to_string(),
            "container" => return Err(ConfigError::invalid(key, value)),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

/// Form-style query decoding: `+` is a space, `%XX` a byte.
fn decode(raw: &str) -> Result<String, ConfigError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| ConfigError::invalid("query", raw))
}

fn parse_positive<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match value.parse::<T>() {
        Ok(v) if v > T::default() => Ok(v),
        _ => Err(ConfigError::invalid(key, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_is_default() {
        let (s, errors) = Settings::from_query("");
        assert_eq!(s, Settings::default());
        assert!(errors.is_empty());

        let (s, _) = Settings::from_query("?");
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn overlays_known_keys() {
        let (s, errors) =
            Settings::from_query("?timeStep=0.02&clock=realtime&dotScale=6&directRender");
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(s.time_step, 0.02);
        assert_eq!(s.clock, ClockMode::Realtime);
        assert_eq!(s.dot_scale, 6.0);
        assert!(s.direct_render);
    }

    #[test]
    fn bad_values_keep_defaults() {
        let (s, errors) = Settings::from_query("timeStep=-1&ease=2&clock=fast&bogus=3&pixelRatio=1");
        assert_eq!(errors.len(), 4);
        assert_eq!(s.time_step, 0.01);
        assert_eq!(s.pointer_ease, 0.05);
        assert_eq!(s.clock, ClockMode::PerFrame);
        assert_eq!(s.pixel_ratio, 1.0);
        assert!(matches!(errors[3], ConfigError::UnknownKey(ref k) if k == "bogus"));
    }

    #[test]
    fn values_are_percent_decoded() {
        let (s, errors) = Settings::from_query("?container=%23app");
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(s.container_selector, "#app");

        let (s, _) = Settings::from_query("container=main+%3E+.stage&time%53tep=0.5");
        assert_eq!(s.container_selector, "main > .stage");
        assert_eq!(s.time_step, 0.5);

        let (s, errors) = Settings::from_query("container=%FF");
        assert_eq!(errors.len(), 1);
        assert_eq!(s.container_selector, "main");
    }

    #[test]
    fn pixel_ratio_is_capped() {
        let (s, errors) = Settings::from_query("pixelRatio=1e30");
        assert_eq!(errors.len(), 1);
        assert_eq!(s.pixel_ratio, 2.0);

        let (s, errors) = Settings::from_query("pixelRatio=4");
        assert!(errors.is_empty());
        assert_eq!(s.pixel_ratio, 4.0);
    }
}
