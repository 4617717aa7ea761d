use crate::settings::ClockMode;

/// Duration of one frame at the reference refresh rate, in milliseconds.
const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;
/// Longest gap `Realtime` will account for, e.g. after a background tab resumes.
const MAX_GAP_MS: f64 = 250.0;

/// Animation clock feeding the backdrop's `uTime` uniform.
#[derive(Debug, Clone)]
pub struct Clock {
    mode: ClockMode,
    step: f32,
    elapsed: f32,
    last_timestamp: Option<f64>,
}

impl Clock {
    pub fn new(mode: ClockMode, step: f32) -> Self {
        Self {
            mode,
            step,
            elapsed: 0.0,
            last_timestamp: None,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance by one frame. `timestamp_ms` is the frame callback's timestamp
    /// and only matters in `Realtime` mode.
    pub fn tick(&mut self, timestamp_ms: f64) -> f32 {
        let increment = match self.mode {
            ClockMode::PerFrame => self.step,
            ClockMode::Realtime => {
                // The first frame has no predecessor; count it as one reference frame.
                let gap = self
                    .last_timestamp
                    .map_or(REFERENCE_FRAME_MS, |last| timestamp_ms - last)
                    .clamp(0.0, MAX_GAP_MS);
                (f64::from(self.step) * gap / REFERENCE_FRAME_MS) as f32
            }
        };
        self.last_timestamp = Some(timestamp_ms);
        self.elapsed += increment;
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_frame_ignores_timestamps() {
        let mut clock = Clock::new(ClockMode::PerFrame, 0.01);
        clock.tick(0.0);
        clock.tick(5000.0);
        clock.tick(5000.0);
        assert!((clock.elapsed() - 0.03).abs() < 1e-6);
    }

    #[test]
    fn realtime_scales_with_gap() {
        let mut clock = Clock::new(ClockMode::Realtime, 0.01);
        clock.tick(1000.0);
        assert!((clock.elapsed() - 0.01).abs() < 1e-6);
        // two reference frames
        clock.tick(1000.0 + 2.0 * REFERENCE_FRAME_MS);
        assert!((clock.elapsed() - 0.03).abs() < 1e-6);
    }

    #[test]
    fn realtime_never_runs_backwards_or_jumps() {
        let mut clock = Clock::new(ClockMode::Realtime, 0.01);
        clock.tick(1000.0);
        let before = clock.elapsed();
        clock.tick(900.0);
        assert_eq!(clock.elapsed(), before);

        clock.tick(60_000.0);
        let max = (0.01 * MAX_GAP_MS / REFERENCE_FRAME_MS) as f32;
        assert!((clock.elapsed() - before - max).abs() < 1e-5);
    }
}
