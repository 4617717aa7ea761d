//! Layout of the debug panel, independent of the DOM that shows it.

use crate::settings::Settings;

/// Camera position component a slider writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderSpec {
    pub axis: Axis,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl SliderSpec {
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone)]
pub struct PanelSpec {
    pub folder: &'static str,
    pub open: bool,
    pub sliders: Vec<SliderSpec>,
}

impl PanelSpec {
    pub fn camera(settings: &Settings) -> Self {
        Self {
            folder: "camera",
            open: true,
            sliders: Axis::ALL
                .into_iter()
                .map(|axis| SliderSpec {
                    axis,
                    min: settings.slider_min,
                    max: settings.slider_max,
                    step: 0.01,
                })
                .collect(),
        }
    }
}
