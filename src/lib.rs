#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! A shader-driven sphere with a mirrored mini-sphere and a halftone
//! post-process, rendered with WebGL2 from WebAssembly.
//!
//! Everything outside `wasm` is plain Rust and builds (and tests) on the
//! host; the browser glue only compiles for wasm32.

pub mod camera;
pub mod clock;
pub mod controls;
pub mod demo;
pub mod error;
pub mod geometry;
pub mod panel;
pub mod pointer;
pub mod scene;
pub mod settings;
pub mod viewport;

pub use demo::{Backend, Demo};
pub use error::{ConfigError, DemoError};
pub use settings::{ClockMode, Settings};
pub use viewport::Viewport;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub use wasm::{start_with, stop};

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod composer;
    mod gl;
    mod gui;
    mod input;
    mod mesh;
    mod render;
    mod renderer;
    mod target;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let window = web_sys::window().ok_or(crate::DemoError::NoWindow)?;
        let query = window.location().search()?;
        let (settings, errors) = crate::Settings::from_query(&query);
        for err in errors {
            log::warn!("ignoring setting: {err}");
        }

        // A page without the container (e.g. the test harness) just logs.
        if let Err(e) = render::start(settings) {
            log::error!("demo failed to start: {e}");
        }
        Ok(())
    }

    /// Mount and run the demo with explicit settings.
    pub fn start_with(settings: crate::Settings) -> Result<(), crate::DemoError> {
        render::start(settings)
    }

    /// Cancel the frame loop and take the demo off the page.
    #[wasm_bindgen]
    pub fn stop() {
        render::stop();
    }
}
