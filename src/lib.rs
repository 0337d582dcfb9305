mod utils;

pub mod canvas;
pub mod color;
pub mod config;
pub mod input;
pub mod lifecycle;
pub mod particle;
pub mod render;
pub mod scheduler;
pub mod store;
pub mod surface;
pub mod web;

use wasm_bindgen::prelude::*;
use web_sys::console;

pub use canvas::{Canvas, DrawCommand, RecordingCanvas};
pub use config::FieldConfig;
pub use input::{DeviceEvent, EventSource, PointerEvent, PointerState, SyntheticEvents};
pub use lifecycle::{Mount, ParticleBackground};
pub use particle::Particle;
pub use scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
pub use surface::DensityTier;
pub use web::ParticleCanvas;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    // A second call finds the logger already installed; that is fine.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Times the enclosing scope in the devtools console. Only wired into the
/// frame loop with the `frame-timing` feature.
#[must_use = "the timing ends when the timer is dropped"]
pub struct Timer<'a> {
    label: &'a str,
}

impl<'a> Timer<'a> {
    pub fn start(label: &'a str) -> Timer<'a> {
        console::time_with_label(label);
        Timer { label }
    }

    pub fn label(&self) -> &str {
        self.label
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.label);
    }
}
