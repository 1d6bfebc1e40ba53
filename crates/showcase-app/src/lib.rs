// crates/showcase-app/src/lib.rs
// Showcase site widgets - WASM frontend
//
// Review carousel, before/after slider, smooth anchor scrolling and shared
// fragment loading for the marketing pages. Browser glue is compiled only for
// wasm32; the state machines underneath are plain Rust and tested natively.

pub mod carousel;
pub mod config;
pub mod data;
pub mod error;
pub mod fragments;
pub mod listeners;
pub mod scroll;
pub mod slider;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod page;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

// Re-export shared types
pub use showcase_types::*;

pub use config::ShowcaseConfig;
pub use error::{Result, WidgetError};

// ============================================================================
// WASM Entry Point
// ============================================================================

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() {
    // Set up better panic messages
    console_error_panic_hook::set_once();

    // Config first so it can pick the log level
    let (config, config_error) = page::load_config();
    _ = console_log::init_with_level(config.log_level());

    log::info!("Showcase widgets starting...");
    if let Some(e) = config_error {
        log::warn!("Using default config: {}", e);
    }

    if let Err(e) = page::boot(config) {
        log::error!("Failed to start widgets: {}", e);
    }
}
