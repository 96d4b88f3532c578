//! SLD Viewer WASM Module
//!
//! Interactive viewer for pre-rendered single-line electrical diagrams:
//! clickable switches, navigation arrows towards neighbouring diagrams,
//! pan/zoom and a maximize toggle.
//!
//! The interaction model lives in `viewer::DiagramViewer`, generic over a
//! `surface::Surface`; `api` exposes it to JavaScript over the page DOM.

pub mod api;
pub mod error;
pub mod interaction;
pub mod maximize;
pub mod models;
pub mod navigation;
pub mod surface;
pub mod viewer;

// Re-export commonly used types
pub use error::ViewerError;
pub use models::*;
pub use viewer::{BindingId, BindingSummary, BoundElement, DiagramViewer, ViewerEvent};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A logger installed by the host page wins
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("SLD viewer WASM module initialized");
}
