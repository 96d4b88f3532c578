//! SLD Viewer WASM API
//!
//! This module provides the JavaScript-facing API of the viewer.
//!
//! # Module Structure
//!
//! - `helpers`: console logging, option decoding and error conversion
//! - `viewer`: the `SldSvg` class and its DOM listener wiring

pub mod helpers;
pub mod viewer;

pub use viewer::SldViewer;
