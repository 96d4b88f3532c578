//! Models module for the SLD viewer
//!
//! This module contains the data the viewer consumes: diagram metadata,
//! geometry primitives and the option objects supplied by the host page.

pub mod geometry;
pub mod metadata;
pub mod options;

// Re-export commonly used types
pub use geometry::*;
pub use metadata::*;
pub use options::*;
