//! Error types for viewer configuration
//!
//! Configuration calls fail fast with one of these; pointer handling never
//! fails.

use thiserror::Error;

/// Viewer configuration error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewerError {
    /// No element with this id exists in the page
    #[error("container '#{0}' not found")]
    ContainerNotFound(String),

    /// A drawing operation was requested before `attach`
    #[error("viewer is not attached to a container")]
    NotAttached,

    /// Switches or arrows were requested before a diagram was loaded
    #[error("no diagram loaded")]
    NoDiagram,

    /// Markup could not be parsed as SVG/XML
    #[error("invalid SVG markup: {0}")]
    InvalidMarkup(String),

    /// Injected diagram markup contains no `<svg>` element
    #[error("diagram markup has no <svg> element")]
    MissingSvgRoot,

    /// Metadata document does not have the expected shape
    #[error("invalid diagram metadata: {0}")]
    InvalidMetadata(String),

    /// The browser rejected a DOM operation
    #[error("DOM operation failed: {0}")]
    Dom(String),
}
