//! Drawing surface abstraction
//!
//! The viewer only needs a handful of DOM operations: look elements up, read
//! and write attributes, and graft new SVG content. `Surface` is that seam.
//! `DomSurface` runs against the browser document; `MemorySurface` keeps an
//! in-memory SVG tree so the viewer can be driven without a browser.

pub mod dom;
pub mod memory;

pub use dom::DomSurface;
pub use memory::{MemorySurface, NodeRef};

use std::fmt::Debug;

use crate::error::ViewerError;
use crate::models::Dimensions;

/// SVG namespace for elements created by the viewer
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

pub trait Surface {
    /// Handle to one element of the surface
    type Element: Clone + PartialEq + Debug;

    /// Append an empty `<svg>` canvas to the container with this id
    fn create_canvas(&mut self, container_id: &str) -> Result<Self::Element, ViewerError>;

    /// Append a new, empty SVG element to `parent`
    fn create_element(&mut self, parent: &Self::Element, tag: &str) -> Result<Self::Element, ViewerError>;

    /// Parse a standalone SVG document and append its root element to `parent`
    fn append_markup(&mut self, parent: &Self::Element, markup: &str) -> Result<Self::Element, ViewerError>;

    /// Detach an element and its subtree from the document
    fn remove(&mut self, element: &Self::Element) -> Result<(), ViewerError>;

    fn find_by_id(&self, id: &str) -> Option<Self::Element>;

    /// First element below `element` (not itself) with this tag name
    fn first_descendant(&self, element: &Self::Element, tag: &str) -> Option<Self::Element>;

    fn parent(&self, element: &Self::Element) -> Option<Self::Element>;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str) -> Result<(), ViewerError>;

    /// Rendered pixel size of a container
    fn container_dimensions(&self, container_id: &str) -> Result<Dimensions, ViewerError>;

    /// Set one inline style property of a container
    fn set_container_style(&mut self, container_id: &str, property: &str, value: &str) -> Result<(), ViewerError>;
}
