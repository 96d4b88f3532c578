//! Pointer interaction: click-vs-drag detection and pan/zoom

pub mod click_guard;
pub mod pan_zoom;

pub use click_guard::{ClickGuard, Cursor, GuardOutcome, PointerButton, PressState};
pub use pan_zoom::{to_viewbox_point, zoom_level, PanZoom};
