//! Maximize/restore toggle
//!
//! Both pixel sizes are captured once when the toggle is set up; a toggle
//! switches between them and always brings the configured viewbox back.

use crate::models::{Dimensions, ViewBox};

/// What the surface should show after a toggle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaximizeFrame {
    /// Pixel size for the canvas and its container
    pub dimensions: Dimensions,
    /// Viewbox to restore, when one was configured
    pub viewbox: Option<ViewBox>,
    pub maximize_icon_visible: bool,
    pub minimize_icon_visible: bool,
}

#[derive(Debug, Clone)]
pub struct MaximizeToggle {
    initial: Dimensions,
    maximized: Dimensions,
    restore_viewbox: Option<ViewBox>,
    is_maximized: bool,
}

impl MaximizeToggle {
    pub fn new(initial: Dimensions, maximized: Dimensions, restore_viewbox: Option<ViewBox>) -> Self {
        Self {
            initial,
            maximized,
            restore_viewbox,
            is_maximized: false,
        }
    }

    pub fn is_maximized(&self) -> bool {
        self.is_maximized
    }

    /// Flip between the initial and maximized sizes
    pub fn toggle(&mut self) -> MaximizeFrame {
        self.is_maximized = !self.is_maximized;

        MaximizeFrame {
            dimensions: if self.is_maximized { self.maximized } else { self.initial },
            viewbox: self.restore_viewbox,
            maximize_icon_visible: !self.is_maximized,
            minimize_icon_visible: self.is_maximized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_alternates_sizes_and_icons() {
        let initial = Dimensions::new(700.0, 700.0);
        let maximized = Dimensions::new(1600.0, 900.0);
        let vb = ViewBox::new(0.0, 0.0, 700.0, 700.0);
        let mut toggle = MaximizeToggle::new(initial, maximized, Some(vb));

        let first = toggle.toggle();
        assert!(toggle.is_maximized());
        assert_eq!(first.dimensions, maximized);
        assert!(!first.maximize_icon_visible);
        assert!(first.minimize_icon_visible);
        assert_eq!(first.viewbox, Some(vb));

        let second = toggle.toggle();
        assert!(!toggle.is_maximized());
        assert_eq!(second.dimensions, initial);
        assert!(second.maximize_icon_visible);
        assert!(!second.minimize_icon_visible);
        assert_eq!(second.viewbox, Some(vb));
    }
}
