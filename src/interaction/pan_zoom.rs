//! Pan and wheel-zoom of the drawing surface
//!
//! Pointer positions arrive in pixels relative to the canvas' top-left
//! corner. The controller converts them to viewbox units and returns the new
//! viewbox; applying it to the canvas is the caller's job.

use crate::models::{Dimensions, Margins, PanZoomOptions, Point, ViewBox};

use super::click_guard::PointerButton;

/// Zoom level shown by a canvas of `size` pixels over `viewbox`
///
/// The canvas scales the viewbox uniformly (`xMidYMid meet`), so the smaller
/// of the two axis ratios wins.
pub fn zoom_level(viewbox: &ViewBox, size: Dimensions) -> f64 {
    let level = (size.width / viewbox.width).min(size.height / viewbox.height);
    if level.is_finite() && level > 0.0 {
        level
    } else {
        1.0
    }
}

/// Visible window in viewbox units, wider than the viewbox on the axis
/// where the aspect ratios differ
fn visible_window(viewbox: &ViewBox, size: Dimensions, zoom: f64) -> ViewBox {
    let width = size.width / zoom;
    let height = size.height / zoom;

    ViewBox::new(
        viewbox.x + (viewbox.width - width) / 2.0,
        viewbox.y + (viewbox.height - height) / 2.0,
        width,
        height,
    )
}

/// Convert a canvas pixel position to viewbox coordinates
pub fn to_viewbox_point(at: Point, viewbox: &ViewBox, size: Dimensions) -> Point {
    let zoom = zoom_level(viewbox, size);
    let window = visible_window(viewbox, size, zoom);

    Point::new(window.x + at.x / zoom, window.y + at.y / zoom)
}

/// Keep a window origin between the limits that leave `near`/`far` pixels of
/// content visible, centering the content when the limits cross
fn clamp_axis(
    origin: f64,
    extent: f64,
    content_start: f64,
    content_extent: f64,
    near: f64,
    far: f64,
) -> f64 {
    let lowest = content_start - extent + far;
    let highest = content_start + content_extent - near;

    if lowest > highest {
        content_start + (content_extent - extent) / 2.0
    } else {
        origin.max(lowest).min(highest)
    }
}

/// Pan/zoom controller for one canvas
#[derive(Debug, Clone)]
pub struct PanZoom {
    options: PanZoomOptions,
    /// Extent of the diagram, used to keep it on screen
    content: ViewBox,
    /// Last pointer position of an active pan, in pixels
    last: Option<Point>,
}

impl PanZoom {
    pub fn new(options: PanZoomOptions, content: ViewBox) -> Self {
        Self {
            options,
            content,
            last: None,
        }
    }

    pub fn is_panning(&self) -> bool {
        self.last.is_some()
    }

    /// Start a pan on a primary press; returns whether one started
    pub fn pointer_down(&mut self, button: PointerButton, at: Point) -> bool {
        if !self.options.panning || !button.is_primary() {
            return false;
        }

        self.last = Some(at);
        true
    }

    /// Follow the pointer during a pan
    pub fn pointer_move(&mut self, at: Point, viewbox: ViewBox, size: Dimensions) -> Option<ViewBox> {
        let last = self.last?;
        self.last = Some(at);

        let dx = at.x - last.x;
        let dy = at.y - last.y;
        if dx == 0.0 && dy == 0.0 {
            return None;
        }

        let zoom = zoom_level(&viewbox, size);
        let moved = ViewBox::new(
            viewbox.x - dx / zoom,
            viewbox.y - dy / zoom,
            viewbox.width,
            viewbox.height,
        );

        Some(self.restrict(moved, size))
    }

    /// End a pan; returns whether one was active
    pub fn pointer_up(&mut self) -> bool {
        self.last.take().is_some()
    }

    /// Zoom about the pointer for one wheel step
    pub fn wheel(&self, delta_y: f64, at: Point, viewbox: ViewBox, size: Dimensions) -> Option<ViewBox> {
        // Touchpads report horizontal-only scrolls with a zero delta
        if delta_y == 0.0 {
            return None;
        }

        let zoom = zoom_level(&viewbox, size);
        let level = ((1.0 + self.options.zoom_factor).powf(-delta_y / 100.0) * zoom)
            .max(self.options.zoom_min)
            .min(self.options.zoom_max);

        let focus = to_viewbox_point(at, &viewbox, size);
        let amount = zoom / level;

        let zoomed = ViewBox::new(
            focus.x + (viewbox.x - focus.x) * amount,
            focus.y + (viewbox.y - focus.y) * amount,
            viewbox.width * amount,
            viewbox.height * amount,
        );

        Some(self.restrict(zoomed, size))
    }

    /// Apply the configured margins to a candidate viewbox
    pub fn restrict(&self, viewbox: ViewBox, size: Dimensions) -> ViewBox {
        let Some(margins) = self.options.margins else {
            return viewbox;
        };

        let zoom = zoom_level(&viewbox, size);
        let window = visible_window(&viewbox, size, zoom);
        let Margins { top, left, right, bottom } = margins;

        let x = clamp_axis(
            window.x,
            window.width,
            self.content.x,
            self.content.width,
            left / zoom,
            right / zoom,
        );
        let y = clamp_axis(
            window.y,
            window.height,
            self.content.y,
            self.content.height,
            top / zoom,
            bottom / zoom,
        );

        ViewBox::new(
            viewbox.x + (x - window.x),
            viewbox.y + (y - window.y),
            viewbox.width,
            viewbox.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(margins: Option<Margins>) -> PanZoomOptions {
        PanZoomOptions {
            panning: true,
            zoom_min: 0.5,
            zoom_max: 4.0,
            zoom_factor: 0.2,
            margins,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_zoom_level_uses_smaller_ratio() {
        let vb = ViewBox::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(zoom_level(&vb, Dimensions::new(400.0, 100.0)), 2.0);
        assert_eq!(zoom_level(&ViewBox::new(0.0, 0.0, 0.0, 0.0), Dimensions::new(1.0, 1.0)), 1.0);
    }

    #[test]
    fn test_pixel_to_viewbox_with_letterbox() {
        // 200x100 viewbox in a 200x200 canvas: 50px bands above and below
        let vb = ViewBox::new(0.0, 0.0, 200.0, 100.0);
        let p = to_viewbox_point(Point::new(100.0, 50.0), &vb, Dimensions::new(200.0, 200.0));
        assert!(approx(p.x, 100.0));
        assert!(approx(p.y, 0.0));
    }

    #[test]
    fn test_wheel_zoom_keeps_focus_fixed() {
        let vb = ViewBox::new(0.0, 0.0, 100.0, 100.0);
        let size = Dimensions::new(100.0, 100.0);
        let pz = PanZoom::new(options(None), vb);

        let at = Point::new(25.0, 75.0);
        let before = to_viewbox_point(at, &vb, size);
        let zoomed = pz.wheel(-100.0, at, vb, size).unwrap();
        let after = to_viewbox_point(at, &zoomed, size);

        assert!(approx(zoomed.width, 100.0 / 1.2));
        assert!(approx(before.x, after.x));
        assert!(approx(before.y, after.y));
    }

    #[test]
    fn test_wheel_zoom_is_clamped() {
        let vb = ViewBox::new(0.0, 0.0, 100.0, 100.0);
        let size = Dimensions::new(100.0, 100.0);
        let pz = PanZoom::new(options(None), vb);

        let zoomed_in = pz.wheel(-10_000.0, Point::new(50.0, 50.0), vb, size).unwrap();
        assert!(approx(zoom_level(&zoomed_in, size), 4.0));

        let zoomed_out = pz.wheel(10_000.0, Point::new(50.0, 50.0), vb, size).unwrap();
        assert!(approx(zoom_level(&zoomed_out, size), 0.5));

        assert_eq!(pz.wheel(0.0, Point::new(50.0, 50.0), vb, size), None);
    }

    #[test]
    fn test_pan_moves_against_pointer() {
        let vb = ViewBox::new(0.0, 0.0, 50.0, 50.0);
        let size = Dimensions::new(100.0, 100.0);
        let mut pz = PanZoom::new(options(None), vb);

        assert!(pz.pointer_down(PointerButton::Primary, Point::new(10.0, 10.0)));
        let moved = pz.pointer_move(Point::new(30.0, 0.0), vb, size).unwrap();
        assert!(approx(moved.x, -10.0));
        assert!(approx(moved.y, 5.0));
        assert!(pz.pointer_up());
        assert!(!pz.pointer_up());
    }

    #[test]
    fn test_pan_requires_primary_button_and_panning() {
        let vb = ViewBox::new(0.0, 0.0, 50.0, 50.0);
        let mut pz = PanZoom::new(options(None), vb);
        assert!(!pz.pointer_down(PointerButton::Secondary, Point::default()));
        assert_eq!(pz.pointer_move(Point::new(5.0, 5.0), vb, Dimensions::new(50.0, 50.0)), None);

        let mut disabled = PanZoom::new(PanZoomOptions { panning: false, ..options(None) }, vb);
        assert!(!disabled.pointer_down(PointerButton::Primary, Point::default()));
    }

    #[test]
    fn test_margins_keep_content_on_screen() {
        let content = ViewBox::new(0.0, 0.0, 100.0, 100.0);
        let size = Dimensions::new(100.0, 100.0);
        let pz = PanZoom::new(options(Some(Margins::uniform(10.0))), content);

        // Content dragged far right: its left 10px must stay visible
        let restricted = pz.restrict(ViewBox::new(-500.0, 0.0, 100.0, 100.0), size);
        assert!(approx(restricted.x, -90.0));

        // Content dragged far up
        let restricted = pz.restrict(ViewBox::new(0.0, 500.0, 100.0, 100.0), size);
        assert!(approx(restricted.y, 90.0));

        // Within limits nothing changes
        let inside = ViewBox::new(20.0, -30.0, 100.0, 100.0);
        assert_eq!(pz.restrict(inside, size), inside);
    }
}
