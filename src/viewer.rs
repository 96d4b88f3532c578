//! Diagram viewer
//!
//! `DiagramViewer` layers interactivity over a pre-rendered single-line
//! diagram: clickable switches, navigation arrows towards neighbouring
//! diagrams, pan/zoom and a maximize toggle.
//!
//! Configuration is a fluent chain of `&mut self` calls. Pointer input is
//! fed in by whoever owns the event listeners (the WASM API in the browser,
//! tests natively); clicks that should reach the host come back as
//! `ViewerEvent`s.

use log::{debug, info, warn};

use crate::error::ViewerError;
use crate::interaction::{ClickGuard, Cursor, GuardOutcome, PanZoom, PointerButton};
use crate::maximize::{MaximizeFrame, MaximizeToggle};
use crate::models::{ArrowStyle, DiagramMetadata, Dimensions, MaximizeStyle, PanZoomOptions, Point, ViewBox};
use crate::navigation::ArrowAnchor;
use crate::surface::Surface;

/// Handle of one interactive element registered by the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(usize);

/// An element that now reacts to pointer input
#[derive(Debug, Clone, PartialEq)]
pub struct BoundElement<E> {
    pub id: BindingId,
    pub element: E,
    /// Whether enter/leave should be reported through `hover`
    pub hover: bool,
}

/// Result of binding switches or arrows
#[derive(Debug, Clone, PartialEq)]
pub struct BindingSummary<E> {
    pub bound: Vec<BoundElement<E>>,
    /// Ids of metadata nodes that could not be bound
    pub missing: Vec<String>,
}

impl<E> Default for BindingSummary<E> {
    fn default() -> Self {
        Self {
            bound: Vec::new(),
            missing: Vec::new(),
        }
    }
}

/// Click reported to the host
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent<E> {
    /// A switch was clicked; `open` is the state it is asked to take
    Switch {
        equipment_id: String,
        open: bool,
        target: E,
    },
    /// A navigation arrow was clicked
    Navigate { next_vid: String },
}

#[derive(Debug, Clone)]
enum Action {
    Switch { equipment_id: String, open: bool },
    Navigate {
        next_vid: String,
        fill: String,
        hover_fill: String,
    },
}

#[derive(Debug, Clone)]
struct Binding<E> {
    element: E,
    action: Action,
    guard: ClickGuard,
}

#[derive(Debug, Clone)]
struct MaximizeControl<E> {
    toggle: MaximizeToggle,
    svg_container_id: String,
    maximize_icon: E,
    minimize_icon: E,
}

/// Interactive single-line diagram viewer over a drawing surface
pub struct DiagramViewer<S: Surface> {
    surface: S,
    canvas: Option<S::Element>,
    size: Option<Dimensions>,
    viewbox: Option<ViewBox>,
    initial_viewbox: Option<ViewBox>,
    metadata: Option<DiagramMetadata>,
    pan_zoom: Option<PanZoom>,
    bindings: Vec<Binding<S::Element>>,
    maximize: Option<MaximizeControl<S::Element>>,
}

fn apply_cursor<S: Surface>(surface: &mut S, element: &S::Element, outcome: GuardOutcome) {
    if let Some(cursor) = outcome.cursor {
        set_or_warn(surface, element, "style", cursor.style());
    }
}

/// Attribute writes triggered by pointer input are best effort
fn set_or_warn<S: Surface>(surface: &mut S, element: &S::Element, name: &str, value: &str) {
    if let Err(e) = surface.set_attribute(element, name, value) {
        warn!("failed to set {}=\"{}\": {}", name, value, e);
    }
}

impl<S: Surface> DiagramViewer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            canvas: None,
            size: None,
            viewbox: None,
            initial_viewbox: None,
            metadata: None,
            pan_zoom: None,
            bindings: Vec::new(),
            maximize: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Root `<svg>` created by `attach`
    pub fn canvas(&self) -> Option<&S::Element> {
        self.canvas.as_ref()
    }

    pub fn size(&self) -> Option<Dimensions> {
        self.size
    }

    /// Viewbox currently shown, after any pan or zoom
    pub fn viewbox(&self) -> Option<ViewBox> {
        self.viewbox
    }

    /// Viewbox given to `set_viewbox`
    pub fn initial_viewbox(&self) -> Option<ViewBox> {
        self.initial_viewbox
    }

    pub fn metadata(&self) -> Option<&DiagramMetadata> {
        self.metadata.as_ref()
    }

    pub fn is_maximized(&self) -> bool {
        self.maximize
            .as_ref()
            .is_some_and(|control| control.toggle.is_maximized())
    }

    pub fn has_pan_zoom(&self) -> bool {
        self.pan_zoom.is_some()
    }

    pub fn is_panning(&self) -> bool {
        self.pan_zoom.as_ref().is_some_and(PanZoom::is_panning)
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Create the drawing canvas inside the container with this id
    pub fn attach(&mut self, container_id: &str) -> Result<&mut Self, ViewerError> {
        let canvas = self.surface.create_canvas(container_id)?;
        info!("viewer attached to '#{}'", container_id);

        self.canvas = Some(canvas);
        // Size and viewbox given before attaching are applied now
        self.apply_size()?;
        self.apply_viewbox()?;
        Ok(self)
    }

    /// Set the canvas pixel size
    pub fn set_size(&mut self, width: f64, height: f64) -> Result<&mut Self, ViewerError> {
        self.size = Some(Dimensions::new(width, height));
        self.apply_size()?;
        Ok(self)
    }

    /// Set the logical window and remember it as the one to restore
    pub fn set_viewbox(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<&mut Self, ViewerError> {
        let viewbox = ViewBox::new(x, y, width, height);
        self.viewbox = Some(viewbox);
        self.initial_viewbox = Some(viewbox);
        self.apply_viewbox()?;
        Ok(self)
    }

    /// Inject the diagram markup and keep its metadata
    pub fn load_diagram(&mut self, svg: &str, metadata: DiagramMetadata) -> Result<&mut Self, ViewerError> {
        let canvas = self.canvas.clone().ok_or(ViewerError::NotAttached)?;

        let appended = self.surface.append_markup(&canvas, svg)?;
        let Some(root) = self.surface.first_descendant(&canvas, "svg") else {
            self.surface.remove(&appended)?;
            return Err(ViewerError::MissingSvgRoot);
        };

        // Symbols drawn on the diagram border must not be clipped
        self.surface.set_attribute(&root, "style", "overflow: visible")?;

        info!("diagram loaded with {} metadata nodes", metadata.nodes.len());
        self.metadata = Some(metadata);
        Ok(self)
    }

    /// Turn on pan and wheel zoom; a second call only replaces the options
    pub fn enable_pan_zoom(&mut self, options: PanZoomOptions) -> Result<&mut Self, ViewerError> {
        if self.canvas.is_none() {
            return Err(ViewerError::NotAttached);
        }

        let content = self.current_viewbox();
        debug!("pan/zoom enabled over {:?}: {:?}", content, options);

        self.pan_zoom = Some(PanZoom::new(options, content));
        Ok(self)
    }

    /// Make every switch of the diagram clickable
    ///
    /// A click reports the switch's equipment id with the negation of its
    /// recorded `open` state; the recorded state itself is left alone.
    pub fn bind_switches(&mut self) -> Result<BindingSummary<S::Element>, ViewerError> {
        let metadata = self.metadata.as_ref().ok_or(ViewerError::NoDiagram)?;
        let mut summary = BindingSummary::default();

        for node in metadata.switches() {
            let Some(element) = self.surface.find_by_id(&node.id) else {
                warn!("switch '{}' has no element in the diagram", node.id);
                summary.missing.push(node.id.clone());
                continue;
            };

            self.surface
                .set_attribute(&element, "style", Cursor::Pointer.style())?;

            let id = BindingId(self.bindings.len());
            self.bindings.push(Binding {
                element: element.clone(),
                action: Action::Switch {
                    equipment_id: node.equipment_id.clone(),
                    open: node.open,
                },
                guard: ClickGuard::new(),
            });
            debug!("switch '{}' bound as {:?}", node.equipment_id, id);

            summary.bound.push(BoundElement {
                id,
                element,
                hover: false,
            });
        }

        info!(
            "{} switches bound, {} missing",
            summary.bound.len(),
            summary.missing.len()
        );
        Ok(summary)
    }

    /// Draw an arrow next to every feeder leading to another diagram
    pub fn add_navigation_arrows(&mut self, style: &ArrowStyle) -> Result<BindingSummary<S::Element>, ViewerError> {
        let metadata = self.metadata.as_ref().ok_or(ViewerError::NoDiagram)?;
        let mut summary = BindingSummary::default();

        for node in metadata.external_navigables() {
            let Some(next_vid) = node.next_vid.clone() else {
                continue;
            };

            let Some(element) = self.surface.find_by_id(&node.id) else {
                warn!("navigable '{}' has no element in the diagram", node.id);
                summary.missing.push(node.id.clone());
                continue;
            };

            let anchor = self
                .surface
                .attribute(&element, "transform")
                .as_deref()
                .and_then(ArrowAnchor::from_transform);
            let (Some(anchor), Some(parent)) = (anchor, self.surface.parent(&element)) else {
                warn!("navigable '{}' has no translate() to anchor an arrow on", node.id);
                summary.missing.push(node.id.clone());
                continue;
            };

            let group = self.surface.create_element(&parent, "g")?;
            let transform = anchor.arrow_transform(node.direction(), style.x_offset, style.y_offset);
            self.surface.set_attribute(&group, "transform", &transform)?;
            // Hover icon first so the regular icon is drawn on top
            self.surface.append_markup(&group, &style.arrow_hover_icon)?;
            self.surface.append_markup(&group, &style.arrow_icon)?;

            let id = BindingId(self.bindings.len());
            debug!("arrow to '{}' at {} bound as {:?}", next_vid, transform, id);
            self.bindings.push(Binding {
                element: group.clone(),
                action: Action::Navigate {
                    next_vid,
                    fill: style.background_color.clone(),
                    hover_fill: style.background_hover_color.clone(),
                },
                guard: ClickGuard::new(),
            });

            summary.bound.push(BoundElement {
                id,
                element: group,
                hover: true,
            });
        }

        info!(
            "{} navigation arrows added, {} missing",
            summary.bound.len(),
            summary.missing.len()
        );
        Ok(summary)
    }

    /// Add the maximize/minimize icons to the SVG container
    ///
    /// Returns the icon canvas; a click on it should call `toggle_maximize`.
    pub fn enable_maximize(
        &mut self,
        svg_container_id: &str,
        maximize_container_id: &str,
        style: &MaximizeStyle,
    ) -> Result<S::Element, ViewerError> {
        if self.canvas.is_none() {
            return Err(ViewerError::NotAttached);
        }

        // Both sizes are captured once, not re-measured on each toggle
        let initial = self.surface.container_dimensions(svg_container_id)?;
        let maximized = self.surface.container_dimensions(maximize_container_id)?;

        let icon_size = style.icon_size();
        let icons = self.surface.create_canvas(svg_container_id)?;
        self.surface
            .set_attribute(&icons, "width", &icon_size.width.to_string())?;
        self.surface
            .set_attribute(&icons, "height", &icon_size.height.to_string())?;
        self.surface.set_attribute(
            &icons,
            "viewBox",
            &ViewBox::new(0.0, 0.0, icon_size.width, icon_size.height).to_attribute(),
        )?;

        let maximize_icon = self.surface.append_markup(&icons, &style.maximize_icon)?;
        let minimize_icon = self.surface.append_markup(&icons, &style.minimize_icon)?;
        for icon in [&maximize_icon, &minimize_icon] {
            self.surface
                .set_attribute(icon, "width", &icon_size.width.to_string())?;
            self.surface
                .set_attribute(icon, "height", &icon_size.height.to_string())?;
        }
        self.surface
            .set_attribute(&minimize_icon, "visibility", "hidden")?;

        self.surface
            .set_container_style(svg_container_id, "position", "relative")?;
        self.surface
            .set_attribute(&icons, "style", &style.overlay_style())?;

        info!(
            "maximize enabled on '#{}': {:?} <-> {:?}",
            svg_container_id, initial, maximized
        );
        self.maximize = Some(MaximizeControl {
            toggle: MaximizeToggle::new(initial, maximized, self.initial_viewbox),
            svg_container_id: svg_container_id.to_string(),
            maximize_icon,
            minimize_icon,
        });
        Ok(icons)
    }

    // ========================================================================
    // Switch and arrow input
    // ========================================================================

    pub fn pointer_down(&mut self, id: BindingId) {
        if let Some(binding) = self.bindings.get_mut(id.0) {
            let outcome = binding.guard.pointer_down();
            apply_cursor(&mut self.surface, &binding.element, outcome);
        }
    }

    pub fn pointer_move(&mut self, id: BindingId) {
        if let Some(binding) = self.bindings.get_mut(id.0) {
            let outcome = binding.guard.pointer_move();
            apply_cursor(&mut self.surface, &binding.element, outcome);
        }
    }

    /// Release over a bound element; a clean primary click yields an event
    pub fn pointer_up(&mut self, id: BindingId, button: PointerButton) -> Option<ViewerEvent<S::Element>> {
        let binding = self.bindings.get_mut(id.0)?;
        let outcome = binding.guard.pointer_up(button);
        apply_cursor(&mut self.surface, &binding.element, outcome);

        if !outcome.fire {
            return None;
        }

        let event = match &binding.action {
            Action::Switch { equipment_id, open } => ViewerEvent::Switch {
                equipment_id: equipment_id.clone(),
                open: !open,
                target: binding.element.clone(),
            },
            Action::Navigate { next_vid, .. } => ViewerEvent::Navigate {
                next_vid: next_vid.clone(),
            },
        };
        debug!("click on {:?}: {:?}", id, event);
        Some(event)
    }

    /// Pointer entered (`true`) or left an arrow: swap its background fill
    pub fn hover(&mut self, id: BindingId, entered: bool) {
        let Some(binding) = self.bindings.get(id.0) else {
            return;
        };
        let Action::Navigate { fill, hover_fill, .. } = &binding.action else {
            return;
        };

        let color = if entered { hover_fill } else { fill };
        if let Some(path) = self.surface.first_descendant(&binding.element, "path") {
            set_or_warn(&mut self.surface, &path, "fill", color);
        }
    }

    // ========================================================================
    // Pan/zoom input
    // ========================================================================

    /// Press on the canvas at `at` (canvas pixels)
    pub fn pan_start(&mut self, button: PointerButton, at: Point) {
        let Some(pan_zoom) = self.pan_zoom.as_mut() else {
            return;
        };

        if pan_zoom.pointer_down(button, at) {
            self.set_canvas_cursor(Cursor::Move);
        }
    }

    pub fn pan_move(&mut self, at: Point) {
        let viewbox = self.current_viewbox();
        let size = self.current_size();

        let moved = self
            .pan_zoom
            .as_mut()
            .and_then(|pan_zoom| pan_zoom.pointer_move(at, viewbox, size));
        if let Some(moved) = moved {
            self.show_viewbox(moved);
        }
    }

    pub fn pan_end(&mut self) {
        if self.pan_zoom.as_mut().is_some_and(PanZoom::pointer_up) {
            self.set_canvas_cursor(Cursor::Default);
        }
    }

    /// Wheel step over the canvas at `at` (canvas pixels)
    pub fn wheel(&mut self, delta_y: f64, at: Point) {
        let viewbox = self.current_viewbox();
        let size = self.current_size();

        let zoomed = self
            .pan_zoom
            .as_ref()
            .and_then(|pan_zoom| pan_zoom.wheel(delta_y, at, viewbox, size));
        if let Some(zoomed) = zoomed {
            self.show_viewbox(zoomed);
        }
    }

    // ========================================================================
    // Maximize input
    // ========================================================================

    /// Switch between the initial and the maximized size
    pub fn toggle_maximize(&mut self) -> Option<MaximizeFrame> {
        let control = self.maximize.as_mut()?;
        let frame = control.toggle.toggle();

        let svg_container_id = control.svg_container_id.clone();
        let (visible_icon, hidden_icon) = if frame.maximize_icon_visible {
            (control.maximize_icon.clone(), control.minimize_icon.clone())
        } else {
            (control.minimize_icon.clone(), control.maximize_icon.clone())
        };

        if let Some(viewbox) = frame.viewbox {
            self.show_viewbox(viewbox);
        }

        let dimensions = frame.dimensions;
        self.size = Some(dimensions);
        if let Err(e) = self.apply_size() {
            warn!("failed to resize canvas: {}", e);
        }
        for (property, value) in [("width", dimensions.width), ("height", dimensions.height)] {
            if let Err(e) = self
                .surface
                .set_container_style(&svg_container_id, property, &format!("{}px", value))
            {
                warn!("failed to resize '#{}': {}", svg_container_id, e);
            }
        }

        set_or_warn(&mut self.surface, &visible_icon, "visibility", "visible");
        set_or_warn(&mut self.surface, &hidden_icon, "visibility", "hidden");

        debug!("maximized: {}", self.is_maximized());
        Some(frame)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn current_viewbox(&self) -> ViewBox {
        self.viewbox.unwrap_or_else(|| {
            let size = self.current_size();
            ViewBox::new(0.0, 0.0, size.width, size.height)
        })
    }

    fn current_size(&self) -> Dimensions {
        self.size.unwrap_or_default()
    }

    fn show_viewbox(&mut self, viewbox: ViewBox) {
        self.viewbox = Some(viewbox);
        if let Err(e) = self.apply_viewbox() {
            warn!("failed to apply viewbox {:?}: {}", viewbox, e);
        }
    }

    fn set_canvas_cursor(&mut self, cursor: Cursor) {
        if let Some(canvas) = &self.canvas {
            set_or_warn(&mut self.surface, canvas, "style", cursor.style());
        }
    }

    fn apply_size(&mut self) -> Result<(), ViewerError> {
        let (Some(canvas), Some(size)) = (&self.canvas, self.size) else {
            return Ok(());
        };

        self.surface
            .set_attribute(canvas, "width", &size.width.to_string())?;
        self.surface
            .set_attribute(canvas, "height", &size.height.to_string())
    }

    fn apply_viewbox(&mut self) -> Result<(), ViewerError> {
        let (Some(canvas), Some(viewbox)) = (&self.canvas, self.viewbox) else {
            return Ok(());
        };

        self.surface
            .set_attribute(canvas, "viewBox", &viewbox.to_attribute())
    }
}
