//! `SldSvg` JavaScript class
//!
//! Thin browser binding over `DiagramViewer<DomSurface>`: decodes option
//! objects, installs DOM listeners that feed pointer input to the viewer, and
//! forwards the resulting clicks to the host's callbacks.
//!
//! Host callbacks run after the viewer borrow is released, so a callback may
//! call back into the same `SldSvg`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Function;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, MouseEvent, WheelEvent};

use super::helpers::{deserialize, metadata_from_js, to_js_error};
use crate::error::ViewerError;
use crate::interaction::PointerButton;
use crate::models::{ArrowStyle, MaximizeStyle, PanZoomOptions, Point};
use crate::surface::DomSurface;
use crate::viewer::{BindingSummary, DiagramViewer, ViewerEvent};
use crate::{wasm_error, wasm_info, wasm_log, wasm_warn};

/// DOM listener kept alive for as long as the viewer
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

#[derive(Default)]
struct HostCallbacks {
    on_switch: Option<Function>,
    on_navigate: Option<Function>,
}

struct Shared {
    viewer: RefCell<DiagramViewer<DomSurface>>,
    callbacks: RefCell<HostCallbacks>,
    listeners: RefCell<Vec<Listener>>,
}

impl Shared {
    /// Hand a click over to the host
    fn dispatch(&self, event: ViewerEvent<Element>) {
        let result = match event {
            ViewerEvent::Switch {
                equipment_id,
                open,
                target,
            } => {
                let Some(callback) = self.callbacks.borrow().on_switch.clone() else {
                    return;
                };
                callback.call3(
                    &JsValue::NULL,
                    &JsValue::from_str(&equipment_id),
                    &JsValue::from_bool(open),
                    &target,
                )
            }
            ViewerEvent::Navigate { next_vid } => {
                let Some(callback) = self.callbacks.borrow().on_navigate.clone() else {
                    return;
                };
                callback.call1(&JsValue::NULL, &JsValue::from_str(&next_vid))
            }
        };

        if let Err(e) = result {
            wasm_error!("host callback failed: {:?}", e);
        }
    }
}

fn pointer_button(event: &Event) -> PointerButton {
    event
        .dyn_ref::<MouseEvent>()
        .map(|mouse| PointerButton::from_dom(mouse.button()))
        .unwrap_or(PointerButton::Other(-1))
}

/// Pointer position relative to the canvas' top-left corner, in pixels
fn canvas_point(canvas: &Element, event: &Event) -> Option<Point> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    let rect = canvas.get_bounding_client_rect();

    Some(Point::new(
        f64::from(mouse.client_x()) - rect.left(),
        f64::from(mouse.client_y()) - rect.top(),
    ))
}

/// Single-line diagram viewer for the browser
#[wasm_bindgen(js_name = SldSvg)]
pub struct SldViewer {
    shared: Rc<Shared>,
}

#[wasm_bindgen(js_class = SldSvg)]
impl SldViewer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<SldViewer, JsValue> {
        let surface = DomSurface::new().map_err(to_js_error)?;

        Ok(SldViewer {
            shared: Rc::new(Shared {
                viewer: RefCell::new(DiagramViewer::new(surface)),
                callbacks: RefCell::new(HostCallbacks::default()),
                listeners: RefCell::new(Vec::new()),
            }),
        })
    }

    /// Bind the drawing canvas to the container with this id
    #[wasm_bindgen(js_name = addTo)]
    pub fn add_to(self, container_id: &str) -> Result<SldViewer, JsValue> {
        wasm_info!("addTo called: '#{}'", container_id);
        self.configure(|viewer| viewer.attach(container_id).map(|_| ()))?;
        Ok(self)
    }

    pub fn size(self, width: f64, height: f64) -> Result<SldViewer, JsValue> {
        self.configure(|viewer| viewer.set_size(width, height).map(|_| ()))?;
        Ok(self)
    }

    pub fn viewbox(self, x: f64, y: f64, width: f64, height: f64) -> Result<SldViewer, JsValue> {
        self.configure(|viewer| viewer.set_viewbox(x, y, width, height).map(|_| ()))?;
        Ok(self)
    }

    /// Load the diagram markup and its metadata (object or JSON text)
    pub fn svg(self, svg: &str, metadata: JsValue) -> Result<SldViewer, JsValue> {
        let metadata = metadata_from_js(metadata)?;
        wasm_info!("svg called: {} bytes, {} nodes", svg.len(), metadata.nodes.len());

        self.configure(|viewer| viewer.load_diagram(svg, metadata).map(|_| ()))?;
        Ok(self)
    }

    #[wasm_bindgen(js_name = panZoom)]
    pub fn pan_zoom(self, options: JsValue) -> Result<SldViewer, JsValue> {
        let options: PanZoomOptions = deserialize(options, "Invalid pan/zoom options")?;
        wasm_log!("panZoom options: {:?}", options);

        let (canvas, newly_enabled) = self.configure(|viewer| {
            let newly_enabled = !viewer.has_pan_zoom();
            viewer.enable_pan_zoom(options)?;
            let canvas = viewer.canvas().cloned().ok_or(ViewerError::NotAttached)?;
            Ok((canvas, newly_enabled))
        })?;

        // Listeners from the first call keep feeding the new options
        if newly_enabled {
            self.wire_pan_zoom(&canvas)?;
        }
        Ok(self)
    }

    /// Call `callback(equipmentId, open, element)` when a switch is clicked
    #[wasm_bindgen(js_name = addCallbackOnSwitches)]
    pub fn add_callback_on_switches(&self, callback: Function) -> Result<(), JsValue> {
        let summary = self.configure(|viewer| viewer.bind_switches())?;
        self.shared.callbacks.borrow_mut().on_switch = Some(callback);
        self.wire_bindings(summary)
    }

    /// Draw arrows towards neighbouring diagrams; `callback(nextVId)` on click
    #[wasm_bindgen(js_name = addNavigationArrows)]
    pub fn add_navigation_arrows(&self, arrow_style: JsValue, callback: Function) -> Result<(), JsValue> {
        let style: ArrowStyle = deserialize(arrow_style, "Invalid arrow style")?;

        let summary = self.configure(|viewer| viewer.add_navigation_arrows(&style))?;
        self.shared.callbacks.borrow_mut().on_navigate = Some(callback);
        self.wire_bindings(summary)
    }

    #[wasm_bindgen(js_name = addMaximize)]
    pub fn add_maximize(
        &self,
        svg_container_id: &str,
        maximize_container_id: &str,
        maximize_style: JsValue,
    ) -> Result<(), JsValue> {
        let style: MaximizeStyle = deserialize(maximize_style, "Invalid maximize style")?;

        let icons = self.configure(|viewer| {
            viewer.enable_maximize(svg_container_id, maximize_container_id, &style)
        })?;

        self.listen(icons.as_ref(), "click", |shared, _event| {
            shared.viewer.borrow_mut().toggle_maximize();
        })
    }

    #[wasm_bindgen(getter, js_name = isMaximized)]
    pub fn is_maximized(&self) -> bool {
        self.shared
            .viewer
            .try_borrow()
            .map(|viewer| viewer.is_maximized())
            .unwrap_or(false)
    }
}

impl SldViewer {
    /// Run one configuration step against the viewer
    fn configure<T>(
        &self,
        step: impl FnOnce(&mut DiagramViewer<DomSurface>) -> Result<T, ViewerError>,
    ) -> Result<T, JsValue> {
        let mut viewer = self.shared.viewer.try_borrow_mut().map_err(|_| {
            wasm_error!("viewer reconfigured while handling an event");
            JsValue::from_str("viewer is busy")
        })?;

        step(&mut viewer).map_err(to_js_error)
    }

    fn listen(
        &self,
        target: &EventTarget,
        kind: &'static str,
        mut handler: impl FnMut(&Shared, Event) + 'static,
    ) -> Result<(), JsValue> {
        let shared: Weak<Shared> = Rc::downgrade(&self.shared);
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(shared) = shared.upgrade() {
                handler(&shared, event);
            }
        });

        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        self.shared.listeners.borrow_mut().push(Listener {
            target: target.clone(),
            kind,
            closure,
        });
        Ok(())
    }

    /// Feed pointer input of freshly bound switches/arrows to the viewer
    fn wire_bindings(&self, summary: BindingSummary<Element>) -> Result<(), JsValue> {
        if !summary.missing.is_empty() {
            wasm_warn!("nodes without a usable element: {}", summary.missing.join(", "));
        }

        for bound in summary.bound {
            let id = bound.id;
            let target: &EventTarget = bound.element.as_ref();

            self.listen(target, "mousedown", move |shared, _event| {
                shared.viewer.borrow_mut().pointer_down(id);
            })?;
            self.listen(target, "mousemove", move |shared, _event| {
                shared.viewer.borrow_mut().pointer_move(id);
            })?;
            self.listen(target, "mouseup", move |shared, event| {
                let clicked = shared
                    .viewer
                    .borrow_mut()
                    .pointer_up(id, pointer_button(&event));
                if let Some(clicked) = clicked {
                    shared.dispatch(clicked);
                }
            })?;

            if bound.hover {
                self.listen(target, "mouseenter", move |shared, _event| {
                    shared.viewer.borrow_mut().hover(id, true);
                })?;
                self.listen(target, "mouseleave", move |shared, _event| {
                    shared.viewer.borrow_mut().hover(id, false);
                })?;
            }
        }
        Ok(())
    }

    /// Pan follows the pointer over the whole window once started on the canvas
    fn wire_pan_zoom(&self, canvas: &Element) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let down_canvas = canvas.clone();
        self.listen(canvas.as_ref(), "mousedown", move |shared, event| {
            if let Some(at) = canvas_point(&down_canvas, &event) {
                shared.viewer.borrow_mut().pan_start(pointer_button(&event), at);
            }
        })?;

        let move_canvas = canvas.clone();
        self.listen(window.as_ref(), "mousemove", move |shared, event| {
            let mut viewer = shared.viewer.borrow_mut();
            if !viewer.is_panning() {
                return;
            }
            if let Some(at) = canvas_point(&move_canvas, &event) {
                event.prevent_default();
                viewer.pan_move(at);
            }
        })?;

        self.listen(window.as_ref(), "mouseup", |shared, _event| {
            shared.viewer.borrow_mut().pan_end();
        })?;

        let wheel_canvas = canvas.clone();
        self.listen(canvas.as_ref(), "wheel", move |shared, event| {
            let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            event.prevent_default();
            if let Some(at) = canvas_point(&wheel_canvas, &event) {
                shared.viewer.borrow_mut().wheel(wheel.delta_y(), at);
            }
        })
    }
}
