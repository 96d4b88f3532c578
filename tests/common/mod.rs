// Shared fixtures for the viewer integration tests
#![allow(dead_code)]

use sld_viewer_wasm::interaction::PointerButton;
use sld_viewer_wasm::surface::{MemorySurface, NodeRef};
use sld_viewer_wasm::{
    ArrowStyle, BindingId, DiagramMetadata, DiagramViewer, Dimensions, MaximizeStyle, ViewerEvent,
};

pub const DIAGRAM: &str = include_str!("../fixtures/substation.svg");
pub const METADATA: &str = include_str!("../fixtures/substation_metadata.json");
pub const ARROW_ICON: &str = include_str!("../fixtures/arrow.svg");
pub const ARROW_HOVER_ICON: &str = include_str!("../fixtures/arrow-hover.svg");
pub const MAXIMIZE_ICON: &str = include_str!("../fixtures/maximize.svg");
pub const MINIMIZE_ICON: &str = include_str!("../fixtures/minimize.svg");

pub const SLD_CONTAINER: &str = "sld-container";
pub const SVG_CONTAINER: &str = "svg-container";
pub const MAXIMIZE_CONTAINER: &str = "maximize-container";

/// Page with the three containers the host uses
pub fn page() -> MemorySurface {
    MemorySurface::new()
        .with_container(SLD_CONTAINER, Dimensions::new(700.0, 700.0))
        .with_container(SVG_CONTAINER, Dimensions::new(700.0, 700.0))
        .with_container(MAXIMIZE_CONTAINER, Dimensions::new(1600.0, 900.0))
}

pub fn metadata() -> DiagramMetadata {
    DiagramMetadata::from_json(METADATA).unwrap()
}

/// Viewer configured the way the demo page does it
pub fn loaded_viewer_with(metadata: DiagramMetadata) -> DiagramViewer<MemorySurface> {
    let mut viewer = DiagramViewer::new(page());
    viewer
        .attach(SLD_CONTAINER)
        .unwrap()
        .set_size(700.0, 700.0)
        .unwrap()
        .set_viewbox(0.0, 0.0, 700.0, 700.0)
        .unwrap()
        .load_diagram(DIAGRAM, metadata)
        .unwrap();
    viewer
}

pub fn loaded_viewer() -> DiagramViewer<MemorySurface> {
    loaded_viewer_with(metadata())
}

pub fn arrow_style() -> ArrowStyle {
    ArrowStyle {
        arrow_icon: ARROW_ICON.to_string(),
        arrow_hover_icon: ARROW_HOVER_ICON.to_string(),
        background_color: "#8BE8CB".to_string(),
        background_hover_color: "#61C9A8".to_string(),
        x_offset: 22.0,
        y_offset: 65.0,
    }
}

pub fn maximize_style() -> MaximizeStyle {
    MaximizeStyle {
        maximize_icon: MAXIMIZE_ICON.to_string(),
        minimize_icon: MINIMIZE_ICON.to_string(),
        icon_width: 24.0,
        icon_height: 24.0,
        right_offset: 5.0,
        bottom_offset: 5.0,
    }
}

/// Press and release the primary button without moving
pub fn click(viewer: &mut DiagramViewer<MemorySurface>, id: BindingId) -> Option<ViewerEvent<NodeRef>> {
    viewer.pointer_down(id);
    viewer.pointer_up(id, PointerButton::Primary)
}

/// Press, move, then release the primary button
pub fn drag(viewer: &mut DiagramViewer<MemorySurface>, id: BindingId) -> Option<ViewerEvent<NodeRef>> {
    viewer.pointer_down(id);
    viewer.pointer_move(id);
    viewer.pointer_up(id, PointerButton::Primary)
}
