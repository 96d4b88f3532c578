// Switch click handling: which nodes get bound and what a click reports

mod common;

use common::{click, drag, loaded_viewer, loaded_viewer_with, metadata, page, DIAGRAM};
use sld_viewer_wasm::interaction::PointerButton;
use sld_viewer_wasm::surface::Surface;
use sld_viewer_wasm::{ComponentType, DiagramViewer, Node, ViewerError, ViewerEvent};

fn switch_ids(viewer: &mut DiagramViewer<sld_viewer_wasm::surface::MemorySurface>) -> Vec<String> {
    let summary = viewer.bind_switches().unwrap();

    summary
        .bound
        .iter()
        .map(|bound| viewer.surface().attribute(&bound.element, "id").unwrap())
        .collect()
}

#[test]
fn test_only_switch_types_are_bound() {
    let mut viewer = loaded_viewer();

    let ids = switch_ids(&mut viewer);
    assert_eq!(ids, vec!["idBREAKER_1", "idDISCONNECTOR_1", "idLBS_1"]);
}

#[test]
fn test_bound_switches_show_pointer_cursor() {
    let mut viewer = loaded_viewer();
    viewer.bind_switches().unwrap();

    let surface = viewer.surface();
    let breaker = surface.find_by_id("idBREAKER_1").unwrap();
    let busbar = surface.find_by_id("idVL1_BBS").unwrap();
    assert_eq!(surface.attribute(&breaker, "style").as_deref(), Some("cursor: pointer"));
    assert_eq!(surface.attribute(&busbar, "style"), None);
}

#[test]
fn test_click_reports_negated_open_state() {
    let mut viewer = loaded_viewer();
    let summary = viewer.bind_switches().unwrap();

    let breaker = &summary.bound[0];
    let disconnector = &summary.bound[1];

    assert_eq!(
        click(&mut viewer, breaker.id),
        Some(ViewerEvent::Switch {
            equipment_id: "BREAKER_1".to_string(),
            open: true,
            target: breaker.element,
        })
    );
    assert_eq!(
        click(&mut viewer, disconnector.id),
        Some(ViewerEvent::Switch {
            equipment_id: "DISCONNECTOR_1".to_string(),
            open: false,
            target: disconnector.element,
        })
    );
}

#[test]
fn test_repeated_clicks_do_not_toggle_recorded_state() {
    let mut viewer = loaded_viewer();
    let summary = viewer.bind_switches().unwrap();
    let breaker = summary.bound[0].id;

    for _ in 0..3 {
        match click(&mut viewer, breaker) {
            Some(ViewerEvent::Switch { open, .. }) => assert!(open),
            other => panic!("expected a switch click, got {:?}", other),
        }
    }

    let recorded = &viewer.metadata().unwrap().nodes[1];
    assert_eq!(recorded.equipment_id, "BREAKER_1");
    assert!(!recorded.open);
}

#[test]
fn test_drag_over_switch_is_not_a_click() {
    let mut viewer = loaded_viewer();
    let summary = viewer.bind_switches().unwrap();
    let breaker = &summary.bound[0];

    assert_eq!(drag(&mut viewer, breaker.id), None);

    // Cursor went to "move" while dragging and back to "pointer" on release
    let style = viewer.surface().attribute(&breaker.element, "style");
    assert_eq!(style.as_deref(), Some("cursor: pointer"));

    // The next clean click goes through again
    assert!(click(&mut viewer, breaker.id).is_some());
}

#[test]
fn test_cursor_is_move_while_dragging() {
    let mut viewer = loaded_viewer();
    let summary = viewer.bind_switches().unwrap();
    let breaker = &summary.bound[0];

    viewer.pointer_down(breaker.id);
    viewer.pointer_move(breaker.id);
    let style = viewer.surface().attribute(&breaker.element, "style");
    assert_eq!(style.as_deref(), Some("cursor: move"));
}

#[test]
fn test_non_primary_release_never_fires() {
    let mut viewer = loaded_viewer();
    let summary = viewer.bind_switches().unwrap();
    let breaker = summary.bound[0].id;

    for button in [PointerButton::Secondary, PointerButton::Auxiliary, PointerButton::Other(3)] {
        viewer.pointer_down(breaker);
        assert_eq!(viewer.pointer_up(breaker, button), None);
    }
}

#[test]
fn test_switch_without_element_is_reported_missing() {
    let mut metadata = metadata();
    metadata.nodes.push(Node {
        id: "idBREAKER_GHOST".to_string(),
        component_type: Some(ComponentType::Breaker),
        equipment_id: "BREAKER_GHOST".to_string(),
        open: false,
        vid: "VL1".to_string(),
        next_vid: None,
        direction: None,
    });

    let mut viewer = loaded_viewer_with(metadata);
    let summary = viewer.bind_switches().unwrap();

    assert_eq!(summary.bound.len(), 3);
    assert_eq!(summary.missing, vec!["idBREAKER_GHOST".to_string()]);
}

#[test]
fn test_binding_before_loading_fails() {
    let mut viewer = DiagramViewer::new(page());
    viewer.attach(common::SLD_CONTAINER).unwrap();

    assert_eq!(viewer.bind_switches().unwrap_err(), ViewerError::NoDiagram);

    viewer.load_diagram(DIAGRAM, metadata()).unwrap();
    assert!(viewer.bind_switches().is_ok());
}
