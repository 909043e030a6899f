use canvas::camera::Vec3;
use canvas::doc::VisualStyle;

use super::*;

fn node(id: &str, ts: Option<i64>, node_type: NodeType) -> Node {
    Node {
        id: id.into(),
        title: format!("N{id}"),
        description: String::new(),
        position: Vec3 { x: 1.0, y: 2.0, z: 3.0 },
        node_type,
        visual_style: VisualStyle::Default,
        avatar: None,
        timestamp: ts,
    }
}

#[test]
fn tab_names_round_trip() {
    assert_eq!(ViewTab::default(), ViewTab::Mind);
    for tab in ViewTab::ALL {
        assert_eq!(tab.as_str().parse::<ViewTab>().unwrap(), tab);
    }
    assert_eq!(ViewTab::Time.label(), "Time");
    assert_eq!("globe".parse::<ViewTab>(), Err(UnknownView("globe".into())));
}

#[test]
fn timestamp_format() {
    // 2024-01-15 10:30:00 UTC
    assert_eq!(format_timestamp(Some(1_705_314_600_000)), "2024-01-15 10:30");
    assert_eq!(format_timestamp(None), NO_TIMESTAMP);
    assert_eq!(format_timestamp(Some(0)), NO_TIMESTAMP);
}

#[test]
fn timeline_sorts_stably_with_missing_as_zero() {
    let nodes = vec![
        node("a", Some(300), NodeType::Generic),
        node("b", None, NodeType::Generic),
        node("c", Some(100), NodeType::Generic),
        node("d", None, NodeType::Generic),
    ];
    let entries = timeline(&nodes);
    let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["b", "d", "c", "a"]);
    let numbers: Vec<usize> = entries.iter().map(|e| e.number).collect();
    assert_eq!(numbers, [1, 2, 3, 4]);
    assert_eq!(entries[0].when, NO_TIMESTAMP);
    assert_eq!(entries[0].title, "Nb");
}

#[test]
fn outline_keeps_collection_order() {
    let nodes = vec![node("2", None, NodeType::Person), node("1", None, NodeType::Event)];
    let rows = outline(&nodes);
    assert_eq!(rows[0].id, "2");
    assert_eq!(rows[0].kind, "Person");
    assert_eq!(rows[1].id, "1");
}

#[test]
fn map_lists_locations_first() {
    let nodes = vec![
        node("1", None, NodeType::Person),
        node("2", None, NodeType::Location),
        node("3", None, NodeType::Object),
        node("4", None, NodeType::Location),
    ];
    let pins = map_plan(&nodes);
    let ids: Vec<&str> = pins.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["2", "4", "1", "3"]);
    assert_eq!((pins[0].x, pins[0].z), (1.0, 3.0));
}
