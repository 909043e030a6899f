use std::collections::HashSet;

use canvas::camera::Vec3;
use canvas::doc::{NodeType, VisualStyle};

use super::*;
use crate::storage::{MemoryStore, load_nodes, nodes_key, save_nodes};

fn fixed_clock() -> i64 {
    1_700_000_000_000
}

fn view_model() -> CanvasViewModel {
    CanvasViewModel::new(Box::new(MemoryStore::new())).with_clock(fixed_clock)
}

fn persisted(vm: &CanvasViewModel, project_id: &str) -> Option<String> {
    vm.storage().get(&nodes_key(project_id)).unwrap()
}

// =============================================================================
// add_node
// =============================================================================

#[test]
fn add_node_assigns_defaults() {
    let mut vm = view_model();
    vm.open_project("p1");
    let node = vm.add_node(NodeDraft::default());
    assert_eq!(node.id, "1700000000000");
    assert_eq!(node.position, Vec3::default());
    assert_eq!(node.node_type, NodeType::Generic);
    assert_eq!(node.visual_style, VisualStyle::Default);
    assert_eq!(node.timestamp, Some(fixed_clock()));
}

#[test]
fn add_node_grows_by_one_with_unique_ids() {
    let mut vm = view_model();
    vm.open_project("p1");
    for expected in 1..=50 {
        vm.add_node(NodeDraft::default());
        assert_eq!(vm.nodes().len(), expected);
    }
    let ids: HashSet<&str> = vm.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids.len(), 50);
}

#[test]
fn add_node_avoids_loaded_ids() {
    let mut storage = MemoryStore::new();
    let existing = Node::from_draft(fixed_clock().to_string(), NodeDraft::default(), 0);
    save_nodes(&mut storage, "p1", &[existing]).unwrap();
    let mut vm = CanvasViewModel::new(Box::new(storage)).with_clock(fixed_clock);
    vm.open_project("p1");
    let node = vm.add_node(NodeDraft::default());
    assert_ne!(node.id, fixed_clock().to_string());
    assert_eq!(vm.nodes().len(), 2);
}

#[test]
fn add_node_persists_whole_collection() {
    let mut vm = view_model();
    vm.open_project("p1");
    vm.add_node(NodeDraft { title: Some("A".into()), ..Default::default() });
    vm.add_node(NodeDraft { title: Some("B".into()), ..Default::default() });
    let raw = persisted(&vm, "p1").unwrap();
    let saved: Vec<Node> = serde_json::from_str(&raw).unwrap();
    assert_eq!(saved, vm.nodes());
}

#[test]
fn add_node_without_project_stays_in_memory() {
    let mut vm = view_model();
    vm.add_node(NodeDraft::default());
    assert_eq!(vm.nodes().len(), 1);
    assert!(vm.project_id().is_none());
}

// =============================================================================
// update_node / delete_node
// =============================================================================

#[test]
fn update_node_merges_and_persists() {
    let mut vm = view_model();
    vm.open_project("p1");
    let node = vm.add_node(NodeDraft::default());
    vm.update_node(&node.id, &NodePatch { title: Some("Renamed".into()), ..Default::default() });
    assert_eq!(vm.node(&node.id).unwrap().title, "Renamed");
    assert!(persisted(&vm, "p1").unwrap().contains("Renamed"));
}

#[test]
fn update_unknown_node_changes_nothing() {
    let mut vm = view_model();
    vm.open_project("p1");
    vm.add_node(NodeDraft::default());
    let before_nodes = serde_json::to_string(vm.nodes()).unwrap();
    let before_saved = persisted(&vm, "p1");
    vm.update_node("ghost", &NodePatch::position(Vec3::new(1.0, 2.0, 3.0)));
    assert_eq!(serde_json::to_string(vm.nodes()).unwrap(), before_nodes);
    assert_eq!(persisted(&vm, "p1"), before_saved);
}

#[test]
fn delete_node_removes_node_and_edges() {
    let mut vm = view_model();
    vm.open_project("p1");
    let a = vm.add_node(NodeDraft::default());
    let b = vm.add_node(NodeDraft::default());
    let c = vm.add_node(NodeDraft::default());
    assert!(vm.add_edge(&a.id, &b.id));
    assert!(vm.add_edge(&b.id, &c.id));
    vm.delete_node(&b.id);
    assert!(vm.node(&b.id).is_none());
    assert!(vm.edges().is_empty());
    assert!(!persisted(&vm, "p1").unwrap().contains(&b.id));
}

#[test]
fn delete_unknown_node_is_noop() {
    let mut vm = view_model();
    vm.open_project("p1");
    vm.add_node(NodeDraft::default());
    vm.delete_node("ghost");
    assert_eq!(vm.nodes().len(), 1);
}

// =============================================================================
// Edges
// =============================================================================

#[test]
fn edges_reject_unknown_self_and_duplicates() {
    let mut vm = view_model();
    let a = vm.add_node(NodeDraft::default());
    let b = vm.add_node(NodeDraft::default());
    assert!(!vm.add_edge(&a.id, "ghost"));
    assert!(!vm.add_edge(&a.id, &a.id));
    assert!(vm.add_edge(&a.id, &b.id));
    assert!(!vm.add_edge(&a.id, &b.id));
    assert!(vm.add_edge(&b.id, &a.id));
    assert_eq!(vm.edges().len(), 2);
    assert!(vm.remove_edge(&a.id, &b.id));
    assert!(!vm.remove_edge(&a.id, &b.id));
    assert_eq!(vm.edges(), &[Edge::new(b.id.clone(), a.id.clone())]);
}

// =============================================================================
// open_project
// =============================================================================

#[test]
fn open_project_overwrites_memory() {
    let mut vm = view_model();
    vm.open_project("p1");
    vm.add_node(NodeDraft { title: Some("only in p1".into()), ..Default::default() });
    vm.open_project("p2");
    assert!(vm.nodes().is_empty());
    vm.open_project("p1");
    assert_eq!(vm.nodes().len(), 1);
    assert_eq!(vm.nodes()[0].title, "only in p1");
}

#[test]
fn reopening_same_project_keeps_edges() {
    let mut vm = view_model();
    vm.open_project("p1");
    let a = vm.add_node(NodeDraft::default());
    let b = vm.add_node(NodeDraft::default());
    vm.add_edge(&a.id, &b.id);
    vm.open_project("p1");
    assert_eq!(vm.edges().len(), 1);
}

#[test]
fn open_project_with_malformed_state_is_empty() {
    let mut storage = MemoryStore::new();
    storage.set(&nodes_key("p1"), "not-json").unwrap();
    let mut vm = CanvasViewModel::new(Box::new(storage));
    vm.open_project("p1");
    assert!(vm.nodes().is_empty());
}

#[test]
fn memory_state_discarded_on_switch_not_merged() {
    let mut storage = MemoryStore::new();
    let saved = Node::from_draft("saved".into(), NodeDraft::default(), 0);
    save_nodes(&mut storage, "p2", &[saved]).unwrap();
    let mut vm = CanvasViewModel::new(Box::new(storage)).with_clock(fixed_clock);
    vm.add_node(NodeDraft::default());
    vm.open_project("p2");
    let ids: Vec<&str> = vm.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, ["saved"]);
}

// =============================================================================
// non-finite positions
// =============================================================================

#[test]
fn non_finite_position_patch_is_ignored() {
    let mut vm = view_model();
    vm.open_project("p1");
    vm.add_node(NodeDraft::default());
    let b = vm.add_node(NodeDraft { position: Some(Vec3::new(4.0, 0.0, 2.0)), ..Default::default() });
    let before = persisted(&vm, "p1");

    vm.update_node(&b.id, &NodePatch::position(Vec3::new(f64::NAN, 0.0, 0.0)));
    let patch = NodePatch { title: Some("Far".into()), position: Some(Vec3::new(0.0, 0.0, f64::INFINITY)), ..Default::default() };
    assert!(!vm.try_update_node(&b.id, &patch).unwrap());

    assert_eq!(vm.node(&b.id).unwrap().position, Vec3::new(4.0, 0.0, 2.0));
    assert_eq!(vm.node(&b.id).unwrap().title, b.title);
    assert_eq!(persisted(&vm, "p1"), before);
    assert_eq!(load_nodes(vm.storage(), "p1").len(), 2);
}

#[test]
fn non_finite_draft_position_falls_back_to_origin() {
    let mut vm = view_model();
    vm.open_project("p1");
    let node = vm.add_node(NodeDraft { position: Some(Vec3::new(f64::NAN, 1.0, 1.0)), ..Default::default() });
    assert_eq!(node.position, Vec3::default());
    let reloaded = load_nodes(vm.storage(), "p1");
    assert_eq!(reloaded, [node]);
}

// =============================================================================
// save failures
// =============================================================================

/// Store whose writes always fail.
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("read-only store")))
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("read-only store")))
    }
}

#[test]
fn try_mutations_report_failed_saves() {
    let mut vm = CanvasViewModel::new(Box::new(ReadOnlyStore)).with_clock(fixed_clock);
    vm.open_project("p1");

    assert!(matches!(vm.try_add_node(NodeDraft::default()), Err(StorageError::Io(_))));
    assert_eq!(vm.nodes().len(), 1);
    let id = vm.nodes()[0].id.clone();

    let patch = NodePatch { title: Some("Renamed".into()), ..Default::default() };
    assert!(vm.try_update_node(&id, &patch).is_err());
    assert!(matches!(vm.try_delete_node(&id), Err(StorageError::Io(_))));
    assert!(vm.nodes().is_empty());
}

#[test]
fn try_mutations_on_unknown_ids_skip_the_save() {
    let mut vm = CanvasViewModel::new(Box::new(ReadOnlyStore)).with_clock(fixed_clock);
    vm.open_project("p1");
    let patch = NodePatch { title: Some("x".into()), ..Default::default() };
    assert!(!vm.try_update_node("missing", &patch).unwrap());
    assert!(!vm.try_delete_node("missing").unwrap());
}

#[test]
fn plain_mutations_log_failed_saves_and_continue() {
    let mut vm = CanvasViewModel::new(Box::new(ReadOnlyStore)).with_clock(fixed_clock);
    vm.open_project("p1");
    let node = vm.add_node(NodeDraft::default());
    vm.delete_node(&node.id);
    assert!(vm.nodes().is_empty());
}
