use canvas::camera::Vec3;

use super::*;

fn node() -> Node {
    Node {
        id: "7".into(),
        title: "Suspect".into(),
        description: "Seen at 9pm".into(),
        position: Vec3::default(),
        node_type: NodeType::Person,
        visual_style: VisualStyle::Default,
        avatar: None,
        timestamp: None,
    }
}

#[test]
fn blur_without_changes_yields_nothing() {
    let mut editor = NodeEditor::new();
    editor.begin(&node());
    assert!(editor.is_editing());
    assert_eq!(editor.blur(), None);
    assert!(!editor.is_editing());
}

#[test]
fn blur_commits_only_changed_fields() {
    let mut editor = NodeEditor::new();
    editor.begin(&node());
    editor.set_title("Witness");
    let (id, patch) = editor.blur().unwrap();
    assert_eq!(id, "7");
    assert_eq!(patch.title.as_deref(), Some("Witness"));
    assert_eq!(patch.description, None);
}

#[test]
fn edit_back_to_original_is_no_change() {
    let mut editor = NodeEditor::new();
    editor.begin(&node());
    editor.set_description("changed");
    editor.set_description("Seen at 9pm");
    assert_eq!(editor.blur(), None);
}

#[test]
fn setters_ignored_when_idle() {
    let mut editor = NodeEditor::new();
    editor.set_title("x");
    assert_eq!(editor.title(), None);
    assert_eq!(editor.blur(), None);
}

#[test]
fn cancel_discards_buffers() {
    let mut editor = NodeEditor::new();
    editor.begin(&node());
    editor.set_title("Other");
    editor.cancel();
    assert_eq!(editor.blur(), None);
}

#[test]
fn begin_copies_node_text() {
    let mut editor = NodeEditor::new();
    editor.begin(&node());
    assert_eq!(editor.editing_id(), Some("7"));
    assert_eq!(editor.title(), Some("Suspect"));
    assert_eq!(editor.description(), Some("Seen at 9pm"));
}

#[test]
fn tooltip_patches() {
    assert_eq!(style_patch(VisualStyle::Postit).visual_style, Some(VisualStyle::Postit));
    assert_eq!(type_patch(NodeType::Location).node_type, Some(NodeType::Location));
    assert!(style_patch(VisualStyle::Compact).title.is_none());
}
