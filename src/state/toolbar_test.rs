use super::*;

#[test]
fn default_tool_is_pan() {
    let toolbar = ToolbarController::default();
    assert_eq!(toolbar.active_tool(), Tool::Pan);
    assert!(toolbar.is_active(Tool::Pan));
    assert!(!toolbar.is_active(Tool::Select));
}

#[test]
fn set_tool_dispatches_command() {
    let mut toolbar = ToolbarController::default();
    assert_eq!(toolbar.set_tool(Tool::Select), ToolbarCommand::SetTool(Tool::Select));
    assert_eq!(toolbar.active_tool(), Tool::Select);
}

#[test]
fn set_tool_named_accepts_known_names() {
    let mut toolbar = ToolbarController::default();
    assert_eq!(toolbar.set_tool_named("select"), Ok(ToolbarCommand::SetTool(Tool::Select)));
    assert_eq!(toolbar.set_tool_named("pan"), Ok(ToolbarCommand::SetTool(Tool::Pan)));
}

#[test]
fn set_tool_named_rejects_unknown_and_keeps_tool() {
    let mut toolbar = ToolbarController::new(Tool::Select);
    let err = toolbar.set_tool_named("eraser").unwrap_err();
    assert!(matches!(err, ToolError::InvalidArgument(ref name) if name == "eraser"));
    assert_eq!(toolbar.active_tool(), Tool::Select);
}

#[test]
fn add_node_button() {
    assert_eq!(ToolbarController::default().add_node(), ToolbarCommand::AddNode);
}
