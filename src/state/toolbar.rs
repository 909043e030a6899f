//! Mind-map toolbar: active tool selection.
//!
//! The active tool is owned by the project view and lent to the toolbar.
//! Tool names from the UI are validated here; anything other than `pan` or
//! `select` is rejected instead of silently disabling gestures.

#[cfg(test)]
#[path = "toolbar_test.rs"]
mod toolbar_test;

use canvas::input::{Tool, ToolError};

/// Buttons the toolbar can dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolbarCommand {
    SetTool(Tool),
    AddNode,
}

/// Tracks the active tool and turns button presses into commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToolbarController {
    active_tool: Tool,
}

impl ToolbarController {
    #[must_use]
    pub fn new(active_tool: Tool) -> Self {
        Self { active_tool }
    }

    #[must_use]
    pub fn active_tool(&self) -> Tool {
        self.active_tool
    }

    /// Set the active tool.
    pub fn set_tool(&mut self, tool: Tool) -> ToolbarCommand {
        self.active_tool = tool;
        ToolbarCommand::SetTool(tool)
    }

    /// Set the active tool from its UI name.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::InvalidArgument` for unknown names; the active
    /// tool is left unchanged.
    pub fn set_tool_named(&mut self, name: &str) -> Result<ToolbarCommand, ToolError> {
        let tool = name.parse::<Tool>()?;
        Ok(self.set_tool(tool))
    }

    /// The add-node button.
    #[must_use]
    pub fn add_node(&self) -> ToolbarCommand {
        ToolbarCommand::AddNode
    }

    /// Whether the button for `tool` renders as pressed.
    #[must_use]
    pub fn is_active(&self, tool: Tool) -> bool {
        self.active_tool == tool
    }
}
