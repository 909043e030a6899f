//! Project workspace: the single writer of a project's nodes and reports.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pointer events go to the [`NodeInteractionController`], which only
//! describes what should happen. The workspace applies those actions to the
//! [`CanvasViewModel`] (moves, edges), keeps the cursor the host should show,
//! and forwards the rest. Toolbar, node editor and article modal feed into
//! the same place, so every node mutation passes through one owner.

#[cfg(test)]
#[path = "workspace_test.rs"]
mod workspace_test;

use canvas::camera::Point;
use canvas::doc::{Node, NodeDraft, NodePatch, NodeType, VisualStyle};
use canvas::engine::{Action, Cursor, NodeInteractionController};
use canvas::input::{Button, Tool, ToolError};
use canvas::render::ConnectorLine;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::state::articles::{ArticleModal, ArticleSaved};
use crate::state::canvas_view::CanvasViewModel;
use crate::state::node_editor::{NodeEditor, style_patch, type_patch};
use crate::state::toolbar::{ToolbarCommand, ToolbarController};
use crate::state::views::{self, MapPin, OutlineEntry, TimelineEntry, ViewTab};
use crate::storage::KeyValueStore;
use crate::types::{PLACEHOLDER_IMAGE, Project, Report};

/// Reports shown as avatars in the corner stack.
pub const REPORT_AVATAR_LIMIT: usize = 4;

/// One avatar in the report stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportAvatar {
    pub id: String,
    pub title: String,
    pub image: String,
    pub initials: String,
}

pub struct ProjectWorkspace {
    project: Project,
    canvas: CanvasViewModel,
    toolbar: ToolbarController,
    controller: NodeInteractionController,
    cursor: Cursor,
    tab: ViewTab,
    pub editor: NodeEditor,
    pub articles: ArticleModal,
}

impl ProjectWorkspace {
    /// Open `project`, loading its nodes from `storage`.
    #[must_use]
    pub fn open(project: Project, storage: Box<dyn KeyValueStore>, config: &AppConfig) -> Self {
        Self::with_canvas(project, CanvasViewModel::new(storage), config)
    }

    /// Like [`Self::open`] with a prepared view model.
    #[must_use]
    pub fn with_canvas(project: Project, mut canvas: CanvasViewModel, config: &AppConfig) -> Self {
        canvas.open_project(&project.id);
        let mut controller = NodeInteractionController::new();
        controller.hit_radius_px = config.hit_radius_px;
        let toolbar = ToolbarController::new(controller.tool);
        info!(project_id = %project.id, nodes = canvas.nodes().len(), "workspace opened");
        Self {
            project,
            canvas,
            toolbar,
            controller,
            cursor: Cursor::Default,
            tab: ViewTab::default(),
            editor: NodeEditor::new(),
            articles: ArticleModal::new(),
        }
    }

    // =========================================================================
    // PROJECT
    // =========================================================================

    #[must_use]
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Apply the project edit modal.
    pub fn update_project(&mut self, title: &str, description: &str) {
        title.clone_into(&mut self.project.title);
        description.clone_into(&mut self.project.description);
    }

    #[must_use]
    pub fn canvas(&self) -> &CanvasViewModel {
        &self.canvas
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        self.canvas.nodes()
    }

    // =========================================================================
    // TABS
    // =========================================================================

    #[must_use]
    pub fn tab(&self) -> ViewTab {
        self.tab
    }

    /// Switch tabs. Leaving the mind map aborts any gesture in progress.
    pub fn set_tab(&mut self, tab: ViewTab) -> Vec<Action> {
        self.tab = tab;
        if tab == ViewTab::Mind {
            return Vec::new();
        }
        let actions = self.controller.cancel();
        self.apply(&actions);
        actions
    }

    #[must_use]
    pub fn timeline(&self) -> Vec<TimelineEntry> {
        views::timeline(self.canvas.nodes())
    }

    #[must_use]
    pub fn outline(&self) -> Vec<OutlineEntry> {
        views::outline(self.canvas.nodes())
    }

    #[must_use]
    pub fn map_plan(&self) -> Vec<MapPin> {
        views::map_plan(self.canvas.nodes())
    }

    // =========================================================================
    // TOOLBAR
    // =========================================================================

    #[must_use]
    pub fn toolbar(&self) -> &ToolbarController {
        &self.toolbar
    }

    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        let command = self.toolbar.set_tool(tool);
        self.run_toolbar(command).1
    }

    /// Set the tool by UI name.
    ///
    /// # Errors
    ///
    /// `ToolError::InvalidArgument` for unknown names; nothing changes.
    pub fn set_tool_named(&mut self, name: &str) -> Result<Vec<Action>, ToolError> {
        let command = self.toolbar.set_tool_named(name)?;
        Ok(self.run_toolbar(command).1)
    }

    /// The toolbar's add-node button.
    pub fn add_node_from_toolbar(&mut self) -> Option<Node> {
        let command = self.toolbar.add_node();
        self.run_toolbar(command).0
    }

    fn run_toolbar(&mut self, command: ToolbarCommand) -> (Option<Node>, Vec<Action>) {
        match command {
            ToolbarCommand::SetTool(tool) => {
                let actions = self.controller.set_tool(tool);
                self.apply(&actions);
                (None, actions)
            }
            ToolbarCommand::AddNode => (Some(self.canvas.add_node(NodeDraft::default())), Vec::new()),
        }
    }

    // =========================================================================
    // NODES
    // =========================================================================

    pub fn add_node(&mut self, draft: NodeDraft) -> Node {
        self.canvas.add_node(draft)
    }

    pub fn update_node(&mut self, id: &str, patch: &NodePatch) {
        self.canvas.update_node(id, patch);
    }

    pub fn delete_node(&mut self, id: &str) {
        if self.editor.editing_id() == Some(id) {
            self.editor.cancel();
        }
        self.canvas.delete_node(id);
    }

    pub fn set_node_style(&mut self, id: &str, style: VisualStyle) {
        self.canvas.update_node(id, &style_patch(style));
    }

    pub fn set_node_type(&mut self, id: &str, node_type: NodeType) {
        self.canvas.update_node(id, &type_patch(node_type));
    }

    /// Start editing node `id` in place. Unknown ids are ignored.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        let Some(node) = self.canvas.node(id) else {
            return false;
        };
        self.editor.begin(node);
        true
    }

    /// Blur the editor, committing changed fields.
    pub fn commit_edit(&mut self) {
        if let Some((id, patch)) = self.editor.blur() {
            self.canvas.update_node(&id, &patch);
        }
    }

    // =========================================================================
    // POINTER
    // =========================================================================

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.controller.set_viewport(width, height);
    }

    pub fn set_yaw(&mut self, yaw: f64) {
        self.controller.set_yaw(yaw);
    }

    #[must_use]
    pub fn controller(&self) -> &NodeInteractionController {
        &self.controller
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub fn connection_preview(&self) -> Option<ConnectorLine> {
        self.controller.connection_preview()
    }

    pub fn pointer_down(&mut self, screen: Point, button: Button) -> Vec<Action> {
        let actions = self.controller.on_pointer_down(screen, button, self.canvas.nodes());
        self.apply(&actions);
        actions
    }

    pub fn pointer_move(&mut self, screen: Point) -> Vec<Action> {
        let actions = self.controller.on_pointer_move(screen);
        self.apply(&actions);
        actions
    }

    pub fn pointer_up(&mut self, screen: Point, button: Button) -> Vec<Action> {
        let actions = self.controller.on_pointer_up(screen, button, self.canvas.nodes());
        self.apply(&actions);
        actions
    }

    pub fn pointer_leave(&mut self) -> Vec<Action> {
        let actions = self.controller.on_pointer_leave();
        self.apply(&actions);
        actions
    }

    fn apply(&mut self, actions: &[Action]) {
        for action in actions {
            match action {
                Action::NodeMoved { id, position } => {
                    self.canvas.update_node(id, &NodePatch::position(*position));
                }
                Action::ConnectionCompleted { source, target } => {
                    if self.canvas.add_edge(source, target) {
                        info!(%source, %target, "nodes connected");
                    }
                }
                Action::ConnectionAbandoned { source } => {
                    debug!(%source, "connection abandoned");
                }
                Action::SetCursor(cursor) => self.cursor = *cursor,
                Action::ConnectionStarted { .. } | Action::RenderNeeded => {}
            }
        }
    }

    // =========================================================================
    // REPORTS
    // =========================================================================

    pub fn new_article(&mut self) {
        self.articles.open_new();
    }

    /// Open report `id` for editing. Unknown ids are ignored.
    pub fn edit_article(&mut self, id: &str) -> bool {
        let Some(report) = self.project.reports.iter().find(|r| r.id == id) else {
            return false;
        };
        self.articles.open_edit(report);
        true
    }

    /// Save the open article into the project's report list.
    pub fn save_article(&mut self) -> Option<Report> {
        let saved = self.articles.save()?;
        let report = saved.report().clone();
        match saved {
            ArticleSaved::Created(report) => self.project.reports.push(report),
            ArticleSaved::Updated(report) => {
                if let Some(slot) = self.project.reports.iter_mut().find(|r| r.id == report.id) {
                    *slot = report;
                }
            }
        }
        Some(report)
    }

    pub fn delete_report(&mut self, id: &str) -> bool {
        let before = self.project.reports.len();
        self.project.reports.retain(|r| r.id != id);
        self.project.reports.len() != before
    }

    /// The first few reports, stacked newest-on-top.
    #[must_use]
    pub fn report_avatars(&self) -> Vec<ReportAvatar> {
        self.project
            .reports
            .iter()
            .take(REPORT_AVATAR_LIMIT)
            .rev()
            .map(|r| ReportAvatar {
                id: r.id.clone(),
                title: r.title.clone(),
                image: if r.image.is_empty() { PLACEHOLDER_IMAGE.to_string() } else { r.image.clone() },
                initials: r.initials(),
            })
            .collect()
    }
}
