//! The level-transition state machine.
//!
//! The controller owns the tree and the navigation state. State changes
//! happen as soon as an expand or collapse is requested; the visible cells
//! keep showing the old level, with the selected cell highlighted, until the
//! transition completes. Completion re-renders the grid for the new level and
//! then fires the caller's hook.
//!
//! ```ignore
//! let mut controller = HierarchyController::new(roots, GridSurface::default());
//! controller.load()?;
//! controller.select(0, || println!("expanded"), || println!("collapsed"))?;
//! // every frame:
//! controller.advance(Instant::now())?;
//! ```

use std::time::Instant;

use log::{debug, trace};

use crate::cell::CellData;
use crate::config::NavigatorConfig;
use crate::error::{HierarchyError, Result};
use crate::node::Node;
use crate::provider::{BaseCellProvider, CellProvider};
use crate::surface::{GridSurface, Surface};
use crate::theme::Theme;
use crate::transition::{Completion, Transition, TransitionKind};

/// Where the user is in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationState {
    /// Index selected at each level on the way down from the root.
    path: Vec<usize>,
    /// Highlighted index at the current level.
    active_index: Option<usize>,
}

impl NavigationState {
    /// Current depth. 0 is the root level.
    pub fn hierarchy_level(&self) -> usize {
        self.path.len()
    }

    pub fn is_at_root(&self) -> bool {
        self.path.is_empty()
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }
}

/// Result of an expand or collapse request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The transition is animating; its hook fires on completion.
    Started,
    /// The transition completed before the call returned and its hook fired.
    Completed,
    /// Collapse at the root level. Nothing changed; the hook fired.
    BoundaryNoOp,
    /// Another transition was in flight. Nothing changed; the hook fired.
    Ignored,
}

/// Result of a tap on a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Expand(TransitionOutcome),
    Collapse(TransitionOutcome),
    /// A leaf was selected at the root level. There is no parent to collapse
    /// to, so the leaf is reported as the user's final choice.
    Final { index: usize, name: String },
    /// Another transition was in flight. Nothing changed.
    Ignored,
}

/// Drill-down navigator over a tree of [`Node`]s.
pub struct HierarchyController<S: Surface = GridSurface> {
    roots: Vec<Node>,
    state: NavigationState,
    provider: Box<dyn CellProvider>,
    registered: bool,
    surface: S,
    config: NavigatorConfig,
    in_flight: Option<Transition>,
}

impl<S: Surface> HierarchyController<S> {
    /// Create a controller at the root level, using the built-in cell type.
    pub fn new(hierarchy_items: Vec<Node>, surface: S) -> Self {
        Self {
            roots: hierarchy_items,
            state: NavigationState::default(),
            provider: Box::new(BaseCellProvider),
            registered: false,
            surface,
            config: NavigatorConfig::default(),
            in_flight: None,
        }
    }

    pub fn with_config(mut self, config: NavigatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Substitute the cell type. Registration happens on the next render.
    pub fn with_cell_provider(mut self, provider: impl CellProvider + 'static) -> Self {
        self.provider = Box::new(provider);
        self.registered = false;
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Root nodes, including dynamic nodes inserted since construction.
    pub fn hierarchy_items(&self) -> &[Node] {
        &self.roots
    }

    /// Nodes visible at the current level.
    pub fn current_items(&self) -> &[Node] {
        level_items(&self.roots, &self.state.path)
    }

    pub fn hierarchy_level(&self) -> usize {
        self.state.hierarchy_level()
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.config.theme
    }

    pub fn reuse_identifier(&self) -> &str {
        self.provider.reuse_identifier()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Names from the root down to the current level's parent.
    pub fn breadcrumbs(&self) -> Vec<&str> {
        let mut items = self.roots.as_slice();
        let mut names = Vec::with_capacity(self.state.path.len());
        for &index in &self.state.path {
            let Some(node) = items.get(index) else { break };
            names.push(node.name.as_str());
            items = &node.children;
        }
        names
    }

    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.config.reduced_motion = enabled;
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Register the cell type and render the current level.
    pub fn load(&mut self) -> Result<()> {
        self.render()
    }

    /// Re-render the grid for the current level.
    ///
    /// Fails if the cell provider did not register its reuse identifier.
    pub fn render(&mut self) -> Result<()> {
        self.ensure_registered()?;

        let identifier = self.provider.reuse_identifier().to_string();
        let level = self.state.hierarchy_level();
        let items = level_items(&self.roots, &self.state.path);

        let mut cells = Vec::with_capacity(items.len());
        for (index, node) in items.iter().enumerate() {
            let mut cell = self
                .surface
                .dequeue(&identifier)
                .ok_or_else(|| HierarchyError::unregistered(&identifier))?;
            let active = self.state.active_index == Some(index);
            cell.configure(CellData::from_node(node, level, active));
            cell.set_theme(self.config.theme.clone());
            cells.push(cell);
        }

        trace!("Rendering {} cells at level {level}", cells.len());
        self.surface.display(&identifier, cells);
        Ok(())
    }

    fn ensure_registered(&mut self) -> Result<()> {
        if !self.registered {
            self.provider.register(&mut self.surface);
            self.registered = true;
        }
        let identifier = self.provider.reuse_identifier();
        if !self.surface.is_registered(identifier) {
            return Err(HierarchyError::unregistered(identifier));
        }
        Ok(())
    }

    /// Replace the theme and push it to every live cell.
    pub fn set_theme(&mut self, theme: Theme) {
        for cell in self.surface.visible_cells_mut() {
            cell.set_theme(theme.clone());
        }
        self.config.theme = theme;
    }

    // -------------------------------------------------------------------------
    // Selection and transitions
    // -------------------------------------------------------------------------

    /// Handle a tap on the cell at `index`.
    ///
    /// A node with children expands. A leaf collapses to the parent level,
    /// except at the root where it is reported as [`Selection::Final`]. Only
    /// the hook matching the transition taken is invoked. A tap during a
    /// transition is dropped along with both hooks.
    pub fn select(
        &mut self,
        index: usize,
        on_expand: impl FnOnce() + 'static,
        on_collapse: impl FnOnce() + 'static,
    ) -> Result<Selection> {
        if self.is_busy() {
            debug!("Ignoring selection of {index}: transition in flight");
            return Ok(Selection::Ignored);
        }

        let node = self.node_at(index)?;
        if !node.is_leaf() {
            return self.expand(index, on_expand).map(Selection::Expand);
        }

        if self.state.is_at_root() {
            let name = node.name.clone();
            debug!("Final selection of '{name}' at root level");
            self.highlight(Some(index));
            return Ok(Selection::Final { index, name });
        }

        self.collapse(index, on_collapse).map(Selection::Collapse)
    }

    /// Descend into the children of the node at `index`.
    ///
    /// The hook fires exactly once: when the transition completes, or right
    /// away if another transition is in flight.
    pub fn expand(
        &mut self,
        index: usize,
        completion: impl FnOnce() + 'static,
    ) -> Result<TransitionOutcome> {
        if self.is_busy() {
            debug!("Ignoring expand of {index}: transition in flight");
            completion();
            return Ok(TransitionOutcome::Ignored);
        }

        let node = self.node_at(index)?;
        if node.is_leaf() {
            return Err(HierarchyError::NotExpandable {
                name: node.name.clone(),
            });
        }
        debug!(
            "Expanding '{}' at level {}",
            node.name,
            self.state.hierarchy_level()
        );

        self.highlight(Some(index));
        self.state.path.push(index);
        self.state.active_index = None;
        self.begin(TransitionKind::Expand, Box::new(completion))
    }

    /// Ascend to the parent level from the cell at `index`.
    ///
    /// At the root level, or while another transition is in flight, this is
    /// a no-op, but the hook still fires once.
    pub fn collapse(
        &mut self,
        index: usize,
        completion: impl FnOnce() + 'static,
    ) -> Result<TransitionOutcome> {
        if self.is_busy() {
            debug!("Ignoring collapse from {index}: transition in flight");
            completion();
            return Ok(TransitionOutcome::Ignored);
        }

        self.node_at(index)?;
        if self.state.is_at_root() {
            debug!("Collapse at root level is a no-op");
            completion();
            return Ok(TransitionOutcome::BoundaryNoOp);
        }
        debug!("Collapsing level {}", self.state.hierarchy_level());

        self.highlight(Some(index));
        // The parent's cell is highlighted once the parent level is shown.
        self.state.active_index = self.state.path.pop();
        self.begin(TransitionKind::Collapse, Box::new(completion))
    }

    /// True while a transition is animating.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Kind and eased progress (0.0 to 1.0) of the transition in flight.
    pub fn transition_progress(&self, now: Instant) -> Option<(TransitionKind, f32)> {
        self.in_flight
            .as_ref()
            .map(|t| (t.kind, t.eased_progress(now)))
    }

    /// When the transition in flight will complete.
    pub fn next_completion_time(&self) -> Option<Instant> {
        self.in_flight.as_ref().map(Transition::completion_time)
    }

    /// Complete the transition in flight if its duration has elapsed at `now`.
    ///
    /// Returns the kind of transition that completed.
    pub fn advance(&mut self, now: Instant) -> Result<Option<TransitionKind>> {
        let Some(transition) = self.in_flight.take_if(|t| t.is_complete(now)) else {
            return Ok(None);
        };
        self.complete(transition).map(Some)
    }

    /// Complete the transition in flight immediately.
    pub fn finish_transition(&mut self) -> Result<Option<TransitionKind>> {
        match self.in_flight.take() {
            Some(transition) => self.complete(transition).map(Some),
            None => Ok(None),
        }
    }

    fn begin(&mut self, kind: TransitionKind, completion: Completion) -> Result<TransitionOutcome> {
        let duration = self.config.transition_duration();
        let transition = Transition::new(
            kind,
            Instant::now(),
            duration,
            self.config.easing,
            completion,
        );

        if self.config.is_instant() {
            self.complete(transition)?;
            return Ok(TransitionOutcome::Completed);
        }

        trace!("Started {kind:?} transition ({duration:?})");
        self.in_flight = Some(transition);
        Ok(TransitionOutcome::Started)
    }

    fn complete(&mut self, transition: Transition) -> Result<TransitionKind> {
        // The hook fires even if rendering fails.
        let rendered = self.render();
        let kind = transition.complete();
        debug!(
            "{kind:?} transition complete at level {}",
            self.state.hierarchy_level()
        );
        rendered.map(|()| kind)
    }

    fn highlight(&mut self, index: Option<usize>) {
        self.state.active_index = index;
        for (i, cell) in self.surface.visible_cells_mut().iter_mut().enumerate() {
            let active = index == Some(i);
            if cell.data().active != active {
                cell.set_active(active);
            }
        }
    }

    fn node_at(&self, index: usize) -> Result<&Node> {
        let items = self.current_items();
        items.get(index).ok_or(HierarchyError::IndexOutOfRange {
            index,
            len: items.len(),
        })
    }

    // -------------------------------------------------------------------------
    // Tree updates
    // -------------------------------------------------------------------------

    /// Append a dynamic node to the current level. Returns its index.
    ///
    /// The current level must be editable: the parent node's `editable` flag,
    /// or `root_editable` at the root level.
    pub fn insert_dynamic(&mut self, name: impl Into<String>) -> Result<usize> {
        let editable = self
            .current_parent()
            .map_or(self.config.root_editable, |parent| parent.editable);
        if !editable {
            return Err(HierarchyError::NotEditable);
        }

        let items = level_items_mut(&mut self.roots, &self.state.path)
            .ok_or(HierarchyError::NotEditable)?;
        let name = name.into();
        items.push(Node::dynamic(name.clone()));
        let index = items.len() - 1;
        debug!(
            "Inserted dynamic node '{name}' at level {} index {index}",
            self.state.hierarchy_level()
        );

        if !self.is_busy() {
            self.render()?;
        }
        Ok(index)
    }

    /// Remove the dynamic node at `index` from the current level.
    pub fn remove_dynamic(&mut self, index: usize) -> Result<Node> {
        let node = self.node_at(index)?;
        if !node.is_dynamic() {
            return Err(HierarchyError::StaticNode {
                name: node.name.clone(),
            });
        }

        let items = level_items_mut(&mut self.roots, &self.state.path)
            .ok_or(HierarchyError::IndexOutOfRange { index, len: 0 })?;
        let removed = items.remove(index);
        self.state.active_index = match self.state.active_index {
            Some(active) if active == index => None,
            Some(active) if active > index => Some(active - 1),
            other => other,
        };
        debug!("Removed dynamic node '{}'", removed.name);

        if !self.is_busy() {
            self.render()?;
        }
        Ok(removed)
    }

    /// Replace the tree and return to the root level.
    ///
    /// A transition in flight is completed first.
    pub fn set_hierarchy_items(&mut self, hierarchy_items: Vec<Node>) -> Result<()> {
        self.finish_transition()?;
        self.roots = hierarchy_items;
        self.state = NavigationState::default();
        self.render()
    }

    /// Return to the root level without animation.
    pub fn reset(&mut self) -> Result<()> {
        self.finish_transition()?;
        self.state = NavigationState::default();
        self.render()
    }

    fn current_parent(&self) -> Option<&Node> {
        let (&last, ancestors) = self.state.path.split_last()?;
        level_items(&self.roots, ancestors).get(last)
    }
}

impl<S: Surface> Drop for HierarchyController<S> {
    fn drop(&mut self) {
        // Hooks fire exactly once, even when torn down mid-transition.
        if let Some(transition) = self.in_flight.take() {
            transition.complete();
        }
    }
}

impl<S: Surface + std::fmt::Debug> std::fmt::Debug for HierarchyController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HierarchyController")
            .field("state", &self.state)
            .field("reuse_identifier", &self.provider.reuse_identifier())
            .field("surface", &self.surface)
            .field("config", &self.config)
            .field("in_flight", &self.in_flight)
            .finish()
    }
}

fn level_items<'a>(roots: &'a [Node], path: &[usize]) -> &'a [Node] {
    let mut items = roots;
    for &index in path {
        match items.get(index) {
            Some(node) => items = &node.children,
            None => return &[],
        }
    }
    items
}

fn level_items_mut<'a>(roots: &'a mut Vec<Node>, path: &[usize]) -> Option<&'a mut Vec<Node>> {
    let mut items = roots;
    for &index in path {
        items = &mut items.get_mut(index)?.children;
    }
    Some(items)
}
