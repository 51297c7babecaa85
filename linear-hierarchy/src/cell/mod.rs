//! Cells: the visual representation of one node at the current level.

mod base;

pub use base::Cell;

use crate::color::Color;
use crate::node::Node;
use crate::theme::{CellColors, Theme};

/// Reuse identifier of the built-in cell type.
pub const DEFAULT_CELL_IDENTIFIER: &str = "CBLinearHierarchyNavigatorCell";

/// Everything a cell needs to know about the node it shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellData {
    pub name: String,
    /// Number of children of the node. Zero for a leaf.
    pub child_count: usize,
    /// Whether this is the selected (highlighted) cell.
    pub active: bool,
    /// Mirrors the node kind.
    pub dynamic: bool,
    /// Depth the cell was created at.
    pub hierarchy_level: usize,
}

impl CellData {
    pub fn from_node(node: &Node, hierarchy_level: usize, active: bool) -> Self {
        Self {
            name: node.name.clone(),
            child_count: node.children.len(),
            active,
            dynamic: node.is_dynamic(),
            hierarchy_level,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.child_count == 0
    }
}

/// Contract every cell type implements.
///
/// Concrete cells own their layout. The controller only talks to them
/// through this trait and the two color slots of [`CellColors`].
pub trait CellView: CellColors + std::fmt::Debug {
    fn data(&self) -> &CellData;

    /// Replace the node data shown by this cell.
    fn configure(&mut self, data: CellData);

    /// Set the highlight. Marks the cell as needing display.
    fn set_active(&mut self, active: bool);

    fn theme(&self) -> &Theme;

    /// Replace the colors. Marks the cell as needing display.
    fn set_theme(&mut self, theme: Theme);

    /// True when the cell changed since it was last drawn.
    fn needs_display(&self) -> bool;

    fn mark_displayed(&mut self);

    /// Reset state before a recycled cell is handed out again.
    fn prepare_for_reuse(&mut self);

    /// Text drawn for the cell. Custom cells override this to add decoration.
    fn title(&self) -> String {
        self.data().name.clone()
    }

    /// Current background: the active or normal color.
    fn background(&self) -> &Color {
        self.color_for(self.data().active)
    }
}
