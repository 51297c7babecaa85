//! The rendering surface the controller draws into.

use std::collections::HashMap;

use log::trace;

use crate::cell::{Cell, CellView};
use crate::geometry::{FlowLayout, Rect};
use crate::provider::CellFactory;

/// A grid-of-cells renderer.
///
/// The surface owns cell recycling: cells handed to
/// [`display`](Surface::display) replace the visible set, and the previous
/// set goes back into the reuse pool of the identifier it was dequeued with.
pub trait Surface {
    fn register(&mut self, identifier: &str, factory: CellFactory);

    fn is_registered(&self, identifier: &str) -> bool;

    /// A recycled cell when one is pooled, otherwise a fresh one.
    /// Returns None if nothing is registered under `identifier`.
    fn dequeue(&mut self, identifier: &str) -> Option<Box<dyn CellView>>;

    fn display(&mut self, identifier: &str, cells: Vec<Box<dyn CellView>>);

    fn visible_cells(&self) -> &[Box<dyn CellView>];

    fn visible_cells_mut(&mut self) -> &mut [Box<dyn CellView>];

    /// Index of the visible cell under a tap, if any.
    fn index_at(&self, x: u16, y: u16) -> Option<usize>;
}

/// Headless surface laying cells out with a [`FlowLayout`].
pub struct GridSurface {
    factories: HashMap<String, CellFactory>,
    pool: HashMap<String, Vec<Box<dyn CellView>>>,
    visible: Vec<Box<dyn CellView>>,
    visible_identifier: Option<String>,
    layout: FlowLayout,
    reloads: usize,
}

impl GridSurface {
    pub fn new(width: u16) -> Self {
        Self::with_layout(FlowLayout::new(Cell::default_cell_size(), 1, width))
    }

    pub fn with_layout(layout: FlowLayout) -> Self {
        Self {
            factories: HashMap::new(),
            pool: HashMap::new(),
            visible: Vec::new(),
            visible_identifier: None,
            layout,
            reloads: 0,
        }
    }

    pub fn layout(&self) -> &FlowLayout {
        &self.layout
    }

    pub fn set_width(&mut self, width: u16) {
        self.layout.width = width;
    }

    /// Frames of the visible cells, in display order.
    pub fn frames(&self) -> Vec<Rect> {
        self.layout.frames(self.visible.len())
    }

    /// Number of pooled cells waiting for reuse under `identifier`.
    pub fn pooled(&self, identifier: &str) -> usize {
        self.pool.get(identifier).map_or(0, Vec::len)
    }

    /// How many times the visible set was replaced.
    pub fn reloads(&self) -> usize {
        self.reloads
    }
}

impl Default for GridSurface {
    fn default() -> Self {
        Self::new(80)
    }
}

impl std::fmt::Debug for GridSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridSurface")
            .field("registered", &self.factories.keys().collect::<Vec<_>>())
            .field("visible", &self.visible.len())
            .field("layout", &self.layout)
            .field("reloads", &self.reloads)
            .finish()
    }
}

impl Surface for GridSurface {
    fn register(&mut self, identifier: &str, factory: CellFactory) {
        trace!("Registering cell type '{identifier}'");
        self.factories.insert(identifier.to_string(), factory);
    }

    fn is_registered(&self, identifier: &str) -> bool {
        self.factories.contains_key(identifier)
    }

    fn dequeue(&mut self, identifier: &str) -> Option<Box<dyn CellView>> {
        if let Some(mut cell) = self.pool.get_mut(identifier).and_then(Vec::pop) {
            cell.prepare_for_reuse();
            return Some(cell);
        }
        let factory = self.factories.get(identifier)?;
        Some(factory())
    }

    fn display(&mut self, identifier: &str, cells: Vec<Box<dyn CellView>>) {
        let previous = std::mem::replace(&mut self.visible, cells);
        if let Some(old_identifier) = self.visible_identifier.replace(identifier.to_string()) {
            self.pool.entry(old_identifier).or_default().extend(previous);
        }
        self.reloads += 1;
        trace!(
            "Displaying {} cells ({} pooled)",
            self.visible.len(),
            self.pooled(identifier)
        );
    }

    fn visible_cells(&self) -> &[Box<dyn CellView>] {
        &self.visible
    }

    fn visible_cells_mut(&mut self) -> &mut [Box<dyn CellView>] {
        &mut self.visible
    }

    fn index_at(&self, x: u16, y: u16) -> Option<usize> {
        self.layout.index_at(x, y, self.visible.len())
    }
}
