//! Cell type substitution.

use crate::cell::{Cell, CellView, DEFAULT_CELL_IDENTIFIER};
use crate::surface::Surface;

/// Builds a fresh cell when the surface has none to recycle.
pub type CellFactory = Box<dyn Fn() -> Box<dyn CellView>>;

/// Supplies the cell type the controller renders.
///
/// Hosts implement this to show their own cell type without touching the
/// controller. The controller calls [`register`](CellProvider::register)
/// once before its first render, then dequeues cells by
/// [`reuse_identifier`](CellProvider::reuse_identifier).
pub trait CellProvider {
    fn reuse_identifier(&self) -> &str;

    fn register(&self, surface: &mut dyn Surface);
}

/// Registers the built-in [`Cell`] under [`DEFAULT_CELL_IDENTIFIER`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseCellProvider;

impl CellProvider for BaseCellProvider {
    fn reuse_identifier(&self) -> &str {
        DEFAULT_CELL_IDENTIFIER
    }

    fn register(&self, surface: &mut dyn Surface) {
        surface.register(DEFAULT_CELL_IDENTIFIER, Box::new(|| Box::new(Cell::new())));
    }
}
