pub mod custom_cell;
pub mod view;

pub use custom_cell::{CUSTOM_CELL_IDENTIFIER, CustomCell, CustomCellProvider};
pub use view::{CellPaint, contrast, fit, header, paint};

/// Hierarchy shown when no document is given on the command line.
pub const DEFAULT_DOCUMENT: &str = include_str!("../assets/hierarchy.json");
