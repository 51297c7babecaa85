pub mod cell;
pub mod color;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod node;
pub mod provider;
pub mod surface;
pub mod theme;
pub mod transition;

pub use cell::{Cell, CellData, CellView, DEFAULT_CELL_IDENTIFIER};
pub use color::{Color, Rgb};
pub use config::NavigatorConfig;
pub use controller::{HierarchyController, NavigationState, Selection, TransitionOutcome};
pub use error::{HierarchyError, Result};
pub use geometry::{FlowLayout, Rect, Size};
pub use node::{Node, NodeKey, NodeKind, parse_document, parse_value};
pub use provider::{BaseCellProvider, CellFactory, CellProvider};
pub use surface::{GridSurface, Surface};
pub use theme::{CellColors, Theme};
pub use transition::{Completion, Easing, TransitionKind};
