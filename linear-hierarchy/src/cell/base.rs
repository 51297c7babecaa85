use super::{CellData, CellView};
use crate::color::Color;
use crate::geometry::Size;
use crate::theme::{CellColors, Theme};

/// The built-in cell type.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    data: CellData,
    theme: Theme,
    needs_display: bool,
}

impl Cell {
    pub fn new() -> Self {
        Self {
            needs_display: true,
            ..Default::default()
        }
    }

    /// Nominal cell footprint, used by the layout before any cell exists.
    pub const fn default_cell_size() -> Size {
        Size::new(24, 3)
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.data.name = name.into();
    }

    pub fn set_child_count(&mut self, child_count: usize) {
        self.data.child_count = child_count;
    }

    pub fn set_dynamic(&mut self, dynamic: bool) {
        self.data.dynamic = dynamic;
    }

    pub fn set_hierarchy_level(&mut self, hierarchy_level: usize) {
        self.data.hierarchy_level = hierarchy_level;
    }

    pub fn is_active(&self) -> bool {
        self.data.active
    }
}

impl CellColors for Cell {
    fn active_color(&self) -> &Color {
        &self.theme.active_color
    }

    fn normal_color(&self) -> &Color {
        &self.theme.normal_color
    }
}

impl CellView for Cell {
    fn data(&self) -> &CellData {
        &self.data
    }

    fn configure(&mut self, data: CellData) {
        self.data = data;
        self.needs_display = true;
    }

    fn set_active(&mut self, active: bool) {
        self.data.active = active;
        self.needs_display = true;
    }

    fn theme(&self) -> &Theme {
        &self.theme
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.needs_display = true;
    }

    fn needs_display(&self) -> bool {
        self.needs_display
    }

    fn mark_displayed(&mut self) {
        self.needs_display = false;
    }

    fn prepare_for_reuse(&mut self) {
        self.data = CellData::default();
        self.needs_display = true;
    }
}
