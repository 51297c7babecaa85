//! A cell type substituted through a custom provider.

use linear_hierarchy::{
    Cell, CellColors, CellData, CellProvider, CellView, Color, Size, Surface, Theme,
};

pub const CUSTOM_CELL_IDENTIFIER: &str = "CustomCell";

/// Base cell plus a label and an icon glyph.
#[derive(Debug, Clone, Default)]
pub struct CustomCell {
    cell: Cell,
    label: String,
    icon: char,
}

impl CustomCell {
    pub fn new() -> Self {
        Self {
            cell: Cell::new(),
            label: String::new(),
            icon: ' ',
        }
    }

    /// Wider than the base cell to fit the icon and child count.
    pub const fn default_cell_size() -> Size {
        Size::new(28, 3)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn icon(&self) -> char {
        self.icon
    }

    fn layout_subviews(&mut self) {
        let data = self.cell.data();
        self.icon = match (data.is_leaf(), data.dynamic) {
            (false, _) => '▸',
            (true, true) => '+',
            (true, false) => '•',
        };
        self.label = if data.is_leaf() {
            data.name.clone()
        } else {
            format!("{} ({})", data.name, data.child_count)
        };
    }
}

impl CellColors for CustomCell {
    fn active_color(&self) -> &Color {
        self.cell.active_color()
    }

    fn normal_color(&self) -> &Color {
        self.cell.normal_color()
    }
}

impl CellView for CustomCell {
    fn data(&self) -> &CellData {
        self.cell.data()
    }

    fn configure(&mut self, data: CellData) {
        self.cell.configure(data);
        self.layout_subviews();
    }

    fn set_active(&mut self, active: bool) {
        self.cell.set_active(active);
    }

    fn theme(&self) -> &Theme {
        self.cell.theme()
    }

    fn set_theme(&mut self, theme: Theme) {
        self.cell.set_theme(theme);
    }

    fn needs_display(&self) -> bool {
        self.cell.needs_display()
    }

    fn mark_displayed(&mut self) {
        self.cell.mark_displayed();
    }

    fn prepare_for_reuse(&mut self) {
        self.cell.prepare_for_reuse();
        self.label.clear();
        self.icon = ' ';
    }

    fn title(&self) -> String {
        format!("{} {}", self.icon, self.label)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CustomCellProvider;

impl CellProvider for CustomCellProvider {
    fn reuse_identifier(&self) -> &str {
        CUSTOM_CELL_IDENTIFIER
    }

    fn register(&self, surface: &mut dyn Surface) {
        surface.register(CUSTOM_CELL_IDENTIFIER, Box::new(|| Box::new(CustomCell::new())));
    }
}
