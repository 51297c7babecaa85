use serde::Deserialize;

use crate::color::Color;

/// The two color slots every cell exposes so it can be themed uniformly,
/// regardless of its own layout.
pub trait CellColors {
    /// Background of the selected (highlighted) cell.
    fn active_color(&self) -> &Color;

    /// Background of every other cell.
    fn normal_color(&self) -> &Color;

    fn color_for(&self, active: bool) -> &Color {
        if active {
            self.active_color()
        } else {
            self.normal_color()
        }
    }
}

/// Highlight colors shared by every live cell.
///
/// Owned by the controller and copied into each cell when it is rendered or
/// when the theme changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub active_color: Color,
    pub normal_color: Color,
}

impl Theme {
    pub const fn new(active_color: Color, normal_color: Color) -> Self {
        Self {
            active_color,
            normal_color,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            active_color: Color::rgb(0x2f, 0x80, 0xed), // blue
            normal_color: Color::rgb(0x3c, 0x3c, 0x3c), // dark gray
        }
    }
}

impl CellColors for Theme {
    fn active_color(&self) -> &Color {
        &self.active_color
    }

    fn normal_color(&self) -> &Color {
        &self.normal_color
    }
}
