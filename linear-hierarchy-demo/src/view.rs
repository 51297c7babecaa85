//! Turns the controller's visible cells into paint instructions.

use std::time::Instant;

use linear_hierarchy::{
    CellColors, CellView, HierarchyController, Rect, Rgb, Surface, TransitionKind,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// One cell, ready to be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellPaint {
    pub rect: Rect,
    pub title: String,
    pub background: Rgb,
    pub foreground: Rgb,
    /// Keyboard cursor is on this cell.
    pub focused: bool,
    /// The cell changed since it was last drawn.
    pub dirty: bool,
}

/// Paint the visible cells at `now`.
///
/// While a transition is in flight the highlighted cell starts halfway between
/// the normal and active colors and reaches the active color as the
/// transition completes. The whole grid slides: left when expanding, right
/// when collapsing.
pub fn paint(controller: &HierarchyController, now: Instant, cursor: usize) -> Vec<CellPaint> {
    let surface = controller.surface();
    let progress = controller.transition_progress(now);
    let slide = (surface.layout().width / 4) as f32;
    let dx = match progress {
        Some((TransitionKind::Expand, p)) => -(p * slide) as i32,
        Some((TransitionKind::Collapse, p)) => (p * slide) as i32,
        None => 0,
    };

    surface
        .visible_cells()
        .iter()
        .zip(surface.frames())
        .enumerate()
        .map(|(index, (cell, rect))| {
            let background = match progress {
                Some((_, p)) if cell.data().active => cell
                    .normal_color()
                    .lerp(cell.active_color(), 0.5 + p / 2.0)
                    .to_rgb(),
                _ => cell.background().to_rgb(),
            };
            CellPaint {
                rect: rect.offset_x(dx),
                title: cell.title(),
                background,
                foreground: contrast(background),
                focused: index == cursor,
                dirty: cell.needs_display(),
            }
        })
        .collect()
}

/// Header text: depth and the names leading to the current level.
pub fn header(controller: &HierarchyController) -> String {
    let mut crumbs = vec!["Root"];
    crumbs.extend(controller.breadcrumbs());
    format!(
        "Level {}: {}",
        controller.hierarchy_level(),
        crumbs.join(" / ")
    )
}

/// Pad or truncate `text` to exactly `width` terminal columns, with one
/// leading space. Truncated titles end in an ellipsis.
pub fn fit(text: &str, width: usize) -> String {
    let padded = format!(" {text}");
    let mut out = if padded.width() <= width {
        padded
    } else if width == 0 {
        String::new()
    } else {
        let target = width - 1;
        let mut out = String::new();
        let mut used = 0;
        for ch in padded.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if used + ch_width > target {
                break;
            }
            out.push(ch);
            used += ch_width;
        }
        out.push('…');
        out
    };
    let used = out.width();
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    out
}

/// Black or white, whichever reads better on `background`.
pub fn contrast(background: Rgb) -> Rgb {
    let luma = 0.299 * background.r as f32
        + 0.587 * background.g as f32
        + 0.114 * background.b as f32;
    if luma > 140.0 {
        Rgb::new(0, 0, 0)
    } else {
        Rgb::new(255, 255, 255)
    }
}
