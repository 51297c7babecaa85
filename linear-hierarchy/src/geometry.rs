//! Sizes, rectangles and the flow layout used to place cells.

/// Footprint of a cell, in surface units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shift horizontally, saturating at zero.
    pub fn offset_x(self, dx: i32) -> Self {
        let x = (self.x as i32 + dx).clamp(0, u16::MAX as i32) as u16;
        Self { x, ..self }
    }
}

/// Left-to-right, top-to-bottom grid of equally sized items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowLayout {
    pub item_size: Size,
    /// Gap between items, both horizontally and vertically.
    pub spacing: u16,
    /// Width available to the grid.
    pub width: u16,
}

impl FlowLayout {
    pub const fn new(item_size: Size, spacing: u16, width: u16) -> Self {
        Self {
            item_size,
            spacing,
            width,
        }
    }

    /// Number of items per row. Always at least one.
    pub fn columns(&self) -> u16 {
        let stride = self.item_size.width.saturating_add(self.spacing);
        if stride == 0 {
            return 1;
        }
        // The last column needs no trailing spacing.
        (self.width.saturating_add(self.spacing) / stride).max(1)
    }

    /// Frame of the item at `index`.
    pub fn frame(&self, index: usize) -> Rect {
        let columns = self.columns() as usize;
        let col = u16::try_from(index % columns).unwrap_or(u16::MAX);
        let row = u16::try_from(index / columns).unwrap_or(u16::MAX);
        Rect::new(
            col.saturating_mul(self.item_size.width.saturating_add(self.spacing)),
            row.saturating_mul(self.item_size.height.saturating_add(self.spacing)),
            self.item_size.width,
            self.item_size.height,
        )
    }

    pub fn frames(&self, count: usize) -> Vec<Rect> {
        (0..count).map(|i| self.frame(i)).collect()
    }

    /// Index of the item under a point, if any of the first `count` items
    /// contains it.
    pub fn index_at(&self, x: u16, y: u16, count: usize) -> Option<usize> {
        (0..count).find(|&i| self.frame(i).contains(x, y))
    }

    /// Total height needed for `count` items.
    pub fn content_height(&self, count: usize) -> u16 {
        if count == 0 {
            return 0;
        }
        let columns = self.columns() as usize;
        let rows = u16::try_from(count.div_ceil(columns)).unwrap_or(u16::MAX);
        rows.saturating_mul(self.item_size.height)
            .saturating_add((rows - 1).saturating_mul(self.spacing))
    }
}
