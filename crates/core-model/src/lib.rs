//! Cursor and viewport model.
//!
//! The cursor is a logical `(cy, cx)` pair: `cy` is a row index and `cx` a raw
//! byte offset inside that row. `cy` may equal the row count, which addresses
//! the virtual empty line after the last row (typing there appends a row).
//! `rx` is the render column derived from `cx` through the tab mapper; it is
//! refreshed by [`Viewport::scroll`] once per frame and is only meaningful
//! after that call.
//!
//! The viewport is the visible window into render space: `row_offset` and
//! `col_offset` name the top-left cell, `height` / `width` the text area
//! (status and message lines excluded).
//!
//! Invariants after `Viewport::scroll`:
//! * `row_offset <= cy < row_offset + height` (when `height > 0`).
//! * `col_offset <= rx < col_offset + width` (when `width > 0`).
//! * `cx <= row_len(cy)`.

use core_text::RowStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub cy: usize,
    pub cx: usize,
    pub rx: usize,
}

impl Cursor {
    pub fn new(cy: usize, cx: usize) -> Self {
        Self { cy, cx, rx: 0 }
    }

    /// Clamp into the valid range for `rows`: `cy <= rows.len()` and
    /// `cx <= row_len(cy)` (0 on the virtual line).
    pub fn clamp_to(&mut self, rows: &RowStore) {
        if self.cy > rows.len() {
            self.cy = rows.len();
        }
        let max = rows.row_len(self.cy);
        if self.cx > max {
            self.cx = max;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub row_offset: usize,
    pub col_offset: usize,
    pub height: usize,
    pub width: usize,
}

/// Compute the new top row needed to keep `cursor_line` visible.
///
/// Inputs:
/// - first: current first visible line (top of viewport)
/// - cursor_line: current cursor line (0-based)
/// - text_height: number of text rows available
/// - margin: desired margin in rows (clamped to at most text_height/2)
///
/// Returns Some(new_first) if a scroll is needed, else None when the cursor is
/// already within the permitted band.
pub fn compute_scroll_intent(
    first: usize,
    cursor_line: usize,
    text_height: usize,
    margin: usize,
) -> Option<usize> {
    if text_height == 0 {
        return None;
    }
    let m = margin.min(text_height / 2);
    let top = first;
    let bottom = first + text_height;
    if cursor_line < top + m {
        let new_first = cursor_line.saturating_sub(m);
        if new_first != first {
            return Some(new_first);
        }
    } else if cursor_line + m >= bottom {
        let new_first = cursor_line + m + 1 - text_height;
        if new_first != first {
            return Some(new_first);
        }
    }
    None
}

impl Viewport {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            row_offset: 0,
            col_offset: 0,
            height,
            width,
        }
    }

    pub fn resize(&mut self, height: usize, width: usize) {
        self.height = height;
        self.width = width;
    }

    /// Push the row offset past every row so the next `scroll` re-anchors
    /// the cursor row at the top of the screen.
    pub fn force_reanchor(&mut self, row_count: usize) {
        self.row_offset = row_count;
    }

    /// Refresh `cursor.rx` and adjust offsets so the cursor cell is visible.
    /// Returns true when either offset changed.
    pub fn scroll(&mut self, cursor: &mut Cursor, rows: &RowStore, margin: usize) -> bool {
        cursor.rx = if cursor.cy < rows.len() {
            rows.cx_to_rx(cursor.cy, cursor.cx)
        } else {
            0
        };

        let mut changed = false;
        if let Some(first) = compute_scroll_intent(self.row_offset, cursor.cy, self.height, margin)
        {
            self.row_offset = first;
            changed = true;
        }

        if self.width > 0 {
            if cursor.rx < self.col_offset {
                self.col_offset = cursor.rx;
                changed = true;
            } else if cursor.rx >= self.col_offset + self.width {
                self.col_offset = cursor.rx + 1 - self.width;
                changed = true;
            }
        }
        if changed {
            tracing::trace!(
                target: "render.viewport",
                row_offset = self.row_offset,
                col_offset = self.col_offset,
                cy = cursor.cy,
                rx = cursor.rx,
                "scrolled"
            );
        }
        changed
    }
}
