//! Ordered row storage with derived render + highlight maintenance.
//!
//! Invariants (hold after every public call):
//! * `rows[i].index == i` for every row.
//! * Every row's `render` and `highlight` reflect its current `chars` and the
//!   open-comment flag of the row above it.
//! * The modification counter grows by one per applied mutation; requests
//!   with out-of-range indices are ignored and leave it untouched.
//!
//! Highlight propagation: a row is re-highlighted after each edit; when its
//! trailing open-comment flag flips, the next row is re-highlighted as well,
//! and so on until a flag is stable or the last row is reached. Structural
//! edits (insert, delete, join) also refresh the row that now follows the
//! edit point, because its starting flag comes from a different row.

use crate::row::Row;
use crate::tabs::{self, DEFAULT_TAB_STOP};
use core_syntax::{Highlight, SyntaxDef, highlight_row};
use std::io::{self, BufRead};
use std::ops::Range;

#[derive(Debug, Clone)]
pub struct RowStore {
    rows: Vec<Row>,
    tab_stop: usize,
    syntax: Option<&'static SyntaxDef>,
    dirty: u64,
}

impl Default for RowStore {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_STOP)
    }
}

impl RowStore {
    pub fn new(tab_stop: usize) -> Self {
        Self {
            rows: Vec::new(),
            tab_stop: tab_stop.max(1),
            syntax: None,
            dirty: 0,
        }
    }

    /// Build a store from in-memory lines (no trailing newline handling).
    pub fn from_lines<I, L>(lines: I, tab_stop: usize, syntax: Option<&'static SyntaxDef>) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let mut store = Self::new(tab_stop);
        store.syntax = syntax;
        for line in lines {
            let at = store.len();
            store.insert(at, line.as_ref());
        }
        store.dirty = 0;
        store
    }

    /// Read rows line by line, stripping trailing `\r` / `\n` bytes.
    pub fn from_reader<R: BufRead>(
        mut reader: R,
        tab_stop: usize,
        syntax: Option<&'static SyntaxDef>,
    ) -> io::Result<Self> {
        let mut store = Self::new(tab_stop);
        store.syntax = syntax;
        let mut line = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            while matches!(line.last(), Some(b'\n' | b'\r')) {
                line.pop();
            }
            let at = store.len();
            store.insert(at, &line);
        }
        store.dirty = 0;
        Ok(store)
    }

    /// Serialize all rows joined by `\n`, with a trailing newline after the
    /// last row. An empty store serializes to zero bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let total: usize = self.rows.iter().map(|r| r.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for row in &self.rows {
            out.extend_from_slice(&row.chars);
            out.push(b'\n');
        }
        out
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    /// Length in raw bytes of row `at`; rows past the end count as empty.
    pub fn row_len(&self, at: usize) -> usize {
        self.rows.get(at).map_or(0, Row::len)
    }

    /// Render column for raw offset `cx` on row `at` (0 past the last row).
    pub fn cx_to_rx(&self, at: usize, cx: usize) -> usize {
        self.rows
            .get(at)
            .map_or(0, |row| row.cx_to_rx(cx, self.tab_stop))
    }

    /// Raw offset for render column `rx` on row `at` (0 past the last row).
    pub fn rx_to_cx(&self, at: usize, rx: usize) -> usize {
        self.rows
            .get(at)
            .map_or(0, |row| row.rx_to_cx(rx, self.tab_stop))
    }

    pub fn syntax(&self) -> Option<&'static SyntaxDef> {
        self.syntax
    }

    /// Replace the syntax definition and re-highlight every row.
    pub fn set_syntax(&mut self, syntax: Option<&'static SyntaxDef>) {
        self.syntax = syntax;
        let mut open = false;
        for row in &mut self.rows {
            let (hl, still_open) = highlight_row(&row.render, syntax, open);
            row.highlight = hl;
            row.open_comment = still_open;
            open = still_open;
        }
        tracing::debug!(
            target: "syntax",
            file_type = syntax.map(|s| s.file_type),
            rows = self.rows.len(),
            "rehighlight_all"
        );
    }

    /// Modification counter; non-zero means unsaved edits exist.
    pub fn dirty(&self) -> u64 {
        self.dirty
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty != 0
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = 0;
    }

    /// Insert a new row holding `bytes` at `pos` (`0 <= pos <= len`).
    pub fn insert(&mut self, pos: usize, bytes: &[u8]) {
        if pos > self.rows.len() {
            tracing::trace!(target: "edit", op = "insert_row", pos, len = self.rows.len(), "ignored");
            return;
        }
        self.insert_row_raw(pos, bytes.to_vec());
        self.dirty += 1;
    }

    /// Remove row `pos`, renumbering the rows after it.
    pub fn delete(&mut self, pos: usize) {
        if pos >= self.rows.len() {
            tracing::trace!(target: "edit", op = "delete_row", pos, len = self.rows.len(), "ignored");
            return;
        }
        self.rows.remove(pos);
        self.renumber_from(pos);
        if pos < self.rows.len() {
            self.refresh_highlight_from(pos);
        }
        self.dirty += 1;
    }

    /// Insert one byte into row `at`; `col` past the end appends.
    pub fn insert_char(&mut self, at: usize, col: usize, ch: u8) {
        let Some(row) = self.rows.get_mut(at) else {
            tracing::trace!(target: "edit", op = "insert_char", at, "ignored");
            return;
        };
        let col = col.min(row.chars.len());
        row.chars.insert(col, ch);
        self.update_row(at);
        self.dirty += 1;
    }

    /// Remove the byte at `col` of row `at`.
    pub fn delete_char(&mut self, at: usize, col: usize) {
        match self.rows.get_mut(at) {
            Some(row) if col < row.chars.len() => {
                row.chars.remove(col);
            }
            _ => {
                tracing::trace!(target: "edit", op = "delete_char", at, col, "ignored");
                return;
            }
        }
        self.update_row(at);
        self.dirty += 1;
    }

    /// Append raw bytes to the end of row `at`.
    pub fn append_bytes(&mut self, at: usize, bytes: &[u8]) {
        let Some(row) = self.rows.get_mut(at) else {
            tracing::trace!(target: "edit", op = "append_bytes", at, "ignored");
            return;
        };
        row.chars.extend_from_slice(bytes);
        self.update_row(at);
        self.dirty += 1;
    }

    /// Move the bytes of row `at` from `col` onward into a new row below it.
    pub fn split_at(&mut self, at: usize, col: usize) {
        let tail = match self.rows.get_mut(at) {
            Some(row) if col <= row.chars.len() => row.chars.split_off(col),
            _ => {
                tracing::trace!(target: "edit", op = "split_row", at, col, "ignored");
                return;
            }
        };
        self.update_row(at);
        self.insert_row_raw(at + 1, tail);
        self.dirty += 1;
    }

    /// Append row `at + 1` onto row `at` and remove it.
    pub fn join_with_next(&mut self, at: usize) {
        if at + 1 >= self.rows.len() {
            tracing::trace!(target: "edit", op = "join_rows", at, len = self.rows.len(), "ignored");
            return;
        }
        let next = self.rows.remove(at + 1);
        self.renumber_from(at + 1);
        self.rows[at].chars.extend_from_slice(&next.chars);
        self.update_row(at);
        if at + 1 < self.rows.len() {
            self.refresh_highlight_from(at + 1);
        }
        self.dirty += 1;
    }

    /// Overwrite part of a row's highlight array with `class` without
    /// touching its content (used for search match overlays).
    pub fn overlay_highlight(&mut self, at: usize, range: Range<usize>, class: Highlight) {
        if let Some(row) = self.rows.get_mut(at) {
            let end = range.end.min(row.highlight.len());
            let start = range.start.min(end);
            row.highlight[start..end].fill(class);
        }
    }

    /// Restore a previously saved highlight array verbatim. Ignored when the
    /// row no longer exists or its render length changed.
    pub fn restore_highlight(&mut self, at: usize, saved: Vec<Highlight>) -> bool {
        match self.rows.get_mut(at) {
            Some(row) if row.render.len() == saved.len() => {
                row.highlight = saved;
                true
            }
            _ => false,
        }
    }

    fn insert_row_raw(&mut self, pos: usize, chars: Vec<u8>) {
        self.rows.insert(
            pos,
            Row {
                index: pos,
                chars,
                ..Row::default()
            },
        );
        self.renumber_from(pos + 1);
        self.update_row(pos);
        if pos + 1 < self.rows.len() {
            self.refresh_highlight_from(pos + 1);
        }
    }

    fn renumber_from(&mut self, pos: usize) {
        for (i, row) in self.rows.iter_mut().enumerate().skip(pos) {
            row.index = i;
        }
    }

    /// Regenerate render + highlight for row `at` and propagate.
    fn update_row(&mut self, at: usize) {
        let row = &mut self.rows[at];
        row.render = tabs::expand_tabs(&row.chars, self.tab_stop);
        self.refresh_highlight_from(at);
    }

    /// Re-highlight row `at` unconditionally, then each following row for as
    /// long as the previous row's open-comment flag changed.
    fn refresh_highlight_from(&mut self, mut at: usize) {
        while at < self.rows.len() {
            let starts_in_comment = at > 0 && self.rows[at - 1].open_comment;
            let row = &mut self.rows[at];
            let (hl, open) = highlight_row(&row.render, self.syntax, starts_in_comment);
            row.highlight = hl;
            let changed = row.open_comment != open;
            row.open_comment = open;
            if !changed {
                break;
            }
            at += 1;
        }
    }
}
