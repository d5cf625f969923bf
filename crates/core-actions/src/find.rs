//! Incremental search session.
//!
//! A session starts with a snapshot of cursor and viewport. Every query edit
//! restarts the scan from the top; arrow keys step to the next or previous
//! match, wrapping at both ends of the buffer. The matched range is
//! overlaid with [`Highlight::Match`]; the row's original highlight array is
//! kept aside and put back before the next scan, so at most one overlay is
//! live at any time.

use core_input::Key;
use core_model::{Cursor, Viewport};
use core_state::EditorState;
use core_syntax::Highlight;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

#[derive(Debug)]
pub struct FindController {
    last_match: Option<usize>,
    direction: SearchDirection,
    saved_highlight: Option<(usize, Vec<Highlight>)>,
    saved_cursor: Cursor,
    saved_viewport: Viewport,
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

impl FindController {
    pub fn start(state: &EditorState) -> Self {
        tracing::debug!(target: "find", cy = state.cursor.cy, cx = state.cursor.cx, "session_start");
        Self {
            last_match: None,
            direction: SearchDirection::Forward,
            saved_highlight: None,
            saved_cursor: state.cursor,
            saved_viewport: state.viewport,
        }
    }

    pub fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    pub fn direction(&self) -> SearchDirection {
        self.direction
    }

    /// Restart the search from the top for a new query.
    pub fn on_query_changed(&mut self, state: &mut EditorState, query: &[u8]) {
        self.last_match = None;
        self.direction = SearchDirection::Forward;
        self.scan(state, query);
    }

    /// Navigation key while the query is unchanged. Keys other than arrows
    /// restart the search like a query edit.
    pub fn on_key(&mut self, state: &mut EditorState, query: &[u8], key: Key) {
        match key {
            Key::ArrowRight | Key::ArrowDown => self.direction = SearchDirection::Forward,
            Key::ArrowLeft | Key::ArrowUp => self.direction = SearchDirection::Backward,
            _ => return self.on_query_changed(state, query),
        }
        self.scan(state, query);
    }

    /// End the session keeping the cursor on the current match.
    pub fn confirm(mut self, state: &mut EditorState) {
        self.restore_highlight(state);
        tracing::debug!(target: "find", last_match = ?self.last_match, "session_confirm");
    }

    /// End the session returning cursor and scroll position to the snapshot.
    pub fn cancel(mut self, state: &mut EditorState) {
        self.restore_highlight(state);
        state.cursor = self.saved_cursor;
        state.viewport.row_offset = self.saved_viewport.row_offset;
        state.viewport.col_offset = self.saved_viewport.col_offset;
        tracing::debug!(target: "find", "session_cancel");
    }

    fn restore_highlight(&mut self, state: &mut EditorState) {
        if let Some((row, saved)) = self.saved_highlight.take() {
            state.rows.restore_highlight(row, saved);
        }
    }

    fn scan(&mut self, state: &mut EditorState, query: &[u8]) {
        self.restore_highlight(state);
        let count = state.rows.len();
        if query.is_empty() || count == 0 {
            return;
        }
        if self.last_match.is_none() {
            self.direction = SearchDirection::Forward;
        }

        // Without a previous match the first forward step lands on row 0.
        let mut current = self.last_match.unwrap_or(count - 1);
        for _ in 0..count {
            current = match self.direction {
                SearchDirection::Forward => (current + 1) % count,
                SearchDirection::Backward => current.checked_sub(1).unwrap_or(count - 1),
            };
            let Some(row) = state.rows.get(current) else {
                continue;
            };
            let Some(rx) = find_bytes(row.render(), query) else {
                continue;
            };
            let saved = row.highlight().to_vec();
            self.last_match = Some(current);
            state.cursor.cy = current;
            state.cursor.cx = state.rows.rx_to_cx(current, rx);
            state.viewport.force_reanchor(count);
            state
                .rows
                .overlay_highlight(current, rx..rx + query.len(), Highlight::Match);
            self.saved_highlight = Some((current, saved));
            tracing::trace!(target: "find", row = current, rx, "match");
            return;
        }
        tracing::trace!(target: "find", query_len = query.len(), "no_match");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::RowStore;

    fn state(lines: &[&str]) -> EditorState {
        let mut st =
            EditorState::new(RowStore::from_lines(lines.iter().map(|l| l.as_bytes()), 4, None));
        st.set_screen_size(10, 40);
        st
    }

    #[test]
    fn substring_search() {
        assert_eq!(find_bytes(b"hello world", b"world"), Some(6));
        assert_eq!(find_bytes(b"abc", b"abcd"), None);
        assert_eq!(find_bytes(b"aaa", b"aa"), Some(0));
    }

    #[test]
    fn match_overlay_is_restored_on_next_scan() {
        let mut st = state(&["xx foo", "foo"]);
        let mut find = FindController::start(&st);
        find.on_query_changed(&mut st, b"foo");
        assert_eq!(st.cursor.cy, 0);
        assert_eq!(st.cursor.cx, 3);
        assert_eq!(st.rows.get(0).unwrap().highlight()[3], Highlight::Match);
        find.on_key(&mut st, b"foo", Key::ArrowDown);
        assert_eq!(st.cursor.cy, 1);
        assert!(
            st.rows.get(0).unwrap().highlight().iter().all(|h| *h == Highlight::Normal),
            "previous overlay left behind"
        );
        assert_eq!(st.rows.get(1).unwrap().highlight()[0], Highlight::Match);
    }

    #[test]
    fn match_column_maps_through_tabs() {
        let mut st = state(&["\tneedle"]);
        let mut find = FindController::start(&st);
        find.on_query_changed(&mut st, b"needle");
        assert_eq!(st.cursor.cx, 1);
        assert_eq!(st.viewport.row_offset, 1, "forced re-anchor");
    }

    #[test]
    fn empty_query_does_not_move() {
        let mut st = state(&["abc", "def"]);
        st.cursor = Cursor::new(1, 2);
        let mut find = FindController::start(&st);
        find.on_query_changed(&mut st, b"");
        assert_eq!((st.cursor.cy, st.cursor.cx), (1, 2));
        assert_eq!(find.last_match(), None);
    }

    #[test]
    fn backward_wraps_to_last_row() {
        let mut st = state(&["hit", "miss", "hit"]);
        let mut find = FindController::start(&st);
        find.on_query_changed(&mut st, b"hit");
        assert_eq!(st.cursor.cy, 0);
        find.on_key(&mut st, b"hit", Key::ArrowUp);
        assert_eq!(st.cursor.cy, 2);
        assert_eq!(find.direction(), SearchDirection::Backward);
    }

    #[test]
    fn confirm_keeps_cursor_and_clears_overlay() {
        let mut st = state(&["one", "two"]);
        let mut find = FindController::start(&st);
        find.on_query_changed(&mut st, b"wo");
        find.confirm(&mut st);
        assert_eq!((st.cursor.cy, st.cursor.cx), (1, 1));
        assert!(
            st.rows.get(1).unwrap().highlight().iter().all(|h| *h == Highlight::Normal)
        );
    }
}
