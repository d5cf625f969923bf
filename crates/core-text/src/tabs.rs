//! Tab-stop aware coordinate mapping between raw bytes and render columns.
//!
//! A raw row keeps its tabs; the render buffer expands each tab with spaces up
//! to the next multiple of `tab_stop`. Every other byte occupies exactly one
//! column (byte/column model, no grapheme widths).
//!
//! Invariants:
//! * `char_to_render` is monotonically non-decreasing in the char offset.
//! * `char_to_render(raw, render_to_char(raw, x)) <= x` for every `x` inside
//!   the row width; `render_to_char` rounds toward the byte *before* a tab
//!   boundary (tie-break `current > target`).
//! * `expand_tabs(raw).len() == char_to_render(raw, raw.len())`.

pub const DEFAULT_TAB_STOP: usize = 4;

/// Render column reached after the first `char_offset` raw bytes.
///
/// Offsets past the end of the row are clamped to the row length.
pub fn char_to_render(raw: &[u8], char_offset: usize, tab_stop: usize) -> usize {
    let tab_stop = tab_stop.max(1);
    let mut rx = 0;
    for &b in raw.iter().take(char_offset) {
        if b == b'\t' {
            rx += (tab_stop - 1) - (rx % tab_stop);
        }
        rx += 1;
    }
    rx
}

/// Smallest raw offset whose render column first exceeds `render_col`, or
/// the row length when `render_col` lies past the row width.
pub fn render_to_char(raw: &[u8], render_col: usize, tab_stop: usize) -> usize {
    let tab_stop = tab_stop.max(1);
    let mut cur_rx = 0;
    for (cx, &b) in raw.iter().enumerate() {
        if b == b'\t' {
            cur_rx += (tab_stop - 1) - (cur_rx % tab_stop);
        }
        cur_rx += 1;
        if cur_rx > render_col {
            return cx;
        }
    }
    raw.len()
}

/// Build the render buffer: tabs become spaces up to the next tab stop.
pub fn expand_tabs(raw: &[u8], tab_stop: usize) -> Vec<u8> {
    let tab_stop = tab_stop.max(1);
    let tabs = raw.iter().filter(|&&b| b == b'\t').count();
    let mut render = Vec::with_capacity(raw.len() + tabs * (tab_stop - 1));
    for &b in raw {
        if b == b'\t' {
            render.push(b' ');
            while render.len() % tab_stop != 0 {
                render.push(b' ');
            }
        } else {
            render.push(b);
        }
    }
    render
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_bytes_map_one_to_one() {
        assert_eq!(char_to_render(b"abc", 2, 4), 2);
        assert_eq!(render_to_char(b"abc", 2, 4), 2);
    }

    #[test]
    fn tab_advances_to_next_stop() {
        assert_eq!(char_to_render(b"\tx", 1, 4), 4);
        assert_eq!(char_to_render(b"ab\tx", 3, 4), 4);
        assert_eq!(char_to_render(b"abcd\tx", 5, 4), 8);
        assert_eq!(char_to_render(b"\tx", 1, 8), 8);
    }

    #[test]
    fn render_inside_tab_rounds_to_tab_byte() {
        // Columns 0..=3 are all covered by the leading tab.
        for col in 0..4 {
            assert_eq!(render_to_char(b"\tx", col, 4), 0, "col {col}");
        }
        assert_eq!(render_to_char(b"\tx", 4, 4), 1);
    }

    #[test]
    fn render_past_end_is_row_length() {
        assert_eq!(render_to_char(b"a\tb", 99, 4), 3);
        assert_eq!(render_to_char(b"", 0, 4), 0);
    }

    #[test]
    fn offsets_past_end_clamp() {
        assert_eq!(char_to_render(b"a\t", 10, 4), 4);
    }

    #[test]
    fn expand_matches_forward_mapping() {
        let raw = b"a\tbc\t\td";
        let render = expand_tabs(raw, 4);
        assert_eq!(render, b"a   bc      d");
        assert_eq!(render.len(), char_to_render(raw, raw.len(), 4));
    }
}
