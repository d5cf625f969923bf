//! Cursor motion primitives.
//!
//! Left at column 0 wraps to the end of the previous row; Right at the end of
//! a row wraps to the start of the next one (including the virtual line after
//! the last row). Vertical moves keep `cx` and clamp it to the target row.

use crate::EditorState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl EditorState {
    pub fn move_cursor(&mut self, dir: Direction) {
        let len = self.rows.len();
        let c = &mut self.cursor;
        match dir {
            Direction::Left => {
                if c.cx != 0 {
                    c.cx -= 1;
                } else if c.cy > 0 {
                    c.cy -= 1;
                    c.cx = self.rows.row_len(c.cy);
                }
            }
            Direction::Right => {
                if c.cy < len {
                    if c.cx < self.rows.row_len(c.cy) {
                        c.cx += 1;
                    } else {
                        c.cy += 1;
                        c.cx = 0;
                    }
                }
            }
            Direction::Up => {
                c.cy = c.cy.saturating_sub(1);
            }
            Direction::Down => {
                if c.cy < len {
                    c.cy += 1;
                }
            }
        }
        c.clamp_to(&self.rows);
    }

    pub fn move_home(&mut self) {
        self.cursor.cx = 0;
    }

    pub fn move_end(&mut self) {
        if self.cursor.cy < self.rows.len() {
            self.cursor.cx = self.rows.row_len(self.cursor.cy);
        }
    }

    /// Jump to the top (or bottom) of the screen, then move a full screen
    /// height further in the same direction.
    pub fn page(&mut self, dir: Direction) {
        let height = self.viewport.height;
        let step = match dir {
            Direction::Up => {
                self.cursor.cy = self.viewport.row_offset;
                Direction::Up
            }
            _ => {
                let bottom = (self.viewport.row_offset + height).saturating_sub(1);
                self.cursor.cy = bottom.min(self.rows.len());
                Direction::Down
            }
        };
        for _ in 0..height {
            self.move_cursor(step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_model::Cursor;
    use core_text::RowStore;

    fn state(lines: &[&str]) -> EditorState {
        EditorState::new(RowStore::from_lines(lines.iter().map(|l| l.as_bytes()), 4, None))
    }

    #[test]
    fn left_wraps_to_previous_row_end() {
        let mut st = state(&["abc", "de"]);
        st.cursor = Cursor::new(1, 0);
        st.move_cursor(Direction::Left);
        assert_eq!((st.cursor.cy, st.cursor.cx), (0, 3));
        st.cursor = Cursor::new(0, 0);
        st.move_cursor(Direction::Left);
        assert_eq!((st.cursor.cy, st.cursor.cx), (0, 0));
    }

    #[test]
    fn right_wraps_to_next_row_start() {
        let mut st = state(&["ab", "c"]);
        st.cursor = Cursor::new(0, 2);
        st.move_cursor(Direction::Right);
        assert_eq!((st.cursor.cy, st.cursor.cx), (1, 0));
        st.cursor = Cursor::new(1, 1);
        st.move_cursor(Direction::Right);
        assert_eq!((st.cursor.cy, st.cursor.cx), (2, 0), "virtual line");
        st.move_cursor(Direction::Right);
        assert_eq!((st.cursor.cy, st.cursor.cx), (2, 0));
    }

    #[test]
    fn vertical_moves_clamp_column() {
        let mut st = state(&["abcdef", "ab"]);
        st.cursor = Cursor::new(0, 5);
        st.move_cursor(Direction::Down);
        assert_eq!((st.cursor.cy, st.cursor.cx), (1, 2));
        st.move_cursor(Direction::Down);
        assert_eq!((st.cursor.cy, st.cursor.cx), (2, 0));
        st.move_cursor(Direction::Down);
        assert_eq!(st.cursor.cy, 2);
        st.move_cursor(Direction::Up);
        st.move_cursor(Direction::Up);
        st.move_cursor(Direction::Up);
        assert_eq!(st.cursor.cy, 0);
    }

    #[test]
    fn home_end() {
        let mut st = state(&["hello"]);
        st.move_end();
        assert_eq!(st.cursor.cx, 5);
        st.move_home();
        assert_eq!(st.cursor.cx, 0);
        st.cursor = Cursor::new(1, 0);
        st.move_end();
        assert_eq!(st.cursor.cx, 0);
    }

    #[test]
    fn page_down_and_up() {
        let lines: Vec<String> = (0..30).map(|i| i.to_string()).collect();
        let mut st = EditorState::new(RowStore::from_lines(&lines, 4, None));
        st.set_screen_size(12, 80); // 10 text rows
        st.page(Direction::Down);
        assert_eq!(st.cursor.cy, 19);
        st.viewport.row_offset = 10;
        st.page(Direction::Up);
        assert_eq!(st.cursor.cy, 0);
    }

    #[test]
    fn page_down_stops_at_virtual_line() {
        let mut st = state(&["a", "b"]);
        st.set_screen_size(12, 80);
        st.page(Direction::Down);
        assert_eq!(st.cursor.cy, 2);
    }
}
