//! Cursor-relative editing operations.

use crate::EditorState;
use crate::motion::Direction;

impl EditorState {
    /// Insert `ch` before the cursor and advance. On the virtual line a new
    /// empty row is appended first.
    pub fn insert_char(&mut self, ch: u8) {
        if self.cursor.cy == self.rows.len() {
            self.rows.insert(self.rows.len(), b"");
        }
        self.rows.insert_char(self.cursor.cy, self.cursor.cx, ch);
        self.cursor.cx += 1;
    }

    /// Break the line at the cursor. At column 0 an empty row is inserted
    /// above instead of splitting.
    pub fn insert_newline(&mut self) {
        let cy = self.cursor.cy;
        if self.cursor.cx == 0 {
            self.rows.insert(cy, b"");
        } else {
            self.rows.split_at(cy, self.cursor.cx);
        }
        self.cursor.cy += 1;
        self.cursor.cx = 0;
    }

    /// Backspace. At column 0 the current row is merged into the previous
    /// one and the cursor lands at the join point.
    pub fn delete_char(&mut self) {
        let cy = self.cursor.cy;
        if cy == self.rows.len() || (cy == 0 && self.cursor.cx == 0) {
            tracing::trace!(target: "edit", op = "backspace", cy, cx = self.cursor.cx, "ignored");
            return;
        }
        if self.cursor.cx > 0 {
            self.rows.delete_char(cy, self.cursor.cx - 1);
            self.cursor.cx -= 1;
        } else {
            let join_at = self.rows.row_len(cy - 1);
            self.rows.join_with_next(cy - 1);
            self.cursor.cy -= 1;
            self.cursor.cx = join_at;
        }
    }

    /// Forward delete: step right, then backspace.
    pub fn delete_forward(&mut self) {
        self.move_cursor(Direction::Right);
        self.delete_char();
    }
}
