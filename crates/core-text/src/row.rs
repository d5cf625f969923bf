use crate::tabs;
use core_syntax::Highlight;

/// One line of text owned by the [`RowStore`](crate::RowStore).
///
/// `render` and `highlight` are derived from `chars` and are regenerated
/// together by the store after every mutation, so both always have the same
/// length. Rows are read-only outside the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub(crate) index: usize,
    pub(crate) chars: Vec<u8>,
    pub(crate) render: Vec<u8>,
    pub(crate) highlight: Vec<Highlight>,
    pub(crate) open_comment: bool,
}

impl Row {
    /// Position of this row inside its store.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Raw bytes, tabs preserved.
    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Tab-expanded bytes used for display and column math.
    pub fn render(&self) -> &[u8] {
        &self.render
    }

    /// One highlight class per render byte.
    pub fn highlight(&self) -> &[Highlight] {
        &self.highlight
    }

    /// True when a multi-line comment is still open at the end of the row.
    pub fn open_comment(&self) -> bool {
        self.open_comment
    }

    pub fn cx_to_rx(&self, cx: usize, tab_stop: usize) -> usize {
        tabs::char_to_render(&self.chars, cx, tab_stop)
    }

    pub fn rx_to_cx(&self, rx: usize, tab_stop: usize) -> usize {
        tabs::render_to_char(&self.chars, rx, tab_stop)
    }
}
