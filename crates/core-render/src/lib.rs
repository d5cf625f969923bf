//! Screen compositor.
//!
//! Each frame is assembled into a single byte buffer and written to the
//! terminal with one `write_all`, so the terminal never shows a half-drawn
//! screen. The frame is a full repaint: hide cursor, home, every text row
//! (each cleared to end of line), the inverse-video status bar, the message
//! line, then the cursor is positioned and shown again.
//!
//! Color escapes are emitted only when the highlight class changes between
//! adjacent cells. Control bytes in the render buffer are shown as an
//! inverse-video glyph (`^A` style, printed as `A`).

pub mod render_engine;
pub mod status;

pub use render_engine::{RenderEngine, WELCOME};
pub use status::{StatusContext, format_message, format_status};

use core_syntax::Highlight;

/// ANSI foreground code used for a highlight class.
pub fn color(hl: Highlight) -> u8 {
    match hl {
        Highlight::Comment | Highlight::MlComment => 32,
        Highlight::Keyword1 => 33,
        Highlight::Keyword2 => 36,
        Highlight::String => 31,
        Highlight::Number => 35,
        Highlight::Match => 34,
        Highlight::Normal => 37,
    }
}
