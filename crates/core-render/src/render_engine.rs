//! Full-frame assembly.

use crate::color;
use crate::status::{StatusContext, format_message, format_status};
use core_state::EditorState;
use core_syntax::Highlight;
use std::io::{self, Write};
use std::time::Instant;

pub const WELCOME: &str = concat!("Kiln editor -- version ", env!("CARGO_PKG_VERSION"));

const HIDE_CURSOR: &[u8] = b"\x1b[?25l";
const SHOW_CURSOR: &[u8] = b"\x1b[?25h";
const HOME: &[u8] = b"\x1b[H";
const CLEAR_LINE: &[u8] = b"\x1b[K";
const INVERSE: &[u8] = b"\x1b[7m";
const RESET: &[u8] = b"\x1b[m";
const DEFAULT_FG: &[u8] = b"\x1b[39m";

#[derive(Debug, Default)]
pub struct RenderEngine {
    frames: u64,
    last_frame_len: usize,
}

fn push_color(buf: &mut Vec<u8>, code: u8) {
    buf.extend_from_slice(format!("\x1b[1;{code}m").as_bytes());
}

impl RenderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_frame_len(&self) -> usize {
        self.last_frame_len
    }

    /// Scroll the viewport to the cursor and compose one full frame.
    pub fn render_frame(&mut self, state: &mut EditorState, now: Instant) -> Vec<u8> {
        let started = Instant::now();
        state
            .viewport
            .scroll(&mut state.cursor, &state.rows, state.scroll_margin);

        let mut buf = Vec::with_capacity(
            (state.viewport.height + 2) * (state.viewport.width + 16) + 32,
        );
        buf.extend_from_slice(HIDE_CURSOR);
        buf.extend_from_slice(HOME);
        draw_rows(state, &mut buf);
        draw_status_bar(state, &mut buf);
        draw_message_bar(state, now, &mut buf);

        let vp = &state.viewport;
        let cy = state.cursor.cy.saturating_sub(vp.row_offset) + 1;
        let cx = state.cursor.rx.saturating_sub(vp.col_offset) + 1;
        buf.extend_from_slice(format!("\x1b[{cy};{cx}H").as_bytes());
        buf.extend_from_slice(SHOW_CURSOR);

        self.frames += 1;
        self.last_frame_len = buf.len();
        tracing::trace!(
            target: "render",
            frame = self.frames,
            bytes = buf.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "frame"
        );
        buf
    }

    /// Compose a frame and write it with a single `write_all`.
    pub fn render<W: Write>(&mut self, state: &mut EditorState, out: &mut W) -> io::Result<()> {
        let frame = self.render_frame(state, Instant::now());
        out.write_all(&frame)?;
        out.flush()
    }
}

fn draw_rows(state: &EditorState, buf: &mut Vec<u8>) {
    let vp = &state.viewport;
    for y in 0..vp.height {
        let file_row = y + vp.row_offset;
        match state.rows.get(file_row) {
            Some(row) => {
                let render = row.render();
                let start = vp.col_offset.min(render.len());
                let end = (vp.col_offset + vp.width).min(render.len());
                draw_cells(&render[start..end], &row.highlight()[start..end], buf);
            }
            None if state.rows.is_empty() && y == vp.height / 3 => {
                draw_welcome(vp.width, buf);
            }
            None => buf.push(b'~'),
        }
        buf.extend_from_slice(CLEAR_LINE);
        buf.extend_from_slice(b"\r\n");
    }
}

fn draw_welcome(width: usize, buf: &mut Vec<u8>) {
    let text = &WELCOME.as_bytes()[..WELCOME.len().min(width)];
    let mut padding = (width - text.len()) / 2;
    if padding > 0 {
        buf.push(b'~');
        padding -= 1;
    }
    buf.resize(buf.len() + padding, b' ');
    buf.extend_from_slice(text);
}

fn draw_cells(chars: &[u8], hl: &[Highlight], buf: &mut Vec<u8>) {
    let mut current: Option<u8> = None;
    for (&c, &class) in chars.iter().zip(hl) {
        if c.is_ascii_control() {
            let glyph = if c <= 26 { b'@' + c } else { b'?' };
            buf.extend_from_slice(INVERSE);
            buf.push(glyph);
            buf.extend_from_slice(RESET);
            if let Some(code) = current {
                push_color(buf, code);
            }
        } else if class == Highlight::Normal {
            if current.take().is_some() {
                buf.extend_from_slice(DEFAULT_FG);
            }
            buf.push(c);
        } else {
            let code = color(class);
            if current != Some(code) {
                current = Some(code);
                push_color(buf, code);
            }
            buf.push(c);
        }
    }
    buf.extend_from_slice(DEFAULT_FG);
}

fn draw_status_bar(state: &EditorState, buf: &mut Vec<u8>) {
    let name = state.display_name();
    let ctx = StatusContext {
        file_name: name.as_deref(),
        line_count: state.rows.len(),
        dirty: state.is_dirty(),
        file_type: state.file_type(),
        line: state.cursor.cy,
    };
    buf.extend_from_slice(INVERSE);
    buf.extend_from_slice(&format_status(&ctx, state.viewport.width));
    buf.extend_from_slice(RESET);
    buf.extend_from_slice(b"\r\n");
}

fn draw_message_bar(state: &EditorState, now: Instant, buf: &mut Vec<u8>) {
    buf.extend_from_slice(CLEAR_LINE);
    if let Some(msg) = state.visible_status(now) {
        buf.extend_from_slice(format_message(msg, state.viewport.width));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cells(chars: &[u8], hl: &[Highlight]) -> String {
        let mut buf = Vec::new();
        draw_cells(chars, hl, &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn color_runs_emit_once() {
        use Highlight::*;
        let out = cells(b"ab12c", &[Normal, Normal, Number, Number, Normal]);
        assert_eq!(out, "ab\x1b[1;35m12\x1b[39mc\x1b[39m");
    }

    #[test]
    fn control_byte_glyph_restores_color() {
        use Highlight::*;
        let out = cells(b"\"\x01\"", &[String, String, String]);
        assert_eq!(out, "\x1b[1;31m\"\x1b[7mA\x1b[m\x1b[1;31m\"\x1b[39m");
        let out = cells(b"\x7f", &[Normal]);
        assert_eq!(out, "\x1b[7m?\x1b[m\x1b[39m");
    }

    #[test]
    fn welcome_is_centered_with_tilde() {
        let mut buf = Vec::new();
        draw_welcome(WELCOME.len() + 10, &mut buf);
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, format!("~    {WELCOME}"));
        let mut buf = Vec::new();
        draw_welcome(5, &mut buf);
        assert_eq!(buf, &WELCOME.as_bytes()[..5]);
    }
}
