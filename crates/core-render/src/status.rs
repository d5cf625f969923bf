//! Status bar and message line composition.
//!
//! Status bar format: `<name> - <n> lines <(modified)>` on the left and
//! `<filetype> | <line>/<n>` flush right. The name is cut to 20 bytes and an
//! unnamed buffer shows `[No Name]`. When the left part leaves no room for
//! the right part the right part is dropped and the bar is space-padded.

/// Inputs needed to compose the status bar.
pub struct StatusContext<'a> {
    pub file_name: Option<&'a str>,
    pub line_count: usize,
    pub dirty: bool,
    pub file_type: Option<&'a str>,
    /// 0-based cursor row.
    pub line: usize,
}

const NAME_MAX: usize = 20;

fn truncate_bytes(s: &str, max: usize) -> &[u8] {
    let bytes = s.as_bytes();
    &bytes[..bytes.len().min(max)]
}

/// Exactly `width` bytes of status bar text (no escapes).
pub fn format_status(ctx: &StatusContext<'_>, width: usize) -> Vec<u8> {
    let mut left = Vec::with_capacity(width);
    left.extend_from_slice(truncate_bytes(ctx.file_name.unwrap_or("[No Name]"), NAME_MAX));
    left.extend_from_slice(
        format!(
            " - {} lines {}",
            ctx.line_count,
            if ctx.dirty { "(modified)" } else { "" }
        )
        .as_bytes(),
    );
    let right = format!(
        "{} | {}/{}",
        ctx.file_type.unwrap_or("no ft"),
        ctx.line + 1,
        ctx.line_count
    );

    left.truncate(width);
    let gap = width - left.len();
    if gap >= right.len() {
        left.resize(width - right.len(), b' ');
        left.extend_from_slice(right.as_bytes());
    } else {
        left.resize(width, b' ');
    }
    left
}

/// Message line text clipped to `width`.
pub fn format_message(msg: &str, width: usize) -> &[u8] {
    truncate_bytes(msg, width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx<'a>(name: Option<&'a str>, ft: Option<&'a str>, dirty: bool) -> StatusContext<'a> {
        StatusContext {
            file_name: name,
            line_count: 12,
            dirty,
            file_type: ft,
            line: 3,
        }
    }

    fn s(v: Vec<u8>) -> String {
        String::from_utf8(v).unwrap()
    }

    #[test]
    fn unnamed_clean_buffer() {
        let out = s(format_status(&ctx(None, None, false), 40));
        assert_eq!(out, "[No Name] - 12 lines        no ft | 4/12");
        assert_eq!(out.len(), 40);
    }

    #[test]
    fn dirty_named_with_filetype() {
        let out = s(format_status(&ctx(Some("main.c"), Some("c"), true), 40));
        assert_eq!(out, "main.c - 12 lines (modified)    c | 4/12");
    }

    #[test]
    fn long_name_is_cut_to_twenty_bytes() {
        let name = "a_really_long_file_name_indeed.rs";
        let out = s(format_status(&ctx(Some(name), Some("rust"), false), 80));
        assert!(out.starts_with("a_really_long_file_n - 12 lines"));
        assert!(out.ends_with("rust | 4/12"));
    }

    #[test]
    fn narrow_terminal_drops_right_part() {
        let out = s(format_status(&ctx(Some("main.c"), Some("c"), false), 20));
        assert_eq!(out, "main.c - 12 lines   ");
        let out = s(format_status(&ctx(Some("main.c"), Some("c"), false), 5));
        assert_eq!(out, "main.");
    }

    #[test]
    fn message_is_clipped() {
        assert_eq!(format_message("hello world", 5), b"hello");
        assert_eq!(format_message("hi", 5), b"hi");
    }
}
