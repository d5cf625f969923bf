//! Per-row highlighting state machine.
//!
//! The scan walks render bytes left to right carrying four pieces of state:
//! previous-byte-is-separator, the active string quote (if any), the
//! multi-line comment flag (seeded by the caller from the previous row) and
//! the highlight of the previous byte. At every position the first matching
//! rule wins:
//!
//! 1. single-line comment start (outside strings and comments) colors the
//!    rest of the row and stops the scan;
//! 2. multi-line comment start/end (only when no string is active);
//! 3. string literal start / continuation, with backslash escaping the next
//!    byte;
//! 4. numeric literal (digit after a separator or number, `.` mid-number);
//! 5. keyword at a separator boundary, primary list before secondary list.

use crate::{Highlight, SyntaxDef, SyntaxFlags};

const SEPARATORS: &[u8] = b",.()+-/*=~%<>[];";

/// Bytes that terminate a word for number and keyword detection.
pub fn is_separator(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0 || SEPARATORS.contains(&b)
}

/// Classify `render` and report whether a multi-line comment is still open
/// at the end of the row.
///
/// Without a syntax definition every byte is `Normal` and no comment can be
/// open. The function is pure; running it twice on the same input yields the
/// same output.
pub fn highlight_row(
    render: &[u8],
    syntax: Option<&SyntaxDef>,
    starts_in_comment: bool,
) -> (Vec<Highlight>, bool) {
    let mut hl = vec![Highlight::Normal; render.len()];
    let Some(syntax) = syntax else {
        return (hl, false);
    };

    let scs = syntax.single_line_comment.as_bytes();
    let (mcs, mce) = syntax
        .multi_line_comment
        .map(|(start, end)| (start.as_bytes(), end.as_bytes()))
        .unwrap_or((b"", b""));

    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;
    let mut in_comment = starts_in_comment;

    let mut i = 0;
    while i < render.len() {
        let c = render[i];
        let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };
        let rest = &render[i..];

        if !scs.is_empty() && in_string.is_none() && !in_comment && rest.starts_with(scs) {
            hl[i..].fill(Highlight::Comment);
            break;
        }

        if !mcs.is_empty() && !mce.is_empty() && in_string.is_none() {
            if in_comment {
                if rest.starts_with(mce) {
                    hl[i..i + mce.len()].fill(Highlight::MlComment);
                    i += mce.len();
                    in_comment = false;
                    prev_sep = true;
                } else {
                    hl[i] = Highlight::MlComment;
                    i += 1;
                }
                continue;
            } else if rest.starts_with(mcs) {
                hl[i..i + mcs.len()].fill(Highlight::MlComment);
                i += mcs.len();
                in_comment = true;
                continue;
            }
        }

        if syntax.flags.contains(SyntaxFlags::STRINGS) {
            if let Some(quote) = in_string {
                hl[i] = Highlight::String;
                if c == b'\\' && i + 1 < render.len() {
                    hl[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if c == b'"' || c == b'\'' {
                in_string = Some(c);
                hl[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if syntax.flags.contains(SyntaxFlags::NUMBERS)
            && ((c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (c == b'.' && prev_hl == Highlight::Number))
        {
            hl[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep && let Some((len, class)) = match_keyword(rest, syntax) {
            hl[i..i + len].fill(class);
            i += len;
            prev_sep = false;
            continue;
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    (hl, in_comment)
}

/// Longest keyword at the start of `rest` that is followed by a separator or
/// the end of the row. Primary keywords take precedence over type keywords.
fn match_keyword(rest: &[u8], syntax: &SyntaxDef) -> Option<(usize, Highlight)> {
    let lists = [
        (syntax.keywords, Highlight::Keyword1),
        (syntax.type_keywords, Highlight::Keyword2),
    ];
    for (list, class) in lists {
        let best = list
            .iter()
            .map(|kw| kw.as_bytes())
            .filter(|kw| {
                rest.starts_with(kw) && rest.get(kw.len()).is_none_or(|&b| is_separator(b))
            })
            .map(<[u8]>::len)
            .max();
        if let Some(len) = best {
            return Some((len, class));
        }
    }
    None
}
