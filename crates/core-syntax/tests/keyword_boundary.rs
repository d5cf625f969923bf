//! Keyword detection only fires at separator boundaries on both sides.

use core_syntax::{Highlight, highlight_row, select_syntax};
use pretty_assertions::assert_eq;

#[test]
fn keyword_without_trailing_separator_is_not_highlighted() {
    let syntax = select_syntax("main.c");
    let (hl, _) = highlight_row(b"intX = 1;", syntax, false);
    assert!(
        hl[..4].iter().all(|h| *h == Highlight::Normal),
        "`int` glued to `X` must stay normal: {hl:?}"
    );
    assert_eq!(hl[7], Highlight::Number);
}

#[test]
fn keyword_followed_by_separator_is_highlighted() {
    let syntax = select_syntax("main.c");
    let (hl, _) = highlight_row(b"int x = 1;", syntax, false);
    assert_eq!(&hl[..3], &[Highlight::Keyword2; 3]);
    assert_eq!(hl[3], Highlight::Normal);
    assert_eq!(hl[8], Highlight::Number);
}

#[test]
fn keyword_requires_leading_separator() {
    let syntax = select_syntax("main.c");
    let (hl, _) = highlight_row(b"xif (a)", syntax, false);
    assert!(hl[..3].iter().all(|h| *h == Highlight::Normal));
}

#[test]
fn keyword_at_end_of_row_matches() {
    let syntax = select_syntax("main.c");
    let (hl, _) = highlight_row(b"} else", syntax, false);
    assert_eq!(&hl[2..], &[Highlight::Keyword1; 4]);
}

#[test]
fn rust_definition_highlights_fn_and_types() {
    let syntax = select_syntax("lib.rs");
    let (hl, _) = highlight_row(b"fn f(x: u8)", syntax, false);
    assert_eq!(&hl[..2], &[Highlight::Keyword1; 2]);
    // `u8` follows a space, so it starts at a boundary.
    assert_eq!(&hl[8..10], &[Highlight::Keyword2; 2]);
}
