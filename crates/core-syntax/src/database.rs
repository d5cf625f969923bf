//! Static syntax definitions and filename based selection.
//!
//! Matching rules (first entry wins, table order):
//! * A pattern starting with `.` must equal the file name's extension
//!   (everything from the last `.` onward).
//! * Any other pattern matches when it occurs anywhere in the file name.

use bitflags::bitflags;

bitflags! {
    /// Optional highlighting features of a syntax definition.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SyntaxFlags: u8 {
        const NUMBERS = 0b0000_0001;
        const STRINGS = 0b0000_0010;
    }
}

/// Immutable highlighting ruleset for one file type.
#[derive(Debug)]
pub struct SyntaxDef {
    /// Label shown in the status bar.
    pub file_type: &'static str,
    pub file_match: &'static [&'static str],
    /// Primary keywords (control flow, declarations).
    pub keywords: &'static [&'static str],
    /// Secondary keywords, rendered in a distinct class (type names).
    pub type_keywords: &'static [&'static str],
    /// Empty string disables single-line comments.
    pub single_line_comment: &'static str,
    pub multi_line_comment: Option<(&'static str, &'static str)>,
    pub flags: SyntaxFlags,
}

static C_SYNTAX: SyntaxDef = SyntaxDef {
    file_type: "c",
    file_match: &[".c", ".h", ".cpp"],
    keywords: &[
        "switch", "if", "while", "for", "break", "continue", "return", "else", "struct", "union",
        "typedef", "static", "enum", "class", "case",
    ],
    type_keywords: &[
        "int", "long", "double", "float", "char", "unsigned", "signed", "void",
    ],
    single_line_comment: "//",
    multi_line_comment: Some(("/*", "*/")),
    flags: SyntaxFlags::NUMBERS.union(SyntaxFlags::STRINGS),
};

static RUST_SYNTAX: SyntaxDef = SyntaxDef {
    file_type: "rust",
    file_match: &[".rs"],
    keywords: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
        "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "type",
        "unsafe", "use", "where", "while",
    ],
    type_keywords: &[
        "bool", "char", "str", "String", "Vec", "Option", "Result", "Box", "i8", "i16", "i32",
        "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize", "f32", "f64",
    ],
    single_line_comment: "//",
    multi_line_comment: Some(("/*", "*/")),
    flags: SyntaxFlags::NUMBERS.union(SyntaxFlags::STRINGS),
};

/// Every known syntax definition, in match priority order.
pub static DATABASE: &[&SyntaxDef] = &[&C_SYNTAX, &RUST_SYNTAX];

/// Select the syntax definition for `file_name`; `None` disables highlighting.
pub fn select_syntax(file_name: &str) -> Option<&'static SyntaxDef> {
    let ext = file_name.rfind('.').map(|idx| &file_name[idx..]);
    let selected = DATABASE.iter().copied().find(|syntax| {
        syntax.file_match.iter().any(|pattern| {
            if pattern.starts_with('.') {
                ext == Some(*pattern)
            } else {
                file_name.contains(pattern)
            }
        })
    });
    tracing::debug!(
        target: "syntax",
        file_name,
        file_type = selected.map(|s| s.file_type),
        "syntax_selected"
    );
    selected
}
