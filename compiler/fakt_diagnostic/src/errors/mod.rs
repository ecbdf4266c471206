//! Embedded documentation for `fakt explain`.
//!
//! Each code has a markdown file in this directory, embedded at compile time.

use crate::ErrorCode;

/// Registry of embedded diagnostic documentation.
pub struct ErrorDocs;

impl ErrorDocs {
    /// Documentation for a code, if any.
    pub fn get(code: ErrorCode) -> Option<&'static str> {
        DOCS.iter().find(|(c, _)| *c == code).map(|(_, doc)| *doc)
    }

    /// All documented codes.
    pub fn all_codes() -> impl Iterator<Item = ErrorCode> {
        DOCS.iter().map(|(code, _)| *code)
    }
}

static DOCS: &[(ErrorCode, &str)] = &[
    (ErrorCode::F0001, include_str!("F0001.md")),
    (ErrorCode::F0002, include_str!("F0002.md")),
    (ErrorCode::F0003, include_str!("F0003.md")),
    (ErrorCode::F0004, include_str!("F0004.md")),
    (ErrorCode::F0005, include_str!("F0005.md")),
    (ErrorCode::F0006, include_str!("F0006.md")),
    (ErrorCode::F0007, include_str!("F0007.md")),
    (ErrorCode::F0008, include_str!("F0008.md")),
    (ErrorCode::F0009, include_str!("F0009.md")),
];

#[cfg(test)]
mod tests;
