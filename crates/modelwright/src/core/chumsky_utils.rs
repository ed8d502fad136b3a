//! Shared chumsky parser utilities for diagram parsing

use chumsky::prelude::*;

/// Parse optional whitespace including newlines.
///
/// Uses explicit character matching to avoid the "repeated combinator making no progress"
/// issue that can occur with `chumsky::text::whitespace().repeated()`.
pub fn optional_whitespace<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t\n\r").repeated().ignored()
}

/// Parse required whitespace (at least one whitespace/newline character).
pub fn whitespace_required<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t\n\r").repeated().at_least(1).ignored()
}

/// Parse inline whitespace only (spaces and tabs, no newlines).
///
/// Association grammars are line-based and must not run into the next line.
pub fn inline_whitespace<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").repeated().ignored()
}

/// Succeed without consuming if the next character is a space or tab.
pub fn followed_by_inline_whitespace<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").ignored().rewind()
}

/// Parse an identifier into an owned string.
pub fn identifier<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    text::ident().map(|s: &str| s.to_string())
}

/// Parse a Mermaid-style comment (%% to end of line).
pub fn mermaid_comment<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    just("%%").ignore_then(none_of('\n').repeated()).ignored()
}
