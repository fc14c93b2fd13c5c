use serde::Serialize;

use crate::span::Span;

/// An identifier as written in the source, plus its normalized name.
///
/// JavaScript identifiers may contain Unicode escape sequences
/// (`\u0041bc` spells `Abc`), so the spelling in the source buffer and the
/// name the identifier denotes can differ. The normalized name is the view
/// with escapes resolved. When an identifier contains no escapes the
/// normalized name is simply the spanned source text; when it does, the
/// lexer allocates the resolved string next to the AST and passes it here.
///
/// The type is `Copy` and two words wide; pass it by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Identifier<'a> {
    span: Span,
    normalized: &'a str,
}

impl<'a> Identifier<'a> {
    /// Create an identifier from its span and an explicitly normalized name.
    ///
    /// Use this form when the spelling contains escape sequences and the
    /// caller has already resolved them.
    pub fn new(span: Span, normalized: &'a str) -> Self {
        Self { span, normalized }
    }

    /// Create an identifier whose spelling contains no escape sequences.
    ///
    /// The normalized name is the spanned slice of `source` itself.
    pub fn from_source(source: &'a str, span: Span) -> Self {
        Self {
            span,
            normalized: span.text_in(source),
        }
    }

    /// The source location of the identifier as written.
    pub fn span(&self) -> Span {
        self.span
    }

    /// The identifier's name with escape sequences resolved.
    pub fn normalized_name(&self) -> &'a str {
        self.normalized
    }
}
