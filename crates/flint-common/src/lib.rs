//! Shared primitives for the flint linter.
//!
//! Every flint crate that touches source text or wire bytes builds on this
//! crate: byte-offset spans into an immutable UTF-8 source buffer, escape-
//! resolved identifiers, the token tags attached to variable-form
//! expressions, and a bounds-checked little-endian byte reader used by the
//! trace decoder.

pub mod binary;
pub mod ident;
pub mod span;
pub mod token;

pub use binary::{ByteReader, Incomplete};
pub use ident::Identifier;
pub use span::{LineIndex, Span};
pub use token::TokenType;
