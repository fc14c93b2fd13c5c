//! Expression tree for the flint linter.
//!
//! The parser allocates every expression node in an [`ExpressionArena`] and
//! wires nodes together with plain references; no node owns another, and
//! the whole tree is freed in one step when the arena drops. Each node is a
//! variant of the closed [`Expression`] union, and all of them answer the
//! same uniform surface — [`Expression::kind`], [`Expression::span`],
//! [`Expression::children`] — so lint rules can walk any tree without
//! caring which of the several dozen kinds they are standing on.
//!
//! TypeScript-only constructs (type assertions, non-null assertions,
//! optional chaining tails, type annotations) and JSX elements are ordinary
//! kinds in the same union; there is no separate TS or JSX tree.

pub mod arena;
pub mod diag;
pub mod expr;
pub mod kind;
pub mod visit;

pub use arena::{ArenaAllocatable, ExpressionArena};
pub use diag::{DiagReporter, MissingExpressionDiag};
pub use expr::{
    is_intrinsic_jsx_tag, Assignment, AsTypeAssertion, ArrowFunction, BinaryOperator, Call,
    Expression, JsxContainer, Literal, NonNullAssertion, ObjectPropertyValuePair, Optional,
    ParenEmpty, PrefixOperator, TaggedTemplateLiteral, TrailingComma, TypeAnnotated,
};
pub use kind::{ExpressionKind, FunctionAttributes};
pub use visit::{BufferedVisits, ParseVisitor, Visit};
