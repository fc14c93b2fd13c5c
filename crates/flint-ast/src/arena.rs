//! Bump arena that owns every node of an expression tree.
//!
//! The parser allocates nodes, child-pointer arrays, and object-entry
//! arrays here and wires them together with plain `&'arena` references.
//! Nothing is freed per node: dropping the arena releases the whole tree
//! in one step. Allocation failure aborts the process, so a reference
//! handed out by the arena always points at a fully constructed value.

use bumpalo::Bump;
use flint_common::{Identifier, Span};

use crate::expr::Expression;

/// Marker for types the arena may store.
///
/// The arena frees its storage without running destructors, so a stored
/// type must be safe to wink out: everything it owns must itself be arena
/// storage (or no storage at all). Implementing this trait is that claim.
/// Types holding a growable buffer must back the buffer with the arena's
/// allocator before opting in — see
/// [`BufferedVisits`](crate::visit::BufferedVisits).
pub trait ArenaAllocatable {}

impl ArenaAllocatable for Span {}
impl ArenaAllocatable for Identifier<'_> {}
impl<'a> ArenaAllocatable for &'a Expression<'a> {}

/// Arena for expression trees.
///
/// All `alloc*` return values borrow the arena; the borrow checker keeps
/// every node reference from outliving the storage it points into.
pub struct ExpressionArena {
    bump: Bump,
}

impl ExpressionArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// The underlying bump allocator.
    ///
    /// Exposed so callers can build [`bumpalo::collections::Vec`]s backed
    /// by this arena and later adopt their storage with
    /// [`make_array`](Self::make_array) without copying.
    pub fn allocator(&self) -> &Bump {
        &self.bump
    }

    /// Allocate one expression node, initialized in place.
    pub fn alloc<'a>(&'a self, expression: Expression<'a>) -> &'a Expression<'a> {
        self.bump.alloc(expression)
    }

    /// Copy a slice into arena storage.
    pub fn alloc_slice<'a, T>(&'a self, items: &[T]) -> &'a [T]
    where
        T: ArenaAllocatable + Copy,
    {
        self.bump.alloc_slice_copy(items)
    }

    /// Copy a string into arena storage.
    ///
    /// Used for normalized identifier names whose spelling contained
    /// escape sequences: the resolved text must live as long as the nodes
    /// that reference it.
    pub fn alloc_str<'a>(&'a self, text: &str) -> &'a str {
        self.bump.alloc_str(text)
    }

    /// Adopt the storage of a vector already built on this arena's
    /// allocator, without copying its elements.
    pub fn make_array<'a, T>(&'a self, items: bumpalo::collections::Vec<'a, T>) -> &'a [T]
    where
        T: ArenaAllocatable,
    {
        items.into_bump_slice()
    }

    /// Start an empty vector backed by this arena.
    pub fn new_vec<T>(&self) -> bumpalo::collections::Vec<'_, T> {
        bumpalo::collections::Vec::new_in(&self.bump)
    }
}

impl Default for ExpressionArena {
    fn default() -> Self {
        Self::new()
    }
}
