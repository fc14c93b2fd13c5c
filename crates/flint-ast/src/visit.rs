//! Parse-visit callbacks and the buffered visit log.
//!
//! While parsing a TypeScript type annotation, the parser cannot deliver
//! scope and use events to its visitor right away: whether the annotated
//! expression is a binding or a use is only known once the surrounding
//! expression finishes. The annotation's events are therefore recorded into
//! a [`BufferedVisits`] log stored inside the
//! [`TypeAnnotated`](crate::expr::TypeAnnotated) node and replayed later,
//! in order, once the consumer decides.

use flint_common::Identifier;

use crate::arena::{ArenaAllocatable, ExpressionArena};

/// The visit callbacks a type annotation can produce.
///
/// The lifetime ties borrowed identifier names to the arena that backs the
/// tree being visited.
pub trait ParseVisitor<'a> {
    /// A type name was referenced, e.g. `T` in `x: Array<T>`.
    fn visit_type_use(&mut self, name: Identifier<'a>);
    /// A scope for type parameters opened.
    fn visit_enter_type_scope(&mut self);
    /// The matching scope closed.
    fn visit_exit_type_scope(&mut self);
}

/// One recorded visit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit<'a> {
    TypeUse(Identifier<'a>),
    EnterTypeScope,
    ExitTypeScope,
}

/// An in-order log of visit events, recorded now and replayed later.
///
/// The log implements [`ParseVisitor`] itself, so the parser can point its
/// type-annotation visitation at a `BufferedVisits` exactly as it would at
/// a real consumer. Storage is backed by the expression arena: the log can
/// be stored inside an arena-allocated node and winked out with it, which
/// is why it opts into [`ArenaAllocatable`] despite carrying a growable
/// buffer.
#[derive(Debug)]
pub struct BufferedVisits<'a> {
    visits: bumpalo::collections::Vec<'a, Visit<'a>>,
}

impl ArenaAllocatable for BufferedVisits<'_> {}
impl ArenaAllocatable for Visit<'_> {}

impl<'a> BufferedVisits<'a> {
    /// Create an empty log backed by `arena`.
    pub fn new_in(arena: &'a ExpressionArena) -> Self {
        Self {
            visits: bumpalo::collections::Vec::new_in(arena.allocator()),
        }
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Deliver every recorded event to `visitor`, in recording order.
    pub fn replay(&self, visitor: &mut impl ParseVisitor<'a>) {
        for visit in self.visits.iter() {
            match *visit {
                Visit::TypeUse(name) => visitor.visit_type_use(name),
                Visit::EnterTypeScope => visitor.visit_enter_type_scope(),
                Visit::ExitTypeScope => visitor.visit_exit_type_scope(),
            }
        }
    }
}

impl<'a> ParseVisitor<'a> for BufferedVisits<'a> {
    fn visit_type_use(&mut self, name: Identifier<'a>) {
        self.visits.push(Visit::TypeUse(name));
    }

    fn visit_enter_type_scope(&mut self) {
        self.visits.push(Visit::EnterTypeScope);
    }

    fn visit_exit_type_scope(&mut self) {
        self.visits.push(Visit::ExitTypeScope);
    }
}

#[cfg(test)]
mod tests {
    use flint_common::Span;

    use super::*;

    /// Collects callbacks as readable strings for order assertions.
    #[derive(Default)]
    struct EventLog {
        events: Vec<String>,
    }

    impl<'a> ParseVisitor<'a> for EventLog {
        fn visit_type_use(&mut self, name: Identifier<'a>) {
            self.events.push(format!("use {}", name.normalized_name()));
        }

        fn visit_enter_type_scope(&mut self) {
            self.events.push("enter".to_string());
        }

        fn visit_exit_type_scope(&mut self) {
            self.events.push("exit".to_string());
        }
    }

    #[test]
    fn replay_preserves_recording_order() {
        let source = "x: Array<T>";
        let arena = ExpressionArena::new();
        let mut buffered = BufferedVisits::new_in(&arena);
        buffered.visit_enter_type_scope();
        buffered.visit_type_use(Identifier::from_source(source, Span::new(3, 8)));
        buffered.visit_type_use(Identifier::from_source(source, Span::new(9, 10)));
        buffered.visit_exit_type_scope();
        assert_eq!(buffered.len(), 4);

        let mut log = EventLog::default();
        buffered.replay(&mut log);
        assert_eq!(log.events, ["enter", "use Array", "use T", "exit"]);
    }

    #[test]
    fn replay_twice_delivers_the_same_events() {
        let source = "n: number";
        let arena = ExpressionArena::new();
        let mut buffered = BufferedVisits::new_in(&arena);
        buffered.visit_type_use(Identifier::from_source(source, Span::new(3, 9)));

        let mut first = EventLog::default();
        let mut second = EventLog::default();
        buffered.replay(&mut first);
        buffered.replay(&mut second);
        assert_eq!(first.events, second.events);
    }

    #[test]
    fn empty_log_replays_nothing() {
        let arena = ExpressionArena::new();
        let buffered = BufferedVisits::new_in(&arena);
        assert!(buffered.is_empty());

        let mut log = EventLog::default();
        buffered.replay(&mut log);
        assert!(log.events.is_empty());
    }
}
