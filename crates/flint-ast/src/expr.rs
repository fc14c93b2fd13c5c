//! The expression node family.
//!
//! [`Expression`] is a closed tagged union: one variant per expression
//! kind, each carrying only its own payload. Nodes live in an
//! [`ExpressionArena`](crate::ExpressionArena) and reference each other
//! with plain `&'a` borrows — parents never own children, and child lists
//! are arena-allocated slices.
//!
//! Three payload structs are shared across variants because the kinds they
//! serve are structurally identical: [`PrefixOperator`] (the eight
//! operator-then-operand kinds), [`Assignment`] (the three assignment
//! kinds), and [`JsxContainer`] (the four JSX kinds). Everything else is
//! inline in its variant or in a kind-specific struct whose constructor
//! carries the kind's construction invariants.

use flint_common::{Identifier, Span, TokenType};

use crate::arena::ArenaAllocatable;
use crate::diag::{DiagReporter, MissingExpressionDiag};
use crate::kind::{ExpressionKind, FunctionAttributes};
use crate::visit::{BufferedVisits, ParseVisitor};

/// Signal a per-kind accessor called on the wrong kind.
///
/// This is a programmer error: callers are expected to check
/// [`Expression::kind`] before using kind-specific accessors.
fn unexpected_kind(accessor: &str, kind: ExpressionKind) -> ! {
    panic!("{accessor} is not supported for expression kind {kind:?}")
}

// ── Shared payloads ──────────────────────────────────────────────────────

/// Payload of every prefix-operator expression: `delete x`, `typeof x`,
/// `await x`, `++x`, `...x`, `-x`, `yield* x`, `yield x`.
#[derive(Debug, Clone, Copy)]
pub struct PrefixOperator<'a> {
    operator_begin: u32,
    operator_len: u32,
    pub child: &'a Expression<'a>,
}

impl<'a> PrefixOperator<'a> {
    /// Create a prefix payload from the operator's span and its operand.
    pub fn new(operator_span: Span, child: &'a Expression<'a>) -> Self {
        Self {
            operator_begin: operator_span.start,
            operator_len: operator_span.len(),
            child,
        }
    }

    /// The span of the operator token itself.
    pub fn operator_span(&self) -> Span {
        Span::new(self.operator_begin, self.operator_begin + self.operator_len)
    }
}

/// Payload shared by `=`, compound (`+=`, ...), and conditional
/// (`??=`, `||=`, `&&=`) assignments.
#[derive(Debug, Clone, Copy)]
pub struct Assignment<'a> {
    /// `[lhs, rhs]`.
    pub children: [&'a Expression<'a>; 2],
    /// The span of the assignment operator token.
    pub operator_span: Span,
}

impl<'a> Assignment<'a> {
    pub fn new(lhs: &'a Expression<'a>, rhs: &'a Expression<'a>, operator_span: Span) -> Self {
        Self {
            children: [lhs, rhs],
            operator_span,
        }
    }

    pub fn lhs(&self) -> &'a Expression<'a> {
        self.children[0]
    }

    pub fn rhs(&self) -> &'a Expression<'a> {
        self.children[1]
    }
}

/// Payload shared by the four JSX kinds: the covering span and the child
/// expressions (attribute values and element children, in source order).
#[derive(Debug, Clone, Copy)]
pub struct JsxContainer<'a> {
    pub span: Span,
    pub children: &'a [&'a Expression<'a>],
}

// ── Kind-specific payloads ───────────────────────────────────────────────

/// A number, string, boolean, `null`, or regexp literal.
#[derive(Debug, Clone, Copy)]
pub struct Literal {
    pub span: Span,
}

impl Literal {
    /// Whether this is the `null` literal. Keyword literals are
    /// distinguished by their first byte; only `null` starts with `n`.
    pub fn is_null(&self, source: &str) -> bool {
        self.span.first_byte_in(source) == Some(b'n')
    }

    /// Whether this is a regexp literal (the only literal form that can
    /// start with `/`).
    pub fn is_regexp(&self, source: &str) -> bool {
        self.span.first_byte_in(source) == Some(b'/')
    }
}

/// `(params) => body` or `param => body`.
///
/// Invariant: when the parameter list has no opening position (a single
/// unparenthesized parameter), there is at least one parameter to anchor
/// the span at.
#[derive(Debug, Clone, Copy)]
pub struct ArrowFunction<'a> {
    pub attributes: FunctionAttributes,
    parameter_list_begin: Option<u32>,
    pub span_end: u32,
    pub parameters: &'a [&'a Expression<'a>],
}

impl<'a> ArrowFunction<'a> {
    /// An arrow whose parameter list starts with `(` at
    /// `parameter_list_begin` (possibly with no parameters inside).
    pub fn new(attributes: FunctionAttributes, parameter_list_begin: u32, span_end: u32) -> Self {
        Self {
            attributes,
            parameter_list_begin: Some(parameter_list_begin),
            span_end,
            parameters: &[],
        }
    }

    /// An arrow with explicit parameters. `parameter_list_begin` is absent
    /// for the unparenthesized single-parameter form.
    pub fn with_parameters(
        attributes: FunctionAttributes,
        parameters: &'a [&'a Expression<'a>],
        parameter_list_begin: Option<u32>,
        span_end: u32,
    ) -> Self {
        if parameter_list_begin.is_none() {
            debug_assert!(
                !parameters.is_empty(),
                "an arrow without a parameter list opening must have a parameter"
            );
        }
        Self {
            attributes,
            parameter_list_begin,
            span_end,
            parameters,
        }
    }

    /// Byte offset of the `(` opening the parameter list, if there is one.
    pub fn parameter_list_begin(&self) -> Option<u32> {
        self.parameter_list_begin
    }
}

/// `expr as Type` (TypeScript only).
#[derive(Debug, Clone, Copy)]
pub struct AsTypeAssertion<'a> {
    pub child: &'a Expression<'a>,
    as_begin: u32,
    pub span_end: u32,
}

impl<'a> AsTypeAssertion<'a> {
    pub fn new(child: &'a Expression<'a>, as_span: Span, span_end: u32) -> Self {
        debug_assert_eq!(as_span.len(), 2, "the `as` keyword is two bytes");
        Self {
            child,
            as_begin: as_span.start,
            span_end,
        }
    }

    /// The span of the `as` keyword.
    pub fn as_span(&self) -> Span {
        Span::new(self.as_begin, self.as_begin + 2)
    }
}

/// One or more infix operators at the same precedence nesting,
/// e.g. `a + b + c` with children `[a, b, c]` and two operator spans.
#[derive(Debug, Clone, Copy)]
pub struct BinaryOperator<'a> {
    children: &'a [&'a Expression<'a>],
    operator_spans: &'a [Span],
}

impl<'a> BinaryOperator<'a> {
    /// Invariant: at least two children, and exactly one operator span
    /// between each adjacent pair.
    pub fn new(children: &'a [&'a Expression<'a>], operator_spans: &'a [Span]) -> Self {
        debug_assert!(children.len() >= 2);
        debug_assert_eq!(operator_spans.len(), children.len() - 1);
        Self {
            children,
            operator_spans,
        }
    }

    pub fn children(&self) -> &'a [&'a Expression<'a>] {
        self.children
    }

    /// One span per operator, left to right; `operator_spans()[i]` sits
    /// between `children()[i]` and `children()[i + 1]`.
    pub fn operator_spans(&self) -> &'a [Span] {
        self.operator_spans
    }
}

/// `callee(args)`: children are `[callee, arg0, arg1, ...]`.
#[derive(Debug, Clone, Copy)]
pub struct Call<'a> {
    children: &'a [&'a Expression<'a>],
    left_paren_begin: u32,
    pub span_end: u32,
}

impl<'a> Call<'a> {
    pub fn new(children: &'a [&'a Expression<'a>], left_paren_span: Span, span_end: u32) -> Self {
        debug_assert!(!children.is_empty(), "a call always has a callee");
        debug_assert_eq!(left_paren_span.len(), 1);
        Self {
            children,
            left_paren_begin: left_paren_span.start,
            span_end,
        }
    }

    pub fn children(&self) -> &'a [&'a Expression<'a>] {
        self.children
    }

    /// The span of the `(` that opens the argument list.
    pub fn left_paren_span(&self) -> Span {
        Span::new(self.left_paren_begin, self.left_paren_begin + 1)
    }
}

/// `expr!` (TypeScript only).
#[derive(Debug, Clone, Copy)]
pub struct NonNullAssertion<'a> {
    pub child: &'a Expression<'a>,
    bang_end: u32,
}

impl<'a> NonNullAssertion<'a> {
    pub fn new(child: &'a Expression<'a>, bang_span: Span) -> Self {
        debug_assert_eq!(bang_span.len(), 1);
        Self {
            child,
            bang_end: bang_span.end,
        }
    }

    /// The span of the `!`.
    pub fn bang_span(&self) -> Span {
        Span::new(self.bang_end - 1, self.bang_end)
    }
}

/// `expr?` in an optional-chain tail position (TypeScript only).
#[derive(Debug, Clone, Copy)]
pub struct Optional<'a> {
    pub child: &'a Expression<'a>,
    question_end: u32,
}

impl<'a> Optional<'a> {
    pub fn new(child: &'a Expression<'a>, question_span: Span) -> Self {
        debug_assert_eq!(question_span.len(), 1);
        Self {
            child,
            question_end: question_span.end,
        }
    }

    /// The span of the `?`.
    pub fn question_span(&self) -> Span {
        Span::new(self.question_end - 1, self.question_end)
    }
}

/// `()` with nothing inside.
#[derive(Debug, Clone, Copy)]
pub struct ParenEmpty {
    /// From the `(` through the `)`.
    pub span: Span,
}

impl ParenEmpty {
    /// The span of the `(`.
    pub fn left_paren_span(&self) -> Span {
        Span::new(self.span.start, self.span.start + 1)
    }

    /// The span of the `)`.
    pub fn right_paren_span(&self) -> Span {
        Span::new(self.span.end - 1, self.span.end)
    }

    /// Hand the reporter the spans describing the missing expression.
    pub fn report_missing_expression_error(&self, reporter: &mut impl DiagReporter) {
        reporter.report_missing_expression(MissingExpressionDiag {
            left_paren_to_right_paren: self.span,
            left_paren: self.left_paren_span(),
            right_paren: self.right_paren_span(),
        });
    }
}

/// ``tag`template` ``: children are `[tag, template_part0, ...]`.
#[derive(Debug, Clone, Copy)]
pub struct TaggedTemplateLiteral<'a> {
    children: &'a [&'a Expression<'a>],
    template_end: u32,
}

impl<'a> TaggedTemplateLiteral<'a> {
    pub fn new(children: &'a [&'a Expression<'a>], template_end: u32) -> Self {
        debug_assert!(!children.is_empty(), "the tag is always present");
        Self {
            children,
            template_end,
        }
    }

    pub fn children(&self) -> &'a [&'a Expression<'a>] {
        self.children
    }
}

/// `a, b,` — an expression list ended by a stray comma.
#[derive(Debug, Clone, Copy)]
pub struct TrailingComma<'a> {
    children: &'a [&'a Expression<'a>],
    comma_end: u32,
}

impl<'a> TrailingComma<'a> {
    pub fn new(children: &'a [&'a Expression<'a>], comma_span: Span) -> Self {
        debug_assert!(!children.is_empty());
        debug_assert_eq!(comma_span.len(), 1);
        Self {
            children,
            comma_end: comma_span.end,
        }
    }

    pub fn children(&self) -> &'a [&'a Expression<'a>] {
        self.children
    }

    /// The span of the trailing `,`.
    pub fn comma_span(&self) -> Span {
        Span::new(self.comma_end - 1, self.comma_end)
    }
}

/// `expr: Type` (TypeScript only), e.g. an annotated arrow parameter.
///
/// The annotation's parse-visit events are buffered inside the node and
/// replayed once the consumer knows how to interpret the annotated
/// expression; see [`BufferedVisits`].
#[derive(Debug)]
pub struct TypeAnnotated<'a> {
    pub child: &'a Expression<'a>,
    colon_begin: u32,
    pub type_visits: BufferedVisits<'a>,
    pub span_end: u32,
}

impl<'a> TypeAnnotated<'a> {
    pub fn new(
        child: &'a Expression<'a>,
        colon_span: Span,
        type_visits: BufferedVisits<'a>,
        span_end: u32,
    ) -> Self {
        debug_assert_eq!(colon_span.len(), 1);
        Self {
            child,
            colon_begin: colon_span.start,
            type_visits,
            span_end,
        }
    }

    /// The span of the `:`.
    pub fn colon_span(&self) -> Span {
        Span::new(self.colon_begin, self.colon_begin + 1)
    }

    /// Replay the buffered type-annotation visits into `visitor`.
    pub fn visit_type_annotation(&self, visitor: &mut impl ParseVisitor<'a>) {
        self.type_visits.replay(visitor);
    }
}

// ── Object entries ───────────────────────────────────────────────────────

/// One entry of an object literal.
///
/// `property` is absent for spread entries (`{ ...value }`); `init` is the
/// default expression of destructuring-style entries
/// (`{ property: value = init }`), and `init_equal_begin` locates the `=`
/// whenever `init` is present.
#[derive(Debug, Clone, Copy)]
pub struct ObjectPropertyValuePair<'a> {
    pub property: Option<&'a Expression<'a>>,
    pub value: &'a Expression<'a>,
    pub init: Option<&'a Expression<'a>>,
    init_equal_begin: u32,
}

impl ArenaAllocatable for ObjectPropertyValuePair<'_> {}

impl<'a> ObjectPropertyValuePair<'a> {
    /// An entry without a default expression.
    pub fn new(property: Option<&'a Expression<'a>>, value: &'a Expression<'a>) -> Self {
        Self {
            property,
            value,
            init: None,
            init_equal_begin: 0,
        }
    }

    /// An entry with a default expression; `init_equal_begin` is the byte
    /// offset of the `=`.
    pub fn with_init(
        property: Option<&'a Expression<'a>>,
        value: &'a Expression<'a>,
        init: &'a Expression<'a>,
        init_equal_begin: u32,
    ) -> Self {
        Self {
            property,
            value,
            init: Some(init),
            init_equal_begin,
        }
    }

    /// The span of the `=` before the default expression.
    ///
    /// # Panics
    ///
    /// Panics in debug builds when the entry has no `init`.
    pub fn init_equals_span(&self) -> Span {
        debug_assert!(self.init.is_some(), "entry has no default expression");
        Span::new(self.init_equal_begin, self.init_equal_begin + 1)
    }

    /// Whether this entry is the `{x}` shorthand, where one identifier is
    /// both the property name and the value: the property parsed as a
    /// literal, the value as a variable, and both start at the same byte.
    pub fn is_merged_property_and_value_shorthand(&self) -> bool {
        match self.property {
            Some(property) => {
                property.kind() == ExpressionKind::Literal
                    && self.value.kind() == ExpressionKind::Variable
                    && property.span().start == self.value.span().start
            }
            None => false,
        }
    }
}

// ── JSX helpers ──────────────────────────────────────────────────────────

/// Whether `tag` names an intrinsic element (`<div>`, `<my-widget>`)
/// rather than a component reference (`<Widget>`): the normalized name is
/// non-empty and starts with an ASCII lowercase letter or contains `-`.
pub fn is_intrinsic_jsx_tag(tag: &Identifier<'_>) -> bool {
    let name = tag.normalized_name();
    match name.as_bytes().first() {
        Some(first) => first.is_ascii_lowercase() || name.contains('-'),
        None => false,
    }
}

// ── Expression ───────────────────────────────────────────────────────────

/// An expression node. See the [module docs](self) for the layout rules.
#[derive(Debug)]
pub enum Expression<'a> {
    Class { span: Span },
    Delete(PrefixOperator<'a>),
    Invalid { span: Span },
    Missing { span: Span },
    New { children: &'a [&'a Expression<'a>], span: Span },
    Template { children: &'a [&'a Expression<'a>], span: Span },
    Typeof(PrefixOperator<'a>),
    Array { children: &'a [&'a Expression<'a>], span: Span },
    ArrowFunction(ArrowFunction<'a>),
    AngleTypeAssertion { bracketed_type_span: Span, child: &'a Expression<'a> },
    AsTypeAssertion(AsTypeAssertion<'a>),
    Assignment(Assignment<'a>),
    Await(PrefixOperator<'a>),
    BinaryOperator(BinaryOperator<'a>),
    Call(Call<'a>),
    CompoundAssignment(Assignment<'a>),
    Conditional { children: [&'a Expression<'a>; 3] },
    ConditionalAssignment(Assignment<'a>),
    Dot { child: &'a Expression<'a>, identifier: Identifier<'a> },
    Function { attributes: FunctionAttributes, span: Span },
    Import { span: Span },
    Index { children: [&'a Expression<'a>; 2], subscript_end: u32 },
    JsxElement { container: JsxContainer<'a>, tag: Identifier<'a> },
    JsxElementWithMembers { container: JsxContainer<'a>, members: &'a [Identifier<'a>] },
    JsxElementWithNamespace { container: JsxContainer<'a>, ns: Identifier<'a>, tag: Identifier<'a> },
    JsxFragment { container: JsxContainer<'a> },
    Literal(Literal),
    NamedFunction { attributes: FunctionAttributes, name: Identifier<'a>, span: Span },
    NewTarget { span: Span },
    NonNullAssertion(NonNullAssertion<'a>),
    Object { entries: &'a [ObjectPropertyValuePair<'a>], span: Span },
    Optional(Optional<'a>),
    Paren { span: Span, child: &'a Expression<'a> },
    ParenEmpty(ParenEmpty),
    PrivateVariable { identifier: Identifier<'a> },
    RwUnaryPrefix(PrefixOperator<'a>),
    RwUnarySuffix { child: &'a Expression<'a>, operator_end: u32 },
    Spread(PrefixOperator<'a>),
    Super { span: Span },
    TaggedTemplateLiteral(TaggedTemplateLiteral<'a>),
    ThisVariable { span: Span },
    TrailingComma(TrailingComma<'a>),
    TypeAnnotated(TypeAnnotated<'a>),
    UnaryOperator(PrefixOperator<'a>),
    Variable { identifier: Identifier<'a>, token_type: TokenType },
    YieldMany(PrefixOperator<'a>),
    YieldNone { span: Span },
    YieldOne(PrefixOperator<'a>),
}

impl ArenaAllocatable for Expression<'_> {}

/// Length of the `...` spread operator.
const SPREAD_OPERATOR_LEN: u32 = 3;

impl<'a> Expression<'a> {
    /// Build a spread node, checking the operator is exactly `...` wide.
    pub fn spread(operator_span: Span, child: &'a Expression<'a>) -> Self {
        debug_assert_eq!(operator_span.len(), SPREAD_OPERATOR_LEN);
        Expression::Spread(PrefixOperator::new(operator_span, child))
    }

    /// The tag identifying this node's variant.
    pub fn kind(&self) -> ExpressionKind {
        match self {
            Expression::Class { .. } => ExpressionKind::Class,
            Expression::Delete(_) => ExpressionKind::Delete,
            Expression::Invalid { .. } => ExpressionKind::Invalid,
            Expression::Missing { .. } => ExpressionKind::Missing,
            Expression::New { .. } => ExpressionKind::New,
            Expression::Template { .. } => ExpressionKind::Template,
            Expression::Typeof(_) => ExpressionKind::Typeof,
            Expression::Array { .. } => ExpressionKind::Array,
            Expression::ArrowFunction(_) => ExpressionKind::ArrowFunction,
            Expression::AngleTypeAssertion { .. } => ExpressionKind::AngleTypeAssertion,
            Expression::AsTypeAssertion(_) => ExpressionKind::AsTypeAssertion,
            Expression::Assignment(_) => ExpressionKind::Assignment,
            Expression::Await(_) => ExpressionKind::Await,
            Expression::BinaryOperator(_) => ExpressionKind::BinaryOperator,
            Expression::Call(_) => ExpressionKind::Call,
            Expression::CompoundAssignment(_) => ExpressionKind::CompoundAssignment,
            Expression::Conditional { .. } => ExpressionKind::Conditional,
            Expression::ConditionalAssignment(_) => ExpressionKind::ConditionalAssignment,
            Expression::Dot { .. } => ExpressionKind::Dot,
            Expression::Function { .. } => ExpressionKind::Function,
            Expression::Import { .. } => ExpressionKind::Import,
            Expression::Index { .. } => ExpressionKind::Index,
            Expression::JsxElement { .. } => ExpressionKind::JsxElement,
            Expression::JsxElementWithMembers { .. } => ExpressionKind::JsxElementWithMembers,
            Expression::JsxElementWithNamespace { .. } => ExpressionKind::JsxElementWithNamespace,
            Expression::JsxFragment { .. } => ExpressionKind::JsxFragment,
            Expression::Literal(_) => ExpressionKind::Literal,
            Expression::NamedFunction { .. } => ExpressionKind::NamedFunction,
            Expression::NewTarget { .. } => ExpressionKind::NewTarget,
            Expression::NonNullAssertion(_) => ExpressionKind::NonNullAssertion,
            Expression::Object { .. } => ExpressionKind::Object,
            Expression::Optional(_) => ExpressionKind::Optional,
            Expression::Paren { .. } => ExpressionKind::Paren,
            Expression::ParenEmpty(_) => ExpressionKind::ParenEmpty,
            Expression::PrivateVariable { .. } => ExpressionKind::PrivateVariable,
            Expression::RwUnaryPrefix(_) => ExpressionKind::RwUnaryPrefix,
            Expression::RwUnarySuffix { .. } => ExpressionKind::RwUnarySuffix,
            Expression::Spread(_) => ExpressionKind::Spread,
            Expression::Super { .. } => ExpressionKind::Super,
            Expression::TaggedTemplateLiteral(_) => ExpressionKind::TaggedTemplateLiteral,
            Expression::ThisVariable { .. } => ExpressionKind::ThisVariable,
            Expression::TrailingComma(_) => ExpressionKind::TrailingComma,
            Expression::TypeAnnotated(_) => ExpressionKind::TypeAnnotated,
            Expression::UnaryOperator(_) => ExpressionKind::UnaryOperator,
            Expression::Variable { .. } => ExpressionKind::Variable,
            Expression::YieldMany(_) => ExpressionKind::YieldMany,
            Expression::YieldNone { .. } => ExpressionKind::YieldNone,
            Expression::YieldOne(_) => ExpressionKind::YieldOne,
        }
    }

    /// The total source coverage of this node.
    ///
    /// Kinds that store their span return it; every other kind derives its
    /// coverage from its payload (operator positions and child spans).
    pub fn span(&self) -> Span {
        match self {
            Expression::Class { span }
            | Expression::Invalid { span }
            | Expression::Missing { span }
            | Expression::New { span, .. }
            | Expression::Template { span, .. }
            | Expression::Array { span, .. }
            | Expression::Function { span, .. }
            | Expression::Import { span }
            | Expression::NamedFunction { span, .. }
            | Expression::NewTarget { span }
            | Expression::Object { span, .. }
            | Expression::Paren { span, .. }
            | Expression::Super { span }
            | Expression::ThisVariable { span }
            | Expression::YieldNone { span } => *span,

            Expression::Delete(prefix)
            | Expression::Typeof(prefix)
            | Expression::Await(prefix)
            | Expression::RwUnaryPrefix(prefix)
            | Expression::Spread(prefix)
            | Expression::UnaryOperator(prefix)
            | Expression::YieldMany(prefix)
            | Expression::YieldOne(prefix) => Span::new(
                prefix.operator_span().start,
                prefix.child.span().end,
            ),

            Expression::Assignment(assignment)
            | Expression::CompoundAssignment(assignment)
            | Expression::ConditionalAssignment(assignment) => Span::new(
                assignment.lhs().span().start,
                assignment.rhs().span().end,
            ),

            Expression::JsxElement { container, .. }
            | Expression::JsxElementWithMembers { container, .. }
            | Expression::JsxElementWithNamespace { container, .. }
            | Expression::JsxFragment { container } => container.span,

            Expression::ArrowFunction(arrow) => {
                let start = match arrow.parameter_list_begin() {
                    Some(begin) => begin,
                    None => arrow.parameters[0].span().start,
                };
                Span::new(start, arrow.span_end)
            }
            Expression::AngleTypeAssertion {
                bracketed_type_span,
                child,
            } => Span::new(bracketed_type_span.start, child.span().end),
            Expression::AsTypeAssertion(assertion) => {
                Span::new(assertion.child.span().start, assertion.span_end)
            }
            Expression::BinaryOperator(binary) => {
                let children = binary.children();
                Span::new(
                    children[0].span().start,
                    children[children.len() - 1].span().end,
                )
            }
            Expression::Call(call) => {
                Span::new(call.children()[0].span().start, call.span_end)
            }
            Expression::Conditional { children } => {
                Span::new(children[0].span().start, children[2].span().end)
            }
            Expression::Dot { child, identifier } => {
                Span::new(child.span().start, identifier.span().end)
            }
            Expression::Index {
                children,
                subscript_end,
            } => Span::new(children[0].span().start, *subscript_end),
            Expression::Literal(literal) => literal.span,
            Expression::NonNullAssertion(assertion) => Span::new(
                assertion.child.span().start,
                assertion.bang_span().end,
            ),
            Expression::Optional(optional) => Span::new(
                optional.child.span().start,
                optional.question_span().end,
            ),
            Expression::ParenEmpty(paren) => paren.span,
            Expression::PrivateVariable { identifier } => identifier.span(),
            Expression::RwUnarySuffix {
                child,
                operator_end,
            } => Span::new(child.span().start, *operator_end),
            Expression::TaggedTemplateLiteral(literal) => Span::new(
                literal.children()[0].span().start,
                literal.template_end,
            ),
            Expression::TrailingComma(comma) => Span::new(
                comma.children()[0].span().start,
                comma.comma_span().end,
            ),
            Expression::TypeAnnotated(annotated) => {
                Span::new(annotated.child.span().start, annotated.span_end)
            }
            Expression::Variable { identifier, .. } => identifier.span(),
        }
    }

    /// The node's subordinate expressions, in source order.
    ///
    /// Kinds with no expression children — leaves like `Literal` and
    /// `Variable`, span-only keywords, and `Object` (whose content is
    /// entries, reachable via [`object_entries`](Self::object_entries)) —
    /// yield the empty slice, so any tree can be walked with `children()`
    /// alone.
    pub fn children(&self) -> &[&'a Expression<'a>] {
        match self {
            Expression::Delete(prefix)
            | Expression::Typeof(prefix)
            | Expression::Await(prefix)
            | Expression::RwUnaryPrefix(prefix)
            | Expression::Spread(prefix)
            | Expression::UnaryOperator(prefix)
            | Expression::YieldMany(prefix)
            | Expression::YieldOne(prefix) => std::slice::from_ref(&prefix.child),

            Expression::Assignment(assignment)
            | Expression::CompoundAssignment(assignment)
            | Expression::ConditionalAssignment(assignment) => &assignment.children,

            Expression::JsxElement { container, .. }
            | Expression::JsxElementWithMembers { container, .. }
            | Expression::JsxElementWithNamespace { container, .. }
            | Expression::JsxFragment { container } => container.children,

            Expression::New { children, .. }
            | Expression::Template { children, .. }
            | Expression::Array { children, .. } => *children,

            Expression::AngleTypeAssertion { child, .. }
            | Expression::Dot { child, .. }
            | Expression::Paren { child, .. }
            | Expression::RwUnarySuffix { child, .. } => std::slice::from_ref(child),

            Expression::ArrowFunction(arrow) => arrow.parameters,
            Expression::AsTypeAssertion(assertion) => std::slice::from_ref(&assertion.child),
            Expression::BinaryOperator(binary) => binary.children(),
            Expression::Call(call) => call.children(),
            Expression::Conditional { children } => children,
            Expression::Index { children, .. } => children,
            Expression::NonNullAssertion(assertion) => std::slice::from_ref(&assertion.child),
            Expression::Optional(optional) => std::slice::from_ref(&optional.child),
            Expression::TaggedTemplateLiteral(literal) => literal.children(),
            Expression::TrailingComma(comma) => comma.children(),
            Expression::TypeAnnotated(annotated) => std::slice::from_ref(&annotated.child),

            Expression::Class { .. }
            | Expression::Invalid { .. }
            | Expression::Missing { .. }
            | Expression::Function { .. }
            | Expression::Import { .. }
            | Expression::Literal(_)
            | Expression::NamedFunction { .. }
            | Expression::NewTarget { .. }
            | Expression::Object { .. }
            | Expression::ParenEmpty(_)
            | Expression::PrivateVariable { .. }
            | Expression::Super { .. }
            | Expression::ThisVariable { .. }
            | Expression::Variable { .. }
            | Expression::YieldNone { .. } => &[],
        }
    }

    /// Number of subordinate expressions.
    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    /// The `index`th subordinate expression.
    ///
    /// # Panics
    ///
    /// Panics when `index >= child_count()`.
    pub fn child(&self, index: usize) -> &'a Expression<'a> {
        self.children()[index]
    }

    /// Strip any number of surrounding `(...)` wrappers.
    ///
    /// Returns `self` unchanged (same pointer) for non-paren nodes.
    pub fn without_paren(&self) -> &Expression<'a> {
        let mut ast = self;
        while let Expression::Paren { child, .. } = ast {
            ast = *child;
        }
        ast
    }

    /// The identifier named by this node.
    ///
    /// Valid for `Dot` (the property name), `JsxElement` (the tag),
    /// `NamedFunction` (the function name), `PrivateVariable`, and
    /// `Variable`; panics for every other kind.
    pub fn variable_identifier(&self) -> Identifier<'a> {
        match self {
            Expression::Dot { identifier, .. } => *identifier,
            Expression::JsxElement { tag, .. } => *tag,
            Expression::NamedFunction { name, .. } => *name,
            Expression::PrivateVariable { identifier } => *identifier,
            Expression::Variable { identifier, .. } => *identifier,
            _ => unexpected_kind("variable_identifier", self.kind()),
        }
    }

    /// The lexical form behind a `Variable` node; panics for other kinds.
    pub fn variable_identifier_token_type(&self) -> TokenType {
        match self {
            Expression::Variable { token_type, .. } => *token_type,
            _ => unexpected_kind("variable_identifier_token_type", self.kind()),
        }
    }

    /// Number of object-literal entries; panics for non-`Object` kinds.
    pub fn object_entry_count(&self) -> usize {
        self.object_entries().len()
    }

    /// The `index`th object-literal entry; panics for non-`Object` kinds
    /// and out-of-range indices.
    pub fn object_entry(&self, index: usize) -> ObjectPropertyValuePair<'a> {
        self.object_entries()[index]
    }

    /// All object-literal entries; panics for non-`Object` kinds.
    pub fn object_entries(&self) -> &'a [ObjectPropertyValuePair<'a>] {
        match self {
            Expression::Object { entries, .. } => entries,
            _ => unexpected_kind("object_entries", self.kind()),
        }
    }

    /// The async/generator flavor of a function node.
    ///
    /// Valid for `ArrowFunction`, `Function`, and `NamedFunction`; panics
    /// for every other kind.
    pub fn attributes(&self) -> FunctionAttributes {
        match self {
            Expression::ArrowFunction(arrow) => arrow.attributes,
            Expression::Function { attributes, .. } => *attributes,
            Expression::NamedFunction { attributes, .. } => *attributes,
            _ => unexpected_kind("attributes", self.kind()),
        }
    }

    /// Whether a JSX element names an intrinsic element.
    ///
    /// `JsxElement` classifies by tag; member-expression tags never are;
    /// namespaced tags always are. Panics for non-element kinds
    /// (including `JsxFragment`, which has no tag to classify).
    pub fn jsx_is_intrinsic(&self) -> bool {
        match self {
            Expression::JsxElement { tag, .. } => is_intrinsic_jsx_tag(tag),
            Expression::JsxElementWithMembers { .. } => false,
            Expression::JsxElementWithNamespace { .. } => true,
            _ => unexpected_kind("jsx_is_intrinsic", self.kind()),
        }
    }

    /// Whether a `UnaryOperator` node is the `void` operator.
    ///
    /// `void` is the only prefix operator routed to `UnaryOperator` whose
    /// spelling starts with `v`.
    pub fn is_void_operator(&self, source: &str) -> bool {
        match self {
            Expression::UnaryOperator(prefix) => {
                prefix.operator_span().first_byte_in(source) == Some(b'v')
            }
            _ => unexpected_kind("is_void_operator", self.kind()),
        }
    }
}
