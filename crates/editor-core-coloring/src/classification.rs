//! Semantic classifications supplied by highlight producers.

/// The semantic category of a span of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightType {
    /// No styling. Spans with this classification never produce a decoration.
    None,
    /// Comments.
    Comment,
    /// Plain identifiers.
    Identifier,
    /// Language keywords.
    Keyword,
    /// String and character literals.
    Literal,
    /// Numeric literals.
    NumericLiteral,
    /// Punctuation.
    Punctuation,
    /// Interface names.
    InterfaceName,
    /// Class (reference type) names.
    ClassName,
    /// Call expressions.
    CallExpression,
    /// Enum type names.
    EnumTypeName,
    /// Operators.
    Operator,
    /// Struct (value type) names.
    StructName,
    /// Delegate names.
    DelegateName,
    /// Code the analyzer reports as unnecessary (unused, unreachable). Rendered faded, keeping
    /// its existing color.
    Unnecessary,
    /// An integration-defined classification the color scheme does not know about.
    Custom(u32),
}

impl HighlightType {
    /// Whether spans of this classification produce decorations at all.
    pub fn is_styled(self) -> bool {
        self != Self::None
    }
}
