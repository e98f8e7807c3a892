use derive_more::derive::{Display, Error};

/// Why a formula string could not be turned into a formula.
///
/// Positions count characters (not bytes) from the start of the input.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[display(
        "unbalanced parentheses in \"{input}\": {opening} opening, {closing} closing"
    )]
    UnbalancedParentheses {
        input: String,
        opening: usize,
        closing: usize,
    },
    /// Also returned for subformulas nested deeper than
    /// [`MAX_NESTING_DEPTH`](super::parser::MAX_NESTING_DEPTH).
    #[display("malformed expression \"{fragment}\" at position {position}")]
    MalformedExpression { fragment: String, position: usize },
}

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[display("no value given for variable \"{name}\"")]
    MissingVariable { name: String },
}
