use thiserror::Error;

/// Sentinel returned by a token descriptor whose pattern is not a prefix of
/// the input at the current position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
#[error("no matching token")]
pub struct NoMatchingToken;

/// Aggregate failure from a [`Lexer`]: every descriptor declined to match at
/// the current position.
///
/// `errors` holds each invoked descriptor's error in declaration order. The
/// aggregate is deliberately not deduplicated or prioritized.
///
/// [`Lexer`]: crate::Lexer
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("no token matched the input ({} descriptors tried)", .errors.len())]
pub struct NoTokenMatched {
    pub errors: Vec<NoMatchingToken>,
}

/// Returned by [`Lookahead::expect`] when the expected text is not next in
/// the input.
///
/// [`Lookahead::expect`]: crate::source::Lookahead::expect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
#[error("expectation failed")]
pub struct FailedExpectation;

/// A single-token grammar's predicate rejected the token under the cursor,
/// or the stream was at its end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
#[error("grammar did not match")]
pub struct GrammarNonMatch;

/// Error type for combinators that cannot fail, such as
/// [`optional`](crate::grammar::optional).
///
/// This type is uninhabited: a `ParseResult` carrying it is statically known
/// to be a match, and [`ParseResult::into_match`](crate::ParseResult::into_match)
/// unpacks it without a fallible branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GrammarNoError {}
