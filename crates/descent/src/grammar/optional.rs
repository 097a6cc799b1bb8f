use crate::error::GrammarNoError;
use crate::grammar::Grammar;
use crate::result::ParseResult;
use crate::stream::TokenStream;

/// Grammar that matches its child zero or one time. See [`optional`].
#[derive(Debug, Clone, Copy)]
pub struct Optional<G> {
    inner: G,
}

/// Make `grammar` optional: a match becomes `Some(value)` with the child's
/// consumed count, a non-match becomes `None` consuming nothing.
///
/// The combinator itself cannot fail — its error type,
/// [`GrammarNoError`], is uninhabited — so results can be unpacked with
/// [`ParseResult::into_match`](crate::ParseResult::into_match).
pub fn optional<G>(grammar: G) -> Optional<G> {
    Optional { inner: grammar }
}

impl<S, G> Grammar<S> for Optional<G>
where
    S: TokenStream,
    G: Grammar<S>,
{
    type Output = Option<G::Output>;
    type Error = GrammarNoError;

    fn test(
        &self,
        stream: &mut S,
    ) -> Result<ParseResult<Option<G::Output>, GrammarNoError>, S::Error> {
        Ok(match self.inner.test(stream)? {
            ParseResult::Matched { value, consumed } => ParseResult::matched(Some(value), consumed),
            ParseResult::NoMatch(_) => ParseResult::matched(None, 0),
        })
    }
}
