use std::marker::PhantomData;

use crate::grammar::Grammar;
use crate::result::ParseResult;
use crate::stream::TokenStream;

/// A grammar wrapped with a type-level marker. See [`tag`].
#[derive(Debug, Clone, Copy)]
pub struct Tagged<G, M> {
    inner: G,
    marker: PhantomData<fn() -> M>,
}

/// Attach marker type `M` to a grammar.
///
/// Purely a type-level distinction: value, error, and `test` behavior are
/// the child's, untouched. Use it when two structurally identical grammars
/// play different roles in one composition and the code reads better with
/// the roles named:
///
/// ```rust
/// use descent::grammar::{tag, token_if, Tagged, TokenIs};
///
/// struct Opened;
/// struct Closed;
///
/// fn brackets<F: Fn(&char) -> bool>(
///     open: F,
///     close: F,
/// ) -> (Tagged<TokenIs<F>, Opened>, Tagged<TokenIs<F>, Closed>) {
///     (tag(token_if(open)), tag(token_if(close)))
/// }
/// ```
pub fn tag<M, G>(grammar: G) -> Tagged<G, M> {
    Tagged {
        inner: grammar,
        marker: PhantomData,
    }
}

impl<S, G, M> Grammar<S> for Tagged<G, M>
where
    S: TokenStream,
    G: Grammar<S>,
{
    type Output = G::Output;
    type Error = G::Error;

    fn test(&self, stream: &mut S) -> Result<ParseResult<G::Output, G::Error>, S::Error> {
        self.inner.test(stream)
    }
}
