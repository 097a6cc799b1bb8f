use crate::grammar::Grammar;
use crate::result::ParseResult;
use crate::stream::TokenStream;

/// Grammar that defers to a generator function. See [`lazy`].
#[derive(Debug, Clone, Copy)]
pub struct Lazy<F> {
    generator: F,
}

/// Build the sub-grammar on demand, on every [`test`](Grammar::test).
///
/// This is the indirection that recursive grammars need: a grammar cannot
/// contain itself by value, but it can contain a function that produces the
/// next level when asked. The generator must be pure — returning an
/// equivalent grammar on every call — or determinism is lost.
///
/// Pair with [`Grammar::boxed`]: the generator returns a [`BoxGrammar`] so
/// that the recursive type has a name to bottom out on.
///
/// ## Example
/// ```rust,ignore
/// fn expression() -> BoxGrammar<Tokens, Ast, ExprError> {
///     // "( expression )" refers back to this function through `lazy`
///     let parenthesised = (token_eq(Tok::LParen), lazy(expression), token_eq(Tok::RParen));
///     ...
/// }
/// ```
pub fn lazy<F>(generator: F) -> Lazy<F> {
    Lazy { generator }
}

impl<S, F, G> Grammar<S> for Lazy<F>
where
    S: TokenStream,
    F: Fn() -> G,
    G: Grammar<S>,
{
    type Output = G::Output;
    type Error = G::Error;

    fn test(&self, stream: &mut S) -> Result<ParseResult<G::Output, G::Error>, S::Error> {
        (self.generator)().test(stream)
    }
}

/// A grammar with its concrete type erased behind a box.
///
/// `BoxGrammar` is the knot that closes recursive grammars: the boxed trait
/// object names its output and error types directly, so a generator passed
/// to [`lazy`] can return one without the grammar's type recursing into
/// itself. Collapse composite error types with
/// [`map_err`](Grammar::map_err) before boxing.
pub struct BoxGrammar<S: TokenStream, V, E> {
    inner: Box<dyn Grammar<S, Output = V, Error = E>>,
}

impl<S: TokenStream, V, E> BoxGrammar<S, V, E> {
    pub fn new(grammar: impl Grammar<S, Output = V, Error = E> + 'static) -> BoxGrammar<S, V, E> {
        BoxGrammar {
            inner: Box::new(grammar),
        }
    }
}

impl<S: TokenStream, V, E> Grammar<S> for BoxGrammar<S, V, E> {
    type Output = V;
    type Error = E;

    fn test(&self, stream: &mut S) -> Result<ParseResult<V, E>, S::Error> {
        self.inner.test(stream)
    }
}
