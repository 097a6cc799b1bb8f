use crate::grammar::Grammar;
use crate::result::ParseResult;
use crate::stream::TokenStream;

/// Grammar that maps its child's value. Built by [`Grammar::map`].
#[derive(Debug, Clone, Copy)]
pub struct Map<G, F> {
    inner: G,
    f: F,
}

impl<G, F> Map<G, F> {
    pub(crate) fn new(inner: G, f: F) -> Map<G, F> {
        Map { inner, f }
    }
}

impl<S, G, F, U> Grammar<S> for Map<G, F>
where
    S: TokenStream,
    G: Grammar<S>,
    F: Fn(G::Output) -> U,
{
    type Output = U;
    type Error = G::Error;

    fn test(&self, stream: &mut S) -> Result<ParseResult<U, G::Error>, S::Error> {
        Ok(self.inner.test(stream)?.map(&self.f))
    }
}

/// Grammar that maps its child's error. Built by [`Grammar::map_err`].
#[derive(Debug, Clone, Copy)]
pub struct MapErr<G, F> {
    inner: G,
    f: F,
}

impl<G, F> MapErr<G, F> {
    pub(crate) fn new(inner: G, f: F) -> MapErr<G, F> {
        MapErr { inner, f }
    }
}

impl<S, G, F, E> Grammar<S> for MapErr<G, F>
where
    S: TokenStream,
    G: Grammar<S>,
    F: Fn(G::Error) -> E,
{
    type Output = G::Output;
    type Error = E;

    fn test(&self, stream: &mut S) -> Result<ParseResult<G::Output, E>, S::Error> {
        Ok(self.inner.test(stream)?.map_no_match(&self.f))
    }
}
