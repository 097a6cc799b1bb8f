//! Token streams: cursor-based readers of tokens, possibly layered, plus the
//! speculative [`Lookahead`] view grammars backtrack with.

mod lexed;
mod transform;

pub use lexed::LexedStream;
pub use transform::{TransformLocation, TransformStream};

use std::fmt;

/// A cursor over a sequence of tokens.
///
/// `peek` and `advance` return `Err` when no token can be produced at the
/// current position — for a source-backed stream that is the tokenizer's
/// aggregate failure. Grammars treat that as an abnormal condition, distinct
/// from an ordinary non-match, and let it propagate.
pub trait TokenStream {
    type Token: Clone;
    type Location: Clone + PartialEq + fmt::Debug;
    type Error: fmt::Debug;

    /// The token under the cursor, without advancing.
    fn peek(&mut self) -> Result<Self::Token, Self::Error>;

    /// The token under the cursor; advances past it.
    fn advance(&mut self) -> Result<Self::Token, Self::Error>;

    /// True iff no tokens remain.
    fn at_end(&mut self) -> bool;

    /// The current cursor position.
    fn head(&mut self) -> Self::Location;

    /// Seek to a location previously returned by this stream's
    /// [`head`](TokenStream::head).
    fn set_head(&mut self, head: Self::Location);

    /// Advance past `n` tokens.
    fn advance_by(&mut self, n: usize) -> Result<(), Self::Error> {
        for _ in 0..n {
            self.advance()?;
        }
        Ok(())
    }
}

/// A scoped speculative view over a token stream.
///
/// Captures the stream's head on construction and unconditionally restores
/// it on drop, the token-level counterpart of
/// [`source::Lookahead`](crate::source::Lookahead). Grammar combinators hold
/// one of these for the duration of a `test`, which is what makes the
/// "`test` never moves the stream" contract survive early returns.
pub struct Lookahead<'a, S: TokenStream> {
    stream: &'a mut S,
    start: S::Location,
}

impl<'a, S: TokenStream> Lookahead<'a, S> {
    pub fn new(stream: &'a mut S) -> Lookahead<'a, S> {
        let start = stream.head();
        Lookahead { stream, start }
    }

    /// Access the underlying stream at its current (speculative) position.
    pub fn get(&mut self) -> &mut S {
        self.stream
    }

    /// The position the stream will be restored to.
    pub fn start(&self) -> &S::Location {
        &self.start
    }
}

impl<S: TokenStream> TokenStream for Lookahead<'_, S> {
    type Token = S::Token;
    type Location = S::Location;
    type Error = S::Error;

    fn peek(&mut self) -> Result<Self::Token, Self::Error> {
        self.stream.peek()
    }

    fn advance(&mut self) -> Result<Self::Token, Self::Error> {
        self.stream.advance()
    }

    fn at_end(&mut self) -> bool {
        self.stream.at_end()
    }

    fn head(&mut self) -> Self::Location {
        self.stream.head()
    }

    fn set_head(&mut self, head: Self::Location) {
        self.stream.set_head(head);
    }
}

impl<S: TokenStream> Drop for Lookahead<'_, S> {
    fn drop(&mut self) {
        let start = self.start.clone();
        self.stream.set_head(start);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lexer::{Lexer, Literal};
    use crate::source::StringSource;

    fn stream(input: &str) -> LexedStream<StringSource, char> {
        let lexer = Lexer::new()
            .with(Literal::new('a', "a"))
            .with(Literal::new('b', "b"));
        LexedStream::new(StringSource::new(input), lexer)
    }

    #[test]
    fn lookahead_restores_head_on_drop() {
        let mut tokens = stream("abab");
        let before = tokens.head();

        {
            let mut look = Lookahead::new(&mut tokens);
            assert_eq!(look.advance().unwrap(), 'a');
            assert_eq!(look.advance().unwrap(), 'b');
        }

        assert_eq!(tokens.head(), before);
        assert_eq!(tokens.peek().unwrap(), 'a');
    }

    #[test]
    fn nested_lookahead_restores_to_enclosing_position() {
        let mut tokens = stream("abab");

        let mut outer = Lookahead::new(&mut tokens);
        outer.advance().unwrap();

        {
            let mut inner = Lookahead::new(outer.get());
            assert_eq!(inner.advance().unwrap(), 'b');
            assert_eq!(inner.advance().unwrap(), 'a');
        }

        assert_eq!(outer.peek().unwrap(), 'b');
    }

    #[test]
    fn advance_by_steps_n_tokens() {
        let mut tokens = stream("abab");

        tokens.advance_by(3).unwrap();
        assert_eq!(tokens.advance().unwrap(), 'b');
        assert!(tokens.at_end());
    }
}
