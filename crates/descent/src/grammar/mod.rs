//! Grammar combinators.
//!
//! A grammar is a value exposing [`test`](Grammar::test): run against a
//! token stream, it either matches — producing a value and the number of
//! tokens the match spans — or reports a typed error. Combinators compose
//! grammars into bigger grammars; the value and error types compose along
//! with them, as associated types resolved per token-stream.

mod alt;
mod choice;
mod lazy;
mod left_assoc;
mod map;
mod optional;
mod sequence;
mod tag;
mod token;

pub use alt::{Alt2, Alt3, Alt4, Alt5, Alt6, Alt7, Alt8};
pub use choice::{choice, Choice};
pub use lazy::{lazy, BoxGrammar, Lazy};
pub use left_assoc::{left_assoc, LeftAssoc, LeftTree};
pub use map::{Map, MapErr};
pub use optional::{optional, Optional};
pub use tag::{tag, Tagged};
pub use token::{token_eq, token_if, TokenEq, TokenIs};

use crate::result::ParseResult;
use crate::stream::TokenStream;

/// A parser for one grammatical construct, over token streams of type `S`.
///
/// `Output` and `Error` are derived per stream type: a single-token
/// grammar's output is the stream's token type, a sequence's output is the
/// tuple of its children's outputs, and so on up the combinator tree.
///
/// Implementations promise two things about [`test`](Grammar::test):
///
/// - the stream's head is back where it started when `test` returns, on
///   match, non-match, and abnormal error alike;
/// - on a match, `consumed` is exactly the number of tokens
///   [`advance_if_matches`](Grammar::advance_if_matches) would step over.
///
/// The outer `Result` carries the stream's abnormal "no token" condition
/// (e.g. the tokenizer failing mid-input); grammar non-matches are ordinary
/// [`ParseResult::NoMatch`] values.
pub trait Grammar<S: TokenStream> {
    type Output;
    type Error;

    /// Test this grammar at the stream's head, without moving it.
    fn test(&self, stream: &mut S) -> Result<ParseResult<Self::Output, Self::Error>, S::Error>;

    /// Run [`test`](Grammar::test) and, on a match, advance the stream by
    /// the consumed token count.
    fn advance_if_matches(
        &self,
        stream: &mut S,
    ) -> Result<ParseResult<Self::Output, Self::Error>, S::Error>
    where
        Self: Sized,
    {
        let result = self.test(stream)?;
        if let ParseResult::Matched { consumed, .. } = &result {
            stream.advance_by(*consumed)?;
        }
        Ok(result)
    }

    /// Map the matched value through `f`, leaving errors and consumed
    /// counts untouched.
    fn map<F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
    {
        Map::new(self, f)
    }

    /// Map the error value through `f`.
    ///
    /// Mostly used to collapse a combinator's structural error type into a
    /// nominal one before [`boxed`](Grammar::boxed) — recursive grammars
    /// need a nameable error type to close the cycle on.
    fn map_err<F>(self, f: F) -> MapErr<Self, F>
    where
        Self: Sized,
    {
        MapErr::new(self, f)
    }

    /// Attach a type-level marker, distinguishing this grammar from
    /// structurally identical ones. Identity on value, error, and `test`.
    fn tagged<M>(self) -> Tagged<Self, M>
    where
        Self: Sized,
    {
        tag(self)
    }

    /// Erase this grammar's concrete type behind a boxed trait object.
    ///
    /// This is what lets a recursive grammar refer to itself through
    /// [`lazy`] without producing an infinitely-nested type.
    fn boxed(self) -> BoxGrammar<S, Self::Output, Self::Error>
    where
        Self: Sized + 'static,
    {
        BoxGrammar::new(self)
    }
}
