#![doc = include_str!("../README.md")]

pub mod error;
pub mod grammar;
pub mod lexer;
pub mod result;
pub mod source;
pub mod stream;

pub use crate::error::{
    FailedExpectation, GrammarNoError, GrammarNonMatch, NoMatchingToken, NoTokenMatched,
};
pub use crate::grammar::Grammar;
pub use crate::lexer::{FnDescriptor, Lexer, Literal, MultiLiteral, TokenDescriptor};
pub use crate::result::ParseResult;
pub use crate::source::{CharSource, Location, Lookahead, StreamSource, StringSource};
pub use crate::stream::{LexedStream, TokenStream, TransformStream};
