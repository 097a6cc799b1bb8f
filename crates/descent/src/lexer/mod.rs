//! The tokenizer: a priority-arbitrated set of token descriptors.

mod descriptor;

pub use descriptor::{FnDescriptor, Literal, MultiLiteral, TokenDescriptor};

use crate::error::{NoMatchingToken, NoTokenMatched};
use crate::result::ParseResult;
use crate::source::{CharSource, Lookahead};

struct Winner<T> {
    token: T,
    priority: i32,
    consumed: usize,
}

/// A tokenizer: a fixed, ordered collection of token descriptors sharing a
/// common token type.
///
/// Given a character source, [`next_token`] invokes the descriptors and
/// selects the match with the highest priority; ties are broken in favor of
/// the earlier-declared descriptor. The lexer is stateless — it holds no
/// cursor of its own and never moves the source's.
///
/// ## Example
/// ```rust
/// use descent::{Lexer, Literal, StringSource};
///
/// #[derive(Debug, Clone, PartialEq)]
/// enum Tok {
///     Plus,
///     PlusPlus,
/// }
///
/// let lexer = Lexer::new()
///     .with(Literal::new(Tok::Plus, "+"))
///     .with(Literal::new(Tok::PlusPlus, "++"));
///
/// let mut source = StringSource::new("+++");
/// let tokens = lexer.tokenize(&mut source);
/// assert_eq!(tokens.value(), Some(&vec![Tok::PlusPlus, Tok::Plus]));
/// ```
///
/// [`next_token`]: Lexer::next_token
pub struct Lexer<T> {
    descriptors: Vec<Box<dyn TokenDescriptor<Token = T>>>,
}

impl<T> Lexer<T> {
    /// Create a new instance of `Lexer` with no descriptors.
    pub fn new() -> Lexer<T> {
        Lexer {
            descriptors: Vec::new(),
        }
    }

    /// Append a descriptor, builder-style. Declaration order is the
    /// tie-break order.
    pub fn with(mut self, descriptor: impl TokenDescriptor<Token = T> + 'static) -> Lexer<T> {
        self.push(descriptor);
        self
    }

    /// Append a descriptor.
    pub fn push(&mut self, descriptor: impl TokenDescriptor<Token = T> + 'static) {
        self.descriptors.push(Box::new(descriptor));
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Match one token at the source's cursor, without advancing it.
    ///
    /// Every descriptor runs under its own speculative view. A descriptor is
    /// skipped when a winner with priority at least as high already exists —
    /// an optimization only, since such a descriptor could never replace the
    /// winner. On failure the result aggregates each invoked descriptor's
    /// error in declaration order.
    pub fn next_token(&self, source: &mut dyn CharSource) -> ParseResult<T, NoTokenMatched> {
        let mut winner: Option<Winner<T>> = None;
        let mut errors: Vec<NoMatchingToken> = Vec::new();

        for descriptor in &self.descriptors {
            let priority = descriptor.priority();
            if let Some(best) = &winner {
                if priority <= best.priority {
                    continue;
                }
            }

            let mut look = Lookahead::new(source);
            match descriptor.parse_first_token(&mut look) {
                ParseResult::Matched { value, consumed } => {
                    winner = Some(Winner {
                        token: value,
                        priority,
                        consumed,
                    });
                }
                ParseResult::NoMatch(error) => errors.push(error),
            }
        }

        match winner {
            Some(winner) => ParseResult::matched(winner.token, winner.consumed),
            None => ParseResult::no_match(NoTokenMatched { errors }),
        }
    }

    /// Tokenize the whole source, speculatively.
    ///
    /// Repeatedly matches a token and steps over it until the end of the
    /// input, returning the token list with the total character count as
    /// `consumed`, or the first position's aggregate error. The source's
    /// cursor is restored either way; callers that want to consume the input
    /// commit with [`advance_head`](CharSource::advance_head).
    pub fn tokenize(&self, source: &mut dyn CharSource) -> ParseResult<Vec<T>, NoTokenMatched> {
        let mut look = Lookahead::new(source);
        let mut tokens = Vec::new();

        while !look.at_end() {
            match look.sub_parse(|chars| self.next_token(chars)) {
                ParseResult::Matched { value, consumed } => {
                    tokens.push(value);
                    look.advance_head(consumed);
                }
                ParseResult::NoMatch(error) => return ParseResult::no_match(error),
            }
        }

        let consumed = look.chars_parsed();
        ParseResult::matched(tokens, consumed)
    }
}

impl<T> Default for Lexer<T> {
    fn default() -> Lexer<T> {
        Lexer::new()
    }
}
