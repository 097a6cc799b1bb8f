use crate::error::NoTokenMatched;
use crate::lexer::Lexer;
use crate::result::ParseResult;
use crate::source::{CharSource, Location};
use crate::stream::TokenStream;

/// A token stream backed by a character source and a [`Lexer`].
///
/// Nothing is tokenized ahead of time: every `peek` and `advance` runs the
/// lexer at the current character cursor, so the stream's location *is* the
/// character location, and seeking the stream is seeking the source.
pub struct LexedStream<S, T> {
    source: S,
    lexer: Lexer<T>,
}

impl<S: CharSource, T: Clone> LexedStream<S, T> {
    pub fn new(source: S, lexer: Lexer<T>) -> LexedStream<S, T> {
        LexedStream { source, lexer }
    }

    /// Get a reference to the underlying character source.
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_parts(self) -> (S, Lexer<T>) {
        (self.source, self.lexer)
    }
}

impl<S: CharSource, T: Clone> TokenStream for LexedStream<S, T> {
    type Token = T;
    type Location = Location;
    type Error = NoTokenMatched;

    fn peek(&mut self) -> Result<T, NoTokenMatched> {
        match self.lexer.next_token(&mut self.source) {
            ParseResult::Matched { value, .. } => Ok(value),
            ParseResult::NoMatch(error) => Err(error),
        }
    }

    fn advance(&mut self) -> Result<T, NoTokenMatched> {
        match self.lexer.next_token(&mut self.source) {
            ParseResult::Matched { value, consumed } => {
                self.source.advance_head(consumed);
                Ok(value)
            }
            ParseResult::NoMatch(error) => Err(error),
        }
    }

    fn at_end(&mut self) -> bool {
        self.source.at_end()
    }

    fn head(&mut self) -> Location {
        self.source.head()
    }

    fn set_head(&mut self, head: Location) {
        self.source.set_head(head);
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::lexer::Literal;
    use crate::source::StringSource;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tok {
        Ident,
        Arrow,
    }

    fn stream(input: &str) -> LexedStream<StringSource, Tok> {
        let lexer = Lexer::new()
            .with(Literal::new(Tok::Ident, "x"))
            .with(Literal::new(Tok::Arrow, "->"));
        LexedStream::new(StringSource::new(input), lexer)
    }

    #[test]
    fn peek_does_not_advance() {
        let mut tokens = stream("x->x");

        assert_eq!(tokens.peek(), Ok(Tok::Ident));
        assert_eq!(tokens.peek(), Ok(Tok::Ident));
        assert_eq!(tokens.advance(), Ok(Tok::Ident));
        assert_eq!(tokens.peek(), Ok(Tok::Arrow));
    }

    #[test]
    fn advance_walks_the_whole_input() {
        let mut tokens = stream("x->x");

        assert_eq!(tokens.advance(), Ok(Tok::Ident));
        assert_eq!(tokens.advance(), Ok(Tok::Arrow));
        assert_eq!(tokens.advance(), Ok(Tok::Ident));
        assert!(tokens.at_end());
    }

    #[test]
    fn peek_surfaces_the_tokenizer_failure() {
        let mut tokens = stream("?");

        let error = tokens.peek().unwrap_err();
        assert_eq!(error.errors.len(), 2);
    }

    #[test]
    fn set_head_rewinds_to_a_saved_location() {
        let mut tokens = stream("x->x");

        let start = tokens.head();
        tokens.advance().unwrap();
        tokens.advance().unwrap();

        tokens.set_head(start);
        assert_eq!(tokens.advance(), Ok(Tok::Ident));
    }
}
