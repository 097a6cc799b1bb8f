use crate::error::GrammarNonMatch;
use crate::grammar::Grammar;
use crate::result::ParseResult;
use crate::stream::TokenStream;

/// Grammar matching a single token that satisfies a predicate.
#[derive(Debug, Clone, Copy)]
pub struct TokenIs<F> {
    predicate: F,
}

/// Match one token satisfying `predicate`. The value is the token itself;
/// one token is consumed.
pub fn token_if<F>(predicate: F) -> TokenIs<F> {
    TokenIs { predicate }
}

impl<S, F> Grammar<S> for TokenIs<F>
where
    S: TokenStream,
    F: Fn(&S::Token) -> bool,
{
    type Output = S::Token;
    type Error = GrammarNonMatch;

    fn test(&self, stream: &mut S) -> Result<ParseResult<S::Token, GrammarNonMatch>, S::Error> {
        if stream.at_end() {
            return Ok(ParseResult::no_match(GrammarNonMatch));
        }

        let token = stream.peek()?;
        if (self.predicate)(&token) {
            return Ok(ParseResult::matched(token, 1));
        }

        Ok(ParseResult::no_match(GrammarNonMatch))
    }
}

/// Grammar matching a single token by equality.
#[derive(Debug, Clone, Copy)]
pub struct TokenEq<T> {
    token: T,
}

/// Match one token equal to `token`.
pub fn token_eq<T>(token: T) -> TokenEq<T> {
    TokenEq { token }
}

impl<S, T> Grammar<S> for TokenEq<T>
where
    S: TokenStream<Token = T>,
    T: Clone + PartialEq,
{
    type Output = T;
    type Error = GrammarNonMatch;

    fn test(&self, stream: &mut S) -> Result<ParseResult<T, GrammarNonMatch>, S::Error> {
        if stream.at_end() {
            return Ok(ParseResult::no_match(GrammarNonMatch));
        }

        let token = stream.peek()?;
        if token == self.token {
            return Ok(ParseResult::matched(token, 1));
        }

        Ok(ParseResult::no_match(GrammarNonMatch))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lexer::{Lexer, Literal};
    use crate::source::StringSource;
    use crate::stream::LexedStream;

    fn digits(input: &str) -> LexedStream<StringSource, u8> {
        let lexer = Lexer::new()
            .with(Literal::new(1u8, "1"))
            .with(Literal::new(2u8, "2"));
        LexedStream::new(StringSource::new(input), lexer)
    }

    #[test]
    fn matches_a_satisfying_token() {
        let mut tokens = digits("12");
        let odd = token_if(|token: &u8| token % 2 == 1);

        let result = odd.test(&mut tokens).unwrap();
        assert_eq!(result.value(), Some(&1));
        assert_eq!(result.consumed(), Some(1));
    }

    #[test]
    fn rejects_without_moving() {
        let mut tokens = digits("21");
        let before = tokens.head();
        let odd = token_if(|token: &u8| token % 2 == 1);

        let result = odd.test(&mut tokens).unwrap();
        assert_eq!(result.error(), Some(&GrammarNonMatch));
        assert_eq!(tokens.head(), before);
    }

    #[test]
    fn at_end_is_a_non_match() {
        let mut tokens = digits("");
        let any = token_if(|_: &u8| true);

        let result = any.test(&mut tokens).unwrap();
        assert!(result.is_error());
    }

    #[test]
    fn token_eq_compares_tokens() {
        let mut tokens = digits("2");

        assert!(token_eq(2u8).test(&mut tokens).unwrap().is_value());
        assert!(token_eq(1u8).test(&mut tokens).unwrap().is_error());
    }

    #[test]
    fn advance_if_matches_steps_one_token() {
        let mut tokens = digits("12");
        let one = token_eq(1u8);

        let result = one.advance_if_matches(&mut tokens).unwrap();
        assert!(result.is_value());
        assert_eq!(tokens.peek(), Ok(2));
    }
}
