use crate::grammar::{Alt2, Alt3, Alt4, Alt5, Alt6, Alt7, Alt8, Grammar};
use crate::result::ParseResult;
use crate::stream::TokenStream;

/// Ordered alternatives over a tuple of grammars.
///
/// Children are tried in order, each from the same starting position — an
/// earlier child's failure leaves nothing behind for the next one to see.
/// The first match wins and is returned verbatim, tagged by the child's
/// position in an [`AltN`](crate::grammar::Alt2) sum. If every child fails,
/// the error is the tuple of all the children's errors.
#[derive(Debug, Clone, Copy)]
pub struct Choice<T> {
    alternatives: T,
}

/// Try each grammar in `alternatives` in order; first match wins.
///
/// ## Example
/// ```rust
/// use descent::grammar::{choice, token_eq, Alt2, Grammar};
/// use descent::{LexedStream, Lexer, Literal, StringSource};
///
/// let lexer = Lexer::new()
///     .with(Literal::new('+', "+"))
///     .with(Literal::new('-', "-"));
/// let mut tokens = LexedStream::new(StringSource::new("-"), lexer);
///
/// let sign = choice((token_eq('+'), token_eq('-')));
/// let result = sign.test(&mut tokens).unwrap();
/// assert_eq!(result.value(), Some(&Alt2::Second('-')));
/// ```
pub fn choice<T>(alternatives: T) -> Choice<T> {
    Choice { alternatives }
}

macro_rules! choice_grammar {
    ($Alt:ident, $(($G:ident, $error:ident, $idx:tt, $Var:ident)),+) => {
        impl<S, $($G),+> Grammar<S> for Choice<($($G,)+)>
        where
            S: TokenStream,
            $($G: Grammar<S>,)+
        {
            type Output = $Alt<$($G::Output),+>;
            type Error = ($($G::Error,)+);

            fn test(
                &self,
                stream: &mut S,
            ) -> Result<ParseResult<Self::Output, Self::Error>, S::Error> {
                $(
                    let $error = match self.alternatives.$idx.test(stream)? {
                        ParseResult::Matched { value, consumed } => {
                            return Ok(ParseResult::matched($Alt::$Var(value), consumed));
                        }
                        ParseResult::NoMatch(error) => error,
                    };
                )+

                Ok(ParseResult::no_match(($($error,)+)))
            }
        }
    };
}

choice_grammar!(Alt2, (A, a, 0, First), (B, b, 1, Second));
choice_grammar!(Alt3, (A, a, 0, First), (B, b, 1, Second), (C, c, 2, Third));
choice_grammar!(
    Alt4,
    (A, a, 0, First),
    (B, b, 1, Second),
    (C, c, 2, Third),
    (D, d, 3, Fourth)
);
choice_grammar!(
    Alt5,
    (A, a, 0, First),
    (B, b, 1, Second),
    (C, c, 2, Third),
    (D, d, 3, Fourth),
    (E, e, 4, Fifth)
);
choice_grammar!(
    Alt6,
    (A, a, 0, First),
    (B, b, 1, Second),
    (C, c, 2, Third),
    (D, d, 3, Fourth),
    (E, e, 4, Fifth),
    (F, f, 5, Sixth)
);
choice_grammar!(
    Alt7,
    (A, a, 0, First),
    (B, b, 1, Second),
    (C, c, 2, Third),
    (D, d, 3, Fourth),
    (E, e, 4, Fifth),
    (F, f, 5, Sixth),
    (G, g, 6, Seventh)
);
choice_grammar!(
    Alt8,
    (A, a, 0, First),
    (B, b, 1, Second),
    (C, c, 2, Third),
    (D, d, 3, Fourth),
    (E, e, 4, Fifth),
    (F, f, 5, Sixth),
    (G, g, 6, Seventh),
    (H, h, 7, Eighth)
);

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::GrammarNonMatch;
    use crate::grammar::{token_eq, token_if};
    use crate::lexer::{Lexer, Literal};
    use crate::source::StringSource;
    use crate::stream::LexedStream;

    fn letters(input: &str) -> LexedStream<StringSource, char> {
        let lexer = Lexer::new()
            .with(Literal::new('a', "a"))
            .with(Literal::new('b', "b"))
            .with(Literal::new('c', "c"));
        LexedStream::new(StringSource::new(input), lexer)
    }

    #[test]
    fn first_matching_alternative_wins() {
        let mut tokens = letters("b");
        let grammar = choice((token_eq('a'), token_eq('b'), token_eq('c')));

        let result = grammar.test(&mut tokens).unwrap();
        assert_eq!(result.value(), Some(&Alt3::Second('b')));
        assert_eq!(result.consumed(), Some(1));
    }

    #[test]
    fn earlier_alternative_shadows_later_ones() {
        // both alternatives match; declaration order decides
        let mut tokens = letters("a");
        let grammar = choice((token_if(|_: &char| true), token_eq('a')));

        let result = grammar.test(&mut tokens).unwrap();
        assert_eq!(result.value().map(Alt2::index), Some(0));
    }

    #[test]
    fn all_failures_are_aggregated() {
        let mut tokens = letters("c");
        let grammar = choice((token_eq('a'), token_eq('b')));

        let error = grammar
            .test(&mut tokens)
            .unwrap()
            .into_result()
            .unwrap_err();
        assert_eq!(error, (GrammarNonMatch, GrammarNonMatch));
    }

    #[test]
    fn test_restores_the_stream() {
        let mut tokens = letters("ab");
        let before = tokens.head();
        let grammar = choice((token_eq('a'), token_eq('b')));

        assert!(grammar.test(&mut tokens).unwrap().is_value());
        assert_eq!(tokens.head(), before);
    }
}
