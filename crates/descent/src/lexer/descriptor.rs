use crate::error::NoMatchingToken;
use crate::result::ParseResult;
use crate::source::{CharSource, Lookahead};

/// A single token recognizer: matches a prefix of the input to one token,
/// with a priority used by [`Lexer`](crate::Lexer) to arbitrate between
/// descriptors.
///
/// `parse_first_token` runs against a [`Lookahead`], so the input cursor is
/// restored no matter what the descriptor does; a match reports the number
/// of characters the token spans through the result's `consumed` count.
pub trait TokenDescriptor {
    type Token;

    fn priority(&self) -> i32;

    fn parse_first_token(
        &self,
        chars: &mut Lookahead<'_>,
    ) -> ParseResult<Self::Token, NoMatchingToken>;
}

/// Matches one fixed string to one token.
///
/// The default priority is the length of the string in characters, so longer
/// literals naturally win over their prefixes (`++` beats `+`).
#[derive(Debug, Clone)]
pub struct Literal<T> {
    token: T,
    text: String,
    priority: i32,
}

impl<T: Clone> Literal<T> {
    pub fn new(token: T, text: impl Into<String>) -> Literal<T> {
        let text = text.into();
        let priority = text.chars().count() as i32;
        Literal {
            token,
            text,
            priority,
        }
    }

    pub fn with_priority(token: T, text: impl Into<String>, priority: i32) -> Literal<T> {
        Literal {
            token,
            text: text.into(),
            priority,
        }
    }
}

impl<T: Clone> TokenDescriptor for Literal<T> {
    type Token = T;

    fn priority(&self) -> i32 {
        self.priority
    }

    fn parse_first_token(&self, chars: &mut Lookahead<'_>) -> ParseResult<T, NoMatchingToken> {
        if chars.at_end() {
            return ParseResult::no_match(NoMatchingToken);
        }

        if chars.next_is(&self.text) {
            return ParseResult::matched(self.token.clone(), self.text.chars().count());
        }

        ParseResult::no_match(NoMatchingToken)
    }
}

/// Matches any one of several alternative strings to one token, at an
/// explicit priority.
///
/// The first alternative (in declaration order) that equals the input prefix
/// wins.
#[derive(Debug, Clone)]
pub struct MultiLiteral<T> {
    token: T,
    forms: Vec<String>,
    priority: i32,
}

impl<T: Clone> MultiLiteral<T> {
    pub fn new<I, S>(token: T, priority: i32, forms: I) -> MultiLiteral<T>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MultiLiteral {
            token,
            forms: forms.into_iter().map(Into::into).collect(),
            priority,
        }
    }
}

impl<T: Clone> TokenDescriptor for MultiLiteral<T> {
    type Token = T;

    fn priority(&self) -> i32 {
        self.priority
    }

    fn parse_first_token(&self, chars: &mut Lookahead<'_>) -> ParseResult<T, NoMatchingToken> {
        if chars.at_end() {
            return ParseResult::no_match(NoMatchingToken);
        }

        for form in &self.forms {
            if chars.next_is(form) {
                return ParseResult::matched(self.token.clone(), form.chars().count());
            }
        }

        ParseResult::no_match(NoMatchingToken)
    }
}

/// An arbitrary matcher built from a closure — the escape hatch for
/// identifiers, numbers, string literals, and anything else a fixed string
/// cannot express.
///
/// ## Example
/// ```rust
/// use descent::source::Lookahead;
/// use descent::{CharSource, FnDescriptor, NoMatchingToken, ParseResult};
///
/// // one token per run of lowercase letters
/// let word = FnDescriptor::new(0, |chars: &mut Lookahead<'_>| {
///     let mut text = String::new();
///     while let Some(c) = chars.peek_char().filter(|c| c.is_ascii_lowercase()) {
///         text.push(c);
///         chars.advance_head(1);
///     }
///
///     if text.is_empty() {
///         return ParseResult::no_match(NoMatchingToken);
///     }
///
///     let consumed = chars.chars_parsed();
///     ParseResult::matched(text, consumed)
/// });
/// ```
#[derive(Debug, Clone)]
pub struct FnDescriptor<F> {
    priority: i32,
    matcher: F,
}

impl<F> FnDescriptor<F> {
    pub fn new<T>(priority: i32, matcher: F) -> FnDescriptor<F>
    where
        F: Fn(&mut Lookahead<'_>) -> ParseResult<T, NoMatchingToken>,
    {
        FnDescriptor { priority, matcher }
    }
}

impl<T, F> TokenDescriptor for FnDescriptor<F>
where
    F: Fn(&mut Lookahead<'_>) -> ParseResult<T, NoMatchingToken>,
{
    type Token = T;

    fn priority(&self) -> i32 {
        self.priority
    }

    fn parse_first_token(&self, chars: &mut Lookahead<'_>) -> ParseResult<T, NoMatchingToken> {
        (self.matcher)(chars)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::source::{CharSource, StringSource};

    fn run<D: TokenDescriptor>(
        descriptor: &D,
        input: &str,
    ) -> ParseResult<D::Token, NoMatchingToken> {
        let mut source = StringSource::new(input);
        let mut look = Lookahead::new(&mut source);
        descriptor.parse_first_token(&mut look)
    }

    #[test]
    fn literal_matches_exact_prefix() {
        let descriptor = Literal::new("plus", "+");

        assert_eq!(run(&descriptor, "+1"), ParseResult::matched("plus", 1));
        assert_eq!(
            run(&descriptor, "1+"),
            ParseResult::no_match(NoMatchingToken)
        );
        assert_eq!(run(&descriptor, ""), ParseResult::no_match(NoMatchingToken));
    }

    #[test]
    fn literal_default_priority_is_length() {
        assert_eq!(Literal::new((), "+").priority(), 1);
        assert_eq!(Literal::new((), "++").priority(), 2);
        assert_eq!(Literal::with_priority((), "++", 9).priority(), 9);
    }

    #[test]
    fn multi_literal_takes_first_declared_form() {
        let descriptor = MultiLiteral::new("ws", 1, [" ", "\t", "\n"]);

        assert_eq!(run(&descriptor, "\tx"), ParseResult::matched("ws", 1));
        assert_eq!(
            run(&descriptor, "x"),
            ParseResult::no_match(NoMatchingToken)
        );
    }

    #[test]
    fn descriptor_leaves_cursor_alone() {
        let descriptor = Literal::new((), "ab");
        let mut source = StringSource::new("abc");
        let before = source.head();

        {
            let mut look = Lookahead::new(&mut source);
            assert!(descriptor.parse_first_token(&mut look).is_value());
        }

        assert_eq!(source.head(), before);
    }

    #[test]
    fn fn_descriptor_reports_chars_parsed() {
        let digits = FnDescriptor::new(0, |chars: &mut Lookahead<'_>| {
            let mut value: i64 = 0;
            while let Some(c) = chars.peek_char().filter(char::is_ascii_digit) {
                value = value * 10 + i64::from(c as u8 - b'0');
                chars.advance_head(1);
            }

            if chars.chars_parsed() == 0 {
                return ParseResult::no_match(NoMatchingToken);
            }

            let consumed = chars.chars_parsed();
            ParseResult::matched(value, consumed)
        });

        assert_eq!(run(&digits, "123abc"), ParseResult::matched(123, 3));
        assert_eq!(run(&digits, "abc"), ParseResult::no_match(NoMatchingToken));
        // at end-of-input nothing is parsed, which is a no-match rather than
        // an empty token
        assert_eq!(run(&digits, ""), ParseResult::no_match(NoMatchingToken));
    }
}
