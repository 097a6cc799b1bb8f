//! A partial C++-like lexer: punctuation (with `++`/`+` style longest-match
//! arbitration), a keyword table, identifiers, escape-aware string literals,
//! raw string literals, and comment/whitespace stripping through transformer
//! streams — including the classic merge of adjacent string literals.
//!
//! ```text
//! cargo run --example cpp_lexer -- path/to/file.cpp
//! ```

use std::env;
use std::fs;

use anyhow::{Context, Result};

use descent::source::Lookahead;
use descent::{
    CharSource, FnDescriptor, LexedStream, Lexer, Literal, MultiLiteral, NoMatchingToken,
    ParseResult, StringSource, TokenStream, TransformStream,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    ColonColon,
    Colon,
    LParen,
    RParen,
    Caret,
    PlusPlus,
    Plus,
    MinusMinus,
    Minus,
    Semicolon,
    SlashSlash,
    SlashStar,
    StarSlash,
    Slash,
    Star,
    AmpAmp,
    Amp,
    PipePipe,
    Pipe,
    Tilde,
    Percent,
    Question,
    Backslash,
    Period,
    Whitespace,
    Newline,
    Keyword(&'static str),
    Identifier(String),
    Str(String),
    Invalid,
}

const KEYWORDS: &[&str] = &[
    "asm",
    "auto",
    "bool",
    "break",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "const_cast",
    "continue",
    "default",
    "delete",
    "do",
    "double",
    "dynamic_cast",
    "else",
    "enum",
    "explicit",
    "extern",
    "false",
    "float",
    "for",
    "friend",
    "goto",
    "if",
    "inline",
    "int",
    "long",
    "mutable",
    "namespace",
    "new",
    "noexcept",
    "nullptr",
    "operator",
    "private",
    "protected",
    "public",
    "register",
    "reinterpret_cast",
    "return",
    "short",
    "signed",
    "sizeof",
    "static",
    "static_cast",
    "struct",
    "switch",
    "template",
    "this",
    "throw",
    "true",
    "try",
    "typedef",
    "typeid",
    "typename",
    "union",
    "unsigned",
    "using",
    "virtual",
    "void",
    "volatile",
    "while",
];

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_part(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Identifiers sit below the keyword literals (whose priority is their
/// length), so `while` lexes as a keyword and `whilst` as an identifier.
fn identifier_descriptor(
) -> FnDescriptor<impl Fn(&mut Lookahead<'_>) -> ParseResult<Token, NoMatchingToken>> {
    FnDescriptor::new(-1, |chars: &mut Lookahead<'_>| {
        if !chars.peek_char().is_some_and(is_identifier_start) {
            return ParseResult::no_match(NoMatchingToken);
        }

        let mut text = String::new();
        while let Some(c) = chars.peek_char().filter(|&c| is_identifier_part(c)) {
            text.push(c);
            chars.advance_head(1);
        }

        let consumed = chars.chars_parsed();
        ParseResult::matched(Token::Identifier(text), consumed)
    })
}

/// One source character within a quoted string: either a plain character or
/// a backslash escape.
fn parse_char(chars: &mut Lookahead<'_>) -> Option<(char, bool)> {
    match chars.read_char()? {
        '\\' => {
            let escaped = match chars.read_char()? {
                '\'' => '\'',
                '"' => '"',
                '?' => '?',
                '\\' => '\\',
                'n' => '\n',
                'r' => '\r',
                't' => '\t',
                '0' => '\0',
                _ => return None,
            };
            Some((escaped, true))
        }
        c if c.is_control() => None,
        c => Some((c, false)),
    }
}

/// `"..."` with escapes; a bare newline or invalid escape kills the match.
fn string_literal_descriptor(
) -> FnDescriptor<impl Fn(&mut Lookahead<'_>) -> ParseResult<Token, NoMatchingToken>> {
    FnDescriptor::new(-1, |chars: &mut Lookahead<'_>| {
        if chars.expect_char('"').is_error() {
            return ParseResult::no_match(NoMatchingToken);
        }

        let mut value = String::new();
        loop {
            match parse_char(chars) {
                None => return ParseResult::no_match(NoMatchingToken),
                Some(('"', false)) => {
                    let consumed = chars.chars_parsed();
                    return ParseResult::matched(Token::Str(value), consumed);
                }
                Some((c, _)) => value.push(c),
            }
        }
    })
}

/// `R"delim(...)delim"` — no escapes, runs until the matching delimiter.
/// Highest priority so `R` never lexes as an identifier in front of one.
fn raw_string_descriptor(
) -> FnDescriptor<impl Fn(&mut Lookahead<'_>) -> ParseResult<Token, NoMatchingToken>> {
    FnDescriptor::new(i32::MAX, |chars: &mut Lookahead<'_>| {
        if chars.expect_char('R').is_error() || chars.expect_char('"').is_error() {
            return ParseResult::no_match(NoMatchingToken);
        }

        let mut delimiter = String::new();
        loop {
            match chars.read_char() {
                None => return ParseResult::no_match(NoMatchingToken),
                Some('(') => break,
                Some(' ') | Some('\\') => return ParseResult::no_match(NoMatchingToken),
                Some(c) => delimiter.push(c),
            }
        }

        let closing = format!("){delimiter}\"");
        let mut value = String::new();
        while !chars.at_end() && !chars.next_is(&closing) {
            match chars.read_char() {
                Some(c) => value.push(c),
                None => return ParseResult::no_match(NoMatchingToken),
            }
        }

        if chars.expect(&closing).is_error() {
            return ParseResult::no_match(NoMatchingToken);
        }

        let consumed = chars.chars_parsed();
        ParseResult::matched(Token::Str(value), consumed)
    })
}

fn build_lexer() -> Lexer<Token> {
    let mut lexer = Lexer::new()
        .with(Literal::new(Token::ColonColon, "::"))
        .with(Literal::new(Token::Colon, ":"))
        .with(Literal::new(Token::LParen, "("))
        .with(Literal::new(Token::RParen, ")"))
        .with(Literal::new(Token::Caret, "^"))
        .with(Literal::new(Token::Plus, "+"))
        .with(Literal::new(Token::PlusPlus, "++"))
        .with(Literal::new(Token::Minus, "-"))
        .with(Literal::new(Token::MinusMinus, "--"))
        .with(Literal::new(Token::Semicolon, ";"))
        .with(Literal::new(Token::Slash, "/"))
        .with(Literal::new(Token::SlashSlash, "//"))
        .with(Literal::new(Token::SlashStar, "/*"))
        .with(Literal::new(Token::StarSlash, "*/"))
        .with(Literal::new(Token::Star, "*"))
        .with(Literal::new(Token::Amp, "&"))
        .with(Literal::new(Token::AmpAmp, "&&"))
        .with(Literal::new(Token::Pipe, "|"))
        .with(Literal::new(Token::PipePipe, "||"))
        .with(Literal::new(Token::Tilde, "~"))
        .with(Literal::new(Token::Percent, "%"))
        .with(Literal::new(Token::Question, "?"))
        .with(Literal::new(Token::Backslash, "\\"))
        .with(Literal::new(Token::Period, "."))
        .with(MultiLiteral::new(Token::Whitespace, 1, [" ", "\t"]))
        .with(MultiLiteral::new(Token::Newline, 1, ["\n", "\r"]))
        .with(identifier_descriptor())
        .with(string_literal_descriptor())
        .with(raw_string_descriptor())
        // lowest priority: swallow one unexpected character as an explicit
        // Invalid token instead of failing the whole tokenization
        .with(FnDescriptor::new(
            i32::MIN,
            |chars: &mut Lookahead<'_>| match chars.read_char() {
                Some(_) => ParseResult::matched(Token::Invalid, 1),
                None => ParseResult::no_match(NoMatchingToken),
            },
        ));

    for &keyword in KEYWORDS {
        lexer.push(Literal::new(Token::Keyword(keyword), keyword));
    }

    lexer
}

/// Drop every token from `begin` through the next `end`, inclusive — the
/// shape of both `// ... \n` and `/* ... */` comments.
fn strip_delimited<U>(
    upstream: U,
    begin: Token,
    end: Token,
) -> Result<
    TransformStream<U, impl FnMut(&mut U, &mut Vec<Token>) -> Result<(), U::Error>, Token>,
    U::Error,
>
where
    U: TokenStream<Token = Token>,
{
    TransformStream::new(upstream, move |upstream: &mut U, emit: &mut Vec<Token>| {
        let token = upstream.advance()?;
        if token == begin {
            while !upstream.at_end() && upstream.advance()? != end {}
        } else {
            emit.push(token);
        }
        Ok(())
    })
}

/// Drop whitespace and newline tokens.
fn strip_space<U>(
    upstream: U,
) -> Result<
    TransformStream<U, impl FnMut(&mut U, &mut Vec<Token>) -> Result<(), U::Error>, Token>,
    U::Error,
>
where
    U: TokenStream<Token = Token>,
{
    TransformStream::new(upstream, |upstream: &mut U, emit: &mut Vec<Token>| {
        let token = upstream.advance()?;
        if token != Token::Whitespace && token != Token::Newline {
            emit.push(token);
        }
        Ok(())
    })
}

/// Adjacent string literals concatenate, as in C++.
fn merge_string_literals<U>(
    upstream: U,
) -> Result<
    TransformStream<U, impl FnMut(&mut U, &mut Vec<Token>) -> Result<(), U::Error>, Token>,
    U::Error,
>
where
    U: TokenStream<Token = Token>,
{
    TransformStream::new(upstream, |upstream: &mut U, emit: &mut Vec<Token>| {
        let token = upstream.advance()?;
        if let Token::Str(mut value) = token {
            while !upstream.at_end() {
                match upstream.peek()? {
                    Token::Str(next) => {
                        upstream.advance()?;
                        value.push_str(&next);
                    }
                    _ => break,
                }
            }
            emit.push(Token::Str(value));
        } else {
            emit.push(token);
        }
        Ok(())
    })
}

const SAMPLE: &str = r##"
// a line comment
int main() {
    const char* greeting = "hello " "world\n";
    const char* raw = R"xx(a)b)xx";
    /* a multi-line
       comment */
    return ~flags;
}
"##;

fn main() -> Result<()> {
    let text = match env::args().nth(1) {
        Some(path) => fs::read_to_string(&path).with_context(|| format!("reading {path}"))?,
        None => SAMPLE.to_string(),
    };

    let source = StringSource::new(text);
    let lexed = LexedStream::new(source, build_lexer());

    let line_comments = strip_delimited(lexed, Token::SlashSlash, Token::Newline)
        .context("tokenizing the input")?;
    let multiline_comments = strip_delimited(line_comments, Token::SlashStar, Token::StarSlash)
        .context("tokenizing the input")?;
    let spaced = strip_space(multiline_comments).context("tokenizing the input")?;
    let mut tokens = merge_string_literals(spaced).context("tokenizing the input")?;

    while !tokens.at_end() {
        println!("{:?}", tokens.advance()?);
    }

    Ok(())
}
