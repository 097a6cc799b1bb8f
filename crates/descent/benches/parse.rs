use criterion::*;

use descent::grammar::{choice, left_assoc, token_eq, token_if, Grammar};
use descent::source::Lookahead;
use descent::{
    CharSource, FnDescriptor, LexedStream, Lexer, Literal, MultiLiteral, NoMatchingToken,
    ParseResult, StringSource, TokenStream, TransformStream,
};

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Plus,
    Minus,
    Star,
    Slash,
    Ws,
    Int(i64),
}

fn build_lexer() -> Lexer<Tok> {
    let integer = FnDescriptor::new(0, |chars: &mut Lookahead<'_>| {
        let mut value: i64 = 0;
        while let Some(c) = chars.peek_char().filter(char::is_ascii_digit) {
            value = value * 10 + i64::from(c as u8 - b'0');
            chars.advance_head(1);
        }

        if chars.chars_parsed() == 0 {
            return ParseResult::no_match(NoMatchingToken);
        }

        let consumed = chars.chars_parsed();
        ParseResult::matched(Tok::Int(value), consumed)
    });

    Lexer::new()
        .with(Literal::new(Tok::Plus, "+"))
        .with(Literal::new(Tok::Minus, "-"))
        .with(Literal::new(Tok::Star, "*"))
        .with(Literal::new(Tok::Slash, "/"))
        .with(MultiLiteral::new(Tok::Ws, 1, [" ", "\t", "\n"]))
        .with(integer)
}

fn expression_input() -> String {
    let mut input = String::from("1");
    for i in 0..200 {
        let op = ["+", "-", "*", "/"][i % 4];
        input.push_str(&format!(" {op} {}", i + 2));
    }
    input
}

fn bench_tokenize(c: &mut Criterion) {
    let lexer = build_lexer();
    let input = expression_input();

    c.bench_function("tokenize_expression", move |b| {
        b.iter(|| {
            let mut source = StringSource::new(input.clone());
            let tokens = lexer.tokenize(&mut source);
            assert!(tokens.is_value());
            black_box(tokens);
        })
    });
}

fn bench_parse(c: &mut Criterion) {
    let input = expression_input();

    c.bench_function("parse_expression", move |b| {
        b.iter(|| {
            let lexed = LexedStream::new(StringSource::new(input.clone()), build_lexer());
            let mut tokens = TransformStream::new(lexed, |upstream, emit| {
                let token = upstream.advance()?;
                if token != Tok::Ws {
                    emit.push(token);
                }
                Ok(())
            })
            .unwrap();

            let term = left_assoc(
                token_if(|token: &Tok| matches!(token, Tok::Int(_))),
                choice((token_eq(Tok::Star), token_eq(Tok::Slash))),
            );
            let expr = left_assoc(term, choice((token_eq(Tok::Plus), token_eq(Tok::Minus))));

            let result = expr.advance_if_matches(&mut tokens).unwrap();
            assert!(result.is_value());
            assert!(tokens.at_end());
            black_box(result);
        })
    });
}

criterion_group!(benches, bench_tokenize, bench_parse);
criterion_main!(benches);
