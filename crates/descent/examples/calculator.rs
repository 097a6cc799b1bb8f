//! An arithmetic expression calculator: integers, `+ - * /`, parentheses,
//! unary minus, `pi`, the transcendentals `sin`/`cos`/`tan`, and named
//! variables that are substituted after parsing.
//!
//! ```text
//! cargo run --example calculator -- "sin(theta) * (1 + 2) - -3"
//! ```

use std::env;

use anyhow::{bail, Context, Result};
use ordered_float::OrderedFloat;

use descent::grammar::{
    choice, lazy, left_assoc, token_eq, token_if, Alt2, Alt3, Alt6, BoxGrammar, Grammar, LeftTree,
};
use descent::source::Lookahead;
use descent::{
    CharSource, FnDescriptor, LexedStream, Lexer, Literal, MultiLiteral, NoMatchingToken,
    NoTokenMatched, ParseResult, StringSource, TokenStream, TransformStream,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Variable {
    Theta,
    Omega,
    E,
}

impl Variable {
    fn text(self) -> &'static str {
        match self {
            Variable::Theta => "theta",
            Variable::Omega => "omega",
            Variable::E => "e",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Token {
    LParen,
    RParen,
    Plus,
    Minus,
    Star,
    Slash,
    Whitespace,
    Sin,
    Cos,
    Tan,
    Pi,
    Variable(Variable),
    Number(OrderedFloat<f64>),
    Invalid,
}

/// One token per run of decimal digits.
fn integer_descriptor(
) -> FnDescriptor<impl Fn(&mut Lookahead<'_>) -> ParseResult<Token, NoMatchingToken>> {
    FnDescriptor::new(0, |chars: &mut Lookahead<'_>| {
        let mut value: f64 = 0.0;
        while let Some(c) = chars.peek_char().filter(char::is_ascii_digit) {
            value = value * 10.0 + f64::from(c as u8 - b'0');
            chars.advance_head(1);
        }

        if chars.chars_parsed() == 0 {
            return ParseResult::no_match(NoMatchingToken);
        }

        let consumed = chars.chars_parsed();
        ParseResult::matched(Token::Number(OrderedFloat(value)), consumed)
    })
}

fn build_lexer() -> Lexer<Token> {
    Lexer::new()
        .with(Literal::new(Token::LParen, "("))
        .with(Literal::new(Token::RParen, ")"))
        .with(Literal::new(Token::Plus, "+"))
        .with(Literal::new(Token::Minus, "-"))
        .with(Literal::new(Token::Slash, "/"))
        .with(Literal::new(Token::Star, "*"))
        .with(MultiLiteral::new(
            Token::Whitespace,
            1,
            [" ", "\t", "\n", "\r"],
        ))
        .with(Literal::new(Token::Sin, "sin"))
        .with(Literal::new(Token::Cos, "cos"))
        .with(Literal::new(Token::Tan, "tan"))
        .with(Literal::new(Token::Pi, "pi"))
        .with(Literal::new(Token::Variable(Variable::Theta), "theta"))
        .with(Literal::new(Token::Variable(Variable::Omega), "omega"))
        .with(Literal::new(Token::Variable(Variable::E), "e"))
        .with(integer_descriptor())
        // lowest priority: swallow one unexpected character so tokenizing
        // never jams; the grammar rejects the token instead
        .with(FnDescriptor::new(
            i32::MIN,
            |chars: &mut Lookahead<'_>| match chars.read_char() {
                Some(_) => ParseResult::matched(Token::Invalid, 1),
                None => ParseResult::no_match(NoMatchingToken),
            },
        ))
}

type Upstream = LexedStream<StringSource, Token>;
type StripWhitespace = fn(&mut Upstream, &mut Vec<Token>) -> Result<(), NoTokenMatched>;
type Tokens = TransformStream<Upstream, StripWhitespace, Token>;

fn strip_whitespace(upstream: &mut Upstream, emit: &mut Vec<Token>) -> Result<(), NoTokenMatched> {
    let token = upstream.advance()?;
    if token != Token::Whitespace {
        emit.push(token);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Number(f64),
    Pi,
    Variable { name: Variable, value: Option<f64> },
    Neg(Box<Expr>),
    Sin(Box<Expr>),
    Cos(Box<Expr>),
    Tan(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
}

impl Expr {
    fn eval(&self) -> Result<f64> {
        Ok(match self {
            Expr::Number(n) => *n,
            Expr::Pi => std::f64::consts::PI,
            Expr::Variable { name, value } => match value {
                Some(v) => *v,
                None => bail!("variable `{}` was never substituted", name.text()),
            },
            Expr::Neg(e) => -e.eval()?,
            Expr::Sin(e) => e.eval()?.sin(),
            Expr::Cos(e) => e.eval()?.cos(),
            Expr::Tan(e) => e.eval()?.tan(),
            Expr::Add(l, r) => l.eval()? + r.eval()?,
            Expr::Sub(l, r) => l.eval()? - r.eval()?,
            Expr::Mul(l, r) => l.eval()? * r.eval()?,
            Expr::Div(l, r) => l.eval()? / r.eval()?,
        })
    }

    fn pending_variables(&self, out: &mut Vec<Variable>) {
        match self {
            Expr::Number(_) | Expr::Pi => {}
            Expr::Variable { name, value: None } => out.push(*name),
            Expr::Variable { value: Some(_), .. } => {}
            Expr::Neg(e) | Expr::Sin(e) | Expr::Cos(e) | Expr::Tan(e) => e.pending_variables(out),
            Expr::Add(l, r) | Expr::Sub(l, r) | Expr::Mul(l, r) | Expr::Div(l, r) => {
                l.pending_variables(out);
                r.pending_variables(out);
            }
        }
    }

    fn substitute_variable(&mut self, var: Variable, substituted: f64) {
        match self {
            Expr::Number(_) | Expr::Pi => {}
            Expr::Variable { name, value } => {
                if *name == var {
                    *value = Some(substituted);
                }
            }
            Expr::Neg(e) | Expr::Sin(e) | Expr::Cos(e) | Expr::Tan(e) => {
                e.substitute_variable(var, substituted)
            }
            Expr::Add(l, r) | Expr::Sub(l, r) | Expr::Mul(l, r) | Expr::Div(l, r) => {
                l.substitute_variable(var, substituted);
                r.substitute_variable(var, substituted);
            }
        }
    }
}

/// The grammar's nominal error: every structural failure collapses to this
/// before boxing, which is what lets the recursive grammar types close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BadExpression;

type ExprGrammar = BoxGrammar<Tokens, Expr, BadExpression>;

fn expression() -> ExprGrammar {
    plus_expression()
}

fn plus_expression() -> ExprGrammar {
    left_assoc(
        times_expression(),
        choice((token_eq(Token::Plus), token_eq(Token::Minus))),
    )
    .map(|tree: LeftTree<Expr, Alt2<Token, Token>>| {
        tree.fold(&mut |expr| expr, &mut |left, sep, right| match sep {
            Alt2::First(_) => Expr::Add(Box::new(left), Box::new(right)),
            Alt2::Second(_) => Expr::Sub(Box::new(left), Box::new(right)),
        })
    })
    .boxed()
}

fn times_expression() -> ExprGrammar {
    left_assoc(
        primary_expression(),
        choice((token_eq(Token::Star), token_eq(Token::Slash))),
    )
    .map(|tree: LeftTree<Expr, Alt2<Token, Token>>| {
        tree.fold(&mut |expr| expr, &mut |left, sep, right| match sep {
            Alt2::First(_) => Expr::Mul(Box::new(left), Box::new(right)),
            Alt2::Second(_) => Expr::Div(Box::new(left), Box::new(right)),
        })
    })
    .boxed()
}

fn primary_expression() -> ExprGrammar {
    choice((
        parenthesised_expression(),
        unary_minus_expression(),
        number_expression(),
        pi_expression(),
        function_expression(),
        variable_expression(),
    ))
    .map(|alt| match alt {
        Alt6::First(e)
        | Alt6::Second(e)
        | Alt6::Third(e)
        | Alt6::Fourth(e)
        | Alt6::Fifth(e)
        | Alt6::Sixth(e) => e,
    })
    .map_err(|_| BadExpression)
    .boxed()
}

fn parenthesised_expression() -> ExprGrammar {
    (
        token_eq(Token::LParen),
        lazy(expression),
        token_eq(Token::RParen),
    )
        .map(|(_, expr, _)| expr)
        .map_err(|_| BadExpression)
        .boxed()
}

fn unary_minus_expression() -> ExprGrammar {
    (token_eq(Token::Minus), lazy(primary_expression))
        .map(|(_, expr)| Expr::Neg(Box::new(expr)))
        .map_err(|_| BadExpression)
        .boxed()
}

fn number_expression() -> ExprGrammar {
    Grammar::<Tokens>::map_err(
        Grammar::<Tokens>::map(
            token_if(|token: &Token| matches!(token, Token::Number(_))),
            |token| match token {
                Token::Number(n) => Expr::Number(n.into_inner()),
                _ => unreachable!(),
            },
        ),
        |_| BadExpression,
    )
    .boxed()
}

fn pi_expression() -> ExprGrammar {
    Grammar::<Tokens>::map_err(
        Grammar::<Tokens>::map(token_eq(Token::Pi), |_| Expr::Pi),
        |_| BadExpression,
    )
    .boxed()
}

fn transcendental(keyword: Token, wrap: fn(Box<Expr>) -> Expr) -> ExprGrammar {
    (token_eq(keyword), parenthesised_expression())
        .map(move |(_, arg)| wrap(Box::new(arg)))
        .map_err(|_| BadExpression)
        .boxed()
}

fn function_expression() -> ExprGrammar {
    choice((
        transcendental(Token::Sin, Expr::Sin),
        transcendental(Token::Cos, Expr::Cos),
        transcendental(Token::Tan, Expr::Tan),
    ))
    .map(|alt| match alt {
        Alt3::First(e) | Alt3::Second(e) | Alt3::Third(e) => e,
    })
    .map_err(|_| BadExpression)
    .boxed()
}

fn variable_expression() -> ExprGrammar {
    Grammar::<Tokens>::map_err(
        Grammar::<Tokens>::map(
            token_if(|token: &Token| matches!(token, Token::Variable(_))),
            |token| match token {
                Token::Variable(name) => Expr::Variable { name, value: None },
                _ => unreachable!(),
            },
        ),
        |_| BadExpression,
    )
    .boxed()
}

fn main() -> Result<()> {
    let input = env::args()
        .nth(1)
        .unwrap_or_else(|| "sin(theta) * (1 + 2) - -3".to_string());

    let lexed = LexedStream::new(StringSource::new(input.clone()), build_lexer());
    let mut tokens = TransformStream::new(lexed, strip_whitespace as StripWhitespace)
        .context("tokenizing the input")?;

    let result = expression().advance_if_matches(&mut tokens)?;
    let (mut expr, _consumed) = match result.into_result() {
        Ok(matched) => matched,
        Err(BadExpression) => bail!("bad expression: {input}"),
    };

    if !tokens.at_end() {
        bail!("trailing input after the expression: {input}");
    }

    let mut pending = Vec::new();
    expr.pending_variables(&mut pending);
    if !pending.is_empty() {
        let names: Vec<_> = pending.iter().map(|v| v.text()).collect();
        println!("substituting: {}", names.join(", "));
    }

    expr.substitute_variable(Variable::Theta, 0.5);
    expr.substitute_variable(Variable::Omega, 2.0);
    expr.substitute_variable(Variable::E, std::f64::consts::E);

    println!("{input} = {}", expr.eval()?);
    Ok(())
}
