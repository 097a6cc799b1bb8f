//! Sequences of grammars, written as plain tuples.
//!
//! A tuple `(g1, g2, ..., gn)` of grammars is itself a grammar that matches
//! its children in order. Its output is the tuple of the children's outputs
//! and its consumed count is the sum of theirs; each child is tested after
//! its predecessors' speculative advances, so later children see the stream
//! as if the earlier ones had already committed. The first child to fail
//! decides the result: the sequence reports that child's error, tagged by
//! position in an [`AltN`](crate::grammar::Alt2) sum.

use crate::grammar::{Alt2, Alt3, Alt4, Alt5, Alt6, Alt7, Alt8, Grammar};
use crate::result::ParseResult;
use crate::stream::{Lookahead, TokenStream};

macro_rules! sequence_grammar {
    ($Alt:ident, $(($G:ident, $value:ident, $idx:tt, $Var:ident)),+) => {
        impl<S, $($G),+> Grammar<S> for ($($G,)+)
        where
            S: TokenStream,
            $($G: Grammar<S>,)+
        {
            type Output = ($($G::Output,)+);
            type Error = $Alt<$($G::Error),+>;

            fn test(
                &self,
                stream: &mut S,
            ) -> Result<ParseResult<Self::Output, Self::Error>, S::Error> {
                let mut look = Lookahead::new(stream);
                let mut consumed = 0;

                $(
                    let $value = match self.$idx.test(look.get())? {
                        ParseResult::Matched { value, consumed: n } => {
                            look.get().advance_by(n)?;
                            consumed += n;
                            value
                        }
                        ParseResult::NoMatch(error) => {
                            return Ok(ParseResult::no_match($Alt::$Var(error)));
                        }
                    };
                )+

                Ok(ParseResult::matched(($($value,)+), consumed))
            }
        }
    };
}

sequence_grammar!(Alt2, (A, a, 0, First), (B, b, 1, Second));
sequence_grammar!(Alt3, (A, a, 0, First), (B, b, 1, Second), (C, c, 2, Third));
sequence_grammar!(
    Alt4,
    (A, a, 0, First),
    (B, b, 1, Second),
    (C, c, 2, Third),
    (D, d, 3, Fourth)
);
sequence_grammar!(
    Alt5,
    (A, a, 0, First),
    (B, b, 1, Second),
    (C, c, 2, Third),
    (D, d, 3, Fourth),
    (E, e, 4, Fifth)
);
sequence_grammar!(
    Alt6,
    (A, a, 0, First),
    (B, b, 1, Second),
    (C, c, 2, Third),
    (D, d, 3, Fourth),
    (E, e, 4, Fifth),
    (F, f, 5, Sixth)
);
sequence_grammar!(
    Alt7,
    (A, a, 0, First),
    (B, b, 1, Second),
    (C, c, 2, Third),
    (D, d, 3, Fourth),
    (E, e, 4, Fifth),
    (F, f, 5, Sixth),
    (G, g, 6, Seventh)
);
sequence_grammar!(
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
