//! Position-tagged sums over heterogeneous types.
//!
//! [`choice`](crate::grammar::choice) produces one of these as its output
//! (which alternative matched, with its value); tuple sequences produce one
//! as their error (which child failed first, with its error). Inspect them
//! by pattern matching, or positionally through
//! [`index`](Alt2::index).

macro_rules! alt_sum {
    ($(#[$doc:meta])* $Alt:ident, $($Var:ident $T:ident $idx:expr),+) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $Alt<$($T),+> {
            $($Var($T),)+
        }

        impl<$($T),+> $Alt<$($T),+> {
            /// The zero-based position of the populated variant.
            pub fn index(&self) -> usize {
                match self {
                    $($Alt::$Var(_) => $idx,)+
                }
            }
        }
    };
}

alt_sum!(
    /// A value from one of two positions.
    Alt2,
    First A 0, Second B 1
);
alt_sum!(
    /// A value from one of three positions.
    Alt3,
    First A 0, Second B 1, Third C 2
);
alt_sum!(
    /// A value from one of four positions.
    Alt4,
    First A 0, Second B 1, Third C 2, Fourth D 3
);
alt_sum!(
    /// A value from one of five positions.
    Alt5,
    First A 0, Second B 1, Third C 2, Fourth D 3, Fifth E 4
);
alt_sum!(
    /// A value from one of six positions.
    Alt6,
    First A 0, Second B 1, Third C 2, Fourth D 3, Fifth E 4, Sixth F 5
);
alt_sum!(
    /// A value from one of seven positions.
    Alt7,
    First A 0, Second B 1, Third C 2, Fourth D 3, Fifth E 4, Sixth F 5, Seventh G 6
);
alt_sum!(
    /// A value from one of eight positions.
    Alt8,
    First A 0, Second B 1, Third C 2, Fourth D 3, Fifth E 4, Sixth F 5, Seventh G 6, Eighth H 7
);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn index_names_the_position() {
        let first: Alt3<u8, &str, bool> = Alt3::First(1);
        let third: Alt3<u8, &str, bool> = Alt3::Third(true);

        assert_eq!(first.index(), 0);
        assert_eq!(third.index(), 2);
    }
}
