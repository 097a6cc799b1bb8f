use crate::grammar::Grammar;
use crate::result::ParseResult;
use crate::stream::{Lookahead, TokenStream};

/// The value produced by [`left_assoc`]: a left-leaning binary tree of
/// elements joined by separators.
///
/// A single element parses to a [`Leaf`](LeftTree::Leaf); each further
/// `separator element` pair wraps the tree so far as the left operand of a
/// new [`Node`](LeftTree::Node). Walking `left` leads to earlier operands;
/// [`right`](LeftTree::right) is always the most recent element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeftTree<V, S> {
    Leaf(V),
    Node {
        left: Box<LeftTree<V, S>>,
        sep: S,
        right: V,
    },
}

impl<V, S> LeftTree<V, S> {
    pub fn has_left(&self) -> bool {
        matches!(self, LeftTree::Node { .. })
    }

    /// The tree of everything left of the last separator, if any.
    pub fn left(&self) -> Option<&LeftTree<V, S>> {
        match self {
            LeftTree::Leaf(_) => None,
            LeftTree::Node { left, .. } => Some(left),
        }
    }

    /// The last separator, if any.
    pub fn separator(&self) -> Option<&S> {
        match self {
            LeftTree::Leaf(_) => None,
            LeftTree::Node { sep, .. } => Some(sep),
        }
    }

    /// The most recent element.
    pub fn right(&self) -> &V {
        match self {
            LeftTree::Leaf(value) => value,
            LeftTree::Node { right, .. } => right,
        }
    }

    /// Post-order fold: `leaf` maps the first element, then `node` combines
    /// the accumulated left result with each separator and element pair,
    /// left to right.
    ///
    /// ## Example
    /// ```rust
    /// use descent::grammar::LeftTree;
    ///
    /// // 1 - 2 - 3, left-associative
    /// let tree = LeftTree::Node {
    ///     left: Box::new(LeftTree::Node {
    ///         left: Box::new(LeftTree::Leaf(1)),
    ///         sep: '-',
    ///         right: 2,
    ///     }),
    ///     sep: '-',
    ///     right: 3,
    /// };
    ///
    /// let value = tree.fold(&mut |n| n, &mut |left, _, right| left - right);
    /// assert_eq!(value, -4);
    /// ```
    pub fn fold<R, L, N>(self, leaf: &mut L, node: &mut N) -> R
    where
        L: FnMut(V) -> R,
        N: FnMut(R, S, V) -> R,
    {
        match self {
            LeftTree::Leaf(value) => leaf(value),
            LeftTree::Node { left, sep, right } => {
                let folded = left.fold(leaf, node);
                node(folded, sep, right)
            }
        }
    }
}

/// Grammar for left-associative binary operators. See [`left_assoc`].
#[derive(Debug, Clone, Copy)]
pub struct LeftAssoc<G, Sep> {
    element: G,
    separator: Sep,
}

/// Match `element (separator element)*`, building a [`LeftTree`].
///
/// At least one element is required; its failure is the combinator's
/// failure. After that, each iteration speculatively parses a separator and
/// then an element: if either is missing the loop stops and the tree built
/// so far is returned, with a consumed count that excludes the dangling
/// separator — a separator only counts when an element follows it.
pub fn left_assoc<G, Sep>(element: G, separator: Sep) -> LeftAssoc<G, Sep> {
    LeftAssoc { element, separator }
}

impl<S, G, Sep> Grammar<S> for LeftAssoc<G, Sep>
where
    S: TokenStream,
    G: Grammar<S>,
    Sep: Grammar<S>,
{
    type Output = LeftTree<G::Output, Sep::Output>;
    type Error = G::Error;

    fn test(&self, stream: &mut S) -> Result<ParseResult<Self::Output, Self::Error>, S::Error> {
        let mut look = Lookahead::new(stream);

        let (first, mut total) = match self.element.test(look.get())? {
            ParseResult::Matched { value, consumed } => {
                look.get().advance_by(consumed)?;
                (value, consumed)
            }
            ParseResult::NoMatch(error) => return Ok(ParseResult::no_match(error)),
        };
        let mut tree = LeftTree::Leaf(first);

        loop {
            let committed = total;

            let sep = match self.separator.test(look.get())? {
                ParseResult::Matched { value, consumed } => {
                    look.get().advance_by(consumed)?;
                    total += consumed;
                    value
                }
                ParseResult::NoMatch(_) => return Ok(ParseResult::matched(tree, committed)),
            };

            let right = match self.element.test(look.get())? {
                ParseResult::Matched { value, consumed } => {
                    look.get().advance_by(consumed)?;
                    total += consumed;
                    value
                }
                ParseResult::NoMatch(_) => return Ok(ParseResult::matched(tree, committed)),
            };

            tree = LeftTree::Node {
                left: Box::new(tree),
                sep,
                right,
            };
        }
    }
}
