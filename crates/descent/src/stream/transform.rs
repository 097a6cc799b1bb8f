use crate::stream::TokenStream;

/// Position within a [`TransformStream`].
///
/// One upstream step can emit several downstream tokens, so a location is
/// the upstream head at the start of the current batch plus the index of the
/// token within that batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformLocation<L> {
    pub upstream: L,
    pub sub_index: usize,
}

/// A token stream that rewrites an upstream stream through a user step
/// function.
///
/// Each step may read any number of upstream tokens and emit any number of
/// downstream tokens into the pending batch — dropping tokens (emit
/// nothing), duplicating them, or synthesizing new ones. When the current
/// batch is exhausted the step runs again; steps that emit nothing are
/// simply re-run until one emits or the upstream ends.
///
/// The step function must be deterministic: seeking to a saved location
/// rewinds the upstream and re-runs the step, and relies on it regenerating
/// the same batch. This is a contract on the caller, not something the
/// stream can check.
///
/// Reading past the end of the stream is a contract violation and panics;
/// [`at_end`](TokenStream::at_end) is the guard.
///
/// ## Example
/// ```rust
/// use descent::stream::{TokenStream, TransformStream};
/// use descent::{LexedStream, Lexer, Literal, StringSource};
///
/// let lexer = Lexer::new()
///     .with(Literal::new('a', "a"))
///     .with(Literal::new(' ', " "));
/// let spaced = LexedStream::new(StringSource::new("a a"), lexer);
///
/// // drop the space tokens
/// let mut words = TransformStream::new(spaced, |upstream, emit| {
///     let token = upstream.advance()?;
///     if token != ' ' {
///         emit.push(token);
///     }
///     Ok(())
/// })
/// .unwrap();
///
/// assert_eq!(words.advance().unwrap(), 'a');
/// assert_eq!(words.advance().unwrap(), 'a');
/// assert!(words.at_end());
/// ```
pub struct TransformStream<U: TokenStream, F, T> {
    upstream: U,
    step: F,
    pending: Vec<T>,
    location: TransformLocation<U::Location>,
}

impl<U, F, T> TransformStream<U, F, T>
where
    U: TokenStream,
    T: Clone,
    F: FnMut(&mut U, &mut Vec<T>) -> Result<(), U::Error>,
{
    /// Wrap `upstream`, producing the first batch immediately.
    pub fn new(mut upstream: U, step: F) -> Result<TransformStream<U, F, T>, U::Error> {
        let location = TransformLocation {
            upstream: upstream.head(),
            sub_index: 0,
        };
        let mut stream = TransformStream {
            upstream,
            step,
            pending: Vec::new(),
            location,
        };
        stream.fetch_if_needed()?;
        Ok(stream)
    }

    /// Get a reference to the upstream stream.
    pub fn upstream(&self) -> &U {
        &self.upstream
    }

    /// Re-run the step until the batch has an unread token or the upstream
    /// is exhausted. Keeps the invariant that `sub_index` only equals the
    /// batch length when the upstream is at its end.
    fn fetch_if_needed(&mut self) -> Result<(), U::Error> {
        while self.location.sub_index == self.pending.len() {
            self.location = TransformLocation {
                upstream: self.upstream.head(),
                sub_index: 0,
            };
            self.pending.clear();

            if self.upstream.at_end() {
                return Ok(());
            }

            (self.step)(&mut self.upstream, &mut self.pending)?;
        }

        Ok(())
    }
}

impl<U, F, T> TokenStream for TransformStream<U, F, T>
where
    U: TokenStream,
    T: Clone,
    F: FnMut(&mut U, &mut Vec<T>) -> Result<(), U::Error>,
{
    type Token = T;
    type Location = TransformLocation<U::Location>;
    type Error = U::Error;

    fn peek(&mut self) -> Result<T, U::Error> {
        self.fetch_if_needed()?;

        // an empty slot here means the caller read past at_end
        Ok(self.pending[self.location.sub_index].clone())
    }

    fn advance(&mut self) -> Result<T, U::Error> {
        let token = self.peek()?;

        self.location.sub_index += 1;
        self.fetch_if_needed()?;

        Ok(token)
    }

    fn at_end(&mut self) -> bool {
        self.upstream.at_end() && self.location.sub_index == self.pending.len()
    }

    fn head(&mut self) -> Self::Location {
        self.location.clone()
    }

    fn set_head(&mut self, head: Self::Location) {
        self.upstream.set_head(head.upstream.clone());
        self.pending.clear();
        self.location = TransformLocation {
            upstream: head.upstream,
            sub_index: 0,
        };

        // rewinding to a saved head re-runs the step; the batch it produced
        // before must still be valid, so the sub-index is too
        if !self.upstream.at_end() {
            let _ = (self.step)(&mut self.upstream, &mut self.pending);
        }
        self.location.sub_index = head.sub_index;
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::lexer::{Lexer, Literal};
    use crate::source::StringSource;
    use crate::stream::LexedStream;

    fn letters(input: &str) -> LexedStream<StringSource, char> {
        let lexer = Lexer::new()
            .with(Literal::new('x', "x"))
            .with(Literal::new('y', "y"))
            .with(Literal::new('_', "_"));
        LexedStream::new(StringSource::new(input), lexer)
    }

    #[test]
    fn duplicating_step_fans_out() {
        let mut doubled = TransformStream::new(letters("xy"), |upstream, emit| {
            let token = upstream.advance()?;
            emit.push(token);
            emit.push(token);
            Ok(())
        })
        .unwrap();

        let mut out = Vec::new();
        while !doubled.at_end() {
            out.push(doubled.advance().unwrap());
        }

        assert_eq!(out, vec!['x', 'x', 'y', 'y']);
    }

    #[test]
    fn at_end_needs_the_batch_drained() {
        let mut doubled = TransformStream::new(letters("x"), |upstream, emit| {
            let token = upstream.advance()?;
            emit.push(token);
            emit.push(token);
            Ok(())
        })
        .unwrap();

        assert!(!doubled.at_end());
        doubled.advance().unwrap();
        // upstream is exhausted but one pending token remains
        assert!(!doubled.at_end());
        doubled.advance().unwrap();
        assert!(doubled.at_end());
    }

    #[test]
    fn dropping_step_skips_tokens() {
        let mut stripped = TransformStream::new(letters("x_y_"), |upstream, emit| {
            let token = upstream.advance()?;
            if token != '_' {
                emit.push(token);
            }
            Ok(())
        })
        .unwrap();

        assert_eq!(stripped.advance().unwrap(), 'x');
        assert_eq!(stripped.advance().unwrap(), 'y');
        assert!(stripped.at_end());
    }

    #[test]
    fn dropping_everything_is_an_empty_stream() {
        let mut stripped = TransformStream::new(letters("__"), |upstream, emit| {
            let token = upstream.advance()?;
            if token != '_' {
                emit.push(token);
            }
            Ok(())
        })
        .unwrap();

        assert!(stripped.at_end());
    }

    #[test]
    fn peek_is_stable_within_a_batch() {
        let mut doubled = TransformStream::new(letters("xy"), |upstream, emit| {
            let token = upstream.advance()?;
            emit.push(token);
            emit.push(token);
            Ok(())
        })
        .unwrap();

        assert_eq!(doubled.peek().unwrap(), 'x');
        assert_eq!(doubled.peek().unwrap(), 'x');
        assert_eq!(doubled.advance().unwrap(), 'x');
        assert_eq!(doubled.peek().unwrap(), 'x');
    }

    #[test]
    fn set_head_regenerates_the_batch() {
        let mut doubled = TransformStream::new(letters("xy"), |upstream, emit| {
            let token = upstream.advance()?;
            emit.push(token);
            emit.push(token);
            Ok(())
        })
        .unwrap();

        doubled.advance().unwrap();
        let mid_batch = doubled.head();
        assert_eq!(mid_batch.sub_index, 1);

        doubled.advance().unwrap();
        doubled.advance().unwrap();

        doubled.set_head(mid_batch);
        assert_eq!(doubled.advance().unwrap(), 'x');
        assert_eq!(doubled.advance().unwrap(), 'y');
        assert_eq!(doubled.advance().unwrap(), 'y');
        assert!(doubled.at_end());
    }

    #[test]
    fn step_errors_propagate() {
        let mut broken = TransformStream::new(letters("xq"), |upstream, emit| {
            let token = upstream.advance()?;
            emit.push(token);
            Ok(())
        })
        .unwrap();

        // the batch is refilled eagerly, so the tokenizer failure on 'q'
        // surfaces while stepping past 'x'
        assert!(broken.advance().is_err());
    }

    #[test]
    fn initial_step_error_surfaces_in_new() {
        let result = TransformStream::new(letters("q"), |upstream, emit| {
            let token = upstream.advance()?;
            emit.push(token);
            Ok(())
        });

        assert!(result.is_err());
    }
}
