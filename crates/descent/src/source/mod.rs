//! Character sources: cursor-based readers of characters with seek, plus the
//! speculative [`Lookahead`] view that all backtracking is built on.

mod stream;
mod string;

pub use stream::StreamSource;
pub use string::StringSource;

use crate::error::FailedExpectation;
use crate::result::ParseResult;

/// Opaque cursor position within a character source.
///
/// Locations support equality and can be fed back to
/// [`CharSource::set_head`] on the source that produced them; nothing else
/// about them is observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location(pub(crate) u64);

/// A cursor over a sequence of characters.
///
/// Reads past the end are not errors: they return fewer characters than
/// requested (possibly none), and advancing past the end saturates. The
/// trait is object-safe so that heterogeneous sets of token descriptors can
/// share one source; methods take `&mut self` because stream-backed sources
/// must touch the underlying reader even to peek, but peeks never move the
/// cursor.
pub trait CharSource {
    /// True iff the cursor is past the last character.
    fn at_end(&mut self) -> bool;

    /// The current cursor position.
    fn head(&mut self) -> Location;

    /// Seek to a location previously returned by this source's [`head`].
    ///
    /// [`head`]: CharSource::head
    fn set_head(&mut self, head: Location);

    /// Advance the cursor by up to `n` characters, saturating at the end of
    /// the input.
    fn advance_head(&mut self, n: usize);

    /// Return up to `n` characters starting at the cursor, without
    /// advancing.
    fn peek(&mut self, n: usize) -> String;

    /// The character under the cursor, or `None` at the end of the input.
    fn peek_char(&mut self) -> Option<char> {
        self.peek(1).chars().next()
    }

    /// Same as [`peek`](CharSource::peek), but advances past what was read.
    fn read(&mut self, n: usize) -> String {
        let text = self.peek(n);
        self.advance_head(text.chars().count());
        text
    }

    /// Same as [`peek_char`](CharSource::peek_char), but advances past the
    /// character read.
    fn read_char(&mut self) -> Option<char> {
        let c = self.peek_char();
        if c.is_some() {
            self.advance_head(1);
        }
        c
    }

    /// The number of characters left before the end, if the backing is fully
    /// buffered.
    fn chars_remaining(&mut self) -> Option<usize> {
        None
    }
}

/// A scoped speculative view over a character source.
///
/// On construction the view captures the source's head; on drop it
/// unconditionally seeks the source back to that position — even when the
/// enclosing computation exits early. Reads and advances through the view
/// move the underlying source, so the advances are visible to
/// [`sub_parse`](Lookahead::sub_parse) callees, but from the caller's
/// perspective the whole view is a peek: [`chars_parsed`] reports what
/// *would* have been consumed, and committing is an explicit
/// [`advance_head`](CharSource::advance_head) on the source afterwards.
///
/// `Lookahead` implements [`CharSource`] itself, so views nest; a nested
/// view restores to the position of the enclosing view, not to the
/// outermost one.
///
/// [`chars_parsed`]: Lookahead::chars_parsed
pub struct Lookahead<'a> {
    source: &'a mut dyn CharSource,
    start: Location,
    chars_parsed: usize,
}

impl<'a> Lookahead<'a> {
    pub fn new(source: &'a mut dyn CharSource) -> Lookahead<'a> {
        let start = source.head();
        Lookahead {
            source,
            start,
            chars_parsed: 0,
        }
    }

    /// Total characters advanced through this view since construction.
    pub fn chars_parsed(&self) -> usize {
        self.chars_parsed
    }

    /// True iff `text` is next in the input. Never advances.
    pub fn next_is(&mut self, text: &str) -> bool {
        if self.at_end() {
            return false;
        }

        self.peek(text.chars().count()) == text
    }

    /// True iff `c` is the character under the cursor. Never advances.
    pub fn next_is_char(&mut self, c: char) -> bool {
        self.peek_char() == Some(c)
    }

    /// Advance past `text` if it is next in the input; otherwise leave the
    /// cursor unchanged and report the failed expectation.
    pub fn expect(&mut self, text: &str) -> ParseResult<(), FailedExpectation> {
        if self.next_is(text) {
            let len = text.chars().count();
            self.advance_head(len);
            return ParseResult::matched((), len);
        }

        ParseResult::no_match(FailedExpectation)
    }

    /// Single-character form of [`expect`](Lookahead::expect).
    pub fn expect_char(&mut self, c: char) -> ParseResult<(), FailedExpectation> {
        if self.next_is_char(c) {
            self.advance_head(1);
            return ParseResult::matched((), 1);
        }

        ParseResult::no_match(FailedExpectation)
    }

    /// Invoke `f` with the underlying source, positioned where this view
    /// currently is.
    ///
    /// `f` is expected to leave the cursor where it found it (typically by
    /// running under its own nested `Lookahead`); any advances it does leave
    /// behind are still undone when this view drops.
    pub fn sub_parse<R>(&mut self, f: impl FnOnce(&mut dyn CharSource) -> R) -> R {
        f(&mut *self.source)
    }
}

impl CharSource for Lookahead<'_> {
    fn at_end(&mut self) -> bool {
        self.source.at_end()
    }

    fn head(&mut self) -> Location {
        self.source.head()
    }

    fn set_head(&mut self, head: Location) {
        self.source.set_head(head);
    }

    fn advance_head(&mut self, n: usize) {
        self.chars_parsed += n;
        self.source.advance_head(n);
    }

    fn peek(&mut self, n: usize) -> String {
        self.source.peek(n)
    }

    fn read(&mut self, n: usize) -> String {
        let text = self.source.read(n);
        self.chars_parsed += text.chars().count();
        text
    }

    fn read_char(&mut self) -> Option<char> {
        let c = self.source.read_char();
        if c.is_some() {
            self.chars_parsed += 1;
        }
        c
    }

    fn chars_remaining(&mut self) -> Option<usize> {
        self.source.chars_remaining()
    }
}

impl Drop for Lookahead<'_> {
    fn drop(&mut self) {
        self.source.set_head(self.start);
    }
}
