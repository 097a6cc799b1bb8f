use crate::source::{CharSource, Location};

/// An in-memory character source over a fixed string.
///
/// The whole input is buffered, so [`chars_remaining`] is available. The
/// cursor is a byte offset internally, but every operation counts in
/// characters, so multi-byte UTF-8 input behaves the same as ASCII.
///
/// [`chars_remaining`]: CharSource::chars_remaining
#[derive(Debug, Clone)]
pub struct StringSource {
    text: String,
    head: usize,
}

impl StringSource {
    pub fn new(text: impl Into<String>) -> StringSource {
        StringSource {
            text: text.into(),
            head: 0,
        }
    }
}

impl CharSource for StringSource {
    fn at_end(&mut self) -> bool {
        self.head >= self.text.len()
    }

    fn head(&mut self) -> Location {
        Location(self.head as u64)
    }

    fn set_head(&mut self, head: Location) {
        self.head = head.0 as usize;
    }

    fn advance_head(&mut self, n: usize) {
        match self.text[self.head..].char_indices().nth(n) {
            Some((offset, _)) => self.head += offset,
            None => self.head = self.text.len(),
        }
    }

    fn peek(&mut self, n: usize) -> String {
        self.text[self.head..].chars().take(n).collect()
    }

    fn chars_remaining(&mut self) -> Option<usize> {
        Some(self.text[self.head..].chars().count())
    }
}
