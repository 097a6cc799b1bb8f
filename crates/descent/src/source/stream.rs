use std::io::{ErrorKind, Read, Seek, SeekFrom};

use crate::source::{CharSource, Location};

/// A character source over a seekable byte stream.
///
/// Byte-oriented: every byte is one character (`0x00..=0xFF` map to the
/// first 256 code points), which keeps stream offsets and character counts
/// in lockstep without buffering the input. The cursor is tracked locally;
/// the underlying stream is only sought when data is actually needed.
///
/// End-of-file during a read is silent — the read returns fewer characters,
/// exactly like the in-memory backing. I/O errors degrade to end-of-input.
#[derive(Debug)]
pub struct StreamSource<R> {
    inner: R,
    head: u64,
}

impl<R: Read + Seek> StreamSource<R> {
    pub fn new(mut inner: R) -> StreamSource<R> {
        let head = inner.stream_position().unwrap_or(0);
        StreamSource { inner, head }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read up to `n` bytes at the cursor without updating it.
    fn peek_bytes(&mut self, n: usize) -> Vec<u8> {
        if self.inner.seek(SeekFrom::Start(self.head)).is_err() {
            return Vec::new();
        }

        let mut buf = vec![0u8; n];
        let mut filled = 0;
        while filled < n {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(count) => filled += count,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }

        buf.truncate(filled);
        buf
    }
}

impl<R: Read + Seek> CharSource for StreamSource<R> {
    fn at_end(&mut self) -> bool {
        self.peek_bytes(1).is_empty()
    }

    fn head(&mut self) -> Location {
        Location(self.head)
    }

    fn set_head(&mut self, head: Location) {
        self.head = head.0;
    }

    fn advance_head(&mut self, n: usize) {
        // saturate at end-of-stream rather than running the cursor off it
        let available = self.peek_bytes(n).len();
        self.head += available as u64;
    }

    fn peek(&mut self, n: usize) -> String {
        self.peek_bytes(n).iter().map(|&b| b as char).collect()
    }

    fn read(&mut self, n: usize) -> String {
        let bytes = self.peek_bytes(n);
        self.head += bytes.len() as u64;
        bytes.iter().map(|&b| b as char).collect()
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::*;
    use crate::source::Lookahead;

    fn source(text: &str) -> StreamSource<Cursor<Vec<u8>>> {
        StreamSource::new(Cursor::new(text.as_bytes().to_vec()))
    }

    #[test]
    fn reads_and_advances() {
        let mut source = source("abcdef");

        assert_eq!(source.peek(3), "abc");
        assert_eq!(source.read(3), "abc");
        assert_eq!(source.read(3), "def");
        assert!(source.at_end());
    }

    #[test]
    fn short_reads_at_eof_are_silent() {
        let mut source = source("ab");

        assert_eq!(source.read(10), "ab");
        assert_eq!(source.read(10), "");
        assert!(source.at_end());
    }

    #[test]
    fn set_head_seeks_back() {
        let mut source = source("abcdef");

        let start = source.head();
        assert_eq!(source.read(4), "abcd");
        source.set_head(start);
        assert_eq!(source.peek(2), "ab");
    }

    #[test]
    fn advance_past_end_saturates() {
        let mut source = source("abc");

        source.advance_head(100);
        assert!(source.at_end());
        let stuck = source.head();
        source.advance_head(1);
        assert_eq!(source.head(), stuck);
    }

    #[test]
    fn lookahead_restores_stream_position() {
        let mut source = source("hello");
        let before = source.head();

        {
            let mut look = Lookahead::new(&mut source);
            assert_eq!(look.read(4), "hell");
        }

        assert_eq!(source.head(), before);
        assert_eq!(source.read(5), "hello");
    }
}
