use std::io::{self, Read};

use log::{debug, trace};

use super::{CharSource, Location};

/// Smallest block that still fits the longest literal lookahead plus the
/// byte kept for [`CharSource::back_up`].
const MIN_CHUNK_SIZE: usize = 8;

/// A [`CharSource`] that pulls input from an [`io::Read`] one block at a
/// time.
///
/// Only one block is held in memory. When the cursor reaches the end of the
/// block, the unread bytes and the last consumed byte are moved to the front
/// and the rest is refilled from the reader.
///
/// A read error ends the input as if the reader were exhausted. The error is
/// kept and can be retrieved with [`take_error`](Self::take_error).
pub struct ReaderSource<R> {
    reader: R,
    block: Box<[u8]>,
    /// Next unread byte in `block`.
    pos: usize,
    /// End of the valid data in `block`.
    end: usize,
    /// Absolute offset of `block[0]`.
    base: usize,
    eof: bool,
    error: Option<io::Error>,
}

impl<R: Read> ReaderSource<R> {
    /// Creates a source reading `chunk_size` bytes at a time.
    pub fn new(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            block: vec![0; chunk_size.max(MIN_CHUNK_SIZE)].into_boxed_slice(),
            pos: 0,
            end: 0,
            base: 0,
            eof: false,
            error: None,
        }
    }

    /// Returns the read error that ended the input, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Gives back the reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Makes at least `want` unread bytes available. Returns false if the
    /// input ends first.
    fn fill(&mut self, want: usize) -> bool {
        while self.end - self.pos < want {
            if self.eof {
                return false;
            }
            if self.end == self.block.len() {
                self.compact();
                if self.end == self.block.len() {
                    return false;
                }
            }
            match self.reader.read(&mut self.block[self.end..]) {
                Ok(0) => self.eof = true,
                Ok(n) => {
                    trace!("read {n} bytes at offset {}", self.base + self.end);
                    self.end += n;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    debug!("read failed at offset {}: {e}", self.base + self.end);
                    self.error = Some(e);
                    self.eof = true;
                }
            }
        }
        true
    }

    /// Moves everything from the last consumed byte on to the front.
    fn compact(&mut self) {
        let keep_from = self.pos.saturating_sub(1);
        if keep_from == 0 {
            return;
        }
        self.block.copy_within(keep_from..self.end, 0);
        self.pos -= keep_from;
        self.end -= keep_from;
        self.base += keep_from;
    }
}

impl<R: Read> CharSource for ReaderSource<R> {
    fn get_char(&mut self) -> Option<u8> {
        if !self.fill(1) {
            return None;
        }
        let c = self.block[self.pos];
        self.pos += 1;
        Some(c)
    }

    fn peek_char(&mut self) -> Option<u8> {
        if self.fill(1) {
            Some(self.block[self.pos])
        } else {
            None
        }
    }

    fn back_up(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    fn is_string_move_on(&mut self, literal: &[u8]) -> bool {
        if !self.fill(literal.len()) {
            return false;
        }
        if self.block[self.pos..self.end].starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    fn position(&self) -> usize {
        self.base + self.pos
    }

    fn location(&self) -> Location<'_> {
        Location::in_block(&self.block[..self.end], self.pos, self.base)
    }
}
