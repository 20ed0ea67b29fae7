//! Character sources feeding the decoder.
//!
//! A [`CharSource`] is a forward cursor over bytes with one byte of pushback
//! and a few token-level helpers. The tree builder only talks to this trait,
//! so in-memory text ([`StrSource`]) and chunked readers ([`ReaderSource`])
//! go through the same parsing code.

mod reader_source;
mod str_source;

use bstr::ByteSlice;

pub use reader_source::ReaderSource;
pub use str_source::StrSource;

use crate::{
    error::LexError, escape_buffer::EscapeDecoder, number, text_buffer::TextBuffer, value::Value,
};

/// A failure position together with the line of input around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location<'a> {
    /// Absolute byte offset of the cursor.
    pub offset: usize,
    /// The current line up to the cursor.
    pub consumed: &'a [u8],
    /// The current line from the cursor on.
    pub remaining: &'a [u8],
}

impl<'a> Location<'a> {
    /// Splits the line of `block` that contains `cursor`. `base` is the
    /// absolute offset of `block[0]`.
    pub(crate) fn in_block(block: &'a [u8], cursor: usize, base: usize) -> Self {
        let cursor = cursor.min(block.len());
        let (head, tail) = block.split_at(cursor);
        let start = head.rfind_byte(b'\n').map_or(0, |i| i + 1);
        let end = tail.find_byte(b'\n').unwrap_or(tail.len());
        Location {
            offset: base + cursor,
            consumed: &head[start..],
            remaining: &tail[..end],
        }
    }
}

fn is_json_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r')
}

/// Byte-level input for the parser.
///
/// Implementors provide the cursor primitives; the token helpers have default
/// implementations built on them and may be overridden with faster versions.
pub trait CharSource {
    /// Returns the byte at the cursor and advances past it. At the end of
    /// input returns `None` and leaves the cursor where it is.
    fn get_char(&mut self) -> Option<u8>;

    /// Returns the byte at the cursor without advancing.
    fn peek_char(&mut self) -> Option<u8>;

    /// Moves the cursor back by one byte. Only valid right after a
    /// successful [`get_char`](Self::get_char).
    fn back_up(&mut self);

    /// Consumes `literal` if the input continues with it. On mismatch the
    /// cursor does not move.
    fn is_string_move_on(&mut self, literal: &[u8]) -> bool;

    /// Absolute offset of the cursor.
    fn position(&self) -> usize;

    /// The cursor position and the line of input around it, for diagnostics.
    fn location(&self) -> Location<'_>;

    /// Skips JSON whitespace.
    fn skip_space(&mut self) {
        while self.peek_char().is_some_and(is_json_space) {
            self.get_char();
        }
    }

    /// Skips whitespace, then consumes `c` and any whitespace after it if it
    /// is the next byte. On mismatch the leading whitespace stays consumed.
    fn is_char_move_on(&mut self, c: u8) -> bool {
        self.skip_space();
        if self.peek_char() != Some(c) {
            return false;
        }
        self.get_char();
        self.skip_space();
        true
    }

    /// Reads a string body up to the closing `quote` (the opening one has
    /// already been consumed) into `buf`, returning the number of bytes
    /// written.
    ///
    /// With `interpret_escapes` set, escapes are decoded; otherwise the raw
    /// text is copied, though an escaped quote still does not end the string.
    ///
    /// # Errors
    ///
    /// Any [`LexError`] found in the string body, including
    /// [`LexError::TokenTooLarge`] when the body overflows `buf`.
    fn next_quoted_string(
        &mut self,
        quote: u8,
        buf: &mut TextBuffer,
        interpret_escapes: bool,
    ) -> Result<usize, LexError> {
        buf.clear();
        let mut decoder = EscapeDecoder::new();
        loop {
            match self.get_char() {
                None => return Err(LexError::UnterminatedString),
                Some(c) if c == quote => {
                    decoder.expect_no_pending()?;
                    return Ok(buf.len());
                }
                Some(b'\\') if interpret_escapes => decoder.decode(self, buf)?,
                Some(b'\\') => {
                    let escaped = self.get_char().ok_or(LexError::UnterminatedString)?;
                    buf.push(b'\\')?;
                    buf.push(escaped)?;
                }
                Some(c) => {
                    decoder.expect_no_pending()?;
                    buf.push(c)?;
                }
            }
        }
    }

    /// Reads a number at the cursor. A leading `-`, if any, has already been
    /// consumed and is signalled through `negative`.
    ///
    /// # Errors
    ///
    /// [`LexError::InvalidNumber`] when the text does not follow the JSON
    /// number grammar, [`LexError::TokenTooLarge`] when it overflows `buf`.
    fn next_number(&mut self, negative: bool, buf: &mut TextBuffer) -> Result<Value, LexError> {
        number::scan_number(self, negative, buf)
    }

    /// Skips whitespace and reports whether the input is exhausted.
    fn is_eol(&mut self) -> bool {
        self.skip_space();
        self.peek_char().is_none()
    }
}
