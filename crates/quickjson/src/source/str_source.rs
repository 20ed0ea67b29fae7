use bstr::ByteSlice;

use super::{CharSource, Location};
use crate::{error::LexError, escape_buffer::EscapeDecoder, text_buffer::TextBuffer};

/// A [`CharSource`] over text held entirely in memory.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    text: &'a [u8],
    pos: usize,
}

impl<'a> StrSource<'a> {
    /// Creates a source positioned at the start of `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            text: text.as_bytes(),
            pos: 0,
        }
    }

    /// The input from the cursor on.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        self.text.get(self.pos..).unwrap_or_default()
    }
}

impl CharSource for StrSource<'_> {
    fn get_char(&mut self) -> Option<u8> {
        let c = *self.text.get(self.pos)?;
        self.pos += 1;
        Some(c)
    }

    fn peek_char(&mut self) -> Option<u8> {
        self.text.get(self.pos).copied()
    }

    fn back_up(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    fn is_string_move_on(&mut self, literal: &[u8]) -> bool {
        if self.remaining().starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn location(&self) -> Location<'_> {
        Location::in_block(self.text, self.pos, 0)
    }

    /// Copies unescaped runs in one go instead of byte by byte.
    fn next_quoted_string(
        &mut self,
        quote: u8,
        buf: &mut TextBuffer,
        interpret_escapes: bool,
    ) -> Result<usize, LexError> {
        buf.clear();
        let mut decoder = EscapeDecoder::new();
        loop {
            let rest = self.remaining();
            let Some(i) = rest.find_byteset([quote, b'\\']) else {
                if !rest.is_empty() {
                    decoder.expect_no_pending()?;
                    buf.extend_from_slice(rest)?;
                }
                self.pos = self.text.len();
                return Err(LexError::UnterminatedString);
            };
            if i > 0 {
                decoder.expect_no_pending()?;
                buf.extend_from_slice(&rest[..i])?;
            }
            self.pos += i + 1;

            if rest[i] == quote {
                decoder.expect_no_pending()?;
                return Ok(buf.len());
            }
            if interpret_escapes {
                decoder.decode(self, buf)?;
            } else {
                let escaped = self.get_char().ok_or(LexError::UnterminatedString)?;
                buf.push(b'\\')?;
                buf.push(escaped)?;
            }
        }
    }
}
