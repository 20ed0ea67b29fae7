//! Decoding of backslash escapes inside quoted strings.
//!
//! [`UnicodeEscapeBuffer`] accumulates the four hexadecimal digits of a
//! `\uXXXX` escape. [`EscapeDecoder`] drives it from a [`CharSource`] and pairs
//! UTF-16 surrogates, so `"\uD83D\uDE00"` decodes to a single scalar value.

use crate::{error::LexError, source::CharSource, text_buffer::TextBuffer};

#[derive(Debug)]
pub(crate) struct UnicodeEscapeBuffer {
    buffer: [u8; 4],
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self {
            buffer: [0; 4],
            len: 0,
        }
    }

    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Feeds one hex digit. Returns the UTF-16 code unit once four digits
    /// have been seen, resetting for the next escape.
    pub fn feed(&mut self, c: u8) -> Result<Option<u32>, LexError> {
        if !c.is_ascii_hexdigit() || self.len >= 4 {
            return Err(LexError::InvalidUnicodeEscape);
        }
        self.buffer[usize::from(self.len)] = c;
        self.len += 1;

        if self.len < 4 {
            return Ok(None);
        }
        self.reset();
        let code = self.buffer.iter().fold(0u32, |acc, &d| {
            // is_ascii_hexdigit was checked on the way in
            let digit = char::from(d).to_digit(16).unwrap_or(0);
            (acc << 4) | digit
        });
        Ok(Some(code))
    }
}

fn is_high_surrogate(unit: u32) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

fn is_low_surrogate(unit: u32) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Per-string escape state.
#[derive(Debug)]
pub(crate) struct EscapeDecoder {
    hex: UnicodeEscapeBuffer,
    pending_high_surrogate: Option<u32>,
}

impl EscapeDecoder {
    pub fn new() -> Self {
        Self {
            hex: UnicodeEscapeBuffer::new(),
            pending_high_surrogate: None,
        }
    }

    /// Decodes the escape whose backslash was just consumed, writing the
    /// result to `out`.
    pub fn decode<S: CharSource + ?Sized>(
        &mut self,
        source: &mut S,
        out: &mut TextBuffer,
    ) -> Result<(), LexError> {
        let simple = match source.get_char() {
            None => return Err(LexError::UnterminatedString),
            Some(b'u') => return self.decode_unicode(source, out),
            Some(b'"') => b'"',
            Some(b'\\') => b'\\',
            Some(b'/') => b'/',
            Some(b'b') => 0x08,
            Some(b'f') => 0x0C,
            Some(b'n') => b'\n',
            Some(b'r') => b'\r',
            Some(b't') => b'\t',
            Some(other) => return Err(LexError::InvalidEscape(char::from(other))),
        };
        self.expect_no_pending()?;
        out.push(simple)
    }

    fn decode_unicode<S: CharSource + ?Sized>(
        &mut self,
        source: &mut S,
        out: &mut TextBuffer,
    ) -> Result<(), LexError> {
        self.hex.reset();
        let unit = loop {
            let c = source.get_char().ok_or(LexError::InvalidUnicodeEscape)?;
            if let Some(unit) = self.hex.feed(c)? {
                break unit;
            }
        };

        let scalar = match self.pending_high_surrogate.take() {
            Some(high) if is_low_surrogate(unit) => {
                0x10000 + ((high & 0x3FF) << 10) + (unit & 0x3FF)
            }
            Some(high) => return Err(LexError::LoneSurrogate(high)),
            None if is_high_surrogate(unit) => {
                self.pending_high_surrogate = Some(unit);
                return Ok(());
            }
            None if is_low_surrogate(unit) => return Err(LexError::LoneSurrogate(unit)),
            None => unit,
        };
        let c = char::from_u32(scalar).ok_or(LexError::InvalidUnicodeEscape)?;
        out.push_char(c)
    }

    /// Fails if a high surrogate is still waiting for its low half. Called
    /// before any non-`\u` content and at the closing quote.
    pub fn expect_no_pending(&mut self) -> Result<(), LexError> {
        match self.pending_high_surrogate.take() {
            Some(high) => Err(LexError::LoneSurrogate(high)),
            None => Ok(()),
        }
    }
}
