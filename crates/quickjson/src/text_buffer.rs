use crate::error::LexError;

/// Bytes kept allocated up front; the buffer grows towards its limit on demand.
const INITIAL_CAPACITY: usize = 256;

/// Scratch space for decoded strings and number literals.
///
/// One buffer is created per parse and reused for every token, so the only
/// allocation per string is the final owned copy handed to the tree. Writes
/// beyond `limit` bytes fail with [`LexError::TokenTooLarge`].
#[derive(Debug)]
pub struct TextBuffer {
    bytes: Vec<u8>,
    limit: usize,
}

impl TextBuffer {
    /// Creates a buffer that holds at most `limit` bytes.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(limit.min(INITIAL_CAPACITY)),
            limit,
        }
    }

    /// Maximum number of bytes the buffer accepts.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Discards the current content, keeping the allocation.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Number of bytes written since the last [`clear`](Self::clear).
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether nothing was written since the last [`clear`](Self::clear).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Appends one byte.
    ///
    /// # Errors
    ///
    /// [`LexError::TokenTooLarge`] when the buffer is full.
    pub fn push(&mut self, byte: u8) -> Result<(), LexError> {
        if self.bytes.len() >= self.limit {
            return Err(LexError::TokenTooLarge { limit: self.limit });
        }
        self.bytes.push(byte);
        Ok(())
    }

    /// Appends a run of bytes.
    ///
    /// # Errors
    ///
    /// [`LexError::TokenTooLarge`] when the bytes do not fit; nothing is
    /// written in that case.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) -> Result<(), LexError> {
        if self.bytes.len() + bytes.len() > self.limit {
            return Err(LexError::TokenTooLarge { limit: self.limit });
        }
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }

    /// Appends the UTF-8 encoding of `c`.
    ///
    /// # Errors
    ///
    /// [`LexError::TokenTooLarge`] when the encoding does not fit.
    pub fn push_char(&mut self, c: char) -> Result<(), LexError> {
        let mut utf8 = [0u8; 4];
        self.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes())
    }

    /// The raw content.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The content as text.
    ///
    /// # Errors
    ///
    /// [`LexError::InvalidUtf8`] when the bytes are not UTF-8.
    pub fn as_str(&self) -> Result<&str, LexError> {
        core::str::from_utf8(&self.bytes).map_err(|_| LexError::InvalidUtf8)
    }
}
