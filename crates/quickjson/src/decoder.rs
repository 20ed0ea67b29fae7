use crate::{
    error::LexError,
    source::CharSource,
    text_buffer::TextBuffer,
    value::{Array, Map, Token, Value},
};

/// Outcome of decoding one value.
#[derive(Debug, PartialEq)]
pub(crate) enum Decoded {
    /// A scalar, or a freshly opened empty container.
    Value(Token),
    /// The `]` closing the current array.
    EndOfArray,
}

/// Decodes one value at the cursor. The first byte decides what follows;
/// `]` is only accepted when `inside_array` is set.
pub(crate) fn decode_value<S: CharSource + ?Sized>(
    source: &mut S,
    text: &mut TextBuffer,
    inside_array: bool,
) -> Result<Decoded, LexError> {
    let Some(next) = source.get_char() else {
        return Err(LexError::UnexpectedEndOfInput);
    };
    let value = match next {
        b'{' => {
            source.skip_space();
            Value::Object(Map::new())
        }
        b'[' => {
            source.skip_space();
            Value::Array(Array::new())
        }
        b'"' => {
            source.next_quoted_string(b'"', text, true)?;
            Value::String(text.as_str()?.to_owned())
        }
        b']' if inside_array => {
            source.skip_space();
            return Ok(Decoded::EndOfArray);
        }
        b']' => return Err(LexError::UnexpectedEndOfArray),
        b'0'..=b'9' => {
            source.back_up();
            source.next_number(false, text)?
        }
        b'-' => source.next_number(true, text)?,
        b't' => literal(source, b"rue", Value::Boolean(true))?,
        b'f' => literal(source, b"alse", Value::Boolean(false))?,
        b'n' => literal(source, b"ull", Value::Null)?,
        other => return Err(LexError::UnexpectedCharacter(char::from(other))),
    };
    Ok(Decoded::Value(Token::new(value)))
}

fn literal<S: CharSource + ?Sized>(
    source: &mut S,
    rest: &[u8],
    value: Value,
) -> Result<Value, LexError> {
    if source.is_string_move_on(rest) {
        Ok(value)
    } else {
        Err(LexError::InvalidLiteral)
    }
}
