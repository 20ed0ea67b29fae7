//! Number scanning and classification.
//!
//! The lexeme is copied into the text buffer while the grammar
//! `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?` is checked, then
//! converted into the narrowest [`Value`] that represents it exactly.

use num_bigint::BigInt;

use crate::{error::LexError, source::CharSource, text_buffer::TextBuffer, value::Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberLexeme {
    Integer,
    Float,
}

/// Scans a number starting at the source cursor. A leading `-`, if any, has
/// already been consumed and is signalled through `negative`.
pub(crate) fn scan_number<S: CharSource + ?Sized>(
    source: &mut S,
    negative: bool,
    buf: &mut TextBuffer,
) -> Result<Value, LexError> {
    buf.clear();
    if negative {
        buf.push(b'-')?;
    }
    let lexeme = scan_lexeme(source, buf)?;
    classify(buf.as_str()?, lexeme)
}

fn scan_lexeme<S: CharSource + ?Sized>(
    source: &mut S,
    buf: &mut TextBuffer,
) -> Result<NumberLexeme, LexError> {
    match source.peek_char() {
        Some(b'0') => {
            source.get_char();
            buf.push(b'0')?;
        }
        Some(b'1'..=b'9') => {
            push_digits(source, buf)?;
        }
        _ => return Err(LexError::InvalidNumber),
    }

    let mut lexeme = NumberLexeme::Integer;
    if source.peek_char() == Some(b'.') {
        source.get_char();
        buf.push(b'.')?;
        if push_digits(source, buf)? == 0 {
            return Err(LexError::InvalidNumber);
        }
        lexeme = NumberLexeme::Float;
    }
    if let Some(e @ (b'e' | b'E')) = source.peek_char() {
        source.get_char();
        buf.push(e)?;
        if let Some(sign @ (b'+' | b'-')) = source.peek_char() {
            source.get_char();
            buf.push(sign)?;
        }
        if push_digits(source, buf)? == 0 {
            return Err(LexError::InvalidNumber);
        }
        lexeme = NumberLexeme::Float;
    }
    Ok(lexeme)
}

fn push_digits<S: CharSource + ?Sized>(
    source: &mut S,
    buf: &mut TextBuffer,
) -> Result<usize, LexError> {
    let mut count = 0;
    while let Some(d @ b'0'..=b'9') = source.peek_char() {
        source.get_char();
        buf.push(d)?;
        count += 1;
    }
    Ok(count)
}

/// Integers become `Integer` when they fit `i64`, `UnsignedInteger` when they
/// fit `u64`, and `BigInteger` otherwise. Anything with a fraction or
/// exponent becomes `Float`, which must stay finite.
pub(crate) fn classify(text: &str, lexeme: NumberLexeme) -> Result<Value, LexError> {
    match lexeme {
        NumberLexeme::Float => match text.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Value::Float(f)),
            _ => Err(LexError::InvalidNumber),
        },
        NumberLexeme::Integer => {
            if let Ok(i) = text.parse::<i64>() {
                return Ok(Value::Integer(i));
            }
            if let Ok(u) = text.parse::<u64>() {
                return Ok(Value::UnsignedInteger(u));
            }
            text.parse::<BigInt>()
                .map(Value::BigInteger)
                .map_err(|_| LexError::InvalidNumber)
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::source::StrSource;

    fn scan(text: &str) -> (Result<Value, LexError>, usize) {
        let mut source = StrSource::new(text);
        let negative = source.peek_char() == Some(b'-');
        if negative {
            source.get_char();
        }
        let mut buf = TextBuffer::with_limit(64);
        let result = scan_number(&mut source, negative, &mut buf);
        (result, source.position())
    }

    #[rstest]
    #[case("0", Value::Integer(0), 1)]
    #[case("-0", Value::Integer(0), 2)]
    #[case("42,", Value::Integer(42), 2)]
    #[case("01", Value::Integer(0), 1)]
    #[case("-9223372036854775808", Value::Integer(i64::MIN), 20)]
    #[case("9223372036854775808", Value::UnsignedInteger(1 << 63), 19)]
    #[case("18446744073709551615", Value::UnsignedInteger(u64::MAX), 20)]
    #[case("1.5", Value::Float(1.5), 3)]
    #[case("-2.5e-3]", Value::Float(-0.0025), 7)]
    #[case("1E2", Value::Float(100.0), 3)]
    #[case("3e+1 ", Value::Float(30.0), 4)]
    fn scans(#[case] text: &str, #[case] expected: Value, #[case] consumed: usize) {
        let (result, position) = scan(text);
        assert_eq!(result, Ok(expected));
        assert_eq!(position, consumed);
    }

    #[test]
    fn big_integers() {
        let (result, _) = scan("18446744073709551616");
        let expected: BigInt = "18446744073709551616".parse().unwrap();
        assert_eq!(result, Ok(Value::BigInteger(expected)));

        let (result, _) = scan("-9223372036854775809");
        let expected: BigInt = "-9223372036854775809".parse().unwrap();
        assert_eq!(result, Ok(Value::BigInteger(expected)));
    }

    #[rstest]
    #[case("-")]
    #[case("-x")]
    #[case("1.")]
    #[case("1.e3")]
    #[case("1e")]
    #[case("1e+")]
    #[case(".5")]
    #[case("1e400")]
    #[case("-1.5e309")]
    fn rejects_malformed(#[case] text: &str) {
        assert_eq!(scan(text).0, Err(LexError::InvalidNumber));
    }

    #[test]
    fn respects_buffer_limit() {
        let mut source = StrSource::new("123456");
        let mut buf = TextBuffer::with_limit(4);
        assert_eq!(
            scan_number(&mut source, false, &mut buf),
            Err(LexError::TokenTooLarge { limit: 4 })
        );
    }
}
