//! JSON token and value types.
//!
//! This module defines the [`Token`] node of a parsed tree and the [`Value`]
//! payload it carries, along with the compact JSON rendering used by
//! [`Display`](core::fmt::Display).

use core::fmt::{self, Write as _};

use indexmap::IndexMap;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

/// Children of an object token, keyed by property name in insertion order.
pub type Map = IndexMap<String, Token>;
/// Children of an array token.
pub type Array = Vec<Token>;

/// The kind of a [`Token`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `null`
    Null,
    /// `true` or `false`
    Boolean,
    /// A number that fits in an `i64`.
    Integer,
    /// A non-negative number above `i64::MAX` that fits in a `u64`.
    UnsignedInteger,
    /// An integer outside both 64-bit ranges.
    BigInteger,
    /// A number written with a fraction or an exponent.
    Float,
    /// A string.
    String,
    /// An array of tokens.
    Array,
    /// An object of named tokens.
    Object,
}

/// A decoded JSON value.
///
/// Numbers are stored in the narrowest representation that holds the literal
/// exactly: [`Integer`](Value::Integer) first, then
/// [`UnsignedInteger`](Value::UnsignedInteger), then
/// [`BigInteger`](Value::BigInteger). A literal with a fraction or exponent is
/// always a [`Float`](Value::Float).
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// `null`
    #[default]
    Null,
    /// `true` or `false`
    Boolean(bool),
    /// Signed 64-bit integer.
    Integer(i64),
    /// Unsigned 64-bit integer, only used above `i64::MAX`.
    UnsignedInteger(u64),
    /// Arbitrary precision integer, only used outside the 64-bit ranges.
    BigInteger(BigInt),
    /// Floating point number.
    Float(f64),
    /// String.
    String(String),
    /// Ordered sequence of tokens.
    Array(Array),
    /// Insertion ordered mapping of property name to token.
    Object(Map),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns the [`TokenKind`] of this value.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Null => TokenKind::Null,
            Self::Boolean(_) => TokenKind::Boolean,
            Self::Integer(_) => TokenKind::Integer,
            Self::UnsignedInteger(_) => TokenKind::UnsignedInteger,
            Self::BigInteger(_) => TokenKind::BigInteger,
            Self::Float(_) => TokenKind::Float,
            Self::String(_) => TokenKind::String,
            Self::Array(_) => TokenKind::Array,
            Self::Object(_) => TokenKind::Object,
        }
    }

    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    ///
    /// # Examples
    ///
    /// ```
    /// use quickjson::Value;
    ///
    /// assert!(Value::Null.is_null());
    /// assert!(!Value::Boolean(false).is_null());
    /// ```
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is any of the numeric variants.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(
            self,
            Self::Integer(_) | Self::UnsignedInteger(_) | Self::BigInteger(_) | Self::Float(_)
        )
    }

    /// Returns `true` for [`Array`](Value::Array) and [`Object`](Value::Object).
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Object(_))
    }

    /// Returns the boolean payload, if any.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as an `i64` if it is an integer that fits.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            Self::UnsignedInteger(u) => i64::try_from(*u).ok(),
            Self::BigInteger(b) => i64::try_from(b).ok(),
            _ => None,
        }
    }

    /// Returns the value as a `u64` if it is a non-negative integer that fits.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Integer(i) => u64::try_from(*i).ok(),
            Self::UnsignedInteger(u) => Some(*u),
            Self::BigInteger(b) => u64::try_from(b).ok(),
            _ => None,
        }
    }

    /// Returns any numeric value converted to `f64`, possibly losing precision.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::UnsignedInteger(u) => Some(*u as f64),
            Self::BigInteger(b) => b.to_f64(),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the string payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements of an array value.
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the properties of an object value.
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(m) => Some(m),
            _ => None,
        }
    }
}

/// One node of a parsed JSON tree.
///
/// `name` is present only when the token is the value of an object property,
/// in which case it equals the key the parent object stores it under.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Token {
    name: Option<String>,
    value: Value,
}

impl Token {
    /// Creates an unnamed token.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self { name: None, value }
    }

    /// Creates a token carrying a property name.
    #[must_use]
    pub fn named(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: Some(name.into()),
            value,
        }
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    pub(crate) fn from_parts(name: Option<String>, value: Value) -> Self {
        Self { name, value }
    }

    pub(crate) fn into_parts(self) -> (Option<String>, Value) {
        (self.name, self.value)
    }

    /// The property name, if this token is the value of an object property.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The payload of this token.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Consumes the token, returning its payload.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Shorthand for `self.value().kind()`.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.value.kind()
    }

    /// Looks up a property of an object token.
    ///
    /// ```
    /// let root = quickjson::parse(r#"{"a":{"b":true}}"#, Default::default()).unwrap();
    /// let b = root.get("a").and_then(|a| a.get("b")).unwrap();
    /// assert_eq!(b.name(), Some("b"));
    /// assert_eq!(b.value().as_bool(), Some(true));
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Token> {
        self.value.as_object().and_then(|m| m.get(key))
    }

    /// Returns the `i`th element of an array token.
    #[must_use]
    pub fn index(&self, i: usize) -> Option<&Token> {
        self.value.as_array().and_then(|a| a.get(i))
    }
}

impl From<Value> for Token {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

/// Escapes a string for inclusion in a JSON string literal.
///
/// Quotes, backslashes, control characters within the basic multilingual plane
/// and the Unicode line separators are written as escape sequences.
pub(crate) fn write_escaped_string<W: fmt::Write>(src: &str, f: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            // pre-2019 parsers choke on raw line separators
            '\u{2028}' | '\u{2029}' => write!(f, "\\u{:04X}", c as u32)?,
            c if c.is_control() && c as u32 <= 0xFFFF => write!(f, "\\u{:04X}", c as u32)?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

fn write_float<W: fmt::Write>(n: f64, f: &mut W) -> fmt::Result {
    if !n.is_finite() {
        return f.write_str("null");
    }
    // `Debug` is the shortest exact form and always keeps a `.` or an exponent,
    // so the text parses back as a float.
    let text = format!("{n:?}");
    match text.split_once("e") {
        Some((mantissa, exp)) if !mantissa.contains('.') => write!(f, "{mantissa}.0e{exp}"),
        _ => f.write_str(&text),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Integer(i) => write!(f, "{i}"),
            Value::UnsignedInteger(u) => write!(f, "{u}"),
            Value::BigInteger(b) => write!(f, "{b}"),
            Value::Float(n) => write_float(*n, f),
            Value::String(s) => {
                f.write_char('"')?;
                write_escaped_string(s, f)?;
                f.write_char('"')
            }
            Value::Array(arr) => {
                f.write_str("[")?;
                let mut first = true;
                for v in arr {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                let mut first = true;
                for (k, v) in map {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    f.write_char('"')?;
                    write_escaped_string(k, f)?;
                    write!(f, "\":{v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}
