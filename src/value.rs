//! Dynamic value representation for EDN data.
//!
//! This module provides the [`EdnValue`] enum, the in-memory form of every
//! shape the notation can express. The decoder produces it, the encoder
//! consumes it, and the serde bridge converts Rust types to and from it.
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use serde_edn::EdnValue;
//!
//! let nil = EdnValue::Nil;
//! let number = EdnValue::from(42);
//! let text = EdnValue::from("hello");
//! let kw = EdnValue::keyword("crux.db/id").unwrap();
//! let tagged = EdnValue::tagged("uuid", EdnValue::from("7d6c…")).unwrap();
//!
//! assert_eq!(kw.to_string(), ":crux.db/id");
//! assert!(tagged.is_tagged());
//! ```
//!
//! ### Extracting Values
//!
//! ```rust
//! use serde_edn::EdnValue;
//! use std::convert::TryFrom;
//!
//! let value = EdnValue::from(42);
//! assert_eq!(value.as_i64(), Some(42));
//!
//! let num: i64 = i64::try_from(value).unwrap();
//! assert_eq!(num, 42);
//! ```
//!
//! ## Equality
//!
//! Values compare structurally. Floats compare by bit pattern, so `NaN`
//! equals itself and `0.0` differs from `-0.0`; that keeps `Eq` and `Hash`
//! consistent, which sets and map flattening rely on.

use crate::{EdnMap, EdnSet, Error};
use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use num_bigint::BigInt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A dynamically-typed representation of any EDN value.
///
/// Composite variants own their children; values are never shared and never
/// cyclic.
///
/// # Examples
///
/// ```rust
/// use serde_edn::{decode_one, EdnValue};
///
/// let value = decode_one("[1 :two \"three\"]").unwrap();
/// assert_eq!(
///     value,
///     EdnValue::Vector(vec![
///         EdnValue::from(1),
///         EdnValue::keyword_unchecked("two"),
///         EdnValue::from("three"),
///     ])
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub enum EdnValue {
    #[default]
    Nil,
    Bool(bool),
    Integer(i64),
    /// An `N`-suffixed integer, or one too large for 64 bits.
    BigInt(BigInt),
    Float(f64),
    String(String),
    Symbol(String),
    /// Keyword name without the leading colon.
    Keyword(String),
    /// `#tag value` for any tag other than `inst`.
    Tagged { tag: String, value: Box<EdnValue> },
    /// `#inst "…"`.
    Inst(DateTime<Utc>),
    Vector(Vec<EdnValue>),
    List(Vec<EdnValue>),
    Set(EdnSet),
    Map(EdnMap),
}

impl EdnValue {
    /// Builds a keyword from its name (without the leading colon).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if `name` is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_edn::EdnValue;
    ///
    /// assert_eq!(EdnValue::keyword("a").unwrap().to_string(), ":a");
    /// assert!(EdnValue::keyword("").is_err());
    /// ```
    pub fn keyword(name: impl Into<String>) -> crate::Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_name("keyword name must not be empty"));
        }
        Ok(EdnValue::Keyword(name))
    }

    /// Builds a keyword without checking the name.
    #[must_use]
    pub fn keyword_unchecked(name: impl Into<String>) -> Self {
        EdnValue::Keyword(name.into())
    }

    /// Builds a symbol from its name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if `name` is empty.
    pub fn symbol(name: impl Into<String>) -> crate::Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_name("symbol name must not be empty"));
        }
        Ok(EdnValue::Symbol(name))
    }

    /// Wraps `value` in a `#tag`.
    ///
    /// `#inst` always reads back as [`EdnValue::Inst`], so the `inst` tag is
    /// refused here. Use [`EdnValue::inst`] to build timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if `tag` is empty or is `inst`.
    pub fn tagged(tag: impl Into<String>, value: EdnValue) -> crate::Result<Self> {
        let tag = tag.into();
        if tag.is_empty() {
            return Err(Error::invalid_name("tag must not be empty"));
        }
        if tag == "inst" {
            return Err(Error::invalid_name("use EdnValue::inst for #inst"));
        }
        Ok(EdnValue::Tagged {
            tag,
            value: Box::new(value),
        })
    }

    /// Parses an `#inst` timestamp from RFC 3339 text or a `YYYY-MM-DD` date.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` is not a timestamp.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_edn::EdnValue;
    ///
    /// let inst = EdnValue::inst("2020-04-12T21:39:15.482Z").unwrap();
    /// assert_eq!(inst.to_string(), "#inst \"2020-04-12T21:39:15.482Z\"");
    /// ```
    pub fn inst(text: &str) -> crate::Result<Self> {
        parse_inst(text).map(EdnValue::Inst).map_err(Error::custom)
    }

    /// Short human-readable name of the variant, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            EdnValue::Nil => "nil",
            EdnValue::Bool(_) => "boolean",
            EdnValue::Integer(_) => "integer",
            EdnValue::BigInt(_) => "big integer",
            EdnValue::Float(_) => "float",
            EdnValue::String(_) => "string",
            EdnValue::Symbol(_) => "symbol",
            EdnValue::Keyword(_) => "keyword",
            EdnValue::Tagged { .. } => "tagged value",
            EdnValue::Inst(_) => "instant",
            EdnValue::Vector(_) => "vector",
            EdnValue::List(_) => "list",
            EdnValue::Set(_) => "set",
            EdnValue::Map(_) => "map",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, EdnValue::Nil)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, EdnValue::Bool(_))
    }

    /// Returns `true` for integers, big integers and floats.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(
            self,
            EdnValue::Integer(_) | EdnValue::BigInt(_) | EdnValue::Float(_)
        )
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, EdnValue::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(self, EdnValue::Keyword(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_symbol(&self) -> bool {
        matches!(self, EdnValue::Symbol(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_tagged(&self) -> bool {
        matches!(self, EdnValue::Tagged { .. })
    }

    #[inline]
    #[must_use]
    pub const fn is_inst(&self) -> bool {
        matches!(self, EdnValue::Inst(_))
    }

    /// Returns `true` for vectors and lists.
    #[inline]
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, EdnValue::Vector(_) | EdnValue::List(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_set(&self) -> bool {
        matches!(self, EdnValue::Set(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, EdnValue::Map(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            EdnValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer value, including big integers that fit in 64 bits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_edn::EdnValue;
    ///
    /// assert_eq!(EdnValue::from(42).as_i64(), Some(42));
    /// assert_eq!(EdnValue::from(4.2).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            EdnValue::Integer(i) => Some(*i),
            EdnValue::BigInt(b) => i64::try_from(b).ok(),
            _ => None,
        }
    }

    /// Returns any numeric value as `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            EdnValue::Integer(i) => Some(*i as f64),
            EdnValue::BigInt(b) => b.to_string().parse().ok(),
            EdnValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            EdnValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            EdnValue::Keyword(k) => Some(k),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            EdnValue::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the tag and the wrapped value of a tagged value.
    #[inline]
    #[must_use]
    pub fn as_tagged(&self) -> Option<(&str, &EdnValue)> {
        match self {
            EdnValue::Tagged { tag, value } => Some((tag, value)),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_inst(&self) -> Option<&DateTime<Utc>> {
        match self {
            EdnValue::Inst(dt) => Some(dt),
            _ => None,
        }
    }

    /// Returns the elements of a vector or list.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> Option<&[EdnValue]> {
        match self {
            EdnValue::Vector(items) | EdnValue::List(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_set(&self) -> Option<&EdnSet> {
        match self {
            EdnValue::Set(set) => Some(set),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&EdnMap> {
        match self {
            EdnValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

/// Parses the text of an `#inst` literal.
pub(crate) fn parse_inst(text: &str) -> std::result::Result<DateTime<Utc>, String> {
    match DateTime::parse_from_rfc3339(text) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(rfc_err) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
            .ok_or_else(|| rfc_err.to_string()),
    }
}

/// Renders an instant the way `#inst` literals are written.
///
/// Output always has exactly three fractional digits. Anything finer than a
/// millisecond is truncated.
pub(crate) fn format_inst(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl PartialEq for EdnValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (EdnValue::Nil, EdnValue::Nil) => true,
            (EdnValue::Bool(a), EdnValue::Bool(b)) => a == b,
            (EdnValue::Integer(a), EdnValue::Integer(b)) => a == b,
            (EdnValue::BigInt(a), EdnValue::BigInt(b)) => a == b,
            (EdnValue::Float(a), EdnValue::Float(b)) => a.to_bits() == b.to_bits(),
            (EdnValue::String(a), EdnValue::String(b))
            | (EdnValue::Symbol(a), EdnValue::Symbol(b))
            | (EdnValue::Keyword(a), EdnValue::Keyword(b)) => a == b,
            (
                EdnValue::Tagged { tag: ta, value: va },
                EdnValue::Tagged { tag: tb, value: vb },
            ) => ta == tb && va == vb,
            (EdnValue::Inst(a), EdnValue::Inst(b)) => a == b,
            (EdnValue::Vector(a), EdnValue::Vector(b)) | (EdnValue::List(a), EdnValue::List(b)) => {
                a == b
            }
            (EdnValue::Set(a), EdnValue::Set(b)) => a == b,
            (EdnValue::Map(a), EdnValue::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for EdnValue {}

impl Hash for EdnValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            EdnValue::Nil => {}
            EdnValue::Bool(b) => b.hash(state),
            EdnValue::Integer(i) => i.hash(state),
            EdnValue::BigInt(b) => b.hash(state),
            EdnValue::Float(f) => f.to_bits().hash(state),
            EdnValue::String(s) | EdnValue::Symbol(s) | EdnValue::Keyword(s) => s.hash(state),
            EdnValue::Tagged { tag, value } => {
                tag.hash(state);
                value.hash(state);
            }
            EdnValue::Inst(dt) => dt.hash(state),
            EdnValue::Vector(items) | EdnValue::List(items) => items.hash(state),
            EdnValue::Set(set) => set.hash(state),
            EdnValue::Map(map) => map.hash(state),
        }
    }
}

impl fmt::Display for EdnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::encode(self))
    }
}

impl Serialize for EdnValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            EdnValue::Nil => serializer.serialize_unit(),
            EdnValue::Bool(b) => serializer.serialize_bool(*b),
            EdnValue::Integer(i) => serializer.serialize_i64(*i),
            EdnValue::BigInt(b) => match i128::try_from(b) {
                Ok(i) => serializer.serialize_i128(i),
                Err(_) => serializer.serialize_str(&b.to_string()),
            },
            EdnValue::Float(f) => serializer.serialize_f64(*f),
            EdnValue::String(s) | EdnValue::Symbol(s) | EdnValue::Keyword(s) => {
                serializer.serialize_str(s)
            }
            EdnValue::Tagged { value, .. } => value.serialize(serializer),
            EdnValue::Inst(dt) => serializer.serialize_str(&format_inst(dt)),
            EdnValue::Vector(items) | EdnValue::List(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for element in items {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            EdnValue::Set(set) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(set.len()))?;
                for element in set {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            EdnValue::Map(map) => {
                use serde::ser::SerializeMap;
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for EdnValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct EdnValueVisitor;

        impl<'de> Visitor<'de> for EdnValueVisitor {
            type Value = EdnValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid EDN value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(EdnValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(EdnValue::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(EdnValue::from(value))
            }

            fn visit_i128<E>(self, value: i128) -> Result<Self::Value, E> {
                Ok(match i64::try_from(value) {
                    Ok(i) => EdnValue::Integer(i),
                    Err(_) => EdnValue::BigInt(BigInt::from(value)),
                })
            }

            fn visit_u128<E>(self, value: u128) -> Result<Self::Value, E> {
                Ok(match i64::try_from(value) {
                    Ok(i) => EdnValue::Integer(i),
                    Err(_) => EdnValue::BigInt(BigInt::from(value)),
                })
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(EdnValue::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(EdnValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(EdnValue::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(EdnValue::Nil)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(EdnValue::Nil)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(EdnValue::Vector(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = EdnMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(EdnValue::Map(values))
            }
        }

        deserializer.deserialize_any(EdnValueVisitor)
    }
}

// TryFrom implementations for extracting values from EdnValue
impl TryFrom<EdnValue> for i64 {
    type Error = crate::Error;

    fn try_from(value: EdnValue) -> crate::Result<Self> {
        value.as_i64().ok_or_else(|| {
            crate::Error::custom(format!("expected integer, found {}", value.type_name()))
        })
    }
}

impl TryFrom<EdnValue> for f64 {
    type Error = crate::Error;

    fn try_from(value: EdnValue) -> crate::Result<Self> {
        value.as_f64().ok_or_else(|| {
            crate::Error::custom(format!("expected number, found {}", value.type_name()))
        })
    }
}

impl TryFrom<EdnValue> for bool {
    type Error = crate::Error;

    fn try_from(value: EdnValue) -> crate::Result<Self> {
        match value {
            EdnValue::Bool(b) => Ok(b),
            other => Err(crate::Error::custom(format!(
                "expected boolean, found {}",
                other.type_name()
            ))),
        }
    }
}

impl TryFrom<EdnValue> for String {
    type Error = crate::Error;

    fn try_from(value: EdnValue) -> crate::Result<Self> {
        match value {
            EdnValue::String(s) => Ok(s),
            other => Err(crate::Error::custom(format!(
                "expected string, found {}",
                other.type_name()
            ))),
        }
    }
}

// From implementations for creating EdnValue from primitives
impl From<bool> for EdnValue {
    fn from(value: bool) -> Self {
        EdnValue::Bool(value)
    }
}

impl From<i8> for EdnValue {
    fn from(value: i8) -> Self {
        EdnValue::Integer(value as i64)
    }
}

impl From<i16> for EdnValue {
    fn from(value: i16) -> Self {
        EdnValue::Integer(value as i64)
    }
}

impl From<i32> for EdnValue {
    fn from(value: i32) -> Self {
        EdnValue::Integer(value as i64)
    }
}

impl From<i64> for EdnValue {
    fn from(value: i64) -> Self {
        EdnValue::Integer(value)
    }
}

impl From<u8> for EdnValue {
    fn from(value: u8) -> Self {
        EdnValue::Integer(value as i64)
    }
}

impl From<u16> for EdnValue {
    fn from(value: u16) -> Self {
        EdnValue::Integer(value as i64)
    }
}

impl From<u32> for EdnValue {
    fn from(value: u32) -> Self {
        EdnValue::Integer(value as i64)
    }
}

impl From<u64> for EdnValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => EdnValue::Integer(i),
            Err(_) => EdnValue::BigInt(BigInt::from(value)),
        }
    }
}

impl From<f32> for EdnValue {
    fn from(value: f32) -> Self {
        EdnValue::Float(value as f64)
    }
}

impl From<f64> for EdnValue {
    fn from(value: f64) -> Self {
        EdnValue::Float(value)
    }
}

impl From<String> for EdnValue {
    fn from(value: String) -> Self {
        EdnValue::String(value)
    }
}

impl From<&str> for EdnValue {
    fn from(value: &str) -> Self {
        EdnValue::String(value.to_string())
    }
}

impl From<BigInt> for EdnValue {
    fn from(value: BigInt) -> Self {
        EdnValue::BigInt(value)
    }
}

impl From<DateTime<Utc>> for EdnValue {
    fn from(value: DateTime<Utc>) -> Self {
        EdnValue::Inst(value)
    }
}

impl From<Vec<EdnValue>> for EdnValue {
    fn from(value: Vec<EdnValue>) -> Self {
        EdnValue::Vector(value)
    }
}

impl From<EdnMap> for EdnValue {
    fn from(value: EdnMap) -> Self {
        EdnValue::Map(value)
    }
}

impl From<EdnSet> for EdnValue {
    fn from(value: EdnSet) -> Self {
        EdnValue::Set(value)
    }
}
