//! EDN Notation Reference
//!
//! This module documents the subset of EDN read and written by this library.
//!
//! # Overview
//!
//! A document is a sequence of top-level values separated by whitespace or
//! commas. Values are scalars, tagged values or one of four collections.
//! Commas count as whitespace everywhere.
//!
//! # Scalars
//!
//! | Type | Syntax | Example | Decodes to |
//! |------|--------|---------|------------|
//! | Nil | `nil` | `nil` | [`EdnValue::Nil`](crate::EdnValue::Nil) |
//! | Boolean | `true` or `false` | `true` | `Bool` |
//! | Integer | optional sign, digits | `-42`, `+7` | `Integer`, or `BigInt` past `i64` |
//! | Big integer | integer with `N` suffix | `42N` | `BigInt` |
//! | Float | digits with `.`, exponent or `M` suffix | `2.5`, `1e-3`, `1.5M` | `Float` |
//! | Symbolic float | `##Inf`, `##-Inf`, `##NaN` | `##Inf` | `Float` |
//! | String | `"..."` | `"a\nb"` | `String` |
//! | Keyword | `:` then a name | `:crux.db/id` | `Keyword` |
//! | Symbol | any other bare token | `even?`, `+` | `Symbol` |
//!
//! Strings support the escapes `\"`, `\\`, `\n`, `\r` and `\t`. Any other
//! escape is rejected with [`Error::InvalidEscape`](crate::Error::InvalidEscape).
//!
//! ```rust
//! use serde_edn::{decode_one, EdnValue};
//!
//! assert_eq!(decode_one("-42").unwrap(), EdnValue::Integer(-42));
//! assert_eq!(decode_one("##-Inf").unwrap(), EdnValue::Float(f64::NEG_INFINITY));
//! assert!(matches!(decode_one("9223372036854775808").unwrap(), EdnValue::BigInt(_)));
//! assert_eq!(decode_one(":a/b").unwrap(), EdnValue::keyword_unchecked("a/b"));
//! assert!(decode_one(r#""\A""#).is_err());
//! ```
//!
//! # Collections
//!
//! | Type | Syntax | Notes |
//! |------|--------|-------|
//! | Vector | `[a b c]` | ordered |
//! | List | `(a b c)` | ordered, kept distinct from vectors |
//! | Set | `#{a b c}` | duplicates collapse, order does not affect equality |
//! | Map | `{k1 v1 k2 v2}` | any value may be a key; pairs keep source order |
//!
//! A map must hold an even number of forms. Duplicate keys are kept unless
//! [`MapAs::Flat`](crate::MapAs::Flat) is requested.
//!
//! ```rust
//! use serde_edn::decode_one;
//!
//! let map = decode_one("{:a 1, :a 2}").unwrap();
//! assert_eq!(map.as_map().unwrap().len(), 2);
//! assert!(decode_one("{:a}").is_err());
//! assert!(decode_one("[1 2)").is_err());
//! ```
//!
//! # Tags
//!
//! `#name value` attaches a tag to the next complete value, which may be a
//! collection or another tagged value. `#inst` is resolved: its string is
//! read as RFC 3339 (or a bare `YYYY-MM-DD` date) into a UTC timestamp.
//! Every other tag is kept as [`EdnValue::Tagged`](crate::EdnValue::Tagged).
//!
//! ```rust
//! use serde_edn::{decode_one, encode};
//!
//! let inst = decode_one(r#"#inst "2020-04-13T08:01:14.261Z""#).unwrap();
//! assert!(inst.is_inst());
//! assert_eq!(encode(&inst), r#"#inst "2020-04-13T08:01:14.261Z""#);
//!
//! let tagged = decode_one("#my/tag #other [1]").unwrap();
//! assert_eq!(encode(&tagged), "#my/tag #other [1]");
//! assert!(decode_one(r#"#inst "yesterday""#).is_err());
//! ```
//!
//! # Token boundaries
//!
//! A bare token ends at whitespace, a comma, any closing delimiter, or an
//! opening `"`, `[`, `(` or `{`. So `foo"bar"` reads as the symbol `foo`
//! followed by the string `"bar"`.
//!
//! # Not supported
//!
//! - `;` comments and the `#_` discard form
//! - character literals such as `\a`
//! - `\uXXXX` escapes
//! - namespaced map syntax `#:ns{...}`
//!
//! # Encoding
//!
//! [`encode`](crate::encode) writes canonical text: members separated by a
//! single space, floats always with a fractional part, `BigInt` with an `N`
//! suffix, and `#inst` with millisecond precision.
//!
//! ```rust
//! use serde_edn::{encode, EdnValue};
//!
//! assert_eq!(encode(&EdnValue::Float(1.0)), "1.0");
//! assert_eq!(encode(&EdnValue::Float(f64::NAN)), "##NaN");
//! ```
