//! EDN deserialization.
//!
//! Text is first read into an [`EdnValue`] tree by the decoder, and
//! [`ValueDeserializer`] then drives any `T: Deserialize` from that tree.
//!
//! ## Mapping rules
//!
//! - keywords, symbols and strings all feed string visitors, so `:name`
//!   matches a struct field called `name`
//! - vectors, lists and sets are sequences
//! - maps keep their pair order; keys can be any value
//! - `nil` is `None` or `()`
//! - a tagged value yields its inner value, and `#inst` yields RFC 3339 text
//!   (which is what `chrono`'s serde support reads)
//! - enums are read from a bare keyword (unit variant) or a single-entry map
//!   `{:Variant payload}`
//!
//! ```rust
//! use serde_edn::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Point { x: i32, y: i32 }
//!
//! let point: Point = from_str("{:x 1 :y 2}").unwrap();
//! assert_eq!(point, Point { x: 1, y: 2 });
//! ```

use crate::value::format_inst;
use crate::{EdnMap, EdnValue, Error, Result};
use serde::{de, forward_to_deserialize_any};

/// Deserializer that reads Rust data out of an owned [`EdnValue`].
pub struct ValueDeserializer {
    value: EdnValue,
}

impl ValueDeserializer {
    #[must_use]
    pub fn new(value: EdnValue) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            EdnValue::Nil => visitor.visit_unit(),
            EdnValue::Bool(b) => visitor.visit_bool(b),
            EdnValue::Integer(i) => visitor.visit_i64(i),
            EdnValue::BigInt(b) => {
                if let Ok(i) = i64::try_from(&b) {
                    visitor.visit_i64(i)
                } else if let Ok(u) = u64::try_from(&b) {
                    visitor.visit_u64(u)
                } else if let Ok(i) = i128::try_from(&b) {
                    visitor.visit_i128(i)
                } else if let Ok(u) = u128::try_from(&b) {
                    visitor.visit_u128(u)
                } else {
                    visitor.visit_string(b.to_string())
                }
            }
            EdnValue::Float(f) => visitor.visit_f64(f),
            EdnValue::String(s) | EdnValue::Symbol(s) | EdnValue::Keyword(s) => {
                visitor.visit_string(s)
            }
            EdnValue::Tagged { value, .. } => ValueDeserializer::new(*value).deserialize_any(visitor),
            EdnValue::Inst(dt) => visitor.visit_string(format_inst(&dt)),
            EdnValue::Vector(items) | EdnValue::List(items) => {
                visitor.visit_seq(SeqDeserializer::new(items))
            }
            EdnValue::Set(set) => visitor.visit_seq(SeqDeserializer::new(set.into_iter().collect())),
            EdnValue::Map(map) => visitor.visit_map(MapDeserializer::new(map)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            EdnValue::Nil => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            EdnValue::Keyword(variant) | EdnValue::String(variant) | EdnValue::Symbol(variant) => {
                visitor.visit_enum(EnumDeserializer::new(variant, None))
            }
            EdnValue::Map(map) if map.len() == 1 => {
                let mut pairs = map.into_iter();
                match pairs.next() {
                    Some((
                        EdnValue::Keyword(variant)
                        | EdnValue::String(variant)
                        | EdnValue::Symbol(variant),
                        value,
                    )) => visitor.visit_enum(EnumDeserializer::new(variant, Some(value))),
                    _ => Err(Error::custom(format!(
                        "expected a keyword variant name for enum {}",
                        name
                    ))),
                }
            }
            EdnValue::Tagged { value, .. } => {
                ValueDeserializer::new(*value).deserialize_enum(name, variants, visitor)
            }
            other => Err(Error::custom(format!(
                "expected a keyword or single-entry map for enum {}, found {}",
                name,
                other.type_name()
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<EdnValue>,
}

impl SeqDeserializer {
    fn new(vec: Vec<EdnValue>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: std::vec::IntoIter<(EdnValue, EdnValue)>,
    value: Option<EdnValue>,
}

impl MapDeserializer {
    fn new(map: EdnMap) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<EdnValue>,
}

impl EnumDeserializer {
    fn new(variant: String, value: Option<EdnValue>) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(EdnValue::String(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Option<EdnValue>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(EdnValue::Nil) | None => Ok(()),
            Some(other) => Err(Error::custom(format!(
                "expected unit variant, found {}",
                other.type_name()
            ))),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("expected newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(EdnValue::Vector(items)) | Some(EdnValue::List(items)) => {
                visitor.visit_seq(SeqDeserializer::new(items))
            }
            _ => Err(Error::custom("expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(EdnValue::Map(map)) => visitor.visit_map(MapDeserializer::new(map)),
            _ => Err(Error::custom("expected struct variant")),
        }
    }
}
