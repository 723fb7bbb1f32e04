//! EDN serialization.
//!
//! Two halves live here:
//!
//! - [`encode`] renders an [`EdnValue`] as canonical EDN text.
//! - [`ValueSerializer`] turns any `T: Serialize` into an [`EdnValue`].
//!
//! ## Canonical text
//!
//! Collection members are separated by exactly one space and nothing else is
//! emitted around them, so encoding is structurally faithful but does not
//! reproduce the commas or layout of decoded input:
//!
//! ```rust
//! use serde_edn::{decode_one, encode};
//!
//! let value = decode_one("{:a 1,\n :b [true  nil]}").unwrap();
//! assert_eq!(encode(&value), "{:a 1 :b [true nil]}");
//! ```
//!
//! ## Mapping Rust data
//!
//! ```rust
//! use serde_edn::{to_value, encode};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Patient { name: String, age: u32, tags: Vec<String> }
//!
//! let patient = Patient { name: "Ada".into(), age: 36, tags: vec!["new".into()] };
//! let value = to_value(&patient).unwrap();
//! assert_eq!(encode(&value), r#"{:name "Ada" :age 36 :tags ["new"]}"#);
//! ```

use crate::value::format_inst;
use crate::{EdnMap, EdnValue, Error, Result};
use num_bigint::BigInt;
use serde::{ser, Serialize};

/// Renders a value as canonical EDN text.
///
/// # Examples
///
/// ```rust
/// use serde_edn::{encode, EdnValue};
///
/// let value = EdnValue::List(vec![
///     EdnValue::symbol("+").unwrap(),
///     EdnValue::from(1),
///     EdnValue::from(2.5),
/// ]);
/// assert_eq!(encode(&value), "(+ 1 2.5)");
/// ```
#[must_use]
pub fn encode(value: &EdnValue) -> String {
    let mut encoder = Encoder {
        output: String::with_capacity(64),
    };
    encoder.write_value(value);
    encoder.output
}

struct Encoder {
    output: String,
}

impl Encoder {
    fn write_value(&mut self, value: &EdnValue) {
        match value {
            EdnValue::Nil => self.output.push_str("nil"),
            EdnValue::Bool(true) => self.output.push_str("true"),
            EdnValue::Bool(false) => self.output.push_str("false"),
            EdnValue::Integer(i) => self.output.push_str(&i.to_string()),
            EdnValue::BigInt(b) => {
                self.output.push_str(&b.to_string());
                self.output.push('N');
            }
            EdnValue::Float(f) => self.write_float(*f),
            EdnValue::String(s) => self.write_string(s),
            EdnValue::Symbol(name) => self.output.push_str(name),
            EdnValue::Keyword(name) => {
                self.output.push(':');
                self.output.push_str(name);
            }
            EdnValue::Tagged { tag, value } => {
                self.output.push('#');
                self.output.push_str(tag);
                self.output.push(' ');
                self.write_value(value);
            }
            EdnValue::Inst(dt) => {
                self.output.push_str("#inst ");
                self.write_string(&format_inst(dt));
            }
            EdnValue::Vector(items) => self.write_seq("[", items, "]"),
            EdnValue::List(items) => self.write_seq("(", items, ")"),
            EdnValue::Set(set) => self.write_seq("#{", set, "}"),
            EdnValue::Map(map) => {
                self.output.push('{');
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        self.output.push(' ');
                    }
                    self.write_value(k);
                    self.output.push(' ');
                    self.write_value(v);
                }
                self.output.push('}');
            }
        }
    }

    fn write_seq<'a, I>(&mut self, open: &str, items: I, close: &str)
    where
        I: IntoIterator<Item = &'a EdnValue>,
    {
        self.output.push_str(open);
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.output.push(' ');
            }
            self.write_value(item);
        }
        self.output.push_str(close);
    }

    // A float always keeps a `.` so it reads back as a float.
    fn write_float(&mut self, f: f64) {
        if f.is_nan() {
            self.output.push_str("##NaN");
        } else if f.is_infinite() {
            self.output
                .push_str(if f > 0.0 { "##Inf" } else { "##-Inf" });
        } else {
            let text = f.to_string();
            self.output.push_str(&text);
            if !text.contains('.') {
                self.output.push_str(".0");
            }
        }
    }

    #[inline]
    fn write_string(&mut self, s: &str) {
        self.output.push('"');
        for ch in s.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                _ => self.output.push(ch),
            }
        }
        self.output.push('"');
    }
}

/// Serializer that converts any `T: Serialize` into an [`EdnValue`].
///
/// Struct fields, unit variants and enum variant names become keywords,
/// `None` and `()` become `nil`, and integers outside the `i64` range become
/// big integers.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<EdnValue>,
}

pub struct SerializeTupleVariant {
    variant: &'static str,
    vec: Vec<EdnValue>,
}

pub struct SerializeMap {
    map: EdnMap,
    next_key: Option<EdnValue>,
}

pub struct SerializeStructVariant {
    variant: &'static str,
    map: EdnMap,
}

fn variant_map(variant: &'static str, value: EdnValue) -> EdnValue {
    let mut map = EdnMap::with_capacity(1);
    map.insert(EdnValue::Keyword(variant.to_string()), value);
    EdnValue::Map(map)
}

impl ser::Serializer for ValueSerializer {
    type Ok = EdnValue;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<EdnValue> {
        Ok(EdnValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<EdnValue> {
        Ok(EdnValue::Integer(v as i64))
    }

    fn serialize_i16(self, v: i16) -> Result<EdnValue> {
        Ok(EdnValue::Integer(v as i64))
    }

    fn serialize_i32(self, v: i32) -> Result<EdnValue> {
        Ok(EdnValue::Integer(v as i64))
    }

    fn serialize_i64(self, v: i64) -> Result<EdnValue> {
        Ok(EdnValue::Integer(v))
    }

    fn serialize_i128(self, v: i128) -> Result<EdnValue> {
        Ok(match i64::try_from(v) {
            Ok(i) => EdnValue::Integer(i),
            Err(_) => EdnValue::BigInt(BigInt::from(v)),
        })
    }

    fn serialize_u8(self, v: u8) -> Result<EdnValue> {
        Ok(EdnValue::Integer(v as i64))
    }

    fn serialize_u16(self, v: u16) -> Result<EdnValue> {
        Ok(EdnValue::Integer(v as i64))
    }

    fn serialize_u32(self, v: u32) -> Result<EdnValue> {
        Ok(EdnValue::Integer(v as i64))
    }

    fn serialize_u64(self, v: u64) -> Result<EdnValue> {
        Ok(EdnValue::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<EdnValue> {
        Ok(match i64::try_from(v) {
            Ok(i) => EdnValue::Integer(i),
            Err(_) => EdnValue::BigInt(BigInt::from(v)),
        })
    }

    fn serialize_f32(self, v: f32) -> Result<EdnValue> {
        Ok(EdnValue::Float(v as f64))
    }

    fn serialize_f64(self, v: f64) -> Result<EdnValue> {
        Ok(EdnValue::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<EdnValue> {
        Ok(EdnValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<EdnValue> {
        Ok(EdnValue::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<EdnValue> {
        let vec = v.iter().map(|&b| EdnValue::Integer(b as i64)).collect();
        Ok(EdnValue::Vector(vec))
    }

    fn serialize_none(self) -> Result<EdnValue> {
        Ok(EdnValue::Nil)
    }

    fn serialize_some<T>(self, value: &T) -> Result<EdnValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<EdnValue> {
        Ok(EdnValue::Nil)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<EdnValue> {
        Ok(EdnValue::Nil)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<EdnValue> {
        Ok(EdnValue::Keyword(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<EdnValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<EdnValue>
    where
        T: ?Sized + Serialize,
    {
        Ok(variant_map(variant, to_edn_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            variant,
            map: EdnMap::with_capacity(len),
        })
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl SerializeMap {
    fn new(capacity: usize) -> Self {
        SerializeMap {
            map: EdnMap::with_capacity(capacity),
            next_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = EdnValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_edn_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<EdnValue> {
        Ok(EdnValue::Vector(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = EdnValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_edn_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<EdnValue> {
        Ok(EdnValue::Vector(self.vec))
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = EdnValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_edn_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<EdnValue> {
        Ok(EdnValue::Vector(self.vec))
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = EdnValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_edn_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<EdnValue> {
        Ok(variant_map(self.variant, EdnValue::Vector(self.vec)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = EdnValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.next_key = Some(to_edn_value(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_edn_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<EdnValue> {
        Ok(EdnValue::Map(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = EdnValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map
            .insert(EdnValue::Keyword(key.to_string()), to_edn_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<EdnValue> {
        Ok(EdnValue::Map(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = EdnValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map
            .insert(EdnValue::Keyword(key.to_string()), to_edn_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<EdnValue> {
        Ok(variant_map(self.variant, EdnValue::Map(self.map)))
    }
}

fn to_edn_value<T: Serialize + ?Sized>(value: &T) -> Result<EdnValue> {
    value.serialize(ValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode_one;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_encode_scalars() {
        assert_eq!(encode(&EdnValue::Nil), "nil");
        assert_eq!(encode(&EdnValue::Bool(true)), "true");
        assert_eq!(encode(&EdnValue::Integer(-12)), "-12");
        assert_eq!(encode(&EdnValue::BigInt(BigInt::from(7))), "7N");
        assert_eq!(encode(&EdnValue::Float(2.5)), "2.5");
        assert_eq!(encode(&EdnValue::Float(3.0)), "3.0");
        assert_eq!(encode(&EdnValue::Float(-0.0)), "-0.0");
        assert_eq!(encode(&EdnValue::Float(f64::NEG_INFINITY)), "##-Inf");
        assert_eq!(encode(&EdnValue::Float(f64::NAN)), "##NaN");
        assert_eq!(encode(&EdnValue::keyword_unchecked("a/b")), ":a/b");
        assert_eq!(encode(&EdnValue::Symbol("even?".into())), "even?");
    }

    #[test]
    fn test_encode_string_escapes() {
        let value = EdnValue::from("say \"hi\"\\\n\r\t");
        assert_eq!(encode(&value), r#""say \"hi\"\\\n\r\t""#);
        assert_eq!(decode_one(&encode(&value)).unwrap(), value);
    }

    #[test]
    fn test_encode_collections() {
        let set: crate::EdnSet = vec![EdnValue::from(1), EdnValue::from(2)]
            .into_iter()
            .collect();
        let mut map = EdnMap::new();
        map.insert(EdnValue::keyword_unchecked("s"), EdnValue::Set(set));
        map.insert(EdnValue::from("l"), EdnValue::List(vec![]));

        assert_eq!(
            encode(&EdnValue::Map(map)),
            r#"{:s #{1 2} "l" ()}"#
        );
        assert_eq!(encode(&EdnValue::Vector(vec![])), "[]");
    }

    #[test]
    fn test_encode_tagged_and_inst() {
        let tagged = EdnValue::tagged("my/tag", EdnValue::from(555)).unwrap();
        assert_eq!(encode(&tagged), "#my/tag 555");

        let dt = Utc.with_ymd_and_hms(2020, 4, 13, 8, 1, 14).unwrap();
        assert_eq!(
            encode(&EdnValue::Inst(dt)),
            "#inst \"2020-04-13T08:01:14.000Z\""
        );
    }

    #[test]
    fn test_encode_inst_truncates_to_millis() {
        let dt = decode_one(r#"#inst "2020-04-12T21:39:15.482123Z""#).unwrap();
        assert_eq!(encode(&dt), "#inst \"2020-04-12T21:39:15.482Z\"");

        let reread = decode_one(&encode(&dt)).unwrap();
        assert_ne!(reread, dt);
        assert_eq!(encode(&reread), encode(&dt));
    }

    #[test]
    fn test_value_serializer_enums() {
        #[derive(Serialize)]
        enum Op {
            Evict,
            Put(u32),
            Move(u32, u32),
            Rename { to: String },
        }

        assert_eq!(
            to_edn_value(&Op::Evict).unwrap(),
            EdnValue::keyword_unchecked("Evict")
        );
        assert_eq!(encode(&to_edn_value(&Op::Put(1)).unwrap()), "{:Put 1}");
        assert_eq!(
            encode(&to_edn_value(&Op::Move(1, 2)).unwrap()),
            "{:Move [1 2]}"
        );
        assert_eq!(
            encode(&to_edn_value(&Op::Rename { to: "x".into() }).unwrap()),
            "{:Rename {:to \"x\"}}"
        );
    }

    #[test]
    fn test_value_serializer_wide_integers() {
        assert_eq!(
            to_edn_value(&u64::MAX).unwrap(),
            EdnValue::BigInt(BigInt::from(u64::MAX))
        );
        assert_eq!(to_edn_value(&5i128).unwrap(), EdnValue::Integer(5));
        assert_eq!(to_edn_value(&Option::<u8>::None).unwrap(), EdnValue::Nil);
    }
}
