//! Reader behaviour for each piece of EDN notation, one case per test.

use chrono::{TimeZone, Utc};
use num_bigint::BigInt;
use serde_edn::{
    decode_one, decode_one_with_options, edn, encode, DecodeOptions, EdnMap, EdnSet, EdnValue,
    Error, KeywordAs, ListAs, MapAs,
};

fn read(text: &str) -> EdnValue {
    decode_one(text).unwrap()
}

fn kw(name: &str) -> EdnValue {
    EdnValue::keyword_unchecked(name)
}

fn set(members: Vec<EdnValue>) -> EdnValue {
    EdnValue::Set(members.into_iter().collect::<EdnSet>())
}

fn map(pairs: Vec<(EdnValue, EdnValue)>) -> EdnValue {
    EdnValue::Map(EdnMap::from(pairs))
}

// Strings

#[test]
fn test_empty_string() {
    assert_eq!(read(r#""""#), EdnValue::from(""));
}

#[test]
fn test_string() {
    assert_eq!(read(r#""hi""#), EdnValue::from("hi"));
    assert_eq!(read(r#""hi there""#), EdnValue::from("hi there"));
}

#[test]
fn test_string_multiline() {
    assert_eq!(read("\"one\ntwo\""), EdnValue::from("one\ntwo"));
}

#[test]
fn test_string_escapes() {
    assert_eq!(read(r#""one\ntwo""#), EdnValue::from("one\ntwo"));
    assert_eq!(read(r#""one\rtwo""#), EdnValue::from("one\rtwo"));
    assert_eq!(read(r#""one\ttwo""#), EdnValue::from("one\ttwo"));
    assert_eq!(read(r#""\\""#), EdnValue::from("\\"));
    assert_eq!(read(r#""\"""#), EdnValue::from("\""));
}

#[test]
fn test_string_unknown_escape() {
    let err = decode_one(r#""\u0041""#).unwrap_err();
    assert!(matches!(err, Error::InvalidEscape { escape: 'u', .. }));
}

// Numbers

#[test]
fn test_integers() {
    assert_eq!(read("928764"), EdnValue::Integer(928764));
    assert_eq!(read("1001"), EdnValue::Integer(1001));
    assert_eq!(read("0"), EdnValue::Integer(0));
    assert_eq!(read("+3"), EdnValue::Integer(3));
    assert_eq!(read("-0"), EdnValue::Integer(0));
    assert_eq!(read("-12"), EdnValue::Integer(-12));
}

#[test]
fn test_integer_overflow_becomes_bigint() {
    let value = read("123456789012345678901234567890");
    assert_eq!(
        value,
        EdnValue::BigInt("123456789012345678901234567890".parse().unwrap())
    );
    assert_eq!(encode(&value), "123456789012345678901234567890N");
}

#[test]
fn test_bigint_suffix() {
    assert_eq!(read("42N"), EdnValue::BigInt(BigInt::from(42)));
    assert_eq!(read("-7N"), EdnValue::BigInt(BigInt::from(-7)));
}

#[test]
fn test_floats() {
    assert_eq!(read("928.764"), EdnValue::Float(928.764));
    assert_eq!(read("1001.1"), EdnValue::Float(1001.1));
    assert_eq!(read("-8.74"), EdnValue::Float(-8.74));
}

#[test]
fn test_float_exponents() {
    assert_eq!(read("2.1e5"), EdnValue::Float(210000.0));
    assert_eq!(read("2.1E5"), EdnValue::Float(210000.0));
    assert_eq!(read("22.1e+2"), EdnValue::Float(2210.0));
    assert_eq!(read("22.1E+2"), EdnValue::Float(2210.0));
    assert_eq!(read("5.12e-3"), EdnValue::Float(0.00512));
    assert_eq!(read("5.12E-3"), EdnValue::Float(0.00512));
    assert_eq!(read("1001.00100e10"), EdnValue::Float(10010010000000.0));
}

#[test]
fn test_float_exact_suffix() {
    assert_eq!(read("1.5M"), EdnValue::Float(1.5));
}

#[test]
fn test_symbolic_floats() {
    assert_eq!(read("##Inf"), EdnValue::Float(f64::INFINITY));
    assert_eq!(read("##-Inf"), EdnValue::Float(f64::NEG_INFINITY));
    assert!(read("##NaN").as_f64().unwrap().is_nan());
}

#[test]
fn test_malformed_numbers_are_symbols() {
    assert_eq!(read("01"), EdnValue::Symbol("01".into()));
    assert_eq!(read("1."), EdnValue::Symbol("1.".into()));
    assert_eq!(read("1e"), EdnValue::Symbol("1e".into()));
}

// Literals, symbols, keywords

#[test]
fn test_nil_and_booleans() {
    assert_eq!(read("nil"), EdnValue::Nil);
    assert_eq!(read("true"), EdnValue::Bool(true));
    assert_eq!(read("false"), EdnValue::Bool(false));
}

#[test]
fn test_symbols() {
    assert_eq!(read("="), EdnValue::Symbol("=".into()));
    assert_eq!(read("even?"), EdnValue::Symbol("even?".into()));
    assert_eq!(read("even? "), EdnValue::Symbol("even?".into()));
}

#[test]
fn test_keywords() {
    assert_eq!(read(":a"), kw("a"));
    assert_eq!(read(":name"), kw("name"));
    assert_eq!(read(":ns.nested/name "), kw("ns.nested/name"));
}

// Vectors

#[test]
fn test_empty_vectors() {
    assert_eq!(read("[]"), EdnValue::Vector(vec![]));
    assert_eq!(read("[  ]"), EdnValue::Vector(vec![]));
}

#[test]
fn test_vector_of_strings() {
    assert_eq!(read(r#"["one"]"#), edn!(["one"]));
    assert_eq!(read(r#"["one" "and two"]"#), edn!(["one", "and two"]));
}

#[test]
fn test_vector_of_mixed_scalars() {
    assert_eq!(read("[true true]"), edn!([true, true]));
    assert_eq!(read(r#"[true "well, then."]"#), edn!([true, "well, then."]));
}

#[test]
fn test_nested_vectors() {
    assert_eq!(
        read(r#"[true  ["one" ["two", nil ]]]"#),
        edn!([true, ["one", ["two", nil]]])
    );
    assert_eq!(read("[[] [] ]"), edn!([[], []]));
    assert_eq!(read("[[][]]"), edn!([[], []]));
}

// Lists

#[test]
fn test_empty_lists() {
    assert_eq!(read("()"), EdnValue::List(vec![]));
    assert_eq!(read("(  )"), EdnValue::List(vec![]));
}

#[test]
fn test_lists() {
    assert_eq!(read(r#"("one")"#), edn!(list "one"));
    assert_eq!(read(r#"("one" "and two")"#), edn!(list "one", "and two"));
    assert_eq!(read("(true true)"), edn!(list true, true));
    assert_eq!(read(r#"(true "well, then.")"#), edn!(list true, "well, then."));
}

#[test]
fn test_nested_lists() {
    assert_eq!(
        read(r#"(true  ("one" ("two", nil )))"#),
        edn!(list true, (list "one", (list "two", nil)))
    );
}

// Sets

#[test]
fn test_empty_sets() {
    assert_eq!(read("#{}"), set(vec![]));
    assert_eq!(read("#{  }"), set(vec![]));
}

#[test]
fn test_sets() {
    assert_eq!(read(r#"#{"one"}"#), set(vec!["one".into()]));
    assert_eq!(
        read(r#"#{"one" "and two"}"#),
        set(vec!["and two".into(), "one".into()])
    );
    assert_eq!(read("#{true true}"), set(vec![true.into()]));
    assert_eq!(
        read(r#"#{true "well, then."}"#),
        set(vec![true.into(), "well, then.".into()])
    );
}

#[test]
fn test_nested_sets() {
    let expected = set(vec![
        true.into(),
        set(vec!["one".into(), set(vec!["two".into(), EdnValue::Nil])]),
    ]);
    assert_eq!(read(r#"#{true  #{"one" #{"two", nil }}}"#), expected);
}

// Maps

#[test]
fn test_empty_maps() {
    assert_eq!(read("{}"), map(vec![]));
    assert_eq!(read("{  }"), map(vec![]));
}

#[test]
fn test_maps() {
    assert_eq!(
        read(r#"{"one" "two"}"#),
        map(vec![("one".into(), "two".into())])
    );
    assert_eq!(
        read(r#"{"a" true, "b" false }"#),
        map(vec![("a".into(), true.into()), ("b".into(), false.into())])
    );
}

#[test]
fn test_nested_maps() {
    let inner = map(vec![("two".into(), EdnValue::Nil)]);
    let middle = map(vec![("one".into(), inner)]);
    assert_eq!(
        read(r#"{true  {"one" {"two", nil }}}"#),
        map(vec![(true.into(), middle)])
    );
}

#[test]
fn test_map_with_composite_keys() {
    let value = read("{[1 2] :pair #{:a} :set}");
    let pairs = value.as_map().unwrap();
    assert_eq!(pairs.get(&edn!([1, 2])), Some(&kw("pair")));
    assert_eq!(pairs.get(&set(vec![kw("a")])), Some(&kw("set")));
}

// Tags

#[test]
fn test_tagged_keyword() {
    assert_eq!(
        read("#ns.a/tag :key"),
        EdnValue::tagged("ns.a/tag", kw("key")).unwrap()
    );
}

#[test]
fn test_tagged_int() {
    assert_eq!(
        read("#my/tag 555"),
        EdnValue::tagged("my/tag", EdnValue::from(555)).unwrap()
    );
}

#[test]
fn test_inst() {
    let expected = Utc.with_ymd_and_hms(2020, 4, 12, 21, 39, 15).unwrap()
        + chrono::Duration::milliseconds(482);
    assert_eq!(
        read(r#"#inst "2020-04-12T21:39:15.482Z""#),
        EdnValue::Inst(expected)
    );
}

#[test]
fn test_inst_date_only() {
    let expected = Utc.with_ymd_and_hms(1986, 10, 22, 0, 0, 0).unwrap();
    assert_eq!(read(r#"#inst "1986-10-22""#), EdnValue::Inst(expected));
}

#[test]
fn test_inst_rejects_bad_text() {
    let err = decode_one(r#"#inst "not a date""#).unwrap_err();
    assert!(matches!(err, Error::InvalidTimestamp { .. }));

    let err = decode_one("#inst 42").unwrap_err();
    assert!(matches!(err, Error::InvalidTimestamp { .. }));
}

// A transaction receipt as returned by a Crux node.

const TX_RESPONSE: &str =
    r#"{:crux.tx/tx-id 2, :crux.tx/tx-time #inst "2020-04-13T08:01:14.261-00:00"}"#;

fn tx_time() -> EdnValue {
    EdnValue::Inst(
        Utc.with_ymd_and_hms(2020, 4, 13, 8, 1, 14).unwrap()
            + chrono::Duration::milliseconds(261),
    )
}

#[test]
fn test_crux_tx_response() {
    assert_eq!(
        read(TX_RESPONSE),
        map(vec![
            (kw("crux.tx/tx-id"), EdnValue::from(2)),
            (kw("crux.tx/tx-time"), tx_time()),
        ])
    );
}

#[test]
fn test_crux_tx_response_as_plain_record() {
    let options = DecodeOptions::new()
        .with_map_as(MapAs::Flat)
        .with_keyword_as(KeywordAs::String);

    assert_eq!(
        decode_one_with_options(TX_RESPONSE, options).unwrap(),
        map(vec![
            ("crux.tx/tx-id".into(), EdnValue::from(2)),
            ("crux.tx/tx-time".into(), tx_time()),
        ])
    );
}

#[test]
fn test_flat_maps_collapse_duplicate_keys() {
    let options = DecodeOptions::new().with_map_as(MapAs::Flat);
    assert_eq!(
        decode_one_with_options("{:a 1 :b 2 :a 3}", options).unwrap(),
        map(vec![(kw("a"), 3.into()), (kw("b"), 2.into())])
    );
}

#[test]
fn test_lists_as_vectors() {
    let options = DecodeOptions::new().with_list_as(ListAs::Vector);
    assert_eq!(
        decode_one_with_options("(1 (2))", options).unwrap(),
        edn!([1, [2]])
    );
}

// Structural errors

#[test]
fn test_unbalanced_delimiters() {
    for text in ["[1 2", "(1 2", "{:a 1", "#{1", "[1 2)", "1 2]", ")"] {
        let err = decode_one(text).unwrap_err();
        assert!(
            matches!(err, Error::UnbalancedDelimiter { .. }),
            "{} gave {:?}",
            text,
            err
        );
    }
}

#[test]
fn test_unterminated_string() {
    let err = decode_one(r#"["abc"#).unwrap_err();
    assert!(matches!(err, Error::UnexpectedEof { .. }));
}

#[test]
fn test_error_position() {
    let err = decode_one("[1\n 2\n ]]").unwrap_err();
    assert_eq!(err.position(), Some((3, 3)));
}

#[test]
fn test_empty_document() {
    assert_eq!(decode_one("").unwrap_err(), Error::EmptyDocument);
    assert_eq!(decode_one(" ,\n").unwrap_err(), Error::EmptyDocument);
}
