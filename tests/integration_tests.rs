use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_edn::{
    decode_one, encode, from_reader, from_slice, from_str, from_str_with_options, from_value,
    to_string, to_value, to_writer, DecodeOptions, Decoder, EdnValue, ValueStream,
};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Patient {
    #[serde(rename = "crux.db/id")]
    id: String,
    #[serde(rename = "patientFirstName")]
    first_name: String,
    born: DateTime<Utc>,
    ward: Option<u16>,
}

#[test]
fn test_simple_struct() {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    };

    let edn = to_string(&user).unwrap();
    assert_eq!(
        edn,
        r#"{:id 123 :name "Alice" :active true :tags ["admin" "developer"]}"#
    );

    let user_back: User = from_str(&edn).unwrap();
    assert_eq!(user, user_back);
}

#[test]
fn test_nested_struct() {
    let order = Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["vip".to_string()],
        },
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 49.99,
                quantity: 1,
            },
        ],
        total: 109.97,
    };

    let edn = to_string(&order).unwrap();
    let order_back: Order = from_str(&edn).unwrap();
    assert_eq!(order, order_back);
}

#[test]
fn test_whole_number_floats_stay_floats() {
    let product = Product {
        sku: "X".to_string(),
        price: 10.0,
        quantity: 1,
    };

    let edn = to_string(&product).unwrap();
    assert_eq!(edn, r#"{:sku "X" :price 10.0 :quantity 1}"#);
    assert_eq!(from_str::<Product>(&edn).unwrap(), product);
}

#[test]
fn test_datetime_field_uses_inst() {
    let patient = Patient {
        id: "patient-1".to_string(),
        first_name: "Ada".to_string(),
        born: Utc.with_ymd_and_hms(1815, 12, 10, 0, 0, 0).unwrap(),
        ward: None,
    };

    // Serde sees a timestamp as text, so it is written as a string; reading
    // accepts both that string and a real #inst.
    let edn = to_string(&patient).unwrap();
    assert_eq!(from_str::<Patient>(&edn).unwrap(), patient);

    let from_inst: Patient = from_str(
        r#"{:crux.db/id "patient-1", :patientFirstName "Ada",
            :born #inst "1815-12-10T00:00:00.000-00:00", :ward nil}"#,
    )
    .unwrap();
    assert_eq!(from_inst, patient);
}

#[test]
fn test_optional_fields() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Config {
        name: String,
        limit: Option<u32>,
    }

    let some = Config {
        name: "a".into(),
        limit: Some(5),
    };
    let none = Config {
        name: "b".into(),
        limit: None,
    };

    assert_eq!(to_string(&none).unwrap(), r#"{:name "b" :limit nil}"#);
    assert_eq!(from_str::<Config>(&to_string(&some).unwrap()).unwrap(), some);
    assert_eq!(from_str::<Config>(&to_string(&none).unwrap()).unwrap(), none);
}

#[test]
fn test_enum_roundtrip() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    enum TxOp {
        #[serde(rename = "crux.tx/put")]
        Put(BTreeMap<String, String>),
        #[serde(rename = "crux.tx/delete")]
        Delete(String),
        #[serde(rename = "crux.tx/evict")]
        Evict,
    }

    let mut doc = BTreeMap::new();
    doc.insert("name".to_string(), "Ivan".to_string());
    let ops = vec![TxOp::Put(doc), TxOp::Delete("ivan".into()), TxOp::Evict];

    let edn = to_string(&ops).unwrap();
    assert_eq!(
        edn,
        r#"[{:crux.tx/put {"name" "Ivan"}} {:crux.tx/delete "ivan"} :crux.tx/evict]"#
    );
    assert_eq!(from_str::<Vec<TxOp>>(&edn).unwrap(), ops);
}

#[test]
fn test_records_from_keyword_maps() {
    let value = decode_one("{:a 1 :b 2 :a 3}").unwrap();
    let record: BTreeMap<String, i32> = from_value(value).unwrap();

    // Pairs are replayed in order, so the later duplicate wins.
    assert_eq!(record["a"], 3);
    assert_eq!(record["b"], 2);

    let plain: BTreeMap<String, Vec<i32>> =
        from_str_with_options("{:xs (1 2 3)}", DecodeOptions::plain()).unwrap();
    assert_eq!(plain["xs"], vec![1, 2, 3]);
}

#[test]
fn test_to_value_and_back() {
    let user = User {
        id: 7,
        name: "Bob".to_string(),
        active: false,
        tags: vec![],
    };

    let value = to_value(&user).unwrap();
    let map = value.as_map().unwrap();
    assert_eq!(map.get_keyword("id"), Some(&EdnValue::Integer(7)));
    assert_eq!(map.get_keyword("tags"), Some(&EdnValue::Vector(vec![])));

    let back: User = from_value(value).unwrap();
    assert_eq!(back, user);
}

#[test]
fn test_writer_and_reader() {
    let users = vec![
        User {
            id: 1,
            name: "A".into(),
            active: true,
            tags: vec!["x".into()],
        },
        User {
            id: 2,
            name: "B".into(),
            active: false,
            tags: vec![],
        },
    ];

    let mut buffer = Vec::new();
    to_writer(&mut buffer, &users).unwrap();

    let from_bytes: Vec<User> = from_slice(&buffer).unwrap();
    assert_eq!(from_bytes, users);

    let from_io: Vec<User> = from_reader(std::io::Cursor::new(buffer)).unwrap();
    assert_eq!(from_io, users);
}

#[test]
fn test_type_mismatch_is_an_error() {
    assert!(from_str::<u8>("300").is_err());
    assert!(from_str::<User>("[1 2 3]").is_err());
    assert!(from_str::<bool>(":true").is_err());
}

#[test]
fn test_json_interop() {
    let value = decode_one(r#"{:name "Ivan" :tags #{:a} :born #inst "2020-04-13T08:01:14.261Z"}"#)
        .unwrap();
    let json = serde_json::to_value(&value).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "name": "Ivan",
            "tags": ["a"],
            "born": "2020-04-13T08:01:14.261Z"
        })
    );

    let back: EdnValue = serde_json::from_value(serde_json::json!({"n": [1, 2.5, null]})).unwrap();
    assert_eq!(encode(&back), r#"{"n" [1 2.5 nil]}"#);
}

const TX_LOG: &str = r#"(
 {:crux.tx/tx-id 1,
  :crux.tx/tx-time #inst "2020-04-13T08:01:14.261-00:00",
  :crux.tx.event/tx-events [[:crux.tx/put "a1" "h1"]]}
 {:crux.tx/tx-id 2,
  :crux.tx/tx-time #inst "2020-04-13T08:02:00.000-00:00",
  :crux.tx.event/tx-events [[:crux.tx/put "a2" "h2"] [:crux.tx/delete "a1" "h3"]]}
)
"#;

fn tx_ids(values: &[EdnValue]) -> Vec<i64> {
    values
        .iter()
        .map(|tx| {
            tx.as_map()
                .and_then(|m| m.get_keyword("crux.tx/tx-id"))
                .and_then(EdnValue::as_i64)
                .unwrap()
        })
        .collect()
}

#[test]
fn test_tx_log_streams_in_small_chunks() {
    let mut decoder = Decoder::list_stream();
    let mut txs = Vec::new();

    let bytes = TX_LOG.as_bytes();
    for chunk in bytes.chunks(7) {
        let text = std::str::from_utf8(chunk).unwrap();
        txs.extend(decoder.feed(text).unwrap());
    }
    assert!(decoder.is_closed());
    txs.extend(decoder.finish().unwrap());

    assert_eq!(tx_ids(&txs), vec![1, 2]);
}

#[test]
fn test_tx_log_from_reader() {
    let txs: Vec<EdnValue> = ValueStream::list(TX_LOG.as_bytes())
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(tx_ids(&txs), vec![1, 2]);

    let events = txs[1]
        .as_map()
        .and_then(|m| m.get_keyword("crux.tx.event/tx-events"))
        .and_then(EdnValue::as_slice)
        .unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(encode(&events[1]), r#"[:crux.tx/delete "a1" "h3"]"#);
}

#[test]
fn test_decode_encode_is_stable() {
    let text = r#"{:a [1 2.5 "s" nil] :b #{:x} :c (sym 7N) :d #my/tag {:e ##-Inf}}"#;
    let once = encode(&decode_one(text).unwrap());
    assert_eq!(once, text);
    let twice = encode(&decode_one(&once).unwrap());
    assert_eq!(once, twice);
}
