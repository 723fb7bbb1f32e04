//! Working with EdnValue for runtime flexibility.
//!
//! Run with: cargo run --example dynamic_values

use serde::{Deserialize, Serialize};
use serde_edn::{decode_one, edn, encode, from_value, to_value, EdnValue};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Build a transaction dynamically with the edn! macro
    let tx = edn!([(list (:"crux.tx/put"), {
        (:"crux.db/id") => (:ivan),
        (:name) => "Ivan",
        (:roles) => (#{(:admin), (:dev)})
    })]);

    println!("Transaction as EDN:\n{}\n", encode(&tx));

    // Read a response and access values dynamically
    let response = decode_one(
        r#"{:crux.tx/tx-id 2, :crux.tx/tx-time #inst "2020-04-13T08:01:14.261-00:00"}"#,
    )?;
    if let Some(map) = response.as_map() {
        if let Some(id) = map.get_keyword("crux.tx/tx-id").and_then(EdnValue::as_i64) {
            println!("Accessing field 'crux.tx/tx-id': {}", id);
        }
        if let Some(time) = map.get_keyword("crux.tx/tx-time").and_then(EdnValue::as_inst) {
            println!("Accessing field 'crux.tx/tx-time': {}\n", time);
        }
    }

    // Convert existing struct to EdnValue and back
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        roles: vec!["admin".to_string(), "developer".to_string()],
    };

    let user_value = to_value(&user)?;
    println!("User as EDN:\n{}\n", user_value);
    let user_back: User = from_value(user_value.clone())?;
    println!("User back: {:?}\n", user_back);

    // Runtime type checks
    println!("Type checks:");
    println!("  is_map:     {}", user_value.is_map());
    println!("  is_keyword: {}", user_value.is_keyword());
    println!("  type name:  {}", user_value.type_name());

    Ok(())
}
