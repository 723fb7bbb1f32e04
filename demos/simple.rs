//! Basic EDN serialization and deserialization.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_edn::{from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    #[serde(rename = "crux.db/id")]
    id: String,
    name: String,
    email: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let users = vec![
        User {
            id: "alice".to_string(),
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
        },
        User {
            id: "bob".to_string(),
            name: "Bob Smith".to_string(),
            email: "bob@example.com".to_string(),
        },
    ];

    // Serialize to EDN
    let edn = to_string(&users)?;
    println!("EDN output:\n{}\n", edn);

    // Deserialize back to struct
    let users_back: Vec<User> = from_str(&edn)?;
    assert_eq!(users, users_back);
    println!("✓ Round-trip successful");

    Ok(())
}
