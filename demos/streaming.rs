//! Following a transaction log without holding it in memory.
//!
//! Run with: cargo run --example streaming

use serde_edn::{Decoder, EdnValue, ValueStream};
use std::error::Error;

const TX_LOG: &str = r#"(
 {:crux.tx/tx-id 1, :crux.tx/tx-time #inst "2020-04-13T08:01:14.261-00:00",
  :crux.tx.event/tx-events [[:crux.tx/put "p1" "h1"]]}
 {:crux.tx/tx-id 2, :crux.tx/tx-time #inst "2020-04-13T08:02:00.000-00:00",
  :crux.tx.event/tx-events [[:crux.tx/put "p2" "h2"] [:crux.tx/delete "p1" "h3"]]}
)"#;

fn describe(tx: &EdnValue) -> String {
    let Some(map) = tx.as_map() else {
        return format!("not a transaction: {}", tx);
    };
    let id = map.get_keyword("crux.tx/tx-id").and_then(EdnValue::as_i64);
    let time = map.get_keyword("crux.tx/tx-time").and_then(EdnValue::as_inst);
    let events = map
        .get_keyword("crux.tx.event/tx-events")
        .and_then(EdnValue::as_slice)
        .map_or(0, <[EdnValue]>::len);
    format!("tx {:?} at {:?}: {} event(s)", id, time, events)
}

fn main() -> Result<(), Box<dyn Error>> {
    // Push: feed chunks as they arrive, e.g. from an HTTP body.
    println!("Chunked feed:");
    let mut decoder = Decoder::list_stream();
    for chunk in TX_LOG.as_bytes().chunks(16) {
        for tx in decoder.feed(std::str::from_utf8(chunk)?)? {
            println!("  {}", describe(&tx));
        }
    }
    for tx in decoder.finish()? {
        println!("  {}", describe(&tx));
    }

    // Pull: iterate over any io::Read.
    println!("\nFrom a reader:");
    for tx in ValueStream::list(TX_LOG.as_bytes()) {
        println!("  {}", describe(&tx?));
    }

    Ok(())
}
