//! Generate JSON Schemas for the terminal configuration and the contacts log
//!
//! Usage:
//!   cargo run --features dev-bins --bin generate_schema config > config-schema.json
//!   cargo run --features dev-bins --bin generate_schema contacts > contacts-schema.json

use std::env;

use crt_terminal::config::Config;
use crt_terminal::model::contacts::ContactRecord;
use schemars::schema_for;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let schema_type = args.get(1).map(|s| s.as_str()).unwrap_or("config");

    let json: serde_json::Value = match schema_type {
        "config" => serde_json::to_value(schema_for!(Config))?,
        "contacts" => serde_json::to_value(schema_for!(Vec<ContactRecord>))?,
        other => {
            eprintln!("Unknown schema type: {}. Use 'config' or 'contacts'.", other);
            std::process::exit(1);
        }
    };

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
