//! # Order Source
//!
//! Reads order definitions from a JSON array:
//!
//! ```json
//! [{ "name": "Banana Split", "temp": "frozen", "shelfLife": 20, "decayRate": 0.63 }]
//! ```
//!
//! Each record is validated on its own. A record that fails validation is dropped (and logged);
//! only a document that cannot be read or is not an array fails the whole source.

use crate::model::{Order, Temperature, UnknownTemperature};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

const NAME: &str = "name";
const TEMP: &str = "temp";
const SHELF_LIFE: &str = "shelfLife";
const DECAY_RATE: &str = "decayRate";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Cannot read orders from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed orders document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Orders document must be a JSON array")]
    NotAnArray,
}

/// Why a single record was dropped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("record is not an object")]
    NotAnObject,

    #[error("missing field `{0}`")]
    Missing(&'static str),

    #[error("field `{field}` must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("name is empty")]
    EmptyName,

    #[error(transparent)]
    Temperature(#[from] UnknownTemperature),
}

fn field<'a>(
    record: &'a serde_json::Map<String, Value>,
    name: &'static str,
) -> Result<&'a Value, RecordError> {
    match record.get(name) {
        None | Some(Value::Null) => Err(RecordError::Missing(name)),
        Some(value) => Ok(value),
    }
}

/// Turns one JSON record into an [`Order`], or explains why it cannot be one.
pub fn validate_record(record: &Value) -> Result<Order, RecordError> {
    let record = record.as_object().ok_or(RecordError::NotAnObject)?;

    let name = field(record, NAME)?
        .as_str()
        .ok_or(RecordError::WrongType {
            field: NAME,
            expected: "a string",
        })?;
    if name.trim().is_empty() {
        return Err(RecordError::EmptyName);
    }

    let temperature: Temperature = field(record, TEMP)?
        .as_str()
        .ok_or(RecordError::WrongType {
            field: TEMP,
            expected: "a string",
        })?
        .parse()?;

    let shelf_life = field(record, SHELF_LIFE)?
        .as_u64()
        .and_then(|life| u32::try_from(life).ok())
        .filter(|life| *life > 0)
        .ok_or(RecordError::WrongType {
            field: SHELF_LIFE,
            expected: "a positive integer",
        })?;

    let decay_rate = field(record, DECAY_RATE)?
        .as_f64()
        .filter(|rate| rate.is_finite() && *rate >= 0.0)
        .ok_or(RecordError::WrongType {
            field: DECAY_RATE,
            expected: "a non-negative number",
        })?;

    Ok(Order::new(name, temperature, shelf_life, decay_rate))
}

/// Parses a JSON array of records, keeping the valid ones in input order.
pub fn parse_orders(json: &str) -> Result<Vec<Order>, SourceError> {
    let document: Value = serde_json::from_str(json)?;
    let Value::Array(records) = document else {
        return Err(SourceError::NotAnArray);
    };

    let total = records.len();
    let orders: Vec<Order> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match validate_record(record) {
            Ok(order) => Some(order),
            Err(e) => {
                debug!(index, error = %e, "Dropping order record");
                None
            }
        })
        .collect();
    info!(accepted = orders.len(), dropped = total - orders.len(), "Orders loaded");
    Ok(orders)
}

pub fn read_orders(path: impl AsRef<Path>) -> Result<Vec<Order>, SourceError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_orders(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_record() {
        let order = validate_record(&json!({
            "name": "Banana Split",
            "temp": "Frozen",
            "shelfLife": 20,
            "decayRate": 0.63
        }))
        .unwrap();
        assert_eq!(order, Order::new("Banana Split", Temperature::Frozen, 20, 0.63));
    }

    #[test]
    fn test_integral_decay_rate_is_accepted() {
        let order = validate_record(&json!({
            "name": "Kale Salad", "temp": "cold", "shelfLife": 250, "decayRate": 1
        }))
        .unwrap();
        assert_eq!(order.decay_rate, 1.0);
    }

    #[test]
    fn test_invalid_records() {
        let cases = [
            (json!([1, 2]), RecordError::NotAnObject),
            (
                json!({ "temp": "hot", "shelfLife": 20, "decayRate": 0.5 }),
                RecordError::Missing("name"),
            ),
            (
                json!({ "name": "", "temp": "hot", "shelfLife": 20, "decayRate": 0.5 }),
                RecordError::EmptyName,
            ),
            (
                json!({ "name": "Pho", "temp": "warm", "shelfLife": 20, "decayRate": 0.5 }),
                RecordError::Temperature(UnknownTemperature("warm".into())),
            ),
            (
                json!({ "name": "Pho", "temp": "hot", "shelfLife": "20", "decayRate": 0.5 }),
                RecordError::WrongType {
                    field: "shelfLife",
                    expected: "a positive integer",
                },
            ),
            (
                json!({ "name": "Pho", "temp": "hot", "shelfLife": 2.5, "decayRate": 0.5 }),
                RecordError::WrongType {
                    field: "shelfLife",
                    expected: "a positive integer",
                },
            ),
            (
                json!({ "name": "Pho", "temp": "hot", "shelfLife": 0, "decayRate": 0.5 }),
                RecordError::WrongType {
                    field: "shelfLife",
                    expected: "a positive integer",
                },
            ),
            (
                json!({ "name": "Pho", "temp": "hot", "shelfLife": 20, "decayRate": -0.1 }),
                RecordError::WrongType {
                    field: "decayRate",
                    expected: "a non-negative number",
                },
            ),
            (
                json!({ "name": "Pho", "temp": "hot", "shelfLife": 20, "decayRate": null }),
                RecordError::Missing("decayRate"),
            ),
        ];
        for (record, expected) in cases {
            assert_eq!(validate_record(&record), Err(expected), "{}", record);
        }
    }

    #[test]
    fn test_parse_drops_bad_records_and_keeps_order() {
        let orders = parse_orders(
            r#"[
                { "name": "Ramen", "temp": "hot", "shelfLife": 500, "decayRate": 0.45 },
                { "name": "Broken", "temp": "hot" },
                { "name": "Cheesecake", "temp": "COLD", "shelfLife": 700, "decayRate": 0.5 }
            ]"#,
        )
        .unwrap();
        let names: Vec<&str> = orders.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Ramen", "Cheesecake"]);
    }

    #[test]
    fn test_document_errors() {
        assert!(matches!(parse_orders("{}"), Err(SourceError::NotAnArray)));
        assert!(matches!(parse_orders("[{"), Err(SourceError::Parse(_))));
        assert!(matches!(
            read_orders("/nonexistent/orders.json"),
            Err(SourceError::Io { .. })
        ));
    }
}
