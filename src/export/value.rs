//! Per-format rendering of cell values
//!
//! Pure functions with no I/O. Each encoder goes through these so that a cell
//! renders the same way regardless of which table or document it appears in.

use crate::models::Cell;
use base64::{Engine as _, engine::general_purpose};
use serde_json::{Map, Value};

pub use crate::models::cell::classify;

/// Prefix marking base64 payloads in CSV output
pub const CSV_BASE64_PREFIX: &str = "base64:";

/// Parse a blob as a JSON document.
///
/// Only objects and arrays qualify; bytes that parse as a bare scalar
/// (`42`, `"x"`, `true`) are treated as opaque binary.
pub fn decode_json_blob(bytes: &[u8]) -> Option<Value> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => Some(value),
        _ => None,
    }
}

/// Uppercase hexadecimal encoding of `bytes`
pub fn hex_upper(bytes: &[u8]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        hex.push(DIGITS[(byte >> 4) as usize] as char);
        hex.push(DIGITS[(byte & 0x0f) as usize] as char);
    }
    hex
}

/// Natural text form of a real: shortest round-trip digits, always with a
/// fractional part or exponent (`1.0`, `0.25`, `1e20`).
pub fn format_real(value: f64) -> String {
    format!("{:?}", value)
}

/// Quote a CSV field when it contains a comma, a double quote or a line break
pub fn escape_csv(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Unescaped CSV text of a cell
fn csv_text(cell: &Cell) -> String {
    match cell {
        Cell::Null => "NULL".to_string(),
        Cell::Text(text) => text.clone(),
        Cell::Integer(value) => value.to_string(),
        Cell::Real(value) => format_real(*value),
        Cell::Boolean(value) => value.to_string(),
        Cell::Binary(bytes) => match decode_json_blob(bytes)
            .and_then(|_| std::str::from_utf8(bytes).ok())
        {
            Some(text) => text.to_string(),
            None => format!(
                "{}{}",
                CSV_BASE64_PREFIX,
                general_purpose::STANDARD.encode(bytes)
            ),
        },
    }
}

/// Render a cell as an escaped CSV field
///
/// # Example
///
/// ```rust
/// use table_export_sdk::export::value::to_csv_field;
/// use table_export_sdk::models::Cell;
///
/// assert_eq!(to_csv_field(&Cell::Null), "NULL");
/// assert_eq!(to_csv_field(&Cell::from("a,\"b")), "\"a,\"\"b\"");
/// ```
pub fn to_csv_field(cell: &Cell) -> String {
    escape_csv(&csv_text(cell))
}

/// Render a cell as a JSON value
///
/// Non-finite reals have no JSON representation and become `null`.
pub fn to_json_value(cell: &Cell) -> Value {
    match cell {
        Cell::Null => Value::Null,
        Cell::Text(text) => Value::String(text.clone()),
        Cell::Integer(value) => Value::Number((*value).into()),
        Cell::Real(value) => serde_json::Number::from_f64(*value)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Cell::Boolean(value) => Value::Bool(*value),
        Cell::Binary(bytes) => decode_json_blob(bytes).unwrap_or_else(|| {
            let mut blob = Map::new();
            blob.insert("type".to_string(), Value::String("blob".to_string()));
            blob.insert("size".to_string(), Value::Number(bytes.len().into()));
            blob.insert(
                "base64".to_string(),
                Value::String(general_purpose::STANDARD.encode(bytes)),
            );
            Value::Object(blob)
        }),
    }
}

/// Render a cell as a SQL literal
///
/// # Example
///
/// ```rust
/// use table_export_sdk::export::value::to_sql_literal;
/// use table_export_sdk::models::Cell;
///
/// assert_eq!(to_sql_literal(&Cell::from("it's")), "'it''s'");
/// assert_eq!(to_sql_literal(&Cell::from(vec![0xCAu8, 0xFE])), "X'CAFE'");
/// ```
pub fn to_sql_literal(cell: &Cell) -> String {
    match cell {
        Cell::Null => "NULL".to_string(),
        Cell::Text(text) => format!("'{}'", text.replace('\'', "''")),
        Cell::Integer(value) => value.to_string(),
        Cell::Real(value) if value.is_finite() => format_real(*value),
        Cell::Real(_) => "NULL".to_string(),
        Cell::Boolean(value) => (if *value { "1" } else { "0" }).to_string(),
        Cell::Binary(bytes) => format!("X'{}'", hex_upper(bytes)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_csv_only_when_needed() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("line\nbreak"), "\"line\nbreak\"");
        assert_eq!(escape_csv("cr\rlf"), "\"cr\rlf\"");
        assert_eq!(escape_csv(""), "");
    }

    #[test]
    fn test_csv_scalars() {
        assert_eq!(to_csv_field(&Cell::Integer(-12)), "-12");
        assert_eq!(to_csv_field(&Cell::Real(1.0)), "1.0");
        assert_eq!(to_csv_field(&Cell::Real(2.5)), "2.5");
        assert_eq!(to_csv_field(&Cell::Boolean(false)), "false");
        assert_eq!(to_csv_field(&Cell::Text("NULL".into())), "NULL");
    }

    #[test]
    fn test_csv_binary_json_is_emitted_as_text() {
        let cell = Cell::Binary(br#"{"a":1}"#.to_vec());
        assert_eq!(to_csv_field(&cell), "\"{\"\"a\"\":1}\"");
    }

    #[test]
    fn test_csv_binary_opaque_is_base64() {
        let cell = Cell::Binary(vec![0xff, 0x00, 0x10]);
        assert_eq!(to_csv_field(&cell), "base64:/wAQ");
    }

    #[test]
    fn test_scalar_json_blob_is_not_a_document() {
        assert!(decode_json_blob(b"42").is_none());
        assert!(decode_json_blob(b"[1,2]").is_some());
        assert!(decode_json_blob(b"{not json").is_none());
    }

    #[test]
    fn test_json_values() {
        assert_eq!(to_json_value(&Cell::Null), Value::Null);
        assert_eq!(to_json_value(&Cell::Integer(3)), serde_json::json!(3));
        assert_eq!(to_json_value(&Cell::Real(0.5)), serde_json::json!(0.5));
        assert_eq!(to_json_value(&Cell::Real(f64::NAN)), Value::Null);
        assert_eq!(to_json_value(&Cell::Boolean(true)), Value::Bool(true));
        assert_eq!(to_json_value(&Cell::from("x")), serde_json::json!("x"));
    }

    #[test]
    fn test_json_blob_object() {
        let value = to_json_value(&Cell::Binary(vec![1, 2, 3]));
        assert_eq!(
            value,
            serde_json::json!({"type": "blob", "size": 3, "base64": "AQID"})
        );
    }

    #[test]
    fn test_sql_literals() {
        assert_eq!(to_sql_literal(&Cell::Null), "NULL");
        assert_eq!(to_sql_literal(&Cell::Boolean(true)), "1");
        assert_eq!(to_sql_literal(&Cell::Boolean(false)), "0");
        assert_eq!(to_sql_literal(&Cell::Integer(42)), "42");
        assert_eq!(to_sql_literal(&Cell::Real(-0.25)), "-0.25");
        assert_eq!(to_sql_literal(&Cell::Real(f64::INFINITY)), "NULL");
        assert_eq!(to_sql_literal(&Cell::from("it's")), "'it''s'");
        assert_eq!(to_sql_literal(&Cell::Binary(vec![0x0a, 0xbc])), "X'0ABC'");
        assert_eq!(to_sql_literal(&Cell::Binary(Vec::new())), "X''");
    }
}
