use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{row_list, scalar_text};

/// Print the result envelope as tables.
///
/// Scalar result fields go into a Field/Value table; a list of row objects
/// (portfolio positions, NPV terms, sensitivity points) gets its own table
/// underneath. Warnings and methodology follow.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => print_result(result, map),
            _ => println!("{}", field_table(map)),
        },
        Value::Array(rows) => println!("{}", rows_table(rows)),
        _ => println!("{}", value),
    }
}

fn print_result(result: &Map<String, Value>, envelope: &Map<String, Value>) {
    let rows = row_list(result);
    let scalars: Map<String, Value> = result
        .iter()
        .filter(|(key, _)| rows.map_or(true, |(rows_key, _)| rows_key != key.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    if !scalars.is_empty() {
        println!("{}", field_table(&scalars));
    }
    if let Some((key, rows)) = rows {
        println!("\n{}:", key);
        println!("{}", rows_table(rows));
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn field_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.clone(), cell_text(val)]);
    }
    builder.build()
}

fn rows_table(rows: &[Value]) -> Table {
    let mut builder = Builder::default();
    let headers: Vec<String> = match rows.first() {
        Some(Value::Object(first)) => first.keys().cloned().collect(),
        _ => vec!["value".to_string()],
    };
    builder.push_record(headers.clone());

    for row in rows {
        let record: Vec<String> = match row {
            Value::Object(map) => headers
                .iter()
                .map(|h| map.get(h.as_str()).map(cell_text).unwrap_or_default())
                .collect(),
            other => vec![cell_text(other)],
        };
        builder.push_record(record);
    }
    builder.build()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::Array(items) => items.iter().map(cell_text).collect::<Vec<_>>().join(", "),
        other => scalar_text(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rows_table_has_header_and_rows() {
        let rows = vec![
            json!({"discount_rate": "0.05", "npv": "21.95"}),
            json!({"discount_rate": "0.10", "npv": "7.18"}),
        ];
        let rendered = rows_table(&rows).to_string();
        assert!(rendered.contains("discount_rate"));
        assert!(rendered.contains("21.95"));
        assert!(rendered.contains("7.18"));
    }

    #[test]
    fn test_cell_text_for_tuples_and_nulls() {
        assert_eq!(cell_text(&json!(["0.10", "0.15"])), "0.10, 0.15");
        assert_eq!(cell_text(&Value::Null), "-");
    }
}
