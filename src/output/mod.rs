/// Output formatting for result sets.
///
/// A result set serializes to a JSON array (one object per record, field
/// order preserved) or renders as a table for the terminal.
use crate::core::{Record, Value};
use comfy_table::{Cell, Table as ComfyTable, presets::UTF8_FULL};

/// Serializes records to a JSON array, one object per record.
#[must_use]
pub fn to_json(records: &[Record]) -> serde_json::Value {
    let rows = records
        .iter()
        .map(|record| {
            let mut object = serde_json::Map::new();
            for (key, value) in record.iter() {
                object.insert(key.to_string(), serde_json::Value::from(value));
            }
            serde_json::Value::Object(object)
        })
        .collect();
    serde_json::Value::Array(rows)
}

/// Renders records as a UTF8 table; the header is the union of field names in
/// encounter order.
#[must_use]
pub fn render_table(records: &[Record]) -> String {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.to_string());
            }
        }
    }

    let mut table = ComfyTable::new();
    table.load_preset(UTF8_FULL);
    table.set_header(columns.iter().map(|c| Cell::new(c)));
    for record in records {
        table.add_row(columns.iter().map(|column| {
            Cell::new(record.get(column).unwrap_or(&Value::Null).to_string())
        }));
    }
    table.to_string()
}
