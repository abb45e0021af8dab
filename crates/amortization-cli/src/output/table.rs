use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{plain, schedule_rows};

const SCHEDULE_COLUMNS: [(&str, &str); 5] = [
    ("number", "No."),
    ("payment", "Payment"),
    ("principal_portion", "Principal"),
    ("interest_portion", "Interest"),
    ("remaining_balance", "Balance"),
];

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    println!("{}", render(value));
}

fn render(value: &Value) -> String {
    let Some(envelope) = value.as_object() else {
        return plain(value);
    };
    let Some(Value::Object(result)) = envelope.get("result") else {
        return field_table(envelope.iter()).to_string();
    };

    let mut sections: Vec<String> = Vec::new();

    // Scalar fields first; schedule and summary get their own tables
    sections.push(
        field_table(result.iter().filter(|(_, v)| !v.is_array() && !v.is_object())).to_string(),
    );

    if let Some(Value::Object(summary)) = result.get("summary") {
        sections.push(format!("Totals:\n{}", field_table(summary.iter())));
    }

    if let Some(rows) = schedule_rows(value) {
        sections.push(format!("Schedule:\n{}", schedule_table(rows)));
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            let lines: Vec<String> = warnings.iter().map(|w| format!("  - {}", plain(w))).collect();
            sections.push(format!("Warnings:\n{}", lines.join("\n")));
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        sections.push(format!("Methodology: {}", meth));
    }

    sections.join("\n\n")
}

fn field_table<'a>(fields: impl Iterator<Item = (&'a String, &'a Value)>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in fields {
        builder.push_record([key.as_str(), &plain(val)]);
    }
    builder.build()
}

fn schedule_table(rows: &[Value]) -> Table {
    let mut builder = Builder::default();
    builder.push_record(SCHEDULE_COLUMNS.iter().map(|(_, header)| *header));

    for row in rows {
        let Some(map) = row.as_object() else { continue };
        builder.push_record(SCHEDULE_COLUMNS.iter().map(|(key, _)| cell(map, key)));
    }

    builder.build()
}

fn cell(map: &Map<String, Value>, key: &str) -> String {
    map.get(key).map(plain).unwrap_or_default()
}
