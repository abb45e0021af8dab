use serde_json::Value;
use std::io::{self, Write};

use super::{plain, schedule_rows};

const SCHEDULE_HEADERS: [&str; 5] = [
    "number",
    "payment",
    "principal_portion",
    "interest_portion",
    "remaining_balance",
];

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value) {
        eprintln!("CSV output error: {}", e);
    }
}

/// One row per installment when there is a schedule, otherwise
/// `field,value` pairs for the scalar result fields.
fn write_csv<W: Write>(out: W, value: &Value) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(out);

    if let Some(rows) = schedule_rows(value) {
        wtr.write_record(SCHEDULE_HEADERS)?;
        for row in rows {
            let record: Vec<String> = SCHEDULE_HEADERS
                .iter()
                .map(|h| row.get(*h).map(plain).unwrap_or_default())
                .collect();
            wtr.write_record(&record)?;
        }
    } else {
        let fields = value
            .get("result")
            .and_then(Value::as_object)
            .or_else(|| value.as_object());

        wtr.write_record(["field", "value"])?;
        if let Some(map) = fields {
            for (key, val) in map.iter().filter(|(_, v)| !v.is_array() && !v.is_object()) {
                wtr.write_record([key.as_str(), &plain(val)])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
