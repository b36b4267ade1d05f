use serde_json::Value;
use std::io::{self, Write};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    if let Err(e) = write_value_csv(&mut wtr, value) {
        eprintln!("CSV output error: {}", e);
    }
}

/// Deal lists become one row per record; single results become
/// two-column `field,value` rows.
fn write_value_csv<W: Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => match result.get("records") {
                Some(Value::Array(records)) => write_array_csv(wtr, records)?,
                _ => write_field_rows(wtr, result)?,
            },
            _ => write_field_rows(wtr, map)?,
        },
        Value::Array(arr) => write_array_csv(wtr, arr)?,
        _ => wtr.write_record([&format_csv_value(value)])?,
    }
    wtr.flush()?;
    Ok(())
}

fn write_field_rows<W: Write>(
    wtr: &mut csv::Writer<W>,
    map: &serde_json::Map<String, Value>,
) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in map {
        wtr.write_record([key.as_str(), &format_csv_value(val)])?;
    }
    Ok(())
}

fn write_array_csv<W: Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            wtr.write_record([&format_csv_value(item)])?;
        }
        return Ok(());
    };

    // Optional coordinates are omitted when absent, so gather every key.
    let mut headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    for item in arr.iter().skip(1) {
        if let Value::Object(map) = item {
            for k in map.keys() {
                if !headers.contains(&k.as_str()) {
                    headers.push(k.as_str());
                }
            }
        }
    }
    wtr.write_record(&headers)?;

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                .collect();
            wtr.write_record(&row)?;
        }
    }
    Ok(())
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
