//! InfluxDB v2 line protocol encoding.
//!
//! ```text
//! measurement,tag1=val1,tag2=val2 field1=val1,field2=val2 timestamp_ns
//! ```

use super::MetricPoint;
use crate::metrics::FieldValue;
use core::fmt::Write;

/// Encode one point as a single line, without a trailing newline.
#[must_use]
pub fn encode_point(point: &MetricPoint) -> String {
    let mut line = escape_measurement(point.measurement());

    // tags are held in a sorted map, which is the canonical order
    for (key, value) in point.tags() {
        line.push(',');
        line.push_str(&escape_key(key));
        line.push('=');
        line.push_str(&escape_key(value));
    }

    line.push(' ');
    for (i, field) in point.fields().iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        line.push_str(&escape_key(&field.name));
        line.push('=');
        line.push_str(&encode_value(&field.value));
    }

    let _ = write!(line, " {}", point.timestamp_nanos());
    line
}

/// Encode a batch of points, one line each.
#[must_use]
pub fn encode_batch(points: &[MetricPoint]) -> String {
    points.iter().map(encode_point).collect::<Vec<_>>().join("\n")
}

/// Integers carry an `i` suffix; strings are quoted with inner quotes and backslashes escaped.
#[must_use]
pub fn encode_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Int(v) => format!("{v}i"),
        FieldValue::Float(v) => format!("{v}"),
        FieldValue::Boolean(v) => v.to_string(),
        FieldValue::String(v) => format!("\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\"")),
    }
}

fn escape_measurement(s: &str) -> String {
    s.replace(',', "\\,").replace(' ', "\\ ")
}

/// Tag keys, tag values and field keys share one escaping rule.
fn escape_key(s: &str) -> String {
    s.replace(',', "\\,").replace('=', "\\=").replace(' ', "\\ ")
}
