use crate::Result;
use crate::metrics::{Field, FieldValue, MetricRecord};
use chrono::Utc;
use ohno::app_err;
use std::collections::BTreeMap;

/// The sink-ready form of a [`MetricRecord`], stamped with the time it was built.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricPoint {
    measurement: String,
    fields: Vec<Field>,
    tags: BTreeMap<String, String>,
    timestamp_nanos: i64,
}

impl MetricPoint {
    /// Build a point stamped with the current UTC time.
    pub fn from_record(record: MetricRecord) -> Result<Self> {
        let now = Utc::now()
            .timestamp_nanos_opt()
            .ok_or_else(|| app_err!("current time cannot be represented in nanoseconds"))?;
        Self::from_record_at(record, now)
    }

    /// Build a point with an explicit timestamp, in nanoseconds since the Unix epoch.
    ///
    /// Records InfluxDB would refuse are rejected: no fields, an empty field name, an
    /// empty tag key or value, or a non-finite float.
    pub fn from_record_at(record: MetricRecord, timestamp_nanos: i64) -> Result<Self> {
        let (measurement, fields, tags) = record.into_parts();
        if fields.is_empty() {
            return Err(app_err!("measurement '{measurement}' has no fields"));
        }

        for field in &fields {
            if field.name.is_empty() {
                return Err(app_err!("measurement '{measurement}' has a field with an empty name"));
            }

            if let FieldValue::Float(v) = field.value
                && !v.is_finite()
            {
                return Err(app_err!("field '{}' of measurement '{measurement}' is not finite: {v}", field.name));
            }
        }

        if let Some((key, _)) = tags.iter().find(|(k, v)| k.is_empty() || v.is_empty()) {
            return Err(app_err!("measurement '{measurement}' has an empty tag (key '{key}')"));
        }

        Ok(Self {
            measurement,
            fields,
            tags,
            timestamp_nanos,
        })
    }

    #[must_use]
    pub fn measurement(&self) -> &str {
        &self.measurement
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub const fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    #[must_use]
    pub const fn timestamp_nanos(&self) -> i64 {
        self.timestamp_nanos
    }
}

/// Build every point up front, so that a single bad record fails the batch before any
/// write happens.
pub fn build_points(records: Vec<MetricRecord>) -> Result<Vec<MetricPoint>> {
    records.into_iter().map(MetricPoint::from_record).collect()
}
