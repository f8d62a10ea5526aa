use super::arith::count_to_i64;
use super::{FieldValue, MetricRecord};
use crate::Result;
use crate::snapshot::{DocumentSnapshot, coerce_int};

pub const MEASUREMENT: &str = "general";

/// Hired NPC workers, total play time and lifetime bale count, as one untagged record.
pub fn derive(snapshot: &DocumentSnapshot) -> Result<Vec<MetricRecord>> {
    let statistics = snapshot.career()?.require_path(&["statistics"])?;
    let fleet = snapshot.server()?.require_path(&["Vehicles"])?;

    let npcs_doing_work = count_to_i64(fleet.children("Vehicle").filter(|v| v.attr("isHired") == Some("true")).count());
    let play_time = coerce_int("playTime", statistics.require_text(&["playTime"])?);
    let sold_bales = coerce_int("soldBales", statistics.require_text(&["baleCount"])?);

    Ok(vec![
        MetricRecord::new(MEASUREMENT)
            .with_field("npcsDoingWork", FieldValue::Int(npcs_doing_work))
            .with_field("playTime", FieldValue::Int(play_time))
            .with_field("soldBales", FieldValue::Int(sold_bales)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::test_support::{SnapshotBuilder, server_vehicle};

    #[test]
    fn test_general_record() {
        let snapshot = SnapshotBuilder::new()
            .statistics(&[("playTime", "7384.6"), ("baleCount", "211")])
            .server_vehicles(vec![
                server_vehicle(&[("isHired", "true")]),
                server_vehicle(&[("isHired", "false")]),
                server_vehicle(&[("isHired", "TRUE")]),
                server_vehicle(&[]),
                server_vehicle(&[("isHired", "true")]),
            ])
            .build();

        let records = derive(&snapshot).unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.measurement(), "general");
        assert!(record.tags().is_empty());
        assert_eq!(record.field("npcsDoingWork"), Some(&FieldValue::Int(2)));
        assert_eq!(record.field("playTime"), Some(&FieldValue::Int(7384)));
        assert_eq!(record.field("soldBales"), Some(&FieldValue::Int(211)));
    }

    #[test]
    fn test_no_vehicles_means_no_hired_workers() {
        let snapshot = SnapshotBuilder::new().build();
        let records = derive(&snapshot).unwrap();
        assert_eq!(records[0].field("npcsDoingWork"), Some(&FieldValue::Int(0)));
    }

    #[test]
    fn test_missing_play_time_is_an_error() {
        let snapshot = SnapshotBuilder::new().without_statistic("playTime").build();
        let err = derive(&snapshot).unwrap_err();
        assert!(err.to_string().contains("playTime"), "unexpected error: {err}");
    }
}
