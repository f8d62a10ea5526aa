use super::arith::{count_to_i64, safe_ratio};
use super::fill_levels::decode_fill_levels;
use super::{FieldValue, MetricRecord};
use crate::Result;
use crate::snapshot::{DocumentSnapshot, Element, coerce_float, coerce_int};

const LOG_TARGET: &str = "  vehicles";

pub const MEASUREMENT: &str = "vehicles";
pub const VEHICLE_MEASUREMENT: &str = "vehicle";

const TRACTOR_CATEGORY: &str = "tractors";

/// One `vehicle` record per vehicle carrying fill levels, tagged with its category and
/// name, plus an untagged fleet summary.
pub fn derive(snapshot: &DocumentSnapshot) -> Result<Vec<MetricRecord>> {
    let server = snapshot.server()?;
    let fleet: Vec<&Element> = server.require_path(&["Vehicles"])?.children("Vehicle").collect();

    let tractor_count = count_to_i64(fleet.iter().filter(|v| v.attr("category") == Some(TRACTOR_CATEGORY)).count());
    let player_count = coerce_int("playerCount", server.require_path(&["Slots"])?.require_attr("numUsed")?);

    let mut records: Vec<MetricRecord> = fleet.iter().filter_map(|v| vehicle_record(v)).collect();

    records.push(
        MetricRecord::new(MEASUREMENT)
            .with_field("tractorCount", FieldValue::Int(tractor_count))
            .with_field("playerCount", FieldValue::Int(player_count))
            .with_field("tractorToPlayer", FieldValue::Float(safe_ratio(tractor_count, player_count))),
    );

    Ok(records)
}

fn vehicle_record(vehicle: &Element) -> Option<MetricRecord> {
    let fill_levels = vehicle.attr("fillLevels")?;
    let name = vehicle.attr("name").unwrap_or("<unnamed>");

    let pairs = match decode_fill_levels(vehicle.attr("fillTypes").unwrap_or_default(), fill_levels) {
        Ok(pairs) => pairs,
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Skipping vehicle '{name}': {e}");
            return None;
        }
    };

    let mut record = MetricRecord::new(VEHICLE_MEASUREMENT);
    for (fill_type, level) in pairs {
        record.set_field(fill_type, FieldValue::Float(coerce_float(fill_type, level)));
    }

    if let Some(controller) = vehicle.attr("controller").filter(|c| !c.is_empty()) {
        record.set_field("controller", FieldValue::String(controller.to_string()));
    }

    if !record.has_fields() {
        log::debug!(target: LOG_TARGET, "Vehicle '{name}' reports no fill levels, skipping");
        return None;
    }

    // line protocol has no empty tag values
    if let Some(category) = vehicle.attr("category").filter(|c| !c.is_empty()) {
        record = record.with_tag("category", category);
    }
    if let Some(name) = vehicle.attr("name").filter(|n| !n.is_empty()) {
        record = record.with_tag("name", name);
    }

    Some(record)
}
