use super::{FieldValue, MetricRecord};
use crate::Result;
use crate::snapshot::{DocumentSnapshot, Element, coerce_float, coerce_int};

const LOG_TARGET: &str = " resources";

pub const MEASUREMENT: &str = "resources";
pub const STORAGE_MEASUREMENT: &str = "storage";

const LOADED_OBJECT: &str = "onCreateLoadedObject";
const COW_HERD_ID: &str = "Animals_cow";
const STORAGE_ID_PREFIX: &str = "Storage_storage";

/// Herd counts as one untagged record, plus one `storage` record per storage location
/// tagged with the location's save id.
pub fn derive(snapshot: &DocumentSnapshot) -> Result<Vec<MetricRecord>> {
    let objects = snapshot.vehicles()?;
    let statistics = snapshot.career()?.require_path(&["statistics"])?;

    let cow_count = objects
        .find_child(LOADED_OBJECT, |o| o.attr("saveId") == Some(COW_HERD_ID))
        .and_then(|herd| herd.attr("numAnimals0"))
        .map_or(0, |raw| coerce_int("cowCount", raw));

    let cows_bred = coerce_int("cowsBred", statistics.require_text(&["breedCowsCount"])?);

    let mut records = vec![
        MetricRecord::new(MEASUREMENT)
            .with_field("cowCount", FieldValue::Int(cow_count))
            .with_field("cowsBred", FieldValue::Int(cows_bred)),
    ];

    records.extend(
        objects
            .filter_children(LOADED_OBJECT, |o| o.attr("saveId").is_some_and(|id| id.starts_with(STORAGE_ID_PREFIX)))
            .filter_map(storage_record),
    );

    Ok(records)
}

fn storage_record(storage: &Element) -> Option<MetricRecord> {
    let location = storage.attr("saveId")?;

    let mut record = MetricRecord::new(STORAGE_MEASUREMENT).with_tag("location", location);
    for node in storage.children("node") {
        if let (Some(fill_type), Some(fill_level)) = (node.attr("fillType"), node.attr("fillLevel"))
            && !fill_type.is_empty()
        {
            record.set_field(fill_type, FieldValue::Float(coerce_float(fill_type, fill_level)));
        }
    }

    if record.has_fields() {
        Some(record)
    } else {
        log::debug!(target: LOG_TARGET, "Storage location '{location}' holds no fill levels, skipping");
        None
    }
}
