use crate::Result;
use ohno::app_err;

/// Decode a vehicle's whitespace-delimited fill-type and fill-level lists into pairs.
///
/// The two lists are parallel: the i-th fill level belongs to the i-th fill type. Lists
/// of different lengths are rejected instead of being paired by index.
pub fn decode_fill_levels<'a>(fill_types: &'a str, fill_levels: &'a str) -> Result<Vec<(&'a str, &'a str)>> {
    let types: Vec<_> = fill_types.split_whitespace().collect();
    let levels: Vec<_> = fill_levels.split_whitespace().collect();

    if types.len() != levels.len() {
        return Err(app_err!(
            "fill lists are not parallel: {} fill types but {} fill levels",
            types.len(),
            levels.len()
        ));
    }

    Ok(types.into_iter().zip(levels).collect())
}
