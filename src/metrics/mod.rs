//! Metric derivation from document snapshots
//!
//! This module reads a [`DocumentSnapshot`](crate::snapshot::DocumentSnapshot) and
//! produces flat [`MetricRecord`]s: a measurement name, ordered typed fields, and tags.
//!
//! # Implementation Model
//!
//! Each domain (finance, resources, vehicles, general) has a `derive` function that
//! navigates the snapshot and emits zero or more records. The derivations are registered
//! statically in `derivation.rs` and run in order by [`derive_all`].
//!
//! Numeric text from the server is coerced rather than rejected: unparsable values
//! become zero. Structural problems, such as a missing required element, are errors and
//! abort the whole derivation run.

mod arith;
mod derivation;
mod field_value;
mod fill_levels;
mod metric_record;

pub mod finance;
pub mod general;
pub mod resources;
pub mod vehicles;

#[cfg(test)]
mod test_support;

pub use arith::{safe_ratio, trailing_average};
pub use derivation::{DERIVATIONS, DerivationDef, Domain, derive_all};
pub use field_value::{Field, FieldKind, FieldValue};
pub use fill_levels::decode_fill_levels;
pub use metric_record::MetricRecord;
