use super::{MetricRecord, finance, general, resources, vehicles};
use crate::Result;
use crate::snapshot::DocumentSnapshot;
use ohno::EnrichableExt;
use strum::{Display, EnumIter};

const LOG_TARGET: &str = "derivation";

/// The domains a snapshot is broken down into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum Domain {
    Finance,
    Resources,
    Vehicles,
    General,
}

#[derive(Debug)]
pub struct DerivationDef {
    pub domain: Domain,
    pub description: &'static str,
    pub derive: fn(&DocumentSnapshot) -> Result<Vec<MetricRecord>>,
}

macro_rules! derivation_def {
    ($domain:ident, $description:expr, $derive:path) => {
        DerivationDef {
            domain: Domain::$domain,
            description: $description,
            derive: $derive,
        }
    };
}

pub const DERIVATIONS: &[DerivationDef] = &[
    derivation_def!(Finance, "Loan, cash, wage and income figures", finance::derive),
    derivation_def!(Resources, "Herd counts and per-location storage fill levels", resources::derive),
    derivation_def!(Vehicles, "Per-vehicle fill levels and fleet summary", vehicles::derive),
    derivation_def!(General, "Hired workers, play time and bale count", general::derive),
];

/// Run every registered derivation over `snapshot`, in registration order.
///
/// The first failing derivation aborts the whole run; a partial set of records is never
/// returned.
pub fn derive_all(snapshot: &DocumentSnapshot) -> Result<Vec<MetricRecord>> {
    let mut records = Vec::new();

    for def in DERIVATIONS {
        let derived = (def.derive)(snapshot).map_err(|e| e.enrich_with(|| format!("deriving {} metrics", def.domain)))?;
        log::debug!(target: LOG_TARGET, "{} derivation produced {} record(s)", def.domain, derived.len());
        records.extend(derived);
    }

    Ok(records)
}
