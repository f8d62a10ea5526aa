use super::arith::trailing_average;
use super::{FieldValue, MetricRecord};
use crate::Result;
use crate::snapshot::{DocumentSnapshot, Element, coerce_float, coerce_int};
use ohno::app_err;

pub const MEASUREMENT: &str = "economy";

const STATS_ENTRY: &str = "financeStats";

/// Loan, wages, cash and income figures, as one untagged record.
///
/// The first `financeStats` entry is the most recent day. Wages are stored as a cost and
/// reported with their sign flipped.
pub fn derive(snapshot: &DocumentSnapshot) -> Result<Vec<MetricRecord>> {
    let statistics = snapshot.career()?.require_path(&["statistics"])?;
    let history = snapshot.economy()?.require_path(&["financeStatsHistory"])?;
    let server = snapshot.server()?;

    let latest = history
        .child(STATS_ENTRY)
        .ok_or_else(|| app_err!("'financeStatsHistory' has no '{STATS_ENTRY}' entries"))?;

    let total_loan = coerce_int("totalLoan", statistics.require_text(&["loan"])?);
    let interest_rate = coerce_float("loanAnnualInterestRate", statistics.require_text(&["loanAnnualInterestRate"])?);
    let wage_payment = coerce_float("npcWages", latest.require_text(&["wagePayment"])?);
    let total_money = coerce_float("totalMoney", server.require_attr("money")?);
    let leasing_costs = coerce_float("leasingCosts", latest.require_text(&["vehicleLeasingCost"])?);
    let sold_bales = coerce_float("soldBales", latest.require_text(&["soldBales"])?);

    let harvest_incomes: Vec<f64> = history
        .children(STATS_ENTRY)
        .filter_map(|entry| entry.child("harvestIncome").and_then(Element::text))
        .map(|raw| coerce_float("harvestIncome", raw))
        .collect();

    let record = MetricRecord::new(MEASUREMENT)
        .with_field("totalLoan", FieldValue::Int(total_loan))
        .with_field("loanAnnualInterestRate", FieldValue::Float(interest_rate))
        // subtracting from +0.0 keeps a zero wage bill from turning into -0
        .with_field("npcWages", FieldValue::Float(0.0 - wage_payment))
        .with_field("totalMoney", FieldValue::Float(total_money))
        .with_field("fiveDayAverage", FieldValue::Float(trailing_average(&harvest_incomes)))
        .with_field("leasingCosts", FieldValue::Float(leasing_costs))
        .with_field("soldBales", FieldValue::Float(sold_bales));

    Ok(vec![record])
}
