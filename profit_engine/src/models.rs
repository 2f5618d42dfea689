//! Data models for the Profit Engine.
//!
//! The `models` module defines the serialisable records that flow in
//! and out of the estimator: the calculation input, its additional cost
//! lines, the funnel basis and the calculation result.  Every numeric
//! input field is deserialised through [`crate::lenient`], so a form
//! that submits `"3500"`, `""` or nothing at all still produces a valid
//! record.  JSON field names are camelCase.

use crate::lenient;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Which funnel stage drives revenue and per-unit costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Basis {
    /// Revenue is booked on every confirmed order.
    #[default]
    Confirmed,
    /// Revenue is booked only on delivered (paid) orders.
    Delivered,
}

impl<'de> Deserialize<'de> for Basis {
    /// Accepts `"DELIVERED"` in any case; every other value, including
    /// `null`, falls back to [`Basis::Confirmed`].
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value.as_str() {
            Some(s) if s.trim().eq_ignore_ascii_case("delivered") => Basis::Delivered,
            _ => Basis::Confirmed,
        })
    }
}

/// An extra fixed cost line, e.g. packaging or a tool subscription.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdditionalCost {
    #[serde(default, deserialize_with = "lenient::text")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub amount: f64,
}

impl AdditionalCost {
    pub fn new(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// Input to the profit estimator.
///
/// Rates are fractions (`0.6` for 60 %).  Values are taken as-is:
/// negative amounts or rates above one are not rejected, they simply
/// flow through the formulas.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    /// Total orders placed.
    #[serde(default, deserialize_with = "lenient::count")]
    pub order_count: i64,
    /// Selling price per unit.
    #[serde(default, deserialize_with = "lenient::number")]
    pub unit_price: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub unit_product_cost: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub unit_shipping_cost: f64,
    /// Cost incurred for each confirmed order (call-center confirmation).
    #[serde(default, deserialize_with = "lenient::number")]
    pub per_confirmed_order_cost: f64,
    /// Fixed advertising budget for the period.
    #[serde(default, deserialize_with = "lenient::number")]
    pub advertising_spend: f64,
    #[serde(default, deserialize_with = "additional_costs")]
    pub additional_costs: Vec<AdditionalCost>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub confirmation_rate: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub delivery_rate: f64,
    #[serde(default)]
    pub basis: Basis,
}

/// Raw form submission.
///
/// Carries the same fields as [`CalculationInput`], except that both
/// rates are whole-number percentages as typed by the user (`60` for
/// 60 %).  Converting into a [`CalculationInput`] divides them by 100.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfitForm(pub CalculationInput);

impl From<ProfitForm> for CalculationInput {
    fn from(ProfitForm(mut input): ProfitForm) -> Self {
        input.confirmation_rate = lenient::percent_to_fraction(input.confirmation_rate);
        input.delivery_rate = lenient::percent_to_fraction(input.delivery_rate);
        input
    }
}

/// `null` or a non-array value means "no additional costs".
fn additional_costs<'de, D>(deserializer: D) -> Result<Vec<AdditionalCost>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .map(|item| AdditionalCost::deserialize(item).map_err(<D::Error as serde::de::Error>::custom))
            .collect(),
        _ => Ok(Vec::new()),
    }
}

/// The four addends that make up the total cost.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    /// Effective orders times per-unit product and shipping cost.
    pub unit_costs: f64,
    /// Confirmed orders times the per-confirmation cost.
    pub confirmation_costs: f64,
    pub advertising_spend: f64,
    /// Sum of all additional cost lines.
    pub additional_costs: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.unit_costs + self.confirmation_costs + self.advertising_spend + self.additional_costs
    }
}

/// The result of one profit estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub basis: Basis,
    pub confirmed_orders: f64,
    pub delivered_orders: f64,
    /// Confirmed or delivered orders, depending on [`Basis`].
    pub effective_orders: f64,
    pub revenue: f64,
    pub total_cost: f64,
    pub profit: f64,
    /// Profit as a percentage of revenue; `0` when revenue is not positive.
    pub margin: f64,
    /// Profit per effective order; `0` when there are none.
    pub profit_per_order: f64,
    pub breakdown: CostBreakdown,
}
