//! Profit estimation engine.
//!
//! The `engine` module turns a [`CalculationInput`] into a
//! [`CalculationResult`].  [`compute`] is a pure function: it performs
//! no I/O, holds no state and never fails.  [`compute_batch`] uses the
//! [`rayon`] crate to evaluate many independent inputs across CPU cores.

use crate::lenient::finite_or_zero;
use crate::models::{Basis, CalculationInput, CalculationResult, CostBreakdown};
use rayon::prelude::*;

/// Estimate orders, revenue, cost, profit and margin for one set of
/// funnel assumptions.
///
/// Confirmed orders are `order_count * confirmation_rate`; delivered
/// orders apply `delivery_rate` on top of that.  The [`Basis`] picks
/// which of the two drives revenue and per-unit costs, while the
/// per-confirmation cost always scales with confirmed orders.
pub fn compute(input: &CalculationInput) -> CalculationResult {
    let confirmed_orders = finite_or_zero(input.order_count as f64 * input.confirmation_rate);
    let delivered_orders = finite_or_zero(confirmed_orders * input.delivery_rate);
    let effective_orders = match input.basis {
        Basis::Confirmed => confirmed_orders,
        Basis::Delivered => delivered_orders,
    };

    // Finite inputs can still overflow; every figure is clamped to a finite value.
    let revenue = finite_or_zero(effective_orders * input.unit_price);
    let breakdown = CostBreakdown {
        unit_costs: finite_or_zero(
            effective_orders * (input.unit_product_cost + input.unit_shipping_cost),
        ),
        confirmation_costs: finite_or_zero(confirmed_orders * input.per_confirmed_order_cost),
        advertising_spend: finite_or_zero(input.advertising_spend),
        additional_costs: finite_or_zero(
            input
                .additional_costs
                .iter()
                .fold(0.0, |acc, cost| acc + cost.amount),
        ),
    };
    let total_cost = finite_or_zero(breakdown.total());
    let profit = finite_or_zero(revenue - total_cost);

    CalculationResult {
        basis: input.basis,
        confirmed_orders,
        delivered_orders,
        effective_orders,
        revenue,
        total_cost,
        profit,
        margin: finite_or_zero(ratio_or_zero(profit, revenue) * 100.0),
        profit_per_order: ratio_or_zero(profit, effective_orders),
        breakdown,
    }
}

/// Evaluate many inputs in parallel.  The output preserves input order.
pub fn compute_batch(inputs: &[CalculationInput]) -> Vec<CalculationResult> {
    inputs.par_iter().map(compute).collect()
}

// Non-positive denominators short-circuit to zero so the result never
// carries NaN or infinity.
fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        finite_or_zero(numerator / denominator)
    } else {
        0.0
    }
}
