//! Proportional fund allocation across deposit plans.
//!
//! A deposit plan asks for money on behalf of one or more portfolios. Plans
//! are grouped by deposit frequency and funded in frequency-priority order
//! (one-time before monthly); within a frequency, higher-priority plans go
//! first and ties fall to the older plan. When the pool cannot cover a plan
//! in full, every portfolio in that plan receives the same fraction of its
//! request, so the requested ratios are preserved.
use crate::core::error::AllocationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// How often a deposit plan recurs. Determines the order in which groups of
/// plans are funded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    OneTime,
    Monthly,
}

impl Frequency {
    /// Fixed funding priority: one-time deposits outrank recurring ones.
    pub fn priority(&self) -> u8 {
        match self {
            Frequency::OneTime => 2,
            Frequency::Monthly => 1,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Frequency::OneTime => "One-Time",
            Frequency::Monthly => "Monthly",
        }
    }
}

/// A requested amount for a single portfolio within a deposit plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanAllocation {
    pub portfolio: String,
    /// Remaining requested amount. The engine only ever subtracts from it.
    pub amount: f64,
}

/// A funding request processed as a unit: one or more portfolio
/// sub-allocations, with a frequency, a priority and a creation time that
/// together decide when the plan is served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositPlan {
    pub id: String,
    pub frequency: Frequency,
    /// Higher values are served first within the same frequency.
    #[serde(default)]
    pub priority: i64,
    /// Tie-breaker within equal priority: earlier created plans win.
    pub created_at: DateTime<Utc>,
    pub allocations: Vec<PlanAllocation>,
    /// True once every sub-allocation has zero remaining amount.
    #[serde(default)]
    pub completed: bool,
}

impl DepositPlan {
    /// Sum of the remaining requested amounts across all sub-allocations.
    pub fn requested_total(&self) -> f64 {
        self.allocations.iter().map(|a| a.amount).sum()
    }
}

/// Cumulative amount allocated to one portfolio across all processed plans.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioAllocation {
    pub portfolio: String,
    pub amount: f64,
}

/// The result of one allocation run.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationOutcome {
    /// Per-portfolio totals, in first-seen order across the input plans.
    pub portfolios: Vec<PortfolioAllocation>,
    /// Unallocated funds left in the pool, zero when demand exceeded supply.
    pub remaining_funds: f64,
    /// Working copies of the input plans with updated remaining amounts and
    /// completion flags.
    pub plans: Vec<DepositPlan>,
}

/// Distributes `funds_available` across `plans`.
///
/// Inputs are not mutated; the outcome carries updated copies. The run is
/// deterministic and idempotent for identical inputs. Negative fund pools or
/// requested amounts are rejected up front so the pool can never go negative
/// and no portfolio can be charged money back.
pub fn allocate(
    plans: &[DepositPlan],
    funds_available: f64,
) -> Result<AllocationOutcome, AllocationError> {
    if funds_available < 0.0 {
        return Err(AllocationError::NegativeFunds(funds_available));
    }
    for plan in plans {
        if let Some(bad) = plan.allocations.iter().find(|a| a.amount < 0.0) {
            return Err(AllocationError::NegativeAmount {
                plan: plan.id.clone(),
                portfolio: bad.portfolio.clone(),
                amount: bad.amount,
            });
        }
    }

    let mut plans: Vec<DepositPlan> = plans.to_vec();
    let mut funds = funds_available;

    // Register every referenced portfolio at zero, remembering first-seen
    // order for display, and collect the distinct frequencies present.
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, f64> = HashMap::new();
    let mut frequencies: Vec<Frequency> = Vec::new();
    for plan in &plans {
        if !frequencies.contains(&plan.frequency) {
            frequencies.push(plan.frequency);
        }
        for sub in &plan.allocations {
            totals.entry(sub.portfolio.clone()).or_insert_with(|| {
                order.push(sub.portfolio.clone());
                0.0
            });
        }
    }
    frequencies.sort_by(|a, b| b.priority().cmp(&a.priority()));

    for frequency in frequencies {
        let mut selected: Vec<usize> = (0..plans.len())
            .filter(|&i| plans[i].frequency == frequency)
            .collect();
        // Higher plan priority first; equal priority falls to the older plan.
        selected.sort_by(|&a, &b| {
            plans[b]
                .priority
                .cmp(&plans[a].priority)
                .then(plans[a].created_at.cmp(&plans[b].created_at))
        });

        for idx in selected {
            if funds <= 0.0 {
                break;
            }
            let plan = &mut plans[idx];
            let requested = plan.requested_total();
            if requested <= 0.0 {
                // Nothing to fund; every sub-allocation is already at zero.
                plan.completed = true;
                continue;
            }

            let funded = funds.min(requested);
            let factor = funded / requested;
            for sub in &mut plan.allocations {
                let paid = sub.amount * factor;
                if let Some(total) = totals.get_mut(&sub.portfolio) {
                    *total += paid;
                }
                sub.amount -= paid;
                funds -= paid;
            }
            // Guard against floating-point drift on a partial fund.
            funds = funds.max(0.0);

            if plan.allocations.iter().all(|a| a.amount == 0.0) {
                plan.completed = true;
            }
            debug!(
                plan = %plan.id,
                frequency = frequency.display_name(),
                funded,
                remaining = funds,
                completed = plan.completed,
                "Processed deposit plan"
            );
        }
    }

    let portfolios = order
        .into_iter()
        .map(|portfolio| {
            let amount = totals.get(&portfolio).copied().unwrap_or(0.0);
            PortfolioAllocation { portfolio, amount }
        })
        .collect();

    Ok(AllocationOutcome {
        portfolios,
        remaining_funds: funds,
        plans,
    })
}
