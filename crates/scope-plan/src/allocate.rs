//! Daily plan allocation.
//!
//! # Algorithm
//!
//! 1. Rank positive-weight categories by descending weight (ties keep
//!    category declaration order).
//! 2. Give each, in rank order, `max(1, round(budget × share))` slots, capped
//!    by what remains of the budget. Rounding is half away from zero.
//! 3. Any budget left after one pass goes to the top-ranked category.
//! 4. Per category, take the highest-priority candidates up to its slots.
//! 5. Merge in rank order, stable-sort by descending priority, cut to budget.
//!
//! Slots a category cannot fill for lack of candidates stay empty; they are
//! reported as `unfilled_slots` but not handed to another category.

use serde::Serialize;
use std::cmp::Reverse;
use tracing::{debug, info, instrument};

use scope_core::model::{CandidateTopic, Category, ContentMix};

/// Slots granted to one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlotAllocation {
    pub category: Category,
    pub weight: f64,
    pub slots: usize,
}

/// The day's ordered production slate plus the allocation behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPlan {
    pub budget: usize,
    pub allocations: Vec<SlotAllocation>,
    pub selected: Vec<CandidateTopic>,
    /// Allocated slots left empty for lack of candidates.
    pub unfilled_slots: usize,
}

impl DailyPlan {
    #[must_use]
    pub fn slots_for(&self, category: Category) -> usize {
        self.allocations
            .iter()
            .find(|a| a.category == category)
            .map_or(0, |a| a.slots)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// Fraction of the budget each ranked category targets.
///
/// A mix whose weights already sum to 1 is used as-is; any other mix is
/// scaled so that it does.
fn shares(mix: &ContentMix) -> Vec<(Category, f64)> {
    let ranked = mix.ranked();
    let total: f64 = ranked.iter().map(|&(_, w)| w).sum();
    if (total - 1.0).abs() <= 1e-9 {
        return ranked;
    }
    ranked.into_iter().map(|(c, w)| (c, w / total)).collect()
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn target_slots(budget: usize, share: f64) -> usize {
    ((budget as f64) * share).round().max(1.0) as usize
}

/// Split `budget` slots across the mix's positive-weight categories.
///
/// Entries are in rank order and their slots sum to exactly `budget`.
#[must_use]
pub fn allocate_slots(mix: &ContentMix, budget: usize) -> Vec<SlotAllocation> {
    let mut remaining = budget;
    let mut allocations: Vec<SlotAllocation> = shares(mix)
        .into_iter()
        .map(|(category, share)| {
            let slots = target_slots(budget, share).min(remaining);
            remaining -= slots;
            SlotAllocation {
                category,
                weight: mix.weight(category),
                slots,
            }
        })
        .collect();

    if remaining > 0 {
        if let Some(top) = allocations.first_mut() {
            top.slots += remaining;
        }
    }
    allocations
}

/// Choose today's articles from `candidates`.
#[instrument(skip_all, fields(candidates = candidates.len(), budget = budget))]
#[must_use]
pub fn build_daily_plan(
    candidates: &[CandidateTopic],
    mix: &ContentMix,
    budget: usize,
) -> DailyPlan {
    let allocations = allocate_slots(mix, budget);
    info!(
        slots = ?allocations.iter().map(|a| (a.category.as_str(), a.slots)).collect::<Vec<_>>(),
        "slot allocation"
    );

    let mut selected: Vec<CandidateTopic> = Vec::with_capacity(budget);
    let mut unfilled_slots = 0;
    for allocation in &allocations {
        let mut pool: Vec<&CandidateTopic> = candidates
            .iter()
            .filter(|c| c.category == allocation.category)
            .collect();
        pool.sort_by_key(|c| Reverse(c.priority));
        let taken = pool.len().min(allocation.slots);
        unfilled_slots += allocation.slots - taken;
        selected.extend(pool.into_iter().take(taken).cloned());
    }

    selected.sort_by_key(|c| Reverse(c.priority));
    selected.truncate(budget);

    info!(
        articles = selected.len(),
        unfilled = unfilled_slots,
        "daily plan built"
    );
    for topic in &selected {
        debug!(category = %topic.category, slug = %topic.slug, priority = topic.priority, "planned");
    }

    DailyPlan {
        budget,
        allocations,
        selected,
        unfilled_slots,
    }
}
