//! Priority reordering for waiver tiers.
//!
//! Priorities are dense integers; a reorder renumbers the whole active set in
//! one atomic batch. Renumbering everything on every drag is deliberate: it
//! keeps the uniqueness invariant trivially true and avoids sparse-key
//! bookkeeping.

use std::collections::HashSet;

use crate::errors::Result;

use super::waivers_model::{PriorityAssignment, WaiverError, WaiverTier};

/// Computes the renumbering batch for a drag-reorder.
///
/// The first id in `new_order` receives the highest priority. A partial
/// `new_order` is completed by appending the unlisted tiers in their current
/// priority order, so the returned batch always covers every tier and the
/// assigned priorities are pairwise distinct. The batch must be persisted as
/// a single transaction - partial application would leave stale priorities
/// that corrupt waiver evaluation.
pub fn reorder(tiers: &[WaiverTier], new_order: &[String]) -> Result<Vec<PriorityAssignment>> {
    let mut seen: HashSet<&str> = HashSet::new();
    for tier_id in new_order {
        if !seen.insert(tier_id.as_str()) {
            return Err(WaiverError::DuplicateTierInOrder(tier_id.clone()).into());
        }
        if !tiers.iter().any(|t| &t.id == tier_id) {
            return Err(WaiverError::UnknownTierInOrder(tier_id.clone()).into());
        }
    }

    let mut full_order: Vec<String> = new_order.to_vec();
    let mut remaining: Vec<&WaiverTier> = tiers
        .iter()
        .filter(|t| !seen.contains(t.id.as_str()))
        .collect();
    remaining.sort_by(|a, b| b.tier_priority.cmp(&a.tier_priority));
    full_order.extend(remaining.into_iter().map(|t| t.id.clone()));

    let count = full_order.len();
    Ok(full_order
        .into_iter()
        .enumerate()
        .map(|(index, tier_id)| PriorityAssignment {
            tier_id,
            new_priority: (count - index) as i32,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use chrono::NaiveDateTime;
    use rust_decimal_macros::dec;

    fn ts() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn tier(id: &str, priority: i32) -> WaiverTier {
        WaiverTier {
            id: id.to_string(),
            name: id.to_string(),
            fuel_uplift_multiplier: dec!(1),
            fees_waived_codes: vec!["RAMP".to_string()],
            tier_priority: priority,
            is_caa_specific_tier: false,
            created_at: ts(),
            updated_at: ts(),
        }
    }

    #[test]
    fn test_full_reorder_assigns_descending_distinct_priorities() {
        let tiers = vec![tier("a", 3), tier("b", 2), tier("c", 1)];
        let order = vec!["c".to_string(), "a".to_string(), "b".to_string()];

        let batch = reorder(&tiers, &order).unwrap();

        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0], PriorityAssignment { tier_id: "c".to_string(), new_priority: 3 });
        assert_eq!(batch[1], PriorityAssignment { tier_id: "a".to_string(), new_priority: 2 });
        assert_eq!(batch[2], PriorityAssignment { tier_id: "b".to_string(), new_priority: 1 });

        // Sorting by the new priorities descending reproduces the order.
        let mut by_priority = batch.clone();
        by_priority.sort_by(|a, b| b.new_priority.cmp(&a.new_priority));
        let ids: Vec<&str> = by_priority.iter().map(|a| a.tier_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_partial_reorder_covers_whole_set() {
        let tiers = vec![tier("a", 30), tier("b", 20), tier("c", 10)];
        // Only "c" is dragged to the top; a and b keep their relative order.
        let batch = reorder(&tiers, &["c".to_string()]).unwrap();

        let ids: Vec<&str> = batch.iter().map(|a| a.tier_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);

        let priorities: Vec<i32> = batch.iter().map(|a| a.new_priority).collect();
        assert_eq!(priorities, vec![3, 2, 1]);
        let distinct: HashSet<i32> = priorities.iter().copied().collect();
        assert_eq!(distinct.len(), priorities.len());
    }

    #[test]
    fn test_reorder_rejects_unknown_tier() {
        let tiers = vec![tier("a", 1)];
        let err = reorder(&tiers, &["ghost".to_string()]).unwrap_err();
        assert!(matches!(
            err,
            Error::Waiver(WaiverError::UnknownTierInOrder(_))
        ));
    }

    #[test]
    fn test_reorder_rejects_duplicate_tier() {
        let tiers = vec![tier("a", 2), tier("b", 1)];
        let err = reorder(&tiers, &["a".to_string(), "a".to_string()]).unwrap_err();
        assert!(matches!(
            err,
            Error::Waiver(WaiverError::DuplicateTierInOrder(_))
        ));
    }

    #[test]
    fn test_empty_order_renumbers_in_place() {
        let tiers = vec![tier("a", 100), tier("b", 7)];
        let batch = reorder(&tiers, &[]).unwrap();
        let ids: Vec<&str> = batch.iter().map(|a| a.tier_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(batch[0].new_priority, 2);
        assert_eq!(batch[1].new_priority, 1);
    }
}
