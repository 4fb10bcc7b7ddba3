//! Schedule compilation: composes the fee resolver and waiver evaluator
//! across every (aircraft, fee rule) pair.
//!
//! `compile` is a pure function of its four inputs - no caching and no hidden
//! state - so re-running it against an updated snapshot is the only way its
//! output changes. That property is what makes optimistic UI updates with
//! rollback safe: on a rejected write the caller re-fetches and re-compiles.

use crate::errors::Result;
use crate::fees::{resolution_chain, FeeRule, FeeSourceScope, OverrideIndex, PricingTier};
use crate::waivers::{evaluate, fee_is_waived, WaiverTier};

use super::schedule_model::{
    FeeCell, PrimaryFeePolicy, ScheduleEntry, ScheduleMatrix, ScheduleRow,
};

/// Compiles the full display/override matrix for the given aircraft entries.
///
/// Rules whose classification scope does not admit an aircraft are skipped
/// for that row rather than resolved, honoring the resolver's contract.
pub fn compile(
    entries: &[ScheduleEntry],
    fee_rules: &[FeeRule],
    index: &OverrideIndex,
    tiers: &[WaiverTier],
) -> Result<ScheduleMatrix> {
    let primary_fee_codes =
        PrimaryFeePolicy::NoPrimaryFeesFallback.primary_fee_codes(fee_rules);

    let mut rows = Vec::with_capacity(entries.len());
    for entry in entries {
        let waived = evaluate(tiers, &entry.context, entry.fuel_uplift, entry.is_caa_customer);

        let mut cells = Vec::new();
        for rule in fee_rules {
            if !rule.applies_to(&entry.context.classification_id) {
                continue;
            }

            let standard_chain =
                resolution_chain(rule, &entry.context, index, PricingTier::Standard)?;
            let caa_chain = resolution_chain(rule, &entry.context, index, PricingTier::Caa)?;
            let standard = standard_chain.resolved();
            let caa = caa_chain.resolved();

            cells.push(FeeCell {
                fee_rule_id: rule.id.clone(),
                fee_code: rule.fee_code.clone(),
                final_display_value: standard.final_amount,
                is_aircraft_override: standard.source_scope == FeeSourceScope::Aircraft,
                revert_to_value: standard.revert_to_amount,
                classification_default: standard_chain.classification_default(),
                global_default: standard_chain.global_default(),
                final_caa_display_value: caa.final_amount,
                is_caa_aircraft_override: caa.source_scope == FeeSourceScope::Aircraft,
                revert_to_caa_value: caa.revert_to_amount,
                is_waived: fee_is_waived(rule, &waived),
            });
        }

        rows.push(ScheduleRow {
            aircraft_type_id: entry.context.aircraft_type_id.clone(),
            aircraft_display_name: None,
            cells,
        });
    }

    Ok(ScheduleMatrix {
        rows,
        primary_fee_codes,
    })
}
