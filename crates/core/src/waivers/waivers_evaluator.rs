//! Waiver evaluation: selects the highest-priority tier an aircraft's fuel
//! uplift qualifies for.
//!
//! First match wins. Tiers represent mutually exclusive service levels, so a
//! customer qualifying for a higher tier never has a lower tier's waiver list
//! merged in - precedence is deterministic and total.

use rust_decimal::Decimal;

use crate::aircraft::AircraftContext;
use crate::fees::FeeRule;

use super::waivers_model::{WaivedFeeSet, WaiverTier};

/// Evaluates the tier set for one aircraft and fuel-uplift quantity.
///
/// An aircraft with no configured minimum (or a zero minimum) cannot qualify
/// for any tier; that is a valid configuration state, not an error, and also
/// guards the ratio division.
pub fn evaluate(
    tiers: &[WaiverTier],
    aircraft: &AircraftContext,
    fuel_uplift: Decimal,
    is_caa_customer: bool,
) -> WaivedFeeSet {
    let base = match aircraft.base_min_fuel_gallons_for_waiver {
        Some(gallons) if gallons > Decimal::ZERO => gallons,
        _ => return WaivedFeeSet::empty(),
    };
    let ratio = fuel_uplift / base;

    // Stable sort keeps insertion order for equal priorities.
    let mut ordered: Vec<&WaiverTier> = tiers.iter().collect();
    ordered.sort_by(|a, b| b.tier_priority.cmp(&a.tier_priority));

    let winner = ordered.into_iter().find(|tier| {
        let applies = !tier.is_caa_specific_tier || is_caa_customer;
        applies && ratio >= tier.fuel_uplift_multiplier
    });

    match winner {
        Some(tier) => WaivedFeeSet {
            winning_tier_id: Some(tier.id.clone()),
            fee_codes: tier.fees_waived_codes.iter().cloned().collect(),
        },
        None => WaivedFeeSet::empty(),
    }
}

/// Whether a fee is actually waived for billing: the rule must be flagged as
/// waivable by fuel uplift and its code must be in the winning set. The
/// manual-waiver flag on the rule is a separate CSR concern and is never
/// consulted here.
pub fn fee_is_waived(rule: &FeeRule, waived: &WaivedFeeSet) -> bool {
    rule.is_potentially_waivable_by_fuel_uplift && waived.contains(&rule.fee_code)
}
