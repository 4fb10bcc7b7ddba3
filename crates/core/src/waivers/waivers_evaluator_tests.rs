use chrono::NaiveDateTime;
use rust_decimal_macros::dec;

use crate::aircraft::AircraftContext;
use crate::fees::{CalculationBasis, FeeRule};

use super::waivers_evaluator::{evaluate, fee_is_waived};
use super::waivers_model::{WaivedFeeSet, WaiverTier};

fn ts() -> NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn tier(id: &str, multiplier: rust_decimal::Decimal, priority: i32, codes: &[&str]) -> WaiverTier {
    WaiverTier {
        id: id.to_string(),
        name: id.to_string(),
        fuel_uplift_multiplier: multiplier,
        fees_waived_codes: codes.iter().map(|c| c.to_string()).collect(),
        tier_priority: priority,
        is_caa_specific_tier: false,
        created_at: ts(),
        updated_at: ts(),
    }
}

fn caa_tier(
    id: &str,
    multiplier: rust_decimal::Decimal,
    priority: i32,
    codes: &[&str],
) -> WaiverTier {
    let mut t = tier(id, multiplier, priority, codes);
    t.is_caa_specific_tier = true;
    t
}

fn aircraft_with_min(min: Option<rust_decimal::Decimal>) -> AircraftContext {
    AircraftContext {
        aircraft_type_id: "GLF5".to_string(),
        classification_id: "heavy-jet".to_string(),
        base_min_fuel_gallons_for_waiver: min,
    }
}

#[test]
fn test_highest_priority_qualifying_tier_wins() {
    // Both qualify at ratio 1.5; the priority-10 tier must win and the
    // lower tier's codes must not be merged in.
    let tiers = vec![
        tier("gold", dec!(1.0), 10, &["RAMP"]),
        tier("silver", dec!(0.5), 5, &["RAMP", "GPU", "LAV"]),
    ];
    let result = evaluate(&tiers, &aircraft_with_min(Some(dec!(200))), dec!(300), false);

    assert_eq!(result.winning_tier_id.as_deref(), Some("gold"));
    assert_eq!(result.fee_codes.len(), 1);
    assert!(result.contains("RAMP"));
    assert!(!result.contains("GPU"));
}

#[test]
fn test_tier_above_ratio_does_not_qualify() {
    // base 200, uplift 300 -> ratio 1.5. Tier B needs 2.0 and loses despite
    // its higher priority; tier A wins with just RAMP.
    let tiers = vec![
        tier("tier-a", dec!(1.0), 10, &["RAMP"]),
        tier("tier-b", dec!(2.0), 20, &["RAMP", "GPU"]),
    ];
    let result = evaluate(&tiers, &aircraft_with_min(Some(dec!(200))), dec!(300), false);

    assert_eq!(result.winning_tier_id.as_deref(), Some("tier-a"));
    assert_eq!(
        result.fee_codes,
        ["RAMP".to_string()].into_iter().collect()
    );
}

#[test]
fn test_no_minimum_configured_disables_waivers() {
    let tiers = vec![tier("any", dec!(0.1), 1, &["RAMP"])];
    let result = evaluate(&tiers, &aircraft_with_min(None), dec!(10000), false);
    assert_eq!(result, WaivedFeeSet::empty());
}

#[test]
fn test_zero_minimum_disables_waivers() {
    let tiers = vec![tier("any", dec!(0.1), 1, &["RAMP"])];
    let result = evaluate(
        &tiers,
        &aircraft_with_min(Some(rust_decimal::Decimal::ZERO)),
        dec!(10000),
        false,
    );
    assert_eq!(result, WaivedFeeSet::empty());
}

#[test]
fn test_caa_specific_tier_skipped_for_standard_customer() {
    let tiers = vec![
        caa_tier("caa-gold", dec!(1.0), 20, &["RAMP", "GPU"]),
        tier("general", dec!(1.0), 10, &["RAMP"]),
    ];
    let result = evaluate(&tiers, &aircraft_with_min(Some(dec!(100))), dec!(150), false);
    assert_eq!(result.winning_tier_id.as_deref(), Some("general"));
}

#[test]
fn test_caa_customer_sees_caa_and_general_tiers() {
    let tiers = vec![
        caa_tier("caa-gold", dec!(1.0), 20, &["RAMP", "GPU"]),
        tier("general", dec!(1.0), 10, &["RAMP"]),
    ];
    let result = evaluate(&tiers, &aircraft_with_min(Some(dec!(100))), dec!(150), true);
    assert_eq!(result.winning_tier_id.as_deref(), Some("caa-gold"));

    // A CAA customer still falls through to general tiers when the CAA tier
    // does not qualify.
    let tiers = vec![
        caa_tier("caa-gold", dec!(3.0), 20, &["RAMP", "GPU"]),
        tier("general", dec!(1.0), 10, &["RAMP"]),
    ];
    let result = evaluate(&tiers, &aircraft_with_min(Some(dec!(100))), dec!(150), true);
    assert_eq!(result.winning_tier_id.as_deref(), Some("general"));
}

#[test]
fn test_no_qualifying_tier_returns_empty_set() {
    let tiers = vec![tier("gold", dec!(2.0), 10, &["RAMP"])];
    let result = evaluate(&tiers, &aircraft_with_min(Some(dec!(200))), dec!(100), false);
    assert_eq!(result, WaivedFeeSet::empty());
}

#[test]
fn test_priority_ties_break_by_insertion_order() {
    let tiers = vec![
        tier("first", dec!(1.0), 10, &["RAMP"]),
        tier("second", dec!(1.0), 10, &["GPU"]),
    ];
    let result = evaluate(&tiers, &aircraft_with_min(Some(dec!(100))), dec!(200), false);
    assert_eq!(result.winning_tier_id.as_deref(), Some("first"));
}

#[test]
fn test_evaluation_is_deterministic() {
    let tiers = vec![
        tier("gold", dec!(1.0), 10, &["RAMP"]),
        tier("silver", dec!(0.5), 5, &["GPU"]),
    ];
    let aircraft = aircraft_with_min(Some(dec!(200)));
    let first = evaluate(&tiers, &aircraft, dec!(300), false);
    let second = evaluate(&tiers, &aircraft, dec!(300), false);
    assert_eq!(first, second);
}

#[test]
fn test_ratio_exactly_at_multiplier_qualifies() {
    let tiers = vec![tier("gold", dec!(1.5), 10, &["RAMP"])];
    let result = evaluate(&tiers, &aircraft_with_min(Some(dec!(200))), dec!(300), false);
    assert_eq!(result.winning_tier_id.as_deref(), Some("gold"));
}

#[test]
fn test_fee_is_waived_requires_waivable_flag_and_code() {
    let waived = WaivedFeeSet {
        winning_tier_id: Some("gold".to_string()),
        fee_codes: ["RAMP".to_string()].into_iter().collect(),
    };
    let mut rule = FeeRule {
        id: "rule-ramp".to_string(),
        fee_code: "RAMP".to_string(),
        name: "Ramp Fee".to_string(),
        amount: dec!(100),
        caa_override_amount: None,
        has_caa_override: false,
        is_taxable: true,
        is_potentially_waivable_by_fuel_uplift: true,
        is_manually_waivable: true,
        is_primary: true,
        calculation_basis: CalculationBasis::FixedPrice,
        applies_to_classification_id: None,
        created_at: ts(),
        updated_at: ts(),
    };
    assert!(fee_is_waived(&rule, &waived));

    // Not flagged waivable: the code match alone is not enough. The manual
    // waiver flag has no bearing on the automatic path.
    rule.is_potentially_waivable_by_fuel_uplift = false;
    assert!(!fee_is_waived(&rule, &waived));

    rule.is_potentially_waivable_by_fuel_uplift = true;
    rule.fee_code = "GPU".to_string();
    assert!(!fee_is_waived(&rule, &waived));
}
