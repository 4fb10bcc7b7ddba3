//! Schedule matrix models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aircraft::AircraftContext;
use crate::fees::FeeRule;

/// One (aircraft, fee rule) cell of the schedule matrix.
///
/// The classification and global defaults are always populated so the
/// presentation layer can show the whole inheritance chain without
/// re-querying, and `revert_to_value` gives a stable "what happens if I
/// delete this override" preview whether or not an override exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeCell {
    pub fee_rule_id: String,
    pub fee_code: String,
    pub final_display_value: Decimal,
    pub is_aircraft_override: bool,
    pub revert_to_value: Decimal,
    pub classification_default: Decimal,
    pub global_default: Decimal,
    pub final_caa_display_value: Decimal,
    pub is_caa_aircraft_override: bool,
    pub revert_to_caa_value: Decimal,
    pub is_waived: bool,
}

/// One aircraft's row of cells. The display name is attached by the schedule
/// service; the compiler itself only knows the aircraft type id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    pub aircraft_type_id: String,
    pub aircraft_display_name: Option<String>,
    pub cells: Vec<FeeCell>,
}

/// The compiled schedule for a set of aircraft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleMatrix {
    pub rows: Vec<ScheduleRow>,
    /// Column ordering hint for the presentation layer, derived via
    /// [`PrimaryFeePolicy`].
    pub primary_fee_codes: Vec<String>,
}

/// Compile input for one aircraft: its configuration plus the transaction
/// context the waiver evaluator needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub context: AircraftContext,
    pub fuel_uplift: Decimal,
    pub is_caa_customer: bool,
}

/// Request shape the service accepts: aircraft by id, context resolved from
/// the aircraft repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub aircraft_type_id: String,
    pub fuel_uplift: Decimal,
    pub is_caa_customer: bool,
}

/// Policy for choosing the primary schedule columns.
///
/// When no rule is flagged primary, every rule is treated as a primary
/// column. The upstream product behaves this way for unconfigured data; it is
/// kept as an explicit, named policy so it can be changed without touching
/// resolution logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrimaryFeePolicy {
    NoPrimaryFeesFallback,
}

impl PrimaryFeePolicy {
    pub fn primary_fee_codes(&self, fee_rules: &[FeeRule]) -> Vec<String> {
        match self {
            PrimaryFeePolicy::NoPrimaryFeesFallback => {
                let flagged: Vec<String> = fee_rules
                    .iter()
                    .filter(|r| r.is_primary)
                    .map(|r| r.fee_code.clone())
                    .collect();
                if flagged.is_empty() {
                    fee_rules.iter().map(|r| r.fee_code.clone()).collect()
                } else {
                    flagged
                }
            }
        }
    }
}
