//! Waiver tier domain models.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors specific to waiver tiers.
#[derive(Error, Debug)]
pub enum WaiverError {
    #[error("Waiver tier not found: {0}")]
    NotFound(String),

    #[error("Waiver tier '{0}' must waive at least one fee code")]
    EmptyWaivedCodes(String),

    #[error("Waiver tier '{0}' must have a fuel uplift multiplier greater than zero")]
    NonPositiveMultiplier(String),

    #[error("Reorder references unknown waiver tier: {0}")]
    UnknownTierInOrder(String),

    #[error("Reorder lists waiver tier more than once: {0}")]
    DuplicateTierInOrder(String),
}

/// A prioritized rule exempting specific fee codes from billing once a
/// fuel-uplift threshold is met.
///
/// Tiers are totally ordered by `tier_priority` descending; ties break by
/// insertion order. Higher priority is evaluated first and the first
/// qualifying tier wins outright.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaiverTier {
    pub id: String,
    pub name: String,
    /// Ratio of purchased fuel to the aircraft's minimum-fuel baseline
    /// required to qualify. Always > 0.
    pub fuel_uplift_multiplier: Decimal,
    /// Non-empty set of fee codes this tier waives.
    pub fees_waived_codes: Vec<String>,
    pub tier_priority: i32,
    /// CAA-specific tiers apply only to CAA customers. General tiers apply
    /// to everyone, CAA customers included.
    pub is_caa_specific_tier: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new waiver tier.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewWaiverTier {
    pub id: Option<String>,
    pub name: String,
    pub fuel_uplift_multiplier: Decimal,
    pub fees_waived_codes: Vec<String>,
    pub tier_priority: i32,
    pub is_caa_specific_tier: bool,
}

/// The outcome of evaluating the tier set for one aircraft and fuel uplift:
/// the winning tier (if any) and the fee codes it waives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaivedFeeSet {
    pub winning_tier_id: Option<String>,
    pub fee_codes: HashSet<String>,
}

impl WaivedFeeSet {
    pub fn empty() -> Self {
        Self {
            winning_tier_id: None,
            fee_codes: HashSet::new(),
        }
    }

    pub fn contains(&self, fee_code: &str) -> bool {
        self.fee_codes.contains(fee_code)
    }
}

/// One element of the atomic renumbering batch produced by a reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityAssignment {
    pub tier_id: String,
    pub new_priority: i32,
}
