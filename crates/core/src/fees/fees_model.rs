//! Fee rule and override domain models.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::{Error, Result, ValidationError};

/// How a fee amount is applied when billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalculationBasis {
    FixedPrice,
    PerUnitService,
    NotApplicable,
}

impl CalculationBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationBasis::FixedPrice => "FIXED_PRICE",
            CalculationBasis::PerUnitService => "PER_UNIT_SERVICE",
            CalculationBasis::NotApplicable => "NOT_APPLICABLE",
        }
    }

    pub fn from_str(value: &str) -> Result<Self> {
        match value {
            "FIXED_PRICE" => Ok(CalculationBasis::FixedPrice),
            "PER_UNIT_SERVICE" => Ok(CalculationBasis::PerUnitService),
            "NOT_APPLICABLE" => Ok(CalculationBasis::NotApplicable),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown calculation basis: {other}"
            ))
            .into()),
        }
    }
}

/// Errors specific to fee rules and overrides.
#[derive(Error, Debug)]
pub enum FeeError {
    #[error("Fee code '{0}' already exists")]
    CodeAlreadyExists(String),

    #[error("Fee rule not found: {0}")]
    NotFound(String),

    #[error("Fee rule '{0}' is referenced by at least one override and cannot be deleted")]
    RuleReferencedByOverride(String),

    #[error(
        "Fee rule '{rule_id}' applies to classification '{expected}' but aircraft '{aircraft_type_id}' is classified as '{actual}'"
    )]
    ClassificationMismatch {
        rule_id: String,
        aircraft_type_id: String,
        expected: String,
        actual: String,
    },

    #[error("Override '{0}' must reference exactly one of classification or aircraft type")]
    AmbiguousOverrideScope(String),
}

/// A named, coded chargeable service with a global default amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRule {
    pub id: String,
    /// Unique human-readable key, e.g. "RAMP" or "GPU".
    pub fee_code: String,
    pub name: String,
    pub amount: Decimal,
    pub caa_override_amount: Option<Decimal>,
    pub has_caa_override: bool,
    pub is_taxable: bool,
    pub is_potentially_waivable_by_fuel_uplift: bool,
    /// Governs CSR-initiated waivers on a draft invoice. Evaluated by the
    /// invoicing layer, never by the fuel-uplift tier logic.
    pub is_manually_waivable: bool,
    /// Marks the rule as a primary schedule column. See `PrimaryFeePolicy`.
    pub is_primary: bool,
    pub calculation_basis: CalculationBasis,
    /// When set, the rule only applies to aircraft of this classification.
    pub applies_to_classification_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl FeeRule {
    /// Whether this rule's classification scope admits the given aircraft.
    pub fn applies_to(&self, classification_id: &str) -> bool {
        match &self.applies_to_classification_id {
            Some(scope) => scope == classification_id,
            None => true,
        }
    }
}

/// Input model for creating a new fee rule.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewFeeRule {
    pub id: Option<String>,
    pub fee_code: String,
    pub name: String,
    pub amount: Decimal,
    pub caa_override_amount: Option<Decimal>,
    pub has_caa_override: bool,
    pub is_taxable: bool,
    pub is_potentially_waivable_by_fuel_uplift: bool,
    pub is_manually_waivable: bool,
    pub is_primary: bool,
    pub calculation_basis: CalculationBasis,
    pub applies_to_classification_id: Option<String>,
}

/// An override amount field. Distinguishes "no override, defer to the next
/// broader scope" from "override to this value" (which may be zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<Decimal>", into = "Option<Decimal>")]
pub enum OverrideValue {
    Inherit,
    Set(Decimal),
}

impl OverrideValue {
    pub fn as_option(&self) -> Option<Decimal> {
        match self {
            OverrideValue::Inherit => None,
            OverrideValue::Set(amount) => Some(*amount),
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, OverrideValue::Set(_))
    }
}

impl From<Option<Decimal>> for OverrideValue {
    fn from(value: Option<Decimal>) -> Self {
        match value {
            Some(amount) => OverrideValue::Set(amount),
            None => OverrideValue::Inherit,
        }
    }
}

impl From<OverrideValue> for Option<Decimal> {
    fn from(value: OverrideValue) -> Self {
        value.as_option()
    }
}

/// The single scope an override applies to. Encoding the scope as an enum
/// makes "both keys set" and "neither key set" unrepresentable in the domain;
/// the storage layer rejects rows that violate it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "scope", content = "id")]
pub enum OverrideScope {
    Classification(String),
    AircraftType(String),
}

impl OverrideScope {
    pub fn classification_id(&self) -> Option<&str> {
        match self {
            OverrideScope::Classification(id) => Some(id),
            OverrideScope::AircraftType(_) => None,
        }
    }

    pub fn aircraft_type_id(&self) -> Option<&str> {
        match self {
            OverrideScope::Classification(_) => None,
            OverrideScope::AircraftType(id) => Some(id),
        }
    }
}

/// A scope-specific replacement for a fee rule's amounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRuleOverride {
    pub id: String,
    pub fee_rule_id: String,
    #[serde(flatten)]
    pub scope: OverrideScope,
    pub amount: OverrideValue,
    pub caa_amount: OverrideValue,
    pub updated_at: NaiveDateTime,
}

/// Upsert request for an override. One override exists per (scope, rule)
/// pair; both pricing fields travel in one request so the store applies them
/// atomically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRuleOverrideUpsert {
    pub fee_rule_id: String,
    #[serde(flatten)]
    pub scope: OverrideScope,
    pub amount: OverrideValue,
    pub caa_amount: OverrideValue,
}

/// Which pricing chain to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PricingTier {
    Standard,
    Caa,
}

/// Which level of the inheritance chain supplied the final amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeSourceScope {
    Aircraft,
    Classification,
    Global,
}

/// The result of resolving one fee rule for one aircraft and pricing tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFee {
    pub final_amount: Decimal,
    /// True iff an aircraft- or classification-level override supplied the
    /// value actually used.
    pub is_override: bool,
    pub source_scope: FeeSourceScope,
    /// The amount that would apply if the aircraft-level override were
    /// deleted. Equals `final_amount` when no aircraft override exists.
    pub revert_to_amount: Decimal,
}

/// Immutable lookup snapshot over a set of overrides, keyed by
/// (scope id, fee rule id).
#[derive(Debug, Clone, Default)]
pub struct OverrideIndex {
    by_aircraft: HashMap<(String, String), FeeRuleOverride>,
    by_classification: HashMap<(String, String), FeeRuleOverride>,
}

impl OverrideIndex {
    pub fn from_overrides(overrides: Vec<FeeRuleOverride>) -> Self {
        let mut index = OverrideIndex::default();
        for ov in overrides {
            let key = match &ov.scope {
                OverrideScope::AircraftType(id) => (id.clone(), ov.fee_rule_id.clone()),
                OverrideScope::Classification(id) => (id.clone(), ov.fee_rule_id.clone()),
            };
            match &ov.scope {
                OverrideScope::AircraftType(_) => {
                    index.by_aircraft.insert(key, ov);
                }
                OverrideScope::Classification(_) => {
                    index.by_classification.insert(key, ov);
                }
            }
        }
        index
    }

    pub fn aircraft_override(
        &self,
        aircraft_type_id: &str,
        fee_rule_id: &str,
    ) -> Option<&FeeRuleOverride> {
        self.by_aircraft
            .get(&(aircraft_type_id.to_string(), fee_rule_id.to_string()))
    }

    pub fn classification_override(
        &self,
        classification_id: &str,
        fee_rule_id: &str,
    ) -> Option<&FeeRuleOverride> {
        self.by_classification
            .get(&(classification_id.to_string(), fee_rule_id.to_string()))
    }

    /// Whether any override, at either scope, references the given rule.
    pub fn rule_has_overrides(&self, fee_rule_id: &str) -> bool {
        self.by_aircraft.keys().any(|(_, rule)| rule == fee_rule_id)
            || self
                .by_classification
                .keys()
                .any(|(_, rule)| rule == fee_rule_id)
    }

    pub fn len(&self) -> usize {
        self.by_aircraft.len() + self.by_classification.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_aircraft.is_empty() && self.by_classification.is_empty()
    }
}

/// Validates that amounts on a new or updated rule are non-negative.
pub(crate) fn validate_rule_amounts(
    amount: &Decimal,
    caa_override_amount: &Option<Decimal>,
) -> Result<()> {
    if amount.is_sign_negative() {
        return Err(Error::Validation(ValidationError::NegativeAmount(
            "amount".to_string(),
        )));
    }
    if let Some(caa) = caa_override_amount {
        if caa.is_sign_negative() {
            return Err(Error::Validation(ValidationError::NegativeAmount(
                "caaOverrideAmount".to_string(),
            )));
        }
    }
    Ok(())
}
