//! Database models for fee rules and overrides.
//!
//! Monetary amounts are stored as TEXT and parsed into `Decimal` on the way
//! out, so no precision is lost to floating point. Conversions to domain
//! models are fallible and reject malformed rows instead of papering over
//! them.

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use flightline_core::fees::{
    CalculationBasis, FeeError, FeeRule, FeeRuleOverride, FeeRuleOverrideUpsert, NewFeeRule,
    OverrideScope, OverrideValue,
};
use flightline_core::{Error, Result};

/// Database model for fee rules
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::fee_rules)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct FeeRuleDB {
    pub id: String,
    pub fee_code: String,
    pub name: String,
    pub amount: String,
    pub caa_override_amount: Option<String>,
    pub has_caa_override: bool,
    pub is_taxable: bool,
    pub is_potentially_waivable_by_fuel_uplift: bool,
    pub is_manually_waivable: bool,
    pub is_primary: bool,
    pub calculation_basis: String,
    pub applies_to_classification_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for fee rule overrides
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::fee_rule_overrides)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct FeeRuleOverrideDB {
    pub id: String,
    pub fee_rule_id: String,
    pub classification_id: Option<String>,
    pub aircraft_type_id: Option<String>,
    pub override_amount: Option<String>,
    pub override_caa_amount: Option<String>,
    pub updated_at: NaiveDateTime,
}

fn parse_amount(value: &str) -> Result<Decimal> {
    Ok(Decimal::from_str(value)?)
}

fn parse_optional_amount(value: &Option<String>) -> Result<Option<Decimal>> {
    value.as_deref().map(parse_amount).transpose()
}

impl TryFrom<FeeRuleDB> for FeeRule {
    type Error = Error;

    fn try_from(db: FeeRuleDB) -> Result<Self> {
        Ok(FeeRule {
            amount: parse_amount(&db.amount)?,
            caa_override_amount: parse_optional_amount(&db.caa_override_amount)?,
            calculation_basis: CalculationBasis::from_str(&db.calculation_basis)?,
            id: db.id,
            fee_code: db.fee_code,
            name: db.name,
            has_caa_override: db.has_caa_override,
            is_taxable: db.is_taxable,
            is_potentially_waivable_by_fuel_uplift: db.is_potentially_waivable_by_fuel_uplift,
            is_manually_waivable: db.is_manually_waivable,
            is_primary: db.is_primary,
            applies_to_classification_id: db.applies_to_classification_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl FeeRuleDB {
    /// Builds the row for a freshly created rule. The caller supplies the id
    /// and the creation timestamp.
    pub fn from_new(new_rule: NewFeeRule, rule_id: String, now: NaiveDateTime) -> Self {
        FeeRuleDB {
            id: rule_id,
            fee_code: new_rule.fee_code,
            name: new_rule.name,
            amount: new_rule.amount.to_string(),
            caa_override_amount: new_rule.caa_override_amount.map(|a| a.to_string()),
            has_caa_override: new_rule.has_caa_override,
            is_taxable: new_rule.is_taxable,
            is_potentially_waivable_by_fuel_uplift: new_rule
                .is_potentially_waivable_by_fuel_uplift,
            is_manually_waivable: new_rule.is_manually_waivable,
            is_primary: new_rule.is_primary,
            calculation_basis: new_rule.calculation_basis.as_str().to_string(),
            applies_to_classification_id: new_rule.applies_to_classification_id,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<FeeRule> for FeeRuleDB {
    fn from(rule: FeeRule) -> Self {
        FeeRuleDB {
            id: rule.id,
            fee_code: rule.fee_code,
            name: rule.name,
            amount: rule.amount.to_string(),
            caa_override_amount: rule.caa_override_amount.map(|a| a.to_string()),
            has_caa_override: rule.has_caa_override,
            is_taxable: rule.is_taxable,
            is_potentially_waivable_by_fuel_uplift: rule.is_potentially_waivable_by_fuel_uplift,
            is_manually_waivable: rule.is_manually_waivable,
            is_primary: rule.is_primary,
            calculation_basis: rule.calculation_basis.as_str().to_string(),
            applies_to_classification_id: rule.applies_to_classification_id,
            created_at: rule.created_at,
            updated_at: rule.updated_at,
        }
    }
}

impl TryFrom<FeeRuleOverrideDB> for FeeRuleOverride {
    type Error = Error;

    fn try_from(db: FeeRuleOverrideDB) -> Result<Self> {
        let scope = match (db.classification_id, db.aircraft_type_id) {
            (Some(classification), None) => OverrideScope::Classification(classification),
            (None, Some(aircraft_type)) => OverrideScope::AircraftType(aircraft_type),
            _ => return Err(FeeError::AmbiguousOverrideScope(db.id).into()),
        };
        Ok(FeeRuleOverride {
            amount: OverrideValue::from(parse_optional_amount(&db.override_amount)?),
            caa_amount: OverrideValue::from(parse_optional_amount(&db.override_caa_amount)?),
            id: db.id,
            fee_rule_id: db.fee_rule_id,
            scope,
            updated_at: db.updated_at,
        })
    }
}

impl FeeRuleOverrideDB {
    /// Builds the row for an override upsert. Both pricing fields land in the
    /// same row so the write is atomic.
    pub fn from_upsert(upsert: FeeRuleOverrideUpsert, row_id: String, now: NaiveDateTime) -> Self {
        let (classification_id, aircraft_type_id) = match &upsert.scope {
            OverrideScope::Classification(id) => (Some(id.clone()), None),
            OverrideScope::AircraftType(id) => (None, Some(id.clone())),
        };
        FeeRuleOverrideDB {
            id: row_id,
            fee_rule_id: upsert.fee_rule_id,
            classification_id,
            aircraft_type_id,
            override_amount: upsert.amount.as_option().map(|a| a.to_string()),
            override_caa_amount: upsert.caa_amount.as_option().map(|a| a.to_string()),
            updated_at: now,
        }
    }
}
