use std::sync::{Arc, RwLock};

use chrono::NaiveDateTime;
use rust_decimal_macros::dec;

use crate::errors::{Error, Result, ValidationError};

use super::fees_model::{
    CalculationBasis, FeeError, FeeRule, FeeRuleOverride, FeeRuleOverrideUpsert, NewFeeRule,
    OverrideScope, OverrideValue,
};
use super::fees_service::FeeRuleService;
use super::fees_traits::{FeeRuleRepositoryTrait, FeeRuleServiceTrait};
use async_trait::async_trait;

fn ts() -> NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

struct MockFeeRepository {
    rules: RwLock<Vec<FeeRule>>,
    overrides: RwLock<Vec<FeeRuleOverride>>,
}

impl MockFeeRepository {
    fn new(rules: Vec<FeeRule>, overrides: Vec<FeeRuleOverride>) -> Self {
        Self {
            rules: RwLock::new(rules),
            overrides: RwLock::new(overrides),
        }
    }
}

#[async_trait]
impl FeeRuleRepositoryTrait for MockFeeRepository {
    fn get_fee_rules(&self) -> Result<Vec<FeeRule>> {
        Ok(self.rules.read().unwrap().clone())
    }

    fn get_fee_rule(&self, fee_rule_id: &str) -> Result<FeeRule> {
        self.rules
            .read()
            .unwrap()
            .iter()
            .find(|r| r.id == fee_rule_id)
            .cloned()
            .ok_or_else(|| FeeError::NotFound(fee_rule_id.to_string()).into())
    }

    fn get_fee_rule_by_code(&self, fee_code: &str) -> Result<Option<FeeRule>> {
        Ok(self
            .rules
            .read()
            .unwrap()
            .iter()
            .find(|r| r.fee_code == fee_code)
            .cloned())
    }

    async fn create_fee_rule(&self, new_rule: NewFeeRule) -> Result<FeeRule> {
        let rule = FeeRule {
            id: new_rule.id.expect("service assigns an id"),
            fee_code: new_rule.fee_code,
            name: new_rule.name,
            amount: new_rule.amount,
            caa_override_amount: new_rule.caa_override_amount,
            has_caa_override: new_rule.has_caa_override,
            is_taxable: new_rule.is_taxable,
            is_potentially_waivable_by_fuel_uplift: new_rule
                .is_potentially_waivable_by_fuel_uplift,
            is_manually_waivable: new_rule.is_manually_waivable,
            is_primary: new_rule.is_primary,
            calculation_basis: new_rule.calculation_basis,
            applies_to_classification_id: new_rule.applies_to_classification_id,
            created_at: ts(),
            updated_at: ts(),
        };
        self.rules.write().unwrap().push(rule.clone());
        Ok(rule)
    }

    async fn update_fee_rule(&self, rule: FeeRule) -> Result<FeeRule> {
        let mut rules = self.rules.write().unwrap();
        let slot = rules
            .iter_mut()
            .find(|r| r.id == rule.id)
            .ok_or_else(|| Error::from(FeeError::NotFound(rule.id.clone())))?;
        *slot = rule.clone();
        Ok(rule)
    }

    async fn delete_fee_rule(&self, fee_rule_id: &str) -> Result<usize> {
        let mut rules = self.rules.write().unwrap();
        let before = rules.len();
        rules.retain(|r| r.id != fee_rule_id);
        Ok(before - rules.len())
    }

    fn get_overrides(&self) -> Result<Vec<FeeRuleOverride>> {
        Ok(self.overrides.read().unwrap().clone())
    }

    fn get_overrides_for_rule(&self, fee_rule_id: &str) -> Result<Vec<FeeRuleOverride>> {
        Ok(self
            .overrides
            .read()
            .unwrap()
            .iter()
            .filter(|ov| ov.fee_rule_id == fee_rule_id)
            .cloned()
            .collect())
    }

    async fn upsert_override(&self, upsert: FeeRuleOverrideUpsert) -> Result<FeeRuleOverride> {
        let mut overrides = self.overrides.write().unwrap();
        overrides.retain(|ov| !(ov.fee_rule_id == upsert.fee_rule_id && ov.scope == upsert.scope));
        let ov = FeeRuleOverride {
            id: format!("ov-{}", overrides.len()),
            fee_rule_id: upsert.fee_rule_id,
            scope: upsert.scope,
            amount: upsert.amount,
            caa_amount: upsert.caa_amount,
            updated_at: ts(),
        };
        overrides.push(ov.clone());
        Ok(ov)
    }

    async fn delete_override(&self, scope: OverrideScope, fee_rule_id: &str) -> Result<usize> {
        let mut overrides = self.overrides.write().unwrap();
        let before = overrides.len();
        overrides.retain(|ov| !(ov.fee_rule_id == fee_rule_id && ov.scope == scope));
        Ok(before - overrides.len())
    }
}

fn rule(id: &str, code: &str) -> FeeRule {
    FeeRule {
        id: id.to_string(),
        fee_code: code.to_string(),
        name: code.to_string(),
        amount: dec!(100),
        caa_override_amount: None,
        has_caa_override: false,
        is_taxable: true,
        is_potentially_waivable_by_fuel_uplift: true,
        is_manually_waivable: false,
        is_primary: false,
        calculation_basis: CalculationBasis::FixedPrice,
        applies_to_classification_id: None,
        created_at: ts(),
        updated_at: ts(),
    }
}

fn new_rule(code: &str) -> NewFeeRule {
    NewFeeRule {
        id: None,
        fee_code: code.to_string(),
        name: code.to_string(),
        amount: dec!(100),
        caa_override_amount: None,
        has_caa_override: false,
        is_taxable: true,
        is_potentially_waivable_by_fuel_uplift: true,
        is_manually_waivable: false,
        is_primary: false,
        calculation_basis: CalculationBasis::FixedPrice,
        applies_to_classification_id: None,
    }
}

fn make_service(rules: Vec<FeeRule>, overrides: Vec<FeeRuleOverride>) -> FeeRuleService {
    FeeRuleService::new(Arc::new(MockFeeRepository::new(rules, overrides)))
}

#[tokio::test]
async fn test_create_assigns_id() {
    let service = make_service(vec![], vec![]);
    let created = service.create_fee_rule(new_rule("RAMP")).await.unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.fee_code, "RAMP");
}

#[tokio::test]
async fn test_create_rejects_duplicate_fee_code() {
    let service = make_service(vec![rule("r1", "RAMP")], vec![]);
    let err = service.create_fee_rule(new_rule("RAMP")).await.unwrap_err();
    assert!(matches!(err, Error::Fee(FeeError::CodeAlreadyExists(_))));
}

#[tokio::test]
async fn test_create_rejects_negative_amount() {
    let mut negative = new_rule("GPU");
    negative.amount = dec!(-1);
    let service = make_service(vec![], vec![]);
    let err = service.create_fee_rule(negative).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::NegativeAmount(_))
    ));
}

#[tokio::test]
async fn test_delete_rejected_while_override_references_rule() {
    let overrides = vec![FeeRuleOverride {
        id: "ov-1".to_string(),
        fee_rule_id: "r1".to_string(),
        scope: OverrideScope::AircraftType("GLF5".to_string()),
        amount: OverrideValue::Set(dec!(50)),
        caa_amount: OverrideValue::Inherit,
        updated_at: ts(),
    }];
    let service = make_service(vec![rule("r1", "RAMP")], overrides);

    let err = service.delete_fee_rule("r1").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Fee(FeeError::RuleReferencedByOverride(_))
    ));
}

#[tokio::test]
async fn test_delete_succeeds_after_override_removed() {
    let service = make_service(
        vec![rule("r1", "RAMP")],
        vec![FeeRuleOverride {
            id: "ov-1".to_string(),
            fee_rule_id: "r1".to_string(),
            scope: OverrideScope::AircraftType("GLF5".to_string()),
            amount: OverrideValue::Set(dec!(50)),
            caa_amount: OverrideValue::Inherit,
            updated_at: ts(),
        }],
    );

    let removed = service
        .delete_override(OverrideScope::AircraftType("GLF5".to_string()), "r1")
        .await
        .unwrap();
    assert_eq!(removed, 1);
    assert_eq!(service.delete_fee_rule("r1").await.unwrap(), 1);
}

#[tokio::test]
async fn test_upsert_override_rejects_unknown_rule() {
    let service = make_service(vec![], vec![]);
    let err = service
        .upsert_override(FeeRuleOverrideUpsert {
            fee_rule_id: "missing".to_string(),
            scope: OverrideScope::AircraftType("GLF5".to_string()),
            amount: OverrideValue::Set(dec!(10)),
            caa_amount: OverrideValue::Inherit,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Fee(FeeError::NotFound(_))));
}

#[tokio::test]
async fn test_upsert_override_rejects_negative_amount() {
    let service = make_service(vec![rule("r1", "RAMP")], vec![]);
    let err = service
        .upsert_override(FeeRuleOverrideUpsert {
            fee_rule_id: "r1".to_string(),
            scope: OverrideScope::Classification("heavy-jet".to_string()),
            amount: OverrideValue::Set(dec!(-5)),
            caa_amount: OverrideValue::Inherit,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::NegativeAmount(_))
    ));
}

#[tokio::test]
async fn test_upsert_replaces_existing_override_for_same_scope() {
    let service = make_service(vec![rule("r1", "RAMP")], vec![]);
    let scope = OverrideScope::Classification("heavy-jet".to_string());

    service
        .upsert_override(FeeRuleOverrideUpsert {
            fee_rule_id: "r1".to_string(),
            scope: scope.clone(),
            amount: OverrideValue::Set(dec!(80)),
            caa_amount: OverrideValue::Inherit,
        })
        .await
        .unwrap();
    service
        .upsert_override(FeeRuleOverrideUpsert {
            fee_rule_id: "r1".to_string(),
            scope: scope.clone(),
            amount: OverrideValue::Set(dec!(70)),
            caa_amount: OverrideValue::Set(dec!(65)),
        })
        .await
        .unwrap();

    let overrides = service.get_overrides().unwrap();
    assert_eq!(overrides.len(), 1);
    assert_eq!(overrides[0].amount, OverrideValue::Set(dec!(70)));
    assert_eq!(overrides[0].caa_amount, OverrideValue::Set(dec!(65)));
}

#[tokio::test]
async fn test_update_rejects_code_collision_with_other_rule() {
    let service = make_service(vec![rule("r1", "RAMP"), rule("r2", "GPU")], vec![]);
    let mut renamed = rule("r2", "RAMP");
    renamed.name = "GPU Fee".to_string();
    let err = service.update_fee_rule(renamed).await.unwrap_err();
    assert!(matches!(err, Error::Fee(FeeError::CodeAlreadyExists(_))));
}
