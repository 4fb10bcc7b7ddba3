use std::sync::Arc;

use log::debug;
use uuid::Uuid;

use crate::errors::{Result, ValidationError};

use super::fees_model::{
    validate_rule_amounts, FeeError, FeeRule, FeeRuleOverride, FeeRuleOverrideUpsert, NewFeeRule,
    OverrideScope, OverrideValue,
};
use super::fees_traits::{FeeRuleRepositoryTrait, FeeRuleServiceTrait};
use async_trait::async_trait;

/// Boundary for fee rule and override mutations. All numeric validation
/// happens here; the pure resolver assumes validated input and does not
/// re-check or clamp.
pub struct FeeRuleService {
    fee_repository: Arc<dyn FeeRuleRepositoryTrait>,
}

impl FeeRuleService {
    pub fn new(fee_repository: Arc<dyn FeeRuleRepositoryTrait>) -> Self {
        FeeRuleService { fee_repository }
    }

    fn validate_override_amounts(upsert: &FeeRuleOverrideUpsert) -> Result<()> {
        for (field, value) in [("overrideAmount", &upsert.amount), ("overrideCaaAmount", &upsert.caa_amount)] {
            if let OverrideValue::Set(amount) = value {
                if amount.is_sign_negative() {
                    return Err(ValidationError::NegativeAmount(field.to_string()).into());
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl FeeRuleServiceTrait for FeeRuleService {
    fn get_fee_rules(&self) -> Result<Vec<FeeRule>> {
        self.fee_repository.get_fee_rules()
    }

    fn get_fee_rule(&self, fee_rule_id: &str) -> Result<FeeRule> {
        self.fee_repository.get_fee_rule(fee_rule_id)
    }

    async fn create_fee_rule(&self, new_rule: NewFeeRule) -> Result<FeeRule> {
        validate_rule_amounts(&new_rule.amount, &new_rule.caa_override_amount)?;
        if new_rule.fee_code.trim().is_empty() {
            return Err(ValidationError::MissingField("feeCode".to_string()).into());
        }
        if self
            .fee_repository
            .get_fee_rule_by_code(&new_rule.fee_code)?
            .is_some()
        {
            return Err(FeeError::CodeAlreadyExists(new_rule.fee_code).into());
        }

        let mut new_rule = new_rule;
        if new_rule.id.is_none() {
            new_rule.id = Some(Uuid::new_v4().to_string());
        }
        self.fee_repository.create_fee_rule(new_rule).await
    }

    async fn update_fee_rule(&self, rule: FeeRule) -> Result<FeeRule> {
        validate_rule_amounts(&rule.amount, &rule.caa_override_amount)?;
        if let Some(existing) = self.fee_repository.get_fee_rule_by_code(&rule.fee_code)? {
            if existing.id != rule.id {
                return Err(FeeError::CodeAlreadyExists(rule.fee_code).into());
            }
        }
        self.fee_repository.update_fee_rule(rule).await
    }

    async fn delete_fee_rule(&self, fee_rule_id: &str) -> Result<usize> {
        // A rule stays alive while any override, at either scope, points at it.
        let referencing = self.fee_repository.get_overrides_for_rule(fee_rule_id)?;
        if !referencing.is_empty() {
            return Err(FeeError::RuleReferencedByOverride(fee_rule_id.to_string()).into());
        }
        self.fee_repository.delete_fee_rule(fee_rule_id).await
    }

    fn get_overrides(&self) -> Result<Vec<FeeRuleOverride>> {
        self.fee_repository.get_overrides()
    }

    async fn upsert_override(&self, upsert: FeeRuleOverrideUpsert) -> Result<FeeRuleOverride> {
        Self::validate_override_amounts(&upsert)?;
        // Reject upserts against unknown rules before they reach the store.
        let _ = self.fee_repository.get_fee_rule(&upsert.fee_rule_id)?;
        debug!(
            "Upserting override for rule {} at scope {:?}",
            upsert.fee_rule_id, upsert.scope
        );
        self.fee_repository.upsert_override(upsert).await
    }

    async fn delete_override(&self, scope: OverrideScope, fee_rule_id: &str) -> Result<usize> {
        debug!("Reverting override for rule {fee_rule_id} at scope {scope:?}");
        self.fee_repository.delete_override(scope, fee_rule_id).await
    }
}
