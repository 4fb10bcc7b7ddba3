use crate::errors::Result;
use crate::fees::fees_model::{
    FeeRule, FeeRuleOverride, FeeRuleOverrideUpsert, NewFeeRule, OverrideScope,
};
use async_trait::async_trait;

/// Trait for fee rule and override repository operations.
///
/// Overrides have a composite natural key of (scope, fee rule); the upsert
/// carries both standard and CAA fields and must be applied as one write.
#[async_trait]
pub trait FeeRuleRepositoryTrait: Send + Sync {
    fn get_fee_rules(&self) -> Result<Vec<FeeRule>>;
    fn get_fee_rule(&self, fee_rule_id: &str) -> Result<FeeRule>;
    fn get_fee_rule_by_code(&self, fee_code: &str) -> Result<Option<FeeRule>>;
    async fn create_fee_rule(&self, new_rule: NewFeeRule) -> Result<FeeRule>;
    async fn update_fee_rule(&self, rule: FeeRule) -> Result<FeeRule>;
    async fn delete_fee_rule(&self, fee_rule_id: &str) -> Result<usize>;

    fn get_overrides(&self) -> Result<Vec<FeeRuleOverride>>;
    fn get_overrides_for_rule(&self, fee_rule_id: &str) -> Result<Vec<FeeRuleOverride>>;
    async fn upsert_override(&self, upsert: FeeRuleOverrideUpsert) -> Result<FeeRuleOverride>;
    /// Deletes the override for (scope, rule), reverting to the inherited
    /// amount. Returns the number of rows removed.
    async fn delete_override(&self, scope: OverrideScope, fee_rule_id: &str) -> Result<usize>;
}

/// Trait for fee rule service operations
#[async_trait]
pub trait FeeRuleServiceTrait: Send + Sync {
    fn get_fee_rules(&self) -> Result<Vec<FeeRule>>;
    fn get_fee_rule(&self, fee_rule_id: &str) -> Result<FeeRule>;
    async fn create_fee_rule(&self, new_rule: NewFeeRule) -> Result<FeeRule>;
    async fn update_fee_rule(&self, rule: FeeRule) -> Result<FeeRule>;
    async fn delete_fee_rule(&self, fee_rule_id: &str) -> Result<usize>;

    fn get_overrides(&self) -> Result<Vec<FeeRuleOverride>>;
    async fn upsert_override(&self, upsert: FeeRuleOverrideUpsert) -> Result<FeeRuleOverride>;
    async fn delete_override(&self, scope: OverrideScope, fee_rule_id: &str) -> Result<usize>;
}
