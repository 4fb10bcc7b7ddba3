use crate::errors::Result;
use crate::waivers::waivers_model::{NewWaiverTier, PriorityAssignment, WaiverTier};
use async_trait::async_trait;

/// Trait for waiver tier repository operations
#[async_trait]
pub trait WaiverTierRepositoryTrait: Send + Sync {
    /// Returns the active tier set, highest priority first.
    fn get_waiver_tiers(&self) -> Result<Vec<WaiverTier>>;
    fn get_waiver_tier(&self, tier_id: &str) -> Result<WaiverTier>;
    async fn create_waiver_tier(&self, new_tier: NewWaiverTier) -> Result<WaiverTier>;
    async fn update_waiver_tier(&self, tier: WaiverTier) -> Result<WaiverTier>;
    async fn delete_waiver_tier(&self, tier_id: &str) -> Result<usize>;
    /// Applies a renumbering batch in one transaction. Either every
    /// assignment lands or none does.
    async fn apply_priority_assignments(
        &self,
        assignments: Vec<PriorityAssignment>,
    ) -> Result<usize>;
}

/// Trait for waiver tier service operations
#[async_trait]
pub trait WaiverTierServiceTrait: Send + Sync {
    fn get_waiver_tiers(&self) -> Result<Vec<WaiverTier>>;
    fn get_waiver_tier(&self, tier_id: &str) -> Result<WaiverTier>;
    async fn create_waiver_tier(&self, new_tier: NewWaiverTier) -> Result<WaiverTier>;
    async fn update_waiver_tier(&self, tier: WaiverTier) -> Result<WaiverTier>;
    async fn delete_waiver_tier(&self, tier_id: &str) -> Result<usize>;
    async fn reorder_waiver_tiers(&self, new_order: Vec<String>)
        -> Result<Vec<PriorityAssignment>>;
}
