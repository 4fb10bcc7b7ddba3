use std::sync::Arc;

use log::debug;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::Result;

use super::waivers_model::{NewWaiverTier, PriorityAssignment, WaiverError, WaiverTier};
use super::waivers_reorder::reorder;
use super::waivers_traits::{WaiverTierRepositoryTrait, WaiverTierServiceTrait};
use async_trait::async_trait;

pub struct WaiverTierService {
    waiver_repository: Arc<dyn WaiverTierRepositoryTrait>,
}

impl WaiverTierService {
    pub fn new(waiver_repository: Arc<dyn WaiverTierRepositoryTrait>) -> Self {
        WaiverTierService { waiver_repository }
    }

    fn validate_tier(
        name: &str,
        multiplier: &Decimal,
        fees_waived_codes: &[String],
    ) -> Result<()> {
        if *multiplier <= Decimal::ZERO {
            return Err(WaiverError::NonPositiveMultiplier(name.to_string()).into());
        }
        if fees_waived_codes.is_empty() {
            return Err(WaiverError::EmptyWaivedCodes(name.to_string()).into());
        }
        Ok(())
    }
}

#[async_trait]
impl WaiverTierServiceTrait for WaiverTierService {
    fn get_waiver_tiers(&self) -> Result<Vec<WaiverTier>> {
        self.waiver_repository.get_waiver_tiers()
    }

    fn get_waiver_tier(&self, tier_id: &str) -> Result<WaiverTier> {
        self.waiver_repository.get_waiver_tier(tier_id)
    }

    async fn create_waiver_tier(&self, new_tier: NewWaiverTier) -> Result<WaiverTier> {
        Self::validate_tier(
            &new_tier.name,
            &new_tier.fuel_uplift_multiplier,
            &new_tier.fees_waived_codes,
        )?;
        let mut new_tier = new_tier;
        if new_tier.id.is_none() {
            new_tier.id = Some(Uuid::new_v4().to_string());
        }
        self.waiver_repository.create_waiver_tier(new_tier).await
    }

    async fn update_waiver_tier(&self, tier: WaiverTier) -> Result<WaiverTier> {
        Self::validate_tier(&tier.name, &tier.fuel_uplift_multiplier, &tier.fees_waived_codes)?;
        self.waiver_repository.update_waiver_tier(tier).await
    }

    async fn delete_waiver_tier(&self, tier_id: &str) -> Result<usize> {
        self.waiver_repository.delete_waiver_tier(tier_id).await
    }

    async fn reorder_waiver_tiers(
        &self,
        new_order: Vec<String>,
    ) -> Result<Vec<PriorityAssignment>> {
        let tiers = self.waiver_repository.get_waiver_tiers()?;
        let assignments = reorder(&tiers, &new_order)?;
        debug!("Renumbering {} waiver tiers", assignments.len());
        self.waiver_repository
            .apply_priority_assignments(assignments.clone())
            .await?;
        Ok(assignments)
    }
}
