use crate::errors::Result;
use crate::schedule::schedule_model::{ScheduleMatrix, ScheduleRequest};
use async_trait::async_trait;

/// Trait for schedule compilation against the live stores.
///
/// Implementations fetch one consistent snapshot of rules, overrides, and
/// tiers per call. After any write the caller compiles again; there is no
/// incremental update path.
#[async_trait]
pub trait ScheduleServiceTrait: Send + Sync {
    fn compile_schedule(&self, requests: &[ScheduleRequest]) -> Result<ScheduleMatrix>;
}
