use std::sync::Arc;

use log::debug;

use crate::aircraft::{AircraftContext, AircraftRepositoryTrait};
use crate::errors::{Result, ValidationError};
use crate::fees::{FeeRuleRepositoryTrait, OverrideIndex};
use crate::schedule::schedule_compiler::compile;
use crate::schedule::schedule_model::{ScheduleEntry, ScheduleMatrix, ScheduleRequest};
use crate::schedule::schedule_traits::ScheduleServiceTrait;
use crate::utils::LookupCache;
use crate::waivers::WaiverTierRepositoryTrait;
use async_trait::async_trait;

/// Compiles schedules against fresh repository snapshots and decorates rows
/// with cached aircraft display names.
pub struct ScheduleService {
    fee_repository: Arc<dyn FeeRuleRepositoryTrait>,
    waiver_repository: Arc<dyn WaiverTierRepositoryTrait>,
    aircraft_repository: Arc<dyn AircraftRepositoryTrait>,
    name_cache: Arc<LookupCache<String, String>>,
}

impl ScheduleService {
    pub fn new(
        fee_repository: Arc<dyn FeeRuleRepositoryTrait>,
        waiver_repository: Arc<dyn WaiverTierRepositoryTrait>,
        aircraft_repository: Arc<dyn AircraftRepositoryTrait>,
        name_cache: Arc<LookupCache<String, String>>,
    ) -> Self {
        ScheduleService {
            fee_repository,
            waiver_repository,
            aircraft_repository,
            name_cache,
        }
    }

    fn display_name(&self, aircraft_type_id: &str) -> Result<String> {
        let repository = self.aircraft_repository.clone();
        let key = aircraft_type_id.to_string();
        self.name_cache.get_or_load(&key, || {
            repository.get_aircraft_type(&key).map(|a| a.name)
        })
    }
}

#[async_trait]
impl ScheduleServiceTrait for ScheduleService {
    fn compile_schedule(&self, requests: &[ScheduleRequest]) -> Result<ScheduleMatrix> {
        // One snapshot per compile. Writes never mutate these in place; a
        // caller that just persisted a change calls compile again.
        let fee_rules = self.fee_repository.get_fee_rules()?;
        let index = OverrideIndex::from_overrides(self.fee_repository.get_overrides()?);
        let tiers = self.waiver_repository.get_waiver_tiers()?;

        let mut entries = Vec::with_capacity(requests.len());
        for request in requests {
            let aircraft = self
                .aircraft_repository
                .get_aircraft_type(&request.aircraft_type_id)
                .map_err(|_| {
                    ValidationError::InvalidInput(format!(
                        "Unknown aircraft type in schedule request: {}",
                        request.aircraft_type_id
                    ))
                })?;
            entries.push(ScheduleEntry {
                context: AircraftContext::from(&aircraft),
                fuel_uplift: request.fuel_uplift,
                is_caa_customer: request.is_caa_customer,
            });
        }

        debug!(
            "Compiling schedule: {} aircraft, {} rules, {} overrides, {} tiers",
            entries.len(),
            fee_rules.len(),
            index.len(),
            tiers.len()
        );

        let mut matrix = compile(&entries, &fee_rules, &index, &tiers)?;
        for row in &mut matrix.rows {
            row.aircraft_display_name = Some(self.display_name(&row.aircraft_type_id)?);
        }
        Ok(matrix)
    }
}
