use std::sync::Arc;

use log::debug;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::{Result, ValidationError};

use super::aircraft_model::{AircraftType, NewAircraftType};
use super::aircraft_traits::{AircraftRepositoryTrait, AircraftServiceTrait};
use async_trait::async_trait;

pub struct AircraftService {
    aircraft_repository: Arc<dyn AircraftRepositoryTrait>,
}

impl AircraftService {
    pub fn new(aircraft_repository: Arc<dyn AircraftRepositoryTrait>) -> Self {
        AircraftService {
            aircraft_repository,
        }
    }

    fn validate_min_fuel(min_fuel: &Option<Decimal>) -> Result<()> {
        // Zero is a valid configuration: it disables waivers for the type.
        if let Some(gallons) = min_fuel {
            if gallons.is_sign_negative() {
                return Err(
                    ValidationError::NegativeAmount("baseMinFuelGallonsForWaiver".to_string())
                        .into(),
                );
            }
        }
        Ok(())
    }
}

#[async_trait]
impl AircraftServiceTrait for AircraftService {
    fn get_aircraft_types(&self) -> Result<Vec<AircraftType>> {
        self.aircraft_repository.get_aircraft_types()
    }

    fn get_aircraft_type(&self, aircraft_type_id: &str) -> Result<AircraftType> {
        self.aircraft_repository.get_aircraft_type(aircraft_type_id)
    }

    async fn create_aircraft_type(&self, new_aircraft: NewAircraftType) -> Result<AircraftType> {
        Self::validate_min_fuel(&new_aircraft.base_min_fuel_gallons_for_waiver)?;
        if new_aircraft.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        let mut new_aircraft = new_aircraft;
        if new_aircraft.id.is_none() {
            new_aircraft.id = Some(Uuid::new_v4().to_string());
        }
        self.aircraft_repository
            .create_aircraft_type(new_aircraft)
            .await
    }

    async fn update_aircraft_type(&self, aircraft: AircraftType) -> Result<AircraftType> {
        Self::validate_min_fuel(&aircraft.base_min_fuel_gallons_for_waiver)?;
        self.aircraft_repository.update_aircraft_type(aircraft).await
    }

    async fn delete_aircraft_type(&self, aircraft_type_id: &str) -> Result<usize> {
        self.aircraft_repository
            .delete_aircraft_type(aircraft_type_id)
            .await
    }

    async fn set_classification_bulk(&self, mapping: Vec<(String, String)>) -> Result<usize> {
        if mapping.is_empty() {
            return Ok(0);
        }
        for (aircraft_type_id, classification_id) in &mapping {
            if aircraft_type_id.trim().is_empty() || classification_id.trim().is_empty() {
                return Err(ValidationError::InvalidInput(
                    "bulk classification mapping contains an empty id".to_string(),
                )
                .into());
            }
        }
        debug!(
            "Reassigning classification for {} aircraft types",
            mapping.len()
        );
        self.aircraft_repository
            .set_classification_bulk(mapping)
            .await
    }
}
