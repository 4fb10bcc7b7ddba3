use crate::aircraft::aircraft_model::{AircraftType, NewAircraftType};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for aircraft configuration repository operations
#[async_trait]
pub trait AircraftRepositoryTrait: Send + Sync {
    fn get_aircraft_types(&self) -> Result<Vec<AircraftType>>;
    fn get_aircraft_type(&self, aircraft_type_id: &str) -> Result<AircraftType>;
    async fn create_aircraft_type(&self, new_aircraft: NewAircraftType) -> Result<AircraftType>;
    async fn update_aircraft_type(&self, aircraft: AircraftType) -> Result<AircraftType>;
    async fn delete_aircraft_type(&self, aircraft_type_id: &str) -> Result<usize>;
    /// Reassigns classifications for many aircraft types in one transaction.
    /// This is the call contract behind the bulk classification upload.
    async fn set_classification_bulk(&self, mapping: Vec<(String, String)>) -> Result<usize>;
}

/// Trait for aircraft configuration service operations
#[async_trait]
pub trait AircraftServiceTrait: Send + Sync {
    fn get_aircraft_types(&self) -> Result<Vec<AircraftType>>;
    fn get_aircraft_type(&self, aircraft_type_id: &str) -> Result<AircraftType>;
    async fn create_aircraft_type(&self, new_aircraft: NewAircraftType) -> Result<AircraftType>;
    async fn update_aircraft_type(&self, aircraft: AircraftType) -> Result<AircraftType>;
    async fn delete_aircraft_type(&self, aircraft_type_id: &str) -> Result<usize>;
    async fn set_classification_bulk(&self, mapping: Vec<(String, String)>) -> Result<usize>;
}
