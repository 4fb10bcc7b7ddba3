//! Aircraft configuration module - domain models, services, and traits.

mod aircraft_model;
mod aircraft_service;
mod aircraft_traits;

pub use aircraft_model::{AircraftContext, AircraftType, NewAircraftType};
pub use aircraft_service::AircraftService;
pub use aircraft_traits::{AircraftRepositoryTrait, AircraftServiceTrait};
