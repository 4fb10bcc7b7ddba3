//! Aircraft configuration domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-type aircraft configuration.
///
/// `base_min_fuel_gallons_for_waiver` is the fuel quantity corresponding to
/// a 1.0x uplift multiplier for this type. `None` (or zero) means no minimum
/// is configured, which disables fuel-uplift waivers for the type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AircraftType {
    pub id: String,
    pub name: String,
    pub classification_id: String,
    pub base_min_fuel_gallons_for_waiver: Option<Decimal>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new aircraft type.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewAircraftType {
    pub id: Option<String>,
    pub name: String,
    pub classification_id: String,
    pub base_min_fuel_gallons_for_waiver: Option<Decimal>,
}

/// The slice of aircraft configuration the resolution engine reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AircraftContext {
    pub aircraft_type_id: String,
    pub classification_id: String,
    pub base_min_fuel_gallons_for_waiver: Option<Decimal>,
}

impl From<&AircraftType> for AircraftContext {
    fn from(aircraft: &AircraftType) -> Self {
        Self {
            aircraft_type_id: aircraft.id.clone(),
            classification_id: aircraft.classification_id.clone(),
            base_min_fuel_gallons_for_waiver: aircraft.base_min_fuel_gallons_for_waiver,
        }
    }
}
