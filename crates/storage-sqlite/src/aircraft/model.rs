//! Database models for aircraft configuration.

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use flightline_core::aircraft::{AircraftType, NewAircraftType};
use flightline_core::{Error, Result};

/// Database model for aircraft types
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::aircraft_types)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct AircraftTypeDB {
    pub id: String,
    pub name: String,
    pub classification_id: String,
    pub base_min_fuel_gallons_for_waiver: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<AircraftTypeDB> for AircraftType {
    type Error = Error;

    fn try_from(db: AircraftTypeDB) -> Result<Self> {
        let base_min_fuel_gallons_for_waiver = db
            .base_min_fuel_gallons_for_waiver
            .as_deref()
            .map(Decimal::from_str)
            .transpose()?;
        Ok(AircraftType {
            base_min_fuel_gallons_for_waiver,
            id: db.id,
            name: db.name,
            classification_id: db.classification_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl AircraftTypeDB {
    pub fn from_new(new_aircraft: NewAircraftType, type_id: String, now: NaiveDateTime) -> Self {
        AircraftTypeDB {
            id: type_id,
            name: new_aircraft.name,
            classification_id: new_aircraft.classification_id,
            base_min_fuel_gallons_for_waiver: new_aircraft
                .base_min_fuel_gallons_for_waiver
                .map(|g| g.to_string()),
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<AircraftType> for AircraftTypeDB {
    fn from(aircraft: AircraftType) -> Self {
        AircraftTypeDB {
            id: aircraft.id,
            name: aircraft.name,
            classification_id: aircraft.classification_id,
            base_min_fuel_gallons_for_waiver: aircraft
                .base_min_fuel_gallons_for_waiver
                .map(|g| g.to_string()),
            created_at: aircraft.created_at,
            updated_at: aircraft.updated_at,
        }
    }
}
