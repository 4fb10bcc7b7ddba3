//! Database models for waiver tiers.
//!
//! The waived fee codes travel as a JSON array in a TEXT column; the
//! multiplier is stored as TEXT like every other decimal.

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use flightline_core::waivers::{NewWaiverTier, WaiverTier};
use flightline_core::{Error, Result};

/// Database model for waiver tiers
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
#[diesel(table_name = crate::schema::waiver_tiers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct WaiverTierDB {
    pub id: String,
    pub name: String,
    pub fuel_uplift_multiplier: String,
    pub fees_waived_codes: String,
    pub tier_priority: i32,
    pub is_caa_specific_tier: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<WaiverTierDB> for WaiverTier {
    type Error = Error;

    fn try_from(db: WaiverTierDB) -> Result<Self> {
        let fees_waived_codes: Vec<String> = serde_json::from_str(&db.fees_waived_codes)?;
        Ok(WaiverTier {
            fuel_uplift_multiplier: Decimal::from_str(&db.fuel_uplift_multiplier)?,
            fees_waived_codes,
            id: db.id,
            name: db.name,
            tier_priority: db.tier_priority,
            is_caa_specific_tier: db.is_caa_specific_tier,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl WaiverTierDB {
    pub fn from_new(new_tier: NewWaiverTier, tier_id: String, now: NaiveDateTime) -> Result<Self> {
        Ok(WaiverTierDB {
            id: tier_id,
            name: new_tier.name,
            fuel_uplift_multiplier: new_tier.fuel_uplift_multiplier.to_string(),
            fees_waived_codes: serde_json::to_string(&new_tier.fees_waived_codes)?,
            tier_priority: new_tier.tier_priority,
            is_caa_specific_tier: new_tier.is_caa_specific_tier,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn from_domain(tier: WaiverTier) -> Result<Self> {
        Ok(WaiverTierDB {
            id: tier.id,
            name: tier.name,
            fuel_uplift_multiplier: tier.fuel_uplift_multiplier.to_string(),
            fees_waived_codes: serde_json::to_string(&tier.fees_waived_codes)?,
            tier_priority: tier.tier_priority,
            is_caa_specific_tier: tier.is_caa_specific_tier,
            created_at: tier.created_at,
            updated_at: tier.updated_at,
        })
    }
}
