//! SQLite repository for waiver tiers.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use flightline_core::errors::DatabaseError;
use flightline_core::waivers::{
    NewWaiverTier, PriorityAssignment, WaiverTier, WaiverTierRepositoryTrait,
};
use flightline_core::{Error, Result};

use super::model::WaiverTierDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::waiver_tiers;

pub struct WaiverTierRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl WaiverTierRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        WaiverTierRepository { pool, writer }
    }
}

#[async_trait]
impl WaiverTierRepositoryTrait for WaiverTierRepository {
    fn get_waiver_tiers(&self) -> Result<Vec<WaiverTier>> {
        let mut conn = get_connection(&self.pool)?;
        // Highest priority first; creation order breaks ties, matching the
        // evaluator's first-match policy.
        let tiers_db = waiver_tiers::table
            .order((
                waiver_tiers::tier_priority.desc(),
                waiver_tiers::created_at.asc(),
                waiver_tiers::id.asc(),
            ))
            .load::<WaiverTierDB>(&mut conn)
            .map_err(StorageError::from)?;
        tiers_db.into_iter().map(WaiverTier::try_from).collect()
    }

    fn get_waiver_tier(&self, tier_id: &str) -> Result<WaiverTier> {
        let mut conn = get_connection(&self.pool)?;
        let tier_db = waiver_tiers::table
            .find(tier_id)
            .first::<WaiverTierDB>(&mut conn)
            .map_err(StorageError::from)?;
        WaiverTier::try_from(tier_db)
    }

    async fn create_waiver_tier(&self, new_tier: NewWaiverTier) -> Result<WaiverTier> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<WaiverTier> {
                let tier_id = new_tier
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let tier_db = WaiverTierDB::from_new(new_tier, tier_id, Utc::now().naive_utc())?;

                let result_db = diesel::insert_into(waiver_tiers::table)
                    .values(&tier_db)
                    .returning(WaiverTierDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                WaiverTier::try_from(result_db)
            })
            .await
    }

    async fn update_waiver_tier(&self, tier: WaiverTier) -> Result<WaiverTier> {
        let mut tier_db = WaiverTierDB::from_domain(tier)?;
        tier_db.updated_at = Utc::now().naive_utc();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<WaiverTier> {
                let result_db = diesel::update(waiver_tiers::table.find(tier_db.id.clone()))
                    .set(&tier_db)
                    .returning(WaiverTierDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                WaiverTier::try_from(result_db)
            })
            .await
    }

    async fn delete_waiver_tier(&self, tier_id: &str) -> Result<usize> {
        let tier_id = tier_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(waiver_tiers::table.find(tier_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn apply_priority_assignments(
        &self,
        assignments: Vec<PriorityAssignment>,
    ) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let now = Utc::now().naive_utc();
                let mut affected = 0;
                for assignment in &assignments {
                    let rows = diesel::update(waiver_tiers::table.find(&assignment.tier_id))
                        .set((
                            waiver_tiers::tier_priority.eq(assignment.new_priority),
                            waiver_tiers::updated_at.eq(now),
                        ))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                    if rows == 0 {
                        // Failing here rolls back the whole batch.
                        return Err(Error::Database(DatabaseError::NotFound(format!(
                            "Waiver tier not found during renumbering: {}",
                            assignment.tier_id
                        ))));
                    }
                    affected += rows;
                }
                Ok(affected)
            })
            .await
    }
}
