//! SQLite repository for fee rules and overrides.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use flightline_core::fees::{
    FeeRule, FeeRuleOverride, FeeRuleOverrideUpsert, FeeRuleRepositoryTrait, NewFeeRule,
    OverrideScope,
};
use flightline_core::Result;

use super::model::{FeeRuleDB, FeeRuleOverrideDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{fee_rule_overrides, fee_rules};

pub struct FeeRuleRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl FeeRuleRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        FeeRuleRepository { pool, writer }
    }
}

/// Deletes the single override row identified by (scope, rule), if present.
fn delete_scoped_override(
    conn: &mut SqliteConnection,
    scope: &OverrideScope,
    rule_id: &str,
) -> std::result::Result<usize, diesel::result::Error> {
    match scope {
        OverrideScope::Classification(classification) => diesel::delete(
            fee_rule_overrides::table
                .filter(fee_rule_overrides::fee_rule_id.eq(rule_id))
                .filter(fee_rule_overrides::classification_id.eq(classification))
                .filter(fee_rule_overrides::aircraft_type_id.is_null()),
        )
        .execute(conn),
        OverrideScope::AircraftType(aircraft_type) => diesel::delete(
            fee_rule_overrides::table
                .filter(fee_rule_overrides::fee_rule_id.eq(rule_id))
                .filter(fee_rule_overrides::aircraft_type_id.eq(aircraft_type))
                .filter(fee_rule_overrides::classification_id.is_null()),
        )
        .execute(conn),
    }
}

#[async_trait]
impl FeeRuleRepositoryTrait for FeeRuleRepository {
    fn get_fee_rules(&self) -> Result<Vec<FeeRule>> {
        let mut conn = get_connection(&self.pool)?;
        let rules_db = fee_rules::table
            .order(fee_rules::fee_code.asc())
            .load::<FeeRuleDB>(&mut conn)
            .map_err(StorageError::from)?;
        rules_db.into_iter().map(FeeRule::try_from).collect()
    }

    fn get_fee_rule(&self, fee_rule_id: &str) -> Result<FeeRule> {
        let mut conn = get_connection(&self.pool)?;
        let rule_db = fee_rules::table
            .find(fee_rule_id)
            .first::<FeeRuleDB>(&mut conn)
            .map_err(StorageError::from)?;
        FeeRule::try_from(rule_db)
    }

    fn get_fee_rule_by_code(&self, fee_code: &str) -> Result<Option<FeeRule>> {
        let mut conn = get_connection(&self.pool)?;
        let rule_db = fee_rules::table
            .filter(fee_rules::fee_code.eq(fee_code))
            .first::<FeeRuleDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        rule_db.map(FeeRule::try_from).transpose()
    }

    async fn create_fee_rule(&self, new_rule: NewFeeRule) -> Result<FeeRule> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<FeeRule> {
                let rule_id = new_rule
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let rule_db = FeeRuleDB::from_new(new_rule, rule_id, Utc::now().naive_utc());

                let result_db = diesel::insert_into(fee_rules::table)
                    .values(&rule_db)
                    .returning(FeeRuleDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                FeeRule::try_from(result_db)
            })
            .await
    }

    async fn update_fee_rule(&self, rule: FeeRule) -> Result<FeeRule> {
        let mut rule_db = FeeRuleDB::from(rule);
        rule_db.updated_at = Utc::now().naive_utc();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<FeeRule> {
                let result_db = diesel::update(fee_rules::table.find(rule_db.id.clone()))
                    .set(&rule_db)
                    .returning(FeeRuleDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                FeeRule::try_from(result_db)
            })
            .await
    }

    async fn delete_fee_rule(&self, fee_rule_id: &str) -> Result<usize> {
        let rule_id = fee_rule_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(fee_rules::table.find(rule_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn get_overrides(&self) -> Result<Vec<FeeRuleOverride>> {
        let mut conn = get_connection(&self.pool)?;
        let overrides_db = fee_rule_overrides::table
            .order(fee_rule_overrides::id.asc())
            .load::<FeeRuleOverrideDB>(&mut conn)
            .map_err(StorageError::from)?;
        overrides_db
            .into_iter()
            .map(FeeRuleOverride::try_from)
            .collect()
    }

    fn get_overrides_for_rule(&self, fee_rule_id: &str) -> Result<Vec<FeeRuleOverride>> {
        let mut conn = get_connection(&self.pool)?;
        let overrides_db = fee_rule_overrides::table
            .filter(fee_rule_overrides::fee_rule_id.eq(fee_rule_id))
            .order(fee_rule_overrides::id.asc())
            .load::<FeeRuleOverrideDB>(&mut conn)
            .map_err(StorageError::from)?;
        overrides_db
            .into_iter()
            .map(FeeRuleOverride::try_from)
            .collect()
    }

    async fn upsert_override(&self, upsert: FeeRuleOverrideUpsert) -> Result<FeeRuleOverride> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<FeeRuleOverride> {
                    // Replace-by-natural-key: the old row (if any) and the new
                    // one swap inside the actor's transaction.
                    delete_scoped_override(conn, &upsert.scope, &upsert.fee_rule_id)
                        .map_err(StorageError::from)?;

                    let override_db = FeeRuleOverrideDB::from_upsert(
                        upsert,
                        Uuid::new_v4().to_string(),
                        Utc::now().naive_utc(),
                    );
                    let result_db = diesel::insert_into(fee_rule_overrides::table)
                        .values(&override_db)
                        .returning(FeeRuleOverrideDB::as_returning())
                        .get_result(conn)
                        .map_err(StorageError::from)?;
                    FeeRuleOverride::try_from(result_db)
                },
            )
            .await
    }

    async fn delete_override(&self, scope: OverrideScope, fee_rule_id: &str) -> Result<usize> {
        let rule_id = fee_rule_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(delete_scoped_override(conn, &scope, &rule_id).map_err(StorageError::from)?)
            })
            .await
    }
}
