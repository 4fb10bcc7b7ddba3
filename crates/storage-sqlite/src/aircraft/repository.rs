//! SQLite repository for aircraft configuration.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use flightline_core::aircraft::{AircraftRepositoryTrait, AircraftType, NewAircraftType};
use flightline_core::errors::DatabaseError;
use flightline_core::{Error, Result};

use super::model::AircraftTypeDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::aircraft_types;

pub struct AircraftRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AircraftRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        AircraftRepository { pool, writer }
    }
}

#[async_trait]
impl AircraftRepositoryTrait for AircraftRepository {
    fn get_aircraft_types(&self) -> Result<Vec<AircraftType>> {
        let mut conn = get_connection(&self.pool)?;
        let types_db = aircraft_types::table
            .order(aircraft_types::name.asc())
            .load::<AircraftTypeDB>(&mut conn)
            .map_err(StorageError::from)?;
        types_db.into_iter().map(AircraftType::try_from).collect()
    }

    fn get_aircraft_type(&self, aircraft_type_id: &str) -> Result<AircraftType> {
        let mut conn = get_connection(&self.pool)?;
        let type_db = aircraft_types::table
            .find(aircraft_type_id)
            .first::<AircraftTypeDB>(&mut conn)
            .map_err(StorageError::from)?;
        AircraftType::try_from(type_db)
    }

    async fn create_aircraft_type(&self, new_aircraft: NewAircraftType) -> Result<AircraftType> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<AircraftType> {
                let type_id = new_aircraft
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let type_db =
                    AircraftTypeDB::from_new(new_aircraft, type_id, Utc::now().naive_utc());

                let result_db = diesel::insert_into(aircraft_types::table)
                    .values(&type_db)
                    .returning(AircraftTypeDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                AircraftType::try_from(result_db)
            })
            .await
    }

    async fn update_aircraft_type(&self, aircraft: AircraftType) -> Result<AircraftType> {
        let mut type_db = AircraftTypeDB::from(aircraft);
        type_db.updated_at = Utc::now().naive_utc();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<AircraftType> {
                let result_db = diesel::update(aircraft_types::table.find(type_db.id.clone()))
                    .set(&type_db)
                    .returning(AircraftTypeDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                AircraftType::try_from(result_db)
            })
            .await
    }

    async fn delete_aircraft_type(&self, aircraft_type_id: &str) -> Result<usize> {
        let type_id = aircraft_type_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(aircraft_types::table.find(type_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn set_classification_bulk(&self, mapping: Vec<(String, String)>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let now = Utc::now().naive_utc();
                let mut affected = 0;
                for (type_id, classification) in &mapping {
                    let rows = diesel::update(aircraft_types::table.find(type_id))
                        .set((
                            aircraft_types::classification_id.eq(classification),
                            aircraft_types::updated_at.eq(now),
                        ))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                    if rows == 0 {
                        // Unknown id aborts and rolls back the whole upload.
                        return Err(Error::Database(DatabaseError::NotFound(format!(
                            "Aircraft type not found during bulk reclassification: {}",
                            type_id
                        ))));
                    }
                    affected += rows;
                }
                Ok(affected)
            })
            .await
    }
}
