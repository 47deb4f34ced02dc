use abi::{
    DateRange, DbConfig, Error, Reservation, ReservationDate, ReservationId, ReservationQuery,
    ReservationStatus,
};
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::RsvpStore;

const COLUMNS: &str = "id, user_id, item_id, start_date, end_date, status::text AS status";

/// Reservations in postgres. The `rsvp.reservations` table carries an
/// exclusion constraint on (user_id, item_id, days), so two concurrent
/// inserts for overlapping days cannot both land.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn from_config(config: &DbConfig) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url())
            .await?;
        info!(host = %config.host, db = %config.dbname, "connected to postgres");
        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), Error> {
        sqlx::migrate!("../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::DbError(sqlx::Error::Migrate(Box::new(e))))
    }
}

#[async_trait]
impl RsvpStore for PgStore {
    async fn insert(&self, rsvp: Reservation) -> Result<Reservation, Error> {
        let date = ReservationDate::from(rsvp.date);
        let sql = format!(
            "INSERT INTO rsvp.reservations (id, user_id, item_id, start_date, end_date, status) \
             VALUES ($1, $2, $3, $4, $5, $6::rsvp.reservation_status) RETURNING {COLUMNS}"
        );
        let rsvp: Reservation = sqlx::query_as(&sql)
            .bind(rsvp.id)
            .bind(&rsvp.user_id)
            .bind(&rsvp.item_id)
            .bind(date.start)
            .bind(date.end)
            .bind(rsvp.status.to_string())
            .fetch_one(&self.pool)
            .await?;
        Ok(rsvp)
    }

    async fn get(&self, id: ReservationId) -> Result<Reservation, Error> {
        let sql = format!("SELECT {COLUMNS} FROM rsvp.reservations WHERE id = $1");
        let rsvp: Reservation = sqlx::query_as(&sql).bind(id).fetch_one(&self.pool).await?;
        Ok(rsvp)
    }

    async fn update_date(&self, id: ReservationId, date: DateRange) -> Result<Reservation, Error> {
        let date = ReservationDate::from(date);
        let sql = format!(
            "UPDATE rsvp.reservations SET start_date = $1, end_date = $2, updated_at = now() \
             WHERE id = $3 RETURNING {COLUMNS}"
        );
        let rsvp: Reservation = sqlx::query_as(&sql)
            .bind(date.start)
            .bind(date.end)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(rsvp)
    }

    async fn update_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<Reservation, Error> {
        let sql = format!(
            "UPDATE rsvp.reservations SET status = $1::rsvp.reservation_status, updated_at = now() \
             WHERE id = $2 RETURNING {COLUMNS}"
        );
        let rsvp: Reservation = sqlx::query_as(&sql)
            .bind(status.to_string())
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(rsvp)
    }

    async fn delete(&self, id: ReservationId) -> Result<Reservation, Error> {
        let sql = format!("DELETE FROM rsvp.reservations WHERE id = $1 RETURNING {COLUMNS}");
        let rsvp: Reservation = sqlx::query_as(&sql).bind(id).fetch_one(&self.pool).await?;
        Ok(rsvp)
    }

    async fn query(&self, query: &ReservationQuery) -> Result<Vec<Reservation>, Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM rsvp.reservations \
             WHERE ($1::text IS NULL OR user_id = $1) \
             AND ($2::text IS NULL OR item_id = $2) \
             AND ($3::text IS NULL OR status::text = $3) \
             ORDER BY start_date, id"
        );
        let reservations: Vec<Reservation> = sqlx::query_as(&sql)
            .bind(query.user_id.as_deref())
            .bind(query.item_id.as_deref())
            .bind(query.status.map(|s| s.to_string()))
            .fetch_all(&self.pool)
            .await?;
        Ok(reservations)
    }
}
