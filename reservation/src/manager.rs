use std::sync::Arc;

use abi::{
    DbConfig, Error, ExistingReservation, Reservation, ReservationDate, ReservationId,
    ReservationQuery, ReservationQueryBuilder, ReservationStatus, Validator,
};
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::{Clock, PgStore, ReservationManager, Rsvp, RsvpStore};

#[async_trait]
impl Rsvp for ReservationManager {
    async fn reserve(
        &self,
        user_id: &str,
        item_id: &str,
        date: ReservationDate,
    ) -> Result<Reservation, Error> {
        if user_id.is_empty() {
            return Err(Error::InvalidUserId(user_id.to_string()));
        }
        if item_id.is_empty() {
            return Err(Error::InvalidItemId(item_id.to_string()));
        }

        let existing = self.existing_for(user_id, item_id).await?;
        let range = abi::validate(&date, &existing, (self.clock)(), None).map_err(|reason| {
            warn!(user_id, item_id, ?date, %reason, "reservation rejected");
            reason
        })?;

        let rsvp = self
            .store
            .insert(Reservation::new_pending(user_id, item_id, range))
            .await?;
        info!(
            id = %rsvp.id,
            user_id,
            item_id,
            ?range,
            days = range.days(),
            "reservation created"
        );
        Ok(rsvp)
    }

    async fn change_date(
        &self,
        id: ReservationId,
        user_id: &str,
        date: ReservationDate,
    ) -> Result<Reservation, Error> {
        let rsvp = self.store.get(id).await?;
        if !rsvp.is_owned_by(user_id) {
            return Err(Error::Unauthorized);
        }

        let existing = self.existing_for(&rsvp.user_id, &rsvp.item_id).await?;
        let range = abi::validate(&date, &existing, (self.clock)(), Some(id)).map_err(|reason| {
            warn!(%id, ?date, %reason, "reservation date change rejected");
            reason
        })?;

        let rsvp = self.store.update_date(id, range).await?;
        info!(%id, ?range, days = range.days(), "reservation date changed");
        Ok(rsvp)
    }

    async fn change_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<Reservation, Error> {
        let rsvp = self.store.update_status(id, status).await?;
        info!(%id, %status, "reservation status changed");
        Ok(rsvp)
    }

    async fn cancel(&self, id: ReservationId, user_id: &str) -> Result<Reservation, Error> {
        let rsvp = self.store.get(id).await?;
        if !rsvp.is_owned_by(user_id) {
            return Err(Error::Unauthorized);
        }
        let rsvp = self.store.delete(id).await?;
        info!(%id, "reservation cancelled");
        Ok(rsvp)
    }

    async fn get(&self, id: ReservationId) -> Result<Reservation, Error> {
        self.store.get(id).await
    }

    async fn query(&self, query: ReservationQuery) -> Result<Vec<Reservation>, Error> {
        query.validate()?;
        self.store.query(&query).await
    }
}

impl ReservationManager {
    pub fn new(store: impl RsvpStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
            clock: Utc::now,
        }
    }

    /// connect to postgres and bring the schema up to date
    pub async fn from_config(config: &DbConfig) -> Result<Self, Error> {
        let store = PgStore::from_config(config).await?;
        store.migrate().await?;
        Ok(Self::new(store))
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// snapshot of the user's reservations for the item, as the date validator sees them
    async fn existing_for(
        &self,
        user_id: &str,
        item_id: &str,
    ) -> Result<Vec<ExistingReservation>, Error> {
        let query = ReservationQueryBuilder::default()
            .user_id(user_id)
            .item_id(item_id)
            .build()
            .map_err(|_| Error::InvalidUserId(user_id.to_string()))?;
        let existing: Vec<_> = self
            .store
            .query(&query)
            .await?
            .iter()
            .map(ExistingReservation::from)
            .collect();
        debug!(user_id, item_id, count = existing.len(), "loaded existing reservations");
        Ok(existing)
    }
}
