mod manager;
mod store;

use std::{fmt, sync::Arc};

use abi::{
    DateRange, Error, Reservation, ReservationDate, ReservationId, ReservationQuery,
    ReservationStatus,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use store::{MemoryStore, PgStore};

/// Source of the current time, injected so date checks are deterministic in tests.
pub type Clock = fn() -> DateTime<Utc>;

#[derive(Debug, Clone)]
pub struct ReservationManager {
    store: Arc<dyn RsvpStore>,
    clock: Clock,
}

#[async_trait]
pub trait Rsvp {
    /// make a pending reservation after checking its dates against the user's other reservations of the item
    async fn reserve(
        &self,
        user_id: &str,
        item_id: &str,
        date: ReservationDate,
    ) -> Result<Reservation, Error>;
    /// move a reservation to new dates, only its owner may do that
    async fn change_date(
        &self,
        id: ReservationId,
        user_id: &str,
        date: ReservationDate,
    ) -> Result<Reservation, Error>;
    /// set reservation status
    async fn change_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<Reservation, Error>;
    /// cancel (delete) a reservation, only its owner may do that
    async fn cancel(&self, id: ReservationId, user_id: &str) -> Result<Reservation, Error>;
    /// get a reservation by id
    async fn get(&self, id: ReservationId) -> Result<Reservation, Error>;
    /// query reservations, ordered by start day
    async fn query(&self, query: ReservationQuery) -> Result<Vec<Reservation>, Error>;
}

/// Persistence of reservations. Stores do not check dates themselves, except
/// for whatever constraint the backing database enforces.
#[async_trait]
pub trait RsvpStore: fmt::Debug + Send + Sync {
    async fn insert(&self, rsvp: Reservation) -> Result<Reservation, Error>;
    async fn get(&self, id: ReservationId) -> Result<Reservation, Error>;
    async fn update_date(&self, id: ReservationId, date: DateRange) -> Result<Reservation, Error>;
    async fn update_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<Reservation, Error>;
    async fn delete(&self, id: ReservationId) -> Result<Reservation, Error>;
    /// matching reservations ordered by start day, then id
    async fn query(&self, query: &ReservationQuery) -> Result<Vec<Reservation>, Error>;
}
