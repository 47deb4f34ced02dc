use std::collections::HashMap;

use abi::{DateRange, Error, Reservation, ReservationId, ReservationQuery, ReservationStatus};
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::RsvpStore;

/// Process-local store, nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    reservations: RwLock<HashMap<ReservationId, Reservation>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RsvpStore for MemoryStore {
    async fn insert(&self, rsvp: Reservation) -> Result<Reservation, Error> {
        self.reservations
            .write()
            .await
            .insert(rsvp.id, rsvp.clone());
        Ok(rsvp)
    }

    async fn get(&self, id: ReservationId) -> Result<Reservation, Error> {
        self.reservations
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    async fn update_date(&self, id: ReservationId, date: DateRange) -> Result<Reservation, Error> {
        let mut reservations = self.reservations.write().await;
        let rsvp = reservations.get_mut(&id).ok_or(Error::NotFound)?;
        rsvp.date = date;
        Ok(rsvp.clone())
    }

    async fn update_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<Reservation, Error> {
        let mut reservations = self.reservations.write().await;
        let rsvp = reservations.get_mut(&id).ok_or(Error::NotFound)?;
        rsvp.status = status;
        Ok(rsvp.clone())
    }

    async fn delete(&self, id: ReservationId) -> Result<Reservation, Error> {
        self.reservations
            .write()
            .await
            .remove(&id)
            .ok_or(Error::NotFound)
    }

    async fn query(&self, query: &ReservationQuery) -> Result<Vec<Reservation>, Error> {
        let mut found: Vec<_> = self
            .reservations
            .read()
            .await
            .values()
            .filter(|rsvp| query.matches(rsvp))
            .cloned()
            .collect();
        found.sort_by_key(|rsvp| (rsvp.date.first_day(), rsvp.id));
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abi::ReservationQueryBuilder;
    use chrono::NaiveDate;

    fn single(s: &str) -> DateRange {
        DateRange::SingleDay(s.parse::<NaiveDate>().unwrap())
    }

    #[tokio::test]
    async fn insert_then_get_should_return_same_reservation() {
        let store = MemoryStore::new();
        let rsvp = Reservation::new_pending("alice", "car-1", single("2025-01-10"));
        store.insert(rsvp.clone()).await.unwrap();
        assert_eq!(store.get(rsvp.id).await.unwrap(), rsvp);
    }

    #[tokio::test]
    async fn updates_should_change_stored_copy() {
        let store = MemoryStore::new();
        let rsvp = store
            .insert(Reservation::new_pending("alice", "car-1", single("2025-01-10")))
            .await
            .unwrap();

        store.update_date(rsvp.id, single("2025-01-11")).await.unwrap();
        store
            .update_status(rsvp.id, ReservationStatus::Ready)
            .await
            .unwrap();

        let stored = store.get(rsvp.id).await.unwrap();
        assert_eq!(stored.date, single("2025-01-11"));
        assert_eq!(stored.status, ReservationStatus::Ready);
    }

    #[tokio::test]
    async fn delete_should_remove_reservation() {
        let store = MemoryStore::new();
        let rsvp = store
            .insert(Reservation::new_pending("alice", "car-1", single("2025-01-10")))
            .await
            .unwrap();
        assert_eq!(store.delete(rsvp.id).await.unwrap(), rsvp);
        assert_eq!(store.delete(rsvp.id).await.unwrap_err(), Error::NotFound);
        assert_eq!(
            store.update_date(rsvp.id, single("2025-01-12")).await.unwrap_err(),
            Error::NotFound
        );
    }

    #[tokio::test]
    async fn query_should_filter_and_sort() {
        let store = MemoryStore::new();
        for (user, item, start) in [
            ("alice", "car-1", "2025-01-20"),
            ("alice", "car-2", "2025-01-15"),
            ("alice", "car-1", "2025-01-10"),
            ("bob", "car-1", "2025-01-05"),
        ] {
            store
                .insert(Reservation::new_pending(user, item, single(start)))
                .await
                .unwrap();
        }

        let query = ReservationQueryBuilder::default()
            .user_id("alice")
            .item_id("car-1")
            .build()
            .unwrap();
        let found = store.query(&query).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].date, single("2025-01-10"));
        assert_eq!(found[1].date, single("2025-01-20"));

        let all = store.query(&ReservationQuery::default()).await.unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].user_id, "bob");
    }
}
