use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};
use uuid::Uuid;

use crate::{DateRange, ReservationId, ReservationStatus};

/// A reservation of one item by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub user_id: String,
    pub item_id: String,
    pub date: DateRange,
    pub status: ReservationStatus,
}

/// What the date validator needs to know about an already stored reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExistingReservation {
    pub id: ReservationId,
    pub date: DateRange,
}

impl Reservation {
    pub fn new_pending(uid: impl Into<String>, iid: impl Into<String>, date: DateRange) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: uid.into(),
            item_id: iid.into(),
            date,
            status: ReservationStatus::Pending,
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

impl From<&Reservation> for ExistingReservation {
    fn from(rsvp: &Reservation) -> Self {
        Self {
            id: rsvp.id,
            date: rsvp.date,
        }
    }
}

impl FromRow<'_, PgRow> for Reservation {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let start: NaiveDate = row.try_get("start_date")?;
        let end: Option<NaiveDate> = row.try_get("end_date")?;
        let date = DateRange::new(start, end).map_err(|e| sqlx::Error::ColumnDecode {
            index: "end_date".to_string(),
            source: Box::new(e),
        })?;

        let status: String = row.try_get("status")?;
        let status = status
            .parse::<ReservationStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            item_id: row.try_get("item_id")?,
            date,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::day;

    #[test]
    fn new_pending_should_start_pending_with_fresh_id() {
        let date = DateRange::SingleDay(day("2025-01-10"));
        let r1 = Reservation::new_pending("alice", "car-1", date);
        let r2 = Reservation::new_pending("alice", "car-1", date);
        assert_eq!(r1.status, ReservationStatus::Pending);
        assert_ne!(r1.id, r2.id);
        assert!(r1.is_owned_by("alice"));
        assert!(!r1.is_owned_by("bob"));
    }

    #[test]
    fn existing_reservation_should_keep_id_and_dates() {
        let rsvp = Reservation::new_pending(
            "alice",
            "car-1",
            DateRange::Range(day("2025-01-10"), day("2025-01-15")),
        );
        let existing = ExistingReservation::from(&rsvp);
        assert_eq!(existing.id, rsvp.id);
        assert_eq!(existing.date, rsvp.date);
    }
}
