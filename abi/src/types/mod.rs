use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::RejectionReason;

mod reservation;
mod reservation_query;
mod reservation_status;
mod request;

pub use reservation::{ExistingReservation, Reservation};
pub use reservation_query::{ReservationQuery, ReservationQueryBuilder};
pub use request::{
    CancelRequest, ChangeDateRequest, ChangeStatusRequest, GetRequest, Principal, QueryRequest,
    ReserveRequest,
};
pub use reservation_status::ReservationStatus;

/// Reservation dates as submitted by a caller. Days are UTC calendar days.
/// Nothing is checked yet, `end` may well precede `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDate {
    pub start: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

/// Days occupied by a reservation, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateRange {
    SingleDay(NaiveDate),
    /// `start <= end` always holds
    Range(NaiveDate, NaiveDate),
}

impl ReservationDate {
    pub fn single(start: NaiveDate) -> Self {
        Self { start, end: None }
    }

    pub fn range(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Result<Self, RejectionReason> {
        match end {
            None => Ok(Self::SingleDay(start)),
            Some(end) if end < start => Err(RejectionReason::EndBeforeStart),
            Some(end) => Ok(Self::Range(start, end)),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        match *self {
            Self::SingleDay(day) => day,
            Self::Range(start, _) => start,
        }
    }

    pub fn last_day(&self) -> NaiveDate {
        match *self {
            Self::SingleDay(day) => day,
            Self::Range(_, end) => end,
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        match *self {
            Self::SingleDay(d) => d == day,
            Self::Range(start, end) => start <= day && day <= end,
        }
    }

    /// Whether the two share at least one calendar day. Touching boundaries
    /// count as overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        match (*self, *other) {
            (Self::SingleDay(a), Self::SingleDay(b)) => a == b,
            (Self::SingleDay(day), range @ Self::Range(..))
            | (range @ Self::Range(..), Self::SingleDay(day)) => range.contains(day),
            (Self::Range(s1, e1), Self::Range(s2, e2)) => s1 <= e2 && s2 <= e1,
        }
    }

    /// number of calendar days occupied
    pub fn days(&self) -> i64 {
        (self.last_day() - self.first_day()).num_days() + 1
    }
}

impl TryFrom<&ReservationDate> for DateRange {
    type Error = RejectionReason;

    fn try_from(date: &ReservationDate) -> Result<Self, Self::Error> {
        Self::new(date.start, date.end)
    }
}

impl TryFrom<ReservationDate> for DateRange {
    type Error = RejectionReason;

    fn try_from(date: ReservationDate) -> Result<Self, Self::Error> {
        Self::new(date.start, date.end)
    }
}

impl From<DateRange> for ReservationDate {
    fn from(range: DateRange) -> Self {
        match range {
            DateRange::SingleDay(day) => Self::single(day),
            DateRange::Range(start, end) => Self::range(start, end),
        }
    }
}

impl Serialize for DateRange {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ReservationDate::from(*self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let date = ReservationDate::deserialize(deserializer)?;
        DateRange::try_from(date).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
pub(crate) fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}
