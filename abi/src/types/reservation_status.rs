use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
    Ready,
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReservationStatus::Pending => write!(f, "pending"),
            ReservationStatus::Accepted => write!(f, "accepted"),
            ReservationStatus::Rejected => write!(f, "rejected"),
            ReservationStatus::Ready => write!(f, "ready"),
        }
    }
}

impl FromStr for ReservationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReservationStatus::Pending),
            "accepted" => Ok(ReservationStatus::Accepted),
            "rejected" => Ok(ReservationStatus::Rejected),
            "ready" => Ok(ReservationStatus::Ready),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_should_parse_its_own_display() {
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::Accepted,
            ReservationStatus::Rejected,
            ReservationStatus::Ready,
        ] {
            assert_eq!(status.to_string().parse::<ReservationStatus>(), Ok(status));
        }
    }

    #[test]
    fn unknown_status_should_be_rejected() {
        assert_eq!(
            "Accepted".parse::<ReservationStatus>(),
            Err(Error::InvalidStatus("Accepted".to_string()))
        );
    }

    #[test]
    fn default_status_is_pending() {
        assert_eq!(ReservationStatus::default(), ReservationStatus::Pending);
    }
}
