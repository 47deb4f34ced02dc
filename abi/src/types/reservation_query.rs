use derive_builder::Builder;

use crate::{Error, Reservation, ReservationStatus, Validator};

/// Filter for listing reservations. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct ReservationQuery {
    pub user_id: Option<String>,
    pub item_id: Option<String>,
    pub status: Option<ReservationStatus>,
}

impl ReservationQuery {
    pub fn matches(&self, rsvp: &Reservation) -> bool {
        self.user_id.as_deref().map_or(true, |id| rsvp.user_id == id)
            && self.item_id.as_deref().map_or(true, |id| rsvp.item_id == id)
            && self.status.map_or(true, |status| rsvp.status == status)
    }
}

impl Validator for ReservationQuery {
    fn validate(&self) -> Result<(), Error> {
        match (&self.user_id, &self.item_id) {
            (Some(id), _) if id.is_empty() => Err(Error::InvalidUserId(id.clone())),
            (_, Some(id)) if id.is_empty() => Err(Error::InvalidItemId(id.clone())),
            _ => Ok(()),
        }
    }
}
