use chrono::{DateTime, Utc};

use crate::{DateRange, ExistingReservation, RejectionReason, ReservationDate, ReservationId};

/// Decide whether `candidate` may be reserved, given the same user's other
/// reservations for the same item.
///
/// Checks run in order and the first failure is returned: the end must not
/// precede the start, the start must not lie before the UTC calendar day of
/// `now`, and the candidate must not share a calendar day with any entry of
/// `existing`. An entry whose id equals `exclude` is skipped, so a
/// reservation being edited never conflicts with itself.
///
/// On success the normalized [`DateRange`] is returned.
pub fn validate(
    candidate: &ReservationDate,
    existing: &[ExistingReservation],
    now: DateTime<Utc>,
    exclude: Option<ReservationId>,
) -> Result<DateRange, RejectionReason> {
    let range = DateRange::try_from(candidate)?;

    if range.first_day() < now.date_naive() {
        return Err(RejectionReason::StartInPast);
    }

    let conflict = existing
        .iter()
        .filter(|e| Some(e.id) != exclude)
        .any(|e| range.overlaps(&e.date));
    if conflict {
        return Err(RejectionReason::DateConflict);
    }

    Ok(range)
}
