use thiserror::Error;

/// Why a candidate reservation date was refused. The display text is what
/// end users get to see.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    #[error("reservation end can't be before start")]
    EndBeforeStart,

    #[error("reservation start can't be in the past")]
    StartInPast,

    #[error("date already reserved")]
    DateConflict,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_messages_should_match_user_facing_text() {
        assert_eq!(
            RejectionReason::EndBeforeStart.to_string(),
            "reservation end can't be before start"
        );
        assert_eq!(
            RejectionReason::StartInPast.to_string(),
            "reservation start can't be in the past"
        );
        assert_eq!(
            RejectionReason::DateConflict.to_string(),
            "date already reserved"
        );
    }
}
