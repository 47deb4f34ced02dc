use sqlx::postgres::PgDatabaseError;
use thiserror::Error;
mod rejection;
pub use rejection::RejectionReason;

#[derive(Error, Debug)]
pub enum Error {
    #[error("sqlx error: {0}")]
    DbError(sqlx::Error),

    #[error("Failed to read configuration file")]
    ConfigReadError,

    #[error("Failed to parse configuration file")]
    ConfigParseError,

    #[error("Invalid user id {0:?}")]
    InvalidUserId(String),

    #[error("Invalid item id {0:?}")]
    InvalidItemId(String),

    #[error("invalid status field: {0}")]
    InvalidStatus(String),

    #[error("{0}")]
    Rejection(#[from] RejectionReason),

    #[error("unauthorized access")]
    Unauthorized,

    #[error("No reservation found by the given condition")]
    NotFound,
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // sqlx::Error has no PartialEq, any two db errors compare equal
            (Self::DbError(_), Self::DbError(_)) => true,
            (Self::ConfigReadError, Self::ConfigReadError) => true,
            (Self::ConfigParseError, Self::ConfigParseError) => true,
            (Self::InvalidUserId(v1), Self::InvalidUserId(v2)) => v1 == v2,
            (Self::InvalidItemId(v1), Self::InvalidItemId(v2)) => v1 == v2,
            (Self::InvalidStatus(v1), Self::InvalidStatus(v2)) => v1 == v2,
            (Self::Rejection(v1), Self::Rejection(v2)) => v1 == v2,
            (Self::Unauthorized, Self::Unauthorized) => true,
            (Self::NotFound, Self::NotFound) => true,
            _ => false,
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(e) => {
                let conflict = e
                    .try_downcast_ref::<PgDatabaseError>()
                    .map(|err| {
                        matches!(
                            (err.code(), err.schema(), err.table()),
                            ("23P01", Some("rsvp"), Some("reservations"))
                        )
                    })
                    .unwrap_or(false);
                if conflict {
                    // exclusion constraint caught an overlap the check-then-insert missed
                    Error::Rejection(RejectionReason::DateConflict)
                } else {
                    Error::DbError(sqlx::Error::Database(e))
                }
            }
            sqlx::Error::RowNotFound => Error::NotFound,
            _ => Error::DbError(e),
        }
    }
}

// map reservation errors into caller-visible status codes
impl From<Error> for tonic::Status {
    fn from(e: Error) -> Self {
        match e {
            Error::DbError(e) => tonic::Status::internal(format!("Database error: {}", e)),
            Error::ConfigReadError => tonic::Status::internal("Failed to read configuration file"),
            Error::ConfigParseError => {
                tonic::Status::internal("Failed to parse configuration file")
            }
            Error::InvalidUserId(id) => {
                tonic::Status::invalid_argument(format!("Invalid user id: {:?}", id))
            }
            Error::InvalidItemId(id) => {
                tonic::Status::invalid_argument(format!("Invalid item id: {:?}", id))
            }
            Error::InvalidStatus(_) => tonic::Status::invalid_argument("invalid status field"),
            Error::Rejection(reason) => tonic::Status::invalid_argument(reason.to_string()),
            Error::Unauthorized => tonic::Status::permission_denied("unauthorized access"),
            Error::NotFound => tonic::Status::not_found("not found"),
        }
    }
}
