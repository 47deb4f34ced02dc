mod config;
mod error;
mod types;
mod validator;

pub use config::*;
pub use error::*;
pub use types::*;
pub use validator::validate;

use uuid::Uuid;

pub type ReservationId = Uuid;

/// validate the data structure, raise error if invalid
pub trait Validator {
    fn validate(&self) -> Result<(), Error>;
}
