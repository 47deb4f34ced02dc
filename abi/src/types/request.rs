use serde::{Deserialize, Serialize};

use crate::{ReservationDate, ReservationId};

/// The authenticated caller, as established by whatever sits in front of the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    #[serde(default)]
    pub admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveRequest {
    pub principal: Principal,
    pub item_id: String,
    pub date: ReservationDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeDateRequest {
    pub principal: Principal,
    pub id: ReservationId,
    pub date: ReservationDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeStatusRequest {
    pub principal: Principal,
    pub id: ReservationId,
    /// raw status field, parsed by the service
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelRequest {
    pub principal: Principal,
    pub id: ReservationId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRequest {
    pub principal: Principal,
    pub id: ReservationId,
}

/// Admins see every reservation, users only their own. `item_id` narrows
/// the result to one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub principal: Principal,
    #[serde(default)]
    pub item_id: Option<String>,
}

impl Principal {
    pub fn user(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            admin: false,
        }
    }

    pub fn admin(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            admin: true,
        }
    }
}

impl ReserveRequest {
    pub fn new(principal: Principal, item_id: impl Into<String>, date: ReservationDate) -> Self {
        Self {
            principal,
            item_id: item_id.into(),
            date,
        }
    }
}
