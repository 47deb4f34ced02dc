use abi::{
    CancelRequest, ChangeDateRequest, ChangeStatusRequest, Config, Error, GetRequest, Principal,
    QueryRequest, Reservation, ReservationQuery, ReservationStatus, ReserveRequest,
};
use reservation::{ReservationManager, Rsvp};
use tonic::Status;

use crate::RsvpService;

impl RsvpService {
    pub fn new(manager: ReservationManager) -> Self {
        Self { manager }
    }

    pub async fn from_config(config: &Config) -> Result<Self, anyhow::Error> {
        Ok(Self {
            manager: ReservationManager::from_config(&config.db).await?,
        })
    }
}

impl RsvpService {
    /// make a reservation for the calling user
    pub async fn reserve(&self, request: ReserveRequest) -> Result<Reservation, Status> {
        let ReserveRequest {
            principal,
            item_id,
            date,
        } = request;
        require_user(&principal)?;
        let rsvp = self.manager.reserve(&principal.id, &item_id, date).await?;
        Ok(rsvp)
    }

    /// move a reservation to other dates, owner only
    pub async fn change_date(&self, request: ChangeDateRequest) -> Result<Reservation, Status> {
        require_user(&request.principal)?;
        let rsvp = self
            .manager
            .change_date(request.id, &request.principal.id, request.date)
            .await?;
        Ok(rsvp)
    }

    /// set the status of a reservation, admin only
    pub async fn change_status(&self, request: ChangeStatusRequest) -> Result<Reservation, Status> {
        if !request.principal.admin {
            return Err(Error::Unauthorized.into());
        }
        let status: ReservationStatus = request.status.parse()?;
        let rsvp = self.manager.change_status(request.id, status).await?;
        Ok(rsvp)
    }

    /// cancel a reservation, owner only
    pub async fn cancel(&self, request: CancelRequest) -> Result<Reservation, Status> {
        require_user(&request.principal)?;
        let rsvp = self
            .manager
            .cancel(request.id, &request.principal.id)
            .await?;
        Ok(rsvp)
    }

    /// get a reservation, visible to its owner and to admins
    pub async fn get(&self, request: GetRequest) -> Result<Reservation, Status> {
        let rsvp = self.manager.get(request.id).await?;
        if !request.principal.admin && !rsvp.is_owned_by(&request.principal.id) {
            return Err(Error::Unauthorized.into());
        }
        Ok(rsvp)
    }

    /// list reservations, optionally for one item
    pub async fn query(&self, request: QueryRequest) -> Result<Vec<Reservation>, Status> {
        let QueryRequest { principal, item_id } = request;
        let query = ReservationQuery {
            user_id: (!principal.admin).then_some(principal.id),
            item_id,
            status: None,
        };
        let reservations = self.manager.query(query).await?;
        Ok(reservations)
    }
}

/// reservations are made and edited by regular users, not admins
fn require_user(principal: &Principal) -> Result<(), Error> {
    if principal.admin {
        return Err(Error::Unauthorized);
    }
    Ok(())
}
