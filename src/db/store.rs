//! Document store seam used by the booking workflow and the search pipeline.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::errors::StoreError;
use crate::models::{
    cabana::Cabana,
    pricing::PricingConfig,
    reservation::{BookedInterval, Reservation, ReservationStatus},
};

#[derive(Debug, Clone, Default)]
pub struct CabanaFilter {
    /// Case-insensitive prefix of the cabin name
    pub search: Option<String>,
    pub limit: Option<u16>,
}

#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;

    // Cabins
    async fn insert_cabana(&self, cabana: Cabana) -> Result<Cabana, StoreError>;
    async fn list_cabanas(&self, filter: &CabanaFilter) -> Result<Vec<Cabana>, StoreError>;
    async fn find_cabana(&self, id: &ObjectId) -> Result<Option<Cabana>, StoreError>;
    /// Replace a cabin's pricing. Returns `false` when the cabin does not exist.
    async fn update_pricing(&self, id: &ObjectId, pricing: &PricingConfig)
        -> Result<bool, StoreError>;

    // Reservations
    /// Pending and confirmed reservations of one cabin.
    async fn blocking_bookings(&self, cabana_id: &ObjectId)
        -> Result<Vec<BookedInterval>, StoreError>;
    async fn find_reservation(&self, id: &ObjectId) -> Result<Option<Reservation>, StoreError>;
    /// Persist `reservation` only if no blocking reservation of the same cabin overlaps it.
    /// Check and write are atomic with respect to other calls on the same store; losing a
    /// race yields `StoreError::Unavailable`.
    async fn insert_if_available(&self, reservation: Reservation)
        -> Result<Reservation, StoreError>;
    /// Change a reservation's status. Moving a cancelled reservation back to a blocking
    /// status re-checks availability under the same guarantee as `insert_if_available`.
    async fn update_status(
        &self,
        id: &ObjectId,
        status: ReservationStatus,
    ) -> Result<Reservation, StoreError>;
}
