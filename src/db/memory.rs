//! In-memory store for local development and tests

use async_trait::async_trait;
use dashmap::DashMap;
use mongodb::bson::{oid::ObjectId, DateTime};

use super::store::{CabanaFilter, ReservationStore};
use crate::errors::StoreError;
use crate::models::{
    cabana::Cabana,
    pricing::PricingConfig,
    reservation::{BookedInterval, Reservation, ReservationStatus, StayInterval},
};
use crate::services::availability_service::AvailabilityService;

pub struct InMemoryStore {
    cabanas: DashMap<ObjectId, Cabana>,
    reservations: DashMap<ObjectId, Reservation>,
    /// Blocking stays per cabin. Holding a cabin's entry serializes writes for that cabin.
    held: DashMap<ObjectId, Vec<(ObjectId, StayInterval)>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            cabanas: DashMap::new(),
            reservations: DashMap::new(),
            held: DashMap::new(),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReservationStore for InMemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert_cabana(&self, mut cabana: Cabana) -> Result<Cabana, StoreError> {
        let id = cabana.id.unwrap_or_else(ObjectId::new);
        let now = DateTime::now();
        cabana.id = Some(id);
        cabana.created_at = Some(now);
        cabana.updated_at = Some(now);
        self.cabanas.insert(id, cabana.clone());
        Ok(cabana)
    }

    async fn list_cabanas(&self, filter: &CabanaFilter) -> Result<Vec<Cabana>, StoreError> {
        let prefix = filter
            .search
            .as_ref()
            .filter(|search_text| !search_text.is_empty())
            .map(|search_text| search_text.to_lowercase());

        // ObjectIds grow with creation time, so this is insertion order.
        let mut cabanas: Vec<Cabana> = self
            .cabanas
            .iter()
            .filter(|entry| match &prefix {
                Some(prefix) => entry.value().name.to_lowercase().starts_with(prefix),
                None => true,
            })
            .map(|entry| entry.value().clone())
            .collect();
        cabanas.sort_by_key(|cabana| cabana.id);

        if let Some(limit) = filter.limit {
            cabanas.truncate(limit as usize);
        }
        Ok(cabanas)
    }

    async fn find_cabana(&self, id: &ObjectId) -> Result<Option<Cabana>, StoreError> {
        Ok(self.cabanas.get(id).map(|entry| entry.value().clone()))
    }

    async fn update_pricing(
        &self,
        id: &ObjectId,
        pricing: &PricingConfig,
    ) -> Result<bool, StoreError> {
        match self.cabanas.get_mut(id) {
            Some(mut cabana) => {
                cabana.pricing = Some(pricing.clone());
                cabana.updated_at = Some(DateTime::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn blocking_bookings(
        &self,
        cabana_id: &ObjectId,
    ) -> Result<Vec<BookedInterval>, StoreError> {
        Ok(self
            .reservations
            .iter()
            .filter(|entry| {
                entry.value().cabana_id == *cabana_id && entry.value().status.is_blocking()
            })
            .map(|entry| BookedInterval::from(entry.value()))
            .collect())
    }

    async fn find_reservation(&self, id: &ObjectId) -> Result<Option<Reservation>, StoreError> {
        Ok(self.reservations.get(id).map(|entry| entry.value().clone()))
    }

    async fn insert_if_available(
        &self,
        mut reservation: Reservation,
    ) -> Result<Reservation, StoreError> {
        let stay = reservation.stay();
        let mut held = self.held.entry(reservation.cabana_id).or_default();
        if held
            .iter()
            .any(|(_, other)| AvailabilityService::intervals_overlap(&stay, other))
        {
            return Err(StoreError::Unavailable);
        }

        let id = reservation.id.unwrap_or_else(ObjectId::new);
        reservation.id = Some(id);
        if reservation.status.is_blocking() {
            held.push((id, stay));
        }
        self.reservations.insert(id, reservation.clone());
        Ok(reservation)
    }

    async fn update_status(
        &self,
        id: &ObjectId,
        status: ReservationStatus,
    ) -> Result<Reservation, StoreError> {
        let cabana_id = self
            .reservations
            .get(id)
            .map(|entry| entry.value().cabana_id)
            .ok_or_else(|| StoreError::NotFound(id.to_hex()))?;

        let mut held = self.held.entry(cabana_id).or_default();
        let mut reservation = self
            .reservations
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_hex()))?;

        if reservation.status == status {
            return Ok(reservation.clone());
        }

        let stay = reservation.stay();
        if !reservation.status.is_blocking() && status.is_blocking() {
            if held
                .iter()
                .any(|(_, other)| AvailabilityService::intervals_overlap(&stay, other))
            {
                return Err(StoreError::Unavailable);
            }
            held.push((*id, stay));
        } else if !status.is_blocking() {
            held.retain(|(held_id, _)| held_id != id);
        }

        reservation.status = status;
        reservation.updated_at = Some(DateTime::now());
        Ok(reservation.clone())
    }
}
