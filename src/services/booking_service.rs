use chrono::NaiveDate;
use mongodb::bson::{oid::ObjectId, DateTime};
use uuid::Uuid;

use crate::config::BookingPolicy;
use crate::db::store::ReservationStore;
use crate::errors::BookingError;
use crate::models::{
    cabana::Cabana,
    pricing::PricingConfig,
    reservation::{
        Occupancy, PriceBreakdown, QuoteRequest, Reservation, ReservationInput,
        ReservationStatus, StayInterval,
    },
};
use crate::services::{availability_service::AvailabilityService, pricing_service::PricingService};

pub struct BookingService;

impl BookingService {
    pub fn parse_id(raw: &str) -> Result<ObjectId, BookingError> {
        ObjectId::parse_str(raw).map_err(|_| BookingError::InvalidId(raw.to_string()))
    }

    pub fn validate_interval(
        check_in: NaiveDate,
        check_out: NaiveDate,
        policy: &BookingPolicy,
    ) -> Result<StayInterval, BookingError> {
        let stay = StayInterval::new(check_in, check_out);
        if !stay.is_valid() {
            return Err(BookingError::InvalidInterval {
                check_in,
                check_out,
            });
        }
        if stay.nights() > i64::from(policy.max_nights) {
            return Err(BookingError::StayTooLong {
                requested: stay.nights(),
                max: policy.max_nights,
            });
        }
        Ok(stay)
    }

    /// Reject parties the cabin cannot host. Both classes of minors count against
    /// `maxMenores`, and everyone counts against `maxPersonas`.
    pub fn validate_occupancy(cabana: &Cabana, occupancy: &Occupancy) -> Result<(), BookingError> {
        if occupancy.adults < 1 {
            return Err(BookingError::NoAdults);
        }

        if let Some(max) = cabana.max_adults {
            if occupancy.adults > max {
                return Err(BookingError::OccupancyExceeded {
                    kind: "adults",
                    requested: occupancy.adults,
                    max,
                });
            }
        }

        if let Some(max) = cabana.max_minors {
            let minors = occupancy.minors + occupancy.infants;
            if minors > max {
                return Err(BookingError::OccupancyExceeded {
                    kind: "minors",
                    requested: minors,
                    max,
                });
            }
        }

        let total = occupancy.total_guests();
        if total > cabana.max_guests {
            return Err(BookingError::OccupancyExceeded {
                kind: "guests",
                requested: total,
                max: cabana.max_guests,
            });
        }

        Ok(())
    }

    pub async fn load_cabana(
        store: &dyn ReservationStore,
        id: &ObjectId,
    ) -> Result<Cabana, BookingError> {
        store
            .find_cabana(id)
            .await?
            .ok_or_else(|| BookingError::CabanaNotFound(id.to_hex()))
    }

    /// Price a prospective stay. Until both dates are chosen the quote is empty.
    pub fn quote(
        cabana: &Cabana,
        request: &QuoteRequest,
        policy: &BookingPolicy,
    ) -> Result<PriceBreakdown, BookingError> {
        Self::validate_occupancy(cabana, &request.occupancy)?;

        let stay = match (request.check_in, request.check_out) {
            (Some(check_in), Some(check_out)) => {
                Some(Self::validate_interval(check_in, check_out, policy)?)
            }
            _ => None,
        };

        Ok(PricingService::build_breakdown(
            stay,
            &cabana.pricing_config(),
            &request.occupancy,
        ))
    }

    /// Whether `stay` is free for the cabin.
    pub async fn is_available(
        store: &dyn ReservationStore,
        cabana_id: &ObjectId,
        stay: &StayInterval,
    ) -> Result<bool, BookingError> {
        let booked = store.blocking_bookings(cabana_id).await?;
        Ok(!AvailabilityService::has_overlap(stay, &booked))
    }

    pub async fn create_reservation(
        store: &dyn ReservationStore,
        cabana_id: &ObjectId,
        input: ReservationInput,
        status: ReservationStatus,
        policy: &BookingPolicy,
    ) -> Result<Reservation, BookingError> {
        let cabana = Self::load_cabana(store, cabana_id).await?;
        let stay = Self::validate_interval(input.check_in, input.check_out, policy)?;
        Self::validate_occupancy(&cabana, &input.occupancy)?;

        if !Self::is_available(store, cabana_id, &stay).await? {
            log::info!(
                "Cabin {} unavailable for {} .. {}",
                cabana_id,
                stay.check_in,
                stay.check_out
            );
            return Err(BookingError::Unavailable);
        }

        let breakdown =
            PricingService::build_breakdown(Some(stay), &cabana.pricing_config(), &input.occupancy);
        let now = DateTime::now();
        let reservation = Reservation {
            id: None,
            cabana_id: *cabana_id,
            code: booking_code(),
            guest: input.guest,
            adults: input.occupancy.adults,
            minors: input.occupancy.minors,
            infants: input.occupancy.infants,
            check_in: stay.check_in,
            check_out: stay.check_out,
            nights: breakdown.nights,
            nightly_prices: breakdown.nightly,
            guest_surcharge_per_night: breakdown.guest_surcharge_per_night,
            total: breakdown.total,
            status,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let saved = store.insert_if_available(reservation).await?;
        log::info!(
            "Reservation {} ({}) created for cabin {}, total {}",
            saved.id.map(|id| id.to_hex()).unwrap_or_default(),
            saved.code,
            cabana_id,
            saved.total
        );
        Ok(saved)
    }

    pub async fn find_reservation(
        store: &dyn ReservationStore,
        id: &ObjectId,
    ) -> Result<Reservation, BookingError> {
        store
            .find_reservation(id)
            .await?
            .ok_or_else(|| BookingError::ReservationNotFound(id.to_hex()))
    }

    pub async fn update_status(
        store: &dyn ReservationStore,
        id: &ObjectId,
        status: ReservationStatus,
    ) -> Result<Reservation, BookingError> {
        let reservation = store.update_status(id, status).await?;
        log::info!("Reservation {} is now {}", id, status.as_str());
        Ok(reservation)
    }

    pub async fn update_pricing(
        store: &dyn ReservationStore,
        id: &ObjectId,
        pricing: PricingConfig,
    ) -> Result<Cabana, BookingError> {
        pricing.validate()?;
        if !store.update_pricing(id, &pricing).await? {
            return Err(BookingError::CabanaNotFound(id.to_hex()));
        }
        Self::load_cabana(store, id).await
    }
}

/// Short reference guests can quote when contacting the owner.
fn booking_code() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}
