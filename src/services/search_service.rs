use futures::future::try_join_all;

use crate::config::BookingPolicy;
use crate::db::store::{CabanaFilter, ReservationStore};
use crate::errors::{BookingError, StoreError};
use crate::models::{cabana::Cabana, search::SearchRequest};
use crate::services::{
    availability_service::AvailabilityService,
    booking_service::BookingService,
    pricing_service::PricingService,
    search_scoring::{Candidate, RecommendationScorer, ScoredCabana},
};

/// Rank every cabin that is free for the requested stay.
pub async fn search_cabanas(
    store: &dyn ReservationStore,
    scorer: &RecommendationScorer,
    policy: &BookingPolicy,
    request: &SearchRequest,
) -> Result<Vec<ScoredCabana>, BookingError> {
    let stay = BookingService::validate_interval(request.check_in, request.check_out, policy)?;
    if request.occupancy.adults < 1 {
        return Err(BookingError::NoAdults);
    }

    let cabanas = store.list_cabanas(&CabanaFilter::default()).await?;
    let lookups = cabanas.into_iter().map(|cabana| async move {
        let booked = match &cabana.id {
            Some(id) => store.blocking_bookings(id).await?,
            None => Vec::new(),
        };
        Ok::<(Cabana, bool), StoreError>((
            cabana,
            AvailabilityService::has_overlap(&stay, &booked),
        ))
    });
    let checked = try_join_all(lookups).await?;

    let candidates: Vec<Candidate> = checked
        .into_iter()
        .filter(|(_, taken)| !taken)
        .map(|(cabana, _)| {
            let breakdown = PricingService::build_breakdown(
                Some(stay),
                &cabana.pricing_config(),
                &request.occupancy,
            );
            Candidate {
                cabana,
                estimated_price: breakdown.total,
            }
        })
        .collect();

    log::info!(
        "Search {} .. {} for {} guests: {} free cabins",
        stay.check_in,
        stay.check_out,
        request.occupancy.total_guests(),
        candidates.len()
    );

    Ok(scorer.rank(
        candidates,
        request.occupancy.total_guests(),
        request.max_budget,
    ))
}
