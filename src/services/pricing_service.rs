use chrono::{Days, NaiveDate};

use crate::models::{
    pricing::PricingConfig,
    reservation::{NightlyPrice, Occupancy, PriceBreakdown, StayInterval},
};
use crate::services::season_service::SeasonService;

pub struct PricingService;

impl PricingService {
    /// Flat per-night surcharge for guests beyond the two adults the base price covers.
    /// It depends only on the head count, so it is the same for every night of a stay.
    pub fn guest_surcharge(config: &PricingConfig, occupancy: &Occupancy) -> f64 {
        occupancy.extra_adults() as f64 * config.extra_adult
            + occupancy.minors as f64 * config.extra_minor
            + occupancy.infants as f64 * config.extra_infant
    }

    /// Price of a single night including the guest surcharge.
    pub fn price_for_night(date: NaiveDate, config: &PricingConfig, occupancy: &Occupancy) -> f64 {
        let season = SeasonService::evaluate(date, &config.seasons, Some(config.base));
        season.price + Self::guest_surcharge(config, occupancy)
    }

    /// Itemize every night of `stay` and total it.
    ///
    /// Missing dates produce an empty breakdown rather than an error, and an inverted
    /// interval prices zero nights. Validation of the interval is the caller's job.
    pub fn build_breakdown(
        stay: Option<StayInterval>,
        config: &PricingConfig,
        occupancy: &Occupancy,
    ) -> PriceBreakdown {
        let Some(stay) = stay else {
            return PriceBreakdown::default();
        };

        let surcharge = Self::guest_surcharge(config, occupancy);
        let nights = stay.nights().max(0) as u32;

        let mut nightly = Vec::with_capacity(nights as usize);
        let mut total = 0.0;
        for offset in 0..nights {
            let Some(date) = stay.check_in.checked_add_days(Days::new(offset as u64)) else {
                break;
            };
            let season = SeasonService::evaluate(date, &config.seasons, Some(config.base));
            let total_price = season.price + surcharge;
            total += total_price;
            nightly.push(NightlyPrice {
                date,
                base_price: season.price,
                total_price,
                season: season.season,
                is_special_season: season.is_special_season,
            });
        }

        PriceBreakdown {
            total,
            nights: nightly.len() as u32,
            nightly,
            guest_surcharge_per_night: surcharge,
        }
    }
}
