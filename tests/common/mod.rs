use actix_web::{web, App};
use chrono::NaiveDate;
use std::sync::Arc;

use cabanas_api::{
    config::BookingPolicy,
    db::{memory::InMemoryStore, store::ReservationStore},
    models::{
        cabana::{Amenities, Cabana},
        pricing::{PricingConfig, SeasonRule},
    },
    routes,
    services::search_scoring::{RecommendationScorer, RecommendationWeights},
};

pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub policy: BookingPolicy,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryStore::new()),
            policy: BookingPolicy::default(),
        }
    }

    pub fn with_policy(policy: BookingPolicy) -> Self {
        Self {
            policy,
            ..Self::new()
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let store: Arc<dyn ReservationStore> = self.store.clone();
        App::new()
            .app_data(web::Data::from(store))
            .app_data(web::Data::new(RecommendationScorer::with_weights(
                RecommendationWeights::default(),
            )))
            .app_data(web::Data::new(self.policy))
            .configure(routes::configure)
    }

    /// Seed a cabin and return its hex id.
    pub async fn add_cabana(&self, cabana: Cabana) -> String {
        self.store
            .insert_cabana(cabana)
            .await
            .expect("insert cabana")
            .id
            .expect("cabana id")
            .to_hex()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Six guests, base 100, +20 per extra adult, +10 per minor, summer at x1.5.
pub fn lake_cabin() -> Cabana {
    let mut cabana = Cabana::new("Cabaña del Lago", 6);
    cabana.max_adults = Some(4);
    cabana.max_minors = Some(4);
    cabana.amenities = Amenities {
        pool: true,
        grill: true,
        wifi: false,
    };
    cabana.pricing = Some(PricingConfig {
        base: 100.0,
        extra_adult: 20.0,
        extra_minor: 10.0,
        extra_infant: 0.0,
        seasons: vec![SeasonRule::DateRange {
            name: "Verano".to_string(),
            multiplier: 1.5,
            start: date(2024, 1, 1),
            end: date(2024, 2, 29),
        }],
    });
    cabana
}

pub fn forest_cabin() -> Cabana {
    let mut cabana = Cabana::new("Cabaña del Bosque", 4);
    cabana.featured = true;
    cabana.amenities.wifi = true;
    cabana.pricing = Some(PricingConfig {
        base: 180.0,
        ..Default::default()
    });
    cabana
}
