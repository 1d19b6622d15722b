use actix_web::{web, HttpResponse};

use crate::config::BookingPolicy;
use crate::db::store::ReservationStore;
use crate::errors::BookingError;
use crate::models::search::SearchRequest;
use crate::services::{search_scoring::RecommendationScorer, search_service::search_cabanas};

/*
    /api/search
*/
pub async fn search(
    store: web::Data<dyn ReservationStore>,
    scorer: web::Data<RecommendationScorer>,
    policy: web::Data<BookingPolicy>,
    input: web::Json<SearchRequest>,
) -> Result<HttpResponse, BookingError> {
    let results = search_cabanas(
        store.get_ref(),
        scorer.get_ref(),
        policy.get_ref(),
        &input.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(results))
}
