use actix_web::{web, HttpResponse};

use crate::config::BookingPolicy;
use crate::db::store::ReservationStore;
use crate::errors::BookingError;
use crate::models::reservation::{ReservationInput, ReservationStatus};
use crate::services::booking_service::BookingService;

/*
    /api/cabanas/{id}/reservations
*/
pub async fn create(
    store: web::Data<dyn ReservationStore>,
    policy: web::Data<BookingPolicy>,
    path: web::Path<String>,
    input: web::Json<ReservationInput>,
) -> Result<HttpResponse, BookingError> {
    let cabana_id = BookingService::parse_id(&path.into_inner())?;
    let reservation = BookingService::create_reservation(
        store.get_ref(),
        &cabana_id,
        input.into_inner(),
        ReservationStatus::Pending,
        &policy,
    )
    .await?;
    Ok(HttpResponse::Created().json(reservation))
}

/*
    /api/reservations/{id}
*/
pub async fn get_by_id(
    store: web::Data<dyn ReservationStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, BookingError> {
    let id = BookingService::parse_id(&path.into_inner())?;
    let reservation = BookingService::find_reservation(store.get_ref(), &id).await?;
    Ok(HttpResponse::Ok().json(reservation))
}
