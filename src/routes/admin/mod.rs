//! Administrative endpoints. Access control for this scope is enforced in front of the
//! service, not here.

use actix_web::{web, HttpResponse};

use crate::config::BookingPolicy;
use crate::db::store::ReservationStore;
use crate::errors::BookingError;
use crate::models::{
    pricing::PricingConfig,
    reservation::{AdminReservationInput, ReservationStatus, StatusUpdate},
};
use crate::services::booking_service::BookingService;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/reservations", web::post().to(create_reservation))
            .route("/reservations/{id}/status", web::put().to(update_status))
            .route("/cabanas/{id}/pricing", web::put().to(update_pricing)),
    );
}

/*
    /api/admin/reservations
*/
pub async fn create_reservation(
    store: web::Data<dyn ReservationStore>,
    policy: web::Data<BookingPolicy>,
    input: web::Json<AdminReservationInput>,
) -> Result<HttpResponse, BookingError> {
    let input = input.into_inner();
    let cabana_id = BookingService::parse_id(&input.cabana_id)?;
    let reservation = BookingService::create_reservation(
        store.get_ref(),
        &cabana_id,
        input.reservation,
        input.status.unwrap_or(ReservationStatus::Confirmed),
        &policy,
    )
    .await?;
    Ok(HttpResponse::Created().json(reservation))
}

/*
    /api/admin/reservations/{id}/status
*/
pub async fn update_status(
    store: web::Data<dyn ReservationStore>,
    path: web::Path<String>,
    input: web::Json<StatusUpdate>,
) -> Result<HttpResponse, BookingError> {
    let id = BookingService::parse_id(&path.into_inner())?;
    let reservation = BookingService::update_status(store.get_ref(), &id, input.status).await?;
    Ok(HttpResponse::Ok().json(reservation))
}

/*
    /api/admin/cabanas/{id}/pricing
*/
pub async fn update_pricing(
    store: web::Data<dyn ReservationStore>,
    path: web::Path<String>,
    input: web::Json<PricingConfig>,
) -> Result<HttpResponse, BookingError> {
    let id = BookingService::parse_id(&path.into_inner())?;
    let cabana = BookingService::update_pricing(store.get_ref(), &id, input.into_inner()).await?;
    Ok(HttpResponse::Ok().json(cabana))
}
