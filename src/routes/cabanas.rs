use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::BookingPolicy;
use crate::db::store::{CabanaFilter, ReservationStore};
use crate::errors::BookingError;
use crate::models::reservation::QuoteRequest;
use crate::services::{
    availability_service::AvailabilityService, booking_service::BookingService,
};

#[derive(Deserialize)]
pub struct QueryParams {
    limit: Option<u16>,
    search: Option<String>,
}

#[derive(Deserialize)]
pub struct AvailabilityParams {
    #[serde(rename = "checkIn")]
    check_in: NaiveDate,
    #[serde(rename = "checkOut")]
    check_out: NaiveDate,
}

#[derive(Serialize)]
struct AvailabilityResponse {
    #[serde(rename = "disponible")]
    available: bool,
}

/*
    /api/cabanas
*/
pub async fn get_cabanas(
    store: web::Data<dyn ReservationStore>,
    params: web::Query<QueryParams>,
) -> Result<HttpResponse, BookingError> {
    let params = params.into_inner();
    let filter = CabanaFilter {
        search: params.search,
        limit: params.limit,
    };
    let cabanas = store.list_cabanas(&filter).await?;
    Ok(HttpResponse::Ok().json(cabanas))
}

/*
    /api/cabanas/{id}
*/
pub async fn get_by_id(
    store: web::Data<dyn ReservationStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, BookingError> {
    let id = BookingService::parse_id(&path.into_inner())?;
    let cabana = BookingService::load_cabana(store.get_ref(), &id).await?;
    Ok(HttpResponse::Ok().json(cabana))
}

/*
    /api/cabanas/{id}/booked-dates
*/
pub async fn booked_dates(
    store: web::Data<dyn ReservationStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, BookingError> {
    let id = BookingService::parse_id(&path.into_inner())?;
    BookingService::load_cabana(store.get_ref(), &id).await?;

    let booked = store.blocking_bookings(&id).await?;
    let dates: Vec<NaiveDate> = AvailabilityService::booked_dates(&booked)
        .into_iter()
        .collect();
    Ok(HttpResponse::Ok().json(dates))
}

/*
    /api/cabanas/{id}/availability?checkIn=YYYY-MM-DD&checkOut=YYYY-MM-DD
*/
pub async fn availability(
    store: web::Data<dyn ReservationStore>,
    policy: web::Data<BookingPolicy>,
    path: web::Path<String>,
    params: web::Query<AvailabilityParams>,
) -> Result<HttpResponse, BookingError> {
    let id = BookingService::parse_id(&path.into_inner())?;
    let stay = BookingService::validate_interval(params.check_in, params.check_out, &policy)?;
    BookingService::load_cabana(store.get_ref(), &id).await?;

    let available = BookingService::is_available(store.get_ref(), &id, &stay).await?;
    Ok(HttpResponse::Ok().json(AvailabilityResponse { available }))
}

/*
    /api/cabanas/{id}/quote
*/
pub async fn quote(
    store: web::Data<dyn ReservationStore>,
    policy: web::Data<BookingPolicy>,
    path: web::Path<String>,
    input: web::Json<QuoteRequest>,
) -> Result<HttpResponse, BookingError> {
    let id = BookingService::parse_id(&path.into_inner())?;
    let cabana = BookingService::load_cabana(store.get_ref(), &id).await?;
    let breakdown = BookingService::quote(&cabana, &input.into_inner(), &policy)?;
    Ok(HttpResponse::Ok().json(breakdown))
}
