use actix_web::{error, web, HttpResponse};
use serde_json::json;

pub mod admin;
pub mod cabanas;
pub mod health;
pub mod reservations;
pub mod search;

fn json_error(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "error": message }))
}

/// Register every route. The caller provides the store, scorer and booking policy as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        error::InternalError::from_response(err, json_error(message)).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        error::InternalError::from_response(err, json_error(message)).into()
    }))
    .route("/health", web::get().to(health::health_check))
    .service(
        web::scope("/api")
            .service(
                web::scope("/cabanas")
                    .route("", web::get().to(cabanas::get_cabanas))
                    .route("/{id}", web::get().to(cabanas::get_by_id))
                    .route("/{id}/booked-dates", web::get().to(cabanas::booked_dates))
                    .route("/{id}/availability", web::get().to(cabanas::availability))
                    .route("/{id}/quote", web::post().to(cabanas::quote))
                    .route(
                        "/{id}/reservations",
                        web::post().to(reservations::create),
                    ),
            )
            .route("/reservations/{id}", web::get().to(reservations::get_by_id))
            .route("/search", web::post().to(search::search))
            .configure(admin::config),
    );
}
