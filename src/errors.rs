use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use chrono::NaiveDate;
use serde_json::json;
use thiserror::Error;

use crate::models::pricing::PricingConfigError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("failed to encode document: {0}")]
    Encoding(#[from] bson::ser::Error),
    #[error("{0} not found")]
    NotFound(String),
    /// A concurrent or existing reservation already holds one of the requested days.
    #[error("requested dates are no longer available")]
    Unavailable,
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("check-out ({check_out}) must be after check-in ({check_in})")]
    InvalidInterval {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
    #[error("stays are limited to {max} nights ({requested} requested)")]
    StayTooLong { requested: i64, max: u32 },
    #[error("at least one adult is required")]
    NoAdults,
    #[error("{kind} ({requested}) exceeds the cabin maximum of {max}")]
    OccupancyExceeded {
        kind: &'static str,
        requested: u32,
        max: u32,
    },
    #[error("invalid id '{0}'")]
    InvalidId(String),
    #[error("cabin {0} not found")]
    CabanaNotFound(String),
    #[error("reservation {0} not found")]
    ReservationNotFound(String),
    #[error("the cabin is not available for the requested dates")]
    Unavailable,
    #[error(transparent)]
    InvalidPricing(#[from] PricingConfigError),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for BookingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable => BookingError::Unavailable,
            StoreError::NotFound(what) => BookingError::ReservationNotFound(what),
            other => BookingError::Store(other),
        }
    }
}

impl ResponseError for BookingError {
    fn status_code(&self) -> StatusCode {
        match self {
            BookingError::InvalidInterval { .. }
            | BookingError::StayTooLong { .. }
            | BookingError::NoAdults
            | BookingError::OccupancyExceeded { .. }
            | BookingError::InvalidId(_)
            | BookingError::InvalidPricing(_) => StatusCode::BAD_REQUEST,
            BookingError::CabanaNotFound(_) | BookingError::ReservationNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            BookingError::Unavailable => StatusCode::CONFLICT,
            BookingError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            BookingError::Store(err) => {
                log::error!("Store failure: {}", err);
                "Internal storage error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value '{value}' for {name}")]
    Invalid { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(
            BookingError::InvalidInterval {
                check_in: date,
                check_out: date
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BookingError::StayTooLong {
                requested: 400,
                max: 365
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(BookingError::Unavailable.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            BookingError::CabanaNotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_store_conflict_maps_to_unavailable() {
        let err: BookingError = StoreError::Unavailable.into();
        assert!(matches!(err, BookingError::Unavailable));

        let err: BookingError = StoreError::NotFound("abc".into()).into();
        assert!(matches!(err, BookingError::ReservationNotFound(id) if id == "abc"));
    }
}
