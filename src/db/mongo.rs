use async_trait::async_trait;
use chrono::NaiveDate;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    error::{ErrorKind, WriteFailure},
    options::{ClientOptions, FindOptions, IndexOptions, ServerApi, ServerApiVersion},
    Client, Collection, IndexModel,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use super::store::{CabanaFilter, ReservationStore};
use crate::errors::StoreError;
use crate::models::{
    cabana::Cabana,
    pricing::PricingConfig,
    reservation::{BookedInterval, Reservation, ReservationStatus, StayInterval},
};
use crate::services::availability_service::AvailabilityService;

const DUPLICATE_KEY: i32 = 11000;

pub async fn create_mongo_client(uri: &str) -> Result<Arc<Client>, mongodb::error::Error> {
    log::info!("Connecting to MongoDB");

    let mut client_options = ClientOptions::parse(uri).await?;

    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(10);
    client_options.min_pool_size = Some(1);

    // Stable API, MongoDB 5.0+
    let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
    client_options.server_api = Some(server_api);

    let client = Client::with_options(client_options)?;

    match client.database("admin").run_command(doc! {"ping": 1}).await {
        Ok(_) => log::info!("Successfully connected to MongoDB and verified with ping command"),
        Err(e) => {
            log::warn!("Connected to MongoDB but ping test failed: {}", e);
            log::warn!("The API may still work, but some functionality might be impaired");
        }
    }

    Ok(Arc::new(client))
}

/// One occupied calendar day. The unique `(cabanaId, fecha)` index is what makes
/// reservation writes conditional. `intento` identifies the call that wrote the claim, so a
/// failed attempt only rolls back its own rows.
#[derive(Debug, Serialize, Deserialize)]
struct NightClaim {
    #[serde(rename = "cabanaId")]
    cabana_id: ObjectId,
    #[serde(rename = "fecha")]
    date: NaiveDate,
    #[serde(rename = "reservaId")]
    reservation_id: ObjectId,
    #[serde(rename = "intento")]
    attempt: ObjectId,
}

pub struct MongoStore {
    client: Arc<Client>,
    database: String,
    cabanas: Collection<Cabana>,
    reservations: Collection<Reservation>,
    night_claims: Collection<NightClaim>,
}

impl MongoStore {
    pub fn new(client: Arc<Client>, database: &str) -> Self {
        let db = client.database(database);
        Self {
            cabanas: db.collection("cabanas"),
            reservations: db.collection("reservas"),
            night_claims: db.collection("noches_reservadas"),
            database: database.to_string(),
            client,
        }
    }

    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let unique_night = IndexModel::builder()
            .keys(doc! { "cabanaId": 1, "fecha": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.night_claims.create_index(unique_night).await?;

        let by_reservation = IndexModel::builder()
            .keys(doc! { "reservaId": 1 })
            .build();
        self.night_claims.create_index(by_reservation).await?;

        let by_attempt = IndexModel::builder().keys(doc! { "intento": 1 }).build();
        self.night_claims.create_index(by_attempt).await?;

        let by_cabana_status = IndexModel::builder()
            .keys(doc! { "cabanaId": 1, "status": 1 })
            .build();
        self.reservations.create_index(by_cabana_status).await?;

        Ok(())
    }

    /// Claim every day of `stay` and return the attempt id the claims were written under.
    /// On any failure only the claims made by this call are released.
    async fn claim_nights(
        &self,
        cabana_id: &ObjectId,
        reservation_id: &ObjectId,
        stay: &StayInterval,
    ) -> Result<ObjectId, StoreError> {
        let attempt = ObjectId::new();
        for date in AvailabilityService::expand_booked_dates(stay) {
            let claim = NightClaim {
                cabana_id: *cabana_id,
                date,
                reservation_id: *reservation_id,
                attempt,
            };
            if let Err(err) = self.night_claims.insert_one(&claim).await {
                self.release_attempt(&attempt).await?;
                if is_duplicate_key(&err) {
                    log::info!("Night {} of cabin {} already claimed", date, cabana_id);
                    return Err(StoreError::Unavailable);
                }
                return Err(err.into());
            }
        }
        Ok(attempt)
    }

    async fn release_attempt(&self, attempt: &ObjectId) -> Result<(), StoreError> {
        self.night_claims
            .delete_many(doc! { "intento": *attempt })
            .await?;
        Ok(())
    }

    /// Drop every claim held by a reservation, whichever call wrote it.
    async fn release_nights(&self, reservation_id: &ObjectId) -> Result<(), StoreError> {
        self.night_claims
            .delete_many(doc! { "reservaId": *reservation_id })
            .await?;
        Ok(())
    }

    /// Days currently claimed by a reservation, in calendar order.
    pub async fn claimed_nights(
        &self,
        reservation_id: &ObjectId,
    ) -> Result<Vec<NaiveDate>, StoreError> {
        let cursor = self
            .night_claims
            .find(doc! { "reservaId": *reservation_id })
            .sort(doc! { "fecha": 1 })
            .await?;
        let claims: Vec<NightClaim> = cursor.try_collect().await?;
        Ok(claims.into_iter().map(|claim| claim.date).collect())
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

fn blocking_filter(cabana_id: &ObjectId) -> Document {
    doc! {
        "cabanaId": *cabana_id,
        "status": { "$in": ReservationStatus::blocking_values().to_vec() },
    }
}

#[async_trait]
impl ReservationStore for MongoStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database(&self.database)
            .run_command(doc! {"ping": 1})
            .await?;
        Ok(())
    }

    async fn insert_cabana(&self, mut cabana: Cabana) -> Result<Cabana, StoreError> {
        let now = DateTime::now();
        cabana.created_at = Some(now);
        cabana.updated_at = Some(now);
        let result = self.cabanas.insert_one(&cabana).await?;
        cabana.id = result.inserted_id.as_object_id();
        Ok(cabana)
    }

    async fn list_cabanas(&self, filter: &CabanaFilter) -> Result<Vec<Cabana>, StoreError> {
        let mut options = FindOptions::default();
        if let Some(limit) = filter.limit {
            options.limit = Some(limit.into());
        }
        let query = match &filter.search {
            Some(search_text) if !search_text.is_empty() => {
                doc! {
                    "nombre": {
                        "$regex": format!("^{}", regex::escape(search_text)),
                        "$options": "i"
                    }
                }
            }
            _ => doc! {},
        };

        let cursor = self.cabanas.find(query).with_options(options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_cabana(&self, id: &ObjectId) -> Result<Option<Cabana>, StoreError> {
        Ok(self.cabanas.find_one(doc! { "_id": *id }).await?)
    }

    async fn update_pricing(
        &self,
        id: &ObjectId,
        pricing: &PricingConfig,
    ) -> Result<bool, StoreError> {
        let pricing = bson::to_bson(pricing)?;
        let result = self
            .cabanas
            .update_one(
                doc! { "_id": *id },
                doc! { "$set": { "precios": pricing, "updatedAt": DateTime::now() } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn blocking_bookings(
        &self,
        cabana_id: &ObjectId,
    ) -> Result<Vec<BookedInterval>, StoreError> {
        let booked: Collection<BookedInterval> = self.reservations.clone_with_type();
        let cursor = booked
            .find(blocking_filter(cabana_id))
            .projection(doc! { "checkIn": 1, "checkOut": 1, "status": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_reservation(&self, id: &ObjectId) -> Result<Option<Reservation>, StoreError> {
        Ok(self.reservations.find_one(doc! { "_id": *id }).await?)
    }

    async fn insert_if_available(
        &self,
        mut reservation: Reservation,
    ) -> Result<Reservation, StoreError> {
        let stay = reservation.stay();

        // Reservations written before night claims existed are only visible to this query.
        let existing = self.blocking_bookings(&reservation.cabana_id).await?;
        if AvailabilityService::has_overlap(&stay, &existing) {
            return Err(StoreError::Unavailable);
        }

        let id = ObjectId::new();
        reservation.id = Some(id);
        let attempt = if reservation.status.is_blocking() {
            Some(self.claim_nights(&reservation.cabana_id, &id, &stay).await?)
        } else {
            None
        };

        if let Err(err) = self.reservations.insert_one(&reservation).await {
            if let Some(attempt) = attempt {
                if let Err(release_err) = self.release_attempt(&attempt).await {
                    log::error!("Failed to release nights of {}: {}", id, release_err);
                }
            }
            return Err(err.into());
        }

        Ok(reservation)
    }

    async fn update_status(
        &self,
        id: &ObjectId,
        status: ReservationStatus,
    ) -> Result<Reservation, StoreError> {
        let mut reservation = self
            .find_reservation(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_hex()))?;

        if reservation.status == status {
            return Ok(reservation);
        }

        let stay = reservation.stay();
        let reactivating = !reservation.status.is_blocking() && status.is_blocking();
        let releasing = reservation.status.is_blocking() && !status.is_blocking();

        let mut attempt = None;
        if reactivating {
            let existing = self.blocking_bookings(&reservation.cabana_id).await?;
            if AvailabilityService::has_overlap(&stay, &existing) {
                return Err(StoreError::Unavailable);
            }
            attempt = Some(self.claim_nights(&reservation.cabana_id, id, &stay).await?);
        }
        // Released before the status write; restored below if that write fails.
        if releasing {
            self.release_nights(id).await?;
        }

        let now = DateTime::now();
        let update = self
            .reservations
            .update_one(
                doc! { "_id": *id },
                doc! { "$set": { "status": status.as_str(), "updatedAt": now } },
            )
            .await;
        if let Err(err) = update {
            if let Some(attempt) = attempt {
                self.release_attempt(&attempt).await?;
            }
            if releasing {
                if let Err(claim_err) = self.claim_nights(&reservation.cabana_id, id, &stay).await {
                    log::error!("Failed to restore nights of {}: {}", id, claim_err);
                }
            }
            return Err(err.into());
        }

        reservation.status = status;
        reservation.updated_at = Some(now);
        Ok(reservation)
    }
}
