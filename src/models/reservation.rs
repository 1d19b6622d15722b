use chrono::NaiveDate;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// Head count for a stay. The base price already covers two adults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    #[serde(rename = "adultos")]
    pub adults: u32,
    #[serde(rename = "menores", default)]
    pub minors: u32,
    /// Children under three.
    #[serde(rename = "menores3", default)]
    pub infants: u32,
}

impl Occupancy {
    pub const INCLUDED_ADULTS: u32 = 2;

    pub fn new(adults: u32, minors: u32, infants: u32) -> Self {
        Self {
            adults,
            minors,
            infants,
        }
    }

    pub fn total_guests(&self) -> u32 {
        self.adults + self.minors + self.infants
    }

    pub fn extra_adults(&self) -> u32 {
        self.adults.saturating_sub(Self::INCLUDED_ADULTS)
    }
}

impl Default for Occupancy {
    fn default() -> Self {
        Self::new(Self::INCLUDED_ADULTS, 0, 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayInterval {
    #[serde(rename = "checkIn")]
    pub check_in: NaiveDate,
    #[serde(rename = "checkOut")]
    pub check_out: NaiveDate,
}

impl StayInterval {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            check_in,
            check_out,
        }
    }

    /// Number of nights; zero or negative when the interval is inverted.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    pub fn is_valid(&self) -> bool {
        self.check_out > self.check_in
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    /// Pending and confirmed reservations hold their dates; cancelled ones release them.
    pub fn is_blocking(&self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Confirmed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    pub fn blocking_values() -> [&'static str; 2] {
        [
            ReservationStatus::Pending.as_str(),
            ReservationStatus::Confirmed.as_str(),
        ]
    }
}

/// An existing reservation's dates as seen by the availability checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedInterval {
    #[serde(rename = "checkIn")]
    pub check_in: NaiveDate,
    #[serde(rename = "checkOut")]
    pub check_out: NaiveDate,
    pub status: ReservationStatus,
}

impl BookedInterval {
    pub fn interval(&self) -> StayInterval {
        StayInterval::new(self.check_in, self.check_out)
    }
}

impl From<&Reservation> for BookedInterval {
    fn from(reservation: &Reservation) -> Self {
        Self {
            check_in: reservation.check_in,
            check_out: reservation.check_out,
            status: reservation.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NightlyPrice {
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "precioBase")]
    pub base_price: f64,
    #[serde(rename = "precioTotal")]
    pub total_price: f64,
    #[serde(rename = "temporada")]
    pub season: String,
    #[serde(rename = "esTemporadaEspecial")]
    pub is_special_season: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub total: f64,
    #[serde(rename = "noches")]
    pub nights: u32,
    #[serde(rename = "desglose")]
    pub nightly: Vec<NightlyPrice>,
    #[serde(rename = "adicionalPersonasPorNoche")]
    pub guest_surcharge_per_night: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Persisted reservation snapshot. The breakdown is copied in at creation time and never
/// recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "cabanaId")]
    pub cabana_id: ObjectId,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "huesped")]
    pub guest: Guest,
    #[serde(rename = "adultos")]
    pub adults: u32,
    #[serde(rename = "menores")]
    pub minors: u32,
    #[serde(rename = "menores3")]
    pub infants: u32,
    #[serde(rename = "checkIn")]
    pub check_in: NaiveDate,
    #[serde(rename = "checkOut")]
    pub check_out: NaiveDate,
    #[serde(rename = "noches")]
    pub nights: u32,
    #[serde(rename = "desglosePrecios")]
    pub nightly_prices: Vec<NightlyPrice>,
    #[serde(rename = "adicionalPersonasPorNoche")]
    pub guest_surcharge_per_night: f64,
    pub total: f64,
    pub status: ReservationStatus,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

impl Reservation {
    pub fn occupancy(&self) -> Occupancy {
        Occupancy::new(self.adults, self.minors, self.infants)
    }

    pub fn stay(&self) -> StayInterval {
        StayInterval::new(self.check_in, self.check_out)
    }
}

/// Body of a guest reservation request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReservationInput {
    #[serde(rename = "huesped")]
    pub guest: Guest,
    #[serde(rename = "checkIn")]
    pub check_in: NaiveDate,
    #[serde(rename = "checkOut")]
    pub check_out: NaiveDate,
    #[serde(flatten)]
    pub occupancy: Occupancy,
}

/// Body of an administrative reservation request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminReservationInput {
    #[serde(rename = "cabanaId")]
    pub cabana_id: String,
    #[serde(flatten)]
    pub reservation: ReservationInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatusUpdate {
    pub status: ReservationStatus,
}

/// Body of a price quote request. Dates may be missing while a guest is still picking them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuoteRequest {
    #[serde(rename = "checkIn", default)]
    pub check_in: Option<NaiveDate>,
    #[serde(rename = "checkOut", default)]
    pub check_out: Option<NaiveDate>,
    #[serde(flatten)]
    pub occupancy: Occupancy,
}
