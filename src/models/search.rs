use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::reservation::{Occupancy, StayInterval};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchRequest {
    #[serde(rename = "checkIn")]
    pub check_in: NaiveDate,
    #[serde(rename = "checkOut")]
    pub check_out: NaiveDate,
    #[serde(flatten)]
    pub occupancy: Occupancy,
    /// Upper bound on the whole stay's total, not per night.
    #[serde(rename = "presupuestoMaximo", default)]
    pub max_budget: Option<f64>,
}

impl SearchRequest {
    pub fn stay(&self) -> StayInterval {
        StayInterval::new(self.check_in, self.check_out)
    }
}
