use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Nightly price used when a cabin has no pricing configuration at all.
pub const DEFAULT_BASE_PRICE: f64 = 100.0;

/// Label reported for nights where no season rule applied.
pub const BASE_SEASON: &str = "Base";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub base: f64,
    #[serde(rename = "adicionalAdulto", default)]
    pub extra_adult: f64,
    #[serde(rename = "adicionalMenor", default)]
    pub extra_minor: f64,
    #[serde(rename = "adicionalMenor3", default)]
    pub extra_infant: f64,
    #[serde(rename = "temporadas", default)]
    pub seasons: Vec<SeasonRule>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE_PRICE,
            extra_adult: 0.0,
            extra_minor: 0.0,
            extra_infant: 0.0,
            seasons: Vec::new(),
        }
    }
}

/// The single fallback configuration for cabins that were never priced.
pub fn default_pricing_config() -> PricingConfig {
    PricingConfig::default()
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingConfigError {
    #[error("base price must be a non-negative number, got {0}")]
    NegativeBase(f64),
    #[error("surcharge '{field}' must be a non-negative number, got {value}")]
    NegativeSurcharge { field: &'static str, value: f64 },
    #[error("season '{name}' has multiplier {multiplier}, must be at least 1")]
    MultiplierBelowOne { name: String, multiplier: f64 },
    #[error("season '{name}' ends ({end}) before it starts ({start})")]
    InvertedRange {
        name: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error("season '{name}' has no weekdays")]
    NoWeekdays { name: String },
    #[error("season '{name}' has weekday {day} outside 0..=6")]
    WeekdayOutOfRange { name: String, day: u8 },
}

impl PricingConfig {
    /// Check the invariants an administrator must respect when saving prices.
    pub fn validate(&self) -> Result<(), PricingConfigError> {
        if !(self.base >= 0.0) {
            return Err(PricingConfigError::NegativeBase(self.base));
        }

        for (field, value) in [
            ("adicionalAdulto", self.extra_adult),
            ("adicionalMenor", self.extra_minor),
            ("adicionalMenor3", self.extra_infant),
        ] {
            if !(value >= 0.0) {
                return Err(PricingConfigError::NegativeSurcharge { field, value });
            }
        }

        self.seasons.iter().try_for_each(SeasonRule::validate)
    }
}

/// A pricing modifier for specific calendar dates.
///
/// Stored documents carry a `tipo` discriminator: `"fechas"` for an explicit date range and
/// `"dias"` for recurring weekdays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo")]
pub enum SeasonRule {
    #[serde(rename = "fechas")]
    DateRange {
        #[serde(rename = "nombre")]
        name: String,
        #[serde(rename = "multiplicador")]
        multiplier: f64,
        #[serde(rename = "fechaInicio")]
        start: NaiveDate,
        #[serde(rename = "fechaFin")]
        end: NaiveDate,
    },
    #[serde(rename = "dias")]
    Weekday {
        #[serde(rename = "nombre")]
        name: String,
        #[serde(rename = "multiplicador")]
        multiplier: f64,
        /// 0 = Sunday .. 6 = Saturday
        #[serde(rename = "diasSemana")]
        weekdays: Vec<u8>,
    },
}

impl SeasonRule {
    pub fn name(&self) -> &str {
        match self {
            SeasonRule::DateRange { name, .. } | SeasonRule::Weekday { name, .. } => name,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            SeasonRule::DateRange { multiplier, .. } | SeasonRule::Weekday { multiplier, .. } => {
                *multiplier
            }
        }
    }

    fn validate(&self) -> Result<(), PricingConfigError> {
        let multiplier = self.multiplier();
        if !(multiplier >= 1.0) {
            return Err(PricingConfigError::MultiplierBelowOne {
                name: self.name().to_string(),
                multiplier,
            });
        }

        match self {
            SeasonRule::DateRange {
                name, start, end, ..
            } => {
                if start > end {
                    return Err(PricingConfigError::InvertedRange {
                        name: name.clone(),
                        start: *start,
                        end: *end,
                    });
                }
            }
            SeasonRule::Weekday { name, weekdays, .. } => {
                if weekdays.is_empty() {
                    return Err(PricingConfigError::NoWeekdays { name: name.clone() });
                }
                if let Some(day) = weekdays.iter().find(|day| **day > 6) {
                    return Err(PricingConfigError::WeekdayOutOfRange {
                        name: name.clone(),
                        day: *day,
                    });
                }
            }
        }

        Ok(())
    }
}
