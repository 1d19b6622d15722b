use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::pricing::{SeasonRule, BASE_SEASON, DEFAULT_BASE_PRICE};

/// Price of one night before any per-guest surcharge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonEvaluation {
    pub price: f64,
    pub season: String,
    pub is_special_season: bool,
}

impl SeasonEvaluation {
    fn base(price: f64) -> Self {
        Self {
            price,
            season: BASE_SEASON.to_string(),
            is_special_season: false,
        }
    }
}

pub struct SeasonService;

impl SeasonService {
    /// Resolve the nightly price for `date`.
    ///
    /// Rules are walked in stored order. The first date-range rule containing the date sets
    /// the price and ends the walk, even if weekday rules follow it. Weekday rules never end
    /// the walk and only ever raise the current price, so overlapping weekday rules resolve to
    /// the highest multiplier. A missing base falls back to the default nightly price.
    pub fn evaluate(date: NaiveDate, rules: &[SeasonRule], base: Option<f64>) -> SeasonEvaluation {
        let Some(base) = base else {
            return SeasonEvaluation::base(DEFAULT_BASE_PRICE);
        };

        let mut result = SeasonEvaluation::base(base);
        let weekday = date.weekday().num_days_from_sunday() as u8;

        for rule in rules {
            match rule {
                SeasonRule::DateRange {
                    name,
                    multiplier,
                    start,
                    end,
                } => {
                    if *start <= date && date <= *end {
                        result.price = base * multiplier;
                        result.season = name.clone();
                        result.is_special_season = true;
                        break;
                    }
                }
                SeasonRule::Weekday {
                    name,
                    multiplier,
                    weekdays,
                } => {
                    if weekdays.contains(&weekday) {
                        let candidate = base * multiplier;
                        if candidate > result.price {
                            result.price = candidate;
                            result.season = name.clone();
                            result.is_special_season = true;
                        }
                    }
                }
            }
        }

        result.price = result.price.round();
        result
    }
}
