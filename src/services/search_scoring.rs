use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::cabana::Cabana;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationWeights {
    /// Capacity-to-party ratio at or above which a cabin counts as roomy
    pub roomy_ratio: f64,
    /// Capacity-to-party ratio at or above which a cabin counts as comfortable
    pub comfortable_ratio: f64,
    pub roomy_points: f64,
    pub comfortable_points: f64,
    pub tight_points: f64,
    /// Points for a stay that costs nothing against the guest's budget
    pub budget_weight: f64,
    /// Nightly base price tiers used when no budget is given
    pub cheap_base_limit: f64,
    pub moderate_base_limit: f64,
    pub cheap_points: f64,
    pub moderate_points: f64,
    pub expensive_points: f64,
    pub featured_bonus: f64,
    pub pool_bonus: f64,
    pub grill_bonus: f64,
    pub wifi_bonus: f64,
}

impl Default for RecommendationWeights {
    fn default() -> Self {
        Self {
            roomy_ratio: 1.5,
            comfortable_ratio: 1.2,
            roomy_points: 30.0,
            comfortable_points: 20.0,
            tight_points: 10.0,
            budget_weight: 40.0,
            cheap_base_limit: 150.0,
            moderate_base_limit: 200.0,
            cheap_points: 30.0,
            moderate_points: 20.0,
            expensive_points: 10.0,
            featured_bonus: 20.0,
            pool_bonus: 15.0,
            grill_bonus: 10.0,
            wifi_bonus: 5.0,
        }
    }
}

fn env_or(name: &str, default: f64) -> f64 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl RecommendationWeights {
    /// Create weights from environment variables or use defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            roomy_ratio: env_or("RECOMMEND_ROOMY_RATIO", defaults.roomy_ratio),
            comfortable_ratio: env_or("RECOMMEND_COMFORTABLE_RATIO", defaults.comfortable_ratio),
            roomy_points: env_or("RECOMMEND_ROOMY_POINTS", defaults.roomy_points),
            comfortable_points: env_or(
                "RECOMMEND_COMFORTABLE_POINTS",
                defaults.comfortable_points,
            ),
            tight_points: env_or("RECOMMEND_TIGHT_POINTS", defaults.tight_points),
            budget_weight: env_or("RECOMMEND_BUDGET_WEIGHT", defaults.budget_weight),
            cheap_base_limit: env_or("RECOMMEND_CHEAP_BASE_LIMIT", defaults.cheap_base_limit),
            moderate_base_limit: env_or(
                "RECOMMEND_MODERATE_BASE_LIMIT",
                defaults.moderate_base_limit,
            ),
            cheap_points: env_or("RECOMMEND_CHEAP_POINTS", defaults.cheap_points),
            moderate_points: env_or("RECOMMEND_MODERATE_POINTS", defaults.moderate_points),
            expensive_points: env_or("RECOMMEND_EXPENSIVE_POINTS", defaults.expensive_points),
            featured_bonus: env_or("RECOMMEND_FEATURED_BONUS", defaults.featured_bonus),
            pool_bonus: env_or("RECOMMEND_POOL_BONUS", defaults.pool_bonus),
            grill_bonus: env_or("RECOMMEND_GRILL_BONUS", defaults.grill_bonus),
            wifi_bonus: env_or("RECOMMEND_WIFI_BONUS", defaults.wifi_bonus),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub capacity_score: f64,
    pub price_score: f64,
    pub featured_score: f64,
    pub amenity_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredCabana {
    pub cabana: Cabana,
    #[serde(rename = "precioEstimado")]
    pub estimated_price: f64,
    pub total_score: f64,
    pub score_breakdown: ScoreBreakdown,
}

/// A cabin that passed the availability check, with its quoted stay total.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub cabana: Cabana,
    pub estimated_price: f64,
}

#[derive(Default)]
pub struct RecommendationScorer {
    pub weights: RecommendationWeights,
}

impl RecommendationScorer {
    pub fn new() -> Self {
        let weights = RecommendationWeights::from_env();
        log::info!("RecommendationScorer initialized with weights: {:?}", weights);
        Self { weights }
    }

    pub fn with_weights(weights: RecommendationWeights) -> Self {
        Self { weights }
    }

    /// Score one cabin for a party. Higher is better; only the ordering is meaningful.
    pub fn score(
        &self,
        cabana: &Cabana,
        estimated_price: f64,
        total_guests: u32,
        max_budget: Option<f64>,
    ) -> f64 {
        Self::total(&self.breakdown(cabana, estimated_price, total_guests, max_budget))
    }

    pub fn breakdown(
        &self,
        cabana: &Cabana,
        estimated_price: f64,
        total_guests: u32,
        max_budget: Option<f64>,
    ) -> ScoreBreakdown {
        ScoreBreakdown {
            capacity_score: self.score_capacity(cabana, total_guests),
            price_score: self.score_price(cabana, estimated_price, max_budget),
            featured_score: if cabana.featured {
                self.weights.featured_bonus
            } else {
                0.0
            },
            amenity_score: self.score_amenities(cabana),
        }
    }

    pub fn total(breakdown: &ScoreBreakdown) -> f64 {
        breakdown.capacity_score
            + breakdown.price_score
            + breakdown.featured_score
            + breakdown.amenity_score
    }

    /// Drop cabins that are too small or over budget, score the rest and order them best
    /// first. Equal scores keep their input order.
    pub fn rank(
        &self,
        candidates: Vec<Candidate>,
        total_guests: u32,
        max_budget: Option<f64>,
    ) -> Vec<ScoredCabana> {
        let mut scored: Vec<ScoredCabana> = candidates
            .into_iter()
            .filter(|candidate| candidate.cabana.max_guests >= total_guests)
            .filter(|candidate| match max_budget {
                Some(budget) => candidate.estimated_price <= budget,
                None => true,
            })
            .map(|candidate| {
                let score_breakdown = self.breakdown(
                    &candidate.cabana,
                    candidate.estimated_price,
                    total_guests,
                    max_budget,
                );
                ScoredCabana {
                    total_score: Self::total(&score_breakdown),
                    cabana: candidate.cabana,
                    estimated_price: candidate.estimated_price,
                    score_breakdown,
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.total_score
                .partial_cmp(&a.total_score)
                .unwrap_or(Ordering::Equal)
        });
        scored
    }

    fn score_capacity(&self, cabana: &Cabana, total_guests: u32) -> f64 {
        let ratio = cabana.max_guests as f64 / total_guests.max(1) as f64;
        if ratio >= self.weights.roomy_ratio {
            self.weights.roomy_points
        } else if ratio >= self.weights.comfortable_ratio {
            self.weights.comfortable_points
        } else {
            self.weights.tight_points
        }
    }

    fn score_price(&self, cabana: &Cabana, estimated_price: f64, max_budget: Option<f64>) -> f64 {
        match max_budget {
            Some(budget) if budget > 0.0 => {
                ((1.0 - estimated_price / budget) * self.weights.budget_weight).max(0.0)
            }
            Some(_) => 0.0,
            None => {
                let base = cabana.base_price();
                if base <= self.weights.cheap_base_limit {
                    self.weights.cheap_points
                } else if base <= self.weights.moderate_base_limit {
                    self.weights.moderate_points
                } else {
                    self.weights.expensive_points
                }
            }
        }
    }

    fn score_amenities(&self, cabana: &Cabana) -> f64 {
        let amenities = &cabana.amenities;
        let mut score = 0.0;
        if amenities.pool {
            score += self.weights.pool_bonus;
        }
        if amenities.grill {
            score += self.weights.grill_bonus;
        }
        if amenities.wifi {
            score += self.weights.wifi_bonus;
        }
        score
    }
}
