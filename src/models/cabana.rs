use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::pricing::{default_pricing_config, PricingConfig};

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Amenities {
    #[serde(rename = "piscina", default)]
    pub pool: bool,
    #[serde(rename = "parrilla", default)]
    pub grill: bool,
    #[serde(default)]
    pub wifi: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Cabana {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "maxPersonas")]
    pub max_guests: u32,
    #[serde(rename = "maxAdultos", default, skip_serializing_if = "Option::is_none")]
    pub max_adults: Option<u32>,
    #[serde(rename = "maxMenores", default, skip_serializing_if = "Option::is_none")]
    pub max_minors: Option<u32>,
    #[serde(rename = "destacada", default)]
    pub featured: bool,
    #[serde(rename = "amenidades", default)]
    pub amenities: Amenities,
    #[serde(rename = "precios", default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<PricingConfig>,
    /// Public URLs served by the object store.
    #[serde(rename = "imagenes", default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

impl Cabana {
    pub fn new(name: impl Into<String>, max_guests: u32) -> Self {
        Self {
            id: None,
            name: name.into(),
            max_guests,
            max_adults: None,
            max_minors: None,
            featured: false,
            amenities: Amenities::default(),
            pricing: None,
            images: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Stored pricing, or the default configuration when none was ever saved.
    pub fn pricing_config(&self) -> PricingConfig {
        self.pricing.clone().unwrap_or_else(default_pricing_config)
    }

    /// The nightly base price before seasons and surcharges.
    pub fn base_price(&self) -> f64 {
        self.pricing
            .as_ref()
            .map(|pricing| pricing.base)
            .unwrap_or_else(|| default_pricing_config().base)
    }
}
