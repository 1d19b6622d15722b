use crate::errors::ConfigError;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const DATABASE: &str = "Cabanas";
const MAX_STAY_NIGHTS: u32 = 365;

#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    Mongo { uri: String, database: String },
    /// Non-persistent store for local runs without a database.
    Memory,
}

/// Limits applied to every requested stay, public or administrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPolicy {
    pub max_nights: u32,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            max_nights: MAX_STAY_NIGHTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    pub policy: BookingPolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| HOST.to_string());
        let port = match lookup("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => PORT,
        };

        let store = match lookup("STORE_BACKEND").as_deref().unwrap_or("mongo") {
            "mongo" => StoreBackend::Mongo {
                uri: lookup("MONGODB_URI").ok_or(ConfigError::Missing("MONGODB_URI"))?,
                database: lookup("MONGODB_DATABASE").unwrap_or_else(|| DATABASE.to_string()),
            },
            "memory" => StoreBackend::Memory,
            other => {
                return Err(ConfigError::Invalid {
                    name: "STORE_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let max_nights = match lookup("MAX_STAY_NIGHTS") {
            Some(value) => match value.parse::<u32>() {
                Ok(nights) if nights > 0 => nights,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "MAX_STAY_NIGHTS",
                        value,
                    })
                }
            },
            None => MAX_STAY_NIGHTS,
        };

        Ok(Self {
            host,
            port,
            store,
            policy: BookingPolicy { max_nights },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_with_mongo_uri() {
        let config =
            AppConfig::from_lookup(lookup(&[("MONGODB_URI", "mongodb://localhost:27017")]))
                .unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.policy.max_nights, 365);
        assert_eq!(
            config.store,
            StoreBackend::Mongo {
                uri: "mongodb://localhost:27017".to_string(),
                database: "Cabanas".to_string(),
            }
        );
    }

    #[test]
    fn test_mongo_requires_uri() {
        assert_eq!(
            AppConfig::from_lookup(lookup(&[])),
            Err(ConfigError::Missing("MONGODB_URI"))
        );
    }

    #[test]
    fn test_memory_backend_needs_no_uri() {
        let config = AppConfig::from_lookup(lookup(&[
            ("STORE_BACKEND", "memory"),
            ("PORT", "9000"),
            ("HOST", "127.0.0.1"),
            ("MAX_STAY_NIGHTS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.policy.max_nights, 30);
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("STORE_BACKEND", "memory"), ("PORT", "http")])),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("STORE_BACKEND", "redis")])),
            Err(ConfigError::Invalid { name: "STORE_BACKEND", .. })
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("STORE_BACKEND", "memory"), ("MAX_STAY_NIGHTS", "0")])),
            Err(ConfigError::Invalid { name: "MAX_STAY_NIGHTS", .. })
        ));
    }
}
