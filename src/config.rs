use std::collections::HashMap;
use std::env;

use crate::domain::order::OrderStatus;
use crate::infrastructure::policy::Role;

/// Which shipment-tracking integration owns the primary metadata tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingIntegration {
    /// AfterShip is active: `_aftership_*` metadata is consulted first.
    Aftership,
    /// No primary integration; only the legacy tiers are consulted.
    Inactive,
}

impl TrackingIntegration {
    fn from_env_value(value: &str) -> Self {
        if value.eq_ignore_ascii_case("aftership") {
            TrackingIntegration::Aftership
        } else {
            TrackingIntegration::Inactive
        }
    }
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub tracking_integration: TrackingIntegration,
    /// Statuses resolved into list/count queries when the caller does not
    /// constrain the status. Replaces the host-platform version probe the
    /// previous incarnation of this API keyed the status set on.
    pub queryable_statuses: Vec<OrderStatus>,
    /// API key -> role assignments for the key-based access policy.
    pub api_keys: HashMap<String, Role>,
}

impl Settings {
    /// Read settings from the environment. Call `dotenvy::dotenv()` first if
    /// a `.env` file should participate. Panics on a missing `DATABASE_URL`
    /// or unparseable values, matching server bootstrap expectations.
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .expect("PORT must be a valid number");

        let tracking_integration = env::var("TRACKING_INTEGRATION")
            .map(|v| TrackingIntegration::from_env_value(&v))
            .unwrap_or(TrackingIntegration::Aftership);

        let queryable_statuses = match env::var("QUERYABLE_STATUSES") {
            Ok(csv) => parse_statuses(&csv).expect("QUERYABLE_STATUSES must list valid statuses"),
            Err(_) => OrderStatus::default_queryable(),
        };

        let api_keys = match env::var("API_KEYS") {
            Ok(csv) => parse_api_keys(&csv).expect("API_KEYS must be a csv of key:role pairs"),
            Err(_) => HashMap::new(),
        };

        Settings {
            host,
            port,
            database_url,
            tracking_integration,
            queryable_statuses,
            api_keys,
        }
    }
}

fn parse_statuses(csv: &str) -> Result<Vec<OrderStatus>, String> {
    csv.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<OrderStatus>().map_err(|e| e.to_string()))
        .collect()
}

/// Parse `key:role` pairs, e.g. `abc123:admin,tracker:agent,kiosk:viewer`.
fn parse_api_keys(csv: &str) -> Result<HashMap<String, Role>, String> {
    let mut keys = HashMap::new();
    for pair in csv.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (key, role) = pair
            .split_once(':')
            .ok_or_else(|| format!("malformed API key entry '{}'", pair))?;
        keys.insert(key.trim().to_string(), Role::from_name(role.trim())?);
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_csv() {
        let statuses = parse_statuses("pending, shipped,completed").unwrap();
        assert_eq!(
            statuses,
            vec![
                OrderStatus::Pending,
                OrderStatus::Shipped,
                OrderStatus::Completed
            ]
        );
    }

    #[test]
    fn rejects_unknown_status_in_csv() {
        assert!(parse_statuses("pending,bogus").is_err());
    }

    #[test]
    fn parses_api_key_pairs() {
        let keys = parse_api_keys("abc:admin, xyz:viewer").unwrap();
        assert_eq!(keys.get("abc"), Some(&Role::Admin));
        assert_eq!(keys.get("xyz"), Some(&Role::Viewer));
    }

    #[test]
    fn rejects_malformed_api_key_entry() {
        assert!(parse_api_keys("justakey").is_err());
        assert!(parse_api_keys("key:superuser").is_err());
    }

    #[test]
    fn tracking_integration_defaults_off_for_unknown_values() {
        assert_eq!(
            TrackingIntegration::from_env_value("AfterShip"),
            TrackingIntegration::Aftership
        );
        assert_eq!(
            TrackingIntegration::from_env_value("other-plugin"),
            TrackingIntegration::Inactive
        );
    }
}
