// Start of file: /src/config/environment.rs

// * Startup configuration read from the environment (and .env outside production).

use std::borrow::Cow;
// * anyhow for convenient error handling
use anyhow::{Context, Result};
use tracing::warn;

use crate::config::lookup::{EnvLookup, ProcessEnv};

// ! Default values for environment variables (used if variables aren't set):
const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MEMORY_RESERVATION_BYTES: usize = 100 * 1024 * 1024; // 100 MiB

// * Variables the service answers with at request time
pub const NAME_SERVICE_VAR: &str = "NAME_SERVICE";
pub const INTERNAL_URL_VAR: &str = "internalUrlMicroservice";

// * A struct containing all environment variables used at startup
#[derive(Clone, Debug)]
pub struct EnvironmentVariables {
    pub environment: Cow<'static, str>,
    pub host: Cow<'static, str>,
    pub port: u16,
    pub memory_reservation_bytes: usize,
}

impl Default for EnvironmentVariables {
    fn default() -> Self {
        Self {
            environment: Cow::Borrowed(DEFAULT_ENVIRONMENT),
            host: Cow::Borrowed(DEFAULT_HOST),
            port: DEFAULT_PORT,
            memory_reservation_bytes: DEFAULT_MEMORY_RESERVATION_BYTES,
        }
    }
}

impl EnvironmentVariables {
    // * Loads from the process environment.
    // * Only reads .env if ENVIRONMENT != "production".
    pub fn load() -> Result<Self> {
        // ? In non-production environments, attempt to load .env
        if std::env::var("ENVIRONMENT").unwrap_or_default() != "production" {
            dotenv::dotenv().ok();
        }

        let config: EnvironmentVariables = Self::from_lookup(&ProcessEnv)?;

        if cfg!(debug_assertions) {
            tracing::debug!("Loaded environment configuration: {:#?}", config);
        }

        Ok(config)
    }

    // * Builds the configuration from any lookup, providing defaults if missing
    pub fn from_lookup(vars: &dyn EnvLookup) -> Result<Self> {
        Ok(Self {
            environment: vars
                .get("ENVIRONMENT")
                .map(Cow::Owned)
                .unwrap_or_else(|| {
                    warn!("Missing ENVIRONMENT, defaulting to '{DEFAULT_ENVIRONMENT}'");
                    Cow::Borrowed(DEFAULT_ENVIRONMENT)
                }),

            host: vars
                .get("HOST")
                .map(Cow::Owned)
                .unwrap_or(Cow::Borrowed(DEFAULT_HOST)),

            port: vars
                .get("PORT")
                .map(|s| s.parse().context("Invalid PORT value"))
                .transpose()?
                .unwrap_or(DEFAULT_PORT),

            memory_reservation_bytes: vars
                .get("MEMORY_RESERVATION_BYTES")
                .map(|s| s.parse().context("Invalid MEMORY_RESERVATION_BYTES"))
                .transpose()?
                .unwrap_or(DEFAULT_MEMORY_RESERVATION_BYTES),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::lookup::MapEnv;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config: EnvironmentVariables = EnvironmentVariables::from_lookup(&MapEnv::new()).unwrap();

        assert_eq!(config.environment, "development");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.memory_reservation_bytes, 104_857_600);
    }

    #[test]
    fn values_are_read_from_lookup() {
        let vars: MapEnv = MapEnv::new()
            .with("ENVIRONMENT", "production")
            .with("HOST", "127.0.0.1")
            .with("PORT", "9090")
            .with("MEMORY_RESERVATION_BYTES", "4096");

        let config: EnvironmentVariables = EnvironmentVariables::from_lookup(&vars).unwrap();

        assert_eq!(config.environment, "production");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9090);
        assert_eq!(config.memory_reservation_bytes, 4096);
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let bad_port: MapEnv = MapEnv::new().with("PORT", "eighty");
        let err = EnvironmentVariables::from_lookup(&bad_port).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        let bad_size: MapEnv = MapEnv::new().with("MEMORY_RESERVATION_BYTES", "-1");
        let err = EnvironmentVariables::from_lookup(&bad_size).unwrap_err();
        assert!(err.to_string().contains("MEMORY_RESERVATION_BYTES"));
    }
}

// End of file: /src/config/environment.rs
