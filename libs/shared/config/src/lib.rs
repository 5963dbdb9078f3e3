use std::env;

use chrono_tz::Tz;
use tracing::warn;

pub const DEFAULT_SLOT_GRANULARITY_MINUTES: i64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_url: String,
    pub storage_service_key: String,
    pub clinic_timezone: String,
    pub slot_granularity_minutes: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            storage_url: env::var("STORAGE_URL")
                .unwrap_or_else(|_| {
                    warn!("STORAGE_URL not set, using empty value");
                    String::new()
                }),
            storage_service_key: env::var("STORAGE_SERVICE_KEY")
                .unwrap_or_else(|_| {
                    warn!("STORAGE_SERVICE_KEY not set, using empty value");
                    String::new()
                }),
            clinic_timezone: env::var("CLINIC_TIMEZONE")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_TIMEZONE not set, using UTC");
                    "UTC".to_string()
                }),
            slot_granularity_minutes: env::var("SLOT_GRANULARITY_MINUTES")
                .ok()
                .and_then(|raw| raw.parse::<i64>().ok())
                .filter(|minutes| *minutes > 0)
                .unwrap_or_else(|| {
                    warn!(
                        "SLOT_GRANULARITY_MINUTES not set or invalid, using {}",
                        DEFAULT_SLOT_GRANULARITY_MINUTES
                    );
                    DEFAULT_SLOT_GRANULARITY_MINUTES
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.storage_url.is_empty() && !self.storage_service_key.is_empty()
    }

    /// Clinic-wide IANA timezone. An unrecognized identifier falls back to
    /// UTC so a bad deployment value degrades display, not availability.
    pub fn tz(&self) -> Tz {
        self.clinic_timezone.parse::<Tz>().unwrap_or_else(|_| {
            warn!(
                "CLINIC_TIMEZONE '{}' is not a valid IANA timezone, using UTC",
                self.clinic_timezone
            );
            Tz::UTC
        })
    }
}
