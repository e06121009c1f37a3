use std::env;
use std::fmt::Display;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub schedule_start_hour: u32,
    pub schedule_end_hour: u32,
    pub schedule_slot_minutes: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("PRAXIS_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_env("PRAXIS_PORT", 3000),
            schedule_start_hour: parse_env("SCHEDULE_START_HOUR", 8),
            schedule_end_hour: parse_env("SCHEDULE_END_HOUR", 18),
            schedule_slot_minutes: parse_env("SCHEDULE_SLOT_MINUTES", 30),
        }
    }
}

fn parse_env<T>(name: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{name}={raw} is not a valid value, using default {default}");
            default
        }),
        Err(_) => default,
    }
}
