use std::env;
use std::time::Duration;

use chrono::FixedOffset;
use thiserror::Error;

use crate::infrastructure::ack::DEFAULT_ACK_MARKER;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub order_api_base_url: String,
    pub order_api_token: Option<String>,
    pub order_api_timeout: Duration,
    pub ack_marker: String,
    pub display_offset: FixedOffset,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let order_api_base_url = lookup("ORDER_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("ORDER_API_BASE_URL"))?;

        let order_api_token = lookup("ORDER_API_TOKEN").filter(|v| !v.trim().is_empty());

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or("PORT", lookup("PORT"), 8080u16)?;

        let timeout_secs = parse_or("ORDER_API_TIMEOUT_SECS", lookup("ORDER_API_TIMEOUT_SECS"), 10u64)?;

        let ack_marker = lookup("ORDER_ACK_MARKER").unwrap_or_else(|| DEFAULT_ACK_MARKER.to_string());

        let raw_offset = lookup("DISPLAY_UTC_OFFSET_HOURS");
        let offset_hours = parse_or("DISPLAY_UTC_OFFSET_HOURS", raw_offset.clone(), 7i32)?;
        let display_offset = offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| ConfigError::Invalid {
                name: "DISPLAY_UTC_OFFSET_HOURS",
                value: raw_offset.unwrap_or_default(),
            })?;

        Ok(Self {
            host,
            port,
            order_api_base_url,
            order_api_token,
            order_api_timeout: Duration::from_secs(timeout_secs),
            ack_marker,
            display_offset,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: v }),
    }
}
