//! Server configuration read from the environment at startup.

use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;

use letterbox_checkout::pricing::PricingConfig;

use crate::error::AppError;

/// Largest request body accepted by the photo upload route. Uploads arrive
/// base64 encoded, so this admits photos of roughly 15 MiB.
pub const DEFAULT_UPLOAD_LIMIT_BYTES: usize = 20 * 1024 * 1024;

/// Everything the server needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Interface to bind, `HOST`.
    pub host: String,
    /// Port to bind, `PORT`.
    pub port: u16,
    /// Price list, from the `LETTERBOX_*` pricing variables.
    pub pricing: PricingConfig,
    /// Body size limit for photo uploads, `LETTERBOX_UPLOAD_LIMIT_BYTES`.
    pub upload_limit_bytes: usize,
}

impl AppConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an unparsable
    /// value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`. Unset variables fall back to
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an unparsable
    /// value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PricingConfig::default();
        let pricing = PricingConfig {
            base_price: parse_or(&lookup, "LETTERBOX_BASE_PRICE", defaults.base_price)?,
            photo_unit_price: parse_or(
                &lookup,
                "LETTERBOX_PHOTO_UNIT_PRICE",
                defaults.photo_unit_price,
            )?,
            game_unit_price: parse_or(
                &lookup,
                "LETTERBOX_GAME_UNIT_PRICE",
                defaults.game_unit_price,
            )?,
            free_page_allowance: parse_or(
                &lookup,
                "LETTERBOX_FREE_PAGE_ALLOWANCE",
                defaults.free_page_allowance,
            )?,
            extra_page_unit_price: parse_or(
                &lookup,
                "LETTERBOX_EXTRA_PAGE_UNIT_PRICE",
                defaults.extra_page_unit_price,
            )?,
            bulk_discount_threshold: parse_or(
                &lookup,
                "LETTERBOX_BULK_DISCOUNT_THRESHOLD",
                defaults.bulk_discount_threshold,
            )?,
            bulk_discount_amount: parse_or(
                &lookup,
                "LETTERBOX_BULK_DISCOUNT_AMOUNT",
                defaults.bulk_discount_amount,
            )?,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port: parse_or(&lookup, "PORT", 3000)?,
            pricing,
            upload_limit_bytes: parse_or(
                &lookup,
                "LETTERBOX_UPLOAD_LIMIT_BYTES",
                DEFAULT_UPLOAD_LIMIT_BYTES,
            )?,
        })
    }

    /// The address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host:port` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} must be a number, got {raw:?}: {e}"))),
    }
}
