use std::fmt::Display;
use std::str::FromStr;

use tracing::warn;

pub const MIN_NAME_LENGTH: usize = 3;
pub const MAX_NAME_LENGTH: usize = 50;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_ABOUT_LENGTH: usize = 500;
pub const MAX_TITLE_LENGTH: usize = 120;
pub const MAX_DESCRIPTION_LENGTH: usize = 5000;
pub const MAX_IMAGES: usize = 12;
pub const MAX_SLEEPS: u32 = 32;

pub fn token_expiration_hours() -> i64 {
    env_parsed("STAYFINDER_TOKEN_EXPIRATION_HOURS", 24)
}

/// Upper clamp for nightly prices, shared by the filter decoder and
/// submission validation. One knob instead of per-call-site literals.
pub fn price_ceiling() -> u32 {
    env_parsed("STAYFINDER_PRICE_CEILING", 10_000)
}

pub fn page_size() -> usize {
    env_parsed("STAYFINDER_PAGE_SIZE", 12)
}

/// Shared secret the review endpoints expect in `X-Review-Key`.
pub fn review_key() -> String {
    std::env::var("STAYFINDER_REVIEW_KEY").unwrap_or_else(|_| "dev-review-key".to_string())
}

pub fn bind_address() -> String {
    std::env::var("STAYFINDER_BIND").unwrap_or_else(|_| "0.0.0.0:3000".to_string())
}

fn env_parsed<T: FromStr + Display + Copy>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Err(_) => default,
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(key, raw = raw.as_str(), "invalid value, using default {default}");
            default
        }),
    }
}
