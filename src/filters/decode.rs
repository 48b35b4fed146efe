//! Query string → FilterState. The inverse of [`super::encode`], tolerant
//! of anything a user can paste into an address bar: per-field parse
//! failures degrade to that field's default with a diagnostic, out-of-range
//! numbers are clamped, and unrecognized list tokens are dropped. Decoding
//! never panics and always yields a fully-populated state.

use std::collections::HashMap;

use tracing::warn;

use crate::core::query_params::parse_query_params;

use super::config::{
    self, is_radius_option, DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE, DEFAULT_RADIUS, GUESTS_MAX,
    GUESTS_MIN,
};
use super::labels;
use super::state::{resolve, FilterOverrides, FilterState};

/// Parse a results-route query string (with or without a leading path/`?`).
/// Fields absent from the query fall through preset resolution to their
/// defaults, so a URL naming only an experience still hydrates the preset.
pub fn from_query(query: &str) -> FilterState {
    let params = parse_query_params(query);
    let mut overrides = FilterOverrides::default();

    if let Some(raw) = params.get("guests") {
        match raw.trim().parse::<i64>() {
            Ok(n) => {
                overrides.guests = Some(n.clamp(GUESTS_MIN as i64, GUESTS_MAX as i64) as u32)
            }
            Err(_) => warn!(raw = raw.as_str(), "malformed guests parameter, using default"),
        }
    }

    if params.contains_key("minPrice") || params.contains_key("maxPrice") {
        let min = price_bound(&params, "minPrice", DEFAULT_MIN_PRICE);
        let max = price_bound(&params, "maxPrice", DEFAULT_MAX_PRICE);
        // ceiling clamp and order restoration happen in resolve
        overrides.price_range = Some((min, max));
    }

    overrides.property_types = list_param(&params, "propertyTypes", |token| {
        let label = labels::property_type_label(token).to_string();
        config::is_property_type(&label).then_some(label)
    });
    overrides.platforms = list_param(&params, "platforms", |token| {
        let label = labels::platform_label(token).to_string();
        config::is_platform(&label).then_some(label)
    });
    overrides.features = list_param(&params, "features", |token| {
        config::is_feature(token).then(|| token.to_string())
    });
    overrides.amenities = list_param(&params, "amenities", |token| {
        config::is_amenity(token).then(|| token.to_string())
    });

    if let Some(raw) = params.get("radius") {
        overrides.radius = Some(normalize_radius(raw));
    }

    let experience = params.get("experience").map(String::as_str);
    resolve(experience, overrides)
}

fn price_bound(params: &HashMap<String, String>, key: &str, default: u32) -> u32 {
    match params.get(key) {
        None => default,
        Some(raw) => match raw.trim().parse::<i64>() {
            // negative bounds clamp up to zero
            Ok(n) => n.clamp(0, u32::MAX as i64) as u32,
            Err(_) => {
                warn!(key, raw = raw.as_str(), "malformed price bound, using default");
                default
            }
        },
    }
}

/// Split a comma-joined list value, keeping only tokens the corresponding
/// enumeration knows. A key that is absent, or whose tokens all get
/// dropped, counts as not supplied.
fn list_param(
    params: &HashMap<String, String>,
    key: &str,
    accept: impl Fn(&str) -> Option<String>,
) -> Option<Vec<String>> {
    let raw = params.get(key)?;
    let mut values = Vec::new();
    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        match accept(token) {
            Some(value) => values.push(value),
            None => warn!(key, token, "dropping unrecognized filter value"),
        }
    }
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

/// Accept a known radius label or a bare mileage token ("25"); anything
/// else falls back to the default.
fn normalize_radius(raw: &str) -> String {
    let trimmed = raw.trim();
    if is_radius_option(trimmed) {
        return trimmed.to_string();
    }
    if let Ok(miles) = trimmed.parse::<u32>() {
        let label = format!("Within {miles} miles");
        if is_radius_option(&label) {
            return label;
        }
    }
    warn!(raw, "unrecognized radius value, using default");
    DEFAULT_RADIUS.to_string()
}
