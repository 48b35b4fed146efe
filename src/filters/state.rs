//! The canonical in-memory representation of the search facets, plus the
//! resolution step that turns hard defaults, experience presets, and
//! caller-supplied values into a fully-populated state.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::config::{
    self, amenity_rank, experience_config, feature_rank, platform_rank, property_type_rank,
    DEFAULT_GUESTS, DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE, DEFAULT_PLATFORM, DEFAULT_RADIUS,
    GUESTS_MAX, GUESTS_MIN,
};

/// Every active search facet. Constructed through [`resolve`] (or
/// [`FilterState::default`]), so all fields are always populated and all
/// invariants hold: guests and prices clamped, list fields deduplicated,
/// validated against their enumerations, and kept in UI-declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub experience: String,
    pub guests: u32,
    pub price_range: (u32, u32),
    pub property_types: Vec<String>,
    pub platforms: Vec<String>,
    pub radius: String,
    pub features: Vec<String>,
    pub amenities: Vec<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            experience: String::new(),
            guests: DEFAULT_GUESTS,
            price_range: (DEFAULT_MIN_PRICE, DEFAULT_MAX_PRICE),
            property_types: Vec::new(),
            // Direct-only is the neutral selection, not an active filter.
            platforms: vec![DEFAULT_PLATFORM.to_string()],
            radius: DEFAULT_RADIUS.to_string(),
            features: Vec::new(),
            amenities: Vec::new(),
        }
    }
}

/// Caller-supplied partial state, e.g. parsed from a results URL. A `None`
/// field falls through to the experience preset (where one applies) and
/// then to the hard default.
#[derive(Debug, Clone, Default)]
pub struct FilterOverrides {
    pub guests: Option<u32>,
    pub price_range: Option<(u32, u32)>,
    pub property_types: Option<Vec<String>>,
    pub platforms: Option<Vec<String>>,
    pub radius: Option<String>,
    pub features: Option<Vec<String>>,
    pub amenities: Option<Vec<String>>,
}

/// Build the initial state for a filter session: hard defaults, overlaid by
/// the experience preset, overlaid by explicit overrides. An unregistered
/// experience key degrades to "no experience" with a diagnostic.
pub fn resolve(experience: Option<&str>, overrides: FilterOverrides) -> FilterState {
    let mut state = FilterState::default();

    if let Some(key) = experience.filter(|k| !k.is_empty()) {
        match experience_config(key) {
            Some(exp) => {
                state.experience = exp.key.to_string();
                state.property_types = vec![exp.default_property_type.to_string()];
                state.features = exp
                    .preselected_features
                    .iter()
                    .map(|id| id.to_string())
                    .collect();
            }
            None => warn!(experience = key, "unknown experience key, ignoring preset"),
        }
    }

    if let Some(guests) = overrides.guests {
        state.guests = clamp_guests(guests);
    }
    if let Some((min, max)) = overrides.price_range {
        state.price_range = clamp_price_range(min, max);
    }
    if let Some(types) = overrides.property_types {
        state.property_types = canonicalized(types, property_type_rank);
    }
    if let Some(platforms) = overrides.platforms {
        state.platforms = canonicalized(platforms, platform_rank);
    }
    if let Some(radius) = overrides.radius {
        state.radius = radius;
    }
    if let Some(features) = overrides.features {
        state.features = canonicalized(features, feature_rank);
    }
    if let Some(amenities) = overrides.amenities {
        state.amenities = canonicalized(amenities, amenity_rank);
    }

    state
}

pub fn clamp_guests(guests: u32) -> u32 {
    guests.clamp(GUESTS_MIN, GUESTS_MAX)
}

/// Clamp both bounds to the configured ceiling, then restore ordering by
/// collapsing onto the upper bound: (9999, 10) becomes (10, 10).
pub fn clamp_price_range(min: u32, max: u32) -> (u32, u32) {
    let ceiling = crate::config::price_ceiling();
    let min = min.min(ceiling);
    let max = max.min(ceiling);
    if max < min {
        (max, max)
    } else {
        (min, max)
    }
}

/// Dedupe (first occurrence wins) and order by enumeration rank. The sort
/// is stable, so values the enumeration doesn't know keep their relative
/// order at the end.
fn canonicalized(values: Vec<String>, rank: impl Fn(&str) -> usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out.sort_by_key(|v| rank(v));
    out
}

impl FilterState {
    /// How many facets differ from the hard default, for the "{n} filters
    /// applied" badge and the Clear All button. Experience is a category
    /// choice, not a counted filter.
    pub fn active_filter_count(&self) -> usize {
        let defaults = FilterState::default();
        let mut count = 0;
        if self.guests != defaults.guests {
            count += 1;
        }
        if self.price_range != defaults.price_range {
            count += 1;
        }
        if !self.property_types.is_empty() {
            count += 1;
        }
        if self.platforms_active() {
            count += 1;
        }
        if self.radius != defaults.radius {
            count += 1;
        }
        if !self.features.is_empty() {
            count += 1;
        }
        if !self.amenities.is_empty() {
            count += 1;
        }
        count
    }

    /// Platforms count as an active filter only when the selection is
    /// non-empty and not the neutral direct-only default.
    pub fn platforms_active(&self) -> bool {
        !self.platforms.is_empty() && self.platforms != FilterState::default().platforms
    }

    /// Clear All: every facet back to its hard default, keeping the
    /// experience selection.
    pub fn cleared(&self) -> FilterState {
        FilterState {
            experience: self.experience.clone(),
            ..FilterState::default()
        }
    }

    /// Select an experience category, re-seeding property types and
    /// features from its preset. An empty or unknown key clears the
    /// selection and leaves the other facets untouched.
    pub fn set_experience(&mut self, key: &str) {
        if key.is_empty() {
            self.experience.clear();
            return;
        }
        match experience_config(key) {
            Some(exp) => {
                self.experience = exp.key.to_string();
                self.property_types = vec![exp.default_property_type.to_string()];
                self.features = exp
                    .preselected_features
                    .iter()
                    .map(|id| id.to_string())
                    .collect();
            }
            None => {
                warn!(experience = key, "unknown experience key, clearing selection");
                self.experience.clear();
            }
        }
    }

    pub fn toggle_property_type(&mut self, label: &str) {
        toggle(&mut self.property_types, label, config::is_property_type, property_type_rank);
    }

    pub fn toggle_platform(&mut self, label: &str) {
        toggle(&mut self.platforms, label, config::is_platform, platform_rank);
    }

    pub fn toggle_feature(&mut self, id: &str) {
        toggle(&mut self.features, id, config::is_feature, feature_rank);
    }

    pub fn toggle_amenity(&mut self, id: &str) {
        toggle(&mut self.amenities, id, config::is_amenity, amenity_rank);
    }
}

fn toggle(
    selection: &mut Vec<String>,
    value: &str,
    is_known: impl Fn(&str) -> bool,
    rank: impl Fn(&str) -> usize,
) {
    if !is_known(value) {
        warn!(value, "ignoring toggle for unregistered filter value");
        return;
    }
    if let Some(idx) = selection.iter().position(|v| v == value) {
        selection.remove(idx);
    } else {
        selection.push(value.to_string());
        selection.sort_by_key(|v| rank(v));
    }
}
