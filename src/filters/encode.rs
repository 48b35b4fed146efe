//! FilterState → canonical query string for the results route. Fields at
//! their default are omitted so shared links stay short and stable; the
//! default state encodes to the empty string.

use urlencoding::encode;

use super::labels;
use super::state::FilterState;

/// Serialize to a query string with no leading `?`. Multi-value fields are
/// comma-joined, each token percent-encoded, in the state's canonical
/// order. Property types and platforms go to the wire as ids.
pub fn to_query_string(state: &FilterState) -> String {
    let defaults = FilterState::default();
    let mut pairs: Vec<String> = Vec::new();

    if !state.experience.is_empty() {
        pairs.push(format!("experience={}", encode(&state.experience)));
    }
    if state.guests != defaults.guests {
        pairs.push(format!("guests={}", state.guests));
    }
    if state.price_range != defaults.price_range {
        pairs.push(format!("minPrice={}", state.price_range.0));
        pairs.push(format!("maxPrice={}", state.price_range.1));
    }
    if !state.property_types.is_empty() {
        let tokens = state
            .property_types
            .iter()
            .map(|label| labels::property_type_id(label));
        pairs.push(format!("propertyTypes={}", join_tokens(tokens)));
    }
    if !state.platforms.is_empty() && state.platforms != defaults.platforms {
        let tokens = state.platforms.iter().map(|label| labels::platform_id(label));
        pairs.push(format!("platforms={}", join_tokens(tokens)));
    }
    if state.radius != defaults.radius {
        pairs.push(format!("radius={}", encode(&state.radius)));
    }
    if !state.features.is_empty() {
        pairs.push(format!(
            "features={}",
            join_tokens(state.features.iter().map(String::as_str))
        ));
    }
    if !state.amenities.is_empty() {
        pairs.push(format!(
            "amenities={}",
            join_tokens(state.amenities.iter().map(String::as_str))
        ));
    }

    pairs.join("&")
}

fn join_tokens<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
    tokens
        .map(|t| encode(t).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}
