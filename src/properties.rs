//! The directory side: the results route decodes its query string through
//! the filter core and walks the approved listings, and the filter UI
//! fetches its option tables from here.

use actix_web::{web, HttpRequest, HttpResponse};

use crate::config;
use crate::core::db::{host_key, property_key, Store, LISTINGS_KEY};
use crate::core::errors::ApiError;
use crate::core::helpers::validate_uuid;
use crate::core::query_params::{get_usize, parse_query_params};
use crate::filters::config::{
    AMENITIES, DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE, EXPERIENCES, GUESTS_MAX, GUESTS_MIN,
    PLATFORMS, PROPERTY_TYPES, RADIUS_OPTIONS,
};
use crate::filters::{self, FilterState};
use crate::models::models::{BillingStatus, Host, Property, SubmissionStatus};

/// `GET /properties` — the results route. The whole search state lives in
/// the query string; the response echoes the decoded state so the filter
/// UI can rehydrate its controls from it.
pub async fn search(req: HttpRequest, store: web::Data<Store>) -> Result<HttpResponse, ApiError> {
    let state = filters::from_query(req.query_string());
    let params = parse_query_params(req.query_string());
    let page = get_usize(&params, "page", 1);
    let page_size = config::page_size();

    let listings: Vec<String> = store.get_json(LISTINGS_KEY)?.unwrap_or_default();
    let mut matched = Vec::new();
    for id in listings {
        let Some(property) = store.get_json::<Property>(&property_key(&id))? else {
            continue;
        };
        if property.status != SubmissionStatus::Approved {
            continue;
        }
        if host_is_past_due(&store, &property.host_id)? {
            continue;
        }
        if matches_filters(&property, &state) {
            matched.push(property);
        }
    }

    let total = matched.len();
    let properties: Vec<Property> = matched
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();
    let active_filter_count = state.active_filter_count();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "filters": state,
        "activeFilterCount": active_filter_count,
        "total": total,
        "page": page,
        "properties": properties,
    })))
}

pub async fn get_property(
    path: web::Path<String>,
    store: web::Data<Store>,
) -> Result<HttpResponse, ApiError> {
    let property = load_listed_property(&store, &path.into_inner())?;
    Ok(HttpResponse::Ok().json(property))
}

/// Everything the filter modal needs to render its controls.
pub async fn filter_options() -> HttpResponse {
    let experiences: Vec<serde_json::Value> = EXPERIENCES
        .iter()
        .map(|e| {
            serde_json::json!({
                "key": e.key,
                "title": e.title,
                "defaultPropertyType": e.default_property_type,
                "features": e.features.iter().map(|f| {
                    serde_json::json!({ "id": f.id, "label": f.label })
                }).collect::<Vec<_>>(),
                "preselectedFeatures": e.preselected_features,
            })
        })
        .collect();

    let amenities: Vec<serde_json::Value> = AMENITIES
        .iter()
        .map(|a| serde_json::json!({ "id": a.id, "label": a.label }))
        .collect();

    HttpResponse::Ok().json(serde_json::json!({
        "experiences": experiences,
        "propertyTypes": PROPERTY_TYPES,
        "platforms": PLATFORMS,
        "amenities": amenities,
        "radiusOptions": RADIUS_OPTIONS,
        "guests": { "min": GUESTS_MIN, "max": GUESTS_MAX },
        "price": {
            "defaultMin": DEFAULT_MIN_PRICE,
            "defaultMax": DEFAULT_MAX_PRICE,
            "ceiling": config::price_ceiling(),
        },
    }))
}

/// Approved listing by id, shared by the JSON route and the HTML page.
pub fn load_listed_property(store: &Store, property_id: &str) -> Result<Property, ApiError> {
    if property_id.is_empty() || !validate_uuid(property_id) {
        return Err(ApiError::BadRequest("Property ID required".to_string()));
    }
    let property = store
        .get_json::<Property>(&property_key(property_id))?
        .ok_or_else(|| ApiError::NotFound("Property not found".to_string()))?;
    if property.status != SubmissionStatus::Approved {
        // pending and rejected submissions are only visible to their host
        return Err(ApiError::NotFound("Property not found".to_string()));
    }
    Ok(property)
}

fn host_is_past_due(store: &Store, host_id: &str) -> Result<bool, ApiError> {
    Ok(store
        .get_json::<Host>(&host_key(host_id))?
        .map(|h| h.billing == BillingStatus::PastDue)
        .unwrap_or(false))
}

/// Does a listing satisfy every active facet? Radius is URL state only;
/// there is no geocoding collaborator to resolve it against.
fn matches_filters(property: &Property, state: &FilterState) -> bool {
    if !state.experience.is_empty() && !property.experiences.contains(&state.experience) {
        return false;
    }
    if property.sleeps < state.guests {
        return false;
    }
    let (min_price, max_price) = state.price_range;
    if property.nightly_price < min_price || property.nightly_price > max_price {
        return false;
    }
    if !state.property_types.is_empty() && !state.property_types.contains(&property.property_type) {
        return false;
    }
    if state.platforms_active()
        && !state.platforms.iter().any(|p| property.platforms.contains(p))
    {
        return false;
    }
    if !state.features.iter().all(|f| property.features.contains(f)) {
        return false;
    }
    if !state.amenities.iter().all(|a| property.amenities.contains(a)) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::helpers::now_iso;
    use crate::filters::FilterOverrides;

    fn listing() -> Property {
        Property {
            id: "test".to_string(),
            host_id: "host".to_string(),
            title: "Cedar Cabin".to_string(),
            city: "Vancouver".to_string(),
            property_type: "Cabin".to_string(),
            sleeps: 6,
            nightly_price: 180,
            platforms: vec!["Direct Booking Site".to_string(), "Vrbo".to_string()],
            amenities: vec!["wifi".to_string(), "hot-tub".to_string()],
            features: vec!["fireplace".to_string(), "mountain-view".to_string()],
            experiences: vec!["mountainRetreats".to_string()],
            images: Vec::new(),
            description: String::new(),
            status: SubmissionStatus::Approved,
            review_note: None,
            created_at: now_iso(),
            reviewed_at: Some(now_iso()),
        }
    }

    #[test]
    fn default_state_matches_anything_sleeping_two_in_price_band() {
        assert!(matches_filters(&listing(), &FilterState::default()));
    }

    #[test]
    fn guests_and_price_exclude() {
        let mut state = FilterState::default();
        state.guests = 8;
        assert!(!matches_filters(&listing(), &state));

        let state = filters::resolve(
            None,
            FilterOverrides {
                price_range: Some((200, 500)),
                ..FilterOverrides::default()
            },
        );
        assert!(!matches_filters(&listing(), &state));
    }

    #[test]
    fn neutral_platform_default_does_not_constrain() {
        let mut property = listing();
        property.platforms = vec!["Airbnb".to_string()];
        assert!(matches_filters(&property, &FilterState::default()));

        let mut state = FilterState::default();
        state.toggle_platform("Vrbo"); // now direct+vrbo, an active selection
        assert!(!matches_filters(&property, &state));
    }

    #[test]
    fn experience_and_feature_superset_match() {
        let state = filters::from_query("experience=mountainRetreats");
        assert!(matches_filters(&listing(), &state));

        let state = filters::from_query("experience=beachfrontEscapes");
        assert!(!matches_filters(&listing(), &state));

        let state = filters::from_query("features=fireplace,trail-access");
        assert!(!matches_filters(&listing(), &state));
    }

    #[test]
    fn amenity_subset_matches() {
        let state = filters::from_query("amenities=wifi");
        assert!(matches_filters(&listing(), &state));
        let state = filters::from_query("amenities=wifi,pool");
        assert!(!matches_filters(&listing(), &state));
    }
}
