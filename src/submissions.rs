//! Host property submissions and the review workflow: a draft enters the
//! queue as `Pending` and a reviewer moves it to `Approved` (listed) or
//! `Rejected` (kept on the host's dashboard with the note).

use std::sync::OnceLock;

use actix_web::{web, HttpRequest, HttpResponse};
use ammonia::Builder;
use html_escape::encode_double_quoted_attribute;
use regex::Regex;
use uuid::Uuid;

use crate::auth::validate_token;
use crate::config::{self, MAX_DESCRIPTION_LENGTH, MAX_IMAGES, MAX_SLEEPS, MAX_TITLE_LENGTH};
use crate::core::db::{
    host_key, host_properties_key, property_key, Store, LISTINGS_KEY, REVIEW_QUEUE_KEY,
};
use crate::core::errors::ApiError;
use crate::core::helpers::{now_iso, sanitize_text, validate_uuid};
use crate::filters::config::{
    amenity_rank, experience_config, feature_rank, is_amenity, is_feature, is_platform,
    is_property_type, platform_rank, EXPERIENCES,
};
use crate::models::models::{Host, Property, SubmissionStatus};
use crate::notify::Notifier;

pub async fn create_submission(
    req: HttpRequest,
    store: web::Data<Store>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, ApiError> {
    let host_id = validate_token(&req, &store).ok_or(ApiError::Unauthorized)?;

    let title = body["title"].as_str().unwrap_or_default();
    if title.is_empty() || title.len() > MAX_TITLE_LENGTH {
        return Err(ApiError::BadRequest("Title must be 1-120 characters".to_string()));
    }

    let city = body["city"].as_str().unwrap_or_default();
    if city.is_empty() {
        return Err(ApiError::BadRequest("City is required".to_string()));
    }

    let property_type = body["propertyType"].as_str().unwrap_or_default();
    if !is_property_type(property_type) {
        return Err(ApiError::BadRequest(format!(
            "Unknown property type: {}",
            property_type
        )));
    }

    let sleeps = body["sleeps"].as_u64().unwrap_or(0) as u32;
    if sleeps == 0 || sleeps > MAX_SLEEPS {
        return Err(ApiError::BadRequest("Sleeps must be between 1 and 32".to_string()));
    }

    let nightly_price = body["nightlyPrice"].as_u64().unwrap_or(0) as u32;
    if nightly_price == 0 || nightly_price > config::price_ceiling() {
        return Err(ApiError::BadRequest("Nightly price out of range".to_string()));
    }

    let platforms = validated_list(str_list(&body, "platforms"), is_platform, platform_rank, "platform")?;
    if platforms.is_empty() {
        return Err(ApiError::BadRequest("At least one booking platform is required".to_string()));
    }
    let amenities = validated_list(str_list(&body, "amenities"), is_amenity, amenity_rank, "amenity")?;
    let features = validated_list(str_list(&body, "features"), is_feature, feature_rank, "feature")?;
    let experiences = validated_list(
        str_list(&body, "experiences"),
        |key| experience_config(key).is_some(),
        experience_rank,
        "experience",
    )?;

    let images = str_list(&body, "images");
    if images.len() > MAX_IMAGES {
        return Err(ApiError::BadRequest("Too many images (max 12)".to_string()));
    }
    for url in &images {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ApiError::BadRequest(format!("Invalid image URL: {}", url)));
        }
    }

    let description = body["description"].as_str().unwrap_or_default();
    if description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(ApiError::BadRequest("Description too long (max 5000 chars)".to_string()));
    }

    let id = Uuid::new_v4().to_string();
    let property = Property {
        id: id.clone(),
        host_id: host_id.clone(),
        title: sanitize_text(title),
        city: sanitize_text(city),
        property_type: property_type.to_string(),
        sleeps,
        nightly_price,
        platforms,
        amenities,
        features,
        experiences,
        images,
        description: sanitize_description(description),
        status: SubmissionStatus::Pending,
        review_note: None,
        created_at: now_iso(),
        reviewed_at: None,
    };

    store.set_json(&property_key(&id), &property)?;

    let mut queue: Vec<String> = store.get_json(REVIEW_QUEUE_KEY)?.unwrap_or_default();
    queue.insert(0, id.clone());
    store.set_json(REVIEW_QUEUE_KEY, &queue)?;

    let mut own: Vec<String> = store.get_json(&host_properties_key(&host_id))?.unwrap_or_default();
    own.insert(0, id);
    store.set_json(&host_properties_key(&host_id), &own)?;

    Ok(HttpResponse::Created().json(property))
}

/// The host's own submissions, newest first, all statuses.
pub async fn list_own(req: HttpRequest, store: web::Data<Store>) -> Result<HttpResponse, ApiError> {
    let host_id = validate_token(&req, &store).ok_or(ApiError::Unauthorized)?;

    let ids: Vec<String> = store.get_json(&host_properties_key(&host_id))?.unwrap_or_default();
    let mut submissions = Vec::new();
    for id in ids {
        if let Some(p) = store.get_json::<Property>(&property_key(&id))? {
            submissions.push(p);
        }
    }

    Ok(HttpResponse::Ok().json(submissions))
}

pub async fn list_pending(req: HttpRequest, store: web::Data<Store>) -> Result<HttpResponse, ApiError> {
    require_review_key(&req)?;

    let queue: Vec<String> = store.get_json(REVIEW_QUEUE_KEY)?.unwrap_or_default();
    let mut pending = Vec::new();
    for id in queue {
        if let Some(p) = store.get_json::<Property>(&property_key(&id))? {
            if p.status == SubmissionStatus::Pending {
                pending.push(p);
            }
        }
    }

    Ok(HttpResponse::Ok().json(pending))
}

pub async fn review(
    req: HttpRequest,
    store: web::Data<Store>,
    notifier: web::Data<dyn Notifier>,
    path: web::Path<String>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, ApiError> {
    require_review_key(&req)?;

    let property_id = path.into_inner();
    if property_id.is_empty() || !validate_uuid(&property_id) {
        return Err(ApiError::BadRequest("Property ID required".to_string()));
    }

    let mut property = store
        .get_json::<Property>(&property_key(&property_id))?
        .ok_or_else(|| ApiError::NotFound("Submission not found".to_string()))?;

    if property.status != SubmissionStatus::Pending {
        return Err(ApiError::Conflict("Submission already reviewed".to_string()));
    }

    let decision = body["decision"].as_str().unwrap_or_default();
    let status = match decision {
        "approved" => SubmissionStatus::Approved,
        "rejected" => SubmissionStatus::Rejected,
        _ => {
            return Err(ApiError::BadRequest(
                "Decision must be 'approved' or 'rejected'".to_string(),
            ))
        }
    };

    property.status = status;
    property.reviewed_at = Some(now_iso());
    property.review_note = body["note"].as_str().map(sanitize_text).filter(|n| !n.is_empty());

    store.set_json(&property_key(&property_id), &property)?;

    let mut queue: Vec<String> = store.get_json(REVIEW_QUEUE_KEY)?.unwrap_or_default();
    queue.retain(|id| id != &property_id);
    store.set_json(REVIEW_QUEUE_KEY, &queue)?;

    if status == SubmissionStatus::Approved {
        let mut listings: Vec<String> = store.get_json(LISTINGS_KEY)?.unwrap_or_default();
        listings.insert(0, property_id.clone()); // newest first
        store.set_json(LISTINGS_KEY, &listings)?;
    }

    if let Some(host) = store.get_json::<Host>(&host_key(&property.host_id))? {
        let template = match status {
            SubmissionStatus::Approved => "submission_approved",
            _ => "submission_rejected",
        };
        notifier.send(
            template,
            &host.email,
            &serde_json::json!({
                "propertyId": property.id,
                "title": property.title,
                "note": property.review_note,
            }),
        );
    }

    Ok(HttpResponse::Ok().json(property))
}

fn require_review_key(req: &HttpRequest) -> Result<(), ApiError> {
    let supplied = req
        .headers()
        .get("X-Review-Key")
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;
    if supplied != config::review_key() {
        return Err(ApiError::Forbidden);
    }
    Ok(())
}

fn str_list(value: &serde_json::Value, key: &str) -> Vec<String> {
    value[key]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Reject unknown values outright (this is a host-facing form, not a
/// pasted URL), dedupe, and keep the configuration order.
fn validated_list(
    values: Vec<String>,
    is_known: impl Fn(&str) -> bool,
    rank: impl Fn(&str) -> usize,
    what: &str,
) -> Result<Vec<String>, ApiError> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !is_known(&value) {
            return Err(ApiError::BadRequest(format!("Unknown {}: {}", what, value)));
        }
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out.sort_by_key(|v| rank(v));
    Ok(out)
}

fn experience_rank(key: &str) -> usize {
    EXPERIENCES
        .iter()
        .position(|e| e.key == key)
        .unwrap_or(usize::MAX)
}

fn url_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"https?://[^\s]+").expect("Regex should compile"))
}

/// Sanitize host-written descriptions and turn bare URLs into safe links.
fn sanitize_description(description: &str) -> String {
    let clean = Builder::default()
        .link_rel(Some("noopener noreferrer"))
        .clean(description)
        .to_string();

    url_regex()
        .replace_all(&clean, |caps: &regex::Captures| {
            let url = &caps[0];
            let escaped_url = encode_double_quoted_attribute(url);
            format!(r#"<a href="{}" target="_blank">{}</a>"#, escaped_url, url)
        })
        .to_string()
}
