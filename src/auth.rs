use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use crate::config::token_expiration_hours;
use crate::core::db::{host_key, token_key, Store, HOSTS_LIST_KEY, TOKENS_LIST_KEY};
use crate::core::errors::ApiError;
use crate::core::helpers::{now_iso, validate_uuid, verify_password};
use crate::models::models::{Host, TokenData};

pub async fn login(
    store: web::Data<Store>,
    creds: web::Json<serde_json::Value>,
) -> Result<HttpResponse, ApiError> {
    let email = creds["email"].as_str().unwrap_or_default();
    let password = creds["password"].as_str().unwrap_or_default();

    let hosts: Vec<String> = store.get_json(HOSTS_LIST_KEY)?.unwrap_or_default();

    for id in hosts {
        if let Some(host) = store.get_json::<Host>(&host_key(&id))? {
            if host.id.is_empty() || !validate_uuid(&host.id) {
                return Err(ApiError::Unauthorized);
            }
            if host.email == email && verify_password(password, &host.password) {
                let token = Uuid::new_v4().to_string();
                let data = TokenData {
                    host_id: host.id.clone(),
                    created_at: now_iso(),
                };
                store.set_json(&token_key(&token), &data)?;

                let mut tokens: Vec<String> = store.get_json(TOKENS_LIST_KEY)?.unwrap_or_default();
                tokens.push(token.clone());
                store.set_json(TOKENS_LIST_KEY, &tokens)?;

                return Ok(HttpResponse::Ok().json(serde_json::json!({
                    "token": token,
                    "host_id": host.id
                })));
            }
        }
    }

    Err(ApiError::Unauthorized)
}

pub async fn logout(req: HttpRequest, store: web::Data<Store>) -> Result<HttpResponse, ApiError> {
    let token = bearer_token(&req).ok_or(ApiError::Unauthorized)?;
    store.delete(&token_key(token))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Logged out successfully"
    })))
}

/// Resolve the bearer token to a host id, or `None` when the token is
/// missing, expired, or belongs to a deleted host.
pub fn validate_token(req: &HttpRequest, store: &Store) -> Option<String> {
    let token = bearer_token(req)?;
    let data = store.get_json::<TokenData>(&token_key(token)).ok()??;

    if let Ok(created) = chrono::DateTime::parse_from_rfc3339(&data.created_at) {
        let now = chrono::Utc::now();
        let age_hours = (now - created.with_timezone(&chrono::Utc)).num_hours();
        if age_hours > token_expiration_hours() {
            return None;
        }
    }

    // the host may have been deleted since the token was issued
    store
        .get_json::<Host>(&host_key(&data.host_id))
        .ok()??;

    Some(data.host_id)
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    header.strip_prefix("Bearer ")
}
