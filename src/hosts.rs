use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use crate::auth::validate_token;
use crate::config::{MAX_ABOUT_LENGTH, MAX_NAME_LENGTH, MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH};
use crate::core::db::{host_key, token_key, Store, HOSTS_LIST_KEY, TOKENS_LIST_KEY};
use crate::core::errors::ApiError;
use crate::core::helpers::{hash_password, now_iso, sanitize_text, validate_uuid, verify_password};
use crate::models::models::{BillingStatus, Host, TokenData};

fn build_host_json(host: &Host) -> serde_json::Value {
    serde_json::json!({
        "id": host.id,
        "email": host.email,
        "name": host.name,
        "about": host.about.as_ref().unwrap_or(&String::new()),
        "billing": host.billing,
    })
}

pub async fn create_host(
    store: web::Data<Store>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, ApiError> {
    let email = body["email"].as_str().unwrap_or("");
    let name = body["name"].as_str().unwrap_or("");
    let password = body["password"].as_str().unwrap_or("");

    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::BadRequest("A valid email is required".to_string()));
    }
    if name.len() < MIN_NAME_LENGTH || name.len() > MAX_NAME_LENGTH {
        return Err(ApiError::BadRequest("Name must be 3-50 characters".to_string()));
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let sanitized_name = sanitize_text(name);

    // Check duplicate email
    let existing_hosts: Vec<String> = store.get_json(HOSTS_LIST_KEY)?.unwrap_or_default();
    for id in &existing_hosts {
        if let Some(h) = store.get_json::<Host>(&host_key(id))? {
            if h.email == email {
                return Err(ApiError::Conflict("An account with this email exists".to_string()));
            }
        }
    }

    let id = Uuid::new_v4().to_string();
    let host = Host {
        id: id.clone(),
        email: email.to_string(),
        name: sanitized_name,
        password: hash_password(password)?,
        about: None,
        billing: BillingStatus::Trial,
        created_at: now_iso(),
    };

    store.set_json(&host_key(&id), &host)?;

    let mut hosts = existing_hosts;
    hosts.push(id);
    store.set_json(HOSTS_LIST_KEY, &hosts)?;

    Ok(HttpResponse::Created().json(build_host_json(&host)))
}

pub async fn get_profile(req: HttpRequest, store: web::Data<Store>) -> Result<HttpResponse, ApiError> {
    let host_id = validate_token(&req, &store).ok_or(ApiError::Unauthorized)?;

    match store.get_json::<Host>(&host_key(&host_id))? {
        Some(host) => Ok(HttpResponse::Ok().json(build_host_json(&host))),
        None => Err(ApiError::NotFound("Host not found".to_string())),
    }
}

/// Public host card shown on listing pages.
pub async fn get_host_details(
    path: web::Path<String>,
    store: web::Data<Store>,
) -> Result<HttpResponse, ApiError> {
    let host_id = path.into_inner();
    if host_id.is_empty() || !validate_uuid(&host_id) {
        return Err(ApiError::BadRequest("Host ID required".to_string()));
    }

    match store.get_json::<Host>(&host_key(&host_id))? {
        Some(host) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "id": host.id,
            "name": host.name,
            "about": host.about.as_ref().unwrap_or(&String::new()),
        }))),
        None => Err(ApiError::NotFound("Host not found".to_string())),
    }
}

pub async fn update_profile(
    req: HttpRequest,
    store: web::Data<Store>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, ApiError> {
    let host_id = validate_token(&req, &store).ok_or(ApiError::Unauthorized)?;

    let mut host = store
        .get_json::<Host>(&host_key(&host_id))?
        .ok_or_else(|| ApiError::NotFound("Host not found".to_string()))?;
    let mut password_changed = false;

    if let Some(about) = body["about"].as_str() {
        if about.len() > MAX_ABOUT_LENGTH {
            return Err(ApiError::BadRequest("About too long (max 500 chars)".to_string()));
        }
        let sanitized = sanitize_text(about);
        host.about = if sanitized.is_empty() { None } else { Some(sanitized) };
    }

    if let Some(new_password) = body["new_password"].as_str() {
        if new_password.len() < MIN_PASSWORD_LENGTH {
            return Err(ApiError::BadRequest(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        let old_password = body["old_password"]
            .as_str()
            .ok_or_else(|| ApiError::BadRequest("Current password required".to_string()))?;

        if !verify_password(old_password, &host.password) {
            return Err(ApiError::Unauthorized);
        }

        host.password = hash_password(new_password)?;
        password_changed = true;
    }

    store.set_json(&host_key(&host_id), &host)?;

    // A password change invalidates every token for this host and issues a
    // fresh one so the current session stays logged in.
    let mut response_data = build_host_json(&host);
    if password_changed {
        let all_tokens: Vec<String> = store.get_json(TOKENS_LIST_KEY)?.unwrap_or_default();

        let mut kept_tokens = Vec::with_capacity(all_tokens.len());
        for token in all_tokens {
            match store.get_json::<TokenData>(&token_key(&token))? {
                Some(data) if data.host_id == host_id => {
                    store.delete(&token_key(&token))?;
                }
                _ => kept_tokens.push(token),
            }
        }

        let new_token = Uuid::new_v4().to_string();
        let token_data = TokenData {
            host_id: host_id.clone(),
            created_at: now_iso(),
        };
        store.set_json(&token_key(&new_token), &token_data)?;
        kept_tokens.push(new_token.clone());
        store.set_json(TOKENS_LIST_KEY, &kept_tokens)?;

        response_data["token"] = serde_json::Value::String(new_token);
    }

    Ok(HttpResponse::Ok().json(response_data))
}
