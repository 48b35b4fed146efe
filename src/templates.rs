use actix_web::{web, HttpResponse};
use rust_embed::RustEmbed;

use crate::core::db::{host_key, Store};
use crate::core::errors::ApiError;
use crate::models::models::Host;
use crate::properties::load_listed_property;

#[derive(RustEmbed)]
#[folder = "static"]
struct Assets;

/// `GET /stay/{id}` — server-rendered listing page from the embedded
/// template. The description is already sanitized HTML; everything else is
/// escaped here.
pub async fn render_stay_page(
    path: web::Path<String>,
    store: web::Data<Store>,
) -> Result<HttpResponse, ApiError> {
    let property = load_listed_property(&store, &path.into_inner())?;

    let template = Assets::get("stay.html")
        .ok_or_else(|| anyhow::anyhow!("Stay template not found"))?
        .data
        .to_vec();

    let mut html = String::from_utf8(template).map_err(anyhow::Error::from)?;

    html = html.replace(
        "STAY_TITLE",
        &html_escape::encode_text(&property.title).to_string(),
    );
    html = html.replace(
        "STAY_CITY",
        &html_escape::encode_text(&property.city).to_string(),
    );
    html = html.replace(
        "STAY_TYPE",
        &html_escape::encode_text(&property.property_type).to_string(),
    );
    html = html.replace("STAY_SLEEPS", &property.sleeps.to_string());
    html = html.replace("STAY_PRICE", &property.nightly_price.to_string());
    html = html.replace("STAY_DESCRIPTION", &property.description);

    let host_name = store
        .get_json::<Host>(&host_key(&property.host_id))?
        .map(|h| h.name)
        .unwrap_or_default();
    html = html.replace(
        "STAY_HOST",
        &html_escape::encode_text(&host_name).to_string(),
    );

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}
