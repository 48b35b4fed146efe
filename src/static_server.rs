use actix_web::{HttpRequest, HttpResponse};
use mime_guess::from_path;
use rust_embed::RustEmbed;

use crate::core::errors::ApiError;

#[derive(RustEmbed)]
#[folder = "static"]
struct Assets;

/// Fallback handler: embedded marketing/shell pages.
pub async fn serve(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    if req.method() != actix_web::http::Method::GET {
        return Err(ApiError::NotFound("No route found".to_string()));
    }

    let file_path = match req.path() {
        "/" | "/index.html" => "index.html",
        other => other.trim_start_matches('/'),
    };

    let file = Assets::get(file_path)
        .ok_or_else(|| ApiError::NotFound("File not found".to_string()))?;

    let mime = from_path(file_path).first_or_octet_stream();

    Ok(HttpResponse::Ok()
        .content_type(mime.as_ref())
        .body(file.data.to_vec()))
}
