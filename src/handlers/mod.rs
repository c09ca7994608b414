pub mod api;

use actix_web::HttpResponse;

use crate::errors::ApiErrorResponse;

/// Fallback for unknown routes (must be registered last).
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiErrorResponse::new("Not found"))
}
