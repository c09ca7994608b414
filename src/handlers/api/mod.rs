pub mod slides;

use actix_web::{
    web, Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    error::InternalError,
    middleware::Next,
};

use crate::errors::ApiErrorResponse;

/// Rejects POST/PUT requests whose body is not declared as JSON.
/// GET and DELETE carry no body and are exempt.
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == actix_web::http::Method::POST || method == actix_web::http::Method::PUT {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let response = HttpResponse::BadRequest().json(ApiErrorResponse::new(
                "Content-Type must be application/json for mutation requests",
            ));
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Malformed JSON and wrongly typed fields become a 400 with the parser's message.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(1 << 20)
        .error_handler(|err, _req| {
            let response = HttpResponse::BadRequest()
                .json(ApiErrorResponse::with_details("Validation failed", err.to_string()));
            InternalError::from_response(err, response).into()
        })
}

/// An id that is not an integer cannot name a slide.
fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::NotFound().json(ApiErrorResponse::new("Slide not found"));
        InternalError::from_response(err, response).into()
    })
}

/// Configure slide API routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/slides")
            .app_data(json_config())
            .app_data(path_config())
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::get().to(slides::list))
            .route("", web::post().to(slides::create))
            .route("/{id}", web::get().to(slides::read))
            .route("/{id}", web::put().to(slides::update))
            .route("/{id}", web::delete().to(slides::delete)),
    );
}
