use actix_web::{web, HttpResponse};

use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::slide::{self, NewSlide, SlidePatch};

/// GET /api/slides - Every slide, ascending by order.
pub async fn list(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let slides = slide::list(&pool).await?;
    Ok(HttpResponse::Ok().json(slides))
}

/// GET /api/slides/{id}
pub async fn read(pool: web::Data<DbPool>, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let slide_id = path.into_inner();
    let found = slide::find_by_id(&pool, slide_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(found))
}

/// POST /api/slides - Create a slide; appended unless `order` is given.
pub async fn create(
    pool: web::Data<DbPool>,
    body: web::Json<NewSlide>,
) -> Result<HttpResponse, AppError> {
    let created = slide::create(&pool, &body).await?;
    Ok(HttpResponse::Created().json(created))
}

/// PUT /api/slides/{id} - Partial update; omitted fields keep their value.
pub async fn update(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
    body: web::Json<SlidePatch>,
) -> Result<HttpResponse, AppError> {
    let slide_id = path.into_inner();
    let updated = slide::update(&pool, slide_id, &body).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/slides/{id} - Remaining slides are renumbered `0..n-1`.
pub async fn delete(pool: web::Data<DbPool>, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let slide_id = path.into_inner();
    slide::delete(&pool, slide_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
