use chrono::{SecondsFormat, Utc};
use sqlx::{Sqlite, SqliteConnection, Transaction};

use super::types::*;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::validate::validate_slide_fields;

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Treat empty strings like omitted fields.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Clamp a requested position into `0..=max`.
fn clamp_position(order: i64, max: usize) -> usize {
    usize::try_from(order.max(0)).unwrap_or(usize::MAX).min(max)
}

/// Write transactions take SQLite's write lock up front, so overlapping
/// mutations queue on the busy timeout instead of failing a lock upgrade.
async fn begin_write(pool: &DbPool) -> Result<Transaction<'static, Sqlite>, AppError> {
    Ok(pool.begin_with("BEGIN IMMEDIATE").await?)
}

/// All slides, ascending by order. Ties (only possible in data written
/// outside this module) fall back to id.
pub async fn list(pool: &DbPool) -> Result<Vec<Slide>, AppError> {
    let slides = sqlx::query_as::<_, Slide>(
        "SELECT id, content, sort_order, layout, created_at, updated_at \
         FROM slides ORDER BY sort_order ASC, id ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(slides)
}

pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Slide>, AppError> {
    let slide = sqlx::query_as::<_, Slide>(
        "SELECT id, content, sort_order, layout, created_at, updated_at FROM slides WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(slide)
}

pub async fn count(pool: &DbPool) -> Result<i64, AppError> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM slides")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

async fn fetch(conn: &mut SqliteConnection, id: i64) -> Result<Option<Slide>, AppError> {
    let slide = sqlx::query_as::<_, Slide>(
        "SELECT id, content, sort_order, layout, created_at, updated_at FROM slides WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(slide)
}

async fn ordered_ids(conn: &mut SqliteConnection) -> Result<Vec<i64>, AppError> {
    let ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM slides ORDER BY sort_order ASC, id ASC")
        .fetch_all(&mut *conn)
        .await?;
    Ok(ids)
}

/// Rewrite `sort_order` so each id sits at its index in `ids`.
/// Rows already in place are left untouched.
async fn resequence(conn: &mut SqliteConnection, ids: &[i64], now: &str) -> Result<(), AppError> {
    for (position, &id) in ids.iter().enumerate() {
        sqlx::query(
            "UPDATE slides SET sort_order = ?1, updated_at = ?2 \
             WHERE id = ?3 AND sort_order <> ?1",
        )
        .bind(position as i64)
        .bind(now)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// Create a slide. Without an `order` it is appended; with one it is
/// inserted at that position (clamped to the end) and later slides move down.
pub async fn create(pool: &DbPool, input: &NewSlide) -> Result<Slide, AppError> {
    validate_slide_fields(input.content.as_deref(), input.order, input.layout.as_deref())?;

    let content = non_empty(input.content.as_deref()).unwrap_or(DEFAULT_CONTENT);
    let layout = non_empty(input.layout.as_deref()).unwrap_or(DEFAULT_LAYOUT);
    let now = now();

    let mut tx = begin_write(pool).await?;

    let mut ids = ordered_ids(&mut tx).await?;
    let position = input
        .order
        .map_or(ids.len(), |order| clamp_position(order, ids.len()));

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO slides (content, sort_order, layout, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?4) RETURNING id",
    )
    .bind(content)
    .bind(position as i64)
    .bind(layout)
    .bind(&now)
    .fetch_one(&mut *tx)
    .await?;

    ids.insert(position, id);
    resequence(&mut tx, &ids, &now).await?;

    let slide = fetch(&mut tx, id).await?.ok_or(AppError::NotFound)?;
    tx.commit().await?;

    log::info!("Created slide {} at order {}", slide.id, slide.order);
    Ok(slide)
}

/// Merge `patch` over the stored slide. A present `order` moves the slide to
/// that position (clamped to the last slot); the others close up around it.
pub async fn update(pool: &DbPool, id: i64, patch: &SlidePatch) -> Result<Slide, AppError> {
    validate_slide_fields(patch.content.as_deref(), patch.order, patch.layout.as_deref())?;

    let now = now();
    let mut tx = begin_write(pool).await?;

    let existing = fetch(&mut tx, id).await?.ok_or(AppError::NotFound)?;
    let content = non_empty(patch.content.as_deref()).unwrap_or(&existing.content);
    let layout = non_empty(patch.layout.as_deref()).unwrap_or(&existing.layout);

    sqlx::query("UPDATE slides SET content = ?1, layout = ?2, updated_at = ?3 WHERE id = ?4")
        .bind(content)
        .bind(layout)
        .bind(&now)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if let Some(order) = patch.order {
        let mut ids = ordered_ids(&mut tx).await?;
        ids.retain(|&other| other != id);
        let position = clamp_position(order, ids.len());
        ids.insert(position, id);
        resequence(&mut tx, &ids, &now).await?;
    }

    let slide = fetch(&mut tx, id).await?.ok_or(AppError::NotFound)?;
    tx.commit().await?;

    log::info!("Updated slide {} (order {})", slide.id, slide.order);
    Ok(slide)
}

/// Delete a slide and close the gap it leaves, so orders stay `0..n-1`.
pub async fn delete(pool: &DbPool, id: i64) -> Result<(), AppError> {
    let mut tx = begin_write(pool).await?;

    let result = sqlx::query("DELETE FROM slides WHERE id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    let ids = ordered_ids(&mut tx).await?;
    resequence(&mut tx, &ids, &now()).await?;
    tx.commit().await?;

    log::info!("Deleted slide {id}, {} remaining", ids.len());
    Ok(())
}

const DEMO_SLIDES: [&str; 3] = [
    "# Welcome to PPT Web\n\nCreate beautiful presentations with ease.",
    "# Features\n\n- Real-time editing\n- Markdown support\n- Beautiful UI",
    "# Get Started\n\n1. Create new slides\n2. Edit content\n3. Save changes",
];

/// Insert the demo deck into an empty table. Returns how many slides were created.
pub async fn seed_demo(pool: &DbPool) -> Result<usize, AppError> {
    let existing = count(pool).await?;
    if existing > 0 {
        log::info!("Deck already has {existing} slides, skipping demo seed");
        return Ok(0);
    }

    for content in DEMO_SLIDES {
        create(
            pool,
            &NewSlide {
                content: Some(content.to_string()),
                ..Default::default()
            },
        )
        .await?;
    }

    log::info!("Seeded {} demo slides", DEMO_SLIDES.len());
    Ok(DEMO_SLIDES.len())
}
