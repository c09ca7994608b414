//! Shared test infrastructure.
//!
//! Every test gets its own SQLite file inside a `TempDir`, migrated with the
//! same migrator the server uses.
#![allow(dead_code)]

use tempfile::TempDir;

use slidedeck::db::{self, DbPool};
use slidedeck::models::slide::{self, NewSlide, Slide};

pub struct TestDb {
    // Keeps the database file alive for the pool's lifetime
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Setup an empty, migrated test database.
pub async fn setup_test_db() -> TestDb {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let url = format!("sqlite://{}", dir.path().join("test.db").display());
    let pool = db::init_pool(&url, 4)
        .await
        .expect("Failed to open test DB");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    TestDb { _dir: dir, pool }
}

/// Append one slide per content string, in order.
pub async fn seed_slides(pool: &DbPool, contents: &[&str]) -> Vec<Slide> {
    let mut created = Vec::new();
    for content in contents {
        let s = slide::create(
            pool,
            &NewSlide {
                content: Some(content.to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("create slide");
        created.push(s);
    }
    created
}

pub fn contents(slides: &[Slide]) -> Vec<String> {
    slides.iter().map(|s| s.content.clone()).collect()
}

pub fn orders(slides: &[Slide]) -> Vec<i64> {
    slides.iter().map(|s| s.order).collect()
}

/// Orders must be exactly `0..n-1`.
pub fn assert_contiguous(slides: &[Slide]) {
    let expected: Vec<i64> = (0..slides.len() as i64).collect();
    assert_eq!(orders(slides), expected, "orders are not contiguous");
}
