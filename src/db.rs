// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Document store for testimonials.
//!
//! Handlers talk to storage through [`TestimonialStore`]; [`Database`] is
//! the SurrealDB-backed implementation.

use crate::config::StoreConfig;
use crate::models::{SortOrder, Testimonial};
use std::future::Future;
use surrealdb::{
    engine::local::{Db, Mem},
    Surreal,
};
use thiserror::Error;

const TABLE: &str = "testimonials";

/// Storage error types.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] surrealdb::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, StoreError>;

/// Operations the API needs from a document store.
pub trait TestimonialStore: Send + Sync + 'static {
    /// List all testimonials in the given order.
    fn find(&self, sort: SortOrder) -> impl Future<Output = Result<Vec<Testimonial>>> + Send;

    /// Persist a testimonial and return the stored record.
    fn create(&self, record: Testimonial) -> impl Future<Output = Result<Testimonial>> + Send;
}

/// Database connection wrapper
#[derive(Clone)]
pub struct Database {
    db: Surreal<Db>,
}

impl Database {
    /// Connect to SurrealDB
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let db = if config.path == "memory" {
            Surreal::new::<Mem>(()).await?
        } else {
            Self::open_persistent(&config.path).await?
        };

        db.use_ns(config.namespace.as_str())
            .use_db(config.database.as_str())
            .await?;

        Self::init_schema(&db).await?;

        Ok(Self { db })
    }

    /// Initialize database schema. DEFINE statements overwrite, so this
    /// can run against an existing database.
    async fn init_schema(db: &Surreal<Db>) -> Result<()> {
        db.query(
            r#"
            DEFINE TABLE testimonials SCHEMALESS;
            DEFINE INDEX created_at_idx ON testimonials COLUMNS createdAt;
        "#,
        )
        .await?
        .check()?;

        Ok(())
    }

    #[cfg(feature = "rocksdb")]
    async fn open_persistent(path: &str) -> Result<Surreal<Db>> {
        Ok(Surreal::new::<surrealdb::engine::local::RocksDb>(path).await?)
    }

    #[cfg(not(feature = "rocksdb"))]
    async fn open_persistent(path: &str) -> Result<Surreal<Db>> {
        Err(StoreError::Unavailable(format!(
            "persistent store at {path} requires the rocksdb feature"
        )))
    }
}

impl TestimonialStore for Database {
    async fn find(&self, sort: SortOrder) -> Result<Vec<Testimonial>> {
        let mut result = self
            .db
            .query("SELECT name, role, comment, image, createdAt, ip FROM testimonials")
            .await?;

        let mut records: Vec<Testimonial> = result.take(0)?;

        // Timestamps are stored as RFC 3339 text, whose fractional digits
        // vary in width, so ordering happens on the parsed values.
        match sort {
            SortOrder::NewestFirst => records.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOrder::OldestFirst => records.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        }

        Ok(records)
    }

    async fn create(&self, record: Testimonial) -> Result<Testimonial> {
        let created: Option<Testimonial> = self
            .db
            .create(TABLE)
            .content(&record)
            .await?
            .into_iter()
            .next();

        created.ok_or_else(|| StoreError::Unavailable("Failed to create record".to_string()))
    }
}
