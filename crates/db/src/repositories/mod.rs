use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use verdant_core::domain::record::SustainabilityRecord;
use verdant_core::grade::Grade;

pub mod memory;
pub mod product;

pub use memory::InMemoryProductRepository;
pub use product::SqlProductRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// A scored product as persisted, keyed by its listing URL.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub url: String,
    pub name: String,
    pub category: String,
    pub eco_score: f64,
    pub grade: Grade,
    pub co2_footprint_kg: f64,
    pub record: SustainabilityRecord,
    pub scored_at: DateTime<Utc>,
}

#[async_trait]
pub trait ProductRecordRepository: Send + Sync {
    async fn find_by_url(&self, url: &str) -> Result<Option<ProductRecord>, RepositoryError>;

    async fn upsert_by_url(&self, record: ProductRecord) -> Result<(), RepositoryError>;

    /// Records in the same category scoring at least `min_score`, best first.
    async fn find_alternatives(
        &self,
        category: &str,
        min_score: f64,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, RepositoryError>;
}
