use std::collections::HashMap;

use tokio::sync::RwLock;

use super::{ProductRecord, ProductRecordRepository, RepositoryError};

/// Map-backed repository for tests and provider-less demos.
#[derive(Default)]
pub struct InMemoryProductRepository {
    records: RwLock<HashMap<String, ProductRecord>>,
}

#[async_trait::async_trait]
impl ProductRecordRepository for InMemoryProductRepository {
    async fn find_by_url(&self, url: &str) -> Result<Option<ProductRecord>, RepositoryError> {
        let records = self.records.read().await;
        Ok(records.get(url).cloned())
    }

    async fn upsert_by_url(&self, record: ProductRecord) -> Result<(), RepositoryError> {
        let mut records = self.records.write().await;
        records.insert(record.url.clone(), record);
        Ok(())
    }

    async fn find_alternatives(
        &self,
        category: &str,
        min_score: f64,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, RepositoryError> {
        let records = self.records.read().await;
        let mut matching: Vec<ProductRecord> = records
            .values()
            .filter(|record| record.category == category && record.eco_score >= min_score)
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.eco_score.partial_cmp(&a.eco_score).unwrap_or(std::cmp::Ordering::Equal)
        });
        matching.truncate(limit as usize);
        Ok(matching)
    }
}
