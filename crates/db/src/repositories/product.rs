use chrono::{DateTime, Utc};
use sqlx::Row;

use super::{ProductRecord, ProductRecordRepository, RepositoryError};
use crate::DbPool;

pub struct SqlProductRepository {
    pool: DbPool,
}

impl SqlProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> Result<ProductRecord, RepositoryError> {
    let url: String = row.try_get("url").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let name: String = row.try_get("name").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let category: String =
        row.try_get("category").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let eco_score: f64 =
        row.try_get("eco_score").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let grade_str: String =
        row.try_get("grade").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let co2_footprint_kg: f64 =
        row.try_get("co2_footprint_kg").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let record_json: String =
        row.try_get("record").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let scored_at_str: String =
        row.try_get("scored_at").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    let grade = grade_str
        .parse()
        .map_err(|_| RepositoryError::Decode(format!("unknown grade `{grade_str}`")))?;
    let record = serde_json::from_str(&record_json)
        .map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let scored_at = DateTime::parse_from_rfc3339(&scored_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Decode(e.to_string()))?;

    Ok(ProductRecord {
        url,
        name,
        category,
        eco_score,
        grade,
        co2_footprint_kg,
        record,
        scored_at,
    })
}

#[async_trait::async_trait]
impl ProductRecordRepository for SqlProductRepository {
    async fn find_by_url(&self, url: &str) -> Result<Option<ProductRecord>, RepositoryError> {
        let row = sqlx::query(
            "SELECT url, name, category, eco_score, grade, co2_footprint_kg, record, scored_at
             FROM products WHERE url = ?",
        )
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(ref r) => Ok(Some(row_to_record(r)?)),
            None => Ok(None),
        }
    }

    async fn upsert_by_url(&self, record: ProductRecord) -> Result<(), RepositoryError> {
        let record_json = serde_json::to_string(&record.record)
            .map_err(|e| RepositoryError::Decode(e.to_string()))?;

        sqlx::query(
            "INSERT INTO products (url, name, category, eco_score, grade,
                                   co2_footprint_kg, record, scored_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(url) DO UPDATE SET
                 name = excluded.name,
                 category = excluded.category,
                 eco_score = excluded.eco_score,
                 grade = excluded.grade,
                 co2_footprint_kg = excluded.co2_footprint_kg,
                 record = excluded.record,
                 scored_at = excluded.scored_at",
        )
        .bind(&record.url)
        .bind(&record.name)
        .bind(&record.category)
        .bind(record.eco_score)
        .bind(record.grade.as_str())
        .bind(record.co2_footprint_kg)
        .bind(&record_json)
        .bind(record.scored_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_alternatives(
        &self,
        category: &str,
        min_score: f64,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT url, name, category, eco_score, grade, co2_footprint_kg, record, scored_at
             FROM products
             WHERE category = ? AND eco_score >= ?
             ORDER BY eco_score DESC
             LIMIT ?",
        )
        .bind(category)
        .bind(min_score)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_record).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use verdant_core::{ExternalSignals, ProductSignal, ScoringEngine};

    use super::SqlProductRepository;
    use crate::migrations::run_pending;
    use crate::repositories::{ProductRecord, ProductRecordRepository};
    use crate::connect_with_settings;

    async fn repo() -> SqlProductRepository {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        run_pending(&pool).await.expect("run migrations");
        SqlProductRepository::new(pool)
    }

    fn sample(url: &str, category: &str, eco_score: f64) -> ProductRecord {
        let engine = ScoringEngine::new().expect("engine builds");
        let signal = ProductSignal::new("Bamboo Bowl", category)
            .with_description("solid bamboo, compostable");
        let record = engine.score(&signal, &ExternalSignals::default()).expect("scores");

        ProductRecord {
            url: url.to_owned(),
            name: record.product_name.clone(),
            category: category.to_owned(),
            eco_score,
            grade: record.overall_grade,
            co2_footprint_kg: record.co2_footprint_kg,
            record,
            scored_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn upsert_then_find_round_trips_the_record_json() {
        let repo = repo().await;
        let record = sample("https://shop.example/p/1", "Home & Garden", 82.0);

        repo.upsert_by_url(record.clone()).await.expect("upsert");
        let found = repo.find_by_url(&record.url).await.expect("find");

        let found = found.expect("record exists");
        assert_eq!(found.url, record.url);
        assert_eq!(found.eco_score, record.eco_score);
        assert_eq!(found.record, record.record);
    }

    #[tokio::test]
    async fn second_upsert_replaces_the_existing_row() {
        let repo = repo().await;
        let first = sample("https://shop.example/p/1", "Home & Garden", 60.0);
        let second = sample("https://shop.example/p/1", "Home & Garden", 75.0);

        repo.upsert_by_url(first).await.expect("first upsert");
        repo.upsert_by_url(second).await.expect("second upsert");

        let found = repo
            .find_by_url("https://shop.example/p/1")
            .await
            .expect("find")
            .expect("record exists");
        assert_eq!(found.eco_score, 75.0);
    }

    #[tokio::test]
    async fn find_alternatives_filters_and_orders_by_score() {
        let repo = repo().await;
        repo.upsert_by_url(sample("https://shop.example/p/1", "Clothing", 55.0))
            .await
            .expect("upsert");
        repo.upsert_by_url(sample("https://shop.example/p/2", "Clothing", 88.0))
            .await
            .expect("upsert");
        repo.upsert_by_url(sample("https://shop.example/p/3", "Clothing", 72.0))
            .await
            .expect("upsert");
        repo.upsert_by_url(sample("https://shop.example/p/4", "Beauty", 95.0))
            .await
            .expect("upsert");

        let found = repo.find_alternatives("Clothing", 60.0, 5).await.expect("query");

        let urls: Vec<&str> = found.iter().map(|record| record.url.as_str()).collect();
        assert_eq!(urls, vec!["https://shop.example/p/2", "https://shop.example/p/3"]);
    }

    #[tokio::test]
    async fn find_alternatives_honors_the_limit() {
        let repo = repo().await;
        for index in 0..4 {
            let url = format!("https://shop.example/p/{index}");
            repo.upsert_by_url(sample(&url, "Clothing", 70.0 + f64::from(index)))
                .await
                .expect("upsert");
        }

        let found = repo.find_alternatives("Clothing", 0.0, 2).await.expect("query");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].eco_score, 73.0);
    }
}
