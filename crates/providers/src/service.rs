//! Orchestration of scoring: cache lookup, provider calls, heuristic
//! fallback, and persistence.
//!
//! Provider failures never fail a scoring request. Each provider gets one
//! attempt; on error the failure is logged and the engine scores from its
//! built-in heuristics instead.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::{info, warn};

use verdant_core::alternatives::RankOptions;
use verdant_core::carbon::{self, CarbonAssessment};
use verdant_core::domain::alternative::{AlternativeCandidate, CandidateProduct, CurrentProduct};
use verdant_core::engine::{ExternalSignals, ScoringEngine};
use verdant_core::errors::ApplicationError;
use verdant_core::ProductSignal;
use verdant_db::repositories::{ProductRecord, ProductRecordRepository};

use crate::{CarbonProvider, MlAnalysisProvider, SearchProvider};

/// Cached scores younger than this are served without re-scoring.
const CACHE_MAX_AGE_DAYS: i64 = 7;

/// Floor applied when falling back to stored records as the candidate pool.
const REPO_FALLBACK_MIN_DELTA: f64 = 10.0;

/// A standalone carbon estimate: where the CO2e came from plus the quick
/// composite assessment derived from it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CarbonReport {
    pub method: String,
    #[serde(flatten)]
    pub assessment: CarbonAssessment,
}

pub struct ScoreService {
    engine: ScoringEngine,
    repository: Arc<dyn ProductRecordRepository>,
    ml: Option<Arc<dyn MlAnalysisProvider>>,
    carbon: Option<Arc<dyn CarbonProvider>>,
    search: Option<Arc<dyn SearchProvider>>,
}

pub struct ScoreServiceBuilder {
    repository: Arc<dyn ProductRecordRepository>,
    ml: Option<Arc<dyn MlAnalysisProvider>>,
    carbon: Option<Arc<dyn CarbonProvider>>,
    search: Option<Arc<dyn SearchProvider>>,
}

impl ScoreServiceBuilder {
    pub fn new(repository: Arc<dyn ProductRecordRepository>) -> Self {
        Self { repository, ml: None, carbon: None, search: None }
    }

    pub fn with_ml(mut self, provider: Arc<dyn MlAnalysisProvider>) -> Self {
        self.ml = Some(provider);
        self
    }

    pub fn with_carbon(mut self, provider: Arc<dyn CarbonProvider>) -> Self {
        self.carbon = Some(provider);
        self
    }

    pub fn with_search(mut self, provider: Arc<dyn SearchProvider>) -> Self {
        self.search = Some(provider);
        self
    }

    pub fn build(self) -> Result<ScoreService, ApplicationError> {
        let engine = ScoringEngine::new()
            .map_err(|error| ApplicationError::Configuration(error.to_string()))?;
        Ok(ScoreService {
            engine,
            repository: self.repository,
            ml: self.ml,
            carbon: self.carbon,
            search: self.search,
        })
    }
}

impl ScoreService {
    /// Score one product, serving a fresh cached record when one exists and
    /// persisting the result when the signal carries a listing URL.
    pub async fn score_product(
        &self,
        signal: &ProductSignal,
    ) -> Result<ProductRecord, ApplicationError> {
        if let Some(url) = signal.url.as_deref() {
            if let Some(cached) = self.fresh_cached(url).await? {
                info!(
                    event_name = "scoring.cache.hit",
                    url = %url,
                    eco_score = cached.eco_score,
                    "serving cached sustainability record"
                );
                return Ok(cached);
            }
        }

        let signals = self.gather_signals(signal).await;
        let record = self.engine.score(signal, &signals).map_err(ApplicationError::Domain)?;

        let stored = ProductRecord {
            url: signal.url.clone().unwrap_or_default(),
            name: record.product_name.clone(),
            category: record.category.clone(),
            eco_score: record.overall_score,
            grade: record.overall_grade,
            co2_footprint_kg: record.co2_footprint_kg,
            record,
            scored_at: Utc::now(),
        };

        if !stored.url.is_empty() {
            self.repository
                .upsert_by_url(stored.clone())
                .await
                .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
        }

        info!(
            event_name = "scoring.record.created",
            product = %stored.name,
            category = %stored.category,
            eco_score = stored.eco_score,
            grade = %stored.grade,
            "scored product"
        );

        Ok(stored)
    }

    /// Rank greener alternatives for an already-scored product. Returns
    /// `None` when no record exists for the URL.
    pub async fn rank_alternatives(
        &self,
        url: &str,
        limit: usize,
    ) -> Result<Option<Vec<AlternativeCandidate>>, ApplicationError> {
        let Some(stored) = self
            .repository
            .find_by_url(url)
            .await
            .map_err(|error| ApplicationError::Persistence(error.to_string()))?
        else {
            return Ok(None);
        };

        let current = CurrentProduct {
            id: stored.url.clone(),
            eco_score: stored.eco_score,
            co2_footprint_kg: stored.co2_footprint_kg,
            price: None,
            certification_count: stored.record.certifications.len(),
        };

        let pool = self.candidate_pool(&stored, limit).await?;
        let options = RankOptions { limit, ..RankOptions::default() };

        Ok(Some(self.engine.rank_alternatives(&current, &pool, &options)))
    }

    /// Estimate a product's carbon footprint without a full scoring pass.
    /// Uses the provider's measurement when one answers; otherwise the
    /// category-average fallback. Never fails.
    pub async fn estimate_carbon(
        &self,
        category: &str,
        energy_kwh: Option<f64>,
        weight_kg: Option<f64>,
    ) -> CarbonReport {
        if let Some(provider) = &self.carbon {
            match provider.estimate(category, energy_kwh, weight_kg).await {
                Ok(estimate) => {
                    return CarbonReport {
                        method: estimate.method,
                        assessment: carbon::assess_co2e(category, estimate.co2e_kg),
                    };
                }
                Err(error) => {
                    warn!(
                        event_name = "scoring.provider.fallback",
                        provider = "carbon",
                        error = %error,
                        "carbon estimate unavailable, using category averages"
                    );
                }
            }
        }

        let co2e = carbon::fallback_estimate(category, energy_kwh, weight_kg);
        CarbonReport {
            method: "category_average".to_string(),
            assessment: carbon::assess_co2e(category, co2e),
        }
    }

    async fn fresh_cached(&self, url: &str) -> Result<Option<ProductRecord>, ApplicationError> {
        let found = self
            .repository
            .find_by_url(url)
            .await
            .map_err(|error| ApplicationError::Persistence(error.to_string()))?;

        Ok(found.filter(|record| {
            Utc::now() - record.scored_at < Duration::days(CACHE_MAX_AGE_DAYS)
        }))
    }

    async fn gather_signals(&self, signal: &ProductSignal) -> ExternalSignals {
        let mut signals = ExternalSignals::default();

        if let Some(ml) = &self.ml {
            let description = signal.description.as_deref().unwrap_or("");
            match ml.analyze(&signal.name, description).await {
                Ok(analysis) => signals.ml = Some(analysis.into()),
                Err(error) => {
                    warn!(
                        event_name = "scoring.provider.fallback",
                        provider = "ml",
                        error = %error,
                        "ml analysis unavailable, using text heuristics"
                    );
                }
            }
        }

        if let Some(carbon) = &self.carbon {
            match carbon
                .estimate(&signal.category, signal.energy_consumption_kwh, signal.weight_kg)
                .await
            {
                Ok(estimate) => signals.co2e_kg = Some(estimate.co2e_kg),
                Err(error) => {
                    warn!(
                        event_name = "scoring.provider.fallback",
                        provider = "carbon",
                        error = %error,
                        "carbon estimate unavailable, using category baselines"
                    );
                }
            }
        }

        signals
    }

    /// Assemble a candidate pool from live search results, or from stored
    /// records in the same category when no search provider is available.
    async fn candidate_pool(
        &self,
        stored: &ProductRecord,
        limit: usize,
    ) -> Result<Vec<CandidateProduct>, ApplicationError> {
        if let Some(search) = &self.search {
            let query = eco_query(&stored.name);
            // Fetch a wider net than the limit so the filter has material.
            match search.search(&query, (limit as u32).saturating_mul(3).max(10)).await {
                Ok(hits) => {
                    return Ok(hits
                        .into_iter()
                        .map(|hit| {
                            self.engine.quick_candidate(
                                hit.id,
                                hit.title,
                                hit.price,
                                hit.link,
                                &hit.raw_text,
                            )
                        })
                        .collect());
                }
                Err(error) => {
                    warn!(
                        event_name = "scoring.provider.fallback",
                        provider = "search",
                        error = %error,
                        "search unavailable, using stored records as candidates"
                    );
                }
            }
        }

        let min_score = stored.eco_score + REPO_FALLBACK_MIN_DELTA;
        let records = self
            .repository
            .find_alternatives(&stored.category, min_score, limit as u32)
            .await
            .map_err(|error| ApplicationError::Persistence(error.to_string()))?;

        Ok(records
            .into_iter()
            .filter(|record| record.url != stored.url)
            .map(|record| {
                let grade = verdant_core::domain::alternative::RecyclabilityGrade::from_materials(
                    &record.record.materials,
                );
                CandidateProduct {
                    id: record.url,
                    title: record.name,
                    price: None,
                    link: None,
                    eco_score: record.eco_score,
                    co2_footprint_kg: record.co2_footprint_kg,
                    materials: record.record.materials,
                    certifications: record.record.certifications,
                    recyclability_grade: grade,
                }
            })
            .collect())
    }
}

/// Bias search queries toward greener listings.
fn eco_query(product_name: &str) -> String {
    format!("sustainable eco-friendly {product_name}")
}
