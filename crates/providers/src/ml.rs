//! Client for the material analysis service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use verdant_core::engine::MlSignals;

use crate::ProviderError;

/// Normalized output of a material analysis call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MlAnalysis {
    pub materials: Vec<String>,
    pub packaging_impact: Option<f64>,
    pub ethical_score: Option<f64>,
    pub recyclable_fraction: Option<f64>,
}

impl From<MlAnalysis> for MlSignals {
    fn from(analysis: MlAnalysis) -> Self {
        Self {
            materials: analysis.materials,
            packaging_impact: analysis.packaging_impact,
            ethical_score: analysis.ethical_score,
            recyclable_fraction: analysis.recyclable_fraction,
        }
    }
}

#[async_trait]
pub trait MlAnalysisProvider: Send + Sync {
    async fn analyze(&self, name: &str, description: &str) -> Result<MlAnalysis, ProviderError>;
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    item_name: &'a str,
    item_description: &'a str,
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    success: bool,
    data: Option<AnalyzePayload>,
}

#[derive(Deserialize)]
struct AnalyzePayload {
    #[serde(default)]
    materials: Vec<String>,
    packaging_impact: Option<PackagingImpact>,
    ethical_sourcing: Option<EthicalSourcing>,
    recyclability: Option<Recyclability>,
}

#[derive(Deserialize)]
struct PackagingImpact {
    impact_score: Option<f64>,
}

#[derive(Deserialize)]
struct EthicalSourcing {
    ethical_score: Option<f64>,
}

#[derive(Deserialize)]
struct Recyclability {
    recyclable_score: Option<f64>,
}

pub struct HttpMlProvider {
    client: Client,
    base_url: String,
}

impl HttpMlProvider {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(Duration::from_secs(timeout_secs)).build()?;
        Ok(Self { client, base_url: base_url.into() })
    }
}

#[async_trait]
impl MlAnalysisProvider for HttpMlProvider {
    async fn analyze(&self, name: &str, description: &str) -> Result<MlAnalysis, ProviderError> {
        let url = format!("{}/analyze", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .json(&AnalyzeRequest { item_name: name, item_description: description })
            .send()
            .await?
            .error_for_status()?;

        let body: AnalyzeResponse = response.json().await?;
        if !body.success {
            return Err(ProviderError::Unavailable(
                "ml analysis service reported failure".to_string(),
            ));
        }
        let payload = body
            .data
            .ok_or_else(|| ProviderError::Decode("ml analysis payload missing".to_string()))?;

        Ok(MlAnalysis {
            materials: payload.materials,
            packaging_impact: payload.packaging_impact.and_then(|p| p.impact_score),
            ethical_score: payload.ethical_sourcing.and_then(|e| e.ethical_score),
            recyclable_fraction: payload.recyclability.and_then(|r| r.recyclable_score),
        })
    }
}
