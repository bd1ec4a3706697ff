//! Client for the CO2e estimation service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::ProviderError;

#[derive(Clone, Debug, PartialEq)]
pub struct CarbonEstimate {
    pub co2e_kg: f64,
    pub unit: String,
    pub method: String,
}

#[async_trait]
pub trait CarbonProvider: Send + Sync {
    async fn estimate(
        &self,
        category: &str,
        energy_kwh: Option<f64>,
        weight_kg: Option<f64>,
    ) -> Result<CarbonEstimate, ProviderError>;
}

#[derive(Serialize)]
struct EstimateRequest<'a> {
    category: &'a str,
    energy_kwh: Option<f64>,
    weight_kg: Option<f64>,
}

#[derive(Deserialize)]
struct EstimateResponse {
    co2e: f64,
    co2e_unit: Option<String>,
    method: Option<String>,
}

pub struct HttpCarbonProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl HttpCarbonProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: SecretString,
        timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(Duration::from_secs(timeout_secs)).build()?;
        Ok(Self { client, base_url: base_url.into(), api_key })
    }
}

#[async_trait]
impl CarbonProvider for HttpCarbonProvider {
    async fn estimate(
        &self,
        category: &str,
        energy_kwh: Option<f64>,
        weight_kg: Option<f64>,
    ) -> Result<CarbonEstimate, ProviderError> {
        let url = format!("{}/estimate", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&EstimateRequest { category, energy_kwh, weight_kg })
            .send()
            .await?
            .error_for_status()?;

        let body: EstimateResponse = response.json().await?;
        if !body.co2e.is_finite() || body.co2e < 0.0 {
            return Err(ProviderError::Decode(format!(
                "carbon estimate out of range: {}",
                body.co2e
            )));
        }

        Ok(CarbonEstimate {
            co2e_kg: body.co2e,
            unit: body.co2e_unit.unwrap_or_else(|| "kg".to_string()),
            method: body.method.unwrap_or_else(|| "category_average".to_string()),
        })
    }
}
