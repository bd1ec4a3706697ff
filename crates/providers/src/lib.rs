pub mod carbon;
pub mod ml;
pub mod search;
pub mod service;

use thiserror::Error;

pub use carbon::{CarbonEstimate, CarbonProvider, HttpCarbonProvider};
pub use ml::{HttpMlProvider, MlAnalysis, MlAnalysisProvider};
pub use search::{HttpSearchProvider, SearchHit, SearchProvider};
pub use service::{CarbonReport, ScoreService, ScoreServiceBuilder};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider unavailable: {0}")]
    Unavailable(String),
    #[error("decode error: {0}")]
    Decode(String),
}
