pub mod alternatives;
pub mod baselines;
pub mod carbon;
pub mod components;
pub mod composite;
pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod extract;
pub mod grade;
pub mod lexicon;

pub use alternatives::{rank, RankOptions};
pub use baselines::Baselines;
pub use composite::{CompositeInputs, CompositeWeights, DEFAULT_WEIGHTS};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::alternative::{
    AlternativeCandidate, CandidateProduct, CurrentProduct, RecyclabilityGrade,
};
pub use domain::record::{
    Comparison, ComponentScores, EmissionsLevel, KeywordMatch, MaterialMatch, PeerComparison,
    Rating, ScoreComponent, SustainabilityRecord, TransparencyLevel,
};
pub use domain::signal::ProductSignal;
pub use engine::{ExternalSignals, MlSignals, ScoringEngine};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use extract::{Extraction, ExtractorBuildError, FeatureExtractor};
pub use grade::{average_grade, Grade};
pub use lexicon::Lexicon;
