use serde::{Deserialize, Serialize};

/// A material detected in product text, carrying the lexicon metadata that
/// downstream scorers and UI surfaces need.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialMatch {
    pub name: String,
    pub recyclable: bool,
    pub eco_weight: u32,
    pub emoji: String,
}

/// A lexicon keyword found in product text with its signed eco weight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub keyword: String,
    pub weight: i32,
}

/// A clamped 0-100 score with its qualitative label. The label type differs
/// per dimension (emissions are inverted, transparency has its own ladder).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent<L> {
    pub score: f64,
    pub rating: L,
}

/// Generic quality ladder shared by recyclability, ethics, packaging, and
/// brand scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Rating {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 70.0 {
            Self::Good
        } else if score >= 50.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

/// Carbon label. Inverted relative to the numeric score: a high carbon score
/// means low emissions, so this is exposed separately to keep callers honest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmissionsLevel {
    Low,
    Medium,
    High,
}

impl EmissionsLevel {
    pub fn from_carbon_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Low
        } else if score >= 60.0 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransparencyLevel {
    High,
    Medium,
    Low,
}

impl TransparencyLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::High
        } else if score >= 60.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    Better,
    Worse,
    Equal,
}

/// How the product stacks up against its category peers on carbon and
/// recyclability.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeerComparison {
    pub score: f64,
    pub comparison: Comparison,
}

/// The four component scores feeding the composite index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub carbon: ScoreComponent<EmissionsLevel>,
    pub recyclability: ScoreComponent<Rating>,
    pub ethical_sourcing: ScoreComponent<Rating>,
    pub packaging: ScoreComponent<Rating>,
}

/// Full scoring output for one product. Derived fresh on every call; the
/// engine keeps no state between calls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityRecord {
    pub product_name: String,
    pub brand: Option<String>,
    pub category: String,
    pub components: ComponentScores,
    pub certifications: Vec<String>,
    pub brand_ethics: ScoreComponent<Rating>,
    pub transparency: ScoreComponent<TransparencyLevel>,
    pub peer_comparison: PeerComparison,
    pub materials: Vec<MaterialMatch>,
    pub co2_footprint_kg: f64,
    pub highlights: Vec<String>,
    pub overall_score: f64,
    pub overall_grade: crate::grade::Grade,
}

#[cfg(test)]
mod tests {
    use super::{EmissionsLevel, Rating, TransparencyLevel};

    #[test]
    fn rating_ladder_boundaries() {
        assert_eq!(Rating::from_score(80.0), Rating::Excellent);
        assert_eq!(Rating::from_score(79.0), Rating::Good);
        assert_eq!(Rating::from_score(70.0), Rating::Good);
        assert_eq!(Rating::from_score(69.0), Rating::Fair);
        assert_eq!(Rating::from_score(50.0), Rating::Fair);
        assert_eq!(Rating::from_score(49.0), Rating::Poor);
    }

    #[test]
    fn emissions_level_inverts_the_score() {
        assert_eq!(EmissionsLevel::from_carbon_score(85.0), EmissionsLevel::Low);
        assert_eq!(EmissionsLevel::from_carbon_score(60.0), EmissionsLevel::Medium);
        assert_eq!(EmissionsLevel::from_carbon_score(59.9), EmissionsLevel::High);
    }

    #[test]
    fn transparency_levels() {
        assert_eq!(TransparencyLevel::from_score(80.0), TransparencyLevel::High);
        assert_eq!(TransparencyLevel::from_score(60.0), TransparencyLevel::Medium);
        assert_eq!(TransparencyLevel::from_score(59.0), TransparencyLevel::Low);
    }
}
