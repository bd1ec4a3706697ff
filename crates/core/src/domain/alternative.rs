use serde::{Deserialize, Serialize};

use super::record::MaterialMatch;

/// Recyclability letter used in candidate summaries, derived from the
/// fraction of detected materials that are recyclable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecyclabilityGrade {
    A,
    B,
    C,
    D,
}

impl RecyclabilityGrade {
    pub fn from_materials(materials: &[MaterialMatch]) -> Self {
        if materials.is_empty() {
            return Self::C;
        }
        let recyclable = materials.iter().filter(|material| material.recyclable).count();
        let fraction = recyclable as f64 / materials.len() as f64;
        if fraction >= 0.7 {
            Self::A
        } else if fraction >= 0.5 {
            Self::B
        } else if fraction >= 0.3 {
            Self::C
        } else {
            Self::D
        }
    }
}

/// A candidate in the alternatives pool with its own quick score. Missing
/// numerics default to zero so one malformed candidate is not dropped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateProduct {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub link: Option<String>,
    pub eco_score: f64,
    pub co2_footprint_kg: f64,
    #[serde(default)]
    pub materials: Vec<MaterialMatch>,
    #[serde(default)]
    pub certifications: Vec<String>,
    pub recyclability_grade: RecyclabilityGrade,
}

/// The product alternatives are measured against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurrentProduct {
    pub id: String,
    pub eco_score: f64,
    pub co2_footprint_kg: f64,
    pub price: Option<f64>,
    pub certification_count: usize,
}

/// A ranked greener alternative with its comparison deltas against the
/// current product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlternativeCandidate {
    pub product: CandidateProduct,
    pub price_difference_percent: f64,
    pub co2_savings_kg: f64,
    pub score_difference: f64,
    pub switch_percentage: u8,
    pub why_better: String,
}

#[cfg(test)]
mod tests {
    use super::RecyclabilityGrade;
    use crate::domain::record::MaterialMatch;

    fn material(name: &str, recyclable: bool) -> MaterialMatch {
        MaterialMatch {
            name: name.to_owned(),
            recyclable,
            eco_weight: 50,
            emoji: String::new(),
        }
    }

    #[test]
    fn recyclability_grade_tracks_recyclable_fraction() {
        let all = vec![material("bamboo", true), material("glass", true)];
        assert_eq!(RecyclabilityGrade::from_materials(&all), RecyclabilityGrade::A);

        let half = vec![material("glass", true), material("plastic", false)];
        assert_eq!(RecyclabilityGrade::from_materials(&half), RecyclabilityGrade::B);

        let none = vec![material("plastic", false), material("polyester", false)];
        assert_eq!(RecyclabilityGrade::from_materials(&none), RecyclabilityGrade::D);
    }

    #[test]
    fn recyclability_grade_defaults_to_c_without_materials() {
        assert_eq!(RecyclabilityGrade::from_materials(&[]), RecyclabilityGrade::C);
    }
}
