//! The composite sustainability index and its sub-scores.

use crate::baselines::{category_certificates, sustainability_base, Baselines};
use crate::domain::record::{Comparison, PeerComparison};
use crate::grade::{clamp_round, Grade};
use crate::lexicon::{
    is_sustainable_material, is_unsustainable_material, BCORP_BRAND_KEYWORDS,
    MATERIAL_CERTIFICATES,
};

use super::components::brand_adjustment;

/// Fixed weights for the composite index. Must sum to 1.0; the carbon term
/// is inverted exactly once because a high carbon score means low emissions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompositeWeights {
    pub carbon: f64,
    pub recyclability: f64,
    pub ethical_sourcing: f64,
    pub packaging: f64,
    pub sustainability_rating: f64,
    pub peer_comparison: f64,
    pub certificates: f64,
    pub transparency: f64,
    pub brand_ethics: f64,
}

pub const DEFAULT_WEIGHTS: CompositeWeights = CompositeWeights {
    carbon: 0.20,
    recyclability: 0.10,
    ethical_sourcing: 0.15,
    packaging: 0.10,
    sustainability_rating: 0.15,
    peer_comparison: 0.05,
    certificates: 0.10,
    transparency: 0.05,
    brand_ethics: 0.10,
};

impl Default for CompositeWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl CompositeWeights {
    pub fn total(&self) -> f64 {
        self.carbon
            + self.recyclability
            + self.ethical_sourcing
            + self.packaging
            + self.sustainability_rating
            + self.peer_comparison
            + self.certificates
            + self.transparency
            + self.brand_ethics
    }
}

/// All sub-scores feeding the composite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompositeInputs {
    pub carbon: f64,
    pub recyclability: f64,
    pub ethical_sourcing: f64,
    pub packaging: f64,
    pub sustainability_rating: f64,
    pub peer_comparison: f64,
    pub certificates: f64,
    pub transparency: f64,
    pub brand_ethics: f64,
}

/// Weighted blend into the 0-100 index and its letter grade.
pub fn compose(weights: &CompositeWeights, inputs: &CompositeInputs) -> (f64, Grade) {
    let overall = clamp_round(
        (100.0 - inputs.carbon) * weights.carbon
            + inputs.recyclability * weights.recyclability
            + inputs.ethical_sourcing * weights.ethical_sourcing
            + inputs.packaging * weights.packaging
            + inputs.sustainability_rating * weights.sustainability_rating
            + inputs.peer_comparison * weights.peer_comparison
            + inputs.certificates * weights.certificates
            + inputs.transparency * weights.transparency
            + inputs.brand_ethics * weights.brand_ethics,
    );
    (overall, Grade::from_score(overall))
}

/// Secondary blend of category base, material counts, and brand reputation.
pub fn sustainability_rating_score(
    category: &str,
    materials: &[String],
    brand: Option<&str>,
) -> f64 {
    let mut score = sustainability_base(category);
    for material in materials {
        if is_sustainable_material(material) {
            score += 10.0;
        } else if is_unsustainable_material(material) {
            score -= 8.0;
        }
    }
    score += f64::from(brand_adjustment(brand));
    clamp_round(score)
}

/// Certification sub-score plus the deduplicated certificate labels that
/// justified it, clamped to [30,100].
pub fn certification_score(
    category: &str,
    materials: &[String],
    brand: Option<&str>,
    detected: &[String],
) -> (f64, Vec<String>) {
    let mut score = 50.0;
    let mut labels: Vec<String> = Vec::new();

    let mut push_label = |labels: &mut Vec<String>, label: &str| {
        if !labels.iter().any(|existing| existing == label) {
            labels.push(label.to_owned());
        }
    };

    let defaults = category_certificates(category);
    if !defaults.is_empty() {
        score += 15.0;
        for label in defaults {
            push_label(&mut labels, label);
        }
    }

    for (material, label, bonus) in MATERIAL_CERTIFICATES {
        if materials.iter().any(|name| name.eq_ignore_ascii_case(material)) {
            score += f64::from(*bonus);
            push_label(&mut labels, label);
        }
    }

    if let Some(brand) = brand {
        let brand = brand.to_lowercase();
        if BCORP_BRAND_KEYWORDS.iter().any(|keyword| brand.contains(keyword)) {
            score += 20.0;
            push_label(&mut labels, "B Corp Certified");
        }
    }

    for label in detected {
        push_label(&mut labels, label);
    }

    (score.clamp(30.0, 100.0).round(), labels)
}

/// Compare carbon and recyclability against category peer benchmarks.
pub fn peer_comparison(category: &str, carbon: f64, recyclability: f64) -> PeerComparison {
    let benchmark = crate::baselines::peer_benchmark(category);
    let delta =
        ((carbon - benchmark.carbon) * 0.6 + (recyclability - benchmark.recyclability) * 0.4)
            .round();

    let comparison = if delta > 10.0 {
        Comparison::Better
    } else if delta < -10.0 {
        Comparison::Worse
    } else {
        Comparison::Equal
    };

    PeerComparison { score: clamp_round(50.0 + delta), comparison }
}

/// Reduced blend used when only quick heuristic scores are available.
pub fn quick_composite(carbon: f64, recyclability: f64, packaging: f64, ethics: f64) -> f64 {
    clamp_round(carbon * 0.4 + recyclability * 0.25 + packaging * 0.2 + ethics * 0.15)
}

/// Keyword-only eco score for raw search-result text: base 50 plus each
/// distinct keyword's weight, clamped.
pub fn quick_keyword_score(keyword_weight_total: i32) -> f64 {
    clamp_round(50.0 + f64::from(keyword_weight_total))
}

/// CO2 heuristic from material eco weights when no measured estimate exists.
pub fn co2_from_materials(material_weights: &[u32]) -> f64 {
    let average = if material_weights.is_empty() {
        50.0
    } else {
        material_weights.iter().map(|weight| f64::from(*weight)).sum::<f64>()
            / material_weights.len() as f64
    };
    ((100.0 - average) * 0.3).round()
}
