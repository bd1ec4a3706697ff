//! The four component scorers plus the transparency and brand-reputation
//! sub-scores.
//!
//! Every scorer starts from the category baseline row and applies signed
//! adjustments from the material tables, preferring a direct external signal
//! when one is supplied. All outputs are clamped to 0-100.

use crate::baselines::{brand_category_adjustment, Baselines};
use crate::domain::record::{
    EmissionsLevel, Rating, ScoreComponent, TransparencyLevel,
};
use crate::domain::signal::ProductSignal;
use crate::extract::Extraction;
use crate::grade::clamp_round;
use crate::lexicon::{
    carbon_adjustment, ethics_weight, packaging_weight, recyclability_weight,
    BRAND_ETHICS_SCORES, CURATED_ETHICAL_BRANDS, ECO_BRAND_KEYWORDS,
};

/// Carbon footprint score. Higher score means lower emissions; the label is
/// inverted accordingly.
pub fn carbon_score(
    baselines: &Baselines,
    category: &str,
    materials: &[String],
    packaging_impact: Option<f64>,
) -> f64 {
    let mut score = baselines.row(category).carbon;
    for material in materials {
        score += f64::from(carbon_adjustment(material));
    }
    if let Some(impact) = packaging_impact {
        score += (1.0 - impact.clamp(0.0, 1.0)) * 10.0;
    }
    clamp_round(score)
}

pub fn carbon_component(score: f64) -> ScoreComponent<EmissionsLevel> {
    ScoreComponent { score, rating: EmissionsLevel::from_carbon_score(score) }
}

/// Recyclability: external fraction wins, then material averages, then the
/// category baseline.
pub fn recyclability_score(
    baselines: &Baselines,
    category: &str,
    materials: &[String],
    recyclable_fraction: Option<f64>,
) -> f64 {
    if let Some(fraction) = recyclable_fraction {
        return clamp_round(fraction.clamp(0.0, 1.0) * 100.0);
    }
    if materials.is_empty() {
        return baselines.row(category).recyclability;
    }
    let total: u32 = materials.iter().map(|material| recyclability_weight(material)).sum();
    clamp_round(f64::from(total) / materials.len() as f64)
}

/// Ethical sourcing: external score wins, then material averages plus a brand
/// reputation adjustment.
pub fn ethics_score(
    baselines: &Baselines,
    category: &str,
    materials: &[String],
    brand: Option<&str>,
    ethical_signal: Option<f64>,
) -> f64 {
    if let Some(signal) = ethical_signal {
        return clamp_round(signal.clamp(0.0, 1.0) * 100.0);
    }
    let base = if materials.is_empty() {
        baselines.row(category).ethics
    } else {
        let total: u32 = materials.iter().map(|material| ethics_weight(material)).sum();
        f64::from(total) / materials.len() as f64
    };
    clamp_round(base + f64::from(brand_adjustment(brand)))
}

/// Packaging impact: external impact (higher = worse) wins, then material
/// averages, then the category baseline.
pub fn packaging_score(
    baselines: &Baselines,
    category: &str,
    materials: &[String],
    packaging_impact: Option<f64>,
) -> f64 {
    if let Some(impact) = packaging_impact {
        return clamp_round((1.0 - impact.clamp(0.0, 1.0)) * 100.0);
    }
    if materials.is_empty() {
        return baselines.row(category).packaging;
    }
    let total: u32 = materials.iter().map(|material| packaging_weight(material)).sum();
    clamp_round(f64::from(total) / materials.len() as f64)
}

pub fn rated(score: f64) -> ScoreComponent<Rating> {
    ScoreComponent { score, rating: Rating::from_score(score) }
}

/// Brand reputation bump: +15 for a curated ethical brand, +8 for an
/// eco-sounding brand name, else nothing.
pub fn brand_adjustment(brand: Option<&str>) -> i32 {
    let Some(brand) = brand else { return 0 };
    let brand = brand.to_lowercase();
    if CURATED_ETHICAL_BRANDS.iter().any(|known| brand.contains(known)) {
        15
    } else if ECO_BRAND_KEYWORDS.iter().any(|keyword| brand.contains(keyword)) {
        8
    } else {
        0
    }
}

/// Standalone brand ethics score from the curated table, keyword bumps, and
/// category adjustment, clamped to [30,100].
pub fn brand_ethics_score(brand: Option<&str>, category: &str) -> f64 {
    let mut score = 60.0;
    if let Some(brand) = brand {
        let brand = brand.to_lowercase();
        if let Some((_, known)) =
            BRAND_ETHICS_SCORES.iter().find(|(name, _)| brand.contains(name))
        {
            score = f64::from(*known);
        } else if ECO_BRAND_KEYWORDS.iter().any(|keyword| brand.contains(keyword))
            || brand.contains("bamboo")
        {
            score += 15.0;
        }
    }
    score += f64::from(brand_category_adjustment(category));
    score.clamp(30.0, 100.0).round()
}

/// How much a listing discloses. Starts at 50 and earns points for each
/// populated detail field.
pub fn transparency_score(signal: &ProductSignal, extraction: &Extraction) -> f64 {
    let mut score = 50.0;
    if signal.description.as_deref().is_some_and(|description| description.len() > 100) {
        score += 15.0;
    }
    if signal.feature_bullets.len() > 3 {
        score += 10.0;
    }
    if !extraction.materials.is_empty() {
        score += 15.0;
    }
    if !extraction.certifications.is_empty() {
        score += 20.0;
    }
    if signal.origin.is_some() {
        score += 10.0;
    }
    if signal.warranty.is_some() {
        score += 5.0;
    }
    clamp_round(score)
}

pub fn transparency_component(score: f64) -> ScoreComponent<TransparencyLevel> {
    ScoreComponent { score, rating: TransparencyLevel::from_score(score) }
}
