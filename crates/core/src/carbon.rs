//! CO2e benchmark scoring and the category-average fallback estimate.
//!
//! When a carbon provider returns a direct CO2e quantity, it is converted to
//! a 0-100 score against category benchmark bands with piecewise-linear
//! interpolation. When no provider is available, a category-average table
//! plus energy and weight heuristics produce an estimate instead.

use serde::Serialize;

use crate::composite;
use crate::grade::{clamp_round, Grade};

/// Excellent/good/average/poor CO2e thresholds in kg for a category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BenchmarkBands {
    pub excellent: f64,
    pub good: f64,
    pub average: f64,
    pub poor: f64,
}

const OTHER_BANDS: BenchmarkBands =
    BenchmarkBands { excellent: 20.0, good: 40.0, average: 50.0, poor: 80.0 };

const BENCHMARKS: &[(&str, BenchmarkBands)] = &[
    ("Refrigerator", BenchmarkBands { excellent: 50.0, good: 100.0, average: 150.0, poor: 200.0 }),
    ("Washing Machine", BenchmarkBands { excellent: 30.0, good: 60.0, average: 80.0, poor: 120.0 }),
    ("Air Conditioner", BenchmarkBands { excellent: 40.0, good: 80.0, average: 120.0, poor: 180.0 }),
    ("Microwave", BenchmarkBands { excellent: 10.0, good: 20.0, average: 30.0, poor: 50.0 }),
    ("Television", BenchmarkBands { excellent: 20.0, good: 40.0, average: 50.0, poor: 80.0 }),
    ("Laptop", BenchmarkBands { excellent: 150.0, good: 250.0, average: 300.0, poor: 400.0 }),
    ("Smartphone", BenchmarkBands { excellent: 30.0, good: 50.0, average: 70.0, poor: 100.0 }),
    ("Tablet", BenchmarkBands { excellent: 50.0, good: 80.0, average: 100.0, poor: 150.0 }),
    ("Clothing", BenchmarkBands { excellent: 5.0, good: 15.0, average: 20.0, poor: 30.0 }),
    ("Footwear", BenchmarkBands { excellent: 5.0, good: 10.0, average: 15.0, poor: 25.0 }),
    ("Furniture", BenchmarkBands { excellent: 40.0, good: 70.0, average: 100.0, poor: 150.0 }),
    ("Other", OTHER_BANDS),
];

/// Lifecycle CO2e averages in kg used when no provider estimate exists.
const CATEGORY_AVERAGES: &[(&str, f64)] = &[
    ("Refrigerator", 150.0),
    ("Washing Machine", 80.0),
    ("Air Conditioner", 120.0),
    ("Microwave", 30.0),
    ("Television", 50.0),
    ("Laptop", 300.0),
    ("Smartphone", 70.0),
    ("Tablet", 100.0),
    ("Clothing", 20.0),
    ("Footwear", 15.0),
    ("Furniture", 100.0),
    ("Other", 50.0),
];

/// Per-category recyclability estimates for the quick composite path.
const RECYCLABILITY_ESTIMATES: &[(&str, f64)] = &[
    ("Refrigerator", 70.0),
    ("Washing Machine", 75.0),
    ("Air Conditioner", 65.0),
    ("Microwave", 60.0),
    ("Television", 55.0),
    ("Laptop", 60.0),
    ("Smartphone", 50.0),
    ("Tablet", 55.0),
    ("Clothing", 80.0),
    ("Footwear", 40.0),
    ("Furniture", 65.0),
    ("Other", 50.0),
];

/// Per-category packaging estimates for the quick composite path.
const PACKAGING_ESTIMATES: &[(&str, f64)] = &[
    ("Refrigerator", 50.0),
    ("Washing Machine", 50.0),
    ("Air Conditioner", 45.0),
    ("Microwave", 55.0),
    ("Television", 50.0),
    ("Laptop", 60.0),
    ("Smartphone", 65.0),
    ("Tablet", 65.0),
    ("Clothing", 70.0),
    ("Footwear", 60.0),
    ("Furniture", 40.0),
    ("Other", 50.0),
];

fn lookup(table: &[(&str, f64)], category: &str, default: f64) -> f64 {
    table
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, value)| *value)
        .unwrap_or(default)
}

pub fn benchmark_bands(category: &str) -> BenchmarkBands {
    BENCHMARKS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, bands)| *bands)
        .unwrap_or(OTHER_BANDS)
}

pub fn recyclability_estimate(category: &str) -> f64 {
    lookup(RECYCLABILITY_ESTIMATES, category, 50.0)
}

pub fn packaging_estimate(category: &str) -> f64 {
    lookup(PACKAGING_ESTIMATES, category, 50.0)
}

/// Score a measured CO2e quantity against the category bands. Lower CO2e
/// yields a higher score; piecewise-linear between band boundaries.
pub fn score_from_co2e(category: &str, co2e_kg: f64) -> f64 {
    let bands = benchmark_bands(category);
    let co2e = co2e_kg.max(0.0);

    let score = if co2e <= bands.excellent {
        90.0 + (bands.excellent - co2e) / bands.excellent * 10.0
    } else if co2e <= bands.good {
        75.0 + (bands.good - co2e) / (bands.good - bands.excellent) * 15.0
    } else if co2e <= bands.average {
        50.0 + (bands.average - co2e) / (bands.average - bands.good) * 25.0
    } else if co2e <= bands.poor {
        25.0 + (bands.poor - co2e) / (bands.poor - bands.average) * 25.0
    } else {
        (25.0 - (co2e - bands.poor) / bands.poor * 25.0).max(0.0)
    };

    clamp_round(score)
}

/// Category-average CO2e estimate plus a grid factor for rated energy use
/// and a mass factor for shipping weight.
pub fn fallback_estimate(category: &str, energy_kwh: Option<f64>, weight_kg: Option<f64>) -> f64 {
    let mut co2e = lookup(CATEGORY_AVERAGES, category, 50.0);
    if let Some(energy) = energy_kwh {
        co2e += energy.max(0.0) * 0.5;
    }
    if let Some(weight) = weight_kg {
        co2e += weight.max(0.0) * 2.0;
    }
    co2e
}

/// Ethics term in the quick blend; no supply-chain signal exists on this path.
const ETHICS_ESTIMATE: f64 = 50.0;

/// Quick sustainability read derived from a single CO2e quantity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CarbonAssessment {
    pub co2e_kg: f64,
    pub carbon_score: f64,
    pub recyclability: f64,
    pub packaging: f64,
    pub ethical_sourcing: f64,
    pub eco_score: f64,
    pub eco_grade: Grade,
}

/// Score a CO2e quantity against the category bands and blend it with the
/// per-category estimates into the quick composite eco score.
pub fn assess_co2e(category: &str, co2e_kg: f64) -> CarbonAssessment {
    let carbon_score = score_from_co2e(category, co2e_kg);
    let recyclability = recyclability_estimate(category);
    let packaging = packaging_estimate(category);
    let eco_score =
        composite::quick_composite(carbon_score, recyclability, packaging, ETHICS_ESTIMATE);

    CarbonAssessment {
        co2e_kg,
        carbon_score,
        recyclability,
        packaging,
        ethical_sourcing: ETHICS_ESTIMATE,
        eco_score,
        eco_grade: Grade::from_score(eco_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excellent_band_scores_above_ninety() {
        // Laptop excellent threshold is 150 kg.
        assert_eq!(score_from_co2e("Laptop", 150.0), 90.0);
        assert_eq!(score_from_co2e("Laptop", 0.0), 100.0);
    }

    #[test]
    fn band_edges_interpolate_linearly() {
        // Smartphone: good=50, average=70. Midpoint 60 kg sits halfway into
        // the 50..75 scoring range.
        assert_eq!(score_from_co2e("Smartphone", 70.0), 50.0);
        assert_eq!(score_from_co2e("Smartphone", 60.0), 63.0);
        assert_eq!(score_from_co2e("Smartphone", 50.0), 75.0);
    }

    #[test]
    fn beyond_poor_decays_to_zero() {
        // Clothing poor threshold is 30 kg; double that floors the score.
        assert_eq!(score_from_co2e("Clothing", 60.0), 0.0);
        assert_eq!(score_from_co2e("Clothing", 30.0), 25.0);
    }

    #[test]
    fn unknown_category_uses_other_bands() {
        assert_eq!(score_from_co2e("Gadget", 20.0), 90.0);
    }

    #[test]
    fn fallback_estimate_adds_energy_and_weight_factors() {
        assert_eq!(fallback_estimate("Television", None, None), 50.0);
        assert_eq!(fallback_estimate("Television", Some(100.0), Some(10.0)), 120.0);
        // Negative inputs clamp to zero contribution.
        assert_eq!(fallback_estimate("Television", Some(-5.0), None), 50.0);
    }

    #[test]
    fn assessment_blends_the_quick_composite() {
        let assessment = assess_co2e("Television", 50.0);

        // co2e 50 kg sits exactly on the Television average band edge.
        assert_eq!(assessment.carbon_score, 50.0);
        // 50*0.4 + 55*0.25 + 50*0.2 + 50*0.15 = 51.25, rounded.
        assert_eq!(assessment.eco_score, 51.0);
        assert_eq!(assessment.eco_grade, Grade::C);
    }

    #[test]
    fn category_estimates_fall_back_to_fifty() {
        assert_eq!(recyclability_estimate("Clothing"), 80.0);
        assert_eq!(recyclability_estimate("Gadget"), 50.0);
        assert_eq!(packaging_estimate("Furniture"), 40.0);
        assert_eq!(packaging_estimate("Gadget"), 50.0);
    }
}
