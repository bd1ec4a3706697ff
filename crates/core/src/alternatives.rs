//! Ranking greener alternatives against a current product.

use crate::domain::alternative::{
    AlternativeCandidate, CandidateProduct, CurrentProduct, RecyclabilityGrade,
};

/// Knobs for the ranker. Defaults mirror production behavior: a candidate
/// must beat the current score by 5 and clear an absolute floor of 60.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RankOptions {
    pub min_score_delta: f64,
    pub score_floor: f64,
    pub limit: usize,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self { min_score_delta: 5.0, score_floor: 60.0, limit: 5 }
    }
}

/// Filter, annotate, and sort the candidate pool. When the strict filter
/// leaves nothing, fall back to the top candidates from the unfiltered pool
/// (minus the current product) so callers always get something to show.
pub fn rank(
    current: &CurrentProduct,
    pool: &[CandidateProduct],
    options: &RankOptions,
) -> Vec<AlternativeCandidate> {
    let mut survivors: Vec<&CandidateProduct> = pool
        .iter()
        .filter(|candidate| candidate.id != current.id)
        .filter(|candidate| {
            candidate.eco_score >= current.eco_score + options.min_score_delta
                && candidate.eco_score >= options.score_floor
        })
        .collect();

    if survivors.is_empty() {
        survivors = pool.iter().filter(|candidate| candidate.id != current.id).collect();
    }

    survivors.sort_by(|a, b| {
        b.eco_score.partial_cmp(&a.eco_score).unwrap_or(std::cmp::Ordering::Equal)
    });
    survivors.truncate(options.limit);

    survivors.into_iter().map(|candidate| annotate(current, candidate)).collect()
}

fn annotate(current: &CurrentProduct, candidate: &CandidateProduct) -> AlternativeCandidate {
    let price_difference_percent = match (current.price, candidate.price) {
        (Some(current_price), Some(candidate_price)) if current_price > 0.0 => {
            (candidate_price - current_price) / current_price * 100.0
        }
        _ => 0.0,
    };

    let co2_savings_kg = (current.co2_footprint_kg - candidate.co2_footprint_kg).abs();
    let score_difference = candidate.eco_score - current.eco_score;
    let switch_percentage = (50.0 + score_difference * 0.5).round().min(95.0).max(0.0) as u8;

    AlternativeCandidate {
        product: candidate.clone(),
        price_difference_percent,
        co2_savings_kg,
        score_difference,
        switch_percentage,
        why_better: why_better(current, candidate),
    }
}

/// Up to two triggered reasons in priority order, joined for display.
fn why_better(current: &CurrentProduct, candidate: &CandidateProduct) -> String {
    let mut reasons: Vec<String> = Vec::new();

    let co2_saving = current.co2_footprint_kg - candidate.co2_footprint_kg;
    if co2_saving > 0.0 {
        reasons.push(format!("Reduces CO₂ emissions by {co2_saving:.1} kg"));
    }

    if has_material(candidate, "recycled") {
        reasons.push("Uses recycled materials".to_owned());
    } else if has_material(candidate, "bamboo") {
        reasons.push("Made from sustainable bamboo".to_owned());
    } else if has_material(candidate, "organic") {
        reasons.push("Uses organic materials".to_owned());
    }

    if candidate.certifications.len() > current.certification_count {
        reasons.push(format!("{} eco-certifications", candidate.certifications.len()));
    }

    if candidate.recyclability_grade == RecyclabilityGrade::A {
        reasons.push("Fully recyclable".to_owned());
    }

    if reasons.is_empty() {
        return "Better sustainability rating".to_owned();
    }
    reasons.truncate(2);
    reasons.join(" • ")
}

fn has_material(candidate: &CandidateProduct, token: &str) -> bool {
    candidate.materials.iter().any(|material| material.name.to_lowercase().contains(token))
}

#[cfg(test)]
mod tests {
    use super::{rank, RankOptions};
    use crate::domain::alternative::{CandidateProduct, CurrentProduct, RecyclabilityGrade};
    use crate::domain::record::MaterialMatch;

    fn current(score: f64) -> CurrentProduct {
        CurrentProduct {
            id: "current".to_owned(),
            eco_score: score,
            co2_footprint_kg: 12.5,
            price: Some(25.0),
            certification_count: 0,
        }
    }

    fn candidate(id: &str, score: f64, price: Option<f64>) -> CandidateProduct {
        CandidateProduct {
            id: id.to_owned(),
            title: format!("Candidate {id}"),
            price,
            link: None,
            eco_score: score,
            co2_footprint_kg: 8.0,
            materials: Vec::new(),
            certifications: Vec::new(),
            recyclability_grade: RecyclabilityGrade::C,
        }
    }

    #[test]
    fn strict_filter_and_switch_percentage() {
        let pool = vec![candidate("a", 80.0, Some(20.0)), candidate("b", 52.0, Some(15.0))];
        let ranked = rank(&current(50.0), &pool, &RankOptions::default());

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].product.id, "a");
        assert_eq!(ranked[0].score_difference, 30.0);
        assert_eq!(ranked[0].switch_percentage, 65);
    }

    #[test]
    fn price_difference_is_relative_to_current() {
        let pool = vec![candidate("a", 80.0, Some(20.0))];
        let ranked = rank(&current(50.0), &pool, &RankOptions::default());
        assert_eq!(ranked[0].price_difference_percent, -20.0);
    }

    #[test]
    fn unknown_current_price_zeroes_the_delta() {
        let mut me = current(50.0);
        me.price = None;
        let pool = vec![candidate("a", 80.0, Some(20.0))];
        let ranked = rank(&me, &pool, &RankOptions::default());
        assert_eq!(ranked[0].price_difference_percent, 0.0);
    }

    #[test]
    fn never_returns_the_current_product() {
        let pool = vec![candidate("current", 99.0, Some(5.0)), candidate("a", 70.0, Some(9.0))];
        let ranked = rank(&current(50.0), &pool, &RankOptions::default());
        assert!(ranked.iter().all(|alternative| alternative.product.id != "current"));
    }

    #[test]
    fn sorted_descending_and_limited() {
        let pool = vec![
            candidate("a", 70.0, None),
            candidate("b", 90.0, None),
            candidate("c", 85.0, None),
        ];
        let options = RankOptions { limit: 2, ..RankOptions::default() };
        let ranked = rank(&current(50.0), &pool, &options);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].product.id, "b");
        assert_eq!(ranked[1].product.id, "c");
    }

    #[test]
    fn empty_strict_filter_falls_back_to_unfiltered_pool() {
        let pool = vec![
            candidate("current", 60.0, None),
            candidate("a", 40.0, None),
            candidate("b", 45.0, None),
        ];
        let ranked = rank(&current(50.0), &pool, &RankOptions::default());

        // min(limit, pool size - current) entries, best first.
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].product.id, "b");
    }

    #[test]
    fn switch_percentage_caps_at_ninety_five() {
        let pool = vec![candidate("a", 100.0, None)];
        let ranked = rank(&current(0.0), &pool, &RankOptions::default());
        assert_eq!(ranked[0].switch_percentage, 95);
    }

    #[test]
    fn why_better_prioritizes_co2_then_materials() {
        let mut alt = candidate("a", 80.0, None);
        alt.materials.push(MaterialMatch {
            name: "recycled".to_owned(),
            recyclable: true,
            eco_weight: 90,
            emoji: "♻️".to_owned(),
        });
        let ranked = rank(&current(50.0), &[alt], &RankOptions::default());

        assert_eq!(
            ranked[0].why_better,
            "Reduces CO₂ emissions by 4.5 kg • Uses recycled materials"
        );
    }

    #[test]
    fn why_better_fallback_text() {
        let mut alt = candidate("a", 80.0, None);
        alt.co2_footprint_kg = 12.5; // no saving
        let ranked = rank(&current(50.0), &[alt], &RankOptions::default());
        assert_eq!(ranked[0].why_better, "Better sustainability rating");
    }
}
