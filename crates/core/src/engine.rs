//! The scoring engine: one pure pipeline from product signals to a
//! sustainability record.
//!
//! The engine owns the lexicon-built extractor, the baseline tables, and the
//! composite weights. It never performs I/O; external signals (ML analysis,
//! measured CO2e) are fetched by callers and passed in, already optional, so
//! a provider failure upstream simply arrives here as `None`.

use crate::alternatives::{rank, RankOptions};
use crate::baselines::Baselines;
use crate::carbon;
use crate::components;
use crate::composite::{self, CompositeInputs, CompositeWeights};
use crate::domain::alternative::{
    AlternativeCandidate, CandidateProduct, CurrentProduct, RecyclabilityGrade,
};
use crate::domain::record::{ComponentScores, SustainabilityRecord};
use crate::domain::signal::ProductSignal;
use crate::errors::DomainError;
use crate::extract::{Extraction, ExtractorBuildError, FeatureExtractor};
use crate::lexicon::Lexicon;

/// External signals gathered before scoring. Everything is optional; the
/// engine falls back to its heuristics for whatever is missing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExternalSignals {
    pub ml: Option<MlSignals>,
    pub co2e_kg: Option<f64>,
}

/// Output of the ML analysis pipeline, normalized to optional fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MlSignals {
    pub materials: Vec<String>,
    pub packaging_impact: Option<f64>,
    pub ethical_score: Option<f64>,
    pub recyclable_fraction: Option<f64>,
}

/// How many detected materials a record carries; earliest detections win.
const MAX_RECORD_MATERIALS: usize = 5;

pub struct ScoringEngine {
    extractor: FeatureExtractor,
    baselines: Baselines,
    weights: CompositeWeights,
}

impl ScoringEngine {
    pub fn new() -> Result<Self, ExtractorBuildError> {
        Self::with_tables(Lexicon::default(), Baselines::default())
    }

    pub fn with_tables(
        lexicon: Lexicon,
        baselines: Baselines,
    ) -> Result<Self, ExtractorBuildError> {
        Ok(Self {
            extractor: FeatureExtractor::new(lexicon)?,
            baselines,
            weights: CompositeWeights::default(),
        })
    }

    pub fn extract(&self, signal: &ProductSignal) -> Extraction {
        self.extractor.extract(signal)
    }

    /// Score one product. Pure: identical inputs produce identical records.
    pub fn score(
        &self,
        signal: &ProductSignal,
        signals: &ExternalSignals,
    ) -> Result<SustainabilityRecord, DomainError> {
        signal.validate()?;
        let signal = signal.clone().normalized();
        let extraction = self.extractor.extract(&signal);

        let ml = signals.ml.as_ref();
        let material_names = merge_material_names(&extraction, ml);
        let brand = signal.brand.as_deref();
        let category = signal.category.as_str();

        let carbon_score = match signals.co2e_kg {
            // A measured estimate takes priority over the material heuristic.
            Some(co2e) => carbon::score_from_co2e(category, co2e),
            None => components::carbon_score(
                &self.baselines,
                category,
                &material_names,
                ml.and_then(|ml| ml.packaging_impact),
            ),
        };

        let recyclability = components::recyclability_score(
            &self.baselines,
            category,
            &material_names,
            ml.and_then(|ml| ml.recyclable_fraction),
        );
        let ethics = components::ethics_score(
            &self.baselines,
            category,
            &material_names,
            brand,
            ml.and_then(|ml| ml.ethical_score),
        );
        let packaging = components::packaging_score(
            &self.baselines,
            category,
            &material_names,
            ml.and_then(|ml| ml.packaging_impact),
        );

        let sustainability_rating =
            composite::sustainability_rating_score(category, &material_names, brand);
        let (certificate_score, certifications) = composite::certification_score(
            category,
            &material_names,
            brand,
            &extraction.certifications,
        );
        let brand_ethics = components::brand_ethics_score(brand, category);
        let transparency = components::transparency_score(&signal, &extraction);
        let peer = composite::peer_comparison(category, carbon_score, recyclability);

        let (overall_score, overall_grade) = composite::compose(
            &self.weights,
            &CompositeInputs {
                carbon: carbon_score,
                recyclability,
                ethical_sourcing: ethics,
                packaging,
                sustainability_rating,
                peer_comparison: peer.score,
                certificates: certificate_score,
                transparency,
                brand_ethics,
            },
        );

        let mut materials = extraction.materials.clone();
        materials.truncate(MAX_RECORD_MATERIALS);

        // Without a measured estimate, the footprint is the category average
        // plus energy and weight factors, not the material heuristic (which
        // serves the quick-candidate path only).
        let co2_footprint_kg = signals.co2e_kg.unwrap_or_else(|| {
            carbon::fallback_estimate(
                category,
                signal.energy_consumption_kwh,
                signal.weight_kg,
            )
        });

        let highlights = build_highlights(&extraction);

        Ok(SustainabilityRecord {
            product_name: signal.name.clone(),
            brand: signal.brand.clone(),
            category: signal.category.clone(),
            components: ComponentScores {
                carbon: components::carbon_component(carbon_score),
                recyclability: components::rated(recyclability),
                ethical_sourcing: components::rated(ethics),
                packaging: components::rated(packaging),
            },
            certifications,
            brand_ethics: components::rated(brand_ethics),
            transparency: components::transparency_component(transparency),
            peer_comparison: peer,
            materials,
            co2_footprint_kg,
            highlights,
            overall_score,
            overall_grade,
        })
    }

    /// Build a pool candidate from raw search-result text using the quick
    /// keyword heuristic; used when only a title and snippet are available.
    pub fn quick_candidate(
        &self,
        id: impl Into<String>,
        title: impl Into<String>,
        price: Option<f64>,
        link: Option<String>,
        raw_text: &str,
    ) -> CandidateProduct {
        let title = title.into();
        let text = format!("{title} {raw_text}");
        let extraction = self.extractor.extract_text(&text);

        let eco_score = composite::quick_keyword_score(extraction.keyword_weight_total());
        let mut materials = extraction.materials;
        materials.truncate(MAX_RECORD_MATERIALS);
        let weights: Vec<u32> = materials.iter().map(|material| material.eco_weight).collect();

        CandidateProduct {
            id: id.into(),
            title,
            price,
            link,
            eco_score,
            co2_footprint_kg: composite::co2_from_materials(&weights),
            recyclability_grade: RecyclabilityGrade::from_materials(&materials),
            certifications: extraction.certifications,
            materials,
        }
    }

    /// Rank a candidate pool against an already-scored record.
    pub fn rank_alternatives(
        &self,
        current: &CurrentProduct,
        pool: &[CandidateProduct],
        options: &RankOptions,
    ) -> Vec<AlternativeCandidate> {
        rank(current, pool, options)
    }
}

/// Detected material names plus the ML pipeline's canonical labels, without
/// case-insensitive duplicates. Detection order is preserved so truncation
/// keeps the earliest matches.
fn merge_material_names(extraction: &Extraction, ml: Option<&MlSignals>) -> Vec<String> {
    let mut names = extraction.material_names();
    if let Some(ml) = ml {
        for label in &ml.materials {
            if !names.iter().any(|existing| existing.eq_ignore_ascii_case(label)) {
                names.push(label.clone());
            }
        }
    }
    names
}

fn build_highlights(extraction: &Extraction) -> Vec<String> {
    let mut highlights = Vec::new();
    let has = |token: &str| {
        extraction.materials.iter().any(|material| material.name.contains(token))
    };

    if has("recycled") {
        highlights.push("♻️ Made from recycled materials".to_owned());
    }
    if has("bamboo") {
        highlights.push("🎋 Sustainable bamboo construction".to_owned());
    }
    if has("organic") {
        highlights.push("🌿 Organic materials used".to_owned());
    }
    if !extraction.certifications.is_empty() {
        highlights.push(format!("🏆 {} eco-certifications", extraction.certifications.len()));
    }
    if !extraction.materials.is_empty()
        && extraction.materials.iter().all(|material| material.recyclable)
    {
        highlights.push("♻️ Fully recyclable product".to_owned());
    }

    highlights.truncate(3);
    highlights
}

#[cfg(test)]
mod tests {
    use super::{ExternalSignals, MlSignals, ScoringEngine};
    use crate::domain::record::{Comparison, EmissionsLevel};
    use crate::domain::signal::ProductSignal;
    use crate::grade::Grade;

    fn engine() -> ScoringEngine {
        ScoringEngine::new().expect("default tables build")
    }

    #[test]
    fn clothing_with_no_signals_scores_the_baseline_row() {
        let signal = ProductSignal::new("Plain Tee", "Clothing");
        let record = engine().score(&signal, &ExternalSignals::default()).expect("scores");

        assert_eq!(record.components.carbon.score, 55.0);
        assert_eq!(record.components.recyclability.score, 50.0);
        assert_eq!(record.components.ethical_sourcing.score, 50.0);
        assert_eq!(record.components.packaging.score, 50.0);
    }

    #[test]
    fn bamboo_and_recycled_text_earns_the_bamboo_carbon_bonus() {
        let signal = ProductSignal::new("Toothbrush", "Beauty")
            .with_description("100% organic bamboo, recycled packaging");
        let record = engine().score(&signal, &ExternalSignals::default()).expect("scores");

        // Beauty carbon base 70; "bamboo" +20; "recycled" is a detection
        // name, not the canonical "Recycled Material" label, so it adds 0.
        assert_eq!(record.components.carbon.score, 90.0);
        assert_eq!(record.components.carbon.rating, EmissionsLevel::Low);

        let names: Vec<&str> =
            record.materials.iter().map(|material| material.name.as_str()).collect();
        assert!(names.contains(&"bamboo"));
        assert!(names.contains(&"recycled"));
    }

    #[test]
    fn scoring_is_idempotent() {
        let signal = ProductSignal::new("Bamboo Cutting Board", "Home & Garden")
            .with_description("FSC certified bamboo, plastic-free")
            .with_brand("GreenKitchen")
            .with_price(24.0);

        let first = engine().score(&signal, &ExternalSignals::default()).expect("scores");
        let second = engine().score(&signal, &ExternalSignals::default()).expect("scores");

        assert_eq!(first, second);
    }

    #[test]
    fn missing_required_field_fails_fast() {
        let signal = ProductSignal::new("", "Clothing");
        let error = engine()
            .score(&signal, &ExternalSignals::default())
            .expect_err("empty name is a programmer error");
        assert!(error.to_string().contains("`name`"));
    }

    #[test]
    fn ml_signals_take_priority_over_heuristics() {
        let signal = ProductSignal::new("Mystery Box", "General");
        let signals = ExternalSignals {
            ml: Some(MlSignals {
                materials: vec!["Recycled Material".to_owned()],
                packaging_impact: Some(0.1),
                ethical_score: Some(0.9),
                recyclable_fraction: Some(0.75),
            }),
            co2e_kg: None,
        };
        let record = engine().score(&signal, &signals).expect("scores");

        assert_eq!(record.components.recyclability.score, 75.0);
        assert_eq!(record.components.ethical_sourcing.score, 90.0);
        assert_eq!(record.components.packaging.score, 90.0);
        // Carbon heuristic: General 50 + Recycled Material 15 + (1-0.1)*10.
        assert_eq!(record.components.carbon.score, 74.0);
    }

    #[test]
    fn measured_co2e_takes_the_benchmark_path() {
        let signal = ProductSignal::new("Ultrabook", "Laptop");
        let signals = ExternalSignals { ml: None, co2e_kg: Some(150.0) };
        let record = engine().score(&signal, &signals).expect("scores");

        assert_eq!(record.components.carbon.score, 90.0);
        assert_eq!(record.co2_footprint_kg, 150.0);
    }

    #[test]
    fn co2_fallback_blends_category_average_energy_and_weight() {
        let mut signal = ProductSignal::new("55-inch TV", "Television");
        signal.energy_consumption_kwh = Some(100.0);
        signal.weight_kg = Some(10.0);

        let record = engine().score(&signal, &ExternalSignals::default()).expect("scores");

        // Television average 50 kg + 100 kWh * 0.5 grid factor + 10 kg * 2.
        assert_eq!(record.co2_footprint_kg, 120.0);
    }

    #[test]
    fn record_is_fully_populated_without_any_external_signals() {
        let signal = ProductSignal::new("Bamboo Utensil Set", "Home & Garden")
            .with_description("Reusable bamboo cutlery, FSC certified, zero-waste pouch");
        let record = engine().score(&signal, &ExternalSignals::default()).expect("scores");

        assert!((0.0..=100.0).contains(&record.overall_score));
        assert!(matches!(
            record.overall_grade,
            Grade::A | Grade::B | Grade::C | Grade::D | Grade::E
        ));
        assert!(!record.certifications.is_empty());
        assert!(!record.materials.is_empty());
        assert!(!record.highlights.is_empty());
        assert!(matches!(
            record.peer_comparison.comparison,
            Comparison::Better | Comparison::Worse | Comparison::Equal
        ));
    }

    #[test]
    fn quick_candidate_scores_from_raw_text() {
        let candidate = engine().quick_candidate(
            "alt-1",
            "Bamboo Toothbrush 4-pack",
            Some(9.99),
            None,
            "biodegradable bamboo handle, compostable packaging",
        );

        // 50 + bamboo 12 + biodegradable 20 + compostable 18 + bio 10,
        // clamped to 100 ("bio" matches inside "biodegradable").
        assert_eq!(candidate.eco_score, 100.0);
        assert!(candidate.materials.iter().any(|material| material.name == "bamboo"));
    }
}
