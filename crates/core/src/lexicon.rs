//! Static keyword, material, and certification tables.
//!
//! The lexicon is an explicit, immutable configuration object handed to the
//! engine at construction time, so tests can run against smaller tables.
//! Material detection order follows table order; truncated material lists in
//! output keep the earliest detections.

#[derive(Clone, Copy, Debug)]
pub struct KeywordSeed {
    pub keyword: &'static str,
    pub weight: i32,
}

#[derive(Clone, Copy, Debug)]
pub struct MaterialSeed {
    pub name: &'static str,
    pub emoji: &'static str,
    pub eco_weight: u32,
    pub recyclable: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct CertificationSeed {
    pub phrase: &'static str,
    pub label: &'static str,
}

pub const ECO_KEYWORDS: &[KeywordSeed] = &[
    KeywordSeed { keyword: "recycled", weight: 15 },
    KeywordSeed { keyword: "organic", weight: 18 },
    KeywordSeed { keyword: "biodegradable", weight: 20 },
    KeywordSeed { keyword: "eco-friendly", weight: 15 },
    KeywordSeed { keyword: "bamboo", weight: 12 },
    KeywordSeed { keyword: "sustainable", weight: 15 },
    KeywordSeed { keyword: "natural", weight: 10 },
    KeywordSeed { keyword: "renewable", weight: 15 },
    KeywordSeed { keyword: "compostable", weight: 18 },
    KeywordSeed { keyword: "reusable", weight: 15 },
    KeywordSeed { keyword: "plant-based", weight: 15 },
    KeywordSeed { keyword: "green", weight: 8 },
    KeywordSeed { keyword: "eco", weight: 10 },
    KeywordSeed { keyword: "environmental", weight: 8 },
    KeywordSeed { keyword: "carbon-neutral", weight: 20 },
    KeywordSeed { keyword: "zero-waste", weight: 18 },
    KeywordSeed { keyword: "fair-trade", weight: 12 },
    KeywordSeed { keyword: "ethical", weight: 10 },
    KeywordSeed { keyword: "b-corp", weight: 15 },
    KeywordSeed { keyword: "certified", weight: 8 },
    KeywordSeed { keyword: "solar", weight: 12 },
    KeywordSeed { keyword: "wind", weight: 12 },
    KeywordSeed { keyword: "hemp", weight: 10 },
    KeywordSeed { keyword: "jute", weight: 10 },
    KeywordSeed { keyword: "cork", weight: 10 },
    KeywordSeed { keyword: "upcycled", weight: 15 },
    KeywordSeed { keyword: "refillable", weight: 12 },
    KeywordSeed { keyword: "minimal-packaging", weight: 12 },
    KeywordSeed { keyword: "bio", weight: 10 },
    KeywordSeed { keyword: "vegan", weight: 12 },
    KeywordSeed { keyword: "cruelty-free", weight: 10 },
    KeywordSeed { keyword: "non-toxic", weight: 12 },
    KeywordSeed { keyword: "fsc", weight: 15 },
    KeywordSeed { keyword: "plastic", weight: -20 },
    KeywordSeed { keyword: "disposable", weight: -15 },
    KeywordSeed { keyword: "single-use", weight: -20 },
    KeywordSeed { keyword: "non-recyclable", weight: -15 },
    KeywordSeed { keyword: "petroleum", weight: -15 },
    KeywordSeed { keyword: "synthetic", weight: -10 },
    KeywordSeed { keyword: "fossil", weight: -18 },
    KeywordSeed { keyword: "toxic", weight: -20 },
    KeywordSeed { keyword: "chemical", weight: -10 },
    KeywordSeed { keyword: "bleached", weight: -8 },
    KeywordSeed { keyword: "non-biodegradable", weight: -15 },
    KeywordSeed { keyword: "pvc", weight: -15 },
    KeywordSeed { keyword: "microplastic", weight: -20 },
    KeywordSeed { keyword: "styrofoam", weight: -18 },
    KeywordSeed { keyword: "polystyrene", weight: -15 },
];

pub const MATERIALS: &[MaterialSeed] = &[
    MaterialSeed { name: "bamboo", emoji: "🎋", eco_weight: 85, recyclable: true },
    MaterialSeed { name: "organic cotton", emoji: "🌿", eco_weight: 80, recyclable: true },
    MaterialSeed { name: "recycled", emoji: "♻️", eco_weight: 90, recyclable: true },
    MaterialSeed { name: "hemp", emoji: "🌾", eco_weight: 85, recyclable: true },
    MaterialSeed { name: "cork", emoji: "🪵", eco_weight: 80, recyclable: true },
    MaterialSeed { name: "wood", emoji: "🌳", eco_weight: 70, recyclable: true },
    MaterialSeed { name: "glass", emoji: "🫙", eco_weight: 85, recyclable: true },
    MaterialSeed { name: "metal", emoji: "🔩", eco_weight: 75, recyclable: true },
    MaterialSeed { name: "plastic", emoji: "🛢️", eco_weight: 30, recyclable: false },
    MaterialSeed { name: "polyester", emoji: "🧵", eco_weight: 40, recyclable: false },
];

pub const CERTIFICATIONS: &[CertificationSeed] = &[
    CertificationSeed { phrase: "fsc certified", label: "🌲 FSC Certified" },
    CertificationSeed { phrase: "fair trade", label: "🤝 Fair Trade" },
    CertificationSeed { phrase: "organic", label: "🌱 USDA Organic" },
    CertificationSeed { phrase: "b corp", label: "🏆 B Corporation" },
    CertificationSeed { phrase: "carbon neutral", label: "🌍 Carbon Neutral" },
    CertificationSeed { phrase: "energy star", label: "⭐ Energy Star" },
    CertificationSeed { phrase: "cruelty free", label: "🐰 Cruelty Free" },
];

/// Signed carbon adjustment per material, looked up case-insensitively.
/// Unknown materials contribute nothing.
const CARBON_ADJUSTMENTS: &[(&str, i32)] = &[
    ("plastic", -15),
    ("metal", -10),
    ("steel", -8),
    ("aluminum", -5),
    ("polyester", -12),
    ("leather", -18),
    ("bamboo", 20),
    ("recycled material", 15),
    ("wood", 8),
    ("paper", 10),
    ("cotton", 5),
    ("glass", -3),
    ("ceramic", -5),
    ("silicone", -7),
];

/// Per-material recyclability weights; materials off this list score 40.
const RECYCLABILITY_WEIGHTS: &[(&str, u32)] = &[
    ("aluminum", 95),
    ("steel", 90),
    ("glass", 85),
    ("paper", 80),
    ("cardboard", 85),
    ("metal", 88),
    ("wood", 70),
    ("cotton", 60),
    ("bamboo", 85),
    ("recycled material", 90),
    ("plastic", 25),
    ("polyester", 20),
    ("leather", 15),
    ("rubber", 30),
    ("silicone", 35),
    ("ceramic", 10),
];

/// Per-material ethical-sourcing weights; unknown materials score 50.
const ETHICS_WEIGHTS: &[(&str, u32)] = &[
    ("bamboo", 85),
    ("recycled material", 80),
    ("wood", 65),
    ("cotton", 60),
    ("paper", 70),
    ("leather", 25),
    ("plastic", 40),
    ("metal", 55),
];

/// Per-material packaging-friendliness weights; unknown materials score 50.
const PACKAGING_WEIGHTS: &[(&str, u32)] = &[
    ("paper", 85),
    ("cardboard", 80),
    ("bamboo", 90),
    ("wood", 75),
    ("glass", 70),
    ("metal", 65),
    ("aluminum", 70),
    ("plastic", 30),
    ("polyester", 25),
    ("styrofoam", 15),
];

pub const SUSTAINABLE_MATERIALS: &[&str] =
    &["bamboo", "recycled material", "wood", "cotton", "paper"];

pub const UNSUSTAINABLE_MATERIALS: &[&str] = &["plastic", "polyester", "leather"];

/// Material-triggered certificates added to the certification sub-score.
pub const MATERIAL_CERTIFICATES: &[(&str, &str, i32)] = &[
    ("bamboo", "FSC Certified", 10),
    ("recycled material", "Recycled Content", 15),
    ("wood", "FSC Certified", 8),
    ("cotton", "GOTS", 5),
];

/// Brands with a strong public sustainability record; matched by substring.
pub const CURATED_ETHICAL_BRANDS: &[&str] = &["patagonia", "tesla", "seventh generation"];

/// Eco-sounding brand-name tokens worth a smaller reputation bump.
pub const ECO_BRAND_KEYWORDS: &[&str] =
    &["eco", "green", "sustainable", "organic", "natural"];

/// Broader token list also covering bamboo, used for the B-Corp certificate
/// heuristic.
pub const BCORP_BRAND_KEYWORDS: &[&str] =
    &["patagonia", "tesla", "bamboo", "eco", "green", "sustainable"];

/// Exact brand reputation scores; anything else starts at 60.
pub const BRAND_ETHICS_SCORES: &[(&str, u32)] = &[
    ("patagonia", 95),
    ("tesla", 90),
    ("unilever", 80),
    ("ben & jerry", 85),
    ("seventh generation", 90),
    ("method", 85),
];

fn lookup_weight(table: &[(&str, u32)], name: &str, default: u32) -> u32 {
    table
        .iter()
        .find(|(entry, _)| entry.eq_ignore_ascii_case(name))
        .map(|(_, weight)| *weight)
        .unwrap_or(default)
}

pub fn carbon_adjustment(material: &str) -> i32 {
    CARBON_ADJUSTMENTS
        .iter()
        .find(|(entry, _)| entry.eq_ignore_ascii_case(material))
        .map(|(_, adjustment)| *adjustment)
        .unwrap_or(0)
}

pub fn recyclability_weight(material: &str) -> u32 {
    lookup_weight(RECYCLABILITY_WEIGHTS, material, 40)
}

pub fn ethics_weight(material: &str) -> u32 {
    lookup_weight(ETHICS_WEIGHTS, material, 50)
}

pub fn packaging_weight(material: &str) -> u32 {
    lookup_weight(PACKAGING_WEIGHTS, material, 50)
}

pub fn is_sustainable_material(material: &str) -> bool {
    SUSTAINABLE_MATERIALS.iter().any(|entry| entry.eq_ignore_ascii_case(material))
}

pub fn is_unsustainable_material(material: &str) -> bool {
    UNSUSTAINABLE_MATERIALS.iter().any(|entry| entry.eq_ignore_ascii_case(material))
}

/// The full lexicon handed to the extractor. [`Lexicon::default`] loads the
/// production tables; tests can construct smaller ones.
#[derive(Clone, Debug)]
pub struct Lexicon {
    pub keywords: Vec<KeywordSeed>,
    pub materials: Vec<MaterialSeed>,
    pub certifications: Vec<CertificationSeed>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            keywords: ECO_KEYWORDS.to_vec(),
            materials: MATERIALS.to_vec(),
            certifications: CERTIFICATIONS.to_vec(),
        }
    }
}
