//! Text feature extraction over product copy.
//!
//! One Aho-Corasick automaton per table, built case-insensitively so the
//! extractor scans arbitrarily long descriptions in a single pass. Hyphenated
//! lexicon keys also match their space-separated spelling ("eco-friendly"
//! matches "eco friendly"). A keyword present anywhere in the text contributes
//! its weight exactly once, however many times it occurs.

use aho_corasick::AhoCorasick;
use thiserror::Error;

use crate::domain::record::{KeywordMatch, MaterialMatch};
use crate::domain::signal::ProductSignal;
use crate::lexicon::Lexicon;

#[derive(Debug, Error)]
#[error("could not build lexicon automaton: {0}")]
pub struct ExtractorBuildError(String);

/// Everything the extractor found in one product's text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extraction {
    pub materials: Vec<MaterialMatch>,
    pub keywords: Vec<KeywordMatch>,
    pub certifications: Vec<String>,
}

impl Extraction {
    pub fn material_names(&self) -> Vec<String> {
        self.materials.iter().map(|material| material.name.clone()).collect()
    }

    pub fn keyword_weight_total(&self) -> i32 {
        self.keywords.iter().map(|keyword| keyword.weight).sum()
    }
}

struct Automaton {
    matcher: AhoCorasick,
    // Pattern index -> lexicon entry index; hyphen/space variants of the same
    // entry share an entry index.
    entry_of_pattern: Vec<usize>,
    entry_count: usize,
}

impl Automaton {
    fn build(keys: impl Iterator<Item = String>) -> Result<Self, ExtractorBuildError> {
        let mut patterns = Vec::new();
        let mut entry_of_pattern = Vec::new();
        let mut entry_count = 0;

        for key in keys {
            patterns.push(key.clone());
            entry_of_pattern.push(entry_count);
            if key.contains('-') {
                patterns.push(key.replace('-', " "));
                entry_of_pattern.push(entry_count);
            }
            entry_count += 1;
        }

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&patterns)
            .map_err(|error| ExtractorBuildError(error.to_string()))?;

        Ok(Self { matcher, entry_of_pattern, entry_count })
    }

    /// Distinct lexicon entries present in the text, in table order.
    fn matched_entries(&self, text: &str) -> Vec<usize> {
        let mut seen = vec![false; self.entry_count];
        for matched in self.matcher.find_overlapping_iter(text) {
            seen[self.entry_of_pattern[matched.pattern().as_usize()]] = true;
        }
        seen.iter().enumerate().filter(|(_, hit)| **hit).map(|(index, _)| index).collect()
    }
}

/// Pure extractor over a fixed lexicon. Construct once, reuse across calls.
pub struct FeatureExtractor {
    lexicon: Lexicon,
    keywords: Automaton,
    materials: Automaton,
    certifications: Automaton,
}

impl FeatureExtractor {
    pub fn new(lexicon: Lexicon) -> Result<Self, ExtractorBuildError> {
        let keywords =
            Automaton::build(lexicon.keywords.iter().map(|seed| seed.keyword.to_owned()))?;
        let materials =
            Automaton::build(lexicon.materials.iter().map(|seed| seed.name.to_owned()))?;
        let certifications =
            Automaton::build(lexicon.certifications.iter().map(|seed| seed.phrase.to_owned()))?;

        Ok(Self { lexicon, keywords, materials, certifications })
    }

    pub fn extract(&self, signal: &ProductSignal) -> Extraction {
        self.extract_text(&signal.combined_text())
    }

    /// Extract from already-assembled free text (search results, raw scrapes).
    pub fn extract_text(&self, text: &str) -> Extraction {
        let text = text.to_lowercase();

        let keywords = self
            .keywords
            .matched_entries(&text)
            .into_iter()
            .map(|index| {
                let seed = &self.lexicon.keywords[index];
                KeywordMatch { keyword: seed.keyword.to_owned(), weight: seed.weight }
            })
            .collect();

        let materials = self
            .materials
            .matched_entries(&text)
            .into_iter()
            .map(|index| {
                let seed = &self.lexicon.materials[index];
                MaterialMatch {
                    name: seed.name.to_owned(),
                    recyclable: seed.recyclable,
                    eco_weight: seed.eco_weight,
                    emoji: seed.emoji.to_owned(),
                }
            })
            .collect();

        let mut certifications: Vec<String> = Vec::new();
        for index in self.certifications.matched_entries(&text) {
            let label = self.lexicon.certifications[index].label.to_owned();
            if !certifications.contains(&label) {
                certifications.push(label);
            }
        }

        Extraction { materials, keywords, certifications }
    }
}

#[cfg(test)]
mod tests {
    use super::FeatureExtractor;
    use crate::domain::signal::ProductSignal;
    use crate::lexicon::Lexicon;

    fn extractor() -> FeatureExtractor {
        FeatureExtractor::new(Lexicon::default()).expect("default lexicon builds")
    }

    #[test]
    fn detects_materials_and_keywords_from_mixed_text() {
        let signal = ProductSignal::new("Bamboo Toothbrush", "Beauty")
            .with_description("100% organic bamboo, recycled packaging");

        let extraction = extractor().extract(&signal);

        let materials: Vec<&str> =
            extraction.materials.iter().map(|material| material.name.as_str()).collect();
        assert!(materials.contains(&"bamboo"));
        assert!(materials.contains(&"recycled"));

        let organic = extraction
            .keywords
            .iter()
            .find(|keyword| keyword.keyword == "organic")
            .expect("organic keyword detected");
        assert_eq!(organic.weight, 18);
        let recycled = extraction
            .keywords
            .iter()
            .find(|keyword| keyword.keyword == "recycled")
            .expect("recycled keyword detected");
        assert_eq!(recycled.weight, 15);
        let bamboo = extraction
            .keywords
            .iter()
            .find(|keyword| keyword.keyword == "bamboo")
            .expect("bamboo keyword detected");
        assert_eq!(bamboo.weight, 12);
    }

    #[test]
    fn keyword_counts_once_regardless_of_occurrences() {
        let signal = ProductSignal::new("Bamboo bamboo bamboo bowl", "Home & Garden");

        let extraction = extractor().extract(&signal);

        let bamboo_entries =
            extraction.keywords.iter().filter(|keyword| keyword.keyword == "bamboo").count();
        assert_eq!(bamboo_entries, 1);
    }

    #[test]
    fn hyphenated_keywords_match_space_separated_text() {
        let signal =
            ProductSignal::new("Water Bottle", "Sports").with_description("eco friendly steel");

        let extraction = extractor().extract(&signal);

        assert!(extraction.keywords.iter().any(|keyword| keyword.keyword == "eco-friendly"));
    }

    #[test]
    fn certification_labels_are_deduplicated() {
        let signal = ProductSignal::new("Desk", "Furniture")
            .with_description("FSC certified frame, fsc certified top, fair trade assembly");

        let extraction = extractor().extract(&signal);

        assert_eq!(
            extraction.certifications,
            vec!["🌲 FSC Certified".to_owned(), "🤝 Fair Trade".to_owned()]
        );
    }

    #[test]
    fn materials_appear_in_table_order() {
        let signal =
            ProductSignal::new("Kit", "General").with_description("plastic handle with bamboo body");

        let extraction = extractor().extract(&signal);

        let names: Vec<&str> =
            extraction.materials.iter().map(|material| material.name.as_str()).collect();
        // bamboo precedes plastic in the table even though plastic occurs
        // first in the text.
        assert_eq!(names, vec!["bamboo", "plastic"]);
    }

    #[test]
    fn empty_text_extracts_nothing() {
        let extraction = extractor().extract_text("");
        assert!(extraction.materials.is_empty());
        assert!(extraction.keywords.is_empty());
        assert!(extraction.certifications.is_empty());
    }
}
