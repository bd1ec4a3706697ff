use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Raw product signals collected at a retail page or submitted by a caller.
/// Immutable input to a scoring call; nothing in here is persisted as-is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductSignal {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub feature_bullets: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub energy_consumption_kwh: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub warranty: Option<String>,
}

impl ProductSignal {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            feature_bullets: Vec::new(),
            category: category.into(),
            brand: None,
            energy_consumption_kwh: None,
            weight_kg: None,
            price: None,
            url: None,
            origin: None,
            warranty: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Required fields must be present before scoring begins. Data-quality
    /// problems elsewhere degrade gracefully; an unnamed or uncategorized
    /// product is a programmer error.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvariantViolation(
                "product signal is missing required field `name`".to_owned(),
            ));
        }
        if self.category.trim().is_empty() {
            return Err(DomainError::InvariantViolation(
                "product signal is missing required field `category`".to_owned(),
            ));
        }
        Ok(())
    }

    /// Fill defaults and clamp out-of-range numerics once, up front, so the
    /// scorers never have to re-check.
    pub fn normalized(mut self) -> Self {
        if let Some(energy) = self.energy_consumption_kwh {
            self.energy_consumption_kwh = Some(energy.max(0.0));
        }
        if let Some(weight) = self.weight_kg {
            self.weight_kg = Some(weight.max(0.0));
        }
        if let Some(price) = self.price {
            self.price = Some(price.max(0.0));
        }
        self
    }

    /// Lowercased concatenation of every free-text field, the input to the
    /// feature extractor.
    pub fn combined_text(&self) -> String {
        let mut text = self.name.clone();
        if let Some(description) = &self.description {
            text.push(' ');
            text.push_str(description);
        }
        for bullet in &self.feature_bullets {
            text.push(' ');
            text.push_str(bullet);
        }
        text.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::ProductSignal;

    #[test]
    fn validate_rejects_empty_name() {
        let signal = ProductSignal::new("  ", "Clothing");
        let error = signal.validate().expect_err("empty name should fail validation");
        assert!(error.to_string().contains("`name`"));
    }

    #[test]
    fn validate_rejects_empty_category() {
        let signal = ProductSignal::new("Organic Tee", "");
        let error = signal.validate().expect_err("empty category should fail validation");
        assert!(error.to_string().contains("`category`"));
    }

    #[test]
    fn normalized_clamps_negative_numerics_to_zero() {
        let mut signal = ProductSignal::new("Lamp", "Electronics");
        signal.energy_consumption_kwh = Some(-4.0);
        signal.weight_kg = Some(-1.5);

        let normalized = signal.normalized();

        assert_eq!(normalized.energy_consumption_kwh, Some(0.0));
        assert_eq!(normalized.weight_kg, Some(0.0));
    }

    #[test]
    fn combined_text_is_lowercased_and_includes_bullets() {
        let mut signal =
            ProductSignal::new("Bamboo Brush", "Beauty").with_description("Plastic-Free Handle");
        signal.feature_bullets = vec!["FSC Certified wood".to_owned()];

        let text = signal.combined_text();

        assert!(text.contains("bamboo brush"));
        assert!(text.contains("plastic-free handle"));
        assert!(text.contains("fsc certified wood"));
    }
}
