//! Letter-grade algebra for composite scores.
//!
//! Two threshold sets survive from production use and are deliberately kept
//! as distinct functions: [`Grade::from_score`] grades a numeric composite
//! (80/65/50/35), while [`average_grade`] averages letter grades through the
//! wider 90/75/55/40/25 numeric map before regrading. Do not merge them.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
}

impl Grade {
    /// Grade a 0-100 composite score.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::A
        } else if score >= 65.0 {
            Self::B
        } else if score >= 50.0 {
            Self::C
        } else if score >= 35.0 {
            Self::D
        } else {
            Self::E
        }
    }

    /// Representative numeric value used when averaging letter grades.
    pub fn representative_score(self) -> f64 {
        match self {
            Self::A => 90.0,
            Self::B => 75.0,
            Self::C => 55.0,
            Self::D => 40.0,
            Self::E => 25.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        }
    }
}

impl std::str::FromStr for Grade {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "E" => Ok(Self::E),
            other => Err(format!("unknown grade `{other}` (expected A-E)")),
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Average a set of letter grades. Empty input has no meaningful average.
pub fn average_grade(grades: &[Grade]) -> Option<Grade> {
    if grades.is_empty() {
        return None;
    }
    let total: f64 = grades.iter().map(|grade| grade.representative_score()).sum();
    Some(Grade::from_score(total / grades.len() as f64))
}

/// Clamp to [0,100] and round to the nearest integer value.
pub fn clamp_round(score: f64) -> f64 {
    score.clamp(0.0, 100.0).round()
}
