use serde::{Deserialize, Serialize};

use crate::content::words::LengthClass;

/// Tolerance for the word-mix weights summing to one.
pub const WEIGHT_EPSILON: f64 = 1e-6;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LengthWeight {
    pub class: LengthClass,
    pub weight: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlateType {
    pub price: u32,
    pub color: String,
    pub border_color: String,
}

/// A playable course preset. Read-only once loaded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub cost: u32,
    #[serde(default)]
    pub color: String,
    /// Round length in seconds before any combo bonus.
    pub time_limit: u32,
    #[serde(default)]
    pub length_desc: String,
    pub speed_base: f64,
    pub speed_variance: f64,
    pub word_mix: Vec<LengthWeight>,
    pub price_mix: Vec<u32>,
    #[serde(default)]
    pub emoji: String,
}

impl Course {
    pub fn weight_sum(&self) -> f64 {
        self.word_mix.iter().map(|m| m.weight).sum()
    }

    pub fn weights_balanced(&self) -> bool {
        (self.weight_sum() - 1.0).abs() <= WEIGHT_EPSILON
    }

    /// Mix as `(class, weight)` pairs in declaration order.
    pub fn length_outcomes(&self) -> Vec<(LengthClass, f64)> {
        self.word_mix.iter().map(|m| (m.class, m.weight)).collect()
    }

    pub fn classes(&self) -> impl Iterator<Item = LengthClass> + '_ {
        self.word_mix.iter().map(|m| m.class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(weights: &[f64]) -> Course {
        Course {
            id: "T".to_string(),
            title: "test".to_string(),
            cost: 0,
            color: String::new(),
            time_limit: 10,
            length_desc: String::new(),
            speed_base: 5.0,
            speed_variance: 1.0,
            word_mix: weights
                .iter()
                .map(|&weight| LengthWeight {
                    class: LengthClass::Short,
                    weight,
                })
                .collect(),
            price_mix: vec![1000],
            emoji: String::new(),
        }
    }

    #[test]
    fn float_noise_still_balanced() {
        assert!(course(&[0.1, 0.2, 0.7]).weights_balanced());
        assert!(course(&[0.3, 0.7]).weights_balanced());
    }

    #[test]
    fn short_mix_is_unbalanced() {
        assert!(!course(&[0.2, 0.7]).weights_balanced());
        assert!(!course(&[]).weights_balanced());
    }
}
