use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::keyboard::normalize::nfc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthClass {
    Short,
    Medium,
    Long,
}

impl LengthClass {
    pub fn as_str(self) -> &'static str {
        match self {
            LengthClass::Short => "short",
            LengthClass::Medium => "medium",
            LengthClass::Long => "long",
        }
    }
}

impl fmt::Display for LengthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target words grouped by length class.
#[derive(Clone, Debug, Default)]
pub struct WordPools {
    pools: HashMap<LengthClass, Vec<String>>,
}

impl WordPools {
    pub fn new(pools: HashMap<LengthClass, Vec<String>>) -> Self {
        // Words are stored precomposed so they compare equal to normalized input.
        let pools = pools
            .into_iter()
            .map(|(class, words)| {
                let words = words
                    .into_iter()
                    .map(|w| nfc(w.trim()))
                    .filter(|w| !w.is_empty())
                    .collect();
                (class, words)
            })
            .collect();
        Self { pools }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let pools: HashMap<LengthClass, Vec<String>> = serde_json::from_str(json)?;
        Ok(Self::new(pools))
    }

    pub fn pool(&self, class: LengthClass) -> &[String] {
        self.pools.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total(&self) -> usize {
        self.pools.values().map(Vec::len).sum()
    }
}
