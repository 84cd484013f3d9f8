pub mod course;
pub mod words;

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

pub use course::{Course, LengthWeight, PlateType};
pub use words::{LengthClass, WordPools};

const WORDS_KO: &str = include_str!("../../assets/words-ko.json");
const COURSES: &str = include_str!("../../assets/courses.toml");

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to parse word pools: {0}")]
    Words(#[from] serde_json::Error),
    #[error("failed to parse course table: {0}")]
    Courses(#[from] toml::de::Error),
    #[error("duplicate course id {0}")]
    DuplicateCourse(String),
    #[error("course {course}: word-length weights sum to {sum}, expected 1.0")]
    WeightSum { course: String, sum: f64 },
    #[error("course {0}: price mix is empty")]
    EmptyPriceMix(String),
    #[error("course {course}: price {price} has no plate type")]
    UnknownPrice { course: String, price: u32 },
    #[error("course {course}: no words for length class {class}")]
    EmptyWordPool { course: String, class: LengthClass },
    #[error("sushi emoji table is empty")]
    NoEmoji,
}

#[derive(Deserialize)]
struct CourseTable {
    #[serde(default)]
    emojis: Vec<String>,
    plates: Vec<PlateType>,
    courses: Vec<Course>,
}

/// Static game content: courses, plate tiers, word pools and item emoji.
#[derive(Clone, Debug)]
pub struct ContentRegistry {
    courses: Vec<Course>,
    plates: BTreeMap<u32, PlateType>,
    words: WordPools,
    emojis: Vec<String>,
}

impl ContentRegistry {
    /// Builds a registry without validating it. `load` and `from_sources`
    /// validate; this is for callers that assemble content by hand.
    pub fn new(
        courses: Vec<Course>,
        plates: Vec<PlateType>,
        words: WordPools,
        emojis: Vec<String>,
    ) -> Self {
        let plates = plates.into_iter().map(|p| (p.price, p)).collect();
        Self {
            courses,
            plates,
            words,
            emojis,
        }
    }

    /// Loads the bundled content tables.
    pub fn load() -> Result<Self, ContentError> {
        Self::from_sources(WORDS_KO, COURSES)
    }

    pub fn from_sources(words_json: &str, courses_toml: &str) -> Result<Self, ContentError> {
        let words = WordPools::from_json(words_json)?;
        let table: CourseTable = toml::from_str(courses_toml)?;
        let registry = Self::new(table.courses, table.plates, words, table.emojis);
        registry.validate()?;
        log::debug!(
            "content loaded: {} courses, {} plate tiers, {} words",
            registry.courses.len(),
            registry.plates.len(),
            registry.words.total()
        );
        Ok(registry)
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.emojis.is_empty() {
            return Err(ContentError::NoEmoji);
        }
        for (i, course) in self.courses.iter().enumerate() {
            if self.courses[..i].iter().any(|c| c.id == course.id) {
                return Err(ContentError::DuplicateCourse(course.id.clone()));
            }
            self.validate_course(course)?;
        }
        Ok(())
    }

    /// Checks that `course` can spawn items from this registry.
    pub fn validate_course(&self, course: &Course) -> Result<(), ContentError> {
        if !course.weights_balanced() {
            return Err(ContentError::WeightSum {
                course: course.id.clone(),
                sum: course.weight_sum(),
            });
        }
        if course.price_mix.is_empty() {
            return Err(ContentError::EmptyPriceMix(course.id.clone()));
        }
        if let Some(&price) = course.price_mix.iter().find(|p| !self.plates.contains_key(p)) {
            return Err(ContentError::UnknownPrice {
                course: course.id.clone(),
                price,
            });
        }
        if let Some(class) = course.classes().find(|&c| self.words.pool(c).is_empty()) {
            return Err(ContentError::EmptyWordPool {
                course: course.id.clone(),
                class,
            });
        }
        Ok(())
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id.eq_ignore_ascii_case(id))
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn plate(&self, price: u32) -> Option<&PlateType> {
        self.plates.get(&price)
    }

    /// All tier prices, cheapest first.
    pub fn prices(&self) -> Vec<u32> {
        self.plates.keys().copied().collect()
    }

    pub fn words(&self) -> &WordPools {
        &self.words
    }

    pub fn emojis(&self) -> &[String] {
        &self.emojis
    }
}
