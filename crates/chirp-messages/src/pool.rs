//! The categorized message pool.
//!
//! The pool is a mapping from [`Category`] to an ordered list of strings,
//! loaded once from a JSON object keyed by category name. A bundled copy of
//! the data ships inside the binary; a missing or malformed external file is
//! never fatal (selection falls back to [`FALLBACK_MESSAGE`]).

use std::collections::HashMap;
use std::path::Path;

use crate::error::MessageResult;

/// Returned when every candidate pool turns out to be empty.
pub const FALLBACK_MESSAGE: &str = "Hello! Your message pool is empty.";

/// The bundled default message data.
const BUNDLED_DATA: &str = include_str!("../data/messages.json");

/// A message category: a time-of-day/day-of-week bucket or a special pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Weekday mornings (hour in [5, 12)).
    Morning,
    /// Late evenings and small hours (hour >= 18 or < 5).
    Night,
    /// Saturdays and Sundays, any hour.
    Weekend,
    /// Everything else, and the fallback for empty buckets.
    General,
    /// Occasional motivational override.
    Inspiration,
    /// Occasional joke override.
    Jokes,
    /// Shown when a fault was intercepted.
    Errors,
    /// Once-per-day tips.
    Tips,
}

impl Category {
    /// All categories, in data-file order.
    pub const ALL: [Category; 8] = [
        Category::Morning,
        Category::Night,
        Category::Weekend,
        Category::General,
        Category::Inspiration,
        Category::Jokes,
        Category::Errors,
        Category::Tips,
    ];

    /// The category's key in the JSON data file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Morning => "morning",
            Category::Night => "night",
            Category::Weekend => "weekend",
            Category::General => "general",
            Category::Inspiration => "inspiration",
            Category::Jokes => "jokes",
            Category::Errors => "errors",
            Category::Tips => "tips",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable collection of messages, one list per category.
#[derive(Debug, Clone, Default)]
pub struct MessagePool {
    pools: HashMap<Category, Vec<String>>,
}

impl MessagePool {
    /// Parse a pool from a JSON object keyed by category name.
    ///
    /// Unknown keys are ignored; absent categories resolve to empty lists.
    pub fn from_json(data: &str) -> MessageResult<Self> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(data)?;
        let mut pools = HashMap::new();
        for category in Category::ALL {
            if let Some(messages) = raw.get(category.as_str()) {
                pools.insert(category, messages.clone());
            }
        }
        Ok(Self { pools })
    }

    /// Load a pool from a JSON file on disk.
    pub fn from_file(path: &Path) -> MessageResult<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// The message data bundled into the binary.
    pub fn bundled() -> Self {
        // The bundled file is validated by tests; an inconsistency still
        // degrades to the empty pool rather than aborting.
        Self::from_json(BUNDLED_DATA).unwrap_or_default()
    }

    /// The messages for a category (empty slice if the category is absent).
    pub fn get(&self, category: Category) -> &[String] {
        self.pools.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True if no category has any messages.
    pub fn is_empty(&self) -> bool {
        self.pools.values().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_pool_has_every_category() {
        let pool = MessagePool::bundled();
        for category in Category::ALL {
            assert!(
                !pool.get(category).is_empty(),
                "bundled pool missing {category}"
            );
        }
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let pool = MessagePool::from_json(r#"{"jokes": ["ha"], "llamas": ["no"]}"#).unwrap();
        assert_eq!(pool.get(Category::Jokes), ["ha"]);
        assert!(pool.get(Category::Morning).is_empty());
    }

    #[test]
    fn absent_category_is_empty_slice() {
        let pool = MessagePool::from_json("{}").unwrap();
        assert!(pool.get(Category::General).is_empty());
        assert!(pool.is_empty());
    }

    #[test]
    fn malformed_data_is_an_error() {
        assert!(MessagePool::from_json("not json").is_err());
        assert!(MessagePool::from_json(r#"{"jokes": "not a list"}"#).is_err());
    }

    #[test]
    fn from_file_reads_a_pool_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("messages.json");
        std::fs::write(&path, r#"{"general": ["from disk"]}"#).unwrap();

        let pool = MessagePool::from_file(&path).unwrap();
        assert_eq!(pool.get(Category::General), ["from disk"]);
    }

    #[test]
    fn from_file_missing_path_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(MessagePool::from_file(&dir.path().join("nope.json")).is_err());
    }
}
