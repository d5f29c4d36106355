//! Official laws list parsing.
//!
//! The list is Markdown with one heading per category followed by a numbered
//! list of laws:
//!
//! ```text
//! ## 民商法（24件）
//! 1. 中华人民共和国民法典（2020年5月28日通过）
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static CATEGORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^## (.+?)（\d+件）").unwrap());
static LAW_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\. (.+?)（").unwrap());

/// Category labels and the docs directory each one lives under.
const CATEGORY_DIRS: [(&str, &str); 7] = [
    ("宪法相关法", "constitutional-relevance"),
    ("民商法", "civil-and-commercial"),
    ("行政法", "administrative"),
    ("经济法", "economic"),
    ("社会法", "social"),
    ("刑法", "criminal-law"),
    ("程序法", "procedural"),
];

/// Docs directory slug of a category label.
#[must_use]
pub fn category_dir(label: &str) -> Option<&'static str> {
    CATEGORY_DIRS
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, dir)| *dir)
}

/// Law name to category label, as read from the official list.
#[derive(Clone, Debug, Default)]
pub struct CategoryMapping {
    categories: HashMap<String, String>,
}

impl CategoryMapping {
    /// Parse the laws list.
    ///
    /// Laws listed before the first category heading are ignored. A law
    /// listed twice keeps its last category.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut categories = HashMap::new();
        let mut current: Option<&str> = None;

        for line in text.lines() {
            if let Some(caps) = CATEGORY_RE.captures(line) {
                current = caps.get(1).map(|m| m.as_str());
                continue;
            }
            if let Some(category) = current
                && let Some(name) = LAW_RE.captures(line).and_then(|caps| caps.get(1))
            {
                categories.insert(name.as_str().to_owned(), category.to_owned());
            }
        }

        tracing::info!(laws = categories.len(), "Loaded category mapping");
        Self { categories }
    }

    /// Category label of a law.
    #[must_use]
    pub fn category_of(&self, law_name: &str) -> Option<&str> {
        self.categories.get(law_name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
