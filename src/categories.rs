//! Category registry
//!
//! Interest categories are explicit, typed records: a name, a match kind and
//! a key set. Browser categories match when a keyword appears as a substring
//! of the lowercased URL; file categories match when the record's extension
//! is an element of the set (exact, case-insensitive). Matching is a pure
//! function over the registry, which is validated once at load time and
//! immutable for the rest of the run.

use crate::error::ProfileError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// How a category's keys are tested against a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Key appears as a substring of the candidate text
    Substring,
    /// Candidate is an exact element of the key set
    ExtensionSet,
}

/// A named interest bucket with its match keys
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub kind: MatchKind,
    pub keys: BTreeSet<String>,
}

impl Category {
    /// Test a record's candidate text against this category.
    ///
    /// The candidate is expected lowercased: the full URL for substring
    /// categories, the extension (leading dot included) for extension sets.
    pub fn matches(&self, candidate: &str) -> bool {
        match self.kind {
            MatchKind::Substring => self.keys.iter().any(|k| candidate.contains(k.as_str())),
            MatchKind::ExtensionSet => self.keys.contains(candidate),
        }
    }
}

/// One source's worth of categories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySet {
    categories: Vec<Category>,
}

impl CategorySet {
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// The validated category registry for a run, one set per source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRegistry {
    pub browser: CategorySet,
    pub files: CategorySet,
}

/// On-disk shape of the category configuration document:
///
/// ```json
/// {
///   "browser": { "categories": { "development": ["github"] } },
///   "files":   { "categories": { "development": [".py"] } }
/// }
/// ```
#[derive(Debug, Deserialize)]
struct RegistryDocument {
    browser: SourceSection,
    files: SourceSection,
}

#[derive(Debug, Deserialize)]
struct SourceSection {
    categories: BTreeMap<String, BTreeSet<String>>,
}

impl CategoryRegistry {
    /// Load and validate the registry from a JSON config file.
    ///
    /// A missing file, malformed JSON, an empty category map or a category
    /// with an empty key set is fatal: the pipeline cannot score without a
    /// usable registry.
    pub fn from_json_file(path: &Path) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path).map_err(|source| ProfileError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Parse and validate the registry from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, ProfileError> {
        let doc: RegistryDocument = serde_json::from_str(json)?;

        let browser = build_set(doc.browser, MatchKind::Substring, "browser")?;
        let files = build_set(doc.files, MatchKind::ExtensionSet, "files")?;

        Ok(Self { browser, files })
    }
}

fn build_set(
    section: SourceSection,
    kind: MatchKind,
    source: &str,
) -> Result<CategorySet, ProfileError> {
    if section.categories.is_empty() {
        return Err(ProfileError::InvalidConfig(format!(
            "{source} section has no categories"
        )));
    }

    let mut categories = Vec::with_capacity(section.categories.len());
    for (name, keys) in section.categories {
        if keys.is_empty() {
            return Err(ProfileError::InvalidConfig(format!(
                "{source} category '{name}' has an empty key set"
            )));
        }

        // Keys are matched against lowercased candidates
        let keys = keys.into_iter().map(|k| k.to_lowercase()).collect();
        categories.push(Category { name, kind, keys });
    }

    Ok(CategorySet { categories })
}

impl Default for CategoryRegistry {
    /// Built-in category sets used when no config file is supplied
    fn default() -> Self {
        let browser = [
            (
                "development",
                &["github", "stackoverflow", "gitlab", "docs.rs", "crates.io"][..],
            ),
            (
                "technology",
                &["tech", "programming", "software", "hardware", "linux"],
            ),
            (
                "academic",
                &["scholar", "arxiv", "research", "coursera", ".edu"],
            ),
            (
                "entertainment",
                &["youtube", "netflix", "news", "reddit", "twitch", "spotify"],
            ),
            (
                "social",
                &["facebook", "twitter", "instagram", "linkedin", "mastodon"],
            ),
            ("shopping", &["amazon", "ebay", "etsy", "shop"]),
        ];

        let files = [
            (
                "development",
                &[".py", ".js", ".java", ".cpp", ".h", ".cs", ".php", ".rb"][..],
            ),
            (
                "documents",
                &[".pdf", ".doc", ".docx", ".txt", ".md", ".csv", ".xlsx"],
            ),
            (
                "media",
                &[".jpg", ".png", ".mp4", ".mp3", ".wav", ".avi", ".mov"],
            ),
            ("design", &[".psd", ".ai", ".fig", ".sketch", ".xd"]),
            ("data_science", &[".ipynb", ".r", ".mat", ".json", ".yaml"]),
        ];

        Self {
            browser: builtin_set(&browser, MatchKind::Substring),
            files: builtin_set(&files, MatchKind::ExtensionSet),
        }
    }
}

fn builtin_set(entries: &[(&str, &[&str])], kind: MatchKind) -> CategorySet {
    CategorySet {
        categories: entries
            .iter()
            .map(|(name, keys)| Category {
                name: name.to_string(),
                kind,
                keys: keys.iter().map(|k| k.to_string()).collect(),
            })
            .collect(),
    }
}
