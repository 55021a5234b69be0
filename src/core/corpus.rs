//! # Documentation Corpus
//!
//! The static content the browser displays: an ordered list of categories,
//! each holding an ordered list of sections. Loaded once at startup (from a
//! TOML or JSON file, or the built-in default) and never mutated afterwards.
//!
//! Domain logic only ever looks at ids and titles — section bodies are opaque
//! markdown payloads that the TUI renders but the corpus never inspects.

use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// A single documentation section: the unit of navigation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocItem {
    /// Unique across the entire corpus, not just within a category.
    pub id: String,
    pub title: String,
    /// Markdown body. Opaque to the corpus — only the TUI renders it.
    pub body: String,
}

/// An ordered group of sections under a heading.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocCategory {
    pub title: String,
    pub items: Vec<DocItem>,
}

/// Corpus-level metadata shown in the header bar.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CorpusMeta {
    #[serde(default)]
    pub name: String,
    pub version: Option<String>,
}

/// On-disk corpus shape (TOML or JSON).
#[derive(Debug, Default, Deserialize, Serialize)]
struct CorpusFile {
    #[serde(default)]
    meta: CorpusMeta,
    #[serde(default)]
    categories: Vec<DocCategory>,
}

/// The full static documentation set plus a position index built at load.
///
/// Category order, then item order within each category, defines both the
/// menu order and the prev/next traversal order.
#[derive(Debug)]
pub struct Corpus {
    meta: CorpusMeta,
    categories: Vec<DocCategory>,
    /// id → position in the flattened item sequence.
    index: HashMap<String, usize>,
    /// Flattened positions: (category index, item index).
    flat: Vec<(usize, usize)>,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub enum CorpusError {
    Io(std::io::Error),
    ParseToml(toml::de::Error),
    ParseJson(serde_json::Error),
    DuplicateId(String),
    Empty,
}

impl fmt::Display for CorpusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorpusError::Io(e) => write!(f, "corpus I/O error: {e}"),
            CorpusError::ParseToml(e) => write!(f, "corpus parse error: {e}"),
            CorpusError::ParseJson(e) => write!(f, "corpus parse error: {e}"),
            CorpusError::DuplicateId(id) => write!(f, "duplicate section id: {id}"),
            CorpusError::Empty => write!(f, "corpus contains no sections"),
        }
    }
}

impl std::error::Error for CorpusError {}

// ============================================================================
// Construction
// ============================================================================

impl Corpus {
    /// Build a corpus from authored data, validating id uniqueness and
    /// indexing every section's flattened position.
    pub fn new(meta: CorpusMeta, categories: Vec<DocCategory>) -> Result<Self, CorpusError> {
        let mut index = HashMap::new();
        let mut flat = Vec::new();
        for (ci, category) in categories.iter().enumerate() {
            for (ii, item) in category.items.iter().enumerate() {
                if index.insert(item.id.clone(), flat.len()).is_some() {
                    return Err(CorpusError::DuplicateId(item.id.clone()));
                }
                flat.push((ci, ii));
            }
        }
        Ok(Self {
            meta,
            categories,
            index,
            flat,
        })
    }

    /// Load a corpus from a TOML or JSON file (decided by extension;
    /// anything that isn't `.json` is parsed as TOML).
    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        let contents = fs::read_to_string(path).map_err(CorpusError::Io)?;
        let file: CorpusFile = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&contents).map_err(CorpusError::ParseJson)?
        } else {
            toml::from_str(&contents).map_err(CorpusError::ParseToml)?
        };
        let corpus = Self::new(file.meta, file.categories)?;
        if corpus.is_empty() {
            return Err(CorpusError::Empty);
        }
        info!(
            "Loaded corpus '{}' from {} ({} sections)",
            corpus.meta.name,
            path.display(),
            corpus.len()
        );
        Ok(corpus)
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn meta(&self) -> &CorpusMeta {
        &self.meta
    }

    pub fn categories(&self) -> &[DocCategory] {
        &self.categories
    }

    /// Number of sections across all categories.
    pub fn len(&self) -> usize {
        self.flat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }

    /// Id of the first section of the first non-empty category, if any.
    /// This is the initial active section.
    pub fn first_id(&self) -> Option<&str> {
        self.item_at(0).map(|item| item.id.as_str())
    }

    /// Resolve a section by id across category boundaries. `None` means the
    /// caller should fall back to a "content not found" view.
    pub fn get(&self, id: &str) -> Option<&DocItem> {
        self.index.get(id).and_then(|&pos| self.item_at(pos))
    }

    /// Position of a section in the flattened (unfiltered) sequence.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Predecessor and successor of a section in the flattened sequence.
    /// Either side is `None` at the corpus boundary (or when `id` is
    /// unknown). Always computed over the unfiltered corpus — the search
    /// filter never changes traversal order.
    pub fn neighbors(&self, id: &str) -> (Option<&DocItem>, Option<&DocItem>) {
        let Some(pos) = self.position(id) else {
            return (None, None);
        };
        let prev = pos.checked_sub(1).and_then(|p| self.item_at(p));
        let next = self.item_at(pos + 1);
        (prev, next)
    }

    fn item_at(&self, pos: usize) -> Option<&DocItem> {
        let &(ci, ii) = self.flat.get(pos)?;
        Some(&self.categories[ci].items[ii])
    }

    // ========================================================================
    // Search filter
    // ========================================================================

    /// Filter the corpus by a free-text query, matching case-insensitively
    /// on section titles. A category whose own title matches keeps all of
    /// its items. Categories with no surviving items are omitted; relative
    /// order is preserved throughout.
    ///
    /// An empty or whitespace-only query returns the whole corpus view;
    /// otherwise whitespace in the query is significant (`"intro "` does
    /// not match `Introduction`). Pure: same corpus + same query always
    /// yields the same result, and the corpus itself is never touched.
    pub fn filter(&self, query: &str) -> Vec<FilteredCategory<'_>> {
        let query = query.to_lowercase();
        let no_filter = query.trim().is_empty();
        self.categories
            .iter()
            .filter_map(|category| {
                let keep_all = no_filter || category.title.to_lowercase().contains(&query);
                let items: Vec<&DocItem> = category
                    .items
                    .iter()
                    .filter(|item| keep_all || item.title.to_lowercase().contains(&query))
                    .collect();
                if items.is_empty() {
                    None
                } else {
                    Some(FilteredCategory {
                        title: &category.title,
                        items,
                    })
                }
            })
            .collect()
    }
}

/// A borrowed view of one category after filtering. Never has an empty
/// item list — such categories are dropped from the result entirely.
pub struct FilteredCategory<'a> {
    pub title: &'a str,
    pub items: Vec<&'a DocItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_corpus;
    use std::io::Write;

    fn titles<'a>(filtered: &'a [FilteredCategory<'_>]) -> Vec<(&'a str, Vec<&'a str>)> {
        filtered
            .iter()
            .map(|c| {
                (
                    c.title,
                    c.items.iter().map(|i| i.title.as_str()).collect::<Vec<_>>(),
                )
            })
            .collect()
    }

    #[test]
    fn empty_query_returns_whole_corpus_in_order() {
        let corpus = sample_corpus();
        let filtered = corpus.filter("");
        assert_eq!(
            titles(&filtered),
            vec![
                ("Getting Started", vec!["Introduction", "Installation"]),
                ("Usage", vec!["Quickstart", "Advanced Usage"]),
                ("Reference", vec!["API Reference"]),
            ]
        );
    }

    #[test]
    fn whitespace_query_is_no_filter() {
        let corpus = sample_corpus();
        assert_eq!(titles(&corpus.filter("   ")), titles(&corpus.filter("")));
    }

    #[test]
    fn whitespace_inside_a_query_is_significant() {
        let corpus = sample_corpus();
        // A trailing space is part of the match, not stripped.
        assert!(corpus.filter("intro ").is_empty());
        assert_eq!(
            titles(&corpus.filter("advanced "))[0].1,
            vec!["Advanced Usage"]
        );
    }

    #[test]
    fn filter_is_case_insensitive() {
        let corpus = sample_corpus();
        assert_eq!(
            titles(&corpus.filter("INTRO")),
            titles(&corpus.filter("intro"))
        );
        assert_eq!(titles(&corpus.filter("intro"))[0].1, vec!["Introduction"]);
    }

    #[test]
    fn category_title_match_keeps_all_items() {
        let corpus = sample_corpus();
        let filtered = corpus.filter("usage");
        // "Usage" the category matches, so both its items survive even
        // though only "Advanced Usage" matches by item title.
        assert_eq!(
            titles(&filtered),
            vec![("Usage", vec!["Quickstart", "Advanced Usage"])]
        );
    }

    #[test]
    fn non_matching_categories_are_omitted_entirely() {
        let corpus = sample_corpus();
        let filtered = corpus.filter("install");
        assert_eq!(
            titles(&filtered),
            vec![("Getting Started", vec!["Installation"])]
        );
        assert!(filtered.iter().all(|c| !c.items.is_empty()));
    }

    #[test]
    fn longer_query_is_subsequence_of_prefix_query() {
        let corpus = sample_corpus();
        let broad: Vec<&str> = corpus
            .filter("in")
            .iter()
            .flat_map(|c| c.items.iter().map(|i| i.id.as_str()))
            .collect();
        let narrow: Vec<&str> = corpus
            .filter("intro")
            .iter()
            .flat_map(|c| c.items.iter().map(|i| i.id.as_str()))
            .collect();
        // Every id in the narrow result appears in the broad result, in order.
        let mut broad_iter = broad.iter();
        for id in &narrow {
            assert!(
                broad_iter.any(|b| b == id),
                "{id} missing from broader result"
            );
        }
    }

    #[test]
    fn zero_match_query_yields_empty_list() {
        let corpus = sample_corpus();
        assert!(corpus.filter("zzzzz").is_empty());
    }

    #[test]
    fn get_resolves_across_categories() {
        let corpus = sample_corpus();
        assert_eq!(corpus.get("api").unwrap().title, "API Reference");
        assert!(corpus.get("missing").is_none());
    }

    #[test]
    fn neighbors_in_flattened_order() {
        let corpus = sample_corpus();
        let (prev, next) = corpus.neighbors("installation");
        assert_eq!(prev.unwrap().id, "introduction");
        assert_eq!(next.unwrap().id, "quickstart");
    }

    #[test]
    fn neighbors_at_boundaries_are_absent() {
        let corpus = sample_corpus();
        let (prev, next) = corpus.neighbors("introduction");
        assert!(prev.is_none());
        assert_eq!(next.unwrap().id, "installation");

        let (prev, next) = corpus.neighbors("api");
        assert_eq!(prev.unwrap().id, "advanced");
        assert!(next.is_none());
    }

    #[test]
    fn neighbors_of_unknown_id_are_absent() {
        let corpus = sample_corpus();
        let (prev, next) = corpus.neighbors("missing");
        assert!(prev.is_none());
        assert!(next.is_none());
    }

    #[test]
    fn first_id_is_first_item_of_first_category() {
        let corpus = sample_corpus();
        assert_eq!(corpus.first_id(), Some("introduction"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let dup = vec![DocCategory {
            title: "A".to_string(),
            items: vec![
                DocItem {
                    id: "same".to_string(),
                    title: "One".to_string(),
                    body: String::new(),
                },
                DocItem {
                    id: "same".to_string(),
                    title: "Two".to_string(),
                    body: String::new(),
                },
            ],
        }];
        let err = Corpus::new(CorpusMeta::default(), dup).unwrap_err();
        assert!(matches!(err, CorpusError::DuplicateId(id) if id == "same"));
    }

    #[test]
    fn load_toml_corpus() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r##"
[meta]
name = "Test Docs"
version = "0.9.0"

[[categories]]
title = "Guide"

[[categories.items]]
id = "hello"
title = "Hello"
body = "# Hello"
"##
        )
        .unwrap();
        let corpus = Corpus::load(file.path()).unwrap();
        assert_eq!(corpus.meta().name, "Test Docs");
        assert_eq!(corpus.meta().version.as_deref(), Some("0.9.0"));
        assert_eq!(corpus.first_id(), Some("hello"));
        assert_eq!(corpus.get("hello").unwrap().body, "# Hello");
    }

    #[test]
    fn load_json_corpus() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{
  "meta": {{ "name": "Test" }},
  "categories": [
    {{ "title": "Guide",
       "items": [ {{ "id": "a", "title": "A", "body": "" }} ] }}
  ]
}}"#
        )
        .unwrap();
        let corpus = Corpus::load(file.path()).unwrap();
        assert_eq!(corpus.len(), 1);
    }

    #[test]
    fn load_rejects_empty_corpus() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "[meta]\nname = \"Empty\"\n").unwrap();
        let err = Corpus::load(file.path()).unwrap_err();
        assert!(matches!(err, CorpusError::Empty));
    }
}
