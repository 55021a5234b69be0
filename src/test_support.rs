//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::corpus::{Corpus, CorpusMeta, DocCategory, DocItem};
use crate::core::state::App;

fn item(id: &str, title: &str, body: &str) -> DocItem {
    DocItem {
        id: id.to_string(),
        title: title.to_string(),
        body: body.to_string(),
    }
}

/// A small three-category corpus with known ids and ordering:
///
/// ```text
/// Getting Started:  introduction, installation
/// Usage:            quickstart, advanced
/// Reference:        api
/// ```
pub fn sample_corpus() -> Corpus {
    let categories = vec![
        DocCategory {
            title: "Getting Started".to_string(),
            items: vec![
                item(
                    "introduction",
                    "Introduction",
                    "Welcome to the **sample** docs.\n\nNo code here.\n",
                ),
                item(
                    "installation",
                    "Installation",
                    "Install with:\n\n```bash\ncargo install sample\n```\n\nOr from source:\n\n```bash\ngit clone https://example.com/sample.git\n```\n",
                ),
            ],
        },
        DocCategory {
            title: "Usage".to_string(),
            items: vec![
                item("quickstart", "Quickstart", "# Quickstart\n\nRun `sample run`.\n"),
                item("advanced", "Advanced Usage", "Advanced topics.\n"),
            ],
        },
        DocCategory {
            title: "Reference".to_string(),
            items: vec![item("api", "API Reference", "The API surface.\n")],
        },
    ];
    let meta = CorpusMeta {
        name: "Sample".to_string(),
        version: Some("0.1.0".to_string()),
    };
    Corpus::new(meta, categories).expect("sample corpus is valid")
}

/// Creates a test App over the sample corpus.
pub fn test_app() -> App {
    App::new(sample_corpus())
}
