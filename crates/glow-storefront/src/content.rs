//! Skincare articles and the article reader modal.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Identifier of an article (the `data-id` on its "read more" link).
pub type ArticleId = u32;

/// A read-only article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub author: String,
    /// Estimated reading time in minutes.
    pub read_time_minutes: u32,
    /// Pre-rendered HTML body.
    pub html_body: String,
}

impl Article {
    /// Byline shown under the title, e.g. "By Dr. Naledi · 5 min read".
    pub fn byline(&self) -> String {
        format!("By {} \u{00b7} {} min read", self.author, self.read_time_minutes)
    }
}

/// Static lookup of articles by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentLibrary {
    articles: BTreeMap<ArticleId, Article>,
}

impl ContentLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a library from `(id, article)` pairs.
    pub fn from_articles(articles: impl IntoIterator<Item = (ArticleId, Article)>) -> Self {
        Self {
            articles: articles.into_iter().collect(),
        }
    }

    /// Load articles from a JSON file keyed by id.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read articles: {}", path.display()))?;
        let library: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse articles: {}", path.display()))?;
        tracing::debug!(count = library.len(), "articles loaded");
        Ok(library)
    }

    pub fn get(&self, id: ArticleId) -> Option<&Article> {
        self.articles.get(&id)
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// Which article, if any, is open in the reader.
#[derive(Debug, Clone, Default)]
pub struct ContentViewer {
    library: ContentLibrary,
    open: Option<ArticleId>,
}

impl ContentViewer {
    pub fn new(library: ContentLibrary) -> Self {
        Self {
            library,
            open: None,
        }
    }

    /// Open article `id`. Unknown ids leave the viewer as it was.
    pub fn show(&mut self, id: ArticleId) -> Option<&Article> {
        let article = self.library.get(id)?;
        self.open = Some(id);
        Some(article)
    }

    /// Close the reader. Returns whether it was open.
    pub fn hide(&mut self) -> bool {
        self.open.take().is_some()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn current(&self) -> Option<&Article> {
        self.open.and_then(|id| self.library.get(id))
    }

    pub fn library(&self) -> &ContentLibrary {
        &self.library
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> ContentLibrary {
        ContentLibrary::from_articles([(
            1,
            Article {
                title: "Layering Serums".into(),
                author: "Thandi M.".into(),
                read_time_minutes: 4,
                html_body: "<p>Thin to thick.</p>".into(),
            },
        )])
    }

    #[test]
    fn test_show_known_article() {
        let mut viewer = ContentViewer::new(library());
        let article = viewer.show(1).unwrap();
        assert_eq!(article.byline(), "By Thandi M. \u{00b7} 4 min read");
        assert!(viewer.is_open());
        assert_eq!(viewer.current().unwrap().title, "Layering Serums");
    }

    #[test]
    fn test_show_unknown_is_noop() {
        let mut viewer = ContentViewer::new(library());
        assert!(viewer.show(99).is_none());
        assert!(!viewer.is_open());

        viewer.show(1);
        assert!(viewer.show(99).is_none());
        assert_eq!(viewer.current().unwrap().title, "Layering Serums");
    }

    #[test]
    fn test_hide() {
        let mut viewer = ContentViewer::new(library());
        assert!(!viewer.hide());
        viewer.show(1);
        assert!(viewer.hide());
        assert!(viewer.current().is_none());
    }

    #[test]
    fn test_load_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("articles.json");
        std::fs::write(
            &path,
            r#"{"2": {"title": "SPF 101", "author": "GlowLab", "read_time_minutes": 3, "html_body": "<p>Daily.</p>"}}"#,
        )
        .unwrap();

        let library = ContentLibrary::load(&path).unwrap();
        assert_eq!(library.len(), 1);
        assert_eq!(library.get(2).unwrap().title, "SPF 101");
    }
}
