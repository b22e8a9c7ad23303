//! In-memory content store and the queries behind the page views
//!
//! Query results only include published content and are ordered newest
//! first, except [`ContentStore::find`], which resolves any record.

mod paginate;

use indexmap::IndexMap;
use std::collections::BTreeSet;
use thiserror::Error;

pub use paginate::{Page, Paginator};

use crate::content::{Author, Category, Content, ContentType, Tag};

/// Store lookup errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    #[error("include_categories is required and cannot be empty")]
    MissingIncludeCategories,
}

/// Category and tag conditions for [`ContentStore::filtered`]
///
/// Every list condition means "has at least one of".
#[derive(Debug, Clone, Default)]
pub struct ContentFilter {
    pub include_categories: Vec<String>,
    pub filter_categories: Vec<String>,
    pub exclude_categories: Vec<String>,
    pub include_tags: Vec<String>,
    pub exclude_tags: Vec<String>,
    pub limit: Option<usize>,
}

impl ContentFilter {
    pub fn categories<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include_categories: names.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn filter_by<S: Into<String>>(mut self, category: S) -> Self {
        self.filter_categories.push(category.into());
        self
    }

    pub fn exclude_category<S: Into<String>>(mut self, category: S) -> Self {
        self.exclude_categories.push(category.into());
        self
    }

    pub fn with_tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.include_tags.push(tag.into());
        self
    }

    pub fn without_tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.exclude_tags.push(tag.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, content: &Content) -> bool {
        content.has_any_category(&self.include_categories)
            && (self.exclude_categories.is_empty()
                || !content.has_any_category(&self.exclude_categories))
            && (self.filter_categories.is_empty()
                || content.has_any_category(&self.filter_categories))
            && (self.include_tags.is_empty() || content.has_any_tag(&self.include_tags))
            && (self.exclude_tags.is_empty() || !content.has_any_tag(&self.exclude_tags))
    }
}

/// Authors, taxonomy and content held in memory
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    types: BTreeSet<ContentType>,
    tags: BTreeSet<Tag>,
    categories: BTreeSet<Category>,
    authors: IndexMap<String, Author>,
    /// Newest first
    contents: Vec<Content>,
}

impl ContentStore {
    /// Build a store; types, tags and categories are collected from the content
    pub fn new(authors: Vec<Author>, mut contents: Vec<Content>) -> Self {
        contents.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        let mut store = Self {
            authors: authors.into_iter().map(|a| (a.key.clone(), a)).collect(),
            ..Default::default()
        };
        for content in &contents {
            store.register_taxonomy(content);
        }
        store.contents = contents;
        store
    }

    fn register_taxonomy(&mut self, content: &Content) {
        if let Some(name) = &content.content_type {
            self.types.insert(ContentType { name: name.clone() });
        }
        for name in &content.tags {
            self.tags.insert(Tag { name: name.clone() });
        }
        for name in &content.categories {
            self.categories.insert(Category { name: name.clone() });
        }
    }

    /// Insert or replace content by slug
    pub fn upsert(&mut self, content: Content) {
        self.register_taxonomy(&content);
        self.contents.retain(|c| c.slug != content.slug);
        let pos = self
            .contents
            .iter()
            .position(|c| c.published_at < content.published_at)
            .unwrap_or(self.contents.len());
        self.contents.insert(pos, content);
    }

    pub fn contents(&self) -> &[Content] {
        &self.contents
    }

    pub fn authors(&self) -> impl Iterator<Item = &Author> {
        self.authors.values()
    }

    pub fn author(&self, key: &str) -> Option<&Author> {
        self.authors.get(key)
    }

    pub fn types(&self) -> impl Iterator<Item = &ContentType> {
        self.types.iter()
    }

    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.types.iter().any(|t| t.name == name)
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    /// Number of content records carrying each tag
    pub fn tag_counts(&self) -> IndexMap<String, usize> {
        let mut counts = IndexMap::new();
        for content in &self.contents {
            for tag in &content.tags {
                *counts.entry(tag.clone()).or_insert(0) += 1;
            }
        }
        counts.sort_by(|_, a, _, b| b.cmp(a));
        counts
    }

    /// Number of content records in each category
    pub fn category_counts(&self) -> IndexMap<String, usize> {
        let mut counts = IndexMap::new();
        for content in &self.contents {
            for category in &content.categories {
                *counts.entry(category.clone()).or_insert(0) += 1;
            }
        }
        counts.sort_by(|_, a, _, b| b.cmp(a));
        counts
    }

    fn published(&self) -> impl Iterator<Item = &Content> {
        self.contents.iter().filter(|c| c.publish)
    }

    /// Latest published content
    pub fn recent(&self, limit: usize) -> Vec<&Content> {
        self.published().take(limit).collect()
    }

    /// Published content with a tag; nothing when the tag is unknown
    pub fn by_tag(&self, tag: &str, limit: usize) -> Vec<&Content> {
        if !self.has_tag(tag) {
            return Vec::new();
        }
        self.published()
            .filter(|c| c.has_tag(tag))
            .take(limit)
            .collect()
    }

    /// Published content of a type, optionally narrowed by tag
    ///
    /// An unknown tag is ignored rather than matching nothing. An unknown
    /// type matches nothing; untyped content is never returned.
    pub fn by_type(&self, content_type: &str, tag: Option<&str>, limit: usize) -> Vec<&Content> {
        let tag = tag.filter(|t| !t.is_empty() && self.has_tag(t));
        self.published()
            .filter(|c| c.is_type(content_type))
            .filter(|c| tag.map_or(true, |t| c.has_tag(t)))
            .take(limit)
            .collect()
    }

    /// Published content matching a category/tag filter
    pub fn filtered(&self, filter: &ContentFilter) -> Result<Vec<&Content>, StoreError> {
        if filter.include_categories.is_empty() {
            return Err(StoreError::MissingIncludeCategories);
        }
        let matched = self.published().filter(|c| filter.matches(c));
        Ok(match filter.limit {
            Some(limit) => matched.take(limit).collect(),
            None => matched.collect(),
        })
    }

    /// Other published content sharing a category with `content`
    pub fn related(&self, content: &Content, limit: usize) -> Vec<&Content> {
        self.published()
            .filter(|c| c.slug != content.slug)
            .filter(|c| c.has_any_category(&content.categories))
            .take(limit)
            .collect()
    }

    /// Content by type and slug, published or not
    pub fn find(&self, content_type: &str, slug: &str) -> Result<&Content, StoreError> {
        if !self.has_type(content_type) {
            return Err(StoreError::NotFound {
                kind: "type",
                key: content_type.to_string(),
            });
        }
        self.contents
            .iter()
            .find(|c| c.is_type(content_type) && c.slug == slug)
            .ok_or_else(|| StoreError::NotFound {
                kind: "content",
                key: format!("{}/{}", content_type, slug),
            })
    }
}
