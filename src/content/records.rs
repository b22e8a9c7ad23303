//! Content, author and taxonomy records

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::markup::HtmlConverter;

const TYPE_NAME_MAX: usize = 50;
const TAG_NAME_MAX: usize = 20;
const CATEGORY_NAME_MAX: usize = 50;
const PERSON_NAME_MAX: usize = 100;
const TEXT_FIELD_MAX: usize = 255;

lazy_static! {
    static ref SLUG: Regex = Regex::new(r"^[-a-zA-Z0-9_]+$").expect("slug pattern must compile");
}

/// Record validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} is longer than {max} characters: {value:?}")]
    TooLong {
        field: &'static str,
        max: usize,
        value: String,
    },

    #[error("{field} may only contain letters, numbers, underscores or hyphens: {value:?}")]
    InvalidSlug { field: &'static str, value: String },
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), RecordError> {
    if value.chars().count() > max {
        return Err(RecordError::TooLong {
            field,
            max,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Slugs end up as path components of the generated pages
fn check_slug(field: &'static str, value: &str) -> Result<(), RecordError> {
    if !SLUG.is_match(value) {
        return Err(RecordError::InvalidSlug {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn check_required(field: &'static str, value: &str, max: usize) -> Result<(), RecordError> {
    if value.trim().is_empty() {
        return Err(RecordError::MissingField(field));
    }
    check_len(field, value, max)
}

/// Format an ordered `url -> width` map as a `srcset` value
pub fn format_srcset(sources: &IndexMap<String, String>) -> String {
    sources
        .iter()
        .map(|(url, width)| format!("{} {}", url, width))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Kind of content, e.g. news or review
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ContentType {
    pub name: String,
}

impl ContentType {
    pub fn new(name: &str) -> Result<Self, RecordError> {
        check_required("type", name, TYPE_NAME_MAX)?;
        check_slug("type", name)?;
        Ok(Self {
            name: name.to_string(),
        })
    }
}

/// A tag attached to content
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    pub fn new(name: &str) -> Result<Self, RecordError> {
        check_required("tag", name, TAG_NAME_MAX)?;
        Ok(Self {
            name: name.to_string(),
        })
    }
}

/// A content category
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Category {
    pub name: String,
}

impl Category {
    pub fn new(name: &str) -> Result<Self, RecordError> {
        check_required("category", name, CATEGORY_NAME_MAX)?;
        Ok(Self {
            name: name.to_string(),
        })
    }
}

/// A content author
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    /// Identifier used by content records (file stem)
    pub key: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub title: String,
    pub profile_image: Option<String>,
    /// `url -> width descriptor`, in authoring order
    #[serde(default)]
    pub profile_image_srcset: IndexMap<String, String>,
    /// Raw markup
    pub description: String,
}

impl Author {
    pub fn new(key: &str, first_name: &str, last_name: &str) -> Self {
        Self {
            key: key.to_string(),
            first_name: first_name.to_string(),
            middle_name: None,
            last_name: last_name.to_string(),
            title: String::new(),
            profile_image: None,
            profile_image_srcset: IndexMap::new(),
            description: String::new(),
        }
    }

    /// "First Middle Last", skipping an absent middle name
    pub fn full_name(&self) -> String {
        match self.middle_name.as_deref().filter(|m| !m.is_empty()) {
            Some(middle) => format!("{} {} {}", self.first_name, middle, self.last_name),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }

    pub fn profile_srcset(&self) -> String {
        format_srcset(&self.profile_image_srcset)
    }

    /// Description converted with every markup rule; use
    /// [`Author::html_description_with`] to honour `markup_tags`
    pub fn html_description(&self) -> String {
        self.html_description_with(&HtmlConverter::new())
    }

    pub fn html_description_with(&self, converter: &HtmlConverter) -> String {
        converter.convert(&self.description)
    }

    pub fn validate(&self) -> Result<(), RecordError> {
        check_required("first_name", &self.first_name, PERSON_NAME_MAX)?;
        if let Some(middle) = &self.middle_name {
            check_len("middle_name", middle, PERSON_NAME_MAX)?;
        }
        check_len("last_name", &self.last_name, PERSON_NAME_MAX)?;
        check_len("title", &self.title, TEXT_FIELD_MAX)
    }
}

/// A published or draft content item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    // SEO
    pub meta_title: String,
    pub meta_description: String,
    pub slug: String,

    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    /// Author key
    pub author: String,

    pub title: String,
    pub description: String,
    pub published_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
    pub read_time: u32,
    /// Raw markup
    pub body: String,
    /// Converted body, filled in on save
    pub html_body: Option<String>,

    pub image_featured: Option<String>,
    #[serde(default)]
    pub image_featured_srcset: IndexMap<String, String>,
    pub image_caption: String,
    pub image_by: String,

    pub publish: bool,

    /// Source file the record was loaded from
    #[serde(skip)]
    pub source: PathBuf,
}

impl Content {
    pub fn new(title: &str, slug: &str, author: &str) -> Self {
        let now = Local::now();
        Self {
            meta_title: String::new(),
            meta_description: String::new(),
            slug: slug.to_string(),
            content_type: None,
            categories: Vec::new(),
            tags: Vec::new(),
            author: author.to_string(),
            title: title.to_string(),
            description: String::new(),
            published_at: now,
            updated_at: now,
            read_time: 1,
            body: String::new(),
            html_body: None,
            image_featured: None,
            image_featured_srcset: IndexMap::new(),
            image_caption: String::new(),
            image_by: String::new(),
            publish: false,
            source: PathBuf::new(),
        }
    }

    pub fn srcset(&self) -> String {
        format_srcset(&self.image_featured_srcset)
    }

    /// Body converted with every markup rule
    pub fn html_content(&self) -> String {
        self.html_content_with(&HtmlConverter::new())
    }

    pub fn html_content_with(&self, converter: &HtmlConverter) -> String {
        converter.convert(&self.body)
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t == name)
    }

    pub fn has_any_category(&self, names: &[String]) -> bool {
        self.categories.iter().any(|c| names.contains(c))
    }

    pub fn has_any_tag(&self, names: &[String]) -> bool {
        self.tags.iter().any(|t| names.contains(t))
    }

    pub fn is_type(&self, name: &str) -> bool {
        self.content_type.as_deref() == Some(name)
    }

    /// Site path of the detail page, when the content has a type
    pub fn path(&self) -> Option<String> {
        self.content_type
            .as_ref()
            .map(|t| format!("/{}/{}/", t, self.slug))
    }

    /// Recompute `html_body` from a non-empty body
    pub fn precompute_html(&mut self, converter: &HtmlConverter) {
        if !self.body.is_empty() {
            self.html_body = Some(converter.convert(&self.body));
        }
    }

    /// Precompute `html_body` with every markup rule and bump `updated_at`
    ///
    /// Sites that restrict `markup_tags` should call [`Content::save_with`]
    /// with the site converter, as the loader does.
    pub fn save(&mut self) {
        self.save_with(&HtmlConverter::new());
    }

    pub fn save_with(&mut self, converter: &HtmlConverter) {
        self.precompute_html(converter);
        self.updated_at = Local::now();
    }

    pub fn validate(&self) -> Result<(), RecordError> {
        check_required("title", &self.title, TEXT_FIELD_MAX)?;
        check_required("slug", &self.slug, TEXT_FIELD_MAX)?;
        check_slug("slug", &self.slug)?;
        check_required("author", &self.author, PERSON_NAME_MAX)?;
        check_len("meta_title", &self.meta_title, TEXT_FIELD_MAX)?;
        check_len("meta_description", &self.meta_description, TEXT_FIELD_MAX)?;
        check_len("description", &self.description, TEXT_FIELD_MAX)?;
        check_len("image_caption", &self.image_caption, TEXT_FIELD_MAX)?;
        check_len("image_by", &self.image_by, TEXT_FIELD_MAX)?;

        if let Some(name) = &self.content_type {
            ContentType::new(name)?;
        }
        for name in &self.tags {
            Tag::new(name)?;
        }
        for name in &self.categories {
            Category::new(name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let mut author = Author::new("jd", "Jane", "Doe");
        assert_eq!(author.full_name(), "Jane Doe");
        author.middle_name = Some("Q".to_string());
        assert_eq!(author.full_name(), "Jane Q Doe");
    }

    #[test]
    fn test_srcset_keeps_order() {
        let mut content = Content::new("T", "t", "jd");
        assert_eq!(content.srcset(), "");
        content
            .image_featured_srcset
            .insert("https://x/small.jpg".to_string(), "480w".to_string());
        content
            .image_featured_srcset
            .insert("https://x/large.jpg".to_string(), "1200w".to_string());
        assert_eq!(
            content.srcset(),
            "https://x/small.jpg 480w, https://x/large.jpg 1200w"
        );
    }

    #[test]
    fn test_save_precomputes_html_body() {
        let mut content = Content::new("T", "t", "jd");
        let before = content.updated_at;
        content.body = "{b big b}".to_string();
        content.save();
        assert_eq!(content.html_body.as_deref(), Some("<strong>big</strong>"));
        assert!(content.updated_at >= before);
    }

    #[test]
    fn test_save_with_empty_body_leaves_html_unset() {
        let mut content = Content::new("T", "t", "jd");
        content.save();
        assert_eq!(content.html_body, None);
    }

    #[test]
    fn test_author_html_description() {
        let mut author = Author::new("jd", "Jane", "Doe");
        author.description = "{b Editor b}".to_string();
        assert_eq!(author.html_description(), "<strong>Editor</strong>");
    }

    #[test]
    fn test_validate_tag_length() {
        assert!(Tag::new("Home Featured").is_ok());
        assert!(matches!(
            Tag::new("a tag name that is far too long"),
            Err(RecordError::TooLong { field: "tag", max: 20, .. })
        ));
        assert_eq!(Category::new(" "), Err(RecordError::MissingField("category")));
    }

    #[test]
    fn test_validate_content() {
        let mut content = Content::new("Title", "title", "jd");
        assert!(content.validate().is_ok());
        content.tags.push("x".repeat(21));
        assert!(content.validate().is_err());
        content.tags.clear();
        content.title.clear();
        assert_eq!(content.validate(), Err(RecordError::MissingField("title")));
    }

    #[test]
    fn test_validate_rejects_path_like_slugs() {
        let mut content = Content::new("Title", "../../escaped", "jd");
        assert!(matches!(
            content.validate(),
            Err(RecordError::InvalidSlug { field: "slug", .. })
        ));
        content.slug = "a/b".to_string();
        assert!(content.validate().is_err());
        content.slug = "patch-notes_2".to_string();
        assert!(content.validate().is_ok());

        content.content_type = Some("../news".to_string());
        assert!(matches!(
            content.validate(),
            Err(RecordError::InvalidSlug { field: "type", .. })
        ));
    }

    #[test]
    fn test_save_with_honours_restricted_converter() {
        let mut content = Content::new("T", "t", "jd");
        content.body = "{b x b} {p y p}".to_string();
        let only_bold = HtmlConverter::with_tags(["b"]);
        assert_eq!(content.html_content_with(&only_bold), "<strong>x</strong> {p y p}");

        content.save_with(&only_bold);
        assert_eq!(content.html_body.as_deref(), Some("<strong>x</strong> {p y p}"));
        content.save();
        assert!(content.html_body.as_deref().unwrap().ends_with(">y</p>"));
    }

    #[test]
    fn test_path() {
        let mut content = Content::new("Title", "some-slug", "jd");
        assert_eq!(content.path(), None);
        content.content_type = Some("review".to_string());
        assert_eq!(content.path().as_deref(), Some("/review/some-slug/"));
    }
}
