//! Content loader - loads authors and content records from the content directory

use anyhow::Result;
use chrono::Local;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{Author, AuthorFrontMatter, Content, FrontMatter};
use crate::markup::HtmlConverter;
use crate::store::ContentStore;
use crate::Horizon;

/// Loads records from `<content_dir>/posts` and `<content_dir>/authors`
pub struct ContentLoader<'a> {
    horizon: &'a Horizon,
    converter: HtmlConverter<'static>,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(horizon: &'a Horizon) -> Self {
        Self {
            horizon,
            converter: horizon.converter(),
        }
    }

    pub fn converter(&self) -> &HtmlConverter<'static> {
        &self.converter
    }

    pub fn posts_dir(&self) -> PathBuf {
        self.horizon.content_dir.join("posts")
    }

    pub fn authors_dir(&self) -> PathBuf {
        self.horizon.content_dir.join("authors")
    }

    /// Load every author and content record into a store
    pub fn load_store(&self) -> Result<ContentStore> {
        let authors = self.load_authors()?;
        let contents = self.load_contents()?;
        Ok(ContentStore::new(authors, contents))
    }

    /// Load all authors
    pub fn load_authors(&self) -> Result<Vec<Author>> {
        let mut authors = Vec::new();
        for path in markup_files(&self.authors_dir()) {
            match self.load_author(&path) {
                Ok(author) => authors.push(author),
                Err(e) => tracing::warn!("Failed to load author {:?}: {}", path, e),
            }
        }
        authors.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(authors)
    }

    fn load_author(&self, path: &Path) -> Result<Author> {
        let raw = fs::read_to_string(path)?;
        let (fm, body) = AuthorFrontMatter::parse(&raw)?;

        let author = Author {
            key: file_stem(path),
            first_name: fm.first_name,
            middle_name: fm.middle_name,
            last_name: fm.last_name,
            title: fm.title,
            profile_image: fm.profile_image,
            profile_image_srcset: fm.profile_image_srcset,
            description: body.to_string(),
        };
        author.validate()?;
        Ok(author)
    }

    /// Load all content records, newest first, with `html_body` precomputed
    ///
    /// Slugs are unique: a file whose slug is already taken by an earlier
    /// file (in path order) is skipped.
    pub fn load_contents(&self) -> Result<Vec<Content>> {
        let mut contents: Vec<Content> = Vec::new();
        let mut slugs = HashSet::new();
        for path in markup_files(&self.posts_dir()) {
            match self.load_content(&path) {
                Ok(content) if !slugs.insert(content.slug.clone()) => {
                    tracing::warn!(
                        "Skipping content {:?}: slug {:?} is already used",
                        path,
                        content.slug
                    );
                }
                Ok(content) => contents.push(content),
                Err(e) => tracing::warn!("Failed to load content {:?}: {}", path, e),
            }
        }

        contents.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(contents)
    }

    /// Load a single content file
    pub fn load_content(&self, path: &Path) -> Result<Content> {
        let raw = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&raw)?;

        let file_modified = fs::metadata(path)?
            .modified()
            .ok()
            .map(chrono::DateTime::<Local>::from);
        let published_at = fm
            .parse_date()
            .unwrap_or_else(|| file_modified.unwrap_or_else(Local::now));
        let updated_at = fm.parse_updated().or(file_modified).unwrap_or(published_at);

        let stem = file_stem(path);
        let title = fm.title.unwrap_or_else(|| stem.clone());
        let slug = fm.slug.unwrap_or_else(|| slug::slugify(&stem));
        let author = fm.author.unwrap_or_default();

        let mut content = Content::new(&title, &slug, &author);
        content.meta_title = fm.meta_title.unwrap_or_default();
        content.meta_description = fm.meta_description.unwrap_or_default();
        content.content_type = fm.content_type;
        content.categories = fm.categories;
        content.tags = fm.tags;
        content.description = fm.description.unwrap_or_default();
        content.published_at = published_at;
        content.updated_at = updated_at;
        content.read_time = fm.read_time.unwrap_or(1);
        content.body = body.to_string();
        content.image_featured = fm.image_featured;
        content.image_featured_srcset = fm.image_featured_srcset;
        content.image_caption = fm.image_caption.unwrap_or_default();
        content.image_by = fm.image_by.unwrap_or_default();
        content.publish = fm.publish;
        content.source = path.to_path_buf();

        content.validate()?;
        content.precompute_html(&self.converter);
        Ok(content)
    }
}

/// Markup files under a directory, in path order
fn markup_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_markup_file(p))
        .collect();
    files.sort();
    files
}

/// Check if a file holds markup
fn is_markup_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "txt")
        .unwrap_or(false)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled")
        .to_string()
}
