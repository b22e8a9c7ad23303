//! horizon: content backend for a gaming-news site
//!
//! Authors and content records are written as files with YAML front-matter
//! and a body in brace markup (see [`markup`]). Bodies are converted to HTML
//! when a record is saved, and the page views are written out as JSON
//! contexts together with their structured data.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod markup;
pub mod media;
pub mod seo;
pub mod store;
pub mod views;

use anyhow::Result;
use std::path::Path;

/// The main Horizon application
#[derive(Clone)]
pub struct Horizon {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content (posts and authors) directory
    pub content_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
    /// Uploaded media directory
    pub media_dir: std::path::PathBuf,
}

impl Horizon {
    /// Create a new Horizon instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let media_dir = base_dir.join(&config.media_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            public_dir,
            media_dir,
        })
    }

    /// Markup converter honouring `markup_tags`
    pub fn converter(&self) -> markup::HtmlConverter<'static> {
        match &self.config.markup_tags {
            Some(tags) => markup::HtmlConverter::with_tags(tags),
            None => markup::HtmlConverter::new(),
        }
    }

    /// Initialize a new site
    pub fn init(&self) -> Result<()> {
        commands::init::run(self)
    }

    /// Load content and write every page
    pub fn build(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
