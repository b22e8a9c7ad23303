//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,
    pub url: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    pub media_dir: String,

    /// Tags the converter may use; all tags when unset
    pub markup_tags: Option<Vec<String>>,

    #[serde(default)]
    pub views: ViewsConfig,
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub publisher: PublisherConfig,
    #[serde(default)]
    pub ads: AdsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Horizon".to_string(),
            description: String::new(),
            language: "en".to_string(),
            url: "http://example.com".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),
            media_dir: "media".to_string(),

            markup_tags: None,

            views: ViewsConfig::default(),
            media: MediaConfig::default(),
            publisher: PublisherConfig::default(),
            ads: AdsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Absolute URL for a site path
    pub fn absolute_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Tag names, limits and page sizes used by the page views
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewsConfig {
    pub home_main_tag: String,
    pub home_main_limit: usize,
    pub home_featured_tag: String,
    pub home_featured_limit: usize,
    pub recent_limit: usize,
    pub related_limit: usize,

    pub news_type: String,
    pub top_news_tag: String,
    pub top_news_limit: usize,
    pub news_limit: usize,
    pub news_per_page: usize,

    pub products_category: String,
    pub product_subcategories: Vec<String>,
    pub category_main_tag: String,
    pub category_featured_tag: String,
    pub category_featured_limit: usize,
    pub latest_limit: usize,
    pub products_per_page: usize,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            home_main_tag: "Home Main".to_string(),
            home_main_limit: 1,
            home_featured_tag: "Home Featured".to_string(),
            home_featured_limit: 5,
            recent_limit: 5,
            related_limit: 3,

            news_type: "news".to_string(),
            top_news_tag: "Top News".to_string(),
            top_news_limit: 3,
            news_limit: 100,
            news_per_page: 4,

            products_category: "products".to_string(),
            product_subcategories: vec![
                "hardware".to_string(),
                "devices".to_string(),
                "wearables".to_string(),
                "assistants".to_string(),
            ],
            category_main_tag: "Category Main".to_string(),
            category_featured_tag: "Category Featured".to_string(),
            category_featured_limit: 3,
            latest_limit: 100,
            products_per_page: 2,
        }
    }
}

/// Image upload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Folder under the media dir that holds uploads
    pub upload_dir: String,
    pub max_upload_bytes: u64,
    /// Widths of the resized variants
    pub widths: Vec<u32>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            upload_dir: "images".to_string(),
            max_upload_bytes: 200 * 1024,
            widths: vec![100, 400, 800, 1200, 1600],
        }
    }
}

/// Organization named as publisher in structured data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublisherConfig {
    pub name: String,
    pub logo: Option<String>,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            name: "Horizon".to_string(),
            logo: None,
        }
    }
}

/// ads.txt record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdsConfig {
    pub domain: String,
    pub publisher_id: String,
    pub relationship: String,
    pub certification_authority_id: String,
}

impl Default for AdsConfig {
    fn default() -> Self {
        Self {
            domain: "google.com".to_string(),
            publisher_id: "pub-1785022650944518".to_string(),
            relationship: "DIRECT".to_string(),
            certification_authority_id: "f08c47fec0942fa0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Horizon");
        assert_eq!(config.content_dir, "content");
        assert_eq!(config.views.news_per_page, 4);
        assert_eq!(config.media.widths, vec![100, 400, 800, 1200, 1600]);
        assert_eq!(config.media.max_upload_bytes, 204800);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Gaming Horizon
url: https://horizon.example/
markup_tags: [p, b]
views:
  news_per_page: 10
  top_news_tag: Breaking
media:
  max_upload_bytes: 1024
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Gaming Horizon");
        assert_eq!(config.markup_tags, Some(vec!["p".to_string(), "b".to_string()]));
        assert_eq!(config.views.news_per_page, 10);
        assert_eq!(config.views.top_news_tag, "Breaking");
        // untouched fields keep their defaults
        assert_eq!(config.views.home_main_tag, "Home Main");
        assert_eq!(config.media.max_upload_bytes, 1024);
        assert_eq!(config.media.upload_dir, "images");
    }

    #[test]
    fn test_absolute_url() {
        let mut config = SiteConfig::default();
        config.url = "https://horizon.example/".to_string();
        assert_eq!(
            config.absolute_url("/news/some-slug/"),
            "https://horizon.example/news/some-slug/"
        );
    }
}
