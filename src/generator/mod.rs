//! Generator module - writes page contexts and ads.txt to the public directory
//!
//! Every view is serialized as JSON at the path the page is served from, for
//! the rendering layer to pick up.

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::markup::HtmlConverter;
use crate::seo;
use crate::store::ContentStore;
use crate::views::Views;
use crate::Horizon;

/// Counts of what a generation pass wrote
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GenerateSummary {
    pub details: usize,
    pub news_pages: usize,
    pub products_pages: usize,
}

/// Writes every page context for a store
pub struct Generator<'a> {
    horizon: &'a Horizon,
    converter: &'a HtmlConverter<'static>,
}

impl<'a> Generator<'a> {
    pub fn new(horizon: &'a Horizon, converter: &'a HtmlConverter<'static>) -> Self {
        Self { horizon, converter }
    }

    /// Generate the entire site
    pub fn generate(&self, store: &ContentStore) -> Result<GenerateSummary> {
        let public_dir = &self.horizon.public_dir;
        fs::create_dir_all(public_dir)?;

        let views = Views::new(store, &self.horizon.config, self.converter);
        let mut summary = GenerateSummary::default();

        write_json(&public_dir.join("index.json"), &views.home())?;

        for content in store.contents() {
            let Some(kind) = content.content_type.as_deref() else {
                tracing::debug!("Skipping {:?}: no content type", content.slug);
                continue;
            };
            // slug and type become path components under public_dir
            if let Err(e) = content.validate() {
                tracing::warn!("Skipping detail page for {:?}: {}", content.slug, e);
                continue;
            }
            let detail = views.content_detail(kind, &content.slug)?;
            let path = public_dir.join(kind).join(&content.slug).join("index.json");
            write_json(&path, &detail)?;
            summary.details += 1;
        }

        for page in views.news_paginator().pages() {
            let path = public_dir
                .join("news")
                .join("page")
                .join(format!("{}.json", page.number));
            write_json(&path, &views.news_context(page))?;
            summary.news_pages += 1;
        }

        for page in views.products_paginator()?.pages() {
            let path = public_dir
                .join("products")
                .join("page")
                .join(format!("{}.json", page.number));
            write_json(&path, &views.products_context(page)?)?;
            summary.products_pages += 1;
        }

        fs::write(public_dir.join("ads.txt"), seo::ads_txt(&self.horizon.config))?;

        tracing::info!(
            "Wrote {} detail pages, {} news pages, {} products pages",
            summary.details,
            summary.news_pages,
            summary.products_pages
        );
        Ok(summary)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    tracing::debug!("Wrote {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::sample_store;
    use tempfile::TempDir;

    #[test]
    fn test_generate_writes_every_page() {
        let dir = TempDir::new().unwrap();
        let horizon = Horizon::new(dir.path()).unwrap();
        let converter = HtmlConverter::new();
        let summary = Generator::new(&horizon, &converter)
            .generate(&sample_store())
            .unwrap();

        assert_eq!(summary.details, 6);
        assert_eq!(summary.news_pages, 1);
        assert_eq!(summary.products_pages, 2);

        let public = dir.path().join("public");
        assert!(public.join("index.json").exists());
        assert!(public.join("review/watch/index.json").exists());
        assert!(public.join("news/draft/index.json").exists());
        assert!(public.join("products/page/2.json").exists());

        let ads = fs::read_to_string(public.join("ads.txt")).unwrap();
        assert!(ads.starts_with("google.com, pub-"));

        let detail: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(public.join("news/main/index.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(detail["content"]["slug"], "main");
        assert_eq!(detail["structured_data"][0]["@type"], "NewsArticle");
    }

    #[test]
    fn test_generate_never_writes_outside_public_dir() {
        let dir = TempDir::new().unwrap();
        let site = dir.path().join("site");
        let horizon = Horizon::new(&site).unwrap();
        let mut store = sample_store();
        let mut escaped = crate::store::tests::item("escaped", 0, "news", &["games"], &[]);
        escaped.slug = "../../escaped".to_string();
        store.upsert(escaped);

        let summary = Generator::new(&horizon, &HtmlConverter::new())
            .generate(&store)
            .unwrap();
        assert_eq!(summary.details, 6);
        assert!(!dir.path().join("escaped").exists());
        assert!(!site.join("escaped").exists());
    }
}
