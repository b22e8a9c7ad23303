//! Initialize a new Horizon site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::Horizon;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    // Create directory structure
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("content/posts"))?;
    fs::create_dir_all(target_dir.join("content/authors"))?;
    fs::create_dir_all(target_dir.join("media/images"))?;

    // Create default _config.yml
    let config_content = r#"# Horizon Configuration

# Site
title: Horizon
description: ''
language: en
url: http://example.com

# Directory
content_dir: content
public_dir: public
media_dir: media

# Markup tags the converter may use (all when unset)
# markup_tags: [p, hr, img, a, b, h2, h3, figure_img, ads_by_google, img_src_set, figure_img_src_set, ul, li]

# Page views
views:
  home_main_tag: Home Main
  home_featured_tag: Home Featured
  news_type: news
  top_news_tag: Top News
  news_per_page: 4
  products_category: products
  product_subcategories: [hardware, devices, wearables, assistants]
  category_main_tag: Category Main
  category_featured_tag: Category Featured
  products_per_page: 2

# Image uploads
media:
  upload_dir: images
  max_upload_bytes: 204800
  widths: [100, 400, 800, 1200, 1600]

# Structured data publisher
publisher:
  name: Horizon
"#;

    fs::write(target_dir.join("_config.yml"), config_content)?;

    let sample_author = r#"---
first_name: John
last_name: Doe
title: Editor
---
{p Writes about games and the hardware they run on. p}
"#;

    fs::write(target_dir.join("content/authors/jdoe.md"), sample_author)?;

    // Create a sample post
    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
type: news
author: jdoe
categories: [products]
tags: [Home Main]
date: {}
description: Your very first post.
publish: true
---
{{p Welcome to Horizon! This is your very first post. p}}
{{h2 Quick Start h2}}
{{ul
  {{li Write posts in content/posts li}}
  {{li Run {{b horizon build b}} to write the page contexts li}}
  {{li Upload images with {{b horizon upload b}} li}}
ul}}
{{hr hr}}
{{p More on the markup: {{a the tag list href="https://example.com/markup" target="blank" a}} p}}
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::write(target_dir.join("content/posts/hello-world.md"), sample_post)?;

    Ok(())
}

/// Run the init command with an existing Horizon instance
pub fn run(horizon: &Horizon) -> Result<()> {
    init_site(&horizon.base_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader::ContentLoader;
    use tempfile::TempDir;

    #[test]
    fn test_init_scaffold_loads() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        let horizon = Horizon::new(dir.path()).unwrap();
        assert_eq!(horizon.config.views.news_per_page, 4);

        let store = ContentLoader::new(&horizon).load_store().unwrap();
        assert_eq!(store.contents().len(), 1);
        assert!(store.author("jdoe").is_some());

        let html = store.contents()[0].html_body.as_deref().unwrap();
        assert!(html.contains("Quick Start</h2>"));
        assert!(html.contains("<strong>horizon build</strong>"));
    }
}
