//! Page contexts handed to the rendering layer

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::config::SiteConfig;
use crate::content::{Author, Content};
use crate::markup::HtmlConverter;
use crate::seo;
use crate::store::{ContentFilter, ContentStore, Page, Paginator, StoreError};

/// Home page
#[derive(Debug, Clone, Serialize)]
pub struct HomeContext {
    pub home_main_content: Vec<Content>,
    pub home_featured_contents: Vec<Content>,
    pub recent_contents: Vec<Content>,
    pub structured_data: Value,
}

/// Author as shown on a detail page
#[derive(Debug, Clone, Serialize)]
pub struct AuthorContext {
    #[serde(flatten)]
    pub author: Author,
    pub full_name: String,
    pub profile_srcset: String,
    pub html_description: String,
}

/// Content detail page
#[derive(Debug, Clone, Serialize)]
pub struct DetailContext {
    pub content: Content,
    pub srcset: String,
    pub author: Option<AuthorContext>,
    pub related_posts: Vec<Content>,
    pub structured_data: Vec<Value>,
}

/// News listing page
#[derive(Debug, Clone, Serialize)]
pub struct NewsContext {
    pub top_news_articles: Vec<Content>,
    pub news_articles: Page<Content>,
}

/// Products category page
#[derive(Debug, Clone, Serialize)]
pub struct ProductsContext {
    pub featured_contents: Vec<Content>,
    /// Subcategory name to its featured content
    pub featured_in_category: IndexMap<String, Vec<Content>>,
    pub latest_contents_page: Page<Content>,
}

fn owned(items: Vec<&Content>) -> Vec<Content> {
    items.into_iter().cloned().collect()
}

/// Builds page contexts from a store
pub struct Views<'a> {
    store: &'a ContentStore,
    config: &'a SiteConfig,
    converter: &'a HtmlConverter<'static>,
}

impl<'a> Views<'a> {
    pub fn new(
        store: &'a ContentStore,
        config: &'a SiteConfig,
        converter: &'a HtmlConverter<'static>,
    ) -> Self {
        Self {
            store,
            config,
            converter,
        }
    }

    pub fn home(&self) -> HomeContext {
        let views = &self.config.views;
        HomeContext {
            home_main_content: owned(
                self.store
                    .by_tag(&views.home_main_tag, views.home_main_limit),
            ),
            home_featured_contents: owned(
                self.store
                    .by_tag(&views.home_featured_tag, views.home_featured_limit),
            ),
            recent_contents: owned(self.store.recent(views.recent_limit)),
            structured_data: seo::website(self.config),
        }
    }

    /// Detail page for `/<type>/<slug>/`
    pub fn content_detail(&self, content_type: &str, slug: &str) -> Result<DetailContext, StoreError> {
        let found = self.store.find(content_type, slug)?;

        let mut content = found.clone();
        if content.html_body.is_none() {
            content.precompute_html(self.converter);
        }

        let author = self.store.author(&content.author);
        if author.is_none() {
            tracing::warn!("Content {:?} has unknown author {:?}", content.slug, content.author);
        }

        let related_posts = owned(self.store.related(found, self.config.views.related_limit));
        let structured_data = vec![
            seo::article(&content, author, self.config),
            seo::breadcrumbs(&content, self.config),
        ];

        Ok(DetailContext {
            srcset: content.srcset(),
            author: author.map(|a| AuthorContext {
                full_name: a.full_name(),
                profile_srcset: a.profile_srcset(),
                html_description: a.html_description_with(self.converter),
                author: a.clone(),
            }),
            content,
            related_posts,
            structured_data,
        })
    }

    pub fn news_paginator(&self) -> Paginator<Content> {
        let views = &self.config.views;
        Paginator::new(
            owned(self.store.by_type(&views.news_type, None, views.news_limit)),
            views.news_per_page,
        )
    }

    /// News listing; `page` is the raw page parameter
    pub fn news_page(&self, page: Option<&str>) -> NewsContext {
        self.news_context(self.news_paginator().page(page))
    }

    pub fn news_context(&self, news_articles: Page<Content>) -> NewsContext {
        let views = &self.config.views;
        NewsContext {
            top_news_articles: owned(self.store.by_type(
                &views.news_type,
                Some(&views.top_news_tag),
                views.top_news_limit,
            )),
            news_articles,
        }
    }

    pub fn products_paginator(&self) -> Result<Paginator<Content>, StoreError> {
        let views = &self.config.views;
        let latest = self.store.filtered(
            &ContentFilter::categories([views.products_category.as_str()]).limit(views.latest_limit),
        )?;
        Ok(Paginator::new(owned(latest), views.products_per_page))
    }

    /// Products category listing; `page` is the raw page parameter
    pub fn products_page(&self, page: Option<&str>) -> Result<ProductsContext, StoreError> {
        let latest = self.products_paginator()?.page(page);
        self.products_context(latest)
    }

    pub fn products_context(
        &self,
        latest_contents_page: Page<Content>,
    ) -> Result<ProductsContext, StoreError> {
        let views = &self.config.views;

        let featured_contents = self.store.filtered(
            &ContentFilter::categories([views.products_category.as_str()])
                .with_tag(views.category_main_tag.as_str())
                .limit(views.category_featured_limit),
        )?;

        let mut featured_in_category = IndexMap::new();
        for sub in &views.product_subcategories {
            let filter = ContentFilter::categories([views.products_category.as_str(), sub.as_str()])
                .filter_by(sub.as_str())
                .with_tag(views.category_featured_tag.as_str())
                .limit(views.category_featured_limit);
            featured_in_category.insert(sub.clone(), owned(self.store.filtered(&filter)?));
        }

        Ok(ProductsContext {
            featured_contents: owned(featured_contents),
            featured_in_category,
            latest_contents_page,
        })
    }
}
