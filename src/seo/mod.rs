//! JSON-LD structured data and ads.txt

use serde_json::{json, Map, Value};

use crate::config::SiteConfig;
use crate::content::{Author, Content};

const SCHEMA_CONTEXT: &str = "https://schema.org";

/// schema.org type for a content type name
fn schema_type(content_type: Option<&str>) -> &'static str {
    match content_type {
        Some("news") => "NewsArticle",
        Some("review") => "Review",
        _ => "Article",
    }
}

/// Featured image followed by its resized variants
fn images(content: &Content) -> Vec<String> {
    content
        .image_featured
        .iter()
        .cloned()
        .chain(content.image_featured_srcset.keys().cloned())
        .collect()
}

fn publisher(config: &SiteConfig) -> Value {
    let mut publisher = Map::new();
    publisher.insert("@type".into(), "Organization".into());
    publisher.insert("name".into(), config.publisher.name.clone().into());
    if let Some(logo) = &config.publisher.logo {
        publisher.insert(
            "logo".into(),
            json!({ "@type": "ImageObject", "url": logo }),
        );
    }
    Value::Object(publisher)
}

/// Structured data for a content detail page
pub fn article(content: &Content, author: Option<&Author>, config: &SiteConfig) -> Value {
    let headline = if content.meta_title.is_empty() {
        &content.title
    } else {
        &content.meta_title
    };
    let description = if content.meta_description.is_empty() {
        &content.description
    } else {
        &content.meta_description
    };

    let mut data = Map::new();
    data.insert("@context".into(), SCHEMA_CONTEXT.into());
    data.insert(
        "@type".into(),
        schema_type(content.content_type.as_deref()).into(),
    );
    data.insert("headline".into(), headline.clone().into());
    data.insert("description".into(), description.clone().into());
    data.insert(
        "datePublished".into(),
        content.published_at.to_rfc3339().into(),
    );
    data.insert("dateModified".into(), content.updated_at.to_rfc3339().into());

    let images = images(content);
    if !images.is_empty() {
        data.insert("image".into(), images.into());
    }

    if let Some(author) = author {
        let mut person = Map::new();
        person.insert("@type".into(), "Person".into());
        person.insert("name".into(), author.full_name().into());
        if !author.title.is_empty() {
            person.insert("jobTitle".into(), author.title.clone().into());
        }
        if let Some(image) = &author.profile_image {
            person.insert("image".into(), image.clone().into());
        }
        data.insert("author".into(), Value::Object(person));
    }

    data.insert("publisher".into(), publisher(config));

    if let Some(path) = content.path() {
        data.insert(
            "mainEntityOfPage".into(),
            json!({ "@type": "WebPage", "@id": config.absolute_url(&path) }),
        );
    }

    if !content.tags.is_empty() {
        data.insert("keywords".into(), content.tags.join(", ").into());
    }
    if let Some(section) = content.categories.first() {
        data.insert("articleSection".into(), section.clone().into());
    }

    Value::Object(data)
}

/// Breadcrumb trail: home, content type, content
pub fn breadcrumbs(content: &Content, config: &SiteConfig) -> Value {
    let mut items = vec![json!({
        "@type": "ListItem",
        "position": 1,
        "name": config.title,
        "item": config.absolute_url("/"),
    })];

    if let (Some(kind), Some(path)) = (&content.content_type, content.path()) {
        items.push(json!({
            "@type": "ListItem",
            "position": 2,
            "name": kind,
            "item": config.absolute_url(&format!("/{}/", kind)),
        }));
        items.push(json!({
            "@type": "ListItem",
            "position": 3,
            "name": content.title,
            "item": config.absolute_url(&path),
        }));
    }

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "BreadcrumbList",
        "itemListElement": items,
    })
}

/// Site-wide structured data for the home page
pub fn website(config: &SiteConfig) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "WebSite",
        "name": config.title,
        "description": config.description,
        "url": config.absolute_url("/"),
        "inLanguage": config.language,
        "publisher": publisher(config),
    })
}

/// Embed structured data in a page
///
/// `</` is escaped so the payload cannot close the script element.
pub fn script_tag(data: &Value) -> String {
    let json = data.to_string().replace("</", "<\\/");
    format!(r#"<script type="application/ld+json">{}</script>"#, json)
}

/// Body of /ads.txt
pub fn ads_txt(config: &SiteConfig) -> String {
    let ads = &config.ads;
    format!(
        "{}, {}, {}, {}",
        ads.domain, ads.publisher_id, ads.relationship, ads.certification_authority_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review() -> Content {
        let mut content = Content::new("Console Review", "console-review", "jdoe");
        content.content_type = Some("review".to_string());
        content.meta_title = "Console Review | Horizon".to_string();
        content.description = "Our take".to_string();
        content.image_featured = Some("https://cdn/x.jpg".to_string());
        content
            .image_featured_srcset
            .insert("https://cdn/x_400.jpg".to_string(), "400w".to_string());
        content.tags = vec!["Hardware".to_string(), "Consoles".to_string()];
        content
    }

    #[test]
    fn test_schema_type_by_content_type() {
        let config = SiteConfig::default();
        let mut content = review();
        assert_eq!(article(&content, None, &config)["@type"], "Review");
        content.content_type = Some("news".to_string());
        assert_eq!(article(&content, None, &config)["@type"], "NewsArticle");
        content.content_type = None;
        assert_eq!(article(&content, None, &config)["@type"], "Article");
    }

    #[test]
    fn test_article_fields() {
        let config = SiteConfig::default();
        let mut author = Author::new("jdoe", "Jane", "Doe");
        author.title = "Senior Editor".to_string();
        let data = article(&review(), Some(&author), &config);

        assert_eq!(data["headline"], "Console Review | Horizon");
        assert_eq!(data["description"], "Our take");
        assert_eq!(data["author"]["name"], "Jane Doe");
        assert_eq!(data["author"]["jobTitle"], "Senior Editor");
        assert_eq!(data["publisher"]["name"], "Horizon");
        assert_eq!(
            data["image"],
            json!(["https://cdn/x.jpg", "https://cdn/x_400.jpg"])
        );
        assert_eq!(
            data["mainEntityOfPage"]["@id"],
            "http://example.com/review/console-review/"
        );
        assert_eq!(data["keywords"], "Hardware, Consoles");
    }

    #[test]
    fn test_breadcrumbs() {
        let data = breadcrumbs(&review(), &SiteConfig::default());
        let items = data["itemListElement"].as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1]["item"], "http://example.com/review/");
    }

    #[test]
    fn test_script_tag_escapes_closing_tags() {
        let tag = script_tag(&json!({ "name": "</script><b>" }));
        assert!(tag.starts_with(r#"<script type="application/ld+json">{"#));
        assert!(!tag.contains("</script><b>"));
        assert!(tag.ends_with("</script>"));
    }

    #[test]
    fn test_ads_txt() {
        assert_eq!(
            ads_txt(&SiteConfig::default()),
            "google.com, pub-1785022650944518, DIRECT, f08c47fec0942fa0"
        );
    }

    #[test]
    fn test_website() {
        let data = website(&SiteConfig::default());
        assert_eq!(data["@type"], "WebSite");
        assert_eq!(data["url"], "http://example.com/");
    }
}
