//! Front-matter parsing

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, NaiveDateTime};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter of a content file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub slug: Option<String>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub categories: Vec<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    pub author: Option<String>,

    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub description: Option<String>,

    /// Publication date
    pub date: Option<String>,
    pub updated: Option<String>,
    pub read_time: Option<u32>,

    pub image_featured: Option<String>,
    pub image_featured_srcset: IndexMap<String, String>,
    pub image_caption: Option<String>,
    pub image_by: Option<String>,

    /// Content is a draft unless this is set
    pub publish: bool,
}

/// Front-matter of an author file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorFrontMatter {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub title: String,
    pub profile_image: Option<String>,
    pub profile_image_srcset: IndexMap<String, String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        parse(content)
    }

    /// Parse the date string into a DateTime
    pub fn parse_date(&self) -> Option<DateTime<Local>> {
        self.date.as_ref().and_then(|s| parse_date_string(s))
    }

    /// Parse the updated date string into a DateTime
    pub fn parse_updated(&self) -> Option<DateTime<Local>> {
        self.updated.as_ref().and_then(|s| parse_date_string(s))
    }
}

impl AuthorFrontMatter {
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        parse(content)
    }
}

/// Split YAML (`---`) or JSON (`;;;`) front-matter from the body
///
/// A body may itself start with `{`, since markup blocks are brace-delimited,
/// so bare JSON objects are not treated as front-matter.
fn parse<T: DeserializeOwned + Default>(content: &str) -> Result<(T, &str)> {
    let content = content.trim_start();

    if content.starts_with("---") {
        return parse_yaml(content);
    }

    if content.starts_with(";;;") {
        return parse_json(content);
    }

    Ok((T::default(), content))
}

fn parse_yaml<T: DeserializeOwned + Default>(content: &str) -> Result<(T, &str)> {
    let rest = &content[3..]; // Skip opening ---
    let rest = rest.trim_start_matches(['\n', '\r']);

    let Some(end_pos) = rest.find("\n---") else {
        // No closing ---, treat as no front-matter
        return Ok((T::default(), content));
    };

    let yaml_content = &rest[..end_pos];
    let remaining = &rest[end_pos + 4..]; // Skip \n---
    let remaining = remaining.trim_start_matches(['\n', '\r']);

    if yaml_content.trim().is_empty() {
        return Ok((T::default(), remaining));
    }

    if !looks_like_yaml(yaml_content) {
        return Ok((T::default(), content));
    }

    match serde_yaml::from_str::<T>(yaml_content) {
        Ok(fm) => Ok((fm, remaining)),
        Err(e) => {
            tracing::warn!(
                "Failed to parse YAML front-matter, treating as content: {}",
                e
            );
            Ok((T::default(), content))
        }
    }
}

/// At least one `key: value` line, where the key is a plain identifier and
/// not a URL scheme
fn looks_like_yaml(yaml_content: &str) -> bool {
    yaml_content.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let before_colon = &trimmed[..colon_pos];
        let is_valid_key = !before_colon.is_empty()
            && before_colon
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(before_colon, "http" | "https" | "ftp");
        if !is_valid_key {
            return false;
        }
        let after_colon = &trimmed[colon_pos + 1..];
        after_colon.is_empty() || after_colon.starts_with(' ')
    })
}

fn parse_json<T: DeserializeOwned>(content: &str) -> Result<(T, &str)> {
    let rest = &content[3..];
    let end_pos = rest
        .find(";;;")
        .ok_or_else(|| anyhow!("Invalid JSON front-matter: missing closing ;;;"))?;

    let json_content = &rest[..end_pos];
    let remaining = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);

    let fm: T = serde_json::from_str(json_content)
        .map_err(|e| anyhow!("Failed to parse JSON front-matter: {}", e))?;

    Ok((fm, remaining))
}

/// Parse a date string in various formats
pub(crate) fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return dt.and_local_timezone(Local).earliest();
        }
        // Try parsing date only
        if let Ok(d) = chrono::NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0)?.and_local_timezone(Local).earliest();
        }
    }

    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Elden Ring DLC Review
slug: elden-ring-dlc-review
type: review
date: 2024-06-20 10:30:00
author: jdoe
tags:
  - Home Main
  - RPG
categories:
  - games
image_featured_srcset:
  https://cdn.example/a_400.jpg: 400w
  https://cdn.example/a_100.jpg: 100w
publish: true
---

{p It is big. p}
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Elden Ring DLC Review"));
        assert_eq!(fm.content_type.as_deref(), Some("review"));
        assert_eq!(fm.tags, vec!["Home Main", "RPG"]);
        assert_eq!(fm.categories, vec!["games"]);
        assert!(fm.publish);
        let urls: Vec<_> = fm.image_featured_srcset.keys().collect();
        assert_eq!(
            urls,
            vec!["https://cdn.example/a_400.jpg", "https://cdn.example/a_100.jpg"]
        );
        assert!(remaining.starts_with("{p It is big. p}"));
    }

    #[test]
    fn test_publish_defaults_to_false() {
        let (fm, _) = FrontMatter::parse("---\ntitle: Draft\n---\nbody").unwrap();
        assert!(!fm.publish);
        assert_eq!(fm.read_time, None);
    }

    #[test]
    fn test_body_starting_with_brace_is_not_front_matter() {
        let content = "{p no front matter here p}";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = ";;;\n{\"title\": \"Test\", \"tags\": [\"a\", \"b\"]}\n;;;\n{b body b}";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Test"));
        assert_eq!(fm.tags, vec!["a", "b"]);
        assert_eq!(remaining, "{b body b}");
    }

    #[test]
    fn test_parse_single_string_tags() {
        let content = "---\ntitle: One\ntags: News\ncategories: hardware\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["News"]);
        assert_eq!(fm.categories, vec!["hardware"]);
    }

    #[test]
    fn test_parse_author_frontmatter() {
        let content = "---\nfirst_name: Jane\nlast_name: Doe\ntitle: Editor\n---\n{p Bio p}";
        let (fm, remaining) = AuthorFrontMatter::parse(content).unwrap();
        assert_eq!(fm.first_name, "Jane");
        assert_eq!(fm.middle_name, None);
        assert_eq!(fm.title, "Editor");
        assert_eq!(remaining, "{p Bio p}");
    }

    #[test]
    fn test_separator_without_yaml_is_content() {
        let content = "---\n\nCheck out https://example.com\n\n---\nMore.";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert!(remaining.contains("https://example.com"));
    }

    #[test]
    fn test_parse_date() {
        let fm = FrontMatter {
            date: Some("2024-01-15 10:30:00".to_string()),
            updated: Some("2024-01-16".to_string()),
            ..Default::default()
        };
        let dt = fm.parse_date().unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 10:30");
        let updated = fm.parse_updated().unwrap();
        assert_eq!(updated.format("%Y-%m-%d").to_string(), "2024-01-16");
        assert!(parse_date_string("not a date").is_none());
    }
}
