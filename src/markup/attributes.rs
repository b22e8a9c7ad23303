//! Attribute parsing for tag contents

use indexmap::IndexMap;
use std::fmt;

use super::rules::RuleTable;

/// `key="value"` pairs found inside a source-set block
///
/// Repeated `srcset` keys are collected in order; any other repeated key keeps
/// its first position and takes its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAttributes {
    pairs: IndexMap<String, String>,
    srcset: Vec<String>,
}

impl ParsedAttributes {
    /// Collect every `key="value"` pair in `content`
    pub fn parse(table: &RuleTable, content: &str) -> Self {
        let mut parsed = Self::default();
        for caps in table.attribute_pair.captures_iter(content) {
            let (key, value) = (&caps[1], &caps[2]);
            if key == "srcset" {
                parsed.srcset.push(value.to_string());
            } else {
                parsed.pairs.insert(key.to_string(), value.to_string());
            }
        }
        parsed
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    pub fn srcset(&self) -> &[String] {
        &self.srcset
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.srcset.is_empty()
    }
}

impl fmt::Display for ParsedAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in &self.pairs {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, r#"{}="{}""#, key, value)?;
            first = false;
        }
        // srcset always carries its leading space, even with no other pairs
        if !self.srcset.is_empty() {
            write!(f, r#" srcset="{}""#, self.srcset.join(", "))?;
        }
        Ok(())
    }
}

/// `src="..." alt="..."` at the very start of the content, or nothing
pub fn image_attributes(table: &RuleTable, content: &str) -> String {
    match table.image_attributes.captures(content) {
        Some(caps) => format!(r#"src="{}" alt="{}""#, &caps[1], &caps[2]),
        None => String::new(),
    }
}

/// The first `figcaption="..."` anywhere in the content
pub fn figure_caption<'c>(table: &RuleTable, content: &'c str) -> &'c str {
    table
        .figure_caption
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map_or("", |m| m.as_str())
}

/// Split anchor content into `(attributes, text)`
///
/// Without a trailing `href="..." target="..."` suffix the whole content is
/// the link text.
pub fn anchor_parts<'c>(table: &RuleTable, content: &'c str) -> (String, &'c str) {
    match table.anchor_attributes.captures(content) {
        Some(caps) => {
            let text = caps.get(1).map_or("", |m| m.as_str());
            (
                format!(r#"href="{}" target="{}""#, &caps[2], &caps[3]),
                text,
            )
        }
        None => (String::new(), content),
    }
}
