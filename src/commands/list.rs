//! List site content

use anyhow::Result;
use std::fmt::Write;

use crate::content::loader::ContentLoader;
use crate::store::ContentStore;
use crate::Horizon;

/// List site content by type
pub fn run(horizon: &Horizon, kind: &str) -> Result<()> {
    let store = ContentLoader::new(horizon).load_store()?;
    print!("{}", listing(&store, kind)?);
    Ok(())
}

fn listing(store: &ContentStore, kind: &str) -> Result<String> {
    let mut out = String::new();

    match kind {
        "post" | "posts" => {
            let contents = store.contents();
            writeln!(out, "Content ({}):", contents.len())?;
            for content in contents {
                writeln!(
                    out,
                    "  {} - {} [{}]{}",
                    content.published_at.format("%Y-%m-%d"),
                    content.title,
                    content.content_type.as_deref().unwrap_or("-"),
                    if content.publish { "" } else { " (draft)" }
                )?;
            }
        }
        "author" | "authors" => {
            let authors: Vec<_> = store.authors().collect();
            writeln!(out, "Authors ({}):", authors.len())?;
            for author in authors {
                writeln!(out, "  {} - {}", author.key, author.full_name())?;
            }
        }
        "tag" | "tags" => {
            let tags = store.tag_counts();
            writeln!(out, "Tags ({}):", tags.len())?;
            for (tag, count) in tags {
                writeln!(out, "  {} ({})", tag, count)?;
            }
        }
        "category" | "categories" => {
            let categories = store.category_counts();
            writeln!(out, "Categories ({}):", categories.len())?;
            for (category, count) in categories {
                writeln!(out, "  {} ({})", category, count)?;
            }
        }
        "type" | "types" => {
            let types: Vec<_> = store.types().collect();
            writeln!(out, "Types ({}):", types.len())?;
            for content_type in types {
                writeln!(out, "  {}", content_type.name)?;
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, author, tag, category, type",
                kind
            );
        }
    }

    Ok(out)
}
