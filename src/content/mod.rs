//! Content module - records, front-matter and loading

mod frontmatter;
pub mod loader;
mod records;

pub use frontmatter::{AuthorFrontMatter, FrontMatter};
pub use records::{format_srcset, Author, Category, Content, ContentType, RecordError, Tag};
