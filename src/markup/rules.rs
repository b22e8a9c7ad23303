//! The fixed tag vocabulary and its compiled patterns

use lazy_static::lazy_static;
use regex::Regex;

/// One brace-delimited markup tag.
///
/// Variants are listed in processing order; [`TagRule::ALL`] is the order the
/// converter walks them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagRule {
    Paragraph,
    HorizontalRule,
    Image,
    Anchor,
    Bold,
    Heading2,
    Heading3,
    FigureImage,
    AdSlot,
    ImageSourceSet,
    FigureImageSourceSet,
    UnorderedList,
    ListItem,
}

impl TagRule {
    /// Every rule, in processing order
    pub const ALL: [TagRule; 13] = [
        TagRule::Paragraph,
        TagRule::HorizontalRule,
        TagRule::Image,
        TagRule::Anchor,
        TagRule::Bold,
        TagRule::Heading2,
        TagRule::Heading3,
        TagRule::FigureImage,
        TagRule::AdSlot,
        TagRule::ImageSourceSet,
        TagRule::FigureImageSourceSet,
        TagRule::UnorderedList,
        TagRule::ListItem,
    ];

    /// Tag name as written in markup
    pub fn name(self) -> &'static str {
        match self {
            TagRule::Paragraph => "p",
            TagRule::HorizontalRule => "hr",
            TagRule::Image => "img",
            TagRule::Anchor => "a",
            TagRule::Bold => "b",
            TagRule::Heading2 => "h2",
            TagRule::Heading3 => "h3",
            TagRule::FigureImage => "figure_img",
            TagRule::AdSlot => "ads_by_google",
            TagRule::ImageSourceSet => "img_src_set",
            TagRule::FigureImageSourceSet => "figure_img_src_set",
            TagRule::UnorderedList => "ul",
            TagRule::ListItem => "li",
        }
    }

    /// Look up a rule by its markup name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.name() == name)
    }

    /// Opening delimiter. For tags without content this is the whole block.
    pub fn open(self) -> &'static str {
        match self {
            TagRule::Paragraph => "{p ",
            TagRule::HorizontalRule => "{hr hr}",
            TagRule::Image => "{img ",
            TagRule::Anchor => "{a ",
            TagRule::Bold => "{b ",
            TagRule::Heading2 => "{h2 ",
            TagRule::Heading3 => "{h3 ",
            TagRule::FigureImage => "{figure_img ",
            TagRule::AdSlot => "{ads_by_google ads_by_google}",
            TagRule::ImageSourceSet => "{img_src_set}",
            TagRule::FigureImageSourceSet => "{figure_img_src_set}",
            TagRule::UnorderedList => "{ul",
            TagRule::ListItem => "{li ",
        }
    }

    /// Closing delimiter
    pub fn close(self) -> &'static str {
        match self {
            TagRule::Paragraph => " p}",
            TagRule::HorizontalRule | TagRule::AdSlot => "",
            TagRule::Image => " img}",
            TagRule::Anchor => " a}",
            TagRule::Bold => " b}",
            TagRule::Heading2 => " h2}",
            TagRule::Heading3 => " h3}",
            TagRule::FigureImage => " figure_img}",
            TagRule::ImageSourceSet => "{img_src_set}",
            TagRule::FigureImageSourceSet => "{figure_img_src_set}",
            TagRule::UnorderedList => "ul}",
            TagRule::ListItem => " li}",
        }
    }

    /// Whether the tag captures inner content
    pub fn has_content(self) -> bool {
        !matches!(self, TagRule::HorizontalRule | TagRule::AdSlot)
    }

    /// Rebuild the source block for some captured content
    pub fn wrap(self, content: &str) -> String {
        format!("{}{}{}", self.open(), content, self.close())
    }

    fn pattern(self) -> String {
        if self.has_content() {
            format!(
                "(?s){}(.*?){}",
                regex::escape(self.open()),
                regex::escape(self.close())
            )
        } else {
            format!("(?s){}", regex::escape(self.open()))
        }
    }
}

/// Compiled block and attribute patterns
///
/// Built once and shared read-only by every converter.
#[derive(Debug)]
pub struct RuleTable {
    blocks: Vec<Regex>,
    pub(crate) image_attributes: Regex,
    pub(crate) anchor_attributes: Regex,
    pub(crate) figure_caption: Regex,
    pub(crate) attribute_pair: Regex,
}

impl RuleTable {
    /// Compile every pattern
    pub fn new() -> Result<Self, regex::Error> {
        let blocks = TagRule::ALL
            .iter()
            .map(|rule| Regex::new(&rule.pattern()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            blocks,
            image_attributes: Regex::new(r#"^src="([^"]+)"\s+alt="([^"]+)""#)?,
            // `$` here must also accept a single trailing newline
            anchor_attributes: Regex::new(
                r#"^(.*?)\s+href="([^"]+)"\s+target="([^"]+)"\n?$"#,
            )?,
            figure_caption: Regex::new(r#"figcaption="([^"]+)""#)?,
            attribute_pair: Regex::new(r#"([a-zA-Z-]+)="([^"]+)""#)?,
        })
    }

    /// Block pattern for a rule
    pub fn block(&self, rule: TagRule) -> &Regex {
        &self.blocks[rule as usize]
    }
}

lazy_static! {
    static ref RULE_TABLE: RuleTable =
        RuleTable::new().expect("built-in markup patterns must compile");
}

/// The process-wide rule table
pub fn rule_table() -> &'static RuleTable {
    &RULE_TABLE
}
