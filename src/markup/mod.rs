//! Brace markup to HTML conversion
//!
//! Content bodies and author descriptions are written in a small markup
//! language of brace-delimited blocks such as `{p ... p}` or
//! `{img src="..." alt="..." img}`. [`HtmlConverter`] turns them into the
//! styled HTML the site templates expect.
//!
//! Conversion walks the rules in a fixed order. For each rule it collects every
//! match in the current document and then replaces each matched block, by
//! exact text, everywhere it occurs. This batch behaviour is what existing
//! pages were rendered with, so it must not be replaced by a nesting parser.

mod attributes;
mod render;
mod rules;

pub use attributes::ParsedAttributes;
pub use rules::{rule_table, RuleTable, TagRule};

/// Converts brace markup into HTML
#[derive(Debug, Clone)]
pub struct HtmlConverter<'t> {
    table: &'t RuleTable,
    rules: Vec<TagRule>,
}

impl HtmlConverter<'static> {
    /// Converter with every rule enabled
    pub fn new() -> Self {
        Self::with_table(rule_table())
    }

    /// Converter restricted to the named tags
    ///
    /// Rules still run in their fixed order. Unknown names are logged and
    /// skipped, so their blocks stay in the output as raw text.
    pub fn with_tags<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut enabled = Vec::new();
        for name in names {
            let name = name.as_ref();
            match TagRule::from_name(name) {
                Some(rule) => enabled.push(rule),
                None => tracing::warn!("Unknown block type: {}", name),
            }
        }

        let rules = TagRule::ALL
            .into_iter()
            .filter(|rule| enabled.contains(rule))
            .collect();

        Self {
            table: rule_table(),
            rules,
        }
    }
}

impl Default for HtmlConverter<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t> HtmlConverter<'t> {
    /// Converter over a caller-owned rule table
    pub fn with_table(table: &'t RuleTable) -> Self {
        Self {
            table,
            rules: TagRule::ALL.to_vec(),
        }
    }

    /// Rules this converter applies, in order
    pub fn rules(&self) -> &[TagRule] {
        &self.rules
    }

    /// Convert a markup document to HTML
    pub fn convert(&self, document: &str) -> String {
        let mut document = document.to_string();

        for &rule in &self.rules {
            let blocks: Vec<String> = self
                .table
                .block(rule)
                .captures_iter(&document)
                .map(|caps| caps.get(1).map_or("", |m| m.as_str()).to_string())
                .collect();

            if blocks.is_empty() {
                continue;
            }
            tracing::trace!("Replacing {} `{}` block(s)", blocks.len(), rule.name());

            for content in &blocks {
                let html = render::render(self.table, rule, content);
                document = document.replace(&rule.wrap(content), &html);
            }
        }

        document
    }
}

/// Convert with the default converter
pub fn convert(document: &str) -> String {
    HtmlConverter::new().convert(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    const P_OPEN: &str =
        r#"<p class="text-[15px] sm:text-base md:text-lg text-gray-700 leading-relaxed pb-4">"#;
    const LI_OPEN: &str = r#"<li class="ml-6 list-disc">"#;

    #[test]
    fn test_plain_text_is_unchanged() {
        let doc = "No tags here, just {braces} and { p nope p } text.\n";
        assert_eq!(convert(doc), doc);
        assert_eq!(convert(""), "");
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(convert("{p hello p}"), format!("{}hello</p>", P_OPEN));
    }

    #[test]
    fn test_paragraph_spans_lines() {
        assert_eq!(
            convert("{p line one\nline two p}"),
            format!("{}line one\nline two</p>", P_OPEN)
        );
    }

    #[test]
    fn test_image() {
        assert_eq!(
            convert(r#"{img src="a.jpg" alt="x" img}"#),
            r#"<img loading="lazy" src="a.jpg" alt="x">"#
        );
    }

    #[test]
    fn test_image_without_attributes_keeps_spacing() {
        assert_eq!(convert("{img broken img}"), r#"<img loading="lazy" >"#);
    }

    #[test]
    fn test_anchor_with_attributes() {
        assert_eq!(
            convert(r#"{a buy it href="http://x" target="_blank" a}"#),
            r#"<a class="hover:text-accent text-[15px] sm:text-base md:text-lg underline" href="http://x" target="_blank">buy it</a>"#
        );
    }

    #[test]
    fn test_anchor_plain_text() {
        assert_eq!(
            convert("{a plain text a}"),
            r#"<a class="hover:text-accent text-[15px] sm:text-base md:text-lg underline" >plain text</a>"#
        );
    }

    #[test]
    fn test_horizontal_rule_and_bold() {
        assert_eq!(
            convert("{hr hr}{b strong b}{hr hr}"),
            r#"<hr class="my-6 border-t-1 border-gray-300"><strong>strong</strong><hr class="my-6 border-t-1 border-gray-300">"#
        );
    }

    #[test]
    fn test_headings() {
        let html = convert("{h2 Title h2}\n{h3 Sub h3}");
        assert!(html.starts_with(r#"<h2 class="text-xl sm:text-2xl md:text-3xl font-bold"#));
        assert!(html.contains(">Title</h2>\n<h3 class=\"text-base"));
        assert!(html.ends_with(">Sub</h3>"));
    }

    #[test]
    fn test_unordered_list() {
        let html = convert("{ul {li one li} {li two li} ul}");
        assert_eq!(
            html,
            format!(
                r#"<ul class="list-disc list-inside text-gray-800 space-y-2 mb-8">{li}one</li>{li}two</li></ul>"#,
                li = LI_OPEN
            )
        );
        assert_eq!(html.matches("<li ").count(), 2);
    }

    #[test]
    fn test_multiline_list() {
        let html = convert("{ul\n    {li first li}\n    {li second li}\nul}");
        let first = html.find("first").unwrap();
        let second = html.find("second").unwrap();
        assert!(first < second);
        assert!(!html.contains('\n'));
    }

    #[test]
    fn test_standalone_list_item_fallback() {
        assert_eq!(convert("{li lonely li}"), format!("{}lonely</li>", LI_OPEN));
    }

    #[test]
    fn test_image_source_set() {
        let doc = "{img_src_set}\n    src=\"a.jpg\"\n    alt=\"pic\"\n    srcset=\"a_100.jpg 100w\"\n    srcset=\"a_400.jpg 400w\"\n{img_src_set}";
        assert_eq!(
            convert(doc),
            r#"<img loading="lazy" src="a.jpg" alt="pic" srcset="a_100.jpg 100w, a_400.jpg 400w">"#
        );
    }

    #[test]
    fn test_figure_image_source_set_keeps_caption_attribute() {
        let doc = r#"{figure_img_src_set} src="a" figcaption="c" srcset="x 1w" {figure_img_src_set}"#;
        let html = convert(doc);
        assert!(html.starts_with(r#"<figure class="w-full mx-auto pb-4 text-center">"#));
        assert!(html.contains(r#"<img loading="lazy" src="a" figcaption="c" srcset="x 1w" "#));
        assert!(html.contains("                            c\n                        </figcaption>"));
    }

    #[test]
    fn test_figure_image_exact_output() {
        let html = convert(r#"{figure_img src="a" alt="b" figcaption="c" figure_img}"#);
        let expected = "<figure class=\"w-full mx-auto text-center mb-8\">\n                        <img loading=\"lazy\" src=\"a\" alt=\"b\" \n                            class=\"w-full h-auto object-cover shadow\"\n                        >\n                        <figcaption class=\"text-gray-600 text-sm mt-2 italic\">\n                            c\n                        </figcaption>\n                    </figure>";
        assert_eq!(html, expected);
    }

    #[test]
    fn test_ad_slot() {
        let html = convert("before {ads_by_google ads_by_google} after");
        assert!(html.starts_with("before <div>\n"));
        assert!(html.contains(r#"data-ad-client="ca-pub-1785022650944518""#));
        assert!(html.contains("(adsbygoogle = window.adsbygoogle || []).push({});"));
        assert!(html.ends_with("</div>\n                     after"));
    }

    #[test]
    fn test_identical_blocks_are_all_replaced() {
        let html = convert("{b x b} middle {b x b} end {b x b}");
        assert_eq!(
            html,
            "<strong>x</strong> middle <strong>x</strong> end <strong>x</strong>"
        );
    }

    #[test]
    fn test_nested_inline_tags() {
        let html = convert(r#"{p see {a here href="/x" target="_self" a} and {b this b} p}"#);
        assert!(html.starts_with(P_OPEN));
        assert!(html.contains(r#"href="/x" target="_self">here</a>"#));
        assert!(html.contains("<strong>this</strong>"));
        assert!(!html.contains('{'));
    }

    #[test]
    fn test_unterminated_block_passes_through() {
        let doc = "{p never closed\n{b also open";
        assert_eq!(convert(doc), doc);
    }

    #[test]
    fn test_converting_output_again_changes_nothing() {
        let doc = concat!(
            "{h2 Review h2}\n{p text {b bold b} p}\n{hr hr}\n",
            "{img src=\"a.jpg\" alt=\"x\" img}\n",
            "{figure_img src=\"a\" alt=\"b\" figcaption=\"c\" figure_img}\n",
            "{ul {li one li} ul}\n{ads_by_google ads_by_google}\n",
            "{img_src_set} src=\"a\" srcset=\"a 1w\" {img_src_set}\n",
        );
        let once = convert(doc);
        assert_eq!(convert(&once), once);
    }

    #[test]
    fn test_with_tags_restricts_rules() {
        let converter = HtmlConverter::with_tags(["b", "p", "marquee"]);
        assert_eq!(converter.rules(), [TagRule::Paragraph, TagRule::Bold]);
        assert_eq!(
            converter.convert("{b x b} {h2 y h2}"),
            "<strong>x</strong> {h2 y h2}"
        );
    }

    #[test]
    fn test_with_table() {
        let table = RuleTable::new().unwrap();
        let converter = HtmlConverter::with_table(&table);
        assert_eq!(converter.convert("{b x b}"), "<strong>x</strong>");
    }
}
