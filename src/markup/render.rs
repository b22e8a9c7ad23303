//! HTML output for each tag

use super::attributes::{anchor_parts, figure_caption, image_attributes, ParsedAttributes};
use super::rules::{RuleTable, TagRule};

const PARAGRAPH_CLASS: &str =
    "text-[15px] sm:text-base md:text-lg text-gray-700 leading-relaxed pb-4";
const ANCHOR_CLASS: &str = "hover:text-accent text-[15px] sm:text-base md:text-lg underline";
const H2_CLASS: &str =
    "text-xl sm:text-2xl md:text-3xl font-bold text-gray-800 leading-tight mt-4 mb-2";
const H3_CLASS: &str =
    "text-base sm:text-lg md:text-xl font-bold text-gray-800 leading-tight mt-4 mb-2";
const UL_CLASS: &str = "list-disc list-inside text-gray-800 space-y-2 mb-8";
const LI_CLASS: &str = "ml-6 list-disc";

const HORIZONTAL_RULE: &str = r#"<hr class="my-6 border-t-1 border-gray-300">"#;

const AD_SLOT: &str = concat!(
    "<div>\n",
    "                        <ins class=\"adsbygoogle\"\n",
    "                            style=\"display:block; text-align:center;\"\n",
    "                            data-ad-layout=\"in-article\"\n",
    "                            data-ad-format=\"fluid\"\n",
    "                            data-ad-client=\"ca-pub-1785022650944518\"\n",
    "                            data-ad-slot=\"5657557332\"></ins>\n",
    "                            <script>\n",
    "                                (adsbygoogle = window.adsbygoogle || []).push({});\n",
    "                            </script>\n",
    "                        </div>\n",
    "                    ",
);

/// Render one captured block as HTML
pub(crate) fn render(table: &RuleTable, rule: TagRule, content: &str) -> String {
    match rule {
        TagRule::Paragraph => format!(r#"<p class="{}">{}</p>"#, PARAGRAPH_CLASS, content),
        TagRule::HorizontalRule => HORIZONTAL_RULE.to_string(),
        TagRule::Image => format!(
            r#"<img loading="lazy" {}>"#,
            image_attributes(table, content)
        ),
        TagRule::Anchor => {
            let (attributes, text) = anchor_parts(table, content);
            format!(r#"<a class="{}" {}>{}</a>"#, ANCHOR_CLASS, attributes, text)
        }
        TagRule::Bold => format!("<strong>{}</strong>", content),
        TagRule::Heading2 => format!(r#"<h2 class="{}">{}</h2>"#, H2_CLASS, content),
        TagRule::Heading3 => format!(r#"<h3 class="{}">{}</h3>"#, H3_CLASS, content),
        TagRule::FigureImage => figure(
            &image_attributes(table, content),
            figure_caption(table, content),
        ),
        TagRule::AdSlot => AD_SLOT.to_string(),
        TagRule::ImageSourceSet => format!(
            r#"<img loading="lazy" {}>"#,
            ParsedAttributes::parse(table, content)
        ),
        TagRule::FigureImageSourceSet => figure_source_set(
            &ParsedAttributes::parse(table, content).to_string(),
            figure_caption(table, content),
        ),
        TagRule::UnorderedList => {
            let items: String = table
                .block(TagRule::ListItem)
                .captures_iter(content)
                .map(|caps| list_item(caps.get(1).map_or("", |m| m.as_str())))
                .collect();
            format!(r#"<ul class="{}">{}</ul>"#, UL_CLASS, items)
        }
        TagRule::ListItem => list_item(content),
    }
}

fn list_item(content: &str) -> String {
    format!(r#"<li class="{}">{}</li>"#, LI_CLASS, content)
}

fn figure(attributes: &str, caption: &str) -> String {
    format!(
        concat!(
            "<figure class=\"w-full mx-auto text-center mb-8\">\n",
            "                        <img loading=\"lazy\" {attributes} \n",
            "                            class=\"w-full h-auto object-cover shadow\"\n",
            "                        >\n",
            "                        <figcaption class=\"text-gray-600 text-sm mt-2 italic\">\n",
            "                            {caption}\n",
            "                        </figcaption>\n",
            "                    </figure>",
        ),
        attributes = attributes,
        caption = caption,
    )
}

fn figure_source_set(attributes: &str, caption: &str) -> String {
    format!(
        concat!(
            "<figure class=\"w-full mx-auto pb-4 text-center\">\n",
            "                        <img loading=\"lazy\" {attributes} \n",
            "                            class=\"w-full h-auto object-cover mb-2 shadow\"\n",
            "                        >\n",
            "                        <figcaption class=\"text-gray-600 text-sm italic\">\n",
            "                            {caption}\n",
            "                        </figcaption>\n",
            "                    </figure>",
        ),
        attributes = attributes,
        caption = caption,
    )
}
