//! Markup cleanup for upstream snippets and descriptions.

use scraper::Html;

/// Text content of an HTML fragment with entities decoded and whitespace
/// collapsed.
pub fn to_plain_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: String = fragment.root_element().text().collect();

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
