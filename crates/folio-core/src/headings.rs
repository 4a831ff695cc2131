//! Heading extraction for article tables of contents.

use folio_types::Heading;
use pulldown_cmark::{Event, Parser as MdParser, Tag, TagEnd};
use std::collections::HashSet;

/// Collect every heading in `markdown` with a unique anchor slug.
///
/// Repeated slugs get `-1`, `-2`, ... suffixes in document order.
pub fn extract_headings(markdown: &str) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut used = HashSet::new();
    let mut current: Option<(u8, String)> = None;

    for event in MdParser::new(markdown) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some((level as u8, String::new()));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buf)) = current.as_mut() {
                    buf.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, buf)) = current.as_mut() {
                    buf.push(' ');
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, text)) = current.take() {
                    let text = text.trim().to_string();
                    let slug = unique_slug(slugify(&text), &mut used);
                    headings.push(Heading { level, text, slug });
                }
            }
            _ => {}
        }
    }

    headings
}

/// Anchor form of a heading: lowercase, whitespace runs as `-`, punctuation dropped.
///
/// Letters in any script are kept, so Japanese headings slug to themselves.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().chars() {
        if c.is_whitespace() {
            if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        } else if c.is_alphanumeric() || c == '_' || c == '-' {
            slug.extend(c.to_lowercase());
        }
    }

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug.to_string()
    }
}

fn unique_slug(base: String, used: &mut HashSet<String>) -> String {
    if used.insert(base.clone()) {
        return base;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{}-{}", base, n);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  C++ & Rust  "), "c-rust");
        assert_eq!(slugify("はじめに"), "はじめに");
        assert_eq!(slugify("Rust で 作る"), "rust-で-作る");
        assert_eq!(slugify("???"), "section");
    }

    #[test]
    fn test_extracts_levels_and_inline_code() {
        let md = "# Title\n\nintro\n\n## Using `cargo`\n\n### 詳細\n";
        let headings = extract_headings(md);

        assert_eq!(headings.len(), 3);
        assert_eq!(headings[0].level, 1);
        assert_eq!(headings[0].text, "Title");
        assert_eq!(headings[1].text, "Using cargo");
        assert_eq!(headings[1].slug, "using-cargo");
        assert_eq!(headings[2].level, 3);
        assert_eq!(headings[2].slug, "詳細");
    }

    #[test]
    fn test_duplicate_slugs_get_suffixes() {
        let md = "## Setup\n\n## Setup\n\n## Setup-1\n\n## Setup\n";
        let slugs: Vec<_> = extract_headings(md).into_iter().map(|h| h.slug).collect();
        assert_eq!(slugs, vec!["setup", "setup-1", "setup-1-1", "setup-2"]);
    }

    #[test]
    fn test_code_blocks_are_not_headings() {
        let md = "```\n# not a heading\n```\n\n# Real\n";
        let headings = extract_headings(md);
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].text, "Real");
    }
}
