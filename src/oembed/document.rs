//! Defensive HTML parsing.
//!
//! Wraps `scraper::Html` (an html5ever tree) behind a read-only query
//! surface. Script execution does not exist as a capability of this parser.
//! Malformed markup degrades to a best-effort tree, and a missing element is
//! represented as `None` rather than an error.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("valid selector"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("valid selector"));
static IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").expect("valid selector"));
static OEMBED_LINK: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"link[type="application/json+oembed"]"#).expect("valid selector")
});

/// A parsed, read-only HTML document.
///
/// Owned by a single extraction call and dropped when extraction completes;
/// no mutation capability is exposed.
pub struct ParsedDocument {
    doc: Html,
}

/// An `<img>` found in the document, with its declared dimensions (if any).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    pub src: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ParsedDocument {
    /// Parse raw HTML. Never fails: unclosed tags, invalid nesting, and a
    /// missing doctype all degrade to whatever tree can be recovered.
    pub fn parse(raw: &str) -> Self {
        Self {
            doc: Html::parse_document(raw),
        }
    }

    /// Content of the first `<meta property="…">` tag, trimmed.
    /// Empty or whitespace-only content counts as absent.
    pub fn meta_property(&self, property: &str) -> Option<String> {
        let selector = Selector::parse(&format!(r#"meta[property="{property}"]"#)).ok()?;
        self.first_meta_content(&selector)
    }

    /// Content of the first `<meta name="…">` tag, with the same trimming
    /// rules as [`ParsedDocument::meta_property`].
    pub fn meta_name(&self, name: &str) -> Option<String> {
        let selector = Selector::parse(&format!(r#"meta[name="{name}"]"#)).ok()?;
        self.first_meta_content(&selector)
    }

    fn first_meta_content(&self, selector: &Selector) -> Option<String> {
        self.doc
            .select(selector)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Text of the document's `<title>` element.
    pub fn title_text(&self) -> Option<String> {
        self.doc
            .select(&TITLE)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// First paragraph whose whitespace-collapsed text is at least `min_len`
    /// characters.
    pub fn first_paragraph(&self, min_len: usize) -> Option<String> {
        self.doc.select(&PARAGRAPH).find_map(|el| {
            let text = el.text().collect::<String>();
            let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
            (collapsed.chars().count() >= min_len).then_some(collapsed)
        })
    }

    /// `<img>` elements in document order. Entries without a `src` are
    /// skipped; declared dimensions are carried for qualification checks.
    pub fn images(&self) -> impl Iterator<Item = ImageCandidate> + '_ {
        self.doc.select(&IMG).filter_map(|el| {
            let value = el.value();
            let src = value.attr("src")?.trim();
            if src.is_empty() {
                return None;
            }
            Some(ImageCandidate {
                src: src.to_string(),
                width: value.attr("width").and_then(|w| w.parse().ok()),
                height: value.attr("height").and_then(|h| h.parse().ok()),
            })
        })
    }

    /// Href of the page's oEmbed discovery link, if it advertises one.
    pub fn oembed_discovery_href(&self) -> Option<String> {
        self.doc
            .select(&OEMBED_LINK)
            .next()
            .and_then(|el| el.value().attr("href"))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}
