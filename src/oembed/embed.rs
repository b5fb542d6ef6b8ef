//! Embed markup generation.
//!
//! Turns a detected embeddable media URL into an iframe fragment that is
//! safe to inject into a third-party page. The sandbox denies script
//! execution and top-navigation, and every interpolated value is
//! attribute-escaped.

use url::Url;

/// Sandbox grants for embedded players. `allow-scripts` and
/// `allow-top-navigation` are deliberately absent.
const SANDBOX: &str = "allow-same-origin allow-popups";

/// Generate sandboxed iframe markup for `embed_url`.
///
/// Returns `None` when the document exposed nothing embeddable or when the
/// candidate is not a plain http(s) URL. The frame sits in a fixed 16:9
/// container so layouts stay stable while the embed loads.
pub fn generate_embed(embed_url: Option<&str>, source_url: &Url) -> Option<String> {
    let embed_url = embed_url?;

    let parsed = Url::parse(embed_url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }

    // The Url parser percent-encodes stray quotes and angle brackets;
    // attribute-escaping on top closes what encoding leaves behind.
    let src = escape_attr(parsed.as_str());
    let origin = escape_attr(source_url.as_str());

    Some(format!(
        concat!(
            r#"<div style="position:relative;width:100%;aspect-ratio:16/9">"#,
            r#"<iframe src="{src}" title="Embedded content from {origin}" "#,
            r#"sandbox="{sandbox}" referrerpolicy="no-referrer" loading="lazy" "#,
            r#"style="position:absolute;inset:0;width:100%;height:100%;border:0" "#,
            r#"allowfullscreen></iframe></div>"#
        ),
        src = src,
        origin = origin,
        sandbox = SANDBOX,
    ))
}

/// Escape a value for interpolation into a double-quoted HTML attribute.
fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
