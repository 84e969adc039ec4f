//! Small HTML helpers shared by the templates and the form renderer.

/// Inline style for paragraphs holding free-form, multi-line user text.
pub const WRAP_STYLE: &str = "white-space: pre-wrap; word-wrap: break-word;";

/// Escape text for use in element content or a double-quoted attribute.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `<div class="{class}">{text}</div>` with escaped text.
#[must_use]
pub fn div(class: &str, text: &str) -> String {
    format!(r#"<div class="{class}">{}</div>"#, escape(text))
}

/// A paragraph of multi-line text, optionally with extra inline style.
#[must_use]
pub fn paragraph(text: &str, extra_style: Option<&str>) -> String {
    match extra_style {
        Some(extra) => format!(
            r#"<p style="{WRAP_STYLE} {extra}">{}</p>"#,
            escape(text)
        ),
        None => format!(r#"<p style="{WRAP_STYLE}">{}</p>"#, escape(text)),
    }
}

/// A Font Awesome icon element.
#[must_use]
pub fn icon(class: &str) -> String {
    format!(r#"<i class="{class}"></i>"#)
}
