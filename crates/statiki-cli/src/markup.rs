//! Server messages carry small bits of HTML (links, `<p>`, `<code>`).
//! The terminal gets plain text, with link targets kept next to their text.

use regex::Regex;
use std::sync::LazyLock;

static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*["']([^"']*)["'][^>]*>(.*?)</a\s*>"#)
        .expect("Invalid link regex")
});

static BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>|</p\s*>").expect("Invalid break regex"));

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("Invalid tag regex"));

pub fn to_plain_text(html: &str) -> String {
    let linked = LINK.replace_all(html, |caps: &regex::Captures<'_>| {
        let href = &caps[1];
        let text = TAG.replace_all(&caps[2], "");
        let text = text.trim();
        if text.is_empty() || text == href {
            href.to_string()
        } else {
            format!("{} ({})", text, href)
        }
    });
    let broken = BREAK.replace_all(&linked, "\n");
    let stripped = TAG.replace_all(&broken, "");

    unescape(stripped.trim())
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
