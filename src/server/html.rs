/// Wraps a completion in a minimal standalone HTML page so the calling
/// application can render it in an embedded browser view.
pub fn render_page(text: &str) -> String {
    let escaped = escape(text).replace('\n', "<br>\n");
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <style>
        body {{
            font-family: Arial, sans-serif;
            padding: 20px;
            line-height: 1.6;
            color: #333;
        }}
    </style>
</head>
<body>
{escaped}
</body>
</html>"#
    )
}

/// `&` is replaced first so already-escaped entities are not double-mangled.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape("a < b & c > d"), "a &lt; b &amp; c &gt; d");
    }

    #[test]
    fn renders_newlines_as_breaks() {
        let page = render_page("first\nsecond");
        assert!(page.contains("first<br>\nsecond"));
        assert!(page.starts_with("<!DOCTYPE html>"));
    }
}
