//! Readable-text extraction from HTML

use scraper::{Html, Node};

/// Elements whose text never reaches the reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Reduce an HTML document to its visible text, whitespace collapsed
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut words: Vec<&str> = Vec::new();
    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if !hidden {
            words.extend(text.split_whitespace());
        }
    }

    words.join(" ")
}

/// Collapse all whitespace runs to single spaces
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Heuristic for responses served without a useful content type
pub fn looks_like_html(body: &str) -> bool {
    let head = body.trim_start();
    let prefix: String = head.chars().take(15).collect::<String>().to_lowercase();
    ["<!doctype html", "<html", "<head", "<body"]
        .iter()
        .any(|tag| prefix.starts_with(tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_scripts_and_styles() {
        let html = r#"<html><head><title>PyCon</title><style>body { color: red; }</style>
            <script>var x = "<p>hidden</p>";</script></head>
            <body><h1>PyCon   US</h1><p>Call for <b>proposals</b> closes
            2024-03-01</p><noscript>enable js</noscript></body></html>"#;

        let text = html_to_text(html);
        assert_eq!(text, "PyCon PyCon US Call for proposals closes 2024-03-01");
    }

    #[test]
    fn test_decodes_entities() {
        assert_eq!(html_to_text("<p>Q&amp;A &lt;session&gt;</p>"), "Q&A <session>");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\n b\tc  "), "a b c");
    }

    #[test]
    fn test_looks_like_html() {
        assert!(looks_like_html("\n<!DOCTYPE html><html></html>"));
        assert!(looks_like_html("<html lang=\"en\">"));
        assert!(!looks_like_html("PyCon 2024 <b>"));
        assert!(!looks_like_html("{\"title\": \"x\"}"));
    }
}
