//! HTML backend — semantic fragment markup, no page chrome.

use crate::render::Backend;

#[derive(Debug)]
pub struct HtmlBackend;

impl Backend for HtmlBackend {
    fn extension(&self) -> &str {
        "html"
    }

    fn escape(&self, text: &str) -> String {
        html_escape(text)
    }

    fn preformatted(&self, text: &str) -> String {
        format!("<pre>{}</pre>", html_escape(text))
    }

    fn block(&self, text: &str) -> String {
        format!("<p>{text}</p>")
    }

    fn italics(&self, text: &str, _hint: &str) -> String {
        format!("<em>{}</em>", html_escape(text))
    }

    fn bold(&self, text: &str, _hint: &str) -> String {
        format!("<strong>{}</strong>", html_escape(text))
    }

    fn inline_code(&self, text: &str, _hint: &str) -> String {
        format!("<code>{}</code>", html_escape(text))
    }

    fn table(&self, header_left: &str, header_right: &str, rows: &[(String, String)]) -> String {
        let mut out = format!(
            "<table>\n<thead><tr><th>{}</th><th>{}</th></tr></thead>\n<tbody>",
            html_escape(header_left),
            html_escape(header_right)
        );
        for (left, right) in rows {
            out.push_str(&format!("\n<tr><td>{left}</td><td>{right}</td></tr>"));
        }
        out.push_str("\n</tbody>\n</table>");
        out
    }

    fn header(&self, level: u8, text: &str) -> String {
        let level = level.clamp(1, 6);
        format!("<h{level}>{}</h{level}>", html_escape(text))
    }

    fn code(&self, text: &str, hint: &str) -> String {
        if hint.is_empty() {
            format!("<pre><code>{}</code></pre>", html_escape(text))
        } else {
            format!(
                "<pre><code class=\"language-{hint}\">{}</code></pre>",
                html_escape(text)
            )
        }
    }

    fn link(&self, text: &str, target: &str) -> String {
        format!("<a href=\"{}\">{text}</a>", html_escape(target))
    }

    fn badge(&self, text: &str) -> String {
        format!("<span class=\"badge\">{}</span>", html_escape(text))
    }

    fn divider(&self) -> String {
        "<hr />".to_string()
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
