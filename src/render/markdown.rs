//! GitHub-flavored markdown backend.

use crate::render::Backend;

#[derive(Debug)]
pub struct MarkdownBackend;

impl Backend for MarkdownBackend {
    fn extension(&self) -> &str {
        "md"
    }

    fn escape(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if matches!(c, '\\' | '`' | '*' | '_' | '<' | '>' | '[' | ']') {
                out.push('\\');
            }
            out.push(c);
        }
        out
    }

    fn preformatted(&self, text: &str) -> String {
        format!("```\n{text}\n```")
    }

    fn block(&self, text: &str) -> String {
        text.to_string()
    }

    fn italics(&self, text: &str, _hint: &str) -> String {
        format!("*{text}*")
    }

    fn bold(&self, text: &str, _hint: &str) -> String {
        format!("**{text}**")
    }

    fn inline_code(&self, text: &str, _hint: &str) -> String {
        // Double delimiters keep embedded backticks literal.
        if text.contains('`') {
            format!("`` {text} ``")
        } else {
            format!("`{text}`")
        }
    }

    fn table(&self, header_left: &str, header_right: &str, rows: &[(String, String)]) -> String {
        let mut out = format!(
            "|{}|{}|\n|---|---|",
            cell(header_left),
            cell(header_right)
        );
        for (left, right) in rows {
            out.push_str(&format!("\n|{}|{}|", cell(left), cell(right)));
        }
        out
    }

    fn header(&self, level: u8, text: &str) -> String {
        format!("{} {}", "#".repeat(level.clamp(1, 6) as usize), text)
    }

    fn code(&self, text: &str, hint: &str) -> String {
        format!("```{hint}\n{text}\n```")
    }

    fn link(&self, text: &str, target: &str) -> String {
        format!("[{text}]({target})")
    }

    fn badge(&self, text: &str) -> String {
        format!("**`{text}`**")
    }

    fn divider(&self) -> String {
        "---".to_string()
    }
}

/// Table cells must stay on one line, and raw pipes would split them.
fn cell(text: &str) -> String {
    text.replace('\n', " ").replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_metacharacters() {
        let b = MarkdownBackend;
        assert_eq!(b.escape("a<b>*c*"), "a\\<b\\>\\*c\\*");
        assert_eq!(b.escape("plain text."), "plain text.");
    }

    #[test]
    fn inline_code_embedded_backtick() {
        let b = MarkdownBackend;
        assert_eq!(b.inline_code("x", ""), "`x`");
        assert_eq!(b.inline_code("a`b", ""), "`` a`b ``");
    }

    #[test]
    fn table_escapes_pipes_and_newlines() {
        let b = MarkdownBackend;
        let rows = vec![("`Add(TKey|TValue)`".to_string(), "line one\nline two".to_string())];
        assert_eq!(
            b.table("Methods", "Description", &rows),
            "|Methods|Description|\n|---|---|\n|`Add(TKey\\|TValue)`|line one line two|"
        );
    }

    #[test]
    fn header_levels_clamped() {
        let b = MarkdownBackend;
        assert_eq!(b.header(1, "Widget"), "# Widget");
        assert_eq!(b.header(9, "Deep"), "###### Deep");
    }

    #[test]
    fn code_block_with_hint() {
        let b = MarkdownBackend;
        assert_eq!(
            b.code("public class Widget", "csharp"),
            "```csharp\npublic class Widget\n```"
        );
        assert_eq!(b.preformatted("x = 1"), "```\nx = 1\n```");
    }

    #[test]
    fn badge_token() {
        let b = MarkdownBackend;
        assert_eq!(b.badge("Static"), "**`Static`**");
    }
}
