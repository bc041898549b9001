//! Output backends — trait-based format dispatch.
//!
//! A [`Backend`] supplies the formatting primitives one markup flavor
//! needs; the generator composes documents out of them without knowing
//! which flavor is selected.

pub mod html;
pub mod markdown;

use anyhow::{anyhow, Result};

/// Formatting primitives of one output flavor.
///
/// Block primitives (`preformatted`, `block`, `table`, `header`, `code`,
/// `divider`) return fragments without trailing newlines; the generator
/// owns inter-block spacing. Inline primitives return bare spans.
/// `table` cells and `link`/`block` text are already-rendered inline
/// markup and are not escaped again; plain text goes through [`escape`]
/// at the call site.
///
/// [`escape`]: Backend::escape
pub trait Backend: std::fmt::Debug {
    /// Output file extension, without the dot.
    fn extension(&self) -> &str;
    /// Escape plain text for this flavor.
    fn escape(&self, text: &str) -> String;
    /// Code block with no language association.
    fn preformatted(&self, text: &str) -> String;
    /// Paragraph-level block of already-rendered inline content.
    fn block(&self, text: &str) -> String;
    fn italics(&self, text: &str, hint: &str) -> String;
    fn bold(&self, text: &str, hint: &str) -> String;
    fn inline_code(&self, text: &str, hint: &str) -> String;
    /// Two-column table; cells are already-rendered inline markup.
    fn table(&self, header_left: &str, header_right: &str, rows: &[(String, String)]) -> String;
    fn header(&self, level: u8, text: &str) -> String;
    /// Code block associated with a language hint.
    fn code(&self, text: &str, hint: &str) -> String;
    fn link(&self, text: &str, target: &str) -> String;
    /// Short label shown alongside a member or type.
    fn badge(&self, text: &str) -> String;
    fn divider(&self) -> String;
}

/// Create the backend for the given format name.
pub fn create_backend(format: &str) -> Result<Box<dyn Backend>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownBackend)),
        "html" => Ok(Box::new(html::HtmlBackend)),
        _ => Err(anyhow!("unknown format: {}. Use markdown or html", format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_selects_by_name() {
        assert_eq!(create_backend("markdown").unwrap().extension(), "md");
        assert_eq!(create_backend("md").unwrap().extension(), "md");
        assert_eq!(create_backend("html").unwrap().extension(), "html");
    }

    #[test]
    fn factory_rejects_unknown_format() {
        let err = create_backend("xml").unwrap_err().to_string();
        assert!(err.contains("unknown format"));
    }
}
