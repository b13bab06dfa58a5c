//! Markup parsers producing a [`Document`]
//!
//! The markup grammar is not implemented in this crate. A parser is any
//! [`MarkupParser`]: something that turns cleaned source text into a
//! document tree or a [`TemplateError::Parse`].
//!
//! # Supported Backends
//!
//! | Format | Feature | Module | Type |
//! |--------|---------|--------|------|
//! | KDL | `kdl` | [`kdl`] | [`KdlParser`] |
//!
//! Closures of type `Fn(&str) -> TemplateResult<Document>` are parsers
//! too, which lets tests hand the renderer a prebuilt tree.
//!
//! [`TemplateError::Parse`]: crate::error::TemplateError::Parse

use crate::error::TemplateResult;
use crate::node::Document;

// =============================================================================
// MarkupParser
// =============================================================================

/// Capability: parse markup text into a document tree.
pub trait MarkupParser {
    /// Parse `source`, failing with `TemplateError::Parse` on bad input.
    fn parse(&self, source: &str) -> TemplateResult<Document>;
}

impl<F> MarkupParser for F
where
    F: Fn(&str) -> TemplateResult<Document>,
{
    fn parse(&self, source: &str) -> TemplateResult<Document> {
        self(source)
    }
}

// =============================================================================
// KDL backend
// =============================================================================

#[cfg(feature = "kdl")]
pub mod kdl;

#[cfg(feature = "kdl")]
pub use self::kdl::KdlParser;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TemplateError;
    use crate::node::Node;

    #[test]
    fn test_closure_parser() {
        let parser = |source: &str| -> TemplateResult<Document> {
            Ok(Document::new([Node::new("p").arg(source)]))
        };
        let doc = parser.parse("echo").unwrap();
        assert_eq!(doc.nodes[0].args_text(), "echo");
    }

    #[test]
    fn test_closure_parser_error() {
        let parser = |_: &str| -> TemplateResult<Document> { Err(TemplateError::parse("nope")) };
        assert!(parser.parse("").unwrap_err().is_parse());
    }
}
