//! Template pipeline: shield → parse → render → restore
//!
//! [`KdlTemplate`] runs the whole pipeline eagerly when it is built and
//! keeps the result along with the directives it shielded.
//!
//! ```text
//! source ──extract──▶ cleaned source ──parse──▶ Document
//!                                                  │
//! output ◀──restore── HTML with placeholders ◀──render
//! ```

use crate::error::TemplateResult;
use crate::parse::MarkupParser;
use crate::render::{RenderConfig, render_document};
use crate::shield::{DirectiveShield, PlaceholderMap};

#[cfg(feature = "kdl")]
use crate::parse::KdlParser;

// =============================================================================
// KdlTemplate
// =============================================================================

/// A rendered template and the directives it preserved
#[derive(Debug, Clone)]
pub struct KdlTemplate {
    source: String,
    config: RenderConfig,
    tokens: PlaceholderMap,
    output: String,
}

impl KdlTemplate {
    /// Render `source` with the built-in KDL parser
    #[cfg(feature = "kdl")]
    pub fn new(source: impl Into<String>, config: RenderConfig) -> TemplateResult<Self> {
        Self::with_parser(&KdlParser, source, config)
    }

    /// Render `source` with a caller-supplied parser
    pub fn with_parser<M>(
        parser: &M,
        source: impl Into<String>,
        config: RenderConfig,
    ) -> TemplateResult<Self>
    where
        M: MarkupParser + ?Sized,
    {
        let source = source.into();
        let shield = DirectiveShield::new();

        let (cleaned, tokens) = shield.extract(&source);
        let doc = parser.parse(&cleaned)?;
        tracing::debug!(
            nodes = doc.collect_stats().node_count(),
            directives = tokens.len(),
            "parsed template"
        );

        let html = render_document(&doc, &config);
        let output = shield.restore(&html, &tokens);

        Ok(Self {
            source,
            config,
            tokens,
            output,
        })
    }

    /// The rendered HTML with directives restored
    pub fn render(&self) -> &str {
        &self.output
    }

    /// Consume the template, keeping only the rendered HTML
    pub fn into_output(self) -> String {
        self.output
    }

    /// Consume the template into its output and placeholder map
    pub fn into_parts(self) -> (String, PlaceholderMap) {
        (self.output, self.tokens)
    }

    /// Directives shielded during rendering, by placeholder token
    pub fn tokens(&self) -> &PlaceholderMap {
        &self.tokens
    }

    /// The original template source
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Settings the template was rendered with
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}

// =============================================================================
// Convenience functions
// =============================================================================

/// Render KDL source to HTML, keeping Jinja syntax intact.
///
/// `pretty` selects indented output; otherwise the HTML is compact.
#[cfg(feature = "kdl")]
pub fn render_kdl(source: &str, pretty: bool) -> TemplateResult<String> {
    render_with(&KdlParser, source, &RenderConfig::new(pretty))
}

/// Render `source` with any parser and settings.
pub fn render_with<M>(parser: &M, source: &str, config: &RenderConfig) -> TemplateResult<String>
where
    M: MarkupParser + ?Sized,
{
    KdlTemplate::with_parser(parser, source, config.clone()).map(KdlTemplate::into_output)
}

/// Render many sources in parallel, results in input order.
///
/// Each source gets its own placeholder numbering; one failure does not
/// affect the others.
#[cfg(feature = "parallel")]
pub fn render_many<M, S>(
    parser: &M,
    sources: &[S],
    config: &RenderConfig,
) -> Vec<TemplateResult<String>>
where
    M: MarkupParser + Sync + ?Sized,
    S: AsRef<str> + Sync,
{
    use rayon::prelude::*;

    sources
        .par_iter()
        .map(|source| render_with(parser, source.as_ref(), config))
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TemplateError;
    use crate::node::{Document, Node};

    /// Parser that ignores its input and returns a fixed tree.
    fn fixed(doc: Document) -> impl Fn(&str) -> TemplateResult<Document> {
        move |_| Ok(doc.clone())
    }

    #[test]
    fn test_with_hand_built_tree() {
        let parser = fixed(Document::new([Node::new("div")
            .child(Node::new("p").arg("Hello __JINJA_0__"))]));
        let template =
            KdlTemplate::with_parser(&parser, "ignored {{ name }}", RenderConfig::COMPACT)
                .unwrap();

        assert_eq!(template.render(), "<div><p>Hello {{ name }}</p></div>");
        assert_eq!(template.tokens().get("__JINJA_0__"), Some("{{ name }}"));
        assert_eq!(template.source(), "ignored {{ name }}");
        assert!(!template.config().pretty);
    }

    #[test]
    fn test_parser_sees_cleaned_source() {
        let parser = |source: &str| -> TemplateResult<Document> {
            assert_eq!(source, "div {\n    - \"__JINJA_0__\"\n}");
            Ok(Document::default())
        };
        render_with(&parser, "div {\n    {% if x %}\n}", &RenderConfig::PRETTY).unwrap();
    }

    #[test]
    fn test_parse_error_propagates() {
        let parser = |_: &str| -> TemplateResult<Document> { Err(TemplateError::parse("eof")) };
        let err = render_with(&parser, "div {", &RenderConfig::PRETTY).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_template_is_send_sync() {
        static_assertions::assert_impl_all!(KdlTemplate: Send, Sync);
    }
}
