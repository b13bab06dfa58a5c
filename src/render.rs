//! HTML rendering for markup documents
//!
//! Walks a [`Document`] and serializes it to HTML text.
//!
//! # Design
//!
//! - Simple recursive traversal writing into one `String` buffer
//! - Only attribute values are escaped, and only `"` → `&quot;`
//! - Void elements (br, img, etc.) self-close when they have no content
//! - `-` raw-text nodes are inline content of their parent
//!
//! # Pretty mode
//!
//! Each element ends with a newline. An element with at least one
//! structural (non raw-text) child puts a newline before every structural
//! child and closes on its own line:
//!
//! ```text
//! <div>
//!     <p>Hello</p>
//!
//! </div>
//! ```
//!
//! An element whose children are all raw text stays on one line.

use std::borrow::Cow;

use crate::node::{Document, Node, NodeKind};
use crate::value::Value;

// =============================================================================
// RenderConfig
// =============================================================================

/// Default indent unit: four spaces per nesting level.
pub const DEFAULT_INDENT: &str = "    ";

/// Configuration for HTML rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderConfig {
    /// Whether to indent and break lines (false = compact output).
    pub pretty: bool,
    /// Indent string for one nesting level (only used when pretty).
    pub indent: Cow<'static, str>,
}

impl RenderConfig {
    /// Indented output with the default indent unit.
    pub const PRETTY: Self = Self {
        pretty: true,
        indent: Cow::Borrowed(DEFAULT_INDENT),
    };

    /// Compact output: no newlines, no indentation.
    pub const COMPACT: Self = Self {
        pretty: false,
        indent: Cow::Borrowed(DEFAULT_INDENT),
    };

    /// Create a new config.
    pub fn new(pretty: bool) -> Self {
        if pretty { Self::PRETTY } else { Self::COMPACT }
    }

    /// Set a custom indent unit.
    pub fn with_indent(mut self, indent: impl Into<Cow<'static, str>>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Get the indent unit.
    pub fn indent(&self) -> &str {
        &self.indent
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::PRETTY
    }
}

// =============================================================================
// HtmlRenderer
// =============================================================================

/// HTML Renderer - converts a markup document to an HTML string
pub struct HtmlRenderer {
    config: RenderConfig,
    /// Output buffer
    buffer: String,
}

impl HtmlRenderer {
    /// Create a new renderer with default config
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    /// Create a new renderer with custom config
    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            config,
            buffer: String::with_capacity(4 * 1024),
        }
    }

    /// Render every top-level node, in order, with no separators
    pub fn render(mut self, doc: &Document) -> String {
        for node in &doc.nodes {
            self.render_node(node, 0);
        }
        self.buffer
    }

    /// Render a single node at the given nesting depth
    pub fn render_at(mut self, node: &Node, depth: usize) -> String {
        self.render_node(node, depth);
        self.buffer
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal rendering methods
    // ─────────────────────────────────────────────────────────────────────────

    fn render_node(&mut self, node: &Node, depth: usize) {
        match node.kind() {
            NodeKind::Doctype => self.render_doctype(node, depth),
            NodeKind::RawText => self.write_args(node),
            NodeKind::Element => self.render_element(node, depth),
        }
    }

    fn render_doctype(&mut self, node: &Node, depth: usize) {
        self.write_indent(depth);
        self.buffer.push_str("<!DOCTYPE ");
        match node.args.first() {
            Some(value) => self.write_value(value),
            None => self.buffer.push_str("html"),
        }
        self.buffer.push('>');
        self.write_newline();
    }

    fn render_element(&mut self, node: &Node, depth: usize) {
        // Opening tag
        self.write_indent(depth);
        self.buffer.push('<');
        self.buffer.push_str(&node.name);

        // Attributes
        for (name, value) in &node.props {
            match value {
                Value::Bool(true) => {
                    self.buffer.push(' ');
                    self.buffer.push_str(name);
                }
                Value::Bool(false) => {}
                other => {
                    self.buffer.push(' ');
                    self.buffer.push_str(name);
                    self.buffer.push_str("=\"");
                    self.write_attr_escaped(&other.to_string());
                    self.buffer.push('"');
                }
            }
        }

        // Void elements (self-closing) only when there is nothing inside
        if is_void_element(&node.name) && !node.has_args() && !node.has_children() {
            self.buffer.push_str(" />");
            self.write_newline();
            return;
        }

        self.buffer.push('>');

        // Arguments are inline text content
        self.write_args(node);

        // Children
        let structured = self.config.pretty && node.has_structural_children();
        for child in &node.children {
            if structured && !child.is_raw_text() {
                self.write_newline();
            }
            self.render_node(child, depth + 1);
        }

        // Closing tag
        if structured {
            self.write_newline();
            self.write_indent(depth);
        }
        self.buffer.push_str("</");
        self.buffer.push_str(&node.name);
        self.buffer.push('>');
        self.write_newline();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Write helpers
    // ─────────────────────────────────────────────────────────────────────────

    #[inline]
    fn write_newline(&mut self) {
        if self.config.pretty {
            self.buffer.push('\n');
        }
    }

    #[inline]
    fn write_indent(&mut self, depth: usize) {
        if self.config.pretty {
            for _ in 0..depth {
                self.buffer.push_str(&self.config.indent);
            }
        }
    }

    /// Arguments joined by a single space
    fn write_args(&mut self, node: &Node) {
        for (i, arg) in node.args.iter().enumerate() {
            if i > 0 {
                self.buffer.push(' ');
            }
            self.write_value(arg);
        }
    }

    fn write_value(&mut self, value: &Value) {
        match value {
            Value::String(s) => self.buffer.push_str(s),
            other => self.buffer.push_str(&other.to_string()),
        }
    }

    fn write_attr_escaped(&mut self, s: &str) {
        for c in s.chars() {
            match c {
                '"' => self.buffer.push_str("&quot;"),
                _ => self.buffer.push(c),
            }
        }
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Convenience functions
// =============================================================================

/// Render a document to an HTML string.
pub fn render_document(doc: &Document, config: &RenderConfig) -> String {
    let html = HtmlRenderer::with_config(config.clone()).render(doc);
    tracing::trace!(bytes = html.len(), pretty = config.pretty, "rendered document");
    html
}

/// Render one node at `depth` to an HTML string.
pub fn render_node(node: &Node, depth: usize, config: &RenderConfig) -> String {
    HtmlRenderer::with_config(config.clone()).render_at(node, depth)
}

/// Check if element is a void element (self-closing), ignoring ASCII case.
pub fn is_void_element(tag: &str) -> bool {
    const VOID_ELEMENTS: [&str; 14] = [
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
        "source", "track", "wbr",
    ];
    VOID_ELEMENTS.iter().any(|v| tag.eq_ignore_ascii_case(v))
}

// =============================================================================
// Tests
// =============================================================================
