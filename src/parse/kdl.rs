//! Conversion from the `kdl` crate's document to our document model
//!
//! This module bridges `kdl::KdlDocument` to [`Document`]. Parsing is done
//! entirely by the `kdl` crate; we only map its object model:
//!
//! - entries without a name become positional arguments, in order
//! - named entries become properties; a repeated name keeps its first
//!   position and takes the last value
//! - children blocks become child nodes (an empty `{}` is no children)
//! - type annotations are dropped
//!
//! # Flow
//!
//! ```text
//! cleaned source
//!         │
//!         ▼ KdlDocument::from_str
//! kdl::KdlDocument
//!         │
//!         ▼ KdlParser::convert_document
//! Document
//! ```

use ::kdl::{KdlDocument, KdlError, KdlNode, KdlValue};

use crate::attr::PropsExt;
use crate::error::{TemplateError, TemplateResult};
use crate::node::{Document, Node};
use crate::value::Value;

use super::MarkupParser;

// =============================================================================
// KdlParser
// =============================================================================

/// [`MarkupParser`] backed by the `kdl` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct KdlParser;

impl KdlParser {
    /// Create a parser
    pub fn new() -> Self {
        Self
    }

    /// Convert a parsed KDL document
    pub fn convert_document(&self, doc: &KdlDocument) -> Document {
        Document::new(doc.nodes().iter().map(|node| self.convert_node(node)))
    }

    /// Convert one KDL node and, recursively, its children
    fn convert_node(&self, node: &KdlNode) -> Node {
        let mut out = Node::new(node.name().value());

        for entry in node.entries() {
            let value = convert_value(entry.value());
            match entry.name() {
                Some(name) => out.props.set_prop(name.value(), value),
                None => out.args.push(value),
            }
        }

        if let Some(children) = node.children() {
            out.children = children
                .nodes()
                .iter()
                .map(|child| self.convert_node(child))
                .collect();
        }

        out
    }
}

impl MarkupParser for KdlParser {
    fn parse(&self, source: &str) -> TemplateResult<Document> {
        let doc: KdlDocument = source.parse().map_err(|err: KdlError| {
            tracing::debug!(error = %err, "KDL parse failed");
            TemplateError::from(err)
        })?;
        Ok(self.convert_document(&doc))
    }
}

fn convert_value(value: &KdlValue) -> Value {
    match value {
        KdlValue::String(s) => Value::from(s.as_str()),
        KdlValue::Integer(i) => Value::Integer(*i),
        KdlValue::Float(x) => Value::Float(*x),
        KdlValue::Bool(b) => Value::Bool(*b),
        KdlValue::Null => Value::Null,
    }
}
