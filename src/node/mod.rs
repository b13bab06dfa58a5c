//! Document model handed from the markup parser to the renderer.
//!
//! A [`Node`] mirrors the KDL object model: a name, ordered positional
//! arguments, ordered properties and ordered children. Two names are
//! special and classified by [`NodeKind`]:
//!
//! - `!doctype` renders as `<!DOCTYPE ...>`
//! - `-` is a raw-text node whose arguments are inline text
//!
//! Trees are built once by a parser and only read afterwards. The builder
//! methods exist so trees can also be assembled by hand.

mod document;

pub use document::{Document, NodeIterator, Stats};

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::attr::{Props, PropsExt};
use crate::value::Value;

/// Node name that marks a doctype declaration.
pub const DOCTYPE_NODE: &str = "!doctype";

/// Node name that marks inline raw text.
pub const RAW_TEXT_NODE: &str = "-";

/// Positional arguments; most nodes carry at most a couple.
pub type Args = SmallVec<[Value; 2]>;

/// Child nodes in document order.
pub type Children = Vec<Node>;

// =============================================================================
// NodeKind
// =============================================================================

/// How the renderer treats a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// `!doctype` declaration
    Doctype,
    /// `-` inline text
    RawText,
    /// Any other name: an HTML element
    Element,
}

impl NodeKind {
    /// Classify a node name
    #[inline]
    pub fn of(name: &str) -> Self {
        match name {
            DOCTYPE_NODE => NodeKind::Doctype,
            RAW_TEXT_NODE => NodeKind::RawText,
            _ => NodeKind::Element,
        }
    }

    impl_kind_predicates!(self; doctype, raw_text, element);
}

// =============================================================================
// Node
// =============================================================================

/// A markup node with arguments, properties and children
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Node name (tag name for elements)
    pub name: CompactString,
    /// Positional arguments
    pub args: Args,
    /// Properties in source order
    pub props: Props,
    /// Child nodes
    pub children: Children,
}

impl Node {
    /// Create a node with no arguments, properties or children
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            args: SmallVec::new(),
            props: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a `!doctype` node
    pub fn doctype(value: impl Into<Value>) -> Self {
        Self::new(DOCTYPE_NODE).arg(value)
    }

    /// Create a `-` raw-text node holding one argument
    pub fn text(content: impl Into<Value>) -> Self {
        Self::new(RAW_TEXT_NODE).arg(content)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a positional argument
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Set a property; a repeated name keeps its first position
    pub fn prop(mut self, name: impl Into<CompactString>, value: impl Into<Value>) -> Self {
        self.props.set_prop(name, value);
        self
    }

    /// Append a child node
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child nodes
    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Classify this node
    #[inline]
    pub fn kind(&self) -> NodeKind {
        NodeKind::of(&self.name)
    }

    impl_kind_predicates!(kind; doctype, raw_text, element);

    /// Check if node has positional arguments
    pub fn has_args(&self) -> bool {
        !self.args.is_empty()
    }

    /// Check if node has children
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Check if any child is something other than inline raw text
    pub fn has_structural_children(&self) -> bool {
        self.children.iter().any(|child| !child.is_raw_text())
    }

    /// Arguments' textual forms joined by a single space
    pub fn args_text(&self) -> String {
        let mut out = String::new();
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(&arg.to_string());
        }
        out
    }
}
