//! Document type and related utilities
//!
//! The top-level container handed to the renderer, with traversal helpers.

use super::{Node, NodeKind};

// =============================================================================
// Document
// =============================================================================

/// Root document container: the ordered top-level nodes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Document {
    /// Create a document from top-level nodes
    pub fn new(nodes: impl IntoIterator<Item = Node>) -> Self {
        Self {
            nodes: nodes.into_iter().collect(),
        }
    }

    /// Check if document has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of top-level nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over all nodes (depth-first, document order)
    pub fn iter_nodes(&self) -> NodeIterator<'_> {
        NodeIterator::new(&self.nodes)
    }

    /// Find first node matching predicate (depth-first search)
    pub fn find_node<F>(&self, predicate: F) -> Option<&Node>
    where
        F: Fn(&Node) -> bool,
    {
        self.iter_nodes().find(|node| predicate(*node))
    }

    /// Collect statistics about the document
    pub fn collect_stats(&self) -> Stats {
        let mut stats = Stats::default();
        for node in &self.nodes {
            Self::collect_stats_recursive(node, 1, &mut stats);
        }
        stats
    }

    fn collect_stats_recursive(node: &Node, depth: usize, stats: &mut Stats) {
        stats.max_depth = stats.max_depth.max(depth);

        match node.kind() {
            NodeKind::Doctype => stats.doctype_count += 1,
            NodeKind::RawText => stats.text_count += 1,
            NodeKind::Element => stats.element_count += 1,
        }

        for child in &node.children {
            Self::collect_stats_recursive(child, depth + 1, stats);
        }
    }
}

impl From<Vec<Node>> for Document {
    fn from(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }
}

// =============================================================================
// NodeIterator - depth-first traversal
// =============================================================================

/// Depth-first iterator over nodes
pub struct NodeIterator<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> NodeIterator<'a> {
    fn new(roots: &'a [Node]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for NodeIterator<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children in reverse order so they're visited left-to-right
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

// =============================================================================
// Stats - document statistics
// =============================================================================

/// Document statistics collected from traversal
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    pub element_count: usize,
    pub text_count: usize,
    pub doctype_count: usize,
    /// Deepest nesting level; top-level nodes are at depth 1
    pub max_depth: usize,
}

impl Stats {
    /// Total number of nodes of any kind
    pub fn node_count(&self) -> usize {
        self.element_count + self.text_count + self.doctype_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document::new([
            Node::doctype("html"),
            Node::new("html").child(
                Node::new("body")
                    .child(Node::new("p").child(Node::text("hi")))
                    .child(Node::new("br")),
            ),
        ])
    }

    #[test]
    fn test_iter_nodes_document_order() {
        let doc = sample();
        let names: Vec<&str> = doc.iter_nodes().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["!doctype", "html", "body", "p", "-", "br"]);
    }

    #[test]
    fn test_find_node() {
        let doc = sample();
        let found = doc.find_node(|n| n.is_raw_text());
        assert_eq!(found.map(|n| n.args_text()), Some("hi".to_string()));
        assert!(doc.find_node(|n| n.name == "table").is_none());
    }

    #[test]
    fn test_collect_stats() {
        let stats = sample().collect_stats();
        assert_eq!(stats.doctype_count, 1);
        assert_eq!(stats.element_count, 4);
        assert_eq!(stats.text_count, 1);
        assert_eq!(stats.max_depth, 4);
        assert_eq!(stats.node_count(), 6);
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::default();
        assert!(doc.is_empty());
        assert_eq!(doc.iter_nodes().count(), 0);
        assert_eq!(doc.collect_stats(), Stats::default());
    }
}
