//! cuteninja - KDL to HTML templates that keep Jinja directives intact
//!
//! ## Core Concepts
//!
//! **Directive shield**: Jinja syntax (`{{ }}`, `{% %}`, `{# #}`) is swapped
//! for placeholder tokens before the KDL parser sees the source, and put back
//! verbatim once HTML has been rendered.
//!
//! **Renderer**: a parsed node tree is serialized to HTML, pretty or compact,
//! with void-element, raw-text (`-`) and doctype (`!doctype`) handling.
//!
//! ## Modules
//! - `shield`: directive extraction and restoration
//! - `node`: Document/Node model produced by parsers
//! - `parse`: `MarkupParser` trait and the KDL backend
//! - `render`: HTML serialization
//! - `template`: the full pipeline (`KdlTemplate`, `render_kdl`)
//! - `cache`: shared render cache
//!
//! ## Usage
//!
//! ```ignore
//! use cuteninja::render_kdl;
//!
//! let html = render_kdl(r#"p "Hello {{ name }}""#, false)?;
//! assert_eq!(html, "<p>Hello {{ name }}</p>");
//! ```

#[macro_use]
mod macros;

// =============================================================================
// Core modules
// =============================================================================

/// Directive extraction and restoration
pub mod shield;

/// Node types: Document, Node, NodeKind
pub mod node;

/// Argument and property values
pub mod value;

/// Property storage
pub mod attr;

/// Markup parsers
pub mod parse;

/// HTML rendering
pub mod render;

/// Shield → parse → render → restore pipeline
pub mod template;

/// Error types
pub mod error;

/// Deterministic hashing
pub mod hash;

/// Render cache
pub mod cache;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Shield
pub use shield::{DirectiveShield, PlaceholderMap};

// Node types
pub use node::{DOCTYPE_NODE, Document, Node, NodeKind, RAW_TEXT_NODE};

// Values
pub use attr::{Props, PropsExt};
pub use value::Value;

// Parsers
pub use parse::MarkupParser;
#[cfg(feature = "kdl")]
pub use parse::KdlParser;

// Rendering
pub use render::{HtmlRenderer, RenderConfig, render_document, render_node};

// Pipeline
pub use template::{KdlTemplate, render_with};
#[cfg(feature = "kdl")]
pub use template::render_kdl;
#[cfg(feature = "parallel")]
pub use template::render_many;

// Hashing
pub use hash::StableHasher;

// Error types
pub use error::{TemplateError, TemplateResult};

// Cache types
pub use cache::{CacheEntry, CacheKey, SharedTemplateCache, TemplateCache};

// =============================================================================
// Tests
// =============================================================================
