//! Prelude for common imports.
//!
//! ```ignore
//! use cuteninja::prelude::*;
//! ```

// Shield
pub use crate::shield::{DirectiveShield, PlaceholderMap};

// Node types
pub use crate::node::{Document, Node, NodeKind};

// Values
pub use crate::attr::{Props, PropsExt};
pub use crate::value::Value;

// Parsers
pub use crate::parse::MarkupParser;
#[cfg(feature = "kdl")]
pub use crate::parse::KdlParser;

// Render
pub use crate::render::{HtmlRenderer, RenderConfig, render_document};

// Pipeline
pub use crate::template::{KdlTemplate, render_with};
#[cfg(feature = "kdl")]
pub use crate::template::render_kdl;

// Error
pub use crate::error::{TemplateError, TemplateResult};

// Cache
pub use crate::cache::{CacheKey, SharedTemplateCache};
