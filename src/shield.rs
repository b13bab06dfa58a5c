//! Directive shield: hides Jinja syntax from the markup parser
//!
//! Template directives (`{{ expr }}`, `{% stmt %}`, `{# comment #}`) are not
//! valid KDL. Before parsing, [`DirectiveShield::extract`] swaps each one for
//! a placeholder token; after rendering, [`DirectiveShield::restore`] puts the
//! original text back.
//!
//! # Matching
//!
//! Matching is lexical. Each directive ends at the first closing delimiter
//! of its own kind, so `{{ {'a': {'b': 1}} }}` ends inside the literal. Directives
//! may span lines.
//!
//! # Substitution shape
//!
//! ```text
//! p "Hi {{ name }}"      →  p "Hi __JINJA_0__"
//! {% if user %}          →  - "__JINJA_1__"        (alone on its line)
//! {%\n  if x\n%}         →  - "__JINJA_2__"        (multi-line)
//! ```
//!
//! A directive standing alone on its line, or spanning several lines, is
//! turned into a `-` raw-text node so it stays a valid KDL node between
//! sibling elements.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use rustc_hash::FxHashMap;

use crate::node::RAW_TEXT_NODE;

/// Prefix shared by every placeholder token.
pub const PLACEHOLDER_PREFIX: &str = "__JINJA_";

/// Suffix closing every placeholder token.
pub const PLACEHOLDER_SUFFIX: &str = "__";

static DIRECTIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{\{.*?\}\}|\{%.*?%\}|\{#.*?#\}").unwrap());

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^__JINJA_\d+__$").unwrap());

// =============================================================================
// PlaceholderMap
// =============================================================================

/// Ordered mapping from placeholder token to the directive it replaced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderMap {
    entries: Vec<(String, String)>,
    index: FxHashMap<String, usize>,
}

impl PlaceholderMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a directive under the next token, returning that token
    fn push(&mut self, directive: &str) -> String {
        let token = DirectiveShield::placeholder(self.entries.len());
        self.index.insert(token.clone(), self.entries.len());
        self.entries.push((token.clone(), directive.to_string()));
        token
    }

    /// Number of recorded directives
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no directive was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the directive a token stands for
    pub fn get(&self, token: &str) -> Option<&str> {
        self.index
            .get(token)
            .map(|&i| self.entries[i].1.as_str())
    }

    /// Iterate `(token, directive)` pairs in extraction order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, d)| (t.as_str(), d.as_str()))
    }

    /// Iterate tokens in extraction order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }

    /// Iterate directives in extraction order
    pub fn directives(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, d)| d.as_str())
    }
}

impl<'a> IntoIterator for &'a PlaceholderMap {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

// =============================================================================
// DirectiveShield
// =============================================================================

/// Extracts and restores template directives
///
/// The shield carries no state between calls: every `extract` numbers its
/// placeholders from zero, so one shield can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectiveShield;

impl DirectiveShield {
    /// Create a shield
    pub fn new() -> Self {
        Self
    }

    /// Build the placeholder token for counter value `n`
    pub fn placeholder(n: usize) -> String {
        format!("{PLACEHOLDER_PREFIX}{n}{PLACEHOLDER_SUFFIX}")
    }

    /// Check if `s` is exactly one placeholder token
    pub fn is_placeholder(s: &str) -> bool {
        PLACEHOLDER_RE.is_match(s)
    }

    /// Replace directives in `source` with placeholders
    ///
    /// Returns the cleaned source and the map needed to undo the
    /// substitution. Unbalanced delimiters are left untouched.
    pub fn extract(&self, source: &str) -> (String, PlaceholderMap) {
        let mut map = PlaceholderMap::new();

        let substituted = DIRECTIVE_RE.replace_all(source, |caps: &Captures<'_>| {
            let directive = &caps[0];
            let token = map.push(directive);
            if directive.contains('\n') {
                raw_text_decl(&token)
            } else {
                token
            }
        });

        let cleaned = substituted
            .split('\n')
            .map(rewrite_standalone)
            .collect::<Vec<_>>()
            .join("\n");

        tracing::debug!(directives = map.len(), "extracted template directives");
        (cleaned, map)
    }

    /// Put the original directives back in place of their tokens
    ///
    /// Tokens missing from `markup` are skipped.
    pub fn restore(&self, markup: &str, map: &PlaceholderMap) -> String {
        let mut result = markup.to_string();
        for (token, directive) in map {
            if result.contains(token) {
                result = result.replace(token, directive);
            }
        }
        result
    }
}

/// `- "token"`: a raw-text node carrying the token as its argument.
fn raw_text_decl(token: &str) -> String {
    format!("{RAW_TEXT_NODE} \"{token}\"")
}

/// Turn a line holding nothing but a token into a raw-text node, keeping
/// the width of its leading whitespace.
fn rewrite_standalone(line: &str) -> Cow<'_, str> {
    let trimmed = line.trim();
    if !DirectiveShield::is_placeholder(trimmed) {
        return Cow::Borrowed(line);
    }
    let indent = line.chars().take_while(|c| c.is_whitespace()).count();
    Cow::Owned(format!("{}{}", " ".repeat(indent), raw_text_decl(trimmed)))
}
