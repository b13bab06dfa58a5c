//! Property storage for markup nodes
//!
//! Properties are kept as a plain `Vec` of pairs so their source order
//! survives into the rendered attribute list.

use compact_str::CompactString;

use crate::value::Value;

/// Node properties as ordered key-value pairs
pub type Props = Vec<(CompactString, Value)>;

/// Extension trait for property operations on Props
pub trait PropsExt {
    /// Get a property value by name
    fn get_prop(&self, name: &str) -> Option<&Value>;

    /// Set a property value (insert or update)
    ///
    /// An existing key keeps its position and takes the new value.
    fn set_prop(&mut self, name: impl Into<CompactString>, value: impl Into<Value>);
}

impl PropsExt for Props {
    fn get_prop(&self, name: &str) -> Option<&Value> {
        self.iter().find(|(k, _)| k.as_str() == name).map(|(_, v)| v)
    }

    fn set_prop(&mut self, name: impl Into<CompactString>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        if let Some(prop) = self.iter_mut().find(|(k, _)| k == &name) {
            prop.1 = value;
        } else {
            self.push((name, value));
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
