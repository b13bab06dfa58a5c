//! NodeKind predicate macros
//!
//! Uses `paste` internally for identifier concatenation.

/// Generate `is_xxx` predicates for each `NodeKind` variant
///
/// # Generated methods per variant:
/// - `is_xxx(&self) -> bool` - kind check
///
/// On `NodeKind` itself the check is a `matches!`; on any other type the
/// generated method delegates through its `kind()` method.
///
/// # Example
/// ```ignore
/// impl NodeKind {
///     // doctype -> Doctype, raw_text -> RawText
///     impl_kind_predicates!(self; doctype, raw_text, element);
/// }
/// impl Node {
///     impl_kind_predicates!(kind; doctype, raw_text, element);
/// }
/// ```
#[macro_export]
macro_rules! impl_kind_predicates {
    (self; $($variant:ident),* $(,)?) => {
        ::paste::paste! {
            $(
                #[doc = "Check if this is the " [<$variant:camel>] " kind"]
                #[inline]
                pub fn [<is_ $variant>](&self) -> bool {
                    matches!(self, Self::[<$variant:camel>])
                }
            )*
        }
    };
    (kind; $($variant:ident),* $(,)?) => {
        ::paste::paste! {
            $(
                #[doc = "Check if this is a " [<$variant:camel>] " node"]
                #[inline]
                pub fn [<is_ $variant>](&self) -> bool {
                    self.kind().[<is_ $variant>]()
                }
            )*
        }
    };
}
