//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**: two drafts with the same fields are the
//! same draft. Entities (statements, transactions) are compared by id.

/// Marker trait for value objects.
///
/// Drafts, patches and report rows are value objects. They are immutable once
/// built; to "modify" one, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct CategoryTotal {
///     category: String,
///     credits: Decimal,
/// }
///
/// impl ValueObject for CategoryTotal {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
