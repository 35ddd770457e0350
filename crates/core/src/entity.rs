//! Entity traits: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// A named, activatable catalog entry (ingredient, category, menu item).
///
/// Catalog names are unique per kind under case-insensitive comparison; stores
/// use [`CatalogEntity::name_key`] as the uniqueness key.
pub trait CatalogEntity: Entity {
    /// Human-readable kind, used in error messages ("ingredient", ...).
    const KIND: &'static str;

    fn name(&self) -> &str;

    fn is_active(&self) -> bool;

    /// Normalised uniqueness key for the entity name.
    fn name_key(&self) -> String {
        name_key(self.name())
    }
}

/// Case-insensitive comparison key for a catalog name.
///
/// Surrounding whitespace is not significant.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
