//! Item definitions - static catalog data.
//!
//! An `ItemDefinition` describes one picture that can appear on the board:
//! its id, image source, and alt text. Each dealt item becomes two cards.
//! Per-card state (face-up, matched) lives in `Card`.

use serde::{Deserialize, Serialize};

/// Unique identifier for a catalog item.
///
/// Two cards match exactly when they carry the same `ItemId`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl ItemId {
    /// Create a new item ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Item({})", self.0)
    }
}

/// Static item definition.
///
/// Field names follow the JSON catalog format (`id`, `src`, `alt`).
///
/// ```
/// use space_memory::cards::{ItemDefinition, ItemId};
///
/// let sun = ItemDefinition::new(ItemId::new(1), "/images/sun.png", "Sun");
/// assert_eq!(sun.alt, "Sun");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Unique identifier.
    pub id: ItemId,

    /// Image URI or path.
    pub src: String,

    /// Alt text, also used for accessibility labels.
    pub alt: String,
}

impl ItemDefinition {
    /// Create a new item definition.
    pub fn new(id: ItemId, src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            id,
            src: src.into(),
            alt: alt.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_display() {
        assert_eq!(ItemId::new(4).to_string(), "Item(4)");
        assert_eq!(ItemId::new(4).raw(), 4);
    }

    #[test]
    fn test_definition_json_shape() {
        let def: ItemDefinition =
            serde_json::from_str(r#"{ "id": 3, "src": "/images/mars.png", "alt": "Mars" }"#).unwrap();
        assert_eq!(def, ItemDefinition::new(ItemId::new(3), "/images/mars.png", "Mars"));
    }
}
