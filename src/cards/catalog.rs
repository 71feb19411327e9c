//! Static item catalog.
//!
//! The `Catalog` is the ordered list of item definitions a game deals
//! from. Order matters: a game with `pair_count = n` uses the first `n`
//! entries. Lookup by `ItemId` is backed by an index map.

use rustc_hash::FxHashMap;
use serde::Deserialize;

use super::definition::{ItemDefinition, ItemId};
use crate::core::ConfigError;

/// Built-in space objects: (id, image, alt).
const SPACE_ITEMS: &[(u32, &str, &str)] = &[
    (1, "/images/sun.png", "Sun"),
    (2, "/images/moon.png", "Moon"),
    (3, "/images/earth.png", "Earth"),
    (4, "/images/mars.png", "Mars"),
    (5, "/images/saturn.png", "Saturn"),
    (6, "/images/rocket.png", "Rocket"),
    (7, "/images/astronaut.png", "Astronaut"),
    (8, "/images/comet.png", "Comet"),
    (9, "/images/galaxy.png", "Galaxy"),
    (10, "/images/satellite.png", "Satellite"),
    (11, "/images/telescope.png", "Telescope"),
    (12, "/images/ufo.png", "UFO"),
];

/// JSON catalog file: `{ "cards": [ { "id", "src", "alt" }, ... ] }`.
#[derive(Deserialize)]
struct CatalogFile {
    cards: Vec<ItemDefinition>,
}

/// Ordered catalog of item definitions.
///
/// ## Example
///
/// ```
/// use space_memory::cards::{Catalog, ItemDefinition, ItemId};
///
/// let mut catalog = Catalog::new();
/// catalog.register(ItemDefinition::new(ItemId::new(1), "/img/a.png", "A"));
/// catalog.register(ItemDefinition::new(ItemId::new(2), "/img/b.png", "B"));
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.get(ItemId::new(2)).unwrap().alt, "B");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    items: Vec<ItemDefinition>,
    index: FxHashMap<ItemId, usize>,
}

impl Catalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in catalog of space objects.
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for &(id, src, alt) in SPACE_ITEMS {
            catalog.register(ItemDefinition::new(ItemId::new(id), src, alt));
        }
        catalog
    }

    /// Build a catalog from definitions, rejecting duplicate ids.
    pub fn from_items(items: impl IntoIterator<Item = ItemDefinition>) -> Result<Self, ConfigError> {
        let mut catalog = Self::new();
        for item in items {
            catalog.try_register(item)?;
        }
        Ok(catalog)
    }

    /// Parse a catalog from its JSON file format.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_items(file.cards)
    }

    /// Append an item definition.
    ///
    /// Panics if an item with the same ID already exists.
    pub fn register(&mut self, item: ItemDefinition) {
        if let Err(err) = self.try_register(item) {
            panic!("{}", err);
        }
    }

    /// Append an item definition, returning an error on a duplicate id.
    pub fn try_register(&mut self, item: ItemDefinition) -> Result<(), ConfigError> {
        if self.index.contains_key(&item.id) {
            return Err(ConfigError::DuplicateItem(item.id));
        }
        self.index.insert(item.id, self.items.len());
        self.items.push(item);
        Ok(())
    }

    /// Get an item definition by ID.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&ItemDefinition> {
        self.index.get(&id).map(|&i| &self.items[i])
    }

    /// The first `n` items in catalog order (fewer if the catalog is short).
    #[must_use]
    pub fn first(&self, n: usize) -> &[ItemDefinition] {
        &self.items[..n.min(self.items.len())]
    }

    /// Get the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over items in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.items.iter()
    }
}
