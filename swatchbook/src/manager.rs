use std::collections::BTreeMap;

use tracing::warn;

use crate::catalog::{builtin_catalogs, Catalog, CatalogError, DEFAULT_CATALOG};
use crate::color::Color;
use crate::selection::{self, SelectionError};

/// Round-robin read position into the active catalog.
///
/// `position` grows without bound; the catalog index is taken modulo the
/// catalog length when a color is read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    active: String,
    position: usize,
}

impl Cursor {
    pub fn new(active: impl Into<String>) -> Self {
        Self {
            active: active.into(),
            position: 0,
        }
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn reset(&mut self, index: usize) {
        self.position = index;
    }

    /// Points at a different catalog and rewinds to its first color.
    pub fn retarget(&mut self, name: impl Into<String>) {
        self.active = name.into();
        self.position = 0;
    }

    /// Returns the color under the cursor and steps forward.
    pub fn advance(&mut self, catalog: &Catalog) -> Color {
        let color = catalog.color_at(self.position);
        self.position = self.position.wrapping_add(1);
        color
    }
}

/// Holds the named catalogs and the cursor over the active one.
#[derive(Clone, Debug)]
pub struct PaletteManager {
    catalogs: BTreeMap<String, Catalog>,
    cursor: Cursor,
}

impl PaletteManager {
    /// Manager over the built-in catalogs with [`DEFAULT_CATALOG`] active.
    pub fn new() -> Self {
        let catalogs = builtin_catalogs()
            .into_iter()
            .map(|catalog| (catalog.name().to_string(), catalog))
            .collect();

        Self {
            catalogs,
            cursor: Cursor::new(DEFAULT_CATALOG),
        }
    }

    /// Manager over an explicit catalog set. `active` must name one of them.
    pub fn with_catalogs<I>(catalogs: I, active: &str) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = Catalog>,
    {
        let catalogs: BTreeMap<String, Catalog> = catalogs
            .into_iter()
            .map(|catalog| (catalog.name().to_string(), catalog))
            .collect();

        if !catalogs.contains_key(active) {
            return Err(CatalogError::UnknownCatalog {
                name: active.to_string(),
            });
        }

        Ok(Self {
            catalogs,
            cursor: Cursor::new(active),
        })
    }

    /// Makes `name` the active catalog and rewinds the cursor. Unknown names
    /// are logged and leave the manager untouched.
    pub fn switch_catalog(&mut self, name: &str) {
        if self.catalogs.contains_key(name) {
            self.cursor.retarget(name);
        } else {
            warn!(catalog = name, "color catalog does not exist");
        }
    }

    pub fn next_color(&mut self) -> Color {
        let catalog = &self.catalogs[self.cursor.active()];
        self.cursor.advance(catalog)
    }

    /// Sets the raw cursor position; no bounds check is applied.
    pub fn reset_cursor(&mut self, index: usize) {
        self.cursor.reset(index);
    }

    pub fn most_distinct_colors(&self, count: usize) -> Result<Vec<Color>, SelectionError> {
        selection::most_distinct(self.active_catalog().colors(), count)
    }

    pub fn active_name(&self) -> &str {
        self.cursor.active()
    }

    pub fn active_catalog(&self) -> &Catalog {
        &self.catalogs[self.cursor.active()]
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn catalog(&self, name: &str) -> Option<&Catalog> {
        self.catalogs.get(name)
    }

    pub fn catalog_names(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }

    pub fn catalogs(&self) -> impl Iterator<Item = &Catalog> {
        self.catalogs.values()
    }
}

impl Default for PaletteManager {
    fn default() -> Self {
        Self::new()
    }
}
