use std::sync::{Mutex, MutexGuard};

pub mod catalog;
pub mod color;
pub mod config;
pub mod manager;
pub mod selection;
pub mod tone;

pub use catalog::{Catalog, CatalogError};
pub use color::{hsl_distance, Color, ParseColorError};
pub use config::{CatalogFile, CatalogFileError};
pub use manager::{Cursor, PaletteManager};
pub use selection::{interpolate, most_distinct, SelectionError};
pub use tone::TextTone;

/// A [`PaletteManager`] that can be handed to several threads.
pub struct SharedPalette {
    manager: Mutex<PaletteManager>,
}

impl SharedPalette {
    pub fn new(manager: PaletteManager) -> Self {
        Self {
            manager: Mutex::new(manager),
        }
    }

    pub fn get_manager(&self) -> MutexGuard<'_, PaletteManager> {
        self.manager.lock().expect("palette lock poisoned")
    }

    /// Draws the next color while holding the lock for just that call.
    pub fn next_color(&self) -> Color {
        self.get_manager().next_color()
    }

    pub fn into_inner(self) -> PaletteManager {
        self.manager
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for SharedPalette {
    fn default() -> Self {
        Self::new(PaletteManager::new())
    }
}
