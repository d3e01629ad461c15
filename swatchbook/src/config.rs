//! Optional catalog file layered over the built-in catalogs.
//!
//! ```json
//! {
//!   "active": "base",
//!   "catalogs": { "brand": ["hsl(210, 40%, 50%)", "hsl(30, 70%, 60%)"] }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use dirs::config_dir;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::{builtin_catalogs, Catalog, CatalogError, DEFAULT_CATALOG};
use crate::manager::PaletteManager;

pub const CATALOGS_PATH_ENV: &str = "SWATCHBOOK_CATALOGS_PATH";

#[derive(Debug, thiserror::Error)]
pub enum CatalogFileError {
    #[error("config directory unavailable")]
    MissingConfigDir,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<String>,
    #[serde(default)]
    pub catalogs: BTreeMap<String, Vec<String>>,
}

impl CatalogFile {
    /// Reads the file at `path`. A missing file is treated as empty.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogFileError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => {
                let file: CatalogFile = serde_json::from_str(&contents)?;
                info!(
                    path = %path.display(),
                    catalogs = file.catalogs.len(),
                    "loaded catalog file"
                );
                Ok(file)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn load() -> Result<Self, CatalogFileError> {
        let path = get_catalogs_path()?;
        Self::load_from_path(path)
    }

    /// Builds a manager from the built-ins plus this file's catalogs. A file
    /// catalog replaces a built-in of the same name.
    pub fn into_manager(self) -> Result<PaletteManager, CatalogFileError> {
        let mut catalogs: BTreeMap<String, Catalog> = builtin_catalogs()
            .into_iter()
            .map(|catalog| (catalog.name().to_string(), catalog))
            .collect();

        for (name, entries) in self.catalogs {
            let catalog = Catalog::parse(name.clone(), entries.as_slice())?;
            catalogs.insert(name, catalog);
        }

        let active = self.active.as_deref().unwrap_or(DEFAULT_CATALOG);
        let manager = PaletteManager::with_catalogs(catalogs.into_values(), active)?;
        Ok(manager)
    }
}

/// Location of the catalog file: `SWATCHBOOK_CATALOGS_PATH` when set,
/// otherwise `<config dir>/swatchbook/catalogs.json`.
pub fn get_catalogs_path() -> Result<PathBuf, CatalogFileError> {
    if let Ok(custom) = env::var(CATALOGS_PATH_ENV) {
        return Ok(PathBuf::from(custom));
    }
    let base = config_dir().ok_or(CatalogFileError::MissingConfigDir)?;
    Ok(base.join("swatchbook").join("catalogs.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BASE, PASTELS};
    use crate::color::Color;
    use tempfile::tempdir;

    #[test]
    fn load_missing_file_returns_default() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("catalogs.json");

        let loaded = CatalogFile::load_from_path(&path).expect("load catalogs");
        assert_eq!(loaded, CatalogFile::default());

        let manager = loaded.into_manager().expect("build manager");
        assert_eq!(manager.active_name(), PASTELS);
        assert_eq!(manager.catalog_names().count(), 2);
    }

    #[test]
    fn file_catalogs_extend_and_override_builtins() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("catalogs.json");
        fs::write(
            &path,
            r#"{
                "active": "brand",
                "catalogs": {
                    "brand": ["hsl(210, 40%, 50%)", "hsl(30, 70%, 60%)"],
                    "base": ["hsl(1, 2%, 3%)"]
                }
            }"#,
        )
        .expect("write catalogs");

        let manager = CatalogFile::load_from_path(&path)
            .expect("load catalogs")
            .into_manager()
            .expect("build manager");

        assert_eq!(manager.active_name(), "brand");
        assert_eq!(
            manager.active_catalog().colors(),
            &[Color::new(210, 40, 50), Color::new(30, 70, 60)]
        );
        let base = manager.catalog(BASE).expect("base catalog");
        assert_eq!(base.colors(), &[Color::new(1, 2, 3)]);
        assert!(manager.catalog(PASTELS).is_some());
    }

    #[test]
    fn empty_file_catalog_is_rejected() {
        let file = CatalogFile {
            active: None,
            catalogs: BTreeMap::from([("void".to_string(), Vec::new())]),
        };

        let err = file.into_manager().expect_err("empty catalog");
        assert!(matches!(
            err,
            CatalogFileError::Catalog(CatalogError::EmptyCatalog { .. })
        ));
    }

    #[test]
    fn unknown_active_catalog_is_rejected() {
        let file = CatalogFile {
            active: Some("missing".to_string()),
            catalogs: BTreeMap::new(),
        };

        let err = file.into_manager().expect_err("unknown active");
        assert_eq!(err.to_string(), "catalog \"missing\" does not exist");
    }

    #[test]
    fn malformed_json_is_reported() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("catalogs.json");
        fs::write(&path, "{ not json").expect("write catalogs");

        let err = CatalogFile::load_from_path(&path).expect_err("bad json");
        assert!(matches!(err, CatalogFileError::Serde(_)));
    }

    #[test]
    fn missing_config_dir_error_message() {
        let message = CatalogFileError::MissingConfigDir.to_string();
        assert_eq!(message, "config directory unavailable");
    }
}
