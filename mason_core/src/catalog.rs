//! # Material Catalog Store
//!
//! File-backed persistence for material profiles, keyed by lowercase
//! material name. The catalog is read once at session start and rewritten
//! in full on every mutation:
//!
//! - **Load degrades**: a missing or malformed catalog file yields an empty
//!   catalog (logged at debug), never an error.
//! - **Atomic saves**: write to `.tmp`, fsync, rename - an interrupted save
//!   cannot corrupt the previous catalog.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mason_core::catalog::{seed_defaults, CatalogStore, JsonCatalogStore};
//!
//! let store = JsonCatalogStore::new("materials.json");
//! let mut catalog = store.load();
//! if seed_defaults(&mut catalog) {
//!     store.save(&catalog)?;
//! }
//! # Ok::<(), mason_core::errors::MasonError>(())
//! ```

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{MasonError, MasonResult};
use crate::materials::{builtin_materials, Material};

/// Catalog contents: lowercase name -> material profile.
pub type Catalog = BTreeMap<String, Material>;

/// Persistence seam for the material catalog. Backed by a local JSON file in
/// production; swap in an in-memory implementation for tests.
pub trait CatalogStore {
    /// Load the full catalog. Missing or unreadable backing data yields an
    /// empty catalog.
    fn load(&self) -> Catalog;

    /// Replace the persisted catalog wholesale.
    fn save(&self, catalog: &Catalog) -> MasonResult<()>;
}

/// Catalog store backed by a flat JSON object on disk.
pub struct JsonCatalogStore {
    path: PathBuf,
}

impl JsonCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonCatalogStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogStore for JsonCatalogStore {
    fn load(&self) -> Catalog {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "catalog file not readable, starting empty");
                return Catalog::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(catalog) => catalog,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "catalog file malformed, starting empty");
                Catalog::new()
            }
        }
    }

    fn save(&self, catalog: &Catalog) -> MasonResult<()> {
        let json =
            serde_json::to_string_pretty(catalog).map_err(|e| MasonError::SerializationError {
                reason: e.to_string(),
            })?;

        // Write to a temp file next to the target, then rename into place.
        let tmp_path = self.path.with_extension("json.tmp");

        let mut tmp_file = File::create(&tmp_path).map_err(|e| {
            MasonError::file_error(
                "create temp file",
                tmp_path.display().to_string(),
                e.to_string(),
            )
        })?;

        tmp_file.write_all(json.as_bytes()).map_err(|e| {
            MasonError::file_error(
                "write temp file",
                tmp_path.display().to_string(),
                e.to_string(),
            )
        })?;

        tmp_file.sync_all().map_err(|e| {
            MasonError::file_error(
                "sync temp file",
                tmp_path.display().to_string(),
                e.to_string(),
            )
        })?;

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            MasonError::file_error(
                "rename to final",
                self.path.display().to_string(),
                e.to_string(),
            )
        })?;

        Ok(())
    }
}

/// Seed the built-in materials into an empty catalog. Returns true when
/// seeding happened, so the caller knows to persist.
pub fn seed_defaults(catalog: &mut Catalog) -> bool {
    if !catalog.is_empty() {
        return false;
    }
    catalog.extend(builtin_materials());
    true
}

/// Insert a material under its lowercased name, replacing any previous
/// profile with that name.
pub fn insert_material(catalog: &mut Catalog, material: Material) {
    catalog.insert(material.name.to_lowercase(), material);
}

/// Look up a material by name, case-insensitively.
pub fn find_material<'a>(catalog: &'a Catalog, name: &str) -> Option<&'a Material> {
    catalog.get(&name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_catalog_path(name: &str) -> PathBuf {
        temp_dir().join(format!("mason_test_{}.json", name))
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let store = JsonCatalogStore::new(temp_catalog_path("missing_nonexistent"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_malformed_file_is_empty() {
        let path = temp_catalog_path("malformed");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonCatalogStore::new(&path);
        assert!(store.load().is_empty());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_catalog_path("roundtrip");
        let store = JsonCatalogStore::new(&path);

        let mut catalog = Catalog::new();
        seed_defaults(&mut catalog);
        insert_material(
            &mut catalog,
            Material::new("Gas Block", 0.6, 0.3, 0.2, "GOST 31360-2007", 0.05),
        );
        store.save(&catalog).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, catalog);
        assert_eq!(loaded["gas block"].mortar_rate, 0.05);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let path = temp_catalog_path("atomic");
        let store = JsonCatalogStore::new(&path);

        let mut catalog = Catalog::new();
        seed_defaults(&mut catalog);
        store.save(&catalog).unwrap();

        assert!(!path.with_extension("json.tmp").exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_seed_defaults_only_when_empty() {
        let mut catalog = Catalog::new();
        assert!(seed_defaults(&mut catalog));
        assert_eq!(catalog.len(), 2);

        // Already populated: no reseeding.
        assert!(!seed_defaults(&mut catalog));
    }

    #[test]
    fn test_find_material_is_case_insensitive() {
        let mut catalog = Catalog::new();
        seed_defaults(&mut catalog);
        assert!(find_material(&catalog, "Brick").is_some());
        assert!(find_material(&catalog, "BRICK").is_some());
        assert!(find_material(&catalog, "granite").is_none());
    }
}
