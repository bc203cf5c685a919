//! The seva catalog: read-only listing data loaded at startup.

use std::collections::HashMap;
use std::path::Path;

use seva_core::Seva;

/// Bundled seed data, used when no `SEVA_CATALOG_PATH` override is set.
const SEED_JSON: &str = include_str!("../../data/sevas.json");

/// Errors loading the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate seva code in catalog: {0}")]
    DuplicateCode(String),
}

/// Read-only catalog of offerings, indexed by code.
#[derive(Debug)]
pub struct SevaCatalog {
    sevas: Vec<Seva>,
    by_code: HashMap<String, usize>,
}

impl SevaCatalog {
    /// Build a catalog from records.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateCode` if two sevas share a code.
    pub fn from_sevas(sevas: Vec<Seva>) -> Result<Self, CatalogError> {
        let mut by_code = HashMap::with_capacity(sevas.len());
        for (index, seva) in sevas.iter().enumerate() {
            if by_code.insert(seva.code.clone(), index).is_some() {
                return Err(CatalogError::DuplicateCode(seva.code.clone()));
            }
        }
        Ok(Self { sevas, by_code })
    }

    /// Parse a catalog from a JSON array of sevas.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on malformed JSON or duplicate codes.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::from_sevas(serde_json::from_str(json)?)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// The bundled seed catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` only if the bundled data is malformed, which
    /// the tests guard against.
    pub fn seed() -> Result<Self, CatalogError> {
        Self::from_json(SEED_JSON)
    }

    /// All sevas, in catalog order.
    #[must_use]
    pub fn list(&self) -> &[Seva] {
        &self.sevas
    }

    /// Look up a seva by its unique code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Seva> {
        self.by_code.get(code).map(|&i| &self.sevas[i])
    }

    /// Number of sevas in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sevas.len()
    }

    /// Whether the catalog holds no sevas.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sevas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_catalog_parses_and_is_nonempty() {
        let catalog = SevaCatalog::seed().expect("bundled seed must parse");
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_get_by_code() {
        let catalog = SevaCatalog::seed().expect("seed");
        let first = &catalog.list()[0];
        let found = catalog.get(&first.code).expect("lookup by code");
        assert_eq!(found.id, first.id);
        assert!(catalog.get("no-such-seva").is_none());
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let catalog = SevaCatalog::seed().expect("seed");
        let mut sevas = catalog.list().to_vec();
        sevas.push(sevas[0].clone());
        let err = SevaCatalog::from_sevas(sevas).expect_err("duplicate code");
        assert!(matches!(err, CatalogError::DuplicateCode(_)));
    }
}
