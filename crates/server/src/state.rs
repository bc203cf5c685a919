//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::store::{CatalogError, OtpLedger, PincodeDirectory, SevaCatalog, UserDirectory};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// process-wide shared resources: the OTP ledger, the user directory, the
/// seva catalog, and the pincode table. The ledger and directory are the
/// resources shared by potentially many concurrent sessions; they are
/// passed here as explicit dependencies rather than ambient globals.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    otp: OtpLedger,
    users: UserDirectory,
    catalog: SevaCatalog,
    pincodes: PincodeDirectory,
}

impl AppState {
    /// Create application state, loading the catalog from the configured
    /// path or falling back to the bundled seed data.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or parsed.
    pub fn new(config: ServerConfig) -> Result<Self, CatalogError> {
        let catalog = match &config.catalog_path {
            Some(path) => SevaCatalog::load(path)?,
            None => SevaCatalog::seed()?,
        };
        Ok(Self::with_catalog(config, catalog))
    }

    /// Create application state with an explicit catalog (used by tests).
    #[must_use]
    pub fn with_catalog(config: ServerConfig, catalog: SevaCatalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                otp: OtpLedger::new(),
                users: UserDirectory::new(),
                catalog,
                pincodes: PincodeDirectory::new(),
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the OTP ledger.
    #[must_use]
    pub fn otp(&self) -> &OtpLedger {
        &self.inner.otp
    }

    /// Get a reference to the user directory.
    #[must_use]
    pub fn users(&self) -> &UserDirectory {
        &self.inner.users
    }

    /// Get a reference to the seva catalog.
    #[must_use]
    pub fn catalog(&self) -> &SevaCatalog {
        &self.inner.catalog
    }

    /// Get a reference to the pincode directory.
    #[must_use]
    pub fn pincodes(&self) -> &PincodeDirectory {
        &self.inner.pincodes
    }
}
