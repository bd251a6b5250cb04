//! # Catalog and Loyalty State
//!
//! The fixture providers, shared between commands. Management commands
//! (add-on availability, item status, enrollment) mutate them in place.

use std::sync::{Arc, Mutex, PoisonError};

use brew_fixtures::{InMemoryCatalog, InMemoryLoyalty};

#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Arc<Mutex<InMemoryCatalog>>,
}

impl CatalogState {
    pub fn new(catalog: InMemoryCatalog) -> Self {
        CatalogState {
            catalog: Arc::new(Mutex::new(catalog)),
        }
    }

    pub fn with_catalog<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&InMemoryCatalog) -> R,
    {
        let catalog = self.catalog.lock().unwrap_or_else(PoisonError::into_inner);
        f(&catalog)
    }

    pub fn with_catalog_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut InMemoryCatalog) -> R,
    {
        let mut catalog = self.catalog.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut catalog)
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        CatalogState::new(InMemoryCatalog::seeded())
    }
}

#[derive(Debug, Clone)]
pub struct LoyaltyState {
    loyalty: Arc<Mutex<InMemoryLoyalty>>,
}

impl LoyaltyState {
    pub fn new(loyalty: InMemoryLoyalty) -> Self {
        LoyaltyState {
            loyalty: Arc::new(Mutex::new(loyalty)),
        }
    }

    pub fn with_loyalty<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&InMemoryLoyalty) -> R,
    {
        let loyalty = self.loyalty.lock().unwrap_or_else(PoisonError::into_inner);
        f(&loyalty)
    }

    pub fn with_loyalty_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut InMemoryLoyalty) -> R,
    {
        let mut loyalty = self.loyalty.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut loyalty)
    }
}

impl Default for LoyaltyState {
    fn default() -> Self {
        LoyaltyState::new(InMemoryLoyalty::seeded())
    }
}
