//! Thread-safe handle to a galaxy.
//!
//! [`SharedGalaxy`] wraps a [`Galaxy`] in `Arc<RwLock<_>>`. Every mutation
//! holds the write lock for its whole duration, which covers at least the
//! planet being changed, so readers never see a half-applied ledger or lane
//! update. Route searches hold one read lock across the entire traversal.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rust_decimal::Decimal;
use starmap_types::{FactionId, GalaxySnapshot, ResourceId};

use crate::error::GalaxyError;
use crate::galaxy::Galaxy;
use crate::route::Route;

/// Cloneable, thread-safe handle to one galaxy.
#[derive(Debug, Clone, Default)]
pub struct SharedGalaxy {
    inner: Arc<RwLock<Galaxy>>,
}

impl SharedGalaxy {
    /// Wrap a galaxy for sharing across threads.
    pub fn new(galaxy: Galaxy) -> Self {
        Self {
            inner: Arc::new(RwLock::new(galaxy)),
        }
    }

    /// Run `f` with shared read access.
    ///
    /// # Errors
    ///
    /// Returns [`GalaxyError::LockPoisoned`] if a writer panicked.
    pub fn read<T>(&self, f: impl FnOnce(&Galaxy) -> T) -> Result<T, GalaxyError> {
        let guard = self.read_guard()?;
        Ok(f(&guard))
    }

    /// Run `f` with exclusive write access.
    ///
    /// # Errors
    ///
    /// Returns [`GalaxyError::LockPoisoned`] if a writer panicked.
    pub fn write<T>(&self, f: impl FnOnce(&mut Galaxy) -> T) -> Result<T, GalaxyError> {
        let mut guard = self.write_guard()?;
        Ok(f(&mut guard))
    }

    /// Find a route under a single read lock.
    ///
    /// # Errors
    ///
    /// Returns [`GalaxyError::LockPoisoned`] or any routing error.
    pub fn find_route(&self, from: &str, to: &str) -> Result<Route, GalaxyError> {
        self.read(|g| g.find_route(from, to))?
    }

    /// Add a resource to a planet under the write lock.
    ///
    /// # Errors
    ///
    /// See [`Galaxy::add_resource`].
    pub fn add_resource(
        &self,
        planet: &str,
        resource: impl Into<ResourceId>,
        amount: f64,
    ) -> Result<f64, GalaxyError> {
        self.write(|g| g.add_resource(planet, resource, amount))?
    }

    /// Remove a resource from a planet under the write lock.
    ///
    /// # Errors
    ///
    /// See [`Galaxy::remove_resource`].
    pub fn remove_resource(
        &self,
        planet: &str,
        resource: &str,
        amount: f64,
    ) -> Result<Option<f64>, GalaxyError> {
        self.write(|g| g.remove_resource(planet, resource, amount))?
    }

    /// Give a faction a share of a planet under the write lock.
    ///
    /// # Errors
    ///
    /// See [`Galaxy::add_faction`].
    pub fn add_faction(
        &self,
        planet: &str,
        faction: impl Into<FactionId>,
        fraction: Decimal,
    ) -> Result<bool, GalaxyError> {
        self.write(|g| g.add_faction(planet, faction, fraction))?
    }

    /// Connect two planets under the write lock.
    ///
    /// # Errors
    ///
    /// See [`Galaxy::add_neighbor`].
    pub fn add_neighbor(&self, a: &str, b: &str) -> Result<bool, GalaxyError> {
        self.write(|g| g.add_neighbor(a, b))?
    }

    /// Disconnect two planets under the write lock.
    ///
    /// # Errors
    ///
    /// See [`Galaxy::remove_neighbor`].
    pub fn remove_neighbor(&self, a: &str, b: &str) -> Result<bool, GalaxyError> {
        self.write(|g| g.remove_neighbor(a, b))?
    }

    /// Consistent copy of the whole galaxy.
    ///
    /// # Errors
    ///
    /// Returns [`GalaxyError::LockPoisoned`] if a writer panicked.
    pub fn snapshot(&self) -> Result<GalaxySnapshot, GalaxyError> {
        self.read(Galaxy::snapshot)
    }

    fn read_guard(&self) -> Result<RwLockReadGuard<'_, Galaxy>, GalaxyError> {
        self.inner
            .read()
            .map_err(|e| GalaxyError::LockPoisoned(e.to_string()))
    }

    fn write_guard(&self) -> Result<RwLockWriteGuard<'_, Galaxy>, GalaxyError> {
        self.inner
            .write()
            .map_err(|e| GalaxyError::LockPoisoned(e.to_string()))
    }
}

impl From<Galaxy> for SharedGalaxy {
    fn from(galaxy: Galaxy) -> Self {
        Self::new(galaxy)
    }
}
