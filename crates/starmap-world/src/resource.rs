//! Per-planet resource stocks.
//!
//! A [`ResourceLedger`] maps resource names to non-negative quantities. The
//! unit is whatever the resource uses (kilograms of ore, tonnes of water,
//! litres of fuel); the ledger only guarantees that no quantity is ever
//! negative or non-finite.
//!
//! Every rejected change leaves the ledger exactly as it was.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use starmap_types::{ResourceId, ResourceStock};

use crate::error::GalaxyError;

/// What to do when asked to remove a resource the planet does not stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingResourcePolicy {
    /// Treat the removal as a no-op.
    #[default]
    Ignore,
    /// Fail with [`GalaxyError::ResourceNotPresent`].
    Reject,
}

/// Resource name to quantity mapping for one planet.
///
/// Deserialized ledgers go through [`ResourceLedger::from_stocks`], so a
/// stored negative quantity is rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LedgerRecord")]
pub struct ResourceLedger {
    stocks: BTreeMap<ResourceId, f64>,
}

/// Wire form of a [`ResourceLedger`], validated before use.
#[derive(Deserialize)]
struct LedgerRecord {
    stocks: BTreeMap<ResourceId, f64>,
}

impl TryFrom<LedgerRecord> for ResourceLedger {
    type Error = GalaxyError;

    fn try_from(record: LedgerRecord) -> Result<Self, Self::Error> {
        Self::from_stocks(record.stocks)
    }
}

impl ResourceLedger {
    /// Create an empty ledger.
    pub const fn new() -> Self {
        Self {
            stocks: BTreeMap::new(),
        }
    }

    /// Build a ledger from initial stocks. Repeated names are summed.
    ///
    /// # Errors
    ///
    /// Returns [`GalaxyError::InvalidAmount`] for any negative or non-finite
    /// quantity.
    pub fn from_stocks(
        stocks: impl IntoIterator<Item = (ResourceId, f64)>,
    ) -> Result<Self, GalaxyError> {
        let mut ledger = Self::new();
        for (resource, amount) in stocks {
            ledger.add_resource(resource, amount)?;
        }
        Ok(ledger)
    }

    /// Add `amount` of a resource, creating the entry if absent.
    ///
    /// Returns the new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`GalaxyError::InvalidAmount`] if `amount` is negative or not
    /// finite, or if the sum is not finite.
    pub fn add_resource(
        &mut self,
        resource: impl Into<ResourceId>,
        amount: f64,
    ) -> Result<f64, GalaxyError> {
        let resource = resource.into();
        let current = self.stocks.get(&resource).copied().unwrap_or(0.0);
        validate_amount(&resource, amount, current)?;

        let updated = current + amount;
        if !updated.is_finite() {
            return Err(GalaxyError::InvalidAmount {
                resource,
                amount,
                available: current,
            });
        }
        self.stocks.insert(resource, updated);
        Ok(updated)
    }

    /// Remove `amount` of a resource.
    ///
    /// Returns the remaining quantity, or `None` if the resource is not
    /// stocked here (in which case nothing changes).
    ///
    /// # Errors
    ///
    /// Returns [`GalaxyError::InvalidAmount`] if `amount` is negative or not
    /// finite, or if it exceeds the quantity on hand.
    pub fn remove_resource(
        &mut self,
        resource: &str,
        amount: f64,
    ) -> Result<Option<f64>, GalaxyError> {
        let Some(current) = self.stocks.get_mut(resource) else {
            return Ok(None);
        };
        let available = *current;
        validate_amount(&ResourceId::from(resource), amount, available)?;

        let remaining = available - amount;
        if !available.is_finite() || remaining < 0.0 {
            return Err(GalaxyError::InvalidAmount {
                resource: ResourceId::from(resource),
                amount,
                available,
            });
        }
        *current = remaining;
        Ok(Some(remaining))
    }

    /// Quantity of a resource, or `None` if it is not stocked.
    pub fn quantity(&self, resource: &str) -> Option<f64> {
        self.stocks.get(resource).copied()
    }

    /// Whether the resource has an entry (possibly zero).
    pub fn contains(&self, resource: &str) -> bool {
        self.stocks.contains_key(resource)
    }

    /// Names of all stocked resources, including those at zero.
    pub fn resources(&self) -> impl Iterator<Item = &ResourceId> + Clone {
        self.stocks.keys()
    }

    /// Resource names paired with quantities.
    pub fn iter(&self) -> impl Iterator<Item = (&ResourceId, f64)> {
        self.stocks.iter().map(|(id, qty)| (id, *qty))
    }

    /// Sum of all stocked quantities.
    pub fn total(&self) -> f64 {
        self.stocks.values().sum()
    }

    /// Number of resource entries.
    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    /// Whether the ledger has no entries.
    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    /// Copy the stocks into snapshot form.
    pub fn stocks(&self) -> Vec<ResourceStock> {
        self.stocks
            .iter()
            .map(|(resource, quantity)| ResourceStock {
                resource: resource.clone(),
                quantity: *quantity,
            })
            .collect()
    }
}

fn validate_amount(resource: &ResourceId, amount: f64, available: f64) -> Result<(), GalaxyError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(GalaxyError::InvalidAmount {
            resource: resource.clone(),
            amount,
            available,
        });
    }
    Ok(())
}
