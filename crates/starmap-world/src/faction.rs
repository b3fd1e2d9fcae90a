//! Per-planet faction control.
//!
//! A [`FactionControl`] maps factions to the fraction of a planet they
//! control. Fractions are exact decimals so that a fully apportioned planet
//! sums to exactly one.
//!
//! # Policy
//!
//! - Every fraction lies in `[0, 1]`.
//! - The total never exceeds `1`. A total below `1` means the planet is only
//!   partially apportioned; the remainder is [`FactionControl::unclaimed`].
//! - Adding or removing a faction never rescales the others. Callers that
//!   want a fully apportioned planet afterwards call
//!   [`FactionControl::renormalize`] explicitly.
//! - Conflict outcomes move control with [`FactionControl::transfer_control`],
//!   which preserves the total.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use starmap_types::{FactionId, FactionShare};

use crate::error::GalaxyError;

/// Strict majority needed to count as the controlling faction.
const MAJORITY: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Faction to control-fraction mapping for one planet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ControlRecord")]
pub struct FactionControl {
    shares: BTreeMap<FactionId, Decimal>,
}

/// Wire form of a [`FactionControl`], validated before use.
#[derive(Deserialize)]
struct ControlRecord {
    shares: BTreeMap<FactionId, Decimal>,
}

impl TryFrom<ControlRecord> for FactionControl {
    type Error = GalaxyError;

    fn try_from(record: ControlRecord) -> Result<Self, Self::Error> {
        Self::from_shares(record.shares)
    }
}

impl FactionControl {
    /// Create an empty control table.
    pub const fn new() -> Self {
        Self {
            shares: BTreeMap::new(),
        }
    }

    /// Build a control table from initial shares.
    ///
    /// # Errors
    ///
    /// Returns [`GalaxyError::DuplicateFaction`] if a faction repeats, or any
    /// error [`add_faction`](Self::add_faction) can return.
    pub fn from_shares(
        shares: impl IntoIterator<Item = (FactionId, Decimal)>,
    ) -> Result<Self, GalaxyError> {
        let mut control = Self::new();
        for (faction, fraction) in shares {
            if !control.add_faction(faction.clone(), fraction)? {
                return Err(GalaxyError::DuplicateFaction(faction));
            }
        }
        Ok(control)
    }

    /// Give a faction a share of control.
    ///
    /// Returns `Ok(false)` and changes nothing if the faction already holds a
    /// share. Other factions' shares are never adjusted.
    ///
    /// # Errors
    ///
    /// Returns [`GalaxyError::InvalidFraction`] if `fraction` is outside
    /// `[0, 1]`, or [`GalaxyError::ControlOverflow`] if the total would
    /// exceed `1`.
    pub fn add_faction(&mut self, faction: FactionId, fraction: Decimal) -> Result<bool, GalaxyError> {
        if self.shares.contains_key(&faction) {
            return Ok(false);
        }
        if fraction < Decimal::ZERO || fraction > Decimal::ONE {
            return Err(GalaxyError::InvalidFraction { faction, fraction });
        }
        let total = self
            .total()
            .checked_add(fraction)
            .ok_or(GalaxyError::ArithmeticOverflow)?;
        if total > Decimal::ONE {
            return Err(GalaxyError::ControlOverflow { faction, total });
        }
        self.shares.insert(faction, fraction);
        Ok(true)
    }

    /// Remove a faction's share. Returns `false` if it held none.
    ///
    /// The freed share becomes unclaimed.
    pub fn remove_faction(&mut self, faction: &str) -> bool {
        self.shares.remove(faction).is_some()
    }

    /// Move `amount` of control from one faction to another.
    ///
    /// The receiving faction is added if absent; the giving faction is
    /// dropped once its share reaches zero. The total is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`GalaxyError::InvalidFraction`] if `amount` is outside
    /// `[0, 1]`, [`GalaxyError::UnknownFaction`] if `from` holds nothing, or
    /// [`GalaxyError::InsufficientControl`] if `from` holds less than `amount`.
    pub fn transfer_control(
        &mut self,
        from: &FactionId,
        to: FactionId,
        amount: Decimal,
    ) -> Result<(), GalaxyError> {
        if amount < Decimal::ZERO || amount > Decimal::ONE {
            return Err(GalaxyError::InvalidFraction {
                faction: to,
                fraction: amount,
            });
        }
        let held = self
            .fraction(from.as_str())
            .ok_or_else(|| GalaxyError::UnknownFaction(from.clone()))?;
        if amount > held {
            return Err(GalaxyError::InsufficientControl {
                faction: from.clone(),
                requested: amount,
                held,
            });
        }
        if *from == to {
            return Ok(());
        }

        let received = self
            .fraction(to.as_str())
            .unwrap_or(Decimal::ZERO)
            .checked_add(amount)
            .ok_or(GalaxyError::ArithmeticOverflow)?;
        let kept = held
            .checked_sub(amount)
            .ok_or(GalaxyError::ArithmeticOverflow)?;

        if kept.is_zero() {
            self.shares.remove(from);
        } else {
            self.shares.insert(from.clone(), kept);
        }
        self.shares.insert(to, received);
        Ok(())
    }

    /// Scale every share so the total is exactly `1`.
    ///
    /// Returns `false` (and changes nothing) for an empty table, a table whose
    /// total is zero, or one that is already fully apportioned. Rounding
    /// residue from the division is given to the largest share.
    pub fn renormalize(&mut self) -> bool {
        let total = self.total();
        if total.is_zero() || total == Decimal::ONE {
            return false;
        }

        let mut scaled: BTreeMap<FactionId, Decimal> = BTreeMap::new();
        let mut scaled_total = Decimal::ZERO;
        for (faction, fraction) in &self.shares {
            let Some(share) = fraction.checked_div(total) else {
                return false;
            };
            scaled_total = scaled_total.saturating_add(share);
            scaled.insert(faction.clone(), share);
        }

        let residue = Decimal::ONE.saturating_sub(scaled_total);
        if !residue.is_zero() {
            let largest = scaled
                .iter()
                .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
                .map(|(faction, _)| faction.clone());
            if let Some(share) = largest.and_then(|f| scaled.get_mut(&f)) {
                *share = share.saturating_add(residue);
            }
        }

        self.shares = scaled;
        true
    }

    /// Control fraction held by a faction, or `None` if it holds no share.
    pub fn fraction(&self, faction: &str) -> Option<Decimal> {
        self.shares.get(faction).copied()
    }

    /// Whether the faction holds a share (possibly zero).
    pub fn contains(&self, faction: &str) -> bool {
        self.shares.contains_key(faction)
    }

    /// Factions holding a share, in name order.
    pub fn factions(&self) -> impl Iterator<Item = &FactionId> + Clone {
        self.shares.keys()
    }

    /// Factions paired with their fractions.
    pub fn iter(&self) -> impl Iterator<Item = (&FactionId, Decimal)> {
        self.shares.iter().map(|(f, d)| (f, *d))
    }

    /// Number of factions holding a share.
    pub fn len(&self) -> usize {
        self.shares.len()
    }

    /// Whether no faction holds a share.
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    /// Sum of all shares.
    pub fn total(&self) -> Decimal {
        self.shares
            .values()
            .fold(Decimal::ZERO, |acc, f| acc.saturating_add(*f))
    }

    /// Share not held by any faction.
    pub fn unclaimed(&self) -> Decimal {
        Decimal::ONE.saturating_sub(self.total()).max(Decimal::ZERO)
    }

    /// Whether the shares sum to exactly `1`.
    pub fn is_fully_apportioned(&self) -> bool {
        self.total() == Decimal::ONE
    }

    /// The faction holding a strict majority, if any.
    pub fn controlling_faction(&self) -> Option<&FactionId> {
        self.shares
            .iter()
            .find(|(_, fraction)| **fraction > MAJORITY)
            .map(|(faction, _)| faction)
    }

    /// Copy the shares into snapshot form.
    pub fn shares(&self) -> Vec<FactionShare> {
        self.shares
            .iter()
            .map(|(faction, fraction)| FactionShare {
                faction: faction.clone(),
                fraction: *fraction,
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn terran() -> FactionId {
        FactionId::new("Terran Union")
    }

    fn martian() -> FactionId {
        FactionId::new("Martian Republic")
    }

    fn belter() -> FactionId {
        FactionId::new("Belt Syndicate")
    }

    #[test]
    fn add_is_idempotent() {
        let mut control = FactionControl::new();
        assert_eq!(control.add_faction(terran(), dec!(0.6)).ok(), Some(true));
        let before = control.clone();
        assert_eq!(control.add_faction(terran(), dec!(0.1)).ok(), Some(false));
        assert_eq!(control, before);
        assert_eq!(control.fraction("Terran Union"), Some(dec!(0.6)));
    }

    #[test]
    fn add_does_not_rescale_others() {
        let mut control = FactionControl::new();
        control.add_faction(terran(), dec!(0.5)).unwrap();
        control.add_faction(martian(), dec!(0.3)).unwrap();
        assert_eq!(control.fraction("Terran Union"), Some(dec!(0.5)));
        assert_eq!(control.total(), dec!(0.8));
        assert_eq!(control.unclaimed(), dec!(0.2));
        assert!(!control.is_fully_apportioned());
    }

    #[test]
    fn fraction_range_enforced() {
        let mut control = FactionControl::new();
        assert!(matches!(
            control.add_faction(terran(), dec!(1.01)),
            Err(GalaxyError::InvalidFraction { .. })
        ));
        assert!(matches!(
            control.add_faction(terran(), dec!(-0.1)),
            Err(GalaxyError::InvalidFraction { .. })
        ));
        assert!(control.is_empty());
    }

    #[test]
    fn total_cannot_exceed_one() {
        let mut control = FactionControl::new();
        control.add_faction(terran(), dec!(0.7)).unwrap();
        assert!(matches!(
            control.add_faction(martian(), dec!(0.31)),
            Err(GalaxyError::ControlOverflow { .. })
        ));
        assert_eq!(control.add_faction(martian(), dec!(0.3)).ok(), Some(true));
        assert!(control.is_fully_apportioned());
    }

    #[test]
    fn remove_leaves_others_untouched() {
        let mut control = FactionControl::from_shares([
            (terran(), dec!(0.5)),
            (martian(), dec!(0.5)),
        ])
        .unwrap();
        assert!(control.remove_faction("Martian Republic"));
        assert!(!control.remove_faction("Martian Republic"));
        assert_eq!(control.fraction("Terran Union"), Some(dec!(0.5)));
        assert_eq!(control.unclaimed(), dec!(0.5));
    }

    #[test]
    fn from_shares_rejects_duplicates() {
        let result = FactionControl::from_shares([(terran(), dec!(0.2)), (terran(), dec!(0.2))]);
        assert!(matches!(result, Err(GalaxyError::DuplicateFaction(_))));
    }

    #[test]
    fn renormalize_scales_proportionally() {
        let mut control = FactionControl::from_shares([
            (terran(), dec!(0.3)),
            (martian(), dec!(0.1)),
        ])
        .unwrap();
        assert!(control.renormalize());
        assert_eq!(control.fraction("Terran Union"), Some(dec!(0.75)));
        assert_eq!(control.fraction("Martian Republic"), Some(dec!(0.25)));
        assert!(control.is_fully_apportioned());
    }

    #[test]
    fn renormalize_absorbs_rounding_residue() {
        let mut control = FactionControl::from_shares([
            (terran(), dec!(0.1)),
            (martian(), dec!(0.1)),
            (belter(), dec!(0.1)),
        ])
        .unwrap();
        assert!(control.renormalize());
        assert_eq!(control.total(), Decimal::ONE);
    }

    #[test]
    fn renormalize_noop_cases() {
        let mut empty = FactionControl::new();
        assert!(!empty.renormalize());

        let mut zero = FactionControl::from_shares([(terran(), Decimal::ZERO)]).unwrap();
        assert!(!zero.renormalize());

        let mut full = FactionControl::from_shares([(terran(), Decimal::ONE)]).unwrap();
        assert!(!full.renormalize());
    }

    #[test]
    fn transfer_preserves_total() {
        let mut control = FactionControl::from_shares([
            (terran(), dec!(0.6)),
            (martian(), dec!(0.3)),
        ])
        .unwrap();
        assert!(control.transfer_control(&terran(), belter(), dec!(0.2)).is_ok());
        assert_eq!(control.fraction("Terran Union"), Some(dec!(0.4)));
        assert_eq!(control.fraction("Belt Syndicate"), Some(dec!(0.2)));
        assert_eq!(control.total(), dec!(0.9));
    }

    #[test]
    fn transfer_of_entire_share_drops_giver() {
        let mut control = FactionControl::from_shares([(terran(), dec!(0.4))]).unwrap();
        assert!(control.transfer_control(&terran(), martian(), dec!(0.4)).is_ok());
        assert!(!control.contains("Terran Union"));
        assert_eq!(control.fraction("Martian Republic"), Some(dec!(0.4)));
    }

    #[test]
    fn transfer_failures_leave_table_unchanged() {
        let mut control = FactionControl::from_shares([(terran(), dec!(0.4))]).unwrap();
        let before = control.clone();
        assert!(matches!(
            control.transfer_control(&martian(), terran(), dec!(0.1)),
            Err(GalaxyError::UnknownFaction(_))
        ));
        assert!(matches!(
            control.transfer_control(&terran(), martian(), dec!(0.5)),
            Err(GalaxyError::InsufficientControl { .. })
        ));
        assert!(control.transfer_control(&terran(), martian(), dec!(-0.1)).is_err());
        assert_eq!(control, before);
    }

    #[test]
    fn controlling_faction_needs_strict_majority() {
        let split = FactionControl::from_shares([
            (terran(), dec!(0.5)),
            (martian(), dec!(0.5)),
        ])
        .unwrap();
        assert!(split.controlling_faction().is_none());

        let held = FactionControl::from_shares([
            (terran(), dec!(0.51)),
            (martian(), dec!(0.49)),
        ])
        .unwrap();
        assert_eq!(held.controlling_faction(), Some(&terran()));
    }

    #[test]
    fn factions_listed_in_name_order() {
        let control = FactionControl::from_shares([
            (terran(), dec!(0.2)),
            (belter(), dec!(0.2)),
            (martian(), dec!(0.2)),
        ])
        .unwrap();
        let names: Vec<&str> = control.factions().map(FactionId::as_str).collect();
        assert_eq!(names, vec!["Belt Syndicate", "Martian Republic", "Terran Union"]);
    }

    #[test]
    fn deserialized_table_is_validated() {
        let held = FactionControl::from_shares([
            (terran(), dec!(0.6)),
            (martian(), dec!(0.3)),
        ])
        .unwrap();
        let reloaded: FactionControl =
            serde_json::from_str(&serde_json::to_string(&held).unwrap()).unwrap();
        assert_eq!(reloaded, held);

        let overflow = serde_json::from_str::<FactionControl>(
            r#"{"shares":{"X":"0.9","Y":"0.9"}}"#,
        );
        assert!(overflow.is_err());
        let negative = serde_json::from_str::<FactionControl>(r#"{"shares":{"X":"-0.2"}}"#);
        assert!(negative.is_err());
    }
}
