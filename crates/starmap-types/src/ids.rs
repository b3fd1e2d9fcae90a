//! Name-based identifier wrappers.
//!
//! Planets, factions, ships, and resources are identified by their name and
//! nothing else: two values carrying the same name are the same entity. Each
//! kind gets its own newtype so a planet name can never be passed where a
//! faction is expected, and collections key on the identifier rather than on
//! whole-object equality.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around a [`String`] name with standard derives.
macro_rules! define_name_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from a name.
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            /// Borrow the name backing this identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the identifier and return the owned name.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self(name.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self(name)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl core::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_name_id! {
    /// Identifier for a planet (node in the galaxy graph).
    PlanetId
}

define_name_id! {
    /// Identifier for a faction that can hold control over planets.
    FactionId
}

define_name_id! {
    /// Identifier for a ship moving between planets.
    ShipId
}

define_name_id! {
    /// Identifier for a resource stocked on a planet (e.g. `"water"`, `"helium-3"`).
    ResourceId
}

impl FactionId {
    /// Name of the sentinel faction used when no faction has definitive control.
    pub const DISPUTED: &'static str = "Disputed";

    /// The sentinel "Disputed" faction.
    pub fn disputed() -> Self {
        Self::new(Self::DISPUTED)
    }

    /// Whether this is the "Disputed" sentinel.
    pub fn is_disputed(&self) -> bool {
        self.0 == Self::DISPUTED
    }
}
