//! Newtype wrappers around `u64` for all domain entity identifiers.
//!
//! Identifiers are allocated sequentially from the document's `nextIds`
//! counters and serialize as plain JSON numbers, so the on-disk format stays
//! a flat `{"id": 3}`. Distinct types prevent passing a `SubGroupId` where
//! an `AssetId` is expected.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapper around `u64`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Wrap a raw numeric identifier.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Return the raw numeric value.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<u64>().map(Self)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.0
            }
        }
    };
}

define_id!(
    /// Unique identifier for a tracked asset.
    AssetId
);

define_id!(
    /// Unique identifier for a top-level asset category.
    MainGroupId
);

define_id!(
    /// Unique identifier for a sub category.
    SubGroupId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_display() {
        assert_eq!(AssetId::new(42).to_string(), "42");
    }

    #[test]
    fn test_asset_id_from_str() {
        let id: AssetId = "17".parse().expect("should parse");
        assert_eq!(id.get(), 17);
        assert!("abc".parse::<AssetId>().is_err());
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&SubGroupId::new(5)).expect("serialize");
        assert_eq!(json, "5");
        let parsed: SubGroupId = serde_json::from_str("5").expect("deserialize");
        assert_eq!(parsed, SubGroupId::new(5));
    }
}
