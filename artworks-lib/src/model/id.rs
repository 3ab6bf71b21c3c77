//! Item identifiers

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::Deserialize;

/// Opaque identifier of one item in the remote collection.
///
/// Stable across fetches; the selection only ever refers to items by this key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for ItemId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Anything that can be stored in a page and selected by identifier.
pub trait Identified: Clone + Send + Sync + 'static {
    /// Returns the item's identifier.
    fn id(&self) -> ItemId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(" 42 ".parse::<ItemId>(), Ok(ItemId(42)));
        assert!("abc".parse::<ItemId>().is_err());
    }

    #[test]
    fn test_deserializes_from_bare_number() {
        let id: ItemId = serde_json::from_str("129884").unwrap();
        assert_eq!(id, ItemId(129884));
    }
}
