//! Firefly hardware address resolution for testbed experiments.
//!
//! Each physical node in the deployment is identified on the wire by the
//! two low bytes of its hardware address, printed as two hex groups
//! (e.g. `f7:9c`). The table below maps those addresses to the node IDs
//! used everywhere else in the pipeline. It is fixed deployment data:
//! loaded once, read-only for the lifetime of the process, and only
//! consulted in testbed mode.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Firefly addresses of the deployed nodes.
const FIREFLY_ADDRESSES: &[(&str, u32)] = &[
    ("f7:9c", 1),
    ("d9:76", 2),
    ("f3:84", 3),
    ("f3:ee", 4),
    ("f7:92", 5),
    ("f3:9a", 6),
    ("de:21", 7),
    ("f2:a1", 8),
    ("d8:b5", 9),
    ("f2:1e", 10),
    ("d9:5f", 11),
    ("f2:33", 12),
    ("de:0c", 13),
    ("f2:0e", 14),
    ("d9:49", 15),
    ("f3:dc", 16),
    ("d9:23", 17),
    ("f3:8b", 18),
    ("f3:c2", 19),
    ("f3:b7", 20),
    ("de:e4", 21),
    ("f3:88", 22),
    ("f7:9a", 23),
    ("f7:e7", 24),
    ("f2:85", 25),
    ("f2:27", 26),
    ("f2:64", 27),
    ("f3:d3", 28),
    ("f3:8d", 29),
    ("f7:e1", 30),
    ("de:af", 31),
    ("f2:91", 32),
    ("f2:d7", 33),
    ("f3:a3", 34),
    ("f2:d9", 35),
    ("d9:9f", 36),
    ("f3:90", 50),
    ("f2:3d", 51),
    ("f7:ab", 52),
    ("f7:c9", 53),
    ("f2:6c", 54),
    ("f2:fc", 56),
    ("f1:f6", 57),
    ("f3:cf", 62),
    ("f3:c3", 63),
    ("f7:d6", 64),
    ("f7:b6", 65),
    ("f7:b7", 70),
    ("f3:f3", 71),
    ("f1:f3", 72),
    ("f2:48", 73),
    ("f3:db", 74),
    ("f3:fa", 75),
    ("f3:83", 76),
    ("f2:b4", 77),
];

static ADDR_ID_MAP: Lazy<HashMap<&'static str, u32>> =
    Lazy::new(|| FIREFLY_ADDRESSES.iter().copied().collect());

/// Resolve a two-group hardware address (e.g. `"f7:9c"`) to its node ID.
///
/// Lookup is exact-match only.
///
/// # Errors
///
/// Returns [`Error::AddressNotFound`] when the address is absent from the
/// deployment table.
pub fn resolve(addr: &str) -> Result<u32> {
    ADDR_ID_MAP
        .get(addr)
        .copied()
        .ok_or_else(|| Error::AddressNotFound(addr.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_addresses() {
        assert_eq!(resolve("f7:9c").unwrap(), 1);
        assert_eq!(resolve("d9:9f").unwrap(), 36);
        assert_eq!(resolve("f2:b4").unwrap(), 77);
    }

    #[test]
    fn unknown_address_is_reported() {
        let err = resolve("ff:ff").unwrap_err();
        assert!(matches!(err, Error::AddressNotFound(ref a) if a == "ff:ff"));
    }

    #[test]
    fn table_has_no_duplicate_addresses() {
        assert_eq!(ADDR_ID_MAP.len(), FIREFLY_ADDRESSES.len());
    }
}
