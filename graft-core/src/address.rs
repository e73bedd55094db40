//! Addresses and plugin identifiers.

use std::fmt;

/// Identifier issued by the registry for a plugin binding.
///
/// Ids start at 1 and are never reused. `0` is the "absent" sentinel
/// returned by reverse lookups.
pub type PluginId = u64;

/// Sentinel id meaning "no binding".
pub const NO_PLUGIN: PluginId = 0;

/// A 20-byte handle naming either deployed plugin code or a caller identity.
///
/// [`Address::ZERO`] is the null handle: it never names deployed code and is
/// rejected by every registry mutation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The null handle.
    pub const ZERO: Address = Address([0; 20]);

    /// Build an address whose low eight bytes hold `value` (big-endian).
    ///
    /// Handy for readable fixtures such as operator and caller identities.
    pub const fn from_low_u64(value: u64) -> Self {
        let mut bytes = [0u8; 20];
        let be = value.to_be_bytes();
        let mut i = 0;
        while i < 8 {
            bytes[12 + i] = be[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Returns `true` for the null handle.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Raw bytes of the address.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_address() {
        assert!(Address::ZERO.is_zero());
        assert!(Address::default().is_zero());
        assert!(!Address::from_low_u64(1).is_zero());
    }

    #[test]
    fn test_display_is_prefixed_hex() {
        let addr = Address::from_low_u64(0xbeef);
        assert_eq!(
            addr.to_string(),
            "0x000000000000000000000000000000000000beef"
        );
    }

    #[test]
    fn test_from_low_u64_orders_like_integers() {
        assert!(Address::from_low_u64(1) < Address::from_low_u64(2));
        assert!(Address::from_low_u64(255) < Address::from_low_u64(256));
    }
}
