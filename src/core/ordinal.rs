use crate::core::errors::{Error, Result};
use std::net::Ipv4Addr;

/*-------------------------------------------------------------------------------------------------
  IPv4 Address Ordinals
-------------------------------------------------------------------------------------------------*/

/// Signed 32-bit representation of an IPv4 address.
///
/// The unsigned address space `[0, 2^32 - 1]` is shifted down by `2^31` onto `[i32::MIN,
/// i32::MAX]`, so plain signed comparison orders ordinals the same way the addresses are ordered.
pub type Ordinal = i32;

const ORDINAL_OFFSET: u32 = 1 << 31;

/// Convert dotted-quad text to an [Ordinal].
///
/// ```
/// let low = ipinfolookup::ip_to_ordinal("0.0.0.0").unwrap();
/// let high = ipinfolookup::ip_to_ordinal("255.255.255.255").unwrap();
/// assert_eq!(low, i32::MIN);
/// assert_eq!(high, i32::MAX);
/// ```
pub fn ip_to_ordinal(text: &str) -> Result<Ordinal> {
    parse_addr(text).map(addr_to_ordinal)
}

/// Parse dotted-quad text to an [Ipv4Addr]; IPv6 text is rejected.
pub fn parse_addr(text: &str) -> Result<Ipv4Addr> {
    text.parse::<Ipv4Addr>()
        .map_err(|_| Error::InvalidAddress(text.to_string()))
}

/// Convert an [Ipv4Addr] to an [Ordinal].
pub fn addr_to_ordinal(addr: Ipv4Addr) -> Ordinal {
    u32::from(addr).wrapping_sub(ORDINAL_OFFSET) as i32
}

/// Convert an [Ordinal] back to the [Ipv4Addr] it was computed from.
pub fn ordinal_to_addr(ordinal: Ordinal) -> Ipv4Addr {
    Ipv4Addr::from((ordinal as u32).wrapping_add(ORDINAL_OFFSET))
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
