//! IPv4 address and CIDR notation utilities.
//!
//! Provides [`Ipv4`] struct for representing IPv4 addresses with a prefix
//! length, along with the bit arithmetic used by the subnet tree.

use crate::error::{Result, VlsmError};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Longest prefix that still has usable hosts (network and broadcast excluded).
pub const MAX_USABLE_PREFIX: u8 = 30;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use vlsm_subnet_planner::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32> {
    if len > MAX_LENGTH {
        Err(VlsmError::InvalidNetwork { prefix: len })
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr> {
    let mask = get_cidr_mask(len)?;
    let network_bits = u32::from(addr) & mask;
    Ok(Ipv4Addr::from(network_bits | !mask))
}

/// Number of usable hosts for a prefix length.
///
/// /31 and /32 have none: the all-zeros and all-ones addresses are excluded.
pub fn usable_hosts(len: u8) -> u64 {
    if len > MAX_USABLE_PREFIX {
        0
    } else {
        (1u64 << (MAX_LENGTH - len)) - 2
    }
}

/// Render an address as four dot separated groups of 8 bits, MSB first.
///
/// # Examples
/// ```
/// use std::net::Ipv4Addr;
/// use vlsm_subnet_planner::models::render_binary;
/// assert_eq!(
///     render_binary(Ipv4Addr::new(192, 168, 0, 1)),
///     "11000000.10101000.00000000.00000001"
/// );
/// ```
pub fn render_binary(addr: Ipv4Addr) -> String {
    addr.octets()
        .iter()
        .map(|o| format!("{o:08b}"))
        .collect::<Vec<String>>()
        .join(".")
}

/// Validate user supplied `A.B.C.D/N` text.
///
/// Octets are trimmed and must be in 0..=255, the prefix must be strictly
/// between 0 and 32. The returned [`Ipv4`] keeps the address as typed (host
/// bits are not cleared) so it can be echoed back in messages.
pub fn validate_input_address(text: &str) -> Result<Ipv4> {
    let parts: Vec<&str> = text.split('/').collect();
    if parts.len() != 2 {
        return Err(VlsmError::invalid_input(
            text,
            "expected a single '/' between address and prefix",
        ));
    }

    let octets: Vec<&str> = parts[0].split('.').map(str::trim).collect();
    if octets.len() != 4 {
        return Err(VlsmError::invalid_input(
            text,
            format!("expected 4 octets, got {}", octets.len()),
        ));
    }
    let mut bytes = [0u8; 4];
    for (byte, octet) in bytes.iter_mut().zip(&octets) {
        *byte = octet
            .parse::<u8>()
            .map_err(|_| VlsmError::invalid_input(text, format!("invalid octet '{octet}'")))?;
    }

    let prefix = parts[1].trim();
    let mask: u8 = match prefix.parse::<u8>() {
        Ok(m) if m > 0 && m < MAX_LENGTH => m,
        _ => {
            return Err(VlsmError::invalid_input(
                text,
                format!("prefix length '{prefix}' must be between 1 and 31"),
            ))
        }
    };

    Ok(Ipv4 {
        addr: Ipv4Addr::from(bytes),
        mask,
    })
}

/// IPv4 address with CIDR notation support.
#[derive(Eq, Ord, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::new(&s).map_err(de::Error::custom)
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    ///
    /// Accepts any prefix in 0..=32, see [`validate_input_address`] for the
    /// stricter check applied to planner input.
    pub fn new(addr_cidr: &str) -> Result<Ipv4> {
        let addr_cidr = addr_cidr.trim();
        let parts: Vec<&str> = addr_cidr.split('/').collect();
        if parts.len() != 2 {
            return Err(VlsmError::invalid_input(addr_cidr, "Invalid address/mask"));
        }
        let addr = Ipv4Addr::from_str(parts[0])
            .map_err(|_| VlsmError::invalid_input(addr_cidr, format!("Invalid address {}", parts[0])))?;
        let mask = u8::from_str(parts[1])
            .map_err(|_| VlsmError::invalid_input(addr_cidr, format!("Invalid mask {}", parts[1])))?;
        if mask > MAX_LENGTH {
            return Err(VlsmError::InvalidNetwork { prefix: mask });
        }
        Ok(Ipv4 { addr, mask })
    }

    /// This subnet with host bits cleared.
    pub fn network(&self) -> Ipv4 {
        Ipv4 {
            addr: self.lo(),
            mask: self.mask,
        }
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) | !self.mask_bits())
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) & self.mask_bits())
    }

    fn mask_bits(&self) -> u32 {
        get_cidr_mask(self.mask.min(MAX_LENGTH)).unwrap_or(u32::MAX)
    }

    /// Split into the lower and upper half one prefix bit longer.
    ///
    /// Returns `None` for a /32.
    pub fn halves(&self) -> Option<(Ipv4, Ipv4)> {
        if self.mask >= MAX_LENGTH {
            return None;
        }
        let mask = self.mask + 1;
        let lower = self.lo();
        let upper = Ipv4Addr::from(u32::from(lower) | (1u32 << (MAX_LENGTH - mask)));
        Some((
            Ipv4 { addr: lower, mask },
            Ipv4 { addr: upper, mask },
        ))
    }

    /// True when `ip` lies in this subnet.
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.lo() <= ip && ip <= self.hi()
    }

    /// True when the two address ranges share any address.
    pub fn overlaps(&self, other: &Ipv4) -> bool {
        self.lo() <= other.hi() && other.lo() <= self.hi()
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

impl PartialEq for Ipv4 {
    fn eq(&self, other: &Ipv4) -> bool {
        self.addr == other.addr && self.mask == other.mask
    }
}

impl PartialOrd for Ipv4 {
    fn partial_cmp(&self, other: &Ipv4) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_cidr_mask() {
        assert_eq!(get_cidr_mask(0).unwrap(), 0x00000000);
        assert_eq!(get_cidr_mask(8).unwrap(), 0xFF000000);
        assert_eq!(get_cidr_mask(16).unwrap(), 0xFFFF0000);
        assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
        assert_eq!(get_cidr_mask(32).unwrap(), 0xFFFFFFFF);
        assert_eq!(
            get_cidr_mask(33).unwrap_err(),
            VlsmError::InvalidNetwork { prefix: 33 }
        );
    }

    #[test]
    fn test_cut_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 42);
        assert_eq!(cut_addr(ip, 24).unwrap(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(cut_addr(ip, 16).unwrap(), Ipv4Addr::new(192, 168, 0, 0));
        assert_eq!(cut_addr(ip, 8).unwrap(), Ipv4Addr::new(192, 0, 0, 0));
        assert_eq!(cut_addr(ip, 32).unwrap(), Ipv4Addr::new(192, 168, 1, 42));
        assert!(cut_addr(ip, 33).is_err());
    }

    #[test]
    fn test_broadcast_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 0);
        assert_eq!(
            broadcast_addr(ip, 24).unwrap(),
            Ipv4Addr::new(192, 168, 1, 255)
        );
        assert_eq!(
            broadcast_addr(ip, 16).unwrap(),
            Ipv4Addr::new(192, 168, 255, 255)
        );
        assert_eq!(
            broadcast_addr(ip, 32).unwrap(),
            Ipv4Addr::new(192, 168, 1, 0)
        );
        assert!(broadcast_addr(Ipv4Addr::new(255, 255, 255, 255), 24).is_ok());
    }

    #[test]
    fn test_usable_hosts() {
        assert_eq!(usable_hosts(0), 4294967294);
        assert_eq!(usable_hosts(24), 254);
        assert_eq!(usable_hosts(26), 62);
        assert_eq!(usable_hosts(30), 2);
        assert_eq!(usable_hosts(31), 0);
        assert_eq!(usable_hosts(32), 0);
    }

    #[test]
    fn test_render_binary() {
        assert_eq!(
            render_binary(Ipv4Addr::new(255, 255, 255, 192)),
            "11111111.11111111.11111111.11000000"
        );
        assert_eq!(
            render_binary(Ipv4Addr::new(0, 0, 0, 0)),
            "00000000.00000000.00000000.00000000"
        );
        assert_eq!(
            render_binary(Ipv4Addr::new(10, 1, 128, 7)),
            "00001010.00000001.10000000.00000111"
        );
    }

    #[test]
    fn test_validate_input_address() {
        let ip = validate_input_address("192.168.0.1/24").unwrap();
        assert_eq!(ip.addr, Ipv4Addr::new(192, 168, 0, 1));
        assert_eq!(ip.mask, 24);

        let ip = validate_input_address(" 10. 0 .0.9 / 8 ").unwrap();
        assert_eq!(ip.to_string(), "10.0.0.9/8");

        assert!(validate_input_address("10.0.0.1/1").is_ok());
        assert!(validate_input_address("10.0.0.1/31").is_ok());
    }

    #[test]
    fn test_validate_input_address_rejects() {
        for text in [
            "not.an.ip/24",
            "10.0.0.1/33",
            "10.0.0.1/32",
            "10.0.0.1/0",
            "10.0.0.1",
            "10.0.0/24",
            "10.0.0.0.1/24",
            "10.0.0.256/24",
            "10.0.-1.0/24",
            "10.0.0.1/abc",
            "10.0.0.1/24/8",
            "",
        ] {
            let err = validate_input_address(text).unwrap_err();
            assert!(
                matches!(err, VlsmError::InvalidAddressInput { .. }),
                "{text} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn test_halves() {
        let net = Ipv4::new("192.168.0.1/24").unwrap();
        let (lo, hi) = net.halves().unwrap();
        assert_eq!(lo, Ipv4::new("192.168.0.0/25").unwrap());
        assert_eq!(hi, Ipv4::new("192.168.0.128/25").unwrap());

        let (lo, hi) = Ipv4::new("10.0.0.4/30").unwrap().halves().unwrap();
        assert_eq!(lo, Ipv4::new("10.0.0.4/31").unwrap());
        assert_eq!(hi, Ipv4::new("10.0.0.6/31").unwrap());

        assert!(Ipv4::new("10.0.0.4/32").unwrap().halves().is_none());
    }

    #[test]
    fn test_overlaps() {
        let big = Ipv4::new("10.0.0.0/28").unwrap();
        let inner = Ipv4::new("10.0.0.8/30").unwrap();
        let after = Ipv4::new("10.0.0.16/28").unwrap();
        assert!(big.overlaps(&inner));
        assert!(inner.overlaps(&big));
        assert!(!big.overlaps(&after));
        assert!(big.contains(Ipv4Addr::new(10, 0, 0, 15)));
        assert!(!big.contains(Ipv4Addr::new(10, 0, 0, 16)));
    }

    #[test]
    fn test_ip4_cmp() {
        let ip1 = Ipv4::new("10.0.0.1/24").unwrap();
        let ip2 = Ipv4::new("10.0.0.2/24").unwrap();
        let ip3 = Ipv4::new("10.0.0.1/24").unwrap();

        assert!(ip1 < ip2);
        assert!(ip1 == ip3);
        assert!(ip2 > ip1);
        assert!(ip2 >= ip3);
    }

    #[test]
    fn test_ipv4_serde() {
        let ip = Ipv4::new("10.1.2.0/23").unwrap();
        let json = serde_json::to_string(&ip).unwrap();
        assert_eq!(json, "\"10.1.2.0/23\"");
        let back: Ipv4 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ip);
        assert!(serde_json::from_str::<Ipv4>("\"10.1.2.0\"").is_err());
    }
}
