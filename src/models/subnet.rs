//! Derived subnet fields.

use super::ipv4::{broadcast_addr, cut_addr, get_cidr_mask, render_binary, usable_hosts, Ipv4};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Network, mask, broadcast and host range of one subnet.
///
/// Serialised with the field names used by the structured result record.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubnetDetails {
    /// Network address (host bits cleared).
    #[serde(rename = "subnet_id")]
    pub network: Ipv4Addr,
    /// Prefix length.
    #[serde(rename = "subnet_mask_len")]
    pub prefix: u8,
    /// Dotted-decimal subnet mask.
    #[serde(rename = "subnet_mask")]
    pub mask: Ipv4Addr,
    /// Usable host count, 0 for /31 and /32.
    pub usable_hosts: u64,
    /// Network address + 1.
    pub first_host: Ipv4Addr,
    /// Broadcast address - 1.
    pub last_host: Ipv4Addr,
    /// Broadcast address.
    #[serde(rename = "broadcast_addr")]
    pub broadcast: Ipv4Addr,
}

/// Compute [`SubnetDetails`] for `network/prefix_length`.
///
/// Host bits in `network` are cleared first. Fails with
/// [`crate::error::VlsmError::InvalidNetwork`] when the prefix exceeds 32.
pub fn subnet_details(network: Ipv4Addr, prefix_length: u8) -> Result<SubnetDetails> {
    let mask = get_cidr_mask(prefix_length)?;
    let network = cut_addr(network, prefix_length)?;
    let broadcast = broadcast_addr(network, prefix_length)?;
    Ok(SubnetDetails {
        network,
        prefix: prefix_length,
        mask: Ipv4Addr::from(mask),
        usable_hosts: usable_hosts(prefix_length),
        // wrapping only matters for /32 at either end of the address space
        first_host: Ipv4Addr::from(u32::from(network).wrapping_add(1)),
        last_host: Ipv4Addr::from(u32::from(broadcast).wrapping_sub(1)),
        broadcast,
    })
}

impl SubnetDetails {
    /// The subnet as CIDR.
    pub fn cidr(&self) -> Ipv4 {
        Ipv4 {
            addr: self.network,
            mask: self.prefix,
        }
    }

    /// Labelled binary renderings of the address fields.
    pub fn binary_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("subnet_id", render_binary(self.network)),
            ("subnet_mask", render_binary(self.mask)),
            ("first_host", render_binary(self.first_host)),
            ("last_host", render_binary(self.last_host)),
            ("broadcast_addr", render_binary(self.broadcast)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VlsmError;

    #[test]
    fn test_subnet_details_26() {
        let d = subnet_details(Ipv4Addr::new(192, 168, 0, 1), 26).unwrap();
        assert_eq!(d.network, Ipv4Addr::new(192, 168, 0, 0));
        assert_eq!(d.mask, Ipv4Addr::new(255, 255, 255, 192));
        assert_eq!(d.usable_hosts, 62);
        assert_eq!(d.first_host, Ipv4Addr::new(192, 168, 0, 1));
        assert_eq!(d.last_host, Ipv4Addr::new(192, 168, 0, 62));
        assert_eq!(d.broadcast, Ipv4Addr::new(192, 168, 0, 63));
    }

    #[test]
    fn test_subnet_details_all_prefixes() {
        let addr = Ipv4Addr::new(172, 16, 200, 77);
        for prefix in 1..32u8 {
            let d = subnet_details(addr, prefix).unwrap();
            assert_eq!(u32::from(d.first_host), u32::from(d.network) + 1);
            assert_eq!(u32::from(d.last_host), u32::from(d.broadcast) - 1);
            let expected = if prefix <= 30 {
                (1u64 << (32 - prefix)) - 2
            } else {
                0
            };
            assert_eq!(d.usable_hosts, expected, "prefix /{prefix}");
            assert_eq!(d.cidr(), Ipv4 { addr, mask: prefix }.network());
            assert_eq!(u32::from(d.mask), get_cidr_mask(prefix).unwrap());
        }
    }

    #[test]
    fn test_subnet_details_invalid() {
        assert_eq!(
            subnet_details(Ipv4Addr::new(10, 0, 0, 0), 33).unwrap_err(),
            VlsmError::InvalidNetwork { prefix: 33 }
        );
        assert!(subnet_details(Ipv4Addr::new(10, 0, 0, 0), 0).is_ok());
        assert!(subnet_details(Ipv4Addr::new(10, 0, 0, 0), 32).is_ok());
    }

    #[test]
    fn test_serialize_field_names() {
        let d = subnet_details(Ipv4Addr::new(10, 0, 0, 0), 30).unwrap();
        let v = serde_json::to_value(d).unwrap();
        assert_eq!(v["subnet_id"], "10.0.0.0");
        assert_eq!(v["subnet_mask_len"], 30);
        assert_eq!(v["subnet_mask"], "255.255.255.252");
        assert_eq!(v["usable_hosts"], 2);
        assert_eq!(v["first_host"], "10.0.0.1");
        assert_eq!(v["last_host"], "10.0.0.2");
        assert_eq!(v["broadcast_addr"], "10.0.0.3");
    }

    #[test]
    fn test_binary_fields() {
        let d = subnet_details(Ipv4Addr::new(192, 168, 0, 64), 27).unwrap();
        let fields = d.binary_fields();
        assert_eq!(fields[0].0, "subnet_id");
        assert_eq!(fields[0].1, "11000000.10101000.00000000.01000000");
        assert_eq!(fields[1].1, "11111111.11111111.11111111.11100000");
        assert_eq!(fields[4].1, "11000000.10101000.00000000.01011111");
    }
}
