//! Host count requirements.

use serde::Serialize;

/// One requested subnet: the number of usable hosts it must hold.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    /// Hosts needed.
    pub hosts: u64,
    /// Position in the caller's input list.
    pub index: usize,
}

impl Requirement {
    /// Wrap a raw host list, remembering input positions.
    pub fn from_hosts(hosts: &[u64]) -> Vec<Requirement> {
        hosts
            .iter()
            .enumerate()
            .map(|(index, &hosts)| Requirement { hosts, index })
            .collect()
    }

    /// Largest first, ties kept in input order.
    pub fn sort_descending(requirements: &mut [Requirement]) {
        requirements.sort_by(|a, b| b.hosts.cmp(&a.hosts));
    }
}

/// A requirement with its minimal power-of-two size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizedRequirement {
    pub requirement: Requirement,
    /// `2^host_bits - 2`, never less than `requirement.hosts`.
    pub max_hosts: u64,
    pub host_bits: u8,
}
