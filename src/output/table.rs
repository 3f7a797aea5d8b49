//! Tabular view of an allocation.

use crate::Allocation;

/// Column titles, in row order.
pub const HEADER: [&str; 8] = [
    "HostsNeeded",
    "SubnetID",
    "SubnetMask",
    "MaskLen",
    "UsableHosts",
    "FirstHost",
    "LastHost",
    "BroadcastAddr",
];

/// Placed in the SubnetID column of an unmatched row.
pub const NO_MATCH: &str = "NO MATCH";
/// Placed in every other subnet column of an unmatched row.
pub const NOT_AVAILABLE: &str = "NA";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One row per requirement, in processing order.
pub fn format_table(allocation: &Allocation) -> ResultTable {
    let rows = allocation
        .results
        .iter()
        .map(|result| {
            let hosts = result.requirement.hosts.to_string();
            match result.subnet() {
                Some(s) => vec![
                    hosts,
                    s.network.to_string(),
                    s.mask.to_string(),
                    s.prefix.to_string(),
                    s.usable_hosts.to_string(),
                    s.first_host.to_string(),
                    s.last_host.to_string(),
                    s.broadcast.to_string(),
                ],
                None => {
                    let mut row = vec![hosts, NO_MATCH.to_string()];
                    row.extend(std::iter::repeat(NOT_AVAILABLE.to_string()).take(HEADER.len() - 2));
                    row
                }
            }
        })
        .collect();

    ResultTable {
        header: HEADER.iter().map(|h| h.to_string()).collect(),
        rows,
    }
}
