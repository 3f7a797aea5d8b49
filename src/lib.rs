//! Variable length subnet mask planning.
//!
//! Given a base IPv4 network and a list of host counts, [`allocate`] finds
//! for each count the smallest free subnet of the base that holds it.
//!
//! ```
//! use vlsm_subnet_planner::{allocate, config::AllocatorConfig};
//!
//! let plan = allocate("192.168.0.1/24", &[59, 7, 15, 29, 2], &AllocatorConfig::default()).unwrap();
//! assert_eq!(plan.results[0].subnet().unwrap().cidr().to_string(), "192.168.0.0/26");
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

use config::AllocatorConfig;
use error::Result;
use models::{validate_input_address, Ipv4, Requirement, SizedRequirement, MAX_LENGTH};
use processing::{
    deepest_prefix, match_requirements, root_window, size_requirements, MatchOutcome, MatchResult,
    SubnetTree,
};
use serde::Serialize;

/// Outcome of one allocation run.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// Base network as typed (host bits kept).
    pub network: Ipv4,
    /// One entry per input requirement, largest requirement first.
    pub results: Vec<MatchResult>,
}

impl Allocation {
    /// Human readable headline for the run.
    pub fn message(&self) -> String {
        format!("Matching result for {}", self.network)
    }

    pub fn matched_count(&self) -> usize {
        self.results.iter().filter(|r| r.subnet().is_some()).count()
    }
}

/// Validate `network`, then allocate a subnet for every entry in `hosts`.
///
/// Requirements are processed largest first (ties in input order). Ones too
/// large for any subnet come back as [`MatchOutcome::Unsizable`] rows; ones
/// with no free subnet left as [`MatchOutcome::NoMatch`]. Only invalid input
/// and an oversized tree are errors.
///
/// Only the [`root_window`] of the base is subdivided. If a requirement
/// there escalates or finds nothing, the run is repeated on the whole base.
pub fn allocate(network: &str, hosts: &[u64], config: &AllocatorConfig) -> Result<Allocation> {
    let network = validate_input_address(network)?;
    log::info!(
        "#Start allocate() {} for {} requirement(s)",
        network,
        hosts.len()
    );

    let mut requirements = Requirement::from_hosts(hosts);
    Requirement::sort_descending(&mut requirements);
    let (sized, unsizable) = size_requirements(&requirements);

    let base = network.network();
    let window = root_window(base, &sized);
    let mut matched = match_within(window, &sized, config)?;
    if window.mask > base.mask {
        if packed(&matched, &sized) {
            log::debug!("Matched {} requirement(s) within {window}", sized.len());
        } else {
            log::warn!("Requirements do not pack into {window}, subdividing all of {base}");
            matched = match_within(base, &sized, config)?;
        }
    }
    let mut matched = matched.into_iter();

    // unsizable requirements keep their place in the sorted order
    let results: Vec<MatchResult> = requirements
        .iter()
        .map(|req| {
            if unsizable.contains(req) {
                MatchResult {
                    requirement: *req,
                    outcome: MatchOutcome::Unsizable,
                }
            } else {
                matched.next().unwrap_or(MatchResult {
                    requirement: *req,
                    outcome: MatchOutcome::NoMatch,
                })
            }
        })
        .collect();

    let allocation = Allocation { network, results };
    log::info!(
        "# {} subnet(s) matched out of {} requirement(s) in {}",
        allocation.matched_count(),
        allocation.results.len(),
        network
    );
    Ok(allocation)
}

/// Build the tree under `root` and match `sized` against it.
fn match_within(
    root: Ipv4,
    sized: &[SizedRequirement],
    config: &AllocatorConfig,
) -> Result<Vec<MatchResult>> {
    let deepest = deepest_prefix(root, sized, config.tree_depth);
    let mut tree = SubnetTree::build(root, deepest, config.max_tree_nodes)?;
    Ok(match_requirements(&mut tree, sized, config.claim_policy))
}

/// Every requirement got a subnet of exactly its own width.
fn packed(matched: &[MatchResult], sized: &[SizedRequirement]) -> bool {
    matched.len() == sized.len()
        && matched.iter().zip(sized).all(|(result, req)| {
            result
                .subnet()
                .is_some_and(|s| s.prefix == MAX_LENGTH - req.host_bits)
        })
}
