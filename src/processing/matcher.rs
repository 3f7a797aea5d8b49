//! Greedy matching of requirements to subnets.
//!
//! Requirements are taken largest first. Each one tries host bit widths from
//! its own minimum upwards and takes the first unclaimed node (arena order)
//! of that exact size, so a smaller sufficient subnet always wins over a
//! larger free one.

use super::tree::SubnetTree;
use crate::config::ClaimPolicy;
use crate::models::{Requirement, SizedRequirement, SubnetDetails, MAX_LENGTH};
use serde::Serialize;

/// What happened to one requirement.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    /// Subnet assigned; `node` is its arena index in the run's tree.
    Matched { node: usize, subnet: SubnetDetails },
    /// Sized fine but every candidate subnet was already claimed or too big
    /// for the base network.
    NoMatch,
    /// Larger than any subnet of a /1.
    Unsizable,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub requirement: Requirement,
    pub outcome: MatchOutcome,
}

impl MatchResult {
    /// The assigned subnet, if any.
    pub fn subnet(&self) -> Option<&SubnetDetails> {
        match &self.outcome {
            MatchOutcome::Matched { subnet, .. } => Some(subnet),
            _ => None,
        }
    }
}

/// Match sized requirements, in the order given, against `tree`.
///
/// Widths are tried up to one bit short of the base network, so the base
/// itself is never handed out. Claimed flags are updated on `tree`.
pub fn match_requirements(
    tree: &mut SubnetTree,
    requirements: &[SizedRequirement],
    policy: ClaimPolicy,
) -> Vec<MatchResult> {
    let max_bits = MAX_LENGTH - tree.base().mask;
    let mut results = Vec::with_capacity(requirements.len());

    for req in requirements {
        let found = (req.host_bits..max_bits).find_map(|bits| {
            let target = (1u64 << bits) - 2;
            tree.first_unclaimed_with(target)
        });

        let outcome = match found {
            Some(idx) => {
                tree.claim_subtree(idx);
                if policy == ClaimPolicy::SubtreeAndAncestors {
                    tree.claim_ancestors(idx);
                }
                let subnet = tree.nodes()[idx].subnet;
                log::debug!(
                    "requirement {} (min {} hosts) -> {}",
                    req.requirement.hosts,
                    req.max_hosts,
                    subnet.cidr()
                );
                MatchOutcome::Matched { node: idx, subnet }
            }
            None => {
                log::warn!(
                    "No free subnet in {} for requirement of {} hosts",
                    tree.base(),
                    req.requirement.hosts
                );
                MatchOutcome::NoMatch
            }
        };
        results.push(MatchResult {
            requirement: req.requirement,
            outcome,
        });
    }

    results
}
