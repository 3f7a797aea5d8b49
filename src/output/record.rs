//! Structured result record for programmatic consumers.

use crate::models::SubnetDetails;
use crate::output::NO_MATCH;
use crate::Allocation;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AllocationRecord {
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "Result")]
    pub result: Vec<RequirementRecord>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RequirementRecord {
    #[serde(rename = "required host number")]
    pub required_hosts: u64,
    #[serde(rename = "subnet matched")]
    pub subnet_matched: SubnetMatched,
}

/// Either the subnet fields or the literal `"NO MATCH"`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum SubnetMatched {
    Subnet(SubnetDetails),
    NoMatch(String),
}

pub fn to_record(allocation: &Allocation) -> AllocationRecord {
    AllocationRecord {
        message: allocation.message(),
        result: allocation
            .results
            .iter()
            .map(|r| RequirementRecord {
                required_hosts: r.requirement.hosts,
                subnet_matched: match r.subnet() {
                    Some(subnet) => SubnetMatched::Subnet(*subnet),
                    None => SubnetMatched::NoMatch(NO_MATCH.to_string()),
                },
            })
            .collect(),
    }
}

/// Pretty printed JSON of [`to_record`].
pub fn to_json(allocation: &Allocation) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&to_record(allocation))
}
