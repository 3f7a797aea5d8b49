//! Subnet allocation logic.
//!
//! This module contains the allocation pipeline:
//! - [`sizing`] - Host counts to power-of-two subnet sizes
//! - [`tree`] - Binary subdivision tree of the base network
//! - [`matcher`] - Greedy largest-first matching against the tree
//! - [`hosts`] - Parsing host counts from free text

mod hosts;
mod matcher;
mod sizing;
mod tree;

// Re-export public functions
pub use hosts::parse_host_list;
pub use matcher::{match_requirements, MatchOutcome, MatchResult};
pub use sizing::{size_requirement, size_requirements, MAX_HOST_BITS};
pub use tree::{deepest_prefix, node_count, root_window, SubnetNode, SubnetTree, MAX_TREE_PREFIX};
