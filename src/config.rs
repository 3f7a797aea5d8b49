//! Allocator settings.
//!
//! Values come from the environment (a `.env` file is loaded by the binary
//! via `dotenv`):
//! - `VLSM_MAX_TREE_NODES` - node limit for the subdivision tree
//! - `VLSM_CLAIM_POLICY` - `subtree` or `subtree-and-ancestors`
//! - `VLSM_TREE_DEPTH` - `full` or `smallest-requirement`

use crate::error::{Result, VlsmError};
use std::str::FromStr;

pub const ENV_MAX_TREE_NODES: &str = "VLSM_MAX_TREE_NODES";
pub const ENV_CLAIM_POLICY: &str = "VLSM_CLAIM_POLICY";
pub const ENV_TREE_DEPTH: &str = "VLSM_TREE_DEPTH";

/// Default node limit, 2^20.
pub const DEFAULT_MAX_TREE_NODES: u64 = 1 << 20;

/// Which nodes are flagged claimed when a subnet is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClaimPolicy {
    /// The selected node and all its descendants. An unclaimed ancestor can
    /// still be picked later and will overlap the earlier allocation.
    #[default]
    Subtree,
    /// As `Subtree`, plus every ancestor up to the base network.
    SubtreeAndAncestors,
}

impl FromStr for ClaimPolicy {
    type Err = VlsmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "subtree" => Ok(ClaimPolicy::Subtree),
            "subtree-and-ancestors" | "ancestors" => Ok(ClaimPolicy::SubtreeAndAncestors),
            _ => Err(invalid(ENV_CLAIM_POLICY, s)),
        }
    }
}

/// How deep the subdivision tree is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeDepth {
    /// Always down to /31.
    Full,
    /// Stop at the prefix of the smallest sized requirement.
    #[default]
    SmallestRequirement,
}

impl FromStr for TreeDepth {
    type Err = VlsmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(TreeDepth::Full),
            "smallest-requirement" | "smallest" => Ok(TreeDepth::SmallestRequirement),
            _ => Err(invalid(ENV_TREE_DEPTH, s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocatorConfig {
    pub max_tree_nodes: u64,
    pub claim_policy: ClaimPolicy,
    pub tree_depth: TreeDepth,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        AllocatorConfig {
            max_tree_nodes: DEFAULT_MAX_TREE_NODES,
            claim_policy: ClaimPolicy::default(),
            tree_depth: TreeDepth::default(),
        }
    }
}

impl AllocatorConfig {
    /// Read settings from process environment, unset keys keep defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; used by [`AllocatorConfig::from_env`] and tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AllocatorConfig::default();
        if let Some(value) = lookup(ENV_MAX_TREE_NODES) {
            config.max_tree_nodes = value
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid(ENV_MAX_TREE_NODES, &value))?;
        }
        if let Some(value) = lookup(ENV_CLAIM_POLICY) {
            config.claim_policy = value.parse()?;
        }
        if let Some(value) = lookup(ENV_TREE_DEPTH) {
            config.tree_depth = value.parse()?;
        }
        log::debug!("AllocatorConfig: {:?}", config);
        Ok(config)
    }
}

fn invalid(key: &str, value: &str) -> VlsmError {
    VlsmError::InvalidConfig {
        key: key.to_string(),
        value: value.to_string(),
    }
}
