//! Subdivision tree of a base network.
//!
//! Every subnet of the base down to a chosen prefix is materialised once in
//! a flat arena. Nodes are appended depth first (lower half and its whole
//! subtree before the upper half), so scanning the arena in order visits
//! subnets of one size from the lowest address up.

use crate::config::TreeDepth;
use crate::error::{Result, VlsmError};
use crate::models::{
    subnet_details, usable_hosts, Ipv4, SizedRequirement, SubnetDetails, MAX_LENGTH,
};

/// Deepest prefix the tree ever reaches; /31 nodes have no children.
pub const MAX_TREE_PREFIX: u8 = MAX_LENGTH - 1;

/// One subnet in the tree.
#[derive(Debug, Clone)]
pub struct SubnetNode {
    pub subnet: SubnetDetails,
    /// Arena index of the parent, `None` for the halves of the base network.
    pub parent: Option<usize>,
    /// Lower and upper half, `None` at the deepest level.
    pub children: Option<[usize; 2]>,
    pub claimed: bool,
}

#[derive(Debug, Clone)]
pub struct SubnetTree {
    base: Ipv4,
    nodes: Vec<SubnetNode>,
    /// Node indices per prefix length, in arena order.
    levels: Vec<Vec<usize>>,
}

/// Prefix at which subdivision stops.
///
/// With [`TreeDepth::SmallestRequirement`] no node smaller than the
/// smallest sized requirement is built, which cannot change which subnets
/// get matched.
pub fn deepest_prefix(base: Ipv4, requirements: &[SizedRequirement], depth: TreeDepth) -> u8 {
    let deepest = match depth {
        TreeDepth::Full => MAX_TREE_PREFIX,
        TreeDepth::SmallestRequirement => requirements
            .iter()
            .map(|r| r.host_bits)
            .min()
            .map_or(base.mask, |bits| MAX_LENGTH - bits),
    };
    deepest.clamp(base.mask.min(MAX_TREE_PREFIX), MAX_TREE_PREFIX)
}

/// Smallest aligned subnet at the start of `base` that yields the same
/// matches as `base` itself.
///
/// Taken largest first, power-of-two blocks pack contiguously from the
/// lowest address as long as each one gets its own width. That holds when
/// their sizes (`2^host_bits` addresses each) add up to no more than a
/// subnet one bit wider than the largest block. Returns `base` with host
/// bits cleared when no narrower subnet qualifies.
///
/// # Examples
/// ```
/// use vlsm_subnet_planner::models::{Ipv4, Requirement};
/// use vlsm_subnet_planner::processing::{root_window, size_requirements};
///
/// let (sized, _) = size_requirements(&Requirement::from_hosts(&[59, 29, 15, 7, 2]));
/// let window = root_window(Ipv4::new("10.0.0.1/8").unwrap(), &sized);
/// assert_eq!(window.to_string(), "10.0.0.0/24");
/// ```
pub fn root_window(base: Ipv4, requirements: &[SizedRequirement]) -> Ipv4 {
    let base = base.network();
    let Some(widest) = requirements.iter().map(|r| r.host_bits).max() else {
        return base;
    };
    let total = requirements
        .iter()
        .fold(0u64, |sum, r| sum.saturating_add(1u64 << r.host_bits));
    let bits = total
        .checked_next_power_of_two()
        .map(|size| size.trailing_zeros().max(u32::from(widest) + 1));
    match bits {
        Some(bits) if bits < u32::from(MAX_LENGTH - base.mask) => Ipv4 {
            addr: base.addr,
            // bits < 32 here
            mask: MAX_LENGTH - bits as u8,
        },
        _ => base,
    }
}

/// Nodes needed to subdivide a `/base_prefix` down to `/deepest`.
pub fn node_count(base_prefix: u8, deepest: u8) -> u64 {
    if deepest <= base_prefix {
        0
    } else {
        let levels = u32::from(deepest - base_prefix);
        (1u64 << (levels + 1)) - 2
    }
}

impl SubnetTree {
    /// Build the tree under `base` down to `/deepest`.
    ///
    /// Fails with [`VlsmError::TreeTooLarge`] before allocating anything if
    /// more than `max_nodes` nodes would be needed.
    pub fn build(base: Ipv4, deepest: u8, max_nodes: u64) -> Result<SubnetTree> {
        let base = base.network();
        let deepest = deepest.min(MAX_TREE_PREFIX);
        let count = node_count(base.mask, deepest);
        if count > max_nodes {
            log::error!(
                "Refusing to subdivide {base} to /{deepest}: {count} nodes > limit {max_nodes}"
            );
            return Err(VlsmError::TreeTooLarge {
                nodes: count,
                limit: max_nodes,
            });
        }

        let mut tree = SubnetTree {
            base,
            nodes: Vec::with_capacity(count as usize),
            levels: vec![Vec::new(); usize::from(MAX_LENGTH) + 1],
        };
        tree.subdivide(base, None, deepest)?;
        log::debug!(
            "Built subnet tree for {base} down to /{deepest}: {} nodes",
            tree.nodes.len()
        );
        Ok(tree)
    }

    /// Append both halves of `subnet` and recurse into each.
    fn subdivide(
        &mut self,
        subnet: Ipv4,
        parent: Option<usize>,
        deepest: u8,
    ) -> Result<Option<[usize; 2]>> {
        if subnet.mask >= deepest {
            return Ok(None);
        }
        let Some((lower, upper)) = subnet.halves() else {
            return Ok(None);
        };
        let mut pair = [0usize; 2];
        for (slot, half) in pair.iter_mut().zip([lower, upper]) {
            let idx = self.nodes.len();
            self.nodes.push(SubnetNode {
                subnet: subnet_details(half.addr, half.mask)?,
                parent,
                children: None,
                claimed: false,
            });
            self.levels[usize::from(half.mask)].push(idx);
            self.nodes[idx].children = self.subdivide(half, Some(idx), deepest)?;
            *slot = idx;
        }
        Ok(Some(pair))
    }

    /// The base network, host bits cleared.
    pub fn base(&self) -> Ipv4 {
        self.base
    }

    pub fn nodes(&self) -> &[SubnetNode] {
        &self.nodes
    }

    pub fn node(&self, idx: usize) -> Option<&SubnetNode> {
        self.nodes.get(idx)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Indices of all nodes with the given prefix, in arena order.
    pub fn level(&self, prefix: u8) -> &[usize] {
        self.levels
            .get(usize::from(prefix))
            .map_or(&[][..], |v| v.as_slice())
    }

    /// First unclaimed node, in arena order, with exactly `usable` hosts.
    ///
    /// Only the level(s) whose host count equals `usable` are scanned; each
    /// level is kept in arena order so the result is the same as a full scan.
    pub fn first_unclaimed_with(&self, usable: u64) -> Option<usize> {
        (0..=MAX_TREE_PREFIX)
            .filter(|&prefix| usable_hosts(prefix) == usable)
            .flat_map(|prefix| self.level(prefix).iter().copied())
            .filter(|&i| !self.nodes[i].claimed)
            .min()
    }

    /// Flag `idx` and all its descendants as claimed.
    pub fn claim_subtree(&mut self, idx: usize) {
        let mut stack = vec![idx];
        while let Some(i) = stack.pop() {
            let node = &mut self.nodes[i];
            node.claimed = true;
            if let Some(children) = node.children {
                stack.extend(children);
            }
        }
    }

    /// Flag every ancestor of `idx` as claimed.
    pub fn claim_ancestors(&mut self, idx: usize) {
        let mut parent = self.nodes[idx].parent;
        while let Some(p) = parent {
            self.nodes[p].claimed = true;
            parent = self.nodes[p].parent;
        }
    }

    /// Indices of `idx` and all its descendants.
    pub fn subtree(&self, idx: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![idx];
        while let Some(i) = stack.pop() {
            out.push(i);
            if let Some(children) = self.nodes[i].children {
                stack.extend(children);
            }
        }
        out
    }
}
