//! Requirement sizing.
//!
//! Maps a raw host count to the smallest `2^host_bits - 2` that holds it.

use crate::error::{Result, VlsmError};
use crate::models::{Requirement, SizedRequirement, MAX_LENGTH};

/// Largest host bit width considered: a /1.
pub const MAX_HOST_BITS: u8 = MAX_LENGTH - 1;

/// Find the minimal `(max_hosts, host_bits)` for `hosts`.
///
/// `host_bits` is the smallest value in 1..=31 with `2^host_bits - 2 >= hosts`,
/// so `0` sizes to `(0, 1)` and `30` to `(30, 5)`.
///
/// Widths up to 31 are searched, so counts up to `2^31 - 2` size (to a /1)
/// and only larger ones are [`VlsmError::UnsizableRequirement`]. Stopping at
/// 30 would reject `2^31 - 2` as well. A width of 31 never fits under a
/// valid base (at most /1), so either way that requirement ends up without
/// a subnet; here it is a `NoMatch` row rather than an `Unsizable` one.
///
/// # Examples
/// ```
/// use vlsm_subnet_planner::processing::size_requirement;
/// assert_eq!(size_requirement(59).unwrap(), (62, 6));
/// assert_eq!(size_requirement(30).unwrap(), (30, 5));
/// ```
pub fn size_requirement(hosts: u64) -> Result<(u64, u8)> {
    (1..=MAX_HOST_BITS)
        .map(|bits| ((1u64 << bits) - 2, bits))
        .find(|&(max_hosts, _)| max_hosts >= hosts)
        .ok_or(VlsmError::UnsizableRequirement { hosts })
}

/// Size each requirement; failures are logged and returned separately.
pub fn size_requirements(
    requirements: &[Requirement],
) -> (Vec<SizedRequirement>, Vec<Requirement>) {
    let mut sized = Vec::with_capacity(requirements.len());
    let mut unsizable = Vec::new();
    for req in requirements {
        match size_requirement(req.hosts) {
            Ok((max_hosts, host_bits)) => {
                log::trace!(
                    "requirement {} -> {} hosts, {} host bits",
                    req.hosts,
                    max_hosts,
                    host_bits
                );
                sized.push(SizedRequirement {
                    requirement: *req,
                    max_hosts,
                    host_bits,
                });
            }
            Err(e) => {
                log::warn!("Skipping requirement #{}: {}", req.index, e);
                unsizable.push(*req);
            }
        }
    }
    (sized, unsizable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_requirement_examples() {
        assert_eq!(size_requirement(0).unwrap(), (0, 1));
        assert_eq!(size_requirement(1).unwrap(), (2, 2));
        assert_eq!(size_requirement(2).unwrap(), (2, 2));
        assert_eq!(size_requirement(3).unwrap(), (6, 3));
        assert_eq!(size_requirement(7).unwrap(), (14, 4));
        assert_eq!(size_requirement(15).unwrap(), (30, 5));
        assert_eq!(size_requirement(29).unwrap(), (30, 5));
        assert_eq!(size_requirement(30).unwrap(), (30, 5));
        assert_eq!(size_requirement(31).unwrap(), (62, 6));
        assert_eq!(size_requirement(254).unwrap(), (254, 8));
    }

    #[test]
    fn test_size_requirement_limits() {
        let top = (1u64 << 31) - 2;
        assert_eq!(size_requirement(top).unwrap(), (top, 31));
        assert_eq!(size_requirement(top - 1).unwrap(), (top, 31));
        assert_eq!(
            size_requirement(top + 1).unwrap_err(),
            VlsmError::UnsizableRequirement { hosts: top + 1 }
        );
        assert!(size_requirement(u64::MAX).is_err());
    }

    #[test]
    fn test_size_requirement_minimal() {
        for n in 0..5000u64 {
            let (max_hosts, bits) = size_requirement(n).unwrap();
            assert!(max_hosts >= n);
            assert_eq!(max_hosts, (1u64 << bits) - 2);
            if bits > 1 {
                assert!((1u64 << (bits - 1)) - 2 < n, "{n} sized too large");
            }
        }
    }

    #[test]
    fn test_size_requirements_splits_unsizable() {
        let reqs = Requirement::from_hosts(&[3_000_000_000, 10, 0]);
        let (sized, unsizable) = size_requirements(&reqs);
        assert_eq!(unsizable, vec![reqs[0]]);
        assert_eq!(sized.len(), 2);
        assert_eq!(sized[0].requirement, reqs[1]);
        assert_eq!(sized[0].host_bits, 4);
        assert_eq!(sized[1].max_hosts, 0);
    }
}
