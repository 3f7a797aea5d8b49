//! Domain models for subnet planning.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4`] - IPv4 address with CIDR notation support
//! - [`SubnetDetails`] - derived network, mask, broadcast and host range
//! - [`Requirement`] and [`SizedRequirement`] - requested host counts

mod ipv4;
mod requirement;
mod subnet;

// Re-export public types
pub use ipv4::{
    broadcast_addr, cut_addr, get_cidr_mask, render_binary, usable_hosts, validate_input_address,
    Ipv4, MAX_LENGTH, MAX_USABLE_PREFIX,
};
pub use requirement::{Requirement, SizedRequirement};
pub use subnet::{subnet_details, SubnetDetails};
