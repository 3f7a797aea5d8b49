//! Output formatting for allocation results.
//!
//! This module handles shaping and printing [`crate::Allocation`]s:
//! - [`table`] - header + rows for display
//! - [`record`] - structured message + result list, JSON
//! - [`terminal`] - padded, coloured terminal output

mod record;
mod table;
mod terminal;

pub use record::{to_json, to_record, AllocationRecord, RequirementRecord, SubnetMatched};
pub use table::{format_table, ResultTable, HEADER, NOT_AVAILABLE, NO_MATCH};
pub use terminal::{format_field, print_binary, print_table, render_table};
