//! Terminal output utilities.
//!
//! Provides formatting helpers for terminal output.

use super::table::{ResultTable, NO_MATCH};
use crate::Allocation;
use colored::Colorize;
use itertools::Itertools;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Render header and rows as aligned, comma separated quoted fields.
///
/// With `colorize` the `NO MATCH` cells are highlighted; padding is applied
/// before colouring so columns stay aligned.
pub fn render_table(table: &ResultTable, colorize: bool) -> Vec<String> {
    let widths: Vec<usize> = (0..table.header.len())
        .map(|col| {
            std::iter::once(&table.header[col])
                .chain(table.rows.iter().filter_map(|row| row.get(col)))
                .map(|cell| cell.len() + 2)
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render_row = |row: &[String]| -> String {
        row.iter()
            .zip(&widths)
            .map(|(cell, &width)| {
                let field = format_field(cell, width);
                if colorize && cell == NO_MATCH {
                    field.red().to_string()
                } else {
                    field
                }
            })
            .join(",")
    };

    std::iter::once(render_row(&table.header))
        .chain(table.rows.iter().map(|row| render_row(row)))
        .collect()
}

/// Print the headline and the result table to stdout.
pub fn print_table(allocation: &Allocation, table: &ResultTable) {
    log::debug!("print_table() {} row(s)", table.rows.len());
    println!("{}", allocation.message().bold());
    for line in render_table(table, true) {
        println!("{line}");
    }
    let unmatched = allocation.results.len() - allocation.matched_count();
    if unmatched > 0 {
        println!(
            "#{}# {} requirement(s) could not be matched",
            "NOTE".on_red(),
            unmatched
        );
    }
}

/// Print binary renderings of every matched subnet.
pub fn print_binary(allocation: &Allocation) {
    for result in &allocation.results {
        if let Some(subnet) = result.subnet() {
            println!(
                "{} hosts -> {}",
                result.requirement.hosts,
                subnet.cidr().to_string().on_blue()
            );
            for (label, bits) in subnet.binary_fields() {
                println!("  {label:>15} {bits}");
            }
        }
    }
}
