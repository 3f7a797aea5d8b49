//! Host list parsing for text input.

use regex::Regex;
use std::sync::OnceLock;

/// Separators accepted between host counts: whitespace and commas.
static SEPARATOR_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_separator_regex() -> &'static Regex {
    SEPARATOR_REGEX.get_or_init(|| Regex::new(r"[\s,;]+").expect("Invalid Regex"))
}

/// Parse "59 7 15,29 2" into host counts.
///
/// Tokens that are not non-negative integers are skipped with a warning, so a
/// stray word in a form field does not abort the run.
pub fn parse_host_list(input: &str) -> Vec<u64> {
    get_separator_regex()
        .split(input.trim())
        .filter(|token| !token.is_empty())
        .filter_map(|token| match token.parse::<u64>() {
            Ok(n) => Some(n),
            Err(e) => {
                log::warn!("Ignoring host count '{token}': {e}");
                None
            }
        })
        .collect()
}
