//! Run identification helpers.

use chrono::Utc;

/// Builds an execution identifier for a run of the given algorithm.
///
/// The identifier doubles as the output file prefix, so it stays free of
/// path separators and other characters that are awkward in file names.
pub fn execution_identifier(algorithm_name: &str) -> String {
    let sanitized: String = algorithm_name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{sanitized}_{}", Utc::now().format("%Y-%m-%d_%H%M%S"))
}
