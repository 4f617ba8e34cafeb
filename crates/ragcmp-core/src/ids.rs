//! ID prefixes and generation.
//!
//! IDs follow the `{prefix}-{hex}` format, e.g. `doc-3f9a0c11d2e4b687`.

pub const PREFIX_DOCUMENT: &str = "doc";

/// Number of random bytes behind each ID (rendered as twice as many hex digits).
const RANDOM_BYTES: usize = 8;

/// Generate a fresh `{prefix}-{hex}` identifier from OS randomness.
///
/// # Panics
///
/// Panics if the operating system's random source is unavailable.
#[must_use]
pub fn generate_id(prefix: &str) -> String {
    let mut bytes = [0u8; RANDOM_BYTES];
    getrandom::fill(&mut bytes).expect("OS random source should be available");
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("{prefix}-{hex}")
}
