//! Validation of submitted thread URLs.
//!
//! Only URLs under a single trusted archive prefix are ever fetched. The check
//! is a literal prefix match; no parsing or canonicalization is performed.

/// Archive prefix accepted when no override is configured.
pub const DEFAULT_TRUSTED_PREFIX: &str = "https://lore.kernel.org/lkml/";

/// Check whether `url` may be fetched.
///
/// Rejects blank input and anything that does not start with `prefix`.
/// The prefix comparison is made against the untrimmed input, so leading
/// whitespace is rejected as well. A URL equal to the prefix is accepted.
pub fn is_valid_url(url: &str, prefix: &str) -> bool {
    if url.trim().is_empty() {
        return false;
    }
    url.starts_with(prefix)
}
