//! Permissive parameter parsing.
//!
//! Numeric and boolean parameters that fail to parse fall back to zero or
//! `false` instead of rejecting the request.

/// Parse an integer, `0` on failure.
pub(crate) fn int_or_zero<T>(raw: &str) -> T
where
    T: std::str::FromStr + Default,
{
    raw.parse().unwrap_or_default()
}

/// Parse a boolean flag, `false` on failure.
///
/// Accepts `1 t T true TRUE True` and `0 f F false FALSE False`.
pub(crate) fn flag_or_false(raw: &str) -> bool {
    matches!(raw, "1" | "t" | "T" | "true" | "TRUE" | "True")
}

/// Decode a raw query string into ordered pairs; empty when malformed.
pub(crate) fn query_pairs(raw: Option<&str>) -> Vec<(String, String)> {
    raw.and_then(|raw| serde_urlencoded::from_str(raw).ok())
        .unwrap_or_default()
}

/// First value of `key` in decoded query pairs.
pub(crate) fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> &'a str {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
        .unwrap_or_default()
}

/// Every value of `key` in decoded query pairs, in order.
pub(crate) fn all_values(pairs: &[(String, String)], key: &str) -> Vec<String> {
    pairs
        .iter()
        .filter(|(name, _)| name == key)
        .map(|(_, value)| value.clone())
        .collect()
}
