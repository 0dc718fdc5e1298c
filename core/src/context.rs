//! Per-request execution context.
//!
//! A [`Context`] is derived by the gateway from the request headers and
//! passed to every provider call. It is immutable once built and lives for
//! exactly one request.

use std::collections::BTreeMap;
use thiserror::Error;

/// Multi-valued query parameters, in key order.
pub type QueryParams = BTreeMap<String, Vec<String>>;

/// Identity and parameters of the caller for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    app_id: String,
    token: String,
    query: QueryParams,
    request_id: String,
    referer: String,
}

impl Context {
    /// Create a context for the given bearer token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            app_id: String::new(),
            token: token.into(),
            query: QueryParams::new(),
            request_id: String::new(),
            referer: String::new(),
        }
    }

    /// Set the calling application id.
    #[must_use]
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = app_id.into();
        self
    }

    /// Set the user query parameters.
    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Set the request trace id.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    /// Set the referer configured on the gateway.
    #[must_use]
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = referer.into();
        self
    }

    /// Calling application id (`X-App-ID`).
    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Bearer token (`X-WebOffice-Token`). Never empty for gateway-built contexts.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Parameters decoded from `X-User-Query`.
    #[must_use]
    pub const fn query(&self) -> &QueryParams {
        &self.query
    }

    /// First value of a query parameter.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Request trace id (`X-Request-ID`), possibly empty.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Referer the download hosts expect, as configured on the gateway.
    #[must_use]
    pub fn referer(&self) -> &str {
        &self.referer
    }
}

/// Failure to decode a URL-encoded query string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryParseError {
    /// `;` is not accepted as a pair separator.
    #[error("invalid semicolon separator in query")]
    Semicolon,

    /// A `%` not followed by two hex digits.
    #[error("invalid URL escape {0:?}")]
    InvalidEscape(String),

    /// The decoder rejected the query.
    #[error("malformed query: {0}")]
    Malformed(String),
}

/// Decode a URL-encoded `key=value&key=value` string.
///
/// Keys may repeat; values keep their order. `+` decodes to a space.
/// Stricter than plain form decoding: `;` separators and broken percent
/// escapes fail the whole string instead of being passed through.
///
/// # Errors
///
/// Returns [`QueryParseError`] when the string contains `;` or a malformed
/// percent escape.
pub fn parse_query(raw: &str) -> Result<QueryParams, QueryParseError> {
    if raw.contains(';') {
        return Err(QueryParseError::Semicolon);
    }
    check_escapes(raw)?;

    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw)
        .map_err(|err| QueryParseError::Malformed(err.to_string()))?;

    let mut params = QueryParams::new();
    for (key, value) in pairs {
        params.entry(key).or_default().push(value);
    }
    Ok(params)
}

fn check_escapes(raw: &str) -> Result<(), QueryParseError> {
    let bytes = raw.as_bytes();
    for (index, _) in bytes.iter().enumerate().filter(|(_, byte)| **byte == b'%') {
        let valid = bytes
            .get(index + 1..index + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            let end = raw.len().min(index + 3);
            return Err(QueryParseError::InvalidEscape(
                String::from_utf8_lossy(&bytes[index..end]).into_owned(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_multi_valued() {
        let params = parse_query("lang=zh&tag=a&tag=b&empty=").unwrap();

        assert_eq!(params["lang"], vec!["zh"]);
        assert_eq!(params["tag"], vec!["a", "b"]);
        assert_eq!(params["empty"], vec![""]);
    }

    #[test]
    fn test_parse_query_decodes_escapes() {
        let params = parse_query("name=hello+world&path=%2Fdocs%2Fa%2Bb&flag").unwrap();

        assert_eq!(params["name"], vec!["hello world"]);
        assert_eq!(params["path"], vec!["/docs/a+b"]);
        assert_eq!(params["flag"], vec![""]);
    }

    #[test]
    fn test_parse_query_decodes_keys_and_utf8() {
        let params = parse_query("user%5Fname=%E5%BC%A0%E4%B8%89").unwrap();
        assert_eq!(params["user_name"], vec!["张三"]);
    }

    #[test]
    fn test_parse_query_empty() {
        assert!(parse_query("").unwrap().is_empty());
        assert!(parse_query("&&").unwrap().is_empty());
    }

    #[test]
    fn test_parse_query_rejects_bad_escape() {
        assert_eq!(
            parse_query("a=%zz"),
            Err(QueryParseError::InvalidEscape("%zz".to_string()))
        );
        assert!(matches!(
            parse_query("a=50%"),
            Err(QueryParseError::InvalidEscape(_))
        ));
    }

    #[test]
    fn test_parse_query_rejects_semicolon() {
        assert_eq!(parse_query("a=1;b=2"), Err(QueryParseError::Semicolon));
    }

    #[test]
    fn test_context_builder() {
        let mut query = QueryParams::new();
        query.insert("scene".to_string(), vec!["share".to_string()]);

        let ctx = Context::new("tok")
            .with_app_id("app-1")
            .with_request_id("req-9")
            .with_referer("https://solution.wps.cn")
            .with_query(query);

        assert_eq!(ctx.token(), "tok");
        assert_eq!(ctx.app_id(), "app-1");
        assert_eq!(ctx.request_id(), "req-9");
        assert_eq!(ctx.referer(), "https://solution.wps.cn");
        assert_eq!(ctx.query_value("scene"), Some("share"));
        assert_eq!(ctx.query_value("missing"), None);
    }
}
