//! `If-Match` / `ETag` header handling
//!
//! Header values are compared as opaque strings. There is no list parsing,
//! no `*`, and no weak (`W/`) comparison: a header that is not exactly the
//! last ETag the server sent simply fails to match.

use crate::error::EndpointError;
use http::header::{ETAG, IF_MATCH};
use http::{HeaderMap, HeaderValue, Response};
use occgate_core::{Fingerprint, GuardConfig};

/// Raw `If-Match` value, `None` when the header is absent
///
/// Several `If-Match` lines are joined with `", "` like any HTTP list
/// header; the result can never equal a single fingerprint. Bytes that are
/// not valid header text are kept lossily so the request still counts as
/// carrying a (mismatching) precondition.
pub fn if_match(headers: &HeaderMap) -> Option<String> {
    let values: Vec<String> = headers
        .get_all(IF_MATCH)
        .iter()
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}

/// Fingerprint token inside an `If-Match` value that already matched
///
/// With `quote_etag` the header carries `"<hex>"`; the store compares bare
/// hex.
pub fn fingerprint_token<'a>(config: &GuardConfig, if_match: &'a str) -> &'a str {
    if config.quote_etag {
        if_match
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(if_match)
    } else {
        if_match
    }
}

/// Set the `ETag` header on a response
///
/// `etag` must already be rendered per config (see `GuardConfig::etag_value`).
pub fn attach_etag<B>(response: &mut Response<B>, etag: &Fingerprint) -> Result<(), EndpointError> {
    let value = HeaderValue::from_str(etag.as_str())
        .map_err(|e| EndpointError::Header(format!("invalid ETag {:?}: {}", etag.as_str(), e)))?;
    response.headers_mut().insert(ETAG, value);
    Ok(())
}
