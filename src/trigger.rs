//! Auto-run trigger
//!
//! Picks up an address pair from the invocation so the comparison can run
//! without asking. Supports URL query syntax, e.g.
//! `address1=456%20Oak%20Ave&address2=456+Oak+Avenue`.

use tracing::{debug, warn};

/// Decode one query component: `+` is a space, then percent-decoding.
fn decode_component(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(e) => {
            warn!("⚠️ Ignoring undecodable query value {:?}: {}", raw, e);
            None
        }
    }
}

/// Value of `key` in a query string; the first occurrence wins.
pub fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(k, _)| decode_component(k).as_deref() == Some(key))
        .and_then(|(_, v)| decode_component(v))
}

/// Both addresses from a query string, only when both are non-empty
pub fn addresses_from_query(query: &str) -> Option<(String, String)> {
    let address1 = query_param(query, "address1").filter(|a| !a.is_empty())?;
    let address2 = query_param(query, "address2").filter(|a| !a.is_empty())?;
    debug!("🎯 Addresses supplied by query");
    Some((address1, address2))
}

/// Both addresses from positional arguments, only when both are present
pub fn addresses_from_args(
    address1: Option<&str>,
    address2: Option<&str>,
) -> Option<(String, String)> {
    match (address1, address2) {
        (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => {
            Some((a.to_string(), b.to_string()))
        }
        _ => None,
    }
}
