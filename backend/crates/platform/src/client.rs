//! Client identification utilities
//!
//! Resolves the network identity used to key per-client rate limits.

use axum::http::HeaderMap;
use std::net::IpAddr;

/// Address a request is attributed to
///
/// The peer address of the connection, unless `trust_forwarded` is set and
/// the first `X-Forwarded-For` entry parses as an IP. Only enable that
/// behind a proxy that overwrites the header.
pub fn extract_client_ip(
    headers: &HeaderMap,
    direct_ip: Option<IpAddr>,
    trust_forwarded: bool,
) -> Option<IpAddr> {
    let forwarded = || -> Option<IpAddr> {
        let header = headers.get("x-forwarded-for")?.to_str().ok()?;
        header.split(',').next()?.trim().parse().ok()
    };

    trust_forwarded.then(forwarded).flatten().or(direct_ip)
}
