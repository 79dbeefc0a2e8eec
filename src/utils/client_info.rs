//! Requester metadata extracted from HTTP request parts.

use crate::AppError;
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{HeaderMap, header, request::Parts};
use serde_json::json;
use std::convert::Infallible;
use std::net::SocketAddr;

/// Recorded when neither proxy headers nor the peer address are available.
const UNKNOWN_IP: &str = "unknown";

/// Who sent the request and which host they addressed.
///
/// Extracting this never fails; missing pieces are `None` or [`UNKNOWN_IP`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip: String,
    pub user_agent: Option<String>,
    pub host: Option<String>,
}

impl ClientInfo {
    /// Builds the prefix for URLs returned to this client.
    ///
    /// A configured `base_url` wins; otherwise `http://{Host}` is used.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if no base URL is configured and the
    /// request carries no host.
    pub fn base_url(&self, configured: Option<&str>) -> Result<String, AppError> {
        if let Some(base) = configured {
            return Ok(base.trim_end_matches('/').to_string());
        }

        self.host
            .as_deref()
            .map(|host| format!("http://{host}"))
            .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))
    }
}

impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        let host = header_str(&parts.headers, header::HOST.as_str())
            .map(str::to_string)
            .or_else(|| parts.uri.authority().map(|a| a.to_string()));

        Ok(Self {
            ip: client_ip(&parts.headers, peer),
            user_agent: header_str(&parts.headers, header::USER_AGENT.as_str())
                .map(str::to_string),
            host,
        })
    }
}

/// Resolves the client IP address.
///
/// Priority:
/// 1. First entry of `X-Forwarded-For`
/// 2. `X-Real-IP`
/// 3. Peer socket address
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = header_str(headers, "x-forwarded-for")
        && let Some(first) = forwarded.split(',').map(str::trim).find(|s| !s.is_empty())
    {
        return first.to_string();
    }

    if let Some(real_ip) = header_str(headers, "x-real-ip") {
        return real_ip.to_string();
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_IP.to_string())
}

/// Returns a trimmed, non-empty UTF-8 header value.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
