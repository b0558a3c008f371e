//! Request metadata and rendering context consumed by the classification helpers.
//!
//! # Design
//! - Metadata is keyed CGI-style (`REMOTE_ADDR`, `HTTP_X_FORWARDED_FOR`) so values
//!   captured from any HTTP stack land under the same names.
//! - The context owns an optional request: helpers treat a missing request as
//!   "nothing known" instead of an error.

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::http::HeaderMap;

/// Metadata key holding the proxy-appended client address list.
pub const META_FORWARDED_FOR: &str = "HTTP_X_FORWARDED_FOR";
/// Metadata key holding the direct peer address.
pub const META_REMOTE_ADDR: &str = "REMOTE_ADDR";
/// Metadata key holding the `Host` header.
pub const META_HTTP_HOST: &str = "HTTP_HOST";

/// Connection metadata for one inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMeta {
    meta: HashMap<String, String>,
}

impl RequestMeta {
    /// Empty metadata, as for a request with no headers and no peer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture headers and the peer address from an HTTP request.
    ///
    /// Header names map to `HTTP_<NAME>` with dashes turned into underscores.
    /// Repeated header lines are joined with `", "` in arrival order; values
    /// that are not valid UTF-8 are skipped.
    #[must_use]
    pub fn from_http(headers: &HeaderMap, peer: Option<SocketAddr>) -> Self {
        let mut meta: HashMap<String, String> = headers
            .keys()
            .filter_map(|name| {
                let values: Vec<&str> = headers
                    .get_all(name)
                    .iter()
                    .filter_map(|value| value.to_str().ok())
                    .collect();
                (!values.is_empty())
                    .then(|| (header_meta_key(name.as_str()), values.join(", ")))
            })
            .collect();
        if let Some(peer) = peer {
            meta.insert(META_REMOTE_ADDR.to_string(), peer.ip().to_string());
        }
        Self { meta }
    }

    /// Builder-style insert of a raw metadata entry.
    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a raw metadata entry.
    pub fn insert(&mut self, key: &str, value: &str) {
        self.meta.insert(key.to_string(), value.to_string());
    }

    /// Raw metadata value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }

    /// First hop of the forwarded-for list, trimmed; `None` when missing or blank.
    #[must_use]
    pub fn forwarded_for(&self) -> Option<&str> {
        self.get(META_FORWARDED_FOR)
            .and_then(|list| list.split(',').next())
            .map(str::trim)
            .filter(|addr| !addr.is_empty())
    }

    /// Direct peer address; `None` when missing or blank.
    #[must_use]
    pub fn remote_addr(&self) -> Option<&str> {
        self.get(META_REMOTE_ADDR)
            .map(str::trim)
            .filter(|addr| !addr.is_empty())
    }

    /// Best evidence of the client address: forwarded-for first, then the peer.
    #[must_use]
    pub fn client_addr(&self) -> Option<&str> {
        self.forwarded_for().or_else(|| self.remote_addr())
    }

    /// Host name from the `Host` header with any port removed.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        let raw = self.get(META_HTTP_HOST)?.trim();
        let host = strip_port(raw);
        (!host.is_empty()).then_some(host)
    }
}

fn header_meta_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len() + 5);
    key.push_str("HTTP_");
    key.extend(
        name.chars()
            .map(|ch| if ch == '-' { '_' } else { ch.to_ascii_uppercase() }),
    );
    key
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return host.find(']').map_or(host, |end| &host[..=end]);
    }
    match host.rsplit_once(':') {
        Some((name, port))
            if !name.contains(':') && port.chars().all(|ch| ch.is_ascii_digit()) =>
        {
            name
        }
        _ => host,
    }
}

/// Authenticated principal attached to a rendering context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    username: String,
    authenticated: bool,
}

impl User {
    /// A signed-in user.
    #[must_use]
    pub fn authenticated(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            authenticated: true,
        }
    }

    /// An anonymous visitor.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            username: String::new(),
            authenticated: false,
        }
    }

    /// Login name; empty for anonymous visitors.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Whether the user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

/// Values available while rendering analytics markup for one request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    request: Option<RequestMeta>,
    user: Option<User>,
    variables: HashMap<String, String>,
}

impl RequestContext {
    /// Context with no request, user or variables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context wrapping the given request.
    #[must_use]
    pub fn with_request(request: RequestMeta) -> Self {
        Self {
            request: Some(request),
            ..Self::default()
        }
    }

    /// Attach the signed-in (or anonymous) user.
    #[must_use]
    pub fn user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    /// Set a template-style variable.
    #[must_use]
    pub fn variable(mut self, name: &str, value: &str) -> Self {
        self.variables.insert(name.to_string(), value.to_string());
        self
    }

    /// Current request, if one is being handled.
    #[must_use]
    pub const fn request(&self) -> Option<&RequestMeta> {
        self.request.as_ref()
    }

    /// User attached to the context.
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Template-style variable lookup.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }
}
