//! Request screening for the contact endpoint.

use axum::{
    extract::{Request, State},
    http::{
        HeaderMap,
        header::{HOST, ORIGIN, REFERER},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::error::RelayError;
use crate::server::{CONTACT_PATH, RelayState};

/// Reject cross-site or unconfigured contact submissions before any
/// body parsing happens.
pub(crate) async fn screen(
    State(state): State<RelayState>,
    request: Request,
    next: Next,
) -> Response {
    if request.uri().path() == CONTACT_PATH {
        if !origin_allowed(request.headers(), state.config.site_url.as_deref()) {
            warn!(
                origin = ?request.headers().get(ORIGIN),
                referer = ?request.headers().get(REFERER),
                "rejected contact request from foreign origin"
            );
            return RelayError::Forbidden.into_response();
        }
        if !state.config.is_configured() {
            warn!("missing EmailJS configuration");
            return RelayError::NotConfigured.into_response();
        }
    }

    next.run(request).await
}

/// Whether the request claims to come from this site.
///
/// The `Origin` header is preferred and `Referer` is the fallback. The
/// claimed authority must match the `Host` header or the configured site URL.
fn origin_allowed(headers: &HeaderMap, site_url: Option<&str>) -> bool {
    let claimed = headers
        .get(ORIGIN)
        .or_else(|| headers.get(REFERER))
        .and_then(|v| v.to_str().ok())
        .and_then(authority);
    let Some(claimed) = claimed else {
        return false;
    };

    let host = headers.get(HOST).and_then(|v| v.to_str().ok());
    let site = site_url.and_then(authority);
    [host, site]
        .into_iter()
        .flatten()
        .any(|allowed| allowed.eq_ignore_ascii_case(claimed))
}

/// `host[:port]` part of an absolute URL.
fn authority(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    (!authority.is_empty()).then_some(authority)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(pairs: &[(axum::http::HeaderName, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(name.clone(), HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_authority() {
        assert_eq!(authority("https://me.dev"), Some("me.dev"));
        assert_eq!(authority("http://localhost:3000/contact?x=1"), Some("localhost:3000"));
        assert_eq!(authority("null"), None);
        assert_eq!(authority("https://"), None);
    }

    #[test]
    fn test_same_host_allowed() {
        let map = headers(&[(HOST, "localhost:3000"), (ORIGIN, "http://localhost:3000")]);
        assert!(origin_allowed(&map, None));
    }

    #[test]
    fn test_referer_fallback() {
        let map = headers(&[(HOST, "me.dev"), (REFERER, "https://me.dev/#contact")]);
        assert!(origin_allowed(&map, None));
    }

    #[test]
    fn test_site_url_allowed_behind_proxy() {
        let map = headers(&[(HOST, "127.0.0.1:3000"), (ORIGIN, "https://me.dev")]);
        assert!(origin_allowed(&map, Some("https://me.dev")));
        assert!(!origin_allowed(&map, None));
    }

    #[test]
    fn test_foreign_or_missing_origin_rejected() {
        let foreign = headers(&[(HOST, "me.dev"), (ORIGIN, "https://evil.example")]);
        assert!(!origin_allowed(&foreign, Some("https://me.dev")));

        let missing = headers(&[(HOST, "me.dev")]);
        assert!(!origin_allowed(&missing, Some("https://me.dev")));

        let opaque = headers(&[(HOST, "me.dev"), (ORIGIN, "null")]);
        assert!(!origin_allowed(&opaque, None));
    }
}
