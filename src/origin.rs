//! Externally visible origin of the API.
//!
//! Pages are rewritten against the scheme and host the browser actually used, so a page
//! loaded over https never points its scripts at an http API. Static configuration is
//! only consulted when there is no request to read the origin from.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, uri::Authority, HeaderMap},
};
use std::convert::Infallible;

use crate::{AppState, Config};

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Scheme, host and optional port the API is reached at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    scheme: String,
    host: String,
    port: Option<u16>,
}

/// URLs derived from an origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub base_url: String,
    pub users: String,
    pub images: String,
    pub images_save: String,
}

impl Origin {
    pub fn new(scheme: &str, host: &str, port: Option<u16>) -> Self {
        Self {
            scheme: scheme.trim().to_ascii_lowercase(),
            host: host.trim().to_string(),
            port,
        }
    }

    /// Origin from static configuration (startup banners, CLI tools)
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_protocol, &config.api_host, Some(config.api_port))
    }

    /// Origin observed on a live request
    ///
    /// Proxy headers win over the request line so TLS-terminating proxies report the
    /// scheme the browser used. Returns `None` when no host can be determined.
    pub fn from_parts(parts: &Parts) -> Option<Self> {
        let scheme = first_header_value(&parts.headers, X_FORWARDED_PROTO)
            .map(str::to_ascii_lowercase)
            .filter(|s| s == "http" || s == "https")
            .or_else(|| parts.uri.scheme_str().map(str::to_ascii_lowercase))
            .unwrap_or_else(|| "http".to_string());

        let authority = first_header_value(&parts.headers, X_FORWARDED_HOST)
            .or_else(|| first_header_value(&parts.headers, header::HOST.as_str()))
            .and_then(|raw| raw.parse::<Authority>().ok())
            .or_else(|| parts.uri.authority().cloned())?;

        Some(Self::new(&scheme, authority.host(), authority.port_u16()))
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// `scheme://host`, with `:port` only when it is not the scheme's default
    pub fn base_url(&self) -> String {
        match self.port {
            Some(port) if !is_default_port(&self.scheme, port) => {
                format!("{}://{}:{}", self.scheme, self.host, port)
            }
            _ => format!("{}://{}", self.scheme, self.host),
        }
    }

    pub fn users_endpoint(&self) -> String {
        format!("{}/users/", self.base_url())
    }

    pub fn images_endpoint(&self) -> String {
        format!("{}/images", self.base_url())
    }

    pub fn endpoints(&self) -> Endpoints {
        let base_url = self.base_url();
        Endpoints {
            users: format!("{}/users/", base_url),
            images: format!("{}/images", base_url),
            images_save: format!("{}/images/save", base_url),
            base_url,
        }
    }
}

fn is_default_port(scheme: &str, port: u16) -> bool {
    matches!((scheme, port), ("https", 443) | ("http", 80))
}

/// First comma-separated value of a header, trimmed
fn first_header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)?
        .to_str()
        .ok()?
        .split(',')
        .next()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Extractor yielding the origin of the current request, falling back to config
#[derive(Debug, Clone)]
pub struct RequestOrigin(pub Origin);

#[async_trait]
impl FromRequestParts<AppState> for RequestOrigin {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let origin = Origin::from_parts(parts).unwrap_or_else(|| {
            tracing::debug!("No host on request, using configured API origin");
            Origin::from_config(&state.config)
        });
        Ok(RequestOrigin(origin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(uri: &str, headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_default_ports_are_omitted() {
        assert_eq!(
            Origin::new("https", "example.com", Some(443)).base_url(),
            "https://example.com"
        );
        assert_eq!(
            Origin::new("http", "example.com", Some(80)).base_url(),
            "http://example.com"
        );
        assert_eq!(
            Origin::new("https", "example.com", None).base_url(),
            "https://example.com"
        );
    }

    #[test]
    fn test_non_default_ports_are_kept() {
        assert_eq!(
            Origin::new("https", "example.com", Some(8443)).base_url(),
            "https://example.com:8443"
        );
        // 80 is only the default for http
        assert_eq!(
            Origin::new("https", "example.com", Some(80)).base_url(),
            "https://example.com:80"
        );
        assert_eq!(
            Origin::new("http", "localhost", Some(8000)).base_url(),
            "http://localhost:8000"
        );
    }

    #[test]
    fn test_endpoints() {
        let origin = Origin::new("HTTPS", "game.example.org", Some(443));
        assert_eq!(origin.users_endpoint(), "https://game.example.org/users/");
        assert_eq!(origin.images_endpoint(), "https://game.example.org/images");

        let endpoints = origin.endpoints();
        assert_eq!(endpoints.base_url, "https://game.example.org");
        assert_eq!(endpoints.images_save, "https://game.example.org/images/save");
    }

    #[test]
    fn test_from_parts_uses_host_header() {
        let origin = Origin::from_parts(&parts("/photos", &[("host", "example.com:8025")])).unwrap();
        assert_eq!(origin.base_url(), "http://example.com:8025");
    }

    #[test]
    fn test_from_parts_prefers_forwarded_headers() {
        let origin = Origin::from_parts(&parts(
            "/photos",
            &[
                ("host", "127.0.0.1:8025"),
                ("x-forwarded-proto", "https, http"),
                ("x-forwarded-host", "example.com"),
            ],
        ))
        .unwrap();
        assert_eq!(origin.base_url(), "https://example.com");
    }

    #[test]
    fn test_from_parts_ignores_unknown_forwarded_proto() {
        let origin = Origin::from_parts(&parts(
            "/photos",
            &[("host", "example.com"), ("x-forwarded-proto", "ws")],
        ))
        .unwrap();
        assert_eq!(origin.scheme(), "http");
    }

    #[test]
    fn test_from_parts_absolute_uri() {
        let origin = Origin::from_parts(&parts("https://example.com:8443/ranking", &[])).unwrap();
        assert_eq!(origin.base_url(), "https://example.com:8443");
    }

    #[test]
    fn test_from_parts_ipv6_host() {
        let origin = Origin::from_parts(&parts("/", &[("host", "[::1]:9000")])).unwrap();
        assert_eq!(origin.host(), "[::1]");
        assert_eq!(origin.port(), Some(9000));
        assert_eq!(origin.base_url(), "http://[::1]:9000");
    }

    #[test]
    fn test_from_parts_without_host() {
        assert!(Origin::from_parts(&parts("/", &[])).is_none());
    }
}
