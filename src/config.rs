//! Which origins may call the API from a browser.

use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};

/// The cross-origin policy for the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Any origin may call the API.
    AllowAll,
    /// Only the listed origins, e.g. `https://example.com`, may call the API.
    AllowList(Vec<String>),
}

impl CorsPolicy {
    /// Pick the policy for the server.
    ///
    /// Debug mode allows every origin. Otherwise `allowed_origins` is a comma separated list of
    /// origins, where `*` allows every origin.
    pub fn new(debug: bool, allowed_origins: &str) -> Self {
        if debug {
            return Self::AllowAll;
        }

        let origins: Vec<String> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();

        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            Self::AllowAll
        } else {
            Self::AllowList(origins)
        }
    }

    /// Build the `tower-http` layer that enforces the policy.
    ///
    /// Credentials are only allowed for listed origins, since browsers reject them alongside a
    /// wildcard origin.
    pub fn layer(&self) -> CorsLayer {
        match self {
            Self::AllowAll => CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
            Self::AllowList(origins) => {
                let origins: Vec<HeaderValue> = origins
                    .iter()
                    .filter_map(|origin| match origin.parse::<HeaderValue>() {
                        Ok(origin) => Some(origin),
                        Err(error) => {
                            tracing::warn!("Ignoring invalid CORS origin {origin:?}: {error}");
                            None
                        }
                    })
                    .collect();

                // Wildcard methods and headers cannot be combined with credentials.
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods(AllowMethods::mirror_request())
                    .allow_headers(AllowHeaders::mirror_request())
                    .allow_credentials(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CorsPolicy;

    #[test]
    fn debug_allows_all_origins() {
        assert_eq!(
            CorsPolicy::new(true, "https://example.com"),
            CorsPolicy::AllowAll
        );
    }

    #[test]
    fn wildcard_allows_all_origins() {
        assert_eq!(CorsPolicy::new(false, "*"), CorsPolicy::AllowAll);
        assert_eq!(CorsPolicy::new(false, ""), CorsPolicy::AllowAll);
    }

    #[test]
    fn parses_comma_separated_origins() {
        assert_eq!(
            CorsPolicy::new(false, "https://a.example, https://b.example,"),
            CorsPolicy::AllowList(vec![
                "https://a.example".to_owned(),
                "https://b.example".to_owned()
            ])
        );
    }
}
