//! HTTPS API endpoints imported from a backend stack.

use http::Uri;
use http::uri::Scheme;

use crate::registry::OutputValue;

/// An HTTPS API base URL split into the parts a CDN origin needs.
///
/// # Examples
///
/// ```
/// use finance_infra_synth::ApiEndpoint;
/// use finance_infra_synth::registry::OutputValue;
///
/// let api = ApiEndpoint::parse_output("https://abc123.execute-api.ap-northeast-1.amazonaws.com/Prod/").unwrap();
/// assert_eq!(api.host(), "abc123.execute-api.ap-northeast-1.amazonaws.com");
/// assert_eq!(api.stage_path(), Some("/Prod"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    url: String,
    host: String,
    stage_path: String,
}

impl ApiEndpoint {
    /// The URL as published by the backend stack.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Host name, used as the origin domain.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Stage path without trailing slash, or `None` when the API is served
    /// from the root.
    #[must_use]
    pub fn stage_path(&self) -> Option<&str> {
        (!self.stage_path.is_empty()).then_some(self.stage_path.as_str())
    }
}

impl OutputValue for ApiEndpoint {
    fn parse_output(raw: &str) -> Result<Self, String> {
        let uri: Uri = raw
            .trim()
            .parse()
            .map_err(|e| format!("'{raw}' is not a valid URL: {e}"))?;

        if uri.scheme() != Some(&Scheme::HTTPS) {
            return Err(format!("'{raw}' must use https"));
        }
        let host = uri
            .host()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| format!("'{raw}' has no host"))?;
        // The API origin is declared with HTTPSPort 443.
        if uri.port_u16().is_some_and(|port| port != 443) {
            return Err(format!("'{raw}' must use https port 443"));
        }
        if uri.query().is_some() {
            return Err(format!("'{raw}' must not carry a query string"));
        }

        Ok(Self {
            url: raw.trim().to_owned(),
            host: host.to_owned(),
            stage_path: uri.path().trim_end_matches('/').to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_parse_stage_url() {
        let api =
            ApiEndpoint::parse_output("https://abc.execute-api.us-east-1.amazonaws.com/Prod/")
                .unwrap();
        assert_eq!(api.host(), "abc.execute-api.us-east-1.amazonaws.com");
        assert_eq!(api.stage_path(), Some("/Prod"));
        assert_eq!(api.url(), "https://abc.execute-api.us-east-1.amazonaws.com/Prod/");
    }

    #[test]
    fn test_should_parse_root_url() {
        let api = ApiEndpoint::parse_output("https://api.example.com").unwrap();
        assert_eq!(api.stage_path(), None);
        let api = ApiEndpoint::parse_output("https://api.example.com/").unwrap();
        assert_eq!(api.stage_path(), None);
    }

    #[test]
    fn test_should_accept_explicit_default_port() {
        let api = ApiEndpoint::parse_output("https://api.example.com:443/Prod").unwrap();
        assert_eq!(api.host(), "api.example.com");
        assert_eq!(api.stage_path(), Some("/Prod"));
    }

    #[test]
    fn test_should_reject_unusable_urls() {
        for raw in [
            "http://api.example.com/Prod",
            "api.example.com/Prod",
            "https://api.example.com:8443/Prod",
            "https://api.example.com/Prod?x=1",
            "not a url",
        ] {
            assert!(ApiEndpoint::parse_output(raw).is_err(), "{raw} should be rejected");
        }
    }
}
