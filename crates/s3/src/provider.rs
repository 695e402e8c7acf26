//! Provider factory
//!
//! Maps a provider identifier to endpoint configuration. Each supported
//! backend is one variant; selection happens once at startup from the
//! `--provider` flag. Any identifier that is a literal `http(s)://` URL
//! selects an arbitrary S3-compatible endpoint.

use url::Url;

use cs_core::{Error, Result};

/// Valid provider identifiers, shown in usage errors
pub const KNOWN_PROVIDERS: &[&str] = &["aws", "wasabi", "digitalocean"];

/// A storage backend selected by the `--provider` flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provider {
    /// AWS S3, using the SDK's default endpoints
    Aws,

    /// Wasabi hot cloud storage
    Wasabi,

    /// DigitalOcean Spaces
    DigitalOcean,

    /// Any other S3-compatible service, addressed by endpoint URL
    Custom(Url),
}

impl Provider {
    /// Resolve a provider identifier.
    ///
    /// Identifiers starting with `http://` or `https://` are treated as
    /// custom endpoints; anything else must be a known provider name.
    pub fn parse(id: &str) -> Result<Self> {
        match id.to_ascii_lowercase().as_str() {
            "aws" => Ok(Provider::Aws),
            "wasabi" => Ok(Provider::Wasabi),
            "digitalocean" => Ok(Provider::DigitalOcean),
            other if other.starts_with("http://") || other.starts_with("https://") => {
                Ok(Provider::Custom(Url::parse(id)?))
            }
            _ => Err(Error::UnsupportedProvider(format!(
                "{id} (valid providers: {}, or an http(s):// endpoint URL)",
                KNOWN_PROVIDERS.join(", ")
            ))),
        }
    }

    /// Default region used when `--region` is not given
    pub fn default_region(&self) -> &str {
        match self {
            Provider::DigitalOcean => "nyc3",
            _ => "us-east-1",
        }
    }

    /// Endpoint URL for the given region.
    ///
    /// `None` means the SDK's own endpoint resolution applies (AWS).
    pub fn endpoint(&self, region: &str) -> Option<String> {
        match self {
            Provider::Aws => None,
            Provider::Wasabi => Some(format!("https://s3.{region}.wasabisys.com")),
            Provider::DigitalOcean => Some(format!("https://{region}.digitaloceanspaces.com")),
            Provider::Custom(url) => Some(url.as_str().trim_end_matches('/').to_string()),
        }
    }

    /// Path-style addressing is required by most non-AWS backends
    pub fn force_path_style(&self) -> bool {
        !matches!(self, Provider::Aws)
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Aws => write!(f, "aws"),
            Provider::Wasabi => write!(f, "wasabi"),
            Provider::DigitalOcean => write!(f, "digitalocean"),
            Provider::Custom(url) => write!(f, "{url}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_providers() {
        assert_eq!(Provider::parse("aws").unwrap(), Provider::Aws);
        assert_eq!(Provider::parse("AWS").unwrap(), Provider::Aws);
        assert_eq!(Provider::parse("wasabi").unwrap(), Provider::Wasabi);
        assert_eq!(
            Provider::parse("digitalocean").unwrap(),
            Provider::DigitalOcean
        );
    }

    #[test]
    fn test_parse_custom_endpoint() {
        let provider = Provider::parse("http://localhost:9000").unwrap();
        assert!(matches!(provider, Provider::Custom(_)));
        assert_eq!(
            provider.endpoint("us-east-1").as_deref(),
            Some("http://localhost:9000")
        );
        assert!(provider.force_path_style());
    }

    #[test]
    fn test_parse_unknown_provider() {
        let err = Provider::parse("cloudfiles").unwrap_err();
        assert!(matches!(err, Error::UnsupportedProvider(_)));
        assert!(err.to_string().contains("wasabi"));
    }

    #[test]
    fn test_parse_malformed_url() {
        let err = Provider::parse("http://[bad").unwrap_err();
        assert!(matches!(err, Error::InvalidEndpoint(_)));
    }

    #[test]
    fn test_endpoints_use_region() {
        assert_eq!(Provider::Aws.endpoint("eu-west-1"), None);
        assert_eq!(
            Provider::Wasabi.endpoint("eu-central-1").as_deref(),
            Some("https://s3.eu-central-1.wasabisys.com")
        );
        assert_eq!(
            Provider::DigitalOcean.endpoint("ams3").as_deref(),
            Some("https://ams3.digitaloceanspaces.com")
        );
    }

    #[test]
    fn test_default_regions() {
        assert_eq!(Provider::Aws.default_region(), "us-east-1");
        assert_eq!(Provider::DigitalOcean.default_region(), "nyc3");
    }
}
