//! Provider configuration.
//!
//! A [`ProviderConfig`] names the Travis tier, carries one of two
//! credentials, and the default GitHub organization used to qualify short
//! repository names. It can be read from a string map, deserialized with
//! serde, or taken from the environment.

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::client::Endpoint;
use crate::error::{Result, TravisError};

/// Travis tiers this crate knows how to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// travis-ci.org
    #[default]
    Travis,
    /// travis-ci.com
    TravisPro,
}

impl ProviderKind {
    /// The endpoint for this tier.
    pub fn endpoint(self) -> Endpoint {
        match self {
            Self::Travis => Endpoint::Org,
            Self::TravisPro => Endpoint::Pro,
        }
    }
}

impl FromStr for ProviderKind {
    type Err = TravisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "travis" => Ok(Self::Travis),
            "travis_pro" | "travis-pro" => Ok(Self::TravisPro),
            _ => Err(TravisError::UnknownProvider(s.to_string())),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Travis => "travis",
            Self::TravisPro => "travis_pro",
        })
    }
}

/// The credential a provider will authenticate with.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// A Travis API token, used directly.
    Travis(String),
    /// A GitHub personal access token, exchanged for a Travis token.
    GitHub(String),
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Travis(_) => f.write_str("Credential::Travis(..)"),
            Self::GitHub(_) => f.write_str("Credential::GitHub(..)"),
        }
    }
}

/// Configuration for building a Travis provider.
#[derive(Clone, Default, Deserialize)]
pub struct ProviderConfig {
    /// Provider name; kept as text so unknown names surface as
    /// `UnknownProvider` instead of a deserialization error.
    #[serde(default)]
    pub provider: Option<String>,

    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default)]
    pub github_access_token: Option<String>,

    /// Default organization for short repository names.
    #[serde(default)]
    pub github_organization: Option<String>,

    /// Overrides the tier's base URL.
    #[serde(default)]
    pub api_url: Option<Url>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("github_organization", &self.github_organization)
            .field("api_url", &self.api_url.as_ref().map(Url::as_str))
            .finish_non_exhaustive()
    }
}

impl ProviderConfig {
    /// Read configuration from a string map with the keys `provider`,
    /// `access_token`, `github_access_token`, `github_organization` and
    /// `api_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_url` is not a valid URL.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| map.get(key).cloned();
        let api_url = get("api_url").map(|u| Url::parse(&u)).transpose()?;

        Ok(Self {
            provider: get("provider"),
            access_token: get("access_token"),
            github_access_token: get("github_access_token"),
            github_organization: get("github_organization"),
            api_url,
        })
    }

    /// Read configuration from environment variables.
    ///
    /// - `TRAVIS_PROVIDER` (optional) - `travis` or `travis_pro`
    /// - `TRAVIS_TOKEN` - Travis API token
    /// - `GITHUB_TOKEN` - GitHub token, used when `TRAVIS_TOKEN` is unset
    /// - `GITHUB_ORG` (optional) - default organization
    /// - `TRAVIS_API_URL` (optional) - base URL override
    ///
    /// # Errors
    ///
    /// Returns an error if `TRAVIS_API_URL` is not a valid URL.
    pub fn from_env() -> Result<Self> {
        let var = |key: &str| env::var(key).ok().filter(|v| !v.trim().is_empty());
        let api_url = var("TRAVIS_API_URL").map(|u| Url::parse(&u)).transpose()?;

        Ok(Self {
            provider: var("TRAVIS_PROVIDER"),
            access_token: var("TRAVIS_TOKEN"),
            github_access_token: var("GITHUB_TOKEN"),
            github_organization: var("GITHUB_ORG"),
            api_url,
        })
    }

    /// The configured tier; `travis` when unset.
    ///
    /// # Errors
    ///
    /// Returns `UnknownProvider` for any other name.
    pub fn provider_kind(&self) -> Result<ProviderKind> {
        match self.provider.as_deref() {
            None => Ok(ProviderKind::default()),
            Some(name) => name.parse(),
        }
    }

    /// The endpoint to talk to, honoring `api_url`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownProvider` for an unrecognized provider name.
    pub fn endpoint(&self) -> Result<Endpoint> {
        let kind = self.provider_kind()?;
        Ok(match &self.api_url {
            Some(url) => Endpoint::Custom(url.clone()),
            None => kind.endpoint(),
        })
    }

    /// The credential to authenticate with. A Travis token wins over a
    /// GitHub token.
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when neither token is set to a non-blank value.
    pub fn credential(&self) -> Result<Credential> {
        let non_blank = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
        };

        if let Some(token) = non_blank(&self.access_token) {
            return Ok(Credential::Travis(token));
        }
        if let Some(token) = non_blank(&self.github_access_token) {
            return Ok(Credential::GitHub(token));
        }
        Err(TravisError::ConfigMissing(
            "either access_token or github_access_token must be set".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_provider_names() {
        assert_eq!("travis".parse::<ProviderKind>().unwrap(), ProviderKind::Travis);
        assert_eq!(
            "travis_pro".parse::<ProviderKind>().unwrap(),
            ProviderKind::TravisPro
        );
        assert_eq!(ProviderKind::TravisPro.to_string(), "travis_pro");
    }

    #[test]
    fn test_unknown_provider_is_config_error() {
        let config = ProviderConfig::from_map(&map(&[
            ("provider", "unknown"),
            ("access_token", "t"),
        ]))
        .unwrap();

        let err = config.provider_kind().unwrap_err();
        assert!(matches!(err, TravisError::UnknownProvider(ref p) if p == "unknown"));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_travis_token_preferred_over_github_token() {
        let config = ProviderConfig::from_map(&map(&[
            ("access_token", "travis-tok"),
            ("github_access_token", "gh-tok"),
        ]))
        .unwrap();

        assert_eq!(
            config.credential().unwrap(),
            Credential::Travis("travis-tok".into())
        );
    }

    #[test]
    fn test_github_token_used_when_travis_token_blank() {
        let config = ProviderConfig::from_map(&map(&[
            ("access_token", "  "),
            ("github_access_token", "gh-tok"),
        ]))
        .unwrap();

        assert_eq!(config.credential().unwrap(), Credential::GitHub("gh-tok".into()));
    }

    #[test]
    fn test_missing_credential() {
        let config = ProviderConfig::from_map(&map(&[("provider", "travis")])).unwrap();
        assert!(matches!(
            config.credential(),
            Err(TravisError::ConfigMissing(_))
        ));
    }

    #[test]
    fn test_deserialize_from_json() {
        let config: ProviderConfig = serde_json::from_value(serde_json::json!({
            "provider": "travis_pro",
            "access_token": "tok",
            "github_organization": "acme"
        }))
        .unwrap();

        assert_eq!(config.provider_kind().unwrap(), ProviderKind::TravisPro);
        assert_eq!(config.endpoint().unwrap(), Endpoint::Pro);
        assert_eq!(config.github_organization.as_deref(), Some("acme"));
    }

    #[test]
    fn test_api_url_overrides_tier() {
        let config = ProviderConfig::from_map(&map(&[
            ("provider", "travis_pro"),
            ("api_url", "http://127.0.0.1:9999"),
        ]))
        .unwrap();

        assert!(matches!(config.endpoint().unwrap(), Endpoint::Custom(_)));
    }

    #[test]
    fn test_debug_hides_tokens() {
        let config = ProviderConfig::from_map(&map(&[
            ("access_token", "secret-travis"),
            ("github_access_token", "secret-gh"),
        ]))
        .unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
    }
}
