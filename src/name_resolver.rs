//! Repository name qualification.
//!
//! Travis identifies repositories by their GitHub slug (`org/repo`). Callers
//! usually work with short names inside a single organization, so the
//! resolver fills in the default organization when one is missing.

use crate::error::{Result, TravisError};

/// Maps short repository names to `org/repo` slugs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoNameResolver {
    default_org: Option<String>,
}

impl RepoNameResolver {
    /// Create a resolver with an optional default organization.
    ///
    /// A blank organization is treated as absent.
    pub fn new(default_org: Option<&str>) -> Self {
        let default_org = default_org
            .map(str::trim)
            .filter(|org| !org.is_empty())
            .map(str::to_string);
        Self { default_org }
    }

    /// The organization used for short names, if any.
    pub fn default_org(&self) -> Option<&str> {
        self.default_org.as_deref()
    }

    /// Qualify `name` as `org/repo`.
    ///
    /// Names that already contain an organization are returned unchanged
    /// (apart from surrounding whitespace).
    ///
    /// # Errors
    ///
    /// Returns `InvalidRepoName` for empty names, names with empty segments
    /// or more than one `/`, and short names when no default organization
    /// is configured.
    pub fn full_name(&self, name: &str) -> Result<String> {
        let name = name.trim();
        let invalid = || TravisError::InvalidRepoName(name.to_string());

        match name.split_once('/') {
            Some((org, repo)) => {
                if org.is_empty() || repo.is_empty() || repo.contains('/') {
                    return Err(invalid());
                }
                Ok(name.to_string())
            }
            None if name.is_empty() => Err(invalid()),
            None => {
                let org = self.default_org.as_deref().ok_or_else(invalid)?;
                Ok(format!("{org}/{name}"))
            }
        }
    }
}
