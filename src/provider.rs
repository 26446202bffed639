//! CI provider capability interface and its Travis implementation.
//!
//! Tools that manage many repositories talk to CI backends through
//! [`CiProvider`]. [`TravisProvider`] resolves short repository names
//! against a default organization and forwards each call to the Travis
//! API, re-fetching remote state every time.

use async_trait::async_trait;

use crate::client::{Endpoint, TravisClient};
use crate::config::{Credential, ProviderConfig};
use crate::error::{Result, TravisError};
use crate::models::{Repository, User};
use crate::name_resolver::RepoNameResolver;
use crate::sync::{wait_for_sync, SyncOptions, SyncProgress};
use crate::traits::{Activate, Get};

/// Result of an operation on a repository that may not exist upstream.
///
/// A missing repository is an expected answer, not an error: callers often
/// probe for repositories the CI side has not picked up yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoOutcome<T> {
    /// The repository exists and the operation ran.
    Found(T),
    /// The CI provider does not know this repository (qualified name).
    NotFound(String),
}

impl<T> RepoOutcome<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// The value, if the repository was found.
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound(_) => None,
        }
    }

    /// Map the found value.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> RepoOutcome<U> {
        match self {
            Self::Found(value) => RepoOutcome::Found(f(value)),
            Self::NotFound(name) => RepoOutcome::NotFound(name),
        }
    }

    /// Turn a repository 404 into `NotFound`; pass every other error on.
    fn from_lookup(result: Result<T>, qualified: String) -> Result<Self> {
        match result {
            Ok(value) => Ok(Self::Found(value)),
            Err(err) if err.is_not_found() => {
                tracing::debug!(repo = %qualified, "repository not known to CI provider");
                Ok(Self::NotFound(qualified))
            }
            Err(err) => Err(err),
        }
    }
}

/// Operations every CI backend supports.
#[async_trait]
pub trait CiProvider: Send + Sync {
    /// Constant identifier of the backend.
    fn name(&self) -> &'static str;

    /// Turn CI on for `repo`.
    async fn enable_ci(&self, repo: &str) -> Result<RepoOutcome<Repository>>;

    /// Turn CI off for `repo`.
    async fn disable_ci(&self, repo: &str) -> Result<RepoOutcome<Repository>>;

    /// Whether CI is currently on for `repo`.
    async fn ci_enabled(&self, repo: &str) -> Result<RepoOutcome<bool>>;

    /// Start an account sync with GitHub. With `wait`, block until it
    /// finishes; `on_progress` is called once per poll while it runs.
    async fn sync(
        &self,
        wait: Option<&SyncOptions>,
        on_progress: Option<SyncProgress<'_>>,
    ) -> Result<()>;

    /// Whether an account sync is running.
    async fn is_syncing(&self) -> Result<bool>;
}

/// [`CiProvider`] backed by the Travis CI API.
#[derive(Debug, Clone)]
pub struct TravisProvider {
    client: TravisClient,
    resolver: RepoNameResolver,
}

impl TravisProvider {
    /// Identifier returned by [`CiProvider::name`].
    pub const NAME: &'static str = "travis";

    /// Wrap an existing client.
    pub fn new(client: TravisClient, default_org: Option<&str>) -> Self {
        Self {
            client,
            resolver: RepoNameResolver::new(default_org),
        }
    }

    /// Provider for travis-ci.org with a Travis token.
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` if the token is empty.
    pub fn with_travis_access_token(access_token: &str, default_org: Option<&str>) -> Result<Self> {
        let client = TravisClient::for_endpoint(access_token, &Endpoint::Org)?;
        Ok(Self::new(client, default_org))
    }

    /// Provider for travis-ci.com with a Travis Pro token.
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` if the token is empty.
    pub fn with_travis_pro_access_token(
        access_token: &str,
        default_org: Option<&str>,
    ) -> Result<Self> {
        let client = TravisClient::for_endpoint(access_token, &Endpoint::Pro)?;
        Ok(Self::new(client, default_org))
    }

    /// Provider authenticated by exchanging a GitHub token for a Travis token.
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` if the token is empty (before any request),
    /// or the API error if Travis rejects the token.
    pub async fn with_github_access_token(
        github_token: &str,
        endpoint: &Endpoint,
        default_org: Option<&str>,
    ) -> Result<Self> {
        let client = TravisClient::exchange_github_token(github_token, endpoint).await?;
        Ok(Self::new(client, default_org))
    }

    /// Build a provider from configuration.
    ///
    /// # Errors
    ///
    /// Returns `UnknownProvider` or `ConfigMissing` for bad configuration
    /// without touching the network, or the token exchange error.
    #[tracing::instrument]
    pub async fn from_config(config: &ProviderConfig) -> Result<Self> {
        let endpoint = config.endpoint()?;
        let org = config.github_organization.as_deref();

        match config.credential()? {
            Credential::Travis(token) => {
                let client = TravisClient::for_endpoint(&token, &endpoint)?;
                Ok(Self::new(client, org))
            }
            Credential::GitHub(token) => {
                Self::with_github_access_token(&token, &endpoint, org).await
            }
        }
    }

    /// The underlying API client.
    pub fn client(&self) -> &TravisClient {
        &self.client
    }

    /// The resolver used to qualify repository names.
    pub fn resolver(&self) -> &RepoNameResolver {
        &self.resolver
    }

    /// The current Travis user, fetched fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn current_user(&self) -> Result<User> {
        User::current(&self.client).await
    }

    async fn set_active(&self, repo: &str, active: bool) -> Result<RepoOutcome<Repository>> {
        let qualified = self.resolver.full_name(repo)?;
        let result = Repository::set_active(&self.client, qualified.clone(), active).await;
        RepoOutcome::from_lookup(result, qualified)
    }
}

#[async_trait]
impl CiProvider for TravisProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    #[tracing::instrument(skip(self))]
    async fn enable_ci(&self, repo: &str) -> Result<RepoOutcome<Repository>> {
        self.set_active(repo, true).await
    }

    #[tracing::instrument(skip(self))]
    async fn disable_ci(&self, repo: &str) -> Result<RepoOutcome<Repository>> {
        self.set_active(repo, false).await
    }

    #[tracing::instrument(skip(self))]
    async fn ci_enabled(&self, repo: &str) -> Result<RepoOutcome<bool>> {
        let qualified = self.resolver.full_name(repo)?;
        let result = Repository::get(&self.client, qualified.clone()).await;
        Ok(RepoOutcome::from_lookup(result, qualified)?.map(|r| r.active))
    }

    #[tracing::instrument(skip(self, wait, on_progress), fields(blocking = wait.is_some()))]
    async fn sync(
        &self,
        wait: Option<&SyncOptions>,
        on_progress: Option<SyncProgress<'_>>,
    ) -> Result<()> {
        let user = User::current(&self.client).await?;
        User::sync(&self.client, user.id).await?;

        if let Some(options) = wait {
            wait_for_sync(&self.client, options, on_progress).await?;
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn is_syncing(&self) -> Result<bool> {
        Ok(User::current(&self.client).await?.is_syncing)
    }
}

impl From<TravisProvider> for Box<dyn CiProvider> {
    fn from(provider: TravisProvider) -> Self {
        Box::new(provider)
    }
}
