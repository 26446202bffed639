//! Travis CI provider.
//!
//! Enable, disable, and query continuous integration for GitHub
//! repositories on Travis CI, and trigger or wait for the account-level
//! GitHub sync. Talks to the Travis v3 REST API directly.
//!
//! # Quick Start
//!
//! ```no_run
//! use travis_ci_provider::{CiProvider, RepoOutcome, SyncOptions, TravisProvider};
//!
//! #[tokio::main]
//! async fn main() -> travis_ci_provider::Result<()> {
//!     let provider = TravisProvider::with_travis_access_token("travis-token", Some("acme"))?;
//!
//!     // Short names are qualified with the default organization
//!     match provider.enable_ci("widgets").await? {
//!         RepoOutcome::Found(repo) => println!("{} active: {}", repo.slug, repo.active),
//!         RepoOutcome::NotFound(name) => println!("{name} is not on Travis yet"),
//!     }
//!
//!     // Refresh Travis' view of GitHub and wait for it to finish
//!     provider.sync(Some(&SyncOptions::default()), None).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`TravisClient`] - authenticated HTTP client
//! - [`Get`], [`List`], [`Activate`] - operations implemented by model types
//!   such as [`Repository`] and [`User`]
//! - [`CiProvider`] - backend-neutral capability interface, implemented by
//!   [`TravisProvider`]
//!
//! A repository Travis does not know is reported as
//! [`RepoOutcome::NotFound`]; every other failure is returned as an error.
//!
//! # Configuration
//!
//! [`ProviderConfig::from_env`] reads:
//!
//! - `TRAVIS_TOKEN` - Travis API token
//! - `GITHUB_TOKEN` - GitHub token, exchanged when `TRAVIS_TOKEN` is unset
//! - `TRAVIS_PROVIDER` (optional) - `travis` (default) or `travis_pro`
//! - `GITHUB_ORG` (optional) - default organization for short names
//! - `TRAVIS_API_URL` (optional) - base URL override

mod client;
mod config;
mod error;
mod models;
mod name_resolver;
mod pagination;
mod provider;
mod sync;
mod traits;

pub mod cli;
pub mod output;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{Endpoint, TravisClient, ORG_API_URL, PRO_API_URL};
pub use config::{Credential, ProviderConfig, ProviderKind};
pub use error::{Result, TravisError};
pub use name_resolver::RepoNameResolver;
pub use pagination::{Page, PaginationInfo, PaginationParams};
pub use provider::{CiProvider, RepoOutcome, TravisProvider};
pub use sync::{wait_for_sync, SyncOptions, SyncProgress, DEFAULT_POLL_INTERVAL, DEFAULT_SYNC_TIMEOUT};

// Re-export traits
pub use traits::{Activate, Get, List};

// Re-export models
pub use models::{BranchRef, Repository, RepositoryListQuery, RepositoryOwner, User};
