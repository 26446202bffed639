//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::TravisClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// Implement this trait for entity types that can be fetched individually
/// by a unique identifier (a repository slug, a user id).
///
/// # Example
///
/// ```ignore
/// use travis_ci_provider::{TravisClient, Repository, Get};
///
/// let client = TravisClient::from_env()?;
/// let repo = Repository::get(&client, "acme/widgets".to_string()).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity (e.g., an `org/repo` slug).
    type Id;

    /// Fetch the entity by ID.
    ///
    /// Every call goes to the network; nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if Travis does not know the entity, or another
    /// error if the request fails.
    async fn get(client: &TravisClient, id: Self::Id) -> Result<Self>;
}
