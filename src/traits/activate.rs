//! Activate trait for switching CI on and off.

use async_trait::async_trait;

use crate::client::TravisClient;
use crate::error::Result;

/// Turn CI builds on or off for an entity.
///
/// # Example
///
/// ```ignore
/// use travis_ci_provider::{TravisClient, Repository, Activate};
///
/// let client = TravisClient::from_env()?;
/// let repo = Repository::activate(&client, "acme/widgets".to_string()).await?;
/// assert!(repo.active);
/// ```
#[async_trait]
pub trait Activate: Sized + Send {
    /// The entity identifier.
    type Id: Send;

    /// Enable builds and return the updated entity.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if Travis does not know the entity, or another
    /// error if the request fails.
    async fn activate(client: &TravisClient, id: Self::Id) -> Result<Self>;

    /// Disable builds and return the updated entity.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if Travis does not know the entity, or another
    /// error if the request fails.
    async fn deactivate(client: &TravisClient, id: Self::Id) -> Result<Self>;

    /// Enable or disable depending on `active`.
    ///
    /// # Errors
    ///
    /// Same as [`Activate::activate`] and [`Activate::deactivate`].
    async fn set_active(client: &TravisClient, id: Self::Id, active: bool) -> Result<Self> {
        if active {
            Self::activate(client, id).await
        } else {
            Self::deactivate(client, id).await
        }
    }
}
