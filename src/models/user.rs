//! Authenticated user model and account sync.

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::client::TravisClient;
use crate::error::{Result, TravisError};
use crate::models::label_not_found;

/// A Travis user account.
///
/// `is_syncing` reports whether Travis is currently refreshing its view of
/// the user's GitHub repositories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,

    /// GitHub login.
    pub login: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub github_id: Option<u64>,

    /// Whether a GitHub sync is in progress.
    #[serde(default)]
    pub is_syncing: bool,

    /// When the last sync finished.
    #[serde(default)]
    pub synced_at: Option<DateTime<Utc>>,
}

impl User {
    /// Fetch the user the client is authenticated as.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (for example, a rejected token).
    #[tracing::instrument(skip(client))]
    pub async fn current(client: &TravisClient) -> Result<Self> {
        let response = client.get("user").await?;
        let user: User = response.json().await.map_err(TravisError::HttpError)?;
        tracing::debug!(login = %user.login, is_syncing = user.is_syncing, "fetched current user");
        Ok(user)
    }

    /// Ask Travis to resync this user's repositories from GitHub.
    ///
    /// Returns as soon as Travis has accepted the request. A sync that is
    /// already running counts as accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[tracing::instrument(skip(client))]
    pub async fn sync(client: &TravisClient, user_id: u64) -> Result<()> {
        let path = format!("user/{user_id}/sync");
        match client.post_empty(&path).await {
            Ok(_) => {
                tracing::info!(user_id, "requested GitHub sync");
                Ok(())
            }
            Err(TravisError::ApiError {
                status_code: Some(code),
                message,
            }) if code == StatusCode::CONFLICT.as_u16() => {
                tracing::debug!(user_id, %message, "sync already in progress");
                Ok(())
            }
            Err(e) => Err(label_not_found(e, "User", &user_id.to_string())),
        }
    }
}
