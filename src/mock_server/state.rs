//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Travis API server.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use super::fixtures::Fixtures;
use crate::{Repository, User};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug)]
pub struct MockState {
    /// Repositories indexed by slug (e.g., "test-org/active-repo").
    pub repositories: HashMap<String, Repository>,

    /// The authenticated user.
    pub user: User,

    /// How many `GET /user` responses report `is_syncing` after a sync starts.
    pub sync_polls: u32,

    /// Number of sync requests accepted so far.
    pub syncs_requested: u32,

    /// GitHub token -> Travis token pairs accepted by `POST /auth/github`.
    pub github_tokens: HashMap<String, String>,

    /// Optional authentication token. If set, requests must include this token.
    pub required_token: Option<String>,

    remaining_sync_polls: u32,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            repositories: HashMap::new(),
            user: Fixtures::user(1, "test-user"),
            sync_polls: 0,
            syncs_requested: 0,
            github_tokens: HashMap::new(),
            required_token: None,
            remaining_sync_polls: 0,
        }
    }
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a repository to the state.
    pub fn with_repository(mut self, repo: Repository) -> Self {
        self.repositories.insert(repo.slug.clone(), repo);
        self
    }

    /// Replace the authenticated user.
    pub fn with_user(mut self, user: User) -> Self {
        self.user = user;
        self
    }

    /// Set how many polls a sync stays running for.
    pub fn with_sync_polls(mut self, polls: u32) -> Self {
        self.sync_polls = polls;
        self
    }

    /// Accept `github_token` in exchange for `travis_token`.
    pub fn with_github_token(mut self, github_token: &str, travis_token: &str) -> Self {
        self.github_tokens
            .insert(github_token.to_string(), travis_token.to_string());
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Whether an `Authorization` header value grants access.
    pub fn is_authorized(&self, authorization: Option<&str>) -> bool {
        match &self.required_token {
            None => true,
            Some(required) => authorization
                .and_then(|h| h.strip_prefix("token "))
                .map_or(false, |t| t == required),
        }
    }

    /// Get a repository by slug.
    pub fn get_repository(&self, slug: &str) -> Option<&Repository> {
        self.repositories.get(slug)
    }

    /// Switch CI for a repository and return the updated version.
    pub fn set_active(&mut self, slug: &str, active: bool) -> Option<&Repository> {
        let repo = self.repositories.get_mut(slug)?;
        repo.active = active;
        Some(&*repo)
    }

    /// List an owner's repositories sorted by slug, optionally filtered by
    /// CI state.
    pub fn list_repositories(&self, owner: &str, active: Option<bool>) -> Vec<&Repository> {
        let mut repos: Vec<&Repository> = self
            .repositories
            .values()
            .filter(|r| r.org() == Some(owner))
            .filter(|r| active.map_or(true, |a| r.active == a))
            .collect();
        repos.sort_by(|a, b| a.slug.cmp(&b.slug));
        repos
    }

    /// Start a sync. Returns false if one is already running.
    pub fn start_sync(&mut self) -> bool {
        if self.user.is_syncing {
            return false;
        }
        self.syncs_requested += 1;
        if self.sync_polls == 0 {
            self.user.synced_at = Some(Utc::now());
        } else {
            self.user.is_syncing = true;
            self.remaining_sync_polls = self.sync_polls;
        }
        true
    }

    /// Answer a `GET /user` poll and advance a running sync.
    ///
    /// The returned snapshot is the state before this poll advanced it.
    pub fn poll_user(&mut self) -> User {
        let snapshot = self.user.clone();
        if self.user.is_syncing {
            self.remaining_sync_polls = self.remaining_sync_polls.saturating_sub(1);
            if self.remaining_sync_polls == 0 {
                self.user.is_syncing = false;
                self.user.synced_at = Some(Utc::now());
            }
        }
        snapshot
    }
}
