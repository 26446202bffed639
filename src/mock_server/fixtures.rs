//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use crate::{BranchRef, Repository, RepositoryOwner, User};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Repository Fixtures
    // =========================================================================

    /// Create a public repository on the `main` branch.
    ///
    /// The id is derived from the slug so fixtures stay stable across runs.
    pub fn repository(slug: &str, active: bool) -> Repository {
        let (owner, name) = slug.split_once('/').unwrap_or(("test-org", slug));
        Repository {
            id: slug.bytes().map(u64::from).sum(),
            name: name.to_string(),
            slug: slug.to_string(),
            active,
            private: false,
            description: None,
            github_id: None,
            owner: Some(RepositoryOwner {
                id: None,
                login: owner.to_string(),
            }),
            default_branch: Some(BranchRef {
                name: "main".to_string(),
            }),
        }
    }

    /// Create a private repository.
    pub fn private_repository(slug: &str, active: bool) -> Repository {
        let mut repo = Self::repository(slug, active);
        repo.private = true;
        repo
    }

    // =========================================================================
    // User Fixtures
    // =========================================================================

    /// Create an idle user that has never synced.
    pub fn user(id: u64, login: &str) -> User {
        User {
            id,
            login: login.to_string(),
            name: None,
            github_id: None,
            is_syncing: false,
            synced_at: None,
        }
    }

    // =========================================================================
    // Scenario Builders
    // =========================================================================

    /// Create a default set of test data for common scenarios.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// A complete test scenario with related entities.
pub struct DefaultScenario {
    pub user: User,
    pub repositories: Vec<Repository>,
    /// Polls a sync keeps reporting `is_syncing` for.
    pub sync_polls: u32,
}

impl DefaultScenario {
    fn new() -> Self {
        let user = Fixtures::user(1, "test-user");

        let repositories = vec![
            Fixtures::repository("test-org/active-repo", true),
            Fixtures::repository("test-org/inactive-repo", false),
            Fixtures::private_repository("test-org/private-repo", false),
            Fixtures::repository("test-user/dotfiles", false),
        ];

        Self {
            user,
            repositories,
            sync_polls: 2,
        }
    }
}
