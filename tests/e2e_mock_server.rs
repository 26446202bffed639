//! E2E tests using the mock Travis server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use std::time::Duration;

use travis_ci_provider::mock_server::{Fixtures, MockServer, MockState};
use travis_ci_provider::{
    CiProvider, List, ProviderConfig, RepoOutcome, Repository, RepositoryListQuery, SyncOptions,
    SyncProgress, TravisClient, TravisError, TravisProvider, User,
};

fn provider_for(server: &MockServer) -> TravisProvider {
    let client = TravisClient::new("test-token", server.url()).unwrap();
    TravisProvider::new(client, Some("test-org"))
}

fn fast_sync() -> SyncOptions {
    SyncOptions::default()
        .with_poll_interval(Duration::from_millis(10))
        .with_timeout(Duration::from_secs(5))
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    // Both servers should have different URLs
    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    // After shutdown, server should not respond
    let client = reqwest::Client::new();
    let result = client.get(format!("{}/health", url)).send().await;

    assert!(result.is_err());
}

// =============================================================================
// CI Toggle Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_enable_disable_roundtrip() {
    let server = MockServer::start().await;
    let provider = provider_for(&server);

    assert_eq!(
        provider.ci_enabled("inactive-repo").await.unwrap(),
        RepoOutcome::Found(false)
    );

    // Enabling twice leaves it enabled
    provider.enable_ci("inactive-repo").await.unwrap();
    provider.enable_ci("inactive-repo").await.unwrap();
    assert_eq!(
        provider.ci_enabled("inactive-repo").await.unwrap(),
        RepoOutcome::Found(true)
    );

    let disabled = provider.disable_ci("test-org/inactive-repo").await.unwrap();
    assert_eq!(disabled.map(|r| r.active), RepoOutcome::Found(false));
    assert_eq!(
        provider.ci_enabled("inactive-repo").await.unwrap(),
        RepoOutcome::Found(false)
    );

    server.shutdown().await;
}

#[tokio::test]
async fn test_unknown_repository_is_neutral() {
    let server = MockServer::start().await;
    let provider = provider_for(&server);

    let outcomes = [
        provider.enable_ci("ghost").await.unwrap().map(|_| ()),
        provider.disable_ci("ghost").await.unwrap().map(|_| ()),
        provider.ci_enabled("ghost").await.unwrap().map(|_| ()),
    ];

    for outcome in outcomes {
        assert_eq!(outcome, RepoOutcome::NotFound("test-org/ghost".to_string()));
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_each_call_sees_current_remote_state() {
    let server = MockServer::start().await;
    let provider = provider_for(&server);

    assert_eq!(
        provider.ci_enabled("active-repo").await.unwrap(),
        RepoOutcome::Found(true)
    );

    // Someone else flips the switch behind our back
    server
        .state()
        .write()
        .await
        .set_active("test-org/active-repo", false);

    assert_eq!(
        provider.ci_enabled("active-repo").await.unwrap(),
        RepoOutcome::Found(false)
    );

    server.shutdown().await;
}

// =============================================================================
// Sync Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_sync_makes_new_repository_visible() {
    let server = MockServer::start().await;
    let provider = provider_for(&server);

    assert!(provider.enable_ci("brand-new").await.unwrap().is_not_found());

    // The repository shows up on the GitHub side; Travis learns about it on sync
    server
        .state()
        .write()
        .await
        .repositories
        .insert(
            "test-org/brand-new".to_string(),
            Fixtures::repository("test-org/brand-new", false),
        );

    let mut polls = 0;
    let mut count = |_: &User| polls += 1;
    provider
        .sync(Some(&fast_sync()), Some(&mut count as SyncProgress<'_>))
        .await
        .unwrap();

    // Default scenario keeps the sync running for two polls
    assert_eq!(polls, 2);
    assert!(!provider.is_syncing().await.unwrap());

    let enabled = provider.enable_ci("brand-new").await.unwrap();
    assert!(enabled.found().unwrap().active);

    let state = server.state();
    let state = state.read().await;
    assert_eq!(state.syncs_requested, 1);
    assert!(state.user.synced_at.is_some());
    drop(state);

    server.shutdown().await;
}

#[tokio::test]
async fn test_non_blocking_sync_leaves_sync_running() {
    let state = MockState::new().with_sync_polls(5);
    let server = MockServer::with_state(state).await;
    let provider = provider_for(&server);

    provider.sync(None, None).await.unwrap();
    assert!(provider.is_syncing().await.unwrap());

    server.shutdown().await;
}

#[tokio::test]
async fn test_sync_timeout_against_slow_server() {
    let state = MockState::new().with_sync_polls(1_000);
    let server = MockServer::with_state(state).await;
    let provider = provider_for(&server);

    let options = SyncOptions::default()
        .with_poll_interval(Duration::from_millis(10))
        .with_timeout(Duration::from_millis(50));

    let err = provider.sync(Some(&options), None).await.unwrap_err();
    assert!(matches!(err, TravisError::SyncTimedOut { .. }));

    server.shutdown().await;
}

// =============================================================================
// Configuration Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_config_with_github_token_against_mock() {
    let state = MockState::new()
        .with_repository(Fixtures::repository("acme/widgets", true))
        .with_github_token("gh-token", "travis-token")
        .with_required_token("travis-token");
    let server = MockServer::with_state(state).await;

    let config: ProviderConfig = serde_json::from_value(serde_json::json!({
        "provider": "travis",
        "github_access_token": "gh-token",
        "github_organization": "acme",
        "api_url": server.url()
    }))
    .unwrap();

    let provider = TravisProvider::from_config(&config).await.unwrap();
    assert_eq!(
        provider.ci_enabled("widgets").await.unwrap(),
        RepoOutcome::Found(true)
    );

    server.shutdown().await;
}

#[tokio::test]
async fn test_list_owner_repositories() {
    let server = MockServer::start().await;
    let provider = provider_for(&server);

    let all = Repository::list_all(provider.client(), &RepositoryListQuery::for_owner("test-org"))
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    let active_only = RepositoryListQuery {
        active: Some(true),
        ..RepositoryListQuery::for_owner("test-org")
    };
    let page = Repository::list_page(provider.client(), &active_only, 0, 10)
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page.items[0].slug, "test-org/active-repo");

    server.shutdown().await;
}
