//! Mock Travis API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Travis
//! v3 API for integration and end-to-end testing. Unlike wiremock which
//! mocks at the HTTP level per-test, this server maintains state across
//! requests: activating a repository sticks, and a requested sync keeps
//! reporting `is_syncing` for a configurable number of polls.
//!
//! # Example
//!
//! ```ignore
//! use travis_ci_provider::mock_server::MockServer;
//! use travis_ci_provider::{CiProvider, TravisClient, TravisProvider};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = TravisClient::new("test-token", server.url()).unwrap();
//!     let provider = TravisProvider::new(client, Some("test-org"));
//!
//!     provider.enable_ci("inactive-repo").await.unwrap();
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::MockState;
