//! Basic example demonstrating the Travis CI provider.
//!
//! Run with:
//! ```
//! TRAVIS_TOKEN=your-token GITHUB_ORG=your-org cargo run --example basic -- repo-name
//! ```

use std::time::Duration;

use travis_ci_provider::{
    CiProvider, ProviderConfig, RepoOutcome, SyncOptions, SyncProgress, TravisProvider, User,
};

#[tokio::main]
async fn main() -> travis_ci_provider::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    let repo = std::env::args().nth(1).unwrap_or_else(|| "hello-world".to_string());

    println!("Creating Travis provider...");
    let config = ProviderConfig::from_env()?;
    let provider = TravisProvider::from_config(&config).await?;
    println!("Connected to: {}", provider.client().base_url());

    let user = provider.current_user().await?;
    println!("Authenticated as {}", user.login);

    println!("\n--- CI status for {repo} ---");
    match provider.ci_enabled(&repo).await? {
        RepoOutcome::Found(active) => println!("CI enabled: {active}"),
        RepoOutcome::NotFound(name) => {
            println!("{name} is not known to Travis, syncing with GitHub...");

            let options = SyncOptions::default().with_timeout(Duration::from_secs(120));
            let mut report = |user: &User| println!("  still syncing {}...", user.login);
            provider
                .sync(Some(&options), Some(&mut report as SyncProgress<'_>))
                .await?;
        }
    }

    println!("\n--- Enabling CI ---");
    match provider.enable_ci(&repo).await? {
        RepoOutcome::Found(r) => println!("{} active: {}", r.slug, r.active),
        RepoOutcome::NotFound(name) => println!("{name} still not found after sync"),
    }

    println!("\nDone!");
    Ok(())
}
