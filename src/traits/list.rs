//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::TravisClient;
use crate::error::Result;
use crate::pagination::Page;

/// Default page size for list operations.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// List/filter entities with pagination support.
///
/// # Example
///
/// ```ignore
/// use travis_ci_provider::{TravisClient, Repository, RepositoryListQuery, List};
///
/// let client = TravisClient::from_env()?;
/// let query = RepositoryListQuery::for_owner("acme");
///
/// // Fetch a single page
/// let page = Repository::list_page(&client, &query, 0, 25).await?;
///
/// // Fetch all pages
/// let all = Repository::list_all(&client, &query).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Query parameters for filtering.
    type Query: Default + Send + Sync;

    /// List entities matching the query (single page).
    ///
    /// # Arguments
    ///
    /// * `client` - The Travis API client
    /// * `query` - Query parameters for filtering
    /// * `offset` - Index of the first item to return
    /// * `limit` - Maximum number of items to return
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list_page(
        client: &TravisClient,
        query: &Self::Query,
        offset: u32,
        limit: u32,
    ) -> Result<Page<Self>>;

    /// List all entities matching the query (fetches all pages).
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(client: &TravisClient, query: &Self::Query) -> Result<Vec<Self>> {
        let mut all_items = Vec::new();
        let mut offset = 0;
        let mut pages = 0;

        loop {
            let result = Self::list_page(client, query, offset, DEFAULT_PAGE_SIZE).await?;
            let has_more = result.has_more && !result.is_empty();
            offset = result.next_offset();
            all_items.extend(result.items);
            pages += 1;

            if !has_more {
                break;
            }

            // Safety limit to prevent infinite loops
            if pages >= MAX_PAGES {
                tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
                break;
            }
        }

        Ok(all_items)
    }
}
