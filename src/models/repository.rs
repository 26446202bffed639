//! Repository model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::TravisClient;
use crate::error::{Result, TravisError};
use crate::models::label_not_found;
use crate::pagination::{Page, PaginationInfo, PaginationParams};
use crate::traits::{Activate, Get, List};

/// A GitHub repository as Travis sees it.
///
/// `active` is the CI switch: builds only run for active repositories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// Travis repository id.
    pub id: u64,

    /// Short repository name (e.g., "widgets").
    pub name: String,

    /// GitHub slug (e.g., "acme/widgets").
    pub slug: String,

    /// Whether builds are enabled.
    #[serde(default)]
    pub active: bool,

    /// Whether the GitHub repository is private.
    #[serde(default)]
    pub private: bool,

    #[serde(default)]
    pub description: Option<String>,

    /// GitHub repository id.
    #[serde(default)]
    pub github_id: Option<u64>,

    /// Owning user or organization.
    #[serde(default)]
    pub owner: Option<RepositoryOwner>,

    #[serde(default)]
    pub default_branch: Option<BranchRef>,
}

/// Minimal owner representation embedded in a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryOwner {
    #[serde(default)]
    pub id: Option<u64>,
    pub login: String,
}

/// Minimal branch representation embedded in a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchRef {
    pub name: String,
}

impl Repository {
    /// Get the owning organization from the slug.
    pub fn org(&self) -> Option<&str> {
        self.slug.split_once('/').map(|(org, _)| org)
    }

    /// Default branch name, if Travis reported one.
    pub fn default_branch_name(&self) -> Option<&str> {
        self.default_branch.as_ref().map(|b| b.name.as_str())
    }
}

/// Path segment for a repository; Travis expects the slug with `/` escaped.
fn repo_path(slug: &str) -> String {
    format!("repo/{}", urlencoding::encode(slug))
}

/// Query parameters for listing an owner's repositories.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepositoryListQuery {
    /// GitHub login of the user or organization.
    #[serde(skip)]
    pub owner: String,

    /// Only return repositories with this CI state.
    #[serde(rename = "repository.active", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    /// Sort order (e.g., "name", "slug").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
}

impl RepositoryListQuery {
    /// Query all repositories of `owner`.
    pub fn for_owner(owner: &str) -> Self {
        Self {
            owner: owner.to_string(),
            ..Default::default()
        }
    }
}

/// API response wrapper for listing repositories.
#[derive(Debug, Deserialize)]
struct RepositoryListResponse {
    repositories: Vec<Repository>,
    #[serde(rename = "@pagination", default)]
    pagination: Option<PaginationInfo>,
}

#[async_trait]
impl Get for Repository {
    type Id = String; // org/repo slug

    #[tracing::instrument(skip(client))]
    async fn get(client: &TravisClient, slug: String) -> Result<Self> {
        let response = client
            .get(&repo_path(&slug))
            .await
            .map_err(|e| label_not_found(e, "Repository", &slug))?;
        let repo: Repository = response.json().await.map_err(TravisError::HttpError)?;
        Ok(repo)
    }
}

#[async_trait]
impl Activate for Repository {
    type Id = String; // org/repo slug

    #[tracing::instrument(skip(client))]
    async fn activate(client: &TravisClient, slug: String) -> Result<Self> {
        let path = format!("{}/activate", repo_path(&slug));
        let response = client
            .post_empty(&path)
            .await
            .map_err(|e| label_not_found(e, "Repository", &slug))?;
        let repo: Repository = response.json().await.map_err(TravisError::HttpError)?;
        tracing::info!(slug = %repo.slug, active = repo.active, "activated repository");
        Ok(repo)
    }

    #[tracing::instrument(skip(client))]
    async fn deactivate(client: &TravisClient, slug: String) -> Result<Self> {
        let path = format!("{}/deactivate", repo_path(&slug));
        let response = client
            .post_empty(&path)
            .await
            .map_err(|e| label_not_found(e, "Repository", &slug))?;
        let repo: Repository = response.json().await.map_err(TravisError::HttpError)?;
        tracing::info!(slug = %repo.slug, active = repo.active, "deactivated repository");
        Ok(repo)
    }
}

#[async_trait]
impl List for Repository {
    type Query = RepositoryListQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &TravisClient,
        query: &Self::Query,
        offset: u32,
        limit: u32,
    ) -> Result<Page<Self>> {
        #[derive(Serialize)]
        struct RequestParams<'a> {
            #[serde(flatten)]
            query: &'a RepositoryListQuery,
            #[serde(flatten)]
            window: PaginationParams,
        }

        if query.owner.trim().is_empty() {
            return Err(TravisError::ConfigMissing(
                "repository listing needs an owner login".to_string(),
            ));
        }

        let params = RequestParams {
            query,
            window: PaginationParams::window(offset, limit),
        };

        let path = format!("owner/{}/repos", urlencoding::encode(&query.owner));
        let response = client
            .get_with_query(&path, &params)
            .await
            .map_err(|e| label_not_found(e, "Owner", &query.owner))?;
        let data: RepositoryListResponse =
            response.json().await.map_err(TravisError::HttpError)?;

        Ok(match data.pagination {
            Some(info) => Page::from_travis(data.repositories, &info),
            None => Page::new(data.repositories, offset, limit, None),
        })
    }
}
