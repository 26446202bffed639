//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use serde::Serialize;
use tabled::Tabled;

use crate::{Page, Repository, User};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Repository {
    fn pretty_print(&self) -> String {
        let divider = "─".repeat(self.slug.len().max(30));

        let mut lines = vec![
            format!("Repository: {}", self.slug),
            divider,
            format!("CI:             {}", if self.active { "enabled" } else { "disabled" }),
            format!("Visibility:     {}", if self.private { "private" } else { "public" }),
        ];

        if let Some(branch) = self.default_branch_name() {
            lines.push(format!("Default Branch: {}", branch));
        }

        if let Some(ref description) = self.description {
            if !description.is_empty() {
                lines.push(format!("Description:    {}", description));
            }
        }

        lines.join("\n")
    }
}

impl PrettyPrint for User {
    fn pretty_print(&self) -> String {
        let header = format!("User: {}", self.login);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider];

        if let Some(ref name) = self.name {
            lines.push(format!("Name:           {}", name));
        }

        lines.push(format!(
            "Syncing:        {}",
            if self.is_syncing { "yes" } else { "no" }
        ));

        match self.synced_at {
            Some(ref synced) => lines.push(format!(
                "Last Sync:      {}",
                synced.format("%Y-%m-%d %H:%M:%S UTC")
            )),
            None => lines.push("Last Sync:      never".to_string()),
        }

        lines.join("\n")
    }
}

/// CI status of a repository, keyed by its qualified `org/repo` name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoStatus {
    pub repo: String,
    pub active: bool,
}

impl PrettyPrint for RepoStatus {
    fn pretty_print(&self) -> String {
        format!(
            "{}: {}",
            self.repo,
            if self.active { "enabled" } else { "disabled" }
        )
    }
}

/// Footer line for a listing page, e.g. `26-50 of 73`.
///
/// Returns `None` when there is nothing useful to say.
#[must_use]
pub fn page_summary<T>(page: &Page<T>) -> Option<String> {
    match page.total {
        Some(total) => Some(format!(
            "{}-{} of {}",
            page.offset.saturating_add(1),
            page.next_offset(),
            total
        )),
        None if page.has_more => Some("(more available)".to_string()),
        None => None,
    }
}

/// Table row for repository listings.
#[derive(Tabled)]
pub struct RepositoryRow {
    pub slug: String,
    #[tabled(rename = "ci")]
    pub active: String,
    pub private: String,
    pub branch: String,
}

impl From<&Repository> for RepositoryRow {
    fn from(r: &Repository) -> Self {
        Self {
            slug: r.slug.clone(),
            active: if r.active { "on" } else { "off" }.to_string(),
            private: r.private.to_string(),
            branch: r.default_branch_name().unwrap_or_default().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(active: bool) -> Repository {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "widgets",
            "slug": "acme/widgets",
            "active": active,
            "default_branch": { "name": "main" }
        }))
        .unwrap()
    }

    #[test]
    fn test_repository_pretty_print_format() {
        let output = repo(true).pretty_print();
        assert!(output.starts_with("Repository: acme/widgets"));
        assert!(output.contains("CI:             enabled"));
        assert!(output.contains("Default Branch: main"));
    }

    #[test]
    fn test_user_pretty_print_never_synced() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 7,
            "login": "octocat",
            "is_syncing": true
        }))
        .unwrap();

        let output = user.pretty_print();
        assert!(output.starts_with("User: octocat"));
        assert!(output.contains("Syncing:        yes"));
        assert!(output.contains("Last Sync:      never"));
    }

    #[test]
    fn test_repository_row() {
        let row = RepositoryRow::from(&repo(false));
        assert_eq!(row.active, "off");
        assert_eq!(row.branch, "main");
    }

    #[test]
    fn test_repo_status_uses_qualified_name() {
        let resolver = crate::RepoNameResolver::new(Some("acme"));
        let status = RepoStatus {
            repo: resolver.full_name("widgets").unwrap(),
            active: true,
        };

        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            serde_json::json!({ "repo": "acme/widgets", "active": true })
        );
        assert_eq!(status.pretty_print(), "acme/widgets: enabled");
    }

    #[test]
    fn test_page_summary() {
        let page = Page::new(vec![1, 2, 3], 25, 25, Some(28));
        assert_eq!(page_summary(&page).as_deref(), Some("26-28 of 28"));

        let page: Page<i32> = Page::new(vec![1; 10], 0, 10, None);
        assert_eq!(page_summary(&page).as_deref(), Some("(more available)"));

        let page: Page<i32> = Page::new(vec![1; 3], 0, 10, None);
        assert_eq!(page_summary(&page), None);
    }

    #[test]
    fn test_page_summary_at_max_offset() {
        let page: Page<i32> = Page::new(vec![], u32::MAX, 25, Some(10));
        assert_eq!(
            page_summary(&page).as_deref(),
            Some("4294967295-4294967295 of 10")
        );
    }
}
