//! Repository listing tests.

use travis_ci_provider::{List, Repository, RepositoryListQuery, TravisClient, TravisError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn repos_page(slugs: &[&str], offset: u32, limit: u32, count: u64, is_last: bool) -> serde_json::Value {
    let repositories: Vec<serde_json::Value> = slugs
        .iter()
        .enumerate()
        .map(|(i, slug)| {
            serde_json::json!({
                "id": i as u64 + u64::from(offset) + 1,
                "name": slug.split('/').nth(1).unwrap(),
                "slug": slug,
                "active": i % 2 == 0
            })
        })
        .collect();

    serde_json::json!({
        "@type": "repositories",
        "@pagination": {
            "limit": limit,
            "offset": offset,
            "count": count,
            "is_first": offset == 0,
            "is_last": is_last
        },
        "repositories": repositories
    })
}

#[tokio::test]
async fn test_list_page_sends_window_and_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/owner/acme/repos"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "2"))
        .and(query_param("repository.active", "true"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(repos_page(&["acme/a", "acme/b"], 0, 2, 3, false)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TravisClient::new("test-token", &mock_server.uri()).unwrap();
    let query = RepositoryListQuery {
        active: Some(true),
        ..RepositoryListQuery::for_owner("acme")
    };

    let page = Repository::list_page(&client, &query, 0, 2).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page.total, Some(3));
    assert!(page.has_more);
    assert_eq!(page.next_offset(), 2);
}

#[tokio::test]
async fn test_list_all_follows_offsets() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/owner/acme/repos"))
        .and(query_param("offset", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(repos_page(&["acme/a", "acme/b"], 0, 100, 3, false)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/owner/acme/repos"))
        .and(query_param("offset", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(repos_page(&["acme/c"], 2, 100, 3, true)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TravisClient::new("test-token", &mock_server.uri()).unwrap();
    let repos = Repository::list_all(&client, &RepositoryListQuery::for_owner("acme"))
        .await
        .unwrap();

    let slugs: Vec<&str> = repos.iter().map(|r| r.slug.as_str()).collect();
    assert_eq!(slugs, vec!["acme/a", "acme/b", "acme/c"]);
}

#[tokio::test]
async fn test_list_without_owner_is_config_error() {
    let client = TravisClient::new("test-token", "http://127.0.0.1:1").unwrap();
    let err = Repository::list_page(&client, &RepositoryListQuery::default(), 0, 10)
        .await
        .unwrap_err();

    assert!(matches!(err, TravisError::ConfigMissing(_)));
}

#[tokio::test]
async fn test_unknown_owner_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/owner/nobody/repos"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "@type": "error",
            "error_type": "not_found",
            "error_message": "owner not found"
        })))
        .mount(&mock_server)
        .await;

    let client = TravisClient::new("test-token", &mock_server.uri()).unwrap();
    let err = Repository::list_page(&client, &RepositoryListQuery::for_owner("nobody"), 0, 10)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TravisError::NotFound {
            entity_type: "Owner",
            ..
        }
    ));
}
