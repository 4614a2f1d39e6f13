use issue_summarizer::{
    error::SummarizerError,
    github::{GithubClient, IssueRef},
    test_utils,
};
use std::time::Duration;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_issue(server: &MockServer) {
    let comments_url = format!("{}/repos/o/r/issues/1/comments", server.uri());

    Mock::given(method("GET"))
        .and(path("/repos/o/r/issues/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(test_utils::issue_json(&comments_url)))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/issues/1/comments"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(test_utils::comments_json()))
        .expect(1)
        .mount(server)
        .await;
}

#[test_log::test(tokio::test)]
async fn test_fetch_issue_with_comments() {
    let server = MockServer::start().await;
    mock_issue(&server).await;

    let client = GithubClient::new(server.uri(), None).unwrap();
    let issue = IssueRef::parse("o/r", Some(1)).unwrap();

    let fetched = client.fetch_issue_with_comments(&issue).await.unwrap();

    assert_eq!(fetched.issue.title, "Client hangs on large uploads");
    assert_eq!(fetched.comments.len(), 2);
    assert_eq!(fetched.comments[0].user.login, "maintainer");
    assert_eq!(fetched.raw_comments, test_utils::comments_json());

    let input = fetched.user_input();
    assert!(input.starts_with("Title: Client hangs on large uploads\n"));
    assert!(input.contains("Comment by: octocat\n"));
}

#[test_log::test(tokio::test)]
async fn test_issue_url_is_resolved_against_api_base() {
    let server = MockServer::start().await;
    mock_issue(&server).await;

    let client = GithubClient::new(server.uri(), None).unwrap();
    // The number in the url wins over the explicit one
    let issue = IssueRef::parse("https://github.com/o/r/issues/1", Some(7)).unwrap();

    let fetched = client.fetch_issue_with_comments(&issue).await.unwrap();
    assert_eq!(fetched.issue.number, 1);
}

#[test_log::test(tokio::test)]
async fn test_not_found_is_a_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/issues/404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"message": "Not Found"})),
        )
        .mount(&server)
        .await;

    let client = GithubClient::new(server.uri(), None).unwrap();
    let issue = IssueRef::parse("o/r", Some(404)).unwrap();

    let err = client.fetch_issue_with_comments(&issue).await.unwrap_err();

    assert!(err.kind().is_network());
    assert!(matches!(err, SummarizerError::HttpStatus { .. }));
    assert!(err.to_string().starts_with("HTTP Error: 404"), "{err}");
    assert!(err.to_string().contains("/repos/o/r/issues/404"), "{err}");
}

#[test_log::test(tokio::test)]
async fn test_failing_comments_fail_the_fetch() {
    let server = MockServer::start().await;
    let comments_url = format!("{}/repos/o/r/issues/1/comments", server.uri());

    Mock::given(method("GET"))
        .and(path("/repos/o/r/issues/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(test_utils::issue_json(&comments_url)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/issues/1/comments"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = GithubClient::new(server.uri(), None).unwrap();
    let issue = IssueRef::parse("o/r", Some(1)).unwrap();

    let err = client.fetch_issue_with_comments(&issue).await.unwrap_err();
    assert!(err.to_string().starts_with("HTTP Error: 500"), "{err}");
}

#[test_log::test(tokio::test)]
async fn test_invalid_json_is_a_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/issues/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let client = GithubClient::new(server.uri(), None).unwrap();
    let issue = IssueRef::parse("o/r", Some(1)).unwrap();

    let err = client.fetch_issue(&issue).await.unwrap_err();
    assert!(err.kind().is_provider(), "{err:?}");
}

#[test_log::test(tokio::test)]
async fn test_connection_refused_is_a_network_error() {
    // Bind and drop a listener to get a port nothing listens on
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let client = GithubClient::new(format!("http://127.0.0.1:{port}"), None).unwrap();
    let issue = IssueRef::parse("o/r", Some(1)).unwrap();

    let err = client.fetch_issue(&issue).await.unwrap_err();

    assert!(err.kind().is_network());
    assert!(matches!(err, SummarizerError::Connection(_)), "{err:?}");
}

#[test_log::test(tokio::test)]
async fn test_slow_response_is_a_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/issues/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(test_utils::issue_json("http://localhost/comments"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client =
        GithubClient::with_timeout(server.uri(), None, Duration::from_millis(200)).unwrap();
    let issue = IssueRef::parse("o/r", Some(1)).unwrap();

    let err = client.fetch_issue(&issue).await.unwrap_err();

    assert!(err.kind().is_network());
    assert!(matches!(err, SummarizerError::Timeout(_)), "{err:?}");
    assert!(err.to_string().starts_with("Timeout Error"), "{err}");
}
