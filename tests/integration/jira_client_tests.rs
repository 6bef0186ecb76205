//! Jira client tests against a mock HTTP server

#[cfg(test)]
mod tests {
    use crate::common::{issue, sorted_record_ids};
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use jira_batch::{
        BatchConfig, BatchResolver, BulkTaskTracker, JiraClient, JiraConfig, JiraError,
        RecordFetcher, RecordId, SearchCoordinator, TaskId, TaskStatus,
    };
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const EMAIL: &str = "bot@example.com";
    const TOKEN: &str = "api-token-123";

    fn client_for(server: &MockServer) -> JiraClient {
        let config = JiraConfig::new(server.uri(), EMAIL, TOKEN).with_timeout_secs(5);
        JiraClient::new(config).unwrap()
    }

    fn basic_auth() -> String {
        format!("Basic {}", STANDARD.encode(format!("{}:{}", EMAIL, TOKEN)))
    }

    #[tokio::test]
    async fn test_get_issue_sends_basic_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/3/issue/10001"))
            .and(header("authorization", basic_auth().as_str()))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(issue("10001")))
            .expect(1)
            .mount(&server)
            .await;

        let record = client_for(&server)
            .fetch_one(&RecordId::from("10001"))
            .await
            .unwrap();

        assert_eq!(record.id(), Some("10001"));
        assert_eq!(record.key(), Some("PROJ-10001"));
    }

    #[tokio::test]
    async fn test_status_codes_map_to_error_kinds() {
        let server = MockServer::start().await;
        let cases = [
            ("400", 400, json!({ "errorMessages": ["bad key"] })),
            ("401", 401, json!({ "errorMessages": ["Unauthorized"] })),
            ("403", 403, json!({ "errorMessages": ["Forbidden"] })),
            ("404", 404, json!({ "errorMessages": ["Issue does not exist"] })),
            ("429", 429, json!({ "errorMessages": ["Rate limit exceeded"] })),
            ("500", 500, json!({ "errorMessages": ["Internal error"] })),
        ];
        for (id, status, body) in &cases {
            Mock::given(method("GET"))
                .and(path(format!("/rest/api/3/issue/{}", id)))
                .respond_with(ResponseTemplate::new(*status).set_body_json(body.clone()))
                .mount(&server)
                .await;
        }

        let client = client_for(&server);
        let fetch = |id: &'static str| {
            let client = client.clone();
            async move { client.get_issue(&RecordId::from(id)).await.unwrap_err() }
        };

        assert_eq!(fetch("400").await, JiraError::BadRequest("bad key".to_string()));
        assert!(matches!(fetch("401").await, JiraError::Auth(_)));
        assert!(matches!(fetch("403").await, JiraError::Auth(_)));
        assert_eq!(
            fetch("404").await,
            JiraError::NotFound("Issue does not exist".to_string())
        );
        assert!(matches!(fetch("429").await, JiraError::RateLimited(_)));
        assert_eq!(fetch("500").await, JiraError::api(500, "Internal error"));
    }

    #[tokio::test]
    async fn test_rejected_issue_becomes_warning() {
        let server = MockServer::start().await;
        for id in ["1", "3"] {
            Mock::given(method("GET"))
                .and(path(format!("/rest/api/3/issue/{}", id)))
                .respond_with(ResponseTemplate::new(200).set_body_json(issue(id)))
                .expect(1)
                .mount(&server)
                .await;
        }
        Mock::given(method("GET"))
            .and(path("/rest/api/3/issue/2"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({ "errorMessages": ["bad key"] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let outcome = BatchResolver::with_concurrency(&client, 2)
            .resolve(&[RecordId::from("1"), RecordId::from("2"), RecordId::from("3")])
            .await
            .unwrap();

        assert_eq!(sorted_record_ids(&outcome.records), vec!["1", "3"]);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].id.as_str(), "2");
        assert_eq!(
            outcome.warnings[0].error,
            JiraError::BadRequest("bad key".to_string())
        );
    }

    #[tokio::test]
    async fn test_search_forwards_paging_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/3/search/jql"))
            .and(query_param("jql", "project = OPS"))
            .and(query_param("maxResults", "2"))
            .and(query_param("startAt", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "issues": [{ "id": "5" }, { "id": "6" }],
                "isLast": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server)
            .search_ids("project = OPS", 2, 4)
            .await
            .unwrap();

        assert_eq!(page.identifiers, vec![RecordId::from("5"), RecordId::from("6")]);
        assert!(!page.is_last);
    }

    #[tokio::test]
    async fn test_paged_search_over_http_keeps_partial_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/3/search/jql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "issues": [{ "id": "1" }, { "id": "2" }, { "id": "3" }],
                "isLast": true
            })))
            .mount(&server)
            .await;
        for id in ["1", "3"] {
            Mock::given(method("GET"))
                .and(path(format!("/rest/api/3/issue/{}", id)))
                .respond_with(ResponseTemplate::new(200).set_body_json(issue(id)))
                .expect(1)
                .mount(&server)
                .await;
        }
        Mock::given(method("GET"))
            .and(path("/rest/api/3/issue/2"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "errorMessages": ["Issue does not exist or you do not have permission to see it."]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let coordinator = SearchCoordinator::with_batch_config(
            &client,
            &client,
            BatchConfig::new().with_concurrency(2),
        );
        let page = coordinator.paged_search("project = OPS", 3, 0).await.unwrap();

        assert!(page.is_last);
        assert_eq!(sorted_record_ids(&page.records), vec!["1", "3"]);
        assert_eq!(page.warnings.len(), 1);
        assert!(matches!(page.warnings[0].error, JiraError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_convert_to_subtasks_posts_bulk_move() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/api/3/bulk/issues/move"))
            .and(body_json(json!({
                "sendBulkNotification": false,
                "targetToSourcesMapping": {
                    "X,10002,X-9": {
                        "inferClassificationDefaults": true,
                        "inferFieldDefaults": true,
                        "inferStatusDefaults": true,
                        "inferSubtaskTypeDefault": true,
                        "issueIdsOrKeys": ["X-1", "X-2"]
                    }
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "taskId": "10641" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let task_id = BulkTaskTracker::new(&client)
            .convert_to_subtasks(
                &[RecordId::from("X-1"), RecordId::from("X-2")],
                &RecordId::from("X-9"),
            )
            .await
            .unwrap();

        assert_eq!(task_id, TaskId::from("10641"));
    }

    #[tokio::test]
    async fn test_task_status_reads_progress() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/3/bulk/tasks/10641"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "taskId": "10641",
                "status": "COMPLETE",
                "progressPercent": 100,
                "processedAccessibleIssues": [10001, 10002],
                "invalidOrInaccessibleIssueCount": 0,
                "totalIssueCount": 2
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let task = BulkTaskTracker::new(&client)
            .get_task_status(&TaskId::from("10641"))
            .await
            .unwrap();

        assert_eq!(task.status, TaskStatus::Completed);
        assert!(task.is_terminal());
        assert_eq!(task.progress.percent, Some(100));
        assert_eq!(task.progress.processed, Some(2));
        assert_eq!(task.progress.total, Some(2));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_not_fatal() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let client = JiraClient::new(JiraConfig::new(uri, EMAIL, TOKEN)).unwrap();
        let err = client.get_issue(&RecordId::from("1")).await.unwrap_err();

        assert!(matches!(err, JiraError::Network(_) | JiraError::Timeout(_)));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_client_rejects_incomplete_config() {
        let err = JiraClient::new(JiraConfig::new("https://example.atlassian.net", "", "t"))
            .unwrap_err();
        assert!(matches!(err, JiraError::Config(_)));
    }
}
