//! Paginated search integration tests

#[cfg(test)]
mod tests {
    use crate::common::{InstrumentedFetcher, StubSearch, ids, sorted_record_ids};
    use jira_batch::{
        BatchConfig, JiraError, SearchCoordinator, SearchRequest, paged_search,
    };

    #[tokio::test]
    async fn test_is_last_passes_through_with_hydration_failure() {
        let search = StubSearch::returning(ids(&["1", "2", "3"]), true);
        let fetcher =
            InstrumentedFetcher::new().fail("2", JiraError::NotFound("gone".to_string()));

        let page = SearchCoordinator::new(&search, &fetcher)
            .paged_search("project = X", 3, 0)
            .await
            .unwrap();

        assert!(page.is_last);
        assert_eq!(sorted_record_ids(&page.records), vec!["1", "3"]);
        assert_eq!(page.warnings.len(), 1);
        assert_eq!(page.warnings[0].id.as_str(), "2");
    }

    #[tokio::test]
    async fn test_more_pages_reported_when_not_last() {
        let search = StubSearch::returning(ids(&["1", "2"]), false);
        let fetcher = InstrumentedFetcher::new();

        let page = paged_search(&search, &fetcher, "project = X", 2, 0)
            .await
            .unwrap();

        assert!(!page.is_last);
        assert_eq!(page.records.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_page_skips_fetcher() {
        let search = StubSearch::returning(Vec::new(), true);
        let fetcher = InstrumentedFetcher::new();

        let page = paged_search(&search, &fetcher, "project = EMPTY", 50, 0)
            .await
            .unwrap();

        assert!(page.records.is_empty());
        assert!(page.is_last);
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_search_arguments_forwarded() {
        let search = StubSearch::returning(ids(&["7"]), true);
        let fetcher = InstrumentedFetcher::new();
        let coordinator = SearchCoordinator::new(&search, &fetcher);

        let first = SearchRequest::new("assignee = me").with_page_size(20);
        coordinator.search_page(&first).await.unwrap();
        coordinator.search_page(&first.next_page()).await.unwrap();

        assert_eq!(
            search.calls(),
            vec![
                ("assignee = me".to_string(), 20, 0),
                ("assignee = me".to_string(), 20, 20),
            ]
        );
    }

    #[tokio::test]
    async fn test_search_failure_propagates() {
        let search = StubSearch::failing(JiraError::api(400, "Error in the JQL Query"));
        let fetcher = InstrumentedFetcher::new();

        let err = paged_search(&search, &fetcher, "project = = X", 50, 0)
            .await
            .unwrap_err();

        assert_eq!(err, JiraError::api(400, "Error in the JQL Query"));
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_request_never_searches() {
        let search = StubSearch::returning(ids(&["1"]), true);
        let fetcher = InstrumentedFetcher::new();
        let coordinator = SearchCoordinator::new(&search, &fetcher);

        let blank = coordinator.paged_search("   ", 10, 0).await.unwrap_err();
        let zero = coordinator.paged_search("project = X", 0, 0).await.unwrap_err();

        assert!(matches!(blank, JiraError::InvalidArgument(_)));
        assert!(matches!(zero, JiraError::InvalidArgument(_)));
        assert!(search.calls().is_empty());
    }

    #[tokio::test]
    async fn test_hydration_respects_batch_config() {
        let page_ids: Vec<_> = (0..12u64).map(jira_batch::RecordId::from).collect();
        let search = StubSearch::returning(page_ids, false);
        let fetcher = InstrumentedFetcher::new()
            .default_delay(std::time::Duration::from_millis(3));
        let coordinator = SearchCoordinator::with_batch_config(
            &search,
            &fetcher,
            BatchConfig::new().with_concurrency(3),
        );

        let page = coordinator.paged_search("project = X", 12, 0).await.unwrap();

        assert_eq!(page.records.len(), 12);
        assert!(fetcher.peak_in_flight() <= 3);
    }

    #[tokio::test]
    async fn test_auth_failure_during_hydration_aborts_page() {
        let search = StubSearch::returning(ids(&["1", "2"]), true);
        let fetcher =
            InstrumentedFetcher::new().fail("1", JiraError::Auth("token revoked".to_string()));

        let err = paged_search(&search, &fetcher, "project = X", 2, 0)
            .await
            .unwrap_err();
        assert!(matches!(err, JiraError::Auth(_)));
    }
}
