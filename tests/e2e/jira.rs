//! Real Jira round trips
//!
//! Ignored by default. Needs `JIRA_URL`, `JIRA_EMAIL`, `JIRA_API_KEY` and a
//! read-only JQL query in `JIRA_E2E_JQL`.

#[cfg(test)]
mod tests {
    use crate::skip_without_env;
    use jira_batch::{JiraClient, JiraConfig, SearchCoordinator, SearchRequest};

    fn client() -> JiraClient {
        JiraClient::new(JiraConfig::from_env().unwrap()).unwrap()
    }

    #[tokio::test]
    #[ignore]
    async fn test_first_page_hydrates() {
        skip_without_env!("JIRA_API_KEY");
        skip_without_env!("JIRA_E2E_JQL");

        let client = client();
        let jql = std::env::var("JIRA_E2E_JQL").unwrap();
        let page = SearchCoordinator::new(&client, &client)
            .paged_search(&jql, 10, 0)
            .await
            .unwrap();

        assert!(page.records.len() + page.warnings.len() <= 10);
        for record in &page.records {
            assert!(record.id().is_some());
        }
    }

    #[tokio::test]
    #[ignore]
    async fn test_paging_terminates() {
        skip_without_env!("JIRA_API_KEY");
        skip_without_env!("JIRA_E2E_JQL");

        let client = client();
        let coordinator = SearchCoordinator::new(&client, &client);
        let mut request =
            SearchRequest::new(std::env::var("JIRA_E2E_JQL").unwrap()).with_page_size(25);

        for _ in 0..5 {
            let page = coordinator.search_page(&request).await.unwrap();
            if page.is_last {
                return;
            }
            request = request.next_page();
        }
    }
}
