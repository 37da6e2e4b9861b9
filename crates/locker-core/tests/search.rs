mod common;

use common::{credential, file, link, note, Failure, Harness, OTHER, OWNER};
use locker_core::models::SearchResults;
use locker_core::{Category, Route};

fn mixed_results() -> SearchResults {
    SearchResults {
        notes: vec![note("n1", OWNER, "git tips"), note("n2", OTHER, "git secrets")],
        docs: vec![file("f1", OTHER, "git.pdf")],
        links: vec![link("l1", OWNER, "")],
        creds: vec![credential("c1", OWNER, "github")],
    }
}

#[tokio::test]
async fn test_blank_query_clears_without_request() {
    let harness = Harness::logged_in();
    harness.gateway.state().search = mixed_results();
    let mut dashboard = harness.dashboard();
    dashboard.submit("git").await.unwrap();
    assert!(dashboard.overlay_visible());
    let calls = harness.gateway.calls().len();

    dashboard.submit("   \t").await.unwrap();

    assert_eq!(harness.gateway.calls().len(), calls);
    assert!(dashboard.results().is_empty());
    assert!(!dashboard.overlay_visible());
}

#[tokio::test]
async fn test_results_are_filtered_by_owner() {
    let harness = Harness::logged_in();
    harness.gateway.state().search = mixed_results();
    let mut dashboard = harness.dashboard();

    dashboard.submit("git").await.unwrap();

    let results = dashboard.results();
    assert_eq!(results.notes.len(), 1);
    assert!(results.docs.is_empty());
    assert_eq!(results.total(), 3);

    let cards = dashboard.cards();
    let categories: Vec<Category> = cards.iter().map(|c| c.category).collect();
    assert_eq!(categories, vec![Category::Links, Category::Creds, Category::Notes]);
    // Untitled links fall back to the URL.
    assert_eq!(cards[0].title, "https://example.com/l1");
    assert_eq!(cards[1].title, "octo");
    assert_eq!(cards[1].subtitle, "github");
}

#[tokio::test]
async fn test_select_closes_overlay_and_navigates() {
    let harness = Harness::logged_in();
    harness.gateway.state().search = mixed_results();
    let mut dashboard = harness.dashboard();
    dashboard.submit("git").await.unwrap();

    dashboard.select(Category::Creds);

    assert!(!dashboard.overlay_visible());
    assert_eq!(harness.navigator.routes(), vec![Route::Credentials]);
}

#[tokio::test]
async fn test_search_failure_clears_results() {
    let harness = Harness::logged_in();
    harness.gateway.state().search = mixed_results();
    let mut dashboard = harness.dashboard();
    dashboard.submit("git").await.unwrap();

    harness.gateway.fail_with(Failure::Network);
    dashboard.submit("rust").await.unwrap_err();

    assert!(dashboard.results().is_empty());
    assert!(!dashboard.overlay_visible());
    assert_eq!(harness.reporter.messages(), vec!["Search failed"]);
}
