//! Live round-trips against the real MAL API. Ignored by default; run
//! with a valid client id:
//!
//! ```text
//! MAL_CLIENT_ID=... cargo test --test e2e -- --ignored
//! ```

use koyomi::{Client, ListPage, RankingQuery, SearchQuery, Season, SeasonalQuery};

fn live_client() -> Client {
    let key = std::env::var("MAL_CLIENT_ID").expect("MAL_CLIENT_ID must be set for live tests");
    Client::new(key)
}

#[tokio::test]
#[ignore = "hits the live MAL API"]
async fn default_ranking_returns_entries() {
    let page = live_client()
        .ranking(&RankingQuery::default())
        .await
        .unwrap();

    assert!(!page.data.is_empty());
    assert!(page.data[0].rank.rank >= 1);
}

#[tokio::test]
#[ignore = "hits the live MAL API"]
async fn naruto_search_returns_entries() {
    let page = live_client()
        .search(&SearchQuery::new("Naruto"))
        .await
        .unwrap();

    assert!(!page.data.is_empty());
    assert!(!page.data[0].node.title.is_empty());
}

#[tokio::test]
#[ignore = "hits the live MAL API"]
async fn winter_2022_season_pages_forward() {
    let client = live_client();
    let page = client
        .season(&SeasonalQuery::new(2022, Season::Winter).with_limit(10))
        .await
        .unwrap();

    assert!(!page.data.is_empty());
    assert!(page.paging.has_next());

    let next: ListPage = client.next_page(&page.paging).await.unwrap();
    assert!(!next.data.is_empty());
}
