//! Typed client for the public MyAnimeList v2 REST API.
//!
//! The crate covers the client-id endpoints: title search, detail lookup,
//! rankings, and seasonal listings. Requests are described by query
//! descriptors ([`SearchQuery`], [`DetailQuery`], [`RankingQuery`],
//! [`SeasonalQuery`]), field selection by the typed [`FieldSet`] grammar,
//! and responses come back as [`types`] records with a [`Paging`] cursor
//! for walking further pages.
//!
//! ```no_run
//! use koyomi::{Client, SearchQuery};
//!
//! # async fn run() -> Result<(), koyomi::Error> {
//! let client = Client::new(std::env::var("MAL_CLIENT_ID").unwrap());
//! let page = client.search(&SearchQuery::new("Naruto").with_limit(5)).await?;
//! for entry in &page.data {
//!     println!("{:>8}  {}", entry.node.id, entry.node.title);
//! }
//! if page.paging.has_next() {
//!     let next: koyomi::ListPage = client.next_page(&page.paging).await?;
//!     println!("next page holds {} entries", next.data.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The HTTP layer sits behind the [`Transport`] trait; tests substitute a
//! recording stub, production code uses the default [`HttpTransport`] over
//! `reqwest`. The client never retries, caches, or aggregates pages.

pub mod client;
pub mod error;
pub mod fields;
pub mod query;
pub mod transport;
pub mod types;

pub use client::{Client, BASE_URL};
pub use error::Error;
pub use fields::{Field, FieldSet, Selector};
pub use query::{
    DetailQuery, RankingQuery, RankingType, SearchQuery, Season, SeasonSort, SeasonalQuery,
};
pub use transport::{HttpTransport, Request, Response, Transport, TransportError};
pub use types::{Anime, ListPage, Listing, Page, Paging, Ranking, RankingPage};
