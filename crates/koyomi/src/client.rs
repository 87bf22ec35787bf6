//! The request dispatcher: URL construction, header contract, and the
//! response decoding policy shared by every endpoint.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{Error, ErrorEnvelope};
use crate::query::{DetailQuery, RankingQuery, SearchQuery, SeasonalQuery};
use crate::transport::{HttpTransport, Request, Transport};
use crate::types::{Anime, ListPage, Paging, RankingPage};

/// Production MAL API v2 base URL.
pub const BASE_URL: &str = "https://api.myanimelist.net/v2";

/// MyAnimeList API v2 client.
///
/// Holds the immutable configuration (API key, base URL, transport) and
/// nothing else, so one instance is safe to share across tasks. Generic
/// over [`Transport`] so tests can substitute a stub; production code
/// uses the default [`HttpTransport`].
pub struct Client<T = HttpTransport> {
    api_key: String,
    base_url: String,
    transport: T,
}

impl Client {
    /// Client over the default HTTP transport against the production
    /// base URL. The key is the MAL client id; it is sent opaquely and
    /// never validated client-side.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_transport(api_key, HttpTransport::new())
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(api_key: impl Into<String>, transport: T) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: BASE_URL.to_owned(),
            transport,
        }
    }

    /// Override the base URL, mainly for pointing tests at a stub.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Content-Type", "application/json; charset=utf-8".to_owned()),
            ("Accept", "application/json; charset=utf-8".to_owned()),
            ("X-MAL-CLIENT-ID", self.api_key.clone()),
        ]
    }

    /// Issue one GET and decode the body. Status >= 400 tries the server
    /// error envelope first and falls back to the bare status code;
    /// anything else decodes directly into `V`.
    async fn dispatch<V: DeserializeOwned>(&self, url: String) -> Result<V, Error> {
        debug!(url = %url, "dispatching request");
        let request = Request {
            url,
            headers: self.headers(),
        };
        let response = self.transport.send(request).await?;

        if response.status >= 400 {
            warn!(status = response.status, "MAL API error");
            return match serde_json::from_slice::<ErrorEnvelope>(&response.body) {
                Ok(envelope) => Err(Error::Api {
                    status: response.status,
                    message: envelope.message,
                }),
                Err(_) => Err(Error::UnknownApi {
                    status: response.status,
                }),
            };
        }

        Ok(serde_json::from_slice(&response.body)?)
    }

    /// Search anime by title.
    pub async fn search(&self, query: &SearchQuery) -> Result<ListPage, Error> {
        self.dispatch(query.request_url(&self.base_url)?).await
    }

    /// Look up one anime by its MAL id.
    pub async fn details(&self, query: &DetailQuery) -> Result<Anime, Error> {
        self.dispatch(query.request_url(&self.base_url)?).await
    }

    /// Retrieve the ranking listing.
    pub async fn ranking(&self, query: &RankingQuery) -> Result<RankingPage, Error> {
        self.dispatch(query.request_url(&self.base_url)?).await
    }

    /// Retrieve a seasonal listing.
    pub async fn season(&self, query: &SeasonalQuery) -> Result<ListPage, Error> {
        self.dispatch(query.request_url(&self.base_url)?).await
    }

    /// Fetch a list-shaped page from a fully formed URL, typically a
    /// paging link; skips descriptor validation and defaulting entirely.
    pub async fn fetch_list(&self, url: impl Into<String>) -> Result<ListPage, Error> {
        self.dispatch(url.into()).await
    }

    /// Ranking-shaped counterpart of [`fetch_list`](Self::fetch_list).
    pub async fn fetch_ranking(&self, url: impl Into<String>) -> Result<RankingPage, Error> {
        self.dispatch(url.into()).await
    }

    /// Follow the `next` link of a page, decoding into the same page
    /// shape. One call fetches exactly one page; callers wanting the
    /// full result set loop themselves.
    pub async fn next_page<P: DeserializeOwned>(&self, paging: &Paging) -> Result<P, Error> {
        if !paging.has_next() {
            return Err(Error::NoNextPage);
        }
        // has_next guarantees the link is present and non-empty.
        let url = paging.next.clone().unwrap_or_default();
        self.dispatch(url).await
    }
}
