//! Response records for the MAL v2 anime endpoints.
//!
//! These are inert data. `id` and `title` are the only attributes the
//! server always returns; everything else is optional and absent simply
//! means the field was not requested or the server omitted it. Values
//! the server enumerates (media type, status, nsfw) stay strings here
//! so new server-side values can never break decoding.

use serde::{Deserialize, Serialize};

/// A single anime record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anime {
    pub id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_picture: Option<Picture>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_titles: Option<AlternativeTitles>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_list_users: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_scoring_users: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsfw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<Genre>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_episodes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_season: Option<StartSeason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broadcast: Option<Broadcast>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_episode_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pictures: Option<Vec<Picture>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_anime: Option<Vec<RelatedAnime>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_manga: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<Recommendation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub studios: Option<Vec<Studio>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<Statistics>,
}

/// Cover art links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Picture {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
}

/// Other names the anime goes by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternativeTitles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ja: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Year and season in which an anime first aired.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartSeason {
    pub year: u32,
    pub season: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Broadcast {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_the_week: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
}

/// An anime MAL users relate to the requested one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedAnime {
    pub node: Anime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation_type_formatted: Option<String>,
}

/// An anime MAL users recommend alongside the requested one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub node: Anime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_recommendations: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Studio {
    pub id: u64,
    pub name: String,
}

/// List-membership counts; MAL serves the counts as strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCounts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watching: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_hold: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropped: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_to_watch: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_list_users: Option<u64>,
}

/// Current rank of an anime based on MAL user scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rank {
    pub rank: u32,
}

/// One entry of a ranking page: an anime plus its rank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ranking {
    pub node: Anime,
    #[serde(rename = "ranking")]
    pub rank: Rank,
}

/// One entry of a plain listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub node: Anime,
}

/// A page of results plus the pagination cursor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub paging: Paging,
}

/// Page shape returned by search and seasonal queries.
pub type ListPage = Page<Listing>;
/// Page shape returned by ranking queries.
pub type RankingPage = Page<Ranking>;

/// Opaque forward/backward continuation links attached to list-shaped
/// responses. The links are fully formed request URLs; the client only
/// ever forwards them verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paging {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
}

impl Paging {
    /// True when a further page exists.
    pub fn has_next(&self) -> bool {
        self.next.as_deref().is_some_and(|link| !link.is_empty())
    }

    /// True when an earlier page exists.
    pub fn has_previous(&self) -> bool {
        self.previous.as_deref().is_some_and(|link| !link.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_list_page() {
        let json = r#"{
            "data": [
                {
                    "node": {
                        "id": 52991,
                        "title": "Sousou no Frieren",
                        "main_picture": {
                            "medium": "https://cdn.myanimelist.net/images/anime/1015/138006.jpg",
                            "large": "https://cdn.myanimelist.net/images/anime/1015/138006l.jpg"
                        }
                    }
                },
                {
                    "node": {
                        "id": 20,
                        "title": "Naruto"
                    }
                }
            ],
            "paging": {
                "next": "https://api.myanimelist.net/v2/anime?offset=2&q=naruto"
            }
        }"#;

        let page: ListPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].node.title, "Sousou no Frieren");
        assert!(page.data[0].node.main_picture.is_some());
        assert!(page.data[1].node.main_picture.is_none());
        assert!(page.paging.has_next());
        assert!(!page.paging.has_previous());
    }

    #[test]
    fn deserialize_ranking_page() {
        let json = r#"{
            "data": [
                { "node": { "id": 5114, "title": "Fullmetal Alchemist: Brotherhood" },
                  "ranking": { "rank": 1 } }
            ],
            "paging": {}
        }"#;

        let page: RankingPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.data[0].rank.rank, 1);
        assert!(!page.paging.has_next());
    }

    #[test]
    fn deserialize_detail_record() {
        let json = r#"{
            "id": 30230,
            "title": "Diamond no Ace: Second Season",
            "mean": 8.25,
            "rank": 683,
            "media_type": "tv",
            "status": "finished_airing",
            "genres": [ { "id": 4, "name": "Comedy" }, { "id": 77, "name": "Team Sports" } ],
            "num_episodes": 51,
            "start_season": { "year": 2015, "season": "spring" },
            "broadcast": { "day_of_the_week": "monday", "start_time": "18:00" },
            "studios": [ { "id": 10, "name": "Production I.G" } ],
            "statistics": {
                "status": { "watching": "21257", "completed": "119435" },
                "num_list_users": 180440
            },
            "related_anime": [
                {
                    "node": { "id": 18689, "title": "Diamond no Ace" },
                    "relation_type": "prequel",
                    "relation_type_formatted": "Prequel"
                }
            ]
        }"#;

        let anime: Anime = serde_json::from_str(json).unwrap();
        assert_eq!(anime.id, 30230);
        assert_eq!(anime.mean, Some(8.25));
        assert_eq!(anime.start_season.unwrap().season, "spring");
        assert_eq!(anime.related_anime.unwrap()[0].node.id, 18689);
        assert_eq!(
            anime.statistics.unwrap().status.unwrap().watching.as_deref(),
            Some("21257")
        );
        assert!(anime.synopsis.is_none());
    }

    #[test]
    fn missing_paging_defaults_to_no_links() {
        let page: ListPage = serde_json::from_str(r#"{"data":[]}"#).unwrap();
        assert!(!page.paging.has_next());
    }

    #[test]
    fn empty_link_is_not_a_further_page() {
        let paging: Paging = serde_json::from_str(r#"{"next":"","previous":""}"#).unwrap();
        assert!(!paging.has_next());
        assert!(!paging.has_previous());
    }

    #[test]
    fn unknown_server_fields_are_ignored() {
        let json = r#"{ "id": 1, "title": "Cowboy Bebop", "num_favorites": 89000 }"#;
        let anime: Anime = serde_json::from_str(json).unwrap();
        assert_eq!(anime.title, "Cowboy Bebop");
    }
}
