//! Query descriptors and their enumerated parameter domains.
//!
//! Each endpoint kind has a descriptor struct that the caller fills in
//! and hands to [`Client`](crate::Client). Required fields are checked
//! and defaults applied only at request-build time, in
//! [`request_url`](SearchQuery::request_url); until then descriptors are
//! plain caller-owned data.
//!
//! Limit and offset are `Option` so that "unset" and an explicit zero
//! stay distinguishable: `None` takes the documented default of 100, a
//! value above the per-endpoint ceiling clamps silently, and `Some(0)`
//! is sent verbatim.

use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use thiserror::Error;

use crate::error::Error;
use crate::fields::FieldSet;

/// Results per page when a query leaves the limit unset.
pub const DEFAULT_LIMIT: u32 = 100;
/// Per-page ceiling on search queries.
pub const SMALL_QUERY_LIMIT: u32 = 100;
/// Per-page ceiling on ranking and seasonal queries.
pub const LARGE_QUERY_LIMIT: u32 = 500;

/// A candidate string outside one of the closed parameter sets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized parameter value: {0}")]
pub struct InvalidValue(String);

/// The supported ways to rank anime (`ranking_type` parameter).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RankingType {
    #[default]
    All,
    Airing,
    Upcoming,
    Tv,
    Ova,
    Movie,
    Special,
    ByPopularity,
    Favorite,
}

impl RankingType {
    pub const ALL: &'static [RankingType] = &[
        Self::All,
        Self::Airing,
        Self::Upcoming,
        Self::Tv,
        Self::Ova,
        Self::Movie,
        Self::Special,
        Self::ByPopularity,
        Self::Favorite,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Airing => "airing",
            Self::Upcoming => "upcoming",
            Self::Tv => "tv",
            Self::Ova => "ova",
            Self::Movie => "movie",
            Self::Special => "special",
            Self::ByPopularity => "bypopularity",
            Self::Favorite => "favorite",
        }
    }

    /// Case-sensitive membership test against the wire values.
    pub fn is_valid(candidate: &str) -> bool {
        Self::ALL.iter().any(|v| v.as_str() == candidate)
    }
}

impl fmt::Display for RankingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankingType {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| InvalidValue(s.to_owned()))
    }
}

/// Anime season (quarter of the year).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub const ALL: &'static [Season] = &[Self::Winter, Self::Spring, Self::Summer, Self::Fall];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Winter => "winter",
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
        }
    }

    /// Case-sensitive membership test against the wire values.
    pub fn is_valid(candidate: &str) -> bool {
        Self::ALL.iter().any(|v| v.as_str() == candidate)
    }

    /// Determine the current anime season from the current month.
    pub fn current() -> Self {
        let month = chrono::Utc::now().month();
        match month {
            1..=3 => Self::Winter,
            4..=6 => Self::Spring,
            7..=9 => Self::Summer,
            _ => Self::Fall,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| InvalidValue(s.to_owned()))
    }
}

/// Sort order for seasonal listings (`sort` parameter).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeasonSort {
    #[default]
    AnimeScore,
    AnimeNumListUsers,
}

impl SeasonSort {
    pub const ALL: &'static [SeasonSort] = &[Self::AnimeScore, Self::AnimeNumListUsers];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AnimeScore => "anime_score",
            Self::AnimeNumListUsers => "anime_num_list_users",
        }
    }

    /// Case-sensitive membership test against the wire values.
    pub fn is_valid(candidate: &str) -> bool {
        Self::ALL.iter().any(|v| v.as_str() == candidate)
    }
}

impl fmt::Display for SeasonSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeasonSort {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| InvalidValue(s.to_owned()))
    }
}

fn clamp_limit(limit: Option<u32>, ceiling: u32) -> u32 {
    limit.map_or(DEFAULT_LIMIT, |n| n.min(ceiling))
}

fn render_fields(fields: &FieldSet) -> String {
    if fields.is_empty() {
        FieldSet::basic().to_string()
    } else {
        fields.to_string()
    }
}

/// Parameters for a general title search (`/anime?q=`).
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Search text; must be non-empty by dispatch time.
    pub query: String,
    /// `None` defaults to 100; values above 100 clamp to 100.
    pub limit: Option<u32>,
    /// `None` defaults to 0.
    pub offset: Option<u32>,
    /// Empty set is replaced by [`FieldSet::basic`].
    pub fields: FieldSet,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_fields(mut self, fields: FieldSet) -> Self {
        self.fields = fields;
        self
    }

    /// Validate, apply defaults, and render the full request URL.
    pub fn request_url(&self, base_url: &str) -> Result<String, Error> {
        if self.query.is_empty() {
            return Err(Error::MissingParameter("query must be set"));
        }
        let limit = clamp_limit(self.limit, SMALL_QUERY_LIMIT);
        let offset = self.offset.unwrap_or(0);
        let qs = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("q", &self.query)
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string())
            .append_pair("fields", &render_fields(&self.fields))
            .finish();
        Ok(format!("{base_url}/anime?{qs}"))
    }
}

/// Parameters for a single-anime lookup by MAL id (`/anime/{id}`).
#[derive(Debug, Clone, Default)]
pub struct DetailQuery {
    /// MAL anime id; must be non-zero by dispatch time.
    pub id: u64,
    /// Empty set is replaced by [`FieldSet::basic`].
    pub fields: FieldSet,
}

impl DetailQuery {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            fields: FieldSet::new(),
        }
    }

    pub fn with_fields(mut self, fields: FieldSet) -> Self {
        self.fields = fields;
        self
    }

    /// Validate, apply defaults, and render the full request URL.
    pub fn request_url(&self, base_url: &str) -> Result<String, Error> {
        if self.id == 0 {
            return Err(Error::MissingParameter("id must be set"));
        }
        let qs = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("fields", &render_fields(&self.fields))
            .finish();
        Ok(format!("{base_url}/anime/{}?{qs}", self.id))
    }
}

/// Parameters for the ranking listing (`/anime/ranking`). Nothing is
/// required; the zero-value descriptor asks for the overall top 100.
#[derive(Debug, Clone, Default)]
pub struct RankingQuery {
    pub ranking_type: RankingType,
    /// `None` defaults to 100; values above 500 clamp to 500.
    pub limit: Option<u32>,
    /// `None` defaults to 0.
    pub offset: Option<u32>,
    /// Empty set is replaced by [`FieldSet::basic`].
    pub fields: FieldSet,
}

impl RankingQuery {
    pub fn new(ranking_type: RankingType) -> Self {
        Self {
            ranking_type,
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_fields(mut self, fields: FieldSet) -> Self {
        self.fields = fields;
        self
    }

    /// Apply defaults and render the full request URL.
    pub fn request_url(&self, base_url: &str) -> Result<String, Error> {
        let limit = clamp_limit(self.limit, LARGE_QUERY_LIMIT);
        let offset = self.offset.unwrap_or(0);
        let qs = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("ranking_type", self.ranking_type.as_str())
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string())
            .append_pair("fields", &render_fields(&self.fields))
            .finish();
        Ok(format!("{base_url}/anime/ranking?{qs}"))
    }
}

/// Parameters for a seasonal listing (`/anime/season/{year}/{season}`).
#[derive(Debug, Clone)]
pub struct SeasonalQuery {
    /// Calendar year; must be non-zero by dispatch time.
    pub year: u32,
    pub season: Season,
    pub sort: SeasonSort,
    /// `None` defaults to 100; values above 500 clamp to 500.
    pub limit: Option<u32>,
    /// `None` defaults to 0.
    pub offset: Option<u32>,
    /// Empty set is replaced by [`FieldSet::basic`].
    pub fields: FieldSet,
}

impl SeasonalQuery {
    pub fn new(year: u32, season: Season) -> Self {
        Self {
            year,
            season,
            sort: SeasonSort::default(),
            limit: None,
            offset: None,
            fields: FieldSet::new(),
        }
    }

    pub fn with_sort(mut self, sort: SeasonSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_fields(mut self, fields: FieldSet) -> Self {
        self.fields = fields;
        self
    }

    /// Validate, apply defaults, and render the full request URL.
    pub fn request_url(&self, base_url: &str) -> Result<String, Error> {
        if self.year == 0 {
            return Err(Error::MissingParameter("year must be set"));
        }
        let limit = clamp_limit(self.limit, LARGE_QUERY_LIMIT);
        let offset = self.offset.unwrap_or(0);
        let qs = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("sort", self.sort.as_str())
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string())
            .append_pair("fields", &render_fields(&self.fields))
            .finish();
        Ok(format!(
            "{base_url}/anime/season/{}/{}?{qs}",
            self.year, self.season
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Field;

    const BASE: &str = "https://api.myanimelist.net/v2";

    #[test]
    fn search_applies_documented_defaults() {
        let url = SearchQuery::new("Naruto").request_url(BASE).unwrap();
        assert_eq!(
            url,
            "https://api.myanimelist.net/v2/anime\
             ?q=Naruto&limit=100&offset=0&fields=id%2Ctitle%2Cmain_picture"
        );
    }

    #[test]
    fn search_clamps_to_the_small_ceiling() {
        let url = SearchQuery::new("Naruto")
            .with_limit(1000)
            .request_url(BASE)
            .unwrap();
        assert!(url.contains("limit=100&"));
    }

    #[test]
    fn large_queries_clamp_to_500() {
        let url = RankingQuery::default()
            .with_limit(1000)
            .request_url(BASE)
            .unwrap();
        assert!(url.contains("limit=500&"));

        let url = SeasonalQuery::new(2022, Season::Winter)
            .with_limit(1000)
            .request_url(BASE)
            .unwrap();
        assert!(url.contains("limit=500&"));
    }

    #[test]
    fn explicit_zero_limit_is_sent_verbatim() {
        let url = SearchQuery::new("Naruto")
            .with_limit(0)
            .request_url(BASE)
            .unwrap();
        assert!(url.contains("limit=0&"));
    }

    #[test]
    fn empty_query_text_is_a_missing_parameter() {
        let err = SearchQuery::new("").request_url(BASE).unwrap_err();
        assert!(matches!(err, Error::MissingParameter(_)));
    }

    #[test]
    fn detail_requires_a_nonzero_id() {
        let err = DetailQuery::new(0).request_url(BASE).unwrap_err();
        assert!(matches!(err, Error::MissingParameter(_)));
    }

    #[test]
    fn seasonal_requires_a_nonzero_year() {
        let err = SeasonalQuery::new(0, Season::Fall).request_url(BASE).unwrap_err();
        assert!(matches!(err, Error::MissingParameter(_)));
    }

    #[test]
    fn detail_url_shape() {
        let url = DetailQuery::new(30230)
            .with_fields(FieldSet::from([Field::Id, Field::Title, Field::Rank]))
            .request_url(BASE)
            .unwrap();
        assert_eq!(
            url,
            "https://api.myanimelist.net/v2/anime/30230?fields=id%2Ctitle%2Crank"
        );
    }

    #[test]
    fn ranking_url_shape() {
        let url = RankingQuery::new(RankingType::ByPopularity)
            .request_url(BASE)
            .unwrap();
        assert!(url.starts_with(
            "https://api.myanimelist.net/v2/anime/ranking?ranking_type=bypopularity"
        ));
    }

    #[test]
    fn seasonal_url_shape() {
        let url = SeasonalQuery::new(2022, Season::Winter)
            .with_limit(10)
            .request_url(BASE)
            .unwrap();
        assert_eq!(
            url,
            "https://api.myanimelist.net/v2/anime/season/2022/winter\
             ?sort=anime_score&limit=10&offset=0&fields=id%2Ctitle%2Cmain_picture"
        );
    }

    #[test]
    fn search_text_is_percent_encoded() {
        let url = SearchQuery::new("Fullmetal Alchemist").request_url(BASE).unwrap();
        assert!(url.contains("q=Fullmetal+Alchemist"));
    }

    #[test]
    fn validators_are_case_sensitive() {
        assert!(RankingType::is_valid("all"));
        assert!(!RankingType::is_valid("ALL"));
        assert!(!RankingType::is_valid("Bad"));

        assert!(Season::is_valid("spring"));
        assert!(!Season::is_valid("springSeason"));

        assert!(SeasonSort::is_valid("anime_score"));
        assert!(!SeasonSort::is_valid("animeScore"));
    }

    #[test]
    fn enum_wire_names_parse_exactly() {
        assert_eq!("favorite".parse::<RankingType>().unwrap(), RankingType::Favorite);
        assert!("Favorite".parse::<RankingType>().is_err());
        assert_eq!("fall".parse::<Season>().unwrap(), Season::Fall);
        assert_eq!(
            "anime_num_list_users".parse::<SeasonSort>().unwrap(),
            SeasonSort::AnimeNumListUsers
        );
    }
}
