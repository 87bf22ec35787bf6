//! The field-selection mini-language of the MAL v2 `fields` parameter.
//!
//! A [`Selector`] is one requested attribute, optionally carrying nested
//! sub-attributes that render in braces (`related_anime{rank}`). A
//! [`FieldSet`] is the ordered, comma-joined collection forming one
//! request's `fields` value. Rendering via `Display` is the only
//! string-producing operation; construction stays typed.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Attribute names understood by the anime endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Title,
    MainPicture,
    AlternativeTitles,
    StartDate,
    EndDate,
    Synopsis,
    Mean,
    Rank,
    Popularity,
    NumListUsers,
    NumScoringUsers,
    Nsfw,
    Genres,
    CreatedAt,
    UpdatedAt,
    MediaType,
    Status,
    NumEpisodes,
    StartSeason,
    Broadcast,
    Source,
    AverageEpisodeDuration,
    Studios,
    Rating,
    Pictures,
    Background,
    RelatedAnime,
    RelatedManga,
    Recommendations,
    Statistics,
}

impl Field {
    pub const ALL: &'static [Field] = &[
        Self::Id,
        Self::Title,
        Self::MainPicture,
        Self::AlternativeTitles,
        Self::StartDate,
        Self::EndDate,
        Self::Synopsis,
        Self::Mean,
        Self::Rank,
        Self::Popularity,
        Self::NumListUsers,
        Self::NumScoringUsers,
        Self::Nsfw,
        Self::Genres,
        Self::CreatedAt,
        Self::UpdatedAt,
        Self::MediaType,
        Self::Status,
        Self::NumEpisodes,
        Self::StartSeason,
        Self::Broadcast,
        Self::Source,
        Self::AverageEpisodeDuration,
        Self::Studios,
        Self::Rating,
        Self::Pictures,
        Self::Background,
        Self::RelatedAnime,
        Self::RelatedManga,
        Self::Recommendations,
        Self::Statistics,
    ];

    /// The exact wire name sent in the `fields` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::MainPicture => "main_picture",
            Self::AlternativeTitles => "alternative_titles",
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
            Self::Synopsis => "synopsis",
            Self::Mean => "mean",
            Self::Rank => "rank",
            Self::Popularity => "popularity",
            Self::NumListUsers => "num_list_users",
            Self::NumScoringUsers => "num_scoring_users",
            Self::Nsfw => "nsfw",
            Self::Genres => "genres",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::MediaType => "media_type",
            Self::Status => "status",
            Self::NumEpisodes => "num_episodes",
            Self::StartSeason => "start_season",
            Self::Broadcast => "broadcast",
            Self::Source => "source",
            Self::AverageEpisodeDuration => "average_episode_duration",
            Self::Studios => "studios",
            Self::Rating => "rating",
            Self::Pictures => "pictures",
            Self::Background => "background",
            Self::RelatedAnime => "related_anime",
            Self::RelatedManga => "related_manga",
            Self::Recommendations => "recommendations",
            Self::Statistics => "statistics",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string did not name a member of the closed [`Field`] set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field name: {0}")]
pub struct UnknownField(String);

impl FromStr for Field {
    type Err = UnknownField;

    /// Case-sensitive lookup by wire name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_owned()))
    }
}

/// One requested attribute, optionally with nested sub-attributes.
///
/// Renders as `name` when there are no sub-fields, otherwise as
/// `name{sub1,sub2,...}` with the sub-selectors rendered recursively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    name: String,
    subfields: Vec<Selector>,
}

impl Selector {
    /// Selector for a field name outside the closed [`Field`] set, e.g.
    /// one the server added after this crate was published. Returns
    /// `None` when `name` is empty.
    pub fn custom(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name,
            subfields: Vec::new(),
        })
    }

    /// Attach nested sub-fields, consuming the selector. Nesting depth
    /// is unlimited; sub-selectors may carry sub-fields of their own.
    pub fn with_subfields<I>(mut self, subfields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Selector>,
    {
        self.subfields.extend(subfields.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subfields(&self) -> &[Selector] {
        &self.subfields
    }
}

impl From<Field> for Selector {
    fn from(field: Field) -> Self {
        Self {
            name: field.as_str().to_owned(),
            subfields: Vec::new(),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some((first, rest)) = self.subfields.split_first() {
            write!(f, "{{{first}")?;
            for sub in rest {
                write!(f, ",{sub}")?;
            }
            f.write_str("}")?;
        }
        Ok(())
    }
}

/// Ordered collection of selectors; renders as a comma-joined list, the
/// empty set as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet(Vec<Selector>);

impl FieldSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// The `id,title,main_picture` preset substituted whenever a query
    /// leaves its field set empty.
    pub fn basic() -> Self {
        Self::from([Field::Id, Field::Title, Field::MainPicture])
    }

    /// The basic preset plus synopsis, air dates, and mean score.
    pub fn basic_info() -> Self {
        Self::from([
            Field::Id,
            Field::Title,
            Field::MainPicture,
            Field::Synopsis,
            Field::StartDate,
            Field::EndDate,
            Field::Mean,
        ])
    }

    pub fn push(&mut self, selector: impl Into<Selector>) {
        self.0.push(selector.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.0
    }
}

impl<S: Into<Selector>, const N: usize> From<[S; N]> for FieldSet {
    fn from(selectors: [S; N]) -> Self {
        selectors.into_iter().collect()
    }
}

impl<S: Into<Selector>> FromIterator<S> for FieldSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((first, rest)) = self.0.split_first() {
            write!(f, "{first}")?;
            for selector in rest {
                write!(f, ",{selector}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_selector_renders_name_only() {
        assert_eq!(Selector::from(Field::Title).to_string(), "title");
    }

    #[test]
    fn subfields_render_in_braces() {
        let sel = Selector::from(Field::Title).with_subfields([Field::Broadcast]);
        assert_eq!(sel.to_string(), "title{broadcast}");

        let sel = Selector::from(Field::Background)
            .with_subfields([Field::Broadcast, Field::AlternativeTitles]);
        assert_eq!(sel.to_string(), "background{broadcast,alternative_titles}");
    }

    #[test]
    fn nesting_recurses() {
        let inner = Selector::from(Field::RelatedAnime).with_subfields([Field::Rank]);
        let sel = Selector::from(Field::Recommendations)
            .with_subfields([inner, Selector::from(Field::EndDate)]);
        assert_eq!(sel.to_string(), "recommendations{related_anime{rank},end_date}");
    }

    #[test]
    fn set_comma_joins_without_trailing_separator() {
        let set = FieldSet::from([Field::Id, Field::Title]);
        assert_eq!(set.to_string(), "id,title");
        assert_eq!(FieldSet::new().to_string(), "");
    }

    #[test]
    fn composed_set_matches_wire_grammar() {
        let set: FieldSet = [
            Selector::from(Field::RelatedAnime).with_subfields([Field::Rank]),
            Selector::from(Field::Recommendations).with_subfields([Field::Rank, Field::EndDate]),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            set.to_string(),
            "related_anime{rank},recommendations{rank,end_date}"
        );
    }

    #[test]
    fn presets_render_the_documented_lists() {
        assert_eq!(FieldSet::basic().to_string(), "id,title,main_picture");
        assert_eq!(
            FieldSet::basic_info().to_string(),
            "id,title,main_picture,synopsis,start_date,end_date,mean"
        );
    }

    #[test]
    fn custom_rejects_the_empty_name() {
        assert!(Selector::custom("").is_none());
        assert_eq!(
            Selector::custom("num_favorites").unwrap().to_string(),
            "num_favorites"
        );
    }

    #[test]
    fn field_wire_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>().unwrap(), *field);
        }
        assert!("MainPicture".parse::<Field>().is_err());
    }
}
