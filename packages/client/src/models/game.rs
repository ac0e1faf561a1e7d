//! Board game records from the `thing` endpoint.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use url::Url;

use super::link::{Link, LinkType};
use super::name::Name;
use super::poll::Poll;
use super::statistics::{Ratings, Statistics};
use crate::binding::{
    from_xml_text_via_parse, FieldDescriptor, LookupStrategy, RecordList, RecordSchema, ValueMap,
    XmlRecord,
};
use crate::error::Result;

/// Item type reported in the `type` attribute.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    #[default]
    BoardGame,
    BoardGameExpansion,
    BoardGameAccessory,
}

from_xml_text_via_parse! {
    GameType => "game type",
}

static GAME_SCHEMA: LazyLock<RecordSchema> = LazyLock::new(|| {
    RecordSchema::new(
        "game",
        [
            FieldDescriptor::new("id")
                .strategy(LookupStrategy::Attribute)
                .required(),
            FieldDescriptor::new("game_type")
                .alias("type")
                .strategy(LookupStrategy::Attribute)
                .default_value("boardgame"),
            FieldDescriptor::new("names")
                .xml_tag("name")
                .strategy(LookupStrategy::FindAll),
            FieldDescriptor::new("thumbnail").strategy(LookupStrategy::Text),
            FieldDescriptor::new("image").strategy(LookupStrategy::Text),
            FieldDescriptor::new("description").strategy(LookupStrategy::Text),
            FieldDescriptor::new("year_published")
                .alias("yearpublished")
                .strategy(LookupStrategy::Find),
            FieldDescriptor::new("min_players")
                .alias("minplayers")
                .strategy(LookupStrategy::Find),
            FieldDescriptor::new("max_players")
                .alias("maxplayers")
                .strategy(LookupStrategy::Find),
            FieldDescriptor::new("playing_time")
                .alias("playingtime")
                .strategy(LookupStrategy::Find),
            FieldDescriptor::new("min_playtime")
                .alias("minplaytime")
                .strategy(LookupStrategy::Find),
            FieldDescriptor::new("max_playtime")
                .alias("maxplaytime")
                .strategy(LookupStrategy::Find),
            FieldDescriptor::new("min_age")
                .alias("minage")
                .strategy(LookupStrategy::Find),
            FieldDescriptor::new("links")
                .xml_tag("link")
                .strategy(LookupStrategy::FindAll),
            FieldDescriptor::new("polls")
                .xml_tag("poll")
                .strategy(LookupStrategy::FindAll),
            FieldDescriptor::new("statistics"),
        ],
    )
});

/// A board game, expansion or accessory.
///
/// Everything except the id and type is optional: BGG omits elements it has
/// no data for, and `statistics` is only present when requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    id: u32,
    game_type: GameType,
    names: RecordList<Name>,
    thumbnail: Option<Url>,
    image: Option<Url>,
    description: Option<String>,
    year_published: Option<i32>,
    min_players: Option<u32>,
    max_players: Option<u32>,
    playing_time: Option<u32>,
    min_playtime: Option<u32>,
    max_playtime: Option<u32>,
    min_age: Option<u32>,
    links: RecordList<Link>,
    polls: RecordList<Poll>,
    statistics: Option<Statistics>,
    fetched_at: DateTime<Utc>,
}

impl Game {
    /// BGG thing id.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub fn game_type(&self) -> GameType {
        self.game_type
    }

    /// All names in document order, primary first as BGG lists them.
    #[must_use]
    pub fn names(&self) -> &RecordList<Name> {
        &self.names
    }

    #[must_use]
    pub fn thumbnail(&self) -> Option<&Url> {
        self.thumbnail.as_ref()
    }

    #[must_use]
    pub fn image(&self) -> Option<&Url> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Negative for games published BCE.
    #[must_use]
    pub fn year_published(&self) -> Option<i32> {
        self.year_published
    }

    #[must_use]
    pub fn min_players(&self) -> Option<u32> {
        self.min_players
    }

    #[must_use]
    pub fn max_players(&self) -> Option<u32> {
        self.max_players
    }

    /// Typical playing time in minutes.
    #[must_use]
    pub fn playing_time(&self) -> Option<u32> {
        self.playing_time
    }

    #[must_use]
    pub fn min_playtime(&self) -> Option<u32> {
        self.min_playtime
    }

    #[must_use]
    pub fn max_playtime(&self) -> Option<u32> {
        self.max_playtime
    }

    #[must_use]
    pub fn min_age(&self) -> Option<u32> {
        self.min_age
    }

    #[must_use]
    pub fn links(&self) -> &RecordList<Link> {
        &self.links
    }

    #[must_use]
    pub fn polls(&self) -> &RecordList<Poll> {
        &self.polls
    }

    #[must_use]
    pub fn statistics(&self) -> Option<&Statistics> {
        self.statistics.as_ref()
    }

    /// When this record was parsed.
    #[must_use]
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// The primary name, falling back to the first name, then to the id.
    #[must_use]
    pub fn primary_name(&self) -> String {
        self.names
            .get(Name::is_primary)
            .or_else(|| self.names.first())
            .map_or_else(|| self.id.to_string(), |name| name.value().to_string())
    }

    /// Names other than the primary one.
    #[must_use]
    pub fn alternate_names(&self) -> RecordList<Name> {
        self.names.filter(|name| !name.is_primary())
    }

    /// Links of one type, in document order.
    #[must_use]
    pub fn links_of(&self, link_type: &LinkType) -> RecordList<Link> {
        self.links.filter(|link| link.link_type() == link_type)
    }

    #[must_use]
    pub fn categories(&self) -> RecordList<Link> {
        self.links_of(&LinkType::Category)
    }

    #[must_use]
    pub fn mechanics(&self) -> RecordList<Link> {
        self.links_of(&LinkType::Mechanic)
    }

    #[must_use]
    pub fn designers(&self) -> RecordList<Link> {
        self.links_of(&LinkType::Designer)
    }

    #[must_use]
    pub fn publishers(&self) -> RecordList<Link> {
        self.links_of(&LinkType::Publisher)
    }

    #[must_use]
    pub fn artists(&self) -> RecordList<Link> {
        self.links_of(&LinkType::Artist)
    }

    #[must_use]
    pub fn families(&self) -> RecordList<Link> {
        self.links_of(&LinkType::Family)
    }

    #[must_use]
    pub fn expansions(&self) -> RecordList<Link> {
        self.links_of(&LinkType::Expansion)
    }

    /// A poll by name, e.g. [`SUGGESTED_PLAYERS_POLL`](super::SUGGESTED_PLAYERS_POLL).
    #[must_use]
    pub fn poll(&self, name: &str) -> Option<&Poll> {
        self.polls.get(|poll| poll.name() == name)
    }

    #[must_use]
    pub fn ratings(&self) -> Option<&Ratings> {
        self.statistics.as_ref().and_then(Statistics::ratings)
    }

    /// Overall board game rank, if requested with statistics and ranked.
    #[must_use]
    pub fn bgg_rank(&self) -> Option<u32> {
        self.ratings().and_then(Ratings::overall_rank)
    }

    #[must_use]
    pub fn average_rating(&self) -> Option<f64> {
        self.ratings().and_then(Ratings::average)
    }

    #[must_use]
    pub fn average_weight(&self) -> Option<f64> {
        self.ratings().and_then(Ratings::average_weight)
    }

    /// Whether `players` falls within the published player range.
    #[must_use]
    pub fn supports_players(&self, players: u32) -> bool {
        match (self.min_players, self.max_players) {
            (Some(min), Some(max)) => (min..=max).contains(&players),
            (Some(min), None) => players >= min,
            (None, Some(max)) => players <= max,
            (None, None) => false,
        }
    }
}

impl XmlRecord for Game {
    fn schema() -> &'static RecordSchema {
        &GAME_SCHEMA
    }

    fn from_values(values: &ValueMap<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            id: values.require("id")?,
            game_type: values.require("game_type")?,
            names: values.list("names")?,
            thumbnail: values.get("thumbnail")?,
            image: values.get("image")?,
            description: values.get("description")?,
            year_published: values.get("year_published")?,
            min_players: values.get("min_players")?,
            max_players: values.get("max_players")?,
            playing_time: values.get("playing_time")?,
            min_playtime: values.get("min_playtime")?,
            max_playtime: values.get("max_playtime")?,
            min_age: values.get("min_age")?,
            links: values.list("links")?,
            polls: values.list("polls")?,
            statistics: values.record("statistics")?,
            fetched_at: Utc::now(),
        })
    }
}
