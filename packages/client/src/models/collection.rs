//! User collections.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::binding::{
    FieldDescriptor, LookupStrategy, RecordList, RecordSchema, ValueMap, XmlRecord,
};
use crate::error::Result;

static STATUS_SCHEMA: LazyLock<RecordSchema> = LazyLock::new(|| {
    let flag = |name: &'static str| {
        FieldDescriptor::new(name)
            .strategy(LookupStrategy::Attribute)
            .default_value("0")
    };
    RecordSchema::new(
        "collection status",
        [
            flag("own"),
            flag("prev_owned").alias("prevowned"),
            flag("for_trade").alias("fortrade"),
            flag("want"),
            flag("want_to_play").alias("wanttoplay"),
            flag("want_to_buy").alias("wanttobuy"),
            flag("wishlist"),
            FieldDescriptor::new("wishlist_priority")
                .alias("wishlistpriority")
                .strategy(LookupStrategy::Attribute),
            flag("preordered"),
            FieldDescriptor::new("last_modified")
                .alias("lastmodified")
                .strategy(LookupStrategy::Attribute),
        ],
    )
});

/// Ownership and wish flags of a collection entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStatus {
    own: bool,
    prev_owned: bool,
    for_trade: bool,
    want: bool,
    want_to_play: bool,
    want_to_buy: bool,
    wishlist: bool,
    wishlist_priority: Option<u32>,
    preordered: bool,
    last_modified: Option<String>,
}

impl CollectionStatus {
    #[must_use]
    pub fn own(&self) -> bool {
        self.own
    }

    #[must_use]
    pub fn prev_owned(&self) -> bool {
        self.prev_owned
    }

    #[must_use]
    pub fn for_trade(&self) -> bool {
        self.for_trade
    }

    #[must_use]
    pub fn want(&self) -> bool {
        self.want
    }

    #[must_use]
    pub fn want_to_play(&self) -> bool {
        self.want_to_play
    }

    #[must_use]
    pub fn want_to_buy(&self) -> bool {
        self.want_to_buy
    }

    #[must_use]
    pub fn wishlist(&self) -> bool {
        self.wishlist
    }

    /// 1 (must have) to 5 (don't buy); only set for wishlisted items.
    #[must_use]
    pub fn wishlist_priority(&self) -> Option<u32> {
        self.wishlist_priority
    }

    #[must_use]
    pub fn preordered(&self) -> bool {
        self.preordered
    }

    /// Raw `YYYY-MM-DD HH:MM:SS` timestamp as reported by BGG.
    #[must_use]
    pub fn last_modified(&self) -> Option<&str> {
        self.last_modified.as_deref()
    }
}

impl XmlRecord for CollectionStatus {
    fn schema() -> &'static RecordSchema {
        &STATUS_SCHEMA
    }

    fn from_values(values: &ValueMap<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            own: values.require("own")?,
            prev_owned: values.require("prev_owned")?,
            for_trade: values.require("for_trade")?,
            want: values.require("want")?,
            want_to_play: values.require("want_to_play")?,
            want_to_buy: values.require("want_to_buy")?,
            wishlist: values.require("wishlist")?,
            wishlist_priority: values.get("wishlist_priority")?,
            preordered: values.require("preordered")?,
            last_modified: values.get("last_modified")?,
        })
    }
}

static STATS_SCHEMA: LazyLock<RecordSchema> = LazyLock::new(|| {
    RecordSchema::new(
        "collection stats",
        [
            FieldDescriptor::new("min_players").alias("minplayers"),
            FieldDescriptor::new("max_players").alias("maxplayers"),
            FieldDescriptor::new("playing_time").alias("playingtime"),
            FieldDescriptor::new("num_owned").alias("numowned"),
            FieldDescriptor::new("rating").strategy(LookupStrategy::Find),
        ],
    )
});

/// The `<stats>` block of a collection entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionStats {
    min_players: Option<u32>,
    max_players: Option<u32>,
    playing_time: Option<u32>,
    num_owned: Option<u32>,
    rating: Option<String>,
}

impl CollectionStats {
    #[must_use]
    pub fn min_players(&self) -> Option<u32> {
        self.min_players
    }

    #[must_use]
    pub fn max_players(&self) -> Option<u32> {
        self.max_players
    }

    #[must_use]
    pub fn playing_time(&self) -> Option<u32> {
        self.playing_time
    }

    #[must_use]
    pub fn num_owned(&self) -> Option<u32> {
        self.num_owned
    }

    /// The collector's own rating; `None` when unrated (`N/A`).
    #[must_use]
    pub fn rating(&self) -> Option<f64> {
        self.rating.as_deref().and_then(|raw| raw.trim().parse().ok())
    }
}

impl XmlRecord for CollectionStats {
    fn schema() -> &'static RecordSchema {
        &STATS_SCHEMA
    }

    fn from_values(values: &ValueMap<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            min_players: values.get("min_players")?,
            max_players: values.get("max_players")?,
            playing_time: values.get("playing_time")?,
            num_owned: values.get("num_owned")?,
            rating: values.get("rating")?,
        })
    }
}

static ITEM_SCHEMA: LazyLock<RecordSchema> = LazyLock::new(|| {
    RecordSchema::new(
        "collection item",
        [
            FieldDescriptor::new("object_id")
                .alias("objectid")
                .strategy(LookupStrategy::Attribute)
                .required(),
            FieldDescriptor::new("object_type")
                .alias("objecttype")
                .strategy(LookupStrategy::Attribute)
                .default_value("thing"),
            FieldDescriptor::new("subtype")
                .strategy(LookupStrategy::Attribute)
                .default_value("boardgame"),
            FieldDescriptor::new("collection_id")
                .alias("collid")
                .strategy(LookupStrategy::Attribute),
            FieldDescriptor::new("name")
                .strategy(LookupStrategy::Text)
                .required(),
            FieldDescriptor::new("year_published").alias("yearpublished"),
            FieldDescriptor::new("image"),
            FieldDescriptor::new("thumbnail"),
            FieldDescriptor::new("stats"),
            FieldDescriptor::new("status"),
            FieldDescriptor::new("num_plays")
                .alias("numplays")
                .default_value("0"),
            FieldDescriptor::new("comment"),
        ],
    )
});

/// One game in a user's collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionItem {
    object_id: u32,
    object_type: String,
    subtype: String,
    collection_id: Option<u32>,
    name: String,
    year_published: Option<i32>,
    image: Option<Url>,
    thumbnail: Option<Url>,
    stats: Option<CollectionStats>,
    status: CollectionStatus,
    num_plays: u32,
    comment: Option<String>,
}

impl CollectionItem {
    /// BGG thing id of the game.
    #[must_use]
    pub fn object_id(&self) -> u32 {
        self.object_id
    }

    #[must_use]
    pub fn object_type(&self) -> &str {
        &self.object_type
    }

    #[must_use]
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// Id of this collection entry, distinct from the game id.
    #[must_use]
    pub fn collection_id(&self) -> Option<u32> {
        self.collection_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn year_published(&self) -> Option<i32> {
        self.year_published
    }

    #[must_use]
    pub fn image(&self) -> Option<&Url> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn thumbnail(&self) -> Option<&Url> {
        self.thumbnail.as_ref()
    }

    #[must_use]
    pub fn stats(&self) -> Option<&CollectionStats> {
        self.stats.as_ref()
    }

    /// Status flags; all unset when the element is absent.
    #[must_use]
    pub fn status(&self) -> &CollectionStatus {
        &self.status
    }

    #[must_use]
    pub fn num_plays(&self) -> u32 {
        self.num_plays
    }

    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// The collector's own rating.
    #[must_use]
    pub fn rating(&self) -> Option<f64> {
        self.stats.as_ref().and_then(CollectionStats::rating)
    }
}

impl XmlRecord for CollectionItem {
    fn schema() -> &'static RecordSchema {
        &ITEM_SCHEMA
    }

    fn from_values(values: &ValueMap<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            object_id: values.require("object_id")?,
            object_type: values.require("object_type")?,
            subtype: values.require("subtype")?,
            collection_id: values.get("collection_id")?,
            name: values.require("name")?,
            year_published: values.get("year_published")?,
            image: values.get("image")?,
            thumbnail: values.get("thumbnail")?,
            stats: values.record("stats")?,
            status: values.record("status")?.unwrap_or_default(),
            num_plays: values.require("num_plays")?,
            comment: values.get("comment")?,
        })
    }
}

static COLLECTION_SCHEMA: LazyLock<RecordSchema> = LazyLock::new(|| {
    RecordSchema::new(
        "collection",
        [
            FieldDescriptor::new("total_items")
                .alias("totalitems")
                .strategy(LookupStrategy::Attribute)
                .default_value("0"),
            FieldDescriptor::new("items")
                .xml_tag("item")
                .strategy(LookupStrategy::FindAll),
        ],
    )
});

/// A user's collection, as returned by the `collection` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    username: Option<String>,
    total_items: u32,
    items: RecordList<CollectionItem>,
    fetched_at: DateTime<Utc>,
}

impl Collection {
    /// Attach the owner's username, which the response does not carry.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Item count reported by BGG.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.total_items
    }

    #[must_use]
    pub fn items(&self) -> &RecordList<CollectionItem> {
        &self.items
    }

    #[must_use]
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Items the user currently owns.
    #[must_use]
    pub fn owned(&self) -> RecordList<CollectionItem> {
        self.items.filter(|item| item.status().own())
    }

    /// Items on the user's wishlist.
    #[must_use]
    pub fn wishlist(&self) -> RecordList<CollectionItem> {
        self.items.filter(|item| item.status().wishlist())
    }
}

impl XmlRecord for Collection {
    fn schema() -> &'static RecordSchema {
        &COLLECTION_SCHEMA
    }

    fn from_values(values: &ValueMap<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            username: None,
            total_items: values.require("total_items")?,
            items: values.list("items")?,
            fetched_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    const COLLECTION: &str = r#"<items totalitems="2" termsofuse="https://boardgamegeek.com/xmlapi/termsofuse">
        <item objecttype="thing" objectid="13" subtype="boardgame" collid="1001">
            <name sortindex="1">CATAN</name>
            <yearpublished>1995</yearpublished>
            <thumbnail>https://cf.geekdo-images.com/catan_t.jpg</thumbnail>
            <stats minplayers="3" maxplayers="4" playingtime="120" numowned="200000">
                <rating value="7.5"><usersrated value="100000"/></rating>
            </stats>
            <status own="1" prevowned="0" fortrade="0" want="0" wanttoplay="0" wanttobuy="0" wishlist="0" preordered="0" lastmodified="2024-03-01 10:00:00"/>
            <numplays>12</numplays>
        </item>
        <item objecttype="thing" objectid="266192" subtype="boardgame" collid="1002">
            <name sortindex="1">Wingspan</name>
            <stats minplayers="1" maxplayers="5">
                <rating value="N/A"/>
            </stats>
            <status own="0" wishlist="1" wishlistpriority="2"/>
            <numplays>0</numplays>
            <comment>Birthday?</comment>
        </item>
    </items>"#;

    fn collection() -> Collection {
        let doc = Document::parse(COLLECTION).unwrap();
        Collection::from_xml(doc.root_element()).unwrap()
    }

    #[test]
    fn test_bind_collection() {
        let collection = collection().with_username("alice");

        assert_eq!(collection.username(), Some("alice"));
        assert_eq!(collection.total_items(), 2);
        assert_eq!(collection.items().len(), 2);

        let catan = &collection.items()[0];
        assert_eq!(catan.object_id(), 13);
        assert_eq!(catan.collection_id(), Some(1001));
        assert_eq!(catan.name(), "CATAN");
        assert_eq!(catan.year_published(), Some(1995));
        assert_eq!(catan.num_plays(), 12);
        assert_eq!(catan.rating(), Some(7.5));
        assert_eq!(catan.stats().unwrap().max_players(), Some(4));
        assert_eq!(catan.status().last_modified(), Some("2024-03-01 10:00:00"));
    }

    #[test]
    fn test_unrated_and_wishlist() {
        let collection = collection();
        let wingspan = &collection.items()[1];

        assert_eq!(wingspan.rating(), None);
        assert!(wingspan.status().wishlist());
        assert_eq!(wingspan.status().wishlist_priority(), Some(2));
        assert_eq!(wingspan.comment(), Some("Birthday?"));
        assert_eq!(collection.owned().len(), 1);
        assert_eq!(collection.wishlist()[0].object_id(), 266192);
    }

    #[test]
    fn test_missing_status_defaults_to_unset() {
        let doc = Document::parse(
            r#"<items totalitems="1"><item objectid="5"><name>Acquire</name></item></items>"#,
        )
        .unwrap();
        let collection = Collection::from_xml(doc.root_element()).unwrap();
        let item = &collection.items()[0];

        assert_eq!(item.status(), &CollectionStatus::default());
        assert_eq!(item.num_plays(), 0);
        assert_eq!(item.subtype(), "boardgame");
        assert!(collection.username().is_none());
    }
}
