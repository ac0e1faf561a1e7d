//! Rating statistics and rankings.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::binding::{
    FieldDescriptor, LookupStrategy, RecordList, RecordSchema, ValueMap, XmlRecord,
};
use crate::error::Result;

/// Rank name of the overall board game ranking.
pub const OVERALL_RANK_NAME: &str = "boardgame";

static RANK_SCHEMA: LazyLock<RecordSchema> = LazyLock::new(|| {
    RecordSchema::new(
        "rank",
        [
            FieldDescriptor::new("rank_type")
                .alias("type")
                .strategy(LookupStrategy::Attribute)
                .required(),
            FieldDescriptor::new("id").strategy(LookupStrategy::Attribute),
            FieldDescriptor::new("name")
                .strategy(LookupStrategy::Attribute)
                .required(),
            FieldDescriptor::new("friendly_name")
                .alias("friendlyname")
                .strategy(LookupStrategy::Attribute),
            FieldDescriptor::new("value").strategy(LookupStrategy::Attribute),
            FieldDescriptor::new("bayes_average")
                .alias("bayesaverage")
                .strategy(LookupStrategy::Attribute),
        ],
    )
});

/// Position in one ranking, e.g. overall or within a family like strategy games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rank {
    rank_type: String,
    id: Option<u32>,
    name: String,
    friendly_name: Option<String>,
    value: Option<u32>,
    bayes_average: Option<f64>,
}

impl Rank {
    /// `subtype` or `family`.
    #[must_use]
    pub fn rank_type(&self) -> &str {
        &self.rank_type
    }

    #[must_use]
    pub fn id(&self) -> Option<u32> {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn friendly_name(&self) -> Option<&str> {
        self.friendly_name.as_deref()
    }

    /// Rank position; `None` when BGG reports "Not Ranked".
    #[must_use]
    pub fn value(&self) -> Option<u32> {
        self.value
    }

    #[must_use]
    pub fn bayes_average(&self) -> Option<f64> {
        self.bayes_average
    }
}

/// "Not Ranked" and similar placeholders read as absent.
fn ranked<T: std::str::FromStr>(raw: Option<String>) -> Option<T> {
    raw.and_then(|text| text.trim().parse().ok())
}

impl XmlRecord for Rank {
    fn schema() -> &'static RecordSchema {
        &RANK_SCHEMA
    }

    fn from_values(values: &ValueMap<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            rank_type: values.require("rank_type")?,
            id: values.get("id")?,
            name: values.require("name")?,
            friendly_name: values.get("friendly_name")?,
            value: ranked(values.get("value")?),
            bayes_average: ranked(values.get("bayes_average")?),
        })
    }
}

static RATINGS_SCHEMA: LazyLock<RecordSchema> = LazyLock::new(|| {
    RecordSchema::new(
        "ratings",
        [
            FieldDescriptor::new("users_rated")
                .alias("usersrated")
                .default_value("0"),
            FieldDescriptor::new("average"),
            FieldDescriptor::new("bayes_average").alias("bayesaverage"),
            FieldDescriptor::new("std_dev").alias("stddev"),
            FieldDescriptor::new("median"),
            FieldDescriptor::new("owned").default_value("0"),
            FieldDescriptor::new("trading").default_value("0"),
            FieldDescriptor::new("wanting").default_value("0"),
            FieldDescriptor::new("wishing").default_value("0"),
            FieldDescriptor::new("num_comments")
                .alias("numcomments")
                .default_value("0"),
            FieldDescriptor::new("num_weights")
                .alias("numweights")
                .default_value("0"),
            FieldDescriptor::new("average_weight").alias("averageweight"),
            FieldDescriptor::new("ranks"),
        ],
    )
});

/// Aggregate user ratings of a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ratings {
    users_rated: u32,
    average: Option<f64>,
    bayes_average: Option<f64>,
    std_dev: Option<f64>,
    median: Option<f64>,
    owned: u32,
    trading: u32,
    wanting: u32,
    wishing: u32,
    num_comments: u32,
    num_weights: u32,
    average_weight: Option<f64>,
    ranks: RecordList<Rank>,
}

impl Ratings {
    #[must_use]
    pub fn users_rated(&self) -> u32 {
        self.users_rated
    }

    #[must_use]
    pub fn average(&self) -> Option<f64> {
        self.average
    }

    /// Bayesian average used for ranking ("Geek Rating").
    #[must_use]
    pub fn bayes_average(&self) -> Option<f64> {
        self.bayes_average
    }

    #[must_use]
    pub fn std_dev(&self) -> Option<f64> {
        self.std_dev
    }

    #[must_use]
    pub fn median(&self) -> Option<f64> {
        self.median
    }

    #[must_use]
    pub fn owned(&self) -> u32 {
        self.owned
    }

    #[must_use]
    pub fn trading(&self) -> u32 {
        self.trading
    }

    #[must_use]
    pub fn wanting(&self) -> u32 {
        self.wanting
    }

    #[must_use]
    pub fn wishing(&self) -> u32 {
        self.wishing
    }

    #[must_use]
    pub fn num_comments(&self) -> u32 {
        self.num_comments
    }

    #[must_use]
    pub fn num_weights(&self) -> u32 {
        self.num_weights
    }

    /// Complexity from 1 (light) to 5 (heavy).
    #[must_use]
    pub fn average_weight(&self) -> Option<f64> {
        self.average_weight
    }

    #[must_use]
    pub fn ranks(&self) -> &RecordList<Rank> {
        &self.ranks
    }

    /// Overall board game rank, if ranked.
    #[must_use]
    pub fn overall_rank(&self) -> Option<u32> {
        self.ranks
            .get(|rank| rank.name() == OVERALL_RANK_NAME)
            .and_then(Rank::value)
    }
}

impl XmlRecord for Ratings {
    fn schema() -> &'static RecordSchema {
        &RATINGS_SCHEMA
    }

    fn from_values(values: &ValueMap<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            users_rated: values.require("users_rated")?,
            average: values.get("average")?,
            bayes_average: values.get("bayes_average")?,
            std_dev: values.get("std_dev")?,
            median: values.get("median")?,
            owned: values.require("owned")?,
            trading: values.require("trading")?,
            wanting: values.require("wanting")?,
            wishing: values.require("wishing")?,
            num_comments: values.require("num_comments")?,
            num_weights: values.require("num_weights")?,
            average_weight: values.get("average_weight")?,
            ranks: values.list_within("ranks", "rank")?,
        })
    }
}

static STATISTICS_SCHEMA: LazyLock<RecordSchema> = LazyLock::new(|| {
    RecordSchema::new(
        "statistics",
        [
            FieldDescriptor::new("page")
                .strategy(LookupStrategy::Attribute)
                .default_value("1"),
            FieldDescriptor::new("ratings"),
        ],
    )
});

/// The `<statistics>` block returned with `stats=1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    page: u32,
    ratings: Option<Ratings>,
}

impl Statistics {
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn ratings(&self) -> Option<&Ratings> {
        self.ratings.as_ref()
    }
}

impl XmlRecord for Statistics {
    fn schema() -> &'static RecordSchema {
        &STATISTICS_SCHEMA
    }

    fn from_values(values: &ValueMap<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            page: values.require("page")?,
            ratings: values.record("ratings")?,
        })
    }
}
