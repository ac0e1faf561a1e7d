//! Community polls (suggested player count, age, language dependence).

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::binding::{
    FieldDescriptor, LookupStrategy, RecordList, RecordSchema, ValueMap, XmlRecord,
};
use crate::error::Result;

/// Name of the suggested player count poll.
pub const SUGGESTED_PLAYERS_POLL: &str = "suggested_numplayers";

static POLL_RESULT_SCHEMA: LazyLock<RecordSchema> = LazyLock::new(|| {
    RecordSchema::new(
        "poll result",
        [
            FieldDescriptor::new("value")
                .strategy(LookupStrategy::Attribute)
                .required(),
            FieldDescriptor::new("num_votes")
                .alias("numvotes")
                .strategy(LookupStrategy::Attribute)
                .default_value("0"),
            FieldDescriptor::new("level").strategy(LookupStrategy::Attribute),
        ],
    )
});

/// Votes for one answer, e.g. `<result value="Best" numvotes="412"/>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollResult {
    value: String,
    num_votes: u32,
    level: Option<u32>,
}

impl PollResult {
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn num_votes(&self) -> u32 {
        self.num_votes
    }

    /// Ordinal of the answer, only set by the language dependence poll.
    #[must_use]
    pub fn level(&self) -> Option<u32> {
        self.level
    }
}

impl XmlRecord for PollResult {
    fn schema() -> &'static RecordSchema {
        &POLL_RESULT_SCHEMA
    }

    fn from_values(values: &ValueMap<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            value: values.require("value")?,
            num_votes: values.require("num_votes")?,
            level: values.get("level")?,
        })
    }
}

static POLL_RESULTS_SCHEMA: LazyLock<RecordSchema> = LazyLock::new(|| {
    RecordSchema::new(
        "poll results",
        [
            FieldDescriptor::new("num_players")
                .alias("numplayers")
                .strategy(LookupStrategy::Attribute),
            FieldDescriptor::new("results")
                .xml_tag("result")
                .strategy(LookupStrategy::FindAll),
        ],
    )
});

/// One group of answers; the player count poll has one group per count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollResults {
    num_players: Option<String>,
    results: RecordList<PollResult>,
}

impl PollResults {
    /// Player count this group votes on, such as `3` or `4+`.
    #[must_use]
    pub fn num_players(&self) -> Option<&str> {
        self.num_players.as_deref()
    }

    #[must_use]
    pub fn results(&self) -> &RecordList<PollResult> {
        &self.results
    }

    /// Answer with the most votes. Ties go to the first answer listed.
    #[must_use]
    pub fn winner(&self) -> Option<&PollResult> {
        self.results
            .iter()
            .fold(None, |best: Option<&PollResult>, result| match best {
                Some(b) if b.num_votes() >= result.num_votes() => Some(b),
                _ => Some(result),
            })
    }
}

impl XmlRecord for PollResults {
    fn schema() -> &'static RecordSchema {
        &POLL_RESULTS_SCHEMA
    }

    fn from_values(values: &ValueMap<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            num_players: values.get("num_players")?,
            results: values.list("results")?,
        })
    }
}

static POLL_SCHEMA: LazyLock<RecordSchema> = LazyLock::new(|| {
    RecordSchema::new(
        "poll",
        [
            FieldDescriptor::new("name")
                .strategy(LookupStrategy::Attribute)
                .required(),
            FieldDescriptor::new("title").strategy(LookupStrategy::Attribute),
            FieldDescriptor::new("total_votes")
                .alias("totalvotes")
                .strategy(LookupStrategy::Attribute)
                .default_value("0"),
            FieldDescriptor::new("results").strategy(LookupStrategy::FindAll),
        ],
    )
});

/// A community poll attached to a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    name: String,
    title: Option<String>,
    total_votes: u32,
    results: RecordList<PollResults>,
}

impl Poll {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn total_votes(&self) -> u32 {
        self.total_votes
    }

    #[must_use]
    pub fn results(&self) -> &RecordList<PollResults> {
        &self.results
    }
}

impl XmlRecord for Poll {
    fn schema() -> &'static RecordSchema {
        &POLL_SCHEMA
    }

    fn from_values(values: &ValueMap<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            name: values.require("name")?,
            title: values.get("title")?,
            total_votes: values.require("total_votes")?,
            results: values.list("results")?,
        })
    }
}
