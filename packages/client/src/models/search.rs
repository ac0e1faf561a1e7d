//! Search results.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::game::GameType;
use crate::binding::{
    FieldDescriptor, LookupStrategy, RecordList, RecordSchema, ValueMap, XmlRecord,
};
use crate::error::Result;

static SEARCH_RESULT_SCHEMA: LazyLock<RecordSchema> = LazyLock::new(|| {
    RecordSchema::new(
        "search result",
        [
            FieldDescriptor::new("game_type")
                .alias("type")
                .strategy(LookupStrategy::Attribute)
                .default_value("boardgame"),
            FieldDescriptor::new("id")
                .strategy(LookupStrategy::Attribute)
                .required(),
            FieldDescriptor::new("name")
                .strategy(LookupStrategy::Find)
                .required(),
            FieldDescriptor::new("year_published")
                .alias("yearpublished")
                .strategy(LookupStrategy::Find),
        ],
    )
});

/// One search hit. Only the name and year are included; fetch the thing for
/// details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    game_type: GameType,
    id: u32,
    name: String,
    year_published: Option<i32>,
}

impl SearchResult {
    #[must_use]
    pub fn game_type(&self) -> GameType {
        self.game_type
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn year_published(&self) -> Option<i32> {
        self.year_published
    }
}

impl XmlRecord for SearchResult {
    fn schema() -> &'static RecordSchema {
        &SEARCH_RESULT_SCHEMA
    }

    fn from_values(values: &ValueMap<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            game_type: values.require("game_type")?,
            id: values.require("id")?,
            name: values.require("name")?,
            year_published: values.get("year_published")?,
        })
    }
}

static SEARCH_RESPONSE_SCHEMA: LazyLock<RecordSchema> = LazyLock::new(|| {
    RecordSchema::new(
        "search response",
        [
            FieldDescriptor::new("total")
                .strategy(LookupStrategy::Attribute)
                .default_value("0"),
            FieldDescriptor::new("results")
                .xml_tag("item")
                .strategy(LookupStrategy::FindAll),
        ],
    )
});

/// The `<items>` root of a search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    total: u32,
    results: RecordList<SearchResult>,
}

impl SearchResponse {
    /// Total hits reported by BGG.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn results(&self) -> &RecordList<SearchResult> {
        &self.results
    }

    #[must_use]
    pub fn into_results(self) -> RecordList<SearchResult> {
        self.results
    }
}

impl XmlRecord for SearchResponse {
    fn schema() -> &'static RecordSchema {
        &SEARCH_RESPONSE_SCHEMA
    }

    fn from_values(values: &ValueMap<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            total: values.require("total")?,
            results: values.list("results")?,
        })
    }
}
