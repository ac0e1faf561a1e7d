//! Game names.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::binding::{FieldDescriptor, LookupStrategy, RecordSchema, ValueMap, XmlRecord};
use crate::error::Result;

/// Name type of a game's main title.
pub const PRIMARY_NAME_TYPE: &str = "primary";

static NAME_SCHEMA: LazyLock<RecordSchema> = LazyLock::new(|| {
    RecordSchema::new(
        "name",
        [
            FieldDescriptor::new("name_type")
                .alias("type")
                .strategy(LookupStrategy::Attribute)
                .required(),
            FieldDescriptor::new("value")
                .strategy(LookupStrategy::Attribute)
                .required(),
            FieldDescriptor::new("sort_index")
                .alias("sortindex")
                .strategy(LookupStrategy::Attribute)
                .default_value("1"),
        ],
    )
});

/// One name of a game, e.g. `<name type="primary" sortindex="1" value="Wingspan"/>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    name_type: String,
    value: String,
    sort_index: u32,
}

impl Name {
    /// `primary` or `alternate`.
    #[must_use]
    pub fn name_type(&self) -> &str {
        &self.name_type
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Position of the first significant character, 1-based.
    #[must_use]
    pub fn sort_index(&self) -> u32 {
        self.sort_index
    }

    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.name_type == PRIMARY_NAME_TYPE
    }
}

impl XmlRecord for Name {
    fn schema() -> &'static RecordSchema {
        &NAME_SCHEMA
    }

    fn from_values(values: &ValueMap<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            name_type: values.require("name_type")?,
            value: values.require("value")?,
            sort_index: values.require("sort_index")?,
        })
    }
}
