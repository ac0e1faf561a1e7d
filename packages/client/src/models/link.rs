//! Typed links from a game to related entities.

use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::binding::{
    from_xml_text_via_parse, FieldDescriptor, LookupStrategy, RecordSchema, ValueMap, XmlRecord,
};
use crate::error::Result;

/// Kind of entity a [`Link`] points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, Serialize, Deserialize)]
pub enum LinkType {
    #[strum(serialize = "boardgamecategory")]
    #[serde(rename = "boardgamecategory")]
    Category,
    #[strum(serialize = "boardgamemechanic")]
    #[serde(rename = "boardgamemechanic")]
    Mechanic,
    #[strum(serialize = "boardgamedesigner")]
    #[serde(rename = "boardgamedesigner")]
    Designer,
    #[strum(serialize = "boardgamepublisher")]
    #[serde(rename = "boardgamepublisher")]
    Publisher,
    #[strum(serialize = "boardgameartist")]
    #[serde(rename = "boardgameartist")]
    Artist,
    #[strum(serialize = "boardgamefamily")]
    #[serde(rename = "boardgamefamily")]
    Family,
    #[strum(serialize = "boardgameexpansion")]
    #[serde(rename = "boardgameexpansion")]
    Expansion,
    #[strum(serialize = "boardgameaccessory")]
    #[serde(rename = "boardgameaccessory")]
    Accessory,
    #[strum(serialize = "boardgameintegration")]
    #[serde(rename = "boardgameintegration")]
    Integration,
    #[strum(serialize = "boardgameimplementation")]
    #[serde(rename = "boardgameimplementation")]
    Implementation,
    #[strum(serialize = "boardgamecompilation")]
    #[serde(rename = "boardgamecompilation")]
    Compilation,
    /// Link types this client does not model.
    #[strum(default)]
    #[serde(untagged)]
    Other(String),
}

impl LinkType {
    /// Token used in the `type` attribute.
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            Self::Category => "boardgamecategory",
            Self::Mechanic => "boardgamemechanic",
            Self::Designer => "boardgamedesigner",
            Self::Publisher => "boardgamepublisher",
            Self::Artist => "boardgameartist",
            Self::Family => "boardgamefamily",
            Self::Expansion => "boardgameexpansion",
            Self::Accessory => "boardgameaccessory",
            Self::Integration => "boardgameintegration",
            Self::Implementation => "boardgameimplementation",
            Self::Compilation => "boardgamecompilation",
            Self::Other(token) => token,
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

from_xml_text_via_parse! {
    LinkType => "link type",
}

static LINK_SCHEMA: LazyLock<RecordSchema> = LazyLock::new(|| {
    RecordSchema::new(
        "link",
        [
            FieldDescriptor::new("link_type")
                .alias("type")
                .strategy(LookupStrategy::Attribute)
                .required(),
            FieldDescriptor::new("id")
                .strategy(LookupStrategy::Attribute)
                .required(),
            FieldDescriptor::new("value")
                .strategy(LookupStrategy::Attribute)
                .required(),
        ],
    )
});

/// A link such as `<link type="boardgamecategory" id="1089" value="Animals"/>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    link_type: LinkType,
    id: u32,
    value: String,
}

impl Link {
    #[must_use]
    pub fn link_type(&self) -> &LinkType {
        &self.link_type
    }

    /// BGG id of the linked entity.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Display name of the linked entity.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl XmlRecord for Link {
    fn schema() -> &'static RecordSchema {
        &LINK_SCHEMA
    }

    fn from_values(values: &ValueMap<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            link_type: values.require("link_type")?,
            id: values.require("id")?,
            value: values.require("value")?,
        })
    }
}
