//! Lookup strategies for reading one field out of an XML element.

use std::str::FromStr;

use strum::{Display, EnumString};

/// How a field's raw value is pulled out of an XML element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum LookupStrategy {
    /// Attribute on the element itself.
    Attribute,
    /// Trimmed text of the first direct child with the tag.
    Text,
    /// First direct child with the tag: its `value` attribute, else its text.
    Find,
    /// All direct children with the tag, as element handles.
    FindAll,
    /// Try attribute, single child, child text, then all children.
    #[default]
    Auto,
}

impl LookupStrategy {
    /// Parse a strategy token, falling back to [`LookupStrategy::Auto`] for
    /// anything unrecognized.
    ///
    /// # Examples
    /// ```
    /// use bgg_client::binding::LookupStrategy;
    ///
    /// assert_eq!(LookupStrategy::from_token("findall"), LookupStrategy::FindAll);
    /// assert_eq!(LookupStrategy::from_token("xpath"), LookupStrategy::Auto);
    /// ```
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        Self::from_str(token).unwrap_or_else(|_| {
            tracing::debug!(token, "Unrecognized lookup strategy, using auto");
            Self::Auto
        })
    }

    /// Whether this strategy was chosen explicitly (anything but `Auto`).
    #[must_use]
    pub fn is_explicit(self) -> bool {
        self != Self::Auto
    }
}
