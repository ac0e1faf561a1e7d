//! Field descriptors: per-field binding metadata.

use super::strategy::LookupStrategy;

/// Binding metadata for one field of a record schema.
///
/// Descriptors are built once, when the schema is defined, and never change
/// afterwards.
///
/// # Examples
/// ```
/// use bgg_client::binding::{FieldDescriptor, LookupStrategy};
///
/// let names = FieldDescriptor::new("names")
///     .strategy(LookupStrategy::FindAll)
///     .xml_tag("name");
/// assert_eq!(names.tag(), "name");
///
/// let min_players = FieldDescriptor::new("min_players").alias("minplayers");
/// assert_eq!(min_players.tag(), "minplayers");
/// assert_eq!(min_players.lookup_strategy(), LookupStrategy::Auto);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    alias: Option<&'static str>,
    xml_tag: Option<&'static str>,
    strategy: Option<LookupStrategy>,
    default: Option<&'static str>,
    required: bool,
}

impl FieldDescriptor {
    /// Create an optional field with no alias, tag or strategy.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            alias: None,
            xml_tag: None,
            strategy: None,
            default: None,
            required: false,
        }
    }

    /// Set the external name of the field.
    #[must_use]
    pub const fn alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    /// Set the XML tag or attribute name to probe, overriding the alias.
    #[must_use]
    pub const fn xml_tag(mut self, tag: &'static str) -> Self {
        self.xml_tag = Some(tag);
        self
    }

    /// Set the lookup strategy.
    #[must_use]
    pub const fn strategy(mut self, strategy: LookupStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Set the lookup strategy from a token such as `"findall"`.
    ///
    /// Unrecognized tokens downgrade to [`LookupStrategy::Auto`].
    #[must_use]
    pub fn strategy_token(self, token: &str) -> Self {
        self.strategy(LookupStrategy::from_token(token))
    }

    /// Raw value used when nothing is extracted. Clears `required`.
    #[must_use]
    pub const fn default_value(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self.required = false;
        self
    }

    /// Mark the field as required: construction fails when it is absent.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Declared field name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// External name: the alias, or the field name.
    #[must_use]
    pub fn external_name(&self) -> &'static str {
        self.alias.unwrap_or(self.name)
    }

    /// Tag used for lookups: explicit XML tag, else alias, else field name.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.xml_tag.unwrap_or_else(|| self.external_name())
    }

    /// Effective lookup strategy; `Auto` when none was declared.
    #[must_use]
    pub fn lookup_strategy(&self) -> LookupStrategy {
        self.strategy.unwrap_or_default()
    }

    /// Default raw value, if any.
    #[must_use]
    pub fn default_raw(&self) -> Option<&'static str> {
        self.default
    }

    /// Whether the field must have a value after defaults are applied.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required && self.default.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_resolution_order() {
        let plain = FieldDescriptor::new("description");
        assert_eq!(plain.tag(), "description");
        assert_eq!(plain.external_name(), "description");

        let aliased = FieldDescriptor::new("game_type").alias("type");
        assert_eq!(aliased.tag(), "type");

        let tagged = FieldDescriptor::new("names").alias("names").xml_tag("name");
        assert_eq!(tagged.tag(), "name");
        assert_eq!(tagged.external_name(), "names");
    }

    #[test]
    fn test_strategy_defaults_to_auto() {
        assert_eq!(FieldDescriptor::new("x").lookup_strategy(), LookupStrategy::Auto);
        assert_eq!(
            FieldDescriptor::new("x").strategy_token("bogus").lookup_strategy(),
            LookupStrategy::Auto
        );
        assert_eq!(
            FieldDescriptor::new("x").strategy_token("attribute").lookup_strategy(),
            LookupStrategy::Attribute
        );
    }

    #[test]
    fn test_default_clears_required() {
        let field = FieldDescriptor::new("page").required().default_value("1");
        assert!(!field.is_required());
        assert_eq!(field.default_raw(), Some("1"));

        let field = FieldDescriptor::new("id").required();
        assert!(field.is_required());
    }
}
