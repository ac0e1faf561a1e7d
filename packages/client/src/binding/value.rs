//! Bound value maps and typed coercion of raw XML values.

use std::collections::HashMap;

use url::Url;

use super::extract::Extracted;
use super::field::FieldDescriptor;
use super::list::RecordList;
use super::schema::{RecordSchema, XmlRecord};
use crate::error::{BggError, Result};
use crate::xml::find_children;

/// Conversion from a raw XML string into a field type.
pub trait FromXmlText: Sized {
    /// Human-readable type name for coercion errors.
    const EXPECTED: &'static str;

    /// Convert, or `None` if the text is not a valid value of this type.
    fn from_xml_text(text: &str) -> Option<Self>;
}

/// Implement [`FromXmlText`] through `FromStr` for each listed type.
macro_rules! from_xml_text_via_parse {
    ($($ty:ty => $expected:literal),* $(,)?) => {
        $(
            impl $crate::binding::FromXmlText for $ty {
                const EXPECTED: &'static str = $expected;

                fn from_xml_text(text: &str) -> Option<Self> {
                    text.trim().parse().ok()
                }
            }
        )*
    };
}

pub(crate) use from_xml_text_via_parse;

from_xml_text_via_parse! {
    i32 => "integer",
    i64 => "integer",
    u32 => "unsigned integer",
    u64 => "unsigned integer",
    f64 => "number",
}

impl FromXmlText for String {
    const EXPECTED: &'static str = "string";

    fn from_xml_text(text: &str) -> Option<Self> {
        Some(text.to_string())
    }
}

/// BGG encodes flags as `0`/`1`.
impl FromXmlText for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_xml_text(text: &str) -> Option<Self> {
        match text.trim() {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        }
    }
}

impl FromXmlText for Url {
    const EXPECTED: &'static str = "URL";

    fn from_xml_text(text: &str) -> Option<Self> {
        let text = text.trim();
        // BGG image links are sometimes protocol-relative
        match text.strip_prefix("//") {
            Some(rest) => Url::parse(&format!("https://{rest}")).ok(),
            None => Url::parse(text).ok(),
        }
    }
}

/// Raw values extracted for one record, keyed by XML tag.
///
/// Produced by the binder; consumed by [`XmlRecord::from_values`], which
/// reads fields by their declared name and gets defaults, required checks and
/// coercion errors applied here.
#[derive(Debug, Clone)]
pub struct ValueMap<'s, 'a, 'input: 'a> {
    schema: &'s RecordSchema,
    values: HashMap<&'static str, Extracted<'a, 'input>>,
    missing: Vec<&'static str>,
}

impl<'s, 'a, 'input: 'a> ValueMap<'s, 'a, 'input> {
    pub(crate) fn new(schema: &'s RecordSchema) -> Self {
        Self {
            schema,
            values: HashMap::with_capacity(schema.fields().len()),
            missing: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, tag: &'static str, value: Extracted<'a, 'input>) {
        self.values.insert(tag, value);
    }

    pub(crate) fn mark_missing(&mut self, tag: &'static str) {
        self.missing.push(tag);
    }

    /// Schema these values were bound against.
    #[must_use]
    pub fn schema(&self) -> &'s RecordSchema {
        self.schema
    }

    /// Raw value stored under an XML tag.
    #[must_use]
    pub fn raw(&self, tag: &str) -> Option<&Extracted<'a, 'input>> {
        self.values.get(tag)
    }

    /// Number of tags that produced a value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no field produced a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Tags with an explicit lookup strategy that produced nothing.
    #[must_use]
    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }

    /// Fail on the first required field that has no value and no default.
    pub fn check_required(&self) -> Result<()> {
        match self
            .schema
            .fields()
            .iter()
            .find(|f| f.is_required() && !self.values.contains_key(f.tag()))
        {
            Some(field) => Err(self.missing_field(field)),
            None => Ok(()),
        }
    }

    /// Typed value of a scalar field, with its default applied.
    ///
    /// A raw child element (from `Auto` on an empty child) counts as absent.
    pub fn get<T: FromXmlText>(&self, field: &str) -> Result<Option<T>> {
        let descriptor = self.descriptor(field)?;

        match self.values.get(descriptor.tag()) {
            Some(Extracted::Text(text)) => self.coerce(descriptor, text).map(Some),
            Some(value @ Extracted::Elements(_)) => Err(self.coercion_error::<T>(descriptor, value)),
            Some(Extracted::Element(_)) | None => match descriptor.default_raw() {
                Some(default) => self.coerce(descriptor, default).map(Some),
                None if descriptor.is_required() => Err(self.missing_field(descriptor)),
                None => Ok(None),
            },
        }
    }

    /// Typed value of a field that must be present.
    pub fn require<T: FromXmlText>(&self, field: &str) -> Result<T> {
        let descriptor = self.descriptor(field)?;
        self.get(field)?
            .ok_or_else(|| self.missing_field(descriptor))
    }

    /// Nested record bound from a single child element.
    pub fn record<R: XmlRecord>(&self, field: &str) -> Result<Option<R>> {
        let descriptor = self.descriptor(field)?;

        match self.values.get(descriptor.tag()) {
            Some(Extracted::Element(node)) => R::from_xml(*node).map(Some),
            Some(value) => Err(self.coercion_error_named(descriptor, value, R::schema().record_name())),
            None if descriptor.is_required() => Err(self.missing_field(descriptor)),
            None => Ok(None),
        }
    }

    /// List of records bound from matching child elements. Absent is empty.
    pub fn list<R: XmlRecord>(&self, field: &str) -> Result<RecordList<R>> {
        let descriptor = self.descriptor(field)?;

        match self.values.get(descriptor.tag()) {
            Some(Extracted::Elements(nodes)) => RecordList::from_elements(nodes.iter().copied()),
            Some(Extracted::Element(node)) => RecordList::from_elements([*node]),
            Some(value) => Err(self.coercion_error_named(descriptor, value, "element list")),
            None if descriptor.is_required() => Err(self.missing_field(descriptor)),
            None => Ok(RecordList::new()),
        }
    }

    /// List of records bound from the `item_tag` children of a wrapper
    /// element, as in `<ranks><rank/><rank/></ranks>`. Absent is empty.
    pub fn list_within<R: XmlRecord>(&self, field: &str, item_tag: &str) -> Result<RecordList<R>> {
        let descriptor = self.descriptor(field)?;

        match self.values.get(descriptor.tag()) {
            Some(Extracted::Element(node)) => RecordList::from_elements(find_children(*node, item_tag)),
            Some(value) => Err(self.coercion_error_named(descriptor, value, "element")),
            None if descriptor.is_required() => Err(self.missing_field(descriptor)),
            None => Ok(RecordList::new()),
        }
    }

    fn descriptor(&self, field: &str) -> Result<&'s FieldDescriptor> {
        self.schema.field(field).ok_or_else(|| BggError::MissingField {
            record: self.schema.record_name().to_string(),
            field: field.to_string(),
        })
    }

    fn coerce<T: FromXmlText>(&self, descriptor: &FieldDescriptor, text: &str) -> Result<T> {
        T::from_xml_text(text)
            .ok_or_else(|| self.coercion_error::<T>(descriptor, &Extracted::Text(text)))
    }

    fn coercion_error<T: FromXmlText>(
        &self,
        descriptor: &FieldDescriptor,
        value: &Extracted<'_, '_>,
    ) -> BggError {
        self.coercion_error_named(descriptor, value, T::EXPECTED)
    }

    fn coercion_error_named(
        &self,
        descriptor: &FieldDescriptor,
        value: &Extracted<'_, '_>,
        expected: &str,
    ) -> BggError {
        BggError::Coercion {
            record: self.schema.record_name().to_string(),
            field: descriptor.tag().to_string(),
            value: value.describe(),
            expected: expected.to_string(),
        }
    }

    fn missing_field(&self, descriptor: &FieldDescriptor) -> BggError {
        BggError::MissingField {
            record: self.schema.record_name().to_string(),
            field: descriptor.tag().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::LookupStrategy;
    use roxmltree::Document;

    fn schema() -> RecordSchema {
        RecordSchema::new(
            "sample",
            [
                FieldDescriptor::new("id").strategy(LookupStrategy::Attribute).required(),
                FieldDescriptor::new("page")
                    .strategy(LookupStrategy::Attribute)
                    .default_value("1"),
                FieldDescriptor::new("rating").strategy(LookupStrategy::Find),
                FieldDescriptor::new("owned").strategy(LookupStrategy::Attribute),
                FieldDescriptor::new("links")
                    .strategy(LookupStrategy::FindAll)
                    .xml_tag("link"),
                FieldDescriptor::new("status"),
            ],
        )
    }

    #[test]
    fn test_scalar_coercion() {
        let schema = schema();
        let doc = Document::parse(r#"<item id="42" owned="1"><rating value="7.5"/></item>"#)
            .unwrap();
        let values = schema.bind(doc.root_element());

        assert_eq!(values.require::<u32>("id").unwrap(), 42);
        assert_eq!(values.get::<f64>("rating").unwrap(), Some(7.5));
        assert_eq!(values.get::<bool>("owned").unwrap(), Some(true));
        assert_eq!(values.get::<String>("id").unwrap(), Some("42".to_string()));
    }

    #[test]
    fn test_default_applied_when_absent() {
        let schema = schema();
        let doc = Document::parse(r#"<item id="1"/>"#).unwrap();
        let values = schema.bind(doc.root_element());

        assert_eq!(values.get::<u32>("page").unwrap(), Some(1));
        assert_eq!(values.get::<f64>("rating").unwrap(), None);
    }

    #[test]
    fn test_missing_required_field() {
        let schema = schema();
        let doc = Document::parse(r#"<item/>"#).unwrap();
        let values = schema.bind(doc.root_element());

        let err = values.check_required().unwrap_err();
        assert!(matches!(err, BggError::MissingField { ref field, .. } if field == "id"));
        assert!(values.require::<u32>("id").is_err());
    }

    #[test]
    fn test_coercion_failure() {
        let schema = schema();
        let doc = Document::parse(r#"<item id="not-a-number"/>"#).unwrap();
        let values = schema.bind(doc.root_element());

        let err = values.require::<u32>("id").unwrap_err();
        match err {
            BggError::Coercion { field, value, expected, .. } => {
                assert_eq!(field, "id");
                assert_eq!(value, "not-a-number");
                assert_eq!(expected, "unsigned integer");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_raw_element_counts_as_absent_for_scalars() {
        let schema = schema();
        let doc = Document::parse(r#"<item id="1"><status/></item>"#).unwrap();
        let values = schema.bind(doc.root_element());

        assert!(matches!(values.raw("status"), Some(Extracted::Element(_))));
        assert_eq!(values.get::<String>("status").unwrap(), None);
    }

    #[test]
    fn test_element_list_is_not_a_scalar() {
        let schema = schema();
        let doc = Document::parse(r#"<item id="1"><link/><link/></item>"#).unwrap();
        let values = schema.bind(doc.root_element());

        assert!(values.get::<String>("links").is_err());
    }

    #[test]
    fn test_bool_and_url_coercion() {
        assert_eq!(bool::from_xml_text("0"), Some(false));
        assert_eq!(bool::from_xml_text("yes"), None);
        assert_eq!(
            Url::from_xml_text("//cf.geekdo-images.com/pic.jpg").map(|u| u.to_string()),
            Some("https://cf.geekdo-images.com/pic.jpg".to_string())
        );
        assert!(Url::from_xml_text("not a url").is_none());
    }
}
