//! Record schemas and the `XmlRecord` trait that ties a record type to one.

use std::collections::HashSet;

use roxmltree::Node;

use super::binder::bind;
use super::field::FieldDescriptor;
use super::list::RecordList;
use super::value::ValueMap;
use crate::error::Result;

/// Ordered field descriptors describing one record type.
///
/// Schemas are static data: build one per record type inside a `LazyLock`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    record: &'static str,
    fields: Vec<FieldDescriptor>,
}

impl RecordSchema {
    /// Create a schema from its fields, in declaration order.
    ///
    /// Two fields sharing a name is a programming error, caught by a
    /// debug assertion.
    #[must_use]
    pub fn new(record: &'static str, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        let fields: Vec<FieldDescriptor> = fields.into_iter().collect();

        let mut seen = HashSet::new();
        for field in &fields {
            let unique = seen.insert(field.name());
            debug_assert!(
                unique,
                "duplicate field '{}' in schema for {record}",
                field.name()
            );
        }

        Self { record, fields }
    }

    /// Name of the record type, used in error messages and logs.
    #[must_use]
    pub fn record_name(&self) -> &'static str {
        self.record
    }

    /// Field descriptors in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field by its declared name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// External names of all fields (alias or field name), in order.
    pub fn external_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(FieldDescriptor::external_name)
    }

    /// Extract the raw value of every field from `element`.
    pub fn bind<'s, 'a, 'input>(&'s self, element: Node<'a, 'input>) -> ValueMap<'s, 'a, 'input> {
        bind(element, self)
    }
}

/// A record type that can be built from an XML element.
///
/// Implementors provide their static schema and a construction step that
/// reads typed values out of the bound [`ValueMap`].
pub trait XmlRecord: Sized {
    /// Schema describing this record's fields.
    fn schema() -> &'static RecordSchema;

    /// Build and validate the record from bound values.
    fn from_values(values: &ValueMap<'_, '_, '_>) -> Result<Self>;

    /// Bind `element` against the schema and construct the record.
    fn from_xml(element: Node<'_, '_>) -> Result<Self> {
        let values = Self::schema().bind(element);
        values.check_required()?;
        Self::from_values(&values)
    }

    /// Bind every element, in order. The first failure aborts the whole list.
    fn from_xml_all<'a, 'input: 'a>(
        elements: impl IntoIterator<Item = Node<'a, 'input>>,
    ) -> Result<RecordList<Self>> {
        RecordList::from_elements(elements)
    }
}
