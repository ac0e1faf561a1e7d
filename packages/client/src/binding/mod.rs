//! Declarative XML-to-record binding.
//!
//! A record type declares a static [`RecordSchema`]: one [`FieldDescriptor`]
//! per field, each naming the tag to probe and the [`LookupStrategy`] to use.
//! The [`bind`] routine runs every field's extraction against an element and
//! collects the raw values into a [`ValueMap`]; the record's
//! [`XmlRecord::from_values`] then applies defaults, required checks and type
//! coercion. [`RecordList`] binds a sequence of elements into an ordered list.

mod binder;
mod extract;
mod field;
mod list;
mod schema;
mod strategy;
mod value;

pub use binder::bind;
pub use extract::{extract, Extracted, VALUE_ATTRIBUTE};
pub use field::FieldDescriptor;
pub use list::RecordList;
pub use schema::{RecordSchema, XmlRecord};
pub use strategy::LookupStrategy;
pub use value::{FromXmlText, ValueMap};

pub(crate) use value::from_xml_text_via_parse;
