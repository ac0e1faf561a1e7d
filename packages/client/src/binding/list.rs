//! Ordered, homogeneous lists of bound records.

use std::ops::Index;

use roxmltree::Node;
use serde::{Deserialize, Serialize};

use super::schema::XmlRecord;
use crate::error::Result;

/// Records of one type, in source document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordList<T> {
    items: Vec<T>,
}

impl<T> RecordList<T> {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Records as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// First record, if any.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// Append a record.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// First record matching `predicate`.
    pub fn get(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|item| predicate(item))
    }

    /// Unwrap into the underlying vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Clone> RecordList<T> {
    /// The ordered sub-list of records matching `predicate`.
    ///
    /// # Examples
    /// ```
    /// use bgg_client::binding::RecordList;
    ///
    /// let list: RecordList<u32> = (1..=6).collect();
    /// let even = list.filter(|n| n % 2 == 0);
    /// assert_eq!(even.as_slice(), &[2, 4, 6]);
    /// ```
    #[must_use]
    pub fn filter(&self, mut predicate: impl FnMut(&T) -> bool) -> Self {
        self.items
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }
}

impl<T: XmlRecord> RecordList<T> {
    /// Bind each element in order. Any failure fails the whole list.
    pub fn from_elements<'a, 'input: 'a>(
        elements: impl IntoIterator<Item = Node<'a, 'input>>,
    ) -> Result<Self> {
        let items = elements
            .into_iter()
            .map(T::from_xml)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { items })
    }
}

impl<T> Default for RecordList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for RecordList<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for RecordList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for RecordList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for RecordList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'l, T> IntoIterator for &'l RecordList<T> {
    type Item = &'l T;
    type IntoIter = std::slice::Iter<'l, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> Index<usize> for RecordList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{FieldDescriptor, LookupStrategy, RecordSchema, ValueMap};
    use crate::error::BggError;
    use roxmltree::Document;
    use std::sync::LazyLock;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        id: u32,
        kind: String,
    }

    static ENTRY_SCHEMA: LazyLock<RecordSchema> = LazyLock::new(|| {
        RecordSchema::new(
            "entry",
            [
                FieldDescriptor::new("id")
                    .strategy(LookupStrategy::Attribute)
                    .required(),
                FieldDescriptor::new("kind")
                    .alias("type")
                    .strategy(LookupStrategy::Attribute)
                    .default_value("none"),
            ],
        )
    });

    impl XmlRecord for Entry {
        fn schema() -> &'static RecordSchema {
            &ENTRY_SCHEMA
        }

        fn from_values(values: &ValueMap<'_, '_, '_>) -> crate::error::Result<Self> {
            Ok(Self {
                id: values.require("id")?,
                kind: values.require("kind")?,
            })
        }
    }

    fn bind_all(xml: &str) -> crate::error::Result<RecordList<Entry>> {
        let doc = Document::parse(xml).unwrap();
        RecordList::from_elements(doc.root_element().children().filter(|n| n.is_element()))
    }

    #[test]
    fn test_from_elements_preserves_order() {
        let list = bind_all(r#"<r><e id="3" type="a"/><e id="1"/><e id="2" type="a"/></r>"#).unwrap();
        let ids: Vec<_> = list.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(list[1].kind, "none");
    }

    #[test]
    fn test_from_elements_empty() {
        let list = bind_all("<r/>").unwrap();
        assert!(list.is_empty());
        assert_eq!(list, RecordList::new());
    }

    #[test]
    fn test_no_deduplication() {
        let list = bind_all(r#"<r><e id="1"/><e id="1"/></r>"#).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_one_failure_fails_whole_list() {
        let result = bind_all(r#"<r><e id="1"/><e/><e id="3"/></r>"#);
        assert!(matches!(result, Err(BggError::MissingField { .. })));
    }

    #[test]
    fn test_filter_and_get() {
        let list = bind_all(r#"<r><e id="1" type="a"/><e id="2" type="b"/><e id="3" type="a"/></r>"#)
            .unwrap();

        let a = list.filter(|e| e.kind == "a");
        assert_eq!(a.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 3]);

        assert_eq!(list.get(|e| e.kind == "b").map(|e| e.id), Some(2));
        assert!(list.get(|e| e.kind == "c").is_none());
        assert!(list.filter(|e| e.kind == "c").is_empty());
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let list: RecordList<u32> = vec![1, 2].into();
        assert_eq!(serde_json::to_string(&list).unwrap(), "[1,2]");
    }
}
