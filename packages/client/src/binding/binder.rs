//! The binder: one XML element plus one schema in, one value map out.

use roxmltree::Node;
use tracing::warn;

use super::extract::extract;
use super::schema::RecordSchema;
use super::value::ValueMap;
use crate::xml::get_tag_name;

/// Extract every field of `schema` from `element`, in schema order.
///
/// Never fails: a field that yields nothing is simply left out of the map.
/// Misses under an explicit strategy are logged and recorded in
/// [`ValueMap::missing`]; misses under `Auto` are expected and stay silent.
/// Defaults, required checks and type coercion happen later, when the record
/// is constructed from the map.
pub fn bind<'s, 'a, 'input>(
    element: Node<'a, 'input>,
    schema: &'s RecordSchema,
) -> ValueMap<'s, 'a, 'input> {
    let mut values = ValueMap::new(schema);

    for field in schema.fields() {
        let tag = field.tag();
        let strategy = field.lookup_strategy();

        match extract(element, tag, strategy) {
            Some(value) => values.insert(tag, value),
            None if strategy.is_explicit() => {
                warn!(
                    record = schema.record_name(),
                    field = tag,
                    %strategy,
                    element = get_tag_name(element),
                    "Missing field in XML element"
                );
                values.mark_missing(tag);
            }
            None => {}
        }
    }

    values
}
