//! Per-field value extraction.
//!
//! Absence is a normal outcome and is reported as `None`, never as an error.

use roxmltree::Node;

use super::strategy::LookupStrategy;
use crate::xml::{find_child, find_children, non_empty_text};

/// Name of the attribute that BGG uses to carry a child element's value.
pub const VALUE_ATTRIBUTE: &str = "value";

/// A raw value pulled out of an XML element.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted<'a, 'input: 'a> {
    /// An attribute value or trimmed, non-empty text.
    Text(&'a str),
    /// A single child element with neither a `value` attribute nor text.
    Element(Node<'a, 'input>),
    /// All matching child elements, in document order.
    Elements(Vec<Node<'a, 'input>>),
}

impl<'a> Extracted<'a, '_> {
    /// The textual value, if this is one.
    #[must_use]
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Self::Text(text) => Some(*text),
            _ => None,
        }
    }

    /// Short description used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Text(text) => (*text).to_string(),
            Self::Element(node) => format!("<{}>", node.tag_name().name()),
            Self::Elements(nodes) => format!("{} elements", nodes.len()),
        }
    }
}

/// Extract the value for `tag` from `element` using `strategy`.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use bgg_client::binding::{extract, Extracted, LookupStrategy};
///
/// let doc = Document::parse(r#"<item id="174430"><yearpublished value="2017"/></item>"#).unwrap();
/// let item = doc.root_element();
///
/// assert_eq!(
///     extract(item, "id", LookupStrategy::Attribute),
///     Some(Extracted::Text("174430"))
/// );
/// assert_eq!(
///     extract(item, "yearpublished", LookupStrategy::Find),
///     Some(Extracted::Text("2017"))
/// );
/// assert_eq!(extract(item, "minage", LookupStrategy::Find), None);
/// ```
pub fn extract<'a, 'input>(
    element: Node<'a, 'input>,
    tag: &str,
    strategy: LookupStrategy,
) -> Option<Extracted<'a, 'input>> {
    match strategy {
        LookupStrategy::Attribute => by_attribute(element, tag),
        LookupStrategy::Text => by_child_text(element, tag),
        LookupStrategy::Find => by_find(element, tag),
        LookupStrategy::FindAll => by_find_all(element, tag),
        LookupStrategy::Auto => auto_detect(element, tag),
    }
}

/// Auto-detection chain. Order matters: the first step that yields a value
/// wins and later steps are not tried.
fn auto_detect<'a, 'input>(element: Node<'a, 'input>, tag: &str) -> Option<Extracted<'a, 'input>> {
    by_attribute(element, tag)
        .or_else(|| by_find_or_element(element, tag))
        .or_else(|| by_child_text(element, tag))
        .or_else(|| by_find_all(element, tag))
}

fn by_attribute<'a, 'input>(element: Node<'a, 'input>, tag: &str) -> Option<Extracted<'a, 'input>> {
    element.attribute(tag).map(Extracted::Text)
}

fn by_child_text<'a, 'input>(element: Node<'a, 'input>, tag: &str) -> Option<Extracted<'a, 'input>> {
    find_child(element, tag)
        .and_then(non_empty_text)
        .map(Extracted::Text)
}

fn by_find<'a, 'input>(element: Node<'a, 'input>, tag: &str) -> Option<Extracted<'a, 'input>> {
    let child = find_child(element, tag)?;
    child
        .attribute(VALUE_ATTRIBUTE)
        .or_else(|| non_empty_text(child))
        .map(Extracted::Text)
}

/// Like [`by_find`], but hands back the child itself when it has neither a
/// `value` attribute nor text.
fn by_find_or_element<'a, 'input>(
    element: Node<'a, 'input>,
    tag: &str,
) -> Option<Extracted<'a, 'input>> {
    let child = find_child(element, tag)?;
    Some(by_find(element, tag).unwrap_or(Extracted::Element(child)))
}

fn by_find_all<'a, 'input>(element: Node<'a, 'input>, tag: &str) -> Option<Extracted<'a, 'input>> {
    let elements: Vec<_> = find_children(element, tag).collect();
    if elements.is_empty() {
        None
    } else {
        Some(Extracted::Elements(elements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    fn text<'a, 'input>(value: Option<Extracted<'a, 'input>>) -> Option<&'a str> {
        value.and_then(|v| v.as_text())
    }

    #[test]
    fn test_attribute_present_and_absent() {
        let doc = Document::parse(r#"<game id="174430"/>"#).unwrap();
        let game = doc.root_element();

        assert_eq!(text(extract(game, "id", LookupStrategy::Attribute)), Some("174430"));
        assert_eq!(extract(game, "type", LookupStrategy::Attribute), None);
    }

    #[test]
    fn test_attribute_does_not_read_children() {
        let doc = Document::parse(r#"<game><id>1</id></game>"#).unwrap();
        assert_eq!(extract(doc.root_element(), "id", LookupStrategy::Attribute), None);
    }

    #[test]
    fn test_text_trims_and_rejects_whitespace() {
        let xml = r#"<game><description>  A bird game.  </description><image>   </image></game>"#;
        let doc = Document::parse(xml).unwrap();
        let game = doc.root_element();

        assert_eq!(
            text(extract(game, "description", LookupStrategy::Text)),
            Some("A bird game.")
        );
        assert_eq!(extract(game, "image", LookupStrategy::Text), None);
        assert_eq!(extract(game, "thumbnail", LookupStrategy::Text), None);
    }

    #[test]
    fn test_find_prefers_value_attribute() {
        let xml = r#"<game><yearpublished value="2017">1999</yearpublished></game>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(
            text(extract(doc.root_element(), "yearpublished", LookupStrategy::Find)),
            Some("2017")
        );
    }

    #[test]
    fn test_find_falls_back_to_text() {
        let xml = r#"<item><yearpublished> 1995 </yearpublished><numplays>  </numplays></item>"#;
        let doc = Document::parse(xml).unwrap();
        let item = doc.root_element();

        assert_eq!(text(extract(item, "yearpublished", LookupStrategy::Find)), Some("1995"));
        assert_eq!(extract(item, "numplays", LookupStrategy::Find), None);
        assert_eq!(extract(item, "missing", LookupStrategy::Find), None);
    }

    #[test]
    fn test_find_only_looks_at_direct_children() {
        let xml = r#"<game><statistics><ratings><average value="8.0"/></ratings></statistics></game>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(extract(doc.root_element(), "average", LookupStrategy::Find), None);
    }

    #[test]
    fn test_find_all_in_document_order() {
        let xml = r#"<game>
            <link type="boardgamecategory" id="1" value="Animals"/>
            <name value="Wingspan"/>
            <link type="boardgamemechanic" id="2" value="Dice Rolling"/>
            <link type="boardgamedesigner" id="3" value="Elizabeth Hargrave"/>
        </game>"#;
        let doc = Document::parse(xml).unwrap();

        let Some(Extracted::Elements(links)) =
            extract(doc.root_element(), "link", LookupStrategy::FindAll)
        else {
            panic!("expected elements");
        };
        let ids: Vec<_> = links.iter().filter_map(|l| l.attribute("id")).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_find_all_none_found() {
        let doc = Document::parse(r#"<game><name value="x"/></game>"#).unwrap();
        assert_eq!(extract(doc.root_element(), "link", LookupStrategy::FindAll), None);
    }

    #[test]
    fn test_auto_attribute_wins_over_child() {
        let xml = r#"<game type="boardgame"><type>other</type></game>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(
            text(extract(doc.root_element(), "type", LookupStrategy::Auto)),
            Some("boardgame")
        );
    }

    #[test]
    fn test_auto_child_value_then_text() {
        let xml = r#"<game><minplayers value="1"/><description> Text </description></game>"#;
        let doc = Document::parse(xml).unwrap();
        let game = doc.root_element();

        assert_eq!(text(extract(game, "minplayers", LookupStrategy::Auto)), Some("1"));
        assert_eq!(text(extract(game, "description", LookupStrategy::Auto)), Some("Text"));
    }

    #[test]
    fn test_auto_returns_raw_element_when_empty() {
        let xml = r#"<game><statistics page="1"><ratings/></statistics></game>"#;
        let doc = Document::parse(xml).unwrap();

        match extract(doc.root_element(), "statistics", LookupStrategy::Auto) {
            Some(Extracted::Element(node)) => {
                assert_eq!(node.tag_name().name(), "statistics");
                assert_eq!(node.attribute("page"), Some("1"));
            }
            other => panic!("expected element, got {other:?}"),
        }
    }

    #[test]
    fn test_auto_absent() {
        let doc = Document::parse(r#"<game id="1"/>"#).unwrap();
        assert_eq!(extract(doc.root_element(), "minage", LookupStrategy::Auto), None);
    }

    #[test]
    fn test_unicode_preserved() {
        let xml = r#"<game><name value="Café International"/><description>üñíçødé</description></game>"#;
        let doc = Document::parse(xml).unwrap();
        let game = doc.root_element();

        assert_eq!(
            text(extract(game, "name", LookupStrategy::Find)),
            Some("Café International")
        );
        assert_eq!(text(extract(game, "description", LookupStrategy::Text)), Some("üñíçødé"));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let xml = r#"<game id="7" type="boardgame"><link id="1"/><link id="2"/></game>"#;
        let doc = Document::parse(xml).unwrap();
        let game = doc.root_element();

        for strategy in [
            LookupStrategy::Attribute,
            LookupStrategy::Find,
            LookupStrategy::FindAll,
            LookupStrategy::Auto,
        ] {
            assert_eq!(extract(game, "link", strategy), extract(game, "link", strategy));
            assert_eq!(extract(game, "id", strategy), extract(game, "id", strategy));
        }
    }
}
