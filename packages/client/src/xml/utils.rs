//! XML utility functions for navigating and extracting data from DOM trees.
//!
//! Only direct children are ever searched; BGG responses are shallow and the
//! binding layer depends on lookups never reaching into descendants.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use bgg_client::xml::get_tag_name;
///
/// let xml = r#"<items><item id="1"/></items>"#;
/// let doc = Document::parse(xml).unwrap();
/// let item = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(item), "item");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find the first child element with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use bgg_client::xml::find_child;
///
/// let xml = r#"<item><name/><link/></item>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
///
/// assert!(find_child(root, "name").is_some());
/// assert!(find_child(root, "missing").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find all child elements with the given tag name, in document order.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use bgg_client::xml::find_children;
///
/// let xml = r#"<item><link id="1"/><name/><link id="2"/></item>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
///
/// let links: Vec<_> = find_children(root, "link").collect();
/// assert_eq!(links.len(), 2);
/// ```
pub fn find_children<'a, 'input, 't>(
    node: Node<'a, 'input>,
    tag: &'t str,
) -> impl Iterator<Item = Node<'a, 'input>> + 't
where
    'a: 't,
    'input: 't,
{
    node.children()
        .filter(move |child| child.is_element() && get_tag_name(*child) == tag)
}

/// Get the trimmed text content of a node, or `None` when it is empty or
/// whitespace-only.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use bgg_client::xml::non_empty_text;
///
/// let doc = Document::parse("<a>  Wingspan </a>").unwrap();
/// assert_eq!(non_empty_text(doc.root_element()), Some("Wingspan"));
///
/// let doc = Document::parse("<a>   </a>").unwrap();
/// assert_eq!(non_empty_text(doc.root_element()), None);
/// ```
pub fn non_empty_text<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.text().map(str::trim).filter(|s| !s.is_empty())
}

/// Get the text content of a node, trimmed, or empty string if no text.
pub fn get_text(node: Node<'_, '_>) -> String {
    non_empty_text(node).unwrap_or_default().to_string()
}

/// Check if a node is an element with a specific tag name.
pub fn has_tag(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node) == tag
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_get_tag_name() {
        let xml = r#"<items><item/></items>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(get_tag_name(doc.root_element()), "items");
    }

    #[test]
    fn test_find_child_only_direct_children() {
        let xml = r#"<item><statistics><ratings><average value="8.1"/></ratings></statistics></item>"#;
        let doc = Document::parse(xml).unwrap();
        let root = doc.root_element();

        assert!(find_child(root, "statistics").is_some());
        assert!(find_child(root, "ratings").is_none());
        assert!(find_child(root, "average").is_none());
    }

    #[test]
    fn test_find_children_document_order() {
        let xml = r#"<item><link id="1"/><name/><link id="2"/><link id="3"/></item>"#;
        let doc = Document::parse(xml).unwrap();
        let ids: Vec<_> = find_children(doc.root_element(), "link")
            .filter_map(|n| n.attribute("id"))
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_get_text() {
        let xml = r#"<root>  trimmed text  </root>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(get_text(doc.root_element()), "trimmed text");
    }

    #[test]
    fn test_non_empty_text_self_closing() {
        let doc = Document::parse("<root/>").unwrap();
        assert_eq!(non_empty_text(doc.root_element()), None);
    }

    #[test]
    fn test_has_tag() {
        let doc = Document::parse("<item/>").unwrap();
        assert!(has_tag(doc.root_element(), "item"));
        assert!(!has_tag(doc.root_element(), "items"));
    }
}
