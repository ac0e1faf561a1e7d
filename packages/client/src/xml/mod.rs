//! XML utilities.

mod utils;

pub use utils::{find_child, find_children, get_tag_name, get_text, has_tag, non_empty_text};
