//! Domain records bound from BGG XML API responses.
//!
//! Each record type implements [`XmlRecord`](crate::binding::XmlRecord) with a
//! static schema. Fields are private; read them through the accessors.

mod collection;
mod game;
mod link;
mod name;
mod poll;
mod search;
mod statistics;

pub use collection::{Collection, CollectionItem, CollectionStats, CollectionStatus};
pub use game::{Game, GameType};
pub use link::{Link, LinkType};
pub use name::{Name, PRIMARY_NAME_TYPE};
pub use poll::{Poll, PollResult, PollResults, SUGGESTED_PLAYERS_POLL};
pub use search::{SearchResponse, SearchResult};
pub use statistics::{Rank, Ratings, Statistics, OVERALL_RANK_NAME};

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::binding::{RecordSchema, XmlRecord};

    fn schemas() -> Vec<&'static RecordSchema> {
        vec![
            Name::schema(),
            Link::schema(),
            Rank::schema(),
            Ratings::schema(),
            Statistics::schema(),
            PollResult::schema(),
            PollResults::schema(),
            Poll::schema(),
            Game::schema(),
            SearchResult::schema(),
            SearchResponse::schema(),
            CollectionStatus::schema(),
            CollectionStats::schema(),
            CollectionItem::schema(),
            Collection::schema(),
        ]
    }

    #[test]
    fn test_every_schema_builds_with_unique_names() {
        for schema in schemas() {
            let mut names = HashSet::new();
            for field in schema.fields() {
                assert!(
                    names.insert(field.name()),
                    "duplicate field '{}' in {}",
                    field.name(),
                    schema.record_name()
                );
            }
            assert!(!schema.fields().is_empty(), "{} has no fields", schema.record_name());
        }
    }
}
