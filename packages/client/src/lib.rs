//! BGG Client - Typed access to the BoardGameGeek XML API2.
//!
//! This crate fetches board games, search results and user collections from
//! BoardGameGeek and binds the XML responses into typed records through a
//! small declarative binding layer.
//!
//! # Example
//!
//! ```
//! use bgg_client::client::parse_things;
//!
//! let games = parse_things(
//!     r#"<items><item type="boardgame" id="266192">
//!         <name type="primary" sortindex="1" value="Wingspan"/>
//!         <minplayers value="1"/>
//!         <maxplayers value="5"/>
//!     </item></items>"#,
//! )
//! .unwrap();
//!
//! assert_eq!(games[0].primary_name(), "Wingspan");
//! assert_eq!(games[0].max_players(), Some(5));
//! ```
//!
//! # Architecture
//!
//! The client is organized into several modules:
//!
//! - [`config`]: Settings, endpoint URLs and input validation
//! - [`error`]: Error types and Result alias
//! - [`xml`]: XML utilities
//! - [`binding`]: Declarative XML-to-record binding
//! - [`models`]: Domain records (Game, SearchResponse, Collection, etc.)
//! - [`http`]: Rate-limited HTTP client with retries
//! - [`cache`]: On-disk response cache
//! - [`client`]: High-level API client
//! - [`cli`]: Command-line interface

pub mod binding;
pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod xml;

// Re-export commonly used items
pub use binding::{FieldDescriptor, LookupStrategy, RecordList, RecordSchema, XmlRecord};
pub use client::BggClient;
pub use config::Settings;
pub use error::{BggError, Result};
pub use models::{Collection, CollectionItem, Game, Link, LinkType, Name, SearchResponse, SearchResult};
