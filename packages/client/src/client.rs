//! High-level BGG client tying settings, cache and HTTP together.

use roxmltree::{Document, Node};
use tracing::{info, warn};
use url::Url;

use crate::binding::{RecordList, XmlRecord};
use crate::cache::FileCache;
use crate::config::{validate_query, validate_username, Settings, THING_BATCH_SIZE};
use crate::error::{BggError, Result};
use crate::http::HttpClient;
use crate::models::{Collection, Game, SearchResponse};
use crate::xml::{find_child, find_children, get_tag_name, get_text, has_tag};

/// Client for the BoardGameGeek XML API2.
#[derive(Debug)]
pub struct BggClient {
    settings: Settings,
    http: HttpClient,
    cache: FileCache,
}

impl BggClient {
    /// Create a client. Creates the cache directory when caching is enabled.
    pub fn new(settings: Settings) -> Result<Self> {
        let http = HttpClient::new(&settings)?;
        let cache = FileCache::new(&settings.cache_dir, settings.cache_enabled)?;
        Ok(Self {
            settings,
            http,
            cache,
        })
    }

    /// Create a client from `BGG_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(Settings::from_env()?)
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Fetch games by id, in batches the API accepts.
    ///
    /// Ids BGG does not know are silently absent from the result.
    pub fn get_things(&self, ids: &[u32], include_stats: bool) -> Result<RecordList<Game>> {
        let mut games = RecordList::new();
        for batch in ids.chunks(THING_BATCH_SIZE) {
            let url = self.settings.thing_url(batch, include_stats);
            let body = self.fetch(&url)?;
            games.extend(parse_things(&body)?);
        }

        info!(requested = ids.len(), found = games.len(), "Fetched games");
        Ok(games)
    }

    /// Fetch a single game with statistics.
    pub fn get_thing(&self, id: u32) -> Result<Game> {
        self.get_things(&[id], true)?
            .into_iter()
            .next()
            .ok_or_else(|| BggError::MissingElement {
                element: "item".to_string(),
                context: format!("thing {id}"),
            })
    }

    /// Search board games by name.
    pub fn search(&self, query: &str, exact: bool) -> Result<SearchResponse> {
        let query = validate_query(query)?;
        let url = self.settings.search_url(query, exact);
        let response = parse_search(&self.fetch(&url)?)?;

        info!(query, total = response.total(), "Search complete");
        Ok(response)
    }

    /// Fetch a user's board game collection.
    pub fn get_collection(&self, username: &str) -> Result<Collection> {
        let username = validate_username(username)?;
        let url = self.settings.collection_url(username);
        let collection = parse_collection(&self.fetch(&url)?)?.with_username(username);

        info!(username, items = collection.items().len(), "Fetched collection");
        Ok(collection)
    }

    /// Remove all cached responses. Returns the number removed.
    pub fn clear_cache(&self) -> Result<usize> {
        self.cache.clear()
    }

    /// GET `url`, serving from and filling the response cache.
    fn fetch(&self, url: &Url) -> Result<String> {
        if let Some(body) = self.cache.get::<String>(url.as_str()) {
            return Ok(body);
        }

        let body = self.http.get_text(url.as_str())?;
        if let Err(e) = self.cache.set(url.as_str(), &body, self.settings.cache_ttl) {
            warn!(url = %url, error = %e, "Failed to cache response");
        }
        Ok(body)
    }
}

/// Root `<items>` element of a response, or the API's error message.
fn items_root<'a, 'input>(doc: &'a Document<'input>, context: &str) -> Result<Node<'a, 'input>> {
    let root = doc.root_element();
    match get_tag_name(root) {
        "items" => Ok(root),
        "error" | "errors" => Err(BggError::ApiMessage(error_message(root))),
        _ => Err(BggError::MissingElement {
            element: "items".to_string(),
            context: context.to_string(),
        }),
    }
}

/// Message of `<error><message>..</message></error>`, possibly wrapped in `<errors>`.
fn error_message(root: Node<'_, '_>) -> String {
    let error = if has_tag(root, "errors") {
        find_child(root, "error").unwrap_or(root)
    } else {
        root
    };
    find_child(error, "message")
        .map(get_text)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| "unknown error".to_string())
}

/// Parse a `thing` response into games, in document order.
pub fn parse_things(xml: &str) -> Result<RecordList<Game>> {
    let doc = Document::parse(xml)?;
    let root = items_root(&doc, "thing response")?;
    Game::from_xml_all(find_children(root, "item"))
}

/// Parse a `search` response.
pub fn parse_search(xml: &str) -> Result<SearchResponse> {
    let doc = Document::parse(xml)?;
    SearchResponse::from_xml(items_root(&doc, "search response")?)
}

/// Parse a `collection` response. The username is not part of the response.
pub fn parse_collection(xml: &str) -> Result<Collection> {
    let doc = Document::parse(xml)?;
    Collection::from_xml(items_root(&doc, "collection response")?)
}
