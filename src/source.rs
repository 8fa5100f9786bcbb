//! Image discovery: metadata-library fanart queries and folder listings.
//!
//! Every failure here is soft. A source that cannot be queried produces an
//! empty [`ImageList`] and the session simply has nothing to show.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::{Value, json};
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use crate::config::{Configuration, SourceKind};

/// Lowercased three-character suffixes kept by the folder source.
const FOLDER_EXTENSIONS: &[&str] = &["jpg", "png"];

/// Opaque image identifier (URL or filesystem path).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageLocator(String);

impl ImageLocator {
    #[must_use]
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ImageLocator {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImageLocator {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ImageLocator {
    fn from(value: String) -> Self {
        Self(value)
    }
}

pub type ImageList = Vec<ImageLocator>;

/// Request/response access to the media library's JSON-RPC service.
pub trait JsonRpc: Send + Sync {
    fn execute_json_rpc(&self, request: &str) -> Result<String>;
}

/// Directory listing service: returns `(subdirectories, files)` as bare names.
pub trait DirectoryListing: Send + Sync {
    fn list_directory(&self, path: &Path) -> Result<(Vec<String>, Vec<String>)>;
}

/// Local filesystem listing, one level deep, sorted by name.
///
/// Only an unreadable root fails the call. Entries that can't be read (e.g.
/// dangling symlinks) are logged and skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsListing;

impl DirectoryListing for FsListing {
    fn list_directory(&self, path: &Path) -> Result<(Vec<String>, Vec<String>)> {
        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for entry in WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(err).with_context(|| format!("listing {}", path.display()));
                }
                Err(err) => {
                    warn!(path = ?err.path(), "skipping unreadable entry: {err}");
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type().is_dir() {
                dirs.push(name);
            } else if entry.file_type().is_file() {
                files.push(name);
            }
        }
        Ok((dirs, files))
    }
}

/// Answers JSON-RPC requests from canned responses keyed by method name.
/// Unknown methods answer an empty `result`.
#[derive(Debug, Clone, Default)]
pub struct FileLibrary {
    responses: HashMap<String, Value>,
}

impl FileLibrary {
    #[must_use]
    pub fn new(responses: HashMap<String, Value>) -> Self {
        Self { responses }
    }

    /// Load a JSON object mapping method name to response document.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading library file {}", path.display()))?;
        let responses = serde_json::from_str(&raw)
            .with_context(|| format!("parsing library file {}", path.display()))?;
        Ok(Self { responses })
    }
}

impl JsonRpc for FileLibrary {
    fn execute_json_rpc(&self, request: &str) -> Result<String> {
        let request: Value = serde_json::from_str(request).context("malformed request")?;
        let method = request
            .get("method")
            .and_then(Value::as_str)
            .context("request has no method")?;
        let response = self
            .responses
            .get(method)
            .cloned()
            .unwrap_or_else(|| json!({ "jsonrpc": "2.0", "id": 0, "result": {} }));
        Ok(response.to_string())
    }
}

/// A configured image source bound to its collaborators.
#[derive(Clone)]
pub struct ImageSource {
    kind: SourceKind,
    image_path: Option<PathBuf>,
    library: Arc<dyn JsonRpc>,
    listing: Arc<dyn DirectoryListing>,
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageSource")
            .field("kind", &self.kind)
            .field("image_path", &self.image_path)
            .finish_non_exhaustive()
    }
}

impl ImageSource {
    pub fn new(
        kind: SourceKind,
        image_path: Option<PathBuf>,
        library: Arc<dyn JsonRpc>,
        listing: Arc<dyn DirectoryListing>,
    ) -> Self {
        Self {
            kind,
            image_path,
            library,
            listing,
        }
    }

    pub fn from_config(
        cfg: &Configuration,
        library: Arc<dyn JsonRpc>,
        listing: Arc<dyn DirectoryListing>,
    ) -> Self {
        Self::new(cfg.source, cfg.image_path.clone(), library, listing)
    }

    #[must_use]
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Produce the image list for this source. Never fails: problems are
    /// logged and yield an empty (or partial) list.
    #[instrument(skip(self), fields(source = %self.kind))]
    pub fn fetch(&self) -> ImageList {
        let images = match self.kind {
            SourceKind::MovieFanart => self.library_fanart("VideoLibrary.GetMovies", "movies"),
            SourceKind::ArtistFanart => self.library_fanart("AudioLibrary.GetArtists", "artists"),
            SourceKind::AlbumFanart => self.library_fanart("AudioLibrary.GetAlbums", "albums"),
            SourceKind::ImageFolder => match &self.image_path {
                Some(path) => self.folder_images(path),
                None => {
                    warn!("image folder source has no path configured");
                    Vec::new()
                }
            },
        };
        info!(count = images.len(), "image source fetched");
        images
    }

    fn library_fanart(&self, method: &str, entities: &str) -> ImageList {
        let request = fanart_request(method);
        let response = match self.library.execute_json_rpc(&request) {
            Ok(response) => response,
            Err(err) => {
                warn!(method, "library query failed: {err:#}");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Value>(&response) {
            Ok(doc) => extract_fanart(&doc, entities),
            Err(err) => {
                warn!(method, "library response is not JSON: {err}");
                Vec::new()
            }
        }
    }

    fn folder_images(&self, path: &Path) -> ImageList {
        let files = match self.listing.list_directory(path) {
            Ok((_dirs, files)) => files,
            Err(err) => {
                warn!(path = %path.display(), "folder listing failed: {err:#}");
                return Vec::new();
            }
        };
        files
            .into_iter()
            .filter(|name| {
                let keep = has_image_suffix(name);
                if !keep {
                    debug!(file = %name, "skipping non-image file");
                }
                keep
            })
            .map(|name| ImageLocator::new(path.join(name).to_string_lossy().into_owned()))
            .collect()
    }
}

fn fanart_request(method: &str) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": 0,
        "method": method,
        "params": { "properties": ["fanart"] },
    })
    .to_string()
}

/// Pull `result.<entities>[].fanart`, dropping entries without a non-empty value.
fn extract_fanart(doc: &Value, entities: &str) -> ImageList {
    doc.get("result")
        .and_then(|result| result.get(entities))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("fanart").and_then(Value::as_str))
                .filter(|fanart| !fanart.is_empty())
                .map(ImageLocator::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Case-insensitive match of the last three characters against the allow-list.
fn has_image_suffix(name: &str) -> bool {
    let lower = name.to_lowercase();
    let suffix: String = {
        let mut tail: Vec<char> = lower.chars().rev().take(3).collect();
        tail.reverse();
        tail.into_iter().collect()
    };
    FOLDER_EXTENSIONS.contains(&suffix.as_str())
}
