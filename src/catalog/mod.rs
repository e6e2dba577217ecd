//! Static song/segment registry resolving reference recordings.
//!
//! The catalog is a JSON document mapping song identifiers to a display title
//! and a table of segment identifiers to reference audio paths. Lookup
//! failures are caller-facing validation errors raised before any scoring
//! work starts.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validation failure for a song/segment lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    UnknownSong(String),
    UnknownSegment { song: String, segment: String },
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::UnknownSong(song) => write!(f, "unknown song '{}'", song),
            CatalogError::UnknownSegment { song, segment } => {
                write!(f, "song '{}' has no segment '{}'", song, segment)
            }
        }
    }
}

impl Error for CatalogError {}

/// A single catalogued song: display title plus segment → audio path table.
#[derive(Debug, Clone, Deserialize)]
pub struct Song {
    pub title: String,
    pub segments: BTreeMap<String, PathBuf>,
}

/// The full registry, keyed by song identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    songs: BTreeMap<String, Song>,
    /// Directory segment paths are resolved against; set when loading from disk.
    #[serde(skip)]
    root: PathBuf,
}

/// A resolved segment lookup: song title plus the absolute reference path.
#[derive(Debug, Clone)]
pub struct ResolvedSegment {
    pub title: String,
    pub path: PathBuf,
}

impl Catalog {
    /// Load a catalog from a JSON file. Relative segment paths resolve
    /// against the catalog file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
        let mut catalog = Self::from_json(&raw)
            .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;
        if let Some(parent) = path.parent() {
            catalog.root = parent.to_path_buf();
        }
        Ok(catalog)
    }

    /// Parse a catalog from raw JSON. Paths resolve against the working
    /// directory unless `load` supplies a root.
    pub fn from_json(raw: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(raw).context("Failed to parse catalog JSON")?;
        Ok(catalog)
    }

    pub fn songs(&self) -> impl Iterator<Item = (&str, &Song)> {
        self.songs.iter().map(|(id, song)| (id.as_str(), song))
    }

    /// Resolve a song/segment pair to its reference recording.
    pub fn resolve(
        &self,
        song_id: &str,
        segment_id: &str,
    ) -> std::result::Result<ResolvedSegment, CatalogError> {
        let song = self
            .songs
            .get(song_id)
            .ok_or_else(|| CatalogError::UnknownSong(song_id.to_string()))?;
        let segment = song
            .segments
            .get(segment_id)
            .ok_or_else(|| CatalogError::UnknownSegment {
                song: song_id.to_string(),
                segment: segment_id.to_string(),
            })?;
        let path = if segment.is_absolute() {
            segment.clone()
        } else {
            self.root.join(segment)
        };
        Ok(ResolvedSegment {
            title: song.title.clone(),
            path,
        })
    }
}
