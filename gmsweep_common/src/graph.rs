//! Host graph dataset references.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

lazy_static! {
    static ref GRAPH_KEY_RE: Regex = Regex::new(r"^[a-z0-9_-]+$").unwrap();
}

/// A named host graph: a short key plus the path of an on-disk `.g` file.
///
/// The key is spliced into log file names and banners, so it is restricted to
/// lowercase alphanumerics, `_` and `-`. The path is taken as given: the file
/// is consumed only by the external engines, and a missing or malformed file
/// surfaces as a failed run, not as a construction error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphFile {
    key: String,
    path: PathBuf,
}

/// Errors produced when constructing a [`GraphFile`].
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum GraphError {
    /// The key is not usable in a log file name.
    #[error("invalid graph key {0:?}: expected lowercase [a-z0-9_-]+")]
    InvalidKey(String),
}

impl GraphFile {
    pub fn new(key: &str, path: impl Into<PathBuf>) -> Result<Self, GraphError> {
        if !GRAPH_KEY_RE.is_match(key) {
            return Err(GraphError::InvalidKey(key.to_string()));
        }
        Ok(GraphFile {
            key: key.to_string(),
            path: path.into(),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_keys() {
        for key in ["wv", "lj", "wiki-vote", "graph_2"] {
            assert!(GraphFile::new(key, "data/g.g").is_ok(), "key {key:?}");
        }
    }

    #[test]
    fn rejects_unusable_keys() {
        for key in ["", "WV", "a b", "a/b", "p..1"] {
            assert!(
                matches!(GraphFile::new(key, "data/g.g"), Err(GraphError::InvalidKey(_))),
                "key {key:?}"
            );
        }
    }

    #[test]
    fn path_is_not_validated() {
        let g = GraphFile::new("wv", "/nonexistent/wiki-vote.g").unwrap();
        assert_eq!(g.path(), Path::new("/nonexistent/wiki-vote.g"));
    }
}
