//! Language descriptors: a variant tag, its fallback chain, and the
//! immutable baseline trie loaded from on-disk JSON dictionaries.

use crate::trie::Trie;
use std::path::Path;

/// An error encountered while merging a language's dictionary files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A dictionary file could not be read.
    #[error("failed to read dictionary file {path}: {source}")]
    Io {
        /// The path that failed to read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A dictionary file was not valid JSON, or not a flat string map.
    #[error("failed to parse dictionary file {path}: {source}")]
    Json {
        /// The path that failed to parse.
        path: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// An immutable, per-language rule table plus fallback chain.
///
/// Created once at load time via [`Language::from_files`]; converters hold
/// a read-only reference and never mutate it. The baseline
/// trie has no interior mutability, so sharing a `&Language` across
/// concurrent conversions is always sound.
pub struct Language {
    /// Lowercased language tag, e.g. `"zh-cn"`.
    code: String,
    /// Ordered list of other tags consulted before `code` when localizing
    /// a rule.
    fallbacks: Vec<String>,
    /// The baseline conversion rules for this language.
    rules: Trie,
}

impl Language {
    /// Builds a language descriptor directly from an already-built trie.
    /// Mainly useful for tests and for callers assembling rules some other
    /// way than JSON files on disk.
    pub fn new(code: impl Into<String>, rules: Trie, fallbacks: Vec<String>) -> Self {
        Self {
            code: code.into().to_lowercase(),
            fallbacks,
            rules,
        }
    }

    /// Reads one or more flat `{ key -> replacement }` JSON dictionaries
    /// and merges them, in order, into a single baseline trie. Later files
    /// overwrite keys set by earlier ones.
    ///
    /// `code` is lowercased on construction; variant tags are compared
    /// case-insensitively throughout the crate.
    pub fn from_files<P: AsRef<Path>>(
        code: impl Into<String>,
        paths: &[P],
        fallbacks: Vec<String>,
    ) -> Result<Self, LoadError> {
        let mut merged = std::collections::HashMap::new();
        for path in paths {
            let path = path.as_ref();
            let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let entries: std::collections::HashMap<String, String> =
                serde_json::from_str(&text).map_err(|source| LoadError::Json {
                    path: path.display().to_string(),
                    source,
                })?;
            log::trace!(
                "merged {} entries from {}",
                entries.len(),
                path.display()
            );
            merged.extend(entries);
        }
        Ok(Self::new(code, Trie::from_dict(merged), fallbacks))
    }

    /// The lowercased language tag.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The ordered fallback chain, not including `code` itself.
    pub fn fallbacks(&self) -> &[String] {
        &self.fallbacks
    }

    /// The baseline trie for this language.
    pub(crate) fn rules(&self) -> &Trie {
        &self.rules
    }
}
