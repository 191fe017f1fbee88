use crate::error::IngestError;
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// The three files that make up one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PartType {
    Entities,
    Events,
    Sentences,
}

impl PartType {
    pub const ALL: [PartType; 3] = [PartType::Entities, PartType::Events, PartType::Sentences];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartType::Entities => "entities",
            PartType::Events => "events",
            PartType::Sentences => "sentences",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        PartType::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete entities/events/sentences triple for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentParts {
    pub doc_id: String,
    pub parts: BTreeMap<PartType, PathBuf>,
}

impl DocumentParts {
    pub fn path(&self, part: PartType) -> Result<&Path, IngestError> {
        self.parts
            .get(&part)
            .map(PathBuf::as_path)
            .ok_or_else(|| IngestError::MissingPart {
                doc_id: self.doc_id.clone(),
                part,
            })
    }
}

fn file_name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // <docId>[.<tag>].<part>.json, e.g. PMC1234.uaz.events.json
        Regex::new(r"^(.+?)(?:\.[A-Za-z0-9_-]+)?\.(entities|events|sentences)\.json$")
            .expect("file name pattern must compile")
    })
}

/// Map a frame file name to its document id and part.
pub fn parse_file_name(name: &str) -> Option<(String, PartType)> {
    let caps = file_name_pattern().captures(name)?;
    Some((caps[1].to_string(), PartType::parse(&caps[2])?))
}

/// Result of walking an input directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Complete triples, sorted by document id, one per id.
    pub documents: Vec<DocumentParts>,
    /// Complete triples left out because another directory already supplied their id.
    pub duplicates: usize,
}

/// Walk `root` and group frame files into complete document triples.
///
/// Incomplete groups are logged and skipped. Document ids must be unique
/// across the whole tree since each one names an output file; later
/// directories (in path order) lose to earlier ones. Unreadable entries below
/// `root` are logged and skipped; an unreadable `root` is an error.
pub fn discover_documents(root: &Path, recursive: bool) -> Result<Discovery> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut groups: BTreeMap<(PathBuf, String), BTreeMap<PartType, PathBuf>> = BTreeMap::new();

    for entry in WalkDir::new(root).max_depth(max_depth).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(e).with_context(|| format!("Failed to walk directory: {:?}", root));
            }
            Err(e) => {
                warn!(path = ?e.path(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some((doc_id, part)) = entry.file_name().to_str().and_then(parse_file_name) else {
            continue;
        };

        let dir = entry.path().parent().map(Path::to_path_buf).unwrap_or_default();
        let parts = groups.entry((dir, doc_id.clone())).or_default();
        if let Some(existing) = parts.get(&part) {
            warn!(doc_id = %doc_id, %part, kept = ?existing, ignored = ?entry.path(), "Duplicate frame file");
            continue;
        }
        parts.insert(part, entry.path().to_path_buf());
    }

    let mut discovery = Discovery::default();
    let mut claimed: BTreeMap<String, PathBuf> = BTreeMap::new();
    for ((dir, doc_id), parts) in groups {
        let missing: Vec<&str> = PartType::ALL
            .iter()
            .filter(|p| !parts.contains_key(*p))
            .map(PartType::as_str)
            .collect();
        if !missing.is_empty() {
            warn!(doc_id = %doc_id, ?dir, ?missing, "Incomplete document, skipping");
            continue;
        }
        if let Some(kept) = claimed.get(&doc_id) {
            warn!(doc_id = %doc_id, ?kept, ignored = ?dir, "Duplicate document id, skipping");
            discovery.duplicates += 1;
            continue;
        }
        debug!(doc_id = %doc_id, ?dir, "Discovered document");
        claimed.insert(doc_id.clone(), dir);
        discovery.documents.push(DocumentParts { doc_id, parts });
    }

    discovery.documents.sort_by(|a, b| a.doc_id.cmp(&b.doc_id));
    Ok(discovery)
}
