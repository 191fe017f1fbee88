use crate::discovery::PartType;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("document `{doc_id}` has no {part} file")]
    MissingPart { doc_id: String, part: PartType },

    #[error("unsupported file format: {0:?}")]
    UnsupportedFormat(PathBuf),

    #[error("{0:?} is not a frame document (no `frames` array)")]
    NoFrames(PathBuf),
}
