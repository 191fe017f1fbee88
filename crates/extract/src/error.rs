use thiserror::Error;

/// Why a single raw frame (or one of its arguments) was left out of the graph.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("frame is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("argument `{role}` has unknown argument-type `{kind}`")]
    UnknownArgumentKind { role: String, kind: String },

    #[error("argument `{role}` carries neither `arg` nor `args`")]
    MissingReference { role: String },

    #[error("malformed frame: {0}")]
    Json(#[from] serde_json::Error),
}
