use crate::discovery::{DocumentParts, PartType};
use crate::error::IngestError;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tokio::fs;

/// The three parsed frame documents of one paper.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub doc_id: String,
    pub entities: Value,
    pub events: Value,
    pub sentences: Value,
}

pub struct FrameReader;

impl FrameReader {
    pub async fn read_frame_file(path: &Path) -> Result<Value> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        if extension != "json" {
            return Err(IngestError::UnsupportedFormat(path.to_path_buf()).into());
        }

        let content = fs::read_to_string(path)
            .await
            .context(format!("Failed to read file: {:?}", path))?;
        let value: Value = serde_json::from_str(&content)
            .context(format!("Failed to parse frame file: {:?}", path))?;

        if !value.get("frames").is_some_and(Value::is_array) {
            return Err(IngestError::NoFrames(path.to_path_buf()).into());
        }
        Ok(value)
    }

    pub async fn load_document(parts: &DocumentParts) -> Result<RawDocument> {
        let entities = Self::read_frame_file(parts.path(PartType::Entities)?).await?;
        let events = Self::read_frame_file(parts.path(PartType::Events)?).await?;
        let sentences = Self::read_frame_file(parts.path(PartType::Sentences)?).await?;

        Ok(RawDocument {
            doc_id: parts.doc_id.clone(),
            entities,
            events,
            sentences,
        })
    }
}
