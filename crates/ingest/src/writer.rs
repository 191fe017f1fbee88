use anyhow::{Context, Result};
use extract::OutputDocument;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Where the output for `doc_id` lands inside `dir`.
pub fn output_path(dir: &Path, doc_id: &str) -> PathBuf {
    dir.join(format!("{}.json", doc_id))
}

/// Write one output document as `<docId>.json`, creating `dir` if needed.
pub async fn write_output(dir: &Path, document: &OutputDocument, pretty: bool) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .await
        .context(format!("Failed to create output directory: {:?}", dir))?;

    let json = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };

    let path = output_path(dir, &document.doc_id);
    fs::write(&path, json)
        .await
        .context(format!("Failed to write output: {:?}", path))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_output_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("out");
        let document = OutputDocument {
            doc_id: "PMC7".to_string(),
            events: Vec::new(),
        };

        let path = write_output(&dir, &document, true).await.unwrap();
        assert_eq!(path, output_path(&dir, "PMC7"));

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n  \"docId\": \"PMC7\""));
        let parsed: OutputDocument = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, document);
    }
}
