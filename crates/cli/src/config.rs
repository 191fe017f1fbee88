use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub concurrency: ConcurrencyConfig,
    pub discovery: DiscoveryConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcurrencyConfig {
    pub max_concurrent_documents: usize,
    /// Per-document budget; 0 disables the timeout.
    pub document_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub recursive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub overwrite: bool,
    pub pretty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data/frames"),
            output_dir: PathBuf::from("data/relations"),
            concurrency: ConcurrencyConfig::default(),
            discovery: DiscoveryConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self {
            max_concurrent_documents: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            document_timeout_secs: 300,
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self { recursive: true }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            overwrite: true,
            pretty: true,
        }
    }
}

impl AppConfig {
    /// Read a JSON config file; missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config: {:?}", path))?;
        let config: AppConfig = serde_json::from_str(&content)
            .context(format!("Failed to parse config: {:?}", path))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.concurrency.max_concurrent_documents == 0 {
            bail!("concurrency.max_concurrent_documents must be at least 1");
        }
        if !self.input_dir.is_dir() {
            bail!("Input directory does not exist: {:?}", self.input_dir);
        }
        if self.input_dir == self.output_dir {
            bail!("Input and output directories must differ");
        }
        Ok(())
    }
}
