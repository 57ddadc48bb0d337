//! Decoder configuration

use crate::error::DecoderError;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix for overrides, e.g. `TAGDUMP_TICK_SECONDS`
pub const ENV_PREFIX: &str = "TAGDUMP";

/// A human-readable name for a tag id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagName {
    pub name: String,
    pub id: u16,
}

/// Tags marking the four events of one two-node synchronization round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncTags {
    /// Node A sends the request
    pub request_sent: u8,
    /// Node B receives the request
    pub request_received: u8,
    /// Node B sends the reply
    pub reply_sent: u8,
    /// Node A receives the reply
    pub reply_received: u8,
}

impl Default for SyncTags {
    fn default() -> Self {
        Self {
            request_sent: 0x02,
            request_received: 0x03,
            reply_sent: 0x04,
            reply_received: 0x05,
        }
    }
}

/// Decoder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Duration of one tick in seconds (default: 10 ms)
    pub tick_seconds: f64,
    /// Maximum log level of the command-line tool
    pub log_level: String,
    /// Named tags; `NAME_BEGIN` / `NAME_END` pairs are reported as spans
    pub tags: Vec<TagName>,
    /// Clock synchronization tags
    pub sync: SyncTags,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            tick_seconds: 1e-2,
            log_level: "info".to_string(),
            tags: Vec::new(),
            sync: SyncTags::default(),
        }
    }
}

impl DecoderConfig {
    /// Load from an optional TOML file, then apply `TAGDUMP_*` overrides
    pub fn load(path: Option<&Path>) -> Result<Self, DecoderError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Configured name of `id`, if any
    pub fn name_of(&self, id: u16) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.id == id)
            .map(|tag| tag.name.as_str())
    }

    /// Render the configured tags as C preprocessor defines
    pub fn defines(&self) -> String {
        self.tags
            .iter()
            .map(|tag| format!("#define {:30} {:#06x}\n", tag.name, tag.id))
            .collect()
    }
}
