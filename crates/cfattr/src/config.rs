// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Encoder configuration

use crate::version::{CfVersion, VersionProfile};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Explicit version given in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSetting {
    pub major: i16,
    pub minor: i16,
    /// Refuse later assignments from the source being assembled.
    #[serde(default)]
    pub frozen: bool,
}

impl VersionSetting {
    pub fn to_version(self) -> CfVersion {
        CfVersion::with_values(self.major, self.minor, self.frozen)
    }
}

/// Encoder configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Default version pair used when nothing was set explicitly
    pub version_profile: VersionProfile,

    /// Explicit version (overrides the profile default)
    pub version: Option<VersionSetting>,

    /// Cross-check the whole table against its declared length.
    ///
    /// Attribute payloads are always checked against their `attribute_length`;
    /// this adds the check on the outer `attributes_count` + attributes.
    pub verify_table_length: bool,

    /// Freeze the version once a table has been emitted
    pub freeze_on_emit: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            version_profile: VersionProfile::Class,
            version: None,
            verify_table_length: true,
            freeze_on_emit: true,
        }
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EncoderConfig {
    /// Create a new config builder
    pub fn builder() -> EncoderConfigBuilder {
        EncoderConfigBuilder::default()
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Initial version state derived from this configuration.
    pub fn initial_version(&self) -> CfVersion {
        self.version
            .map(VersionSetting::to_version)
            .unwrap_or_default()
    }
}

/// Config builder for fluent API
#[derive(Debug, Default)]
pub struct EncoderConfigBuilder {
    version_profile: Option<VersionProfile>,
    version: Option<VersionSetting>,
    verify_table_length: Option<bool>,
    freeze_on_emit: Option<bool>,
}

impl EncoderConfigBuilder {
    /// Set the default version profile
    pub fn version_profile(mut self, profile: VersionProfile) -> Self {
        self.version_profile = Some(profile);
        self
    }

    /// Set an explicit version
    pub fn version(mut self, major: i16, minor: i16) -> Self {
        self.version = Some(VersionSetting {
            major,
            minor,
            frozen: false,
        });
        self
    }

    /// Set an explicit version that later assignments cannot change
    pub fn frozen_version(mut self, major: i16, minor: i16) -> Self {
        self.version = Some(VersionSetting {
            major,
            minor,
            frozen: true,
        });
        self
    }

    /// Enable or disable the table-level length cross-check
    pub fn verify_table_length(mut self, verify: bool) -> Self {
        self.verify_table_length = Some(verify);
        self
    }

    /// Enable or disable freezing the version on emit
    pub fn freeze_on_emit(mut self, freeze: bool) -> Self {
        self.freeze_on_emit = Some(freeze);
        self
    }

    /// Build the config
    pub fn build(self) -> EncoderConfig {
        let defaults = EncoderConfig::default();
        EncoderConfig {
            version_profile: self.version_profile.unwrap_or(defaults.version_profile),
            version: self.version.or(defaults.version),
            verify_table_length: self
                .verify_table_length
                .unwrap_or(defaults.verify_table_length),
            freeze_on_emit: self.freeze_on_emit.unwrap_or(defaults.freeze_on_emit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EncoderConfig::default();
        assert_eq!(config.version_profile, VersionProfile::Class);
        assert!(config.version.is_none());
        assert!(config.verify_table_length);
        assert!(config.freeze_on_emit);
        assert!(!config.initial_version().is_set());
    }

    #[test]
    fn test_config_builder() {
        let config = EncoderConfig::builder()
            .version_profile(VersionProfile::Module)
            .frozen_version(61, 0)
            .verify_table_length(false)
            .build();

        assert_eq!(config.version_profile, VersionProfile::Module);
        assert!(!config.verify_table_length);
        assert!(config.freeze_on_emit);
        let version = config.initial_version();
        assert!(version.is_frozen());
        assert_eq!(version.to_string(), "61:0");
    }

    #[test]
    fn test_config_from_partial_json() {
        let config = EncoderConfig::from_json_str(
            r#"{ "version_profile": "module", "version": { "major": 55, "minor": 0 } }"#,
        )
        .expect("parse");
        assert_eq!(config.version_profile, VersionProfile::Module);
        assert!(config.verify_table_length);
        let version = config.initial_version();
        assert!(!version.is_frozen());
        assert_eq!(version.major(), 55);
    }

    #[test]
    fn test_config_roundtrip_json() {
        let config = EncoderConfig::builder().version(52, 0).build();
        let json = serde_json::to_string(&config).expect("serialize");
        let decoded = EncoderConfig::from_json_str(&json).expect("deserialize");
        assert_eq!(decoded, config);
    }

    #[test]
    fn test_config_rejects_bad_json() {
        let err = EncoderConfig::from_json_str(r#"{ "verify_table_length": 3 }"#)
            .expect_err("bad type");
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
