// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Class-file format version.
//!
//! A [`CfVersion`] starts undefined, may be assigned explicitly, filled in
//! from a [`VersionProfile`] default, and finally frozen. Every operation is
//! total: assignments to a frozen version are ignored, and defaults never
//! overwrite a version that was already set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Sentinel for a major/minor field that was never assigned.
pub const UNDEFINED_VERSION: i16 = -1;

pub const DEFAULT_MAJOR_VERSION: i16 = 45;
pub const DEFAULT_MINOR_VERSION: i16 = 3;
pub const DEFAULT_MODULE_MAJOR_VERSION: i16 = 53;
pub const DEFAULT_MODULE_MINOR_VERSION: i16 = 0;

/// Which default pair applies when no version was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionProfile {
    /// Ordinary class files (45:3).
    #[default]
    Class,
    /// Module descriptors (53:0).
    Module,
}

impl VersionProfile {
    pub const fn defaults(self) -> (i16, i16) {
        match self {
            VersionProfile::Class => (DEFAULT_MAJOR_VERSION, DEFAULT_MINOR_VERSION),
            VersionProfile::Module => (DEFAULT_MODULE_MAJOR_VERSION, DEFAULT_MODULE_MINOR_VERSION),
        }
    }
}

/// `major:minor` version pair with set/frozen state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CfVersion {
    major: i16,
    minor: i16,
    is_set: bool,
    frozen: bool,
}

impl CfVersion {
    /// Undefined, unfrozen version.
    pub const fn new() -> Self {
        Self {
            major: UNDEFINED_VERSION,
            minor: UNDEFINED_VERSION,
            is_set: false,
            frozen: false,
        }
    }

    /// Explicit version, optionally frozen from the start.
    pub const fn with_values(major: i16, minor: i16, frozen: bool) -> Self {
        Self {
            major,
            minor,
            is_set: true,
            frozen,
        }
    }

    /// Explicit version that ignores every later assignment.
    pub const fn frozen(major: i16, minor: i16) -> Self {
        Self::with_values(major, minor, true)
    }

    pub fn set_major(&mut self, major: i16) {
        if self.frozen {
            debug!(major, current = %self, "version frozen, ignoring major assignment");
            return;
        }
        self.is_set = true;
        self.major = major;
    }

    pub fn set_minor(&mut self, minor: i16) {
        if self.frozen {
            debug!(minor, current = %self, "version frozen, ignoring minor assignment");
            return;
        }
        self.is_set = true;
        self.minor = minor;
    }

    /// Stop accepting assignments.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Assign the profile's default pair unless a value was already set.
    pub fn init_defaults(&mut self, profile: VersionProfile) {
        if self.is_set {
            return;
        }
        let (major, minor) = profile.defaults();
        self.major = major;
        self.minor = minor;
        self.is_set = true;
    }

    pub fn init_class_defaults(&mut self) {
        self.init_defaults(VersionProfile::Class);
    }

    pub fn init_module_defaults(&mut self) {
        self.init_defaults(VersionProfile::Module);
    }

    pub fn major(&self) -> i16 {
        self.major
    }

    pub fn minor(&self) -> i16 {
        self.minor
    }

    pub fn is_set(&self) -> bool {
        self.is_set
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn major_defined(&self) -> bool {
        self.major != UNDEFINED_VERSION
    }

    pub fn minor_defined(&self) -> bool {
        self.minor != UNDEFINED_VERSION
    }

    /// `"major:minor"`, or `"(undef):(undef)"` while unset.
    pub fn as_display_string(&self) -> String {
        self.to_string()
    }
}

impl Default for CfVersion {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CfVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_set {
            write!(f, "{}:{}", self.major, self.minor)
        } else {
            write!(f, "(undef):(undef)")
        }
    }
}

/// Error parsing a `major:minor` string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid class-file version {0:?}, expected \"major:minor\"")]
pub struct ParseVersionError(String);

/// Parses `"major:minor"` or a bare `"major"` (minor 0) into a set, unfrozen version.
impl FromStr for CfVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseVersionError(s.to_string());
        let (major, minor) = match s.split_once(':') {
            Some((major, minor)) => (major, minor),
            None => (s, "0"),
        };
        let major = major.trim().parse::<i16>().map_err(|_| err())?;
        let minor = minor.trim().parse::<i16>().map_err(|_| err())?;
        if major < 0 || minor < 0 {
            return Err(err());
        }
        Ok(Self::with_values(major, minor, false))
    }
}
