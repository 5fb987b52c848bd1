//! The resolved SDK installation directory.

use std::fmt;
use std::path::{Path, PathBuf};

use super::error::PathError;
use super::platform::Platform;
use crate::sdk::layout::{
    RELEASE_TAGS_FILE, TOT_FILE, VERSION_MARKER_FILE, env_script_name, main_script_name,
};
use crate::sdk::Variant;

/// Absolute directory that holds (or will hold) the SDK checkout.
///
/// Never empty. Not persisted by the resolver; callers decide whether to
/// write it back to configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstallPath(PathBuf);

impl InstallPath {
    /// Wrap an existing absolute path.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, PathError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(PathError::EmptyPath);
        }
        Ok(Self(path))
    }

    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    /// Length in characters, as the Windows path budget counts it.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.0.to_string_lossy().chars().count()
    }

    #[must_use]
    pub fn main_script(&self, platform: Platform) -> PathBuf {
        self.0.join(main_script_name(platform))
    }

    #[must_use]
    pub fn env_script(&self, platform: Platform) -> PathBuf {
        self.0.join(env_script_name(platform))
    }

    #[must_use]
    pub fn release_tags_file(&self) -> PathBuf {
        self.0.join(RELEASE_TAGS_FILE)
    }

    #[must_use]
    pub fn tot_file(&self) -> PathBuf {
        self.0.join(TOT_FILE)
    }

    #[must_use]
    pub fn version_marker(&self, variant: Variant) -> PathBuf {
        self.0.join(variant.dir_name()).join(VERSION_MARKER_FILE)
    }
}

impl AsRef<Path> for InstallPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for InstallPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
