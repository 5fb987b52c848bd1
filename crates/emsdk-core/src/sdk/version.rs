//! SDK version tags and the installed-build check.
//!
//! `install` skips work when the requested build is already active. The
//! check compares the hash a tag resolves to against the variant's
//! `.emsdk_version` marker. It is best-effort: any lookup failure means
//! "not installed".

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::paths::InstallPath;

/// Tag installed when the caller does not name one.
pub const DEFAULT_VERSION: &str = "latest";

const FASTCOMP_SUFFIX: &str = "-fastcomp";

/// Build flavour of the SDK, each installed into its own subdirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Current LLVM upstream backend.
    Upstream,
    /// Legacy fastcomp backend.
    Fastcomp,
}

impl Variant {
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Upstream => "upstream",
            Self::Fastcomp => "fastcomp",
        }
    }
}

/// A version selector: a symbolic tag, a literal hash, `latest` or `tot`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SdkVersionTag(String);

impl SdkVersionTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        if self.0.contains("fastcomp") {
            Variant::Fastcomp
        } else {
            Variant::Upstream
        }
    }

    /// The tag with any `-fastcomp` suffix removed; both variants share hashes.
    #[must_use]
    pub fn base_name(&self) -> &str {
        self.0.strip_suffix(FASTCOMP_SUFFIX).unwrap_or(&self.0)
    }

    /// Names the tip-of-tree build.
    #[must_use]
    pub fn is_tot(&self) -> bool {
        self.0.contains("tot")
    }

    /// Names the newest tagged release.
    #[must_use]
    pub fn is_latest(&self) -> bool {
        self.0.contains("latest")
    }
}

impl Default for SdkVersionTag {
    fn default() -> Self {
        Self::new(DEFAULT_VERSION)
    }
}

impl fmt::Display for SdkVersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SdkVersionTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Failures while working out which build is installed.
#[derive(Debug, Error)]
pub enum VersionLookupError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed release-tag manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Release-tag manifest names '{0}' as latest but has no hash for it")]
    MissingLatest(String),
}

/// Release-tag manifest shipped in the SDK checkout.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReleaseTags {
    pub latest: String,
    #[serde(default)]
    pub releases: HashMap<String, String>,
}

impl ReleaseTags {
    pub fn load(path: &Path) -> Result<Self, VersionLookupError> {
        let raw = read(path)?;
        serde_json::from_str(&raw).map_err(|source| VersionLookupError::Manifest {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Hash for `tag`. Unknown tags are assumed to be literal hashes.
    pub fn hash_for(&self, tag: &SdkVersionTag) -> Result<String, VersionLookupError> {
        if tag.is_latest() {
            return self
                .releases
                .get(&self.latest)
                .cloned()
                .ok_or_else(|| VersionLookupError::MissingLatest(self.latest.clone()));
        }

        let base = tag.base_name();
        Ok(self
            .releases
            .get(base)
            .cloned()
            .unwrap_or_else(|| base.to_string()))
    }
}

fn read(path: &Path) -> Result<String, VersionLookupError> {
    fs::read_to_string(path).map_err(|source| VersionLookupError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve the build hash `tag` refers to.
pub fn resolve_hash(install: &InstallPath, tag: &SdkVersionTag) -> Result<String, VersionLookupError> {
    if tag.is_tot() {
        return Ok(read(&install.tot_file())?.trim().to_string());
    }

    ReleaseTags::load(&install.release_tags_file())?.hash_for(tag)
}

/// Contents of the active-build marker for `variant`.
pub fn installed_hash(install: &InstallPath, variant: Variant) -> Result<String, VersionLookupError> {
    Ok(read(&install.version_marker(variant))?.trim().to_string())
}

/// Whether `tag` is already the active build.
///
/// Lookup failures are logged and reported as "not installed".
pub fn is_installed(install: &InstallPath, tag: &SdkVersionTag) -> bool {
    let lookup = resolve_hash(install, tag)
        .and_then(|hash| installed_hash(install, tag.variant()).map(|active| (hash, active)));

    match lookup {
        Ok((hash, active)) => {
            let installed = !hash.is_empty() && active.contains(&hash);
            debug!(%tag, %hash, %active, installed, "Checked installed SDK version");
            installed
        }
        Err(e) => {
            warn!("Error retrieving installed EMSDK version: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const TAGS: &str = r#"{
        "latest": "2.0.1",
        "releases": { "2.0.1": "aaa111", "1.40.0": "bbb222" }
    }"#;

    fn checkout(dir: &Path) -> InstallPath {
        fs::write(dir.join("emscripten-releases-tags.txt"), TAGS).unwrap();
        fs::write(dir.join("emscripten-releases-tot.txt"), "ccc333\n").unwrap();
        InstallPath::new(dir).unwrap()
    }

    fn mark_active(dir: &Path, variant: Variant, hash: &str) {
        let variant_dir = dir.join(variant.dir_name());
        fs::create_dir_all(&variant_dir).unwrap();
        fs::write(variant_dir.join(".emsdk_version"), hash).unwrap();
    }

    #[test]
    fn tag_classification() {
        let tag = SdkVersionTag::from("1.40.0-fastcomp");
        assert_eq!(tag.variant(), Variant::Fastcomp);
        assert_eq!(tag.base_name(), "1.40.0");

        assert!(SdkVersionTag::default().is_latest());
        assert!(SdkVersionTag::from("tot").is_tot());
        assert_eq!(SdkVersionTag::from("tot").variant(), Variant::Upstream);
    }

    #[test]
    fn hashes_resolve_through_manifest() {
        let dir = tempdir().unwrap();
        let install = checkout(dir.path());

        assert_eq!(resolve_hash(&install, &"latest".into()).unwrap(), "aaa111");
        assert_eq!(resolve_hash(&install, &"1.40.0-fastcomp".into()).unwrap(), "bbb222");
        assert_eq!(resolve_hash(&install, &"tot".into()).unwrap(), "ccc333");
        assert_eq!(resolve_hash(&install, &"deadbeef".into()).unwrap(), "deadbeef");
    }

    #[test]
    fn installed_when_marker_matches() {
        let dir = tempdir().unwrap();
        let install = checkout(dir.path());
        mark_active(dir.path(), Variant::Upstream, "aaa111\n");

        assert!(is_installed(&install, &"2.0.1".into()));
        assert!(is_installed(&install, &"latest".into()));
        assert!(!is_installed(&install, &"1.40.0".into()));
    }

    #[test]
    fn variant_selects_marker_directory() {
        let dir = tempdir().unwrap();
        let install = checkout(dir.path());
        mark_active(dir.path(), Variant::Fastcomp, "bbb222");

        assert!(is_installed(&install, &"1.40.0-fastcomp".into()));
        assert!(!is_installed(&install, &"1.40.0".into()));
    }

    #[test]
    fn lookup_failures_mean_not_installed() {
        let dir = tempdir().unwrap();
        let install = InstallPath::new(dir.path()).unwrap();
        assert!(!is_installed(&install, &"latest".into()));

        fs::write(dir.path().join("emscripten-releases-tags.txt"), "{not json").unwrap();
        mark_active(dir.path(), Variant::Upstream, "aaa111");
        assert!(matches!(
            resolve_hash(&install, &"latest".into()),
            Err(VersionLookupError::Manifest { .. })
        ));
        assert!(!is_installed(&install, &"latest".into()));
    }

    #[test]
    fn missing_latest_entry_is_an_error() {
        let tags = ReleaseTags {
            latest: "9.9.9".into(),
            releases: HashMap::new(),
        };
        assert!(matches!(
            tags.hash_for(&"latest".into()),
            Err(VersionLookupError::MissingLatest(_))
        ));
    }
}
