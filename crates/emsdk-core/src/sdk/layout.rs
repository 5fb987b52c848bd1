//! On-disk layout of an Emscripten SDK checkout.
//!
//! These names are owned by the external SDK; the shim only reads them.

use std::io;
use std::path::Path;

use crate::config::EnvSnapshot;
use crate::paths::Platform;

/// Directory name appended when a candidate path is occupied by something
/// other than an SDK checkout.
pub const SDK_DIR_NAME: &str = "emsdk";

/// Files whose presence marks a directory as an SDK checkout.
pub const CHECKOUT_MARKERS: [&str; 2] = ["emsdk.py", ".emscripten"];

/// Release-tag manifest: `{"latest": <tag>, "releases": {<tag>: <hash>}}`.
pub const RELEASE_TAGS_FILE: &str = "emscripten-releases-tags.txt";

/// Tip-of-tree hash, raw text.
pub const TOT_FILE: &str = "emscripten-releases-tot.txt";

/// Per-variant marker recording the active build hash.
pub const VERSION_MARKER_FILE: &str = ".emsdk_version";

/// Upstream repository cloned by `checkout`.
pub const DEFAULT_SDK_REPO: &str = "https://github.com/emscripten-core/emsdk.git";

/// Environment variable overriding [`DEFAULT_SDK_REPO`].
pub const SDK_REPO_ENV: &str = "EMSDK_SHIM_REPO";

/// Repository to clone: `EMSDK_SHIM_REPO` when set, otherwise upstream.
#[must_use]
pub fn sdk_repo_url(env: &EnvSnapshot) -> String {
    env.get(SDK_REPO_ENV)
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_SDK_REPO)
        .to_string()
}

/// Name of the SDK's main entry script for `platform`.
#[must_use]
pub const fn main_script_name(platform: Platform) -> &'static str {
    match platform {
        Platform::Windows => "emsdk.bat",
        Platform::Unix => "emsdk",
    }
}

/// Name of the environment setup script for `platform`.
#[must_use]
pub const fn env_script_name(platform: Platform) -> &'static str {
    match platform {
        Platform::Windows => "emsdk_env.bat",
        Platform::Unix => "emsdk_env.sh",
    }
}

/// Whether `dir` already holds an SDK checkout.
pub fn is_sdk_checkout(dir: &Path) -> io::Result<bool> {
    for marker in CHECKOUT_MARKERS {
        if dir.join(marker).try_exists()? {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn either_marker_identifies_checkout() {
        let dir = tempdir().unwrap();
        assert!(!is_sdk_checkout(dir.path()).unwrap());

        fs::write(dir.path().join(".emscripten"), "").unwrap();
        assert!(is_sdk_checkout(dir.path()).unwrap());

        let other = tempdir().unwrap();
        fs::write(other.path().join("emsdk.py"), "").unwrap();
        assert!(is_sdk_checkout(other.path()).unwrap());
    }

    #[test]
    fn repo_url_comes_from_snapshot() {
        assert_eq!(sdk_repo_url(&EnvSnapshot::default()), DEFAULT_SDK_REPO);

        let env = EnvSnapshot::from_pairs([(SDK_REPO_ENV, "https://mirror.example/emsdk.git")]);
        assert_eq!(sdk_repo_url(&env), "https://mirror.example/emsdk.git");

        let blank = EnvSnapshot::from_pairs([(SDK_REPO_ENV, "  ")]);
        assert_eq!(sdk_repo_url(&blank), DEFAULT_SDK_REPO);
    }

    #[test]
    fn script_names_follow_platform() {
        assert_eq!(env_script_name(Platform::Unix), "emsdk_env.sh");
        assert_eq!(env_script_name(Platform::Windows), "emsdk_env.bat");
        assert_eq!(main_script_name(Platform::Windows), "emsdk.bat");
    }
}
