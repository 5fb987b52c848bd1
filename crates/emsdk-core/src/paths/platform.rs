//! Platform detection and shim location helpers.
//!
//! The platform is an explicit value rather than a `cfg!` check at each use
//! site so the constrained-platform rules can be exercised on any host.

use std::env;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// Environment variable overriding the shim's own install location.
pub const SHIM_HOME_ENV: &str = "EMSDK_SHIM_HOME";

/// Longest install path the SDK's installer tolerates on Windows.
///
/// The SDK nests deep toolchain trees below this directory and the install
/// fails once the total exceeds `MAX_PATH`.
pub const MAX_BASE_PATH: usize = 85;

/// Host platform family, as far as install path rules are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Windows: short `MAX_PATH`, `.bat` scripts, `cmd.exe` shell.
    Windows,
    /// Everything else: `.sh` scripts sourced by a POSIX shell.
    Unix,
}

impl Platform {
    /// The platform this binary was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) { Self::Windows } else { Self::Unix }
    }

    /// Maximum install path length in characters, if the platform has one.
    #[must_use]
    pub const fn max_install_path_len(self) -> Option<usize> {
        match self {
            Self::Windows => Some(MAX_BASE_PATH),
            Self::Unix => None,
        }
    }

    #[must_use]
    pub const fn is_windows(self) -> bool {
        matches!(self, Self::Windows)
    }
}

/// Locate the shim's own install location (its "module base").
///
/// Resolution order:
/// 1. `EMSDK_SHIM_HOME` environment variable
/// 2. The directory holding the running executable, or its parent when the
///    executable lives in a `bin/` directory
pub fn module_base() -> Result<PathBuf, PathError> {
    if let Ok(path) = env::var(SHIM_HOME_ENV)
        && !path.trim().is_empty()
    {
        return normalize_user_path(&path);
    }

    let exe = env::current_exe().map_err(|e| PathError::ModuleBase(e.to_string()))?;
    let exe_dir = exe
        .parent()
        .ok_or_else(|| PathError::ModuleBase(format!("{} has no parent", exe.display())))?;

    Ok(module_base_for_exe_dir(exe_dir))
}

fn module_base_for_exe_dir(exe_dir: &Path) -> PathBuf {
    match (exe_dir.file_name(), exe_dir.parent()) {
        (Some(name), Some(parent)) if name == "bin" => parent.to_path_buf(),
        _ => exe_dir.to_path_buf(),
    }
}

/// Normalize a user-provided path, expanding `~` and making it absolute.
pub fn normalize_user_path(raw: &str) -> Result<PathBuf, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::EmptyPath);
    }

    let expanded = if trimmed.starts_with("~/") || trimmed == "~" {
        let home = dirs::home_dir().ok_or(PathError::NoHomeDir)?;
        if trimmed == "~" {
            home
        } else {
            home.join(trimmed.trim_start_matches("~/"))
        }
    } else {
        PathBuf::from(trimmed)
    };

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(expanded))
            .map_err(|e| PathError::CurrentDirError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_has_path_budget() {
        assert_eq!(Platform::Windows.max_install_path_len(), Some(85));
        assert_eq!(Platform::Unix.max_install_path_len(), None);
    }

    #[test]
    fn bin_directory_is_stripped() {
        let base = module_base_for_exe_dir(Path::new("/opt/shim/bin"));
        assert_eq!(base, PathBuf::from("/opt/shim"));

        let base = module_base_for_exe_dir(Path::new("/opt/shim/target/debug"));
        assert_eq!(base, PathBuf::from("/opt/shim/target/debug"));
    }

    #[test]
    fn normalize_rejects_blank() {
        assert!(matches!(normalize_user_path("   "), Err(PathError::EmptyPath)));
    }

    #[test]
    fn normalize_makes_relative_paths_absolute() {
        let path = normalize_user_path("some/dir").unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("some/dir"));
    }
}
