//! Layered `npmrc` configuration store.
//!
//! Mirrors how the host package manager resolves a setting:
//! 1. `npm_config_<key>` environment variables (per-invocation flags)
//! 2. The user `npmrc` (`$NPM_CONFIG_USERCONFIG` or `~/.npmrc`)
//! 3. The global `npmrc` (`$NPM_CONFIG_GLOBALCONFIG` or `$PREFIX/etc/npmrc`)

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{ConfigError, ConfigStore};

const ENV_PREFIX: &str = "npm_config_";

/// Snapshot of the process environment, taken once per session.
///
/// Keys are matched case-insensitively, as the host package manager does.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    #[must_use]
    pub fn from_process() -> Self {
        Self::from_pairs(std::env::vars())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .map(|(k, v)| (k.into().to_ascii_lowercase(), v.into()))
            .collect();
        Self { vars }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Per-invocation value for a config key (`npm_config_<key>`).
    #[must_use]
    pub fn npm_config(&self, key: &str) -> Option<&str> {
        self.get(&format!("{ENV_PREFIX}{}", key.replace('-', "_")))
    }
}

/// Configuration store over the host package manager's `npmrc` layers.
#[derive(Debug, Clone)]
pub struct NpmrcStore {
    env: EnvSnapshot,
    user_config: PathBuf,
    global_config: Option<PathBuf>,
}

impl NpmrcStore {
    /// Build a store with explicit file locations.
    pub fn new(env: EnvSnapshot, user_config: PathBuf, global_config: Option<PathBuf>) -> Self {
        Self {
            env,
            user_config,
            global_config,
        }
    }

    /// Locate the `npmrc` layers the way the host package manager does.
    pub fn from_env(env: EnvSnapshot) -> Result<Self, ConfigError> {
        let user_config = match env.npm_config("userconfig").filter(|v| !v.is_empty()) {
            Some(path) => PathBuf::from(path),
            None => dirs::home_dir()
                .ok_or(ConfigError::NoUserConfig)?
                .join(".npmrc"),
        };

        let global_config = env
            .npm_config("globalconfig")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                env.npm_config("prefix")
                    .or_else(|| env.get("PREFIX"))
                    .filter(|v| !v.is_empty())
                    .map(|prefix| Path::new(prefix).join("etc").join("npmrc"))
            });

        debug!(
            user = %user_config.display(),
            global = ?global_config,
            "Resolved npmrc layers"
        );

        Ok(Self::new(env, user_config, global_config))
    }

    #[must_use]
    pub fn user_config_path(&self) -> &Path {
        &self.user_config
    }

    fn read_file_value(path: &Path, key: &str) -> Result<Option<String>, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        // Later assignments win, as in ini files.
        Ok(contents
            .lines()
            .filter_map(parse_line)
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v)
            .last())
    }
}

impl ConfigStore for NpmrcStore {
    fn read(&self, key: &str) -> Result<Option<String>, ConfigError> {
        if let Some(value) = self.env.npm_config(key) {
            return Ok(Some(value.to_string()));
        }

        if let Some(value) = Self::read_file_value(&self.user_config, key)? {
            return Ok(Some(value));
        }

        match &self.global_config {
            Some(path) => Self::read_file_value(path, key),
            None => Ok(None),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let path = &self.user_config;
        let write_err = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };

        let lines: Vec<String> = match fs::read_to_string(path) {
            Ok(contents) => contents.lines().map(ToString::to_string).collect(),
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.clone(),
                    source,
                });
            }
        };

        let mut updated = false;
        let mut output: Vec<String> = Vec::with_capacity(lines.len() + 1);

        for line in lines {
            match parse_line(&line) {
                Some((k, _)) if k == key => {
                    if !updated {
                        output.push(format!("{key}={value}"));
                        updated = true;
                    }
                }
                _ => output.push(line),
            }
        }

        if !updated {
            output.push(format!("{key}={value}"));
        }

        let mut content = output.join("\n");
        content.push('\n');

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, content).map_err(write_err)?;

        debug!(key, path = %path.display(), "Persisted user config value");
        Ok(())
    }
}

/// Parse one `npmrc` line into `(key, value)`.
fn parse_line(line: &str) -> Option<(&str, String)> {
    let trimmed = line.trim();
    if trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with(';')
        || trimmed.starts_with('[')
    {
        return None;
    }

    let (key, value) = trimmed.split_once('=')?;
    Some((key.trim(), unquote(value.trim()).to_string()))
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
