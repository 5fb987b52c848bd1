//! Shell command composition for running tools inside the SDK environment.
//!
//! The environment script mutates PATH-like state, so it and the user's
//! command must run in one shell: enter the SDK, source the script, return
//! to the caller's directory, run the command.

use std::borrow::Cow;
use std::path::Path;

use emsdk_core::{InstallPath, Platform};

use crate::error::{SdkError, SdkResult};

/// Characters `cmd.exe` expands or mangles even inside double quotes.
const CMD_UNSAFE: [char; 6] = ['"', '%', '!', '\n', '\r', '\0'];

/// Characters that force double quotes under `cmd.exe`.
const CMD_SPECIAL: [char; 9] = [' ', '\t', '&', '|', '<', '>', '^', '(', ')'];

/// Quote one word for the platform shell.
pub fn quote(word: &str, platform: Platform) -> SdkResult<String> {
    match platform {
        Platform::Unix => shlex::try_quote(word)
            .map(Cow::into_owned)
            .map_err(|_| SdkError::UnsafeShellArgument(word.to_string())),
        Platform::Windows => {
            if word.contains(CMD_UNSAFE) {
                return Err(SdkError::UnsafeShellArgument(word.to_string()));
            }
            if word.is_empty() || word.contains(CMD_SPECIAL) {
                Ok(format!("\"{word}\""))
            } else {
                Ok(word.to_string())
            }
        }
    }
}

fn quote_path(path: &Path, platform: Platform) -> SdkResult<String> {
    quote(&path.to_string_lossy(), platform)
}

/// Build the `cd <sdk> && <env script> && cd <cwd> && <command>` chain.
pub fn compose_env_command(
    install: &InstallPath,
    return_dir: &Path,
    command: &str,
    args: &[String],
    platform: Platform,
) -> SdkResult<String> {
    let (cd, source_prefix) = match platform {
        Platform::Unix => ("cd", ". "),
        Platform::Windows => ("cd /d", ""),
    };

    let mut script = format!(
        "{cd} {} && {source_prefix}{} && {cd} {} && {}",
        quote_path(install.as_path(), platform)?,
        quote_path(&install.env_script(platform), platform)?,
        quote_path(return_dir, platform)?,
        quote(command, platform)?,
    );

    for arg in args {
        script.push(' ');
        script.push_str(&quote(arg, platform)?);
    }

    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_chain_sources_script_between_cds() {
        let install = InstallPath::new("/opt/emsdk").unwrap();
        let script = compose_env_command(
            &install,
            Path::new("/home/me/project"),
            "echo",
            &["hi".to_string()],
            Platform::Unix,
        )
        .unwrap();

        assert_eq!(
            script,
            "cd /opt/emsdk && . /opt/emsdk/emsdk_env.sh && cd /home/me/project && echo hi"
        );
    }

    #[test]
    fn windows_chain_uses_bat_without_prefix() {
        let install = InstallPath::new(r"C:\sdk\emsdk").unwrap();
        let script = compose_env_command(
            &install,
            Path::new(r"C:\work"),
            "emcc",
            &["-v".to_string()],
            Platform::Windows,
        )
        .unwrap();

        assert!(script.starts_with(r"cd /d C:\sdk\emsdk && "));
        assert!(script.contains("emsdk_env.bat && cd /d "));
        assert!(!script.contains(". "));
        assert!(script.ends_with("emcc -v"));
    }

    #[test]
    fn paths_and_args_with_spaces_are_quoted() {
        let install = InstallPath::new("/opt/my sdk").unwrap();
        let script = compose_env_command(
            &install,
            Path::new("/tmp"),
            "emcc",
            &["hello world.c".to_string(), "$(rm -rf ~)".to_string()],
            Platform::Unix,
        )
        .unwrap();

        assert!(script.starts_with("cd '/opt/my sdk' && . '/opt/my sdk/emsdk_env.sh'"));
        assert!(script.ends_with("emcc 'hello world.c' '$(rm -rf ~)'"));
    }

    #[test]
    fn cmd_metacharacters_are_refused() {
        assert!(matches!(
            quote("100%", Platform::Windows),
            Err(SdkError::UnsafeShellArgument(_))
        ));
        assert_eq!(quote("a&b", Platform::Windows).unwrap(), "\"a&b\"");
        assert_eq!(quote("", Platform::Windows).unwrap(), "\"\"");
    }

    #[test]
    fn nul_bytes_are_refused_on_unix() {
        assert!(quote("bad\0arg", Platform::Unix).is_err());
    }
}
