//! Shell configuration
//!
//! Values come from the environment so the shell can be pointed at a scripts
//! directory or a different editor without flags:
//!
//! | Variable                  | Meaning                                   |
//! |---------------------------|-------------------------------------------|
//! | `RHODUS_SCRIPTS_DIR`      | directory listed by `dir`                 |
//! | `RHODUS_EDITOR`, `EDITOR` | program launched by `edit`                |
//! | `NO_COLOR`                | disable colored output when set           |

use std::env;
use std::path::PathBuf;

pub const RHODUS_VERSION: &str = "1.0";

pub const DEFAULT_PROMPT: &str = ">> ";

#[cfg(windows)]
const DEFAULT_EDITOR: &str = "notepad.exe";
#[cfg(not(windows))]
const DEFAULT_EDITOR: &str = "vi";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub scripts_dir: PathBuf,
    pub editor: String,
    pub prompt: String,
    pub color: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            scripts_dir: default_scripts_dir(),
            editor: DEFAULT_EDITOR.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            color: true,
        }
    }
}

impl ShellConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("RHODUS_SCRIPTS_DIR").filter(|v| !v.is_empty()) {
            config.scripts_dir = PathBuf::from(dir);
        }
        if let Some(editor) = lookup("RHODUS_EDITOR")
            .or_else(|| lookup("EDITOR"))
            .filter(|v| !v.is_empty())
        {
            config.editor = editor;
        }
        if lookup("NO_COLOR").is_some() {
            config.color = false;
        }

        config
    }
}

/// `SampleScripts` beside the working directory
fn default_scripts_dir() -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    cwd.parent()
        .map(|parent| parent.to_path_buf())
        .unwrap_or(cwd)
        .join("SampleScripts")
}
