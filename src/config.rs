use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use which::which;

use crate::{NotesError, Priority, Result};

const APP_NAME: &str = "swiftnotes";
const CONFIG_FILE: &str = "config.json";
const NOTES_FILE: &str = "notes.json";

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// JSON file holding every note
    pub data_file: PathBuf,

    /// Editor command used for note bodies
    pub editor_command: Option<String>,

    /// Priority given to new notes that do not name one
    pub default_priority: Priority,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: app_dir(|dirs| dirs.data_dir().to_path_buf()).join(NOTES_FILE),
            editor_command: None,
            default_priority: Priority::Low,
        }
    }
}

/// Per-user directory for the application, falling back to `~/.swiftnotes`
/// and finally the working directory.
fn app_dir(pick: impl FnOnce(&ProjectDirs) -> PathBuf) -> PathBuf {
    if let Some(dirs) = ProjectDirs::from("", "", APP_NAME) {
        return pick(&dirs);
    }
    dirs::home_dir()
        .map(|home| home.join(format!(".{}", APP_NAME)))
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Config {
    /// Default location of the configuration file.
    pub fn default_path() -> PathBuf {
        app_dir(|dirs| dirs.config_dir().to_path_buf()).join(CONFIG_FILE)
    }

    /// Reads the configuration at `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let config = serde_json::from_str(&content).map_err(|e| NotesError::ConfigError {
                    message: format!("{}: {}", path.display(), e),
                })?;
                debug!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No configuration at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(NotesError::Io(e)),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|_| NotesError::DirectoryError {
                    path: parent.to_path_buf(),
                })?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Applies a `key=value` setting.
    pub fn set(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| NotesError::ConfigError {
                message: format!("Expected key=value, got '{}'", assignment),
            })?;
        let value = value.trim();

        match key.trim() {
            "data_file" => self.data_file = PathBuf::from(value),
            "editor_command" => {
                self.editor_command = (!value.is_empty()).then(|| value.to_string());
            }
            "default_priority" => match Priority::parse(value) {
                Priority::Other(_) => {
                    return Err(NotesError::ConfigError {
                        message: format!("Unknown priority '{}'", value),
                    })
                }
                priority => self.default_priority = priority,
            },
            other => {
                return Err(NotesError::ConfigError {
                    message: format!("Unknown setting '{}'", other),
                })
            }
        }
        Ok(())
    }

    // This method provides smart fallbacks when no editor is configured
    pub fn get_editor_command(&self) -> String {
        // First try the configured editor
        if let Some(editor) = &self.editor_command {
            return editor.clone();
        }

        // Then try environment variable
        if let Ok(editor) = std::env::var("EDITOR") {
            return editor;
        }

        // Fall back to platform defaults
        if cfg!(windows) {
            "notepad".to_string()
        } else if cfg!(target_os = "macos") {
            "open -W -t".to_string()
        } else {
            for editor in &["nano", "vim", "vi", "emacs"] {
                if which(editor).is_ok() {
                    return editor.to_string();
                }
            }
            "nano".to_string()
        }
    }
}
