//! Configuration loading and parsing.
//!
//! Parses `oxed.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [editor]
//! tab_spaces = 2
//!
//! [status]
//! file_name_max = 20
//!
//! [messages]
//! capacity = 64
//! ```
//!
//! Every field is optional. Unknown fields are ignored so older binaries
//! tolerate newer files. A missing file yields defaults; a file that fails to
//! parse is logged and also yields defaults (the editor must still start).
//! Out-of-range values are clamped by `Config::apply_limits`.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "oxed.toml";

/// Upper bound for `editor.tab_spaces`.
pub const TAB_SPACES_MAX: usize = 16;
/// Lower bound for `status.file_name_max` (room for one char plus ellipsis).
pub const FILE_NAME_MAX_MIN: usize = 2;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_tab_spaces")]
    pub tab_spaces: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_spaces: Self::default_tab_spaces(),
        }
    }
}

impl EditorConfig {
    const fn default_tab_spaces() -> usize {
        2
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StatusConfig {
    #[serde(default = "StatusConfig::default_file_name_max")]
    pub file_name_max: usize,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            file_name_max: Self::default_file_name_max(),
        }
    }
}

impl StatusConfig {
    const fn default_file_name_max() -> usize {
        20
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct MessagesConfig {
    #[serde(default = "MessagesConfig::default_capacity")]
    pub capacity: usize,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            capacity: Self::default_capacity(),
        }
    }
}

impl MessagesConfig {
    const fn default_capacity() -> usize {
        64
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub status: StatusConfig,
    #[serde(default)]
    pub messages: MessagesConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    pub source: Option<PathBuf>,
}

/// Best-effort config path: working directory first, then the platform
/// config dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("oxed").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            let mut cfg = Config {
                raw: Some(content),
                file,
                source: Some(path),
            };
            cfg.apply_limits();
            Ok(cfg)
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Clamp values into their supported ranges, logging each adjustment.
    pub fn apply_limits(&mut self) {
        let tab = self.file.editor.tab_spaces;
        if tab > TAB_SPACES_MAX {
            info!(target: "config", raw = tab, clamped = TAB_SPACES_MAX, "tab_spaces_clamped");
            self.file.editor.tab_spaces = TAB_SPACES_MAX;
        }
        let name_max = self.file.status.file_name_max;
        if name_max < FILE_NAME_MAX_MIN {
            info!(target: "config", raw = name_max, clamped = FILE_NAME_MAX_MIN, "file_name_max_clamped");
            self.file.status.file_name_max = FILE_NAME_MAX_MIN;
        }
        if self.file.messages.capacity == 0 {
            info!(target: "config", raw = 0, clamped = 1, "message_capacity_clamped");
            self.file.messages.capacity = 1;
        }
    }

    pub fn tab_spaces(&self) -> usize {
        self.file.editor.tab_spaces
    }
    pub fn file_name_max(&self) -> usize {
        self.file.status.file_name_max
    }
    pub fn message_capacity(&self) -> usize {
        self.file.messages.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use tracing::subscriber::with_default;

    /// Shared sink for captured log lines.
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), body).unwrap();
        tmp
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.tab_spaces(), 2);
        assert_eq!(cfg.file_name_max(), 20);
        assert_eq!(cfg.message_capacity(), 64);
        assert!(cfg.raw.is_none());
    }

    #[test]
    fn parses_all_sections() {
        let tmp = write_config(
            "[editor]\ntab_spaces = 4\n[status]\nfile_name_max = 12\n[messages]\ncapacity = 8\n",
        );
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.tab_spaces(), 4);
        assert_eq!(cfg.file_name_max(), 12);
        assert_eq!(cfg.message_capacity(), 8);
        assert_eq!(cfg.source.as_deref(), Some(tmp.path()));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let tmp = write_config("[status]\nfile_name_max = 30\nunknown_key = true\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file_name_max(), 30);
        assert_eq!(cfg.tab_spaces(), 2);
    }

    #[test]
    fn parse_error_falls_back_to_defaults() {
        let tmp = write_config("[editor\ntab_spaces = ");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file, ConfigFile::default());
    }

    #[test]
    fn out_of_range_values_clamped() {
        let tmp = write_config(
            "[editor]\ntab_spaces = 99\n[status]\nfile_name_max = 0\n[messages]\ncapacity = 0\n",
        );
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.tab_spaces(), TAB_SPACES_MAX);
        assert_eq!(cfg.file_name_max(), FILE_NAME_MAX_MIN);
        assert_eq!(cfg.message_capacity(), 1);
    }

    #[test]
    fn clamp_logging_uses_config_target() {
        let tmp = write_config("[editor]\ntab_spaces = 40\n");
        let capture = Capture::default();
        let sink = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter("config=info")
            .with_ansi(false)
            .without_time()
            .with_writer(move || sink.clone())
            .finish();

        let cfg = with_default(subscriber, || load_from(Some(tmp.path().to_path_buf())).unwrap());

        let log_output = capture.text();
        assert!(log_output.contains("INFO config:"));
        assert!(log_output.contains("tab_spaces_clamped"));
        assert_eq!(cfg.tab_spaces(), TAB_SPACES_MAX);
    }
}
