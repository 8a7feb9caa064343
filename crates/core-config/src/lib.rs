//! Configuration loading and parsing.
//!
//! Parses `vlist.toml` (or an override path provided by the binary) extracting
//! the `[list]` table. Missing files and TOML syntax errors fall back to the
//! defaults. A file that parses but holds a bad value is different: an
//! `item_height` that is not a positive integer, an unusable `height`, or a
//! field of the wrong TOML type is a configuration error and is returned to
//! the caller, never coerced.
//!
//! Unknown fields are ignored (TOML deserialization tolerance).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

mod list;
pub use list::{
    ConfigError, DEFAULT_HEIGHT, DEFAULT_ITEM_HEIGHT, DEFAULT_OVERFLOW_INDICATOR_THRESHOLD,
    HeightMode, ItemHeight, ListConfig, ListSection, RawHeight, RawNumber, validate_item_height,
};

pub const CONFIG_FILE_NAME: &str = "vlist.toml";

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub list: ListSection,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    pub list: ListConfig,    // validated effective values
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("vlist").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    let table = match toml::from_str::<toml::Table>(&content) {
        Ok(table) => table,
        Err(e) => {
            warn!(
                target: "config",
                path = %path.display(),
                error = %e,
                "config_parse_failed_using_defaults"
            );
            return Ok(Config::default());
        }
    };
    let file: ConfigFile = toml::Value::Table(table)
        .try_into()
        .with_context(|| format!("invalid configuration in {}", path.display()))?;
    Config::from_file(file, Some(content))
}

impl Config {
    /// Validate a parsed file into an effective configuration.
    pub fn from_file(file: ConfigFile, raw: Option<String>) -> Result<Config> {
        let list = ListConfig::try_from(&file.list)?;
        if list.overflow_indicator_threshold != DEFAULT_OVERFLOW_INDICATOR_THRESHOLD {
            info!(
                target: "config",
                threshold = list.overflow_indicator_threshold,
                "overflow_indicator_threshold_inert"
            );
        }
        Ok(Config { raw, file, list })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
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
        assert!(cfg.raw.is_none());
        assert_eq!(cfg.list, ListConfig::default());
        assert_eq!(cfg.list.height, HeightMode::Fixed(10));
        assert_eq!(cfg.list.item_height.get(), 1);
        assert!(cfg.list.show_overflow_indicators);
    }

    #[test]
    fn parses_list_table() {
        let tmp = write_config(
            "[list]\nheight = \"fill\"\nreserved_lines = 3\nitem_height = 2\nshow_overflow_indicators = false\n",
        );
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert!(cfg.raw.is_some());
        assert_eq!(cfg.list.height, HeightMode::Fill);
        assert_eq!(cfg.list.reserved_lines, 3);
        assert_eq!(cfg.list.item_height.get(), 2);
        assert!(!cfg.list.show_overflow_indicators);
    }

    #[test]
    fn parses_fixed_height() {
        let tmp = write_config("[list]\nheight = 7\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.list.height, HeightMode::Fixed(7));
    }

    #[test]
    fn syntax_error_falls_back_to_defaults() {
        let tmp = write_config("[list\nheight = ");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.list, ListConfig::default());
    }

    #[test]
    fn fractional_item_height_is_an_error() {
        let tmp = write_config("[list]\nitem_height = 1.5\n");
        let err = load_from(Some(tmp.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("positive integer"));
        let cfg_err = err.downcast_ref::<ConfigError>().expect("typed config error");
        assert!(matches!(cfg_err, ConfigError::InvalidItemHeight { .. }));
    }

    #[test]
    fn string_item_height_is_an_error_not_a_fallback() {
        let tmp = write_config("[list]\nheight = 7\nitem_height = \"two\"\n");
        let err = load_from(Some(tmp.path().to_path_buf())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidItemHeight { value }) if value.contains("two")
        ));
    }

    #[test]
    fn wrong_typed_fields_are_errors() {
        let tmp = write_config("[list]\nheight = true\n");
        let err = load_from(Some(tmp.path().to_path_buf())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidHeight { .. })
        ));

        let tmp = write_config("[list]\nheight = 7\nreserved_lines = \"x\"\n");
        let err = load_from(Some(tmp.path().to_path_buf())).unwrap_err();
        assert!(
            err.to_string().starts_with("invalid configuration in"),
            "{err:#}"
        );
    }

    #[test]
    fn zero_and_negative_item_height_are_errors() {
        for body in ["[list]\nitem_height = 0\n", "[list]\nitem_height = -1\n"] {
            let tmp = write_config(body);
            let err = load_from(Some(tmp.path().to_path_buf())).unwrap_err();
            assert!(err.to_string().contains("positive integer"), "{body}: {err}");
        }
    }

    #[test]
    fn zero_fixed_height_is_an_error() {
        let tmp = write_config("[list]\nheight = 0\n");
        let err = load_from(Some(tmp.path().to_path_buf())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidHeight { .. })
        ));
    }

    #[test]
    fn threshold_logging_uses_config_target() {
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let file: ConfigFile = toml::from_str("[list]\noverflow_indicator_threshold = 4\n").unwrap();
        let cfg = with_default(subscriber, || Config::from_file(file, None)).unwrap();

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("INFO config:"));
        assert!(log_output.contains("overflow_indicator_threshold_inert"));
        assert_eq!(cfg.list.overflow_indicator_threshold, 4);
    }
}
