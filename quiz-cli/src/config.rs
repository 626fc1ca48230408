//! Configuration resolution for zimble-quiz.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use zimble_quiz_client::ClientConfig;

/// Name of the config file looked up in the user config directory.
pub const CONFIG_FILE_NAME: &str = "quiz.toml";

/// The configuration in effect and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Effective configuration.
    pub config: ClientConfig,
    /// File it was read from, or `None` for built-in defaults.
    pub source: Option<PathBuf>,
}

/// Resolve the configuration for this run.
///
/// An explicit `--config` file must exist. Otherwise the default file is
/// used when present, and built-in defaults when not. `--server` overrides
/// the base URL either way.
pub fn load(explicit: Option<&Path>, server: Option<&str>) -> Result<LoadedConfig> {
    load_from(explicit, default_config_path().as_deref(), server)
}

fn load_from(
    explicit: Option<&Path>,
    default_path: Option<&Path>,
    server: Option<&str>,
) -> Result<LoadedConfig> {
    let source = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_path.filter(|p| p.exists()).map(Path::to_path_buf),
    };

    let mut config = match &source {
        Some(path) => ClientConfig::from_file(path).context("Could not load configuration")?,
        None => ClientConfig::default(),
    };
    if let Some(server) = server {
        config.base_url = server.to_string();
    }

    tracing::debug!(
        "using config from {}",
        source
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in defaults".to_string())
    );
    Ok(LoadedConfig { config, source })
}

/// Get the default config file path for zimble-quiz.
fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("io", "zimble", "zimble-quiz")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILE_NAME);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn explicit_file_is_loaded() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "base_url = \"http://quiz.local:9000\"\n");

        let loaded = load_from(Some(&path), None, None).unwrap();

        assert_eq!(loaded.config.base_url, "http://quiz.local:9000");
        assert_eq!(loaded.source, Some(path));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.toml");

        let err = load_from(Some(&path), None, None).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to read config file"));
    }

    #[test]
    fn default_file_is_used_when_present() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "retry_delay_ms = 200\n");

        let loaded = load_from(None, Some(&path), None).unwrap();

        assert_eq!(loaded.config.retry_delay_ms, 200);
        assert_eq!(loaded.source, Some(path));
    }

    #[test]
    fn absent_default_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let loaded = load_from(None, Some(&path), None).unwrap();

        assert_eq!(loaded.config, ClientConfig::default());
        assert!(loaded.source.is_none());
    }

    #[test]
    fn server_flag_overrides_file() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "base_url = \"http://from-file:1\"\nrequest_timeout_secs = 4\n",
        );

        let loaded = load_from(Some(&path), None, Some("http://from-flag:2")).unwrap();

        assert_eq!(loaded.config.base_url, "http://from-flag:2");
        assert_eq!(loaded.config.request_timeout_secs, 4);
    }
}
