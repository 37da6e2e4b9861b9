use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use locker_core::gateway::DEFAULT_BASE_URL;
use locker_core::HttpGatewayConfig;

/// Optional settings file, `~/.config/locker/config.toml` by default.
///
/// Every section may be omitted; flags and environment variables win over
/// anything set here.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LockerConfig {
    #[serde(default)]
    pub remote: RemoteSection,
    #[serde(default)]
    pub session: SessionSection,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RemoteSection {
    pub base_url: Option<String>,
    /// Per-request timeout. Unset means no client-side timeout.
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SessionSection {
    pub path: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UiSection {
    pub format: Option<String>,
}

impl LockerConfig {
    /// Gateway settings, with `base_url` overriding the file when given.
    pub fn gateway_config(&self, base_url: Option<&str>) -> HttpGatewayConfig {
        let base_url = base_url
            .or(self.remote.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL)
            .to_string();
        HttpGatewayConfig {
            base_url,
            timeout: self.remote.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_session_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("session.json"))
}

pub fn read_config(path: &Path) -> anyhow::Result<LockerConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

/// Read the config at `path`, or defaults when the file does not exist.
pub fn load_config(path: &Path) -> anyhow::Result<LockerConfig> {
    if path.exists() {
        read_config(path)
    } else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        Ok(LockerConfig::default())
    }
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("locker"));
        }
    }
    Ok(home_dir()?.join(".config").join("locker"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("locker"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("locker"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sections_default() {
        let config: LockerConfig = toml::from_str("[ui]\nformat = \"plain\"\n").unwrap();
        assert_eq!(config.ui.format.as_deref(), Some("plain"));
        assert!(config.remote.base_url.is_none());
        assert!(config.session.path.is_none());
    }

    #[test]
    fn test_gateway_config_precedence() {
        let config: LockerConfig = toml::from_str(
            "[remote]\nbase_url = \"https://file.example\"\nrequest_timeout_secs = 20\n",
        )
        .unwrap();

        let from_file = config.gateway_config(None);
        assert_eq!(from_file.base_url, "https://file.example");
        assert_eq!(from_file.timeout, Some(Duration::from_secs(20)));

        let from_flag = config.gateway_config(Some("http://127.0.0.1:9"));
        assert_eq!(from_flag.base_url, "http://127.0.0.1:9");
    }

    #[test]
    fn test_default_gateway_has_no_timeout() {
        let config = LockerConfig::default().gateway_config(None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert!(config.ui.format.is_none());
    }

    #[test]
    fn test_read_config_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[remote\nbase_url = 1").unwrap();
        let err = read_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
