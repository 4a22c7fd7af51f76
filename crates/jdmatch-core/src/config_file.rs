use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Config;

/// Environment variable that overrides the configured endpoint.
pub const ENDPOINT_ENV: &str = "JDMATCH_ENDPOINT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub service: Option<ServiceConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
    pub fps: Option<u32>,
}

/// Platform config directory path: `<config_dir>/jdmatch/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("jdmatch").join("config.toml"))
}

/// Load config by cascading CWD `.jdmatch.toml` over platform config.
/// CWD values override platform values. Unreadable files are logged and skipped.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_logged(&p));
    let cwd = load_logged(Path::new(".jdmatch.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

fn load_logged(path: &Path) -> Option<ConfigFile> {
    if !path.exists() {
        return None;
    }
    match load_from_path(path) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring config file");
            None
        }
    }
}

/// Load a config from a specific path.
pub fn load_from_path(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_service = base.service.unwrap_or_default();
    let overlay_service = overlay.service.unwrap_or_default();
    let base_display = base.display.unwrap_or_default();
    let overlay_display = overlay.display.unwrap_or_default();

    ConfigFile {
        service: Some(ServiceConfig {
            endpoint: overlay_service.endpoint.or(base_service.endpoint),
            timeout_secs: overlay_service.timeout_secs.or(base_service.timeout_secs),
        }),
        display: Some(DisplayConfig {
            theme: overlay_display.theme.or(base_display.theme),
            fps: overlay_display.fps.or(base_display.fps),
        }),
    }
}

impl ConfigFile {
    /// Resolve the client config: explicit flag > environment > file > default.
    pub fn resolve(&self, endpoint_flag: Option<String>, endpoint_env: Option<String>) -> Config {
        let service = self.service.clone().unwrap_or_default();
        let non_blank = |e: &String| !e.trim().is_empty();
        let endpoint = endpoint_flag
            .filter(non_blank)
            .or(endpoint_env.filter(non_blank))
            .or(service.endpoint.filter(non_blank))
            .unwrap_or_else(|| crate::DEFAULT_ENDPOINT.to_string());

        Config {
            endpoint,
            timeout: service
                .timeout_secs
                .filter(|s| *s > 0)
                .map(Duration::from_secs),
        }
    }

    pub fn theme(&self) -> Option<&str> {
        self.display.as_ref()?.theme.as_deref()
    }

    pub fn fps(&self) -> Option<u32> {
        self.display.as_ref()?.fps.map(|f| f.clamp(1, 120))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> ConfigFile {
        toml::from_str(s).unwrap()
    }

    #[test]
    fn empty_file_resolves_to_default_endpoint() {
        let cfg = ConfigFile::default().resolve(None, None);
        assert_eq!(cfg.endpoint, crate::DEFAULT_ENDPOINT);
        assert_eq!(cfg.timeout, None);
    }

    #[test]
    fn partial_file_parses() {
        let cfg = parse("[display]\ntheme = \"modern\"\n");
        assert_eq!(cfg.theme(), Some("modern"));
        assert!(cfg.service.is_none());
    }

    #[test]
    fn flag_beats_env_beats_file() {
        let cfg = parse("[service]\nendpoint = \"http://file/match_jd\"\ntimeout_secs = 30\n");

        let resolved = cfg.resolve(
            Some("http://flag/match_jd".into()),
            Some("http://env/match_jd".into()),
        );
        assert_eq!(resolved.endpoint, "http://flag/match_jd");

        let resolved = cfg.resolve(None, Some("http://env/match_jd".into()));
        assert_eq!(resolved.endpoint, "http://env/match_jd");

        let resolved = cfg.resolve(None, None);
        assert_eq!(resolved.endpoint, "http://file/match_jd");
        assert_eq!(resolved.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn blank_sources_fall_through() {
        let cfg = parse("[service]\nendpoint = \"http://file/match_jd\"\n");

        let resolved = cfg.resolve(None, Some(String::new()));
        assert_eq!(resolved.endpoint, "http://file/match_jd");

        let resolved = cfg.resolve(Some("  ".into()), Some("http://env/match_jd".into()));
        assert_eq!(resolved.endpoint, "http://env/match_jd");

        let blank_file = parse("[service]\nendpoint = \"\"\n");
        assert_eq!(
            blank_file.resolve(None, Some(String::new())).endpoint,
            crate::DEFAULT_ENDPOINT
        );
    }

    #[test]
    fn zero_timeout_means_none() {
        let cfg = parse("[service]\ntimeout_secs = 0\n");
        assert_eq!(cfg.resolve(None, None).timeout, None);
    }

    #[test]
    fn overlay_wins_field_by_field() {
        let base = parse("[service]\nendpoint = \"http://a\"\ntimeout_secs = 5\n[display]\nfps = 30\n");
        let overlay = parse("[service]\nendpoint = \"http://b\"\n[display]\ntheme = \"hacker\"\n");
        let merged = merge(base, overlay);
        let service = merged.service.clone().unwrap();
        assert_eq!(service.endpoint.as_deref(), Some("http://b"));
        assert_eq!(service.timeout_secs, Some(5));
        assert_eq!(merged.theme(), Some("hacker"));
        assert_eq!(merged.fps(), Some(30));
    }

    #[test]
    fn load_from_path_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[service\n").unwrap();
        assert!(matches!(
            load_from_path(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn fps_is_clamped() {
        let cfg = parse("[display]\nfps = 500\n");
        assert_eq!(cfg.fps(), Some(120));
    }
}
