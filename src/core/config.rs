//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.filesearch/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct FileSearchConfig {
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchConfig {
    pub endpoint: Option<String>,
    pub debounce_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ENDPOINT: &str = "https://fileupload.rick-and-friends.site/search";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub endpoint: String,
    pub debounce_ms: u64,
    /// Text placed in the search box at startup (empty = none).
    pub initial_query: String,
}

/// Values given on the command line. `None` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub endpoint: Option<String>,
    pub debounce_ms: Option<u64>,
    pub query: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.filesearch/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".filesearch").join("config.toml"))
}

/// Load config from `~/.filesearch/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `FileSearchConfig::default()`.
pub fn load_config() -> Result<FileSearchConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(FileSearchConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(FileSearchConfig::default());
    }

    load_config_from(&path)
}

/// Load and parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<FileSearchConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: FileSearchConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# filesearch configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [search]
# endpoint = "https://fileupload.rick-and-friends.site/search"   # Or FILESEARCH_ENDPOINT
# debounce_ms = 500                                              # Or FILESEARCH_DEBOUNCE_MS
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &FileSearchConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |name| std::env::var(name).ok())
}

/// Same as [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &FileSearchConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Endpoint: CLI → env → config → default
    let endpoint = cli
        .endpoint
        .clone()
        .or_else(|| env("FILESEARCH_ENDPOINT"))
        .or_else(|| config.search.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    // Debounce: CLI → env → config → default
    let env_debounce = env("FILESEARCH_DEBOUNCE_MS").and_then(|raw| match raw.parse::<u64>() {
        Ok(ms) => Some(ms),
        Err(e) => {
            warn!("Ignoring FILESEARCH_DEBOUNCE_MS={:?}: {}", raw, e);
            None
        }
    });
    let debounce_ms = cli
        .debounce_ms
        .or(env_debounce)
        .or(config.search.debounce_ms)
        .unwrap_or(DEFAULT_DEBOUNCE_MS);

    ResolvedConfig {
        endpoint,
        debounce_ms,
        initial_query: cli.query.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&FileSearchConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(resolved.debounce_ms, DEFAULT_DEBOUNCE_MS);
        assert!(resolved.initial_query.is_empty());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = FileSearchConfig {
            search: SearchConfig {
                endpoint: Some("http://localhost:9000/search".to_string()),
                debounce_ms: Some(250),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.endpoint, "http://localhost:9000/search");
        assert_eq!(resolved.debounce_ms, 250);
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = FileSearchConfig {
            search: SearchConfig {
                endpoint: Some("http://config/search".to_string()),
                debounce_ms: Some(250),
            },
        };
        let env: HashMap<&str, &str> = HashMap::from([
            ("FILESEARCH_ENDPOINT", "http://env/search"),
            ("FILESEARCH_DEBOUNCE_MS", "100"),
        ]);
        let lookup = |name: &str| env.get(name).map(|v| v.to_string());

        let resolved = resolve_with_env(&config, &CliOverrides::default(), lookup);
        assert_eq!(resolved.endpoint, "http://env/search");
        assert_eq!(resolved.debounce_ms, 100);

        let cli = CliOverrides {
            endpoint: Some("http://cli/search".to_string()),
            debounce_ms: Some(50),
            query: Some("cat".to_string()),
        };
        let resolved = resolve_with_env(&config, &cli, lookup);
        assert_eq!(resolved.endpoint, "http://cli/search");
        assert_eq!(resolved.debounce_ms, 50);
        assert_eq!(resolved.initial_query, "cat");
    }

    #[test]
    fn test_invalid_env_debounce_is_ignored() {
        let lookup = |name: &str| (name == "FILESEARCH_DEBOUNCE_MS").then(|| "soon".to_string());
        let resolved = resolve_with_env(&FileSearchConfig::default(), &CliOverrides::default(), lookup);
        assert_eq!(resolved.debounce_ms, DEFAULT_DEBOUNCE_MS);
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config: FileSearchConfig = toml::from_str(
            r#"
[search]
debounce_ms = 300
"#,
        )
        .unwrap();
        assert_eq!(config.search.debounce_ms, Some(300));
        assert!(config.search.endpoint.is_none());

        let empty: FileSearchConfig = toml::from_str("").unwrap();
        assert!(empty.search.endpoint.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("filesearch-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[search\nendpoint = ").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config_from(Path::new("/nonexistent/filesearch/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
