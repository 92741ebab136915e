//! Configuration loading and typed config structures for the Banker service.
//!
//! The canonical configuration lives in `banker-config.yaml` next to the
//! binary. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads the file and applies
//! environment overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use banker_types::{DEFAULT_WITHDRAW_LIMIT, PlayerId};

/// File name of the snapshot inside a `BASE_PATH` directory.
pub const SNAPSHOT_FILE_NAME: &str = "game.json";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
///
/// Mirrors the structure of `banker-config.yaml`. Every field has a
/// default, so an empty document is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BankerConfig {
    /// Game rules and snapshot location.
    #[serde(default)]
    pub game: GameConfig,

    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Game service settings.
    #[serde(default)]
    pub service: ServiceConfig,
}

impl BankerConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `BANKER_SNAPSHOT_PATH` overrides `game.snapshot_path`
    /// - `BASE_PATH` names a directory holding `game.json` (used only
    ///   when `BANKER_SNAPSHOT_PATH` is unset)
    /// - `BANKER_PORT` overrides `server.port`
    /// - `BANKER_OPERATORS` (comma-separated player ids) overrides
    ///   `game.operators`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse configuration from a YAML string, without env overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides looked up through `lookup` (normally the process
    /// environment).
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("BANKER_SNAPSHOT_PATH") {
            self.game.snapshot_path = PathBuf::from(path);
        } else if let Some(base) = lookup("BASE_PATH") {
            self.game.snapshot_path = Path::new(&base).join(SNAPSHOT_FILE_NAME);
        }
        if let Some(port) = lookup("BANKER_PORT") {
            match port.trim().parse::<u16>() {
                Ok(p) => self.server.port = p,
                Err(e) => tracing::warn!(value = %port, error = %e, "Ignoring invalid BANKER_PORT"),
            }
        }
        if let Some(ids) = lookup("BANKER_OPERATORS") {
            let parsed: Result<Vec<PlayerId>, _> = ids
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::parse::<PlayerId>)
                .collect();
            match parsed {
                Ok(operators) => self.game.operators = operators,
                Err(e) => {
                    tracing::warn!(value = %ids, error = %e, "Ignoring invalid BANKER_OPERATORS");
                }
            }
        }
    }
}

/// Game rule settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Location of the persisted game snapshot.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,

    /// Withdraw limit for players added without an explicit one.
    #[serde(default = "default_withdraw_limit")]
    pub default_withdraw_limit: i64,

    /// Reject withdrawals larger than the player's `withdraw_limit`.
    #[serde(default)]
    pub enforce_withdraw_limit: bool,

    /// Player ids allowed to run moderator commands. Empty means nobody.
    #[serde(default)]
    pub operators: Vec<PlayerId>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            default_withdraw_limit: default_withdraw_limit(),
            enforce_withdraw_limit: false,
            operators: Vec::new(),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Bind host.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` as a bind string.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG`
    /// is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Game service settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    /// Maximum number of requests queued for the game service.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
        }
    }
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from(SNAPSHOT_FILE_NAME)
}

const fn default_withdraw_limit() -> i64 {
    DEFAULT_WITHDRAW_LIMIT
}

fn default_host() -> String {
    "127.0.0.1".to_owned()
}

const fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_queue_capacity() -> usize {
    64
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config_is_valid() {
        let config = BankerConfig::default();
        assert_eq!(config.game.snapshot_path, PathBuf::from("game.json"));
        assert_eq!(config.game.default_withdraw_limit, 2);
        assert!(!config.game.enforce_withdraw_limit);
        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.service.queue_capacity, 64);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
game:
  snapshot_path: "/var/lib/banker/game.json"
  default_withdraw_limit: 5
  enforce_withdraw_limit: true

server:
  host: "0.0.0.0"
  port: 9000

logging:
  level: "debug"
  json: true

service:
  queue_capacity: 8
"#;
        let config = BankerConfig::parse(yaml);
        assert!(config.is_ok());
        if let Ok(c) = config {
            assert_eq!(c.game.snapshot_path, PathBuf::from("/var/lib/banker/game.json"));
            assert_eq!(c.game.default_withdraw_limit, 5);
            assert!(c.game.enforce_withdraw_limit);
            assert_eq!(c.server.port, 9000);
            assert!(c.logging.json);
            assert_eq!(c.service.queue_capacity, 8);
        }
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = BankerConfig::parse("game:\n  enforce_withdraw_limit: true\n");
        assert!(config.is_ok());
        if let Ok(c) = config {
            assert!(c.game.enforce_withdraw_limit);
            assert_eq!(c.game.default_withdraw_limit, 2);
            assert_eq!(c.server, ServerConfig::default());
        }
    }

    #[test]
    fn empty_yaml_is_default() {
        assert!(matches!(BankerConfig::parse(""), Ok(c) if c == BankerConfig::default()));
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(matches!(
            BankerConfig::parse("game: [unclosed"),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn base_path_names_a_directory() {
        let mut config = BankerConfig::default();
        config.apply_env_overrides(env(&[("BASE_PATH", "/srv/bot")]));
        assert_eq!(config.game.snapshot_path, PathBuf::from("/srv/bot/game.json"));
    }

    #[test]
    fn explicit_snapshot_path_wins_over_base_path() {
        let mut config = BankerConfig::default();
        config.apply_env_overrides(env(&[
            ("BASE_PATH", "/srv/bot"),
            ("BANKER_SNAPSHOT_PATH", "/tmp/other.json"),
        ]));
        assert_eq!(config.game.snapshot_path, PathBuf::from("/tmp/other.json"));
    }

    #[test]
    fn port_override_ignores_garbage() {
        let mut config = BankerConfig::default();
        config.apply_env_overrides(env(&[("BANKER_PORT", "9123")]));
        assert_eq!(config.server.port, 9123);

        config.apply_env_overrides(env(&[("BANKER_PORT", "not-a-port")]));
        assert_eq!(config.server.port, 9123);
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let shipped = BankerConfig::parse(include_str!("../../../banker-config.yaml"));
        assert!(matches!(shipped, Ok(ref c) if *c == BankerConfig::default()));
    }

    #[test]
    fn operators_come_from_yaml_or_env() {
        let config = BankerConfig::parse("game:\n  operators: [100, 101]\n");
        assert!(matches!(
            config,
            Ok(ref c) if c.game.operators == vec![PlayerId(100), PlayerId(101)]
        ));

        let mut config = BankerConfig::default();
        config.apply_env_overrides(env(&[("BANKER_OPERATORS", " 7, 8 ,")]));
        assert_eq!(config.game.operators, vec![PlayerId(7), PlayerId(8)]);

        config.apply_env_overrides(env(&[("BANKER_OPERATORS", "7,moderator")]));
        assert_eq!(config.game.operators, vec![PlayerId(7), PlayerId(8)]);
    }
}
