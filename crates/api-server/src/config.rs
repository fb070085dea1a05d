//! Runtime configuration read from the environment

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".todo-data";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid TODO_BIND_ADDR '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        source: AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
    /// `None` when audit logging is switched off
    pub audit_log: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("TODO_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let raw_addr = lookup("TODO_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .trim()
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: raw_addr.clone(),
                source,
            })?;

        let audit_log = if parse_flag(lookup("TODO_AUDIT_ENABLED"), true) {
            Some(
                lookup("TODO_AUDIT_LOG")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| data_dir.join("log.txt")),
            )
        } else {
            None
        };

        Ok(Self {
            data_dir,
            bind_addr,
            audit_log,
        })
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.data_dir.join("tasks.json")
    }
}

fn parse_flag(raw: Option<String>, default: bool) -> bool {
    match raw {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_without_variables() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".todo-data"));
        assert_eq!(config.bind_addr, "0.0.0.0:8000".parse().unwrap());
        assert_eq!(config.audit_log, Some(PathBuf::from(".todo-data/log.txt")));
        assert_eq!(config.tasks_path(), PathBuf::from(".todo-data/tasks.json"));
    }

    #[test]
    fn variables_override_defaults() {
        let config = config_from(&[
            ("TODO_DATA_DIR", "/var/lib/todo"),
            ("TODO_BIND_ADDR", "127.0.0.1:9000"),
            ("TODO_AUDIT_LOG", "/var/log/todo.log"),
        ])
        .unwrap();
        assert_eq!(config.tasks_path(), PathBuf::from("/var/lib/todo/tasks.json"));
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.audit_log, Some(PathBuf::from("/var/log/todo.log")));
    }

    #[test]
    fn audit_can_be_disabled() {
        let config = config_from(&[("TODO_AUDIT_ENABLED", "off")]).unwrap();
        assert!(config.audit_log.is_none());

        let config = config_from(&[("TODO_AUDIT_ENABLED", "maybe")]).unwrap();
        assert!(config.audit_log.is_some());
    }

    #[test]
    fn invalid_bind_addr_is_rejected() {
        let err = config_from(&[("TODO_BIND_ADDR", "localhost")]).unwrap_err();
        assert!(err.to_string().contains("localhost"));
    }
}
