//! 配置加载 - 配置文件 + 环境变量覆盖

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::notification::record::DEFAULT_DURATION_MS;

/// 默认最多同时显示的通知数量
pub const DEFAULT_MAX_VISIBLE: usize = 5;

const ENV_MAX_VISIBLE: &str = "EDU_NOTIFY_MAX_VISIBLE";
const ENV_DURATION_MS: &str = "EDU_NOTIFY_DURATION_MS";
const ENV_HISTORY: &str = "EDU_NOTIFY_HISTORY";

/// 通知系统配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// 活动列表容量上限
    pub max_visible: usize,
    /// 默认自动关闭时长（毫秒）
    pub default_duration_ms: u64,
    /// 历史记录文件（JSONL），为空时不记录
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_path: Option<PathBuf>,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            max_visible: DEFAULT_MAX_VISIBLE,
            default_duration_ms: DEFAULT_DURATION_MS,
            history_path: None,
        }
    }
}

impl NotifyConfig {
    /// 默认配置文件路径 ~/.config/edu-notify/config.json
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("edu-notify")
            .join("config.json")
    }

    /// 从默认位置加载，并应用环境变量覆盖
    pub fn auto_load() -> Result<Self> {
        let mut config = Self::load_file(&Self::default_path())?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config.normalized())
    }

    /// 读取配置文件，文件不存在时返回默认配置
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// 应用环境变量覆盖；非法值会被忽略
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup(ENV_MAX_VISIBLE) {
            match raw.trim().parse::<usize>() {
                Ok(n) => self.max_visible = n,
                Err(_) => warn!(var = ENV_MAX_VISIBLE, value = %raw, "Ignoring invalid value"),
            }
        }

        if let Some(raw) = lookup(ENV_DURATION_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.default_duration_ms = ms,
                Err(_) => warn!(var = ENV_DURATION_MS, value = %raw, "Ignoring invalid value"),
            }
        }

        if let Some(raw) = lookup(ENV_HISTORY) {
            let raw = raw.trim();
            self.history_path = if raw.is_empty() {
                None
            } else {
                Some(PathBuf::from(raw))
            };
        }
    }

    /// 容量至少为 1
    pub fn normalized(mut self) -> Self {
        if self.max_visible == 0 {
            warn!("max_visible must be at least 1, clamping");
            self.max_visible = 1;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = NotifyConfig::default();
        assert_eq!(config.max_visible, 5);
        assert_eq!(config.default_duration_ms, 5000);
        assert!(config.history_path.is_none());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = NotifyConfig::load_file(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, NotifyConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"max_visible": 3}"#).unwrap();

        let config = NotifyConfig::load_file(&path).unwrap();
        assert_eq!(config.max_visible, 3);
        assert_eq!(config.default_duration_ms, 5000);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        assert!(NotifyConfig::load_file(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = NotifyConfig::default();
        config.apply_env(lookup_from(&[
            (ENV_MAX_VISIBLE, "8"),
            (ENV_DURATION_MS, "1500"),
            (ENV_HISTORY, "/tmp/history.jsonl"),
        ]));

        assert_eq!(config.max_visible, 8);
        assert_eq!(config.default_duration_ms, 1500);
        assert_eq!(config.history_path, Some(PathBuf::from("/tmp/history.jsonl")));
    }

    #[test]
    fn test_env_invalid_values_ignored() {
        let mut config = NotifyConfig::default();
        config.apply_env(lookup_from(&[(ENV_MAX_VISIBLE, "lots"), (ENV_DURATION_MS, "-1")]));

        assert_eq!(config.max_visible, 5);
        assert_eq!(config.default_duration_ms, 5000);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let config = NotifyConfig {
            max_visible: 0,
            ..Default::default()
        }
        .normalized();
        assert_eq!(config.max_visible, 1);
    }
}
