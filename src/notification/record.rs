//! 通知数据模型 - 创建请求与已存储记录

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::kind::NotificationKind;

/// 未指定时长时的默认自动关闭时间（毫秒）
pub const DEFAULT_DURATION_MS: u64 = 5000;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// 通知 ID（进程内唯一，不复用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(u64);

impl NotificationId {
    /// 分配一个新的 ID
    pub fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "notif-{}", self.0)
    }
}

/// 附加详情：纯文本或结构化 JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NotificationDetails {
    Text(String),
    Structured(serde_json::Value),
}

impl NotificationDetails {
    /// 用于展示的文本（结构化内容格式化为 JSON）
    pub fn display_text(&self) -> String {
        match self {
            NotificationDetails::Text(text) => text.clone(),
            NotificationDetails::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }
}

impl From<String> for NotificationDetails {
    fn from(text: String) -> Self {
        NotificationDetails::Text(text)
    }
}

impl From<&str> for NotificationDetails {
    fn from(text: &str) -> Self {
        NotificationDetails::Text(text.to_string())
    }
}

impl From<serde_json::Value> for NotificationDetails {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => NotificationDetails::Text(text),
            other => NotificationDetails::Structured(other),
        }
    }
}

/// 通知创建请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationOptions {
    /// 通知类型
    pub kind: NotificationKind,
    /// 消息内容
    pub message: String,
    /// 标题（缺省时由类型决定）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// 附加详情
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<NotificationDetails>,
    /// 是否自动关闭（缺省为 true）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_expire: Option<bool>,
    /// 自动关闭时长（毫秒，缺省 5000）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl NotificationOptions {
    /// 创建简单请求
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            title: None,
            details: None,
            auto_expire: None,
            duration_ms: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }

    /// 设置标题
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// 设置详情
    pub fn with_details(mut self, details: impl Into<NotificationDetails>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// 设置是否自动关闭
    pub fn with_auto_expire(mut self, auto_expire: bool) -> Self {
        self.auto_expire = Some(auto_expire);
        self
    }

    /// 设置自动关闭时长
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

/// 已存储的通知记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<NotificationDetails>,
    pub auto_expire: bool,
    pub duration_ms: u64,
    /// 仅用于展示排序和调试，不参与过期计时
    pub created_at: DateTime<Utc>,
}

impl NotificationRecord {
    /// 从请求构建记录，补全默认值
    pub fn from_options(options: NotificationOptions, default_duration_ms: u64) -> Self {
        Self {
            id: NotificationId::next(),
            kind: options.kind,
            message: options.message,
            title: options.title,
            details: options.details,
            auto_expire: options.auto_expire.unwrap_or(true),
            duration_ms: options.duration_ms.unwrap_or(default_duration_ms),
            created_at: Utc::now(),
        }
    }

    /// 展示标题
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .unwrap_or_else(|| self.kind.default_title())
    }

    /// 自动关闭时长，不自动关闭时为 None
    pub fn expiry(&self) -> Option<Duration> {
        self.auto_expire
            .then(|| Duration::from_millis(self.duration_ms))
    }
}
