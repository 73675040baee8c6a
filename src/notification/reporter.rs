//! 接口错误上报 - 服务层错误拦截器通过全局分发器通知用户

use serde::{Deserialize, Serialize};

use super::dispatcher::{DispatchOptions, NotificationDispatcher};
use super::record::NotificationId;

/// 一次失败的服务调用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiFailure {
    /// HTTP 状态码；网络层失败时为空
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// 给用户看的错误信息
    pub message: String,
    /// 响应体（原样作为详情展示）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

impl ApiFailure {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// 按状态码选择标题
    pub fn title(&self) -> &'static str {
        match self.status {
            None => "Network error",
            Some(401) => "Session expired",
            Some(403) => "Permission denied",
            Some(404) => "Not found",
            Some(s) if s >= 500 => "Server error",
            Some(_) => "Request failed",
        }
    }
}

/// 通过指定分发器上报
pub fn report_api_failure_to(
    dispatcher: &NotificationDispatcher,
    failure: &ApiFailure,
) -> Option<NotificationId> {
    let mut options = DispatchOptions::default();
    if let Some(body) = &failure.body {
        options = options.details(body.clone());
    }
    dispatcher.error(failure.message.clone(), Some(failure.title()), options)
}

/// 通过全局分发器上报；分发器未绑定时静默丢弃
pub fn report_api_failure(failure: &ApiFailure) -> Option<NotificationId> {
    report_api_failure_to(NotificationDispatcher::global(), failure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::kind::NotificationKind;
    use crate::notification::record::NotificationDetails;
    use crate::notification::store::NotificationStore;

    #[test]
    fn test_title_by_status() {
        assert_eq!(ApiFailure::new(None, "x").title(), "Network error");
        assert_eq!(ApiFailure::new(Some(401), "x").title(), "Session expired");
        assert_eq!(ApiFailure::new(Some(403), "x").title(), "Permission denied");
        assert_eq!(ApiFailure::new(Some(404), "x").title(), "Not found");
        assert_eq!(ApiFailure::new(Some(502), "x").title(), "Server error");
        assert_eq!(ApiFailure::new(Some(422), "x").title(), "Request failed");
    }

    #[test]
    fn test_report_creates_persistent_error() {
        let dispatcher = NotificationDispatcher::new();
        let store = NotificationStore::new();
        dispatcher.bind(store.clone());

        let failure = ApiFailure::new(Some(500), "保存失败")
            .with_body(serde_json::json!({"error": "db timeout"}));
        let id = report_api_failure_to(&dispatcher, &failure).unwrap();

        let record = store.active().into_iter().find(|r| r.id == id).unwrap();
        assert_eq!(record.kind, NotificationKind::Error);
        assert!(!record.auto_expire);
        assert_eq!(record.display_title(), "Server error");
        assert_eq!(
            record.details,
            Some(NotificationDetails::Structured(serde_json::json!({"error": "db timeout"})))
        );
    }

    #[test]
    fn test_report_unbound_is_silent() {
        let dispatcher = NotificationDispatcher::new();
        let failure = ApiFailure::new(None, "offline");
        assert_eq!(report_api_failure_to(&dispatcher, &failure), None);
    }
}
