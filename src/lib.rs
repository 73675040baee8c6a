//! Edu Notify - 学习平台客户端的应用内通知核心

pub mod cli;
pub mod config;
pub mod notification;

pub use config::{NotifyConfig, DEFAULT_MAX_VISIBLE};
pub use notification::{
    bind_global, current_store, notify_error, notify_info, notify_success, notify_warning,
    report_api_failure, ApiFailure, DispatchOptions, NotificationDetails, NotificationDispatcher,
    NotificationHistory, NotificationId, NotificationKind, NotificationOptions,
    NotificationRecord, NotificationSink, NotificationStore, ToastRenderer,
};
