//! 应用内通知 - 有容量上限、自动过期的通知队列
//!
//! # 组成
//! 1. `NotificationStore`：持有活动列表，负责容量限制和自动过期
//! 2. `NotificationDispatcher`：全局入口，非渲染代码（如接口错误处理）通过它发送通知
//! 3. `render`：渲染层契约，只读列表，通过 `remove` 关闭通知
//!
//! # 使用示例
//! ```ignore
//! use edu_notify::notification::{bind_global, notify_error, DispatchOptions, NotificationStore};
//!
//! let store = NotificationStore::new();
//! bind_global(store.clone());
//!
//! notify_error("保存失败", Some("Error"), DispatchOptions::default());
//! assert_eq!(store.len(), 1);
//! ```

pub mod dispatcher;
pub mod history;
pub mod kind;
pub mod record;
pub mod render;
pub mod reporter;
pub mod scope;
pub mod store;

pub use dispatcher::{
    bind_global, notify_error, notify_info, notify_success, notify_warning, DispatchOptions,
    NotificationDispatcher, NotificationSink,
};
pub use history::NotificationHistory;
pub use kind::NotificationKind;
pub use record::{
    NotificationDetails, NotificationId, NotificationOptions, NotificationRecord,
    DEFAULT_DURATION_MS,
};
pub use render::{render_active, render_record, ToastRenderer};
pub use reporter::{report_api_failure, report_api_failure_to, ApiFailure};
pub use scope::current_store;
pub use store::NotificationStore;
