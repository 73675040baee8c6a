//! 通知分发器 - 让渲染树之外的代码也能发送通知
//!
//! 分发器只持有一个 `NotificationSink`（通常是当前存储），不保存任何列表状态。
//! 未绑定时发送是空操作，只记录警告，不会让调用方出错。

use std::sync::{Arc, LazyLock, RwLock};

use tracing::{info, warn};

use super::kind::NotificationKind;
use super::record::{NotificationDetails, NotificationId, NotificationOptions};
use super::store::NotificationStore;

/// 通知接收端 - 分发器转发的目标
pub trait NotificationSink: Send + Sync {
    fn add(&self, options: NotificationOptions) -> NotificationId;
}

impl NotificationSink for NotificationStore {
    fn add(&self, options: NotificationOptions) -> NotificationId {
        NotificationStore::add(self, options)
    }
}

impl<F> NotificationSink for F
where
    F: Fn(NotificationOptions) -> NotificationId + Send + Sync,
{
    fn add(&self, options: NotificationOptions) -> NotificationId {
        self(options)
    }
}

/// 分类快捷方法的可选参数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchOptions {
    /// 是否自动关闭（缺省按类型：error 不自动关闭）
    pub auto_close: Option<bool>,
    /// 自动关闭时长（毫秒）
    pub duration_ms: Option<u64>,
    pub details: Option<NotificationDetails>,
}

impl DispatchOptions {
    pub fn auto_close(mut self, auto_close: bool) -> Self {
        self.auto_close = Some(auto_close);
        self
    }

    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn details(mut self, details: impl Into<NotificationDetails>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// 通知分发器
#[derive(Default)]
pub struct NotificationDispatcher {
    sink: RwLock<Option<Arc<dyn NotificationSink>>>,
}

static GLOBAL_DISPATCHER: LazyLock<NotificationDispatcher> =
    LazyLock::new(NotificationDispatcher::new);

impl NotificationDispatcher {
    /// 创建未绑定的分发器
    pub fn new() -> Self {
        Self {
            sink: RwLock::new(None),
        }
    }

    /// 进程级全局分发器
    pub fn global() -> &'static NotificationDispatcher {
        &GLOBAL_DISPATCHER
    }

    /// 绑定接收端；再次绑定会直接替换之前的目标
    pub fn bind(&self, sink: impl NotificationSink + 'static) {
        self.bind_shared(Arc::new(sink));
    }

    /// 绑定已共享的接收端
    pub fn bind_shared(&self, sink: Arc<dyn NotificationSink>) {
        let mut guard = self.sink.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        if guard.is_some() {
            info!("Rebinding notification dispatcher");
        } else {
            info!("Binding notification dispatcher");
        }
        *guard = Some(sink);
    }

    pub fn is_bound(&self) -> bool {
        self.sink
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }

    /// 转发完整请求；未绑定时返回 None
    pub fn dispatch(&self, options: NotificationOptions) -> Option<NotificationId> {
        // 先 clone 出 Arc 再释放读锁，接收端内部可能再次调用分发器
        let sink = self
            .sink
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();

        match sink {
            Some(sink) => Some(sink.add(options)),
            None => {
                warn!(
                    kind = %options.kind,
                    text = %options.message,
                    "Notification dispatcher is not bound, dropping notification"
                );
                None
            }
        }
    }

    /// 按类型构建请求并发送
    pub fn notify(
        &self,
        kind: NotificationKind,
        message: impl Into<String>,
        title: Option<&str>,
        options: DispatchOptions,
    ) -> Option<NotificationId> {
        let request = NotificationOptions {
            kind,
            message: message.into(),
            title: title.map(str::to_string),
            details: options.details,
            auto_expire: Some(options.auto_close.unwrap_or_else(|| kind.default_auto_expire())),
            duration_ms: options.duration_ms,
        };
        self.dispatch(request)
    }

    pub fn success(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
        options: DispatchOptions,
    ) -> Option<NotificationId> {
        self.notify(NotificationKind::Success, message, title, options)
    }

    pub fn error(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
        options: DispatchOptions,
    ) -> Option<NotificationId> {
        self.notify(NotificationKind::Error, message, title, options)
    }

    pub fn warning(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
        options: DispatchOptions,
    ) -> Option<NotificationId> {
        self.notify(NotificationKind::Warning, message, title, options)
    }

    pub fn info(
        &self,
        message: impl Into<String>,
        title: Option<&str>,
        options: DispatchOptions,
    ) -> Option<NotificationId> {
        self.notify(NotificationKind::Info, message, title, options)
    }
}

/// 绑定全局分发器（应用启动时调用一次）
pub fn bind_global(sink: impl NotificationSink + 'static) {
    NotificationDispatcher::global().bind(sink);
}

/// 便捷函数：通过全局分发器发送成功通知
pub fn notify_success(
    message: impl Into<String>,
    title: Option<&str>,
    options: DispatchOptions,
) -> Option<NotificationId> {
    NotificationDispatcher::global().success(message, title, options)
}

/// 便捷函数：通过全局分发器发送错误通知
pub fn notify_error(
    message: impl Into<String>,
    title: Option<&str>,
    options: DispatchOptions,
) -> Option<NotificationId> {
    NotificationDispatcher::global().error(message, title, options)
}

/// 便捷函数：通过全局分发器发送警告通知
pub fn notify_warning(
    message: impl Into<String>,
    title: Option<&str>,
    options: DispatchOptions,
) -> Option<NotificationId> {
    NotificationDispatcher::global().warning(message, title, options)
}

/// 便捷函数：通过全局分发器发送提示通知
pub fn notify_info(
    message: impl Into<String>,
    title: Option<&str>,
    options: DispatchOptions,
) -> Option<NotificationId> {
    NotificationDispatcher::global().info(message, title, options)
}
