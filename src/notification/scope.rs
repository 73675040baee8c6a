//! 当前存储作用域 - 在任务内访问"当前"通知存储
//!
//! 渲染层和页面代码在 `NotificationStore::scope` 内运行，通过
//! `current_store()` 取得存储；在作用域外访问属于集成错误，立即返回 Err。

use anyhow::{anyhow, Result};
use std::future::Future;

use super::store::NotificationStore;

tokio::task_local! {
    static CURRENT_STORE: NotificationStore;
}

impl NotificationStore {
    /// 以本存储为当前存储运行 future
    pub async fn scope<F: Future>(&self, f: F) -> F::Output {
        CURRENT_STORE.scope(self.clone(), f).await
    }

    /// 同步版本
    pub fn sync_scope<R>(&self, f: impl FnOnce() -> R) -> R {
        CURRENT_STORE.sync_scope(self.clone(), f)
    }
}

/// 获取当前作用域内的存储
pub fn current_store() -> Result<NotificationStore> {
    CURRENT_STORE
        .try_with(|store| store.clone())
        .map_err(|_| anyhow!("notification store accessed outside of a NotificationStore scope"))
}
