//! 通知存储 - 活动通知列表、容量限制与自动过期
//!
//! 列表按新到旧排列。超过容量时直接丢弃尾部（最旧）记录，即使它们的
//! 过期计时还没到；被丢弃记录的计时器会被取消，即使晚到触发也只是空操作。

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

use super::history::NotificationHistory;
use super::record::{NotificationId, NotificationOptions, NotificationRecord};
use crate::config::NotifyConfig;

/// 通知存储（可廉价 clone，所有 clone 共享同一列表）
#[derive(Clone)]
pub struct NotificationStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    capacity: usize,
    default_duration_ms: u64,
    state: Mutex<StoreState>,
    /// 活动列表快照，供渲染层订阅
    active_tx: watch::Sender<Vec<NotificationRecord>>,
    runtime: Option<Handle>,
    history: Option<Arc<NotificationHistory>>,
}

#[derive(Default)]
struct StoreState {
    records: Vec<NotificationRecord>,
    timers: HashMap<NotificationId, AbortHandle>,
}

impl NotificationStore {
    /// 使用默认配置创建
    pub fn new() -> Self {
        Self::from_config(&NotifyConfig::default())
    }

    /// 指定容量创建
    pub fn with_max_visible(max_visible: usize) -> Self {
        Self::from_config(&NotifyConfig {
            max_visible,
            ..Default::default()
        })
    }

    /// 根据配置创建
    ///
    /// 在 tokio runtime 内创建时会记住当前 runtime，作为 runtime 外线程调用
    /// `add` 时调度过期任务的备用 runtime。
    pub fn from_config(config: &NotifyConfig) -> Self {
        let (active_tx, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(StoreInner {
                capacity: config.max_visible.max(1),
                default_duration_ms: config.default_duration_ms,
                state: Mutex::new(StoreState::default()),
                active_tx,
                runtime: Handle::try_current().ok(),
                history: config
                    .history_path
                    .as_ref()
                    .map(|path| Arc::new(NotificationHistory::new(path))),
            }),
        }
    }

    /// 容量上限
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// 添加通知，返回新 ID
    pub fn add(&self, options: NotificationOptions) -> NotificationId {
        let record = NotificationRecord::from_options(options, self.inner.default_duration_ms);
        let id = record.id;
        let expiry = record.expiry();

        self.write_history(&record);

        debug!(id = %id, kind = %record.kind, auto_expire = record.auto_expire, "Adding notification");

        let mut state = self.lock_state();
        state.records.insert(0, record);

        if state.records.len() > self.inner.capacity {
            let evicted = state.records.split_off(self.inner.capacity);
            for record in evicted {
                if let Some(timer) = state.timers.remove(&record.id) {
                    timer.abort();
                }
                debug!(id = %record.id, "Evicted notification over capacity");
            }
        }

        if let Some(delay) = expiry {
            if let Some(timer) = self.schedule_expiry(id, delay) {
                state.timers.insert(id, timer);
            }
        }

        self.publish(&state);
        id
    }

    /// 移除通知；ID 不存在时为空操作
    pub fn remove(&self, id: NotificationId) {
        let mut state = self.lock_state();
        if let Some(timer) = state.timers.remove(&id) {
            timer.abort();
        }
        if Self::take_record(&mut state, id) {
            debug!(id = %id, "Removed notification");
            self.publish(&state);
        }
    }

    /// 清空所有通知
    pub fn clear(&self) {
        let mut state = self.lock_state();
        for (_, timer) in state.timers.drain() {
            timer.abort();
        }
        if !state.records.is_empty() {
            debug!(count = state.records.len(), "Clearing notifications");
            state.records.clear();
            self.publish(&state);
        }
    }

    /// 当前活动列表（新到旧）
    pub fn active(&self) -> Vec<NotificationRecord> {
        self.lock_state().records.clone()
    }

    pub fn len(&self) -> usize {
        self.lock_state().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_state().records.is_empty()
    }

    pub fn contains(&self, id: NotificationId) -> bool {
        self.lock_state().records.iter().any(|r| r.id == id)
    }

    /// 订阅活动列表变化
    pub fn subscribe(&self) -> watch::Receiver<Vec<NotificationRecord>> {
        self.inner.active_tx.subscribe()
    }

    /// 当前仍在等待的过期计时器数量
    pub fn pending_timers(&self) -> usize {
        self.lock_state().timers.len()
    }

    /// 过期计时器触发
    fn expire(&self, id: NotificationId) {
        let mut state = self.lock_state();
        state.timers.remove(&id);
        if Self::take_record(&mut state, id) {
            debug!(id = %id, "Notification expired");
            self.publish(&state);
        }
    }

    fn schedule_expiry(&self, id: NotificationId, delay: Duration) -> Option<AbortHandle> {
        // 优先使用调用方所在的 runtime，创建时记住的 runtime 可能已经关闭
        let runtime = match self.runtime() {
            Some(handle) => handle,
            None => {
                warn!(id = %id, "No tokio runtime available, notification will not auto-expire");
                return None;
            }
        };

        let weak: Weak<StoreInner> = Arc::downgrade(&self.inner);
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                NotificationStore { inner }.expire(id);
            }
        });
        Some(task.abort_handle())
    }

    fn runtime(&self) -> Option<Handle> {
        Handle::try_current()
            .ok()
            .or_else(|| self.inner.runtime.clone())
    }

    /// 写历史记录；有 runtime 时放到阻塞线程池，不占用调用方
    fn write_history(&self, record: &NotificationRecord) {
        let Some(history) = self.inner.history.clone() else {
            return;
        };

        let record = record.clone();
        let write = move || {
            if let Err(e) = history.append(&record) {
                warn!(path = %history.path().display(), error = %e, "Failed to write notification history");
            }
        };

        match self.runtime() {
            Some(handle) => {
                handle.spawn_blocking(write);
            }
            None => write(),
        }
    }

    fn take_record(state: &mut StoreState, id: NotificationId) -> bool {
        let before = state.records.len();
        state.records.retain(|r| r.id != id);
        state.records.len() != before
    }

    fn publish(&self, state: &StoreState) {
        self.inner.active_tx.send_replace(state.records.clone());
    }

    fn lock_state(&self) -> MutexGuard<'_, StoreState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NotificationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationStore")
            .field("capacity", &self.inner.capacity)
            .field("active", &self.len())
            .finish()
    }
}
