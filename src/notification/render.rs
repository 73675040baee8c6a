//! 通知渲染 - 把活动列表渲染为终端文本
//!
//! 渲染层只读取存储的活动列表，关闭通知必须调用 `NotificationStore::remove`。

use tokio::sync::watch;

use super::record::{NotificationId, NotificationRecord};
use super::store::NotificationStore;

/// 渲染单条通知
pub fn render_record(record: &NotificationRecord) -> String {
    let mut out = format!(
        "{} [{}] {}\n   {}",
        record.kind.icon(),
        record.created_at.format("%H:%M:%S"),
        record.display_title(),
        record.message
    );

    if let Some(details) = &record.details {
        out.push_str("\n   ▸ 详情:");
        for line in details.display_text().lines() {
            out.push_str("\n     ");
            out.push_str(line);
        }
    }

    out
}

/// 渲染整个活动列表；列表为空时不产生任何输出
pub fn render_active(records: &[NotificationRecord]) -> Option<String> {
    if records.is_empty() {
        return None;
    }

    Some(
        records
            .iter()
            .map(render_record)
            .collect::<Vec<_>>()
            .join("\n\n"),
    )
}

/// 跟随存储变化重新渲染
pub struct ToastRenderer {
    store: NotificationStore,
    rx: watch::Receiver<Vec<NotificationRecord>>,
}

impl ToastRenderer {
    pub fn new(store: NotificationStore) -> Self {
        let rx = store.subscribe();
        Self { store, rx }
    }

    /// 当前帧
    pub fn frame(&mut self) -> Option<String> {
        render_active(&self.rx.borrow_and_update())
    }

    /// 等待下一次变化后返回新帧；存储被释放时返回 Err
    pub async fn next_frame(&mut self) -> Result<Option<String>, watch::error::RecvError> {
        self.rx.changed().await?;
        Ok(self.frame())
    }

    /// 用户点击关闭
    pub fn dismiss(&self, id: NotificationId) {
        self.store.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::record::{NotificationOptions, DEFAULT_DURATION_MS};

    #[test]
    fn test_empty_list_renders_nothing() {
        assert_eq!(render_active(&[]), None);
    }

    #[test]
    fn test_default_title_used() {
        let record = NotificationRecord::from_options(
            NotificationOptions::error("request failed"),
            DEFAULT_DURATION_MS,
        );
        let text = render_record(&record);
        assert!(text.contains("Error"));
        assert!(text.contains("request failed"));
        assert!(!text.contains("详情"));
    }

    #[test]
    fn test_details_rendered() {
        let record = NotificationRecord::from_options(
            NotificationOptions::warning("quota")
                .with_title("Quota")
                .with_details(serde_json::json!({"code": "X"})),
            DEFAULT_DURATION_MS,
        );
        let text = render_record(&record);
        assert!(text.contains("Quota"));
        assert!(text.contains("详情"));
        assert!(text.contains("\"code\": \"X\""));
    }

    #[test]
    fn test_renderer_dismiss() {
        let store = NotificationStore::new();
        let id = store.add(NotificationOptions::info("bye").with_auto_expire(false));
        let mut renderer = ToastRenderer::new(store.clone());

        let frame = renderer.frame().unwrap();
        assert!(frame.contains("bye"));

        renderer.dismiss(id);
        assert!(store.is_empty());
        assert_eq!(renderer.frame(), None);
    }

    #[tokio::test]
    async fn test_next_frame_follows_store() {
        let store = NotificationStore::new();
        let mut renderer = ToastRenderer::new(store.clone());

        store.add(NotificationOptions::success("first").with_auto_expire(false));
        let frame = renderer.next_frame().await.unwrap().unwrap();
        assert!(frame.contains("first"));

        store.clear();
        assert_eq!(renderer.next_frame().await.unwrap(), None);
    }
}
