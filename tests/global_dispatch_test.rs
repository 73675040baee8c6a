//! 全局分发器测试 - 未绑定丢弃、绑定后转发、重新绑定
//!
//! 全局状态在同一进程内共享，所以整个生命周期放在一个测试里按顺序验证。

use edu_notify::{
    bind_global, notify_error, notify_info, notify_success, notify_warning, report_api_failure,
    ApiFailure, DispatchOptions, NotificationDetails, NotificationDispatcher, NotificationKind,
    NotificationStore,
};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_global_dispatch_lifecycle() {
    // Given: 尚未绑定
    assert!(!NotificationDispatcher::global().is_bound());

    // When: 绑定前发送
    // Then: 返回 None，不 panic
    assert_eq!(notify_success("too early", None, DispatchOptions::default()), None);
    assert_eq!(notify_error("too early", None, DispatchOptions::default()), None);

    // When: 绑定后发送
    let store = NotificationStore::new();
    bind_global(store.clone());
    assert!(NotificationDispatcher::global().is_bound());

    let id = notify_success("saved", None, DispatchOptions::default()).unwrap();
    assert_eq!(store.len(), 1);
    assert!(store.contains(id));

    // error 默认不自动关闭，超过 10 秒仍在
    let error_id = notify_error("upload failed", None, DispatchOptions::default()).unwrap();
    let record = store.active().into_iter().find(|r| r.id == error_id).unwrap();
    assert_eq!(record.kind, NotificationKind::Error);
    assert!(!record.auto_expire);

    tokio::time::sleep(Duration::from_millis(10_500)).await;
    assert!(store.contains(error_id));
    assert!(!store.contains(id));

    // 结构化详情原样保留
    let detail_id = notify_warning(
        "quota low",
        Some("Quota"),
        DispatchOptions::default().details(serde_json::json!({"code": "X"})),
    )
    .unwrap();
    let record = store.active().into_iter().find(|r| r.id == detail_id).unwrap();
    assert_eq!(
        record.details,
        Some(NotificationDetails::Structured(serde_json::json!({"code": "X"})))
    );

    // 接口错误拦截器走同一个全局入口
    let api_id = report_api_failure(&ApiFailure::new(Some(401), "请重新登录")).unwrap();
    let record = store.active().into_iter().find(|r| r.id == api_id).unwrap();
    assert_eq!(record.display_title(), "Session expired");

    // When: 重新绑定到另一个存储
    let next = NotificationStore::new();
    bind_global(next.clone());
    let before = store.len();
    notify_info("to next store", None, DispatchOptions::default().auto_close(false)).unwrap();

    // Then: 只有新存储收到
    assert_eq!(store.len(), before);
    assert_eq!(next.len(), 1);
}
