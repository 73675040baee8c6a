//! Demo 命令 - 绑定存储、模拟多个通知来源并输出渲染帧

use anyhow::Result;
use clap::Args;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::info;

use crate::config::NotifyConfig;
use crate::notification::{
    bind_global, notify_info, notify_success, notify_warning, report_api_failure, ApiFailure,
    DispatchOptions, NotificationStore, ToastRenderer,
};

/// Demo 命令参数
#[derive(Args)]
pub struct DemoArgs {
    /// 额外连续发送的提示数量（用于观察容量淘汰）
    #[arg(long, default_value = "3")]
    pub flood: usize,

    /// 自动关闭时长（毫秒）
    #[arg(long, default_value = "1500")]
    pub duration_ms: u64,

    /// 最长运行时间（秒）
    #[arg(long, default_value = "10")]
    pub seconds: u64,
}

/// 警告通知停留时间是普通通知的两倍
fn warning_duration_ms(duration_ms: u64) -> u64 {
    duration_ms.saturating_mul(2)
}

/// 处理 demo 命令
pub async fn handle_demo(args: DemoArgs, config: NotifyConfig) -> Result<()> {
    let store = NotificationStore::from_config(&config);
    bind_global(store.clone());
    info!(capacity = store.capacity(), "Notification store bound");

    let mut renderer = ToastRenderer::new(store.clone());
    let render_task = tokio::spawn(async move {
        let mut frame_no = 0usize;
        while let Ok(frame) = renderer.next_frame().await {
            frame_no += 1;
            println!("──── frame {} ────", frame_no);
            match frame {
                Some(text) => println!("{}\n", text),
                None => println!("(无通知)\n"),
            }
        }
    });

    let timed = DispatchOptions::default().duration_ms(args.duration_ms);

    notify_success("作业已提交", Some("提交成功"), timed.clone());
    sleep(Duration::from_millis(200)).await;

    report_api_failure(
        &ApiFailure::new(Some(503), "积分兑换暂时不可用")
            .with_body(serde_json::json!({"code": "REWARD_UNAVAILABLE", "retry_after": 30})),
    );
    sleep(Duration::from_millis(200)).await;

    notify_warning(
        "学习路径即将到期",
        None,
        timed.clone().duration_ms(warning_duration_ms(args.duration_ms)),
    );
    sleep(Duration::from_millis(200)).await;

    for i in 1..=args.flood {
        notify_info(format!("新测验已发布 #{}", i), None, timed.clone());
    }

    // 等到只剩不自动关闭的通知
    let settle = async {
        loop {
            if store.pending_timers() == 0 {
                break;
            }
            sleep(Duration::from_millis(100)).await;
        }
    };
    if timeout(Duration::from_secs(args.seconds), settle).await.is_err() {
        info!("Demo timed out with notifications still pending");
    }

    // 让渲染任务输出最后一帧
    sleep(Duration::from_millis(50)).await;
    render_task.abort();

    println!("剩余通知: {}", store.len());
    Ok(())
}
