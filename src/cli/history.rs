//! History 命令 - 查看通知历史

use anyhow::{anyhow, Result};
use clap::Args;

use super::output::format_records;
use crate::config::NotifyConfig;
use crate::notification::NotificationHistory;

/// History 命令参数
#[derive(Args)]
pub struct HistoryArgs {
    /// 显示最近 N 条
    #[arg(long, short, default_value = "20")]
    pub limit: usize,

    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,
}

/// 处理 history 命令
pub fn handle_history(args: HistoryArgs, config: &NotifyConfig) -> Result<()> {
    let path = config
        .history_path
        .as_ref()
        .ok_or_else(|| anyhow!("未配置通知历史文件，请设置 history_path 或 EDU_NOTIFY_HISTORY"))?;

    let records = NotificationHistory::new(path).read_recent(args.limit);
    println!("{}", format_records(&records, args.json));
    Ok(())
}
