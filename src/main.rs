//! Edu Notify CLI
//!
//! 应用内通知核心的演示与调试工具

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use edu_notify::cli::{format_json, handle_demo, handle_history, DemoArgs, HistoryArgs};
use edu_notify::NotifyConfig;

#[derive(Parser)]
#[command(name = "edu-notify")]
#[command(about = "Edu Notify - 应用内通知队列演示与调试")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 绑定存储并模拟多个通知来源
    Demo(DemoArgs),
    /// 输出当前生效的配置
    Config,
    /// 查看通知历史
    History(HistoryArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("edu_notify=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();
    let config = NotifyConfig::auto_load()?;

    match cli.command {
        Commands::Demo(args) => handle_demo(args, config).await?,
        Commands::Config => println!("{}", format_json(&config)),
        Commands::History(args) => handle_history(args, &config)?,
    }

    Ok(())
}
