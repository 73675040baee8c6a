//! 通知历史 - 本地 JSONL 调试日志

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::record::NotificationRecord;

const MAX_ENTRIES: usize = 200;
const KEEP_AFTER_CLEANUP: usize = 100;
const CLEANUP_CHECK_INTERVAL: usize = 10;

/// 通知历史（每行一条 JSON 记录）
#[derive(Debug)]
pub struct NotificationHistory {
    path: PathBuf,
    write_count: AtomicUsize,
}

impl NotificationHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_count: AtomicUsize::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 追加记录（带文件锁）；文件被其他写入方锁住时直接返回 Err，不等待
    pub fn append(&self, record: &NotificationRecord) -> Result<()> {
        use fs2::FileExt;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.try_lock_exclusive()
            .with_context(|| format!("History file {} is locked", self.path.display()))?;
        let mut file = file;
        writeln!(file, "{}", serde_json::to_string(record)?)?;
        file.unlock()?;

        self.maybe_cleanup();

        Ok(())
    }

    /// 读取最近 N 条记录（按创建时间排序）
    pub fn read_recent(&self, n: usize) -> Vec<NotificationRecord> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(_) => return Vec::new(),
        };

        let records = Self::parse_lines(BufReader::new(file));
        let start = records.len().saturating_sub(n);
        let mut recent = records[start..].to_vec();
        recent.sort_by_key(|r| r.created_at);
        recent
    }

    fn parse_lines(reader: impl BufRead) -> Vec<NotificationRecord> {
        reader
            .lines()
            .map_while(|line| line.ok())
            .filter_map(|line| serde_json::from_str(&line).ok())
            .collect()
    }

    fn maybe_cleanup(&self) {
        let count = self.write_count.fetch_add(1, Ordering::Relaxed);
        if count % CLEANUP_CHECK_INTERVAL != 0 {
            return;
        }

        if let Err(e) = self.cleanup() {
            tracing::warn!(path = %self.path.display(), error = %e, "History cleanup failed");
        }
    }

    /// 超过上限时只保留最近的记录
    fn cleanup(&self) -> Result<()> {
        use fs2::FileExt;

        let file = File::open(&self.path)?;
        if file.try_lock_exclusive().is_err() {
            tracing::debug!(path = %self.path.display(), "History file busy, skipping cleanup");
            return Ok(());
        }

        let records = Self::parse_lines(BufReader::new(&file));
        if records.len() <= MAX_ENTRIES {
            file.unlock()?;
            return Ok(());
        }

        let start = records.len().saturating_sub(KEEP_AFTER_CLEANUP);
        let temp_path = self.path.with_extension("tmp");
        {
            let mut temp_file = File::create(&temp_path)?;
            for record in &records[start..] {
                writeln!(temp_file, "{}", serde_json::to_string(record)?)?;
            }
        }

        fs::rename(&temp_path, &self.path)?;

        file.unlock()?;
        Ok(())
    }
}
