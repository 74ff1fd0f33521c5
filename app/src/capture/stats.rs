use super::CaptureMessage;
use serde::Serialize;
use std::fmt;

/// 一次采集会话的统计
#[derive(Debug, Clone, Default, Serialize)]
pub struct CaptureStats {
    pub total: usize,
    pub captured: usize,
    pub missed: usize,
    pub skipped: usize,
    /// 成功配对累计等待时间（毫秒）
    pub total_wait_ms: u64,
    pub total_time: String,
    pub output_dir: String,
}

impl CaptureStats {
    /// 根据会话消息更新计数
    pub fn record(&mut self, message: &CaptureMessage) {
        match message {
            CaptureMessage::Started { total, output_dir } => {
                self.total = *total;
                self.output_dir = output_dir.clone();
            }
            CaptureMessage::Paired(record) => {
                self.captured += 1;
                self.total_wait_ms += record.waited_ms;
            }
            CaptureMessage::Missed { .. } => self.missed += 1,
            CaptureMessage::Skipped { .. } => self.skipped += 1,
            CaptureMessage::Prompt { .. } | CaptureMessage::Complete => {}
        }
    }

    /// 已处理（成功、失败或跳过）的原图数量
    pub fn processed(&self) -> usize {
        self.captured + self.missed + self.skipped
    }

    pub fn average_wait_secs(&self) -> f64 {
        if self.captured == 0 {
            return 0.0;
        }
        self.total_wait_ms as f64 / self.captured as f64 / 1000.0
    }
}

impl fmt::Display for CaptureStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<18}{}", "Originals:", self.total)?;
        writeln!(f, "{:<18}{}", "Captured:", self.captured)?;
        writeln!(f, "{:<18}{}", "Missed:", self.missed)?;
        writeln!(f, "{:<18}{}", "Skipped:", self.skipped)?;
        writeln!(f, "{:<18}{:.1}s", "Average wait:", self.average_wait_secs())?;
        writeln!(f, "{:<18}{}", "Output:", self.output_dir)?;
        write!(f, "{:<18}{}", "Total time:", self.total_time)
    }
}
