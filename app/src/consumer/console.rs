use crate::capture::{CaptureMessage, CaptureStats};
use crate::consumer::Consumer;
use std::time::Instant;
use tokio::sync::broadcast;
use utils::error::Result;

/// 控制台消费者 - 给操作者的提示与最终统计
pub struct ConsoleConsumer;

fn now() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

#[async_trait::async_trait]
impl Consumer for ConsoleConsumer {
    async fn start(
        &mut self, mut receiver: broadcast::Receiver<CaptureMessage>,
    ) -> Result<tokio::task::JoinHandle<Result<()>>> {
        let handle = tokio::spawn(async move {
            let start_time = Instant::now();
            let mut stats = CaptureStats::default();

            loop {
                let message = match receiver.recv().await {
                    Ok(message) => message,
                    Err(broadcast::error::RecvError::Closed) => {
                        log::warn!("[ConsoleConsumer] Channel closed");
                        break;
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        log::warn!("[ConsoleConsumer] Channel lagged, skipped {} messages", n);
                        continue;
                    }
                };
                stats.record(&message);

                match &message {
                    CaptureMessage::Started { total, output_dir } => {
                        if *total == 0 {
                            println!("No originals found, nothing to capture.");
                        } else {
                            println!("{} original(s) to capture, pairs go to {}", total, output_dir);
                        }
                    }
                    CaptureMessage::Prompt { original, index } => {
                        println!(
                            "[{}] ({}/{}) {} is on screen. Photograph the screen now, waiting for a new photo...",
                            now(),
                            index + 1,
                            stats.total,
                            original.display()
                        );
                    }
                    CaptureMessage::Paired(record) => {
                        println!("[{}] Copied: {}", now(), record.captured.display());
                    }
                    CaptureMessage::Missed { original } => {
                        println!(
                            "[{}] No new photo arrived for {}. Try again.",
                            now(),
                            original.display()
                        );
                    }
                    CaptureMessage::Skipped { original, existing } => {
                        println!(
                            "[{}] Skipped {} ({} exists)",
                            now(),
                            original.display(),
                            existing.display()
                        );
                    }
                    CaptureMessage::Complete => {
                        stats.total_time = format!("{:.2}s", start_time.elapsed().as_secs_f64());
                        println!("\n{}", stats);
                        break;
                    }
                }
            }
            Ok(())
        });

        Ok(handle)
    }

    fn name(&self) -> &'static str {
        "console_consumer"
    }
}
