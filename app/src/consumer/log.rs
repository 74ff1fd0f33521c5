use crate::capture::CaptureMessage;
use crate::consumer::Consumer;
use tokio::sync::broadcast;
use utils::error::Result;

/// 日志消费者 - 把会话消息写入日志，配对记录以 JSON 形式输出
pub struct LogConsumer;

#[async_trait::async_trait]
impl Consumer for LogConsumer {
    async fn start(
        &mut self, mut receiver: broadcast::Receiver<CaptureMessage>,
    ) -> Result<tokio::task::JoinHandle<Result<()>>> {
        let handle = tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(CaptureMessage::Paired(record)) => match serde_json::to_string(&record) {
                        Ok(json) => log::info!("[LogConsumer] Pair: {}", json),
                        Err(e) => log::warn!("[LogConsumer] Failed to serialize pair: {}", e),
                    },
                    Ok(CaptureMessage::Complete) => {
                        log::info!("[LogConsumer] Capture completed");
                        break;
                    }
                    Ok(message) => {
                        log::info!("[LogConsumer] {:?}", message);
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        log::warn!("[LogConsumer] Channel closed");
                        break;
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => {
                        log::warn!("[LogConsumer] Channel lagged, skipping messages");
                        continue;
                    }
                }
            }
            Ok(())
        });

        Ok(handle)
    }

    fn name(&self) -> &'static str {
        "log_consumer"
    }
}
