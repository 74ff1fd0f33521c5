use crate::capture::CaptureMessage;
use crate::consumer::config::SoundSettings;
use crate::consumer::Consumer;
use std::process::Stdio;
use tokio::process::Command;
use tokio::sync::broadcast;
use utils::error::Result;

/// 提示音消费者 - 每次配对成功播放一次
pub struct SoundConsumer {
    settings: SoundSettings,
}

impl SoundConsumer {
    pub fn new(settings: SoundSettings) -> Self {
        Self { settings }
    }
}

/// 播放失败只记录日志
async fn play(settings: &SoundSettings) {
    let status = Command::new(&settings.player)
        .arg(&settings.file)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    match status {
        Ok(status) if status.success() => {}
        Ok(status) => log::warn!("[SoundConsumer] {} exited with {}", settings.player, status),
        Err(e) => log::warn!("[SoundConsumer] Failed to run {}: {}", settings.player, e),
    }
}

#[async_trait::async_trait]
impl Consumer for SoundConsumer {
    async fn start(
        &mut self, mut receiver: broadcast::Receiver<CaptureMessage>,
    ) -> Result<tokio::task::JoinHandle<Result<()>>> {
        let settings = self.settings.clone();

        let handle = tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(CaptureMessage::Paired(_)) => play(&settings).await,
                    Ok(CaptureMessage::Complete) => break,
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            Ok(())
        });

        Ok(handle)
    }

    fn name(&self) -> &'static str {
        "sound_consumer"
    }
}
