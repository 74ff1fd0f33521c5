use crate::capture::CaptureMessage;
use tokio::sync::broadcast;
use utils::error::Result;

pub mod config;
mod console;
mod log;
mod manager;
mod sound;

pub use console::ConsoleConsumer;
pub use self::log::LogConsumer;
pub use manager::ConsumerManager;
pub use sound::SoundConsumer;

/// 消费者 trait - 订阅会话消息的后台任务
#[async_trait::async_trait]
pub trait Consumer: Send + Sync {
    /// 启动消费者
    async fn start(
        &mut self, receiver: broadcast::Receiver<CaptureMessage>,
    ) -> Result<tokio::task::JoinHandle<Result<()>>>;

    /// 获取消费者名称
    fn name(&self) -> &'static str;
}
