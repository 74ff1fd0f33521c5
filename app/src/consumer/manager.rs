use tokio::sync::broadcast;
use utils::error::Result;

use crate::capture::CaptureMessage;
use crate::consumer::config::ConsumerConfig;
use crate::consumer::{ConsoleConsumer, Consumer, LogConsumer, SoundConsumer};

/// 消费者管理器 - 管理多个消费者
pub struct ConsumerManager {
    /// 广播发送器
    broadcaster: broadcast::Sender<CaptureMessage>,
    /// 消费者列表
    consumers: Vec<Box<dyn Consumer>>,
}

impl ConsumerManager {
    /// 根据配置创建消费者管理器
    pub fn with_config(config: &ConsumerConfig) -> Self {
        let (broadcaster, _) = broadcast::channel(config.channel_capacity.max(1));
        let mut manager = Self {
            broadcaster,
            consumers: Vec::new(),
        };

        if config.enable_console_consumer {
            manager.add_consumer(Box::new(ConsoleConsumer));
        }
        if config.enable_log_consumer {
            manager.add_consumer(Box::new(LogConsumer));
        }
        if let Some(sound) = &config.sound {
            manager.add_consumer(Box::new(SoundConsumer::new(sound.clone())));
        }

        manager
    }

    /// 添加消费者
    pub fn add_consumer(&mut self, consumer: Box<dyn Consumer>) {
        self.consumers.push(consumer);
    }

    /// 启动所有消费者
    pub async fn start_consumers(&mut self) -> Result<Vec<tokio::task::JoinHandle<Result<()>>>> {
        let mut handles = Vec::new();

        for consumer in &mut self.consumers {
            let receiver = self.broadcaster.subscribe();
            log::debug!("Starting consumer {}", consumer.name());
            handles.push(consumer.start(receiver).await?);
        }

        Ok(handles)
    }

    /// 获取消费者数量
    pub fn get_consumer_count(&self) -> usize {
        self.consumers.len()
    }

    pub fn consumer_names(&self) -> Vec<&'static str> {
        self.consumers.iter().map(|c| c.name()).collect()
    }

    /// 广播消息到所有消费者；没有消费者时直接丢弃
    pub fn broadcast(&self, message: CaptureMessage) -> Result<()> {
        if self.consumers.is_empty() {
            return Ok(());
        }

        self.broadcaster.send(message).map_err(|e| {
            utils::error::Error::with_source("Failed to broadcast message", Box::new(e))
        })?;
        Ok(())
    }

    /// 关闭所有消费者
    pub async fn shutdown(&self) -> Result<()> {
        // 发送完成消息，忽略错误（可能没有消费者监听）
        let _ = self.broadcaster.send(CaptureMessage::Complete);
        Ok(())
    }
}
