use serde::{Deserialize, Serialize};
use utils::app_config::AppConfig;

/// 提示音设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundSettings {
    /// 播放器命令，例如 afplay
    pub player: String,
    pub file: String,
}

/// 消费者配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumerConfig {
    /// 是否启用控制台消费者
    pub enable_console_consumer: bool,
    /// 是否启用日志消费者
    pub enable_log_consumer: bool,
    /// 配对成功时播放提示音；None 表示关闭
    pub sound: Option<SoundSettings>,
    /// 消费者通道容量
    pub channel_capacity: usize,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            enable_console_consumer: true,
            enable_log_consumer: false,
            sound: None,
            channel_capacity: 256,
        }
    }
}

impl ConsumerConfig {
    pub fn from_config(config: &AppConfig) -> Self {
        let sound = config.feedback.sound.then(|| SoundSettings {
            player: config.feedback.player.clone(),
            file: config.feedback.sound_file.clone(),
        });

        Self {
            enable_console_consumer: true,
            enable_log_consumer: config.consumer.log,
            sound,
            channel_capacity: config.consumer.channel_capacity.max(1),
        }
    }

    /// 不输出任何东西，测试用
    pub fn silent() -> Self {
        Self {
            enable_console_consumer: false,
            enable_log_consumer: false,
            sound: None,
            ..Default::default()
        }
    }

    /// 启用所有消费者
    pub fn all_enabled(sound: SoundSettings) -> Self {
        Self {
            enable_console_consumer: true,
            enable_log_consumer: true,
            sound: Some(sound),
            ..Default::default()
        }
    }
}
