use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::path::Path;
use std::sync::RwLock;

use super::error::{Error, Result};

// 全局配置构建器，所有读取都基于它重新 build
lazy_static! {
    static ref BUILDER: RwLock<ConfigBuilder<DefaultState>> = RwLock::new(Config::builder());
}

/// 环境变量前缀，例如 RECAPTURE_WATCH__TIMEOUT_SECS=60
const ENV_PREFIX: &str = "RECAPTURE";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    /// 日志文件名，写入可执行文件旁的 logs/ 目录
    pub file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// 原始图片目录
    pub original_dir: String,
    /// 配对输出目录
    pub output_dir: String,
    /// 输出文件名前缀，输出为 <prefix><原始文件名>
    pub output_prefix: String,
    /// 视为原始图片的扩展名（不区分大小写）
    pub extensions: Vec<String>,
    /// 已存在配对时跳过
    pub skip_existing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// 手机上相机保存照片的目录
    pub remote_dir: String,
    /// 只有以此后缀结尾的文件才算照片
    pub photo_suffix: String,
    pub timeout_secs: u64,
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// adb 可执行文件
    pub adb: String,
    /// 多设备时指定的序列号
    #[serde(default)]
    pub serial: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    pub package: String,
    /// 相对包名的 Activity，例如 .MainActivity
    pub activity: String,
    pub launch_settle_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// 用于展示原图的桌面程序
    pub app: String,
    /// 打开程序的命令，macOS 上是 open
    pub opener: String,
    pub close_settle_ms: u64,
    pub open_settle_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// 成功配对后播放提示音
    pub sound: bool,
    pub player: String,
    pub sound_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumerSection {
    pub log: bool,
    pub channel_capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub log: LogConfig,
    pub capture: CaptureConfig,
    pub watch: WatchConfig,
    pub device: DeviceConfig,
    pub camera: CameraConfig,
    pub display: DisplayConfig,
    pub feedback: FeedbackConfig,
    pub consumer: ConsumerSection,
}

impl AppConfig {
    /// 初始化配置：内嵌的默认 TOML，再叠加环境变量
    pub fn init(default_config: Option<&str>) -> Result<()> {
        let mut builder = Config::builder();

        if let Some(config_contents) = default_config {
            builder = builder.add_source(config::File::from_str(
                config_contents,
                config::FileFormat::Toml,
            ));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        {
            let mut w = BUILDER.write()?;
            *w = builder;
        }

        Ok(())
    }

    /// 叠加用户指定的配置文件
    pub fn merge_config(config_file: Option<&Path>) -> Result<()> {
        if let Some(config_file_path) = config_file {
            if !config_file_path.exists() {
                return Err(Error::new(format!(
                    "Config file not found: {}",
                    config_file_path.display()
                )));
            }

            let mut w = BUILDER.write()?;
            *w = w
                .clone()
                .add_source(config::File::from(config_file_path.to_path_buf()));
        }
        Ok(())
    }

    /// 覆盖单个配置项
    pub fn set(key: &str, value: &str) -> Result<()> {
        let mut w = BUILDER.write()?;
        *w = w.clone().set_override(key, value)?;

        Ok(())
    }

    /// 读取单个配置项
    pub fn get<'de, T>(key: &str) -> Result<T>
    where
        T: serde::Deserialize<'de>,
    {
        Ok(BUILDER.read()?.deref().clone().build()?.get::<T>(key)?)
    }

    /// 取出当前配置的快照；修改配置后需要重新 fetch
    pub fn fetch() -> Result<AppConfig> {
        let r = BUILDER.read()?;

        let config_clone = r.deref().clone().build()?;

        let app_config: AppConfig = config_clone.try_deserialize()?;
        Ok(app_config)
    }
}
