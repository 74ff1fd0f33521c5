use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use storage::{list_originals, Adb, AdbStorage, DeviceStorage};
use utils::app_config::AppConfig;
use utils::error::{Error, Result};

use crate::consumer::config::ConsumerConfig;
use crate::consumer::ConsumerManager;
use crate::desktop::{AdbCamera, CameraApp, PreviewDisplay, ScreenDisplay};

mod stats;
mod watcher;


pub use stats::CaptureStats;
pub use watcher::{Baseline, CapturedPhoto, PhotoWatcher, PollOutcome, WatchParams};

// ============================================================================
// 类型定义
// ============================================================================

/// 采集参数 - 配置与命令行合并后的结果
#[derive(Debug, Clone)]
pub struct CaptureParams {
    pub original_dir: PathBuf,
    pub output_dir: PathBuf,
    pub output_prefix: String,
    pub extensions: Vec<String>,
    pub skip_existing: bool,
    pub watch: WatchParams,
}

impl Default for CaptureParams {
    fn default() -> Self {
        Self {
            original_dir: PathBuf::from("original_photos"),
            output_dir: PathBuf::from("pairs"),
            output_prefix: String::from("screen_"),
            extensions: vec!["jpg".into(), "jpeg".into(), "png".into()],
            skip_existing: false,
            watch: WatchParams::default(),
        }
    }
}

impl CaptureParams {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            original_dir: PathBuf::from(&config.capture.original_dir),
            output_dir: PathBuf::from(&config.capture.output_dir),
            output_prefix: config.capture.output_prefix.clone(),
            extensions: config.capture.extensions.clone(),
            skip_existing: config.capture.skip_existing,
            watch: WatchParams {
                timeout: Duration::from_secs(config.watch.timeout_secs),
                poll_interval: Duration::from_millis(config.watch.poll_interval_ms),
            },
        }
    }

    /// 配对输出路径：<output_dir>/<prefix><原始文件名>
    pub fn pair_path(&self, original: &Path) -> Result<PathBuf> {
        let file_name = original.file_name().ok_or_else(|| {
            Error::new(format!("Original has no file name: {}", original.display()))
        })?;

        let mut name = self.output_prefix.clone();
        name.push_str(&file_name.to_string_lossy());
        Ok(self.output_dir.join(name))
    }
}

/// 采集所需的外部协作者
pub struct CaptureRig {
    pub device: Box<dyn DeviceStorage>,
    pub display: Box<dyn ScreenDisplay>,
    pub camera: Box<dyn CameraApp>,
}

impl CaptureRig {
    /// 按配置构建真实的 adb / 桌面协作者
    pub fn from_config(config: &AppConfig) -> Self {
        let adb = Adb::new(config.device.adb.clone(), config.device.serial.clone());

        Self {
            device: Box::new(device_from_config(config)),
            display: Box::new(PreviewDisplay::new(
                config.display.app.clone(),
                Duration::from_millis(config.display.close_settle_ms),
                Duration::from_millis(config.display.open_settle_ms),
            )
            .with_opener(config.display.opener.clone())),
            camera: Box::new(AdbCamera::new(
                adb,
                config.camera.package.clone(),
                config.camera.activity.clone(),
                Duration::from_millis(config.camera.launch_settle_ms),
            )),
        }
    }
}

pub fn device_from_config(config: &AppConfig) -> AdbStorage {
    let adb = Adb::new(config.device.adb.clone(), config.device.serial.clone());
    AdbStorage::new(
        adb,
        config.watch.remote_dir.clone(),
        config.watch.photo_suffix.clone(),
    )
}

/// 一组成功的配对
#[derive(Debug, Clone, Serialize)]
pub struct PairRecord {
    pub original: PathBuf,
    pub captured: PathBuf,
    pub remote_name: String,
    pub hash: String,
    pub polls: u32,
    pub waited_ms: u64,
    pub captured_at: DateTime<Local>,
}

impl PairRecord {
    fn new(original: &Path, photo: CapturedPhoto) -> Self {
        Self {
            original: original.to_path_buf(),
            captured: photo.local_path,
            remote_name: photo.remote_name,
            hash: photo.hash,
            polls: photo.polls,
            waited_ms: photo.waited.as_millis() as u64,
            captured_at: Local::now(),
        }
    }
}

/// 会话消息 - 广播给各个消费者
#[derive(Debug, Clone)]
pub enum CaptureMessage {
    Started { total: usize, output_dir: String },
    /// 原图已展示，等待操作者拍摄屏幕
    Prompt { original: PathBuf, index: usize },
    Paired(PairRecord),
    Missed { original: PathBuf },
    Skipped { original: PathBuf, existing: PathBuf },
    Complete,
}

// ============================================================================
// 核心函数实现
// ============================================================================

/// 主采集函数 - 逐张展示原图并等待手机拍下新照片
pub async fn capture(params: &CaptureParams, rig: &CaptureRig, consumers: &ConsumerConfig) -> Result<CaptureStats> {
    capture_with(params, rig, ConsumerManager::with_config(consumers)).await
}

/// 使用给定的消费者管理器运行采集会话
pub async fn capture_with(params: &CaptureParams, rig: &CaptureRig, mut manager: ConsumerManager) -> Result<CaptureStats> {
    log::info!("Starting capture with params: {:?}", params);
    let start_time = Instant::now();

    let originals = list_originals(&params.original_dir, &params.extensions)?;
    std::fs::create_dir_all(&params.output_dir).map_err(|e| {
        Error::with_source(
            format!("Failed to create output dir {}", params.output_dir.display()),
            Box::new(e),
        )
    })?;

    let handles = manager.start_consumers().await?;
    let mut stats = CaptureStats::default();

    let outcome = capture_originals(params, rig, &originals, &manager, &mut stats).await;
    stats.total_time = format!("{:.2}s", start_time.elapsed().as_secs_f64());

    // 会话出错时消费者同样要收到 Complete 并退出
    manager.shutdown().await?;
    let mut joined = Ok(());
    for handle in handles {
        let result = handle
            .await
            .map_err(|e| Error::with_source("Consumer task failed", Box::new(e)))
            .and_then(|r| r);
        if joined.is_ok() {
            joined = result;
        }
    }

    if let Err(e) = outcome {
        log::error!("Capture aborted: {}", e);
        return Err(e);
    }
    joined?;

    log::info!("Capture completed. Stats: {:?}", stats);
    Ok(stats)
}

async fn capture_originals(
    params: &CaptureParams, rig: &CaptureRig, originals: &[PathBuf], manager: &ConsumerManager,
    stats: &mut CaptureStats,
) -> Result<()> {
    let mut emit = |message: CaptureMessage| -> Result<()> {
        stats.record(&message);
        manager.broadcast(message)
    };

    emit(CaptureMessage::Started {
        total: originals.len(),
        output_dir: params.output_dir.display().to_string(),
    })?;

    let watcher = PhotoWatcher::new(&*rig.device, &params.output_dir, params.watch);

    for (index, original) in originals.iter().enumerate() {
        let dest = params.pair_path(original)?;

        if params.skip_existing && dest.exists() {
            log::info!("Skipping {}, pair already exists", original.display());
            emit(CaptureMessage::Skipped {
                original: original.clone(),
                existing: dest,
            })?;
            continue;
        }

        // 展示与相机启动只是副作用，失败不影响后续等待
        if let Err(e) = rig.display.show(original).await {
            log::warn!("Failed to display {}: {}", original.display(), e);
        }
        match rig.camera.ensure_foreground().await {
            Ok(true) => log::info!("Camera app launched"),
            Ok(false) => {}
            Err(e) => log::warn!("Failed to bring camera app to foreground: {}", e),
        }

        let baseline = watcher.baseline().await?;
        emit(CaptureMessage::Prompt {
            original: original.clone(),
            index,
        })?;

        match watcher.wait_for_new_photo(&baseline, &dest).await? {
            Some(photo) => emit(CaptureMessage::Paired(PairRecord::new(original, photo)))?,
            None => emit(CaptureMessage::Missed {
                original: original.clone(),
            })?,
        }
    }

    Ok(())
}

/// 诊断：读取设备上当前最新照片及其哈希，临时文件放在自动清理的目录里
pub async fn probe(device: &dyn DeviceStorage) -> Result<Baseline> {
    let work_dir = tempfile::tempdir()
        .map_err(|e| Error::with_source("Failed to create scratch directory", Box::new(e)))?;
    let watcher = PhotoWatcher::new(device, work_dir.path(), WatchParams::default());
    watcher.baseline().await
}
