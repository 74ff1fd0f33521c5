//! 新照片检测
//!
//! 设备端没有任何推送通知，只能反复列目录。列表里"最新"的文件名可能是旧的
//! （相机还没写完、媒体库延迟），也可能换了名字但内容与之前完全相同，所以
//! 判定新照片同时看两件事：文件名不同于基线，且内容哈希不同于基线。
//!
//! 状态流转：
//!
//! ```text
//! Polling --(新文件名)--> Verifying --(哈希不同)--> Arrived
//!    ^                        |
//!    +--(拉取失败/哈希相同)---+
//! Polling --(超时)--> TimedOut
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;
use storage::{hash_file, remove_if_exists, DeviceStorage};
use tokio::time::{sleep, Instant};
use utils::error::{Error, Result};

const BASELINE_TEMP: &str = ".recapture_baseline.tmp";
const CANDIDATE_TEMP: &str = ".recapture_candidate.tmp";

/// 轮询参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchParams {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for WatchParams {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(1),
        }
    }
}

/// 提示拍摄前设备上最新的照片
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Baseline {
    pub name: Option<String>,
    /// 拉取失败时为 None，此时任何能拉下来的新文件名都算新照片
    pub hash: Option<String>,
}

/// 确认到达的新照片，已保存到目标路径
#[derive(Debug, Clone)]
pub struct CapturedPhoto {
    pub remote_name: String,
    pub hash: String,
    pub local_path: PathBuf,
    pub polls: u32,
    pub waited: Duration,
}

/// 单次轮询的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// 列表为空或最新文件仍是基线
    Stale,
    /// 出现新文件名，但拉取不到
    Unreadable(String),
    /// 新文件名，内容与基线相同
    SameContent(String),
    /// 新照片已拉取到候选临时文件
    Arrived { name: String, hash: String },
}

pub struct PhotoWatcher<'a> {
    device: &'a dyn DeviceStorage,
    work_dir: PathBuf,
    params: WatchParams,
}

impl<'a> PhotoWatcher<'a> {
    /// work_dir 存放临时拉取的文件，需要与输出目录在同一文件系统上
    pub fn new(device: &'a dyn DeviceStorage, work_dir: impl Into<PathBuf>, params: WatchParams) -> Self {
        Self {
            device,
            work_dir: work_dir.into(),
            params,
        }
    }

    /// 记录当前最新照片的名字和内容哈希
    pub async fn baseline(&self) -> Result<Baseline> {
        let Some(name) = self.device.latest_photo().await? else {
            log::debug!("No photos in {} yet", self.device.remote_dir());
            return Ok(Baseline::default());
        };

        let temp = self.work_dir.join(BASELINE_TEMP);
        let hash = self.pull_and_hash(&name, &temp).await;
        remove_if_exists(&temp)?;
        let hash = hash?;

        if hash.is_none() {
            log::warn!("Could not pull baseline photo {}, comparing by name only", name);
        }
        log::debug!("Baseline: {} ({:?})", name, hash);

        Ok(Baseline {
            name: Some(name),
            hash,
        })
    }

    /// 检查一次设备；Arrived 时候选文件留在临时路径上
    pub async fn poll_once(&self, baseline: &Baseline) -> Result<PollOutcome> {
        let current = self.device.latest_photo().await?;

        let name = match current {
            Some(name) if baseline.name.as_deref() != Some(name.as_str()) => name,
            _ => return Ok(PollOutcome::Stale),
        };

        let temp = self.candidate_path();
        let Some(hash) = self.pull_and_hash(&name, &temp).await? else {
            remove_if_exists(&temp)?;
            return Ok(PollOutcome::Unreadable(name));
        };

        if baseline.hash.as_deref() == Some(hash.as_str()) {
            remove_if_exists(&temp)?;
            return Ok(PollOutcome::SameContent(name));
        }

        Ok(PollOutcome::Arrived { name, hash })
    }

    /// 轮询直到新照片到达或超时；到达时把已校验的文件移动到 dest
    pub async fn wait_for_new_photo(&self, baseline: &Baseline, dest: &Path) -> Result<Option<CapturedPhoto>> {
        let start = Instant::now();
        let mut polls = 0u32;

        while start.elapsed() < self.params.timeout {
            polls += 1;

            match self.poll_once(baseline).await? {
                PollOutcome::Arrived { name, hash } => {
                    self.promote_candidate(dest)?;
                    log::info!("New photo {} after {} poll(s) -> {}", name, polls, dest.display());

                    return Ok(Some(CapturedPhoto {
                        remote_name: name,
                        hash,
                        local_path: dest.to_path_buf(),
                        polls,
                        waited: start.elapsed(),
                    }));
                }
                PollOutcome::Unreadable(name) => {
                    log::debug!("Photo {} listed but not pullable yet", name);
                }
                PollOutcome::SameContent(name) => {
                    log::debug!("Photo {} has the baseline content, still waiting", name);
                }
                PollOutcome::Stale => {}
            }

            sleep(self.params.poll_interval).await;
        }

        log::warn!(
            "No new photo within {:?} ({} poll(s))",
            self.params.timeout,
            polls
        );
        Ok(None)
    }

    fn candidate_path(&self) -> PathBuf {
        self.work_dir.join(CANDIDATE_TEMP)
    }

    /// 拉取到临时文件并计算哈希；拉取不到返回 None
    async fn pull_and_hash(&self, name: &str, temp: &Path) -> Result<Option<String>> {
        remove_if_exists(temp)?;

        if !self.device.pull(name, temp).await? {
            return Ok(None);
        }

        match hash_file(temp) {
            Ok(hash) => Ok(Some(hash)),
            Err(e) => {
                log::warn!("Failed to hash pulled photo {}: {}", name, e);
                Ok(None)
            }
        }
    }

    fn promote_candidate(&self, dest: &Path) -> Result<()> {
        let candidate = self.candidate_path();
        remove_if_exists(dest)?;

        std::fs::rename(&candidate, dest).map_err(|e| {
            let _ = remove_if_exists(&candidate);
            Error::with_source(
                format!("Failed to save photo to {}", dest.display()),
                Box::new(e),
            )
        })
    }
}
