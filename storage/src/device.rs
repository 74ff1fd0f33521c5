use std::path::Path;

use crate::adb::Adb;
use utils::error::Result;

/// 手机端照片存储 - 只能轮询列目录，没有变更通知
#[async_trait::async_trait]
pub trait DeviceStorage: Send + Sync {
    /// 照片目录
    fn remote_dir(&self) -> &str;

    /// 最近修改的照片文件名；目录为空或不可读时为 None
    async fn latest_photo(&self) -> Result<Option<String>>;

    /// 拉取照片到本地路径，返回本地文件是否存在
    async fn pull(&self, name: &str, local: &Path) -> Result<bool>;
}

/// 解析 `ls -t` 输出（最新的在前），只保留以 suffix 结尾的文件名
pub fn parse_listing(stdout: &str, suffix: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|name| !name.is_empty() && name.ends_with(suffix))
        .map(str::to_string)
        .collect()
}

/// 拼接远端路径
pub fn remote_path(remote_dir: &str, name: &str) -> String {
    format!("{}/{}", remote_dir.trim_end_matches('/'), name)
}

/// 基于 adb 的设备存储
pub struct AdbStorage {
    adb: Adb,
    remote_dir: String,
    photo_suffix: String,
}

impl AdbStorage {
    pub fn new(adb: Adb, remote_dir: impl Into<String>, photo_suffix: impl Into<String>) -> Self {
        Self {
            adb,
            remote_dir: remote_dir.into(),
            photo_suffix: photo_suffix.into(),
        }
    }

    /// 按修改时间倒序列出所有照片
    pub async fn list_photos(&self) -> Result<Vec<String>> {
        let output = self.adb.shell(&["ls", "-t", self.remote_dir.as_str()]).await?;

        if !output.status.success() {
            log::warn!(
                "Listing {} failed ({}): {}",
                self.remote_dir,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Ok(Vec::new());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_listing(&stdout, &self.photo_suffix))
    }
}

#[async_trait::async_trait]
impl DeviceStorage for AdbStorage {
    fn remote_dir(&self) -> &str {
        &self.remote_dir
    }

    async fn latest_photo(&self) -> Result<Option<String>> {
        Ok(self.list_photos().await?.into_iter().next())
    }

    async fn pull(&self, name: &str, local: &Path) -> Result<bool> {
        let remote = remote_path(&self.remote_dir, name);
        let output = self.adb.pull(&remote, local).await?;

        if !output.status.success() {
            log::debug!(
                "Pull of {} exited with {}: {}",
                remote,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(local.exists())
    }
}
