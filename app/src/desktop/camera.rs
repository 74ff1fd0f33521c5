use std::time::Duration;
use storage::Adb;
use utils::error::{Error, Result};

use super::CameraApp;

/// 通过 adb 检查并启动手机相机应用
pub struct AdbCamera {
    adb: Adb,
    package: String,
    activity: String,
    launch_settle: Duration,
}

impl AdbCamera {
    pub fn new(adb: Adb, package: impl Into<String>, activity: impl Into<String>, launch_settle: Duration) -> Self {
        Self {
            adb,
            package: package.into(),
            activity: activity.into(),
            launch_settle,
        }
    }

    /// am start 使用的组件名，例如 net.sourceforge.opencamera/.MainActivity
    pub fn component(&self) -> String {
        format!("{}/{}", self.package, self.activity)
    }

    /// 展开相对 Activity 名后的组件名，dumpsys 里通常是这种形式
    pub fn qualified_component(&self) -> String {
        if self.activity.starts_with('.') {
            format!("{}/{}{}", self.package, self.package, self.activity)
        } else {
            self.component()
        }
    }

    /// dumpsys 输出里是否出现了相机 Activity
    pub fn is_listed(&self, dumpsys: &str) -> bool {
        dumpsys.contains(&self.qualified_component()) || dumpsys.contains(&self.component())
    }

    pub async fn is_running(&self) -> Result<bool> {
        let output = self.adb.shell(&["dumpsys", "window", "windows"]).await?;

        if !output.status.success() {
            log::warn!(
                "dumpsys failed ({}): {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Ok(false);
        }

        Ok(self.is_listed(&String::from_utf8_lossy(&output.stdout)))
    }
}

#[async_trait::async_trait]
impl CameraApp for AdbCamera {
    async fn ensure_foreground(&self) -> Result<bool> {
        if self.is_running().await? {
            return Ok(false);
        }

        let component = self.component();
        log::info!("Starting camera app {}", component);
        let output = self
            .adb
            .shell(&["am", "start", "-n", component.as_str()])
            .await?;

        if !output.status.success() {
            return Err(Error::new(format!(
                "am start -n {} failed: {}",
                component,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        tokio::time::sleep(self.launch_settle).await;
        Ok(true)
    }
}
