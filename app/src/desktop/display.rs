use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use utils::error::{Error, Result};

use super::ScreenDisplay;

/// 用 macOS Preview（或其他 `open -a` 可打开的程序）展示原图
pub struct PreviewDisplay {
    app: String,
    opener: String,
    close_settle: Duration,
    open_settle: Duration,
}

impl PreviewDisplay {
    pub fn new(app: impl Into<String>, close_settle: Duration, open_settle: Duration) -> Self {
        Self {
            app: app.into(),
            opener: "open".to_string(),
            close_settle,
            open_settle,
        }
    }

    pub fn with_opener(mut self, opener: impl Into<String>) -> Self {
        self.opener = opener.into();
        self
    }

    /// 关闭已打开的窗口，没有运行时 pkill 返回非零，忽略即可
    async fn close(&self) {
        let result = Command::new("pkill")
            .arg(&self.app)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        if let Err(e) = result {
            log::debug!("pkill {} failed: {}", self.app, e);
        }
    }
}

#[async_trait::async_trait]
impl ScreenDisplay for PreviewDisplay {
    async fn show(&self, image: &Path) -> Result<()> {
        self.close().await;
        tokio::time::sleep(self.close_settle).await;

        let output = Command::new(&self.opener)
            .arg("-a")
            .arg(&self.app)
            .arg(image)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Error::with_source(format!("Failed to run '{}'", self.opener), Box::new(e)))?;

        if !output.status.success() {
            return Err(Error::new(format!(
                "{} -a {} {} failed: {}",
                self.opener,
                self.app,
                image.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        log::debug!("Displaying {} in {}", image.display(), self.app);
        tokio::time::sleep(self.open_settle).await;
        Ok(())
    }
}
