//! 桌面与相机应用 - 只是对外部命令的薄封装
use std::path::Path;
use utils::error::Result;

mod camera;
mod display;

pub use camera::AdbCamera;
pub use display::PreviewDisplay;

/// 在屏幕上展示一张图片
#[async_trait::async_trait]
pub trait ScreenDisplay: Send + Sync {
    async fn show(&self, image: &Path) -> Result<()>;
}

/// 确保手机上的相机应用处于前台；返回是否执行了启动
#[async_trait::async_trait]
pub trait CameraApp: Send + Sync {
    async fn ensure_foreground(&self) -> Result<bool>;
}
