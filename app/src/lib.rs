pub mod capture;
pub mod consumer;
pub mod desktop;

/// 公共API的prelude模块
/// 用户可以通过 `use app::prelude::*` 来导入最常用的类型
pub mod prelude {
    pub use crate::capture::{
        capture, capture_with, probe, Baseline, CaptureMessage, CaptureParams, CaptureRig, CaptureStats,
        PairRecord, PhotoWatcher, WatchParams,
    };
    pub use crate::consumer::config::{ConsumerConfig, SoundSettings};
    pub use crate::consumer::{Consumer, ConsumerManager};
    pub use crate::desktop::{CameraApp, ScreenDisplay};
}
