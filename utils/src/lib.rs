//! 工作区共享的基础设施：错误类型、分层配置与日志
pub mod app_config;
pub mod error;
pub mod logger;
