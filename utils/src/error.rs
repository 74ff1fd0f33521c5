use std::sync::PoisonError;

pub type Result<T> = std::result::Result<T, Error>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// 统一错误类型：一条可读的消息，外加可选的底层错误
#[derive(Debug, thiserror::Error)]
#[error("{msg}")]
pub struct Error {
    msg: String,
    #[source]
    source: Option<BoxedSource>,
}

impl Error {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            source: None,
        }
    }

    /// 包装底层错误，保留错误链
    pub fn with_source(msg: impl Into<String>, source: BoxedSource) -> Self {
        Self {
            msg: msg.into(),
            source: Some(source),
        }
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::with_source(format!("I/O error: {}", err), Box::new(err))
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::with_source(format!("Configuration error: {}", err), Box::new(err))
    }
}

impl From<log::SetLoggerError> for Error {
    fn from(err: log::SetLoggerError) -> Self {
        Error::with_source("Failed to install the log bridge", Box::new(err))
    }
}

impl<T> From<PoisonError<T>> for Error {
    fn from(err: PoisonError<T>) -> Self {
        // PoisonError 持有锁守卫，无法跨线程传递，只保留消息
        Error::new(format!("Configuration lock poisoned: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_io_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();

        assert!(err.msg().contains("missing"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_plain_error_display() {
        let err = Error::new("adb not found");
        assert_eq!(err.to_string(), "adb not found");
        assert!(err.source().is_none());
    }
}
