use std::path::Path;
use std::process::{Output, Stdio};
use tokio::process::Command;
use utils::error::{Error, Result};

/// adb 命令执行器
#[derive(Debug, Clone)]
pub struct Adb {
    program: String,
    serial: Option<String>,
}

impl Adb {
    pub fn new(program: impl Into<String>, serial: Option<String>) -> Self {
        Self {
            program: program.into(),
            // 空字符串等同于未指定
            serial: serial.filter(|s| !s.trim().is_empty()),
        }
    }

    pub fn serial(&self) -> Option<&str> {
        self.serial.as_deref()
    }

    /// 构建完整参数列表，指定序列号时加上 -s
    pub fn args<I, S>(&self, extra: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = Vec::new();
        if let Some(serial) = &self.serial {
            args.push("-s".to_string());
            args.push(serial.clone());
        }
        args.extend(extra.into_iter().map(|s| s.as_ref().to_string()));
        args
    }

    /// 执行 adb 并收集输出；无法启动进程时返回错误，非零退出码交给调用方判断
    pub async fn run(&self, args: Vec<String>) -> Result<Output> {
        log::debug!("Running {} {}", self.program, args.join(" "));

        Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                Error::with_source(format!("Failed to run '{}'", self.program), Box::new(e))
            })
    }

    /// adb shell <args...>
    pub async fn shell(&self, args: &[&str]) -> Result<Output> {
        let full = self.args(std::iter::once("shell").chain(args.iter().copied()));
        self.run(full).await
    }

    /// adb pull <remote> <local>
    pub async fn pull(&self, remote: &str, local: &Path) -> Result<Output> {
        let local = local.to_string_lossy().into_owned();
        let full = self.args(["pull", remote, local.as_str()]);
        self.run(full).await
    }
}
