use app::capture::{capture, device_from_config, probe, CaptureParams, CaptureRig};
use app::consumer::config::ConsumerConfig;
use utils::app_config::AppConfig;
use utils::error::Result;

/// capture 子命令里可以覆盖配置的参数
#[derive(Debug, Default)]
pub struct CaptureOverrides {
    pub originals: Option<String>,
    pub output: Option<String>,
    pub remote_dir: Option<String>,
    pub timeout: Option<u64>,
    pub interval: Option<u64>,
    pub serial: Option<String>,
    pub skip_existing: bool,
    pub no_sound: bool,
}

impl CaptureOverrides {
    fn apply(&self) -> Result<()> {
        if let Some(dir) = &self.originals {
            AppConfig::set("capture.original_dir", dir)?;
        }
        if let Some(dir) = &self.output {
            AppConfig::set("capture.output_dir", dir)?;
        }
        if let Some(timeout) = self.timeout {
            AppConfig::set("watch.timeout_secs", &timeout.to_string())?;
        }
        if let Some(interval) = self.interval {
            AppConfig::set("watch.poll_interval_ms", &interval.to_string())?;
        }
        if self.skip_existing {
            AppConfig::set("capture.skip_existing", "true")?;
        }
        if self.no_sound {
            AppConfig::set("feedback.sound", "false")?;
        }
        apply_device_overrides(self.remote_dir.as_deref(), self.serial.as_deref())
    }
}

fn apply_device_overrides(remote_dir: Option<&str>, serial: Option<&str>) -> Result<()> {
    if let Some(dir) = remote_dir {
        AppConfig::set("watch.remote_dir", dir)?;
    }
    if let Some(serial) = serial {
        AppConfig::set("device.serial", serial)?;
    }
    Ok(())
}

pub async fn capture_cmd(overrides: CaptureOverrides) -> Result<()> {
    overrides.apply()?;

    let config = AppConfig::fetch()?;
    let params = CaptureParams::from_config(&config);
    let rig = CaptureRig::from_config(&config);
    let consumers = ConsumerConfig::from_config(&config);

    let stats = capture(&params, &rig, &consumers).await?;
    log::info!(
        "Captured {}/{} pair(s) into {}",
        stats.captured,
        stats.total,
        params.output_dir.display()
    );
    Ok(())
}

pub async fn probe_cmd(remote_dir: Option<String>, serial: Option<String>) -> Result<()> {
    apply_device_overrides(remote_dir.as_deref(), serial.as_deref())?;

    let config = AppConfig::fetch()?;
    let device = device_from_config(&config);

    let baseline = probe(&device).await?;
    match (baseline.name, baseline.hash) {
        (Some(name), Some(hash)) => println!("{}/{}  sha256:{}", config.watch.remote_dir, name, hash),
        (Some(name), None) => println!("{}/{}  (could not be pulled)", config.watch.remote_dir, name),
        (None, _) => println!("No photos in {}", config.watch.remote_dir),
    }
    Ok(())
}
