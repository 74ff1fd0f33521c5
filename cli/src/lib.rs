use clap::{Parser, Subcommand};
use std::path::PathBuf;
use utils::app_config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "screen-recapture", version)]
#[command(about = "Capture screen-recapture photo pairs with a phone camera over adb", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set the logging level (debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Configuration file merged over the built-in defaults
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show each original, wait for the phone to take a new photo and save the pair
    Capture {
        /// Directory with the original images
        #[arg(short, long, value_name = "DIR")]
        originals: Option<String>,

        /// Directory the pairs are written to
        #[arg(short = 'O', long, value_name = "DIR")]
        output: Option<String>,

        /// Photo directory on the device
        #[arg(short, long, value_name = "DIR")]
        remote_dir: Option<String>,

        /// Seconds to wait for a new photo per original
        #[arg(short, long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Milliseconds between device listings
        #[arg(short, long, value_name = "MS")]
        interval: Option<u64>,

        /// adb serial of the device to use
        #[arg(short, long)]
        serial: Option<String>,

        /// Skip originals whose pair already exists
        #[arg(long)]
        skip_existing: bool,

        /// Do not play a sound after each captured pair
        #[arg(long)]
        no_sound: bool,
    },

    /// Print the newest photo on the device and its hash
    Probe {
        /// Photo directory on the device
        #[arg(short, long, value_name = "DIR")]
        remote_dir: Option<String>,

        /// adb serial of the device to use
        #[arg(short, long)]
        serial: Option<String>,
    },
}

/// 配置文件与全局参数需要在日志初始化之前生效
pub fn apply_global_args(cli: &Cli) -> utils::error::Result<()> {
    AppConfig::merge_config(cli.config.as_deref())?;
    if let Some(level) = &cli.log_level {
        AppConfig::set("log.level", level)?;
    }
    Ok(())
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub async fn cli_match(cli: Cli) -> utils::error::Result<()> {
    match cli.command {
        Commands::Capture {
            originals,
            output,
            remote_dir,
            timeout,
            interval,
            serial,
            skip_existing,
            no_sound,
        } => {
            let overrides = commands::CaptureOverrides {
                originals,
                output,
                remote_dir,
                timeout,
                interval,
                serial,
                skip_existing,
                no_sound,
            };
            commands::capture_cmd(overrides).await?
        }
        Commands::Probe { remote_dir, serial } => commands::probe_cmd(remote_dir, serial).await?,
    }

    Ok(())
}
