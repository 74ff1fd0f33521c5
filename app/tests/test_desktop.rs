//! 用脚本代替 adb 和 open，驱动相机与展示两个外部协作者
#![cfg(unix)]

use app::desktop::{AdbCamera, CameraApp, PreviewDisplay, ScreenDisplay};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use storage::Adb;
use tempfile::TempDir;

const RUNNING: &str = "  mCurrentFocus=Window{9f1 u0 net.sourceforge.opencamera/net.sourceforge.opencamera.MainActivity}\n";
const LAUNCHER: &str = "  mCurrentFocus=Window{2c4 u0 com.android.launcher3/.Launcher}\n";

/// 记录每次调用的参数；dumpsys 输出 windows 文件，存在 am_fails 时 am start 失败
fn fake_adb(state: &Path) -> String {
    format!(
        r#"#!/bin/sh
state="{}"
if [ "$1" = "-s" ]; then shift 2; fi
echo "$@" >> "$state/calls"
[ "$1" = "shell" ] || exit 1
shift
case "$1" in
  dumpsys) cat "$state/windows" ;;
  am)
    if [ -f "$state/am_fails" ]; then
      echo "Error: Activity class does not exist" >&2
      exit 1
    fi
    echo "Starting: Intent {{ cmp=$4 }}" ;;
  *) exit 1 ;;
esac
"#,
        state.display()
    )
}

const FAILING_OPENER: &str = r#"#!/bin/sh
echo "The file $3 does not exist." >&2
exit 1
"#;

fn write_script(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn take_calls(state: &Path) -> Vec<String> {
    let calls = state.join("calls");
    let content = fs::read_to_string(&calls).unwrap_or_default();
    let _ = fs::remove_file(&calls);
    content.lines().map(str::to_string).collect()
}

fn camera(bin: &Path) -> AdbCamera {
    AdbCamera::new(
        Adb::new(bin.to_string_lossy(), Some("emulator-5554".to_string())),
        "net.sourceforge.opencamera",
        ".MainActivity",
        Duration::from_millis(0),
    )
}

// 单个测试函数：脚本写完后才执行，避免同一进程里并发 fork 导致 ETXTBSY
#[tokio::test]
async fn test_desktop_collaborators_against_fake_commands() {
    let temp_dir = TempDir::new().unwrap();
    let state = temp_dir.path().join("state");
    fs::create_dir_all(&state).unwrap();

    let adb_bin = temp_dir.path().join("adb");
    write_script(&adb_bin, &fake_adb(&state));
    let opener_bin = temp_dir.path().join("open");
    write_script(&opener_bin, FAILING_OPENER);

    let cam = camera(&adb_bin);

    // 相机已在前台：只查询，不启动
    fs::write(state.join("windows"), RUNNING).unwrap();
    assert!(!cam.ensure_foreground().await.unwrap());
    assert_eq!(take_calls(&state), vec!["shell dumpsys window windows"]);

    // 不在前台：am start 启动组件
    fs::write(state.join("windows"), LAUNCHER).unwrap();
    assert!(cam.ensure_foreground().await.unwrap());
    assert_eq!(
        take_calls(&state),
        vec![
            "shell dumpsys window windows",
            "shell am start -n net.sourceforge.opencamera/.MainActivity",
        ]
    );

    // am start 非零退出是错误
    fs::write(state.join("am_fails"), "").unwrap();
    let err = cam.ensure_foreground().await.unwrap_err();
    assert!(err.to_string().contains("am start -n net.sourceforge.opencamera/.MainActivity failed"));
    assert!(err.to_string().contains("Activity class does not exist"));
    assert_eq!(take_calls(&state).len(), 2);

    let image = PathBuf::from(temp_dir.path()).join("cat.jpg");
    fs::write(&image, b"original").unwrap();

    // 打开失败时带上程序的错误输出
    let display = PreviewDisplay::new("recapture-test-viewer", Duration::from_millis(0), Duration::from_millis(0))
        .with_opener(opener_bin.to_string_lossy());
    let err = display.show(&image).await.unwrap_err();
    assert!(err.to_string().contains("-a recapture-test-viewer"));
    assert!(err.to_string().contains("does not exist"));

    // 打开成功
    let display = PreviewDisplay::new("recapture-test-viewer", Duration::from_millis(0), Duration::from_millis(0))
        .with_opener("true");
    display.show(&image).await.unwrap();

    // 打开程序不存在
    let display = PreviewDisplay::new("recapture-test-viewer", Duration::from_millis(0), Duration::from_millis(0))
        .with_opener(temp_dir.path().join("missing-opener").to_string_lossy());
    assert!(display.show(&image).await.is_err());
}
