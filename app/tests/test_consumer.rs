use app::capture::{CaptureMessage, CaptureStats, PairRecord};
use app::consumer::config::{ConsumerConfig, SoundSettings};
use app::consumer::ConsumerManager;
use std::path::PathBuf;
use utils::error::Result;

fn sound() -> SoundSettings {
    SoundSettings {
        // 测试环境里不存在的播放器，播放失败只会记录日志
        player: "/nonexistent/recapture-test-player".to_string(),
        file: "/System/Library/Sounds/Glass.aiff".to_string(),
    }
}

fn pair(name: &str) -> PairRecord {
    PairRecord {
        original: PathBuf::from(format!("original_photos/{}", name)),
        captured: PathBuf::from(format!("pairs/screen_{}", name)),
        remote_name: "IMG_0001.jpg".to_string(),
        hash: "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad".to_string(),
        polls: 3,
        waited_ms: 2500,
        captured_at: chrono::Local::now(),
    }
}

#[tokio::test]
async fn test_consumer_manager_creation() -> Result<()> {
    // 默认只有控制台消费者
    let manager = ConsumerManager::with_config(&ConsumerConfig::default());
    assert_eq!(manager.get_consumer_count(), 1);
    assert_eq!(manager.consumer_names(), vec!["console_consumer"]);

    let manager = ConsumerManager::with_config(&ConsumerConfig::all_enabled(sound()));
    assert_eq!(manager.get_consumer_count(), 3);
    assert_eq!(
        manager.consumer_names(),
        vec!["console_consumer", "log_consumer", "sound_consumer"]
    );

    let manager = ConsumerManager::with_config(&ConsumerConfig::silent());
    assert_eq!(manager.get_consumer_count(), 0);

    Ok(())
}

#[tokio::test]
async fn test_broadcast_without_consumers_is_ok() -> Result<()> {
    let manager = ConsumerManager::with_config(&ConsumerConfig::silent());
    manager.broadcast(CaptureMessage::Complete)?;
    Ok(())
}

#[tokio::test]
async fn test_consumers_run_to_completion() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut manager = ConsumerManager::with_config(&ConsumerConfig::all_enabled(sound()));
    let handles = manager.start_consumers().await?;

    manager.broadcast(CaptureMessage::Started {
        total: 2,
        output_dir: "pairs".to_string(),
    })?;
    manager.broadcast(CaptureMessage::Prompt {
        original: PathBuf::from("original_photos/a.jpg"),
        index: 0,
    })?;
    manager.broadcast(CaptureMessage::Paired(pair("a.jpg")))?;
    manager.broadcast(CaptureMessage::Missed {
        original: PathBuf::from("original_photos/b.jpg"),
    })?;
    manager.shutdown().await?;

    for handle in handles {
        handle.await.expect("consumer task panicked")?;
    }

    Ok(())
}

#[test]
fn test_stats_record_and_display() {
    let mut stats = CaptureStats::default();

    stats.record(&CaptureMessage::Started {
        total: 3,
        output_dir: "pairs".to_string(),
    });
    stats.record(&CaptureMessage::Paired(pair("a.jpg")));
    stats.record(&CaptureMessage::Missed {
        original: PathBuf::from("b.jpg"),
    });
    stats.record(&CaptureMessage::Skipped {
        original: PathBuf::from("c.jpg"),
        existing: PathBuf::from("pairs/screen_c.jpg"),
    });
    stats.total_time = "12.00s".to_string();

    assert_eq!(stats.processed(), 3);
    assert!((stats.average_wait_secs() - 2.5).abs() < f64::EPSILON);

    let text = stats.to_string();
    assert!(text.contains("Originals:        3"));
    assert!(text.contains("Captured:         1"));
    assert!(text.contains("Average wait:     2.5s"));
    assert!(text.contains("Total time:       12.00s"));
}

#[test]
fn test_pair_record_serializes() {
    let json = serde_json::to_value(pair("a.jpg")).unwrap();
    assert_eq!(json["remote_name"], "IMG_0001.jpg");
    assert_eq!(json["captured"], "pairs/screen_a.jpg");
    assert_eq!(json["polls"], 3);
}
