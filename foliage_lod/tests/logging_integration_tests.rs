//! Integration tests for the foliage logging system
//!
//! Verifies the logger facade and the messages emitted by the pipeline.
//!
//! Run with: cargo test --test logging_integration_tests

use foliage_lod::foliage::{Foliage, LeafBatchConfig, LeafLodPipeline};
use foliage_lod::foliage::batch::NoSprites;
use foliage_lod::foliage::log::{Logger, LogEntry, LogSeverity};
use foliage_lod::foliage::lod::LodView;
use foliage_lod::foliage::scene::{LeafPrimitive, SceneInstance, SceneObject, SceneSnapshot, Transform};
use foliage_lod::glam::Vec3;
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn from_source(entries: &[LogEntry], source: &str, severity: LogSeverity) -> Vec<String> {
    entries
        .iter()
        .filter(|e| e.source == source && e.severity == severity)
        .map(|e| e.message.clone())
        .collect()
}

fn small_scene(x: f32) -> SceneSnapshot {
    let mut snapshot = SceneSnapshot::new();
    snapshot.add_object(SceneObject::new("tree").with_leaf(LeafPrimitive::new("leaf-0", 0.5)));
    snapshot.add_instance(SceneInstance::new("a", "tree", Transform::from_position(x, 0.0, 0.0)));
    snapshot
}

// ============================================================================
// FACADE TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (test_logger, entries) = TestLogger::new();
    Foliage::set_logger(test_logger);

    Foliage::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Foliage::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 2);
        assert_eq!(captured[0].severity, LogSeverity::Info);
        assert_eq!(captured[0].message, "Test info message");
        assert_eq!(captured[1].severity, LogSeverity::Warn);
        assert!(captured[1].file.is_none());
    }

    Foliage::reset_logger();
}

#[test]
#[serial]
fn test_integration_error_logging_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Foliage::set_logger(test_logger);

    Foliage::log_detailed(
        LogSeverity::Error,
        "test::error",
        "Critical error occurred".to_string(),
        "test_file.rs",
        42,
    );

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].file, Some("test_file.rs"));
        assert_eq!(captured[0].line, Some(42));
    }

    Foliage::reset_logger();
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let (test_logger, entries) = TestLogger::new();
    Foliage::set_logger(test_logger);

    Foliage::log(LogSeverity::Info, "test", "Message 1".to_string());
    Foliage::reset_logger();
    Foliage::log(LogSeverity::Info, "test", "Message 2".to_string());

    assert_eq!(entries.lock().unwrap().len(), 1);
}

// ============================================================================
// PIPELINE LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_invalid_config_logs_error_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Foliage::set_logger(test_logger);

    let result = LeafLodPipeline::new(LeafBatchConfig::default().with_chunk_size(0.0));
    assert!(result.is_err());

    {
        let captured = entries.lock().unwrap();
        let errors: Vec<&LogEntry> = captured
            .iter()
            .filter(|e| e.severity == LogSeverity::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].source, "foliage::LeafBatchConfig");
        assert!(errors[0].message.contains("chunk_size"));
        assert!(errors[0].file.is_some());
        assert!(errors[0].line.is_some());
    }

    Foliage::reset_logger();
}

#[test]
#[serial]
fn test_integration_bucket_churn_is_logged_only_on_change() {
    let (test_logger, entries) = TestLogger::new();
    Foliage::set_logger(test_logger);

    let mut pipeline = LeafLodPipeline::new(LeafBatchConfig::default()).unwrap();
    let view = LodView::new(Vec3::ZERO);

    pipeline.update(&small_scene(1.0), &view, &NoSprites);
    pipeline.update(&small_scene(1.0), &view, &NoSprites);
    pipeline.update(&small_scene(40.0), &view, &NoSprites);

    {
        let captured = entries.lock().unwrap();
        let info = from_source(&captured, "foliage::Pipeline", LogSeverity::Info);
        assert_eq!(info.len(), 1);

        let churn = from_source(&captured, "foliage::Pipeline", LogSeverity::Debug);
        assert_eq!(churn.len(), 2);
        assert!(churn[0].contains("entries +1 -0"));
        assert!(churn[1].contains("entries +1 -1"));

        let trace = from_source(&captured, "foliage::Pipeline", LogSeverity::Trace);
        assert_eq!(trace.len(), 3);
        assert_eq!(trace[1], "Batches rebuilt=0 reused=1 removed=0");
    }

    Foliage::reset_logger();
}
