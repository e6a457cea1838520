#![cfg(feature = "decorate")]
//! Integration tests for the stateful decorators.
//!
//! - Private state per wrapper, shared safely between threads
//! - Logger sinks are validated at wrap time
//! - Tee and recorder never alter the returned value

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, Once};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use fnops::callable::{Callable, CallableExt};
use fnops::decorate::{LoggerConfig, log_to, notify_every, record, tee, timed};
use fnops::error::SinkError;
use rstest::rstest;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn scratch_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    std::env::temp_dir().join(format!("fnops-{name}-{}-{nanos}.log", std::process::id()))
}

fn word_count(text: &str) -> Result<usize, String> {
    if text.is_empty() {
        Err("empty text".to_string())
    } else {
        Ok(text.split_whitespace().count())
    }
}

// =============================================================================
// Invocation Counter
// =============================================================================

#[rstest]
fn test_counter_notifies_each_multiple_once_under_concurrency() {
    init_tracing();
    let notified = Mutex::new(Vec::new());
    let counted = notify_every(word_count, 10, |count| {
        notified.lock().unwrap().push(count);
    });

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..25 {
                    counted.invoke("a b c").unwrap();
                }
            });
        }
    });

    assert_eq!(counted.count(), 100);
    let mut notified = notified.into_inner().unwrap();
    notified.sort_unstable();
    assert_eq!(notified, vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
}

#[rstest]
fn test_counters_are_private_to_each_wrapper() {
    let first = word_count.notify_every(2, |_| {});
    let second = word_count.notify_every(2, |_| {});

    first.invoke("one").unwrap();
    first.invoke("two").unwrap();
    second.invoke("three").unwrap();

    assert_eq!(first.count(), 2);
    assert_eq!(second.count(), 1);
}

#[rstest]
fn test_zero_interval_counts_without_notifying() {
    let notified = AtomicU64::new(0);
    let counted = notify_every(word_count, 0, |_| {
        notified.fetch_add(1, Ordering::SeqCst);
    });
    for _ in 0..5 {
        counted.invoke("x").unwrap();
    }
    assert_eq!(counted.count(), 5);
    assert_eq!(notified.load(Ordering::SeqCst), 0);
}

// =============================================================================
// Logger
// =============================================================================

#[rstest]
fn test_logger_appends_one_entry_per_call() {
    init_tracing();
    let path = scratch_path("calls");
    let logged = LoggerConfig::default()
        .label("word_count")
        .timestamp_format("%Y")
        .attach_file(word_count, &path)
        .unwrap();

    assert_eq!(logged.invoke("to be or not"), Ok(4));
    assert_eq!(logged.invoke(""), Err("empty text".to_string()));

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("word_count created at: "));
    assert!(lines[1].starts_with("word_count called at: "));
    assert!(lines[2].starts_with("word_count called at: "));

    fs::remove_file(&path).unwrap();
}

#[rstest]
fn test_logger_appends_to_existing_file() {
    let path = scratch_path("existing");
    fs::write(&path, "earlier line\n").unwrap();

    let logged = log_to(word_count, &path).unwrap();
    logged.invoke("a").unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("earlier line\n"));
    assert_eq!(contents.lines().count(), 3);

    fs::remove_file(&path).unwrap();
}

#[rstest]
fn test_unwritable_sink_fails_at_wrap_time() {
    let calls = AtomicUsize::new(0);
    let path = std::env::temp_dir()
        .join("fnops-no-such-directory")
        .join("nested")
        .join("calls.log");

    let result = log_to(
        |text: &str| {
            calls.fetch_add(1, Ordering::SeqCst);
            word_count(text)
        },
        &path,
    );

    assert!(matches!(result, Err(SinkError::Open { path: reported, .. }) if reported == path));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

// =============================================================================
// Tee and Recorder
// =============================================================================

#[rstest]
#[case("one two three")]
#[case("solo")]
#[case("")]
fn test_tee_returns_exactly_the_inner_result(#[case] text: &str) {
    let inputs = Mutex::new(Vec::new());
    let outputs = Mutex::new(Vec::new());
    let traced = tee(
        word_count,
        |input: &&str| inputs.lock().unwrap().push(input.to_string()),
        |output: &usize| outputs.lock().unwrap().push(*output),
    );

    assert_eq!(traced.invoke(text), word_count(text));
    assert_eq!(*inputs.lock().unwrap(), vec![text.to_string()]);
    let expected_outputs: Vec<usize> = word_count(text).into_iter().collect();
    assert_eq!(*outputs.lock().unwrap(), expected_outputs);
}

#[rstest]
fn test_recorder_history_matches_sequential_calls() {
    let recorded = word_count.record();
    for text in ["a", "", "a b"] {
        let _ = recorded.invoke(text);
    }

    let history = recorded.history();
    assert_eq!(recorded.inputs(), vec!["a", "", "a b"]);
    assert_eq!(recorded.outputs(), vec![1, 2]);
    assert_eq!(
        history.iter().map(|call| call.failed()).collect::<Vec<_>>(),
        vec![false, true, false]
    );
}

#[rstest]
fn test_recorder_keeps_every_concurrent_call() {
    let recorded = record(|value: u32| Ok::<_, ()>(value + 1));
    thread::scope(|scope| {
        for worker in 0..5_u32 {
            let recorded = &recorded;
            scope.spawn(move || {
                for step in 0..20 {
                    recorded.invoke(worker * 1_000 + step).unwrap();
                }
            });
        }
    });

    let mut inputs = recorded.inputs();
    inputs.sort_unstable();
    let expected: Vec<u32> = (0..5)
        .flat_map(|worker| (0..20).map(move |step| worker * 1_000 + step))
        .collect();
    assert_eq!(inputs, expected);
}

// =============================================================================
// Timer
// =============================================================================

#[rstest]
fn test_timer_reports_elapsed_time_of_the_inner_call() {
    let slow = timed(word_count.delay(Duration::from_millis(15)));
    let timing = slow.invoke("a b").unwrap();
    assert_eq!(timing.value, 2);
    assert!(timing.elapsed >= Duration::from_millis(15));
}
