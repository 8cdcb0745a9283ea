use std::sync::Arc;
use std::time::Duration;
use tracing_labeled_logs::infrastructure::mocks::{MockClock, MockSink};
use tracing_labeled_logs::{Emission, LogCallSpec, Logs, Severity};

fn logs() -> (Logs, MockSink, MockClock) {
    let sink = MockSink::new();
    let clock = MockClock::new(1_700_000_000_000);
    let logs = Logs::builder()
        .with_sink(Arc::new(sink.clone()))
        .with_clock(Arc::new(clock.clone()))
        .build();
    (logs, sink, clock)
}

fn messages(sink: &MockSink) -> Vec<String> {
    sink.get_captured().into_iter().map(|c| c.message).collect()
}

#[test]
fn test_every_fifth_call_is_forwarded() {
    let (logs, sink, _clock) = logs();

    let forwarded: Vec<usize> = (1..=20)
        .filter(|_| logs.rate_count(5).info("cache miss", &[]) == Emission::Forwarded)
        .collect();

    assert_eq!(forwarded, vec![1, 6, 11, 16]);
    assert_eq!(sink.count(), 4);
    assert_eq!(messages(&sink)[0], "[rateCount-5] cache miss");
}

#[test]
fn test_time_window() {
    let (logs, sink, clock) = logs();
    let window = Duration::from_millis(1000);

    assert_eq!(logs.rate_time(window).warn("disk slow", &[]), Emission::Forwarded);
    clock.advance_millis(500);
    assert_eq!(logs.rate_time(window).warn("disk slow", &[]), Emission::Suppressed);
    clock.advance_millis(700);
    assert_eq!(logs.rate_time(window).warn("disk slow", &[]), Emission::Forwarded);

    assert_eq!(
        messages(&sink),
        vec!["[rateTime-1000ms] disk slow", "[rateTime-1000ms] disk slow"]
    );
}

#[test]
fn test_suppressed_time_call_does_not_extend_window() {
    let (logs, sink, clock) = logs();
    let window = Duration::from_millis(1000);

    logs.rate_time(window).info("tick", &[]);
    for _ in 0..9 {
        clock.advance_millis(100);
        logs.rate_time(window).info("tick", &[]);
    }
    clock.advance_millis(100);
    logs.rate_time(window).info("tick", &[]);

    assert_eq!(sink.count(), 2);
}

#[test]
fn test_full_prefix_order() {
    let (logs, sink, _clock) = logs();

    logs.label("b")
        .rate_time(Duration::from_secs(2))
        .label("c")
        .rate_count(3)
        .labels(["a"])
        .error("job {} failed", &[&17]);

    let captured = sink.get_captured();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].level, Severity::Error);
    assert_eq!(captured[0].format, "[rateCount-3] [rateTime-2000ms] [a] job {} failed");
    assert_eq!(captured[0].message, "[rateCount-3] [rateTime-2000ms] [a] job 17 failed");
}

#[test]
fn test_count_and_time_combined() {
    let (logs, sink, clock) = logs();
    let call = || {
        logs.rate_count(2)
            .rate_time(Duration::from_millis(100))
            .debug("combined", &[])
    };

    // count allows 1st, time allows it too
    assert_eq!(call(), Emission::Forwarded);
    // count suppresses 2nd
    assert_eq!(call(), Emission::Suppressed);
    // count allows 3rd, time still inside the window
    assert_eq!(call(), Emission::Suppressed);
    clock.advance_millis(100);
    // count suppresses 4th
    assert_eq!(call(), Emission::Suppressed);
    // count allows 5th, time window elapsed
    assert_eq!(call(), Emission::Forwarded);

    assert_eq!(sink.count(), 2);
}

#[test]
fn test_keys_include_arguments_and_level() {
    let (logs, sink, _clock) = logs();

    for user in ["alice", "bob", "alice", "bob"] {
        logs.rate_count(10).warn("login failed for {}", &[&user]);
    }
    logs.rate_count(10).error("login failed for {}", &[&"alice"]);

    assert_eq!(
        messages(&sink),
        vec![
            "[rateCount-10] login failed for alice",
            "[rateCount-10] login failed for bob",
            "[rateCount-10] login failed for alice",
        ]
    );
}

#[test]
fn test_labels_do_not_split_keys() {
    let (logs, sink, _clock) = logs();

    logs.labels(["first"]).rate_count(2).info("shared", &[]);
    logs.labels(["second"]).rate_count(2).info("shared", &[]);

    assert_eq!(messages(&sink), vec!["[rateCount-2] [first] shared"]);
}

#[test]
fn test_unsampled_calls_leave_no_state() {
    let (logs, sink, _clock) = logs();

    for i in 0..50 {
        logs.labels(["plain"]).info("value {}", &[&i]);
    }

    assert_eq!(sink.count(), 50);
    assert_eq!(logs.tracked_keys(), (0, 0));
}

#[test]
fn test_empty_format_is_never_forwarded() {
    let (logs, sink, _clock) = logs();

    assert_eq!(logs.rate_count(1).labels(["x"]).info("", &[&1]), Emission::Skipped);

    assert_eq!(sink.count(), 0);
    assert_eq!(logs.tracked_keys(), (0, 0));
    assert_eq!(logs.metrics().events_skipped(), 1);
}

#[test]
fn test_zero_settings_disable_sampling() {
    let (logs, sink, _clock) = logs();

    for _ in 0..5 {
        logs.rate_count(0).rate_time(Duration::ZERO).info("not sampled", &[]);
    }

    assert_eq!(sink.count(), 5);
    assert_eq!(messages(&sink)[0], "[rateTime-0ms] not sampled");
}

#[test]
fn test_reused_spec() {
    let (logs, sink, _clock) = logs();
    let spec = LogCallSpec::new().with_label("batch").with_rate_count(3);

    for i in 0..6 {
        logs.log(&spec, Severity::Info, "item {}", &[&(i / 6)]);
    }

    assert_eq!(messages(&sink), vec!["[rateCount-3] [batch] item 0"; 2]);
}

#[test]
fn test_independent_contexts() {
    let (first, first_sink, _) = logs();
    let (second, second_sink, _) = logs();

    first.rate_count(100).info("once", &[]);
    first.rate_count(100).info("once", &[]);
    second.rate_count(100).info("once", &[]);

    assert_eq!(first_sink.count(), 1);
    assert_eq!(second_sink.count(), 1);
}

#[test]
fn test_metrics_track_outcomes() {
    let (logs, _sink, clock) = logs();

    for _ in 0..10 {
        logs.rate_count(5).info("counted", &[]);
    }
    logs.rate_time(Duration::from_secs(1)).info("timed", &[]);
    logs.rate_time(Duration::from_secs(1)).info("timed", &[]);
    clock.advance_millis(1_000);
    logs.rate_time(Duration::from_secs(1)).info("timed", &[]);

    let snapshot = logs.metrics().snapshot();
    assert_eq!(snapshot.events_forwarded, 4);
    assert_eq!(snapshot.suppressed_by_count, 8);
    assert_eq!(snapshot.suppressed_by_time, 1);
    assert_eq!(logs.tracked_keys(), (1, 1));
}

#[test]
fn test_watch_logs_slow_task() {
    let (logs, sink, _clock) = logs();

    let value = logs
        .watch(Severity::Warn, "sleepy", None, || {
            std::thread::sleep(Duration::from_millis(5));
            "done"
        })
        .unwrap();

    assert_eq!(value, "done");
    let captured = sink.get_captured();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].level, Severity::Warn);
    assert!(captured[0].message.starts_with("[TimeWatcher] [sleepy] running time : "));
    assert!(captured[0].message.ends_with("ms"));
}

#[test]
fn test_watch_reports_fast_task_in_micros() {
    let (logs, sink, _clock) = logs();

    let value = logs.watch(Severity::Info, "fast", None, || 1).unwrap();

    assert_eq!(value, 1);
    let captured = sink.get_captured();
    assert_eq!(captured.len(), 1);
    assert!(captured[0].message.starts_with("[TimeWatcher] [fast] running time : "));
    assert!(captured[0].message.ends_with("us"));
}

#[test]
fn test_watch_rejects_empty_task_name() {
    let (logs, sink, _clock) = logs();
    let mut ran = false;

    let result = logs.watch(Severity::Info, "", None, || ran = true);

    assert!(result.is_err());
    assert!(!ran);
    assert_eq!(sink.count(), 0);
}
