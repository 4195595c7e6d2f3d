//! Experiment behaviour tests
//!
//! Covers both construction styles against the same contract: forced sides,
//! default random selection, custom selectors and `current_side` tracking.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::io;
use std::sync::{Arc, Mutex};

use simple_ab::selector::{self, FixedSelector, RandomSelector};
use simple_ab::{simple_ab, AbTest, ConfigurableAb, Error, ExperimentSummary, Side, SimpleAb};

// =============================================================================
// ConfigurableAb Tests
// =============================================================================

fn side_abc() -> ConfigurableAb<&'static str> {
    ConfigurableAb::new(
        "MyTest",
        [
            ("A", Side::producer(|| "Side A")),
            ("B", Side::producer(|| "Side B")),
            ("C", Side::producer(|| "Side C")),
        ],
    )
    .expect("valid experiment")
}

#[test]
fn test_configurable_force_side_c() {
    let mut test = side_abc();

    assert_eq!(test.test(Some("C")).unwrap(), "Side C");
    assert_eq!(test.current_side(), Some("C"));
}

#[test]
fn test_configurable_every_side_forceable() {
    let mut test = side_abc();

    for side in ["A", "B", "C"] {
        assert_eq!(test.test(Some(side)).unwrap(), format!("Side {side}"));
        assert_eq!(test.current_side(), Some(side));
    }
}

#[test]
fn test_configurable_literal_and_producer_mix() {
    let mut test = ConfigurableAb::builder("Pricing")
        .literal("control", 10)
        .producer("discount", || 10 - 2)
        .build()
        .unwrap();

    assert_eq!(test.test(Some("control")).unwrap(), 10);
    assert_eq!(test.test(Some("discount")).unwrap(), 8);
    assert_eq!(test.allowed_sides(), ["control", "discount"]);
}

#[test]
fn test_configurable_fixed_selector_is_deterministic() {
    let mut test = ConfigurableAb::with_selector(
        "MyTest",
        [("A", Side::literal("a")), ("B", Side::literal("b"))],
        FixedSelector::new("B"),
    )
    .unwrap();

    for _ in 0..25 {
        assert_eq!(test.test(None).unwrap(), "b");
        assert_eq!(test.current_side(), Some("B"));
    }
}

#[test]
fn test_configurable_unknown_force_side() {
    let mut test = side_abc();
    assert!(test.test(Some("Z")).unwrap_err().is_lookup());
    assert_eq!(test.current_side(), None);

    test.test(Some("B")).unwrap();
    assert!(test.test(Some("Z")).is_err());
    assert_eq!(test.current_side(), Some("B"));
}

#[test]
fn test_configurable_producer_runs_only_for_resolved_side() {
    let a_calls = Arc::new(AtomicUsize::new(0));
    let b_calls = Arc::new(AtomicUsize::new(0));
    let (a, b) = (Arc::clone(&a_calls), Arc::clone(&b_calls));

    let mut test = ConfigurableAb::builder("Counting")
        .producer("A", move || a.fetch_add(1, Ordering::SeqCst))
        .producer("B", move || b.fetch_add(1, Ordering::SeqCst))
        .build()
        .unwrap();

    test.test(Some("A")).unwrap();
    test.test(Some("A")).unwrap();
    test.test(Some("B")).unwrap();

    assert_eq!(a_calls.load(Ordering::SeqCst), 2);
    assert_eq!(b_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_configurable_empty_sides() {
    let err = ConfigurableAb::new("Empty", Vec::<(String, Side<()>)>::new()).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_configurable_display() {
    let test = side_abc();
    assert_eq!(
        test.to_string(),
        "ConfigurableAb [name: MyTest, sides: [A, B, C]]"
    );
}

// =============================================================================
// SimpleAb Tests
// =============================================================================

#[test]
fn test_simple_non_contiguous_letters() {
    let mut test = SimpleAb::builder("Sparse")
        .side('A', || "first")
        .side('M', || "middle")
        .side('Z', || "last")
        .build()
        .unwrap();

    assert_eq!(test.allowed_sides(), ["A", "M", "Z"]);
    assert_eq!(test.test(Some("M")).unwrap(), "middle");
    assert_eq!(test.current_side(), Some("M"));
}

#[test]
fn test_simple_no_such_side() {
    let mut test = simple_ab!("MyTest" => { A => "Side A", B => "Side B" }).unwrap();
    let err = test.test(Some("C")).unwrap_err();

    assert!(matches!(err, Error::SideNotImplemented { .. }));
    assert_eq!(test.current_side(), None);
}

#[test]
fn test_simple_seeded_selector_reproducible() {
    fn run(seed: u64) -> Vec<String> {
        let mut test = SimpleAb::builder("Seeded")
            .side('A', || ())
            .side('B', || ())
            .side('C', || ())
            .selector(RandomSelector::seeded(seed))
            .build()
            .unwrap();
        (0..30)
            .map(|_| {
                test.test(None).unwrap();
                test.current_side().unwrap().to_string()
            })
            .collect()
    }

    assert_eq!(run(1234), run(1234));
}

#[test]
fn test_simple_selector_error_propagates() {
    let mut test = SimpleAb::builder("Failing")
        .side('A', || 1)
        .selector(selector::try_from_fn(|| {
            Err::<&str, _>(std::io::Error::other("assignment service unavailable"))
        }))
        .build()
        .unwrap();

    let err = test.test(None).unwrap_err();
    assert!(matches!(err, Error::Strategy(_)));
    assert!(err.to_string().contains("assignment service unavailable"));
    assert_eq!(test.current_side(), None);
}

// =============================================================================
// Summary Tests
// =============================================================================

#[test]
fn test_summary_serialization() {
    let mut test = side_abc();
    test.test(Some("A")).unwrap();

    let summary = test.describe();
    let json = serde_json::to_string(&summary).expect("serialization failed");
    let deserialized: ExperimentSummary =
        serde_json::from_str(&json).expect("deserialization failed");

    assert_eq!(summary, deserialized);
    assert_eq!(deserialized.current_side(), Some("A"));
}

#[test]
fn test_summary_json_shape() {
    let test = simple_ab!("Shape" => { A => 0, B => 1 }).unwrap();
    let json = serde_json::to_value(test.describe()).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "name": "Shape",
            "sides": ["A", "B"],
            "current_side": null
        })
    );
}

// =============================================================================
// Logging
// =============================================================================

/// Collects formatted log lines in memory.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs.contents())
}

#[test]
fn test_configurable_logs_undeclared_selection() {
    let mut test = ConfigurableAb::with_selector(
        "Logged",
        [("A", Side::literal(1))],
        FixedSelector::new("Q"),
    )
    .unwrap();

    let (result, logs) = capture_logs(|| test.test(None));

    assert!(result.unwrap_err().is_lookup());
    assert!(logs.contains("WARN"));
    assert!(logs.contains("selector returned undeclared side"));
    assert!(logs.contains("Logged"));
}

#[test]
fn test_simple_logs_undeclared_selection() {
    let mut test = SimpleAb::builder("LoggedSimple")
        .side('A', || 1)
        .selector(FixedSelector::new("B"))
        .build()
        .unwrap();

    let (result, logs) = capture_logs(|| test.test(None));

    assert!(matches!(result, Err(Error::SideNotImplemented { .. })));
    assert!(logs.contains("selector returned undeclared side"));
}

#[test]
fn test_forced_unknown_side_not_logged_as_warning() {
    let mut test = side_abc();

    let (result, logs) = capture_logs(|| test.test(Some("Z")));

    assert!(result.is_err());
    assert!(!logs.contains("WARN"));
}

#[test]
fn test_resolution_logged_at_debug() {
    let mut test = side_abc();

    let (result, logs) = capture_logs(|| test.test(Some("B")));

    assert_eq!(result.unwrap(), "Side B");
    assert!(logs.contains("resolved side"));
    assert!(logs.contains("forced=true"));
}

// =============================================================================
// Threading
// =============================================================================

#[test]
fn test_instances_usable_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let mut test = ConfigurableAb::new(
                    format!("thread-{i}"),
                    [("A", Side::literal(i)), ("B", Side::literal(i + 10))],
                )
                .unwrap();
                test.test(Some("B")).unwrap()
            })
        })
        .collect();

    let results: Vec<i32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![10, 11, 12, 13]);
}
