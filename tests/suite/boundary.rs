//! Adapter behavior across sequences of calls

use bulwark_core::BoundaryAdapter;
use bulwark_types::{ErrorKind, Fault, MIN_MESSAGE_CAPACITY};

use crate::common::{BoundedStore, adapter, divide};

#[test]
fn successful_calls_return_exact_results() {
    let mut adapter = adapter();
    for (a, b) in [(10, 2), (-9, 3), (7, 7), (0, 5)] {
        assert_eq!(adapter.invoke(|| divide(a, b)), a / b);
        assert!(!adapter.has_failed());
        assert_eq!(adapter.last_error_message(), None);
    }
}

#[test]
fn divide_by_zero_reports_range_error() {
    let mut adapter = adapter();
    let result = adapter.invoke(|| divide(42, 0));
    assert_eq!(result, -1);
    assert!(adapter.has_failed());
    assert_eq!(adapter.last_error_kind(), Some(ErrorKind::RangeError));
    assert_eq!(
        adapter.last_error_message(),
        Some("RANGE_ERROR: divisor must be non-zero")
    );
}

#[test]
fn failure_is_forgotten_by_next_call() {
    let mut adapter = adapter();
    adapter.invoke(|| divide(1, 0));
    assert!(adapter.has_failed());

    assert_eq!(adapter.invoke(|| divide(8, 4)), 2);
    assert!(!adapter.has_failed());
    assert_eq!(adapter.last_error_message(), None);
    assert_eq!(adapter.last_error_kind(), None);
    assert_eq!(adapter.last_errno(), None);
}

#[test]
fn store_operations_map_to_each_kind() {
    let mut adapter = adapter();
    let mut store = BoundedStore::new(2);

    adapter.invoke(|| store.put("a", 1));
    adapter.invoke(|| store.put("b", 2));
    assert!(!adapter.has_failed());

    adapter.invoke(|| store.put("c", 3));
    assert_eq!(adapter.last_error_kind(), Some(ErrorKind::OutOfMemory));
    assert_eq!(
        adapter.last_error_message(),
        Some("OUT_OF_MEMORY: store full at 2 entries")
    );

    let long_key = "k".repeat(40);
    adapter.invoke(|| store.put(&long_key, 4));
    assert_eq!(adapter.last_error_kind(), Some(ErrorKind::RangeError));

    assert_eq!(adapter.invoke(|| store.get("zz")), -1);
    assert_eq!(adapter.last_error_kind(), Some(ErrorKind::NotFound));
    assert_eq!(
        adapter.last_error_message(),
        Some("NOT_FOUND: no entry found for key")
    );

    assert_eq!(adapter.invoke(|| store.get("b")), 2);
    assert!(!adapter.has_failed());
    assert_eq!(store.len(), 2);
}

#[test]
fn void_callable_failure_sets_flag_only() {
    let mut adapter = adapter();
    let mut store = BoundedStore::new(0);
    let () = adapter.invoke(|| store.put("x", 1));
    assert!(adapter.has_failed());
    assert_eq!(store.len(), 0);
}

#[test]
fn message_never_exceeds_capacity() {
    let mut adapter = BoundaryAdapter::<MIN_MESSAGE_CAPACITY>::with_message_capacity()
        .with_failure_logging(false);
    for len in [0, 10, 50, 51, 52, 200, 5_000] {
        let description = "é".repeat(len);
        adapter.invoke(move || -> u32 { panic!("{description}") });
        let message = adapter.last_error_message().unwrap();
        assert!(message.len() < MIN_MESSAGE_CAPACITY, "len {len}");
        assert!(message.starts_with("UNSUPPORTED_OPERATION: "));
        assert_eq!(
            adapter.last_error_c_str().unwrap().to_bytes(),
            message.as_bytes()
        );
    }
}

#[test]
fn default_capacity_holds_long_messages() {
    let mut adapter = adapter();
    let description = "x".repeat(4_000);
    let expected_len = "NOT_FOUND: ".len() + description.len();
    adapter.invoke(move || -> i32 { Fault::not_found(description).raise() });
    assert_eq!(adapter.last_error_message().unwrap().len(), expected_len);
    assert!(!adapter.message_truncated());

    let description = "x".repeat(5_000);
    adapter.invoke(move || -> i32 { Fault::not_found(description).raise() });
    assert_eq!(adapter.last_error_message().unwrap().len(), 4_095);
    assert!(adapter.message_truncated());
}

#[test]
fn quiet_hook_keeps_classification_intact() {
    bulwark_core::install_quiet_panic_hook();
    let mut adapter = adapter();
    adapter.invoke(|| -> i32 { panic!("capacity overflow") });
    assert_eq!(adapter.last_error_kind(), Some(ErrorKind::RangeError));
}
