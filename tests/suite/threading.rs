//! Thread affinity: one adapter per thread, or a lock around a shared one

use std::sync::{Arc, Mutex};
use std::thread;

use bulwark_types::ErrorKind;

use crate::common::{adapter, divide};

#[test]
fn adapter_per_thread_reports_independently() {
    let handles: Vec<_> = (0..4)
        .map(|worker| {
            thread::spawn(move || {
                let mut adapter = adapter();
                let mut failures = 0;
                for i in 0..100 {
                    let divisor = if (i + worker) % 5 == 0 { 0 } else { i + 1 };
                    let quotient = adapter.invoke(|| divide(1_000, divisor));
                    if divisor == 0 {
                        assert!(adapter.has_failed());
                        assert_eq!(adapter.last_error_kind(), Some(ErrorKind::RangeError));
                        failures += 1;
                    } else {
                        assert!(!adapter.has_failed());
                        assert_eq!(quotient, 1_000 / divisor);
                    }
                }
                failures
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 20);
    }
}

#[test]
fn shared_adapter_behind_mutex() {
    let shared = Arc::new(Mutex::new(adapter()));
    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for i in 0..50 {
                    let divisor = (i + worker) % 3;
                    let mut adapter = shared.lock().unwrap();
                    let quotient = adapter.invoke(|| divide(60, divisor));
                    // Status is read under the same lock as the call.
                    assert_eq!(adapter.has_failed(), divisor == 0);
                    if divisor != 0 {
                        assert_eq!(quotient, 60 / divisor);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn adapter_moves_into_worker() {
    let mut adapter = adapter();
    adapter.invoke(|| divide(1, 0));
    let adapter = thread::spawn(move || {
        assert!(adapter.has_failed());
        adapter
    })
    .join()
    .unwrap();
    assert!(adapter.has_failed());
}
