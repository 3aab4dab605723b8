//! Shared test utilities and fixtures
//!
//! Common callables used across the integration suites.

#![allow(dead_code)]

use std::collections::BTreeMap;

use bulwark_core::BoundaryAdapter;
use bulwark_types::Fault;

/// Adapter with failure logging off, so test output stays readable.
pub fn adapter() -> BoundaryAdapter {
    BoundaryAdapter::new().with_failure_logging(false)
}

/// Division that signals a zero divisor as a range fault.
pub fn divide(dividend: i32, divisor: i32) -> i32 {
    if divisor == 0 {
        Fault::range("divisor must be non-zero").raise();
    }
    dividend / divisor
}

/// A small bounded store, raising faults the way a C++ container would throw.
pub struct BoundedStore {
    limit: usize,
    entries: BTreeMap<String, i64>,
}

impl BoundedStore {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            entries: BTreeMap::new(),
        }
    }

    pub fn put(&mut self, key: &str, value: i64) {
        if key.len() > 32 {
            Fault::range(format!("key length {} exceeds 32", key.len())).raise();
        }
        if self.entries.len() == self.limit && !self.entries.contains_key(key) {
            Fault::out_of_memory(format!("store full at {} entries", self.limit)).raise();
        }
        self.entries.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> i64 {
        self.entries[key]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
