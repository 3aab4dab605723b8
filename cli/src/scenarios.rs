//! Built-in probe scenarios.
//!
//! Each scenario runs one callable through the shared adapter. Together they
//! cover every row of the classification table plus the success paths.

use std::collections::{HashMap, TryReserveError};
use std::hint::black_box;
use std::io;
use std::panic;

use serde::Serialize;

use bulwark_core::BoundaryAdapter;
use bulwark_types::{ErrorKind, Fault};

pub struct Scenario {
    pub name: &'static str,
    run: fn(&mut BoundaryAdapter) -> String,
}

pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "divide",
        run: probe_divide,
    },
    Scenario {
        name: "divide_by_zero",
        run: probe_divide_by_zero,
    },
    Scenario {
        name: "oversized_reserve",
        run: probe_oversized_reserve,
    },
    Scenario {
        name: "pool_exhausted",
        run: probe_pool_exhausted,
    },
    Scenario {
        name: "index_out_of_bounds",
        run: probe_index_out_of_bounds,
    },
    Scenario {
        name: "lookup_present",
        run: probe_lookup_present,
    },
    Scenario {
        name: "missing_key",
        run: probe_missing_key,
    },
    Scenario {
        name: "generic_error",
        run: probe_generic_error,
    },
    Scenario {
        name: "opaque_payload",
        run: probe_opaque_payload,
    },
    Scenario {
        name: "void_failure",
        run: probe_void_failure,
    },
];

#[derive(Debug, Serialize)]
pub struct Outcome {
    pub scenario: &'static str,
    #[serde(flatten)]
    pub status: Status,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Status {
    Ok {
        value: String,
    },
    Failed {
        kind: ErrorKind,
        errno: i32,
        message: String,
    },
}

impl Outcome {
    /// Read the adapter's status right after a scenario ran.
    fn capture(scenario: &'static str, adapter: &BoundaryAdapter, value: String) -> Self {
        let status = match (adapter.last_error_kind(), adapter.last_error_message()) {
            (Some(kind), Some(message)) => Status::Failed {
                kind,
                errno: kind.errno(),
                message: message.to_string(),
            },
            _ => Status::Ok { value },
        };
        Self { scenario, status }
    }

    pub fn render(&self) -> String {
        match &self.status {
            Status::Ok { value } => format!("{}: ok {value}", self.scenario),
            Status::Failed { errno, message, .. } => {
                format!("{}: failed (errno {errno}) {message}", self.scenario)
            }
        }
    }
}

pub fn run_all(adapter: &mut BoundaryAdapter) -> Vec<Outcome> {
    SCENARIOS
        .iter()
        .map(|scenario| {
            let value = (scenario.run)(adapter);
            Outcome::capture(scenario.name, adapter, value)
        })
        .collect()
}

pub fn render_report(outcomes: &[Outcome]) -> String {
    outcomes
        .iter()
        .map(Outcome::render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Integer division that reports a zero divisor or an overflowing quotient as a range fault.
pub fn divide(dividend: i64, divisor: i64) -> i64 {
    if divisor == 0 {
        Fault::range("division by zero").raise();
    }
    dividend
        .checked_div(divisor)
        .unwrap_or_else(|| Fault::range(format!("{dividend} / {divisor} overflows i64")).raise())
}

fn acquire_slot(slots: &mut [bool]) -> usize {
    let index = slots.iter().position(|used| !used).unwrap_or_else(|| {
        Fault::out_of_memory(format!("all {} slots in use", slots.len())).raise()
    });
    slots[index] = true;
    index
}

fn remove_record(records: &mut Vec<u32>, id: u32) {
    let position = records
        .iter()
        .position(|record| *record == id)
        .unwrap_or_else(|| Fault::not_found(format!("record {id} does not exist")).raise());
    records.remove(position);
}

fn probe_divide(adapter: &mut BoundaryAdapter) -> String {
    adapter.invoke(|| divide(84, 2)).to_string()
}

fn probe_divide_by_zero(adapter: &mut BoundaryAdapter) -> String {
    adapter.invoke(|| divide(1, 0)).to_string()
}

fn probe_oversized_reserve(adapter: &mut BoundaryAdapter) -> String {
    adapter
        .invoke_fallible(|| {
            let mut buffer: Vec<u64> = Vec::new();
            buffer.try_reserve(usize::MAX)?;
            Ok::<_, TryReserveError>(buffer.capacity())
        })
        .to_string()
}

fn probe_pool_exhausted(adapter: &mut BoundaryAdapter) -> String {
    let mut slots = [false; 2];
    adapter
        .invoke(|| {
            acquire_slot(&mut slots);
            acquire_slot(&mut slots);
            acquire_slot(&mut slots)
        })
        .to_string()
}

fn probe_index_out_of_bounds(adapter: &mut BoundaryAdapter) -> String {
    let values = vec![3, 1, 4];
    let index = black_box(7);
    adapter.invoke(|| values[index]).to_string()
}

fn probe_lookup_present(adapter: &mut BoundaryAdapter) -> String {
    let table = HashMap::from([("alpha", 1_i64)]);
    adapter.invoke(|| table["alpha"]).to_string()
}

fn probe_missing_key(adapter: &mut BoundaryAdapter) -> String {
    let table = HashMap::from([("alpha", 1_i64)]);
    adapter.invoke(|| table["omega"]).to_string()
}

fn probe_generic_error(adapter: &mut BoundaryAdapter) -> String {
    adapter
        .invoke_fallible(|| -> io::Result<i32> {
            Err(io::Error::other("backend rejected the request"))
        })
        .to_string()
}

fn probe_opaque_payload(adapter: &mut BoundaryAdapter) -> String {
    adapter
        .invoke(|| -> i32 { panic::panic_any(42_u64) })
        .to_string()
}

fn probe_void_failure(adapter: &mut BoundaryAdapter) -> String {
    let mut records = vec![1_u32, 2, 3];
    adapter.invoke(|| remove_record(&mut records, 9));
    format!("{} records", records.len())
}
