//! Configuration loading and its effect on adapters

use std::fs;

use bulwark_config::{BoundaryConfig, BulwarkConfig};
use bulwark_core::{BoundaryAdapter, apply_process_settings, panic_hook};

use crate::common::divide;

#[test]
fn config_file_drives_adapter() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[boundary]\nlog_failures = false\nquiet_panics = true\n",
    )
    .unwrap();

    let config = BulwarkConfig::load_from(&path).unwrap().boundary();
    assert_eq!(
        config,
        BoundaryConfig {
            log_failures: false,
            quiet_panics: true,
        }
    );

    apply_process_settings(&config);
    assert!(panic_hook::quiet_panic_hook_installed());

    let mut adapter = BoundaryAdapter::from_config(&config);
    assert_eq!(adapter.invoke(|| divide(3, 0)), -1);
    assert_eq!(
        adapter.last_error_message(),
        Some("RANGE_ERROR: divisor must be non-zero")
    );
}

#[test]
fn defaults_leave_process_untouched() {
    let config = BoundaryConfig::default();
    assert!(config.log_failures);
    assert!(!config.quiet_panics);
    apply_process_settings(&config);
}
