//! Tests for deduplicated warnings.
//!
//! The warning set is global, so everything runs in one test.

use quire_common::warning::{clear_warnings, warn_once};

#[test]
fn test_warning_deduplication() {
    assert!(warn_once("tests", "emitted once"));
    assert!(!warn_once("tests", "emitted once"));

    // The component is part of the key.
    assert!(warn_once("tests-a", "shared message"));
    assert!(warn_once("tests-b", "shared message"));

    clear_warnings();
    assert!(warn_once("tests", "emitted once"));
}
