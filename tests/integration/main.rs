//! Integration test harness. Tests run against a live server:
//! start one with a clean database, then `cargo test -- --ignored`.

mod api_tests;
