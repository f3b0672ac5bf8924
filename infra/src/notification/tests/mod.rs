//! Unit tests for notification channels

mod center_tests;
