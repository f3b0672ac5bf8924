//! Unit tests for OTP stores

mod memory_store_tests;
#[cfg(feature = "redis-cache")]
mod redis_store_tests;
