//! Cache module - storage backends for pending OTP entries
//!
//! - [`InMemoryOtpStore`]: single-process map, the default backend
//! - [`RedisOtpStore`]: shared Redis backend for multi-instance deployments

pub mod memory_store;
#[cfg(feature = "redis-cache")]
pub mod redis_client;
#[cfg(feature = "redis-cache")]
pub mod redis_store;

#[cfg(test)]
mod tests;

pub use memory_store::InMemoryOtpStore;
#[cfg(feature = "redis-cache")]
pub use redis_client::RedisClient;
#[cfg(feature = "redis-cache")]
pub use redis_store::RedisOtpStore;

pub use pv_shared::config::CacheConfig;
